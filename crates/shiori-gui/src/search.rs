use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length, Task};

use shiori_api::types::SearchHit;
use shiori_api::TrackerClient;
use shiori_core::debounce::{Debouncer, DEBOUNCE, MIN_QUERY_LEN};

use crate::app;
use crate::style;
use crate::theme::{self, ColorScheme};

/// Messages handled by the search panel.
#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    DebounceElapsed(u64),
    ResultsLoaded {
        generation: u64,
        page: u32,
        result: Result<(Vec<SearchHit>, u32), String>,
    },
    ShowMore,
    HitSelected(u64),
    Clear,
}

/// What the panel asks the app to do after handling a message.
pub enum Action {
    None,
    /// Run an async Iced task that eventually produces an app::Message.
    RunTask(Task<app::Message>),
    /// The user picked a catalog hit; the app runs the add flow.
    Add(u64),
}

/// The transient search session over the catalog.
///
/// Results and pagination live here, never in the list store. The
/// debounce generation doubles as a response guard: every request is
/// tagged with the generation it was issued under, and responses from
/// superseded generations are dropped, so a slow early page can never
/// overwrite a newer query's results.
pub struct SearchPanel {
    query: String,
    page: u32,
    total: u32,
    hits: Vec<SearchHit>,
    debounce: Debouncer,
    generation: u64,
    loading: bool,
}

impl SearchPanel {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            page: 0,
            total: 0,
            hits: Vec::new(),
            debounce: Debouncer::new(),
            generation: 0,
            loading: false,
        }
    }

    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    pub fn update(&mut self, message: Message, client: &TrackerClient) -> Action {
        match message {
            Message::QueryChanged(query) => {
                self.query = query;
                if self.query.trim().chars().count() < MIN_QUERY_LEN {
                    // Too short to search: clear the surface and suspend.
                    self.debounce.cancel();
                    self.reset_results();
                    return Action::None;
                }
                // Every keystroke clears the surface; old hits never
                // linger through the debounce window.
                self.reset_results();
                let generation = self.debounce.arm();
                Action::RunTask(Task::perform(
                    async move { tokio::time::sleep(DEBOUNCE).await },
                    move |_| app::Message::Search(Message::DebounceElapsed(generation)),
                ))
            }
            Message::DebounceElapsed(generation) => {
                if !self.debounce.is_current(generation) {
                    return Action::None;
                }
                self.generation = generation;
                self.loading = true;
                self.request_page(client, generation, 1)
            }
            Message::ResultsLoaded {
                generation,
                page,
                result,
            } => {
                if !self.debounce.is_current(generation) {
                    tracing::debug!(generation, "dropping stale search response");
                    return Action::None;
                }
                self.loading = false;
                match result {
                    Ok((hits, total)) => {
                        if page == 1 {
                            self.hits = hits;
                        } else {
                            self.hits.extend(hits);
                        }
                        self.total = total;
                        self.page = page;
                    }
                    Err(e) => {
                        // Leave the surface as it was.
                        tracing::warn!(error = %e, "search request failed");
                    }
                }
                Action::None
            }
            Message::ShowMore => {
                if self.loading || !self.has_more() {
                    return Action::None;
                }
                self.loading = true;
                self.request_page(client, self.generation, self.page + 1)
            }
            Message::HitSelected(aid) => {
                self.clear();
                Action::Add(aid)
            }
            Message::Clear => {
                self.clear();
                Action::None
            }
        }
    }

    fn request_page(&self, client: &TrackerClient, generation: u64, page: u32) -> Action {
        let client = client.clone();
        let query = self.query.trim().to_string();
        Action::RunTask(Task::perform(
            async move {
                client
                    .search(&query, page)
                    .await
                    .map(|p| (p.hits, p.total))
                    .map_err(|e| e.to_string())
            },
            move |result| {
                app::Message::Search(Message::ResultsLoaded {
                    generation,
                    page,
                    result,
                })
            },
        ))
    }

    fn clear(&mut self) {
        self.query.clear();
        self.debounce.cancel();
        self.reset_results();
    }

    fn reset_results(&mut self) {
        self.hits.clear();
        self.total = 0;
        self.page = 0;
        self.loading = false;
    }

    fn has_more(&self) -> bool {
        (self.hits.len() as u32) < self.total
    }

    /// A search completed and came back empty. `page` only advances
    /// past zero when a response lands, so this stays false for the
    /// untouched panel and while a request is still in flight.
    pub fn searched_empty(&self) -> bool {
        !self.loading && self.page > 0 && self.hits.is_empty()
    }

    pub fn view(&self, cs: &ColorScheme) -> Element<'_, Message> {
        let input = text_input("Search for anime to add...", &self.query)
            .on_input(Message::QueryChanged)
            .size(style::TEXT_SM)
            .padding([style::SPACE_SM, style::SPACE_MD])
            .style(theme::text_input_style(cs));

        let mut bar = row![input].spacing(style::SPACE_XS).align_y(Alignment::Center);
        if !self.query.is_empty() {
            bar = bar.push(
                button(
                    lucide_icons::iced::icon_x()
                        .size(style::TEXT_SM)
                        .color(cs.on_surface_variant),
                )
                .padding(style::SPACE_XS)
                .on_press(Message::Clear)
                .style(theme::icon_button(cs)),
            );
        }

        let mut panel = column![bar].spacing(style::SPACE_XS);

        if !self.hits.is_empty() {
            let mut results = column![].spacing(style::SPACE_XXS);
            for hit in &self.hits {
                results = results.push(
                    button(
                        text(hit.title.as_str())
                            .size(style::TEXT_SM)
                            .line_height(style::LINE_HEIGHT_NORMAL),
                    )
                    .padding([style::SPACE_XS, style::SPACE_SM])
                    .width(Length::Fill)
                    .on_press(Message::HitSelected(hit.aid))
                    .style(theme::search_result_item(cs)),
                );
            }

            if self.has_more() {
                let label = if self.loading {
                    "Loading..."
                } else {
                    "Show more"
                };
                let mut more = button(text(label).size(style::TEXT_SM))
                    .padding([style::SPACE_XS, style::SPACE_SM])
                    .width(Length::Fill)
                    .style(theme::primary_button(cs));
                if !self.loading {
                    more = more.on_press(Message::ShowMore);
                }
                results = results.push(more);
            }

            panel = panel.push(
                container(results)
                    .style(theme::card(cs))
                    .padding(style::SPACE_XS)
                    .width(Length::Fill),
            );
        } else if self.loading {
            panel = panel.push(
                text("Searching...")
                    .size(style::TEXT_XS)
                    .color(cs.on_surface_variant),
            );
        } else if self.searched_empty() {
            panel = panel.push(
                container(
                    text("No results found.")
                        .size(style::TEXT_SM)
                        .color(cs.on_surface_variant),
                )
                .style(theme::card(cs))
                .padding([style::SPACE_XS, style::SPACE_SM])
                .width(Length::Fill),
            );
        }

        container(panel)
            .width(Length::Fixed(style::SEARCH_BAR_WIDTH))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TrackerClient {
        TrackerClient::new("http://127.0.0.1:5000")
    }

    fn hit(aid: u64, title: &str) -> SearchHit {
        SearchHit {
            aid,
            title: title.into(),
        }
    }

    fn loaded(generation: u64, page: u32, hits: Vec<SearchHit>, total: u32) -> Message {
        Message::ResultsLoaded {
            generation,
            page,
            result: Ok((hits, total)),
        }
    }

    #[test]
    fn test_short_query_clears_results() {
        let mut panel = SearchPanel::new();
        let c = client();

        panel.update(Message::QueryChanged("mononoke".into()), &c);
        panel.update(Message::DebounceElapsed(1), &c);
        panel.update(loaded(1, 1, vec![hit(1, "Mononoke")], 1), &c);
        assert_eq!(panel.hits().len(), 1);

        let action = panel.update(Message::QueryChanged("m".into()), &c);
        assert!(matches!(action, Action::None));
        assert!(panel.hits().is_empty());
    }

    #[test]
    fn test_keystroke_clears_previous_hits() {
        let mut panel = SearchPanel::new();
        let c = client();

        panel.update(Message::QueryChanged("akira".into()), &c);
        panel.update(Message::DebounceElapsed(1), &c);
        panel.update(loaded(1, 1, vec![hit(7, "Akira")], 1), &c);
        assert_eq!(panel.hits().len(), 1);

        // Old hits must not linger while the new query debounces.
        let action = panel.update(Message::QueryChanged("akira movie".into()), &c);
        assert!(matches!(action, Action::RunTask(_)));
        assert!(panel.hits().is_empty());
    }

    #[test]
    fn test_empty_response_is_distinct_from_never_searched() {
        let mut panel = SearchPanel::new();
        let c = client();
        assert!(!panel.searched_empty());

        panel.update(Message::QueryChanged("zzzzzz".into()), &c);
        panel.update(Message::DebounceElapsed(1), &c);
        assert!(!panel.searched_empty()); // still in flight

        panel.update(loaded(1, 1, vec![], 0), &c);
        assert!(panel.searched_empty());

        // Dropping below the minimum query length resets the surface.
        panel.update(Message::QueryChanged("z".into()), &c);
        assert!(!panel.searched_empty());
    }

    #[test]
    fn test_superseded_debounce_does_not_fire() {
        let mut panel = SearchPanel::new();
        let c = client();

        // Two keystrokes inside the window: generations 1 and 2.
        panel.update(Message::QueryChanged("na".into()), &c);
        panel.update(Message::QueryChanged("nar".into()), &c);

        let action = panel.update(Message::DebounceElapsed(1), &c);
        assert!(matches!(action, Action::None));

        let action = panel.update(Message::DebounceElapsed(2), &c);
        assert!(matches!(action, Action::RunTask(_)));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut panel = SearchPanel::new();
        let c = client();

        panel.update(Message::QueryChanged("ak".into()), &c);
        panel.update(Message::DebounceElapsed(1), &c);
        // New query supersedes before the first response lands.
        panel.update(Message::QueryChanged("akira".into()), &c);
        panel.update(Message::DebounceElapsed(2), &c);

        panel.update(loaded(1, 1, vec![hit(99, "Wrong")], 1), &c);
        assert!(panel.hits().is_empty());

        panel.update(loaded(2, 1, vec![hit(7, "Akira")], 1), &c);
        assert_eq!(panel.hits().len(), 1);
        assert_eq!(panel.hits()[0].aid, 7);
    }

    #[test]
    fn test_show_more_appends() {
        let mut panel = SearchPanel::new();
        let c = client();

        panel.update(Message::QueryChanged("monogatari".into()), &c);
        panel.update(Message::DebounceElapsed(1), &c);
        panel.update(
            loaded(1, 1, vec![hit(1, "Bakemonogatari"), hit(2, "Nisemonogatari")], 5),
            &c,
        );
        assert_eq!(panel.hits().len(), 2);

        let action = panel.update(Message::ShowMore, &c);
        assert!(matches!(action, Action::RunTask(_)));

        panel.update(
            loaded(1, 2, vec![hit(3, "Owarimonogatari"), hit(4, "Hanamonogatari")], 5),
            &c,
        );
        assert_eq!(panel.hits().len(), 4);
        assert_eq!(panel.hits()[0].aid, 1);
        assert_eq!(panel.hits()[3].aid, 4);
    }

    #[test]
    fn test_show_more_is_a_noop_when_exhausted() {
        let mut panel = SearchPanel::new();
        let c = client();

        panel.update(Message::QueryChanged("akira".into()), &c);
        panel.update(Message::DebounceElapsed(1), &c);
        panel.update(loaded(1, 1, vec![hit(7, "Akira")], 1), &c);

        let action = panel.update(Message::ShowMore, &c);
        assert!(matches!(action, Action::None));
    }

    #[test]
    fn test_selecting_a_hit_clears_and_requests_add() {
        let mut panel = SearchPanel::new();
        let c = client();

        panel.update(Message::QueryChanged("akira".into()), &c);
        panel.update(Message::DebounceElapsed(1), &c);
        panel.update(loaded(1, 1, vec![hit(7, "Akira")], 1), &c);

        let action = panel.update(Message::HitSelected(7), &c);
        assert!(matches!(action, Action::Add(7)));
        assert!(panel.hits().is_empty());
    }
}
