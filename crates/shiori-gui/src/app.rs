use std::time::Duration;

use iced::widget::{button, column, container, mouse_area, row, scrollable, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};

use shiori_api::{AddOutcome, TrackerClient};
use shiori_api::types::UpdateAction;
use shiori_core::config::{AppConfig, ThemeMode};
use shiori_core::hold::{HoldAction, HoldController};
use shiori_core::models::Anime;
use shiori_core::store::ListStore;

use crate::cover_cache::{self, CoverCache, CoverState};
use crate::search;
use crate::style;
use crate::subscription;
use crate::theme::{self, ColorScheme};
use crate::toast::{self, Toast, ToastKind, AUTO_DISMISS_SECS};
use crate::widgets;

/// What kind of modal is currently shown.
#[derive(Debug, Clone)]
pub enum ModalKind {
    Details(i64),
    ConfirmRemove { id: i64, title: String },
}

/// Application state.
///
/// The list store is the single source of truth for tracked entries;
/// `order` is the derived visual sequence over it. Everything else is
/// transient UI state.
pub struct Shiori {
    config: AppConfig,
    client: TrackerClient,
    store: ListStore,
    order: Vec<i64>,
    list_loaded: bool,
    search: search::SearchPanel,
    covers: CoverCache,
    hold: HoldController,
    toast: Option<Toast>,
    toast_seq: u64,
    modal: Option<ModalKind>,
    active_mode: ThemeMode,
    scheme: ColorScheme,
}

/// All messages the application can handle.
#[derive(Debug, Clone)]
pub enum Message {
    SnapshotLoaded(Result<Vec<Anime>, String>),
    Search(search::Message),
    AddDone(Result<AddOutcome, String>),
    CardOpened(i64),
    RemoveRequested { id: i64, title: String },
    RemoveConfirmed(i64),
    RemoveDone { id: i64, result: Result<(), String> },
    DismissModal,
    HoldStarted { id: i64, action: HoldAction },
    HoldReleased,
    HoldTick,
    EpisodeUpdated { id: i64, result: Result<u32, String> },
    ThemeToggled,
    ToastExpired(u64),
    DismissToast,
    CoverLoaded {
        id: i64,
        result: Result<std::path::PathBuf, String>,
    },
}

impl Shiori {
    pub fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            AppConfig::default()
        });
        let active_mode = theme::resolve_mode(config.appearance.mode);
        let scheme = ColorScheme::for_mode(active_mode);
        let client = TrackerClient::new(&config.server.base_url);

        let fetch = {
            let client = client.clone();
            Task::perform(
                async move { client.list().await.map_err(|e| e.to_string()) },
                Message::SnapshotLoaded,
            )
        };

        let app = Self {
            config,
            client,
            store: ListStore::new(),
            order: Vec::new(),
            list_loaded: false,
            search: search::SearchPanel::new(),
            covers: CoverCache::new(),
            hold: HoldController::new(),
            toast: None,
            toast_seq: 0,
            modal: None,
            active_mode,
            scheme,
        };
        (app, fetch)
    }

    pub fn title(&self) -> String {
        String::from("Shiori")
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SnapshotLoaded(result) => match result {
                Ok(snapshot) => {
                    let cover_info: Vec<(i64, Option<String>)> = snapshot
                        .iter()
                        .map(|a| (a.id, a.image_url.clone()))
                        .collect();
                    self.store.load(snapshot);
                    let ids: Vec<i64> = self.store.ids().collect();
                    self.order = self.store.resort(&ids);
                    self.list_loaded = true;
                    self.batch_request_covers(cover_info)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load the list snapshot");
                    self.list_loaded = true;
                    self.show_toast("Could not load your list", ToastKind::Error)
                }
            },
            Message::Search(msg) => {
                let action = self.search.update(msg, &self.client);
                self.handle_search_action(action)
            }
            Message::AddDone(result) => match result {
                Ok(AddOutcome::Added(anime)) => {
                    let cover = self.request_cover(anime.id, anime.image_url.clone());
                    let message = format!("Added {} to your list", anime.title);
                    self.order.push(anime.id);
                    self.store.insert(anime);
                    self.order = self.store.resort(&self.order);
                    Task::batch([cover, self.show_toast(message, ToastKind::Success)])
                }
                Ok(AddOutcome::Rejected(message)) => {
                    // Server explained the refusal; surface it verbatim.
                    self.show_toast(message, ToastKind::Error)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "add request failed");
                    self.show_toast("Could not add anime", ToastKind::Error)
                }
            },
            Message::CardOpened(id) => {
                // Ignore stale clicks on entries that are already gone.
                if self.store.contains(id) {
                    self.modal = Some(ModalKind::Details(id));
                }
                Task::none()
            }
            Message::RemoveRequested { id, title } => {
                self.modal = Some(ModalKind::ConfirmRemove { id, title });
                Task::none()
            }
            Message::RemoveConfirmed(id) => {
                self.modal = None;
                let client = self.client.clone();
                Task::perform(
                    async move { client.remove(id).await.map_err(|e| e.to_string()) },
                    move |result| Message::RemoveDone { id, result },
                )
            }
            Message::RemoveDone { id, result } => match result {
                Ok(()) => {
                    // Backend confirmed; only now touch local state.
                    let removed = self.store.remove(id);
                    self.order.retain(|&o| o != id);
                    let message = match removed {
                        Some(anime) => format!("Removed {} from your list", anime.title),
                        None => "Removed from your list".to_string(),
                    };
                    self.show_toast(message, ToastKind::Success)
                }
                Err(e) => {
                    tracing::warn!(error = %e, id, "remove request failed");
                    self.show_toast("Could not remove anime", ToastKind::Error)
                }
            },
            Message::DismissModal => {
                self.modal = None;
                Task::none()
            }
            Message::HoldStarted { id, action } => {
                let (id, action) = self.hold.press(id, action);
                self.spawn_episode_update(id, action)
            }
            Message::HoldTick => match self.hold.tick() {
                Some((id, action)) => self.spawn_episode_update(id, action),
                None => Task::none(),
            },
            Message::HoldReleased => {
                self.hold.release();
                Task::none()
            }
            Message::EpisodeUpdated { id, result } => match result {
                Ok(watched) => {
                    // Re-sort only when the completion boundary was crossed.
                    if self.store.set_watched(id, watched) == Some(true) {
                        self.order = self.store.resort(&self.order);
                    }
                    Task::none()
                }
                Err(e) => {
                    tracing::warn!(error = %e, id, "episode update failed");
                    self.show_toast("Could not update episode count", ToastKind::Error)
                }
            },
            Message::ThemeToggled => {
                self.active_mode = match self.active_mode {
                    ThemeMode::Light => ThemeMode::Dark,
                    _ => ThemeMode::Light,
                };
                self.scheme = ColorScheme::for_mode(self.active_mode);
                // Persist the concrete choice; failures only warn.
                self.config.appearance.mode = self.active_mode;
                if let Err(e) = self.config.save() {
                    tracing::warn!(error = %e, "failed to persist theme preference");
                }
                Task::none()
            }
            Message::ToastExpired(id) => {
                // A newer toast restarts the clock; ignore the old expiry.
                if self.toast.as_ref().is_some_and(|t| t.id == id) {
                    self.toast = None;
                }
                Task::none()
            }
            Message::DismissToast => {
                self.toast = None;
                Task::none()
            }
            Message::CoverLoaded { id, result } => {
                let state = match result {
                    Ok(path) => CoverState::Loaded(path),
                    Err(e) => {
                        tracing::debug!(error = %e, id, "cover download failed");
                        CoverState::Failed
                    }
                };
                self.covers.set(id, state);
                Task::none()
            }
        }
    }

    fn handle_search_action(&mut self, action: search::Action) -> Task<Message> {
        match action {
            search::Action::None => Task::none(),
            search::Action::RunTask(task) => task,
            search::Action::Add(aid) => {
                let client = self.client.clone();
                Task::perform(
                    async move { client.add(aid).await.map_err(|e| e.to_string()) },
                    Message::AddDone,
                )
            }
        }
    }

    fn spawn_episode_update(&self, id: i64, action: HoldAction) -> Task<Message> {
        let client = self.client.clone();
        let action = match action {
            HoldAction::Increment => UpdateAction::Increment,
            HoldAction::Decrement => UpdateAction::Decrement,
        };
        Task::perform(
            async move { client.update(id, action).await.map_err(|e| e.to_string()) },
            move |result| Message::EpisodeUpdated { id, result },
        )
    }

    /// Replace the banner and schedule its 4-second expiry.
    fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) -> Task<Message> {
        self.toast_seq += 1;
        let id = self.toast_seq;
        self.toast = Some(Toast {
            id,
            message: message.into(),
            kind,
        });
        Task::perform(
            async move { tokio::time::sleep(Duration::from_secs(AUTO_DISMISS_SECS)).await },
            move |_| Message::ToastExpired(id),
        )
    }

    /// Kick off a cover download for an entry, unless one was already
    /// requested or the file is still on disk from an earlier run.
    fn request_cover(&mut self, id: i64, image_url: Option<String>) -> Task<Message> {
        if self.covers.contains(id) {
            return Task::none();
        }
        let Some(image_path) = image_url else {
            self.covers.set(id, CoverState::Failed);
            return Task::none();
        };
        let dest = self.covers.disk_path(&image_path);
        if dest.exists() {
            self.covers.set(id, CoverState::Loaded(dest));
            return Task::none();
        }
        self.covers.set(id, CoverState::Loading);
        let client = self.client.clone();
        Task::perform(
            async move { cover_cache::download(client, image_path, dest).await },
            move |result| Message::CoverLoaded { id, result },
        )
    }

    fn batch_request_covers(&mut self, items: Vec<(i64, Option<String>)>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = items
            .into_iter()
            .map(|(id, url)| self.request_cover(id, url))
            .collect();
        if tasks.is_empty() {
            Task::none()
        } else {
            Task::batch(tasks)
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subs = Vec::new();
        if self.hold.is_active() {
            subs.push(subscription::hold_repeat());
        }
        if self.modal.is_some() {
            subs.push(subscription::escape_key());
        }
        Subscription::batch(subs)
    }

    pub fn theme(&self) -> Theme {
        theme::build_theme(&self.scheme)
    }

    pub fn view(&self) -> Element<'_, Message> {
        let cs = &self.scheme;

        let theme_icon = match self.active_mode {
            ThemeMode::Light => lucide_icons::iced::icon_moon(),
            _ => lucide_icons::iced::icon_sun(),
        };
        let header = row![
            text("Shiori").size(style::TEXT_XL).color(cs.on_surface),
            iced::widget::Space::new().width(Length::Fill),
            self.search.view(cs).map(Message::Search),
            button(theme_icon.size(style::TEXT_LG))
                .padding(style::SPACE_SM)
                .on_press(Message::ThemeToggled)
                .style(theme::icon_button(cs)),
        ]
        .spacing(style::SPACE_MD)
        .align_y(Alignment::Start)
        .padding([style::SPACE_MD, style::SPACE_XL]);

        let list: Element<'_, Message> = if self.list_loaded && self.store.is_empty() {
            widgets::empty_state(
                cs,
                lucide_icons::iced::icon_tv()
                    .size(style::TEXT_3XL)
                    .color(cs.outline)
                    .into(),
                "Nothing tracked yet",
                "Search above to add your first anime",
            )
        } else {
            let cards: Vec<Element<'_, Message>> = self
                .order
                .iter()
                .filter_map(|id| self.store.get(*id))
                .map(|anime| {
                    widgets::anime_card(
                        cs,
                        &self.covers,
                        anime,
                        Message::CardOpened(anime.id),
                        Message::RemoveRequested {
                            id: anime.id,
                            title: anime.title.clone(),
                        },
                        Message::HoldStarted {
                            id: anime.id,
                            action: HoldAction::Decrement,
                        },
                        Message::HoldStarted {
                            id: anime.id,
                            action: HoldAction::Increment,
                        },
                    )
                })
                .collect();

            let grid = iced_aw::Wrap::with_elements(cards)
                .spacing(style::SPACE_MD)
                .line_spacing(style::SPACE_MD);

            // Pointer-up anywhere over the grid, or leaving it entirely,
            // ends a press-and-hold.
            mouse_area(
                scrollable(container(grid).padding([style::SPACE_SM, style::SPACE_XL]))
                    .height(Length::Fill)
                    .width(Length::Fill),
            )
            .on_release(Message::HoldReleased)
            .on_exit(Message::HoldReleased)
            .into()
        };

        let content: Element<'_, Message> = column![header, list].height(Length::Fill).into();

        let main: Element<'_, Message> = match &self.toast {
            Some(t) => iced::widget::stack([
                content,
                toast::banner(cs, t, Message::DismissToast),
            ])
            .into(),
            None => content,
        };

        if let Some(kind) = &self.modal {
            let dialog = self.build_modal_content(cs, kind);
            widgets::modal(cs, main, dialog, Message::DismissModal)
        } else {
            main
        }
    }

    fn build_modal_content<'a>(&'a self, cs: &ColorScheme, kind: &'a ModalKind) -> Element<'a, Message> {
        match kind {
            ModalKind::Details(id) => {
                let Some(anime) = self.store.get(*id) else {
                    // Entry vanished while the modal was open.
                    return container(text("")).into();
                };

                let cover = widgets::cover_art(
                    cs,
                    &self.covers,
                    anime.id,
                    style::DETAIL_COVER_WIDTH,
                    style::DETAIL_COVER_HEIGHT,
                );

                let mut meta = column![
                    text(anime.title.as_str())
                        .size(style::TEXT_XL)
                        .line_height(style::LINE_HEIGHT_TIGHT),
                ]
                .spacing(style::SPACE_SM);

                if !anime.anime_type.is_empty() {
                    meta = meta.push(
                        text(anime.anime_type.as_str())
                            .size(style::TEXT_SM)
                            .color(cs.on_surface_variant),
                    );
                }
                let dates = anime.date_range();
                if !dates.is_empty() {
                    meta = meta.push(
                        text(dates)
                            .size(style::TEXT_SM)
                            .color(cs.on_surface_variant),
                    );
                }
                let episodes = if anime.total_episodes > 0 {
                    format!(
                        "Episodes: {} / {}",
                        anime.watched_episodes, anime.total_episodes
                    )
                } else {
                    format!("Episodes: {}", anime.watched_episodes)
                };
                meta = meta.push(
                    text(episodes)
                        .size(style::TEXT_SM)
                        .color(cs.on_surface_variant),
                );
                if !anime.description.is_empty() {
                    meta = meta.push(
                        scrollable(
                            text(anime.description.as_str())
                                .size(style::TEXT_SM)
                                .line_height(style::LINE_HEIGHT_NORMAL),
                        )
                        .height(Length::Fixed(160.0)),
                    );
                }

                container(
                    row![cover, meta.width(Length::Fixed(360.0))].spacing(style::SPACE_XL),
                )
                .style(theme::dialog_container(cs))
                .padding(style::SPACE_2XL)
                .into()
            }
            ModalKind::ConfirmRemove { id, title } => {
                let id = *id;
                container(
                    column![
                        text("Remove from your list?")
                            .size(style::TEXT_LG)
                            .line_height(style::LINE_HEIGHT_TIGHT),
                        text(title.as_str())
                            .size(style::TEXT_SM)
                            .color(cs.on_surface_variant)
                            .line_height(style::LINE_HEIGHT_LOOSE),
                        row![
                            button(text("Cancel").size(style::TEXT_SM))
                                .padding([style::SPACE_SM, style::SPACE_XL])
                                .on_press(Message::DismissModal)
                                .style(theme::ghost_button(cs)),
                            button(text("Remove").size(style::TEXT_SM))
                                .padding([style::SPACE_SM, style::SPACE_XL])
                                .on_press(Message::RemoveConfirmed(id))
                                .style(theme::danger_button(cs)),
                        ]
                        .spacing(style::SPACE_SM),
                    ]
                    .spacing(style::SPACE_LG),
                )
                .style(theme::dialog_container(cs))
                .padding(style::SPACE_2XL)
                .into()
            }
        }
    }
}
