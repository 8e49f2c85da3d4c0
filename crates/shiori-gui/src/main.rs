mod app;
mod cover_cache;
mod search;
mod style;
mod subscription;
mod theme;
mod toast;
mod widgets;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter("shiori=debug")
        .init();

    iced::application(app::Shiori::new, app::Shiori::update, app::Shiori::view)
        .title(app::Shiori::title)
        .subscription(app::Shiori::subscription)
        .theme(app::Shiori::theme)
        .font(lucide_icons::LUCIDE_FONT_BYTES)
        .window(iced::window::Settings {
            size: iced::Size::new(1100.0, 760.0),
            position: iced::window::Position::Centered,
            ..Default::default()
        })
        .run()
}
