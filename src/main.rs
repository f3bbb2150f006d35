mod browse;
mod cards;
mod components;
mod detail_handlers;
mod detail_popup;
mod handlers;
mod mapper;
mod media;
mod overlay;
mod results;
mod settings;
mod tmdb;

use iced::widget::container;
use iced::{keyboard, Element, Font, Length, Size, Subscription, Task, Theme};
use tracing_subscriber::EnvFilter;

use browse::BrowseState;
use media::{ImageCache, Message, SearchKind, BACKGROUND_BLACK};
use overlay::DetailOverlay;
use results::ResultList;
use settings::{AppSettings, SetupPage};
use tmdb::TmdbClient;

/// Contents of the header search form.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    pub query: String,
    pub kind: SearchKind,
    pub year: String,
    /// Year text the last search dropped because it was not a usable year.
    pub ignored_year: Option<String>,
}

impl SearchForm {
    /// Non-numeric or out-of-range years are dropped rather than sent.
    pub fn parsed_year(&self) -> Option<u16> {
        let year = self.year.trim();
        if year.is_empty() {
            return None;
        }
        match year.parse::<u16>() {
            Ok(y) if (1800..=9999).contains(&y) => Some(y),
            _ => None,
        }
    }

    /// Year filter for a search being submitted. Remembers rejected input
    /// so the header can say the filter was not applied.
    pub fn year_filter(&mut self) -> Option<u16> {
        let year = self.parsed_year();
        self.ignored_year = match year {
            None if !self.year.trim().is_empty() => {
                tracing::info!(year = self.year.trim(), "ignoring invalid year filter");
                Some(self.year.trim().to_string())
            }
            _ => None,
        };
        year
    }
}

#[derive(Default)]
pub struct Showfinder {
    pub setup_page: Option<SetupPage>,
    pub tmdb_client: Option<TmdbClient>,
    pub search_form: SearchForm,
    pub browse: BrowseState,
    pub results: ResultList,
    pub overlay: DetailOverlay,
    pub image_cache: ImageCache,
}

impl Showfinder {
    fn new() -> (Self, Task<Message>) {
        let settings = match AppSettings::load() {
            Some(s) if s.is_valid() => s,
            _ => {
                tracing::info!("no API key configured, showing setup");
                return (
                    Self {
                        setup_page: Some(SetupPage::default()),
                        ..Default::default()
                    },
                    Task::none(),
                );
            }
        };

        let mut app = Self {
            image_cache: ImageCache::new(),
            ..Default::default()
        };
        let task = app.initialize_with_settings(settings);
        (app, task)
    }

    fn initialize_with_settings(&mut self, settings: AppSettings) -> Task<Message> {
        self.tmdb_client = Some(TmdbClient::from_settings(&settings));
        self.setup_page = None;
        Task::done(Message::ShowTrending)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        if let Message::Setup(setup_msg) = message {
            if let Some(ref mut setup) = self.setup_page {
                if let Some(settings) = setup.update(setup_msg) {
                    self.image_cache = ImageCache::new();
                    return self.initialize_with_settings(settings);
                }
            }
            return Task::none();
        }
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        if let Some(ref setup) = self.setup_page {
            return setup.view().map(Message::Setup);
        }

        let main_content = container(self.view_main_content())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_BLACK)),
                ..Default::default()
            });

        if self.overlay.is_open() {
            return iced::widget::stack![main_content, self.view_detail_overlay()]
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        main_content.into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        if !self.overlay.is_open() {
            return Subscription::none();
        }
        iced::event::listen_with(|event, _status, _id| match event {
            iced::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::Escape),
                ..
            }) => Some(Message::CloseOverlay),
            _ => None,
        })
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("showfinder=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    init_tracing();

    iced::application(Showfinder::new, Showfinder::update, Showfinder::view)
        .title("Showfinder")
        .theme(Showfinder::theme)
        .window_size(Size::new(1280.0, 800.0))
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .default_font(Font::DEFAULT)
        .subscription(Showfinder::subscription)
        .run()
}
