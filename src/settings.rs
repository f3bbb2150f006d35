use std::path::PathBuf;

use directories::ProjectDirs;

use iced::widget::{button, column, container, text, text_input, Column};
use iced::{Alignment, Element, Length};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::media::{ACCENT_RED, BACKGROUND_BLACK, TEXT_GRAY, TEXT_WHITE};
use crate::tmdb::{DEFAULT_API_BASE_URL, DEFAULT_LANGUAGE};

const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

fn default_language() -> String {
    String::from(DEFAULT_LANGUAGE)
}

fn default_api_base_url() -> String {
    String::from(DEFAULT_API_BASE_URL)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    pub api_key: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_language(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl AppSettings {
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "showfinder")
    }

    /// Stored settings with `TMDB_API_KEY` taking precedence over the saved
    /// key. `None` when neither source has anything.
    pub fn load() -> Option<Self> {
        let stored = match Self::config_path() {
            Some(path) => match Self::load_from(&path) {
                Ok(settings) => Some(settings),
                Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => {
                    tracing::warn!("ignoring settings at {}: {}", path.display(), e);
                    None
                }
            },
            None => None,
        };
        Self::with_env_key(stored, std::env::var(API_KEY_ENV).ok())
    }

    fn with_env_key(stored: Option<Self>, env_key: Option<String>) -> Option<Self> {
        match env_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => Some(Self {
                api_key: key.trim().to_string(),
                ..stored.unwrap_or_default()
            }),
            None => stored,
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum SetupMessage {
    ApiKeyChanged(String),
    LanguageChanged(String),
    BaseUrlChanged(String),
    Submit,
}

/// First-run form. Blank language or base URL fall back to the defaults.
pub struct SetupPage {
    pub api_key: String,
    pub language: String,
    pub api_base_url: String,
    pub error: Option<String>,
}

impl Default for SetupPage {
    fn default() -> Self {
        let defaults = AppSettings::default();
        Self {
            api_key: String::new(),
            language: defaults.language,
            api_base_url: defaults.api_base_url,
            error: None,
        }
    }
}

fn labeled_field<'a>(
    label: &'static str,
    hint: &'static str,
    placeholder: &'static str,
    value: &'a str,
    on_input: fn(String) -> SetupMessage,
) -> Column<'a, SetupMessage> {
    column![
        text(label).size(14).color(TEXT_WHITE),
        text(hint).size(12).color(TEXT_GRAY),
        text_input(placeholder, value)
            .on_input(on_input)
            .on_submit(SetupMessage::Submit)
            .padding(12)
            .size(14)
            .width(Length::Fill),
    ]
    .spacing(4)
}

fn or_default(value: &str, default: fn() -> String) -> String {
    match value.trim() {
        "" => default(),
        trimmed => trimmed.to_string(),
    }
}

impl SetupPage {
    pub fn update(&mut self, message: SetupMessage) -> Option<AppSettings> {
        match message {
            SetupMessage::ApiKeyChanged(key) => self.api_key = key,
            SetupMessage::LanguageChanged(lang) => self.language = lang,
            SetupMessage::BaseUrlChanged(url) => self.api_base_url = url,
            SetupMessage::Submit => return self.submit(),
        }
        self.error = None;
        None
    }

    fn submit(&mut self) -> Option<AppSettings> {
        let settings = match self.to_settings() {
            Ok(settings) => settings,
            Err(message) => {
                self.error = Some(message);
                return None;
            }
        };
        if let Err(e) = settings.save() {
            tracing::error!("failed to save settings: {}", e);
            self.error = Some(format!("Failed to save: {}", e));
            return None;
        }
        tracing::info!(language = %settings.language, base_url = %settings.api_base_url, "settings saved");
        Some(settings)
    }

    /// Validates the form without touching disk.
    pub fn to_settings(&self) -> Result<AppSettings, String> {
        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(String::from("API key is required"));
        }

        let api_base_url = or_default(&self.api_base_url, default_api_base_url);
        match url::Url::parse(&api_base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(format!("Not an http(s) URL: {}", api_base_url)),
        }

        Ok(AppSettings {
            api_key: api_key.to_string(),
            language: or_default(&self.language, default_language),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn view(&self) -> Element<'_, SetupMessage> {
        let heading = column![
            text("SHOWFINDER").size(48).color(ACCENT_RED),
            text("Add your TMDB API key to start browsing")
                .size(14)
                .color(TEXT_GRAY),
        ]
        .spacing(8);

        let fields = column![
            labeled_field(
                "TMDB API Key",
                "Get a free key at themoviedb.org/settings/api",
                "Enter your TMDB API key...",
                &self.api_key,
                SetupMessage::ApiKeyChanged,
            ),
            labeled_field(
                "Language",
                "Examples: en-US, de-DE, fr-FR, es-ES",
                DEFAULT_LANGUAGE,
                &self.language,
                SetupMessage::LanguageChanged,
            ),
            labeled_field(
                "API base URL",
                "Leave as is unless you use a TMDB-compatible proxy",
                DEFAULT_API_BASE_URL,
                &self.api_base_url,
                SetupMessage::BaseUrlChanged,
            ),
        ]
        .spacing(16);

        let submit_button = button(text("Start Browsing").size(16).color(TEXT_WHITE))
            .padding([12, 32])
            .style(|_theme, status| button::Style {
                background: Some(iced::Background::Color(match status {
                    button::Status::Hovered => iced::Color::from_rgb(0.7, 0.02, 0.06),
                    _ => ACCENT_RED,
                })),
                text_color: TEXT_WHITE,
                border: iced::Border::default().rounded(4),
                ..Default::default()
            })
            .on_press(SetupMessage::Submit);

        let mut form = column![heading, fields]
            .spacing(24)
            .width(Length::Fixed(420.0))
            .align_x(Alignment::Start);
        if let Some(ref err) = self.error {
            form = form.push(text(err).size(14).color(ACCENT_RED));
        }
        form = form.push(submit_button);

        container(form)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_BLACK)),
                ..Default::default()
            })
            .into()
    }
}
