use iced::widget::{column, container, row, text, Column, Row};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::media::{MediaItem, Message, RATING_GOLD, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE};
use crate::Showfinder;

const ICON_FILM: char = '\u{F3A9}';

const CARD_WIDTH: f32 = 180.0;
const POSTER_HEIGHT: f32 = 270.0;
const CARDS_PER_ROW: usize = 6;

pub fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn chip<'a>(label: String, color: Color) -> Element<'a, Message> {
    container(
        text(label)
            .size(12)
            .color(color)
            .shaping(text::Shaping::Advanced),
    )
    .padding(Padding::new(3.0).left(8.0).right(8.0))
    .style(|_theme| container::Style {
        background: Some(iced::Background::Color(Color::from_rgba(1.0, 1.0, 1.0, 0.08))),
        border: Border {
            color: Color::from_rgba(1.0, 1.0, 1.0, 0.15),
            width: 1.0,
            radius: 12.0.into(),
        },
        ..Default::default()
    })
    .into()
}

/// Kind, year and rating chips under a card title. A missing year shows as "—".
pub fn card_chips<'a>(item: &MediaItem) -> Row<'a, Message> {
    let year = if item.year.is_empty() {
        String::from("—")
    } else {
        item.year.clone()
    };
    row![
        chip(String::from(item.kind.label()), TEXT_WHITE),
        chip(year, TEXT_WHITE),
        chip(format!("★ {}", item.rating), RATING_GOLD),
    ]
    .spacing(6)
}

impl Showfinder {
    pub fn view_results_grid(&self) -> Element<'_, Message> {
        let rows: Vec<Element<Message>> = self
            .results
            .entries()
            .chunks(CARDS_PER_ROW)
            .map(|chunk| {
                let cards: Vec<Element<Message>> =
                    chunk.iter().map(|item| self.view_result_card(item)).collect();
                Row::with_children(cards)
                    .spacing(16)
                    .align_y(iced::Alignment::Start)
                    .into()
            })
            .collect();

        Column::with_children(rows)
            .spacing(24)
            .width(Length::Fill)
            .into()
    }

    pub fn view_result_card(&self, item: &MediaItem) -> Element<'_, Message> {
        let title = text(item.title.clone())
            .size(15)
            .color(TEXT_WHITE)
            .shaping(text::Shaping::Advanced)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        let body = column![title, card_chips(item)]
            .spacing(8)
            .padding(Padding::new(10.0));

        let card = container(column![self.view_card_poster(item), body])
            .width(Length::Fixed(CARD_WIDTH))
            .clip(true)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 8.0.into(),
                },
                shadow: Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
                    offset: iced::Vector::new(0.0, 4.0),
                    blur_radius: 8.0,
                },
                ..Default::default()
            });

        iced::widget::mouse_area(card)
            .interaction(iced::mouse::Interaction::Pointer)
            .on_press(Message::SelectItem(item.clone()))
            .into()
    }

    pub fn view_card_poster(&self, item: &MediaItem) -> Element<'_, Message> {
        self.view_poster(&item.poster_url, CARD_WIDTH, POSTER_HEIGHT)
    }

    pub fn view_poster(&self, url: &str, width: f32, height: f32) -> Element<'_, Message> {
        match self.image_cache.get(url) {
            Some(handle) => iced::widget::image(handle.clone())
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .content_fit(iced::ContentFit::Cover)
                .into(),
            None => self.view_poster_placeholder(width, height),
        }
    }

    pub fn view_poster_placeholder(&self, width: f32, height: f32) -> Element<'_, Message> {
        container(icon(ICON_FILM).size(48).color(TEXT_GRAY))
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(Color::from_rgb(0.12, 0.12, 0.12))),
                ..Default::default()
            })
            .into()
    }
}
