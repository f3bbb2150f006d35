use iced::widget::{
    button, column, container, pick_list, row, scrollable, text, text_input, Space,
};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::browse::Mode;
use crate::cards::icon;
use crate::media::{
    Message, SearchKind, ACCENT_RED, SURFACE_DARK_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::Showfinder;

const ICON_SEARCH: char = '\u{F52A}';
const ICON_FIRE: char = '\u{F7F6}';

pub fn hidden_vertical_scrollbar_style(
    _theme: &iced::Theme,
    _status: scrollable::Status,
) -> scrollable::Style {
    let hidden_rail = || scrollable::Rail {
        background: None,
        border: Border::default(),
        scroller: scrollable::Scroller {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
        },
    };
    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: hidden_rail(),
        horizontal_rail: hidden_rail(),
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            shadow: Shadow::default(),
            icon: Color::TRANSPARENT,
        },
    }
}

pub fn skeleton_style(radius: f32) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(iced::Background::Color(Color::from_rgba(
            0.2, 0.2, 0.2, 0.5,
        ))),
        border: Border {
            radius: radius.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn field_style(_theme: &iced::Theme, _status: text_input::Status) -> text_input::Style {
    text_input::Style {
        background: iced::Background::Color(Color::TRANSPARENT),
        border: Border::default(),
        icon: TEXT_GRAY,
        placeholder: TEXT_GRAY,
        value: TEXT_WHITE,
        selection: ACCENT_RED,
    }
}

fn pill_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color::from_rgba(
            0.0, 0.0, 0.0, 0.7,
        ))),
        border: Border {
            color: TEXT_GRAY,
            width: 1.0,
            radius: 24.0.into(),
        },
        ..Default::default()
    }
}

impl Showfinder {
    pub fn view_header(&self) -> Element<'_, Message> {
        let controls = row![
            self.view_search_bar(),
            self.view_kind_picker(),
            self.view_year_input(),
            self.view_search_button(),
            self.view_trending_button(),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center);

        let header_content = row![self.view_logo(), Space::new().width(Length::Fill), controls]
            .padding(Padding::new(16.0).left(48.0).right(48.0))
            .align_y(iced::Alignment::Center);

        container(header_content)
            .width(Length::Fill)
            .height(Length::Fixed(80.0))
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.0, 0.0, 0.0, 0.5,
                ))),
                ..Default::default()
            })
            .into()
    }

    pub fn view_logo(&self) -> Element<'_, Message> {
        text("Showfinder")
            .size(28)
            .color(ACCENT_RED)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            })
            .into()
    }

    pub fn view_search_bar(&self) -> Element<'_, Message> {
        let search_icon = icon(ICON_SEARCH).size(14).color(TEXT_GRAY);

        let search_input = text_input("Search movies and TV...", &self.search_form.query)
            .on_input(Message::QueryChanged)
            .on_submit(Message::SearchSubmit)
            .padding(8)
            .width(Length::Fixed(220.0))
            .style(field_style);

        container(
            row![search_icon, search_input]
                .spacing(8)
                .align_y(iced::Alignment::Center),
        )
        .padding(Padding::new(4.0).left(12.0).right(8.0))
        .style(pill_style)
        .into()
    }

    pub fn view_kind_picker(&self) -> Element<'_, Message> {
        pick_list(
            SearchKind::ALL,
            Some(self.search_form.kind),
            Message::KindSelected,
        )
        .padding(Padding::new(8.0).left(12.0).right(12.0))
        .text_size(14)
        .into()
    }

    pub fn view_year_input(&self) -> Element<'_, Message> {
        let year_input = text_input("Year", &self.search_form.year)
            .on_input(Message::YearChanged)
            .on_submit(Message::SearchSubmit)
            .padding(8)
            .width(Length::Fixed(64.0))
            .style(field_style);

        container(year_input)
            .padding(Padding::new(4.0).left(8.0).right(8.0))
            .style(pill_style)
            .into()
    }

    pub fn view_search_button(&self) -> Element<'_, Message> {
        button(text("Search").size(14).color(TEXT_WHITE))
            .padding(Padding::new(10.0).left(20.0).right(20.0))
            .style(|_theme, status| {
                let bg = match status {
                    button::Status::Hovered => Color::from_rgb(0.7, 0.02, 0.06),
                    _ => ACCENT_RED,
                };
                button::Style {
                    background: Some(iced::Background::Color(bg)),
                    text_color: TEXT_WHITE,
                    border: Border {
                        color: Color::TRANSPARENT,
                        width: 0.0,
                        radius: 4.0.into(),
                    },
                    shadow: Shadow::default(),
                    snap: false,
                }
            })
            .on_press(Message::SearchSubmit)
            .into()
    }

    pub fn view_trending_button(&self) -> Element<'_, Message> {
        let is_active = matches!(self.browse.mode(), Mode::Trending);
        let content = row![
            icon(ICON_FIRE).size(14),
            text("Trending").size(14),
        ]
        .spacing(6)
        .align_y(iced::Alignment::Center);

        button(content)
            .padding(Padding::new(10.0).left(16.0).right(16.0))
            .style(move |_theme, status| {
                let text_color = match status {
                    button::Status::Hovered => TEXT_WHITE,
                    _ if is_active => TEXT_WHITE,
                    _ => TEXT_GRAY,
                };
                button::Style {
                    background: Some(iced::Background::Color(SURFACE_DARK_GRAY)),
                    text_color,
                    border: Border {
                        color: if is_active { ACCENT_RED } else { Color::TRANSPARENT },
                        width: 1.0,
                        radius: 4.0.into(),
                    },
                    shadow: Shadow::default(),
                    snap: false,
                }
            })
            .on_press(Message::ShowTrending)
            .into()
    }

    fn view_section_title(&self) -> Element<'_, Message> {
        let label = match self.browse.mode() {
            Mode::Idle => String::new(),
            Mode::Trending => String::from("Trending this week"),
            Mode::Searching(params) => match params.year {
                Some(year) => format!("{} results for “{}” ({})", params.kind, params.query, year),
                None => format!("{} results for “{}”", params.kind, params.query),
            },
        };
        let title = text(label)
            .size(22)
            .color(TEXT_WHITE)
            .shaping(text::Shaping::Advanced)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            });

        match (&self.search_form.ignored_year, self.browse.mode()) {
            (Some(year), Mode::Searching(_)) => column![
                title,
                text(format!(
                    "Year filter “{}” was ignored. Enter a four-digit year.",
                    year
                ))
                .size(13)
                .color(ACCENT_RED)
                .shaping(text::Shaping::Advanced),
            ]
            .spacing(6)
            .into(),
            _ => title.into(),
        }
    }

    fn view_empty_state(&self) -> Element<'_, Message> {
        container(text("No results found").size(18).color(TEXT_GRAY))
            .width(Length::Fill)
            .padding(Padding::new(64.0))
            .center_x(Length::Fill)
            .into()
    }

    fn view_load_more_button(&self) -> Element<'_, Message> {
        let load_more = button(text("Load more").size(14).color(TEXT_WHITE))
            .padding(Padding::new(12.0).left(32.0).right(32.0))
            .style(|_theme, status| {
                let background_color = match status {
                    button::Status::Hovered => Color::from_rgba(1.0, 1.0, 1.0, 0.2),
                    _ => Color::from_rgba(1.0, 1.0, 1.0, 0.1),
                };
                button::Style {
                    background: Some(iced::Background::Color(background_color)),
                    text_color: TEXT_WHITE,
                    border: Border {
                        color: TEXT_GRAY,
                        width: 1.0,
                        radius: 4.0.into(),
                    },
                    shadow: Shadow::default(),
                    snap: false,
                }
            })
            .on_press(Message::LoadMore);

        container(load_more)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    pub fn view_main_content(&self) -> Element<'_, Message> {
        let mut body = column![self.view_section_title()]
            .spacing(24)
            .padding(Padding::new(24.0).left(48.0).right(48.0))
            .width(Length::Fill);

        if self.results.empty_visible() {
            body = body.push(self.view_empty_state());
        } else {
            body = body.push(self.view_results_grid());
        }
        if self.results.load_more_visible() {
            body = body.push(self.view_load_more_button());
        }

        let scroll = scrollable(body)
            .direction(scrollable::Direction::Vertical(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(hidden_vertical_scrollbar_style);

        column![self.view_header(), scroll]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
