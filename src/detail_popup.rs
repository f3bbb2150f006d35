use iced::widget::{button, column, container, row, scrollable, text, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::cards::{chip, icon};
use crate::components::{hidden_vertical_scrollbar_style, skeleton_style};
use crate::mapper::overview_text;
use crate::media::{
    MediaDetail, MediaItem, Message, ACCENT_RED, RATING_GOLD, TEXT_GRAY, TEXT_WHITE,
};
use crate::overlay::{OverlayState, DETAIL_LOAD_FAILED};
use crate::Showfinder;

const POPUP_WIDTH: f32 = 820.0;
const POPUP_POSTER_WIDTH: f32 = 240.0;
const POPUP_POSTER_HEIGHT: f32 = 360.0;

const ICON_X_LG: char = '\u{F659}';
const ICON_GLOBE: char = '\u{F3EF}';

fn popup_container_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color::from_rgb(
            0.078, 0.078, 0.078,
        ))),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 16.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
            offset: iced::Vector::new(0.0, 25.0),
            blur_radius: 50.0,
        },
        ..Default::default()
    }
}

fn link_button<'a>(label: Element<'a, Message>, url: &str, primary: bool) -> Element<'a, Message> {
    button(label)
        .padding(Padding::new(12.0).left(24.0).right(24.0))
        .style(move |_theme, status| {
            let hovered = matches!(status, button::Status::Hovered);
            let (background, border_color) = match (primary, hovered) {
                (true, true) => (Color::from_rgb(0.698, 0.027, 0.063), Color::TRANSPARENT),
                (true, false) => (ACCENT_RED, Color::TRANSPARENT),
                (false, true) => (
                    Color::from_rgba(1.0, 1.0, 1.0, 0.15),
                    Color::from_rgba(1.0, 1.0, 1.0, 0.3),
                ),
                (false, false) => (
                    Color::from_rgba(1.0, 1.0, 1.0, 0.1),
                    Color::from_rgba(1.0, 1.0, 1.0, 0.3),
                ),
            };
            button::Style {
                background: Some(iced::Background::Color(background)),
                text_color: TEXT_WHITE,
                border: Border {
                    color: border_color,
                    width: if primary { 0.0 } else { 1.0 },
                    radius: 4.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::OpenLink(url.to_string()))
        .into()
}

/// Kind, year, rating and runtime. Unlike the card chips, a missing year or
/// runtime drops the chip entirely.
fn detail_chips<'a>(detail: &MediaDetail) -> Row<'a, Message> {
    let item = &detail.item;
    let mut chips = row![chip(String::from(item.kind.label()), TEXT_WHITE)].spacing(6);
    if !item.year.is_empty() {
        chips = chips.push(chip(item.year.clone(), TEXT_WHITE));
    }
    chips = chips.push(chip(format!("★ {}", item.rating), RATING_GOLD));
    if let Some(minutes) = detail.runtime {
        chips = chips.push(chip(format!("{} min", minutes), TEXT_WHITE));
    }
    chips
}

impl Showfinder {
    pub fn view_detail_overlay(&self) -> Element<'_, Message> {
        let body = match self.overlay.state() {
            OverlayState::Closed => return Space::new().into(),
            OverlayState::Loading(item) => self.view_detail_loading(item),
            OverlayState::Loaded(detail) => self.view_detail_loaded(detail),
            OverlayState::Failed(_) => self.view_detail_failed(),
        };

        let content = scrollable(body)
            .direction(scrollable::Direction::Vertical(
                scrollable::Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill)
            .style(hidden_vertical_scrollbar_style);

        let popup_with_close = iced::widget::stack![content, self.view_detail_close_button()]
            .width(Length::Fixed(POPUP_WIDTH));

        let popup = container(popup_with_close)
            .max_width(POPUP_WIDTH)
            .clip(true)
            .style(popup_container_style);

        let overlay_bg = iced::widget::mouse_area(
            container(Space::new().width(Length::Fill).height(Length::Fill))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        0.0, 0.0, 0.0, 0.85,
                    ))),
                    ..Default::default()
                }),
        )
        .on_press(Message::CloseOverlay);

        let centered_popup = container(iced::widget::opaque(popup))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .padding(Padding::new(40.0));

        iced::widget::stack![overlay_bg, centered_popup]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_detail_close_button(&self) -> Element<'_, Message> {
        let btn = button(
            container(icon(ICON_X_LG).size(20).color(TEXT_WHITE))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .width(Length::Fixed(36.0))
        .height(Length::Fixed(36.0))
        .padding(0)
        .style(|_theme, status| {
            let alpha = if matches!(status, button::Status::Hovered) {
                0.8
            } else {
                0.6
            };
            button::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.0, 0.0, 0.0, alpha,
                ))),
                text_color: TEXT_WHITE,
                border: Border {
                    radius: 18.0.into(),
                    ..Default::default()
                },
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::CloseOverlay);

        container(btn)
            .width(Length::Fill)
            .align_x(iced::alignment::Horizontal::Right)
            .padding(Padding::new(16.0))
            .into()
    }

    fn view_detail_title(&self, item: &MediaItem) -> Element<'_, Message> {
        text(item.title.clone())
            .size(32)
            .color(TEXT_WHITE)
            .shaping(text::Shaping::Advanced)
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..Default::default()
            })
            .into()
    }

    fn view_detail_loading(&self, item: &MediaItem) -> Element<'_, Message> {
        let poster = container(Space::new().width(POPUP_POSTER_WIDTH).height(POPUP_POSTER_HEIGHT))
            .style(skeleton_style(8.0));

        let lines = column![
            self.view_detail_title(item),
            container(Space::new().width(220).height(20)).style(skeleton_style(12.0)),
            container(Space::new().width(Length::Fill).height(14)).style(skeleton_style(4.0)),
            container(Space::new().width(Length::Fill).height(14)).style(skeleton_style(4.0)),
            container(Space::new().width(260).height(14)).style(skeleton_style(4.0)),
        ]
        .spacing(14)
        .width(Length::Fill);

        row![poster, lines]
            .spacing(32)
            .padding(Padding::new(32.0).top(56.0))
            .into()
    }

    fn view_detail_failed(&self) -> Element<'_, Message> {
        container(text(DETAIL_LOAD_FAILED).size(16).color(TEXT_GRAY))
            .width(Length::Fill)
            .padding(Padding::new(64.0))
            .center_x(Length::Fill)
            .into()
    }

    fn view_detail_loaded<'a>(&'a self, detail: &'a MediaDetail) -> Element<'a, Message> {
        let item = &detail.item;
        let poster = container(self.view_poster(
            &item.poster_url,
            POPUP_POSTER_WIDTH,
            POPUP_POSTER_HEIGHT,
        ))
        .clip(true)
        .style(|_theme| container::Style {
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        });

        let mut info = column![self.view_detail_title(item)].spacing(14).width(Length::Fill);

        if let Some(tagline) = &detail.tagline {
            info = info.push(
                text(format!("“{}”", tagline))
                    .size(15)
                    .color(TEXT_GRAY)
                    .shaping(text::Shaping::Advanced)
                    .font(iced::Font {
                        style: iced::font::Style::Italic,
                        ..Default::default()
                    }),
            );
        }

        info = info
            .push(detail_chips(detail))
            .push(
                text(overview_text(detail))
                    .size(15)
                    .color(TEXT_WHITE)
                    .line_height(1.5)
                    .shaping(text::Shaping::Advanced),
            );

        if !detail.genres.is_empty() {
            let genres: Vec<Element<Message>> = detail
                .genres
                .iter()
                .map(|genre| chip(genre.clone(), TEXT_GRAY))
                .collect();
            info = info.push(Row::with_children(genres).spacing(6).wrap());
        }

        let mut links = row![].spacing(12).align_y(iced::Alignment::Center);
        if let Some(trailer) = &detail.trailer_url {
            links = links.push(link_button(
                text("Watch trailer ▶")
                    .size(15)
                    .shaping(text::Shaping::Advanced)
                    .into(),
                trailer,
                true,
            ));
        }
        if let Some(homepage) = &detail.homepage {
            links = links.push(link_button(
                row![icon(ICON_GLOBE).size(15), text("Official site").size(15)]
                    .spacing(8)
                    .align_y(iced::Alignment::Center)
                    .into(),
                homepage,
                false,
            ));
        }
        info = info.push(links);

        row![poster, info]
            .spacing(32)
            .padding(Padding::new(32.0).top(56.0))
            .into()
    }
}
