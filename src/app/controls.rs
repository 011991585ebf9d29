// SPDX-License-Identifier: GPL-3.0-only

//! Capture button widget

use cosmic::Element;
use cosmic::iced::{Background, Color, Length};
use cosmic::widget;

use crate::app::state::{AppModel, Message};
use crate::constants::ui;

impl AppModel {
    /// Build the round capture button.
    ///
    /// A white circle that grays out and shrinks slightly while a capture
    /// is in flight. Presses always emit `Message::Capture`; the handler
    /// no-ops when no frame is available yet.
    pub fn build_capture_button(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let color = if self.is_capturing {
            Color::from_rgb(0.7, 0.7, 0.7)
        } else {
            Color::WHITE
        };

        // Brief press-down effect while capturing
        let (inner_size, outer_size) = if self.is_capturing {
            (
                ui::CAPTURE_BUTTON_INNER * 0.85,
                ui::CAPTURE_BUTTON_OUTER * 0.85,
            )
        } else {
            (ui::CAPTURE_BUTTON_INNER, ui::CAPTURE_BUTTON_OUTER)
        };

        let button_inner = widget::container(widget::Space::new(
            Length::Fixed(inner_size),
            Length::Fixed(inner_size),
        ))
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(color)),
            border: cosmic::iced::Border {
                radius: [ui::CAPTURE_BUTTON_RADIUS * (inner_size / ui::CAPTURE_BUTTON_INNER); 4]
                    .into(),
                ..Default::default()
            },
            ..Default::default()
        });

        let button = widget::button::custom(button_inner)
            .on_press(Message::Capture)
            .padding(0)
            .width(Length::Fixed(outer_size))
            .height(Length::Fixed(outer_size));

        // Fixed-size wrapper prevents layout shift when the button shrinks
        let button_wrapper = widget::container(button)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .center_x(ui::CAPTURE_BUTTON_OUTER)
            .center_y(ui::CAPTURE_BUTTON_OUTER);

        widget::container(button_wrapper)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding([spacing.space_xs, 0])
            .into()
    }
}
