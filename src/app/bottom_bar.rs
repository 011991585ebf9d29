// SPDX-License-Identifier: GPL-3.0-only

//! Bottom control bar: gallery thumbnail and facing switcher

use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{self, icon};

use crate::app::state::{AppModel, Message};
use crate::constants::ui;

/// Camera switch icon SVG (camera with circular arrows)
const CAMERA_SWITCH_ICON: &[u8] = include_bytes!("../../resources/button_icons/camera-switch.svg");

impl AppModel {
    /// Build the bottom bar: gallery button on the left, facing switcher
    /// on the right, centered spacer between.
    pub fn build_bottom_bar(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let row = widget::row()
            .push(self.build_gallery_button())
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .push(self.build_facing_switcher())
            .align_y(Alignment::Center)
            .width(Length::Fill)
            .padding([spacing.space_xs, spacing.space_m]);

        widget::container(row)
            .width(Length::Fill)
            .height(Length::Fixed(ui::BOTTOM_BAR_HEIGHT))
            .into()
    }

    /// Build the gallery button widget
    ///
    /// Shows the last capture as a thumbnail if there is one, otherwise a
    /// folder icon.
    fn build_gallery_button(&self) -> Element<'_, Message> {
        let button_content: Element<'_, Message> = if let Some(capture) = &self.last_capture {
            let image = widget::image::Image::new(widget::image::Handle::from_path(capture.path()))
                .content_fit(cosmic::iced::ContentFit::Cover)
                .width(Length::Fixed(ui::THUMBNAIL_SIZE - 2.0))
                .height(Length::Fixed(ui::THUMBNAIL_SIZE - 2.0));

            widget::container(image)
                .width(Length::Fixed(ui::THUMBNAIL_SIZE))
                .height(Length::Fixed(ui::THUMBNAIL_SIZE))
                .into()
        } else {
            widget::container(icon::from_name("folder-pictures-symbolic").size(24))
                .width(Length::Fixed(ui::THUMBNAIL_SIZE))
                .height(Length::Fixed(ui::THUMBNAIL_SIZE))
                .center(ui::THUMBNAIL_SIZE)
                .into()
        };

        widget::button::custom(button_content)
            .padding(0)
            .width(Length::Fixed(ui::THUMBNAIL_SIZE))
            .height(Length::Fixed(ui::THUMBNAIL_SIZE))
            .class(cosmic::theme::Button::Image)
            .on_press(Message::OpenGallery)
            .into()
    }

    /// Build the facing switcher button widget
    ///
    /// Shown whenever a camera is available; with a single camera the
    /// toggle still flips the logical facing and re-selects the only
    /// device. Before enumeration an invisible placeholder keeps the
    /// layout stable.
    fn build_facing_switcher(&self) -> Element<'_, Message> {
        if self.available_cameras.is_empty() {
            return widget::Space::new(Length::Fixed(ui::PLACEHOLDER_BUTTON_WIDTH), Length::Shrink)
                .into();
        }

        let switch_icon = widget::icon::from_svg_bytes(CAMERA_SWITCH_ICON).symbolic(true);
        let icon_widget = widget::icon(switch_icon).size(32);

        let icon_content = widget::container(icon_widget)
            .width(Length::Fixed(52.0))
            .height(Length::Fixed(52.0))
            .center(Length::Fixed(52.0));

        widget::button::custom(icon_content)
            .padding(0)
            .class(cosmic::theme::Button::Text)
            .on_press(Message::ToggleFacing)
            .into()
    }
}
