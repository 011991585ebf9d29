// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! Renders one of four screens selected by `Screen::for_state`:
//! splash, permission loading placeholder, permission denied, and the
//! live camera. A modal alert overlay can sit on top of any of them.

use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

use crate::app::state::{AppModel, ContextPage, Message, Screen};
use crate::config::AppTheme;
use crate::constants::ui;
use crate::fl;

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let screen = Screen::for_state(self.splash_visible, self.camera_permission);

        let content: Element<'_, Message> = match screen {
            Screen::Splash => self.build_splash(),
            Screen::PermissionLoading => self.build_permission_loading(),
            Screen::PermissionDenied => self.build_permission_denied(),
            Screen::Camera => self.build_camera_screen(),
        };

        // One modal alert at a time, layered over whatever screen is up
        let content: Element<'_, Message> = match &self.active_alert {
            Some(alert) => {
                let card = widget::container(
                    widget::column()
                        .push(widget::text::title4(alert.title()))
                        .push(widget::text(alert.body()))
                        .push(
                            widget::button::suggested(fl!("ok")).on_press(Message::DismissAlert),
                        )
                        .spacing(12)
                        .align_x(Alignment::Center),
                )
                .padding(24)
                .style(|_theme| widget::container::Style {
                    background: Some(Background::Color(Color::from_rgb(0.15, 0.15, 0.15))),
                    text_color: Some(Color::WHITE),
                    ..Default::default()
                })
                .max_width(360.0);

                let backdrop = widget::container(
                    widget::container(card)
                        .center_x(Length::Fill)
                        .center_y(Length::Fill),
                )
                .width(Length::Fill)
                .height(Length::Fill)
                .style(|_theme| widget::container::Style {
                    background: Some(Background::Color(Color::from_rgba(
                        0.0,
                        0.0,
                        0.0,
                        ui::OVERLAY_BACKGROUND_ALPHA,
                    ))),
                    ..Default::default()
                });

                cosmic::iced::widget::stack![content, backdrop]
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into()
            }
            None => content,
        };

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .into()
    }

    /// Branded splash: icon and title on the black background
    fn build_splash(&self) -> Element<'_, Message> {
        let column = widget::column()
            .push(widget::icon::from_svg_bytes(super::APP_ICON).size(96))
            .push(
                widget::text::title1(fl!("app-title"))
                    .size(ui::SPLASH_TITLE_SIZE)
                    .class(cosmic::theme::style::Text::Color(Color::WHITE)),
            )
            .push(
                widget::text(fl!("splash-tagline"))
                    .class(cosmic::theme::style::Text::Color(Color::from_rgb(0.7, 0.7, 0.7))),
            )
            .spacing(16)
            .align_x(Alignment::Center);

        widget::container(column)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Placeholder while the permission request is still resolving
    fn build_permission_loading(&self) -> Element<'_, Message> {
        widget::container(
            widget::text(fl!("permission-requesting"))
                .class(cosmic::theme::style::Text::Color(Color::WHITE)),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }

    /// Explanation plus a retry button after a denial
    fn build_permission_denied(&self) -> Element<'_, Message> {
        let column = widget::column()
            .push(widget::icon::from_name("camera-disabled-symbolic").size(64))
            .push(
                widget::text(fl!("camera-access-denied"))
                    .class(cosmic::theme::style::Text::Color(Color::WHITE)),
            )
            .push(
                widget::button::suggested(fl!("grant-camera-access"))
                    .on_press(Message::RetryCameraPermission),
            )
            .spacing(16)
            .align_x(Alignment::Center);

        widget::container(column)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Live camera screen: preview, capture button, bottom bar
    fn build_camera_screen(&self) -> Element<'_, Message> {
        let preview: Element<'_, Message> = match &self.current_frame {
            Some(frame) => {
                let handle = widget::image::Handle::from_rgba(
                    frame.width,
                    frame.height,
                    frame.data.to_vec(),
                );
                widget::image(handle)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .content_fit(cosmic::iced::ContentFit::Contain)
                    .into()
            }
            None => widget::container(
                widget::text(fl!("preview-waiting"))
                    .class(cosmic::theme::style::Text::Color(Color::from_rgb(0.7, 0.7, 0.7))),
            )
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
        };

        widget::column()
            .push(
                widget::container(preview)
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .push(self.build_capture_button())
            .push(self.build_bottom_bar())
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Create the settings view for the context drawer
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let current_theme_index = match self.config.app_theme {
            AppTheme::System => 0,
            AppTheme::Dark => 1,
            AppTheme::Light => 2,
        };

        let theme_dropdown = widget::dropdown(
            &self.theme_dropdown_options,
            Some(current_theme_index),
            Message::SetAppTheme,
        );

        let settings_column: Element<'_, Message> = widget::column()
            .push(
                widget::text(fl!("theme"))
                    .size(16)
                    .font(cosmic::font::bold()),
            )
            .push(widget::vertical_space().height(spacing.space_xxs))
            .push(theme_dropdown)
            .spacing(spacing.space_xxs)
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings"))
    }
}
