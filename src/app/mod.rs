// SPDX-License-Identifier: GPL-3.0-only

//! Main application module.
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, Screen, Alert)
//! - `controls`: The round capture button
//! - `bottom_bar`: Gallery thumbnail and facing switcher
//! - `view`: Screen rendering (splash, permission gate, camera)
//! - `update`: Message dispatcher
//! - `handlers`: Message handling split by concern

mod bottom_bar;
mod controls;
mod handlers;
mod state;
mod update;
mod view;

use std::sync::Arc;

use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
use tracing::{debug, error, info, warn};

use crate::backends::camera::{CameraPipeline, select_device};
use crate::config::Config;
use crate::constants::SPLASH_DURATION;
use crate::fl;
use crate::services::{
    DirectoryGallery, PermissionStatus, PicturesLibraryPermission, PortalCameraPermission,
};
pub use state::{Alert, AppModel, ContextPage, Message, Screen};

const REPOSITORY: &str = "https://github.com/cosmic-utils/snapcam";
const APP_ICON: &[u8] =
    include_bytes!("../../resources/icons/hicolor/scalable/apps/io.github.cosmic-utils.snapcam.svg");

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.cosmic-utils.snapcam";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        // Create the about widget
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(crate::constants::app_info::version())
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        let camera_permissions: Arc<dyn crate::services::PermissionService> =
            Arc::new(PortalCameraPermission::new());
        let media_permissions: Arc<dyn crate::services::PermissionService> =
            Arc::new(PicturesLibraryPermission::new());

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            splash_visible: true,
            camera_permission: PermissionStatus::Unknown,
            media_permission: PermissionStatus::Unknown,
            facing: Default::default(),
            available_cameras: Vec::new(),
            cameras_enumerated: false,
            current_frame: None,
            last_capture: None,
            active_alert: None,
            is_capturing: false,
            theme_dropdown_options: vec![
                fl!("theme-system"),
                fl!("theme-dark"),
                fl!("theme-light"),
            ],
            camera_permissions: camera_permissions.clone(),
            media_permissions: media_permissions.clone(),
            gallery: Arc::new(DirectoryGallery::default_location()),
        };

        // Both permission requests run concurrently with the splash timer
        let camera_task = Task::perform(
            async move { camera_permissions.request().await },
            |result| {
                let status = result.unwrap_or_else(|e| {
                    error!(error = %e, "Camera permission request failed");
                    PermissionStatus::Denied
                });
                cosmic::Action::App(Message::CameraPermissionResolved(status))
            },
        );

        let media_task = Task::perform(
            async move { media_permissions.request().await },
            |result| {
                let status = result.unwrap_or_else(|e| {
                    error!(error = %e, "Media permission request failed");
                    PermissionStatus::Denied
                });
                cosmic::Action::App(Message::MediaPermissionResolved(status))
            },
        );

        (app, Task::batch([camera_task, media_task]))
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::StreamExt;

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        // Splash timer: registered only while the splash is showing, so
        // dropping the subscription (teardown or elapse) cancels it.
        let splash_sub = if self.splash_visible {
            Subscription::run_with_id(
                "splash",
                cosmic::iced::stream::channel(1, |mut output| async move {
                    tokio::time::sleep(SPLASH_DURATION).await;
                    if output.try_send(Message::SplashElapsed).is_err() {
                        debug!("Splash elapsed after teardown");
                    }
                    // Hold the stream open so the runtime does not restart
                    // it and emit a second SplashElapsed.
                    futures::future::pending::<()>().await;
                }),
            )
        } else {
            Subscription::none()
        };

        // Preview pipeline: identity includes the device path and facing,
        // so switching cameras tears the old pipeline down and starts a
        // new one.
        let selected = if self.camera_permission == PermissionStatus::Granted {
            select_device(&self.available_cameras, self.facing).cloned()
        } else {
            None
        };

        let camera_sub = match selected {
            Some(device) => Subscription::run_with_id(
                ("camera", device.path.clone(), self.facing),
                cosmic::iced::stream::channel(100, move |mut output| async move {
                    info!(path = %device.path.display(), "Camera subscription started");

                    let (sender, mut receiver) = futures::channel::mpsc::channel(100);

                    match CameraPipeline::start(&device.path, sender) {
                        Ok(pipeline) => {
                            while let Some(frame) = receiver.next().await {
                                match output.try_send(Message::CameraFrame(Arc::new(frame))) {
                                    Ok(()) => {}
                                    Err(e) if e.is_disconnected() => {
                                        info!("Preview channel closed, stopping camera");
                                        break;
                                    }
                                    Err(_) => {
                                        // UI busy; dropping a preview frame is fine
                                    }
                                }
                            }
                            drop(pipeline);
                            warn!("Camera subscription ended");
                        }
                        Err(e) => {
                            error!(error = %e, "Failed to start camera pipeline");
                        }
                    }

                    // Hold until the subscription identity changes (facing
                    // toggle or device change) instead of restarting in a
                    // tight loop.
                    futures::future::pending::<()>().await;
                }),
            ),
            None => Subscription::none(),
        };

        Subscription::batch([config_sub, splash_sub, camera_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
