// SPDX-License-Identifier: GPL-3.0-only

//! UI navigation, alerts, and configuration handlers

use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use tracing::{error, info, warn};

use crate::app::state::{AppModel, ContextPage, Message};
use crate::config::AppTheme;
use crate::storage;

impl AppModel {
    /// Reveal the gallery directory in the file manager.
    pub(crate) fn handle_open_gallery(&mut self) -> Task<cosmic::Action<Message>> {
        let gallery = storage::gallery_directory();
        info!(path = %gallery.display(), "Opening gallery");
        if let Err(err) = open::that_detached(&gallery) {
            error!(path = %gallery.display(), error = %err, "Failed to open gallery");
        }
        Task::none()
    }

    /// The user acknowledged the active alert.
    pub(crate) fn handle_dismiss_alert(&mut self) -> Task<cosmic::Action<Message>> {
        self.active_alert = None;
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(err) = open::that_detached(&url) {
            error!(url = %url, error = %err, "Failed to open URL");
        }
        Task::none()
    }

    /// Configuration changed on disk (settings daemon or another instance).
    pub(crate) fn handle_update_config(
        &mut self,
        config: crate::config::Config,
    ) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");
        self.config = config;
        cosmic::command::set_theme(self.config.app_theme.theme())
    }

    pub(crate) fn handle_set_app_theme(&mut self, index: usize) -> Task<cosmic::Action<Message>> {
        let app_theme = match index {
            0 => AppTheme::System,
            1 => AppTheme::Dark,
            2 => AppTheme::Light,
            _ => {
                warn!(index, "Unknown theme index");
                return Task::none();
            }
        };

        info!(?app_theme, "Setting application theme");
        self.config.app_theme = app_theme;

        if let Some(handler) = self.config_handler.as_ref()
            && let Err(err) = self.config.write_entry(handler)
        {
            error!(?err, "Failed to save app theme setting");
        }

        cosmic::command::set_theme(app_theme.theme())
    }
}
