//! Application controller: owns domain state, talks to the gateway through
//! background jobs, and projects everything into [`UiState`].

mod catalog;
mod jobs;
mod predict;

use std::sync::mpsc::TryRecvError;

use crate::api::ApiClient;
use crate::bacteria::{BacteriaRecord, FilterCriteria, PAGE_SIZES};
use crate::config::{self, ConfigError, Settings};
use crate::egui_app::state::UiState;
use crate::egui_app::ui::style::{self, StatusTone};
use jobs::{ControllerJobs, JobMessage};

/// Maintains app state and bridges the prediction gateway to the egui UI.
pub struct PetriController {
    /// Render-friendly state consumed by the UI layer.
    pub ui: UiState,
    settings: Settings,
    client: ApiClient,
    jobs: ControllerJobs,
    /// Records backing the current catalog page.
    records: Vec<BacteriaRecord>,
    /// Filters as last applied, distinct from the editable inputs.
    applied_filters: FilterCriteria,
}

impl PetriController {
    pub fn new() -> Self {
        let settings = Settings::default();
        let client = ApiClient::from_settings(&settings);
        Self {
            ui: UiState::default(),
            settings,
            client,
            jobs: ControllerJobs::new(),
            records: Vec::new(),
            applied_filters: FilterCriteria::default(),
        }
    }

    /// Load persisted settings and rebind the gateway client to them.
    pub fn load_configuration(&mut self) -> Result<(), ConfigError> {
        let settings = config::load_or_default()?;
        self.client = ApiClient::from_settings(&settings);
        if PAGE_SIZES.contains(&settings.page_size) {
            self.ui.catalog.page.page_size = settings.page_size;
        }
        self.settings = settings;
        Ok(())
    }

    /// Drain finished background jobs and fold them into UI state. Called
    /// once per frame.
    pub fn poll_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };
            match message {
                JobMessage::CatalogLoaded(message) => self.apply_catalog_loaded(message),
                JobMessage::DetailLoaded(message) => self.apply_detail_loaded(message),
                JobMessage::PredictionFinished(message) => self.apply_prediction_finished(message),
            }
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = style::status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label.to_string();
        self.ui.status.badge_color = color;
    }

    fn persist_settings(&mut self, error_prefix: &str) {
        if let Err(err) = config::save(&self.settings) {
            self.set_status(format!("{error_prefix}: {err}"), StatusTone::Error);
        }
    }

    #[cfg(test)]
    fn with_base_url(base_url: &str) -> Self {
        let mut controller = Self::new();
        controller.client = ApiClient::new(base_url);
        controller
    }
}

impl Default for PetriController {
    fn default() -> Self {
        Self::new()
    }
}
