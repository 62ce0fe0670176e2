//! Render-friendly state consumed by the egui UI.

use crate::egui_app::ui::style;
use egui::Color32;

pub mod catalog;
pub mod predict;

pub use catalog::{
    BacteriaRowView, CatalogState, DetailView, FilterInputs, PageLink, PathogenFilter, page_links,
};
pub use predict::{PredictPane, PredictState, PredictionView, SimilarRowView};

/// Top-level UI model. The controller mutates it, the renderer reads it.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub catalog: CatalogState,
    pub predict: PredictState,
    pub tab: MainTab,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            catalog: CatalogState::default(),
            predict: PredictState::default(),
            tab: MainTab::Predict,
        }
    }
}

/// Main navigation tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainTab {
    Predict,
    Catalog,
}

/// Footer status text plus a colored badge.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Fill in traits to score a bacterium".to_string(),
            badge_label: "Idle".to_string(),
            badge_color: style::status_badge_color(style::StatusTone::Idle),
        }
    }
}
