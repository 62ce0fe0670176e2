//! UI state for the prediction tab.

use crate::bacteria::PredictionDraft;

/// Which pane of the prediction tab is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PredictPane {
    #[default]
    Form,
    Result,
}

/// Prediction form, submission progress, and the last scored result.
///
/// The draft survives a completed prediction so "make another prediction"
/// returns to a pre-filled form.
#[derive(Clone, Debug, Default)]
pub struct PredictState {
    pub draft: PredictionDraft,
    pub pane: PredictPane,
    pub submitting: bool,
    /// Gateway or validation failure shown above the form.
    pub last_error: Option<String>,
    /// Required fields left blank on the last submit attempt.
    pub missing_fields: Vec<&'static str>,
    pub result: Option<PredictionView>,
}

/// Render-friendly prediction outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionView {
    pub headline: String,
    pub is_pathogen: bool,
    /// "Genus species" the result describes, with fallbacks for blanks.
    pub subject: String,
    /// Probability as a percentage with two decimals, e.g. "87.34".
    pub probability_percent: String,
    /// Probability in `0.0..=1.0` for the progress bar.
    pub probability: f32,
    pub advisory: String,
    pub similar: Vec<SimilarRowView>,
}

/// One entry in the similar-bacteria list of a result.
#[derive(Clone, Debug, PartialEq)]
pub struct SimilarRowView {
    pub name: String,
    /// Compact taxonomy or physiology summary under the name.
    pub taxonomy: String,
    pub is_pathogen: bool,
    /// Similarity as a percentage with two decimals, e.g. "91.00".
    pub similarity_percent: String,
}
