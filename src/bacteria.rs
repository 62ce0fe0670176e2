//! Domain model for bacteria traits, prediction payloads, and catalog records.
//!
//! Tri-state booleans are `Option<bool>`: `None` means unknown, a state
//! distinct from `false` that must survive the wire as an explicit `null`.
//! None of the optional fields use `skip_serializing_if` for that reason.

use serde::{Deserialize, Serialize};

/// Page sizes the catalog view offers.
pub const PAGE_SIZES: [u32; 4] = [5, 10, 20, 50];

/// Characteristics of one organism as the backend understands them.
///
/// All fields are optional; the backend is the source of truth for valid
/// enum values, so string fields stay free text at the type level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacteriaTraits {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub superkingdom: Option<String>,
    #[serde(default)]
    pub kingdom: Option<String>,
    #[serde(default)]
    pub phylum: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub genus: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub strain: Option<String>,
    #[serde(default)]
    pub gram_stain: Option<String>,
    #[serde(default)]
    pub shape: Option<String>,
    /// Tri-state: motile, non-motile, or unknown.
    #[serde(default)]
    pub mobility: Option<bool>,
    /// Tri-state.
    #[serde(default)]
    pub flagellar_presence: Option<bool>,
    /// Stringly on the wire; kept verbatim.
    #[serde(default)]
    pub number_of_membranes: Option<String>,
    #[serde(default)]
    pub oxygen_preference: Option<String>,
    #[serde(default)]
    pub optimal_temperature: Option<f64>,
    #[serde(default)]
    pub temperature_range: Option<String>,
    #[serde(default)]
    pub habitat: Option<String>,
    #[serde(default)]
    pub biotic_relationship: Option<String>,
    #[serde(default)]
    pub cell_arrangement: Option<String>,
    /// Tri-state.
    #[serde(default)]
    pub sporulation: Option<bool>,
    #[serde(default)]
    pub metabolism: Option<String>,
    #[serde(default)]
    pub energy_source: Option<String>,
}

/// Outbound prediction payload: traits plus a required correlation identifier.
///
/// The identifier is the user-supplied natural key, or `TEMP-<millis>` when
/// none was given. A request is never sent without one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub bacteria_id: String,
    #[serde(flatten)]
    pub traits: BacteriaTraits,
}

/// Outcome of a prediction call after normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Echo of the submitted traits.
    #[serde(default)]
    pub input_bacteria: PredictionRequest,
    #[serde(default)]
    pub is_pathogen_prediction: bool,
    /// Probability in [0,1]; the backend may send it as a numeric string.
    #[serde(default, deserialize_with = "crate::normalize::f64_or_string")]
    pub pathogen_probability: f64,
    /// Nearest catalog records; empty when the backend sent none or garbage.
    #[serde(default, deserialize_with = "crate::normalize::records_or_empty")]
    pub similar_bacteria: Vec<BacteriaRecord>,
}

/// A persisted catalog record: traits plus identity and scoring metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BacteriaRecord {
    /// Surrogate numeric id assigned by the backend.
    #[serde(default)]
    pub id: Option<i64>,
    /// Natural key.
    #[serde(default)]
    pub bacteria_id: String,
    #[serde(flatten)]
    pub traits: BacteriaTraits,
    /// Strict tri-state; the display layer renders unknown as "No".
    #[serde(default)]
    pub is_pathogen: Option<bool>,
    /// Similarity to the predicted organism, in [0,1]. Only attached to
    /// prediction responses; catalog listings default it to 0.
    #[serde(default, deserialize_with = "crate::normalize::f64_or_string")]
    pub similarity_score: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl BacteriaRecord {
    /// Best display name: name, else genus + species, else the natural key.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.traits.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let genus = self.traits.genus.as_deref().unwrap_or("").trim();
        let species = self.traits.species.as_deref().unwrap_or("").trim();
        let binomial = format!("{genus} {species}");
        let binomial = binomial.trim();
        if !binomial.is_empty() {
            return binomial.to_string();
        }
        self.bacteria_id.clone()
    }
}

/// Free-form prediction input exactly as captured by the form widgets.
///
/// Everything is a string here; [`crate::normalize::sanitize_prediction_input`]
/// turns a draft into a typed [`PredictionRequest`] without ever failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionDraft {
    pub bacteria_id: String,
    pub name: String,
    pub superkingdom: String,
    pub kingdom: String,
    pub phylum: String,
    pub class_name: String,
    pub order: String,
    pub family: String,
    pub genus: String,
    pub species: String,
    pub strain: String,
    pub gram_stain: String,
    pub shape: String,
    pub mobility: String,
    pub flagellar_presence: String,
    pub number_of_membranes: String,
    pub oxygen_preference: String,
    pub optimal_temperature: String,
    pub temperature_range: String,
    pub habitat: String,
    pub biotic_relationship: String,
    pub cell_arrangement: String,
    pub sporulation: String,
    pub metabolism: String,
    pub energy_source: String,
}

/// Catalog filter criteria. Unset fields are omitted from queries entirely;
/// the backend treats absent and empty-string as different signals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Substring matched against name, species, genus, and natural key.
    pub search: Option<String>,
    /// Exact gram-stain match.
    pub gram_stain: Option<String>,
    /// Tri-state pathogenicity filter; `None` means no filtering.
    pub is_pathogen: Option<bool>,
    /// Exact phylum match.
    pub phylum: Option<String>,
}

impl FilterCriteria {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.gram_stain.is_none()
            && self.is_pathogen.is_none()
            && self.phylum.is_none()
    }
}

/// Pagination state as declared by the server.
///
/// Totals always come from the response metadata, never from counting the
/// locally held page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based current page.
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            total_items: 0,
            total_pages: 1,
        }
    }
}
