//! Best-effort coercion between widget strings and the typed wire model.
//!
//! Everything in this module is total: unrecognized input degrades to
//! "unknown" (`None`) or zero instead of failing, because the backend is
//! expected to tolerate partially specified organisms. Closed-set validation
//! is the form layer's job and happens before any of this runs.

use serde::{Deserialize, Deserializer};
use time::OffsetDateTime;

use crate::bacteria::{
    BacteriaRecord, BacteriaTraits, PredictionDraft, PredictionRequest, PredictionResult,
};

/// Map a widget token onto a tri-state boolean.
///
/// {"Yes","true","True"} mean true, {"No","false","False"} mean false, and
/// every other token, the empty string included, means unknown.
pub fn parse_optional_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "Yes" | "true" | "True" => Some(true),
        "No" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parse a numeric-looking widget string; empty, unparseable, or non-finite
/// input maps to unknown.
pub fn parse_optional_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|parsed| parsed.is_finite())
}

/// Correlation identifier for a submission lacking a natural key.
pub fn correlation_id(now: OffsetDateTime) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    format!("TEMP-{millis}")
}

/// Turn the stringly form draft into a typed prediction payload.
///
/// Never fails: tri-states and numbers go through the parsers above, blank
/// text fields become `None`, and a blank natural key is replaced by a
/// generated correlation identifier so the request is never sent without one.
pub fn sanitize_prediction_input(draft: &PredictionDraft) -> PredictionRequest {
    let bacteria_id = match non_empty(&draft.bacteria_id) {
        Some(id) => id,
        None => correlation_id(OffsetDateTime::now_utc()),
    };
    PredictionRequest {
        bacteria_id,
        traits: BacteriaTraits {
            name: non_empty(&draft.name),
            superkingdom: non_empty(&draft.superkingdom),
            kingdom: non_empty(&draft.kingdom),
            phylum: non_empty(&draft.phylum),
            class_name: non_empty(&draft.class_name),
            order: non_empty(&draft.order),
            family: non_empty(&draft.family),
            genus: non_empty(&draft.genus),
            species: non_empty(&draft.species),
            strain: non_empty(&draft.strain),
            gram_stain: non_empty(&draft.gram_stain),
            shape: non_empty(&draft.shape),
            mobility: parse_optional_bool(&draft.mobility),
            flagellar_presence: parse_optional_bool(&draft.flagellar_presence),
            number_of_membranes: non_empty(&draft.number_of_membranes),
            oxygen_preference: non_empty(&draft.oxygen_preference),
            optimal_temperature: parse_optional_number(&draft.optimal_temperature),
            temperature_range: non_empty(&draft.temperature_range),
            habitat: non_empty(&draft.habitat),
            biotic_relationship: non_empty(&draft.biotic_relationship),
            cell_arrangement: non_empty(&draft.cell_arrangement),
            sporulation: parse_optional_bool(&draft.sporulation),
            metabolism: non_empty(&draft.metabolism),
            energy_source: non_empty(&draft.energy_source),
        },
    }
}

/// Pin a prediction result into its guaranteed shape.
///
/// Scores end up finite and clamped to [0,1]. Idempotent: running it on its
/// own output changes nothing.
pub fn normalize_prediction_result(mut result: PredictionResult) -> PredictionResult {
    result.pathogen_probability = clamp_unit(result.pathogen_probability);
    for record in &mut result.similar_bacteria {
        record.similarity_score = clamp_unit(record.similarity_score);
    }
    result
}

fn clamp_unit(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Deserialize a score the backend may send as a number or a numeric string.
/// Unparsable input becomes 0, never `NaN`.
pub(crate) fn f64_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(lenient_score(&value))
}

/// Deserialize a similar-bacteria list, substituting an empty vector when the
/// field is null or not a well-formed array of records.
pub(crate) fn records_or_empty<'de, D>(deserializer: D) -> Result<Vec<BacteriaRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_score(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(number) => number
            .as_f64()
            .filter(|parsed| parsed.is_finite())
            .unwrap_or(0.0),
        serde_json::Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|parsed| parsed.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}
