//! Prediction tab flows: validation, submission, and result shaping.

use super::PetriController;
use super::jobs::PredictionJobResult;
use crate::bacteria::{BacteriaRecord, BacteriaTraits, PredictionDraft, PredictionResult};
use crate::egui_app::state::{PredictPane, PredictionView, SimilarRowView};
use crate::egui_app::ui::style::StatusTone;
use crate::normalize;

impl PetriController {
    /// Validate the draft and hand it to a worker. Submissions while one is
    /// in flight are ignored.
    pub fn submit_prediction(&mut self) {
        if self.ui.predict.submitting {
            return;
        }
        let missing = missing_required_fields(&self.ui.predict.draft);
        if !missing.is_empty() {
            self.ui.predict.last_error =
                Some("Fill in the required fields before submitting".to_string());
            self.ui.predict.missing_fields = missing;
            self.set_status("Prediction form is incomplete", StatusTone::Warning);
            return;
        }
        self.ui.predict.missing_fields.clear();
        self.ui.predict.last_error = None;
        self.ui.predict.submitting = true;
        let request = normalize::sanitize_prediction_input(&self.ui.predict.draft);
        self.jobs.begin_prediction(self.client.clone(), request);
        self.set_status("Scoring prediction…", StatusTone::Busy);
    }

    pub(super) fn apply_prediction_finished(&mut self, message: PredictionJobResult) {
        self.jobs.clear_prediction();
        self.ui.predict.submitting = false;
        match message.result {
            Ok(result) => {
                self.ui.predict.result = Some(prediction_view(&result));
                self.ui.predict.pane = PredictPane::Result;
                self.ui.predict.last_error = None;
                self.set_status(
                    format!(
                        "Prediction complete, {} similar record(s)",
                        result.similar_bacteria.len()
                    ),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                tracing::warn!("Prediction request failed: {err}");
                self.ui.predict.last_error = Some(err.detail().to_string());
                self.set_status(format!("Prediction failed: {err}"), StatusTone::Error);
            }
        }
    }

    /// Back to the form. The draft and the last result stay around so the
    /// user can tweak inputs and compare runs.
    pub fn start_new_prediction(&mut self) {
        self.ui.predict.pane = PredictPane::Form;
    }

    pub fn show_prediction_result(&mut self) {
        if self.ui.predict.result.is_some() {
            self.ui.predict.pane = PredictPane::Result;
        }
    }
}

fn missing_required_fields(draft: &PredictionDraft) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if draft.genus.trim().is_empty() {
        missing.push("Genus");
    }
    if draft.species.trim().is_empty() {
        missing.push("Species");
    }
    if draft.gram_stain.trim().is_empty() {
        missing.push("Gram stain");
    }
    if draft.shape.trim().is_empty() {
        missing.push("Shape");
    }
    missing
}

fn prediction_view(result: &PredictionResult) -> PredictionView {
    let probability = result.pathogen_probability.clamp(0.0, 1.0);
    let traits = &result.input_bacteria.traits;
    let genus = trimmed_or(&traits.genus, "Unknown genus");
    let species = trimmed_or(&traits.species, "species");
    let (headline, advisory) = if result.is_pathogen_prediction {
        (
            "Likely Pathogenic",
            "This bacteria has characteristics commonly associated with pathogenic species. \
             Further laboratory testing is recommended.",
        )
    } else {
        (
            "Likely Non-Pathogenic",
            "This bacteria has characteristics that are not typically associated with \
             pathogenic species.",
        )
    };
    PredictionView {
        headline: headline.to_string(),
        is_pathogen: result.is_pathogen_prediction,
        subject: format!("{genus} {species}"),
        probability_percent: format!("{:.2}", probability * 100.0),
        probability: probability as f32,
        advisory: advisory.to_string(),
        similar: result.similar_bacteria.iter().map(similar_row).collect(),
    }
}

fn similar_row(record: &BacteriaRecord) -> SimilarRowView {
    SimilarRowView {
        name: record.display_name(),
        taxonomy: taxonomy_summary(&record.traits),
        is_pathogen: record.is_pathogen == Some(true),
        similarity_percent: format!("{:.2}", record.similarity_score.clamp(0.0, 1.0) * 100.0),
    }
}

/// One-line summary under a similar-bacteria name. Prefers taxonomy, then
/// morphology, then environment, so sparse records still say something.
fn taxonomy_summary(traits: &BacteriaTraits) -> String {
    let taxonomy = labeled_parts(&[
        ("Phylum", &traits.phylum),
        ("Class", &traits.class_name),
        ("Order", &traits.order),
        ("Family", &traits.family),
    ]);
    if !taxonomy.is_empty() {
        return taxonomy.join(" | ");
    }
    let morphology = labeled_parts(&[("Gram", &traits.gram_stain), ("Shape", &traits.shape)]);
    if !morphology.is_empty() {
        return morphology.join(" | ");
    }
    let environment = labeled_parts(&[
        ("Oxygen", &traits.oxygen_preference),
        ("Habitat", &traits.habitat),
    ]);
    if !environment.is_empty() {
        return environment.join(" | ");
    }
    "No additional information available".to_string()
}

fn labeled_parts(pairs: &[(&str, &Option<String>)]) -> Vec<String> {
    pairs
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(|text| format!("{label}: {text}"))
        })
        .collect()
}

fn trimmed_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(fallback)
}
