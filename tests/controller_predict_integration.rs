//! End-to-end prediction flows: form validation, gateway round trip, and
//! the projected result view.

mod support;

use std::time::{Duration, Instant};

use petri::config::{self, Settings};
use petri::egui_app::controller::PetriController;
use petri::egui_app::state::PredictPane;
use support::http::{json_response, serve_responses};
use support::petri_env::PetriEnvGuard;
use tempfile::TempDir;

struct Harness {
    _env: PetriEnvGuard,
    _temp: TempDir,
    controller: PetriController,
}

impl Harness {
    fn new(base_url: &str) -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let env = PetriEnvGuard::set_config_home(temp.path().to_path_buf());
        config::save(&Settings {
            api_base_url: base_url.to_string(),
            page_size: 10,
        })
        .expect("write settings");
        let mut controller = PetriController::new();
        controller.load_configuration().expect("load configuration");
        Self {
            _env: env,
            _temp: temp,
            controller,
        }
    }

    fn wait_until(&mut self, mut done: impl FnMut(&PetriController) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !done(&self.controller) {
            assert!(Instant::now() < deadline, "background job did not finish");
            self.controller.poll_jobs();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn fill_valid_draft(&mut self) {
        let draft = &mut self.controller.ui.predict.draft;
        draft.genus = "Listeria".to_string();
        draft.species = "monocytogenes".to_string();
        draft.gram_stain = "Positive".to_string();
        draft.shape = "Rod".to_string();
        draft.mobility = "Yes".to_string();
        draft.optimal_temperature = "37".to_string();
    }
}

#[test]
fn prediction_round_trip_shows_result_view() {
    let body = r#"{
        "success": true,
        "message": "Prediction generated",
        "data": {
            "input_bacteria": {"bacteria_id": "BAC-9", "genus": "Listeria", "species": "monocytogenes"},
            "is_pathogen_prediction": true,
            "pathogen_probability": 0.8734,
            "similar_bacteria": [
                {"bacteria_id": "BAC-4", "name": "Listeria ivanovii", "phylum": "Firmicutes", "class_name": "Bacilli", "is_pathogen": true, "similarity_score": 0.91},
                {"bacteria_id": "BAC-5", "habitat": "Soil", "is_pathogen": false, "similarity_score": 0.62}
            ]
        }
    }"#;
    let base = serve_responses(vec![json_response(body)]);
    let mut harness = Harness::new(&base);
    harness.fill_valid_draft();

    harness.controller.submit_prediction();
    assert!(harness.controller.ui.predict.submitting);
    harness.wait_until(|c| !c.ui.predict.submitting);

    assert_eq!(harness.controller.ui.predict.pane, PredictPane::Result);
    let view = harness
        .controller
        .ui
        .predict
        .result
        .clone()
        .expect("result view");
    assert_eq!(view.headline, "Likely Pathogenic");
    assert_eq!(view.subject, "Listeria monocytogenes");
    assert_eq!(view.probability_percent, "87.34");
    assert_eq!(view.similar.len(), 2);
    assert_eq!(view.similar[0].name, "Listeria ivanovii");
    assert_eq!(
        view.similar[0].taxonomy,
        "Phylum: Firmicutes | Class: Bacilli"
    );
    assert_eq!(view.similar[0].similarity_percent, "91.00");
    assert_eq!(view.similar[1].taxonomy, "Habitat: Soil");
    assert!(!view.similar[1].is_pathogen);
}

#[test]
fn missing_required_fields_never_reach_the_gateway() {
    // Unroutable port: any request would fail loudly rather than hang.
    let mut harness = Harness::new("http://127.0.0.1:9/api/v1");
    harness.controller.ui.predict.draft.genus = "Listeria".to_string();

    harness.controller.submit_prediction();

    assert!(!harness.controller.ui.predict.submitting);
    assert_eq!(
        harness.controller.ui.predict.missing_fields,
        vec!["Species", "Gram stain", "Shape"]
    );
    assert!(harness.controller.ui.predict.last_error.is_some());
    assert_eq!(harness.controller.ui.status.badge_label, "Warning");
}

#[test]
fn gateway_failure_keeps_draft_for_retry() {
    let error_body = r#"{"success": false, "error": {"detail": "Prediction service unavailable"}}"#;
    let error_response = format!(
        "HTTP/1.1 502 Bad Gateway\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        error_body.len(),
        error_body
    );
    let base = serve_responses(vec![error_response]);
    let mut harness = Harness::new(&base);
    harness.fill_valid_draft();

    harness.controller.submit_prediction();
    harness.wait_until(|c| !c.ui.predict.submitting);

    assert_eq!(harness.controller.ui.predict.pane, PredictPane::Form);
    assert_eq!(
        harness.controller.ui.predict.last_error.as_deref(),
        Some("Prediction service unavailable")
    );
    assert_eq!(harness.controller.ui.predict.draft.genus, "Listeria");
    assert!(harness.controller.ui.predict.result.is_none());
}

#[test]
fn new_prediction_returns_to_a_prefilled_form() {
    let body = r#"{
        "success": true,
        "message": "ok",
        "data": {
            "input_bacteria": {"bacteria_id": "BAC-9", "genus": "Listeria", "species": "monocytogenes"},
            "is_pathogen_prediction": false,
            "pathogen_probability": 0.12,
            "similar_bacteria": []
        }
    }"#;
    let base = serve_responses(vec![json_response(body)]);
    let mut harness = Harness::new(&base);
    harness.fill_valid_draft();

    harness.controller.submit_prediction();
    harness.wait_until(|c| !c.ui.predict.submitting);
    assert_eq!(harness.controller.ui.predict.pane, PredictPane::Result);

    harness.controller.start_new_prediction();
    assert_eq!(harness.controller.ui.predict.pane, PredictPane::Form);
    assert_eq!(harness.controller.ui.predict.draft.genus, "Listeria");
    assert_eq!(harness.controller.ui.predict.draft.mobility, "Yes");
    assert!(harness.controller.ui.predict.result.is_some());
}
