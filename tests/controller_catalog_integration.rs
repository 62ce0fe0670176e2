//! End-to-end catalog flows: persisted settings, gateway calls on worker
//! threads, and the projected table state.

mod support;

use std::time::{Duration, Instant};

use petri::config::{self, Settings};
use petri::egui_app::controller::PetriController;
use support::http::{json_response, serve_responses};
use support::petri_env::PetriEnvGuard;
use tempfile::TempDir;

struct Harness {
    _env: PetriEnvGuard,
    _temp: TempDir,
    controller: PetriController,
}

impl Harness {
    fn new(base_url: &str, page_size: u32) -> Self {
        let temp = tempfile::tempdir().expect("create tempdir");
        let env = PetriEnvGuard::set_config_home(temp.path().to_path_buf());
        config::save(&Settings {
            api_base_url: base_url.to_string(),
            page_size,
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
}

fn list_body() -> String {
    r#"{
        "success": true,
        "message": "Bacteria retrieved successfully",
        "data": [
            {"id": 4, "bacteria_id": "BAC-4", "name": "Escherichia coli", "phylum": "Proteobacteria", "gram_stain": "Negative", "shape": "Rod", "is_pathogen": true},
            {"bacteria_id": "BAC-7", "species": "subtilis", "genus": "Bacillus", "gram_stain": "Positive"}
        ],
        "meta": {"current_page": 1, "page_size": 20, "total_items": 57, "total_pages": 3, "has_previous": false, "has_next": true}
    }"#
    .to_string()
}

#[test]
fn catalog_page_flows_from_settings_to_rows() {
    let base = serve_responses(vec![json_response(&list_body())]);
    let mut harness = Harness::new(&base, 20);
    assert_eq!(harness.controller.ui.catalog.page.page_size, 20);

    harness.controller.refresh_catalog();
    assert!(harness.controller.ui.catalog.loading);
    harness.wait_until(|c| !c.ui.catalog.loading);

    let catalog = &harness.controller.ui.catalog;
    assert_eq!(catalog.rows.len(), 2);
    assert_eq!(catalog.rows[0].name, "Escherichia coli");
    assert_eq!(catalog.rows[0].is_pathogen, Some(true));
    assert_eq!(catalog.rows[1].name, "Bacillus subtilis");
    assert_eq!(catalog.rows[1].shape, "Unknown");
    assert_eq!(catalog.page.total_items, 57);
    assert_eq!(catalog.page.total_pages, 3);
    assert!(catalog.error.is_none());
    assert_eq!(harness.controller.ui.status.badge_label, "Info");
}

#[test]
fn backend_failure_keeps_rows_and_raises_banner() {
    let error_body = r#"{"success": false, "error": {"detail": "Failed to retrieve bacteria list"}}"#;
    let error_response = format!(
        "HTTP/1.1 503 Service Unavailable\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        error_body.len(),
        error_body
    );
    let base = serve_responses(vec![json_response(&list_body()), error_response]);
    let mut harness = Harness::new(&base, 10);

    harness.controller.refresh_catalog();
    harness.wait_until(|c| !c.ui.catalog.loading);
    assert_eq!(harness.controller.ui.catalog.rows.len(), 2);

    harness.controller.refresh_catalog();
    harness.wait_until(|c| !c.ui.catalog.loading);

    let catalog = &harness.controller.ui.catalog;
    assert_eq!(
        catalog.error.as_deref(),
        Some("Failed to retrieve bacteria list")
    );
    assert_eq!(catalog.rows.len(), 2, "rows stay on screen after a failure");
    assert_eq!(harness.controller.ui.status.badge_label, "Error");
}

#[test]
fn row_selection_loads_the_detail_panel() {
    let detail_body = r#"{
        "success": true,
        "message": "ok",
        "data": {"id": 4, "bacteria_id": "BAC-4", "name": "Escherichia coli", "phylum": "Proteobacteria", "class_name": "Gammaproteobacteria", "is_pathogen": true}
    }"#;
    let base = serve_responses(vec![
        json_response(&list_body()),
        json_response(detail_body),
    ]);
    let mut harness = Harness::new(&base, 10);

    harness.controller.refresh_catalog();
    harness.wait_until(|c| !c.ui.catalog.loading);

    harness.controller.select_catalog_row(0);
    assert!(harness.controller.ui.catalog.detail_loading);
    harness.wait_until(|c| c.ui.catalog.detail.is_some());

    let detail = harness.controller.ui.catalog.detail.clone().expect("detail view");
    assert_eq!(detail.title, "Escherichia coli");
    assert!(detail
        .fields
        .contains(&("Phylum", "Proteobacteria".to_string())));
    assert!(detail.fields.contains(&("Pathogenic", "Yes".to_string())));

    harness.controller.close_catalog_detail();
    assert!(harness.controller.ui.catalog.detail.is_none());
}

#[test]
fn page_size_change_persists_and_resets_page() {
    let base = serve_responses(vec![json_response(&list_body())]);
    let mut harness = Harness::new(&base, 10);
    harness.controller.refresh_catalog();
    harness.wait_until(|c| !c.ui.catalog.loading);
    harness.controller.set_catalog_page(2);

    harness.controller.set_catalog_page_size(50);
    assert_eq!(harness.controller.ui.catalog.page.page, 1);
    assert_eq!(harness.controller.ui.catalog.page.page_size, 50);

    let persisted = config::load_or_default().expect("reload settings");
    assert_eq!(persisted.page_size, 50);
    assert_eq!(persisted.api_base_url, base);
}
