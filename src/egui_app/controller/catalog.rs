//! Catalog tab flows: paging, filtering, and the record detail panel.

use super::PetriController;
use super::jobs::{CatalogLoadResult, DetailKey, DetailLoadResult};
use crate::api::{Envelope, ListQuery};
use crate::bacteria::{BacteriaRecord, FilterCriteria, PAGE_SIZES};
use crate::egui_app::state::{BacteriaRowView, DetailView, FilterInputs};
use crate::egui_app::ui::style::StatusTone;

impl PetriController {
    /// Reload the current page with the filters already applied.
    pub fn refresh_catalog(&mut self) {
        self.request_catalog_page();
    }

    /// Apply the filter inputs and jump back to the first page.
    pub fn submit_catalog_filters(&mut self) {
        self.applied_filters = criteria_from_inputs(&self.ui.catalog.filters);
        self.ui.catalog.page.page = 1;
        self.request_catalog_page();
    }

    /// Drop every filter and reload from the first page.
    pub fn clear_catalog_filters(&mut self) {
        self.ui.catalog.filters = FilterInputs::default();
        self.applied_filters = FilterCriteria::default();
        self.ui.catalog.page.page = 1;
        self.request_catalog_page();
    }

    /// Move to `page`, clamped to the known page range.
    pub fn set_catalog_page(&mut self, page: u32) {
        let clamped = page.clamp(1, self.ui.catalog.page.total_pages.max(1));
        if clamped == self.ui.catalog.page.page {
            return;
        }
        self.ui.catalog.page.page = clamped;
        self.request_catalog_page();
    }

    /// Switch the page size, persist the choice, and reload from page one.
    pub fn set_catalog_page_size(&mut self, page_size: u32) {
        if !PAGE_SIZES.contains(&page_size) || page_size == self.ui.catalog.page.page_size {
            return;
        }
        self.ui.catalog.page.page_size = page_size;
        self.ui.catalog.page.page = 1;
        self.settings.page_size = page_size;
        self.persist_settings("Failed to save settings");
        self.request_catalog_page();
    }

    /// Open the detail panel for a row of the current page.
    pub fn select_catalog_row(&mut self, row: usize) {
        let Some(record) = self.records.get(row) else {
            return;
        };
        let key = match record.id {
            Some(id) => DetailKey::Id(id),
            None => DetailKey::NaturalKey(record.bacteria_id.clone()),
        };
        self.ui.catalog.selected = Some(row);
        self.ui.catalog.detail = None;
        self.ui.catalog.detail_loading = true;
        self.jobs.begin_detail_load(self.client.clone(), key);
        self.set_status("Loading record…", StatusTone::Busy);
    }

    pub fn close_catalog_detail(&mut self) {
        self.ui.catalog.selected = None;
        self.ui.catalog.detail = None;
        self.ui.catalog.detail_loading = false;
    }

    fn request_catalog_page(&mut self) {
        let query = ListQuery {
            page: self.ui.catalog.page.page,
            page_size: self.ui.catalog.page.page_size,
            filters: self.applied_filters.clone(),
        };
        self.ui.catalog.loading = true;
        self.ui.catalog.error = None;
        self.jobs.begin_catalog_load(self.client.clone(), query);
        self.set_status("Loading bacteria…", StatusTone::Busy);
    }

    pub(super) fn apply_catalog_loaded(&mut self, message: CatalogLoadResult) {
        if self.jobs.catalog_response_is_stale(message.request_id) {
            return;
        }
        self.jobs.clear_catalog_load();
        self.ui.catalog.loading = false;
        match message.result {
            Ok(envelope) => {
                let Envelope {
                    success,
                    message,
                    data,
                    error,
                    meta,
                } = envelope;
                let Some(records) = data.filter(|_| success) else {
                    // Keep the rows already on screen; only raise the banner.
                    let text = error
                        .map(|detail| detail.detail)
                        .filter(|detail| !detail.is_empty())
                        .or_else(|| (!message.is_empty()).then_some(message))
                        .unwrap_or_else(|| "Failed to load bacteria data".to_string());
                    self.ui.catalog.error = Some(text.clone());
                    self.set_status(text, StatusTone::Error);
                    return;
                };
                self.records = records;
                if let Some(meta) = meta {
                    self.ui.catalog.page.total_items = meta.total_items;
                    self.ui.catalog.page.total_pages = meta.total_pages.max(1);
                    if meta.current_page >= 1 {
                        self.ui.catalog.page.page = meta.current_page;
                    }
                } else {
                    self.ui.catalog.page.total_items = self.records.len() as u64;
                    self.ui.catalog.page.total_pages = 1;
                }
                self.close_catalog_detail();
                self.refresh_catalog_rows();
                self.set_status(
                    format!(
                        "Showing {} of {} bacteria",
                        self.records.len(),
                        self.ui.catalog.page.total_items
                    ),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                tracing::warn!("Catalog page load failed: {err}");
                self.ui.catalog.error = Some(err.detail().to_string());
                self.set_status(format!("Failed to load bacteria: {err}"), StatusTone::Error);
            }
        }
    }

    pub(super) fn apply_detail_loaded(&mut self, message: DetailLoadResult) {
        self.jobs.clear_detail_load();
        if self.ui.catalog.selected.is_none() {
            // Panel was closed while the fetch ran.
            return;
        }
        self.ui.catalog.detail_loading = false;
        match message.result {
            Ok(envelope) => {
                let success = envelope.success;
                match envelope.data.filter(|_| success) {
                    Some(record) => {
                        self.ui.catalog.detail = Some(detail_view(&record));
                        self.set_status(format!("Loaded {}", record.display_name()), StatusTone::Info);
                    }
                    None => {
                        self.close_catalog_detail();
                        let text = if envelope.message.is_empty() {
                            "Record not found".to_string()
                        } else {
                            envelope.message
                        };
                        self.set_status(text, StatusTone::Warning);
                    }
                }
            }
            Err(err) => {
                tracing::warn!("Record detail load failed: {err}");
                self.close_catalog_detail();
                self.set_status(format!("Failed to load record: {err}"), StatusTone::Error);
            }
        }
    }

    pub(super) fn refresh_catalog_rows(&mut self) {
        self.ui.catalog.rows = self.records.iter().map(catalog_row).collect();
    }
}

fn criteria_from_inputs(inputs: &FilterInputs) -> FilterCriteria {
    FilterCriteria {
        search: non_empty(&inputs.search),
        gram_stain: non_empty(&inputs.gram_stain),
        is_pathogen: inputs.pathogen.as_flag(),
        phylum: non_empty(&inputs.phylum),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn catalog_row(record: &BacteriaRecord) -> BacteriaRowView {
    BacteriaRowView {
        bacteria_id: record.bacteria_id.clone(),
        name: record.display_name(),
        gram_stain: text_or_unknown(&record.traits.gram_stain),
        shape: text_or_unknown(&record.traits.shape),
        phylum: text_or_unknown(&record.traits.phylum),
        is_pathogen: record.is_pathogen,
    }
}

fn text_or_unknown(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or("Unknown")
        .to_string()
}

fn detail_view(record: &BacteriaRecord) -> DetailView {
    let traits = &record.traits;
    let mut fields: Vec<(&'static str, String)> = vec![("Bacteria ID", record.bacteria_id.clone())];
    push_text(&mut fields, "Superkingdom", &traits.superkingdom);
    push_text(&mut fields, "Kingdom", &traits.kingdom);
    push_text(&mut fields, "Phylum", &traits.phylum);
    push_text(&mut fields, "Class", &traits.class_name);
    push_text(&mut fields, "Order", &traits.order);
    push_text(&mut fields, "Family", &traits.family);
    push_text(&mut fields, "Genus", &traits.genus);
    push_text(&mut fields, "Species", &traits.species);
    push_text(&mut fields, "Strain", &traits.strain);
    push_text(&mut fields, "Gram stain", &traits.gram_stain);
    push_text(&mut fields, "Shape", &traits.shape);
    push_text(&mut fields, "Cell arrangement", &traits.cell_arrangement);
    push_text(&mut fields, "Membranes", &traits.number_of_membranes);
    push_flag(&mut fields, "Motile", traits.mobility);
    push_flag(&mut fields, "Flagella", traits.flagellar_presence);
    push_flag(&mut fields, "Sporulation", traits.sporulation);
    push_text(&mut fields, "Oxygen preference", &traits.oxygen_preference);
    if let Some(temperature) = traits.optimal_temperature {
        fields.push(("Optimal temperature", format!("{temperature} °C")));
    }
    push_text(&mut fields, "Temperature range", &traits.temperature_range);
    push_text(&mut fields, "Metabolism", &traits.metabolism);
    push_text(&mut fields, "Energy source", &traits.energy_source);
    push_text(&mut fields, "Habitat", &traits.habitat);
    push_text(&mut fields, "Biotic relationship", &traits.biotic_relationship);
    fields.push((
        "Pathogenic",
        if record.is_pathogen == Some(true) {
            "Yes".to_string()
        } else {
            "No".to_string()
        },
    ));
    push_timestamp(&mut fields, "Added", &record.created_at);
    push_timestamp(&mut fields, "Updated", &record.updated_at);
    DetailView {
        title: record.display_name(),
        fields,
    }
}

fn push_text(fields: &mut Vec<(&'static str, String)>, label: &'static str, value: &Option<String>) {
    if let Some(text) = value.as_deref().map(str::trim).filter(|text| !text.is_empty()) {
        fields.push((label, text.to_string()));
    }
}

fn push_flag(fields: &mut Vec<(&'static str, String)>, label: &'static str, value: Option<bool>) {
    if let Some(flag) = value {
        fields.push((label, if flag { "Yes".to_string() } else { "No".to_string() }));
    }
}

fn push_timestamp(
    fields: &mut Vec<(&'static str, String)>,
    label: &'static str,
    value: &Option<String>,
) {
    if let Some(stamp) = value.as_deref().filter(|stamp| !stamp.is_empty()) {
        fields.push((label, stamp.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, PageMeta};
    use crate::bacteria::BacteriaTraits;
    use crate::egui_app::state::PathogenFilter;

    fn record(key: &str, name: &str) -> BacteriaRecord {
        BacteriaRecord {
            bacteria_id: key.to_string(),
            traits: BacteriaTraits {
                name: Some(name.to_string()),
                ..BacteriaTraits::default()
            },
            ..BacteriaRecord::default()
        }
    }

    fn loaded_page(records: Vec<BacteriaRecord>, total_items: u64) -> Envelope<Vec<BacteriaRecord>> {
        Envelope {
            success: true,
            message: String::new(),
            data: Some(records),
            error: None,
            meta: Some(PageMeta {
                current_page: 1,
                page_size: 10,
                total_items,
                total_pages: total_items.div_ceil(10).max(1) as u32,
                has_previous: false,
                has_next: total_items > 10,
            }),
        }
    }

    fn controller_with_page() -> PetriController {
        let mut controller = PetriController::with_base_url("http://127.0.0.1:9/api/v1");
        controller.jobs.pending_catalog_request = Some(1);
        controller.apply_catalog_loaded(CatalogLoadResult {
            request_id: 1,
            result: Ok(loaded_page(
                vec![record("BAC-1", "Escherichia coli"), record("BAC-2", "Bacillus subtilis")],
                12,
            )),
        });
        controller
    }

    #[test]
    fn loaded_page_becomes_rows_and_meta() {
        let controller = controller_with_page();
        assert_eq!(controller.ui.catalog.rows.len(), 2);
        assert_eq!(controller.ui.catalog.rows[0].name, "Escherichia coli");
        assert_eq!(controller.ui.catalog.rows[0].gram_stain, "Unknown");
        assert_eq!(controller.ui.catalog.page.total_items, 12);
        assert_eq!(controller.ui.catalog.page.total_pages, 2);
        assert!(!controller.ui.catalog.loading);
        assert!(controller.ui.catalog.error.is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut controller = controller_with_page();
        controller.jobs.pending_catalog_request = Some(8);
        controller.apply_catalog_loaded(CatalogLoadResult {
            request_id: 3,
            result: Ok(loaded_page(vec![record("BAC-9", "Stale")], 1)),
        });
        assert_eq!(controller.ui.catalog.rows.len(), 2);
        assert_eq!(controller.jobs.pending_catalog_request, Some(8));
    }

    #[test]
    fn failed_load_keeps_rows_and_raises_banner() {
        let mut controller = controller_with_page();
        controller.jobs.pending_catalog_request = Some(2);
        controller.apply_catalog_loaded(CatalogLoadResult {
            request_id: 2,
            result: Err(ApiError {
                status: 503,
                message: "service unavailable".to_string(),
                payload: None,
            }),
        });
        assert_eq!(controller.ui.catalog.rows.len(), 2);
        assert_eq!(
            controller.ui.catalog.error.as_deref(),
            Some("service unavailable")
        );
        assert_eq!(controller.ui.status.badge_label, "Error");
    }

    #[test]
    fn unsuccessful_envelope_prefers_error_detail() {
        let mut controller = controller_with_page();
        controller.jobs.pending_catalog_request = Some(2);
        controller.apply_catalog_loaded(CatalogLoadResult {
            request_id: 2,
            result: Ok(Envelope {
                success: false,
                message: "Failed to retrieve bacteria list".to_string(),
                data: None,
                error: Some(crate::api::ErrorDetail {
                    detail: "database offline".to_string(),
                }),
                meta: None,
            }),
        });
        assert_eq!(
            controller.ui.catalog.error.as_deref(),
            Some("database offline")
        );
        assert_eq!(controller.ui.catalog.rows.len(), 2);
    }

    #[test]
    fn filter_submit_resets_to_first_page() {
        let mut controller = controller_with_page();
        controller.ui.catalog.page.page = 2;
        controller.ui.catalog.filters.search = "  coli ".to_string();
        controller.ui.catalog.filters.pathogen = PathogenFilter::Pathogenic;
        controller.submit_catalog_filters();
        assert_eq!(controller.ui.catalog.page.page, 1);
        assert!(controller.ui.catalog.loading);
        assert_eq!(controller.applied_filters.search.as_deref(), Some("coli"));
        assert_eq!(controller.applied_filters.is_pathogen, Some(true));
    }

    #[test]
    fn clear_filters_resets_inputs_and_page() {
        let mut controller = controller_with_page();
        controller.ui.catalog.filters.search = "coli".to_string();
        controller.ui.catalog.filters.phylum = "Firmicutes".to_string();
        controller.submit_catalog_filters();
        controller.ui.catalog.page.page = 3;
        controller.clear_catalog_filters();
        assert_eq!(controller.ui.catalog.filters, FilterInputs::default());
        assert!(controller.applied_filters.is_empty());
        assert_eq!(controller.ui.catalog.page.page, 1);
    }

    #[test]
    fn page_changes_are_clamped_to_known_range() {
        let mut controller = controller_with_page();
        controller.set_catalog_page(7);
        assert_eq!(controller.ui.catalog.page.page, 2);
        controller.set_catalog_page(0);
        assert_eq!(controller.ui.catalog.page.page, 1);
    }

    #[test]
    fn unknown_page_size_is_rejected() {
        let mut controller = controller_with_page();
        controller.set_catalog_page_size(13);
        assert_eq!(controller.ui.catalog.page.page_size, 10);
    }

    #[test]
    fn detail_result_after_close_is_dropped() {
        let mut controller = controller_with_page();
        controller.ui.catalog.selected = None;
        controller.jobs.detail_in_progress = true;
        controller.apply_detail_loaded(DetailLoadResult {
            result: Ok(Envelope {
                success: true,
                message: String::new(),
                data: Some(record("BAC-1", "Escherichia coli")),
                error: None,
                meta: None,
            }),
        });
        assert!(controller.ui.catalog.detail.is_none());
        assert!(!controller.jobs.detail_in_progress);
    }

    #[test]
    fn detail_view_skips_blank_traits_and_keeps_pathogen_row() {
        let mut subject = record("BAC-1", "Escherichia coli");
        subject.traits.phylum = Some("Proteobacteria".to_string());
        subject.traits.gram_stain = Some("  ".to_string());
        subject.traits.mobility = Some(true);
        let view = detail_view(&subject);
        assert_eq!(view.title, "Escherichia coli");
        assert!(view.fields.contains(&("Phylum", "Proteobacteria".to_string())));
        assert!(view.fields.contains(&("Motile", "Yes".to_string())));
        assert!(view.fields.contains(&("Pathogenic", "No".to_string())));
        assert!(!view.fields.iter().any(|(label, _)| *label == "Gram stain"));
    }
}
