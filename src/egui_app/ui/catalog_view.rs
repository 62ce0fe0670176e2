//! Catalog tab: filter card, results table, pagination, detail side panel.

use eframe::egui::{self, RichText};

use super::{PetriApp, option_combo, style};
use crate::bacteria::PAGE_SIZES;
use crate::egui_app::state::{PageLink, PathogenFilter, page_links};

const GRAM_FILTER_OPTIONS: [(&str, &str); 3] = [
    ("Positive", "Positive"),
    ("Negative", "Negative"),
    ("Variable", "Variable"),
];

const PHYLUM_FILTER_OPTIONS: [(&str, &str); 4] = [
    ("Proteobacteria", "Proteobacteria"),
    ("Firmicutes", "Firmicutes"),
    ("Actinobacteria", "Actinobacteria"),
    ("Bacteroidetes", "Bacteroidetes"),
];

impl PetriApp {
    pub(super) fn render_catalog(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.heading("Bacteria Database");
        ui.label(
            RichText::new(
                "Browse our comprehensive collection of bacterial species and their \
                 characteristics. Use the filters below to refine your search.",
            )
            .color(palette.text_muted),
        );
        ui.add_space(10.0);
        self.render_catalog_filters(ui);
        ui.add_space(10.0);
        if let Some(error) = self.controller.ui.catalog.error.clone() {
            ui.label(
                RichText::new(error).color(style::status_badge_color(style::StatusTone::Error)),
            );
            ui.add_space(6.0);
        }
        self.render_catalog_table(ui);
        ui.add_space(10.0);
        self.render_catalog_pagination(ui);
    }

    fn render_catalog_filters(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let loading = self.controller.ui.catalog.loading;
        let mut apply_clicked = false;
        let mut clear_clicked = false;
        ui.label(RichText::new("Filter Bacteria").strong());
        ui.label(
            RichText::new("Refine the results using the filters below.").color(palette.text_muted),
        );
        ui.add_space(6.0);
        {
            let filters = &mut self.controller.ui.catalog.filters;
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new("Name or Species").color(palette.text_muted));
                    ui.add(
                        egui::TextEdit::singleline(&mut filters.search)
                            .hint_text("Search bacteria…")
                            .desired_width(200.0),
                    );
                });
                ui.vertical(|ui| {
                    ui.label(RichText::new("Gram Stain").color(palette.text_muted));
                    option_combo(
                        ui,
                        "catalog_gram_filter",
                        &mut filters.gram_stain,
                        "All gram stains",
                        &GRAM_FILTER_OPTIONS,
                    );
                });
                ui.vertical(|ui| {
                    ui.label(RichText::new("Pathogen Status").color(palette.text_muted));
                    let pathogen = &mut filters.pathogen;
                    egui::ComboBox::from_id_salt("catalog_pathogen_filter")
                        .width(150.0)
                        .selected_text(pathogen.label())
                        .show_ui(ui, |ui| {
                            for choice in [
                                PathogenFilter::All,
                                PathogenFilter::Pathogenic,
                                PathogenFilter::NonPathogenic,
                            ] {
                                ui.selectable_value(pathogen, choice, choice.label());
                            }
                        });
                });
                ui.vertical(|ui| {
                    ui.label(RichText::new("Phylum").color(palette.text_muted));
                    option_combo(
                        ui,
                        "catalog_phylum_filter",
                        &mut filters.phylum,
                        "All phylums",
                        &PHYLUM_FILTER_OPTIONS,
                    );
                });
            });
        }
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Clear Filters").clicked() {
                clear_clicked = true;
            }
            let apply_label = if loading { "Filtering…" } else { "Apply Filters" };
            if ui
                .add_enabled(!loading, egui::Button::new(apply_label))
                .clicked()
            {
                apply_clicked = true;
            }
        });
        if apply_clicked {
            self.controller.submit_catalog_filters();
        }
        if clear_clicked {
            self.controller.clear_catalog_filters();
        }
    }

    fn render_catalog_table(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let rows = self.controller.ui.catalog.rows.clone();
        let loading = self.controller.ui.catalog.loading;
        let detail_loading = self.controller.ui.catalog.detail_loading;
        let selected = self.controller.ui.catalog.selected;
        let total = self.controller.ui.catalog.page.total_items;
        ui.horizontal(|ui| {
            ui.label(RichText::new("Bacteria List").strong());
            ui.label(
                RichText::new(format!("Showing {} of {} bacteria", rows.len(), total))
                    .color(palette.text_muted),
            );
        });
        ui.add_space(4.0);
        if rows.is_empty() {
            if loading {
                ui.label(RichText::new("Loading bacteria…").color(palette.text_muted));
            } else {
                ui.label(
                    RichText::new("No bacteria found matching your filters.")
                        .color(palette.text_muted),
                );
                if ui.button("Clear filters").clicked() {
                    self.controller.clear_catalog_filters();
                }
            }
            return;
        }
        let mut view_clicked = None;
        egui::ScrollArea::vertical()
            .id_salt("catalog_table_scroll")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new("catalog_table")
                    .striped(true)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        for header in ["ID", "Name", "Gram Stain", "Shape", "Phylum", "Pathogenic", ""]
                        {
                            ui.label(RichText::new(header).color(palette.text_muted));
                        }
                        ui.end_row();
                        for (index, row) in rows.iter().enumerate() {
                            ui.label(RichText::new(&row.bacteria_id).monospace());
                            ui.label(&row.name);
                            ui.label(&row.gram_stain);
                            ui.label(&row.shape);
                            ui.label(&row.phylum);
                            match row.is_pathogen {
                                Some(true) => {
                                    ui.label(RichText::new("Yes").color(palette.danger));
                                }
                                Some(false) => {
                                    ui.label(RichText::new("No").color(palette.success));
                                }
                                // Unknown status reads as non-pathogenic.
                                None => {
                                    ui.label(RichText::new("No").color(palette.text_muted));
                                }
                            }
                            let is_open = selected == Some(index);
                            if ui
                                .add_enabled(
                                    !detail_loading || is_open,
                                    egui::SelectableLabel::new(is_open, "View"),
                                )
                                .clicked()
                            {
                                view_clicked = Some(index);
                            }
                            ui.end_row();
                        }
                    });
            });
        if let Some(index) = view_clicked {
            self.controller.select_catalog_row(index);
        }
    }

    fn render_catalog_pagination(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let page = self.controller.ui.catalog.page;
        if page.total_pages <= 1 || self.controller.ui.catalog.rows.is_empty() {
            return;
        }
        let mut target_page = None;
        let mut target_size = None;
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("Page {} of {}", page.page, page.total_pages))
                    .color(palette.text_muted),
            );
            ui.separator();
            if ui
                .add_enabled(page.page > 1, egui::Button::new("Previous"))
                .clicked()
            {
                target_page = Some(page.page - 1);
            }
            for link in page_links(page.page, page.total_pages) {
                match link {
                    PageLink::Page(number) => {
                        let is_current = number == page.page;
                        if ui
                            .selectable_label(is_current, number.to_string())
                            .clicked()
                            && !is_current
                        {
                            target_page = Some(number);
                        }
                    }
                    PageLink::Gap => {
                        ui.label(RichText::new("…").color(palette.text_muted));
                    }
                }
            }
            if ui
                .add_enabled(page.page < page.total_pages, egui::Button::new("Next"))
                .clicked()
            {
                target_page = Some(page.page + 1);
            }
            ui.separator();
            ui.label(RichText::new("Items per page:").color(palette.text_muted));
            egui::ComboBox::from_id_salt("catalog_page_size")
                .width(64.0)
                .selected_text(page.page_size.to_string())
                .show_ui(ui, |ui| {
                    for size in PAGE_SIZES {
                        if ui
                            .selectable_label(size == page.page_size, size.to_string())
                            .clicked()
                        {
                            target_size = Some(size);
                        }
                    }
                });
        });
        if let Some(number) = target_page {
            self.controller.set_catalog_page(number);
        }
        if let Some(size) = target_size {
            self.controller.set_catalog_page_size(size);
        }
    }

    pub(super) fn render_catalog_detail(&mut self, ctx: &egui::Context) {
        if self.controller.ui.catalog.selected.is_none() {
            return;
        }
        let palette = style::palette();
        let mut close_clicked = false;
        egui::SidePanel::right("catalog_detail")
            .resizable(false)
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                let title = self
                    .controller
                    .ui
                    .catalog
                    .detail
                    .as_ref()
                    .map(|detail| detail.title.clone())
                    .unwrap_or_else(|| "Record".to_string());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(title).strong());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            close_clicked = true;
                        }
                    });
                });
                ui.separator();
                if self.controller.ui.catalog.detail_loading {
                    ui.label(RichText::new("Loading record…").color(palette.text_muted));
                    return;
                }
                let Some(detail) = self.controller.ui.catalog.detail.clone() else {
                    ui.label(RichText::new("No record loaded.").color(palette.text_muted));
                    return;
                };
                egui::ScrollArea::vertical()
                    .id_salt("catalog_detail_scroll")
                    .show(ui, |ui| {
                        egui::Grid::new("catalog_detail_fields")
                            .striped(true)
                            .spacing([12.0, 4.0])
                            .show(ui, |ui| {
                                for (label, value) in &detail.fields {
                                    ui.label(RichText::new(*label).color(palette.text_muted));
                                    ui.label(value);
                                    ui.end_row();
                                }
                            });
                    });
            });
        if close_clicked {
            self.controller.close_catalog_detail();
        }
    }
}
