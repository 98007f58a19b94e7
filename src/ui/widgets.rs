//! Small presentational building blocks shared by the panels.

/// A titled group frame.
pub fn card<R>(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::group(ui.style())
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.strong(title);
            ui.separator();
            add_contents(ui)
        })
        .inner
}

/// A collapsible section. Returns `None` while collapsed.
pub fn collapsible<R>(
    ui: &mut egui::Ui,
    title: &str,
    default_open: bool,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> Option<R> {
    egui::CollapsingHeader::new(title)
        .default_open(default_open)
        .show(ui, add_contents)
        .body_returned
}

/// A full-width button. Returns `true` when clicked.
pub fn action_button(ui: &mut egui::Ui, label: &str, enabled: bool) -> bool {
    let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 0.0));
    ui.add_enabled(enabled, button).clicked()
}

/// A toggle-style button highlighted when `selected`.
pub fn choice_button(ui: &mut egui::Ui, label: &str, selected: bool) -> bool {
    ui.add(egui::Button::new(label).selected(selected)).clicked()
}

/// Label/value rows in a two-column grid.
pub fn stat_grid(ui: &mut egui::Ui, id: &str, rows: &[(&str, String)]) {
    egui::Grid::new(id).num_columns(2).striped(true).show(ui, |ui| {
        for (label, value) in rows {
            ui.label(*label);
            ui.label(value);
            ui.end_row();
        }
    });
}

/// Formats a kilobyte value with two decimals.
#[must_use]
pub fn format_kb(size_kb: f64) -> String {
    format!("{size_kb:.2} KB")
}
