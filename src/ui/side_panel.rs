//! The metadata side panel.
//!
//! Pure presentation: it reads the session and reports what the user asked
//! for as [`PanelAction`]s. The host applies them.

use crate::assets::BlobStore;
use crate::info::GlbInfo;
use crate::session::Session;
use crate::ui::widgets::{action_button, card, choice_button, collapsible, format_kb, stat_grid};
use crate::variants::VariantSet;

/// A user request emitted by the side panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    OpenFilePicker,
    ClearModel,
    SelectVariant(String),
    ResetVariant,
    CopyInfoJson,
}

/// Draws the panel contents into `ui`.
pub fn show<S: BlobStore>(ui: &mut egui::Ui, session: &Session<S>) -> Vec<PanelAction> {
    let mut actions = Vec::new();

    card(ui, "Model", |ui| {
        match session.loaded() {
            Some(loaded) => {
                ui.label(format!("{} ({})", loaded.name, format_kb(session.settings().to_kilobytes(loaded.size))));
                if loaded.view.is_none() {
                    ui.weak("Not yet loaded");
                }
            }
            None => {
                ui.label("Drop a .glb file here");
            }
        }

        ui.horizontal(|ui| {
            if ui.button("Open .glb…").clicked() {
                actions.push(PanelAction::OpenFilePicker);
            }
            if ui.add_enabled(session.is_loaded(), egui::Button::new("Clear")).clicked() {
                actions.push(PanelAction::ClearModel);
            }
        });
    });

    let Some(info) = session.info() else {
        return actions;
    };

    ui.add_space(6.0);
    show_asset(ui, info);

    ui.add_space(6.0);
    show_statistics(ui, info);

    ui.add_space(6.0);
    show_meshes(ui, info);

    if session.settings().show_variants
        && let Some(variants) = session.variants()
    {
        ui.add_space(6.0);
        show_variants(ui, variants, &mut actions);
    }

    ui.add_space(6.0);
    if action_button(ui, "Copy metadata as JSON", true) {
        actions.push(PanelAction::CopyInfoJson);
    }

    actions
}

fn show_asset(ui: &mut egui::Ui, info: &GlbInfo) {
    card(ui, "Asset", |ui| {
        let mut rows = vec![
            ("Version", info.version.clone()),
            ("Generator", info.generator.clone().unwrap_or_else(|| "—".to_string())),
        ];
        if let Some(copyright) = &info.copyright {
            rows.push(("Copyright", copyright.clone()));
        }
        stat_grid(ui, "glb_asset_grid", &rows);

        collapsible(ui, &format!("Extensions ({})", info.extensions.len()), false, |ui| {
            if info.extensions.is_empty() {
                ui.weak("None");
            }
            for ext in &info.extensions {
                if info.extensions_required.contains(ext) {
                    ui.label(format!("{ext} (required)"));
                } else {
                    ui.label(ext);
                }
            }
        });
    });
}

fn show_statistics(ui: &mut egui::Ui, info: &GlbInfo) {
    card(ui, "Statistics", |ui| {
        stat_grid(
            ui,
            "glb_totals_grid",
            &[
                ("Meshes", info.mesh_count().to_string()),
                ("Vertices", info.totals.vertices.to_string()),
                ("Indices", info.totals.indices.to_string()),
                ("Geometry size", format_kb(info.totals.size_kb)),
                ("Nodes", info.counts.nodes.to_string()),
                ("Materials", info.counts.materials.to_string()),
                ("Textures", info.counts.textures.to_string()),
                ("Animations", info.counts.animations.to_string()),
            ],
        );
    });
}

fn show_meshes(ui: &mut egui::Ui, info: &GlbInfo) {
    collapsible(ui, &format!("Meshes ({})", info.mesh_count()), true, |ui| {
        egui::ScrollArea::vertical().max_height(260.0).show(ui, |ui| {
            for (i, mesh) in info.meshes.iter().enumerate() {
                let title = if mesh.compressed {
                    format!("{} [compressed]", mesh.name)
                } else {
                    mesh.name.clone()
                };
                egui::CollapsingHeader::new(title)
                    .id_salt(("glb_mesh", i))
                    .default_open(false)
                    .show(ui, |ui| {
                        stat_grid(
                            ui,
                            &format!("glb_mesh_grid_{i}"),
                            &[
                                ("Vertices", mesh.vertex_count.to_string()),
                                ("Indices", mesh.index_count.to_string()),
                                ("Size", format_kb(mesh.size_kb)),
                                ("Attributes", mesh.attributes.join(", ")),
                            ],
                        );
                    });
            }
        });
    });
}

fn show_variants(ui: &mut egui::Ui, variants: &VariantSet, actions: &mut Vec<PanelAction>) {
    card(ui, "Material Variants", |ui| {
        ui.horizontal_wrapped(|ui| {
            for name in variants.names() {
                if choice_button(ui, name, variants.current() == Some(name.as_str())) {
                    actions.push(PanelAction::SelectVariant(name.clone()));
                }
            }
        });
        if variants.current().is_some() && ui.small_button("Original materials").clicked() {
            actions.push(PanelAction::ResetVariant);
        }
    });
}
