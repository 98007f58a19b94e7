use std::path::PathBuf;

use crate::assets::{BackgroundDecoder, SelectedFile};
use crate::session::Session;
use crate::settings::ViewerSettings;
use crate::ui::side_panel::{self, PanelAction};

/// Per-frame glue between egui, the [`Session`] and background decoding.
///
/// The host calls [`ui`](Self::ui) once per frame. Dropped files, picker
/// results and finished decodes are routed into the session; panel actions
/// are applied after the panel is drawn.
pub struct ViewerPanel {
    session: Session,
    decoder: BackgroundDecoder,

    /// Paths chosen in a file dialog, possibly on another thread.
    picked_tx: flume::Sender<PathBuf>,
    picked_rx: flume::Receiver<PathBuf>,
    /// Set when the user pressed "Open" and no built-in dialog is available.
    picker_requested: bool,
}

impl Default for ViewerPanel {
    fn default() -> Self {
        Self::new(ViewerSettings::default())
    }
}

impl ViewerPanel {
    #[must_use]
    pub fn new(settings: ViewerSettings) -> Self {
        let (picked_tx, picked_rx) = flume::unbounded();
        Self {
            session: Session::new(settings),
            decoder: BackgroundDecoder::new(),
            picked_tx,
            picked_rx,
            picker_requested: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Sender for hosts that run their own file dialog.
    #[must_use]
    pub fn file_sender(&self) -> flume::Sender<PathBuf> {
        self.picked_tx.clone()
    }

    /// Returns and clears a pending "Open" request the host should serve.
    pub fn take_picker_request(&mut self) -> bool {
        std::mem::take(&mut self.picker_requested)
    }

    /// Accepts a file and starts decoding it in the background.
    /// Returns `false` if the file was ignored.
    pub fn submit(&mut self, file: &SelectedFile) -> bool {
        match self.session.select_file(file) {
            Some(request) => {
                self.decoder.spawn(request);
                true
            }
            None => false,
        }
    }

    /// Handles files dropped onto the window. Only the first accepted file
    /// is loaded.
    pub fn handle_dropped_files(&mut self, files: &[egui::DroppedFile]) {
        for dropped in files {
            let file = match (&dropped.bytes, &dropped.path) {
                (Some(bytes), path) => {
                    let name = if dropped.name.is_empty() {
                        path.as_ref()
                            .and_then(|p| p.file_name())
                            .map(|n| n.to_string_lossy().to_string())
                            .unwrap_or_default()
                    } else {
                        dropped.name.clone()
                    };
                    SelectedFile {
                        name,
                        bytes: bytes.clone(),
                        path: path.clone(),
                    }
                }
                (None, Some(path)) => {
                    if !self.session.settings().accepts(&path.to_string_lossy()) {
                        log::debug!("Ignoring dropped file {}", path.display());
                        continue;
                    }
                    match SelectedFile::from_path(path) {
                        Ok(file) => file,
                        Err(e) => {
                            log::warn!("Failed to read dropped file {}: {e}", path.display());
                            continue;
                        }
                    }
                }
                (None, None) => continue,
            };

            if self.submit(&file) {
                break;
            }
        }
    }

    /// Drains picker results and finished decodes. Returns `true` if the
    /// session changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        while let Ok(path) = self.picked_rx.try_recv() {
            match SelectedFile::from_path(&path) {
                Ok(file) => changed |= self.submit(&file),
                Err(e) => log::warn!("Failed to read {}: {e}", path.display()),
            }
        }

        while let Some(done) = self.decoder.try_recv() {
            changed |= self.session.finish_load(done.ticket, done.result);
        }

        changed
    }

    /// Applies one panel action.
    pub fn apply(&mut self, ctx: &egui::Context, action: PanelAction) {
        match action {
            PanelAction::OpenFilePicker => self.open_file_picker(),
            PanelAction::ClearModel => self.session.clear(),
            PanelAction::SelectVariant(name) => {
                futures::executor::block_on(self.session.select_variant(&name));
            }
            PanelAction::ResetVariant => self.session.reset_variant(),
            PanelAction::CopyInfoJson => {
                let Some(info) = self.session.info() else {
                    return;
                };
                match info.to_json_pretty() {
                    Ok(json) => ctx.copy_text(json),
                    Err(e) => log::error!("Failed to serialize metadata: {e}"),
                }
            }
        }
    }

    /// Runs one frame: intake, polling, the panel window and its actions.
    pub fn ui(&mut self, ctx: &egui::Context) {
        let (dropped, hovering) = ctx.input(|i| (i.raw.dropped_files.clone(), !i.raw.hovered_files.is_empty()));
        if !dropped.is_empty() {
            self.handle_dropped_files(&dropped);
        }

        if self.poll() {
            ctx.request_repaint();
        }

        let actions = egui::Window::new("GLB Info")
            .default_pos([10.0, 10.0])
            .default_width(320.0)
            .show(ctx, |ui| {
                if hovering {
                    ui.colored_label(egui::Color32::LIGHT_BLUE, "Release to load");
                }
                side_panel::show(ui, &self.session)
            })
            .and_then(|response| response.inner)
            .unwrap_or_default();

        for action in actions {
            self.apply(ctx, action);
        }
    }

    #[cfg(feature = "file-dialog")]
    fn open_file_picker(&mut self) {
        let sender = self.picked_tx.clone();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new().add_filter("glTF Binary", &["glb"]).pick_file() {
                let _ = sender.send(path);
            }
        });
    }

    #[cfg(not(feature = "file-dialog"))]
    fn open_file_picker(&mut self) {
        self.picker_requested = true;
    }
}
