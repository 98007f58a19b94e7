//! Intake & Session State
//!
//! [`Session`] owns the currently loaded model and its transient object URL.
//!
//! ```text
//!   Empty ──select_file──▶ Loaded ──clear──▶ Empty
//!                            │ ▲
//!                            └─┘ select_file (previous URL released first)
//! ```
//!
//! Selecting a file does not decode it. The session hands back a
//! [`LoadRequest`]; whoever decodes it (inline, a [`BackgroundDecoder`], or
//! an async task) reports back through [`Session::finish_load`]. Every request
//! carries a [`LoadTicket`] and only the live ticket's result is accepted, so
//! a slow decode of a replaced or cleared file cannot overwrite newer state.
//!
//! [`BackgroundDecoder`]: crate::assets::BackgroundDecoder

use std::sync::Arc;

use crate::assets::{BlobStore, BlobUrl, DecodedModel, GlbLoader, MemoryBlobStore, SelectedFile};
use crate::errors::Result;
use crate::info::GlbInfo;
use crate::settings::ViewerSettings;
use crate::variants::{DocumentMaterials, MaterialResolver, SwitchOutcome, VariantSet, switch_variant};

/// Identifies one load request. Tickets increase monotonically per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Work item produced by accepting a file.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub url: BlobUrl,
    pub name: String,
    pub bytes: Arc<[u8]>,
}

/// Decoded data of the loaded model. Replaced wholesale, never patched.
pub struct ModelView {
    pub model: DecodedModel,
    pub info: GlbInfo,
    pub variants: Option<VariantSet>,
}

/// The model currently owned by the session.
pub struct LoadedModel {
    pub name: String,
    pub size: u64,
    pub url: BlobUrl,
    pub ticket: LoadTicket,
    /// `None` until decoding finishes, and after a failed decode.
    pub view: Option<ModelView>,
}

pub enum SessionState {
    Empty,
    Loaded(LoadedModel),
}

/// Top-level viewer state: intake, URL lifecycle, metadata and variants.
pub struct Session<S: BlobStore = MemoryBlobStore> {
    settings: ViewerSettings,
    store: S,
    state: SessionState,
    next_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ViewerSettings::default())
    }
}

impl Session {
    #[must_use]
    pub fn new(settings: ViewerSettings) -> Self {
        let store = MemoryBlobStore::new(settings.blob_url_prefix.clone());
        Self::with_store(settings, store)
    }
}

impl<S: BlobStore> Session<S> {
    pub fn with_store(settings: ViewerSettings, store: S) -> Self {
        Self {
            settings,
            store,
            state: SessionState::Empty,
            next_ticket: 1,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SessionState::Loaded(_))
    }

    #[must_use]
    pub fn loaded(&self) -> Option<&LoadedModel> {
        match &self.state {
            SessionState::Loaded(loaded) => Some(loaded),
            SessionState::Empty => None,
        }
    }

    #[must_use]
    pub fn current_url(&self) -> Option<&BlobUrl> {
        self.loaded().map(|l| &l.url)
    }

    #[must_use]
    pub fn view(&self) -> Option<&ModelView> {
        self.loaded().and_then(|l| l.view.as_ref())
    }

    #[must_use]
    pub fn info(&self) -> Option<&GlbInfo> {
        self.view().map(|v| &v.info)
    }

    #[must_use]
    pub fn variants(&self) -> Option<&VariantSet> {
        self.view().and_then(|v| v.variants.as_ref())
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Accepts a dropped or picked file.
    ///
    /// Files without an accepted extension are ignored and `None` is returned;
    /// the session is left untouched. Otherwise the previous model's URL is
    /// released, a new URL is registered and a decode request is returned.
    pub fn select_file(&mut self, file: &SelectedFile) -> Option<LoadRequest> {
        if !self.settings.accepts(&file.name) {
            log::debug!("Ignoring non-GLB selection: {}", file.name);
            return None;
        }

        self.release_current();

        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;
        let url = self.store.create_url(file);

        log::info!("Selected {} ({} bytes) as {url}", file.name, file.size());

        self.state = SessionState::Loaded(LoadedModel {
            name: file.name.clone(),
            size: file.size(),
            url: url.clone(),
            ticket,
            view: None,
        });

        Some(LoadRequest {
            ticket,
            url,
            name: file.name.clone(),
            bytes: Arc::clone(&file.bytes),
        })
    }

    /// Delivers a decode result.
    ///
    /// Returns `true` if the result belonged to the live request and was
    /// applied. Stale results are dropped. A failed decode keeps the file
    /// loaded without metadata.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<DecodedModel>) -> bool {
        let settings = &self.settings;
        let SessionState::Loaded(loaded) = &mut self.state else {
            log::debug!("Dropping decode result {ticket:?}: no model loaded");
            return false;
        };

        if loaded.ticket != ticket {
            log::debug!("Dropping stale decode result {ticket:?} (live: {:?})", loaded.ticket);
            return false;
        }

        match result {
            Ok(model) => {
                let info = GlbInfo::extract(&model, settings);
                let variants = VariantSet::from_names(model.variant_names());
                loaded.view = Some(ModelView { model, info, variants });
                true
            }
            Err(e) => {
                log::warn!("Failed to decode {}: {e}", loaded.name);
                loaded.view = None;
                true
            }
        }
    }

    /// Selects and decodes `file` on the calling thread.
    /// Returns `false` if the file was ignored.
    pub fn load(&mut self, file: &SelectedFile) -> bool {
        let Some(request) = self.select_file(file) else {
            return false;
        };
        let result = GlbLoader::decode(&request.bytes);
        self.finish_load(request.ticket, result);
        true
    }

    /// Releases the loaded model and its URL. No-op when empty.
    pub fn clear(&mut self) {
        if self.release_current() {
            log::info!("Model cleared");
        }
    }

    fn release_current(&mut self) -> bool {
        match std::mem::replace(&mut self.state, SessionState::Empty) {
            SessionState::Loaded(previous) => {
                if !self.store.revoke_url(&previous.url) {
                    log::warn!("Transient URL {} was already released", previous.url);
                }
                true
            }
            SessionState::Empty => false,
        }
    }

    // ========================================================================
    // Variants
    // ========================================================================

    /// Switches the loaded model to `name`, resolving materials from the
    /// model's own document.
    pub async fn select_variant(&mut self, name: &str) -> SwitchOutcome {
        let Some(view) = self.view_mut() else {
            return SwitchOutcome::Ignored;
        };
        let resolver = DocumentMaterials::new(Arc::clone(&view.model.document));
        Self::switch_view(view, name, &resolver).await
    }

    /// Like [`select_variant`](Self::select_variant) with a caller-supplied resolver.
    pub async fn select_variant_with<R: MaterialResolver>(&mut self, name: &str, resolver: &R) -> SwitchOutcome {
        let Some(view) = self.view_mut() else {
            return SwitchOutcome::Ignored;
        };
        Self::switch_view(view, name, resolver).await
    }

    /// Restores every mesh's original material and clears the current variant.
    pub fn reset_variant(&mut self) {
        if let Some(ModelView {
            model,
            variants: Some(variants),
            ..
        }) = self.view_mut()
        {
            variants.reset(&mut model.scene);
        }
    }

    async fn switch_view<R: MaterialResolver>(view: &mut ModelView, name: &str, resolver: &R) -> SwitchOutcome {
        let Some(variants) = view.variants.as_mut() else {
            log::debug!("Model has no material variants; ignoring {name}");
            return SwitchOutcome::Ignored;
        };
        switch_variant(&mut view.model.scene, variants, name, resolver).await
    }

    fn view_mut(&mut self) -> Option<&mut ModelView> {
        match &mut self.state {
            SessionState::Loaded(loaded) => loaded.view.as_mut(),
            SessionState::Empty => None,
        }
    }
}

impl<S: BlobStore> Drop for Session<S> {
    fn drop(&mut self) {
        self.release_current();
    }
}
