#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! GLB viewer core.
//!
//! Drop or pick a `.glb` file, get a metadata snapshot of its scene and
//! switch between its `KHR_materials_variants` variants.
//!
//! ```rust,ignore
//! use glb_viewer::{SelectedFile, Session};
//!
//! let mut session = Session::default();
//! session.load(&SelectedFile::from_path("chair.glb")?);
//!
//! if let Some(info) = session.info() {
//!     println!("{} meshes, {} vertices", info.mesh_count(), info.totals.vertices);
//! }
//! pollster::block_on(session.select_variant("Walnut"));
//! ```

pub mod assets;
pub mod errors;
pub mod info;
pub mod scene;
pub mod session;
pub mod settings;
pub mod ui;
pub mod variants;

pub use assets::{BlobStore, BlobUrl, DecodedModel, GlbLoader, Material, MaterialHandle, MemoryBlobStore, SelectedFile};
pub use errors::{Result, ViewerError};
pub use info::{GlbInfo, MeshSummary, Totals};
pub use scene::{Mesh, Node, NodeHandle, Scene};
pub use session::{LoadRequest, LoadTicket, Session, SessionState};
pub use settings::ViewerSettings;
pub use ui::{PanelAction, ViewerPanel};
pub use variants::{MaterialResolver, SwitchOutcome, SwitchReport, VariantSet, switch_variant};
