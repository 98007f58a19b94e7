pub mod io;
pub mod loader;
pub mod material;
pub mod storage;

use slotmap::new_key_type;

// Strongly-typed handles
new_key_type! {
    pub struct MaterialHandle;
}

pub use io::{BlobStore, BlobUrl, MemoryBlobStore, SelectedFile};
pub use loader::{BackgroundDecoder, DecodeResult, DecodedModel, GlbLoader};
pub use material::{AlphaMode, Material};
pub use storage::MaterialPool;
