//! egui Presentation
//!
//! - [`widgets`]: cards, collapsible sections, buttons and stat grids
//! - [`side_panel`]: the metadata / mesh list / variant panel
//! - [`ViewerPanel`]: per-frame host glue (drops, picker, decoding, actions)
//!
//! The 3D viewport is not drawn here; hosts render the decoded scene with
//! their own renderer next to this panel.

pub mod side_panel;
pub mod viewer;
pub mod widgets;

pub use side_panel::PanelAction;
pub use viewer::ViewerPanel;
