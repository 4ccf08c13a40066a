//! Image rendering for the MEGDR region overlay.
//!
//! - Raster loading and PNG output
//! - Translucent region color overlay
//! - Region labels
//! - Side-by-side panel composition

pub mod labels;
pub mod overlay;
pub mod panel;
pub mod raster;

pub use labels::{
    default_font, draw_labels, label_placements, load_font, LabelPlacement, LabelStyle,
};
pub use overlay::{composite, region_mask, OverlayRenderer, OverlayStyle};
pub use panel::compose_side_by_side;
pub use raster::{load_raster, save_png};
