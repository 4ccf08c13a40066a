//! Classification of image pixels into MEGDR regions.
//!
//! - [`classifier`]: per-pixel region lookup, by table scan or by direct
//!   band/quadrant arithmetic
//! - [`region_map`]: the classification of a whole image
//! - [`report`]: the region to file name listing

pub mod classifier;
pub mod region_map;
pub mod report;

pub use classifier::{classify, lookup_index, RegionClassifier};
pub use region_map::{ClassifyMethod, RegionMap};
pub use report::{FileMappingReport, RegionEntry, ReportFormat};
