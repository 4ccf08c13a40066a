//! Common types and utilities shared across the MOLA grid mapper crates.

pub mod coords;
pub mod error;
pub mod grid;
pub mod label;
pub mod product;
pub mod region;

pub use coords::{GeoCoordinate, PixelCoordinate};
pub use error::{MolaError, MolaResult};
pub use grid::{EdgePolicy, GridConfig};
pub use label::{ImgTile, PdsLabel, SampleType};
pub use product::{file_codes, lat_code, lon_code, FileCodes, MegdrProduct};
pub use region::{build_regions, ColorTag, Region, RegionTable};
