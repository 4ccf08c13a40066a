//! Coordinate transforms between image pixels and planetary coordinates.
//!
//! Implements the projection from scratch without external dependencies.

pub mod equirectangular;

pub use equirectangular::{geo_to_pixel, pixel_to_geo, OffsetEquirectangular};
