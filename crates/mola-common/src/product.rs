//! MEGDR product file naming.
//!
//! A tile file name is `<prefix><lat code><lon code>HB.<ext>`, for example
//! `MEGT88n000HB.IMG` for the topography tile whose northern edge is 88°N
//! and whose western edge is 0°E.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::region::Region;

/// Resolution/version suffix of the 128 pix/deg products.
pub const RESOLUTION_SUFFIX: &str = "HB";

/// Extension of the raw tile data.
pub const IMAGE_EXTENSION: &str = "IMG";

/// Extension of the companion PDS label.
pub const LABEL_EXTENSION: &str = "LBL";

/// The four gridded products published per tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MegdrProduct {
    Topography,
    Radius,
    Counts,
    Areoid,
}

impl MegdrProduct {
    pub const ALL: [MegdrProduct; 4] = [
        MegdrProduct::Topography,
        MegdrProduct::Radius,
        MegdrProduct::Counts,
        MegdrProduct::Areoid,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            MegdrProduct::Topography => "MEGT",
            MegdrProduct::Radius => "MEGR",
            MegdrProduct::Counts => "MEGC",
            MegdrProduct::Areoid => "MEGA",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MegdrProduct::Topography => "Topography",
            MegdrProduct::Radius => "Radius",
            MegdrProduct::Counts => "Counts",
            MegdrProduct::Areoid => "Areoid",
        }
    }

    /// Full file name for a tile of this product.
    pub fn file_name(self, region: &Region, extension: &str) -> String {
        format!(
            "{}{}{}{}.{}",
            self.prefix(),
            lat_code(region),
            lon_code(region),
            RESOLUTION_SUFFIX,
            extension
        )
    }
}

impl fmt::Display for MegdrProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Latitude part of a tile code.
///
/// MEGDR tiles are keyed by their northern edge, so the band just south of
/// the equator is `00n` and the southern polar band is `44s`.
pub fn lat_code(region: &Region) -> String {
    if region.lat_max >= 0 {
        format!("{:02}n", region.lat_max)
    } else {
        format!("{:02}s", region.lat_max.unsigned_abs())
    }
}

/// Longitude part of a tile code: the western edge, zero padded.
pub fn lon_code(region: &Region) -> String {
    format!("{:03}", region.lon_min)
}

/// The four data file names of one tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCodes {
    pub topography: String,
    pub radius: String,
    pub counts: String,
    pub areoid: String,
}

impl FileCodes {
    pub fn get(&self, product: MegdrProduct) -> &str {
        match product {
            MegdrProduct::Topography => &self.topography,
            MegdrProduct::Radius => &self.radius,
            MegdrProduct::Counts => &self.counts,
            MegdrProduct::Areoid => &self.areoid,
        }
    }

    /// File names paired with their product, in report order.
    pub fn entries(&self) -> [(MegdrProduct, &str); 4] {
        MegdrProduct::ALL.map(|p| (p, self.get(p)))
    }
}

/// Derive the `.IMG` file names for a region.
pub fn file_codes(region: &Region) -> FileCodes {
    file_codes_with_extension(region, IMAGE_EXTENSION)
}

/// Derive the companion `.LBL` label names for a region.
pub fn label_codes(region: &Region) -> FileCodes {
    file_codes_with_extension(region, LABEL_EXTENSION)
}

fn file_codes_with_extension(region: &Region, extension: &str) -> FileCodes {
    FileCodes {
        topography: MegdrProduct::Topography.file_name(region, extension),
        radius: MegdrProduct::Radius.file_name(region, extension),
        counts: MegdrProduct::Counts.file_name(region, extension),
        areoid: MegdrProduct::Areoid.file_name(region, extension),
    }
}
