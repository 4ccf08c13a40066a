//! The fixed MEGDR 128 pixel/degree region table.
//!
//! The 128 pix/deg MEGDR products are cut into sixteen tiles: four latitude
//! bands, each split into four 90° longitude quadrants starting at 0°E.
//! The table order (north to south, then west to east) is significant:
//! classification resolves shared edges to the first region in table order.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::coords::{GeoCoordinate, LAT_MAX, LAT_MIN};
use crate::grid::EdgePolicy;

/// Latitude band edges, north to south.
pub const LAT_BAND_EDGES: [i32; 5] = [88, 44, 0, -44, -88];

/// Width of one longitude quadrant in degrees.
pub const LON_QUADRANT_WIDTH: i32 = 90;

/// Number of longitude quadrants per band.
pub const LON_QUADRANTS: usize = 4;

/// Number of latitude bands.
pub const LAT_BANDS: usize = LAT_BAND_EDGES.len() - 1;

/// Total number of regions in the table.
pub const REGION_COUNT: usize = LAT_BANDS * LON_QUADRANTS;

/// Native resolution of the high-resolution MEGDR tiles.
pub const MEGDR_PIXELS_PER_DEGREE: u32 = 128;

/// Display color of a region in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Red,
    Blue,
    Green,
    Orange,
}

/// Overlay RGB per color tag, indexed by `ColorTag as usize`.
const OVERLAY_RGB: [(f32, f32, f32); 4] = [
    (1.0, 0.0, 0.0), // red
    (0.0, 0.0, 1.0), // blue
    (0.0, 1.0, 0.0), // green
    (1.0, 0.5, 0.0), // orange
];

impl ColorTag {
    /// Colors in the order they are assigned to longitude quadrants.
    pub const CYCLE: [ColorTag; 4] = [
        ColorTag::Red,
        ColorTag::Blue,
        ColorTag::Green,
        ColorTag::Orange,
    ];

    /// Normalized RGB components.
    pub fn rgb(self) -> (f32, f32, f32) {
        OVERLAY_RGB[self as usize]
    }

    /// Normalized RGBA components with the given alpha.
    pub fn rgba(self, alpha: f32) -> (f32, f32, f32, f32) {
        let (r, g, b) = self.rgb();
        (r, g, b, alpha)
    }

    /// 8-bit RGBA with the given alpha.
    pub fn rgba8(self, alpha: f32) -> [u8; 4] {
        let (r, g, b, a) = self.rgba(alpha);
        [to_u8(r), to_u8(g), to_u8(b), to_u8(a)]
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorTag::Red => "red",
            ColorTag::Blue => "blue",
            ColorTag::Green => "green",
            ColorTag::Orange => "orange",
        }
    }
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One MEGDR tile footprint.
///
/// Bounds are whole degrees: latitude in `[-88, 88]`, longitude in
/// `[0, 360]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Position in the region table (0-based).
    pub index: usize,
    pub lat_min: i32,
    pub lat_max: i32,
    pub lon_min: i32,
    pub lon_max: i32,
    pub label: String,
    pub color: ColorTag,
}

impl Region {
    fn new(index: usize, lat_min: i32, lat_max: i32, lon_min: i32, color: ColorTag) -> Self {
        let lon_max = lon_min + LON_QUADRANT_WIDTH;
        let label = format!(
            "{}-{} {}°E-{}°E",
            format_lat(lat_max),
            format_lat(lat_min),
            lon_min,
            lon_max
        );
        Self {
            index,
            lat_min,
            lat_max,
            lon_min,
            lon_max,
            label,
            color,
        }
    }

    /// Latitude part of the label, e.g. `88°N-44°N`.
    pub fn lat_label(&self) -> &str {
        self.label.split(' ').next().unwrap_or(&self.label)
    }

    /// Longitude part of the label, e.g. `0°E-90°E`.
    pub fn lon_label(&self) -> &str {
        self.label.split(' ').nth(1).unwrap_or("")
    }

    /// Geographic center of the tile.
    pub fn center(&self) -> GeoCoordinate {
        GeoCoordinate {
            lat: f64::from(self.lat_min + self.lat_max) / 2.0,
            lon: f64::from(self.lon_min + self.lon_max) / 2.0,
        }
    }

    /// Latitude range this region claims under the tiling policy.
    ///
    /// The polar bands reach the poles so that the table covers the sphere.
    pub fn coverage_lat_range(&self) -> (f64, f64) {
        let south = if self.lat_min <= LAT_BAND_EDGES[LAT_BANDS] {
            LAT_MIN
        } else {
            f64::from(self.lat_min)
        };
        let north = if self.lat_max >= LAT_BAND_EDGES[0] {
            LAT_MAX
        } else {
            f64::from(self.lat_max)
        };
        (south, north)
    }

    /// Membership test for a geographic point.
    pub fn contains(&self, geo: &GeoCoordinate, policy: EdgePolicy) -> bool {
        let (lat, lon) = (geo.lat, geo.lon);
        let lon_min = f64::from(self.lon_min);
        let lon_max = f64::from(self.lon_max);
        match policy {
            EdgePolicy::Reference => {
                f64::from(self.lat_min) <= lat
                    && lat <= f64::from(self.lat_max)
                    && lon_min <= lon
                    && lon <= lon_max
            }
            EdgePolicy::Tiling => {
                let (south, north) = self.coverage_lat_range();
                let above_south = if south <= LAT_MIN {
                    lat >= south
                } else {
                    lat > south
                };
                above_south && lat <= north && lon_min <= lon && lon < lon_max
            }
        }
    }

    /// Tile size as `(lines, samples)` at `pixels_per_degree`.
    pub fn tile_dimensions(&self, pixels_per_degree: u32) -> (u32, u32) {
        let lat_span = self.lat_max.abs_diff(self.lat_min);
        let lon_span = self.lon_max.abs_diff(self.lon_min);
        (lat_span * pixels_per_degree, lon_span * pixels_per_degree)
    }
}

fn format_lat(lat: i32) -> String {
    match lat {
        0 => "0°".to_string(),
        l if l > 0 => format!("{l}°N"),
        l => format!("{}°S", -l),
    }
}

/// Ordered, immutable table of all sixteen regions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTable {
    regions: Vec<Region>,
}

impl RegionTable {
    /// The process-wide MEGDR 128 pix/deg table, built on first use.
    pub fn megdr_128() -> &'static RegionTable {
        static TABLE: OnceLock<RegionTable> = OnceLock::new();
        TABLE.get_or_init(build_regions)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Region> {
        self.regions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Region> {
        self.regions.iter()
    }

    pub fn as_slice(&self) -> &[Region] {
        &self.regions
    }

    /// First region in table order containing `geo`.
    pub fn find(&self, geo: &GeoCoordinate, policy: EdgePolicy) -> Option<&Region> {
        self.regions.iter().find(|r| r.contains(geo, policy))
    }

    /// Table index of the first region containing `geo`.
    pub fn find_index(&self, geo: &GeoCoordinate, policy: EdgePolicy) -> Option<usize> {
        self.find(geo, policy).map(|r| r.index)
    }
}

impl<'a> IntoIterator for &'a RegionTable {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

/// Build the region table from the band edges and quadrant width.
pub fn build_regions() -> RegionTable {
    let mut regions = Vec::with_capacity(REGION_COUNT);
    for band in LAT_BAND_EDGES.windows(2) {
        let (lat_max, lat_min) = (band[0], band[1]);
        for (quadrant, color) in ColorTag::CYCLE.iter().enumerate() {
            let lon_min = quadrant as i32 * LON_QUADRANT_WIDTH;
            regions.push(Region::new(regions.len(), lat_min, lat_max, lon_min, *color));
        }
    }
    RegionTable { regions }
}
