//! Pixel to region classification.

use mola_common::coords::{LAT_MAX, LAT_MIN, LON_PERIOD};
use mola_common::region::{LAT_BANDS, LAT_BAND_EDGES, LON_QUADRANTS, LON_QUADRANT_WIDTH};
use mola_common::{EdgePolicy, GeoCoordinate, GridConfig, PixelCoordinate, Region, RegionTable};
use projection::OffsetEquirectangular;

/// Classifies pixels of one image against the shared region table.
#[derive(Debug, Clone, Copy)]
pub struct RegionClassifier {
    projection: OffsetEquirectangular,
    policy: EdgePolicy,
    table: &'static RegionTable,
}

impl RegionClassifier {
    pub fn new(img_width: u32, img_height: u32, config: &GridConfig) -> Self {
        Self {
            projection: OffsetEquirectangular::from_config(img_width, img_height, config),
            policy: config.edge_policy(),
            table: RegionTable::megdr_128(),
        }
    }

    pub fn projection(&self) -> &OffsetEquirectangular {
        &self.projection
    }

    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    pub fn table(&self) -> &'static RegionTable {
        self.table
    }

    pub fn width(&self) -> u32 {
        self.projection.width
    }

    pub fn height(&self) -> u32 {
        self.projection.height
    }

    /// Geographic coordinate of pixel `(x, y)`.
    pub fn geo_at(&self, x: u32, y: u32) -> GeoCoordinate {
        self.projection.pixel_to_geo(f64::from(x), f64::from(y))
    }

    /// First region in table order containing pixel `(x, y)`.
    ///
    /// `None` means the pixel is unclassified and should be drawn as
    /// background, or lies outside the image.
    pub fn classify(&self, x: u32, y: u32) -> Option<&'static Region> {
        self.classify_pixel(PixelCoordinate::new(x, y))
    }

    pub fn classify_pixel(&self, pixel: PixelCoordinate) -> Option<&'static Region> {
        if !pixel.in_bounds(self.width(), self.height()) {
            return None;
        }
        self.table.find(&self.geo_at(pixel.x, pixel.y), self.policy)
    }

    /// Table index of [`classify`](Self::classify).
    pub fn classify_index(&self, x: u32, y: u32) -> Option<usize> {
        self.classify(x, y).map(|r| r.index)
    }

    /// Table index computed from the band and quadrant directly.
    ///
    /// Always agrees with [`classify_index`](Self::classify_index).
    pub fn direct_index(&self, x: u32, y: u32) -> Option<usize> {
        if !PixelCoordinate::new(x, y).in_bounds(self.width(), self.height()) {
            return None;
        }
        lookup_index(&self.geo_at(x, y), self.policy)
    }
}

/// Classify pixel `(x, y)` of an `img_width` x `img_height` image.
pub fn classify(
    x: u32,
    y: u32,
    img_width: u32,
    img_height: u32,
    config: &GridConfig,
) -> Option<&'static Region> {
    RegionClassifier::new(img_width, img_height, config).classify(x, y)
}

/// Region table index for a coordinate, without scanning the table.
///
/// Counts the band and quadrant edges the point lies beyond, using the same
/// comparisons the table scan makes so both agree on every edge.
pub fn lookup_index(geo: &GeoCoordinate, policy: EdgePolicy) -> Option<usize> {
    let (lat, lon) = (geo.lat, geo.lon);
    let inner_lat_edges = LAT_BAND_EDGES[1..LAT_BANDS].iter().map(|&e| f64::from(e));
    let lon_edges = (1..LON_QUADRANTS).map(|q| f64::from(q as i32 * LON_QUADRANT_WIDTH));

    let (band, quadrant) = match policy {
        EdgePolicy::Tiling => {
            if !(LAT_MIN..=LAT_MAX).contains(&lat) || !(0.0..LON_PERIOD).contains(&lon) {
                return None;
            }
            (
                inner_lat_edges.filter(|&e| lat <= e).count(),
                lon_edges.filter(|&e| lon >= e).count(),
            )
        }
        EdgePolicy::Reference => {
            let north = f64::from(LAT_BAND_EDGES[0]);
            let south = f64::from(LAT_BAND_EDGES[LAT_BANDS]);
            if !(south..=north).contains(&lat) || !(0.0..=LON_PERIOD).contains(&lon) {
                return None;
            }
            (
                inner_lat_edges.filter(|&e| lat < e).count(),
                lon_edges.filter(|&e| lon > e).count(),
            )
        }
    };
    Some(band * LON_QUADRANTS + quadrant)
}
