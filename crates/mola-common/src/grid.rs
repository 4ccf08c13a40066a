//! Grid overlay configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MolaError, MolaResult};

/// Default number of display grid columns.
pub const DEFAULT_GRID_WIDTH: u32 = 36;
/// Default number of display grid rows.
pub const DEFAULT_GRID_HEIGHT: u32 = 14;
/// Default shift of the longitude origin, as a fraction of image width.
pub const DEFAULT_X_OFFSET_RATIO: f64 = 0.25;

/// How region boundaries are resolved during classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Half-open intervals with the polar bands stretched to the poles.
    /// Every point belongs to exactly one region.
    #[default]
    Tiling,
    /// Closed intervals on the 88° tile bounds; shared edges go to the
    /// first region in table order and the polar caps stay unclassified.
    Reference,
}

impl EdgePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgePolicy::Tiling => "tiling",
            EdgePolicy::Reference => "reference",
        }
    }
}

impl fmt::Display for EdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgePolicy {
    type Err = MolaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiling" => Ok(EdgePolicy::Tiling),
            "reference" => Ok(EdgePolicy::Reference),
            other => Err(MolaError::InvalidConfig(format!(
                "unknown edge policy '{other}', expected 'tiling' or 'reference'"
            ))),
        }
    }
}

/// Immutable overlay configuration.
///
/// `grid_width` and `grid_height` describe a finer display grid. They are
/// accepted and reported but never affect classification, which always
/// uses the sixteen MEGDR regions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    grid_width: u32,
    grid_height: u32,
    x_offset_ratio: f64,
    edge_policy: EdgePolicy,
}

impl GridConfig {
    /// Create a validated configuration with the default edge policy.
    pub fn new(grid_width: u32, grid_height: u32, x_offset_ratio: f64) -> MolaResult<Self> {
        if grid_width == 0 || grid_height == 0 {
            return Err(MolaError::InvalidConfig(format!(
                "grid dimensions must be positive, got {grid_width}x{grid_height}"
            )));
        }
        if !x_offset_ratio.is_finite() || !(0.0..1.0).contains(&x_offset_ratio) {
            return Err(MolaError::InvalidConfig(format!(
                "x offset ratio must be in [0, 1), got {x_offset_ratio}"
            )));
        }
        Ok(Self {
            grid_width,
            grid_height,
            x_offset_ratio,
            edge_policy: EdgePolicy::default(),
        })
    }

    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }

    pub fn grid_width(&self) -> u32 {
        self.grid_width
    }

    pub fn grid_height(&self) -> u32 {
        self.grid_height
    }

    pub fn x_offset_ratio(&self) -> f64 {
        self.x_offset_ratio
    }

    pub fn edge_policy(&self) -> EdgePolicy {
        self.edge_policy
    }

    /// Display cell width as a fraction of the image width.
    pub fn cell_width_ratio(&self) -> f64 {
        1.0 / f64::from(self.grid_width)
    }

    /// Display cell height as a fraction of the image height.
    pub fn cell_height_ratio(&self) -> f64 {
        1.0 / f64::from(self.grid_height)
    }

    /// Offset expressed in percent, as shown in reports.
    pub fn offset_percent(&self) -> f64 {
        self.x_offset_ratio * 100.0
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            x_offset_ratio: DEFAULT_X_OFFSET_RATIO,
            edge_policy: EdgePolicy::default(),
        }
    }
}
