//! Whole-image classification.

use std::time::Instant;

use mola_common::region::REGION_COUNT;
use mola_common::PixelCoordinate;
use tracing::debug;

use crate::classifier::RegionClassifier;

/// How each pixel is resolved to a region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassifyMethod {
    /// Scan the table in order and take the first match.
    Scan,
    /// Compute band and quadrant directly.
    #[default]
    Direct,
}

/// Region index of every pixel of an image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMap {
    width: u32,
    height: u32,
    cells: Vec<Option<u8>>,
    counts: [usize; REGION_COUNT],
    unclassified: usize,
}

impl RegionMap {
    /// Classify every pixel with the direct lookup.
    pub fn build(classifier: &RegionClassifier) -> Self {
        Self::build_with(classifier, ClassifyMethod::default())
    }

    pub fn build_with(classifier: &RegionClassifier, method: ClassifyMethod) -> Self {
        let start = Instant::now();
        let (width, height) = (classifier.width(), classifier.height());
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        let mut counts = [0usize; REGION_COUNT];
        let mut unclassified = 0;

        for y in 0..height {
            for x in 0..width {
                let index = match method {
                    ClassifyMethod::Scan => classifier.classify_index(x, y),
                    ClassifyMethod::Direct => classifier.direct_index(x, y),
                };
                match index {
                    Some(i) => counts[i] += 1,
                    None => unclassified += 1,
                }
                cells.push(index.map(|i| i as u8));
            }
        }

        debug!(
            width,
            height,
            ?method,
            unclassified,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Classified image pixels"
        );

        Self {
            width,
            height,
            cells,
            counts,
            unclassified,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Region index at pixel `(x, y)`; `None` for background or out of
    /// bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<usize> {
        self.at(PixelCoordinate::new(x, y))
    }

    pub fn at(&self, pixel: PixelCoordinate) -> Option<usize> {
        if !pixel.in_bounds(self.width, self.height) {
            return None;
        }
        self.cells[pixel.y as usize * self.width as usize + pixel.x as usize].map(usize::from)
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[Option<u8>] {
        &self.cells
    }

    /// Number of pixels assigned to region `index`.
    pub fn pixel_count(&self, index: usize) -> usize {
        self.counts.get(index).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &[usize; REGION_COUNT] {
        &self.counts
    }

    pub fn unclassified(&self) -> usize {
        self.unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mola_common::{EdgePolicy, GridConfig};

    #[test]
    fn test_counts_add_up() {
        let classifier = RegionClassifier::new(72, 36, &GridConfig::default());
        let map = RegionMap::build(&classifier);
        let total: usize = map.counts().iter().sum();
        assert_eq!(total + map.unclassified(), 72 * 36);
        assert_eq!(map.unclassified(), 0);
    }

    #[test]
    fn test_one_pixel_per_degree_counts() {
        // with no offset each region covers a whole number of columns
        let config = GridConfig::new(36, 14, 0.0).unwrap();
        let map = RegionMap::build(&RegionClassifier::new(360, 180, &config));
        // top band: rows 0..=45 (lat 90 down to 45), 90 columns each
        assert_eq!(map.pixel_count(0), 46 * 90);
        // (0, 44]: rows 46..=89
        assert_eq!(map.pixel_count(4), 44 * 90);
        // (-44, 0]: rows 90..=133
        assert_eq!(map.pixel_count(8), 44 * 90);
        // [-90, -44]: rows 134..=179
        assert_eq!(map.pixel_count(12), 46 * 90);
    }

    #[test]
    fn test_reference_map_has_background_rows() {
        let config = GridConfig::new(36, 14, 0.0)
            .unwrap()
            .with_edge_policy(EdgePolicy::Reference);
        let map = RegionMap::build(&RegionClassifier::new(360, 180, &config));
        // rows 0 and 1 are poleward of 88°N, rows 179 south of 88°S
        assert_eq!(map.get(10, 0), None);
        assert_eq!(map.get(10, 1), None);
        assert_eq!(map.get(10, 2), Some(0));
        assert_eq!(map.get(10, 179), None);
        assert_eq!(map.unclassified(), 3 * 360);
    }

    #[test]
    fn test_out_of_bounds_get() {
        let map = RegionMap::build(&RegionClassifier::new(4, 2, &GridConfig::default()));
        assert_eq!(map.get(4, 0), None);
        assert_eq!(map.get(0, 2), None);
        assert_eq!(map.at(PixelCoordinate::new(3, 1)), map.get(3, 1));
        assert!(map.at(PixelCoordinate::new(3, 1)).is_some());
        assert_eq!(map.cells().len(), 8);
    }
}
