//! Integration tests for pixel classification and coverage reports.

use mola_common::{ColorTag, EdgePolicy, GridConfig, RegionTable};
use projection::pixel_to_geo;
use region_mapper::{classify, ClassifyMethod, FileMappingReport, RegionClassifier, RegionMap};
use test_utils::sizes;

const OFFSETS: [f64; 6] = [0.0, 0.1, 0.25, 0.5, 0.7, 0.95];

fn config(offset: f64, policy: EdgePolicy) -> GridConfig {
    GridConfig::new(36, 14, offset)
        .unwrap()
        .with_edge_policy(policy)
}

// ============================================================================
// Scenario tests
// ============================================================================

#[test]
fn test_boundary_pixel_lands_in_blue_region() {
    let config = GridConfig::default();
    let geo = pixel_to_geo(0, 0, 360, 180, config.x_offset_ratio());
    assert_eq!(geo.lat, 90.0);
    assert_eq!(geo.lon, 90.0);

    let region = classify(0, 0, 360, 180, &config).unwrap();
    assert_eq!(region.index, 1);
    assert_eq!(region.color, ColorTag::Blue);
}

#[test]
fn test_shifted_origin_does_not_wrap_at_left_edge() {
    let config = GridConfig::default();
    // raw longitude 0.25 * 360 = 90 stays below 360
    let geo = pixel_to_geo(0, 60, 360, 180, 0.25);
    assert_eq!(geo.lon, 90.0);
    let region = classify(0, 60, 360, 180, &config).unwrap();
    assert_eq!((region.lon_min, region.lon_max), (90, 180));
    assert_ne!(region.index, 0);
}

#[test]
fn test_right_part_of_image_wraps_to_west_quadrant() {
    let config = GridConfig::default();
    // x = 300 -> 300/360 + 0.25 turns -> 30°E
    let region = classify(300, 20, 360, 180, &config).unwrap();
    assert_eq!(region.index, 0);
    assert_eq!(region.color, ColorTag::Red);
}

// ============================================================================
// Scan vs direct lookup
// ============================================================================

#[test]
fn test_direct_lookup_matches_scan_for_every_pixel() {
    let image_sizes = [sizes::ONE_PER_DEGREE, sizes::SMALL, sizes::ODD, (720, 360)];
    for &(width, height) in &image_sizes {
        for &offset in &OFFSETS {
            for policy in [EdgePolicy::Tiling, EdgePolicy::Reference] {
                let classifier = RegionClassifier::new(width, height, &config(offset, policy));
                for y in 0..height {
                    for x in 0..width {
                        assert_eq!(
                            classifier.direct_index(x, y),
                            classifier.classify_index(x, y),
                            "{width}x{height} offset {offset} {policy} pixel ({x},{y})"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_region_maps_agree_between_methods() {
    let (width, height) = sizes::ODD;
    let classifier = RegionClassifier::new(width, height, &GridConfig::default());
    let scan = RegionMap::build_with(&classifier, ClassifyMethod::Scan);
    let direct = RegionMap::build_with(&classifier, ClassifyMethod::Direct);
    assert_eq!(scan, direct);
}

#[test]
fn test_tiling_classifies_every_pixel() {
    for &offset in &OFFSETS {
        let classifier =
            RegionClassifier::new(97, 61, &config(offset, EdgePolicy::Tiling));
        let map = RegionMap::build(&classifier);
        assert_eq!(map.unclassified(), 0, "offset {offset}");
        assert!(map.counts().iter().all(|&c| c > 0), "offset {offset}");
    }
}

#[test]
fn test_grid_dimensions_do_not_change_classification() {
    let coarse = GridConfig::new(1, 1, 0.25).unwrap();
    let fine = GridConfig::new(360, 180, 0.25).unwrap();
    let a = RegionMap::build(&RegionClassifier::new(97, 61, &coarse));
    let b = RegionMap::build(&RegionClassifier::new(97, 61, &fine));
    assert_eq!(a, b);
}

#[test]
fn test_offset_rotates_columns() {
    // a half-turn offset swaps the eastern and western hemispheres
    let none = RegionClassifier::new(360, 180, &config(0.0, EdgePolicy::Tiling));
    let half = RegionClassifier::new(360, 180, &config(0.5, EdgePolicy::Tiling));
    for y in (0..180).step_by(7) {
        for x in (0..180).step_by(5) {
            assert_eq!(none.classify_index(x + 180, y), half.classify_index(x, y));
        }
    }
}

// ============================================================================
// Coverage report
// ============================================================================

#[test]
fn test_coverage_report_lists_pixel_counts() {
    let config = GridConfig::new(36, 14, 0.0).unwrap();
    let map = RegionMap::build(&RegionClassifier::new(360, 180, &config));
    let report = FileMappingReport::with_coverage(&config, RegionTable::megdr_128(), &map);

    assert_eq!(report.entries()[0].pixel_count, Some(46 * 90));
    let text = report.to_text();
    assert!(text.contains("  Pixels: 4140\n"));
    assert!(text.contains("Grid parameters: 36×14, offset: 0.0%"));

    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["unclassified_pixels"], 0);
    assert_eq!(value["regions"][4]["pixel_count"], 44 * 90);
}
