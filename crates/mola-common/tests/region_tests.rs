//! Tests for the region table partition and MEGDR tile reading.

use mola_common::region::{LAT_BAND_EDGES, REGION_COUNT};
use mola_common::{
    build_regions, file_codes, EdgePolicy, GeoCoordinate, ImgTile, MolaError, PdsLabel,
    RegionTable,
};
use test_utils::{temp_test_dir, write_test_tile};

// ============================================================================
// Partition tests
// ============================================================================

/// Sample the sphere on a quarter-degree lattice, including every band and
/// quadrant edge.
fn lattice() -> impl Iterator<Item = GeoCoordinate> {
    (0..=720).flat_map(|i| {
        let lat = 90.0 - i as f64 * 0.25;
        (0..1440).map(move |j| GeoCoordinate::new(lat, j as f64 * 0.25))
    })
}

#[test]
fn test_tiling_covers_sphere_exactly_once() {
    let table = build_regions();
    for geo in lattice() {
        let hits = table
            .iter()
            .filter(|r| r.contains(&geo, EdgePolicy::Tiling))
            .count();
        assert_eq!(hits, 1, "point {:?} matched {} regions", geo, hits);
    }
}

#[test]
fn test_reference_overlaps_only_on_shared_edges() {
    let table = build_regions();
    for geo in lattice() {
        let hits: Vec<usize> = table
            .iter()
            .filter(|r| r.contains(&geo, EdgePolicy::Reference))
            .map(|r| r.index)
            .collect();

        let on_lat_edge = LAT_BAND_EDGES[1..4].contains(&(geo.lat as i32))
            && geo.lat.fract() == 0.0;
        let on_lon_edge = geo.lon % 90.0 == 0.0 && geo.lon != 0.0;

        if geo.lat.abs() > 88.0 {
            assert!(hits.is_empty(), "polar point {:?} classified", geo);
        } else if !on_lat_edge && !on_lon_edge {
            assert_eq!(hits.len(), 1, "interior point {:?} -> {:?}", geo, hits);
        } else {
            assert!(!hits.is_empty(), "edge point {:?} unclassified", geo);
        }

        // table order breaks ties
        if let Some(first) = hits.first() {
            assert_eq!(table.find_index(&geo, EdgePolicy::Reference), Some(*first));
        }
    }
}

#[test]
fn test_regions_are_in_band_then_quadrant_order() {
    let table = RegionTable::megdr_128();
    assert_eq!(table.len(), REGION_COUNT);
    for (i, region) in table.iter().enumerate() {
        let band = i / 4;
        let quadrant = i % 4;
        assert_eq!(region.lat_max, LAT_BAND_EDGES[band]);
        assert_eq!(region.lat_min, LAT_BAND_EDGES[band + 1]);
        assert_eq!(region.lon_min, quadrant as i32 * 90);
        assert_eq!(region.lon_max, region.lon_min + 90);
    }
}

#[test]
fn test_every_region_has_distinct_file_names() {
    let table = build_regions();
    let mut names: Vec<String> = table.iter().map(|r| file_codes(r).topography).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 16);
    assert!(names.contains(&"MEGT44n090HB.IMG".to_string()));
    assert!(names.contains(&"MEGT44s000HB.IMG".to_string()));
}

// ============================================================================
// Tile reading tests
// ============================================================================

#[test]
fn test_read_big_endian_tile() {
    let dir = temp_test_dir();
    let (label_path, img_path) = write_test_tile(dir.path(), "MEGT88n000HB", 4, 6, true);
    let label = PdsLabel::from_file(&label_path).unwrap();
    let tile = ImgTile::read(&img_path, &label, 1).unwrap();

    assert_eq!((tile.rows, tile.cols), (4, 6));
    assert_eq!(tile.get(0, 0), Some(0));
    assert_eq!(tile.get(0, 5), Some(-5));
    assert_eq!(tile.get(3, 0), Some(300));
    assert_eq!(tile.get(4, 0), None);
    assert_eq!(tile.elevation_range(), Some((-5, 300)));
}

#[test]
fn test_read_little_endian_tile_with_step() {
    let dir = temp_test_dir();
    let (label_path, img_path) = write_test_tile(dir.path(), "MEGT44s270HB", 5, 7, false);
    let label = PdsLabel::from_file(&label_path).unwrap();
    let tile = ImgTile::read(&img_path, &label, 2).unwrap();

    assert_eq!((tile.rows, tile.cols), (3, 4));
    assert_eq!(tile.get(1, 1), Some(200 - 2));
    assert_eq!(tile.get(2, 3), Some(400 - 6));
    assert_eq!(tile.samples().len(), 12);
}

#[test]
fn test_truncated_tile_is_rejected() {
    let dir = temp_test_dir();
    let (label_path, img_path) = write_test_tile(dir.path(), "MEGT88n090HB", 4, 6, true);
    std::fs::write(&img_path, [0u8; 10]).unwrap();
    let label = PdsLabel::from_file(&label_path).unwrap();
    let err = ImgTile::read(&img_path, &label, 1).unwrap_err();
    assert!(matches!(err, MolaError::Label(ref msg) if msg.contains("requires 48")));
}

#[test]
fn test_zero_step_is_invalid() {
    let dir = temp_test_dir();
    let (label_path, img_path) = write_test_tile(dir.path(), "MEGT88n180HB", 2, 2, true);
    let label = PdsLabel::from_file(&label_path).unwrap();
    assert!(matches!(
        ImgTile::read(&img_path, &label, 0),
        Err(MolaError::InvalidConfig(_))
    ));
}

#[test]
fn test_missing_label_file() {
    let dir = temp_test_dir();
    let err = PdsLabel::from_file(&dir.path().join("nope.LBL")).unwrap_err();
    assert!(matches!(err, MolaError::Label(_)));
}
