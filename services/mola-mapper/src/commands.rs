//! Subcommand implementations.
//!
//! Each command writes its stdout output to `out` only after every
//! fallible step has succeeded, so an error never leaves a partial report.

use std::io::Write;
use std::path::Path;

use mola_common::coords::{normalize_lon, LAT_MAX, LAT_MIN};
use mola_common::product::label_codes;
use mola_common::{
    file_codes, GeoCoordinate, GridConfig, ImgTile, MolaError, MolaResult, PdsLabel, RegionTable,
};
use region_mapper::{FileMappingReport, RegionMap, ReportFormat};
use renderer::{
    compose_side_by_side, default_font, draw_labels, label_placements, load_font, load_raster,
    save_png, LabelStyle, OverlayRenderer, OverlayStyle,
};
use tracing::{debug, info};

use crate::cli::{InspectLabelArgs, LocateArgs, OverlayArgs, ReportArgs};

/// What an overlay run produced.
#[derive(Debug)]
pub struct OverlaySummary {
    pub width: u32,
    pub height: u32,
    pub labels_drawn: usize,
    pub map: RegionMap,
}

/// Load the image, paint the regions, write the panel PNG, then print the
/// file mapping with per-region pixel counts.
pub fn run_overlay<W: Write>(args: &OverlayArgs, out: &mut W) -> MolaResult<OverlaySummary> {
    let config = args.grid.to_config()?;
    if !(0.0..=1.0).contains(&args.alpha) {
        return Err(MolaError::InvalidConfig(format!(
            "overlay alpha must be in [0, 1], got {}",
            args.alpha
        )));
    }
    let font = match args.font.as_deref() {
        Some(path) => load_font(path)?,
        None => default_font()?,
    };

    let base = load_raster(&args.image)?;
    info!(
        path = %args.image.display(),
        width = base.width(),
        height = base.height(),
        "Loaded image"
    );

    let renderer = OverlayRenderer::new(config, OverlayStyle { alpha: args.alpha });
    let (mut overlaid, map) = renderer.render(&base);
    if map.unclassified() > 0 {
        debug!(
            pixels = map.unclassified(),
            policy = %config.edge_policy(),
            "Pixels outside every region"
        );
    }

    let classifier = renderer.classifier_for(&base);
    let placements = label_placements(classifier.projection(), classifier.table());
    draw_labels(
        &mut overlaid,
        &placements,
        Some(&font),
        &LabelStyle::for_image_height(base.height()),
    );

    let panel = compose_side_by_side(&base, &overlaid);
    save_png(&panel, &args.output)?;
    info!(
        path = %args.output.display(),
        width = panel.width(),
        height = panel.height(),
        "Wrote overlay"
    );

    FileMappingReport::with_coverage(&config, classifier.table(), &map)
        .write_to(out, ReportFormat::Text)?;

    Ok(OverlaySummary {
        width: base.width(),
        height: base.height(),
        labels_drawn: placements.len(),
        map,
    })
}

/// Print the file mapping for the configured grid.
pub fn run_report<W: Write>(args: &ReportArgs, out: &mut W) -> MolaResult<()> {
    let config = args.grid.to_config()?;
    FileMappingReport::new(&config, RegionTable::megdr_128()).write_to(out, args.format)
}

/// Print the region covering a point and the files holding it.
pub fn run_locate<W: Write>(args: &LocateArgs, out: &mut W) -> MolaResult<()> {
    let config = args.grid.to_config()?;
    let geo = locate_point(args.lat, args.lon)?;
    let text = describe_point(&geo, &config);
    out.write_all(text.as_bytes())?;
    Ok(())
}

fn locate_point(lat: f64, lon: f64) -> MolaResult<GeoCoordinate> {
    if !lat.is_finite() || !(LAT_MIN..=LAT_MAX).contains(&lat) {
        return Err(MolaError::InvalidConfig(format!(
            "latitude must be in [-90, 90], got {lat}"
        )));
    }
    if !lon.is_finite() {
        return Err(MolaError::InvalidConfig(format!(
            "longitude must be finite, got {lon}"
        )));
    }
    Ok(GeoCoordinate::new(lat, normalize_lon(lon)))
}

fn describe_point(geo: &GeoCoordinate, config: &GridConfig) -> String {
    let mut text = format!("Point: {:.4}° lat, {:.4}° lon\n", geo.lat, geo.lon);
    match RegionTable::megdr_128().find(geo, config.edge_policy()) {
        Some(region) => {
            text.push_str(&format!("Region {:2}: {}\n", region.index + 1, region.label));
            text.push_str(&format!("  Color: {}\n", region.color));
            for (product, name) in file_codes(region).entries() {
                text.push_str(&format!("  {} - {}\n", name, product.description()));
            }
        }
        None => text.push_str(&format!(
            "No region covers this point with the {} edge policy\n",
            config.edge_policy()
        )),
    }
    text
}

/// Print the tile geometry from a PDS label and, when the tile is given,
/// its sampled elevation range.
pub fn run_inspect_label<W: Write>(args: &InspectLabelArgs, out: &mut W) -> MolaResult<()> {
    let label = PdsLabel::from_file(&args.label)?;
    let mut text = String::new();

    text.push_str(&format!("Label: {}\n", args.label.display()));
    if let Some(region) = region_for_file(&args.label) {
        text.push_str(&format!("  Region {:2}: {}\n", region.0, region.1));
    }
    text.push_str(&format!("  Lines: {}\n", label.lines()?));
    text.push_str(&format!("  Line samples: {}\n", label.line_samples()?));
    text.push_str(&format!("  Sample bits: {}\n", label.sample_bits()?));
    text.push_str(&format!(
        "  Sample type: {}\n",
        label.get(mola_common::label::KEY_SAMPLE_TYPE).unwrap_or("unknown")
    ));

    if let Some(img) = &args.img {
        let tile = ImgTile::read(img, &label, args.step)?;
        debug!(rows = tile.rows, cols = tile.cols, step = tile.step, "Sampled tile");
        text.push_str(&format!("Tile: {}\n", img.display()));
        text.push_str(&format!(
            "  Sampled: {}×{} (every {} samples)\n",
            tile.cols, tile.rows, tile.step
        ));
        match tile.elevation_range() {
            Some((min, max)) => text.push_str(&format!("  Elevation: {min} m to {max} m\n")),
            None => text.push_str("  Elevation: no samples\n"),
        }
    }

    out.write_all(text.as_bytes())?;
    Ok(())
}

/// Region number and label whose MEGDR file or label name matches `path`.
fn region_for_file(path: &Path) -> Option<(usize, String)> {
    let name = path.file_name()?.to_str()?;
    RegionTable::megdr_128()
        .iter()
        .find(|region| {
            let files = file_codes(region);
            let labels = label_codes(region);
            let matches = files
                .entries()
                .into_iter()
                .chain(labels.entries())
                .any(|(_, file)| file.eq_ignore_ascii_case(name));
            matches
        })
        .map(|region| (region.index + 1, region.label.clone()))
}
