//! Region to file name listing.
//!
//! The text layout is meant for people: a header with the grid parameters,
//! then one block per region in table order. The JSON layout carries the
//! same content for scripts.

use std::io::Write;
use std::str::FromStr;

use mola_common::product::label_codes;
use mola_common::{
    file_codes, ColorTag, EdgePolicy, FileCodes, GridConfig, MolaError, MolaResult, Region,
    RegionTable,
};
use serde::Serialize;

use crate::region_map::RegionMap;

pub const REPORT_TITLE: &str = "MEGDR 128 Pixels per Degree - File Mapping";

const RULE_WIDTH: usize = 60;

/// Output layout of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = MolaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(MolaError::InvalidConfig(format!(
                "unknown report format '{other}'"
            ))),
        }
    }
}

/// Everything the report says about one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionEntry {
    /// 1-based position in the table
    pub number: usize,
    pub label: String,
    pub lat_min: i32,
    pub lat_max: i32,
    pub lon_min: i32,
    pub lon_max: i32,
    pub color: ColorTag,
    pub files: FileCodes,
    pub labels: FileCodes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_count: Option<usize>,
}

impl RegionEntry {
    pub fn from_region(region: &Region, pixel_count: Option<usize>) -> Self {
        Self {
            number: region.index + 1,
            label: region.label.clone(),
            lat_min: region.lat_min,
            lat_max: region.lat_max,
            lon_min: region.lon_min,
            lon_max: region.lon_max,
            color: region.color,
            files: file_codes(region),
            labels: label_codes(region),
            pixel_count,
        }
    }

    /// Append the text block for this entry, blank separator line included.
    fn write_text(&self, out: &mut String) {
        out.push_str(&format!("Region {:2}: {}\n", self.number, self.label));
        out.push_str(&format!(
            "  Coordinates: {}°-{}° lat, {}°-{}° lon\n",
            self.lat_min, self.lat_max, self.lon_min, self.lon_max
        ));
        out.push_str("  Files:\n");
        for (product, name) in self.files.entries() {
            out.push_str(&format!("    {} - {}\n", name, product.description()));
        }
        if let Some(count) = self.pixel_count {
            out.push_str(&format!("  Pixels: {count}\n"));
        }
        out.push('\n');
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'static str,
    grid_width: u32,
    grid_height: u32,
    x_offset_ratio: f64,
    edge_policy: EdgePolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    unclassified_pixels: Option<usize>,
    regions: &'a [RegionEntry],
}

/// The file mapping report for one configuration, optionally annotated
/// with per-region pixel counts from a classified image.
#[derive(Debug, Clone)]
pub struct FileMappingReport {
    config: GridConfig,
    entries: Vec<RegionEntry>,
    unclassified: Option<usize>,
}

impl FileMappingReport {
    pub fn new(config: &GridConfig, table: &RegionTable) -> Self {
        Self {
            config: *config,
            entries: table
                .iter()
                .map(|r| RegionEntry::from_region(r, None))
                .collect(),
            unclassified: None,
        }
    }

    /// Report including the pixel coverage of `map`.
    pub fn with_coverage(config: &GridConfig, table: &RegionTable, map: &RegionMap) -> Self {
        Self {
            config: *config,
            entries: table
                .iter()
                .map(|r| RegionEntry::from_region(r, Some(map.pixel_count(r.index))))
                .collect(),
            unclassified: Some(map.unclassified()),
        }
    }

    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }

    pub fn header(&self) -> String {
        format!(
            "{}\n{}\nGrid parameters: {}×{}, offset: {:.1}%\n",
            REPORT_TITLE,
            "=".repeat(RULE_WIDTH),
            self.config.grid_width(),
            self.config.grid_height(),
            self.config.offset_percent()
        )
    }

    pub fn to_text(&self) -> String {
        let mut out = self.header();
        out.push('\n');
        for entry in &self.entries {
            entry.write_text(&mut out);
        }
        out
    }

    pub fn to_json(&self) -> MolaResult<String> {
        let report = JsonReport {
            title: REPORT_TITLE,
            grid_width: self.config.grid_width(),
            grid_height: self.config.grid_height(),
            x_offset_ratio: self.config.x_offset_ratio(),
            edge_policy: self.config.edge_policy(),
            unclassified_pixels: self.unclassified,
            regions: &self.entries,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    pub fn render(&self, format: ReportFormat) -> MolaResult<String> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Json => self.to_json(),
        }
    }

    /// Render and write in one piece so a failure leaves no partial report.
    pub fn write_to<W: Write>(&self, out: &mut W, format: ReportFormat) -> MolaResult<()> {
        let rendered = self.render(format)?;
        out.write_all(rendered.as_bytes())?;
        if format == ReportFormat::Json {
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_report() -> FileMappingReport {
        FileMappingReport::new(&GridConfig::default(), RegionTable::megdr_128())
    }

    #[test]
    fn test_header() {
        let header = default_report().header();
        let lines: Vec<&str> = header.lines().collect();
        assert_eq!(lines[0], REPORT_TITLE);
        assert_eq!(lines[1].len(), 60);
        assert_eq!(lines[2], "Grid parameters: 36×14, offset: 25.0%");
    }

    #[test]
    fn test_first_block() {
        let text = default_report().to_text();
        let expected = "Region  1: 88°N-44°N 0°E-90°E\n\
                        \x20 Coordinates: 44°-88° lat, 0°-90° lon\n\
                        \x20 Files:\n\
                        \x20   MEGT88n000HB.IMG - Topography\n\
                        \x20   MEGR88n000HB.IMG - Radius\n\
                        \x20   MEGC88n000HB.IMG - Counts\n\
                        \x20   MEGA88n000HB.IMG - Areoid\n\n";
        assert!(text.contains(expected), "missing block in:\n{text}");
    }

    #[test]
    fn test_regions_in_table_order() {
        let text = default_report().to_text();
        let positions: Vec<usize> = (1..=16)
            .map(|n| text.find(&format!("Region {n:2}:")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.ends_with("MEGA44s270HB.IMG - Areoid\n\n"));
    }

    #[test]
    fn test_json_report() {
        let json = default_report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["grid_width"], 36);
        assert_eq!(value["edge_policy"], "tiling");
        let regions = value["regions"].as_array().unwrap();
        assert_eq!(regions.len(), 16);
        assert_eq!(regions[15]["files"]["topography"], "MEGT44s270HB.IMG");
        assert_eq!(regions[15]["labels"]["topography"], "MEGT44s270HB.LBL");
        assert_eq!(regions[1]["color"], "blue");
        assert!(regions[0].get("pixel_count").is_none());
        assert!(value.get("unclassified_pixels").is_none());
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert!("yaml".parse::<ReportFormat>().is_err());
    }
}
