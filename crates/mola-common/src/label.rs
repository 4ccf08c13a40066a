//! PDS label parsing and raw MEGDR tile reading.
//!
//! MEGDR tiles are distributed as a headerless `.IMG` raster with a
//! companion `.LBL` file of `KEY = VALUE` lines describing its layout.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{MolaError, MolaResult};

pub const KEY_LINES: &str = "LINES";
pub const KEY_LINE_SAMPLES: &str = "LINE_SAMPLES";
pub const KEY_SAMPLE_BITS: &str = "SAMPLE_BITS";
pub const KEY_SAMPLE_TYPE: &str = "SAMPLE_TYPE";

/// Byte order of the tile samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleType {
    MsbInteger,
    LsbInteger,
    Unsupported(String),
}

impl SampleType {
    pub fn from_label(value: &str) -> Self {
        match value {
            "MSB_INTEGER" | "MAC_INTEGER" | "SUN_INTEGER" => SampleType::MsbInteger,
            "LSB_INTEGER" | "PC_INTEGER" | "VAX_INTEGER" => SampleType::LsbInteger,
            other => SampleType::Unsupported(other.to_string()),
        }
    }

    pub fn is_big_endian(&self) -> bool {
        matches!(self, SampleType::MsbInteger)
    }
}

/// Key/value parameters of a PDS label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdsLabel {
    params: BTreeMap<String, String>,
}

impl PdsLabel {
    /// Parse label text. Lines without `=` are ignored; repeated keys keep
    /// the last value.
    pub fn parse(text: &str) -> Self {
        let params = text
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| {
                (
                    key.trim().to_string(),
                    value.trim().trim_matches('"').to_string(),
                )
            })
            .collect();
        Self { params }
    }

    /// Load and parse a label file.
    pub fn from_file(path: &Path) -> MolaResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            MolaError::Label(format!("cannot read label {}: {}", path.display(), e))
        })?;
        Ok(Self::parse(&text))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn required(&self, key: &str) -> MolaResult<&str> {
        self.get(key)
            .ok_or_else(|| MolaError::Label(format!("missing {key}")))
    }

    fn required_u32(&self, key: &str) -> MolaResult<u32> {
        let raw = self.required(key)?;
        raw.parse()
            .map_err(|_| MolaError::Label(format!("{key} is not a number: '{raw}'")))
    }

    /// Number of rows.
    pub fn lines(&self) -> MolaResult<u32> {
        self.required_u32(KEY_LINES)
    }

    /// Number of columns.
    pub fn line_samples(&self) -> MolaResult<u32> {
        self.required_u32(KEY_LINE_SAMPLES)
    }

    pub fn sample_bits(&self) -> MolaResult<u32> {
        self.required_u32(KEY_SAMPLE_BITS)
    }

    pub fn sample_type(&self) -> MolaResult<SampleType> {
        self.required(KEY_SAMPLE_TYPE).map(SampleType::from_label)
    }

    /// Byte size the `.IMG` file must have at least.
    pub fn expected_data_len(&self) -> MolaResult<u64> {
        let bytes_per_sample = u64::from(self.sample_bits()? / 8);
        Ok(u64::from(self.lines()?) * u64::from(self.line_samples()?) * bytes_per_sample)
    }
}

/// A decimated 16-bit tile loaded from an `.IMG` file.
#[derive(Debug, Clone)]
pub struct ImgTile {
    pub rows: usize,
    pub cols: usize,
    pub step: usize,
    samples: Vec<i16>,
}

impl ImgTile {
    /// Read every `step`-th row and column of the tile described by `label`.
    pub fn read(path: &Path, label: &PdsLabel, step: usize) -> MolaResult<Self> {
        if step == 0 {
            return Err(MolaError::InvalidConfig("tile step must be positive".into()));
        }
        let bits = label.sample_bits()?;
        if bits != 16 {
            return Err(MolaError::Label(format!(
                "only 16-bit samples are supported, label says {bits}"
            )));
        }
        let sample_type = label.sample_type()?;
        if let SampleType::Unsupported(name) = &sample_type {
            return Err(MolaError::Label(format!("unsupported sample type {name}")));
        }

        let width = label.line_samples()? as usize;
        let height = label.lines()? as usize;
        let file = File::open(path)
            .map_err(|e| MolaError::Label(format!("cannot open {}: {}", path.display(), e)))?;
        let actual_len = file.metadata()?.len();
        let expected_len = label.expected_data_len()?;
        if actual_len < expected_len {
            return Err(MolaError::Label(format!(
                "{} holds {} bytes, label requires {}",
                path.display(),
                actual_len,
                expected_len
            )));
        }

        let mut reader = BufReader::new(file);
        let mut row_bytes = vec![0u8; width * 2];
        let mut samples = Vec::with_capacity(width.div_ceil(step) * height.div_ceil(step));
        for y in (0..height).step_by(step) {
            reader.seek(SeekFrom::Start((y * width * 2) as u64))?;
            reader.read_exact(&mut row_bytes)?;
            for x in (0..width).step_by(step) {
                let pair = [row_bytes[2 * x], row_bytes[2 * x + 1]];
                samples.push(if sample_type.is_big_endian() {
                    i16::from_be_bytes(pair)
                } else {
                    i16::from_le_bytes(pair)
                });
            }
        }

        Ok(Self {
            rows: height.div_ceil(step),
            cols: width.div_ceil(step),
            step,
            samples,
        })
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i16> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.samples.get(row * self.cols + col).copied()
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Lowest and highest sample value, in meters for topography tiles.
    pub fn elevation_range(&self) -> Option<(i16, i16)> {
        let min = self.samples.iter().copied().min()?;
        let max = self.samples.iter().copied().max()?;
        Some((min, max))
    }
}
