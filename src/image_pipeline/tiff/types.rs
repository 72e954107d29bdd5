//! Readout conversion configuration types

use crate::image_pipeline::deinterlace::Columns;
use crate::image_pipeline::raw::RowWindow;

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

/// Configuration for readout to TIFF conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Whether to reject empty images before encoding
    pub validate_dimensions: bool,
    /// Full-width images or separate hemisphere images
    pub columns: Columns,
    /// Restore rows outside the row window as zeros
    pub pad_to_full: bool,
    /// Rows read off the board; `None` means the full sensor height
    pub rows: Option<RowWindow>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
            validate_dimensions: true,
            columns: Columns::Single,
            pad_to_full: true,
            rows: None,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    columns: Option<Columns>,
    pad_to_full: Option<bool>,
    rows: Option<Option<RowWindow>>,
}

impl ConversionConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn columns(mut self, columns: Columns) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn pad_to_full(mut self, pad: bool) -> Self {
        self.pad_to_full = Some(pad);
        self
    }

    pub fn rows(mut self, rows: Option<RowWindow>) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            columns: self.columns.unwrap_or(default.columns),
            pad_to_full: self.pad_to_full.unwrap_or(default.pad_to_full),
            rows: self.rows.unwrap_or(default.rows),
        }
    }
}
