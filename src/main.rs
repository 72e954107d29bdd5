use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use hcmos_readout::image_pipeline::{
    Columns, ConversionConfig, ReadoutPipeline, RowWindow, Sensor, SensorModel, TiffCompression,
};
use hcmos_readout::logger;

use tracing::info;

#[derive(Parser)]
#[command(name = "hcmos_readout")]
#[command(about = "Reconstruct hCMOS sensor readouts into multi-page TIFF images")]
#[command(version)]
struct Cli {
    /// Sensor model that produced the readout (hyperion or s4).
    #[arg(long, default_value = "s4")]
    model: SensorModel,

    /// Hex readout stream captured from the board.
    #[arg(long, default_value = "frames.txt")]
    input: PathBuf,

    /// Path of the TIFF file to write.
    #[arg(long, default_value = "frames.tiff")]
    output: PathBuf,

    /// TIFF compression.
    #[arg(long, value_enum, default_value_t = CompressionArg::DeflateBalanced)]
    compression: CompressionArg,

    /// Split partitioned readouts into one image per frame or per hemisphere.
    #[arg(long, value_enum, default_value_t = ColumnsArg::Single)]
    columns: ColumnsArg,

    /// First sensor row programmed into the readout window.
    #[arg(long, requires = "last_row")]
    first_row: Option<usize>,

    /// Last sensor row programmed into the readout window (inclusive).
    #[arg(long, requires = "first_row")]
    last_row: Option<usize>,

    /// Keep windowed frames at their read-off height instead of zero-padding them.
    #[arg(long)]
    no_pad: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

impl CompressionArg {
    fn to_core(self) -> TiffCompression {
        match self {
            Self::None => TiffCompression::None,
            Self::Lzw => TiffCompression::Lzw,
            Self::DeflateFast => TiffCompression::DeflateFast,
            Self::DeflateBalanced => TiffCompression::DeflateBalanced,
            Self::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColumnsArg {
    Single,
    Hemispheres,
}

impl ColumnsArg {
    fn to_core(self) -> Columns {
        match self {
            Self::Single => Columns::Single,
            Self::Hemispheres => Columns::Hemispheres,
        }
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();
    run(Cli::parse())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    info!("Starting readout conversion...");

    let sensor = Sensor::new(cli.model)?;
    let rows = match (cli.first_row, cli.last_row) {
        (Some(first), Some(last)) => Some(RowWindow::new(first, last, sensor.geometry().height)?),
        _ => None,
    };
    let config = ConversionConfig::builder()
        .compression(cli.compression.to_core())
        .columns(cli.columns.to_core())
        .rows(rows)
        .pad_to_full(!cli.no_pad)
        .build();
    let pipeline = ReadoutPipeline::new(sensor, config);

    let geometry = pipeline.sensor().geometry();
    info!("Sensor: {}", pipeline.sensor().model());
    info!(
        "Geometry: {}x{}, {} frames, payload {} bytes",
        geometry.width,
        geometry.height,
        geometry.nframes,
        geometry.payload_size()
    );
    info!("Compression: {:?}", pipeline.config().compression);

    pipeline
        .convert_file(&cli.input, &cli.output)
        .with_context(|| {
            format!("converting {} to {}", cli.input.display(), cli.output.display())
        })?;

    info!("Conversion successful!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["hcmos_readout"]).unwrap();
        assert_eq!(cli.model, SensorModel::S4);
        assert_eq!(cli.input, PathBuf::from("frames.txt"));
        assert_eq!(cli.output, PathBuf::from("frames.tiff"));
        assert!(matches!(cli.compression, CompressionArg::DeflateBalanced));
        assert!(cli.first_row.is_none());
        assert!(!cli.no_pad);
    }

    #[test]
    fn test_full_argument_set() {
        let cli = Cli::try_parse_from([
            "hcmos_readout",
            "--model",
            "hyperion",
            "--columns",
            "hemispheres",
            "--compression",
            "lzw",
            "--first-row",
            "10",
            "--last-row",
            "19",
            "--no-pad",
        ])
        .unwrap();
        assert_eq!(cli.model, SensorModel::Hyperion);
        assert_eq!(cli.columns.to_core(), Columns::Hemispheres);
        assert_eq!(cli.compression.to_core(), TiffCompression::Lzw);
        assert_eq!((cli.first_row, cli.last_row), (Some(10), Some(19)));
        assert!(cli.no_pad);
    }

    #[test]
    fn test_bad_arguments_rejected() {
        assert!(Cli::try_parse_from(["hcmos_readout", "--model", "icarus9"]).is_err());
        assert!(Cli::try_parse_from(["hcmos_readout", "--first-row", "3"]).is_err());
    }

    #[test]
    fn test_failed_conversion_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "hcmos_readout".into(),
            "--input".into(),
            dir.path().join("missing.txt").into_os_string(),
            "--output".into(),
            dir.path().join("out.tiff").into_os_string(),
        ])
        .unwrap();

        assert!(run(cli).is_err());
        assert!(!dir.path().join("out.tiff").exists());
    }

    #[test]
    fn test_row_window_checked_against_sensor() {
        let cli = Cli::try_parse_from([
            "hcmos_readout",
            "--first-row",
            "0",
            "--last-row",
            "1024",
        ])
        .unwrap();
        assert!(run(cli).is_err());
    }
}
