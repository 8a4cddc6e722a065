//! Stage output persistence
//!
//! Stages with `save` set hand their output to an [`OutputSaver`], keyed by
//! the input file and a stage prefix such as `Out_white_balance_`.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raw::types::RawImageData;
use crate::image_pipeline::rgb_conversion::types::RgbImageData;

/// A stage output handed to a saver.
#[derive(Debug, Clone, Copy)]
pub enum OutputArray<'a> {
    /// Single-channel mosaic, samples up to 16 bits
    Bayer(&'a RawImageData),
    /// Interleaved 8-bit RGB
    Rgb(&'a RgbImageData),
}

impl OutputArray<'_> {
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            OutputArray::Bayer(image) => (image.width, image.height),
            OutputArray::Rgb(image) => (image.width, image.height),
        }
    }
}

pub trait OutputSaver {
    fn save_output_array(&self, in_file: &str, prefix: &str, array: OutputArray<'_>) -> Result<()>;
}

/// Saver for callers that never persist stage output.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSaver;

impl OutputSaver for NoopSaver {
    fn save_output_array(&self, in_file: &str, prefix: &str, _array: OutputArray<'_>) -> Result<()> {
        debug!("Discarding {}{} output", prefix, in_file);
        Ok(())
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Writes stage outputs as `<output_dir>/<prefix><input stem>.tiff`.
#[derive(Debug, Clone)]
pub struct TiffOutputSaver {
    output_dir: PathBuf,
    compression: TiffCompression,
}

impl TiffOutputSaver {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            compression: TiffCompression::default(),
        }
    }

    pub fn with_compression(mut self, compression: TiffCompression) -> Self {
        self.compression = compression;
        self
    }

    pub fn output_path(&self, in_file: &str, prefix: &str) -> PathBuf {
        let stem = Path::new(in_file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| in_file.to_string());
        self.output_dir.join(format!("{prefix}{stem}.tiff"))
    }

    /// Encodes `array` as a TIFF image into `output`.
    pub fn write_tiff(&self, array: OutputArray<'_>, output: &mut dyn Write) -> Result<()> {
        let (width, height) = array.dimensions();
        debug!("Encoding TIFF image: {}x{}", width, height);

        let mut buffer = Vec::new();

        let compression = match self.compression {
            TiffCompression::None => tiff::encoder::Compression::Uncompressed,
            TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
            TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Fast),
            TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Balanced),
            TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(tiff::encoder::compression::DeflateLevel::Best),
        };

        {
            let mut encoder = tiff::encoder::TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| PipelineError::EncodeError(e.to_string()))?
                .with_compression(compression);

            let written = match array {
                OutputArray::Bayer(image) => encoder.write_image::<tiff::encoder::colortype::Gray16>(
                    image.width as u32,
                    image.height as u32,
                    &image.data,
                ),
                OutputArray::Rgb(image) => encoder.write_image::<tiff::encoder::colortype::RGB8>(
                    image.width as u32,
                    image.height as u32,
                    &image.data,
                ),
            };
            written.map_err(|e| PipelineError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete");
        Ok(())
    }
}

impl OutputSaver for TiffOutputSaver {
    fn save_output_array(&self, in_file: &str, prefix: &str, array: OutputArray<'_>) -> Result<()> {
        let path = self.output_path(in_file, prefix);
        let mut file = File::create(&path)
            .map_err(|e| PipelineError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        self.write_tiff(array, &mut file)?;
        info!(path = %path.display(), "Saved stage output");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let saver = TiffOutputSaver::new("/tmp/out");
        assert_eq!(
            saver.output_path("data/frame_0001.raw", "Out_white_balance_"),
            PathBuf::from("/tmp/out/Out_white_balance_frame_0001.tiff")
        );
    }

    #[test]
    fn test_write_tiff_bayer_and_rgb() {
        let raw = RawImageData::new(4, 2, (0..8).map(|v| v * 1000).collect(), 16);
        let rgb = RgbImageData::new(2, 2, vec![10; 12]).unwrap();

        for compression in [TiffCompression::None, TiffCompression::Lzw, TiffCompression::DeflateFast] {
            let saver = TiffOutputSaver::new(".").with_compression(compression);
            for array in [OutputArray::Bayer(&raw), OutputArray::Rgb(&rgb)] {
                let mut out = Vec::new();
                saver.write_tiff(array, &mut out).unwrap();
                assert!(out.starts_with(b"II*\0") || out.starts_with(b"MM\0*"));
            }
        }
    }

    #[test]
    fn test_save_output_array_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let saver = TiffOutputSaver::new(dir.path());
        let raw = RawImageData::new(2, 2, vec![1, 2, 3, 4], 12);

        saver.save_output_array("input.arw", "Out_white_balance_", OutputArray::Bayer(&raw)).unwrap();

        let path = dir.path().join("Out_white_balance_input.tiff");
        assert!(path.exists());
        assert!(std::fs::metadata(path).unwrap().len() > 0);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let saver = TiffOutputSaver::new(dir.path().join("missing"));
        let raw = RawImageData::new(2, 2, vec![1, 2, 3, 4], 12);

        let err = saver.save_output_array("input.arw", "Out_", OutputArray::Bayer(&raw)).unwrap_err();
        assert!(matches!(err, PipelineError::OutputWriteError(_)));
    }
}
