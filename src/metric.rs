//! PSNR image similarity metric.
//!
//! Peak signal-to-noise ratio between a captured frame and a reference
//! image; higher values indicate closer similarity. Identical images yield
//! positive infinity.

use std::path::Path;

/// Result type for metric operations
pub type MetricResult<T> = Result<T, MetricError>;

/// Error types for metric evaluation
#[derive(Debug)]
pub enum MetricError {
    /// Image could not be read or decoded
    Image(image::ImageError),

    /// Candidate and reference have different dimensions
    DimensionMismatch {
        candidate: (u32, u32),
        reference: (u32, u32),
    },
}

impl std::fmt::Display for MetricError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricError::Image(err) => write!(f, "image error: {}", err),
            MetricError::DimensionMismatch {
                candidate,
                reference,
            } => write!(
                f,
                "dimension mismatch: candidate {}x{}, reference {}x{}",
                candidate.0, candidate.1, reference.0, reference.1
            ),
        }
    }
}

impl std::error::Error for MetricError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MetricError::Image(err) => Some(err),
            MetricError::DimensionMismatch { .. } => None,
        }
    }
}

impl From<image::ImageError> for MetricError {
    fn from(err: image::ImageError) -> Self {
        MetricError::Image(err)
    }
}

/// Compute the PSNR between a candidate frame and a reference image.
///
/// Both images are decoded to 8-bit RGB; the mean squared error runs over
/// all channels. MSE of zero (identical images) maps to `f64::INFINITY`.
pub fn psnr(candidate: &Path, reference: &Path) -> MetricResult<f64> {
    let cand = image::open(candidate)?.to_rgb8();
    let refi = image::open(reference)?.to_rgb8();

    if cand.dimensions() != refi.dimensions() {
        return Err(MetricError::DimensionMismatch {
            candidate: cand.dimensions(),
            reference: refi.dimensions(),
        });
    }

    let sum: f64 = cand
        .as_raw()
        .iter()
        .zip(refi.as_raw().iter())
        .map(|(a, b)| {
            let d = f64::from(*a) - f64::from(*b);
            d * d
        })
        .sum();
    let mse = sum / cand.as_raw().len() as f64;

    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }

    Ok(10.0 * ((255.0 * 255.0) / mse).log10())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::path::PathBuf;

    fn write_solid(dir: &Path, name: &str, w: u32, h: u32, color: [u8; 3]) -> PathBuf {
        let img = RgbImage::from_pixel(w, h, Rgb(color));
        let path = dir.join(name);
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_identical_images_are_infinite() {
        let tmp = tempfile::tempdir().unwrap();
        let a = write_solid(tmp.path(), "a.png", 32, 32, [10, 20, 30]);
        let b = write_solid(tmp.path(), "b.png", 32, 32, [10, 20, 30]);

        assert_eq!(psnr(&a, &b).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_known_difference() {
        let tmp = tempfile::tempdir().unwrap();
        let a = write_solid(tmp.path(), "a.png", 16, 16, [100, 100, 100]);
        let b = write_solid(tmp.path(), "b.png", 16, 16, [101, 101, 101]);

        // MSE = 1 per channel, PSNR = 10 * log10(255^2) ~= 48.13 dB
        let score = psnr(&a, &b).unwrap();
        assert!((score - 48.13).abs() < 0.01, "got {}", score);
    }

    #[test]
    fn test_opposite_images_are_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let a = write_solid(tmp.path(), "a.png", 8, 8, [0, 0, 0]);
        let b = write_solid(tmp.path(), "b.png", 8, 8, [255, 255, 255]);

        let score = psnr(&a, &b).unwrap();
        assert!(score.abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn test_dimension_mismatch() {
        let tmp = tempfile::tempdir().unwrap();
        let a = write_solid(tmp.path(), "a.png", 8, 8, [0, 0, 0]);
        let b = write_solid(tmp.path(), "b.png", 16, 8, [0, 0, 0]);

        let err = psnr(&a, &b).unwrap_err();
        assert!(matches!(err, MetricError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let a = write_solid(tmp.path(), "a.png", 8, 8, [0, 0, 0]);
        let missing = tmp.path().join("missing.png");

        let err = psnr(&a, &missing).unwrap_err();
        assert!(matches!(err, MetricError::Image(_)));
    }
}
