//! Owned pixel buffers for the detector.
//!
//! The detector does not decode anything: upstream face detection hands it
//! an already-cropped, roughly frontal face region as an interleaved BGR
//! buffer. `FaceImage::from_bgr` only checks that the buffer matches its
//! declared dimensions.

use fides_contracts::error::{FidesError, FidesResult};

/// A cropped face region, interleaved BGR, row-major.
#[derive(Debug, Clone)]
pub struct FaceImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FaceImage {
    /// Wrap an interleaved BGR buffer.
    ///
    /// Returns `FidesError::MalformedImage` when `data.len()` is not
    /// `width * height * 3`.
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> FidesResult<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(FidesError::MalformedImage {
                reason: format!(
                    "{}x{} BGR buffer needs {} bytes, got {}",
                    width,
                    height,
                    expected,
                    data.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn min_edge(&self) -> u32 {
        self.width.min(self.height)
    }

    pub fn max_edge(&self) -> u32 {
        self.width.max(self.height)
    }

    /// BGR triple at `(x, y)`. Caller must stay in bounds.
    pub fn bgr(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        (self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// BT.601 luma conversion.
    pub fn to_gray(&self) -> GrayImage {
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize);
        for chunk in self.data.chunks_exact(3) {
            let (b, g, r) = (chunk[0] as f32, chunk[1] as f32, chunk[2] as f32);
            data.push((0.114 * b + 0.587 * g + 0.299 * r).round().clamp(0.0, 255.0) as u8);
        }
        GrayImage {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

/// A single-channel luma image.
#[derive(Debug, Clone)]
pub struct GrayImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayImage {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Luma at `(x, y)`. Caller must stay in bounds.
    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// True when every pixel has the same value — an all-black or
    /// otherwise degenerate crop that no analyzer can say anything about.
    pub fn is_flat(&self) -> bool {
        match self.data.first() {
            Some(&first) => self.data.iter().all(|&v| v == first),
            None => true,
        }
    }

    /// Nearest-neighbor resample to an `n`×`n` grid of f64 luma values.
    /// Used by the spectral analyzers to bound their cost.
    pub fn resample(&self, n: u32) -> Vec<f64> {
        let mut out = Vec::with_capacity(n as usize * n as usize);
        for y in 0..n {
            for x in 0..n {
                let sx = (x as u64 * self.width as u64 / n as u64) as u32;
                let sy = (y as u64 * self.height as u64 / n as u64) as u32;
                out.push(self.at(sx, sy) as f64);
            }
        }
        out
    }
}

/// Pixel coordinates of the two eye centres, as reported by the upstream
/// landmark detector.
#[derive(Debug, Clone, Copy)]
pub struct EyePositions {
    pub left: (u32, u32),
    pub right: (u32, u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_length_is_checked() {
        assert!(FaceImage::from_bgr(4, 4, vec![0; 48]).is_ok());
        assert!(FaceImage::from_bgr(4, 4, vec![0; 47]).is_err());
    }

    #[test]
    fn gray_conversion_uses_luma_weights() {
        // Pure green is brighter in luma than pure blue.
        let green = FaceImage::from_bgr(1, 1, vec![0, 255, 0]).unwrap().to_gray();
        let blue = FaceImage::from_bgr(1, 1, vec![255, 0, 0]).unwrap().to_gray();
        assert!(green.at(0, 0) > blue.at(0, 0));
    }

    #[test]
    fn flat_detection() {
        let flat = FaceImage::from_bgr(4, 4, vec![17; 48]).unwrap().to_gray();
        assert!(flat.is_flat());

        let mut data = vec![17; 48];
        data[0] = 200;
        let varied = FaceImage::from_bgr(4, 4, data).unwrap().to_gray();
        assert!(!varied.is_flat());
    }

    #[test]
    fn resample_preserves_a_uniform_image() {
        let gray = FaceImage::from_bgr(10, 10, vec![90; 300]).unwrap().to_gray();
        let grid = gray.resample(4);
        assert_eq!(grid.len(), 16);
        assert!(grid.iter().all(|&v| v == 90.0));
    }
}
