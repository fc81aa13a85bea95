//! Progressive per-pixel radiance accumulation and tone mapping.

use crate::material::Color;

/// Display gamma applied by [`color_to_rgba`].
pub const GAMMA: f32 = 2.2;

/// Running mean of the samples taken for one pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelState {
    /// Mean radiance of all samples so far
    pub mean: Color,
    /// Number of samples folded into `mean`
    pub count: u32,
}

impl PixelState {
    /// Fold one sample into the running mean and return the new mean.
    #[inline]
    pub fn fold(&mut self, sample: Color) -> Color {
        self.count += 1;
        self.mean += (sample - self.mean) / self.count as f32;
        self.mean
    }
}

/// Row-major buffer of per-pixel running means.
#[derive(Debug, Clone)]
pub struct Accumulator {
    width: u32,
    height: u32,
    pixels: Vec<PixelState>,
}

impl Accumulator {
    /// Create an empty accumulator for a `width` x `height` image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![PixelState::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Get the pixel state at (x, y).
    pub fn get(&self, x: u32, y: u32) -> PixelState {
        self.pixels[self.index(x, y)]
    }

    /// Get the pixel state at (x, y) for updating.
    pub fn get_mut(&mut self, x: u32, y: u32) -> &mut PixelState {
        let index = self.index(x, y);
        &mut self.pixels[index]
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn pixels(&self) -> &[PixelState] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [PixelState] {
        &mut self.pixels
    }

    /// Forget every sample.
    pub fn clear(&mut self) {
        self.pixels.fill(PixelState::default());
    }

    /// Tone-mapped RGBA bytes of the whole image.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(pixel.mean));
        }
        bytes
    }
}

/// Apply display gamma to a linear value in [0, 1].
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    linear.powf(1.0 / GAMMA)
}

/// Map one linear channel to a display byte.
#[inline]
pub fn tone_map(linear: f32) -> u8 {
    (linear_to_gamma(linear.clamp(0.0, 1.0)) * 255.0).round() as u8
}

/// Convert a color to 8-bit RGBA with opaque alpha.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    [tone_map(color.x), tone_map(color.y), tone_map(color.z), 255]
}
