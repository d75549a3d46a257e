use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{AgrinirError, Result};

/// Channel position inside a [`BgrFrame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BgrChannel {
    Blue = 0,
    Green = 1,
    Red = 2,
}

/// An 8-bit visible-light frame, shape = (height, width, 3), channels in
/// blue, green, red order.
///
/// Only the validating constructors can build one, so every `BgrFrame` is a
/// non-empty 3-channel 2D image.
#[derive(Clone, Debug, PartialEq)]
pub struct BgrFrame {
    data: Array3<u8>,
}

/// The three channels of a frame as f32 fields.
#[derive(Clone, Debug)]
pub struct BgrChannels {
    pub blue: Array2<f32>,
    pub green: Array2<f32>,
    pub red: Array2<f32>,
}

impl BgrFrame {
    /// Wrap an existing (height, width, 3) array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (h, w, c) = data.dim();
        if c != COLOR_CHANNEL_COUNT || h == 0 || w == 0 {
            return Err(AgrinirError::ShapeMismatch {
                context: "frame",
                expected: format!("(H>0, W>0, {})", COLOR_CHANNEL_COUNT),
                actual: format!("{:?}", (h, w, c)),
            });
        }
        Ok(Self { data })
    }

    /// Build a frame from interleaved BGR bytes in row-major order.
    pub fn from_raw(height: usize, width: usize, bytes: Vec<u8>) -> Result<Self> {
        let expected = height
            .checked_mul(width)
            .and_then(|n| n.checked_mul(COLOR_CHANNEL_COUNT))
            .ok_or_else(|| AgrinirError::ShapeMismatch {
                context: "raw frame buffer",
                expected: format!("({}, {}, 3) addressable in memory", height, width),
                actual: format!("{} bytes", bytes.len()),
            })?;
        if bytes.len() != expected {
            return Err(AgrinirError::ShapeMismatch {
                context: "raw frame buffer",
                expected: format!("{} bytes ({}x{}x3)", expected, height, width),
                actual: format!("{} bytes", bytes.len()),
            });
        }
        let data = Array3::from_shape_vec((height, width, COLOR_CHANNEL_COUNT), bytes)
            .map_err(|e| AgrinirError::ShapeMismatch {
                context: "raw frame buffer",
                expected: format!("({}, {}, 3)", height, width),
                actual: e.to_string(),
            })?;
        Self::from_array(data)
    }

    /// Same (b, g, r) value everywhere.
    pub fn uniform(height: usize, width: usize, bgr: [u8; 3]) -> Result<Self> {
        let data = Array3::from_shape_fn((height, width, COLOR_CHANNEL_COUNT), |(_, _, c)| bgr[c]);
        Self::from_array(data)
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    /// (height, width), the shape every derived channel shares.
    pub fn dim(&self) -> (usize, usize) {
        let (h, w, _) = self.data.dim();
        (h, w)
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    pub fn into_inner(self) -> Array3<u8> {
        self.data
    }

    /// Borrow one channel as a 2D byte view.
    pub fn channel_view(&self, channel: BgrChannel) -> ArrayView2<'_, u8> {
        self.data.index_axis(Axis(2), channel as usize)
    }

    /// Extract one channel as f32.
    pub fn channel(&self, channel: BgrChannel) -> Array2<f32> {
        self.channel_view(channel).mapv(f32::from)
    }

    pub fn blue(&self) -> Array2<f32> {
        self.channel(BgrChannel::Blue)
    }

    pub fn green(&self) -> Array2<f32> {
        self.channel(BgrChannel::Green)
    }

    pub fn red(&self) -> Array2<f32> {
        self.channel(BgrChannel::Red)
    }

    /// Split into B, G, R float channels.
    pub fn channels(&self) -> BgrChannels {
        BgrChannels {
            blue: self.blue(),
            green: self.green(),
            red: self.red(),
        }
    }
}
