#![allow(dead_code)]

use agrinir_core::frame::BgrFrame;
use ndarray::{Array2, Array3};

/// Deterministic xorshift32 byte stream, so "random" frames are reproducible.
pub struct XorShift(u32);

impl XorShift {
    pub fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u8(&mut self) -> u8 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x >> 24) as u8
    }
}

/// Uniformly distributed bytes in every channel.
pub fn random_frame(h: usize, w: usize, seed: u32) -> BgrFrame {
    let mut rng = XorShift::new(seed);
    let data = Array3::from_shape_simple_fn((h, w, 3), || rng.next_u8());
    BgrFrame::from_array(data).expect("valid frame shape")
}

/// Random single-channel byte map.
pub fn random_map(h: usize, w: usize, seed: u32) -> Array2<u8> {
    let mut rng = XorShift::new(seed);
    Array2::from_shape_simple_fn((h, w), || rng.next_u8())
}

/// Same (b, g, r) everywhere.
pub fn uniform_frame(h: usize, w: usize, bgr: [u8; 3]) -> BgrFrame {
    BgrFrame::uniform(h, w, bgr).expect("valid frame shape")
}

/// Smooth non-negative test pattern.
pub fn smooth_field(h: usize, w: usize) -> Array2<f32> {
    Array2::from_shape_fn((h, w), |(r, c)| {
        ((r as f32 * 0.3).sin() + (c as f32 * 0.2).cos()) * 50.0 + 120.0
    })
}

pub fn mean(data: &Array2<f32>) -> f32 {
    data.iter().map(|&v| v as f64).sum::<f64>() as f32 / data.len() as f32
}
