use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// 3x3 aperture used for the discrete Laplacian.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaplacianKernel {
    /// 4-neighbour cross:
    ///   0  1  0
    ///   1 -4  1
    ///   0  1  0
    Cross,
    /// Sum of the 3x3 Sobel second derivatives in x and y:
    ///   2  0  2
    ///   0 -8  0
    ///   2  0  2
    #[default]
    Sobel3,
}

impl LaplacianKernel {
    fn weights(&self) -> [[f32; 3]; 3] {
        match self {
            Self::Cross => [[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]],
            Self::Sobel3 => [[2.0, 0.0, 2.0], [0.0, -8.0, 0.0], [2.0, 0.0, 2.0]],
        }
    }
}

impl std::fmt::Display for LaplacianKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cross => write!(f, "Cross"),
            Self::Sobel3 => write!(f, "Sobel 3x3"),
        }
    }
}

/// Base layer: the field minus its Laplacian response.
pub fn edge_residual_base(data: &Array2<f32>, kernel: LaplacianKernel) -> Array2<f32> {
    let lap = laplacian(data, kernel);
    data - &lap
}

/// Discrete Laplacian with reflect-101 borders (`dcb|abcd|cba`).
pub fn laplacian(data: &Array2<f32>, kernel: LaplacianKernel) -> Array2<f32> {
    let (h, w) = data.dim();
    let weights = kernel.weights();
    let mut result = Array2::<f32>::zeros((h, w));

    for row in 0..h {
        for col in 0..w {
            let mut sum = 0.0f32;
            for (ki, krow) in weights.iter().enumerate() {
                let src_row = reflect101(row as isize + ki as isize - 1, h);
                for (kj, &kv) in krow.iter().enumerate() {
                    if kv == 0.0 {
                        continue;
                    }
                    let src_col = reflect101(col as isize + kj as isize - 1, w);
                    sum += data[[src_row, src_col]] * kv;
                }
            }
            result[[row, col]] = sum;
        }
    }

    result
}

/// Reflect an index into [0, size) without repeating the edge sample.
pub fn reflect101(idx: isize, size: usize) -> usize {
    if size <= 1 {
        return 0;
    }
    let period = 2 * (size as isize - 1);
    let m = idx.rem_euclid(period);
    if m < size as isize {
        m as usize
    } else {
        (period - m) as usize
    }
}
