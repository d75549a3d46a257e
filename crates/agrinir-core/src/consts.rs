/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Minimum frame count to use frame-level Rayon parallelism.
pub const PARALLEL_FRAME_THRESHOLD: usize = 2;

/// Number of channels in a color frame (B, G, R).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Linear-mix weight of the red channel in the NIR proxy.
pub const DEFAULT_MIX_RED: f32 = 0.7;

/// Linear-mix weight of the green channel in the NIR proxy.
pub const DEFAULT_MIX_GREEN: f32 = 0.2;

/// Linear-mix weight of the blue channel in the NIR proxy.
pub const DEFAULT_MIX_BLUE: f32 = 0.1;

/// Low-pass disk radius as a fraction of `min(height, width)`.
pub const DEFAULT_RADIUS_RATIO: f32 = 0.08;

/// Division guard added to every index denominator and to the fusion weight sum.
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// EXG cut value above which a pixel is flagged as weed.
pub const DEFAULT_WEED_THRESHOLD: u8 = 150;

/// Side length of the median window applied to the raw weed mask.
pub const DEFAULT_MEDIAN_WINDOW: usize = 5;

/// Largest accepted median window side. Cost per pixel grows with its square.
pub const MAX_MEDIAN_WINDOW: usize = 101;

/// NDVI byte value at or above which a pixel is healthy.
pub const DEFAULT_HEALTHY_THRESHOLD: u8 = 150;

/// NDVI byte value at or below which a pixel is unhealthy.
pub const DEFAULT_UNHEALTHY_THRESHOLD: u8 = 120;

/// Foreground value of binary masks.
pub const MASK_ON: u8 = 255;

/// Background value of binary masks.
pub const MASK_OFF: u8 = 0;

/// Healthy crop color, BGR order.
pub const HEALTHY_BGR: [u8; 3] = [0, 255, 0];

/// Unhealthy crop color, BGR order.
pub const UNHEALTHY_BGR: [u8; 3] = [0, 0, 255];

/// Background color, BGR order.
pub const BACKGROUND_BGR: [u8; 3] = [0, 0, 0];

/// Four-method fusion weights: (basic, frequency, multi-resolution, edge-residual).
pub const FOUR_METHOD_WEIGHTS: [f32; 4] = [0.4, 0.2, 0.2, 0.2];

/// Three-method fusion weights: (basic, frequency, edge-residual).
pub const THREE_METHOD_WEIGHTS: [f32; 3] = [0.5, 0.3, 0.2];
