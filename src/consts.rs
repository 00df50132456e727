// Runtime parameters
pub const NUM_THREADS: usize = 4;
pub const OUT_FILE: &str = "./out.ppm";

// Floating point comparisons
pub const TOLERANCE: f64 = 1e-7;

// Hits closer than this along a ray are ignored, so a surface never
// re-intersects itself at the origin of a reflected or shadow ray.
pub const SELF_HIT_EPSILON: f64 = 0.0001;

// Camera defaults
pub const DEFAULT_MAX_RENDER_DEPTH: u32 = 5;
pub const DEFAULT_ANGLE_OF_VIEW: f64 = std::f64::consts::PI / 6.0;

// Maximum color channel value
pub const CHANNEL_MAX: i32 = 255;
