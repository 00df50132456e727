use std::ops::Mul;

use crate::consts::CHANNEL_MAX;
use crate::vector::Vector;

/// A color.
///
/// Represented conventionally with red-green-blue (RGB) integer channels in
/// `x`, `y` and `z`. Channels nominally range from 0 to 255, but arithmetic
/// on colors never clamps; see `Rgb::clamped`.
///
/// # Examples
///
/// Scale a color by a weight:
///
/// ```
/// # use mirror_tracer::color::Rgb;
/// let gray = Rgb::rgb(200, 100, 51);
/// assert_eq!(gray * 0.5, Rgb::rgb(100, 50, 25));
/// ```
pub type Rgb = Vector<i32>;

impl Vector<i32> {
    /// Creates a color with red, green and blue values.
    pub const fn rgb(r: i32, g: i32, b: i32) -> Rgb {
        Vector::new(r, g, b)
    }

    /// The color black.
    pub const fn black() -> Rgb {
        Vector::new(0, 0, 0)
    }

    /// The color white.
    pub const fn white() -> Rgb {
        Vector::new(CHANNEL_MAX, CHANNEL_MAX, CHANNEL_MAX)
    }

    /// Filters one color through another.
    ///
    /// Each channel is the product of both channels, rescaled back into the
    /// 0-255 range. Modulating by white leaves a color unchanged.
    pub fn modulate(&self, other: &Rgb) -> Rgb {
        Vector::new(
            modulate_channel(self.x, other.x),
            modulate_channel(self.y, other.y),
            modulate_channel(self.z, other.z),
        )
    }

    /// Adds two colors, saturating each channel at the bounds of `i32`.
    ///
    /// Shading sums colors without clamping them to 0-255, so deep
    /// reflections between bright materials can run past the integer range.
    pub fn saturating_add(&self, other: &Rgb) -> Rgb {
        Vector::new(
            self.x.saturating_add(other.x),
            self.y.saturating_add(other.y),
            self.z.saturating_add(other.z),
        )
    }

    /// Clamps every channel into 0-255.
    pub fn clamped(&self) -> Rgb {
        Vector::new(
            self.x.clamp(0, CHANNEL_MAX),
            self.y.clamp(0, CHANNEL_MAX),
            self.z.clamp(0, CHANNEL_MAX),
        )
    }
}

// Float to int casts saturate, so scaling never wraps.
fn scale_channel(scalar: f64, channel: i32) -> i32 {
    (scalar * channel as f64) as i32
}

fn modulate_channel(first: i32, second: i32) -> i32 {
    let product = first as i64 * second as i64 / CHANNEL_MAX as i64;
    product.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Multiplies a color by a floating point weight.
///
/// Each channel is scaled as a float and truncated back to an integer.
impl Mul<f64> for Rgb {
    type Output = Rgb;

    fn mul(self, other: f64) -> Rgb {
        Vector::new(
            scale_channel(other, self.x),
            scale_channel(other, self.y),
            scale_channel(other, self.z),
        )
    }
}

impl Mul<Rgb> for f64 {
    type Output = Rgb;

    fn mul(self, other: Rgb) -> Rgb {
        other * self
    }
}

#[test]
fn scale_truncates_toward_zero() {
    let c = Rgb::rgb(255, 10, -10);

    assert_eq!(c * 0.5, Rgb::rgb(127, 5, -5));
    assert_eq!(0.5 * c, c * 0.5);
}

#[test]
fn scale_does_not_clamp() {
    let c = Rgb::rgb(200, 200, 200);

    assert_eq!(c * 2.0, Rgb::rgb(400, 400, 400));
}

#[test]
fn add_colors_unclamped() {
    let c = Rgb::white() + Rgb::rgb(10, 0, 0);

    assert_eq!(c, Rgb::rgb(265, 255, 255));
}

#[test]
fn modulate_by_white_is_identity() {
    let c = Rgb::rgb(12, 200, 99);

    assert_eq!(c.modulate(&Rgb::white()), c);
    assert_eq!(c.modulate(&Rgb::black()), Rgb::black());
}

#[test]
fn modulate_mixes_channels() {
    let red = Rgb::rgb(255, 0, 0);
    let yellow = Rgb::rgb(255, 255, 0);

    assert_eq!(red.modulate(&yellow), red);
}

#[test]
fn clamp_channels() {
    let c = Rgb::rgb(-20, 128, 1000);

    assert_eq!(c.clamped(), Rgb::rgb(0, 128, 255));
}

#[test]
fn saturating_add_stops_at_bounds() {
    let big = Rgb::rgb(i32::MAX - 5, 10, i32::MIN + 1);
    let c = big.saturating_add(&Rgb::rgb(100, 20, -100));

    assert_eq!(c, Rgb::rgb(i32::MAX, 30, i32::MIN));
    assert_eq!(Rgb::white().saturating_add(&Rgb::rgb(10, 0, 0)),
        Rgb::rgb(265, 255, 255));
}

#[test]
fn scale_and_modulate_saturate() {
    let big = Rgb::rgb(i32::MAX, i32::MAX, 0);

    assert_eq!(big * 2.0, Rgb::rgb(i32::MAX, i32::MAX, 0));
    assert_eq!(big.modulate(&Rgb::rgb(1000, 255, 7)),
        Rgb::rgb(i32::MAX, i32::MAX, 0));
}
