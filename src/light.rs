use crate::color::Rgb;
use crate::vector::Vec3;

/// A point light.
///
/// A very simple light source. Provides a color and a position where light is
/// produced from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Rgb,
}

impl PointLight {
    pub fn new(position: Vec3, color: Rgb) -> PointLight {
        PointLight { position, color }
    }

    /// Creates a white point light.
    pub fn white(position: Vec3) -> PointLight {
        PointLight { position, color: Rgb::white() }
    }
}

/// Calculates the diffuse contribution of one light at a surface point.
///
/// `base` is the surface color, filtered through the light's color and
/// scaled by the cosine between `normal` and the direction to the light.
/// Surfaces facing away from the light, or in its shadow, receive nothing.
pub fn lighting(light: &PointLight, base: Rgb, point: Vec3, normal: Vec3,
    in_shadow: bool) -> Rgb {
    if in_shadow {
        return Rgb::black();
    }

    let lightv = (light.position - point).normalized();
    let light_dot_normal = lightv.dot(&normal.normalized());

    if light_dot_normal <= 0.0 {
        return Rgb::black();
    }

    base.modulate(&light.color) * light_dot_normal
}

#[test]
fn light_facing_surface_head_on() {
    let light = PointLight::white(Vec3::new(0.0, 0.0, -10.0));
    let base = Rgb::rgb(200, 100, 50);

    let c = lighting(&light, base, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0),
        false);
    assert_eq!(c, base);
}

#[test]
fn light_at_45_degrees() {
    let light = PointLight::white(Vec3::new(0.0, 10.0, -10.0));
    let base = Rgb::rgb(200, 200, 200);

    let c = lighting(&light, base, Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0),
        false);
    // 200 * cos(45deg) = 141.42...
    assert_eq!(c, Rgb::rgb(141, 141, 141));
}

#[test]
fn light_behind_surface() {
    let light = PointLight::white(Vec3::new(0.0, 0.0, 10.0));

    let c = lighting(&light, Rgb::white(), Vec3::zeros(),
        Vec3::new(0.0, 0.0, -1.0), false);
    assert_eq!(c, Rgb::black());
}

#[test]
fn surface_in_shadow() {
    let light = PointLight::white(Vec3::new(0.0, 0.0, -10.0));

    let c = lighting(&light, Rgb::white(), Vec3::zeros(),
        Vec3::new(0.0, 0.0, -1.0), true);
    assert_eq!(c, Rgb::black());
}

#[test]
fn colored_light_filters_surface() {
    let light = PointLight::new(Vec3::new(0.0, 0.0, -10.0),
        Rgb::rgb(255, 0, 0));

    let c = lighting(&light, Rgb::white(), Vec3::zeros(),
        Vec3::new(0.0, 0.0, -3.0), false);
    assert_eq!(c, Rgb::rgb(255, 0, 0));
}
