use crate::vector::Vec3;

/// A half-line traced through a scene.
///
/// The direction does not have to be unit length; anything consuming a ray
/// normalizes the direction itself.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Ray {
        Ray { origin, direction }
    }

    /// A ray with zero origin and zero direction.
    ///
    /// Nothing intersects it and it cannot be normalized.
    pub fn degenerate() -> Ray {
        Ray { origin: Vec3::zeros(), direction: Vec3::zeros() }
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec3::zeros()
    }

    pub fn position(&self, t: f64) -> Vec3 {
        self.origin + (t * self.direction)
    }
}

#[test]
fn ray_position() {
    let r = Ray::new(Vec3::new(2.0, 3.0, 4.0), Vec3::new(1.0, 0.0, 0.0));

    assert_eq!(r.position(0.0), Vec3::new(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Vec3::new(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Vec3::new(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Vec3::new(4.5, 3.0, 4.0));
}

#[test]
fn ray_fields_are_mutable() {
    let mut r = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));
    r.origin = Vec3::new(1.0, 1.0, 1.0);
    r.direction = Vec3::new(0.0, 2.0, 0.0);

    assert_eq!(r.position(0.5), Vec3::new(1.0, 2.0, 1.0));
}

#[test]
fn degenerate_ray() {
    assert!(Ray::degenerate().is_degenerate());
    assert!(!Ray::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0)).is_degenerate());
}
