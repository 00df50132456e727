use thiserror::Error;

use crate::color::Rgb;
use crate::consts::TOLERANCE;
use crate::ray::Ray;
use crate::vector::{ Vec3, is_close };

/// A material record.
///
/// The final color of a hit is `ambient * color + lambert * lighting +
/// specular * reflection`. The weights are not required to sum to one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub ambient: f64,
    pub lambert: f64,
    pub specular: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Rgb::white(),
            ambient: 0.2,
            lambert: 0.6,
            specular: 0.2,
        }
    }
}

/// Reasons a reflection can not be derived.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ReflectError {
    /// The point does not lie along the ray's direction from its origin.
    #[error("point {point:?} does not lie along the ray")]
    PointOffRay { point: Vec3 },
}

/// Something which occupies space and can be hit by a ray.
pub trait Shape {
    fn position(&self) -> Vec3;
    fn material(&self) -> &Material;
    fn material_mut(&mut self) -> &mut Material;

    /// True iff the point of the ray's line closest to the shape lies
    /// within or on the shape's boundary.
    fn is_intersected(&self, ray: &Ray) -> bool;

    /// The point where the ray enters the shape, or `None` when the ray's
    /// line misses the shape.
    fn intersection(&self, ray: &Ray) -> Option<Vec3>;

    /// The outward surface normal at `point`. Not normalized.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Reflects `ray` off the surface at `point`.
    ///
    /// `point` is assumed to be on the surface and on the ray. The origin is
    /// mirrored across the normal line through `point`; the reflected ray
    /// starts at `point` and heads toward the mirrored origin.
    fn reflect(&self, ray: &Ray, point: Vec3) -> Result<Ray, ReflectError> {
        let to_point = point - ray.origin;
        let consistent = is_close(
            &to_point.normalized(),
            &ray.direction.normalized(),
            TOLERANCE
        );

        if !consistent {
            return Err(ReflectError::PointOffRay { point });
        }

        let normal = self.normal_at(point).normalized();
        let projection_on_normal = point - to_point.dot(&normal) * normal;
        let end_point = 2.0 * (projection_on_normal - ray.origin) + ray.origin;

        Ok(Ray::new(point, end_point - point))
    }
}

/// A `Shape` that can be stored in a `Scene` and shared with render workers.
pub trait ShapeDebug : Shape + std::fmt::Debug + Send + Sync { }

impl<S: Shape + std::fmt::Debug + Send + Sync> ShapeDebug for S { }
