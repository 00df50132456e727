use crate::ray::Ray;
use crate::shape::{ Shape, Material };
use crate::vector::Vec3;

/// A sphere with a center and a radius.
///
/// Intersections are found in closed form: the ray origin is projected onto
/// the ray's line at the point closest to the center, and the half chord is
/// recovered from the radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f64) -> Sphere {
        Sphere { center, radius, material: Default::default() }
    }

    pub fn with_material(center: Vec3, radius: f64, material: Material)
        -> Sphere {
        Sphere { center, radius, material }
    }

    /// True if `point` is inside or on the sphere.
    pub fn is_point_inside(&self, point: Vec3) -> bool {
        self.radius_squared_difference(point) >= 0.0
    }

    /// The point of the ray's line closest to the center.
    fn projection(&self, ray: &Ray) -> Vec3 {
        let direction = ray.direction.normalized();
        let to_center = self.center - ray.origin;

        ray.origin + direction.dot(&to_center) * direction
    }

    fn radius_squared_difference(&self, point: Vec3) -> f64 {
        let relative = point - self.center;
        self.radius * self.radius - relative.dot(&relative)
    }
}

impl Shape for Sphere {
    fn position(&self) -> Vec3 {
        self.center
    }

    fn material(&self) -> &Material {
        &self.material
    }

    fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    fn is_intersected(&self, ray: &Ray) -> bool {
        self.is_point_inside(self.projection(ray))
    }

    /// Returns the near root when the origin is outside the sphere, and the
    /// exit point when the origin is inside.
    fn intersection(&self, ray: &Ray) -> Option<Vec3> {
        let projection = self.projection(ray);
        let discriminant = self.radius_squared_difference(projection);

        if discriminant < 0.0 {
            return None;
        }

        let half_chord = discriminant.sqrt();
        let direction = ray.direction.normalized();
        let sign = if self.is_point_inside(ray.origin) { 1.0 } else { -1.0 };

        Some(projection + sign * half_chord * direction)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        point - self.center
    }
}

/* Tests */

#[cfg(test)]
fn assert_near(actual: Vec3, expected: Vec3) {
    assert!(
        crate::vector::is_close(&actual, &expected, 1e-7),
        "{:?} is not near {:?}", actual, expected
    );
}

#[test]
fn ray_along_axis_intersection() {
    let sphere = Sphere::new(Vec3::zeros(), 2.0);
    let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));

    assert!(sphere.is_intersected(&ray));
    assert_near(sphere.intersection(&ray).unwrap(), Vec3::new(-2.0, 0.0, 0.0));
}

#[test]
fn general_case_intersection() {
    let sphere = Sphere::new(Vec3::new(1.0, 1.0, 1.0), 2.0);
    let ray = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(0.5, 1.0, 0.5));

    assert!(sphere.is_intersected(&ray));
    assert_near(sphere.intersection(&ray).unwrap(), ray.position(2.0));
}

#[test]
fn ray_inside_returns_exit_point() {
    let sphere = Sphere::new(Vec3::zeros(), 2.0);
    let ray = Ray::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));

    assert!(sphere.is_intersected(&ray));
    let offset = 2.0 / 3.0 * f64::sqrt(3.0);
    assert_near(sphere.intersection(&ray).unwrap(), ray.position(offset));
}

#[test]
fn no_intersection() {
    let sphere = Sphere::new(Vec3::zeros(), 2.0);
    let ray = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(1.0, 1.0, 1.0));

    assert!(!sphere.is_intersected(&ray));
    assert_eq!(sphere.intersection(&ray), None);
}

#[test]
fn tangent_ray_intersects() {
    let sphere = Sphere::new(Vec3::new(1.0, 1.0, 1.0), 1.0);
    let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.5));

    assert!(sphere.is_intersected(&ray));
    assert_near(sphere.intersection(&ray).unwrap(), Vec3::new(1.0, 0.0, 1.0));
}

#[test]
fn point_inside() {
    let sphere = Sphere::new(Vec3::new(1.0, -1.0, 1.0), 2.0);

    assert!(sphere.is_point_inside(Vec3::zeros()));
    assert!(sphere.is_point_inside(Vec3::new(0.4, 0.6, 0.1)));
    assert!(!sphere.is_point_inside(Vec3::new(4.0, 0.0, 0.0)));
}

#[test]
fn normal_is_not_normalized() {
    let sphere = Sphere::new(Vec3::new(1.0, 1.0, 1.0), 1.0);

    assert_near(sphere.normal_at(Vec3::new(1.0, 2.0, 1.0)),
        Vec3::new(0.0, 1.0, 0.0));

    let big = Sphere::new(Vec3::zeros(), 3.0);
    assert_near(big.normal_at(Vec3::new(0.0, 0.0, 3.0)),
        Vec3::new(0.0, 0.0, 3.0));
}

#[test]
fn reflect_straight_down_ray() {
    let sphere = Sphere::new(Vec3::new(1.0, 1.0, 1.0), 1.0);
    let ray = Ray::new(Vec3::new(1.0, 3.0, 1.0), Vec3::new(0.0, -0.5, 0.0));

    let intersection = sphere.intersection(&ray).unwrap();
    assert_near(intersection, Vec3::new(1.0, 2.0, 1.0));

    let reflected = sphere.reflect(&ray, intersection).unwrap();
    assert_near(reflected.origin, Vec3::new(1.0, 2.0, 1.0));
    assert_near(reflected.direction.normalized(), Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn reflect_tangent_ray() {
    let sphere = Sphere::new(Vec3::new(1.0, 1.0, 1.0), 1.0);
    let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.5));

    let intersection = sphere.intersection(&ray).unwrap();
    let reflected = sphere.reflect(&ray, intersection).unwrap();

    assert_near(reflected.origin, Vec3::new(1.0, 0.0, 1.0));
    assert_near(reflected.direction.normalized(), Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn reflect_from_inside() {
    let center = Vec3::new(1.0, 1.0, 1.0);
    let sphere = Sphere::new(center, 1.0);

    let exit = center + Vec3::new(f64::sqrt(3.0), f64::sqrt(3.0), 1.0)
        .normalized();
    let origin = Vec3::new(1.0, 1.5, 1.0);
    let ray = Ray::new(origin, (exit - origin) * 0.5);

    let intersection = sphere.intersection(&ray).unwrap();
    assert_near(intersection, exit);

    // Mirroring about the normal: d - 2 (d . n) n
    let d = (exit - origin).normalized();
    let n = sphere.normal_at(exit).normalized();
    let expected = d - 2.0 * d.dot(&n) * n;

    let reflected = sphere.reflect(&ray, intersection).unwrap();
    assert_near(reflected.origin, exit);
    assert_near(reflected.direction.normalized(), expected.normalized());
}

#[test]
fn reflect_at_reported_intersection_succeeds() {
    let sphere = Sphere::new(Vec3::new(0.5, -0.25, 4.0), 1.5);
    let rays = [
        Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0)),
        Ray::new(Vec3::new(-3.0, 1.0, 0.0), Vec3::new(3.5, -1.0, 4.0)),
        Ray::new(Vec3::new(0.5, -0.25, 4.0), Vec3::new(1.0, 2.0, -3.0)),
    ];

    for ray in rays.iter() {
        assert!(sphere.is_intersected(ray));
        let point = sphere.intersection(ray).unwrap();
        let reflected = sphere.reflect(ray, point).unwrap();

        assert!(!reflected.is_degenerate());
        assert_near(reflected.origin, point);
    }
}

#[test]
fn reflect_point_off_ray_fails() {
    use crate::shape::ReflectError;

    let sphere = Sphere::new(Vec3::zeros(), 1.0);
    let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
    let point = Vec3::new(0.0, 1.0, 0.0);

    assert_eq!(sphere.reflect(&ray, point),
        Err(ReflectError::PointOffRay { point }));
}

#[test]
fn material_is_mutable_through_shape() {
    let mut sphere = Sphere::new(Vec3::zeros(), 1.0);
    sphere.material_mut().ambient = 1.0;

    assert_eq!(sphere.material().ambient, 1.0);
    assert_eq!(sphere.position(), Vec3::zeros());
}
