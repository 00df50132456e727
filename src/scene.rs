use tracing::{ info, trace };

use crate::camera::{ Camera, RenderStatus, View };
use crate::color::Rgb;
use crate::consts::SELF_HIT_EPSILON;
use crate::light::{ PointLight, lighting };
use crate::ray::Ray;
use crate::shape::{ Shape, ShapeDebug };
use crate::vector::Vec3;

/// A hit of a ray against one of the scene's shapes.
#[derive(Copy, Clone, Debug)]
pub struct Hit<'a> {
    /// Distance from the ray origin to `point`.
    pub distance: f64,
    pub point: Vec3,
    pub what: &'a dyn ShapeDebug,
}

/// A scene with objects, lights and the cameras looking at them.
///
/// The scene exclusively owns its objects. Rendering only reads the objects
/// and lights; each camera receives its own pixels.
#[derive(Debug, Default)]
pub struct Scene {
    pub objects: Vec<Box<dyn ShapeDebug>>,
    pub lights: Vec<PointLight>,
    pub cameras: Vec<Camera>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Scene {
        Default::default()
    }

    pub fn add_object<S: ShapeDebug + 'static>(&mut self, object: S) {
        self.objects.push(Box::new(object));
    }

    /// Removes the most recently added object, if any.
    pub fn pop_object(&mut self) -> Option<Box<dyn ShapeDebug>> {
        self.objects.pop()
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn pop_light(&mut self) -> Option<PointLight> {
        self.lights.pop()
    }

    pub fn add_camera(&mut self, camera: Camera) {
        self.cameras.push(camera);
    }

    pub fn pop_camera(&mut self) -> Option<Camera> {
        self.cameras.pop()
    }

    /// Renders every camera, in the order they were added.
    pub fn render_all(&mut self) {
        let mut cameras = std::mem::take(&mut self.cameras);
        for camera in cameras.iter_mut() {
            self.render(camera);
        }

        self.cameras = cameras;
    }

    /// Renders one camera into its canvas.
    pub fn render(&self, camera: &mut Camera) {
        camera.status = RenderStatus::Rendering;
        info!(width = camera.width, height = camera.height,
            max_depth = camera.max_render_depth, "rendering camera");

        let view = camera.view();
        for row in 0..camera.height {
            for column in 0..camera.width {
                let color = self.pixel_color(&view, row, column,
                    camera.max_render_depth);
                camera.set_pixel(row, column, color);
            }
        }

        camera.status = RenderStatus::Done;
        info!("camera rendered");
    }

    pub fn pixel_color(&self, view: &View, row: usize, column: usize,
        max_depth: u32) -> Rgb {
        let ray = view.ray_for_pixel(row, column);
        self.color_at(&ray, 0, max_depth)
    }

    /// Finds the object hit nearest to the ray's origin.
    ///
    /// Hits closer than `SELF_HIT_EPSILON` along the ray's direction, or
    /// behind its origin, are ignored. Exact ties go to the object added
    /// first.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<Hit<'_>> {
        let direction = ray.direction.normalized();
        let mut nearest: Option<Hit<'_>> = None;

        for obj in self.objects.iter() {
            if !obj.is_intersected(ray) {
                continue;
            }

            let point = match obj.intersection(ray) {
                Some(point) => point,
                None => continue,
            };

            let relative = point - ray.origin;
            if relative.dot(&direction) <= SELF_HIT_EPSILON {
                continue;
            }

            let distance = relative.length();
            let closer = nearest.map_or(true, |hit| distance < hit.distance);
            if closer {
                nearest = Some(Hit { distance, point, what: &**obj });
            }
        }

        nearest
    }

    /// Determines whether `point` is hidden from `light` by any object.
    pub fn is_shadowed(&self, point: Vec3, light: &PointLight) -> bool {
        let v = light.position - point;
        let distance = v.length();

        let r = Ray::new(point, v);
        match self.nearest_hit(&r) {
            Some(hit) => hit.distance < distance,
            None => false,
        }
    }

    /// Sums the contribution of every light at a hit.
    pub fn lighting_color(&self, hit: &Hit) -> Rgb {
        let base = hit.what.material().color;
        let normal = hit.what.normal_at(hit.point);

        let mut color = Rgb::black();
        for light in self.lights.iter() {
            let in_shadow = self.is_shadowed(hit.point, light);
            color = color.saturating_add(
                &lighting(light, base, hit.point, normal, in_shadow));
        }

        color
    }

    /// Determines the color seen along a ray.
    ///
    /// Rays deeper than `max_depth` and rays that hit nothing are black.
    /// Otherwise the hit object's own color, the light falling on it and the
    /// color seen along its reflection are blended by the object's material.
    pub fn color_at(&self, ray: &Ray, depth: u32, max_depth: u32) -> Rgb {
        if depth > max_depth {
            return Rgb::black();
        }

        let hit = match self.nearest_hit(ray) {
            Some(hit) => hit,
            None => return Rgb::black(),
        };

        let reflection_color = match hit.what.reflect(ray, hit.point) {
            Ok(reflected) => self.color_at(&reflected, depth + 1, max_depth),
            Err(e) => {
                trace!("no reflection: {}", e);
                Rgb::black()
            }
        };

        let lighting_color = self.lighting_color(&hit);
        let material = hit.what.material();

        (material.color * material.ambient)
            .saturating_add(&(lighting_color * material.lambert))
            .saturating_add(&(reflection_color * material.specular))
    }
}

/* Tests */

#[cfg(test)]
use crate::shape::Material;
#[cfg(test)]
use crate::sphere::Sphere;

#[cfg(test)]
fn flat(color: Rgb, ambient: f64, lambert: f64, specular: f64) -> Material {
    Material { color, ambient, lambert, specular }
}

#[test]
fn add_and_pop_collections() {
    let mut s = Scene::new();
    assert!(s.pop_object().is_none());
    assert!(s.pop_light().is_none());
    assert!(s.pop_camera().is_none());

    s.add_object(Sphere::new(Vec3::zeros(), 1.0));
    s.add_object(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 2.0));
    s.add_light(PointLight::white(Vec3::zeros()));

    assert_eq!(s.objects.len(), 2);
    let popped = s.pop_object().unwrap();
    assert_eq!(popped.position(), Vec3::new(0.0, 0.0, 5.0));
    assert_eq!(s.objects.len(), 1);
    assert!(s.pop_light().is_some());
    assert!(s.lights.is_empty());
}

#[test]
fn color_ray_miss() {
    let mut s = Scene::new();
    s.add_object(Sphere::new(Vec3::zeros(), 1.0));
    let r = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 1.0, 0.0));

    assert_eq!(s.color_at(&r, 0, 5), Rgb::black());
}

#[test]
fn color_past_max_depth_is_black() {
    let mut s = Scene::new();
    s.add_object(Sphere::with_material(Vec3::zeros(), 1.0,
        flat(Rgb::white(), 1.0, 0.0, 0.0)));
    let r = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

    assert_eq!(s.color_at(&r, 3, 2), Rgb::black());
    // depth == max_depth is still evaluated
    assert_eq!(s.color_at(&r, 2, 2), Rgb::white());
}

#[test]
fn ambient_only_hit() {
    let mut s = Scene::new();
    s.add_object(Sphere::with_material(Vec3::zeros(), 1.0,
        flat(Rgb::rgb(200, 100, 50), 0.5, 0.0, 0.0)));
    let r = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

    assert_eq!(s.color_at(&r, 0, 0), Rgb::rgb(100, 50, 25));
}

#[test]
fn nearest_of_two_objects() {
    let mut s = Scene::new();
    s.add_object(Sphere::with_material(Vec3::new(0.0, 0.0, 10.0), 1.0,
        flat(Rgb::rgb(0, 0, 255), 1.0, 0.0, 0.0)));
    s.add_object(Sphere::with_material(Vec3::new(0.0, 0.0, 4.0), 1.0,
        flat(Rgb::rgb(255, 0, 0), 1.0, 0.0, 0.0)));
    let r = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));

    let hit = s.nearest_hit(&r).unwrap();
    assert!((hit.distance - 3.0).abs() < 1e-9);
    assert_eq!(s.color_at(&r, 0, 0), Rgb::rgb(255, 0, 0));
}

#[test]
fn coincident_objects_go_to_first_added() {
    let mut s = Scene::new();
    s.add_object(Sphere::with_material(Vec3::new(0.0, 0.0, 5.0), 1.0,
        flat(Rgb::rgb(0, 255, 0), 1.0, 0.0, 0.0)));
    s.add_object(Sphere::with_material(Vec3::new(0.0, 0.0, 5.0), 1.0,
        flat(Rgb::rgb(255, 0, 0), 1.0, 0.0, 0.0)));
    let r = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));

    assert_eq!(s.color_at(&r, 0, 0), Rgb::rgb(0, 255, 0));

    s.pop_object();
    s.add_object(Sphere::with_material(Vec3::new(0.0, 0.0, 5.0), 1.0,
        flat(Rgb::rgb(0, 0, 255), 1.0, 0.0, 0.0)));
    assert_eq!(s.color_at(&r, 0, 0), Rgb::rgb(0, 255, 0));
}

#[test]
fn objects_behind_ray_are_ignored() {
    let mut s = Scene::new();
    s.add_object(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0));
    let r = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));

    assert!(s.objects[0].is_intersected(&r));
    assert!(s.nearest_hit(&r).is_none());
}

#[test]
fn reflection_between_facing_mirrors() {
    // Ray bounces off a mirror, back toward a white ambient sphere behind
    // the camera.
    let mut s = Scene::new();
    s.add_object(Sphere::with_material(Vec3::new(0.0, 0.0, 5.0), 1.0,
        flat(Rgb::black(), 0.0, 0.0, 1.0)));
    s.add_object(Sphere::with_material(Vec3::new(0.0, 0.0, -5.0), 1.0,
        flat(Rgb::rgb(10, 20, 30), 1.0, 0.0, 0.0)));
    let r = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));

    assert_eq!(s.color_at(&r, 0, 0), Rgb::black());
    assert_eq!(s.color_at(&r, 0, 1), Rgb::rgb(10, 20, 30));
}

#[test]
fn lit_and_shadowed_points() {
    let mut s = Scene::new();
    s.add_object(Sphere::new(Vec3::zeros(), 1.0));
    s.add_light(PointLight::white(Vec3::new(0.0, 0.0, -10.0)));

    assert!(!s.is_shadowed(Vec3::new(0.0, 0.0, -1.0), &s.lights[0]));
    assert!(s.is_shadowed(Vec3::new(0.0, 0.0, 5.0), &s.lights[0]));
    // Light between the point and the sphere
    assert!(!s.is_shadowed(Vec3::new(0.0, 0.0, -20.0), &s.lights[0]));
}

#[test]
fn lambert_term_uses_lights() {
    let mut s = Scene::new();
    s.add_object(Sphere::with_material(Vec3::zeros(), 1.0,
        flat(Rgb::rgb(100, 200, 50), 0.0, 1.0, 0.0)));
    s.add_light(PointLight::white(Vec3::new(0.0, 0.0, -10.0)));
    let r = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

    assert_eq!(s.color_at(&r, 0, 0), Rgb::rgb(100, 200, 50));

    s.pop_light();
    assert_eq!(s.color_at(&r, 0, 0), Rgb::black());
}

#[test]
fn composition_is_not_clamped() {
    let mut s = Scene::new();
    s.add_object(Sphere::with_material(Vec3::zeros(), 1.0,
        flat(Rgb::white(), 1.0, 1.0, 0.0)));
    s.add_light(PointLight::white(Vec3::new(0.0, 0.0, -10.0)));
    let r = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

    assert_eq!(s.color_at(&r, 0, 0), Rgb::rgb(510, 510, 510));
}

#[test]
fn bright_mirrors_saturate_instead_of_overflowing() {
    // Each bounce doubles the reflected color, which passes i32::MAX well
    // before the depth limit.
    let mut s = Scene::new();
    let mirror = flat(Rgb::white(), 1.0, 0.0, 2.0);
    s.add_object(Sphere::with_material(Vec3::new(0.0, 0.0, 5.0), 1.0, mirror));
    s.add_object(Sphere::with_material(Vec3::new(0.0, 0.0, -5.0), 1.0, mirror));
    let r = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));

    let color = s.color_at(&r, 0, 40);
    assert_eq!(color, Rgb::rgb(i32::MAX, i32::MAX, i32::MAX));
    assert_eq!(color.clamped(), Rgb::white());

    // Shallow enough to stay in range: 255 * (2^3 - 1)
    assert_eq!(s.color_at(&r, 0, 2), Rgb::rgb(1785, 1785, 1785));
}

#[test]
fn render_fills_camera_canvas() {
    let mut s = Scene::new();
    s.add_object(Sphere::with_material(Vec3::new(0.0, 0.0, 5.0), 1.0,
        flat(Rgb::white(), 1.0, 0.0, 0.0)));
    let mut camera = Camera::new(
        Vec3::zeros(),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 1.0, 0.0),
        5,
        5,
    );
    camera.angle_of_view = std::f64::consts::PI / 4.0;
    s.add_camera(camera);

    s.render_all();

    let camera = &s.cameras[0];
    assert_eq!(camera.status, RenderStatus::Done);
    assert_eq!(camera.canvas().read_pixel(2, 2), Some(Rgb::white()));
    assert_eq!(camera.canvas().read_pixel(0, 0), Some(Rgb::black()));
    assert_eq!(camera.canvas().read_pixel(4, 4), Some(Rgb::black()));
}
