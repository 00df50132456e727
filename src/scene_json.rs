use std::fs;
use std::path::{ Path, PathBuf };

use serde::Deserialize;
use tracing::debug;

use crate::camera::Camera;
use crate::color::Rgb;
use crate::consts::{ DEFAULT_ANGLE_OF_VIEW, DEFAULT_MAX_RENDER_DEPTH, TOLERANCE };
use crate::error::{ Result, TracerError };
use crate::light::PointLight;
use crate::scene::Scene;
use crate::shape::Material;
use crate::sphere::Sphere;
use crate::vector::Vec3;

/// A scene loaded from a description, with where each camera's image goes.
#[derive(Debug)]
pub struct SceneDescription {
    pub scene: Scene,

    /// One entry per camera, in camera order.
    pub outputs: Vec<Option<PathBuf>>,
}

impl SceneDescription {
    /// Reads and validates a JSON scene description from `path`.
    pub fn load(path: &Path) -> Result<SceneDescription> {
        let text = fs::read_to_string(path)?;
        let description = Self::from_json(&text)?;

        debug!(path = %path.display(),
            objects = description.scene.objects.len(),
            lights = description.scene.lights.len(),
            cameras = description.scene.cameras.len(),
            "loaded scene");

        Ok(description)
    }

    pub fn from_json(text: &str) -> Result<SceneDescription> {
        let scene_json: SceneJson = serde_json::from_str(text)?;
        SceneDescription::try_from(scene_json)
    }
}

#[derive(Deserialize)]
pub struct SceneJson {
    #[serde(default)]
    cameras: Vec<CameraJson>,
    #[serde(default)]
    lights: Vec<LightJson>,
    #[serde(default)]
    shapes: Vec<ShapeJson>,
}

#[derive(Clone, Deserialize)]
pub struct CameraJson {
    position: [f64; 3],
    front: [f64; 3],
    up: [f64; 3],
    width: usize,
    height: usize,
    angle_of_view: Option<f64>,
    max_render_depth: Option<u32>,
    output: Option<PathBuf>,
}

#[derive(Clone, Deserialize)]
pub struct LightJson {
    position: [f64; 3],
    color: Option<[i32; 3]>,
}

#[derive(Clone, Deserialize)]
pub struct MaterialJson {
    color: [i32; 3],
    ambient: f64,
    lambert: f64,
    specular: f64,
}

#[derive(Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeJson {
    Sphere {
        center: [f64; 3],
        radius: f64,
        material: Option<MaterialJson>,
    },
}

fn invalid(message: String) -> TracerError {
    TracerError::InvalidScene(message)
}

impl TryFrom<CameraJson> for Camera {
    type Error = TracerError;

    fn try_from(camera_json: CameraJson) -> Result<Camera> {
        let front: Vec3 = camera_json.front.into();
        let up: Vec3 = camera_json.up.into();

        if camera_json.width == 0 || camera_json.height == 0 {
            return Err(invalid(format!("camera canvas must not be empty, got {}x{}",
                camera_json.width, camera_json.height)));
        }

        // The renderer normalizes front, up and their cross product.
        if front.length() < TOLERANCE || up.length() < TOLERANCE {
            return Err(invalid("camera front and up must be non-zero".into()));
        }
        if front.normalized().cross(&up.normalized()).length() < TOLERANCE {
            return Err(invalid("camera front and up must not be parallel".into()));
        }

        let angle_of_view = camera_json.angle_of_view
            .unwrap_or(DEFAULT_ANGLE_OF_VIEW);
        if !(angle_of_view > 0.0 && angle_of_view < std::f64::consts::FRAC_PI_2) {
            return Err(invalid(format!("angle of view {} is out of range",
                angle_of_view)));
        }

        let mut camera = Camera::new(
            camera_json.position.into(),
            front,
            up,
            camera_json.width,
            camera_json.height,
        );
        camera.angle_of_view = angle_of_view;
        camera.max_render_depth = camera_json.max_render_depth
            .unwrap_or(DEFAULT_MAX_RENDER_DEPTH);

        Ok(camera)
    }
}

impl From<LightJson> for PointLight {
    fn from(light_json: LightJson) -> PointLight {
        let color = light_json.color.map(Rgb::from).unwrap_or_else(Rgb::white);
        PointLight::new(light_json.position.into(), color)
    }
}

impl From<MaterialJson> for Material {
    fn from(material_json: MaterialJson) -> Material {
        Material {
            color: material_json.color.into(),
            ambient: material_json.ambient,
            lambert: material_json.lambert,
            specular: material_json.specular,
        }
    }
}

impl TryFrom<SceneJson> for SceneDescription {
    type Error = TracerError;

    fn try_from(scene_json: SceneJson) -> Result<SceneDescription> {
        let mut scene = Scene::new();
        let mut outputs = Vec::with_capacity(scene_json.cameras.len());

        for camera_json in scene_json.cameras.into_iter() {
            outputs.push(camera_json.output.clone());
            scene.add_camera(Camera::try_from(camera_json)?);
        }

        for light_json in scene_json.lights.into_iter() {
            scene.add_light(light_json.into());
        }

        for shape_json in scene_json.shapes.into_iter() {
            match shape_json {
                ShapeJson::Sphere { center, radius, material } => {
                    if !(radius > 0.0 && radius.is_finite()) {
                        return Err(invalid(format!(
                            "sphere radius must be positive, got {}", radius)));
                    }

                    let material = material.map(Material::from)
                        .unwrap_or_default();
                    scene.add_object(
                        Sphere::with_material(center.into(), radius, material));
                },
            }
        }

        Ok(SceneDescription { scene, outputs })
    }
}

#[cfg(test)]
const EXAMPLE_SCENE: &str = r#"{
    "cameras": [
        {
            "position": [0, 0, -10],
            "front": [0, 0, 1],
            "up": [0, 1, 0],
            "width": 64,
            "height": 48,
            "angle_of_view": 0.5,
            "output": "front.ppm"
        },
        {
            "position": [10, 0, 0],
            "front": [-1, 0, 0],
            "up": [0, 2, 0],
            "width": 8,
            "height": 8
        }
    ],
    "lights": [
        { "position": [-5, 5, -5] },
        { "position": [5, 5, -5], "color": [255, 0, 0] }
    ],
    "shapes": [
        {
            "type": "sphere",
            "center": [0, 0, 0],
            "radius": 2,
            "material": { "color": [200, 30, 30], "ambient": 0.1,
                "lambert": 0.6, "specular": 0.3 }
        },
        { "type": "sphere", "center": [3, 1, 2], "radius": 0.5 }
    ]
}"#;

#[test]
fn load_example_scene() {
    let d = SceneDescription::from_json(EXAMPLE_SCENE).unwrap();
    let scene = &d.scene;

    assert_eq!(scene.cameras.len(), 2);
    assert_eq!(scene.lights.len(), 2);
    assert_eq!(scene.objects.len(), 2);
    assert_eq!(d.outputs, vec![Some(PathBuf::from("front.ppm")), None]);

    let front = &scene.cameras[0];
    assert_eq!(front.width, 64);
    assert_eq!(front.angle_of_view, 0.5);
    assert_eq!(front.max_render_depth, DEFAULT_MAX_RENDER_DEPTH);
    assert_eq!(scene.cameras[1].angle_of_view, DEFAULT_ANGLE_OF_VIEW);

    assert_eq!(scene.lights[0].color, Rgb::white());
    assert_eq!(scene.lights[1].color, Rgb::rgb(255, 0, 0));

    use crate::shape::Shape;
    assert_eq!(scene.objects[0].material().color, Rgb::rgb(200, 30, 30));
    assert_eq!(*scene.objects[1].material(), Material::default());
    assert_eq!(scene.objects[1].position(), Vec3::new(3.0, 1.0, 2.0));
}

#[test]
fn empty_scene_is_valid() {
    let d = SceneDescription::from_json("{}").unwrap();

    assert!(d.scene.cameras.is_empty());
    assert!(d.outputs.is_empty());
}

#[test]
fn reject_parallel_camera_vectors() {
    let text = r#"{ "cameras": [{ "position": [0, 0, 0], "front": [0, 1, 0],
        "up": [0, 3, 0], "width": 4, "height": 4 }] }"#;

    match SceneDescription::from_json(text) {
        Err(TracerError::InvalidScene(_)) => {},
        other => panic!("expected invalid scene, got {:?}", other),
    }
}

#[test]
fn reject_zero_front() {
    let text = r#"{ "cameras": [{ "position": [0, 0, 0], "front": [0, 0, 0],
        "up": [0, 1, 0], "width": 4, "height": 4 }] }"#;

    assert!(matches!(SceneDescription::from_json(text),
        Err(TracerError::InvalidScene(_))));
}

#[test]
fn reject_non_positive_radius() {
    let text = r#"{ "shapes": [{ "type": "sphere", "center": [0, 0, 0],
        "radius": 0 }] }"#;

    assert!(matches!(SceneDescription::from_json(text),
        Err(TracerError::InvalidScene(_))));
}

#[test]
fn reject_unknown_shape() {
    let text = r#"{ "shapes": [{ "type": "cube", "center": [0, 0, 0] }] }"#;

    assert!(matches!(SceneDescription::from_json(text),
        Err(TracerError::Json(_))));
}
