pub mod consts;
pub mod error;

pub mod vector;
pub mod color;
pub mod ray;

pub mod shape;
pub mod sphere;
pub mod light;

pub mod canvas;
pub mod camera;
pub mod scene;
pub mod parallel;

pub mod scene_json;
