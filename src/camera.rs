use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::consts::{ DEFAULT_ANGLE_OF_VIEW, DEFAULT_MAX_RENDER_DEPTH };
use crate::ray::Ray;
use crate::vector::Vec3;

/// Where a camera is in its single render pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RenderStatus {
    #[default]
    Pending,
    Rendering,
    Done,
}

/// A camera record for generating a canvas.
///
/// The camera looks along `front`, with `up` pointing toward the top of the
/// image. Neither needs to be unit length, but they must not be zero or
/// parallel.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,

    /// The horizontal size of the resultant canvas.
    pub width: usize,

    /// The vertical size of the resultant canvas.
    pub height: usize,

    /// Half the horizontal angle the camera can see, in radians.
    pub angle_of_view: f64,

    /// The deepest reflection that contributes to a pixel.
    pub max_render_depth: u32,

    pub status: RenderStatus,
    canvas: Canvas,
}

impl Camera {
    pub fn new(position: Vec3, front: Vec3, up: Vec3, width: usize,
        height: usize) -> Camera {
        Camera {
            position,
            front,
            up,
            width,
            height,
            angle_of_view: DEFAULT_ANGLE_OF_VIEW,
            max_render_depth: DEFAULT_MAX_RENDER_DEPTH,
            status: RenderStatus::Pending,
            canvas: Canvas::new(width, height),
        }
    }

    pub fn set_pixel(&mut self, row: usize, column: usize, color: Rgb) {
        self.canvas.write_pixel(row, column, color);
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Precomputes the basis and pixel offsets used to generate rays.
    pub fn view(&self) -> View {
        let front = self.front.normalized();
        let up = self.up.normalized();
        let right = front.cross(&up).normalized();

        let width = self.width as f64;
        let width_of_view = 2.0 * self.angle_of_view.tan();
        let pixel_size = width_of_view / width;

        // Offsets to the center of the top-left pixel
        let half_columns = (self.width / 2) as f64
            - 0.5 * (1 - self.width % 2) as f64;
        let half_rows = (self.height / 2) as f64
            - 0.5 * (1 - self.height % 2) as f64;
        let width_offset = -half_columns * pixel_size * right;
        let height_offset = half_rows * pixel_size * up;

        View {
            origin: self.position,
            front,
            up,
            right,
            pixel_size,
            width_offset,
            height_offset,
        }
    }
}

/// A camera's orthonormal basis and pixel grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct View {
    pub origin: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    pub pixel_size: f64,
    width_offset: Vec3,
    height_offset: Vec3,
}

impl View {
    /// The ray through the center of pixel (`row`, `column`).
    ///
    /// Columns increase to the right, rows increase downward.
    pub fn ray_for_pixel(&self, row: usize, column: usize) -> Ray {
        let width_direction = self.width_offset
            + column as f64 * self.pixel_size * self.right;
        let height_direction = self.height_offset
            - row as f64 * self.pixel_size * self.up;

        Ray::new(self.origin, self.front + width_direction + height_direction)
    }
}

#[cfg(test)]
fn test_camera(width: usize, height: usize) -> Camera {
    Camera::new(
        Vec3::zeros(),
        Vec3::new(0.0, 0.0, 2.0),
        Vec3::new(0.0, 3.0, 0.0),
        width,
        height,
    )
}

#[test]
fn basis_is_orthonormal() {
    let view = test_camera(4, 4).view();

    assert_eq!(view.front, Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(view.up, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(view.right, Vec3::new(-1.0, 0.0, 0.0));
}

#[test]
fn ray_through_center_of_odd_canvas() {
    let view = test_camera(11, 7).view();
    let r = view.ray_for_pixel(3, 5);

    assert_eq!(r.origin, Vec3::zeros());
    assert!(crate::vector::is_close(&r.direction, &Vec3::new(0.0, 0.0, 1.0),
        1e-12));
}

#[test]
fn pixel_size_from_angle_of_view() {
    let mut camera = test_camera(100, 50);
    camera.angle_of_view = std::f64::consts::PI / 4.0;

    // 2 * tan(pi / 4) spread over 100 pixels
    assert!((camera.view().pixel_size - 0.02).abs() < 1e-12);
}

#[test]
fn corner_rays_of_even_canvas() {
    use crate::vector::is_close;

    let mut camera = test_camera(2, 2);
    camera.angle_of_view = std::f64::consts::PI / 4.0;
    let view = camera.view();

    // pixel_size == 1, centers half a pixel from the axis
    let top_left = view.ray_for_pixel(0, 0).direction;
    let bottom_right = view.ray_for_pixel(1, 1).direction;

    assert!(is_close(&top_left, &Vec3::new(0.5, 0.5, 1.0), 1e-12));
    assert!(is_close(&bottom_right, &Vec3::new(-0.5, -0.5, 1.0), 1e-12));
}

#[test]
fn set_pixel_writes_canvas() {
    let mut camera = test_camera(3, 2);
    camera.set_pixel(1, 2, Rgb::white());

    assert_eq!(camera.canvas().read_pixel(1, 2), Some(Rgb::white()));
    assert_eq!(camera.status, RenderStatus::Pending);
}

#[test]
fn status_starts_pending() {
    assert_eq!(RenderStatus::default(), RenderStatus::Pending);
    assert_eq!(test_camera(1, 1).status, RenderStatus::default());
}
