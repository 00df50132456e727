use std::thread;
use std::sync::mpsc;
use std::sync::Mutex;

use tracing::{ debug, info };

use crate::camera::{ Camera, RenderStatus, View };
use crate::color::Rgb;
use crate::scene::Scene;

pub enum Message {
    Row(usize),
    Terminate,
}

/// A rendered row, sent from a worker back to the renderer.
struct RowResult {
    row: usize,
    pixels: Vec<Rgb>,
}

fn worker_loop(scene: &Scene, view: &View, width: usize, max_depth: u32,
    receiver: &Mutex<mpsc::Receiver<Message>>,
    results: mpsc::Sender<RowResult>) {
    loop {
        // Obtain the message being executed.
        let message = receiver.lock().unwrap().recv();

        match message {
            Ok(Message::Row(row)) => {
                let pixels = (0..width)
                    .map(|column| scene.pixel_color(view, row, column, max_depth))
                    .collect();

                if results.send(RowResult { row, pixels }).is_err() {
                    break;
                }
            },

            // Exit the worker loop on request, or once the queue is gone.
            Ok(Message::Terminate) | Err(_) => break,
        }
    }
}

/// Renders a camera with `threads` workers, each computing whole rows.
///
/// Pixels are independent, so the result is identical to `Scene::render`.
/// Only the calling thread writes to the camera.
pub fn render_parallel(scene: &Scene, camera: &mut Camera, threads: usize) {
    // There should be at least one thread to run workers.
    let threads = threads.max(1);
    let width = camera.width;
    let height = camera.height;
    let max_depth = camera.max_render_depth;

    camera.status = RenderStatus::Rendering;
    info!(width, height, threads, "rendering camera in parallel");

    let view = camera.view();
    let (sender, receiver) = mpsc::channel();
    let receiver = Mutex::new(receiver);
    let (result_sender, result_receiver) = mpsc::channel();

    thread::scope(|s| {
        for _ in 0..threads {
            let results = result_sender.clone();
            let receiver = &receiver;
            let view = &view;
            s.spawn(move || {
                worker_loop(scene, view, width, max_depth, receiver, results)
            });
        }
        drop(result_sender);

        for row in 0..height {
            sender.send(Message::Row(row)).unwrap();
        }
        for _ in 0..threads {
            sender.send(Message::Terminate).unwrap();
        }

        for RowResult { row, pixels } in result_receiver.iter() {
            for (column, color) in pixels.into_iter().enumerate() {
                camera.set_pixel(row, column, color);
            }
        }
    });

    camera.status = RenderStatus::Done;
    debug!("parallel render finished");
}

#[test]
fn parallel_matches_serial() {
    use crate::light::PointLight;
    use crate::shape::Material;
    use crate::sphere::Sphere;
    use crate::vector::Vec3;

    let mut scene = Scene::new();
    scene.add_object(Sphere::with_material(Vec3::new(0.0, 0.0, 6.0), 2.0,
        Material { color: Rgb::rgb(255, 60, 60), ambient: 0.2, lambert: 0.5,
            specular: 0.3 }));
    scene.add_object(Sphere::with_material(Vec3::new(2.5, 1.0, 4.0), 0.8,
        Material { color: Rgb::rgb(60, 60, 255), ambient: 0.1, lambert: 0.4,
            specular: 0.5 }));
    scene.add_light(PointLight::white(Vec3::new(-5.0, 5.0, 0.0)));

    let camera = Camera::new(
        Vec3::zeros(),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 1.0, 0.0),
        16,
        9,
    );

    let mut serial = camera.clone();
    scene.render(&mut serial);

    let mut parallel = camera;
    render_parallel(&scene, &mut parallel, 3);

    assert_eq!(parallel.status, RenderStatus::Done);
    assert_eq!(serial.canvas(), parallel.canvas());
}
