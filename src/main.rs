use std::path::{ Path, PathBuf };
use std::process;

use clap::Parser;
use tracing::{ error, info };
use tracing_subscriber::EnvFilter;

use mirror_tracer::consts::{ NUM_THREADS, OUT_FILE };
use mirror_tracer::error::Result;
use mirror_tracer::parallel::render_parallel;
use mirror_tracer::scene_json::SceneDescription;

/// Renders every camera of a JSON scene to PPM images.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to the JSON scene description.
    scene: PathBuf,

    /// Output file for cameras without their own output path.
    #[clap(short, long, default_value = OUT_FILE)]
    out: PathBuf,

    /// Number of render threads. 1 renders on the main thread.
    #[clap(short = 'j', long, default_value_t = NUM_THREADS)]
    threads: usize,

    /// Overrides every camera's maximum reflection depth.
    #[clap(long)]
    max_depth: Option<u32>,
}

/// The output path of the `index`th of `count` cameras without an explicit
/// output: `out` itself for a single camera, `out` with an index suffix
/// otherwise.
fn default_output(out: &Path, index: usize, count: usize) -> PathBuf {
    if count == 1 {
        return out.to_path_buf();
    }

    let stem = out.file_stem().and_then(|s| s.to_str()).unwrap_or("out");
    let name = match out.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}-{}.{}", stem, index, ext),
        None => format!("{}-{}", stem, index),
    };

    out.with_file_name(name)
}

fn run(args: Args) -> Result<()> {
    let SceneDescription { mut scene, outputs } = SceneDescription::load(&args.scene)?;

    if let Some(depth) = args.max_depth {
        for camera in scene.cameras.iter_mut() {
            camera.max_render_depth = depth;
        }
    }

    if args.threads > 1 {
        let mut cameras = std::mem::take(&mut scene.cameras);
        for camera in cameras.iter_mut() {
            render_parallel(&scene, camera, args.threads);
        }
        scene.cameras = cameras;
    } else {
        scene.render_all();
    }

    let count = scene.cameras.len();
    for (index, (camera, output)) in scene.cameras.iter().zip(outputs).enumerate() {
        let path = output.unwrap_or_else(|| default_output(&args.out, index, count));
        camera.canvas().save(&path)?;
        info!(path = %path.display(), "saved render");
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}
