use std::path::PathBuf;
use std::process::ExitCode;

use bathyscope::{init_logging, Coordinator, DatasetKind, DisplayMode, Options, Structure};
use clap::Parser;
use pollster::FutureExt;

/// `bathyscope` - loads a depth surface, a track, and a point cloud from CSV
/// files and reports how they were aligned and framed.
///
/// Set `RUST_LOG=debug` to see centering shifts and framing details.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding `triangles.csv`, `track.csv`, and `points.csv`.
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// JSON file overriding the default options.
    #[arg(long, env = "BATHYSCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Show the mesh as a depth heatmap instead of an outline.
    #[arg(long)]
    heatmap: bool,

    /// Depth magnification; overrides the config file.
    #[arg(long)]
    magnification: Option<f32>,

    /// Lock the camera to a top-down view after loading.
    #[arg(long)]
    top_down: bool,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    log::debug!("starting with {args:?}");

    let mut options = match &args.config {
        Some(path) => match Options::from_json_file(path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("could not read config {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => Options::default(),
    };
    if let Some(magnification) = args.magnification {
        options.depth_magnification = magnification;
    }

    let mut scene = Coordinator::new(options);
    let results = scene.load_defaults(&args.dir).block_on();
    if results.iter().all(|(_, r)| r.is_err()) {
        log::error!("no dataset could be loaded from {}", args.dir.display());
        return ExitCode::FAILURE;
    }

    if args.heatmap {
        if let Err(e) = scene.set_display_mode(DisplayMode::Heatmap) {
            log::warn!("heatmap mode unavailable: {e}");
        }
    }
    if args.top_down {
        scene.lock_top_down();
    }

    for kind in DatasetKind::ALL {
        match scene.structure(kind) {
            Some(s) => println!("{kind}: {} position(s)", s.positions().len()),
            None => println!("{kind}: not loaded"),
        }
    }
    println!("alignment shift: {}", scene.alignment().shift());
    if let Some(framing) = scene.framing() {
        println!(
            "camera at {} looking at {} (near {:.3}, far {:.3})",
            scene.camera().position,
            scene.camera().target,
            framing.near,
            framing.far
        );
    }

    ExitCode::SUCCESS
}
