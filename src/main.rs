use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use scop::{
    app::{ViewerApp, ViewerConfig},
    mesh::{load_mesh, LoadOptions, Mesh},
};

/// View a Wavefront OBJ mesh.
///
/// Left-drag orbits, shift+left-drag pans, the wheel zooms, shift+C resets
/// the camera and Escape quits.
#[derive(Parser, Debug)]
#[command(name = "scop", version, about)]
struct Args {
    /// OBJ file to load
    path: PathBuf,

    /// Keep duplicate vertices instead of welding them
    #[arg(long)]
    no_weld: bool,

    /// Give every face its own normal
    #[arg(long)]
    flat_normals: bool,

    /// Discard normals stored in the file and compute them
    #[arg(long)]
    ignore_normals: bool,

    /// Skip tangent generation
    #[arg(long)]
    no_tangents: bool,

    /// Skip generated texture coordinates when the file has none
    #[arg(long)]
    no_tex_coords: bool,

    /// Print mesh statistics and exit without opening a window
    #[arg(long)]
    info: bool,

    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,
}

impl Args {
    fn load_options(&self) -> LoadOptions {
        let mut options = LoadOptions::default();
        options.set(LoadOptions::WELD, !self.no_weld);
        options.set(LoadOptions::COMPUTE_TANGENTS, !self.no_tangents);
        options.set(LoadOptions::COMPUTE_TEX_COORDS, !self.no_tex_coords);
        options.set(LoadOptions::IGNORE_SUPPLIED_NORMALS, self.ignore_normals);
        if self.flat_normals {
            options.remove(LoadOptions::SMOOTH_NORMALS);
            options.insert(LoadOptions::FLAT_NORMALS);
        }
        options
    }

    fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            width: self.width.max(1),
            height: self.height.max(1),
            ..ViewerConfig::default()
        }
    }
}

fn log_statistics(mesh: &Mesh) {
    let extent = mesh.extent();
    log::info!("vertices:  {}", mesh.vertices.len());
    log::info!("indices:   {}", mesh.indices.len());
    log::info!("triangles: {}", mesh.triangle_count());
    log::info!(
        "bounds:    [{:.4}, {:.4}, {:.4}] .. [{:.4}, {:.4}, {:.4}]",
        mesh.aabb_min.x,
        mesh.aabb_min.y,
        mesh.aabb_min.z,
        mesh.aabb_max.x,
        mesh.aabb_max.y,
        mesh.aabb_max.z
    );
    log::info!("extent:    {:.4} x {:.4} x {:.4}", extent.x, extent.y, extent.z);
}

fn run(args: Args) -> Result<()> {
    let options = args.load_options();
    log::debug!("Load options: {:?}", options);

    let mesh = load_mesh(&args.path, options)?;

    if args.info {
        log_statistics(&mesh);
        return Ok(());
    }

    let name = args
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());

    let mut app = ViewerApp::new(args.viewer_config())?;
    app.add_mesh(&name, mesh);
    app.run()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run(args).inspect_err(|e| log::error!("{:#}", e))
}
