//! confquery CLI — build configurational objects for a labeled query image.

use clap::{Args, Parser, Subcommand};
use confquery::{CameraGrid, CameraSpace, ConfQuery, DepthScene, VisualStyle};
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "confquery")]
#[command(
    about = "Compute per-camera configurational objects (bearing, ground distance, land class) for a labeled query image"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the query and write a JSON report.
    Run(CliRunArgs),

    /// List the valid cameras of a camera grid.
    Cameras {
        /// Camera-grid JSON (confquery.cameras.v1).
        #[arg(long)]
        cameras: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct CliRunArgs {
    /// Labeled scene JSON (confquery.scene.v1).
    #[arg(long)]
    scene: PathBuf,

    /// Camera-grid JSON (confquery.cameras.v1).
    #[arg(long)]
    cameras: PathBuf,

    /// Path to write the query report (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Query image to draw overlays on. Requires --overlay-dir.
    #[arg(long, requires = "overlay_dir")]
    image: Option<PathBuf>,

    /// Folder for per-camera overlays.
    #[arg(long, requires = "image")]
    overlay_dir: Option<PathBuf>,

    /// Folder for per-camera top views.
    #[arg(long)]
    top_view_dir: Option<PathBuf>,

    /// File-name prefix of the top views.
    #[arg(long, default_value = "top_view")]
    top_view_prefix: String,

    /// Rendering style JSON; missing fields keep their defaults.
    #[arg(long)]
    style: Option<PathBuf>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_query(&args),
        Commands::Cameras { cameras } => run_cameras(&cameras),
    }
}

fn load_grid(path: &Path) -> CliResult<CameraGrid> {
    CameraGrid::from_json_file(path).map_err(|e| -> CliError {
        format!("Failed to load cameras {}: {}", path.display(), e).into()
    })
}

// ── cameras ────────────────────────────────────────────────────────────

fn run_cameras(path: &Path) -> CliResult<()> {
    let grid = load_grid(path)?;
    let [ni, nj] = grid.image_size();
    println!("camera grid {}", path.display());
    println!("  image size:    {}x{}", ni, nj);
    println!("  altitude:      {}", grid.altitude());
    println!("  poses:         {}", grid.len());
    println!("  valid cameras: {}", grid.valid_indices().len());
    for &i in grid.valid_indices() {
        let label = grid.camera_string(i).unwrap_or_default();
        println!("  {:>6}  {}", i, label);
    }
    Ok(())
}

// ── run ────────────────────────────────────────────────────────────────

fn run_query(args: &CliRunArgs) -> CliResult<()> {
    tracing::info!("Loading scene: {}", args.scene.display());
    let scene = DepthScene::from_json_file(&args.scene).map_err(|e| -> CliError {
        format!("Failed to load scene {}: {}", args.scene.display(), e).into()
    })?;
    let grid = load_grid(&args.cameras)?;

    if grid.image_size() != [scene.ni, scene.nj] {
        tracing::warn!(
            "camera image size {:?} differs from scene size {}x{}",
            grid.image_size(),
            scene.ni,
            scene.nj
        );
    }

    let query = ConfQuery::new(&grid, scene)?;
    let n_objects: usize = query.configurations().iter().map(|c| c.len()).sum();
    tracing::info!(
        "Built {} configurations ({} objects in total)",
        query.n_cameras(),
        n_objects
    );

    let json = serde_json::to_string_pretty(&query.report())?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Report written to {}", args.out.display());

    let style = match &args.style {
        Some(path) => VisualStyle::from_json_file(path).map_err(|e| -> CliError {
            format!("Failed to load style {}: {}", path.display(), e).into()
        })?,
        None => VisualStyle::default(),
    };

    if let (Some(image), Some(dir)) = (&args.image, &args.overlay_dir) {
        query.visualize_reference_objects(image, dir, &style)?;
    }
    if let Some(dir) = &args.top_view_dir {
        query.generate_top_views(dir, &args.top_view_prefix, &style)?;
    }

    Ok(())
}
