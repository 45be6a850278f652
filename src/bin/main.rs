//! Model Icon Renderer CLI
//!
//! Render Minecraft block and item models from a resource pack into icons.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use model_icon_renderer::{
    load_resource_pack, AssetSource, BatchRenderer, DirectorySink, RenderConfig, RenderMode,
    ResourceLocation,
};
use std::path::PathBuf;
use tracing::{info, warn, Level};

#[derive(Parser)]
#[command(name = "model-icon-renderer")]
#[command(
    author,
    version,
    about = "Render Minecraft models into icon images and turntable GIFs",
    long_about = None
)]
struct Cli {
    /// Log every pipeline stage
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render models from a resource pack
    Render {
        /// Path to resource pack (ZIP or directory)
        #[arg(short, long)]
        pack: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Render mode
        #[arg(short, long, value_enum, default_value = "still")]
        mode: Mode,

        /// Output size in pixels (square)
        #[arg(short, long, default_value = "256")]
        size: u32,

        /// Only render models whose id starts with this prefix (repeatable)
        #[arg(short, long)]
        filter: Vec<String>,

        /// Disable per-direction face shading
        #[arg(long)]
        no_shading: bool,
    },

    /// List the models in a resource pack
    List {
        /// Path to resource pack (ZIP or directory)
        #[arg(short, long)]
        pack: PathBuf,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// One PNG per model
    Still,
    /// 60-frame looping GIF per model
    Turntable,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Still => RenderMode::Still,
            Mode::Turntable => RenderMode::Turntable,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    match cli.command {
        Commands::Render {
            pack,
            output,
            mode,
            size,
            filter,
            no_shading,
        } => {
            let config = RenderConfig::default()
                .with_mode(mode.into())
                .with_size(size)
                .with_face_shading(!no_shading);
            render_pack(&pack, &output, config, &filter)?;
        }
        Commands::List { pack } => {
            list_models(&pack)?;
        }
    }

    Ok(())
}

fn select_models(source: &dyn AssetSource, filters: &[String]) -> Vec<ResourceLocation> {
    source
        .model_ids()
        .into_iter()
        .filter(|id| {
            if filters.is_empty() {
                return true;
            }
            // Match both "minecraft:block/" and "block/"
            let name = id.to_string();
            filters.iter().any(|prefix| {
                name.starts_with(prefix.as_str()) || id.path.starts_with(prefix.as_str())
            })
        })
        .collect()
}

fn render_pack(
    pack_path: &PathBuf,
    output: &PathBuf,
    config: RenderConfig,
    filters: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    info!(pack = %pack_path.display(), "loading resource pack");
    let pack = load_resource_pack(pack_path)?;

    let ids = select_models(&pack, filters);
    if ids.is_empty() {
        warn!("no models matched");
        return Ok(());
    }
    info!(models = ids.len(), mode = %config.mode, "rendering");

    let pb = ProgressBar::new(ids.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.green/blue}] {pos}/{len} models ({percent}%) {msg}")?
            .progress_chars("█▉▊▋▌▍▎▏"),
    );

    let mut renderer = BatchRenderer::new(&pack, config);
    let mut sink = DirectorySink::new(output);
    let (_, summary) = renderer.render_all(ids, &mut sink, |report| {
        pb.set_message(report.id.to_string());
        pb.inc(1);
    });

    pb.finish_with_message("done");

    println!("Rendered {} of {} models", summary.done, summary.total);
    if summary.failed() > 0 {
        println!(
            "  Failed: {} load, {} assembly, {} capture",
            summary.load_failed, summary.assembly_failed, summary.capture_failed
        );
    }
    println!("Output written to {}", output.display());

    Ok(())
}

fn list_models(pack_path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let pack = load_resource_pack(pack_path)?;

    println!("Resource Pack: {}", pack_path.display());
    println!("  Namespaces: {:?}", pack.namespaces());
    println!("  Models: {}", pack.model_count());
    println!("  Textures: {}", pack.texture_count());
    println!();

    for id in pack.model_ids() {
        println!("{}", id);
    }

    Ok(())
}
