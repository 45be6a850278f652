//! # Model Icon Renderer
//!
//! A Rust library for rendering Minecraft block and item models into icons.
//!
//! ## Overview
//!
//! This library takes a resource pack as input, resolves each model's parent
//! chain and texture variables, builds its cuboid elements into one mesh and
//! rasterizes it with a fixed orthographic camera. Each model becomes either
//! a still PNG or a 60-frame looping GIF turntable.
//!
//! ## Quick Start
//!
//! ```ignore
//! use model_icon_renderer::{load_resource_pack, BatchRenderer, DirectorySink, RenderConfig};
//! use model_icon_renderer::resource_pack::AssetSource;
//!
//! // Load a resource pack
//! let pack = load_resource_pack("path/to/pack.zip")?;
//!
//! // Render every model to out/<namespace>/<path>.png
//! let mut renderer = BatchRenderer::new(&pack, RenderConfig::default());
//! let mut sink = DirectorySink::new("out");
//! let (reports, summary) = renderer.render_all(pack.model_ids(), &mut sink, |_| {});
//! ```
//!
//! ## Single Models
//!
//! ```ignore
//! use model_icon_renderer::{render_model, RenderConfig, RenderMode};
//!
//! let config = RenderConfig::default().with_mode(RenderMode::Turntable);
//! let gif = render_model(&pack, "minecraft:block/furnace", &config)?;
//! ```

pub mod error;
pub mod mesher;
pub mod pipeline;
pub mod render;
pub mod resolver;
pub mod resource_pack;
pub mod sink;
pub mod types;

// Re-export main types for convenience
pub use error::{RenderError, Result};
pub use mesher::{AssembledMesh, Mesh, Mesher, TextureBinding, Vertex};
pub use pipeline::{BatchRenderer, BatchSummary, ModelReport, RenderStage};
pub use render::{
    Camera, OutputFormat, RenderConfig, RenderContext, RenderMode, RenderOutput,
};
pub use resolver::{ModelKind, ModelResolver, ResolvedModel, TextureResolver};
pub use resource_pack::{
    AssetSource, BlockModel, ModelElement, ModelFace, ResourceLocation, ResourcePack,
};
pub use sink::{DirectorySink, MemorySink, OutputSink};
pub use types::{Axis, BoundingBox, Direction, ElementRotation};

/// Load a resource pack from a file path (ZIP or directory).
pub fn load_resource_pack<P: AsRef<std::path::Path>>(path: P) -> Result<ResourcePack> {
    resource_pack::loader::load_from_path(path)
}

/// Load a resource pack from ZIP bytes.
pub fn load_resource_pack_from_bytes(data: &[u8]) -> Result<ResourcePack> {
    resource_pack::loader::load_from_bytes(data)
}

/// Resolve, assemble and capture a single model.
///
/// Unlike [`BatchRenderer`], errors are returned instead of reported.
pub fn render_model(
    source: &dyn AssetSource,
    model_id: &str,
    config: &RenderConfig,
) -> Result<RenderOutput> {
    let resolved = ModelResolver::new(source).resolve(model_id)?;
    let assembled = Mesher::new(source)
        .with_margin(config.margin)
        .mesh(&resolved)?;

    let camera = Camera::orbit(config.azimuth_deg, config.elevation_deg);
    let mut context = RenderContext::new(assembled);
    render::capture(&mut context, &camera, config)
}
