//! Destinations for encoded renders.

use crate::error::{RenderError, Result};
use crate::render::RenderOutput;
use crate::resource_pack::ResourceLocation;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Receives each model's encoded output.
pub trait OutputSink {
    fn write(&mut self, id: &ResourceLocation, output: &RenderOutput) -> Result<()>;
}

/// Writes `<root>/<namespace>/<path>.<png|gif>`, creating directories as needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Output file for a model.
    ///
    /// Ids whose segments are not plain file names are rejected, so every
    /// path stays under the root.
    pub fn path_for(&self, id: &ResourceLocation, output: &RenderOutput) -> Result<PathBuf> {
        let invalid = || RenderError::InvalidOutputPath(id.to_string());

        let segments: Vec<&str> = id.path.split('/').collect();
        let Some((file_stem, directories)) = segments.split_last() else {
            return Err(invalid());
        };
        if !is_plain_segment(&id.namespace)
            || !segments.iter().all(|segment| is_plain_segment(segment))
        {
            return Err(invalid());
        }

        let mut path = self.root.join(&id.namespace);
        path.extend(directories);
        // Appended, so `gear.v2` keeps its own file
        path.push(format!("{}.{}", file_stem, output.format.extension()));
        Ok(path)
    }
}

impl OutputSink for DirectorySink {
    fn write(&mut self, id: &ResourceLocation, output: &RenderOutput) -> Result<()> {
        let path = self.path_for(id, output)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &output.bytes)?;
        debug!(model = %id, path = %path.display(), bytes = output.bytes.len(), "wrote render");
        Ok(())
    }
}

fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(|c| c == '\\' || c == ':')
        && !Path::new(segment).is_absolute()
}

/// Keeps every output in memory, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub outputs: Vec<(ResourceLocation, RenderOutput)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ResourceLocation) -> Option<&RenderOutput> {
        self.outputs
            .iter()
            .find(|(stored, _)| stored == id)
            .map(|(_, output)| output)
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, id: &ResourceLocation, output: &RenderOutput) -> Result<()> {
        self.outputs.push((id.clone(), output.clone()));
        Ok(())
    }
}
