//! Resource pack loading from ZIP files and directories.

use super::ResourcePack;
use crate::error::{RenderError, Result};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Load a resource pack from a file path.
///
/// Supports both ZIP files and directories containing `assets/`.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ResourcePack> {
    let path = path.as_ref();

    let pack = if path.is_dir() {
        load_from_directory(path)?
    } else {
        let data = std::fs::read(path)?;
        load_from_bytes(&data)?
    };

    debug!(
        path = %path.display(),
        models = pack.model_count(),
        textures = pack.texture_count(),
        "loaded resource pack"
    );
    Ok(pack)
}

/// Load a resource pack from bytes (ZIP data).
pub fn load_from_bytes(data: &[u8]) -> Result<ResourcePack> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut pack = ResourcePack::new();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        let Some(enclosed) = file.enclosed_name() else {
            warn!(entry = file.name(), "skipping entry outside the archive root");
            continue;
        };
        let file_path = enclosed.to_string_lossy().replace('\\', "/");

        // Parse the path to determine namespace and type
        let Some((namespace, asset_type, asset_path)) = parse_asset_path(&file_path) else {
            continue;
        };

        match asset_type {
            "models" if asset_path.ends_with(".json") => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    // Log warning but continue
                    warn!(namespace, path = asset_path, error = %e, "skipping unreadable model");
                    continue;
                }
                pack.add_model(namespace, asset_path.trim_end_matches(".json"), contents);
            }
            "textures" if asset_path.ends_with(".png") => {
                let mut data = Vec::new();
                if let Err(e) = file.read_to_end(&mut data) {
                    warn!(namespace, path = asset_path, error = %e, "skipping unreadable texture");
                    continue;
                }
                pack.add_texture(namespace, asset_path.trim_end_matches(".png"), data);
            }
            _ => {}
        }
    }

    Ok(pack)
}

/// Load a resource pack from a directory.
fn load_from_directory(path: &Path) -> Result<ResourcePack> {
    let mut pack = ResourcePack::new();

    // Look for assets directory
    let assets_path = path.join("assets");
    if !assets_path.exists() {
        return Err(RenderError::InvalidResourcePack(
            "No assets directory found".to_string(),
        ));
    }

    // Iterate through namespaces
    for namespace_entry in std::fs::read_dir(&assets_path)? {
        let namespace_entry = namespace_entry?;
        if !namespace_entry.file_type()?.is_dir() {
            continue;
        }

        let namespace = namespace_entry.file_name().to_string_lossy().to_string();
        let namespace_path = namespace_entry.path();

        // Load models
        let models_path = namespace_path.join("models");
        if models_path.exists() {
            walk_files(&models_path, &models_path, "json", &mut |model_path, file| {
                match std::fs::read_to_string(file) {
                    Ok(contents) => pack.add_model(&namespace, model_path, contents),
                    Err(e) => warn!(
                        namespace = %namespace,
                        path = model_path,
                        error = %e,
                        "skipping unreadable model"
                    ),
                }
                Ok(())
            })?;
        }

        // Load textures
        let textures_path = namespace_path.join("textures");
        if textures_path.exists() {
            walk_files(&textures_path, &textures_path, "png", &mut |texture_path, file| {
                match std::fs::read(file) {
                    Ok(data) => pack.add_texture(&namespace, texture_path, data),
                    Err(e) => warn!(
                        namespace = %namespace,
                        path = texture_path,
                        error = %e,
                        "skipping unreadable texture"
                    ),
                }
                Ok(())
            })?;
        }
    }

    Ok(pack)
}

/// Parse an asset path from a ZIP file.
/// Returns (namespace, asset_type, asset_path) if valid.
fn parse_asset_path(file_path: &str) -> Option<(&str, &str, &str)> {
    // Only plain segments; `.` and `..` would let ids escape their namespace
    if file_path
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return None;
    }

    // Expected format: assets/{namespace}/{type}/{path}
    let parts: Vec<&str> = file_path.splitn(4, '/').collect();

    if parts.len() >= 4 && parts[0] == "assets" {
        Some((parts[1], parts[2], parts[3]))
    } else {
        None
    }
}

/// Visit files with the given extension under `dir`, recursively.
///
/// The handler receives the path relative to `base` with the extension
/// stripped and `/` separators, plus the full file path.
fn walk_files<F>(base: &Path, dir: &Path, extension: &str, handler: &mut F) -> Result<()>
where
    F: FnMut(&str, &Path) -> Result<()>,
{
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            walk_files(base, &path, extension, handler)?;
        } else if path.extension().map(|e| e == extension).unwrap_or(false) {
            let Ok(relative) = path.strip_prefix(base) else {
                continue;
            };
            let relative = relative
                .with_extension("")
                .to_string_lossy()
                .replace('\\', "/");

            handler(&relative, &path)?;
        }
    }
    Ok(())
}
