use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::ImageFormat;
use tracing::info;

use crate::render::font::FontChain;
use crate::render::{render_icon, IconStyle};

/// File name for the icon of the given size, e.g. `icon48.png`.
pub fn icon_file_name(size: u32) -> String {
    format!("icon{}.png", size)
}

/// Render every size and write it as PNG into `output_dir`, replacing existing files.
///
/// Stops at the first size that cannot be written. Returns the written paths in order.
pub fn generate_all(
    sizes: &[u32],
    output_dir: &Path,
    style: &IconStyle,
    fonts: &FontChain,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut written = Vec::with_capacity(sizes.len());
    for &size in sizes {
        info!("Generating {}x{} icon...", size, size);
        let icon = render_icon(size, style, fonts);

        let path = output_dir.join(icon_file_name(size));
        icon.save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved: {}", path.display());
        written.push(path);
    }

    info!("All icons generated successfully!");
    Ok(written)
}
