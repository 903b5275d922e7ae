use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::{
    diagram::{
        model::Frame,
        svg::{SvgLayout, frame_to_svg},
    },
    foundation::error::{SlideSyncError, SlideSyncResult},
    render::rasterizer::{FrameRasterizer, ensure_parent_dir},
};

/// In-process rasterizer: frame -> SVG -> PNG via usvg/resvg.
pub struct SvgRasterizer {
    layout: SvgLayout,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgRasterizer {
    /// Build a rasterizer with system fonts loaded.
    pub fn new(layout: SvgLayout) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self {
            layout,
            fontdb: Arc::new(db),
        }
    }

    /// Canvas geometry used for every frame.
    pub fn layout(&self) -> &SvgLayout {
        &self.layout
    }

    /// Rasterize a frame into straight-alpha RGBA8 pixels over an opaque white background.
    pub fn render_rgba8(&self, frame: &Frame) -> SlideSyncResult<Vec<u8>> {
        let svg = frame_to_svg(frame, &self.layout);
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts).context("parse frame svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(self.layout.width, self.layout.height)
            .ok_or_else(|| SlideSyncError::render("failed to allocate frame pixmap"))?;
        pixmap.fill(resvg::tiny_skia::Color::WHITE);

        let sx = self.layout.width as f32 / tree.size().width();
        let sy = self.layout.height as f32 / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        // Opaque background: premultiplied and straight alpha coincide.
        Ok(pixmap.data().to_vec())
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new(SvgLayout::default())
    }
}

impl FrameRasterizer for SvgRasterizer {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn rasterize(&self, frame: &Frame, out_path: &Path) -> SlideSyncResult<()> {
        let data = self.render_rgba8(frame)?;
        ensure_parent_dir(out_path)?;
        image::save_buffer_with_format(
            out_path,
            &data,
            self.layout.width,
            self.layout.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", out_path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
