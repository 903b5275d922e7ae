use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::Arc,
    thread::JoinHandle,
};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::{
    diagram::{model::Frame, svg::SvgLayout},
    foundation::core::FrameId,
    foundation::error::{SlideSyncError, SlideSyncResult},
    narration::slide::Slide,
    render::{d2::D2Rasterizer, svg::SvgRasterizer},
};

/// Turns a frame into an image file.
///
/// Implementations must be shareable across worker threads; parallel dispatch calls
/// [`FrameRasterizer::rasterize`] concurrently with distinct output paths.
pub trait FrameRasterizer: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// File extension of produced images (without the dot).
    fn extension(&self) -> &'static str;

    /// Render `frame` to `out_path`, creating parent directories as needed.
    fn rasterize(&self, frame: &Frame, out_path: &Path) -> SlideSyncResult<()>;
}

/// Available rasterizer backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterBackend {
    /// In-process SVG rendering (usvg/resvg).
    #[default]
    Svg,
    /// External `d2` CLI.
    D2,
}

impl std::str::FromStr for RasterBackend {
    type Err = SlideSyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "d2" => Ok(Self::D2),
            other => Err(SlideSyncError::validation(format!(
                "unknown raster backend '{other}' (expected 'svg' or 'd2')"
            ))),
        }
    }
}

/// Create a rasterizer for `backend`.
pub fn create_rasterizer(backend: RasterBackend, layout: SvgLayout) -> Arc<dyn FrameRasterizer> {
    match backend {
        RasterBackend::Svg => Arc::new(SvgRasterizer::new(layout)),
        RasterBackend::D2 => Arc::new(D2Rasterizer::new()),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Worker configuration for frame rasterization.
pub struct RenderThreading {
    /// Rasterize frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Output settings for frame rasterization.
pub struct RenderOpts {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Rasterizer backend.
    pub backend: RasterBackend,
    /// Worker configuration.
    pub threading: RenderThreading,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            backend: RasterBackend::Svg,
            threading: RenderThreading::default(),
        }
    }
}

impl RenderOpts {
    /// Check option invariants.
    pub fn validate(&self) -> SlideSyncResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SlideSyncError::validation(format!(
                "render size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.threading.threads == Some(0) {
            return Err(SlideSyncError::validation(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }

    /// SVG canvas geometry for these dimensions.
    pub fn layout(&self) -> SvgLayout {
        SvgLayout {
            width: self.width,
            height: self.height,
            ..SvgLayout::default()
        }
    }

    /// Create the configured rasterizer.
    pub fn rasterizer(&self) -> Arc<dyn FrameRasterizer> {
        create_rasterizer(self.backend, self.layout())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Outcome of rasterizing a run's frames.
pub struct RasterReport {
    /// Files written, by frame.
    pub rendered: BTreeMap<FrameId, PathBuf>,
    /// Frames that failed and were omitted.
    pub failed: Vec<FrameId>,
}

impl RasterReport {
    /// Drop failed frames from their slides so the timeline skips them.
    pub fn retain_rendered(&self, slides: &mut [Slide]) {
        if self.failed.is_empty() {
            return;
        }
        let failed: HashSet<FrameId> = self.failed.iter().copied().collect();
        for slide in slides {
            let index = slide.index;
            slide.frames.retain(|f| {
                !failed.contains(&FrameId {
                    slide: index,
                    step: f.step,
                })
            });
        }
    }
}

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> SlideSyncResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Rasterize every frame of every slide into `out_dir`.
///
/// Files are named `slide_{slide:03}_frame_{step:02}.<ext>`. A frame that fails is logged and
/// removed from its slide; it never aborts the run. Errors are returned only for an invalid
/// threading configuration.
#[tracing::instrument(skip(slides, rasterizer), fields(backend = rasterizer.name()))]
pub fn rasterize_slides(
    slides: &mut [Slide],
    rasterizer: &dyn FrameRasterizer,
    out_dir: &Path,
    threading: &RenderThreading,
) -> SlideSyncResult<RasterReport> {
    let jobs: Vec<(FrameId, &Frame, PathBuf)> = slides
        .iter()
        .flat_map(|slide| {
            slide.frames.iter().map(|frame| {
                let id = slide.frame_id(frame.step);
                let path = out_dir.join(id.file_name(rasterizer.extension()));
                (id, frame, path)
            })
        })
        .collect();

    let results: Vec<SlideSyncResult<()>> = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            jobs.par_iter()
                .map(|(_, frame, path)| rasterizer.rasterize(frame, path))
                .collect()
        })
    } else {
        jobs.iter()
            .map(|(_, frame, path)| rasterizer.rasterize(frame, path))
            .collect()
    };

    let mut report = RasterReport::default();
    for ((id, _, path), result) in jobs.into_iter().zip(results) {
        match result {
            Ok(()) => {
                report.rendered.insert(id, path);
            }
            Err(e) => {
                tracing::warn!(frame = %id, error = %e, "frame rasterization failed; omitting frame");
                report.failed.push(id);
            }
        }
    }

    report.retain_rendered(slides);
    tracing::debug!(
        rendered = report.rendered.len(),
        failed = report.failed.len(),
        "rasterized frames"
    );
    Ok(report)
}

/// Rasterize on a background thread without blocking the caller.
///
/// The thread works on its own copy of the slides; apply the joined report with
/// [`RasterReport::retain_rendered`] if the caller needs the pruned frame lists. Failures are only
/// logged. Returns `None` when the thread could not be started.
pub fn spawn_rasterize(
    slides: Vec<Slide>,
    rasterizer: Arc<dyn FrameRasterizer>,
    out_dir: PathBuf,
    threading: RenderThreading,
) -> Option<JoinHandle<RasterReport>> {
    let spawned = std::thread::Builder::new()
        .name("slidesync-raster".to_owned())
        .spawn(move || {
            let mut slides = slides;
            match rasterize_slides(&mut slides, rasterizer.as_ref(), &out_dir, &threading) {
                Ok(report) => report,
                Err(e) => {
                    tracing::warn!(error = %e, "background rasterization failed");
                    RasterReport::default()
                }
            }
        });

    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "failed to start background rasterization");
            None
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> SlideSyncResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SlideSyncError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SlideSyncError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/rasterizer.rs"]
mod tests;
