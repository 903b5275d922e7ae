use crate::{foundation::error::SlideSyncResult, pipeline::opts::PipelineOpts};

/// Counters collected over one pipeline invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PipelineStats {
    /// Slides produced by segmentation.
    pub slides: usize,
    /// Frames attached across all slides.
    pub frames: usize,
    /// Slides that fell back to the single-node plan.
    pub fallback_plans: usize,
    /// Extractor calls that returned an error.
    pub extraction_failures: usize,
    /// Trailing words no slide consumed.
    pub words_unassigned: usize,
    /// Frames dropped because rasterization failed.
    pub frames_failed: usize,
}

/// Per-invocation state threaded through the stages.
///
/// Holds validated options and the stats of the most recent run. Nothing is shared between
/// contexts, so independent runs may proceed concurrently on separate contexts.
#[derive(Clone, Debug, Default)]
pub struct PipelineContext {
    pub(crate) opts: PipelineOpts,
    pub(crate) stats: PipelineStats,
}

impl PipelineContext {
    /// Validate `opts` and create a context.
    pub fn new(opts: PipelineOpts) -> SlideSyncResult<Self> {
        opts.validate()?;
        Ok(Self {
            opts,
            stats: PipelineStats::default(),
        })
    }

    /// Options in effect.
    pub fn opts(&self) -> &PipelineOpts {
        &self.opts
    }

    /// Stats of the most recent run.
    pub fn stats(&self) -> PipelineStats {
        self.stats
    }
}
