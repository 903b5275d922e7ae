use std::path::Path;

use crate::{
    diagram::{
        builder::build_from_extraction,
        extract::{EntityExtractor, ExtractionResult},
        fallback::finalize_plan,
        sequence::sequence,
    },
    foundation::error::SlideSyncResult,
    narration::{segment::segment, slide::Slide},
    pipeline::context::{PipelineContext, PipelineStats},
    render::rasterizer::{FrameRasterizer, RasterReport, RenderThreading, rasterize_slides},
    timeline::assemble::{ClipPlan, assemble},
    timing::{align::align_with_report, audio::AudioTimeline},
};

/// Result of a pipeline run: timed slides with their frames, plus the clip timeline.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineOutput {
    /// Slides in narration order.
    pub slides: Vec<Slide>,
    /// Clip segments for the external video assembler.
    pub timeline: ClipPlan,
}

impl PipelineOutput {
    /// Rebuild the timeline from the current slide frames, keeping the audio reference.
    pub fn reassemble(&mut self, min_slide_duration: f64) {
        let audio_ref = self.timeline.audio_ref.take();
        self.timeline = assemble(&self.slides, min_slide_duration).with_audio_ref(audio_ref);
    }
}

impl PipelineContext {
    /// Segment narration and attach reveal frames to every slide.
    ///
    /// Extractor errors are logged and treated as an empty response. Empty graphs get the
    /// fallback plan, and every graph is capped at `max_nodes`. Resets the context stats.
    #[tracing::instrument(skip_all, fields(chars = raw_text.len()))]
    pub fn plan_slides(
        &mut self,
        raw_text: &str,
        extractor: &dyn EntityExtractor,
    ) -> SlideSyncResult<Vec<Slide>> {
        let mut slides = segment(raw_text)?;
        self.stats = PipelineStats {
            slides: slides.len(),
            ..PipelineStats::default()
        };

        for slide in &mut slides {
            let extraction = match extractor.extract(slide) {
                Ok(extraction) => extraction,
                Err(e) => {
                    self.stats.extraction_failures += 1;
                    tracing::warn!(slide = slide.index, error = %e, "entity extraction failed");
                    ExtractionResult::default()
                }
            };

            let plan = build_from_extraction(self.opts.graph_title.clone(), &extraction);
            let (plan, used_fallback) = finalize_plan(plan, slide, &self.opts);
            if used_fallback {
                self.stats.fallback_plans += 1;
                tracing::warn!(slide = slide.index, "no entities extracted; using fallback plan");
            }

            slide.frames = sequence(&plan);
            self.stats.frames += slide.frames.len();
            tracing::debug!(
                slide = slide.index,
                nodes = plan.nodes.len(),
                frames = slide.frames.len(),
                "planned slide"
            );
        }

        Ok(slides)
    }

    /// Run every stage: segment, extract, build, sequence, align and assemble.
    #[tracing::instrument(skip_all, fields(words = audio.words.len()))]
    pub fn run(
        &mut self,
        raw_text: &str,
        extractor: &dyn EntityExtractor,
        audio: &AudioTimeline,
    ) -> SlideSyncResult<PipelineOutput> {
        let slides = self.plan_slides(raw_text, extractor)?;
        let (slides, report) = align_with_report(slides, &audio.words)?;
        self.stats.words_unassigned = report.words_unassigned();

        let timeline = assemble(&slides, self.opts.min_slide_duration)
            .with_audio_ref(audio.audio_ref.clone());
        tracing::info!(
            slides = slides.len(),
            segments = timeline.segments.len(),
            total_duration = timeline.total_duration,
            "pipeline finished"
        );
        Ok(PipelineOutput { slides, timeline })
    }

    /// Rasterize `output`'s frames into `out_dir`.
    ///
    /// Failed frames are removed from their slides and the timeline is rebuilt without them.
    pub fn rasterize(
        &mut self,
        output: &mut PipelineOutput,
        rasterizer: &dyn FrameRasterizer,
        out_dir: &Path,
        threading: &RenderThreading,
    ) -> SlideSyncResult<RasterReport> {
        let report = rasterize_slides(&mut output.slides, rasterizer, out_dir, threading)?;
        self.stats.frames_failed = report.failed.len();
        if !report.failed.is_empty() {
            output.reassemble(self.opts.min_slide_duration);
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/run.rs"]
mod tests;
