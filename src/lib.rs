//! slidesync turns a narration script and its word timestamps into a timed sequence of
//! progressively revealed architecture diagrams.
//!
//! The pipeline has five pure stages:
//!
//! - [`segment`] splits narration into [`Slide`]s on `Slide N:` headers
//! - [`build`] turns extracted entities and relations into a [`GraphPlan`]
//! - [`sequence`] expands a plan into reveal [`Frame`]s, one per visual role
//! - [`align`] maps the word timeline onto slides
//! - [`assemble`] produces the [`ClipPlan`] consumed by the video assembler
//!
//! [`PipelineContext`] runs them end to end. Frames can then be rasterized with a
//! [`FrameRasterizer`] and the plan written as an ffmpeg concat manifest.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod diagram;
mod foundation;
mod narration;
mod pipeline;
mod render;
mod timeline;
mod timing;

pub use crate::foundation::core::{FrameId, TimeSpan, Word};
pub use crate::foundation::error::{SlideSyncError, SlideSyncResult};

pub use crate::narration::segment::{DEFAULT_SLIDE_TITLE, segment};
pub use crate::narration::slide::Slide;

pub use crate::diagram::builder::{
    DEFAULT_GRAPH_TITLE, build, build_from_extraction, build_titled, slugify,
};
pub use crate::diagram::d2::{frame_to_d2, role_palette};
pub use crate::diagram::extract::{
    CommandExtractor, Component, EntityExtractor, ExtractionResult, NoExtraction,
    PrecomputedExtraction, Relation,
};
pub use crate::diagram::fallback::{FALLBACK_NODE_ID, fallback_plan, finalize_plan};
pub use crate::diagram::model::{Edge, Frame, GraphPlan, Node, NodeId, Role};
pub use crate::diagram::sequence::sequence;
pub use crate::diagram::svg::{SvgLayout, frame_to_svg};

pub use crate::timing::align::{AlignReport, align, align_with_report};
pub use crate::timing::audio::AudioTimeline;

pub use crate::timeline::assemble::{ClipPlan, ClipSegment, DEFAULT_MIN_SLIDE_DURATION, assemble};

pub use crate::render::d2::{D2Rasterizer, is_d2_on_path};
pub use crate::render::rasterizer::{
    FrameRasterizer, RasterBackend, RasterReport, RenderOpts, RenderThreading, create_rasterizer,
    ensure_parent_dir, rasterize_slides, spawn_rasterize,
};
pub use crate::render::svg::SvgRasterizer;

pub use crate::pipeline::context::{PipelineContext, PipelineStats};
pub use crate::pipeline::opts::PipelineOpts;
pub use crate::pipeline::run::PipelineOutput;
