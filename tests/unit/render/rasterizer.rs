use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::diagram::model::{Node, Role};

/// Writes a marker file; fails for one configured frame step.
struct FakeRasterizer {
    fail_step: Option<usize>,
    calls: AtomicUsize,
}

impl FakeRasterizer {
    fn new(fail_step: Option<usize>) -> Self {
        Self {
            fail_step,
            calls: AtomicUsize::new(0),
        }
    }
}

impl FrameRasterizer for FakeRasterizer {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn rasterize(&self, frame: &Frame, out_path: &Path) -> SlideSyncResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_step == Some(frame.step) {
            return Err(SlideSyncError::render("boom"));
        }
        ensure_parent_dir(out_path)?;
        std::fs::write(out_path, frame.title.as_bytes()).map_err(anyhow::Error::from)?;
        Ok(())
    }
}

fn frame(step: usize) -> Frame {
    Frame {
        step,
        title: format!("step {step}"),
        nodes: vec![Node {
            id: "core".to_owned(),
            label: "Core".to_owned(),
            role: Role::Core,
        }],
        edges: Vec::new(),
        focus_node_id: Some("core".to_owned()),
    }
}

fn slides() -> Vec<Slide> {
    let mut a = Slide::new(0, "Slide 1:", "a b");
    a.frames = vec![frame(0), frame(1)];
    let mut b = Slide::new(1, "Slide 2:", "c");
    b.frames = vec![frame(0)];
    vec![a, b]
}

#[test]
fn sequential_rasterizes_every_frame_with_canonical_names() {
    let dir = PathBuf::from("target").join("unit_rasterize_seq");
    let mut slides = slides();
    let r = FakeRasterizer::new(None);

    let report = rasterize_slides(&mut slides, &r, &dir, &RenderThreading::default()).unwrap();
    assert!(report.failed.is_empty());
    assert_eq!(report.rendered.len(), 3);
    assert_eq!(
        report.rendered[&FrameId { slide: 0, step: 1 }],
        dir.join("slide_000_frame_01.txt")
    );
    assert!(dir.join("slide_001_frame_00.txt").exists());
    assert_eq!(r.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn failed_frames_are_omitted_from_slides() {
    let dir = PathBuf::from("target").join("unit_rasterize_fail");
    let mut slides = slides();
    let r = FakeRasterizer::new(Some(1));

    let report = rasterize_slides(&mut slides, &r, &dir, &RenderThreading::default()).unwrap();
    assert_eq!(report.failed, vec![FrameId { slide: 0, step: 1 }]);
    assert_eq!(report.rendered.len(), 2);
    assert_eq!(slides[0].frames.len(), 1);
    assert_eq!(slides[0].frames[0].step, 0);
    assert_eq!(slides[1].frames.len(), 1);
}

#[test]
fn parallel_matches_sequential() {
    let dir = PathBuf::from("target").join("unit_rasterize_par");
    let threading = RenderThreading {
        parallel: true,
        threads: Some(2),
    };
    let mut slides = slides();
    let r = FakeRasterizer::new(Some(0));

    let report = rasterize_slides(&mut slides, &r, &dir, &threading).unwrap();
    assert_eq!(
        report.failed,
        vec![FrameId { slide: 0, step: 0 }, FrameId { slide: 1, step: 0 }]
    );
    assert_eq!(report.rendered.len(), 1);
    assert!(slides[1].frames.is_empty());
}

#[test]
fn zero_threads_is_rejected() {
    let threading = RenderThreading {
        parallel: true,
        threads: Some(0),
    };
    let mut slides = slides();
    let err = rasterize_slides(
        &mut slides,
        &FakeRasterizer::new(None),
        Path::new("target/unit_rasterize_zero"),
        &threading,
    )
    .unwrap_err();
    assert!(matches!(err, SlideSyncError::Validation(_)), "{err}");
}

#[test]
fn spawn_rasterize_reports_through_handle() {
    let dir = PathBuf::from("target").join("unit_rasterize_spawn");
    let rasterizer: Arc<dyn FrameRasterizer> = Arc::new(FakeRasterizer::new(Some(1)));
    let handle = spawn_rasterize(slides(), rasterizer, dir, RenderThreading::default()).unwrap();
    let report = handle.join().unwrap();
    assert_eq!(report.rendered.len(), 2);

    let mut mine = slides();
    report.retain_rendered(&mut mine);
    assert_eq!(mine[0].frames.len(), 1);
}

#[test]
fn backend_names_parse() {
    assert_eq!("svg".parse::<RasterBackend>().unwrap(), RasterBackend::Svg);
    assert_eq!(" D2 ".parse::<RasterBackend>().unwrap(), RasterBackend::D2);
    assert!("png".parse::<RasterBackend>().is_err());
    assert_eq!(RasterBackend::default(), RasterBackend::Svg);
}

#[test]
fn ensure_parent_dir_accepts_bare_file_names() {
    ensure_parent_dir(Path::new("just_a_file.png")).unwrap();
}

#[test]
fn render_opts_defaults_and_validation() {
    let opts = RenderOpts::default();
    assert_eq!((opts.width, opts.height), (1280, 720));
    assert_eq!(opts.backend, RasterBackend::Svg);
    opts.validate().unwrap();
    assert_eq!(opts.layout().width, 1280);

    let bad = RenderOpts {
        width: 0,
        ..RenderOpts::default()
    };
    assert!(bad.validate().is_err());

    let d2 = RenderOpts {
        backend: RasterBackend::D2,
        ..RenderOpts::default()
    };
    assert_eq!(d2.rasterizer().name(), "d2");
}
