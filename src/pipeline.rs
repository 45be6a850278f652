//! Batch driver: renders models one at a time and reports each outcome.

use crate::error::{RenderError, Result};
use crate::mesher::Mesher;
use crate::render::{capture, Camera, RenderConfig, RenderContext, RenderOutput};
use crate::resolver::{ModelResolver, ResolvedModel};
use crate::resource_pack::{AssetSource, ResourceLocation};
use crate::sink::OutputSink;
use tracing::{debug, info, warn};

/// Where a model is in its render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
    Assembling,
    Ready,
    AssemblyFailed,
    Capturing,
    Done,
    CaptureFailed,
}

impl RenderStage {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RenderStage::LoadFailed
                | RenderStage::AssemblyFailed
                | RenderStage::Done
                | RenderStage::CaptureFailed
        )
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RenderStage::LoadFailed | RenderStage::AssemblyFailed | RenderStage::CaptureFailed
        )
    }

    /// Stage a failure during this stage ends in.
    fn failed(self) -> RenderStage {
        match self {
            RenderStage::Idle | RenderStage::Loading | RenderStage::Loaded => {
                RenderStage::LoadFailed
            }
            RenderStage::Assembling | RenderStage::Ready => RenderStage::AssemblyFailed,
            _ => RenderStage::CaptureFailed,
        }
    }
}

impl std::fmt::Display for RenderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RenderStage::Idle => "idle",
            RenderStage::Loading => "loading",
            RenderStage::Loaded => "loaded",
            RenderStage::LoadFailed => "load failed",
            RenderStage::Assembling => "assembling",
            RenderStage::Ready => "ready",
            RenderStage::AssemblyFailed => "assembly failed",
            RenderStage::Capturing => "capturing",
            RenderStage::Done => "done",
            RenderStage::CaptureFailed => "capture failed",
        };
        write!(f, "{}", name)
    }
}

/// Final outcome of one model.
#[derive(Debug, Clone)]
pub struct ModelReport {
    pub id: ResourceLocation,
    /// Terminal stage reached.
    pub stage: RenderStage,
    pub error: Option<String>,
    /// Frames captured (0 unless done).
    pub frame_count: usize,
}

/// Counts over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub done: usize,
    pub load_failed: usize,
    pub assembly_failed: usize,
    pub capture_failed: usize,
}

impl BatchSummary {
    pub fn from_reports(reports: &[ModelReport]) -> Self {
        let mut summary = Self {
            total: reports.len(),
            ..Self::default()
        };
        for report in reports {
            match report.stage {
                RenderStage::Done => summary.done += 1,
                RenderStage::LoadFailed => summary.load_failed += 1,
                RenderStage::AssemblyFailed => summary.assembly_failed += 1,
                RenderStage::CaptureFailed => summary.capture_failed += 1,
                _ => {}
            }
        }
        summary
    }

    pub fn failed(&self) -> usize {
        self.load_failed + self.assembly_failed + self.capture_failed
    }
}

/// Tracks one model's stage transitions.
struct StageTracker<'a> {
    id: &'a ResourceLocation,
    stage: RenderStage,
}

impl<'a> StageTracker<'a> {
    fn enter(&mut self, next: RenderStage) {
        debug!(model = %self.id, from = %self.stage, to = %next, "stage");
        self.stage = next;
    }

    fn fail(&mut self, error: &RenderError) -> ModelReport {
        let terminal = self.stage.failed();
        warn!(model = %self.id, stage = %terminal, error = %error, "model failed");
        self.stage = terminal;
        ModelReport {
            id: self.id.clone(),
            stage: terminal,
            error: Some(error.to_string()),
            frame_count: 0,
        }
    }
}

/// Renders models in order, one at a time.
///
/// At most one [`RenderContext`] is alive; it is dropped before the next
/// model is assembled.
pub struct BatchRenderer<'a> {
    source: &'a dyn AssetSource,
    config: RenderConfig,
    camera: Camera,
    context: Option<RenderContext>,
}

impl<'a> BatchRenderer<'a> {
    pub fn new(source: &'a dyn AssetSource, config: RenderConfig) -> Self {
        let camera = Camera::orbit(config.azimuth_deg, config.elevation_deg);
        Self {
            source,
            config,
            camera,
            context: None,
        }
    }

    /// Render one model and hand its output to the sink.
    ///
    /// Never fails: every error ends up in the returned report.
    pub fn render_model(
        &mut self,
        id: &ResourceLocation,
        sink: &mut dyn OutputSink,
    ) -> ModelReport {
        self.context = None;

        let mut tracker = StageTracker {
            id,
            stage: RenderStage::Idle,
        };

        tracker.enter(RenderStage::Loading);
        let resolved = match self.load(id) {
            Ok(resolved) => resolved,
            Err(e) => return tracker.fail(&e),
        };
        tracker.enter(RenderStage::Loaded);

        tracker.enter(RenderStage::Assembling);
        let assembled = match Mesher::new(self.source)
            .with_margin(self.config.margin)
            .mesh(&resolved)
        {
            Ok(assembled) => assembled,
            Err(e) => return tracker.fail(&e),
        };
        let context = self.context.insert(RenderContext::new(assembled));
        tracker.enter(RenderStage::Ready);

        tracker.enter(RenderStage::Capturing);
        let output = match capture(context, &self.camera, &self.config)
            .and_then(|output| deliver(sink, id, output))
        {
            Ok(output) => output,
            Err(e) => return tracker.fail(&e),
        };
        tracker.enter(RenderStage::Done);

        ModelReport {
            id: id.clone(),
            stage: RenderStage::Done,
            error: None,
            frame_count: output.frame_count,
        }
    }

    /// Render every id in order; `on_report` sees each report as it completes.
    pub fn render_all<I, F>(
        &mut self,
        ids: I,
        sink: &mut dyn OutputSink,
        mut on_report: F,
    ) -> (Vec<ModelReport>, BatchSummary)
    where
        I: IntoIterator<Item = ResourceLocation>,
        F: FnMut(&ModelReport),
    {
        let mut reports = Vec::new();
        for id in ids {
            let report = self.render_model(&id, sink);
            on_report(&report);
            reports.push(report);
        }
        self.context = None;

        let summary = BatchSummary::from_reports(&reports);
        info!(
            total = summary.total,
            done = summary.done,
            failed = summary.failed(),
            mode = %self.config.mode,
            "batch finished"
        );
        (reports, summary)
    }

    fn load(&self, id: &ResourceLocation) -> Result<ResolvedModel> {
        ModelResolver::new(self.source).resolve(&id.to_string())
    }
}

fn deliver(
    sink: &mut dyn OutputSink,
    id: &ResourceLocation,
    output: RenderOutput,
) -> Result<RenderOutput> {
    sink.write(id, &output)?;
    Ok(output)
}
