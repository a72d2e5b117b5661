//! Tab strip density fitting.
//!
//! The strip steps through density levels `0..=MAX_DENSITY` until its
//! content no longer overflows. Density changes the rendered width, so each
//! step needs a layout pass before the next measurement. A fit is driven as
//! an explicit run: [`DensityController::begin`] starts one and supersedes
//! any run still in flight, and [`DensityController::step`] consumes one
//! measurement. At most `MAX_DENSITY + 1` measurements happen per run.

use crate::tab::MAX_DENSITY;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Slack allowed before the strip counts as overflowing, in pixels
pub const OVERFLOW_TOLERANCE: f32 = 1.0;

/// Rendered width of the tab strip against its container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripMetrics {
    /// Full width of the tab content (scroll width)
    pub content_width: f32,
    /// Width of the visible container (client width)
    pub visible_width: f32,
}

impl StripMetrics {
    pub fn new(content_width: f32, visible_width: f32) -> Self {
        Self {
            content_width,
            visible_width,
        }
    }

    pub fn overflows(&self) -> bool {
        self.content_width > self.visible_width + OVERFLOW_TOLERANCE
    }
}

/// Result of feeding one measurement into a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityStep {
    /// Still overflowing: render at this level, then measure again
    Apply(u8),
    /// Fit found (or ceiling reached) at this level
    Settled(u8),
    /// A newer run started; this one must stop
    Superseded,
}

/// How a complete fit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityOutcome {
    Settled { level: u8, measurements: u8 },
    Superseded,
    /// No strip to measure
    Unmounted,
}

/// One in-flight fit.
#[derive(Debug)]
pub struct DensityRun {
    generation: u64,
    level: u8,
    measurements: u8,
}

impl DensityRun {
    /// Level the strip should currently be rendered at
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn measurements(&self) -> u8 {
        self.measurements
    }
}

/// Issues density runs; the newest run wins.
///
/// Clones share the generation counter, so a run started from any clone
/// supersedes runs started from the others.
#[derive(Debug, Clone, Default)]
pub struct DensityController {
    generation: Arc<AtomicU64>,
}

impl DensityController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fit at level 0, superseding any outstanding run.
    pub fn begin(&self) -> DensityRun {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        log::trace!("Density run {} started", generation);
        DensityRun {
            generation,
            level: 0,
            measurements: 0,
        }
    }

    /// Supersede the outstanding run without starting a new one.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_current(&self, run: &DensityRun) -> bool {
        self.generation.load(Ordering::Acquire) == run.generation
    }

    /// Feed the measurement taken at `run.level()`.
    pub fn step(&self, run: &mut DensityRun, metrics: StripMetrics) -> DensityStep {
        if !self.is_current(run) {
            log::trace!("Density run {} superseded", run.generation);
            return DensityStep::Superseded;
        }
        run.measurements += 1;
        if !metrics.overflows() || run.level >= MAX_DENSITY {
            return DensityStep::Settled(run.level);
        }
        run.level += 1;
        DensityStep::Apply(run.level)
    }
}

/// Host-side tab strip the async driver renders and measures.
#[allow(async_fn_in_trait)]
pub trait StripLayout {
    /// Render the strip at `level`.
    fn apply_density(&mut self, level: u8);

    /// Wait for the layout pass, then measure. `None` when the strip is not
    /// mounted.
    async fn measure(&mut self) -> Option<StripMetrics>;
}

/// Run a complete fit against an async layout.
pub async fn fit_density<L: StripLayout>(
    controller: &DensityController,
    layout: &mut L,
) -> DensityOutcome {
    let mut run = controller.begin();
    layout.apply_density(run.level());
    loop {
        let Some(metrics) = layout.measure().await else {
            return DensityOutcome::Unmounted;
        };
        match controller.step(&mut run, metrics) {
            DensityStep::Apply(level) => layout.apply_density(level),
            DensityStep::Settled(level) => {
                return DensityOutcome::Settled {
                    level,
                    measurements: run.measurements(),
                };
            }
            DensityStep::Superseded => return DensityOutcome::Superseded,
        }
    }
}

/// Synchronous fit for hosts that can lay out and measure immediately.
pub fn fit_density_with<A, M>(
    controller: &DensityController,
    mut apply: A,
    mut measure: M,
) -> DensityOutcome
where
    A: FnMut(u8),
    M: FnMut(u8) -> Option<StripMetrics>,
{
    let mut run = controller.begin();
    apply(run.level());
    loop {
        let Some(metrics) = measure(run.level()) else {
            return DensityOutcome::Unmounted;
        };
        match controller.step(&mut run, metrics) {
            DensityStep::Apply(level) => apply(level),
            DensityStep::Settled(level) => {
                return DensityOutcome::Settled {
                    level,
                    measurements: run.measurements(),
                };
            }
            DensityStep::Superseded => return DensityOutcome::Superseded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Strip whose content shrinks by `shrink` pixels per density level
    fn strip(base: f32, shrink: f32, visible: f32) -> impl FnMut(u8) -> Option<StripMetrics> {
        move |level| Some(StripMetrics::new(base - shrink * level as f32, visible))
    }

    #[test]
    fn overflow_has_one_pixel_tolerance() {
        assert!(!StripMetrics::new(101.0, 100.0).overflows());
        assert!(StripMetrics::new(101.5, 100.0).overflows());
    }

    #[test]
    fn fitting_strip_settles_at_zero() {
        let controller = DensityController::new();
        let outcome = fit_density_with(&controller, |_| {}, strip(80.0, 10.0, 100.0));
        assert_eq!(
            outcome,
            DensityOutcome::Settled {
                level: 0,
                measurements: 1
            }
        );
    }

    #[test]
    fn steps_until_fit() {
        let controller = DensityController::new();
        let mut applied = Vec::new();
        let outcome = fit_density_with(
            &controller,
            |level| applied.push(level),
            strip(130.0, 15.0, 100.0),
        );
        assert_eq!(
            outcome,
            DensityOutcome::Settled {
                level: 2,
                measurements: 3
            }
        );
        assert_eq!(applied, vec![0, 1, 2]);
    }

    #[test]
    fn stops_at_ceiling_within_four_measurements() {
        let controller = DensityController::new();
        let outcome = fit_density_with(&controller, |_| {}, strip(1000.0, 1.0, 100.0));
        assert_eq!(
            outcome,
            DensityOutcome::Settled {
                level: MAX_DENSITY,
                measurements: MAX_DENSITY + 1
            }
        );
    }

    #[test]
    fn unmounted_strip_stops_immediately() {
        let controller = DensityController::new();
        let outcome = fit_density_with(&controller, |_| {}, |_| None);
        assert_eq!(outcome, DensityOutcome::Unmounted);
    }

    #[test]
    fn newer_run_supersedes_older() {
        let controller = DensityController::new();
        let mut first = controller.begin();
        let mut second = controller.clone().begin();

        let overflow = StripMetrics::new(500.0, 100.0);
        assert_eq!(controller.step(&mut first, overflow), DensityStep::Superseded);
        assert_eq!(controller.step(&mut second, overflow), DensityStep::Apply(1));

        controller.cancel();
        assert_eq!(controller.step(&mut second, overflow), DensityStep::Superseded);
    }

    struct YieldingStrip {
        widths: [f32; 4],
        level: u8,
        applied: Vec<u8>,
        resize_on_measure: Option<DensityController>,
    }

    impl StripLayout for YieldingStrip {
        fn apply_density(&mut self, level: u8) {
            self.level = level;
            self.applied.push(level);
        }

        async fn measure(&mut self) -> Option<StripMetrics> {
            tokio::task::yield_now().await;
            if let Some(controller) = self.resize_on_measure.take() {
                // A resize lands while this run waits for layout
                let _ = controller.begin();
            }
            Some(StripMetrics::new(self.widths[self.level as usize], 100.0))
        }
    }

    #[tokio::test]
    async fn async_driver_yields_between_steps() {
        let controller = DensityController::new();
        let mut layout = YieldingStrip {
            widths: [180.0, 140.0, 100.5, 90.0],
            level: 0,
            applied: Vec::new(),
            resize_on_measure: None,
        };
        let outcome = fit_density(&controller, &mut layout).await;
        assert_eq!(
            outcome,
            DensityOutcome::Settled {
                level: 2,
                measurements: 3
            }
        );
        assert_eq!(layout.applied, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn async_driver_stops_when_superseded() {
        let controller = DensityController::new();
        let mut layout = YieldingStrip {
            widths: [180.0, 140.0, 120.0, 110.0],
            level: 0,
            applied: Vec::new(),
            resize_on_measure: Some(controller.clone()),
        };
        let outcome = fit_density(&controller, &mut layout).await;
        assert_eq!(outcome, DensityOutcome::Superseded);
        assert_eq!(layout.applied, vec![0]);
    }
}
