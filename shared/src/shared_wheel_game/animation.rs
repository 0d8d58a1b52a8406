//! Frame-driven interpolation with one animation slot per category.
//!
//! The driver never touches a clock or a display loop itself. A
//! [`FrameScheduler`] is told when a category wants another frame, and the
//! host calls [`AnimationDriver::advance`] with the frame timestamp when that
//! frame arrives. Frame callbacks receive the caller's context (`&mut C`) so
//! the animated state stays an ordinary owned struct.

use log::debug;
use serde::{Serialize, Deserialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCategory {
    Spin,
    Reflow,
    Pop,
}

impl AnimationCategory {
    pub const ALL: [AnimationCategory; 3] = [Self::Spin, Self::Reflow, Self::Pop];

    fn slot(self) -> usize {
        match self {
            Self::Spin => 0,
            Self::Reflow => 1,
            Self::Pop => 2,
        }
    }
}

/// Identifies one started animation. Frames carrying an older id are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    OutCubic,
    OutQuint,
    InOutCubic,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::OutCubic => ease_out_cubic(t),
            Easing::OutQuint => ease_out_quint(t),
            Easing::InOutCubic => ease_in_out_cubic(t),
        }
    }
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

// Spin deceleration
pub fn ease_out_quint(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(5)
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub start_value: f64,
    pub target_value: f64,
    pub duration_ms: f64,
    pub easing: Easing,
}

/// Capability the driver uses to request and withdraw display frames.
pub trait FrameScheduler {
    /// Request one frame for `category`. Replaces any frame already pending for it.
    fn schedule(&mut self, category: AnimationCategory, id: AnimationId);
    /// Drop the pending frame for `category`, if any.
    fn cancel(&mut self, category: AnimationCategory);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// The frame belonged to a cancelled or replaced animation.
    Stale,
    Running(f64),
    Completed,
}

type FrameFn<C> = Box<dyn FnMut(&mut C, f64)>;
type CompleteFn<C> = Box<dyn FnOnce(&mut C)>;

struct ActiveAnimation<C> {
    id: AnimationId,
    started_at: f64,
    spec: AnimationSpec,
    on_frame: FrameFn<C>,
    on_complete: Option<CompleteFn<C>>,
}

pub struct AnimationDriver<C, S> {
    scheduler: S,
    slots: [Option<ActiveAnimation<C>>; 3],
    next_id: u64,
}

impl<C, S: FrameScheduler> AnimationDriver<C, S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            slots: [None, None, None],
            next_id: 0,
        }
    }

    /// Starts an animation, cancelling whatever was running in the same category.
    pub fn start<F, D>(
        &mut self,
        category: AnimationCategory,
        spec: AnimationSpec,
        now: f64,
        on_frame: F,
        on_complete: D,
    ) -> AnimationId
    where
        F: FnMut(&mut C, f64) + 'static,
        D: FnOnce(&mut C) + 'static,
    {
        self.cancel(category);

        self.next_id += 1;
        let id = AnimationId(self.next_id);
        self.slots[category.slot()] = Some(ActiveAnimation {
            id,
            started_at: now,
            spec,
            on_frame: Box::new(on_frame),
            on_complete: Some(Box::new(on_complete)),
        });
        self.scheduler.schedule(category, id);
        id
    }

    /// Stops a category without running its completion. Returns whether
    /// anything was running.
    pub fn cancel(&mut self, category: AnimationCategory) -> bool {
        match self.slots[category.slot()].take() {
            Some(active) => {
                self.scheduler.cancel(category);
                debug!("Cancelled {:?} animation {:?}", category, active.id);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for category in AnimationCategory::ALL {
            self.cancel(category);
        }
    }

    pub fn is_active(&self, category: AnimationCategory) -> bool {
        self.slots[category.slot()].is_some()
    }

    pub fn is_idle(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Runs one frame of `category` at timestamp `now`.
    pub fn advance(&mut self, category: AnimationCategory, id: AnimationId, now: f64, ctx: &mut C) -> FrameOutcome {
        let slot = category.slot();
        let Some(active) = self.slots[slot].as_mut() else {
            return FrameOutcome::Stale;
        };
        if active.id != id {
            return FrameOutcome::Stale;
        }

        let spec = active.spec;
        let progress = if spec.duration_ms > 0.0 {
            ((now - active.started_at) / spec.duration_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let value = if progress >= 1.0 {
            spec.target_value
        } else {
            let eased = spec.easing.apply(progress);
            spec.start_value + (spec.target_value - spec.start_value) * eased
        };
        (active.on_frame)(ctx, value);

        if progress < 1.0 {
            self.scheduler.schedule(category, id);
            return FrameOutcome::Running(progress);
        }

        if let Some(finished) = self.slots[slot].take() {
            if let Some(on_complete) = finished.on_complete {
                on_complete(ctx);
            }
        }
        FrameOutcome::Completed
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// Scheduler for hosts that pump frames themselves: pending requests are
/// queued and handed out by [`QueuedFrames::take_pending`].
#[derive(Debug, Default)]
pub struct QueuedFrames {
    pending: [Option<AnimationId>; 3],
}

impl QueuedFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self, category: AnimationCategory) -> Option<AnimationId> {
        self.pending[category.slot()]
    }

    pub fn take_pending(&mut self) -> Vec<(AnimationCategory, AnimationId)> {
        AnimationCategory::ALL
            .iter()
            .filter_map(|category| self.pending[category.slot()].take().map(|id| (*category, id)))
            .collect()
    }
}

impl FrameScheduler for QueuedFrames {
    fn schedule(&mut self, category: AnimationCategory, id: AnimationId) {
        self.pending[category.slot()] = Some(id);
    }

    fn cancel(&mut self, category: AnimationCategory) {
        self.pending[category.slot()] = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        values: Vec<f64>,
        completed: Vec<&'static str>,
    }

    fn spec(duration_ms: f64) -> AnimationSpec {
        AnimationSpec {
            start_value: 10.0,
            target_value: 20.0,
            duration_ms,
            easing: Easing::Linear,
        }
    }

    fn pump(driver: &mut AnimationDriver<Probe, QueuedFrames>, probe: &mut Probe, now: f64) -> Vec<FrameOutcome> {
        let frames = driver.scheduler_mut().take_pending();
        frames
            .into_iter()
            .map(|(category, id)| driver.advance(category, id, now, probe))
            .collect()
    }

    #[test]
    fn test_runs_to_target_then_completes_once() {
        let mut driver = AnimationDriver::new(QueuedFrames::new());
        let mut probe = Probe::default();
        driver.start(
            AnimationCategory::Spin,
            spec(100.0),
            0.0,
            |p: &mut Probe, v| p.values.push(v),
            |p: &mut Probe| p.completed.push("spin"),
        );

        assert_eq!(pump(&mut driver, &mut probe, 50.0), vec![FrameOutcome::Running(0.5)]);
        assert_eq!(pump(&mut driver, &mut probe, 150.0), vec![FrameOutcome::Completed]);
        assert!(pump(&mut driver, &mut probe, 200.0).is_empty());

        assert_eq!(probe.values, vec![15.0, 20.0]);
        assert_eq!(probe.completed, vec!["spin"]);
        assert!(driver.is_idle());
    }

    #[test]
    fn test_restart_cancels_previous_completion() {
        let mut driver = AnimationDriver::new(QueuedFrames::new());
        let mut probe = Probe::default();
        let first = driver.start(
            AnimationCategory::Spin,
            spec(100.0),
            0.0,
            |_: &mut Probe, _| {},
            |p: &mut Probe| p.completed.push("first"),
        );
        let second = driver.start(
            AnimationCategory::Spin,
            spec(100.0),
            10.0,
            |_: &mut Probe, _| {},
            |p: &mut Probe| p.completed.push("second"),
        );
        assert_ne!(first, second);
        assert_eq!(driver.scheduler().pending(AnimationCategory::Spin), Some(second));

        // A late frame from the first chain is ignored
        assert_eq!(driver.advance(AnimationCategory::Spin, first, 500.0, &mut probe), FrameOutcome::Stale);
        pump(&mut driver, &mut probe, 500.0);

        assert_eq!(probe.completed, vec!["second"]);
    }

    #[test]
    fn test_cancel_skips_completion() {
        let mut driver = AnimationDriver::new(QueuedFrames::new());
        let mut probe = Probe::default();
        driver.start(
            AnimationCategory::Pop,
            spec(100.0),
            0.0,
            |_: &mut Probe, _| {},
            |p: &mut Probe| p.completed.push("pop"),
        );
        assert!(driver.cancel(AnimationCategory::Pop));
        assert!(!driver.cancel(AnimationCategory::Pop));
        assert!(pump(&mut driver, &mut probe, 1_000.0).is_empty());
        assert!(probe.completed.is_empty());
    }

    #[test]
    fn test_categories_are_independent() {
        let mut driver = AnimationDriver::new(QueuedFrames::new());
        let mut probe = Probe::default();
        driver.start(AnimationCategory::Spin, spec(100.0), 0.0, |_: &mut Probe, _| {}, |p: &mut Probe| p.completed.push("spin"));
        driver.start(AnimationCategory::Reflow, spec(20.0), 0.0, |_: &mut Probe, _| {}, |p: &mut Probe| p.completed.push("reflow"));

        pump(&mut driver, &mut probe, 30.0);
        assert_eq!(probe.completed, vec!["reflow"]);
        assert!(driver.is_active(AnimationCategory::Spin));

        pump(&mut driver, &mut probe, 120.0);
        assert_eq!(probe.completed, vec!["reflow", "spin"]);
    }

    #[test]
    fn test_zero_duration_completes_on_first_frame() {
        let mut driver = AnimationDriver::new(QueuedFrames::new());
        let mut probe = Probe::default();
        driver.start(AnimationCategory::Reflow, spec(0.0), 5.0, |p: &mut Probe, v| p.values.push(v), |p: &mut Probe| p.completed.push("done"));
        assert_eq!(pump(&mut driver, &mut probe, 5.0), vec![FrameOutcome::Completed]);
        assert_eq!(probe.values, vec![20.0]);
    }

    #[test]
    fn test_easings_are_anchored_and_monotonic() {
        for easing in [Easing::Linear, Easing::OutCubic, Easing::OutQuint, Easing::InOutCubic] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
            let mut last = 0.0;
            for step in 1..=100 {
                let value = easing.apply(step as f64 / 100.0);
                assert!(value >= last);
                last = value;
            }
        }
        assert!((ease_out_quint(0.5) - 0.96875).abs() < 1e-12);
    }
}
