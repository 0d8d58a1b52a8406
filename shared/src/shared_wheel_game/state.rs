use std::mem;

use log::{debug, info, warn};
use rand::Rng;
use validator::ValidationError;

use super::animation::{AnimationCategory, AnimationDriver, AnimationSpec, Easing, FrameOutcome, FrameScheduler, AnimationId};
use super::layout::{normalize_angle, should_reflow, SliceLayout};
use super::planner::{self, SpinPlan};
use super::pop::{Invalidation, PopRemovalController, RemovalDecision, RemovalRequest};
use super::selector;
use super::{Item, SelectionRecord, WheelConfig, WheelEvent};

#[derive(Debug, Clone, PartialEq)]
struct Reflow {
    from: SliceLayout,
    to: SliceLayout,
}

/// Everything the animations write and the renderer reads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WheelState {
    rotation: f64,
    layout: SliceLayout,
    target_layout: SliceLayout,
    reflow: Option<Reflow>,
    spinning: bool,
    /// Winner of the spin in flight. Dropped if the item list stops matching it.
    pending: Option<SelectionRecord>,
    disabled: bool,
    removal: PopRemovalController,
    events: Vec<WheelEvent>,
}

impl WheelState {
    fn new(items: &[Item]) -> Self {
        let layout = SliceLayout::equal_partition(items);
        Self {
            target_layout: layout.clone(),
            layout,
            ..Self::default()
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Layout as currently displayed, possibly mid-reflow.
    pub fn layout(&self) -> &SliceLayout {
        &self.layout
    }

    /// Layout the wheel settles on once any reflow finishes.
    pub fn target_layout(&self) -> &SliceLayout {
        &self.target_layout
    }

    pub fn is_reflowing(&self) -> bool {
        self.reflow.is_some()
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn removal(&self) -> &PopRemovalController {
        &self.removal
    }

    pub fn selection(&self) -> Option<&SelectionRecord> {
        self.removal.selection()
    }

    fn apply_reflow(&mut self, t: f64) {
        if let Some(reflow) = &self.reflow {
            self.layout = SliceLayout::blend(&reflow.from, &reflow.to, t);
        }
    }

    fn settle_reflow(&mut self) {
        if let Some(reflow) = self.reflow.take() {
            self.layout = reflow.to;
        }
    }

    fn finish_spin(&mut self) {
        self.spinning = false;
        self.rotation = normalize_angle(self.rotation);
        match self.pending.take() {
            Some(record) => {
                info!("Wheel landed on {:?}", record.value);
                self.events.push(WheelEvent::Result(record.value.clone()));
                self.removal.record_selection(record);
            }
            None => debug!("Spin ended without a winner; the items changed under it"),
        }
    }

    fn finish_pop(&mut self) {
        if let Some(record) = self.removal.finish_pop() {
            info!("Popped {:?} off the wheel", record.value);
            self.events.push(WheelEvent::Removed(record.value));
        }
    }
}

/// Slice being popped, as handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopOverlay {
    pub index: usize,
    pub progress: f64,
}

/// Snapshot of what to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelFrame<'a> {
    pub rotation: f64,
    pub layout: &'a SliceLayout,
    pub items: &'a [Item],
    pub pop: Option<PopOverlay>,
}

/// The wheel engine: items, owned state and the animation driver that moves it.
pub struct Wheel<S: FrameScheduler> {
    items: Vec<Item>,
    config: WheelConfig,
    state: WheelState,
    driver: AnimationDriver<WheelState, S>,
}

impl<S: FrameScheduler> Wheel<S> {
    pub fn new(items: Vec<Item>, config: WheelConfig, scheduler: S) -> Self {
        Self {
            state: WheelState::new(&items),
            items,
            config: config.sanitized(),
            driver: AnimationDriver::new(scheduler),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        self.driver.scheduler()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.driver.scheduler_mut()
    }

    pub fn is_animating(&self) -> bool {
        !self.driver.is_idle()
    }

    /// Replaces the item list. A count change between multi-slice wheels
    /// animates from the displayed layout to the new equal partition.
    ///
    /// A spin in flight keeps its winner only if the winner is still at the
    /// same index and its slice did not move; otherwise the spin lands
    /// without a result.
    pub fn set_items(&mut self, items: Vec<Item>, now: f64) {
        let old_len = self.items.len();
        self.items = items;
        let target = SliceLayout::equal_partition(&self.items);

        let winner_moved = self.state.pending.as_ref().map_or(false, |record| {
            !record.matches(&self.items)
                || self.state.target_layout.range_at(record.index) != target.range_at(record.index)
        });
        if winner_moved {
            debug!("Spin winner changed under the wheel, dropping its result");
            self.state.pending = None;
        }

        if should_reflow(old_len, self.items.len()) {
            debug!("Reflowing wheel from {} to {} slices", old_len, self.items.len());
            self.state.reflow = Some(Reflow {
                from: self.state.layout.clone(),
                to: target.clone(),
            });
            self.state.target_layout = target;
            self.driver.start(
                AnimationCategory::Reflow,
                AnimationSpec {
                    start_value: 0.0,
                    target_value: 1.0,
                    duration_ms: self.config.reflow_duration_ms,
                    easing: Easing::InOutCubic,
                },
                now,
                |state: &mut WheelState, t| state.apply_reflow(t),
                |state: &mut WheelState| state.settle_reflow(),
            );
        } else {
            self.driver.cancel(AnimationCategory::Reflow);
            self.state.reflow = None;
            self.state.layout = target.clone();
            self.state.target_layout = target;
        }

        self.invalidate_selection();
    }

    fn invalidate_selection(&mut self) {
        match self.state.removal.invalidate_stale(&self.items) {
            Invalidation::Kept => {}
            Invalidation::Cleared => debug!("Selection no longer on the wheel, clearing it"),
            Invalidation::ClearedWhilePopping => {
                debug!("Selection vanished mid-pop, cancelling the pop");
                self.driver.cancel(AnimationCategory::Pop);
            }
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.state.disabled = disabled;
    }

    /// Picks a winner and starts the spin toward it. `Ok(None)` means the
    /// wheel is disabled or busy and the trigger was ignored.
    pub fn spin<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Result<Option<SpinPlan>, ValidationError> {
        if self.state.disabled {
            debug!("Spin ignored: wheel is disabled");
            return Ok(None);
        }
        if self.state.spinning || self.state.removal.is_popping() {
            debug!("Spin ignored: wheel is busy");
            return Ok(None);
        }

        let index = selector::pick_index(&self.items, rng).map_err(|err| {
            warn!("Spin refused: {}", err);
            err
        })?;
        let plan = planner::plan(index, &self.state.target_layout, self.state.rotation, &self.config, rng)?;

        self.state.removal.discard_selection();
        self.state.spinning = true;

        self.state.pending = Some(SelectionRecord {
            index,
            value: self.items[index].value.clone(),
        });
        self.driver.start(
            AnimationCategory::Spin,
            AnimationSpec {
                start_value: plan.start_rotation,
                target_value: plan.target_rotation,
                duration_ms: plan.duration_ms,
                easing: Easing::OutQuint,
            },
            now,
            |state: &mut WheelState, rotation| state.rotation = rotation,
            |state: &mut WheelState| state.finish_spin(),
        );

        Ok(Some(plan))
    }

    /// The host is showing its confirmation prompt for the current result.
    pub fn await_confirmation(&mut self) -> bool {
        self.state.removal.await_confirmation()
    }

    /// Starts the pop animation for the selected slice if the request is
    /// fresh and the wheel is free to act on it.
    pub fn request_removal(&mut self, request: RemovalRequest, now: f64) -> bool {
        self.invalidate_selection();
        let decision = self
            .state
            .removal
            .begin_pop(request, self.state.disabled, self.state.spinning);

        match decision {
            RemovalDecision::Accepted(record) => {
                debug!("Popping slice {} ({:?})", record.index, record.value);
                self.driver.start(
                    AnimationCategory::Pop,
                    AnimationSpec {
                        start_value: 0.0,
                        target_value: 1.0,
                        duration_ms: self.config.pop_duration_ms,
                        easing: Easing::OutCubic,
                    },
                    now,
                    |state: &mut WheelState, progress| state.removal.set_pop_progress(progress),
                    |state: &mut WheelState| state.finish_pop(),
                );
                true
            }
            RemovalDecision::Ignored(reason) => {
                debug!("Removal request {:?} ignored: {:?}", request, reason);
                false
            }
        }
    }

    /// Cancels everything in flight and tells the host to restore its items.
    pub fn reset(&mut self) {
        self.driver.cancel_all();
        self.state.spinning = false;
        self.state.pending = None;
        self.state.settle_reflow();
        self.state.removal.reset();
        self.state.events.push(WheelEvent::Reset);
    }

    pub fn on_frame(&mut self, category: AnimationCategory, id: AnimationId, now: f64) -> FrameOutcome {
        self.driver.advance(category, id, now, &mut self.state)
    }

    pub fn frame(&self) -> WheelFrame<'_> {
        WheelFrame {
            rotation: self.state.rotation,
            layout: &self.state.layout,
            items: &self.items,
            pop: self
                .state
                .removal
                .pop_progress()
                .map(|(index, progress)| PopOverlay { index, progress }),
        }
    }

    pub fn drain_events(&mut self) -> Vec<WheelEvent> {
        mem::take(&mut self.state.events)
    }

    /// Stops every pending frame; used when the host tears the wheel down.
    pub fn shutdown(&mut self) {
        self.driver.cancel_all();
        self.state.spinning = false;
        self.state.pending = None;
    }
}
