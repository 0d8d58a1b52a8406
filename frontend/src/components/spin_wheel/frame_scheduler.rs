use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo_render::{request_animation_frame, AnimationFrame};
use yew::Callback;
use wheel_shared::shared_wheel_game::{
    AnimationCategory, AnimationId, FrameOutcome, FrameScheduler, Item, Wheel, WheelConfig,
};

pub type SharedWheel = Rc<RefCell<Wheel<RafScheduler>>>;

/// Drives wheel animations from `requestAnimationFrame`.
///
/// Each category holds at most one pending frame handle; dropping a handle
/// cancels the browser callback. Frame closures only hold a weak reference to
/// the wheel, so frames arriving after unmount do nothing.
pub struct RafScheduler {
    wheel: Weak<RefCell<Wheel<RafScheduler>>>,
    frames: HashMap<AnimationCategory, AnimationFrame>,
    on_frame: Callback<AnimationCategory>,
}

impl RafScheduler {
    pub fn new(wheel: Weak<RefCell<Wheel<RafScheduler>>>, on_frame: Callback<AnimationCategory>) -> Self {
        Self {
            wheel,
            frames: HashMap::new(),
            on_frame,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule(&mut self, category: AnimationCategory, id: AnimationId) {
        let wheel = self.wheel.clone();
        let on_frame = self.on_frame.clone();
        let handle = request_animation_frame(move |timestamp| {
            let Some(wheel) = wheel.upgrade() else {
                return;
            };
            let outcome = match wheel.try_borrow_mut() {
                Ok(mut wheel) => wheel.on_frame(category, id, timestamp),
                Err(_) => {
                    log::warn!("Wheel busy during {:?} frame, dropping it", category);
                    return;
                }
            };
            if outcome != FrameOutcome::Stale {
                on_frame.emit(category);
            }
        });
        self.frames.insert(category, handle);
    }

    fn cancel(&mut self, category: AnimationCategory) {
        self.frames.remove(&category);
    }
}

pub fn new_shared_wheel(items: Vec<Item>, config: WheelConfig, on_frame: Callback<AnimationCategory>) -> SharedWheel {
    Rc::new_cyclic(|weak| RefCell::new(Wheel::new(items, config, RafScheduler::new(weak.clone(), on_frame))))
}
