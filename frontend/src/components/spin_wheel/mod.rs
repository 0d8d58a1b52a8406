mod frame_scheduler;
mod wheel_canvas;
mod wheel_utils;

use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use yew::prelude::*;
use wheel_shared::shared_wheel_game::{AnimationCategory, Item, RemovalRequest, WheelEvent};

use crate::config::{canvas_backing_size, device_pixel_ratio, load_wheel_config};
use frame_scheduler::{new_shared_wheel, SharedWheel};
use wheel_canvas::{draw_wheel, CanvasSettings};
use wheel_utils::{now_ms, SpinButton};

pub use wheel_utils::ResultDisplay;

#[derive(Properties, PartialEq)]
pub struct SpinWheelProps {
    pub items: Vec<Item>,
    #[prop_or_default]
    pub on_result: Callback<String>,
    #[prop_or_default]
    pub on_remove: Callback<String>,
    #[prop_or_default]
    pub on_reset: Callback<()>,
    /// Bumped by the host each time the user confirms removing the result.
    #[prop_or_default]
    pub removal_request: u64,
    /// True while the host shows its confirmation prompt.
    #[prop_or_default]
    pub awaiting_confirmation: bool,
    #[prop_or_default]
    pub disabled: bool,
    /// CSS size in pixels; falls back to the configured canvas size.
    #[prop_or_default]
    pub size: Option<u32>,
}

pub enum Msg {
    Spin,
    Reset,
    Frame(AnimationCategory),
}

pub struct SpinWheel {
    wheel: SharedWheel,
    canvas_ref: NodeRef,
    rng: SmallRng,
    pixel_ratio: f64,
    error_message: Option<String>,
    busy: bool,
}

impl SpinWheel {
    fn css_size(&self, ctx: &Context<Self>) -> u32 {
        ctx.props()
            .size
            .unwrap_or_else(|| self.wheel.borrow().config().canvas_size)
    }

    fn is_busy(&self) -> bool {
        let wheel = self.wheel.borrow();
        wheel.state().is_spinning() || wheel.state().removal().is_popping()
    }

    fn draw(&self, ctx: &Context<Self>) {
        let settings = CanvasSettings {
            css_size: self.css_size(ctx) as f64,
            pixel_ratio: self.pixel_ratio,
        };
        let wheel = self.wheel.borrow();
        draw_wheel(&self.canvas_ref, &wheel.frame(), settings, wheel.state().is_spinning());
    }

    fn forward_events(&self, ctx: &Context<Self>) {
        let events = self.wheel.borrow_mut().drain_events();
        let props = ctx.props();
        for event in events {
            match event {
                WheelEvent::Result(value) => props.on_result.emit(value),
                WheelEvent::Removed(value) => props.on_remove.emit(value),
                WheelEvent::Reset => props.on_reset.emit(()),
            }
        }
    }

    /// Re-renders the view only when the spin button's state flips.
    fn refresh_busy(&mut self) -> bool {
        let busy = self.is_busy();
        let changed = busy != self.busy;
        self.busy = busy;
        changed
    }
}

impl Component for SpinWheel {
    type Message = Msg;
    type Properties = SpinWheelProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let wheel = new_shared_wheel(props.items.clone(), load_wheel_config(), ctx.link().callback(Msg::Frame));
        {
            let mut wheel = wheel.borrow_mut();
            wheel.set_disabled(props.disabled);
            if props.awaiting_confirmation {
                wheel.await_confirmation();
            }
        }

        Self {
            wheel,
            canvas_ref: NodeRef::default(),
            rng: SmallRng::from_entropy(),
            pixel_ratio: device_pixel_ratio(),
            error_message: None,
            busy: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Spin => {
                let result = self.wheel.borrow_mut().spin(now_ms(), &mut self.rng);
                match result {
                    Ok(Some(plan)) => {
                        debug!("Spinning toward slice {}", plan.chosen_index);
                        self.error_message = None;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!("Spin refused: {}", e);
                        self.error_message = Some(
                            e.message
                                .as_ref()
                                .map(|message| message.to_string())
                                .unwrap_or_else(|| e.code.to_string()),
                        );
                    }
                }
                self.refresh_busy();
                true
            }
            Msg::Reset => {
                self.wheel.borrow_mut().reset();
                self.error_message = None;
                self.draw(ctx);
                self.forward_events(ctx);
                self.refresh_busy();
                true
            }
            Msg::Frame(_) => {
                self.draw(ctx);
                self.forward_events(ctx);
                self.refresh_busy()
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        let now = now_ms();
        {
            let mut wheel = self.wheel.borrow_mut();
            if props.items != old_props.items {
                wheel.set_items(props.items.clone(), now);
            }
            if props.disabled != old_props.disabled {
                wheel.set_disabled(props.disabled);
            }
            if props.awaiting_confirmation && !old_props.awaiting_confirmation {
                wheel.await_confirmation();
            }
            if props.removal_request > old_props.removal_request {
                wheel.request_removal(RemovalRequest(props.removal_request), now);
            }
        }
        self.forward_events(ctx);
        self.refresh_busy();
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let css_size = self.css_size(ctx);
        let backing = canvas_backing_size(css_size, self.pixel_ratio);
        let spinning = self.wheel.borrow().state().is_spinning();
        let on_spin = ctx.link().callback(|_| Msg::Spin);
        let on_reset = ctx.link().callback(|_| Msg::Reset);

        html! {
            <div class="flex flex-col items-center w-full gap-6">
                <canvas
                    ref={self.canvas_ref.clone()}
                    width={backing.to_string()}
                    height={backing.to_string()}
                    style={format!("width: {}px; height: {}px;", css_size, css_size)}
                    class="max-w-full h-auto rounded-full transition-all duration-300"
                />
                <div class="w-full max-w-xs">
                    <SpinButton
                        is_spinning={spinning}
                        is_disabled={ctx.props().disabled || ctx.props().awaiting_confirmation || self.busy}
                        onclick={on_spin}
                    />
                </div>
                <button
                    onclick={on_reset}
                    class="text-sm text-gray-500 dark:text-gray-400 hover:text-blue-600 dark:hover:text-blue-400"
                >
                    { "Reset wheel" }
                </button>
                {
                    if let Some(message) = &self.error_message {
                        html! { <p class="text-sm text-red-500 dark:text-red-400">{ message }</p> }
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        // Canvas size or props may have changed; idle wheels need a redraw too
        self.draw(ctx);
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.wheel.borrow_mut().shutdown();
    }
}
