use web_sys::HtmlInputElement;
use yew::prelude::*;
use wheel_shared::shared_wheel_game::Item;

use crate::components::{ResultDisplay, SpinWheel};
use crate::styles;

pub fn default_items() -> Vec<Item> {
    vec![
        Item::new("Pizza", 1.0),
        Item::new("Sushi", 2.0),
        Item::new("Tacos", 1.0),
        Item::new("Curry", 1.0),
        Item::new("Ramen", 3.0),
    ]
}

pub fn without_value(items: &[Item], value: &str) -> Vec<Item> {
    items.iter().filter(|item| item.value != value).cloned().collect()
}

/// Demo host: fixed starting items, a result panel that confirms removal,
/// and a switch to disable the wheel.
#[function_component(App)]
pub fn app() -> Html {
    let items = use_state(default_items);
    let result = use_state(|| None::<String>);
    let removal_request = use_state(|| 0u64);
    let is_removing = use_state(|| false);
    let disabled = use_state(|| false);

    let on_result = {
        let result = result.clone();
        Callback::from(move |value: String| result.set(Some(value)))
    };

    let on_remove = {
        let items = items.clone();
        let result = result.clone();
        let is_removing = is_removing.clone();
        Callback::from(move |value: String| {
            items.set(without_value(&items, &value));
            result.set(None);
            is_removing.set(false);
        })
    };

    let on_reset = {
        let items = items.clone();
        let result = result.clone();
        let is_removing = is_removing.clone();
        Callback::from(move |_: ()| {
            items.set(default_items());
            result.set(None);
            is_removing.set(false);
        })
    };

    let on_confirm_remove = {
        let removal_request = removal_request.clone();
        let is_removing = is_removing.clone();
        Callback::from(move |_: MouseEvent| {
            removal_request.set(*removal_request + 1);
            is_removing.set(true);
        })
    };

    let on_keep = {
        let result = result.clone();
        Callback::from(move |_: MouseEvent| result.set(None))
    };

    let on_toggle_disabled = {
        let disabled = disabled.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            disabled.set(input.checked());
        })
    };

    html! {
        <div class={styles::CONTAINER}>
            <div class="max-w-xl mx-auto py-10 flex flex-col items-center gap-6">
                <h1 class={styles::TEXT_H1}>{ "Spin the Wheel" }</h1>
                <div class={classes!(styles::CARD, "w-full", "flex", "flex-col", "items-center")}>
                    <SpinWheel
                        items={(*items).clone()}
                        on_result={on_result}
                        on_remove={on_remove}
                        on_reset={on_reset}
                        removal_request={*removal_request}
                        awaiting_confirmation={result.is_some()}
                        disabled={*disabled}
                    />
                    <ResultDisplay
                        result={(*result).clone()}
                        is_removing={*is_removing || *disabled}
                        on_remove={on_confirm_remove}
                        on_keep={on_keep}
                    />
                </div>
                <label class={classes!(styles::TEXT_LABEL, "flex", "items-center", "gap-2")}>
                    <input type="checkbox" checked={*disabled} onchange={on_toggle_disabled} />
                    { "Disable wheel" }
                </label>
                <p class={styles::TEXT_SMALL}>{ format!("{} items on the wheel", items.len()) }</p>
            </div>
        </div>
    }
}
