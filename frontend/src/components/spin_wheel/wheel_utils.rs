use gloo_utils::window;
use yew::prelude::*;

// Modern magical color palette
pub const SLICE_COLORS: [&str; 8] = [
    "#f97316", // Orange
    "#06b6d4", // Cyan
    "#8b5cf6", // Violet
    "#ec4899", // Pink
    "#22c55e", // Green
    "#eab308", // Amber
    "#3b82f6", // Blue
    "#ef4444", // Red
];

/// Color for the slice at `index` in a wheel of `count` slices. The last
/// slice skips the first color so it never touches a same-colored neighbour.
pub fn slice_color(index: usize, count: usize) -> &'static str {
    let len = SLICE_COLORS.len();
    let mut color = index % len;
    if count > 1 && index + 1 == count && color == 0 {
        color = len / 2;
    }
    SLICE_COLORS[color]
}

/// Shortens a label to `max_chars` characters, ending it with an ellipsis.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Label font size in CSS pixels, shrinking as slices get thinner.
pub fn label_font_size(slice_count: usize, radius: f64) -> f64 {
    let base = radius * 0.1;
    let scaled = if slice_count > 8 { base * 8.0 / slice_count as f64 } else { base };
    scaled.clamp(10.0, 22.0)
}

/// Timestamp on the same clock as `requestAnimationFrame`.
pub fn now_ms() -> f64 {
    window()
        .performance()
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn is_dark_mode() -> bool {
    window()
        .document()
        .and_then(|document| document.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false)
}

// Spin button component
#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub is_disabled: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let button_text = if props.is_spinning { "Spinning..." } else { "Spin" };
    let is_disabled = props.is_spinning || props.is_disabled;

    let button_class = if is_disabled {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 active:translate-y-0"
    };

    let spin_icon_class = if props.is_spinning {
        "inline-block mr-2 animate-spin"
    } else {
        "hidden"
    };

    html! {
        <div class={classes!("relative", "overflow-hidden", "rounded-full", "w-full", button_class)}>
            <button
                onclick={props.onclick.clone()}
                disabled={is_disabled}
                class="relative w-full px-8 py-4 font-bold text-lg transition-all duration-300 border-2 border-transparent hover:border-white focus:outline-none focus:ring-4 focus:ring-yellow-300 focus:ring-opacity-50 bg-transparent"
            >
                <div class="flex items-center justify-center relative z-10">
                    <svg class={spin_icon_class} xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                        <circle cx="12" cy="12" r="10" />
                        <path d="M12 6v6l4 2" />
                    </svg>
                    <span>{button_text}</span>
                </div>
            </button>
        </div>
    }
}

// Result panel with the remove/keep choice
#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub result: Option<String>,
    pub is_removing: bool,
    pub on_remove: Callback<MouseEvent>,
    pub on_keep: Callback<MouseEvent>,
}

#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    let Some(result) = &props.result else {
        return html! {};
    };

    html! {
        <div class="mt-8 mb-4 flex flex-col items-center justify-center">
            <div class="flex items-center justify-center px-6 py-4 rounded-xl bg-gradient-to-r from-violet-400 to-violet-600 border-2 border-violet-300 text-white font-bold text-xl shadow-lg animate-pulse">
                <span>{ format!("The wheel chose {}!", result) }</span>
            </div>
            <div class="flex gap-3 mt-4">
                <button
                    onclick={props.on_remove.clone()}
                    disabled={props.is_removing}
                    class="px-4 py-2 rounded-lg font-medium text-white bg-red-600 hover:bg-red-700 disabled:opacity-50"
                >
                    { "Remove it" }
                </button>
                <button
                    onclick={props.on_keep.clone()}
                    disabled={props.is_removing}
                    class="px-4 py-2 rounded-lg font-medium border border-gray-300 dark:border-gray-600 text-gray-900 dark:text-white"
                >
                    { "Keep it" }
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Pizza", 10), "Pizza");
        assert_eq!(truncate_label("Extremely long option", 8), "Extreme…");
        assert_eq!(truncate_label("ÄÖÜäöüßé", 8), "ÄÖÜäöüßé");
    }

    #[test]
    fn test_neighbouring_slices_differ() {
        for count in 2..=20 {
            for index in 0..count {
                let next = (index + 1) % count;
                assert_ne!(slice_color(index, count), slice_color(next, count), "count {} index {}", count, index);
            }
        }
    }

    #[test]
    fn test_label_font_size_bounds() {
        assert_eq!(label_font_size(4, 200.0), 20.0);
        assert!(label_font_size(40, 200.0) >= 10.0);
        assert!(label_font_size(40, 200.0) < label_font_size(4, 200.0));
    }
}
