use gloo_utils::window;
use log::warn;
use wheel_shared::shared_wheel_game::WheelConfig;

pub const WHEEL_CONFIG_ELEMENT_ID: &str = "wheel-config";

/// Reads the optional JSON tuning block embedded in the page.
pub fn load_wheel_config() -> WheelConfig {
    let text = window()
        .document()
        .and_then(|document| document.get_element_by_id(WHEEL_CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());

    match text {
        Some(text) if !text.trim().is_empty() => parse_wheel_config(&text),
        _ => WheelConfig::default(),
    }
}

pub fn parse_wheel_config(text: &str) -> WheelConfig {
    serde_json::from_str(text).unwrap_or_else(|e| {
        warn!("Ignoring invalid wheel config: {}", e);
        WheelConfig::default()
    })
}

pub fn device_pixel_ratio() -> f64 {
    let ratio = window().device_pixel_ratio();
    if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 }
}

/// Size of the canvas backing store for a CSS size at the given pixel ratio.
pub fn canvas_backing_size(css_size: u32, pixel_ratio: f64) -> u32 {
    (css_size as f64 * pixel_ratio).round().max(1.0) as u32
}
