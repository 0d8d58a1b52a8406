use std::f64::consts::PI;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::NodeRef;
use wheel_shared::shared_wheel_game::{AngleRange, PopVisual, WheelFrame};

use super::wheel_utils::{is_dark_mode, label_font_size, slice_color, truncate_label};

const SPARK_COUNT: usize = 7;
const SPARK_SPREAD: f64 = 0.12;
const MAX_LABEL_CHARS: usize = 16;

/// Canvas resolution settings. Drawing happens in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSettings {
    pub css_size: f64,
    pub pixel_ratio: f64,
}

struct Geometry {
    center_x: f64,
    center_y: f64,
    radius: f64,
}

fn context_2d(canvas_ref: &NodeRef) -> Option<CanvasRenderingContext2d> {
    let canvas = canvas_ref.cast::<HtmlCanvasElement>()?;
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

/// Draws one frame of the wheel. Does nothing if the canvas is not mounted.
pub fn draw_wheel(canvas_ref: &NodeRef, frame: &WheelFrame<'_>, settings: CanvasSettings, is_spinning: bool) {
    let Some(context) = context_2d(canvas_ref) else {
        debug!("Wheel canvas unavailable, skipping frame");
        return;
    };

    let _ = context.set_transform(settings.pixel_ratio, 0.0, 0.0, settings.pixel_ratio, 0.0, 0.0);
    let size = settings.css_size;
    context.clear_rect(0.0, 0.0, size, size);

    // Leave room for the pointer and the pop sparks
    let geometry = Geometry {
        center_x: size / 2.0,
        center_y: size / 2.0,
        radius: size / 2.0 - 40.0,
    };
    if geometry.radius <= 0.0 {
        return;
    }

    let dark = is_dark_mode();
    draw_backdrop(&context, &geometry, dark, is_spinning);

    if frame.layout.is_empty() {
        draw_placeholder(&context, &geometry, dark);
    } else {
        let count = frame.layout.len();
        let popped = frame.pop.map(|pop| pop.index);
        for (index, (value, range)) in frame.layout.iter().enumerate() {
            if popped == Some(index) {
                continue;
            }
            draw_slice(&context, &geometry, frame.rotation, range, value, slice_color(index, count), count);
        }
        draw_dividers(&context, &geometry, frame, dark);

        if let Some(pop) = frame.pop {
            if let Some((value, range)) = frame.layout.iter().nth(pop.index) {
                draw_pop(&context, &geometry, frame.rotation, range, value, slice_color(pop.index, count), count, pop.progress);
            }
        }
    }

    draw_hub(&context, &geometry, dark);
    draw_pointer(&context, &geometry, is_spinning);
}

fn draw_backdrop(context: &CanvasRenderingContext2d, g: &Geometry, dark: bool, is_spinning: bool) {
    let glow_intensity = if is_spinning { 0.25 } else { 0.15 };
    context.begin_path();
    if dark {
        context.set_fill_style_str(&format!("rgba(130, 100, 255, {})", glow_intensity));
    } else {
        context.set_fill_style_str(&format!("rgba(100, 130, 255, {})", glow_intensity));
    }
    let _ = context.arc(g.center_x, g.center_y, g.radius + 15.0, 0.0, 2.0 * PI);
    context.fill();

    context.begin_path();
    context.set_fill_style_str(if dark { "#1a1c2e" } else { "#f0f2ff" });
    let _ = context.arc(g.center_x, g.center_y, g.radius, 0.0, 2.0 * PI);
    context.fill();
}

fn draw_placeholder(context: &CanvasRenderingContext2d, g: &Geometry, dark: bool) {
    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_font("bold 18px 'Segoe UI', Roboto, system-ui, sans-serif");
    context.set_fill_style_str(if dark { "#9ca3af" } else { "#6b7280" });
    let _ = context.fill_text("Add items to spin", g.center_x, g.center_y + g.radius * 0.5);
}

fn wedge_path(context: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, start: f64, end: f64) {
    context.begin_path();
    context.move_to(x, y);
    let _ = context.arc(x, y, radius, start, end);
    context.close_path();
}

fn draw_label(context: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, angle: f64, value: &str, count: usize) {
    context.save();
    let _ = context.translate(x, y);
    let _ = context.rotate(angle);
    context.set_text_align("right");
    context.set_text_baseline("middle");
    context.set_font(&format!(
        "bold {:.0}px 'Segoe UI', Roboto, system-ui, sans-serif",
        label_font_size(count, radius)
    ));
    context.set_fill_style_str("#ffffff");
    context.set_shadow_color("rgba(0, 0, 0, 0.5)");
    context.set_shadow_blur(3.0);
    context.set_shadow_offset_x(1.0);
    context.set_shadow_offset_y(1.0);
    let _ = context.fill_text(&truncate_label(value, MAX_LABEL_CHARS), radius * 0.88, 0.0);
    context.restore();
}

fn draw_slice(
    context: &CanvasRenderingContext2d,
    g: &Geometry,
    rotation: f64,
    range: AngleRange,
    value: &str,
    color: &str,
    count: usize,
) {
    wedge_path(context, g.center_x, g.center_y, g.radius, range.start + rotation, range.end + rotation);
    context.set_fill_style_str(color);
    context.fill();
    draw_label(context, g.center_x, g.center_y, g.radius, range.mid() + rotation, value, count);
}

fn draw_dividers(context: &CanvasRenderingContext2d, g: &Geometry, frame: &WheelFrame<'_>, dark: bool) {
    if frame.layout.len() < 2 {
        return;
    }
    context.set_stroke_style_str(if dark { "rgba(255, 255, 255, 0.7)" } else { "rgba(255, 255, 255, 0.9)" });
    context.set_line_width(2.5);
    for (index, (_, range)) in frame.layout.iter().enumerate() {
        if frame.pop.map_or(false, |pop| pop.index == index) {
            continue;
        }
        let angle = range.start + frame.rotation;
        context.begin_path();
        context.move_to(g.center_x, g.center_y);
        context.line_to(g.center_x + g.radius * angle.cos(), g.center_y + g.radius * angle.sin());
        context.stroke();
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_pop(
    context: &CanvasRenderingContext2d,
    g: &Geometry,
    rotation: f64,
    range: AngleRange,
    value: &str,
    color: &str,
    count: usize,
    progress: f64,
) {
    let visual = PopVisual::at(progress);
    let mid = range.mid() + rotation;
    let offset = visual.offset * g.radius;
    let x = g.center_x + offset * mid.cos();
    let y = g.center_y + offset * mid.sin();
    let radius = g.radius * visual.scale;

    context.save();
    context.set_global_alpha(visual.opacity);
    context.set_shadow_color("rgba(255, 215, 130, 0.8)");
    context.set_shadow_blur(12.0 * visual.opacity);
    wedge_path(context, x, y, radius, range.start + rotation, range.end + rotation);
    context.set_fill_style_str(color);
    context.fill();
    context.set_shadow_blur(0.0);
    draw_label(context, x, y, radius, mid, value, count);
    context.restore();

    if let Some(spark) = visual.spark {
        context.save();
        context.set_global_alpha(1.0 - spark);
        context.set_stroke_style_str("rgba(255, 215, 130, 1)");
        context.set_line_width(2.0);
        context.set_line_cap("round");
        for i in 0..SPARK_COUNT {
            let angle = mid + (i as f64 - (SPARK_COUNT - 1) as f64 / 2.0) * SPARK_SPREAD;
            let inner = radius * (1.02 + 0.2 * spark);
            let outer = inner + g.radius * 0.12 * (1.0 - spark);
            context.begin_path();
            context.move_to(x + inner * angle.cos(), y + inner * angle.sin());
            context.line_to(x + outer * angle.cos(), y + outer * angle.sin());
            context.stroke();
        }
        context.restore();
    }
}

fn draw_hub(context: &CanvasRenderingContext2d, g: &Geometry, dark: bool) {
    let inner_radius = g.radius * 0.18;

    context.begin_path();
    context.set_fill_style_str(if dark { "#2d3142" } else { "#8b5cf6" });
    let _ = context.arc(g.center_x, g.center_y, inner_radius, 0.0, 2.0 * PI);
    context.fill();

    context.begin_path();
    context.set_stroke_style_str(if dark { "rgba(0, 0, 0, 0.5)" } else { "rgba(0, 0, 0, 0.2)" });
    context.set_line_width(2.0);
    let _ = context.arc(g.center_x, g.center_y, inner_radius, 0.0, 2.0 * PI);
    context.stroke();

    // Eight-point star
    let star_points = 8;
    let star_outer_radius = inner_radius * 0.7;
    let star_inner_radius = inner_radius * 0.3;
    context.begin_path();
    context.set_fill_style_str(if dark { "#a78bfa" } else { "#ffffff" });
    for i in 0..star_points * 2 {
        let angle = i as f64 * PI / star_points as f64;
        let r = if i % 2 == 0 { star_outer_radius } else { star_inner_radius };
        let x = g.center_x + r * angle.cos();
        let y = g.center_y + r * angle.sin();
        if i == 0 {
            context.move_to(x, y);
        } else {
            context.line_to(x, y);
        }
    }
    context.close_path();
    context.fill();

    context.begin_path();
    context.set_stroke_style_str(if dark { "rgba(180, 130, 255, 0.5)" } else { "rgba(130, 100, 255, 0.5)" });
    context.set_line_width(4.0);
    let _ = context.arc(g.center_x, g.center_y, g.radius - 2.0, 0.0, 2.0 * PI);
    context.stroke();
}

fn draw_pointer(context: &CanvasRenderingContext2d, g: &Geometry, is_spinning: bool) {
    context.save();
    context.set_shadow_color(if is_spinning { "rgba(255, 215, 130, 0.8)" } else { "rgba(255, 215, 0, 0.6)" });
    context.set_shadow_blur(if is_spinning { 10.0 } else { 4.0 });

    // Rounded triangle pointing down at the rim
    let pointer_width = 20.0;
    let pointer_height = 30.0;
    let corner = 5.0;
    let tip_y = g.center_y - g.radius + 5.0;
    let top_y = g.center_y - g.radius - pointer_height;
    let left_x = g.center_x - pointer_width;
    let right_x = g.center_x + pointer_width;

    context.begin_path();
    context.move_to(g.center_x, tip_y);
    context.line_to(left_x + corner, top_y + corner);
    context.quadratic_curve_to(left_x, top_y + corner, left_x, top_y);
    context.line_to(right_x - corner, top_y);
    context.quadratic_curve_to(right_x, top_y, right_x, top_y + corner);
    context.close_path();
    context.set_fill_style_str(if is_spinning { "#ffd700" } else { "#f59e0b" });
    context.fill();
    context.set_stroke_style_str("#e69500");
    context.set_line_width(1.5);
    context.stroke();
    context.restore();
}
