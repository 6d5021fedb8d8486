use super::INDICATOR_SHADOW_OFFSET;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use rotary::Point;
use rotary::scene::{DialScene, Dot, Indicator, Label, Tick};
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn circle(cr: &Context, center: Point, radius: f64) {
    cr.new_sub_path();
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
}

pub fn draw(cr: &Context, scene: &DialScene, colors: &ThemeColors) -> Result<(), cairo::Error> {
    if scene.face_radius <= 0.0 {
        return Ok(());
    }

    draw_disc(
        cr,
        scene.center,
        scene.face_radius,
        colors.face,
        colors.face_border,
        scene.border_width,
    )?;
    for tick in &scene.ticks {
        draw_tick(cr, tick, colors)?;
    }
    for label in &scene.labels {
        draw_label(cr, label, colors)?;
    }
    draw_disc(
        cr,
        scene.center,
        scene.hub_radius,
        colors.hub,
        colors.hub_border,
        scene.border_width,
    )?;
    draw_indicator(cr, &scene.indicator, colors)
}

/// Filled circle with the border drawn inside its edge.
fn draw_disc(
    cr: &Context,
    center: Point,
    radius: f64,
    fill: Srgba<f64>,
    border: Srgba<f64>,
    border_width: f64,
) -> Result<(), cairo::Error> {
    set_color(cr, fill);
    circle(cr, center, radius);
    cr.fill()?;

    set_color(cr, border);
    cr.set_line_width(border_width);
    circle(cr, center, (radius - border_width / 2.0).max(0.0));
    cr.stroke()
}

fn draw_tick(cr: &Context, tick: &Tick, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.ink_with_alpha(tick.alpha));
    cr.set_line_width(tick.width);
    cr.set_line_cap(cairo::LineCap::Butt);
    cr.move_to(tick.inner.x, tick.inner.y);
    cr.line_to(tick.outer.x, tick.outer.y);
    cr.stroke()
}

fn draw_label(cr: &Context, label: &Label, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_color(cr, colors.ink_with_alpha(label.alpha));
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(label.font_size);
    if let Ok(ext) = cr.text_extents(&label.text) {
        // center the ink box, not the advance box
        cr.move_to(
            label.center.x - ext.width() / 2.0 - ext.x_bearing(),
            label.center.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(&label.text)?;
    }
    Ok(())
}

fn triangle(cr: &Context, indicator: &Indicator, dy: f64) {
    cr.move_to(indicator.apex.x, indicator.apex.y + dy);
    cr.line_to(indicator.base_right.x, indicator.base_right.y + dy);
    cr.line_to(indicator.base_left.x, indicator.base_left.y + dy);
    cr.close_path();
}

fn draw_indicator(
    cr: &Context,
    indicator: &Indicator,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    set_color(cr, colors.shadow);
    triangle(cr, indicator, INDICATOR_SHADOW_OFFSET);
    cr.fill()?;

    set_color(cr, colors.indicator);
    triangle(cr, indicator, 0.0);
    cr.fill()
}

pub fn draw_dots(cr: &Context, dots: &[Dot], colors: &ThemeColors) -> Result<(), cairo::Error> {
    for dot in dots {
        set_color(cr, colors.ink_with_alpha(dot.alpha));
        circle(cr, dot.center, dot.radius);
        cr.fill()?;
    }
    Ok(())
}
