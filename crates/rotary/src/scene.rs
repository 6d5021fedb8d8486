//! Drawable description of the lock screen, computed from state alone.
//!
//! Sizes are fractions of the dial's square side so the renderer only has to
//! scale and paint.

use crate::dial::DialRange;
use crate::geometry::{self, FULL_TURN, Point};

pub const TICK_COUNT: u32 = 200;
pub const FACE_RADIUS: f64 = 0.48;
pub const HUB_RADIUS: f64 = 0.17;
pub const BORDER_WIDTH: f64 = 0.01;
pub const TICK_RING: f64 = 0.98;
pub const TICK_WIDTH: f64 = 0.006;
pub const MINOR_TICK_LENGTH: f64 = 0.035;
pub const MAJOR_TICK_LENGTH: f64 = 0.062;
pub const MINOR_TICK_ALPHA: f64 = 0.32;
pub const MAJOR_TICK_ALPHA: f64 = 0.75;
pub const LABEL_RING: f64 = 0.72;
pub const LABEL_SIZE: f64 = 0.07;
pub const LABEL_ALPHA: f64 = 0.85;
pub const INDICATOR_OFFSET: f64 = 0.52;
pub const INDICATOR_WIDTH: f64 = 0.10;
pub const INDICATOR_HEIGHT: f64 = 0.07;
pub const DEFAULT_LABEL_EVERY: u32 = 5;

pub const DOT_DIAMETER: f64 = 10.0;
pub const DOT_SPACING: f64 = 12.0;
pub const DOT_FILLED_ALPHA: f64 = 0.95;
pub const DOT_EMPTY_ALPHA: f64 = 0.35;

/// Where the dial sits inside a widget of the given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialLayout {
    pub center: Point,
    pub size: f64,
}

impl DialLayout {
    pub fn fit(width: f64, height: f64) -> Self {
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            size: width.min(height).max(0.0),
        }
    }

    pub fn radius(&self) -> f64 {
        self.size * FACE_RADIUS
    }

    /// Drags only start on the face.
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance_to(point) <= self.radius()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneInput {
    pub layout: DialLayout,
    pub range: DialRange,
    /// Displayed rotation, which lags the controller while a snap animates.
    pub rotation: f64,
    pub show_numbers: bool,
    pub label_every: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub inner: Point,
    pub outer: Point,
    pub width: f64,
    pub alpha: f64,
    pub major: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub center: Point,
    pub font_size: f64,
    pub alpha: f64,
}

/// Triangle pinned to the top of the dial, pointing at the selected value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub apex: Point,
    pub base_left: Point,
    pub base_right: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialScene {
    pub center: Point,
    pub face_radius: f64,
    pub hub_radius: f64,
    pub border_width: f64,
    pub ticks: Vec<Tick>,
    pub labels: Vec<Label>,
    pub indicator: Indicator,
}

impl DialScene {
    pub fn build(input: &SceneInput) -> Self {
        let layout = input.layout;
        Self {
            center: layout.center,
            face_radius: layout.radius(),
            hub_radius: layout.size * HUB_RADIUS,
            border_width: layout.size * BORDER_WIDTH,
            ticks: ticks(input),
            labels: labels(input),
            indicator: indicator(&layout),
        }
    }
}

/// How many ticks apart the major ticks are for a given range.
pub fn major_every(range: DialRange) -> u32 {
    (TICK_COUNT / *range).max(1)
}

fn ticks(input: &SceneInput) -> Vec<Tick> {
    let layout = input.layout;
    let ring = layout.radius() * TICK_RING;
    let every = major_every(input.range);

    (0..TICK_COUNT)
        .map(|i| {
            let major = i % every == 0;
            let length = layout.size * if major { MAJOR_TICK_LENGTH } else { MINOR_TICK_LENGTH };
            let position = f64::from(i) * FULL_TURN / f64::from(TICK_COUNT);
            let angle = face_angle(position, input.rotation);
            Tick {
                inner: geometry::point_on_circle(layout.center, ring - length, angle),
                outer: geometry::point_on_circle(layout.center, ring, angle),
                width: layout.size * TICK_WIDTH,
                alpha: if major { MAJOR_TICK_ALPHA } else { MINOR_TICK_ALPHA },
                major,
            }
        })
        .collect()
}

fn labels(input: &SceneInput) -> Vec<Label> {
    if !input.show_numbers {
        return Vec::new();
    }

    let layout = input.layout;
    let radius = layout.radius() * LABEL_RING - layout.size * BORDER_WIDTH;
    let step = input.range.step_angle();

    (0..*input.range)
        .step_by(input.label_every.max(1) as usize)
        .map(|n| Label {
            text: n.to_string(),
            center: geometry::point_on_circle(
                layout.center,
                radius,
                face_angle(f64::from(n) * step, input.rotation),
            ),
            font_size: layout.size * LABEL_SIZE,
            alpha: LABEL_ALPHA,
        })
        .collect()
}

/// Positions on the face run clockwise on screen, the opposite sense of
/// [`geometry::angle_cw`], and the face turns with the finger. Position `p`
/// reaches the top when the rotation equals `p`.
fn face_angle(position: f64, rotation: f64) -> f64 {
    rotation - position
}

fn indicator(layout: &DialLayout) -> Indicator {
    let top = layout.center.y - layout.size * INDICATOR_OFFSET;
    let half_width = layout.size * INDICATOR_WIDTH / 2.0;
    let half_height = layout.size * INDICATOR_HEIGHT / 2.0;
    Indicator {
        apex: Point::new(layout.center.x, top - half_height),
        base_left: Point::new(layout.center.x - half_width, top + half_height),
        base_right: Point::new(layout.center.x + half_width, top + half_height),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Point,
    pub radius: f64,
    pub alpha: f64,
}

/// Row of `count` dots centred on `origin`; the first `filled` are lit.
pub fn passcode_dots(origin: Point, count: usize, filled: usize) -> Vec<Dot> {
    let pitch = DOT_DIAMETER + DOT_SPACING;
    let total = count as f64 * DOT_DIAMETER + count.saturating_sub(1) as f64 * DOT_SPACING;
    let left = origin.x - total / 2.0 + DOT_DIAMETER / 2.0;

    (0..count)
        .map(|i| Dot {
            center: Point::new(left + i as f64 * pitch, origin.y),
            radius: DOT_DIAMETER / 2.0,
            alpha: if i < filled { DOT_FILLED_ALPHA } else { DOT_EMPTY_ALPHA },
        })
        .collect()
}
