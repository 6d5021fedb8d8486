use crate::geometry::{self, Point};
use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RANGE: u32 = 40;
/// One position per degree. Larger ranges cannot be told apart on the face.
pub const MAX_RANGE: u32 = 360;

/// A position on the dial, always below the configured range.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
)]
#[serde(transparent)]
pub struct DialValue(u32);

impl DialValue {
    pub fn new(value: u32) -> Self {
        Self(value)
    }
}

/// Number of positions on the dial, between 1 and [`MAX_RANGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deref, Into)]
pub struct DialRange(u32);

impl DialRange {
    /// Clamps `raw` into `1..=MAX_RANGE`; below one is a single fixed position.
    pub fn new(raw: i64) -> Self {
        Self(raw.clamp(1, i64::from(MAX_RANGE)) as u32)
    }

    pub fn step_angle(&self) -> f64 {
        geometry::step_angle(self.as_i64())
    }

    pub fn wrap(&self, raw: i64) -> DialValue {
        DialValue(raw.rem_euclid(self.as_i64()) as u32)
    }

    pub fn discretize(&self, rotation: f64) -> DialValue {
        DialValue(geometry::discretize(rotation, self.as_i64()) as u32)
    }

    pub fn rotation_of(&self, value: DialValue) -> f64 {
        f64::from(value.0) * self.step_angle()
    }

    fn as_i64(&self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for DialRange {
    fn default() -> Self {
        Self(DEFAULT_RANGE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialConfig {
    pub range: DialRange,
    pub snap: bool,
    pub show_numbers: bool,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            range: DialRange::default(),
            snap: true,
            show_numbers: true,
        }
    }
}

/// Receives dial notifications as the host forwards a [`DialAction`].
pub trait DialObserver {
    fn value_changed(&mut self, _value: DialValue) {}

    fn value_picked(&mut self, _value: DialValue) {}
}

/// What a single input did to the dial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialAction {
    /// Set when the selected value moved away from the last emitted one.
    pub changed: Option<DialValue>,
    /// Set once at the end of every drag gesture.
    pub picked: Option<DialValue>,
    pub should_redraw: bool,
    /// The rotation jumped to a new resting angle the host may tween to.
    pub should_animate: bool,
}

impl DialAction {
    pub fn notify(&self, observer: &mut impl DialObserver) {
        if let Some(value) = self.changed {
            observer.value_changed(value);
        }
        if let Some(value) = self.picked {
            observer.value_picked(value);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    center: Point,
    last_angle: f64,
}

#[derive(Debug, Clone)]
pub struct DialController {
    config: DialConfig,
    rotation: f64,
    session: Option<DragSession>,
    last_emitted: Option<DialValue>,
    value: DialValue,
}

impl DialController {
    pub fn new(config: DialConfig, value: DialValue) -> Self {
        let value = config.range.wrap(i64::from(*value));
        Self {
            config,
            rotation: config.range.rotation_of(value),
            session: None,
            last_emitted: Some(value),
            value,
        }
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }

    /// Accumulated clockwise rotation in degrees, not wrapped.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// The host-visible bound value.
    pub fn value(&self) -> DialValue {
        self.value
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn drag_begin(&mut self, center: Point, point: Point) -> DialAction {
        let last_angle = geometry::angle_cw(center, point);
        log::trace!("drag begin at {last_angle:.1}°");
        self.session = Some(DragSession { center, last_angle });
        self.emit(false)
    }

    pub fn drag_move(&mut self, point: Point) -> DialAction {
        let Some(session) = self.session.as_mut() else {
            return DialAction::default();
        };

        let angle = geometry::angle_cw(session.center, point);
        let delta = geometry::shortest_delta(session.last_angle, angle);
        session.last_angle = angle;
        self.rotation += delta;

        let mut action = self.emit(false);
        action.should_redraw = delta != 0.0 || action.changed.is_some();
        action
    }

    pub fn drag_end(&mut self) -> DialAction {
        if self.session.take().is_none() {
            return DialAction::default();
        }

        let mut action = self.emit(true);
        if self.config.snap {
            self.rotation = geometry::snap(self.rotation, i64::from(*self.config.range));
            action.should_animate = true;
        }
        log::debug!("picked {}", self.value);
        action
    }

    /// Moves the dial to `value` when it changed outside a gesture.
    /// While a drag is in progress the gesture keeps control.
    pub fn set_value(&mut self, value: DialValue) -> DialAction {
        let value = self.config.range.wrap(i64::from(*value));
        if self.session.is_some() || value == self.value {
            return DialAction::default();
        }

        self.value = value;
        self.rotation = self.config.range.rotation_of(value);
        DialAction {
            should_redraw: true,
            should_animate: self.config.snap,
            ..DialAction::default()
        }
    }

    /// Applies new settings, keeping the bound value when it still fits.
    pub fn reconfigure(&mut self, config: DialConfig) {
        self.config = config;
        self.session = None;
        self.value = config.range.wrap(i64::from(*self.value));
        self.last_emitted = Some(self.value);
        self.rotation = config.range.rotation_of(self.value);
    }

    fn emit(&mut self, did_end: bool) -> DialAction {
        let value = self.config.range.discretize(self.rotation);
        let changed = (self.last_emitted != Some(value)).then(|| {
            self.last_emitted = Some(value);
            value
        });
        self.value = value;

        DialAction {
            changed,
            picked: did_end.then_some(value),
            should_redraw: true,
            should_animate: false,
        }
    }
}
