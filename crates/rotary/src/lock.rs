use crate::dial::{DialAction, DialConfig, DialController, DialObserver, DialValue};
use crate::geometry::Point;
use crate::passcode::Passcode;

/// The passcode screen: a dial whose picks fill a [`Passcode`].
#[derive(Debug, Clone)]
pub struct LockScreen {
    pub dial: DialController,
    pub passcode: Passcode,
}

impl DialObserver for Passcode {
    fn value_picked(&mut self, value: DialValue) {
        if !self.append(value) {
            log::debug!("passcode complete, ignoring {value}");
        }
    }
}

impl LockScreen {
    pub fn new(config: DialConfig, code_length: usize) -> Self {
        Self {
            dial: DialController::new(config, DialValue::default()),
            passcode: Passcode::new(code_length),
        }
    }

    pub fn drag_begin(&mut self, center: Point, point: Point) -> DialAction {
        self.forward(|dial| dial.drag_begin(center, point))
    }

    pub fn drag_move(&mut self, point: Point) -> DialAction {
        self.forward(|dial| dial.drag_move(point))
    }

    pub fn drag_end(&mut self) -> DialAction {
        self.forward(DialController::drag_end)
    }

    /// Drops the last digit and rewinds the dial once nothing is left.
    pub fn delete(&mut self) -> DialAction {
        if self.passcode.remove_last().is_none() {
            return DialAction::default();
        }

        let mut action = if self.passcode.is_empty() {
            self.dial.set_value(DialValue::default())
        } else {
            DialAction::default()
        };
        action.should_redraw = true;
        action
    }

    pub fn reset(&mut self) -> DialAction {
        self.passcode.clear();
        let mut action = self.dial.set_value(DialValue::default());
        action.should_redraw = true;
        action
    }

    fn forward(&mut self, f: impl FnOnce(&mut DialController) -> DialAction) -> DialAction {
        let action = f(&mut self.dial);
        action.notify(&mut self.passcode);
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dial::DialRange;
    use crate::geometry::point_on_circle;
    use crate::passcode::EntryState;

    const CENTER: Point = Point { x: 0.0, y: 0.0 };

    fn lock() -> LockScreen {
        let config = DialConfig {
            range: DialRange::new(40),
            ..DialConfig::default()
        };
        LockScreen::new(config, 4)
    }

    /// Turns the dial from its resting value to `target` with a clockwise drag.
    fn pick(lock: &mut LockScreen, target: u32) {
        let from = lock.dial.rotation().rem_euclid(360.0);
        let mut to = f64::from(target) * 9.0;
        if to < from {
            to += 360.0;
        }
        lock.drag_begin(CENTER, point_on_circle(CENTER, 50.0, from));
        let mut angle = from;
        while angle < to {
            angle = (angle + 3.0).min(to);
            lock.drag_move(point_on_circle(CENTER, 50.0, angle));
        }
        lock.drag_end();
    }

    fn entered(lock: &LockScreen) -> Vec<u32> {
        lock.passcode.digits().iter().map(|d| **d).collect()
    }

    #[test]
    fn test_picks_fill_the_passcode() {
        let mut l = lock();
        for v in [3, 14, 27, 5] {
            pick(&mut l, v);
        }
        assert_eq!(entered(&l), vec![3, 14, 27, 5]);
        assert_eq!(l.passcode.state(), EntryState::Complete);

        pick(&mut l, 8);
        assert_eq!(entered(&l), vec![3, 14, 27, 5]);
        assert_eq!(*l.dial.value(), 8);
    }

    #[test]
    fn test_tap_without_motion_picks_current_value() {
        let mut l = lock();
        l.drag_begin(CENTER, point_on_circle(CENTER, 50.0, 123.0));
        l.drag_end();
        assert_eq!(entered(&l), vec![0]);
    }

    #[test]
    fn test_delete_to_empty_rewinds_dial() {
        let mut l = lock();
        pick(&mut l, 12);
        pick(&mut l, 20);

        l.delete();
        assert_eq!(entered(&l), vec![12]);
        assert_eq!(*l.dial.value(), 20);

        let action = l.delete();
        assert!(l.passcode.is_empty());
        assert_eq!(*l.dial.value(), 0);
        assert!(action.should_animate);
        assert_eq!(l.dial.rotation(), 0.0);

        assert_eq!(l.delete(), DialAction::default());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut l = lock();
        pick(&mut l, 7);
        pick(&mut l, 9);
        l.reset();
        assert!(l.passcode.is_empty());
        assert_eq!(*l.dial.value(), 0);
        assert_eq!(l.passcode.state(), EntryState::Entering(0));
    }
}
