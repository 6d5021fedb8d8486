use crate::config::{Config, Feedback};
use rotary::scene::{self, DialLayout, DialScene, Dot, SceneInput};
use rotary::spring::SpringAnimation;
use rotary::{DialAction, LockScreen, Point};
use std::time::Duration;

/// Everything the lock screen draws from, shared between the component and
/// the draw callbacks.
pub struct State {
    pub lock: LockScreen,
    pub face: SpringAnimation,
    pub layout: DialLayout,
    pub label_every: u32,
    pub feedback: Feedback,
}

impl State {
    pub fn new(config: &Config) -> Self {
        let lock = LockScreen::new(config.dial_config(), config.code_length());
        let face = SpringAnimation::snap(lock.dial.rotation());
        Self {
            lock,
            face,
            layout: DialLayout::fit(0.0, 0.0),
            label_every: config.dial.label_every,
            feedback: config.dial.feedback,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.layout = DialLayout::fit(width, height);
    }

    /// Presses outside the face are not dial gestures.
    pub fn drag_begin(&mut self, point: Point) -> DialAction {
        if !self.layout.contains(point) {
            return DialAction::default();
        }
        let action = self.lock.drag_begin(self.layout.center, point);
        self.sync_face(action)
    }

    pub fn drag_move(&mut self, point: Point) -> DialAction {
        let action = self.lock.drag_move(point);
        self.sync_face(action)
    }

    pub fn drag_end(&mut self) -> DialAction {
        let action = self.lock.drag_end();
        self.sync_face(action)
    }

    pub fn delete(&mut self) -> DialAction {
        let action = self.lock.delete();
        self.sync_face(action)
    }

    pub fn reset(&mut self) -> DialAction {
        let action = self.lock.reset();
        self.sync_face(action)
    }

    pub fn reconfigure(&mut self, config: &Config) {
        self.lock.dial.reconfigure(config.dial_config());
        self.lock.passcode.resize(config.code_length());
        self.label_every = config.dial.label_every;
        self.feedback = config.dial.feedback;
        self.face.jump_to(self.lock.dial.rotation());
    }

    /// Advances the snap animation. Returns `true` while the face is moving.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.face.is_settled() {
            return false;
        }
        self.face.step(dt);
        true
    }

    pub fn scene(&self) -> DialScene {
        let config = self.lock.dial.config();
        DialScene::build(&SceneInput {
            layout: self.layout,
            range: config.range,
            rotation: self.face.position(),
            show_numbers: config.show_numbers,
            label_every: self.label_every,
        })
    }

    pub fn dots(&self, origin: Point) -> Vec<Dot> {
        scene::passcode_dots(origin, self.lock.passcode.capacity(), self.lock.passcode.len())
    }

    pub fn caption(&self) -> String {
        self.lock.passcode.to_string()
    }

    fn sync_face(&mut self, action: DialAction) -> DialAction {
        let rotation = self.lock.dial.rotation();
        if rotation != self.face.target() {
            if action.should_animate {
                self.face.animate_to(rotation);
            } else {
                self.face.jump_to(rotation);
            }
        }
        action
    }
}
