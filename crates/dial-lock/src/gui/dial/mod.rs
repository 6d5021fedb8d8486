pub mod model;
pub mod view;

pub use model::State;
pub use view::{draw, draw_dots};

pub const DIAL_MAX_SIZE: i32 = 320;
pub const DOTS_HEIGHT: i32 = 16;
pub const INDICATOR_SHADOW_OFFSET: f64 = 3.0;
