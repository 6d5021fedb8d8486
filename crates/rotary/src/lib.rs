pub mod dial;
pub mod geometry;
pub mod lock;
pub mod passcode;
pub mod scene;
pub mod settings;
pub mod spring;

pub use dial::{DialAction, DialConfig, DialController, DialObserver, DialRange, DialValue};
pub use geometry::Point;
pub use lock::LockScreen;
pub use passcode::{EntryState, Passcode};
