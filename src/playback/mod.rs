pub mod controller;

pub use controller::{PlaybackController, PlaybackPhase, PlaybackStatus, PlaybackStatusHandle};
