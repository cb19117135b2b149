pub mod gst;

pub use gst::GstEngine;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The media backend could not be brought up. Playback stays disabled
    /// for the lifetime of the process; everything else keeps working.
    #[error("audio engine unavailable: {0}")]
    Init(String),
}

/// The slice of a media engine this program drives: hand it a direct stream
/// URL, start, stop, set the volume. Buffering, decoding, and output belong
/// to the engine behind the trait.
pub trait AudioEngine: Send {
    fn load(&mut self, stream_url: &str);
    fn play(&mut self);
    fn stop(&mut self);
    /// `percent` is the user-facing 0-100 scale.
    fn set_volume(&mut self, percent: u32);
}
