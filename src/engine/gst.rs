//! GStreamer-backed engine. `playbin` (via `GstPlayer`) does the actual
//! network streaming, demuxing, and decoding.

use gstreamer_player::{Player, PlayerGMainContextSignalDispatcher, PlayerVideoRenderer};
use tracing::{debug, error, info, warn};

use super::{AudioEngine, EngineError};

pub struct GstEngine {
    player: Player,
}

impl GstEngine {
    pub fn new() -> Result<Self, EngineError> {
        gstreamer::init().map_err(|e| EngineError::Init(e.to_string()))?;

        let dispatcher = PlayerGMainContextSignalDispatcher::new(None);
        let player = Player::new(None::<PlayerVideoRenderer>, Some(dispatcher));

        // The dispatcher delivers player signals through the default GLib
        // main context; give it a thread that iterates it.
        std::thread::spawn(|| glib::MainLoop::new(None, false).run());

        player.connect_error(|_, err| {
            error!("Engine error: {}", err);
        });
        player.connect_warning(|_, err| {
            warn!("Engine warning: {}", err);
        });
        player.connect_end_of_stream(|_| {
            info!("End of stream");
        });

        Ok(Self { player })
    }
}

impl AudioEngine for GstEngine {
    fn load(&mut self, stream_url: &str) {
        debug!("Loading stream URI into engine");
        self.player.set_uri(Some(stream_url));
    }

    fn play(&mut self) {
        self.player.play();
    }

    fn stop(&mut self) {
        self.player.stop();
    }

    fn set_volume(&mut self, percent: u32) {
        // GstPlayer volume is linear with 1.0 at 100%.
        self.player
            .set_volume(f64::from(percent.min(100)) / 100.0);
    }
}
