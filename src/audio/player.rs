use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::client::ApiClient;
use crate::events::AppEvent;
use crate::transport::{MediaElement, SourceId};

use super::thread::spawn_audio_thread;
use super::types::AudioCmd;

/// Handle to the audio thread. Cheap to call from the UI thread; every method
/// only posts a command.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    last_source: u64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(client: ApiClient, events: Sender<AppEvent>) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let audio_handle = spawn_audio_thread(client, rx, tx.clone(), events);

        Self {
            tx,
            last_source: 0,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl MediaElement for AudioPlayer {
    fn set_source(&mut self, src: Option<&str>) -> SourceId {
        self.last_source += 1;
        let source = SourceId(self.last_source);
        let cmd = match src {
            Some(src) => AudioCmd::Load {
                source,
                src: src.to_string(),
            },
            None => AudioCmd::Unload,
        };
        let _ = self.send(cmd);
        source
    }

    fn play(&mut self) {
        let _ = self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        let _ = self.send(AudioCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.send(AudioCmd::SetVolume(volume.clamp(0.0, 1.0)));
    }
}
