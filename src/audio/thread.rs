use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use crate::client::ApiClient;
use crate::events::AppEvent;
use crate::transport::{MediaEvent, SourceId};

use super::sink::{Bytes, create_sink_at, probe_duration};
use super::types::{AudioCmd, AudioError};

/// How often the position is reported while playing.
const TICK: Duration = Duration::from_millis(250);

/// Playback position bookkeeping: a base offset plus the time since the last start.
#[derive(Debug, Default)]
pub(super) struct Clock {
    base: Duration,
    started_at: Option<Instant>,
}

impl Clock {
    pub(super) fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub(super) fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.base += st.elapsed();
        }
    }

    /// Jump to `at`, keeping the running state.
    pub(super) fn reset(&mut self, at: Duration) {
        self.base = at;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    pub(super) fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(super) fn position(&self) -> Duration {
        self.base + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }
}

/// Fixed-period deadline that fires however busy the command channel is.
#[derive(Debug)]
pub(super) struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    pub(super) fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// Time left until the next tick, zero when overdue.
    pub(super) fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// True once per elapsed deadline; schedules the next one from `now`.
    pub(super) fn due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now + self.period;
        true
    }
}

struct Deck {
    stream: Option<OutputStream>,
    client: ApiClient,
    loopback: Sender<AudioCmd>,
    events: Sender<AppEvent>,

    source: Option<SourceId>,
    bytes: Option<Bytes>,
    failure: Option<String>,
    sink: Option<Sink>,
    clock: Clock,
    duration: Option<Duration>,
    volume: f32,
    /// Play was requested before the source finished loading.
    want_play: bool,
    ended: bool,
}

impl Deck {
    fn emit(&self, event: MediaEvent) {
        let _ = self.events.send(AppEvent::Media(event));
    }

    fn drop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
    }

    fn clear(&mut self) {
        self.drop_sink();
        self.bytes = None;
        self.failure = None;
        self.clock = Clock::default();
        self.duration = None;
        self.want_play = false;
        self.ended = false;
    }

    fn load(&mut self, source: SourceId, src: String) {
        self.clear();
        self.source = Some(source);

        let client = self.client.clone();
        let tx = self.loopback.clone();
        thread::spawn(move || {
            debug!(%src, ?source, "fetching source");
            let bytes = client
                .fetch_bytes(&src)
                .map(Arc::from)
                .map_err(AudioError::from);
            let _ = tx.send(AudioCmd::Loaded { source, bytes });
        });
    }

    /// Build a paused sink over the current bytes, starting at `at`.
    fn rebuild(&mut self, at: Duration) -> Result<(), AudioError> {
        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| AudioError::Stream("unavailable".into()))?;
        let Some(bytes) = self.bytes.as_ref() else {
            return Ok(());
        };
        let (sink, decoded) = create_sink_at(stream, bytes, at, self.volume)?;
        if self.duration.is_none() {
            self.duration = decoded.or_else(|| probe_duration(bytes));
        }
        self.drop_sink();
        self.sink = Some(sink);
        Ok(())
    }

    fn loaded(&mut self, source: SourceId, bytes: Result<Bytes, AudioError>) {
        if self.source != Some(source) {
            debug!(?source, "dropping bytes for a replaced source");
            return;
        }

        let opened = bytes.and_then(|b| {
            self.bytes = Some(b);
            self.rebuild(self.clock.position())
        });
        match opened {
            Ok(()) => {
                if let Some(duration) = self.duration {
                    self.emit(MediaEvent::MetadataLoaded { source, duration });
                }
                if self.want_play {
                    self.start(source);
                }
            }
            Err(e) => {
                warn!(error = %e, ?source, "could not load source");
                let reason = e.to_string();
                self.failure = Some(reason.clone());
                if self.want_play {
                    self.want_play = false;
                    self.emit(MediaEvent::PlayRejected { source, reason });
                }
            }
        }
    }

    fn start(&mut self, source: SourceId) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        sink.play();
        self.clock.start();
        self.want_play = false;
        self.emit(MediaEvent::Playing { source });
    }

    fn play(&mut self) {
        let Some(source) = self.source else {
            return;
        };
        if let Some(reason) = self.failure.clone() {
            self.emit(MediaEvent::PlayRejected { source, reason });
            return;
        }
        if self.sink.is_none() {
            self.want_play = true;
            return;
        }
        if self.ended {
            self.ended = false;
            self.clock.reset(Duration::ZERO);
            if let Err(e) = self.rebuild(Duration::ZERO) {
                self.emit(MediaEvent::PlayRejected {
                    source,
                    reason: e.to_string(),
                });
                return;
            }
        }
        self.start(source);
    }

    fn pause(&mut self) {
        self.want_play = false;
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        self.clock.pause();
        if let Some(source) = self.source {
            self.emit(MediaEvent::Paused { source });
        }
    }

    fn seek(&mut self, position: Duration) {
        let Some(source) = self.source else {
            return;
        };
        let position = self.duration.map_or(position, |d| position.min(d));
        self.ended = false;
        self.clock.reset(position);

        if self.bytes.is_some() {
            if let Err(e) = self.rebuild(position) {
                warn!(error = %e, "seek failed");
                return;
            }
            if self.clock.is_running() {
                if let Some(s) = self.sink.as_ref() {
                    s.play();
                }
            }
        }
        self.emit(MediaEvent::TimeUpdate { source, position });
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(volume);
        }
    }

    fn tick(&mut self) {
        if !self.clock.is_running() {
            return;
        }
        let (Some(source), Some(sink)) = (self.source, self.sink.as_ref()) else {
            return;
        };
        if sink.empty() {
            self.clock.pause();
            self.ended = true;
            debug!(?source, "source ended");
            self.emit(MediaEvent::Ended { source });
        } else {
            self.emit(MediaEvent::TimeUpdate {
                source,
                position: self.clock.position(),
            });
        }
    }

    fn fade_out(&self, fade_out_ms: u64) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if fade_out_ms > 0 && self.clock.is_running() {
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(self.volume * (1.0 - t));
                thread::sleep(Duration::from_millis(step_ms));
            }
        }
        sink.set_volume(0.0);
        sink.stop();
    }
}

pub(super) fn spawn_audio_thread(
    client: ApiClient,
    rx: Receiver<AudioCmd>,
    loopback: Sender<AudioCmd>,
    events: Sender<AppEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when the stream is dropped, which would land on the TUI.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!(error = %e, "no audio output device");
                None
            }
        };

        let mut deck = Deck {
            stream,
            client,
            loopback,
            events,
            source: None,
            bytes: None,
            failure: None,
            sink: None,
            clock: Clock::default(),
            duration: None,
            volume: 1.0,
            want_play: false,
            ended: false,
        };

        let mut ticker = Ticker::new(TICK, Instant::now());
        loop {
            match rx.recv_timeout(ticker.remaining(Instant::now())) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { source, src } => deck.load(source, src),
                    AudioCmd::Loaded { source, bytes } => deck.loaded(source, bytes),
                    AudioCmd::Unload => {
                        deck.clear();
                        deck.source = None;
                    }
                    AudioCmd::Play => deck.play(),
                    AudioCmd::Pause => deck.pause(),
                    AudioCmd::Seek(position) => deck.seek(position),
                    AudioCmd::SetVolume(volume) => deck.set_volume(volume),
                    AudioCmd::Quit { fade_out_ms } => {
                        deck.fade_out(fade_out_ms);
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            if ticker.due(Instant::now()) {
                deck.tick();
            }
        }
    })
}
