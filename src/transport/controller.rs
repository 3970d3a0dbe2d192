use std::time::Duration;

use tracing::{debug, info};

use crate::catalog::{NO_TRACK_ARTIST, NO_TRACK_TITLE, TrackDescriptor, UNKNOWN_ARTIST, UNTITLED};
use crate::views::DualViewSync;

use super::time::clamp_position;
use super::types::{
    CoverLoader, CoverTicket, MediaElement, MediaEvent, SourceId, Toggle, TransportSnapshot,
};

fn or_placeholder(v: &str, placeholder: &str) -> String {
    let v = v.trim();
    if v.is_empty() {
        placeholder.to_string()
    } else {
        v.to_string()
    }
}

/// Owns the single media session, the playlist and the position in it.
///
/// Every state change is pushed to both presentation surfaces before the
/// method returns, so the compact bar and the expanded view always agree.
pub struct TransportController<M: MediaElement, C: CoverLoader> {
    media: M,
    covers: C,
    default_cover: String,

    playlist: Vec<TrackDescriptor>,
    index: Option<usize>,
    source: Option<SourceId>,
    playing_file: Option<String>,

    title: String,
    artist: String,
    cover: String,
    pending_cover: Option<(CoverTicket, String)>,
    last_ticket: u64,

    position: Duration,
    duration: Option<Duration>,
    paused: bool,
    toggle: Toggle,
    volume: u8,
    bar_visible: bool,

    views: DualViewSync,
}

impl<M: MediaElement, C: CoverLoader> TransportController<M, C> {
    pub fn new(media: M, covers: C, default_cover: impl Into<String>, volume: u8) -> Self {
        let default_cover = default_cover.into();
        let mut this = Self {
            media,
            covers,
            cover: default_cover.clone(),
            default_cover,
            playlist: Vec::new(),
            index: None,
            source: None,
            playing_file: None,
            title: NO_TRACK_TITLE.to_string(),
            artist: NO_TRACK_ARTIST.to_string(),
            pending_cover: None,
            last_ticket: 0,
            position: Duration::ZERO,
            duration: None,
            paused: true,
            toggle: Toggle::Play,
            volume: 100,
            bar_visible: false,
            views: DualViewSync::default(),
        };
        this.set_volume(volume);
        this
    }

    pub fn playlist(&self) -> &[TrackDescriptor] {
        &self.playlist
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// File identifier of the loaded track, cleared by `stop`.
    pub fn playing_file(&self) -> Option<&str> {
        self.playing_file.as_deref()
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn views(&self) -> &DualViewSync {
        &self.views
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn covers(&self) -> &C {
        &self.covers
    }

    pub fn snapshot(&self) -> TransportSnapshot {
        TransportSnapshot {
            has_source: self.source.is_some(),
            bar_visible: self.bar_visible,
            index: self.index,
            title: self.title.clone(),
            artist: self.artist.clone(),
            cover: self.cover.clone(),
            position: self.position,
            duration: self.duration,
            toggle: self.toggle,
            volume: self.volume,
        }
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.views.sync(&snapshot);
    }

    /// Replace the playlist wholesale. The current index follows the playing
    /// file to its new position, or is cleared when that file is gone.
    pub fn set_playlist(&mut self, tracks: Vec<TrackDescriptor>) {
        self.playlist = tracks;
        self.index = self
            .playing_file
            .as_deref()
            .and_then(|f| self.playlist.iter().position(|t| t.file == f));
        debug!(len = self.playlist.len(), index = ?self.index, "playlist rebuilt");
        self.publish();
    }

    /// Load `track` into the media session and start it. An `index` outside the
    /// current playlist is recorded as no index.
    pub fn set_track(&mut self, track: TrackDescriptor, index: Option<usize>) {
        let source = self.media.set_source(Some(&track.src));
        info!(src = %track.src, index = ?index, "loading track");

        self.source = Some(source);
        self.title = or_placeholder(&track.title, UNTITLED);
        self.artist = or_placeholder(&track.artist, UNKNOWN_ARTIST);
        self.index = index.filter(|&i| i < self.playlist.len());
        self.playing_file = Some(track.file).filter(|f| !f.is_empty());
        self.position = Duration::ZERO;
        self.duration = None;
        self.paused = true;
        self.bar_visible = true;
        self.request_cover(Some(&track.cover));

        self.play_audio();
    }

    /// Play the playlist entry at `index`. Out-of-range indices are ignored.
    pub fn play_index(&mut self, index: usize) {
        if let Some(track) = self.playlist.get(index).cloned() {
            self.set_track(track, Some(index));
        }
    }

    pub fn play_audio(&mut self) {
        if self.source.is_none() {
            return;
        }
        self.media.play();
        self.publish();
    }

    pub fn pause_audio(&mut self) {
        self.media.pause();
        self.paused = true;
        self.toggle = Toggle::Play;
        self.publish();
    }

    pub fn toggle_play(&mut self) {
        if self.source.is_none() {
            return;
        }
        if self.paused {
            self.play_audio();
        } else {
            self.pause_audio();
        }
    }

    pub fn play_next(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        let next = match self.index {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.play_index(next);
    }

    pub fn play_previous(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        let prev = match self.index {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.play_index(prev);
    }

    /// Seek to `seconds`, clamped to `[0, duration]`.
    pub fn seek(&mut self, seconds: f64) {
        if self.source.is_none() {
            return;
        }
        let position = clamp_position(seconds, self.duration);
        self.media.seek(position);
        self.position = position;
        self.publish();
    }

    pub fn seek_by(&mut self, delta_seconds: f64) {
        self.seek(self.position.as_secs_f64() + delta_seconds);
    }

    /// Seek to a fraction of the duration. Needs a known duration.
    pub fn seek_fraction(&mut self, fraction: f64) {
        let Some(duration) = self.duration else {
            return;
        };
        self.seek(fraction.clamp(0.0, 1.0) * duration.as_secs_f64());
    }

    /// Set the volume on the 0-100 scale.
    pub fn set_volume(&mut self, percent: u8) {
        let percent = percent.min(100);
        self.volume = percent;
        self.media.set_volume(f32::from(percent) / 100.0);
        self.publish();
    }

    pub fn change_volume(&mut self, delta: i16) {
        let target = (i16::from(self.volume) + delta).clamp(0, 100);
        self.set_volume(target as u8);
    }

    /// Unload the source and reset the displayed track.
    pub fn stop(&mut self) {
        self.media.pause();
        self.media.set_source(None);
        info!(file = ?self.playing_file, "playback stopped");

        self.source = None;
        self.playing_file = None;
        self.index = None;
        self.title = NO_TRACK_TITLE.to_string();
        self.artist = NO_TRACK_ARTIST.to_string();
        self.position = Duration::ZERO;
        self.duration = None;
        self.paused = true;
        self.toggle = Toggle::Play;
        self.request_cover(None);
        self.publish();
    }

    /// Patch the displayed metadata when `file` is the loaded track. Returns
    /// whether anything was patched.
    pub fn apply_metadata_edit(
        &mut self,
        file: &str,
        title: Option<&str>,
        artist: Option<&str>,
        cover: Option<&str>,
    ) -> bool {
        if self.playing_file.as_deref() != Some(file) {
            return false;
        }
        if let Some(t) = title.map(str::trim).filter(|s| !s.is_empty()) {
            self.title = t.to_string();
        }
        if let Some(a) = artist.map(str::trim).filter(|s| !s.is_empty()) {
            self.artist = a.to_string();
        }
        if let Some(c) = cover {
            self.request_cover(Some(c));
        }
        self.publish();
        true
    }

    fn request_cover(&mut self, url: Option<&str>) {
        self.last_ticket += 1;
        let ticket = CoverTicket(self.last_ticket);

        match url
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != self.default_cover)
        {
            Some(u) => {
                self.pending_cover = Some((ticket, u.to_string()));
                self.covers.preload(ticket, u);
            }
            None => {
                self.pending_cover = None;
                self.cover = self.default_cover.clone();
            }
        }
    }

    /// Completion of a cover preload. Only the latest request may touch the cover.
    pub fn on_cover_loaded(&mut self, ticket: CoverTicket, ok: bool) {
        match self.pending_cover.take() {
            Some((pending, url)) if pending == ticket => {
                if ok {
                    self.cover = url;
                } else {
                    debug!(%url, "cover failed to load, using default");
                    self.cover = self.default_cover.clone();
                }
                self.publish();
            }
            other => {
                debug!(?ticket, "discarding stale cover completion");
                self.pending_cover = other;
            }
        }
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if self.source != Some(event.source()) {
            debug!(?event, "discarding event from a replaced source");
            return;
        }

        match event {
            MediaEvent::MetadataLoaded { duration, .. } => {
                self.duration = Some(duration).filter(|d| !d.is_zero());
            }
            MediaEvent::TimeUpdate { position, .. } => {
                self.position = match self.duration {
                    Some(d) => position.min(d),
                    None => position,
                };
            }
            MediaEvent::Playing { .. } => {
                self.paused = false;
                self.toggle = Toggle::Pause;
            }
            MediaEvent::PlayRejected { reason, .. } => {
                debug!(%reason, "playback start rejected");
                self.paused = true;
                self.toggle = Toggle::Play;
            }
            MediaEvent::Paused { .. } => {
                self.paused = true;
                self.toggle = Toggle::Play;
            }
            MediaEvent::Ended { .. } => {
                self.paused = true;
                self.toggle = Toggle::Play;
                self.play_next();
            }
        }
        self.publish();
    }
}
