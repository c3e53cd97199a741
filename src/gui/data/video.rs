use druid::{Data, Lens};
use gstreamer as gst;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VideoError {
	#[error("{0}")]
	Glib(#[from] glib::Error),
	#[error("{0}")]
	Bool(#[from] glib::BoolError),
	#[error("failed to get the gstreamer bus")]
	Bus,
	#[error("{0}")]
	StateChange(#[from] gst::StateChangeError),
	#[error("failed to cast gstreamer element")]
	Cast,
	#[error("{0}")]
	Io(#[from] std::io::Error),
	#[error("invalid URI")]
	Uri,
	#[error("failed to query media duration or position")]
	Duration,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Data)]
pub enum VideoPlayerState {
	Playing,
	Paused,
	Stopped,
}

/// State of the playback screen.
#[derive(Clone, Debug, Data, Lens)]
pub struct VideoViewState {
	/// Video file currently loaded into the player.
	pub source: Option<String>,
	pub state: VideoPlayerState,
	/// Seconds played.
	pub position: u64,
	/// Length of the stream in seconds, zero until known.
	pub duration: u64,
	pub error: Option<String>,
	pub muted: bool,
	/// Seek asked for by the user, in seconds, until the player has jumped.
	pub pending_seek: Option<u64>,
}

impl VideoViewState {
	pub fn new(muted: bool) -> Self {
		Self {
			source: None,
			state: VideoPlayerState::Stopped,
			position: 0,
			duration: 0,
			error: None,
			muted,
			pending_seek: None,
		}
	}

	/// Load `source` and play it from the start.
	pub fn start(&mut self, source: String) {
		self.source = Some(source);
		self.state = VideoPlayerState::Playing;
		self.position = 0;
		self.duration = 0;
		self.error = None;
		self.pending_seek = None;
	}

	/// Stop playback and unload the source.
	pub fn stop(&mut self) {
		self.source = None;
		self.state = VideoPlayerState::Stopped;
		self.position = 0;
		self.duration = 0;
		self.pending_seek = None;
	}

	/// Play/pause button. A finished stream is replayed.
	pub fn toggle(&mut self) {
		self.state = match self.state {
			VideoPlayerState::Playing => VideoPlayerState::Paused,
			VideoPlayerState::Paused => VideoPlayerState::Playing,
			VideoPlayerState::Stopped if self.source.is_some() => {
				self.position = 0;
				self.error = None;
				VideoPlayerState::Playing
			}
			VideoPlayerState::Stopped => VideoPlayerState::Stopped,
		};
	}

	/// End of stream. The source stays loaded so it can be replayed.
	pub fn finish(&mut self) {
		self.state = VideoPlayerState::Stopped;
		self.position = self.duration;
	}

	pub fn fail(&mut self, message: String) {
		self.state = VideoPlayerState::Stopped;
		self.error = Some(message);
	}

	/// Share of the stream played, from 0 to 1. Zero while the length is
	/// unknown.
	pub fn progress(&self) -> f64 {
		if self.duration == 0 {
			0.0
		} else {
			(self.position as f64 / self.duration as f64).min(1.0)
		}
	}

	/// Seek bar moved to `progress`. Ignored until the length is known.
	pub fn seek_to(&mut self, progress: f64) {
		if self.duration == 0 || self.source.is_none() {
			return;
		}
		let position = (progress.clamp(0.0, 1.0) * self.duration as f64).round() as u64;
		if position != self.position {
			self.position = position;
			self.pending_seek = Some(position);
		}
	}

	pub fn toggle_mute(&mut self) {
		self.muted = !self.muted;
	}

	pub fn is_playing(&self) -> bool {
		self.state == VideoPlayerState::Playing
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn playing() -> VideoViewState {
		let mut state = VideoViewState::new(false);
		state.start("./softboy.mpg".to_string());
		state
	}

	#[test]
	fn toggle_pauses_and_resumes() {
		let mut state = playing();
		state.toggle();
		assert_eq!(state.state, VideoPlayerState::Paused);
		state.toggle();
		assert!(state.is_playing());
	}

	#[test]
	fn toggle_after_end_of_stream_replays() {
		let mut state = playing();
		state.duration = 12;
		state.finish();
		assert_eq!(state.state, VideoPlayerState::Stopped);
		assert_eq!(state.position, 12);
		state.toggle();
		assert!(state.is_playing());
		assert_eq!(state.position, 0);
		assert_eq!(state.source.as_deref(), Some("./softboy.mpg"));
	}

	#[test]
	fn toggle_without_source_does_nothing() {
		let mut state = VideoViewState::new(false);
		state.toggle();
		assert_eq!(state.state, VideoPlayerState::Stopped);
	}

	#[test]
	fn failure_is_kept_until_next_start() {
		let mut state = playing();
		state.fail("no such file".to_string());
		assert_eq!(state.state, VideoPlayerState::Stopped);
		assert_eq!(state.error.as_deref(), Some("no such file"));
		state.start("./other.mpg".to_string());
		assert!(state.error.is_none());
	}

	#[test]
	fn seek_bar_moves_position_and_queues_a_seek() {
		let mut state = playing();
		state.duration = 120;
		state.position = 10;
		state.seek_to(0.5);
		assert_eq!(state.position, 60);
		assert_eq!(state.pending_seek, Some(60));
		assert!((state.progress() - 0.5).abs() < f64::EPSILON);
	}

	#[test]
	fn seek_bar_is_clamped_to_the_stream() {
		let mut state = playing();
		state.duration = 30;
		state.seek_to(1.7);
		assert_eq!(state.pending_seek, Some(30));
		state.seek_to(-0.2);
		assert_eq!(state.pending_seek, Some(0));
	}

	#[test]
	fn seek_before_length_is_known_is_ignored() {
		let mut state = playing();
		state.seek_to(0.5);
		assert_eq!(state.pending_seek, None);
		assert_eq!(state.progress(), 0.0);
	}

	#[test]
	fn new_source_drops_pending_seek() {
		let mut state = playing();
		state.duration = 40;
		state.seek_to(0.25);
		state.start("./other.mpg".to_string());
		assert_eq!(state.pending_seek, None);
	}

	#[test]
	fn mute_toggles_and_survives_a_new_source() {
		let mut state = playing();
		state.toggle_mute();
		assert!(state.muted);
		state.stop();
		state.start("./other.mpg".to_string());
		assert!(state.muted);
		state.toggle_mute();
		assert!(!state.muted);
	}

	#[test]
	fn stop_unloads_source() {
		let mut state = playing();
		state.position = 3;
		state.stop();
		assert!(state.source.is_none());
		assert_eq!(state.position, 0);
		assert_eq!(state.state, VideoPlayerState::Stopped);
	}
}
