pub mod album;
pub mod video;

use druid::{Data, Lens};

use crate::{
	config::AlbumConfig,
	gui::data::{
		album::{AlbumEntry, AlbumState},
		video::VideoViewState,
	},
};

/// Screens of the window.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Data)]
pub enum Screen {
	Album,
	Playback,
}

/// App UI widget state.
#[derive(Debug, Clone, Data, Lens)]
pub struct AppState {
	pub album: AlbumState,
	pub playback: VideoViewState,
	pub screen: Screen,
}

impl AppState {
	pub fn new(config: &AlbumConfig) -> Self {
		let entries = config.entries.iter().map(AlbumEntry::from).collect();
		Self {
			album: AlbumState::new(entries, config.columns()),
			playback: VideoViewState::new(config.muted),
			screen: Screen::Album,
		}
	}

	/// Play the video of tile `index` on the playback screen.
	///
	/// Returns `false` and leaves the state untouched when there is no such
	/// tile.
	pub fn select(&mut self, index: usize) -> bool {
		let stream_name = match self.album.select(index) {
			Some(name) => name.to_owned(),
			None => {
				log::warn!("no album entry at index {}", index);
				return false;
			}
		};
		log::info!("playing {} from album entry {}", stream_name, index);
		self.playback.start(stream_name);
		self.screen = Screen::Playback;
		true
	}

	/// Stop playback and go back to the album, whatever the player is doing.
	pub fn back(&mut self) {
		log::info!("switching back to album screen");
		self.playback.stop();
		self.screen = Screen::Album;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{config::EntryConfig, gui::data::video::VideoPlayerState};

	fn state() -> AppState {
		let config = AlbumConfig {
			entries: vec![
				EntryConfig::new("one.jpg", "one.mpg"),
				EntryConfig::new("two.jpg", "two.mpg"),
				EntryConfig::new("three.jpg", "three.mpg"),
			],
			..AlbumConfig::default()
		};
		AppState::new(&config)
	}

	#[test]
	fn starts_on_album_with_nothing_loaded() {
		let state = state();
		assert_eq!(state.screen, Screen::Album);
		assert!(state.playback.source.is_none());
		assert_eq!(state.playback.state, VideoPlayerState::Stopped);
	}

	#[test]
	fn selecting_a_tile_plays_its_video() {
		for (index, video) in ["one.mpg", "two.mpg", "three.mpg"].iter().enumerate() {
			let mut state = state();
			assert!(state.select(index));
			assert_eq!(state.screen, Screen::Playback);
			assert_eq!(state.playback.source.as_deref(), Some(*video));
			assert!(state.playback.is_playing());
		}
	}

	#[test]
	fn selecting_a_missing_tile_stays_on_album() {
		let mut state = state();
		assert!(!state.select(3));
		assert_eq!(state.screen, Screen::Album);
		assert!(state.playback.source.is_none());
	}

	#[test]
	fn back_returns_to_album_from_any_player_state() {
		let setups: [fn(&mut AppState); 4] = [
			|_| {},
			|s| s.playback.toggle(),
			|s| s.playback.finish(),
			|s| s.playback.fail("decoder".to_string()),
		];
		for setup in setups {
			let mut state = state();
			state.select(1);
			setup(&mut state);
			state.back();
			assert_eq!(state.screen, Screen::Album);
			assert_eq!(state.playback.state, VideoPlayerState::Stopped);
			assert!(state.playback.source.is_none());
		}
	}

	#[test]
	fn muted_flag_comes_from_config() {
		let state = AppState::new(&AlbumConfig { muted: true, ..AlbumConfig::default() });
		assert!(state.playback.muted);
	}
}
