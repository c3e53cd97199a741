//! Album configuration.
//!
//! The album layout and the image/video pairs live in a `confy` managed
//! TOML file. A missing file is created with the built-in album.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "druid_video_album";

/// One tile of the album: a picture and the video it plays.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EntryConfig {
	/// Tile picture. When absent the tile shows a frame of the video.
	#[serde(default)]
	pub image: Option<PathBuf>,
	pub video: PathBuf,
	/// Second of the video used for the tile when there is no picture.
	#[serde(default)]
	pub thumbnail_at: Option<u64>,
}

impl EntryConfig {
	pub fn new(image: &str, video: &str) -> Self {
		Self { image: Some(PathBuf::from(image)), video: PathBuf::from(video), thumbnail_at: None }
	}
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AlbumConfig {
	pub columns: usize,
	pub window_width: f64,
	pub window_height: f64,
	pub muted: bool,
	pub entries: Vec<EntryConfig>,
}

impl Default for AlbumConfig {
	fn default() -> Self {
		Self {
			columns: 2,
			window_width: 1280.0,
			window_height: 720.0,
			muted: false,
			entries: vec![
				EntryConfig::new("./Apple.jpg", "./softboy.mpg"),
				EntryConfig::new("./Banana.jpg", "./softboy.mpg"),
				EntryConfig::new("./Cantaloupe.jpg", "./softboy.mpg"),
				EntryConfig::new("./Grapefruit.jpg", "./softboy.mpg"),
			],
		}
	}
}

impl AlbumConfig {
	/// Grid columns, never zero.
	pub fn columns(&self) -> usize {
		self.columns.max(1)
	}

	pub fn window_size(&self) -> (f64, f64) {
		(self.window_width, self.window_height)
	}
}

/// Load the album, writing the built-in one on first run.
pub fn load_config() -> Result<AlbumConfig, confy::ConfyError> {
	confy::load(CONFIG_NAME, None)
}

/// Load the album from an explicit file, writing the built-in one if absent.
pub fn load_config_from(path: &Path) -> Result<AlbumConfig, confy::ConfyError> {
	confy::load_path(path)
}

/// The loaded album, or the built-in one when loading failed.
///
/// Logging is not up before launch, so the error goes to stderr.
pub fn or_default(loaded: Result<AlbumConfig, confy::ConfyError>) -> AlbumConfig {
	loaded.unwrap_or_else(|e| {
		eprintln!("could not load album config, using the built-in album: {}", e);
		AlbumConfig::default()
	})
}

#[cfg(test)]
mod tests {
	use std::fs;

	use super::*;

	#[test]
	fn default_album_pairs_every_fruit_with_the_demo_clip() {
		let config = AlbumConfig::default();
		let images: Vec<_> =
			config.entries.iter().filter_map(|e| e.image.as_ref()).map(|p| p.to_str().unwrap()).collect();
		assert_eq!(images, ["./Apple.jpg", "./Banana.jpg", "./Cantaloupe.jpg", "./Grapefruit.jpg"]);
		assert!(config.entries.iter().all(|e| e.video == PathBuf::from("./softboy.mpg")));
		assert_eq!(config.window_size(), (1280.0, 720.0));
	}

	#[test]
	fn entries_without_picture_or_position_load_as_none() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("album.toml");
		fs::write(
			&path,
			r#"
columns = 3
window_width = 800.0
window_height = 600.0
muted = true

[[entries]]
video = "./clip.mpg"
"#,
		)
		.unwrap();

		let config = load_config_from(&path).unwrap();
		assert_eq!(config.columns(), 3);
		assert_eq!(config.window_size(), (800.0, 600.0));
		assert!(config.muted);
		assert_eq!(config.entries.len(), 1);
		assert_eq!(config.entries[0].video, PathBuf::from("./clip.mpg"));
		assert_eq!(config.entries[0].image, None);
		assert_eq!(config.entries[0].thumbnail_at, None);
	}

	#[test]
	fn missing_file_is_written_with_the_built_in_album() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("album.toml");

		let config = load_config_from(&path).unwrap();
		assert_eq!(config, AlbumConfig::default());
		assert!(path.exists());
		assert_eq!(load_config_from(&path).unwrap(), AlbumConfig::default());
	}

	#[test]
	fn broken_file_falls_back_to_the_built_in_album() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("album.toml");
		fs::write(&path, "columns = \"two\"\n").unwrap();

		let loaded = load_config_from(&path);
		assert!(loaded.is_err());
		assert_eq!(or_default(loaded), AlbumConfig::default());
	}

	#[test]
	fn zero_columns_still_lays_out_one_column() {
		let config = AlbumConfig { columns: 0, ..AlbumConfig::default() };
		assert_eq!(config.columns(), 1);
	}
}
