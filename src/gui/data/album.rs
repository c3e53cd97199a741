use std::{fmt, sync::Arc};

use druid::{Data, ImageBuf, Lens};

use crate::config::EntryConfig;

/// A tile of the album view and the video it plays.
#[derive(Clone, Debug, PartialEq, Data, Lens)]
pub struct AlbumEntry {
	pub image: Option<String>,
	pub video: String,
}

impl From<&EntryConfig> for AlbumEntry {
	fn from(entry: &EntryConfig) -> Self {
		Self {
			image: entry.image.as_ref().map(|p| p.to_string_lossy().into_owned()),
			video: entry.video.to_string_lossy().into_owned(),
		}
	}
}

/// Decoded tile pictures, indexed like the album entries.
///
/// Pictures arrive one at a time from the loader thread; each arrival
/// produces a new list so the album grid notices the change.
#[derive(Clone, Default, Data)]
pub struct Thumbnails(Arc<Vec<Option<ImageBuf>>>);

impl Thumbnails {
	pub fn new(len: usize) -> Self {
		Self(Arc::new(vec![None; len]))
	}

	pub fn get(&self, index: usize) -> Option<&ImageBuf> {
		self.0.get(index).and_then(Option::as_ref)
	}

	/// Copy of the list with `image` at `index`. Out of range indices are
	/// ignored.
	pub fn with(&self, index: usize, image: ImageBuf) -> Self {
		let mut images = self.0.as_ref().clone();
		if let Some(slot) = images.get_mut(index) {
			*slot = Some(image);
		}
		Self(Arc::new(images))
	}

	pub fn loaded(&self) -> usize {
		self.0.iter().filter(|image| image.is_some()).count()
	}
}

impl fmt::Debug for Thumbnails {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Thumbnails({}/{})", self.loaded(), self.0.len())
	}
}

#[derive(Clone, Debug, Data, Lens)]
pub struct AlbumState {
	pub entries: Arc<Vec<AlbumEntry>>,
	pub thumbnails: Thumbnails,
	pub columns: usize,
	/// Index of the last tile tapped.
	pub selected: Option<usize>,
	/// Video of the last tile tapped.
	pub stream_name: Option<String>,
}

impl AlbumState {
	pub fn new(entries: Vec<AlbumEntry>, columns: usize) -> Self {
		Self {
			thumbnails: Thumbnails::new(entries.len()),
			entries: Arc::new(entries),
			columns: columns.max(1),
			selected: None,
			stream_name: None,
		}
	}

	/// Record `index` as the selection and return its video.
	pub fn select(&mut self, index: usize) -> Option<&str> {
		let video = self.entries.get(index)?.video.clone();
		self.selected = Some(index);
		self.stream_name = Some(video);
		self.stream_name.as_deref()
	}
}
