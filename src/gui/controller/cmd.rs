use druid::{ImageBuf, Selector};

// Navigation

pub const SELECT_ENTRY: Selector<usize> = Selector::new("app.select-entry");
pub const SHOW_ALBUM: Selector = Selector::new("app.show-album");

// Playback state

pub const PLAYBACK_FINISHED: Selector = Selector::new("app.playback-finished");
pub const PLAYBACK_FAILED: Selector<String> = Selector::new("app.playback-failed");
pub const PLAYBACK_SEEKED: Selector<u64> = Selector::new("app.playback-seeked");

//Video Frame

pub const VIDEO_FRAME: Selector<ImageBuf> = Selector::new("app.video-frame");

// Album

pub const THUMBNAIL_LOADED: Selector<(usize, ImageBuf)> = Selector::new("app.thumbnail-loaded");
