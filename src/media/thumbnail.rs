// Album tile pictures.
//
// A tile shows either a picture file, decoded and shrunk with the image
// crate, or a raw video frame grabbed at a given position:

// {uridecodebin} - {videoconvert} - {appsink}

// The appsink enforces RGBA so that druid can use the buffer as is.
use std::{
	path::Path,
	sync::mpsc::{sync_channel, TrySendError},
	thread,
};

use anyhow::Result;
use derive_more::{Display, Error};
use druid::{piet::ImageFormat, ExtEventSink, ImageBuf, Target};
use gst::{element_error, prelude::*};
use gstreamer as gst;
use gstreamer::Pipeline;
use gstreamer_app as gst_app;
use image::{imageops::FilterType, DynamicImage, RgbaImage};

use crate::{
	config::EntryConfig,
	gui::{controller::cmd, data::video::VideoError},
	media::player::file_uri,
};

/// Largest edge of a tile picture, in pixels.
pub const TILE_SIZE: u32 = 640;

#[derive(Debug, Display, Error)]
#[display(fmt = "No frame received from {}", _0)]
struct NoFrame(#[error(not(source))] String);

#[derive(Debug, Display, Error)]
#[display(fmt = "Received error from {}: {} (debug: {:?})", src, error, debug)]
struct ErrorMessage {
	src: String,
	error: String,
	debug: Option<String>,
	source: glib::Error,
}

/// Shrink `image` to fit in a `max` × `max` box, keeping its aspect ratio.
/// Smaller pictures are left alone.
pub fn scale_to_tile(image: &DynamicImage, max: u32) -> RgbaImage {
	if image.width() <= max && image.height() <= max {
		image.to_rgba8()
	} else {
		image.resize(max, max, FilterType::Triangle).to_rgba8()
	}
}

fn to_image_buf(image: RgbaImage) -> ImageBuf {
	let (width, height) = image.dimensions();
	ImageBuf::from_raw(image.into_raw(), ImageFormat::RgbaSeparate, width as _, height as _)
}

/// Load a picture file as a tile.
pub fn load_image(path: &Path) -> Result<ImageBuf> {
	let image = image::open(path)?;
	Ok(to_image_buf(scale_to_tile(&image, TILE_SIZE)))
}

/// Tile picture for `entry`: its image, or a frame of its video.
pub fn for_entry(entry: &EntryConfig) -> Result<ImageBuf> {
	match entry.image {
		Some(ref image) => load_image(image),
		None => Ok(Thumbnail::new(&entry.video, entry.thumbnail_at.unwrap_or(0))?.image.clone()),
	}
}

/// Decode the tile pictures of `entries` off the UI thread, sending each one
/// as [`cmd::THUMBNAIL_LOADED`] when ready.
pub fn spawn_loader(entries: Vec<EntryConfig>, event_sink: ExtEventSink) {
	thread::spawn(move || {
		for (index, entry) in entries.iter().enumerate() {
			let image = match for_entry(entry) {
				Ok(image) => image,
				Err(e) => {
					log::warn!("no tile picture for {}: {:#}", entry.video.display(), e);
					continue;
				}
			};
			if event_sink
				.submit_command(cmd::THUMBNAIL_LOADED, (index, image), Target::Auto)
				.is_err()
			{
				log::debug!("window closed, stopped loading tile pictures");
				break;
			}
		}
	});
}

/// A single video frame grabbed at a position.
pub struct Thumbnail {
	pub image: ImageBuf,
	pipeline: Pipeline,
}

impl Thumbnail {
	pub fn new(path: &Path, position: u64) -> Result<Self> {
		let uri = file_uri(path)?;
		let (sender, receiver) = sync_channel(1);
		gst::init()?;
		// Create our pipeline from a pipeline description string.
		let pipeline = gst::parse_launch(&format!(
			"uridecodebin uri={} ! videoconvert ! appsink name=sink caps=\"video/x-raw, format=RGBA\"",
			uri
		))?
		.downcast::<gst::Pipeline>()
		.map_err(|_| VideoError::Cast)?;

		// Get access to the appsink element.
		let appsink = pipeline
			.by_name("sink")
			.ok_or(VideoError::Cast)?
			.downcast::<gst_app::AppSink>()
			.map_err(|_| VideoError::Cast)?;

		// Don't synchronize on the clock, we only want a snapshot asap.
		appsink.set_property("sync", false);

		let mut got_snapshot = false;

		appsink.set_callbacks(
			gst_app::AppSinkCallbacks::builder()
				.new_sample(move |appsink| {
					let sample = appsink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
					let buffer = sample.buffer().ok_or_else(|| {
						element_error!(
							appsink,
							gst::ResourceError::Failed,
							("Failed to get buffer from appsink")
						);

						gst::FlowError::Error
					})?;

					// Make sure that we only get a single buffer
					if got_snapshot {
						return Err(gst::FlowError::Eos);
					}
					got_snapshot = true;

					let map = buffer.map_readable().map_err(|_| gst::FlowError::Error)?;

					let caps = sample.caps().ok_or(gst::FlowError::Error)?;
					let s = caps.structure(0).ok_or(gst::FlowError::Error)?;
					let width = s.get::<i32>("width").map_err(|_| gst::FlowError::Error)?;
					let height = s.get::<i32>("height").map_err(|_| gst::FlowError::Error)?;
					let image = ImageBuf::from_raw(
						map.as_slice().to_owned(),
						ImageFormat::RgbaSeparate,
						width as _,
						height as _,
					);
					match sender.try_send(image) {
						Ok(_) => {}
						Err(TrySendError::Full(_)) => {
							log::trace!("Channel is full, discarded frame");
						}
						Err(TrySendError::Disconnected(_)) => {
							log::debug!("Returning EOS in pipeline callback fn");
						}
					}
					Err(gst::FlowError::Eos)
				})
				.build(),
		);

		pipeline.set_state(gst::State::Paused)?;

		pipeline.state(gst::ClockTime::from_seconds(1)).0?;

		let bus = pipeline.bus().ok_or(VideoError::Bus)?;

		let mut seeked = false;

		for msg in bus.iter_timed(gst::ClockTime::NONE) {
			use gst::MessageView;

			match msg.view() {
				MessageView::AsyncDone(..) => {
					if !seeked {
						// AsyncDone means that the pipeline has started now and that we can seek
						log::debug!("Got AsyncDone message, seeking to {}s", position);

						if pipeline
							.seek_simple(gst::SeekFlags::FLUSH, position * gst::ClockTime::SECOND)
							.is_err()
						{
							log::debug!("Failed to seek, taking first frame");
						}

						pipeline.set_state(gst::State::Playing)?;
						seeked = true;
					} else {
						log::debug!("Got second AsyncDone message, seek finished");
					}
				}
				MessageView::Eos(..) => {
					// Posted right after the snapshot because the callback
					// returns gst::FlowError::Eos.
					log::debug!("Got Eos message, done");
					break;
				}
				MessageView::Error(err) => {
					pipeline.set_state(gst::State::Null)?;
					return Err(ErrorMessage {
						src: msg
							.src()
							.map(|s| String::from(s.path_string()))
							.unwrap_or_else(|| String::from("None")),
						error: err.error().to_string(),
						debug: err.debug(),
						source: err.error(),
					}
					.into());
				}
				_ => (),
			}
		}
		let image = receiver.try_recv().map_err(|_| NoFrame(uri))?;
		Ok(Thumbnail { image, pipeline })
	}
}

impl Drop for Thumbnail {
	fn drop(&mut self) {
		if self.pipeline.set_state(gst::State::Null).is_err() {
			log::error!("Could not stop pipeline");
		}
		log::debug!("Pipeline stopped!");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn large_pictures_shrink_to_fit_the_tile() {
		let image = DynamicImage::new_rgb8(1920, 1080);
		let tile = scale_to_tile(&image, 640);
		assert_eq!(tile.dimensions(), (640, 360));
	}

	#[test]
	fn portrait_pictures_shrink_on_height() {
		let image = DynamicImage::new_rgb8(300, 1200);
		let tile = scale_to_tile(&image, 400);
		assert_eq!(tile.dimensions(), (100, 400));
	}

	#[test]
	fn small_pictures_keep_their_size() {
		let image = DynamicImage::new_rgb8(120, 80);
		assert_eq!(scale_to_tile(&image, 640).dimensions(), (120, 80));
	}

	#[test]
	fn missing_video_fails_before_building_a_pipeline() {
		let err = match Thumbnail::new(Path::new("./does-not-exist.mpg"), 0) {
			Ok(_) => panic!("grabbed a frame from a missing file"),
			Err(e) => e,
		};
		assert!(matches!(err.downcast_ref::<VideoError>(), Some(VideoError::Io(_))));
	}

	#[test]
	fn missing_picture_is_an_error() {
		assert!(load_image(Path::new("./does-not-exist.jpg")).is_err());
	}
}
