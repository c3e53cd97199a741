use std::{
	path::Path,
	sync::{
		atomic::{AtomicBool, Ordering},
		Arc,
	},
	thread,
	time::Duration,
};

use druid::{piet::ImageFormat, ExtEventSink, ImageBuf, Target, WidgetId};
use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;

use crate::gui::{controller::cmd, data::video::VideoError};

/// Resolve a file path to the `file://` URI gstreamer expects.
pub fn file_uri(path: &Path) -> Result<String, VideoError> {
	let path = path.canonicalize()?;
	let uri = url::Url::from_file_path(&path).map_err(|_| VideoError::Uri)?;
	Ok(uri.to_string())
}

/// Video player which handles multimedia playback.
///
/// Frames are decoded to RGBA by a `playbin` and handed to the widget
/// identified by `widget` as [`cmd::VIDEO_FRAME`] commands. End of stream
/// and pipeline errors arrive as [`cmd::PLAYBACK_FINISHED`] and
/// [`cmd::PLAYBACK_FAILED`].
pub struct VideoPlayer {
	pub pipeline: gst::Pipeline,
	watching: Arc<AtomicBool>,
}

impl VideoPlayer {
	/// Create a new video player for the file at `path` and start playing it.
	pub fn new(
		path: &Path,
		muted: bool,
		event_sink: ExtEventSink,
		widget: WidgetId,
	) -> Result<Self, VideoError> {
		gst::init()?;
		let uri = file_uri(path)?;
		log::debug!("opening {}", uri);

		let pipeline = gst::ElementFactory::make("playbin", Some("album-player"))?
			.downcast::<gst::Pipeline>()
			.map_err(|_| VideoError::Cast)?;
		let video_sink = gst::ElementFactory::make("appsink", Some("album-frames"))?
			.dynamic_cast::<gst_app::AppSink>()
			.map_err(|_| VideoError::Cast)?;
		video_sink.set_caps(Some(
			&gst::Caps::builder("video/x-raw")
				.field("format", "RGBA")
				.field("pixel-aspect-ratio", gst::Fraction::new(1, 1))
				.build(),
		));

		let frame_sink = event_sink.clone();
		video_sink.set_callbacks(
			gst_app::AppSinkCallbacks::builder()
				.new_sample(move |sink| {
					let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
					let buffer = sample.buffer().ok_or(gst::FlowError::Error)?;
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
					// The widget is gone once the window closes.
					frame_sink
						.submit_command(cmd::VIDEO_FRAME, image, Target::Widget(widget))
						.map_err(|_| gst::FlowError::Flushing)?;

					Ok(gst::FlowSuccess::Ok)
				})
				.build(),
		);

		pipeline.set_property("uri", uri.as_str());
		pipeline.set_property("video-sink", &video_sink);
		pipeline.set_property("mute", muted);

		let bus = pipeline.bus().ok_or(VideoError::Bus)?;
		let watching = Arc::new(AtomicBool::new(true));
		watch_bus(bus, watching.clone(), event_sink, widget);

		pipeline.set_state(gst::State::Playing)?;

		Ok(VideoPlayer { pipeline, watching })
	}

	pub fn pause(&self) -> Result<(), VideoError> {
		self.pipeline.set_state(gst::State::Paused)?;
		Ok(())
	}

	pub fn resume(&self) -> Result<(), VideoError> {
		self.pipeline.set_state(gst::State::Playing)?;
		Ok(())
	}

	/// Jump to `position` from the start of the stream.
	pub fn seek(&self, position: Duration) -> Result<(), VideoError> {
		let target = gst::ClockTime::from_nseconds(position.as_nanos() as _);
		self.pipeline.seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT, target)?;
		Ok(())
	}

	pub fn set_muted(&self, muted: bool) {
		self.pipeline.set_property("mute", muted);
	}

	/// Seconds played.
	pub fn position(&self) -> Option<u64> {
		self.pipeline.query_position::<gst::ClockTime>().map(|t| t.seconds())
	}

	/// Length of the stream in seconds.
	pub fn duration(&self) -> Result<u64, VideoError> {
		self.pipeline
			.query_duration::<gst::ClockTime>()
			.map(|t| t.seconds())
			.ok_or(VideoError::Duration)
	}
}

/// Forward end of stream and errors from `bus` to `widget` until the player
/// is dropped.
fn watch_bus(bus: gst::Bus, watching: Arc<AtomicBool>, event_sink: ExtEventSink, widget: WidgetId) {
	thread::spawn(move || {
		while watching.load(Ordering::Acquire) {
			let msg = match bus.timed_pop(gst::ClockTime::from_mseconds(100)) {
				Some(msg) => msg,
				None => continue,
			};
			use gst::MessageView;

			let sent = match msg.view() {
				MessageView::Eos(..) => {
					log::debug!("end of stream");
					event_sink.submit_command(cmd::PLAYBACK_FINISHED, (), Target::Widget(widget))
				}
				MessageView::Error(err) => {
					let src = msg
						.src()
						.map(|s| String::from(s.path_string()))
						.unwrap_or_else(|| String::from("None"));
					log::error!(
						"received error from {}: {} (debug: {:?})",
						src,
						err.error(),
						err.debug()
					);
					event_sink.submit_command(
						cmd::PLAYBACK_FAILED,
						err.error().to_string(),
						Target::Widget(widget),
					)
				}
				_ => Ok(()),
			};
			if sent.is_err() {
				break;
			}
		}
		log::debug!("bus watcher stopped");
	});
}

impl Drop for VideoPlayer {
	fn drop(&mut self) {
		self.watching.store(false, Ordering::Release);
		if self.pipeline.set_state(gst::State::Null).is_err() {
			log::error!("Could not stop pipeline");
		}
		log::debug!("Pipeline stopped!");
	}
}
