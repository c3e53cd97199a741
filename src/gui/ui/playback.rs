use druid::{
	lens,
	widget::{Button, CrossAxisAlignment, Either, Flex, Label, SizedBox, Slider},
	Color, Widget, WidgetExt,
};

use crate::gui::{
	controller::cmd,
	data::{
		video::{VideoPlayerState, VideoViewState},
		AppState,
	},
	widgets::video::VideoView,
};

/// Share of the window height given to the back button.
const BACK_FLEX: f64 = 0.1;
const VIDEO_FLEX: f64 = 0.9;

/// `mm:ss`, or `h:mm:ss` past the hour.
pub fn format_clock(seconds: u64) -> String {
	let (hours, minutes, seconds) = (seconds / 3600, seconds / 60 % 60, seconds % 60);
	if hours > 0 {
		format!("{}:{:02}:{:02}", hours, minutes, seconds)
	} else {
		format!("{:02}:{:02}", minutes, seconds)
	}
}

fn toggle_label(state: &VideoViewState) -> &'static str {
	match state.state {
		VideoPlayerState::Playing => "Pause",
		VideoPlayerState::Paused => "Play",
		VideoPlayerState::Stopped => "Replay",
	}
}

fn mute_label(state: &VideoViewState) -> &'static str {
	if state.muted {
		"Unmute"
	} else {
		"Mute"
	}
}

fn progress_label(state: &VideoViewState) -> String {
	if state.duration > 0 {
		format!("{} / {}", format_clock(state.position), format_clock(state.duration))
	} else {
		format_clock(state.position)
	}
}

pub fn panel_widget() -> impl Widget<VideoViewState> {
	let controls = Flex::row()
		.with_child(
			Button::dynamic(|video: &VideoViewState, _| toggle_label(video).to_string())
				.on_click(|_ctx, video: &mut VideoViewState, _env| video.toggle()),
		)
		.with_spacer(8.0)
		.with_flex_child(
			Slider::new()
				.expand_width()
				.lens(lens::Map::new(
					|video: &VideoViewState| video.progress(),
					|video: &mut VideoViewState, progress: f64| video.seek_to(progress),
				)),
			1.0,
		)
		.with_spacer(8.0)
		.with_child(Label::dynamic(|video: &VideoViewState, _| progress_label(video)))
		.with_spacer(8.0)
		.with_child(
			Button::dynamic(|video: &VideoViewState, _| mute_label(video).to_string())
				.on_click(|_ctx, video: &mut VideoViewState, _env| video.toggle_mute()),
		);

	let error = Either::new(
		|video: &VideoViewState, _| video.error.is_some(),
		Label::dynamic(|video: &VideoViewState, _| {
			format!("Playback failed: {}", video.error.as_deref().unwrap_or_default())
		})
		.with_text_color(Color::rgb8(0xe0, 0x4f, 0x4f)),
		SizedBox::empty(),
	);

	Flex::column()
		.cross_axis_alignment(CrossAxisAlignment::Start)
		.with_child(controls)
		.with_child(error)
		.padding(8.0)
}

/// Full window playback: back button on top, the video below.
pub fn screen_widget() -> impl Widget<AppState> {
	let back = Button::new("Back")
		.on_click(|ctx, _data: &mut AppState, _env| ctx.submit_command(cmd::SHOW_ALBUM))
		.expand();

	Flex::column()
		.with_flex_child(back, BACK_FLEX)
		.with_flex_child(VideoView::new().expand().lens(AppState::playback), VIDEO_FLEX)
		.with_child(panel_widget().lens(AppState::playback))
		.background(Color::BLACK)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clock_pads_minutes_and_seconds() {
		assert_eq!(format_clock(0), "00:00");
		assert_eq!(format_clock(75), "01:15");
		assert_eq!(format_clock(3599), "59:59");
	}

	#[test]
	fn clock_shows_hours_for_long_videos() {
		assert_eq!(format_clock(3600), "1:00:00");
		assert_eq!(format_clock(7384), "2:03:04");
	}

	#[test]
	fn progress_shows_duration_once_known() {
		let mut video = VideoViewState::new(false);
		video.start("clip.mpg".to_string());
		video.position = 5;
		assert_eq!(progress_label(&video), "00:05");
		video.duration = 90;
		assert_eq!(progress_label(&video), "00:05 / 01:30");
	}

	#[test]
	fn mute_button_names_the_next_action() {
		let mut video = VideoViewState::new(false);
		assert_eq!(mute_label(&video), "Mute");
		video.toggle_mute();
		assert_eq!(mute_label(&video), "Unmute");
	}

	#[test]
	fn toggle_button_follows_player_state() {
		let mut video = VideoViewState::new(false);
		video.start("clip.mpg".to_string());
		assert_eq!(toggle_label(&video), "Pause");
		video.toggle();
		assert_eq!(toggle_label(&video), "Play");
		video.finish();
		assert_eq!(toggle_label(&video), "Replay");
	}
}
