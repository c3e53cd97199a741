use std::{path::Path, time::Duration};

use druid::{
	piet::InterpolationMode,
	widget::{FillStrat, Image},
	BoxConstraints, Env, Event, EventCtx, ExtEventSink, ImageBuf, LayoutCtx, LifeCycle,
	LifeCycleCtx, PaintCtx, Size, TimerToken, UpdateCtx, Widget, WidgetId,
};

use crate::{
	gui::{
		controller::cmd,
		data::video::{VideoError, VideoPlayerState, VideoViewState},
	},
	media::player::VideoPlayer,
};

/// How often the position label is refreshed.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

/// `VideoView` widget
///
/// Owns the [`VideoPlayer`] of the playback screen and follows
/// [`VideoViewState::state`]: the player is created when the state turns to
/// playing, paused and resumed with it, and dropped when it stops.
pub struct VideoView {
	pub image: Image,
	pub player: Option<VideoPlayer>,
	timer: TimerToken,
}

impl VideoView {
	pub fn new() -> Self {
		let image_buf = ImageBuf::empty();
		let image = Image::new(image_buf)
			.fill_mode(FillStrat::Contain)
			.interpolation_mode(InterpolationMode::Bilinear);

		Self { image, player: None, timer: TimerToken::INVALID }
	}

	fn start(
		&mut self,
		data: &VideoViewState,
		event_sink: ExtEventSink,
		widget: WidgetId,
	) -> Result<(), VideoError> {
		self.player = None;
		if let Some(ref source) = data.source {
			let player = VideoPlayer::new(Path::new(source), data.muted, event_sink, widget)?;
			self.player = Some(player);
		}
		Ok(())
	}

	/// Bring the player in line with `data.state`.
	fn sync(
		&mut self,
		old_data: Option<&VideoViewState>,
		data: &VideoViewState,
		event_sink: ExtEventSink,
		widget: WidgetId,
	) -> Result<(), VideoError> {
		let reloaded = old_data.map_or(true, |old| old.source != data.source);
		match data.state {
			VideoPlayerState::Stopped => self.player = None,
			VideoPlayerState::Playing if reloaded || self.player.is_none() => {
				self.start(data, event_sink, widget)?
			}
			VideoPlayerState::Playing => {
				if let Some(player) = self.player.as_mut() {
					player.resume()?
				}
			}
			VideoPlayerState::Paused => {
				if let Some(player) = self.player.as_mut() {
					player.pause()?
				}
			}
		}
		Ok(())
	}

	/// Apply seek bar and mute changes to the running player.
	fn adjust(&self, old_data: &VideoViewState, data: &VideoViewState) -> Result<(), VideoError> {
		let player = match self.player {
			Some(ref player) => player,
			None => return Ok(()),
		};
		if old_data.muted != data.muted {
			player.set_muted(data.muted);
		}
		if let Some(position) = data.pending_seek {
			if old_data.pending_seek != data.pending_seek {
				player.seek(Duration::from_secs(position))?;
			}
		}
		Ok(())
	}
}

impl Default for VideoView {
	fn default() -> Self {
		Self::new()
	}
}

impl Widget<VideoViewState> for VideoView {
	fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut VideoViewState, env: &Env) {
		match event {
			Event::Command(command) => {
				if let Some(image_buf) = command.get(cmd::VIDEO_FRAME) {
					self.image.set_image_data(image_buf.to_owned());
					ctx.request_paint();
				}
				if command.is(cmd::PLAYBACK_FINISHED) {
					data.finish();
				}
				if let Some(message) = command.get(cmd::PLAYBACK_FAILED) {
					data.fail(message.to_owned());
				}
				if let Some(position) = command.get(cmd::PLAYBACK_SEEKED) {
					if data.pending_seek == Some(*position) {
						data.pending_seek = None;
					}
				}
			}
			Event::Timer(token) if *token == self.timer => {
				if let Some(ref player) = self.player {
					if data.pending_seek.is_none() {
						if let Some(position) = player.position() {
							data.position = position;
						}
					}
					if data.duration == 0 {
						match player.duration() {
							Ok(duration) => data.duration = duration,
							Err(e) => log::trace!("{}", e),
						}
					}
				}
				self.timer = ctx.request_timer(PROGRESS_INTERVAL);
			}
			_ => {}
		}

		self.image.event(ctx, event, data, env)
	}

	fn lifecycle(
		&mut self,
		ctx: &mut LifeCycleCtx,
		event: &LifeCycle,
		data: &VideoViewState,
		env: &Env,
	) {
		if let LifeCycle::WidgetAdded = event {
			let id = ctx.widget_id();
			if let Err(e) = self.sync(None, data, ctx.get_external_handle(), id) {
				log::error!("could not start playback: {}", e);
				ctx.submit_command(cmd::PLAYBACK_FAILED.with(e.to_string()).to(id));
			}
			self.timer = ctx.request_timer(PROGRESS_INTERVAL);
		}
		self.image.lifecycle(ctx, event, data, env)
	}

	fn update(
		&mut self,
		ctx: &mut UpdateCtx,
		old_data: &VideoViewState,
		data: &VideoViewState,
		env: &Env,
	) {
		if old_data.state != data.state || old_data.source != data.source {
			let id = ctx.widget_id();
			if let Err(e) = self.sync(Some(old_data), data, ctx.get_external_handle(), id) {
				log::error!("could not change playback state: {}", e);
				ctx.submit_command(cmd::PLAYBACK_FAILED.with(e.to_string()).to(id));
			}
		} else if old_data.muted != data.muted || old_data.pending_seek != data.pending_seek {
			if let Err(e) = self.adjust(old_data, data) {
				log::warn!("could not seek: {}", e);
			}
			if let Some(position) = data.pending_seek {
				let id = ctx.widget_id();
				ctx.submit_command(cmd::PLAYBACK_SEEKED.with(position).to(id));
			}
		}
		self.image.update(ctx, old_data, data, env)
	}

	fn layout(
		&mut self,
		ctx: &mut LayoutCtx,
		bc: &BoxConstraints,
		data: &VideoViewState,
		env: &Env,
	) -> Size {
		self.image.layout(ctx, bc, data, env)
	}

	fn paint(&mut self, ctx: &mut PaintCtx, data: &VideoViewState, env: &Env) {
		self.image.paint(ctx, data, env);
	}
}
