use druid::{widget::Controller, Env, Event, EventCtx, Widget};

use crate::gui::{controller::cmd, data::AppState};

/// Applies navigation and album commands to [`AppState`].
pub struct AppController;

impl<W: Widget<AppState>> Controller<AppState, W> for AppController {
	fn event(
		&mut self,
		child: &mut W,
		ctx: &mut EventCtx,
		event: &Event,
		data: &mut AppState,
		env: &Env,
	) {
		match event {
			Event::Command(command) if command.is(cmd::SELECT_ENTRY) => {
				let index = *command.get_unchecked(cmd::SELECT_ENTRY);
				data.select(index);
				ctx.set_handled();
			}
			Event::Command(command) if command.is(cmd::SHOW_ALBUM) => {
				data.back();
				ctx.set_handled();
			}
			Event::Command(command) if command.is(cmd::THUMBNAIL_LOADED) => {
				let (index, image) = command.get_unchecked(cmd::THUMBNAIL_LOADED);
				data.album.thumbnails = data.album.thumbnails.with(*index, image.clone());
				ctx.set_handled();
			}
			_ => child.event(ctx, event, data, env),
		}
	}
}
