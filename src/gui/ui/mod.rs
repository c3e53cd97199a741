mod album;
mod playback;

use druid::{widget::ViewSwitcher, Widget, WidgetExt};

use crate::gui::{
	controller::app::AppController,
	data::{album::Thumbnails, AppState, Screen},
};

/// Build the root UI widget.
///
/// The album grid is rebuilt as tile pictures arrive. Leaving the playback
/// screen drops its widgets, and with them the video player.
pub fn root_widget() -> impl Widget<AppState> {
	ViewSwitcher::new(
		// Pictures only matter while the album is shown.
		|data: &AppState, _env| {
			(data.screen, (data.screen == Screen::Album).then(|| data.album.thumbnails.clone()))
		},
		|picked: &(Screen, Option<Thumbnails>), data: &AppState, _env| match picked.0 {
			Screen::Album => album::grid_widget(
				&data.album.entries,
				&data.album.thumbnails,
				data.album.columns,
			)
			.boxed(),
			Screen::Playback => playback::screen_widget().boxed(),
		},
	)
	.controller(AppController)
}
