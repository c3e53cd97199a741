use druid::{
	widget::{FillStrat, Flex, Image, Label, LineBreaking},
	Color, ImageBuf, Widget, WidgetExt,
};

use crate::gui::{
	controller::cmd,
	data::{
		album::{AlbumEntry, Thumbnails},
		AppState,
	},
	widgets::overlay::PlayOverlay,
};

const TILE_PADDING: f64 = 12.0;

/// Tile shown when an entry has no picture to display.
fn placeholder(entry: &AlbumEntry) -> impl Widget<AppState> {
	let name = entry.image.as_deref().unwrap_or(&entry.video);
	Label::new(name.to_owned())
		.with_line_break_mode(LineBreaking::WordWrap)
		.center()
		.background(Color::grey(0.25))
}

fn tile(index: usize, entry: &AlbumEntry, thumbnail: Option<&ImageBuf>) -> impl Widget<AppState> {
	let picture = match thumbnail {
		Some(image) => Image::new(image.clone()).fill_mode(FillStrat::Cover).boxed(),
		None => placeholder(entry).boxed(),
	};
	PlayOverlay::new(picture.expand())
		.padding(TILE_PADDING)
		.on_click(move |ctx, _data: &mut AppState, _env| {
			ctx.submit_command(cmd::SELECT_ENTRY.with(index))
		})
}

/// Grid of the album tiles, `columns` per row.
///
/// Tiles without a loaded picture show a placeholder.
pub fn grid_widget(
	entries: &[AlbumEntry],
	thumbnails: &Thumbnails,
	columns: usize,
) -> impl Widget<AppState> {
	let columns = columns.max(1);
	let mut grid = Flex::column();
	for (row, chunk) in entries.chunks(columns).enumerate() {
		let mut cells = Flex::row();
		for (column, entry) in chunk.iter().enumerate() {
			let index = row * columns + column;
			let thumbnail = thumbnails.get(index);
			cells.add_flex_child(tile(index, entry, thumbnail), 1.0);
		}
		// Keep the last row's tiles the same width as the others.
		for _ in chunk.len()..columns {
			cells.add_flex_spacer(1.0);
		}
		grid.add_flex_child(cells, 1.0);
	}
	grid.background(Color::BLACK)
}
