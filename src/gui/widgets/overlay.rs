use druid::{
	kurbo::{BezPath, Circle},
	BoxConstraints, Color, Env, Event, EventCtx, LayoutCtx, LifeCycle, LifeCycleCtx, PaintCtx,
	Point, RenderContext, Size, UpdateCtx, Widget,
};

/// Draws a translucent play button over its child.
pub struct PlayOverlay<W> {
	inner: W,
}

impl<W> PlayOverlay<W> {
	pub fn new(inner: W) -> Self {
		Self { inner }
	}
}

/// Triangle pointing right, centred on `center`, fitting a circle of `radius`.
fn play_triangle(center: Point, radius: f64) -> BezPath {
	let mut path = BezPath::new();
	path.move_to((center.x - radius * 0.5, center.y - radius * 0.866));
	path.line_to((center.x + radius, center.y));
	path.line_to((center.x - radius * 0.5, center.y + radius * 0.866));
	path.close_path();
	path
}

impl<T, W: Widget<T>> Widget<T> for PlayOverlay<W> {
	fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut T, env: &Env) {
		self.inner.event(ctx, event, data, env)
	}

	fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, data: &T, env: &Env) {
		if let LifeCycle::HotChanged(_) = event {
			ctx.request_paint();
		}
		self.inner.lifecycle(ctx, event, data, env)
	}

	fn update(&mut self, ctx: &mut UpdateCtx, old_data: &T, data: &T, env: &Env) {
		self.inner.update(ctx, old_data, data, env)
	}

	fn layout(&mut self, ctx: &mut LayoutCtx, bc: &BoxConstraints, data: &T, env: &Env) -> Size {
		self.inner.layout(ctx, bc, data, env)
	}

	fn paint(&mut self, ctx: &mut PaintCtx, data: &T, env: &Env) {
		self.inner.paint(ctx, data, env);

		let size = ctx.size();
		let center = Point::new(size.width / 2.0, size.height / 2.0);
		let radius = size.width.min(size.height) * 0.12;
		let alpha = if ctx.is_hot() { 0.85 } else { 0.55 };
		ctx.fill(Circle::new(center, radius), &Color::BLACK.with_alpha(alpha * 0.6));
		ctx.fill(play_triangle(center, radius * 0.55), &Color::WHITE.with_alpha(alpha));
	}
}
