use criterion::{black_box, criterion_group, criterion_main, Criterion};
use druid_video_album::media::thumbnail::{scale_to_tile, TILE_SIZE};
use image::DynamicImage;

fn tile_scaling(c: &mut Criterion) {
	let photo = DynamicImage::new_rgb8(4032, 3024);
	c.bench_function("scale 12MP photo to tile", |b| {
		b.iter(|| scale_to_tile(black_box(&photo), TILE_SIZE))
	});

	let small = DynamicImage::new_rgb8(320, 240);
	c.bench_function("keep small picture", |b| b.iter(|| scale_to_tile(black_box(&small), TILE_SIZE)));
}

criterion_group!(benches, tile_scaling);
criterion_main!(benches);
