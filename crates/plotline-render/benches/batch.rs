use criterion::{Criterion, criterion_group, criterion_main};
use plotline_render::{
    Color, DiskPrimitive, NdcTransform, RectPrimitive, Scene, SegmentPrimitive, expand_scene,
};

fn dense_scene() -> Scene {
    let mut scene = Scene::new(Color::WHITE);
    for i in 0..2_000 {
        let x = (i % 100) as f32 * 8.0;
        let y = (i / 100) as f32 * 24.0;
        scene.push_rect(RectPrimitive::new(x, y, 6.0, 20.0, Color::from_hex(0x4477AA)));
    }
    for i in 0..1_000 {
        let x = i as f32;
        scene.push_segment(SegmentPrimitive::new(x, 50.0, x + 1.0, 52.0, 1.5, Color::BLACK));
    }
    for i in 0..500 {
        scene.push_disk(DiskPrimitive::new(i as f32, 100.0, 3.0, Color::from_hex(0xEE6677)));
    }
    scene
}

fn bench_expand(c: &mut Criterion) {
    let scene = dense_scene();
    let ndc = NdcTransform::new(1920.0, 1080.0);
    c.bench_function("expand_scene_dense", |b| {
        b.iter(|| expand_scene(std::hint::black_box(&scene), ndc))
    });
}

criterion_group!(benches, bench_expand);
criterion_main!(benches);
