use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scanshade::bench::{FrameBuffer, ScanlineRasterizer, VertexColorShader};
use scanshade::prelude::*;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn triangle(points: [(f32, f32); 3]) -> [Vertex; 3] {
    let colors = [colors::RED, colors::GREEN, colors::BLUE];
    [0, 1, 2].map(|i| Vertex::colored(points[i].0, points[i].1, 0.0, colors[i]))
}

fn small_triangle() -> [Vertex; 3] {
    triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)])
}

fn medium_triangle() -> [Vertex; 3] {
    triangle([(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)])
}

fn large_triangle() -> [Vertex; 3] {
    triangle([(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)])
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let scanline = ScanlineRasterizer::new();

    for (name, tri) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("scanline", name), &tri, |b, tri| {
            let mut buffer = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                buffer.clear(colors::BLACK);
                scanline.draw_triangle(black_box(tri), &VertexColorShader, &mut buffer);
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");
    let scanline = ScanlineRasterizer::new();

    // A grid of small triangles
    let triangles: Vec<[Vertex; 3]> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                triangle([(x, y), (x + 35.0, y), (x + 17.5, y + 25.0)])
            })
        })
        .collect();

    group.bench_function("scanline_400_triangles", |b| {
        let mut buffer = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            buffer.clear(colors::BLACK);
            for tri in &triangles {
                scanline.draw_triangle(black_box(tri), &VertexColorShader, &mut buffer);
            }
        });
    });

    group.finish();
}

fn benchmark_model_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_pass");
    let cube = Model::cube();
    let scene = Scene::new(
        Transform3D::translation(BUFFER_WIDTH as f32 / 2.0, BUFFER_HEIGHT as f32 / 2.0, 100.0),
        0.0005,
        colors::BLACK,
    )
    .with_light(DirectionalLight::new(Vec3::FORWARD, colors::WHITE));
    let placement = Transform3D::scaling(150.0, -150.0, -150.0)
        .rotate_y_around_origin(0.6)
        .rotate_x_around_origin(0.4);
    let texture = Texture::solid(64, 64, colors::YELLOW).unwrap();

    for mode in [ShadingMode::Gouraud, ShadingMode::Flat] {
        group.bench_function(BenchmarkId::new("cube", mode), |b| {
            let mut engine = Engine::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            engine.set_shading_mode(mode);
            let material = Material::textured(&texture);
            b.iter(|| {
                engine.clear();
                black_box(engine.draw_model(&cube, &placement, &scene, &material));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_model_pass
);
criterion_main!(benches);
