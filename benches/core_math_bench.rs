use candle_viewport::api::{ChartEngine, ChartEngineConfig, SeriesKey};
use candle_viewport::core::{
    Bar, CoordinateMapper, Layout, LayoutConfig, PriceRange, SurfaceSize, Timeframe, Viewport,
    ViewportTuning, VisibleWindow, WindowGeometry, ZoneConfig, aggregate_zones,
};
use candle_viewport::render::NullRenderer;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_bars(count: usize) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let base = 100.0 + (i as f64 * 0.01).sin() * 20.0 + i as f64 * 0.005;
            let open = base;
            let close = if i % 2 == 0 { base + 1.0 } else { base - 1.0 };
            Bar {
                time: i as i64 * 900_000,
                open,
                high: open.max(close) + 0.75,
                low: open.min(close) - 0.75,
                close,
                volume: 10.0 + (i % 11) as f64,
            }
        })
        .collect()
}

fn mapper_for(bars: &[Bar], zoom_level: f64) -> CoordinateMapper {
    let layout =
        Layout::new(SurfaceSize::new(1_920, 1_080), LayoutConfig::default()).expect("layout");
    let tuning = ViewportTuning::default();
    let viewport = Viewport {
        zoom_level,
        ..Viewport::default()
    };
    let geometry = WindowGeometry::resolve(zoom_level, layout.chart_width(), bars.len(), &tuning);
    let window = VisibleWindow::compute(&viewport, &geometry, bars.len());
    let price_range =
        PriceRange::from_window(bars, &window, &viewport, &tuning).expect("non-empty window");
    CoordinateMapper::new(layout, window, price_range)
}

fn bench_window_resolve(c: &mut Criterion) {
    let tuning = ViewportTuning::default();
    let viewport = Viewport {
        zoom_level: 37.5,
        pan_offset_bars: 1_234.5,
        ..Viewport::default()
    };

    c.bench_function("window_resolve_10k", |b| {
        b.iter(|| {
            let geometry = WindowGeometry::resolve(
                black_box(viewport.zoom_level),
                black_box(1_840.0),
                black_box(10_000),
                &tuning,
            );
            VisibleWindow::compute(black_box(&viewport), &geometry, 10_000)
        })
    });
}

fn bench_mapper_round_trip(c: &mut Criterion) {
    let bars = generated_bars(10_000);
    let mapper = mapper_for(&bars, 20.0);

    c.bench_function("mapper_round_trip", |b| {
        b.iter(|| {
            let y = mapper.price_to_pixel_y(black_box(123.456));
            let x = mapper.bar_index_to_pixel_x(black_box(9_750));
            (mapper.pixel_y_to_price(y), mapper.pixel_x_to_bar_index(x))
        })
    });
}

fn bench_aggregate_zones_10k(c: &mut Criterion) {
    let bars = generated_bars(10_000);
    // Dense zoom so the whole window is aggregated.
    let mapper = mapper_for(&bars, 1.0);
    let config = ZoneConfig::default();

    c.bench_function("aggregate_zones_10k", |b| {
        b.iter(|| aggregate_zones(black_box(&bars), &mapper, &config))
    });
}

fn bench_build_render_frame_5k(c: &mut Criterion) {
    let config = ChartEngineConfig::new(SurfaceSize::new(1_600, 900)).with_zone_overlay(true);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_series(SeriesKey::new("BENCH", Timeframe::OneDay), generated_bars(5_000));
    engine.pointer_move(800.0, 300.0, 0.0);

    c.bench_function("build_render_frame_5k", |b| {
        b.iter(|| {
            engine
                .build_render_frame()
                .expect("frame build should succeed")
        })
    });
}

fn bench_engine_snapshot_json(c: &mut Criterion) {
    let config = ChartEngineConfig::new(SurfaceSize::new(1_600, 900));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_series(SeriesKey::new("BENCH", Timeframe::OneDay), generated_bars(2_000));

    c.bench_function("engine_snapshot_json", |b| {
        b.iter(|| {
            engine
                .snapshot_json_pretty()
                .expect("snapshot json should succeed")
        })
    });
}

criterion_group!(
    benches,
    bench_window_resolve,
    bench_mapper_round_trip,
    bench_aggregate_zones_10k,
    bench_build_render_frame_5k,
    bench_engine_snapshot_json
);
criterion_main!(benches);
