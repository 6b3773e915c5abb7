#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use candle_viewport::ChartError;
use candle_viewport::api::{ChartEngine, ChartEngineConfig, SeriesKey, SeriesKind};
use candle_viewport::core::{Bar, SurfaceSize, Timeframe};
use candle_viewport::render::CairoRenderer;

fn bars(count: usize) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let open = 30.0 + (i as f64 * 0.2).cos() * 3.0;
            let close = open + if i % 2 == 0 { 0.6 } else { -0.6 };
            Bar {
                time: i as i64 * 900_000,
                open,
                high: open.max(close) + 0.3,
                low: open.min(close) - 0.3,
                close,
                volume: 1.0 + (i % 3) as f64,
            }
        })
        .collect()
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_replays_candle_frame() {
    let renderer = CairoRenderer::new(1_080, 600).expect("renderer");
    let config = ChartEngineConfig::new(SurfaceSize::new(1_080, 600));
    let mut engine = ChartEngine::new(renderer, config).expect("engine init");
    engine.set_series(SeriesKey::new("BTC", Timeframe::OneDay), bars(300));
    engine.pointer_move(500.0, 200.0, 0.0);

    engine.render(0).expect("render");
    let renderer = engine.into_renderer();
    let stats = renderer.last_stats();

    assert_eq!(stats.clips_pushed, 1);
    assert_eq!(stats.paths_drawn, 0);
    // 100 wicks plus grid lines and crosshair guides.
    assert!(stats.lines_drawn >= 107);
    // Candle bodies and volume bars.
    assert!(stats.rects_drawn >= 200);
    assert!(stats.texts_drawn >= 8);
}

#[test]
fn cairo_renderer_draws_line_series_path() {
    let renderer = CairoRenderer::new(800, 400).expect("renderer");
    let config = ChartEngineConfig::new(SurfaceSize::new(800, 400))
        .with_series_kind(SeriesKind::Line)
        .with_zone_overlay(true);
    let mut engine = ChartEngine::new(renderer, config).expect("engine init");
    engine.set_series(SeriesKey::new("BTC", Timeframe::OneDay), bars(500));

    engine.render(0).expect("render");
    let stats = engine.renderer().last_stats();
    assert_eq!(stats.paths_drawn, 1);
    assert_eq!(stats.clips_pushed, 1);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let renderer = CairoRenderer::new(600, 320).expect("renderer");
    let config = ChartEngineConfig::new(SurfaceSize::new(600, 320));
    let mut engine = ChartEngine::new(renderer, config).expect("engine init");
    engine.set_series(SeriesKey::new("BTC", Timeframe::OneDay), bars(120));

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    engine
        .render_on_cairo_context(&context, 0)
        .expect("render on external context");
    assert!(engine.renderer().last_stats().rects_drawn > 0);
}
