use approx::assert_relative_eq;
use candle_viewport::api::{ChartEngine, ChartEngineConfig, ChartMode, SeriesKey};
use candle_viewport::core::{Bar, LiveTickMerge, SurfaceSize, Timeframe};
use candle_viewport::render::NullRenderer;

const START_MS: i64 = 1_700_000_000_000;
// One-day charts use 15 minute bars.
const PERIOD_MS: i64 = 900_000;

fn flat_bars(count: usize) -> Vec<Bar> {
    (0..count)
        .map(|i| Bar {
            time: START_MS + i as i64 * PERIOD_MS,
            open: 10.0,
            high: 10.5,
            low: 9.5,
            close: 10.2,
            volume: 4.0,
        })
        .collect()
}

fn engine(config: ChartEngineConfig) -> ChartEngine<NullRenderer> {
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_series(SeriesKey::new("DOGE", Timeframe::OneDay), flat_bars(1_000));
    engine
}

fn newest_time() -> i64 {
    START_MS + 999 * PERIOD_MS
}

#[test]
fn price_inside_period_moves_newest_bar() {
    let mut engine = engine(ChartEngineConfig::new(SurfaceSize::new(1_080, 600)));
    let merge = engine.update_live_price(11.0, newest_time() + PERIOD_MS - 1);
    assert_eq!(merge, LiveTickMerge::UpdatedLast);
    assert_eq!(engine.bars().len(), 1_000);

    let newest = engine.bars()[999];
    assert_eq!(newest.close, 11.0);
    assert_eq!(newest.high, 11.0);
    assert_eq!(newest.low, 9.5);
    assert_eq!(engine.live_price(), Some(11.0));
}

#[test]
fn price_after_period_opens_bar_on_grid() {
    let mut engine = engine(ChartEngineConfig::new(SurfaceSize::new(1_080, 600)));
    let merge = engine.update_live_price(9.0, newest_time() + 2 * PERIOD_MS + 5);
    assert_eq!(merge, LiveTickMerge::Appended);
    assert_eq!(engine.bars().len(), 1_001);

    let appended = engine.bars()[1_000];
    assert_eq!(appended.time, newest_time() + 1_800_000);
    assert_eq!(appended.open, 10.2);
    assert_eq!(appended.close, 9.0);
    assert_eq!(appended.high, 10.2);
    assert_eq!(appended.low, 9.0);
    assert_eq!(appended.volume, 0.0);
}

#[test]
fn append_at_live_edge_keeps_following_newest_bar() {
    let mut engine = engine(ChartEngineConfig::new(SurfaceSize::new(1_080, 600)));
    engine.update_live_price(10.4, newest_time() + PERIOD_MS);

    assert_eq!(engine.viewport().pan_offset_bars, 0.0);
    assert_eq!(engine.visible_window().end_index, 1_001);
}

#[test]
fn append_while_viewing_history_keeps_bars_in_place() {
    let mut engine = engine(ChartEngineConfig::new(SurfaceSize::new(1_080, 600)));
    let mut viewport = engine.viewport();
    viewport.pan_offset_bars = 10.0;
    engine.set_viewport(viewport);
    let window_before = engine.visible_window();

    engine.update_live_price(10.4, newest_time() + PERIOD_MS);

    let viewport = engine.viewport();
    assert_relative_eq!(viewport.pan_offset_bars, 11.0, epsilon = 1e-12);
    assert_relative_eq!(viewport.zoom_level, 10.01, epsilon = 1e-9);
    assert_relative_eq!(
        engine.visible_window().candle_pixel_width,
        window_before.candle_pixel_width,
        epsilon = 1e-9
    );
    assert_eq!(engine.visible_window().start_index, 890);
}

#[test]
fn invalid_price_clears_live_marker_without_touching_bars() {
    let mut engine = engine(ChartEngineConfig::new(SurfaceSize::new(1_080, 600)));
    engine.update_live_price(10.3, newest_time() + 1);
    assert_eq!(engine.live_price(), Some(10.3));

    for price in [f64::NAN, f64::INFINITY, 0.0, -1.0] {
        assert_eq!(
            engine.update_live_price(price, newest_time() + 2),
            LiveTickMerge::Ignored
        );
        assert_eq!(engine.live_price(), None);
    }
    assert_eq!(engine.bars()[999].close, 10.3);
}

#[test]
fn external_widget_mode_ignores_ticks() {
    let config = ChartEngineConfig::new(SurfaceSize::new(1_080, 600)).with_mode(
        ChartMode::ExternalWidget {
            symbol: "BINANCE:DOGEUSDT".to_owned(),
        },
    );
    let mut engine = engine(config);
    assert_eq!(
        engine.update_live_price(12.0, newest_time() + PERIOD_MS),
        LiveTickMerge::Ignored
    );
    assert_eq!(engine.bars().len(), 1_000);
    assert_eq!(engine.live_price(), None);
}
