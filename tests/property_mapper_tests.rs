use candle_viewport::api::{ChartEngine, ChartEngineConfig, SeriesKey};
use candle_viewport::core::{
    Bar, CoordinateMapper, Layout, LayoutConfig, PriceRange, SurfaceSize, Timeframe, Viewport,
    ViewportTuning, VisibleWindow, WindowGeometry,
};
use candle_viewport::render::NullRenderer;
use proptest::prelude::*;

fn mapper(
    total_bars: usize,
    zoom_level: f64,
    pan_offset_bars: f64,
    min_price: f64,
    span: f64,
) -> CoordinateMapper {
    let layout = Layout::new(SurfaceSize::new(1_080, 600), LayoutConfig::default())
        .expect("layout");
    let tuning = ViewportTuning::default();
    let geometry = WindowGeometry::resolve(zoom_level, layout.chart_width(), total_bars, &tuning);
    let viewport = Viewport {
        zoom_level,
        pan_offset_bars,
        ..Viewport::default()
    };
    let window = VisibleWindow::compute(&viewport, &geometry, total_bars);
    CoordinateMapper::new(layout, window, PriceRange::new(min_price, min_price + span))
}

proptest! {
    #[test]
    fn price_to_y_round_trips(
        min_price in 1e-6f64..100_000.0,
        span in 1e-4f64..50_000.0,
        fraction in -0.5f64..1.5
    ) {
        let mapper = mapper(500, 5.0, 0.0, min_price, span);
        let price = min_price + span * fraction;
        let back = mapper.pixel_y_to_price(mapper.price_to_pixel_y(price));
        let tolerance = 1e-9 * (min_price.abs() + span);
        prop_assert!((back - price).abs() <= tolerance, "{price} -> {back}");
    }

    #[test]
    fn higher_prices_map_higher_on_screen(
        min_price in 0.01f64..1_000.0,
        span in 0.01f64..1_000.0,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0
    ) {
        prop_assume!((a - b).abs() > 1e-6);
        let mapper = mapper(500, 5.0, 0.0, min_price, span);
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let y_low = mapper.price_to_pixel_y(min_price + span * low);
        let y_high = mapper.price_to_pixel_y(min_price + span * high);
        prop_assert!(y_high < y_low);
    }

    #[test]
    fn visible_bar_centres_snap_back_to_their_index(
        total_bars in 1usize..5_000,
        zoom_level in 0.5f64..60.0,
        pan_fraction in 0.0f64..1.0
    ) {
        let tuning = ViewportTuning::default();
        let geometry = WindowGeometry::resolve(zoom_level, 1_000.0, total_bars, &tuning);
        let (lower, upper) = geometry.pan_bounds(total_bars);
        let pan = lower + (upper - lower) * pan_fraction;
        let mapper = mapper(total_bars, zoom_level, pan, 10.0, 5.0);
        let window = *mapper.window();

        for index in window.range() {
            let x = mapper.bar_index_to_pixel_x(index);
            prop_assert_eq!(mapper.pixel_x_to_bar_index(x), Some(index));
        }
    }

    #[test]
    fn crosshair_always_lands_on_a_visible_bar(
        total_bars in 1usize..2_000,
        x in -50.0f64..1_200.0,
        y in -50.0f64..700.0
    ) {
        let bars: Vec<Bar> = (0..total_bars)
            .map(|i| Bar {
                time: i as i64 * 60_000,
                open: 5.0,
                high: 6.0,
                low: 4.0,
                close: 5.5,
                volume: 1.0,
            })
            .collect();
        let config = ChartEngineConfig::new(SurfaceSize::new(1_080, 600))
            .with_timeframe(Timeframe::OneHour);
        let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
        engine.set_series(SeriesKey::new("PROP", Timeframe::OneHour), bars);
        engine.pointer_move(x, y, 0.0);

        if let Some(crosshair) = engine.crosshair() {
            let window = engine.visible_window();
            prop_assert!(window.contains(crosshair.snapped_bar_index));
            let layout = engine.layout();
            prop_assert!(crosshair.pixel_y >= layout.chart_top);
            prop_assert!(crosshair.pixel_y <= layout.chart_bottom);
        }
    }
}
