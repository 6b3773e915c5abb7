use candle_viewport::api::{ChartEngine, ChartEngineConfig, SeriesKey};
use candle_viewport::core::{Bar, SurfaceSize, Timeframe};
use candle_viewport::render::NullRenderer;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Wheel { x: f64, delta: f64 },
    Drag { from_x: f64, dx: f64, dy: f64, release_after_ms: f64 },
    AxisDrag { dy: f64 },
    Momentum { frames: usize },
    Prepend { count: usize },
    DoubleClick,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (8.0f64..1_008.0, prop_oneof![Just(-1.0), Just(1.0)])
            .prop_map(|(x, delta)| Op::Wheel { x, delta }),
        (20.0f64..990.0, -800.0f64..800.0, -200.0f64..200.0, 1.0f64..200.0).prop_map(
            |(from_x, dx, dy, release_after_ms)| Op::Drag {
                from_x,
                dx,
                dy,
                release_after_ms
            }
        ),
        (-300.0f64..300.0).prop_map(|dy| Op::AxisDrag { dy }),
        (1usize..60).prop_map(|frames| Op::Momentum { frames }),
        (1usize..400).prop_map(|count| Op::Prepend { count }),
        Just(Op::DoubleClick),
    ]
}

fn bars_from(first_time: i64, count: usize) -> Vec<Bar> {
    (0..count)
        .map(|i| {
            let close = 40.0 + (i % 17) as f64;
            Bar {
                time: first_time + i as i64 * 900_000,
                open: close - 1.0,
                high: close + 2.0,
                low: close - 3.0,
                close,
                volume: 2.0,
            }
        })
        .collect()
}

fn assert_viewport_bounded(engine: &ChartEngine<NullRenderer>) -> Result<(), TestCaseError> {
    let total = engine.bars().len();
    let viewport = engine.viewport();
    let geometry = engine.window_geometry();
    let (lower, upper) = geometry.pan_bounds(total);
    prop_assert!(viewport.pan_offset_bars.is_finite());
    prop_assert!(viewport.pan_offset_bars >= lower - 1e-9);
    prop_assert!(viewport.pan_offset_bars <= upper + 1e-9);
    prop_assert!(viewport.zoom_level >= engine.timeframe().min_zoom_level());

    let window = engine.visible_window();
    prop_assert!(window.start_index <= window.end_index);
    prop_assert!(window.end_index <= total);
    prop_assert!(window.candle_pixel_width > 0.0);
    Ok(())
}

proptest! {
    #[test]
    fn pan_and_zoom_stay_bounded_under_any_interaction(
        initial in 1usize..3_000,
        ops in prop::collection::vec(op_strategy(), 1..25)
    ) {
        let config = ChartEngineConfig::new(SurfaceSize::new(1_080, 600));
        let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
        let mut oldest_time = 10_000 * 900_000_i64;
        engine.set_series(
            SeriesKey::new("PROP", Timeframe::OneDay),
            bars_from(oldest_time, initial),
        );
        assert_viewport_bounded(&engine)?;

        let mut clock = 0.0;
        for op in ops {
            match op {
                Op::Wheel { x, delta } => engine.wheel(x, 200.0, delta),
                Op::Drag { from_x, dx, dy, release_after_ms } => {
                    clock += 1_000.0;
                    engine.pointer_down(from_x, 250.0, clock);
                    engine.pointer_move(from_x + dx / 2.0, 250.0 + dy / 2.0, clock + 8.0);
                    engine.pointer_move(from_x + dx, 250.0 + dy, clock + 16.0);
                    engine.pointer_up(from_x + dx, 250.0 + dy, clock + 16.0 + release_after_ms);
                }
                Op::AxisDrag { dy } => {
                    clock += 1_000.0;
                    engine.pointer_down(500.0, 590.0, clock);
                    engine.pointer_move(500.0 + dy, 590.0, clock + 16.0);
                    engine.pointer_up(500.0 + dy, 590.0, clock + 32.0);
                }
                Op::Momentum { frames } => {
                    for _ in 0..frames {
                        engine.step_momentum();
                        assert_viewport_bounded(&engine)?;
                    }
                }
                Op::Prepend { count } => {
                    oldest_time -= count as i64 * 900_000;
                    engine.prepend_history(bars_from(oldest_time, count));
                }
                Op::DoubleClick => engine.double_click(),
            }
            assert_viewport_bounded(&engine)?;
        }
    }

    #[test]
    fn resize_keeps_window_inside_series(
        count in 1usize..2_000,
        width in 120u32..2_400,
        height in 120u32..1_400,
        pan in -100.0f64..2_000.0
    ) {
        let config = ChartEngineConfig::new(SurfaceSize::new(1_080, 600));
        let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
        engine.set_series(SeriesKey::new("PROP", Timeframe::OneDay), bars_from(0, count));
        let mut viewport = engine.viewport();
        viewport.pan_offset_bars = pan;
        engine.set_viewport(viewport);

        engine.resize(SurfaceSize::new(width, height), 0).expect("resize");
        assert_viewport_bounded(&engine)?;
    }
}
