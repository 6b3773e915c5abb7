use candle_viewport::api::{ChartEngine, ChartEngineConfig, ChartMode, SeriesKey, SeriesKind};
use candle_viewport::core::{Bar, SurfaceSize, Timeframe};
use candle_viewport::history::HistoryConfig;
use candle_viewport::render::NullRenderer;
use candle_viewport::ChartError;

#[test]
fn config_json_round_trip_preserves_every_field() {
    let config = ChartEngineConfig::new(SurfaceSize::new(1_280, 720).with_device_pixel_ratio(2.0))
        .with_timeframe(Timeframe::OneWeek)
        .with_series_kind(SeriesKind::Line)
        .with_volume(false)
        .with_zone_overlay(true)
        .with_circulating_supply(Some(21_000_000.0))
        .with_history(HistoryConfig {
            cooldown_ms: 5_000,
            ..HistoryConfig::default()
        });

    let json = config.to_json_pretty().expect("serialize");
    let parsed = ChartEngineConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let parsed = ChartEngineConfig::from_json_str(r#"{"surface":{"width":800,"height":400}}"#)
        .expect("parse");
    assert_eq!(parsed, ChartEngineConfig::new(SurfaceSize::new(800, 400)));
    assert!(parsed.show_volume);
    assert!(parsed.show_reference_lines);
    assert!(!parsed.show_zone_overlay);
    assert_eq!(parsed.mode, ChartMode::Native);
}

#[test]
fn external_widget_mode_parses_from_json() {
    let parsed = ChartEngineConfig::from_json_str(
        r#"{
            "surface": {"width": 800, "height": 400},
            "mode": {"ExternalWidget": {"symbol": "COINBASE:BTCUSD"}}
        }"#,
    )
    .expect("parse");
    assert_eq!(
        parsed.mode,
        ChartMode::ExternalWidget {
            symbol: "COINBASE:BTCUSD".to_owned()
        }
    );
}

#[test]
fn malformed_json_is_a_config_error() {
    let error = ChartEngineConfig::from_json_str("{\"surface\":").expect_err("must fail");
    assert!(matches!(error, ChartError::InvalidConfig(_)));
}

#[test]
fn engine_rejects_invalid_config() {
    let zero_surface = ChartEngineConfig::new(SurfaceSize::new(0, 400));
    assert!(ChartEngine::new(NullRenderer::default(), zero_surface).is_err());

    let bad_supply =
        ChartEngineConfig::new(SurfaceSize::new(800, 400)).with_circulating_supply(Some(-1.0));
    assert!(matches!(
        ChartEngine::new(NullRenderer::default(), bad_supply),
        Err(ChartError::InvalidConfig(_))
    ));

    let no_symbol = ChartEngineConfig::new(SurfaceSize::new(800, 400)).with_mode(
        ChartMode::ExternalWidget {
            symbol: String::new(),
        },
    );
    assert!(ChartEngine::new(NullRenderer::default(), no_symbol).is_err());
}

#[test]
fn snapshot_json_reflects_engine_state() {
    let config = ChartEngineConfig::new(SurfaceSize::new(1_080, 600));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let bars: Vec<Bar> = (0..250)
        .map(|i| Bar {
            time: 1_000 + i as i64 * 900_000,
            open: 3.0,
            high: 3.5,
            low: 2.5,
            close: 3.2,
            volume: 1.0,
        })
        .collect();
    engine.set_series(SeriesKey::new("ADA", Timeframe::OneDay), bars);
    engine.pointer_move(503.0, 150.0, 0.0);

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.bars_len, 250);
    assert_eq!(snapshot.oldest_time, Some(1_000));
    assert_eq!(snapshot.window.end_index, 250);
    assert!(snapshot.crosshair.is_some());

    let json = engine.snapshot_json_pretty().expect("snapshot json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["bars_len"], 250);
    assert_eq!(value["series_key"]["symbol"], "ADA");
    assert_eq!(value["viewport"]["pan_offset_bars"], 0.0);
    assert_eq!(value["fullscreen"], false);
}
