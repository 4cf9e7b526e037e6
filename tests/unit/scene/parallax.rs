use super::*;
use crate::scene::model::LayerKind;

#[test]
fn deeper_layers_move_further() {
    let drift = Vec2::new(-24.0, 6.0);
    let bg = layer_offset(drift, 2.0, LayerKind::Background.default_depth());
    let mid = layer_offset(drift, 2.0, LayerKind::Midground.default_depth());
    let fg = layer_offset(drift, 2.0, LayerKind::Foreground.default_depth());
    assert!(bg.x.abs() < mid.x.abs());
    assert!(mid.x.abs() < fg.x.abs());
    assert_eq!(fg, Vec2::new(-48.0, 12.0));
}

#[test]
fn offset_is_zero_at_scene_start() {
    assert_eq!(layer_offset(Vec2::new(10.0, 10.0), 0.0, 1.0), Vec2::ZERO);
    assert_eq!(layer_offset(Vec2::new(10.0, 0.0), -0.5, 1.0), Vec2::new(-5.0, 0.0));
}

#[test]
fn zoom_scales_with_depth() {
    assert_eq!(layer_scale(1.2, 0.0), 1.0);
    assert!((layer_scale(1.2, 0.5) - 1.1).abs() < 1e-12);
    assert!((layer_scale(1.2, 1.0) - 1.2).abs() < 1e-12);
}

#[test]
fn config_defaults_and_validation() {
    let cfg: ParallaxConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, ParallaxConfig::default());
    cfg.validate().unwrap();

    let bad = ParallaxConfig {
        drift: Vec2::new(f64::NAN, 0.0),
    };
    assert!(bad.validate().is_err());
}
