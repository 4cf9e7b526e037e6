use super::*;
use crate::animation::anim::Anim;
use crate::animation::curve::Curve;
use crate::composition::dsl::StoryboardBuilder;
use crate::foundation::core::Fps;
use crate::scene::model::{Layer, SceneWindow};
use crate::transcript::model::{TimedText, Transcript};

fn board() -> Storyboard {
    StoryboardBuilder::new(Fps::new(30, 1).unwrap(), 120)
        .scene(
            SceneWindow::new("a", 0.0, 2.0)
                .layer(Layer::background("a_bg"))
                .layer(Layer::foreground("a_fg")),
        )
        .scene(
            SceneWindow::new("b", 2.0, 4.0)
                .layer(Layer::background("b_bg"))
                .layer(Layer::foreground("b_fg"))
                .zoom(Anim::Curve(
                    Curve::from_pairs([(0.0, 1.0), (60.0, 1.2)]).unwrap(),
                )),
        )
        .transcript(
            Transcript::new(vec![
                TimedText::new(0.5, 1.0, "Once"),
                TimedText::new(1.0, 1.6, "upon").emphasized(),
            ])
            .unwrap(),
        )
        .build()
        .unwrap()
}

#[test]
fn first_frame_shows_only_first_scene() {
    let b = board();
    let s = Evaluator::eval_frame(&b, FrameIndex(0));
    assert_eq!(s.time_secs, 0.0);
    let ids: Vec<_> = s.layers.iter().map(|l| l.asset_id.as_str()).collect();
    assert_eq!(ids, vec!["a_bg", "a_fg"]);
    for l in &s.layers {
        assert_eq!(l.opacity, 1.0);
        assert_eq!(l.translate, Vec2::ZERO);
        assert_eq!(l.scale, 1.0);
    }
    assert!(s.words.is_empty());
    assert!(s.caption.is_none());
}

#[test]
fn boundary_frame_crossfades_evenly() {
    let b = board();
    let s = Evaluator::eval_frame(&b, FrameIndex(60));
    assert_eq!(s.layers.len(), 4);
    let a: f64 = s.layers.iter().filter(|l| l.scene_id == "a").map(|l| l.opacity).next().unwrap();
    let bb: f64 = s.layers.iter().filter(|l| l.scene_id == "b").map(|l| l.opacity).next().unwrap();
    assert!((a + bb - 1.0).abs() < 1e-12);
    assert!((a - 0.5).abs() < 1e-9);
    // Incoming scene paints on top.
    assert_eq!(s.layers[3].asset_id, "b_fg");
}

#[test]
fn parallax_scales_with_depth() {
    let b = board();
    let s = Evaluator::eval_frame(&b, FrameIndex(30));
    let fg = s.layers.iter().find(|l| l.asset_id == "a_fg").unwrap();
    let bg = s.layers.iter().find(|l| l.asset_id == "a_bg").unwrap();
    assert!((fg.translate.x + 24.0).abs() < 1e-9);
    assert!((bg.translate.x + 4.8).abs() < 1e-9);
    assert_eq!(fg.translate.y, 0.0);
}

#[test]
fn zoom_is_sampled_in_scene_local_frames() {
    let b = board();
    let s = Evaluator::eval_frame(&b, FrameIndex(90));
    let fg = s.layers.iter().find(|l| l.asset_id == "b_fg").unwrap();
    let bg = s.layers.iter().find(|l| l.asset_id == "b_bg").unwrap();
    assert!((fg.scale - 1.1).abs() < 1e-9, "got {}", fg.scale);
    assert!((bg.scale - 1.02).abs() < 1e-9, "got {}", bg.scale);
}

#[test]
fn frames_past_end_clamp() {
    let b = board();
    let s = Evaluator::eval_frame(&b, FrameIndex(10_000));
    assert_eq!(s.frame, FrameIndex(119));
    assert_eq!(s, Evaluator::eval_frame(&b, FrameIndex(119)));
}

#[test]
fn single_frame_board_clamps_to_frame_zero() {
    let mut b = board();
    b.duration = 1;
    assert_eq!(Evaluator::eval_frame(&b, FrameIndex(0)).frame, FrameIndex(0));
    let s = Evaluator::eval_frame(&b, FrameIndex(1));
    assert_eq!(s.frame, FrameIndex(0));
    assert_eq!(s.time_secs, 0.0);
}

#[test]
fn words_fade_pop_and_highlight() {
    let b = board();

    let s = Evaluator::eval_frame(&b, FrameIndex(22));
    assert_eq!(s.words.len(), 1);
    let once = &s.words[0];
    assert_eq!(once.text, "Once");
    assert_eq!(once.opacity, 1.0);
    assert!(once.spoken);
    assert!(once.scale > b.captions.enter_scale);

    // "upon" is in its lead-in margin while "Once" is still spoken.
    let s = Evaluator::eval_frame(&b, FrameIndex(28));
    assert_eq!(s.words.len(), 2);
    assert_eq!(s.words[1].index, 1);
    assert_eq!(s.words[1].opacity, 0.0);
    assert!(!s.words[1].spoken);
    assert_eq!(s.words[1].scale, b.captions.enter_scale);
    assert_eq!(s.words[1].color, b.captions.base_color);

    let s = Evaluator::eval_frame(&b, FrameIndex(39));
    let upon = s.words.iter().find(|w| w.index == 1).unwrap();
    assert!(upon.emphasis);
    assert_eq!(upon.color, b.captions.emphasis_color);
    assert!(upon.scale > 1.0);
}

#[test]
fn caption_line_covers_both_words() {
    let b = board();
    let s = Evaluator::eval_frame(&b, FrameIndex(30));
    let caption = s.caption.unwrap();
    assert_eq!(caption.line_index, 0);
    assert_eq!(caption.text, "Once upon");
    assert_eq!(caption.start, 0.5);
    assert_eq!(caption.end, 1.6);

    // Held for 0.4s after the last word, then cleared.
    assert!(Evaluator::eval_frame(&b, FrameIndex(58)).caption.is_some());
    assert!(Evaluator::eval_frame(&b, FrameIndex(62)).caption.is_none());
}

#[test]
fn range_rejects_empty_and_zero_threads() {
    let b = board();
    let empty = FrameRange {
        start: FrameIndex(5),
        end: FrameIndex(5),
    };
    assert!(Evaluator::eval_range(&b, empty, &EvalThreading::default()).is_err());

    let threading = EvalThreading {
        parallel: true,
        threads: Some(0),
        ..EvalThreading::default()
    };
    assert!(Evaluator::eval_range(&b, b.frame_range(), &threading).is_err());
}

#[test]
fn parallel_range_matches_sequential() {
    let b = board();
    let seq = Evaluator::eval_range(&b, b.frame_range(), &EvalThreading::default()).unwrap();
    let par = Evaluator::eval_range(
        &b,
        b.frame_range(),
        &EvalThreading {
            parallel: true,
            chunk_size: 7,
            threads: Some(3),
        },
    )
    .unwrap();
    assert_eq!(seq.len(), 120);
    assert_eq!(seq, par);
    assert!(seq.iter().enumerate().all(|(i, s)| s.frame == FrameIndex(i as u64)));
}

#[test]
fn shared_plan_matches_per_frame_evaluation() {
    let mut b = board();
    b.captions.pop_frames = Some(8.0);
    let plan = FramePlan::new(&b);
    assert_eq!(plan.lines, b.caption_lines());
    assert_eq!(
        plan.pop_settle_frames,
        Some(b.captions.pop.settle_frames(b.fps, DEFAULT_SETTLE_THRESHOLD))
    );

    let range = Evaluator::eval_range(&b, b.frame_range(), &EvalThreading::default()).unwrap();
    for state in &range {
        assert_eq!(state, &Evaluator::eval_frame(&b, state.frame));
    }

    // The stretched pop reaches the emphasis rest scale by 8 frames after the word starts.
    let upon = range[38].words.iter().find(|w| w.index == 1).unwrap();
    assert!((upon.scale - b.captions.emphasis_scale).abs() < 0.01, "{}", upon.scale);
}
