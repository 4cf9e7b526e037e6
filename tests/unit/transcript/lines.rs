use super::*;
use crate::transcript::model::TimedText;

fn sample() -> Transcript {
    Transcript::new(vec![
        TimedText::new(0.0, 0.4, "In"),
        TimedText::new(0.4, 0.7, "the"),
        TimedText::new(0.7, 1.2, "beginning"),
        TimedText::new(2.5, 2.9, "there"),
        TimedText::new(2.9, 3.3, "was"),
        TimedText::new(3.3, 3.9, "light").emphasized(),
    ])
    .unwrap()
}

#[test]
fn pauses_split_lines() {
    let t = sample();
    let lines = t.caption_lines(&LineBreaking::default());
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].units, 0..3);
    assert_eq!(lines[1].units, 3..6);
    assert_eq!(t.line_text(&lines[0]), "In the beginning");
    assert_eq!(lines[1].start, 2.5);
    assert_eq!(lines[1].end, 3.9);
}

#[test]
fn max_units_splits_long_runs() {
    let t = sample();
    let rules = LineBreaking {
        max_units: 2,
        max_gap_secs: 10.0,
    };
    let lines = t.caption_lines(&rules);
    let ranges: Vec<_> = lines.iter().map(|l| l.units.clone()).collect();
    assert_eq!(ranges, vec![0..2, 2..4, 4..6]);
}

#[test]
fn line_at_respects_hold() {
    let t = sample();
    let lines = t.caption_lines(&LineBreaking::default());
    assert_eq!(line_at(&lines, -1.0, 0.2), None);
    assert_eq!(line_at(&lines, 0.5, 0.2), Some(0));
    assert_eq!(line_at(&lines, 1.3, 0.2), Some(0));
    assert_eq!(line_at(&lines, 2.0, 0.2), None);
    assert_eq!(line_at(&lines, 2.5, 0.2), Some(1));
}

#[test]
fn rules_validation() {
    assert!(LineBreaking::default().validate().is_ok());
    let bad = LineBreaking {
        max_units: 0,
        ..LineBreaking::default()
    };
    assert!(bad.validate().is_err());
}
