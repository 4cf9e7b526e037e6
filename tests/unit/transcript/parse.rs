use super::*;

#[test]
fn parses_all_line_shapes() {
    let src = "\
# narration take 3
1.00-1.42 Once

00:01.420 --> 00:01.900 upon
[00:00:01,900 - 00:00:02,300] *time*
";
    let t = parse_transcript(src).unwrap();
    let units = t.units();
    assert_eq!(units.len(), 3);
    assert_eq!(units[0], TimedText::new(1.0, 1.42, "Once"));
    assert!((units[1].start - 1.42).abs() < 1e-9);
    assert!((units[1].end - 1.9).abs() < 1e-9);
    assert_eq!(units[1].text, "upon");
    assert_eq!(units[2].text, "time");
    assert!(units[2].emphasis);
    assert!((units[2].end - 2.3).abs() < 1e-9);
}

#[test]
fn multi_word_text_is_kept_whole() {
    let t = parse_transcript("0.5-2.0 a quiet village").unwrap();
    assert_eq!(t.units()[0].text, "a quiet village");
}

#[test]
fn timestamps_in_all_forms() {
    assert_eq!(parse_timestamp("1.5"), Some(1.5));
    assert_eq!(parse_timestamp("01:02.5"), Some(62.5));
    assert_eq!(parse_timestamp("1:00:00,250"), Some(3600.25));
    assert_eq!(parse_timestamp("00:61"), None);
    assert_eq!(parse_timestamp("-1"), None);
    assert_eq!(parse_timestamp("1.5:00"), None);
    assert_eq!(parse_timestamp("nan"), None);
    assert_eq!(parse_timestamp(""), None);
}

#[test]
fn errors_carry_line_numbers() {
    let err = parse_transcript("0-1 ok\n\n2-x broken").unwrap_err();
    assert!(matches!(err, StoryreelError::Parse { line: 3, .. }), "{err}");

    let err = parse_transcript("3-2 backwards").unwrap_err();
    assert!(matches!(err, StoryreelError::Parse { line: 1, .. }));

    let err = parse_transcript("1-2").unwrap_err();
    assert!(err.to_string().contains("missing text"));

    let err = parse_transcript("no range here").unwrap_err();
    assert!(matches!(err, StoryreelError::Parse { line: 1, .. }));
}

#[test]
fn out_of_order_lines_are_rejected() {
    let err = parse_transcript("2-3 second\n1-2 first").unwrap_err();
    assert!(matches!(err, StoryreelError::Parse { line: 2, .. }));
}

#[test]
fn plain_range_may_have_spaces_around_dash() {
    let t = parse_transcript("1.0 - 2.0 word\n2.0 -3.0 next\n3.0- 4.0 last").unwrap();
    let units = t.units();
    assert_eq!(units[0], TimedText::new(1.0, 2.0, "word"));
    assert_eq!(units[1], TimedText::new(2.0, 3.0, "next"));
    assert_eq!(units[2], TimedText::new(3.0, 4.0, "last"));
}

#[test]
fn separators_inside_text_are_kept() {
    let t = parse_transcript("1.0-2.0 x --> y\n00:02.0 --> 00:03.0 a-->b\n3-4 well-known").unwrap();
    let units = t.units();
    assert_eq!(units[0].text, "x --> y");
    assert_eq!(units[0].end, 2.0);
    assert_eq!(units[1].text, "a-->b");
    assert_eq!(units[1].start, 2.0);
    assert_eq!(units[1].end, 3.0);
    assert_eq!(units[2].text, "well-known");
}

#[test]
fn start_without_separator_is_rejected() {
    let err = parse_transcript("1.0 2.0 word").unwrap_err();
    assert!(err.to_string().contains("START-END"), "{err}");
}
