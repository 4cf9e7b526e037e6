use crate::{
    foundation::error::{StoryreelError, StoryreelResult},
    transcript::model::{TimedText, Transcript},
};

/// Parse a transcript from timestamp-range-prefixed lines.
///
/// Accepted line shapes:
///
/// ```text
/// 1.00-1.42 Once
/// 1.00 - 1.42 Once
/// 00:01.420 --> 00:01.900 upon
/// [00:00:01,900 - 00:00:02,300] *time*
/// ```
///
/// Timestamps are plain seconds, `mm:ss(.fff)` or `hh:mm:ss(.fff)`; `,` is accepted as the
/// decimal separator. The separator is only looked for in the time range, so the text may
/// contain `-` or `-->`. Text wrapped in `*...*` is emphasized. Blank lines and lines starting
/// with `#` are skipped.
pub fn parse_transcript(src: &str) -> StoryreelResult<Transcript> {
    let mut units = Vec::new();
    for (i, raw) in src.lines().enumerate() {
        let line_no = i + 1;
        let Some(unit) = parse_line(line_no, raw)? else {
            continue;
        };
        if let Some(prev) = units.last().map(|u: &TimedText| u.start)
            && unit.start < prev
        {
            return Err(StoryreelError::parse(
                line_no,
                format!("start {} is earlier than the previous line's {prev}", unit.start),
            ));
        }
        units.push(unit);
    }
    tracing::debug!(units = units.len(), "parsed transcript");
    Transcript::new(units)
}

fn parse_line(line_no: usize, raw: &str) -> StoryreelResult<Option<TimedText>> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (start_s, end_s, text) = split_range(line)
        .ok_or_else(|| StoryreelError::parse(line_no, "expected 'START-END text'"))?;

    let start = parse_timestamp(start_s).ok_or_else(|| {
        StoryreelError::parse(line_no, format!("invalid start timestamp '{start_s}'"))
    })?;
    let end = parse_timestamp(end_s)
        .ok_or_else(|| StoryreelError::parse(line_no, format!("invalid end timestamp '{end_s}'")))?;
    if start > end {
        return Err(StoryreelError::parse(
            line_no,
            format!("end {end} is before start {start}"),
        ));
    }

    let text = text.trim();
    if text.is_empty() {
        return Err(StoryreelError::parse(line_no, "missing text after time range"));
    }
    let (text, emphasis) = match text
        .strip_prefix('*')
        .and_then(|t| t.strip_suffix('*'))
    {
        Some(inner) if !inner.trim().is_empty() => (inner.trim(), true),
        _ => (text, false),
    };

    Ok(Some(TimedText {
        start,
        end,
        text: text.to_owned(),
        emphasis,
    }))
}

/// Split a line into `(start, end, rest)` without interpreting the timestamps.
fn split_range(line: &str) -> Option<(&str, &str, &str)> {
    if let Some(body) = line.strip_prefix('[') {
        let (range, rest) = body.split_once(']')?;
        let (start, end) = split_pair(range)?;
        return Some((start, end, rest));
    }

    let (first, rest) = split_first_token(line);
    if let Some((start, end)) = split_separator(first) {
        if !end.is_empty() {
            return Some((start, end, rest));
        }
        let (end, rest) = split_first_token(rest);
        return Some((start, end, rest));
    }

    // `START SEP END` or `START SEPEND`: only the token after the start may carry the separator.
    let (sep, rest) = split_first_token(rest);
    if sep == "-->" || sep == "-" {
        let (end, rest) = split_first_token(rest);
        return Some((first, end, rest));
    }
    let end = sep.strip_prefix("-->").or_else(|| sep.strip_prefix('-'))?;
    Some((first, end, rest))
}

fn split_separator(token: &str) -> Option<(&str, &str)> {
    token.split_once("-->").or_else(|| token.split_once('-'))
}

fn split_pair(range: &str) -> Option<(&str, &str)> {
    let (start, end) = split_separator(range)?;
    Some((start.trim(), end.trim()))
}

fn split_first_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest),
        None => (s, ""),
    }
}

/// Parse seconds, `mm:ss(.fff)` or `hh:mm:ss(.fff)` into seconds.
pub(crate) fn parse_timestamp(s: &str) -> Option<f64> {
    let s = s.trim().replace(',', ".");
    if s.is_empty() {
        return None;
    }
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    let mut secs = 0.0;
    for (i, part) in parts.iter().enumerate() {
        let last = i + 1 == parts.len();
        // Only the seconds component may carry a fraction.
        if !last && !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if part.is_empty() || part.starts_with(['+', '-']) {
            return None;
        }
        let v: f64 = part.parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        if i > 0 && v >= 60.0 {
            return None;
        }
        secs = secs * 60.0 + v;
    }
    Some(secs)
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/parse.rs"]
mod tests;
