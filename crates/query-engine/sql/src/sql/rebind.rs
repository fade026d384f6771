//! Scanning of caller-written SQL for `?` parameter markers.
//!
//! A `?` inside a quoted literal, a quoted identifier, a comment or (for
//! PostgreSQL) a dollar-quoted string is not a marker. `??` stands for a single
//! literal `?`, for operators such as the PostgreSQL `jsonb` key-exists operator.
//! Dialects binding with `?` cannot tell such a literal apart from a marker.

use super::dialect::Dialect;

/// A piece of caller-written SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Plain SQL text
    Code(&'a str),
    /// A quoted literal, a quoted identifier, a dollar-quoted string or a
    /// comment, kept as is
    Verbatim(&'a str),
    /// A parameter marker
    Marker,
    /// An escaped `??`, standing for a literal `?`
    Question,
}

/// Split SQL text written for a dialect into segments.
pub fn segments(sql: &str, dialect: Dialect) -> Vec<Segment<'_>> {
    let bytes = sql.as_bytes();
    let mut segments = vec![];
    let mut start = 0;
    let mut index = 0;

    while index < bytes.len() {
        let verbatim_end = match bytes[index] {
            quote @ (b'\'' | b'"') => Some(closing_quote(bytes, index, quote)),
            b'-' if bytes.get(index + 1) == Some(&b'-') => Some(
                bytes[index..]
                    .iter()
                    .position(|byte| *byte == b'\n')
                    .map_or(bytes.len(), |offset| index + offset),
            ),
            b'/' if bytes.get(index + 1) == Some(&b'*') => Some(
                sql[index + 2..]
                    .find("*/")
                    .map_or(bytes.len(), |offset| index + 2 + offset + 2),
            ),
            b'$' if dialect.has_dollar_quotes()
                && (index == 0 || !is_word_byte(bytes[index - 1])) =>
            {
                dollar_quote_end(sql, index)
            }
            _ => None,
        };

        if let Some(end) = verbatim_end {
            push_code(&mut segments, &sql[start..index]);
            segments.push(Segment::Verbatim(&sql[index..end]));
            index = end;
            start = end;
        } else if bytes[index] == b'?' {
            push_code(&mut segments, &sql[start..index]);
            if bytes.get(index + 1) == Some(&b'?') {
                segments.push(Segment::Question);
                index += 2;
            } else {
                segments.push(Segment::Marker);
                index += 1;
            }
            start = index;
        } else {
            index += 1;
        }
    }
    push_code(&mut segments, &sql[start..]);

    segments
}

fn push_code<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str) {
    if !text.is_empty() {
        segments.push(Segment::Code(text));
    }
}

/// The index just past the quote closing the one at `open`. A doubled quote
/// character is an escaped quote, not the end of the literal.
fn closing_quote(bytes: &[u8], open: usize, quote: u8) -> usize {
    let mut index = open + 1;
    while index < bytes.len() {
        if bytes[index] == quote {
            if bytes.get(index + 1) == Some(&quote) {
                index += 2;
                continue;
            }
            return index + 1;
        }
        index += 1;
    }
    bytes.len()
}

/// The index just past the dollar-quoted string opening at `open`, if a
/// `$tag$` delimiter opens there. An unterminated string runs to the end.
fn dollar_quote_end(sql: &str, open: usize) -> Option<usize> {
    let bytes = sql.as_bytes();
    let tag_length = bytes[open + 1..]
        .iter()
        .take_while(|byte| is_word_byte(**byte))
        .count();
    let tag_end = open + 1 + tag_length;
    let starts_with_digit = bytes.get(open + 1).is_some_and(u8::is_ascii_digit);
    if bytes.get(tag_end) != Some(&b'$') || starts_with_digit {
        return None;
    }

    let delimiter = &sql[open..=tag_end];
    let body = tag_end + 1;
    Some(
        sql[body..]
            .find(delimiter)
            .map_or(bytes.len(), |offset| body + offset + delimiter.len()),
    )
}

/// Number of parameter markers in the text.
pub fn placeholder_count(sql: &str, dialect: Dialect) -> usize {
    segments(sql, dialect)
        .iter()
        .filter(|segment| matches!(segment, Segment::Marker))
        .count()
}

/// Whether the text contains a `??` standing for a literal `?`.
pub fn has_escaped_question(sql: &str, dialect: Dialect) -> bool {
    segments(sql, dialect)
        .iter()
        .any(|segment| matches!(segment, Segment::Question))
}

/// Whether the text contains an `OR` keyword outside of any parentheses, in
/// which case ANDing something onto it requires wrapping it first.
pub fn has_top_level_or(sql: &str, dialect: Dialect) -> bool {
    let mut depth: usize = 0;
    for segment in segments(sql, dialect) {
        let Segment::Code(code) = segment else {
            continue;
        };
        let bytes = code.as_bytes();
        for (index, byte) in bytes.iter().enumerate() {
            match byte {
                b'(' => depth += 1,
                b')' => depth = depth.saturating_sub(1),
                b'o' | b'O' if depth == 0 => {
                    let is_or = matches!(bytes.get(index + 1), Some(b'r' | b'R'));
                    let starts_word = index == 0 || !is_word_byte(bytes[index - 1]);
                    let ends_word = bytes.get(index + 2).map_or(true, |next| !is_word_byte(*next));
                    if is_or && starts_word && ends_word {
                        return true;
                    }
                }
                _ => {}
            }
        }
    }
    false
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
