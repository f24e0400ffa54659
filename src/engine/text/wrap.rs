//! Greedy line wrapping and ellipsis truncation.

use super::segment::{Segmenter, contains_cjk};
use super::{FontMetrics, Pen, measure};

pub const ELLIPSIS: &str = "...";

/// Truncates `text` so that it fits `max_width`, appending [`ELLIPSIS`].
///
/// Text that already fits is returned unchanged. When not even the
/// ellipsis fits, or nothing but whitespace would precede it, the result
/// is empty.
pub fn ellipsize<F: FontMetrics + ?Sized>(text: &str, max_width: f32, face: &F) -> String {
    if text.is_empty() || measure(face, text) <= max_width {
        return text.to_string();
    }

    let ellipsis_width = measure(face, ELLIPSIS);
    if ellipsis_width > max_width {
        return String::new();
    }

    let mut pen = Pen::new(face);
    let mut kept = String::new();
    for ch in text.chars() {
        if pen.peek(ch) + ellipsis_width > max_width {
            break;
        }
        pen.push(ch);
        kept.push(ch);
    }

    match kept.trim_end() {
        "" => String::new(),
        head => format!("{head}{ELLIPSIS}"),
    }
}

/// Wraps `text` into lines no wider than `max_width`, using the default
/// segmenter for CJK segments.
///
/// Always returns at least one line.
pub fn wrap_text<F: FontMetrics + ?Sized>(text: &str, max_width: f32, face: &F) -> Vec<String> {
    wrap_text_with(&Segmenter::default(), text, max_width, face)
}

pub fn wrap_text_with<F: FontMetrics + ?Sized>(
    segmenter: &Segmenter,
    text: &str,
    max_width: f32,
    face: &F,
) -> Vec<String> {
    if text.trim().is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let segment = segment.trim_end();
        if segment.is_empty() {
            lines.push(String::new());
        } else if contains_cjk(segment) {
            lines.extend(wrap_tokens(&segmenter.segment(segment), max_width, face));
        } else {
            lines.extend(wrap_runes(segment, max_width, face));
        }
    }
    lines
}

/// Packs whole tokens per line. A token wider than a full line is broken
/// character by character.
fn wrap_tokens<F: FontMetrics + ?Sized>(tokens: &[&str], max_width: f32, face: &F) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut pen = Pen::new(face);

    let flush = |lines: &mut Vec<String>, line: &str| {
        let line = line.trim_end();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    };

    for token in tokens.iter().filter(|t| !t.is_empty()) {
        if !current.is_empty() {
            let mut trial = pen;
            if trial.push_str(token) <= max_width {
                pen = trial;
                current.push_str(token);
                continue;
            }
            flush(&mut lines, &current);
            current.clear();
            pen = Pen::new(face);
        }

        // 行頭の空白は捨てる
        let token = token.trim_start();
        if token.is_empty() {
            continue;
        }
        if measure(face, token) <= max_width {
            pen.push_str(token);
            current.push_str(token);
            continue;
        }

        let mut pieces = wrap_runes(token, max_width, face);
        let Some(last) = pieces.pop() else {
            continue;
        };
        for piece in &pieces {
            flush(&mut lines, piece);
        }
        pen = Pen::new(face);
        pen.push_str(&last);
        current = last;
    }

    let tail = current.trim();
    if !tail.is_empty() {
        lines.push(tail.to_string());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Character-level greedy wrap. Breaks after the last whitespace seen on
/// the current line when there is one, otherwise before the overflowing
/// character.
fn wrap_runes<F: FontMetrics + ?Sized>(segment: &str, max_width: f32, face: &F) -> Vec<String> {
    let chars: Vec<char> = segment.trim_end().chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    let collect = |from: usize, to: usize| chars[from..to].iter().collect::<String>();

    let mut lines = Vec::new();
    let mut start = 0;
    let mut last_space: Option<usize> = None;
    let mut pen = Pen::new(face);
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            last_space = Some(i);
        }
        if pen.push(chars[i]) <= max_width {
            i += 1;
            continue;
        }

        let break_at = match last_space {
            Some(space) if space >= start => space,
            _ if i > start => i - 1,
            _ => i,
        };

        let mut line = collect(start, break_at + 1).trim_end().to_string();
        if line.is_empty() && break_at < i {
            line = collect(start, i);
        }
        if line.is_empty() {
            line = collect(start, i + 1);
        }
        lines.push(line);

        start = break_at + 1;
        while start < chars.len() && chars[start].is_whitespace() {
            start += 1;
        }
        i = start;
        last_space = None;
        pen = Pen::new(face);
    }

    if start < chars.len() {
        lines.push(collect(start, chars.len()).trim().to_string());
    }
    lines
}
