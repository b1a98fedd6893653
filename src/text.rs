//! # Cell Text
//!
//! Cell content is never laid out as rich text. It is truncated to a
//! character budget and, for height estimates, broken into lines at UAX#14
//! opportunities.

use unicode_linebreak::{linebreaks, BreakOpportunity};

const ELLIPSIS: char = '…';

/// Truncate `text` to at most `budget` characters. Truncated text ends
/// with an ellipsis that counts toward the budget.
pub fn truncate_to_budget(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    if budget == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(budget - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Split text into break-separated segments. Each segment ends right
/// after a break opportunity (trailing whitespace included).
fn segments(text: &str) -> Vec<(&str, bool)> {
    let mut out = Vec::new();
    let mut start = 0;
    for (byte_offset, opp) in linebreaks(text) {
        // The final opportunity at text.len() closes the last segment.
        out.push((
            &text[start..byte_offset],
            opp == BreakOpportunity::Mandatory && byte_offset < text.len(),
        ));
        start = byte_offset;
    }
    out
}

/// Number of lines `text` occupies when filled greedily into lines of
/// `max_chars` characters. Empty text still takes one line.
pub fn count_lines(text: &str, max_chars: usize) -> usize {
    let max_chars = max_chars.max(1);
    let mut lines = 1;
    let mut line_len = 0usize;

    for (segment, forced) in segments(text) {
        let visible = segment.trim_end().chars().count();
        let full = segment.chars().count();

        if line_len > 0 && line_len + visible > max_chars {
            lines += 1;
            line_len = 0;
        }
        if visible > max_chars {
            // A single word wider than the line is hard-split.
            lines += (visible - 1) / max_chars;
            line_len = visible - ((visible - 1) / max_chars) * max_chars;
        } else {
            line_len += full;
        }

        if forced {
            lines += 1;
            line_len = 0;
        }
    }

    lines
}
