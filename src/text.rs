//! Shared text helpers used by the detection and rewriting layers.

use std::collections::BTreeSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::Span;

/// Characters that close a sentence for the purpose of the sentence window.
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

const ELLIPSIS: char = '…';

/// Titles written with a period that does not close the sentence.
const HONORIFICS: [&str; 10] = ["mr", "mrs", "ms", "dr", "prof", "hon", "messrs", "sr", "jr", "st"];

/// Returns true if `word`, without its period, is a title such as "Mr" or "Dr".
pub fn is_honorific(word: &str) -> bool {
    let word = word.strip_suffix('.').unwrap_or(word);
    HONORIFICS.iter().any(|h| word.eq_ignore_ascii_case(h))
}

/// Returns true if the character at `index` is a terminator that closes a
/// sentence, as opposed to the period of an honorific.
fn ends_sentence(text: &str, index: usize, c: char) -> bool {
    if !SENTENCE_TERMINATORS.contains(&c) {
        return false;
    }
    if c != '.' {
        return true;
    }
    let word = text[..index]
        .rsplit(|ch: char| !ch.is_alphabetic())
        .next()
        .unwrap_or_default();
    !is_honorific(word)
}

/// Normalize names by trimming quotes, lowercasing, and removing leading
/// articles so display texts from different sources compare consistently.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '“' | '”'))
        .trim()
        .to_lowercase();

    for article in ["the ", "a ", "an "] {
        if let Some(rest) = trimmed.strip_prefix(article) {
            return rest.to_string();
        }
    }

    trimmed
}

/// Largest char boundary at or below `index`.
pub fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut i = index;
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Recover the sentence surrounding `span`.
///
/// The window runs from just after the nearest preceding terminator to just
/// after the nearest following terminator, each side capped at `max_chars`
/// characters. Surrounding whitespace is trimmed from the result.
pub fn sentence_window(text: &str, span: Span, max_chars: usize) -> Span {
    let start = floor_char_boundary(text, span.start.min(span.end));
    let end = floor_char_boundary(text, span.end.max(start));

    let mut window_start = start;
    for (seen, (idx, c)) in text[..start].char_indices().rev().enumerate() {
        if ends_sentence(text, idx, c) || seen >= max_chars {
            break;
        }
        window_start = idx;
    }

    let mut window_end = end;
    for (seen, (idx, c)) in text[end..].char_indices().enumerate() {
        if seen >= max_chars {
            break;
        }
        window_end = end + idx + c.len_utf8();
        if ends_sentence(text, end + idx, c) {
            break;
        }
    }

    let raw = &text[window_start..window_end];
    let leading = raw.len() - raw.trim_start().len();
    let trailing = raw.len() - raw.trim_end().len();
    if leading + trailing >= raw.len() {
        return Span::new(window_start, window_start);
    }
    Span::new(window_start + leading, window_end - trailing)
}

/// Truncate to at most `limit` characters, marking the cut with an ellipsis.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        None => text.to_string(),
        Some((cut, _)) => {
            let mut out = text[..cut].trim_end().to_string();
            out.push(ELLIPSIS);
            out
        }
    }
}

/// Lowercased word tokens longer than `min_chars` characters.
pub fn significant_tokens(text: &str, min_chars: usize) -> BTreeSet<String> {
    text.unicode_words()
        .filter(|word| word.chars().count() > min_chars)
        .map(str::to_lowercase)
        .collect()
}

/// Replace the first character with its lowercase form.
pub fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replace the first character with its uppercase form.
pub fn uppercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Returns true if `offset` is the first non-whitespace position of a
/// sentence: only whitespace separates it from the text start or the previous
/// terminator.
pub fn is_sentence_start(text: &str, offset: usize) -> bool {
    let offset = floor_char_boundary(text, offset);
    text[..offset]
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(true, |(idx, c)| ends_sentence(text, idx, c))
}

/// Split `text` into sentence segments that cover it exactly, trailing
/// whitespace included. Unlike plain UAX #29 bounds, a period after an
/// honorific ("Mr. Khan") does not end a segment.
pub fn sentence_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (idx, segment) in text.split_sentence_bound_indices() {
        let end = idx + segment.len();
        let body = segment.trim_end();
        let held = body
            .char_indices()
            .last()
            .map_or(false, |(last, c)| c == '.' && !ends_sentence(text, idx + last, c));
        if held && end < text.len() {
            continue;
        }
        segments.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        segments.push(&text[start..]);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_text(text: &str, needle: &str, max_chars: usize) -> String {
        let start = text.find(needle).unwrap();
        let span = sentence_window(text, Span::new(start, start + needle.len()), max_chars);
        span.slice(text).unwrap().to_string()
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("\"The Agency\""), "agency");
        assert_eq!(normalize_name("  Ali Khan "), "ali khan");
        assert_eq!(normalize_name("Anwar"), "anwar");
    }

    #[test]
    fn test_sentence_window_stops_at_terminators() {
        let text = "First point. Ali Khan committed fraud against the firm. Last point.";
        assert_eq!(
            window_text(text, "committed fraud", 300),
            "Ali Khan committed fraud against the firm."
        );
    }

    #[test]
    fn test_sentence_window_without_terminators() {
        let text = "no terminators here at all";
        assert_eq!(window_text(text, "terminators", 300), text);
    }

    #[test]
    fn test_sentence_window_is_capped() {
        let text = "aaaaaaaaaa MATCH bbbbbbbbbb";
        assert_eq!(window_text(text, "MATCH", 3), "aa MATCH bb");
    }

    #[test]
    fn test_sentence_window_multibyte_boundaries() {
        let text = "Ünïcödé—text. Qué pasó con el fraude? Fin.";
        assert_eq!(window_text(text, "fraude", 300), "Qué pasó con el fraude?");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exactly", 7), "exactly");
        assert_eq!(truncate_chars("truncated text", 9), "truncated…");
        assert_eq!(truncate_chars("ééééé", 2), "éé…");
    }

    #[test]
    fn test_significant_tokens() {
        let tokens = significant_tokens("Bank statement: fraud at the Bank", 4);
        let tokens: Vec<_> = tokens.into_iter().collect();
        assert_eq!(tokens, vec!["fraud", "statement"]);
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(lowercase_first("Ali Khan"), "ali Khan");
        assert_eq!(uppercase_first("it is alleged"), "It is alleged");
        assert_eq!(lowercase_first(""), "");
    }

    #[test]
    fn test_is_sentence_start() {
        let text = "One. Two three";
        assert!(is_sentence_start(text, 0));
        assert!(is_sentence_start(text, 5));
        assert!(!is_sentence_start(text, 9));
    }

    #[test]
    fn test_honorifics_do_not_end_sentences() {
        let text = "Intro. Mr. Khan committed murder in Karachi. Dr. Aziz left.";
        assert_eq!(
            window_text(text, "committed murder", 300),
            "Mr. Khan committed murder in Karachi."
        );
        assert!(!is_sentence_start(text, text.find("Khan").unwrap()));
        assert_eq!(
            sentence_segments(text),
            vec!["Intro. ", "Mr. Khan committed murder in Karachi. ", "Dr. Aziz left."]
        );
        assert!(is_honorific("Mrs."));
        assert!(!is_honorific("Khan"));
    }

    #[test]
    fn test_sentence_segments_cover_text() {
        for text in ["", "One. Two!  Three?", "Ends with Mr.", "No terminator"] {
            assert_eq!(sentence_segments(text).concat(), text);
        }
    }
}
