use serde::Serialize;

/// Piece of a highlighted string, borrowed from the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Segment<'a> {
    Plain(&'a str),
    Match(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(text) | Segment::Match(text) => text,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Segment::Match(_))
    }
}

/// Splits `text` around every non-overlapping, case-insensitive occurrence of `query`.
///
/// The query is trimmed and compared literally; no character has special meaning. A blank
/// query yields the whole text as one plain segment. Joining the segments always gives back
/// `text`.
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    let needle: Vec<char> = fold_case(query.trim()).chars().collect();
    if needle.is_empty() {
        return vec![Segment::Plain(text)];
    }

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while cursor < text.len() {
        match match_len(&text[cursor..], &needle) {
            Some(len) => {
                if plain_start < cursor {
                    segments.push(Segment::Plain(&text[plain_start..cursor]));
                }
                segments.push(Segment::Match(&text[cursor..cursor + len]));
                cursor += len;
                plain_start = cursor;
            }
            None => {
                cursor += text[cursor..]
                    .chars()
                    .next()
                    .map(char::len_utf8)
                    .unwrap_or(1);
            }
        }
    }

    if plain_start < text.len() {
        segments.push(Segment::Plain(&text[plain_start..]));
    }
    if segments.is_empty() {
        segments.push(Segment::Plain(text));
    }

    segments
}

/// Lowercases one character at a time, ignoring word position. Search and highlighting
/// both fold through here so they agree on what matches.
pub(crate) fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Byte length of the prefix of `haystack` whose lowercase form equals `needle`, if any.
/// A match must end on a character boundary of `haystack`.
fn match_len(haystack: &str, needle: &[char]) -> Option<usize> {
    let mut expected = needle.iter();
    let mut consumed = 0;

    for ch in haystack.chars() {
        for lower in ch.to_lowercase() {
            if expected.next() != Some(&lower) {
                return None;
            }
        }
        consumed += ch.len_utf8();
        if expected.len() == 0 {
            return Some(consumed);
        }
    }

    None
}
