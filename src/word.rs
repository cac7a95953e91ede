/// Word range detection.
///
/// Editors hand their extensions the word range under the cursor; over
/// LSP only the position arrives, so the server applies the same kind of
/// default word pattern itself.  Word characters are everything except
/// whitespace and the usual punctuation separators.  Hyphens and
/// underscores are kept as word characters so that Tachyons names such as
/// `bg-light-red` or `w-50` stay in one piece.
use tower_lsp::lsp_types::{Position, Range};

/// Characters that end a word.
const SEPARATORS: &str = "`~!@#$%^&*()=+[{]}\\|;:'\",.<>/?";

/// A word in a document: its range (single line) and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRange {
    pub range: Range,
    pub text: String,
}

pub fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !SEPARATORS.contains(c)
}

/// Convert a UTF-16 column into an index into `text.chars()`.
///
/// A column pointing into the middle of a surrogate pair maps to the
/// character it belongs to; columns past the end clamp to the char count.
pub fn utf16_to_char_index(text: &str, column: usize) -> usize {
    let mut units = 0;
    for (i, c) in text.chars().enumerate() {
        units += c.len_utf16();
        if units > column {
            return i;
        }
    }
    text.chars().count()
}

fn utf16_len(chars: &[char]) -> u32 {
    chars.iter().map(|c| c.len_utf16() as u32).sum()
}

/// Find the word at `position`.
///
/// The cursor may sit inside a word or directly after its last character.
/// Returns `None` on whitespace or punctuation that does not touch a word,
/// and for positions beyond the end of the document.  Columns are UTF-16
/// code units in both directions, as LSP positions are by default.
pub fn word_range_at(content: &str, position: Position) -> Option<WordRange> {
    let line = content.lines().nth(position.line as usize)?;
    let chars: Vec<char> = line.chars().collect();
    let col = utf16_to_char_index(line, position.character as usize);

    // Prefer the word the cursor is on; otherwise the word it touches on
    // the left.
    let anchor = if col < chars.len() && is_word_char(chars[col]) {
        col
    } else if col > 0 && is_word_char(chars[col - 1]) {
        col - 1
    } else {
        return None;
    };

    let mut start = anchor;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }

    let mut end = anchor;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    Some(WordRange {
        range: Range {
            start: Position {
                line: position.line,
                character: utf16_len(&chars[..start]),
            },
            end: Position {
                line: position.line,
                character: utf16_len(&chars[..end]),
            },
        },
        text: chars[start..end].iter().collect(),
    })
}
