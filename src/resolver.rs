//! Class-name extraction from the word under the cursor.
//!
//! Depending on the editor's word rules the "word" under the cursor can be
//! a single class (`pa1`) or a whole attribute value, quotes included
//! (`"pa1 mb2 red"`).  [`class_at_offset`] narrows it down to the one class
//! the cursor is actually on.

/// Characters stripped from both ends of the word.
const QUOTES: &[char] = &['"', '\''];

/// Return the class name in `word` under the cursor.
///
/// `offset` is the cursor's character offset from the start of the word
/// range (quotes included).  The cursor selects a class when it is inside
/// it, touching its end, or on the space right after it.  An offset past
/// the last class selects the last class, and a word that is empty once
/// the quotes are stripped yields `""`.
pub fn class_at_offset(word: &str, offset: usize) -> &str {
    let stripped = word.trim_start_matches(QUOTES);
    let leading = word.len() - stripped.len();
    let stripped = stripped.trim_end_matches(QUOTES);

    // Quotes are single-byte, so `leading` is also a character count.
    let offset = offset.saturating_sub(leading);

    let mut boundary = 0;
    let mut last = "";
    for candidate in stripped.split(' ') {
        boundary += 1 + candidate.chars().count();
        if offset < boundary {
            return candidate;
        }
        last = candidate;
    }
    last
}
