/// Go-to-definition for Tachyons classes.
///
/// Given a document and a cursor position this module:
///   1. Finds the word range under the cursor.
///   2. Narrows the word down to the single class the cursor is on.
///   3. Looks up `"." + class` in the [`DefinitionIndex`].
///
/// Every step can come up empty, which is reported as `None`.
use tower_lsp::lsp_types::{Location, Position};

use crate::index::DefinitionIndex;
use crate::resolver::class_at_offset;
use crate::word::{utf16_to_char_index, word_range_at};

/// Something that can answer "where is the thing under the cursor defined?".
pub trait DefinitionProvider {
    fn provide_definition(&self, content: &str, position: Position) -> Option<Location>;
}

impl DefinitionProvider for DefinitionIndex {
    fn provide_definition(&self, content: &str, position: Position) -> Option<Location> {
        let word = word_range_at(content, position)?;

        let column = position.character.saturating_sub(word.range.start.character) as usize;
        let offset = utf16_to_char_index(&word.text, column);
        let class_name = class_at_offset(&word.text, offset);

        let definition = self.lookup_class(class_name);
        if definition.is_none() {
            tracing::trace!("No Tachyons class {:?} under cursor", class_name);
        }
        definition.map(Location::from)
    }
}
