//! Entity types produced by recognizers.

use serde::{Deserialize, Serialize};

/// A labelled span of the input text.
///
/// `start` and `end` are character offsets (Unicode scalar values, end
/// exclusive) into the text the recognizer was given, so that
/// `text.chars().skip(start).take(end - start)` reproduces [`Entity::text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// The text content of the entity
    pub text: String,
    /// Category tag (e.g. `PERSON`, `ORG`, `GPE`)
    pub label: String,
    /// Starting character offset in the original text
    pub start: usize,
    /// Ending character offset in the original text (exclusive)
    pub end: usize,
}

impl Entity {
    /// Create a new entity.
    pub fn new(text: impl Into<String>, label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start,
            end,
        }
    }

    /// Length of the span in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether two spans share at least one character.
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// Maps between byte offsets and character offsets of one text.
///
/// Regex matches report byte offsets; callers of the sidecar count characters.
#[derive(Debug, Clone)]
pub struct CharIndex<'a> {
    text: &'a str,
    /// Byte offset of every character, plus `text.len()` as the final boundary
    boundaries: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    /// Index the character boundaries of `text`.
    pub fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    /// Number of characters in the text.
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Convert a byte offset on a character boundary into a character offset.
    pub fn char_offset(&self, byte: usize) -> Option<usize> {
        self.boundaries.binary_search(&byte).ok()
    }

    /// Convert a character offset into a byte offset.
    pub fn byte_offset(&self, char_offset: usize) -> Option<usize> {
        self.boundaries.get(char_offset).copied()
    }

    /// Slice the text by character offsets.
    pub fn slice(&self, start: usize, end: usize) -> Option<&'a str> {
        if start > end {
            return None;
        }
        let from = self.byte_offset(start)?;
        let to = self.byte_offset(end)?;
        self.text.get(from..to)
    }

    /// Build an entity from a byte range, converting to character offsets.
    pub fn entity_from_bytes(&self, label: &str, start: usize, end: usize) -> Option<Entity> {
        let char_start = self.char_offset(start)?;
        let char_end = self.char_offset(end)?;
        let text = self.text.get(start..end)?;
        Some(Entity::new(text, label, char_start, char_end))
    }

    /// Build an entity from a character range.
    pub fn entity_from_chars(&self, label: &str, start: usize, end: usize) -> Option<Entity> {
        let text = self.slice(start, end)?;
        Some(Entity::new(text, label, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets_match_bytes() {
        let index = CharIndex::new("Barack Obama visited Paris.");
        assert_eq!(index.char_len(), 27);
        assert_eq!(index.char_offset(21), Some(21));
        assert_eq!(index.slice(21, 26), Some("Paris"));
    }

    #[test]
    fn test_multibyte_offsets() {
        let text = "José met Zoë in Zürich";
        let index = CharIndex::new(text);

        let start = text.find("Zürich").unwrap();
        let entity = index
            .entity_from_bytes("GPE", start, start + "Zürich".len())
            .unwrap();

        assert_eq!(entity.text, "Zürich");
        assert_eq!(entity.start, 16);
        assert_eq!(entity.end, 22);
        assert_eq!(entity.end, index.char_len());

        let chars: String = text.chars().skip(entity.start).take(entity.len()).collect();
        assert_eq!(chars, entity.text);
    }

    #[test]
    fn test_offsets_inside_a_character_are_rejected() {
        let index = CharIndex::new("é");
        assert_eq!(index.char_offset(1), None);
        assert!(index.entity_from_bytes("X", 0, 1).is_none());
        assert_eq!(index.slice(1, 0), None);
        assert_eq!(index.slice(0, 2), None);
    }

    #[test]
    fn test_entity_overlap() {
        let a = Entity::new("New York", "GPE", 0, 8);
        let b = Entity::new("York", "GPE", 4, 8);
        let c = Entity::new("City", "GPE", 9, 13);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(a.len(), 8);
        assert!(!a.is_empty());
    }
}
