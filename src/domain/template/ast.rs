// Parsed form of a `:name` URL template

use serde::Serialize;

use super::encoding::SlotEncoding;

/// A template parsed into literal text and parameter slots.
///
/// Escaped colons (`\:`) are already literal `:` inside the parts; the
/// original text is kept in `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplate {
    source: String,
    parts: Vec<TemplatePart>,
    slots: Vec<ParameterSlot>,
}

impl UrlTemplate {
    pub(super) fn new(source: &str, parts: Vec<TemplatePart>, slots: Vec<ParameterSlot>) -> Self {
        Self {
            source: source.to_string(),
            parts,
            slots,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// Distinct slots in order of first occurrence
    pub fn slots(&self) -> &[ParameterSlot] {
        &self.slots
    }

    pub fn slot(&self, name: &str) -> Option<&ParameterSlot> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    /// Template text with escapes removed and every slot written as `:name`
    pub fn unescaped(&self) -> String {
        let mut out = String::with_capacity(self.source.len());
        for part in &self.parts {
            match part {
                TemplatePart::Literal(text) => out.push_str(text),
                TemplatePart::Slot(index) => {
                    out.push(':');
                    out.push_str(&self.slots[*index].name);
                }
            }
        }
        out
    }
}

/// A template is a sequence of literal text and slot occurrences.
/// `Slot` indexes into [`UrlTemplate::slots`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Slot(usize),
}

/// A named substitution point
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSlot {
    pub name: String,
    /// Set when the slot is written as `=:name` after a `?`
    pub is_query_value: bool,
}

impl ParameterSlot {
    pub fn encoding(&self) -> SlotEncoding {
        if self.is_query_value {
            SlotEncoding::QueryValue
        } else {
            SlotEncoding::PathSegment
        }
    }
}

/// ASCII word character, `[A-Za-z0-9_]`
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
