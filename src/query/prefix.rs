//! Parsing of qualified completion prefixes.

use crate::parsing::patterns::is_identifier;

/// A `head.member` or `head:member` reference typed before the cursor.
///
/// `member` may be empty (`self.`); the host filters candidates by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    head: String,
    member: String,
}

impl Prefix {
    /// Parse `text` into exactly two components.
    pub fn parse(text: &str) -> Option<Self> {
        let split = text.find(['.', ':'])?;
        let (head, rest) = text.split_at(split);
        let member = &rest[1..];

        if !is_identifier(head) || member.contains(['.', ':']) {
            return None;
        }

        Some(Self {
            head: head.to_string(),
            member: member.to_string(),
        })
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn member(&self) -> &str {
        &self.member
    }
}

/// The qualified word ending at byte offset `cursor`.
///
/// Scans back over identifier characters, dots and colons.
pub fn word_before(buffer: &str, cursor: usize) -> &str {
    let mut end = cursor.min(buffer.len());
    while !buffer.is_char_boundary(end) {
        end -= 1;
    }

    let before = &buffer[..end];
    let start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || matches!(c, '_' | '.' | ':'))
        .last()
        .map_or(end, |(i, _)| i);

    &before[start..]
}
