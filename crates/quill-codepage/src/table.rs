//! The code-page table: loading the JSON rows into slots and the
//! character, index and combination lookups over them.

use quill_types::{QuillError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Number of slots in a code page (one byte per character).
const SLOT_COUNT: usize = 256;

/// One row of the table resource.
#[derive(Debug, Deserialize)]
struct Entry {
    /// Hex code point of the character.
    code: String,
    /// Optional mnemonic spelling, e.g. `!=` for `≠`.
    #[serde(default)]
    combination: Option<String>,
    /// Explicit slot. Entries without one take the first free slot.
    #[serde(default)]
    index: Option<usize>,
    /// Hex code point shown instead of the character (e.g. `¶` for newline).
    #[serde(default)]
    display: Option<String>,
}

/// A loaded code page.
#[derive(Debug, Clone)]
pub struct CodePage {
    /// Slot → character. `None` for unassigned slots.
    slots: Vec<Option<char>>,
    indices: HashMap<char, u8>,
    combinations: HashMap<String, char>,
    displays: HashMap<char, char>,
}

impl CodePage {
    /// Parse a table from its JSON resource form.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<Entry> = serde_json::from_str(json)
            .map_err(|e| QuillError::InvalidCodePage(e.to_string()))?;
        Self::from_entries(entries)
    }

    fn from_entries(entries: Vec<Entry>) -> Result<Self> {
        if entries.len() > SLOT_COUNT {
            return Err(QuillError::InvalidCodePage(format!(
                "{} entries exceed the {SLOT_COUNT} available slots",
                entries.len()
            )));
        }

        let mut slots: Vec<Option<char>> = vec![None; SLOT_COUNT];
        let mut indices = HashMap::with_capacity(entries.len());
        let mut combinations = HashMap::new();
        let mut displays = HashMap::new();
        let mut pending = Vec::new();

        // Explicit indices claim their slots first.
        for entry in &entries {
            let ch = parse_code_point(&entry.code)?;
            if indices.contains_key(&ch) || pending.contains(&ch) {
                return Err(QuillError::InvalidCodePage(format!(
                    "character U+{:04X} listed twice",
                    u32::from(ch)
                )));
            }
            match entry.index {
                Some(index) if index >= SLOT_COUNT => {
                    return Err(QuillError::InvalidCodePage(format!(
                        "index {index} is out of range"
                    )));
                }
                Some(index) => {
                    if slots[index].is_some() {
                        return Err(QuillError::InvalidCodePage(format!(
                            "index {index} assigned twice"
                        )));
                    }
                    slots[index] = Some(ch);
                    indices.insert(ch, index as u8);
                }
                None => pending.push(ch),
            }

            if let Some(combination) = &entry.combination {
                if combinations.insert(combination.clone(), ch).is_some() {
                    return Err(QuillError::InvalidCodePage(format!(
                        "combination '{combination}' listed twice"
                    )));
                }
            }
            if let Some(display) = &entry.display {
                displays.insert(ch, parse_code_point(display)?);
            }
        }

        // Everything else fills the free slots in ascending order.
        let mut next = 0;
        for ch in pending {
            while slots[next].is_some() {
                next += 1;
            }
            slots[next] = Some(ch);
            indices.insert(ch, next as u8);
        }

        let used = slots.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
        slots.truncate(used);
        debug!(entries = indices.len(), "code page loaded");

        Ok(Self {
            slots,
            indices,
            combinations,
            displays,
        })
    }

    /// Whether the character belongs to the code page.
    pub fn exists(&self, ch: char) -> bool {
        self.indices.contains_key(&ch)
    }

    /// One-byte index of a character.
    pub fn index_of(&self, ch: char) -> Result<u8> {
        self.indices
            .get(&ch)
            .copied()
            .ok_or(QuillError::UnknownToken(ch))
    }

    /// Character stored at an index.
    pub fn char_at(&self, index: usize) -> Result<char> {
        self.slots
            .get(index)
            .copied()
            .flatten()
            .ok_or(QuillError::InvalidIndex(index))
    }

    /// Character registered under a mnemonic.
    pub fn char_from_combination(&self, combination: &str) -> Result<char> {
        self.combinations
            .get(combination)
            .copied()
            .ok_or_else(|| QuillError::UnknownCombination(combination.to_string()))
    }

    /// Glyph used when showing a character to a person.
    pub fn display_of(&self, ch: char) -> char {
        self.displays.get(&ch).copied().unwrap_or(ch)
    }

    /// Number of characters in the table.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

fn parse_code_point(hex: &str) -> Result<char> {
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| QuillError::InvalidCodePage(format!("'{hex}' is not a code point")))
}
