//! WinAnsi encoding for single-byte text.
//!
//! Sanitized text is written with a simple font and WinAnsiEncoding
//! (Windows-1252). Code points 0x00-0x7F and 0xA0-0xFF map to themselves;
//! the 0x80-0x9F slots hold the Windows-1252 extras (€, smart quotes,
//! dashes).
//!
//! ```text
//! (Caf\351 \200 5) Tj
//! ```

use std::collections::BTreeSet;

/// WinAnsi (Windows-1252) encoding table.
///
/// Maps Unicode codepoints to WinAnsi byte values for the range 0x80-0x9F
/// which differs from Latin-1.
pub fn unicode_to_winansi(codepoint: u32) -> Option<u8> {
    // Direct mapping for 0x00-0x7F and 0xA0-0xFF
    if codepoint < 0x80 || (0xA0..=0xFF).contains(&codepoint) {
        return Some(codepoint as u8);
    }

    match codepoint {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82), // Single low-9 quotation mark
        0x0192 => Some(0x83), // Latin small letter f with hook
        0x201E => Some(0x84), // Double low-9 quotation mark
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86), // Dagger
        0x2021 => Some(0x87), // Double dagger
        0x02C6 => Some(0x88), // Modifier letter circumflex accent
        0x2030 => Some(0x89), // Per mille sign
        0x0160 => Some(0x8A), // Latin capital letter S with caron
        0x2039 => Some(0x8B), // Single left-pointing angle quotation mark
        0x0152 => Some(0x8C), // Latin capital ligature OE
        0x017D => Some(0x8E), // Latin capital letter Z with caron
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98), // Small tilde
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A), // Latin small letter s with caron
        0x203A => Some(0x9B), // Single right-pointing angle quotation mark
        0x0153 => Some(0x9C), // Latin small ligature oe
        0x017E => Some(0x9E), // Latin small letter z with caron
        0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
        _ => None,
    }
}

/// Check if a character can be encoded in WinAnsi.
pub fn is_winansi_char(ch: char) -> bool {
    unicode_to_winansi(ch as u32).is_some()
}

/// Text encoded to WinAnsi bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WinAnsiText {
    /// Encoded bytes; unencodable characters become `?`
    pub bytes: Vec<u8>,
    /// Characters that had no WinAnsi byte
    pub unencodable: BTreeSet<char>,
}

impl WinAnsiText {
    /// Whether every character was encoded.
    pub fn is_lossless(&self) -> bool {
        self.unencodable.is_empty()
    }
}

/// Encode text to WinAnsi bytes.
pub fn encode_winansi(text: &str) -> WinAnsiText {
    let mut encoded = WinAnsiText {
        bytes: Vec::with_capacity(text.len()),
        unencodable: BTreeSet::new(),
    };
    for ch in text.chars() {
        match unicode_to_winansi(ch as u32) {
            Some(byte) => encoded.bytes.push(byte),
            None => {
                encoded.unencodable.insert(ch);
                encoded.bytes.push(b'?');
            },
        }
    }
    if !encoded.unencodable.is_empty() {
        log::warn!(
            "{} character(s) have no WinAnsi byte and were written as '?'",
            encoded.unencodable.len()
        );
    }
    encoded
}

/// Encode text as a PDF literal string in WinAnsi.
///
/// Run text through the sanitizer first; anything left without a WinAnsi
/// byte is written as `?`.
pub fn encode_winansi_literal(text: &str) -> String {
    let bytes = encode_winansi(text).bytes;
    let mut literal = String::with_capacity(bytes.len() * 2 + 2);
    literal.push('(');
    for b in bytes {
        escape_literal_byte(b, &mut literal);
    }
    literal.push(')');
    literal
}

fn escape_literal_byte(b: u8, out: &mut String) {
    match b {
        b'(' => out.push_str("\\("),
        b')' => out.push_str("\\)"),
        b'\\' => out.push_str("\\\\"),
        b'\n' => out.push_str("\\n"),
        b'\r' => out.push_str("\\r"),
        b'\t' => out.push_str("\\t"),
        0x08 => out.push_str("\\b"),
        0x0C => out.push_str("\\f"),
        0x20..=0x7E => out.push(b as char),
        _ => out.push_str(&format!("\\{:03o}", b)),
    }
}
