//! Code point classification by Unicode range.
//!
//! Every function here is pure and total: each Unicode scalar value maps to
//! exactly one [`CodePointClass`], and representability is a range check.
//! Ranges are closed intervals.

use serde::{Deserialize, Serialize};

/// Writing system identified by code point ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Latin (ASCII letters and Latin-Extended letters)
    Latin,
    /// Cyrillic (Russian, Ukrainian, ...)
    Cyrillic,
    /// Arabic
    Arabic,
    /// Chinese, Japanese kana and Korean Hangul
    Cjk,
    /// Devanagari (Hindi, Marathi, ...)
    Devanagari,
}

impl Script {
    /// All scripts, in classification order.
    pub const ALL: [Script; 5] = [
        Script::Latin,
        Script::Cyrillic,
        Script::Arabic,
        Script::Cjk,
        Script::Devanagari,
    ];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Script::Latin => "Latin",
            Script::Cyrillic => "Cyrillic",
            Script::Arabic => "Arabic",
            Script::Cjk => "CJK",
            Script::Devanagari => "Devanagari",
        }
    }

    /// Whether this is the Latin script.
    pub fn is_latin(&self) -> bool {
        matches!(self, Script::Latin)
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse class of a single code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodePointClass {
    /// U+0000..U+007F
    Ascii,
    /// Latin-1 Supplement, Latin Extended-A/B and Latin Extended Additional
    LatinExtended,
    /// Cyrillic and Cyrillic Supplement
    Cyrillic,
    /// Arabic blocks and presentation forms
    Arabic,
    /// Han ideographs, kana, Hangul
    Cjk,
    /// Devanagari
    Devanagari,
    /// Pictographs, emoticons, dingbats
    Emoji,
    /// Everything else
    OtherSymbol,
}

/// Target encoding of a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetEncoding {
    /// WinAnsi-class single-byte encoding
    SingleByte,
    /// Full Unicode (embedded CID font)
    Unicode,
}

const LATIN_EXTENDED_RANGES: &[(u32, u32)] = &[(0x00A0, 0x024F), (0x1E00, 0x1EFF)];

const CYRILLIC_RANGES: &[(u32, u32)] = &[(0x0400, 0x052F)];

const ARABIC_RANGES: &[(u32, u32)] = &[
    (0x0600, 0x06FF), // Arabic
    (0x0750, 0x077F), // Arabic Supplement
    (0x08A0, 0x08FF), // Arabic Extended-A
    (0xFB50, 0xFDFF), // Presentation Forms-A
    (0xFE70, 0xFEFF), // Presentation Forms-B
];

const DEVANAGARI_RANGES: &[(u32, u32)] = &[(0x0900, 0x097F)];

const CJK_RANGES: &[(u32, u32)] = &[
    (0x3040, 0x309F), // Hiragana
    (0x30A0, 0x30FF), // Katakana
    (0x3400, 0x4DBF), // CJK Extension A
    (0x4E00, 0x9FFF), // CJK Unified Ideographs
    (0xAC00, 0xD7AF), // Hangul Syllables
    (0xF900, 0xFAFF), // CJK Compatibility Ideographs
];

const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x2600, 0x27BF),   // Miscellaneous Symbols, Dingbats
    (0x231A, 0x231B),   // Watch, hourglass
    (0x23E9, 0x23FA),   // Media controls, alarm clock
    (0x2B50, 0x2B55),   // Star, circles
    (0x1F000, 0x1F2FF), // Tiles, cards, enclosed alphanumerics, regional indicators
    (0x1F300, 0x1FAFF), // Pictographs, emoticons, transport, supplemental
];

// U+FEFF doubles as the byte order mark and is also the tail of
// Arabic Presentation Forms-B; it is checked before classification.
const INVISIBLE_RANGES: &[(u32, u32)] = &[
    (0x00AD, 0x00AD), // Soft hyphen
    (0x180E, 0x180E), // Mongolian vowel separator
    (0x200B, 0x200F), // Zero-width space/joiners, LRM/RLM
    (0x202A, 0x202E), // Bidi embeddings
    (0x2060, 0x2064), // Word joiner, invisible operators
    (0x2066, 0x2069), // Bidi isolates
    (0xFEFF, 0xFEFF), // Zero-width no-break space
];

#[inline]
fn in_ranges(codepoint: u32, ranges: &[(u32, u32)]) -> bool {
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&codepoint))
}

/// Classify a code point.
pub fn classify(ch: char) -> CodePointClass {
    let cp = ch as u32;
    if cp <= 0x7F {
        CodePointClass::Ascii
    } else if in_ranges(cp, LATIN_EXTENDED_RANGES) {
        CodePointClass::LatinExtended
    } else if in_ranges(cp, CYRILLIC_RANGES) {
        CodePointClass::Cyrillic
    } else if in_ranges(cp, ARABIC_RANGES) && cp != 0xFEFF {
        CodePointClass::Arabic
    } else if in_ranges(cp, DEVANAGARI_RANGES) {
        CodePointClass::Devanagari
    } else if in_ranges(cp, CJK_RANGES) {
        CodePointClass::Cjk
    } else if in_ranges(cp, EMOJI_RANGES) {
        CodePointClass::Emoji
    } else {
        CodePointClass::OtherSymbol
    }
}

/// Script a class belongs to, if any.
pub fn class_script(class: CodePointClass) -> Option<Script> {
    match class {
        CodePointClass::Ascii | CodePointClass::LatinExtended => Some(Script::Latin),
        CodePointClass::Cyrillic => Some(Script::Cyrillic),
        CodePointClass::Arabic => Some(Script::Arabic),
        CodePointClass::Cjk => Some(Script::Cjk),
        CodePointClass::Devanagari => Some(Script::Devanagari),
        CodePointClass::Emoji | CodePointClass::OtherSymbol => None,
    }
}

/// Script of a letter. Digits, punctuation and symbols have none.
pub fn script_of(ch: char) -> Option<Script> {
    if !ch.is_alphabetic() {
        return None;
    }
    class_script(classify(ch))
}

/// Whether a code point lies inside the ranges of `script`, letter or not.
pub fn in_script(ch: char, script: Script) -> bool {
    class_script(classify(ch)) == Some(script)
}

/// Whether a code point can be represented in the target encoding.
///
/// The single-byte target accepts 0-127 and 160-255. The C1 range 128-159
/// (which also holds the undefined Windows-1252 slots 129, 141, 143, 144
/// and 157) is never representable.
pub fn is_representable(ch: char, encoding: TargetEncoding) -> bool {
    match encoding {
        TargetEncoding::SingleByte => matches!(ch as u32, 0..=127 | 160..=255),
        TargetEncoding::Unicode => true,
    }
}

/// Whether a code point is an emoji or pictograph.
pub fn is_emoji(ch: char) -> bool {
    classify(ch) == CodePointClass::Emoji
}

/// Code points that only make sense attached to an emoji.
///
/// Zero-width joiner, variation selectors, combining keycap and tag
/// characters (used by subdivision flags).
pub fn is_emoji_component(ch: char) -> bool {
    matches!(ch as u32, 0x200D | 0xFE0E | 0xFE0F | 0x20E3 | 0xE0020..=0xE007F)
}

/// Zero-width and other invisible formatting code points.
pub fn is_invisible(ch: char) -> bool {
    in_ranges(ch as u32, INVISIBLE_RANGES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_basic_ranges() {
        assert_eq!(classify('a'), CodePointClass::Ascii);
        assert_eq!(classify('\n'), CodePointClass::Ascii);
        assert_eq!(classify('é'), CodePointClass::LatinExtended);
        assert_eq!(classify('Š'), CodePointClass::LatinExtended);
        assert_eq!(classify('ā'), CodePointClass::LatinExtended);
        assert_eq!(classify('П'), CodePointClass::Cyrillic);
        assert_eq!(classify('\u{052F}'), CodePointClass::Cyrillic);
        assert_eq!(classify('م'), CodePointClass::Arabic);
        assert_eq!(classify('中'), CodePointClass::Cjk);
        assert_eq!(classify('あ'), CodePointClass::Cjk);
        assert_eq!(classify('한'), CodePointClass::Cjk);
        assert_eq!(classify('न'), CodePointClass::Devanagari);
        assert_eq!(classify('😀'), CodePointClass::Emoji);
        assert_eq!(classify('☀'), CodePointClass::Emoji);
        assert_eq!(classify('✓'), CodePointClass::Emoji);
        assert_eq!(classify('€'), CodePointClass::OtherSymbol);
        assert_eq!(classify('—'), CodePointClass::OtherSymbol);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify('\u{03FF}'), CodePointClass::OtherSymbol); // Greek
        assert_eq!(classify('\u{0400}'), CodePointClass::Cyrillic);
        assert_eq!(classify('\u{0530}'), CodePointClass::OtherSymbol); // Armenian
        assert_eq!(classify('\u{1F2FF}'), CodePointClass::Emoji);
        assert_eq!(classify('\u{1FAFF}'), CodePointClass::Emoji);
        assert_eq!(classify('\u{1FB00}'), CodePointClass::OtherSymbol);
        assert_eq!(classify('\u{FEFF}'), CodePointClass::OtherSymbol);
        assert_eq!(classify('\u{0085}'), CodePointClass::OtherSymbol); // C1 control
    }

    #[test]
    fn test_script_of_letters_only() {
        assert_eq!(script_of('a'), Some(Script::Latin));
        assert_eq!(script_of('ž'), Some(Script::Latin));
        assert_eq!(script_of('ж'), Some(Script::Cyrillic));
        assert_eq!(script_of('中'), Some(Script::Cjk));
        assert_eq!(script_of('1'), None);
        assert_eq!(script_of(' '), None);
        assert_eq!(script_of('°'), None);
        assert_eq!(script_of('😀'), None);
    }

    #[test]
    fn test_in_script() {
        assert!(in_script(',', Script::Latin));
        assert!(in_script('ё', Script::Cyrillic));
        assert!(!in_script('e', Script::Cyrillic));
    }

    #[test]
    fn test_single_byte_representable() {
        assert!(is_representable('A', TargetEncoding::SingleByte));
        assert!(is_representable('\u{0000}', TargetEncoding::SingleByte));
        assert!(is_representable('\u{007F}', TargetEncoding::SingleByte));
        assert!(is_representable('\u{00A0}', TargetEncoding::SingleByte));
        assert!(is_representable('ÿ', TargetEncoding::SingleByte));
        for cp in [129u32, 141, 143, 144, 157, 128, 159] {
            let ch = char::from_u32(cp).unwrap();
            assert!(!is_representable(ch, TargetEncoding::SingleByte), "U+{:04X}", cp);
        }
        assert!(!is_representable('Ā', TargetEncoding::SingleByte));
        assert!(!is_representable('€', TargetEncoding::SingleByte));
        assert!(is_representable('€', TargetEncoding::Unicode));
    }

    #[test]
    fn test_emoji_components_and_invisibles() {
        assert!(is_emoji_component('\u{200D}'));
        assert!(is_emoji_component('\u{FE0F}'));
        assert!(!is_emoji_component('a'));
        assert!(is_invisible('\u{200B}'));
        assert!(is_invisible('\u{FEFF}'));
        assert!(is_invisible('\u{00AD}'));
        assert!(!is_invisible(' '));
    }
}
