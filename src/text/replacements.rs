//! ASCII replacements for characters a single-byte surface cannot show.
//!
//! Two compile-time tables back the [`ReplacementTable`] registry:
//!
//! - symbols and diacritics: Latin Extended letters → base letter, smart
//!   punctuation → ASCII punctuation, currency signs → ISO 4217 codes, and a
//!   few typographic symbols (`№` → `No.`, `°` → `deg`)
//! - Cyrillic transliteration (simplified GOST 7.79 system B)
//!
//! Every replacement is ASCII without whitespace, so replacing twice is the
//! same as replacing once.
//!
//! Latin-1 letters such as `é` or `ü` have no entry: WinAnsi renders them.

use std::collections::HashMap;

use phf::phf_map;

use crate::error::{Error, Result};

/// Diacritics, punctuation, currency and symbol replacements.
static SYMBOL_REPLACEMENTS: phf::Map<char, &'static str> = phf_map! {
    // Latin Extended-A
    'Ā' => "A", 'ā' => "a", 'Ă' => "A", 'ă' => "a", 'Ą' => "A", 'ą' => "a",
    'Ć' => "C", 'ć' => "c", 'Ĉ' => "C", 'ĉ' => "c", 'Ċ' => "C", 'ċ' => "c",
    'Č' => "C", 'č' => "c", 'Ď' => "D", 'ď' => "d", 'Đ' => "D", 'đ' => "d",
    'Ē' => "E", 'ē' => "e", 'Ĕ' => "E", 'ĕ' => "e", 'Ė' => "E", 'ė' => "e",
    'Ę' => "E", 'ę' => "e", 'Ě' => "E", 'ě' => "e", 'Ĝ' => "G", 'ĝ' => "g",
    'Ğ' => "G", 'ğ' => "g", 'Ġ' => "G", 'ġ' => "g", 'Ģ' => "G", 'ģ' => "g",
    'Ĥ' => "H", 'ĥ' => "h", 'Ħ' => "H", 'ħ' => "h", 'Ĩ' => "I", 'ĩ' => "i",
    'Ī' => "I", 'ī' => "i", 'Ĭ' => "I", 'ĭ' => "i", 'Į' => "I", 'į' => "i",
    'İ' => "I", 'ı' => "i", 'Ĳ' => "IJ", 'ĳ' => "ij", 'Ĵ' => "J", 'ĵ' => "j",
    'Ķ' => "K", 'ķ' => "k", 'ĸ' => "k", 'Ĺ' => "L", 'ĺ' => "l", 'Ļ' => "L",
    'ļ' => "l", 'Ľ' => "L", 'ľ' => "l", 'Ŀ' => "L", 'ŀ' => "l", 'Ł' => "L",
    'ł' => "l", 'Ń' => "N", 'ń' => "n", 'Ņ' => "N", 'ņ' => "n", 'Ň' => "N",
    'ň' => "n", 'ŉ' => "n", 'Ŋ' => "N", 'ŋ' => "n", 'Ō' => "O", 'ō' => "o",
    'Ŏ' => "O", 'ŏ' => "o", 'Ő' => "O", 'ő' => "o", 'Œ' => "OE", 'œ' => "oe",
    'Ŕ' => "R", 'ŕ' => "r", 'Ŗ' => "R", 'ŗ' => "r", 'Ř' => "R", 'ř' => "r",
    'Ś' => "S", 'ś' => "s", 'Ŝ' => "S", 'ŝ' => "s", 'Ş' => "S", 'ş' => "s",
    'Š' => "S", 'š' => "s", 'Ţ' => "T", 'ţ' => "t", 'Ť' => "T", 'ť' => "t",
    'Ŧ' => "T", 'ŧ' => "t", 'Ũ' => "U", 'ũ' => "u", 'Ū' => "U", 'ū' => "u",
    'Ŭ' => "U", 'ŭ' => "u", 'Ů' => "U", 'ů' => "u", 'Ű' => "U", 'ű' => "u",
    'Ų' => "U", 'ų' => "u", 'Ŵ' => "W", 'ŵ' => "w", 'Ŷ' => "Y", 'ŷ' => "y",
    'Ÿ' => "Y", 'Ź' => "Z", 'ź' => "z", 'Ż' => "Z", 'ż' => "z", 'Ž' => "Z",
    'ž' => "z", 'ſ' => "s",

    // Latin Extended-B (common)
    'ƒ' => "f", 'Ș' => "S", 'ș' => "s", 'Ț' => "T", 'ț' => "t",
    'Ǎ' => "A", 'ǎ' => "a", 'Ǐ' => "I", 'ǐ' => "i", 'Ǒ' => "O", 'ǒ' => "o",
    'Ǔ' => "U", 'ǔ' => "u",

    // Quotes
    '\u{2018}' => "'",  // Left single quotation mark
    '\u{2019}' => "'",  // Right single quotation mark
    '\u{201A}' => "'",  // Single low-9 quotation mark
    '\u{201B}' => "'",  // Single high-reversed-9 quotation mark
    '\u{2032}' => "'",  // Prime
    '\u{201C}' => "\"", // Left double quotation mark
    '\u{201D}' => "\"", // Right double quotation mark
    '\u{201E}' => "\"", // Double low-9 quotation mark
    '\u{201F}' => "\"", // Double high-reversed-9 quotation mark
    '\u{2033}' => "\"", // Double prime
    '\u{2039}' => "<",  // Single left-pointing angle quotation mark
    '\u{203A}' => ">",  // Single right-pointing angle quotation mark

    // Dashes and bullets
    '\u{2010}' => "-",   // Hyphen
    '\u{2011}' => "-",   // Non-breaking hyphen
    '\u{2012}' => "-",   // Figure dash
    '\u{2013}' => "-",   // En dash
    '\u{2014}' => "-",   // Em dash
    '\u{2015}' => "-",   // Horizontal bar
    '\u{2212}' => "-",   // Minus sign
    '\u{2043}' => "-",   // Hyphen bullet
    '\u{2022}' => "*",   // Bullet
    '\u{2023}' => "*",   // Triangular bullet
    '\u{2026}' => "...", // Horizontal ellipsis

    // Currency
    '\u{20AC}' => "EUR", // Euro
    '\u{20BD}' => "RUB", // Ruble
    '\u{20B4}' => "UAH", // Hryvnia
    '\u{20B9}' => "INR", // Indian rupee
    '\u{20A9}' => "KRW", // Won
    '\u{20AA}' => "ILS", // New shekel
    '\u{20BA}' => "TRY", // Turkish lira
    '\u{20B8}' => "KZT", // Tenge
    '\u{20A6}' => "NGN", // Naira
    '\u{20B1}' => "PHP", // Peso
    '\u{20AB}' => "VND", // Dong
    '\u{20BC}' => "AZN", // Manat
    '\u{20BE}' => "GEL", // Lari
    '\u{20BF}' => "BTC", // Bitcoin

    // Symbols
    '\u{2116}' => "No.",  // Numero sign
    '\u{00B0}' => "deg",  // Degree sign
    '\u{2122}' => "(TM)", // Trade mark sign
    '\u{2264}' => "<=",
    '\u{2265}' => ">=",
    '\u{2260}' => "!=",
    '\u{2248}' => "~",
    '\u{2190}' => "<-",
    '\u{2192}' => "->",
    '\u{2194}' => "<->",
    '\u{21D2}' => "=>",
    '\u{2044}' => "/", // Fraction slash
    '\u{2215}' => "/", // Division slash
};

/// Cyrillic to Latin transliteration.
static CYRILLIC_TRANSLITERATION: phf::Map<char, &'static str> = phf_map! {
    'А' => "A", 'а' => "a", 'Б' => "B", 'б' => "b", 'В' => "V", 'в' => "v",
    'Г' => "G", 'г' => "g", 'Д' => "D", 'д' => "d", 'Е' => "E", 'е' => "e",
    'Ё' => "Yo", 'ё' => "yo", 'Ж' => "Zh", 'ж' => "zh", 'З' => "Z", 'з' => "z",
    'И' => "I", 'и' => "i", 'Й' => "Y", 'й' => "y", 'К' => "K", 'к' => "k",
    'Л' => "L", 'л' => "l", 'М' => "M", 'м' => "m", 'Н' => "N", 'н' => "n",
    'О' => "O", 'о' => "o", 'П' => "P", 'п' => "p", 'Р' => "R", 'р' => "r",
    'С' => "S", 'с' => "s", 'Т' => "T", 'т' => "t", 'У' => "U", 'у' => "u",
    'Ф' => "F", 'ф' => "f", 'Х' => "Kh", 'х' => "kh", 'Ц' => "Ts", 'ц' => "ts",
    'Ч' => "Ch", 'ч' => "ch", 'Ш' => "Sh", 'ш' => "sh", 'Щ' => "Shch", 'щ' => "shch",
    'Ъ' => "", 'ъ' => "", 'Ы' => "Y", 'ы' => "y", 'Ь' => "", 'ь' => "",
    'Э' => "E", 'э' => "e", 'Ю' => "Yu", 'ю' => "yu", 'Я' => "Ya", 'я' => "ya",

    // Ukrainian and Belarusian
    'І' => "I", 'і' => "i", 'Ї' => "Yi", 'ї' => "yi", 'Є' => "Ye", 'є' => "ye",
    'Ґ' => "G", 'ґ' => "g", 'Ў' => "U", 'ў' => "u",
};

/// Registry of ASCII replacements.
///
/// Wraps the built-in tables and lets callers override or extend individual
/// entries. Overrides win over built-in entries.
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    overrides: HashMap<char, String>,
}

impl ReplacementTable {
    /// Create a table backed by the built-in entries only.
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Add or replace an entry.
    ///
    /// The key must be non-ASCII and the replacement must be ASCII without
    /// whitespace; otherwise sanitization would stop being idempotent.
    pub fn with_override(mut self, ch: char, replacement: impl Into<String>) -> Result<Self> {
        let replacement = replacement.into();
        if ch.is_ascii() {
            return Err(Error::InvalidConfig(format!(
                "replacement key {:?} is ASCII and never needs replacing",
                ch
            )));
        }
        if !is_clean_replacement(&replacement) {
            return Err(Error::InvalidConfig(format!(
                "replacement for {:?} must be ASCII without whitespace: {:?}",
                ch, replacement
            )));
        }
        self.overrides.insert(ch, replacement);
        Ok(self)
    }

    /// Look up the replacement for a character.
    pub fn lookup(&self, ch: char) -> Option<&str> {
        if let Some(replacement) = self.overrides.get(&ch) {
            return Some(replacement.as_str());
        }
        SYMBOL_REPLACEMENTS
            .get(&ch)
            .or_else(|| CYRILLIC_TRANSLITERATION.get(&ch))
            .copied()
    }

    /// Whether the table has an entry for a character.
    pub fn contains(&self, ch: char) -> bool {
        self.lookup(ch).is_some()
    }

    /// Number of entries, built-in and overrides combined.
    pub fn len(&self) -> usize {
        let builtin_overridden = self
            .overrides
            .keys()
            .filter(|ch| SYMBOL_REPLACEMENTS.contains_key(*ch) || CYRILLIC_TRANSLITERATION.contains_key(*ch))
            .count();
        SYMBOL_REPLACEMENTS.len() + CYRILLIC_TRANSLITERATION.len() + self.overrides.len()
            - builtin_overridden
    }

    /// Whether the table is empty (never true for the built-in table).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_clean_replacement(replacement: &str) -> bool {
    replacement.chars().all(|c| c.is_ascii() && !c.is_ascii_whitespace() && !c.is_ascii_control())
}
