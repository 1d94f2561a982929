//! Supported languages and their detection profiles.
//!
//! The registry is fixed: every detection result names one of these codes.
//! Registry order is the tie-break priority of the detector.

use serde::{Deserialize, Serialize};

use super::classifier::{classify, CodePointClass, Script};

/// Text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right
    Ltr,
    /// Right to left
    Rtl,
}

/// Supported language codes (ISO 639-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    /// English, the base Latin language
    En,
    /// Latvian
    Lv,
    /// Lithuanian
    Lt,
    /// German
    De,
    /// French
    Fr,
    /// Spanish
    Es,
    /// Polish
    Pl,
    /// Russian
    Ru,
    /// Ukrainian
    Uk,
    /// Arabic
    Ar,
    /// Chinese
    Zh,
    /// Hindi
    Hi,
}

impl LanguageCode {
    /// Base Latin language used whenever nothing better is known.
    pub const BASE_LATIN: LanguageCode = LanguageCode::En;

    /// ISO 639-1 code.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Lv => "lv",
            LanguageCode::Lt => "lt",
            LanguageCode::De => "de",
            LanguageCode::Fr => "fr",
            LanguageCode::Es => "es",
            LanguageCode::Pl => "pl",
            LanguageCode::Ru => "ru",
            LanguageCode::Uk => "uk",
            LanguageCode::Ar => "ar",
            LanguageCode::Zh => "zh",
            LanguageCode::Hi => "hi",
        }
    }

    /// Parse an ISO 639-1 code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        LANGUAGE_PROFILES
            .iter()
            .map(|p| p.code)
            .find(|c| c.as_str() == code)
    }

    /// Profile of this language.
    pub fn profile(&self) -> &'static LanguageProfile {
        // Every variant has exactly one profile entry
        LANGUAGE_PROFILES
            .iter()
            .find(|p| p.code == *self)
            .unwrap_or(&LANGUAGE_PROFILES[0])
    }

    /// Script this language is written in.
    pub fn script(&self) -> Script {
        self.profile().script
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detection profile of a language.
#[derive(Debug)]
pub struct LanguageProfile {
    /// Language code
    pub code: LanguageCode,
    /// English name
    pub name: &'static str,
    /// Script
    pub script: Script,
    /// Direction
    pub direction: Direction,
    /// Letters beyond the script's base alphabet that belong to the language
    pub letters: &'static str,
    /// Letters whose presence is diagnostic for the language
    pub diagnostic: &'static str,
}

impl LanguageProfile {
    /// Whether a character falls inside this language's declared ranges.
    ///
    /// Latin languages cover ASCII letters plus their own extra letters.
    /// Other languages cover the letters of their script block.
    pub fn covers(&self, ch: char) -> bool {
        match self.script {
            Script::Latin => ch.is_ascii_alphabetic() || self.letters.contains(ch),
            Script::Cyrillic => classify(ch) == CodePointClass::Cyrillic && ch.is_alphabetic(),
            Script::Arabic => classify(ch) == CodePointClass::Arabic && ch.is_alphabetic(),
            Script::Cjk => classify(ch) == CodePointClass::Cjk && ch.is_alphabetic(),
            Script::Devanagari => {
                classify(ch) == CodePointClass::Devanagari && ch.is_alphabetic()
            },
        }
    }

    /// Whether a character is diagnostic for this language.
    pub fn is_diagnostic(&self, ch: char) -> bool {
        self.diagnostic.contains(ch)
    }
}

/// Registry in priority order.
pub static LANGUAGE_PROFILES: [LanguageProfile; 12] = [
    LanguageProfile {
        code: LanguageCode::En,
        name: "English",
        script: Script::Latin,
        direction: Direction::Ltr,
        letters: "",
        diagnostic: "",
    },
    LanguageProfile {
        code: LanguageCode::Lv,
        name: "Latvian",
        script: Script::Latin,
        direction: Direction::Ltr,
        letters: "āčēģīķļņšūžĀČĒĢĪĶĻŅŠŪŽ",
        diagnostic: "āčēģīķļņšūžĀČĒĢĪĶĻŅŠŪŽ",
    },
    LanguageProfile {
        code: LanguageCode::Lt,
        name: "Lithuanian",
        script: Script::Latin,
        direction: Direction::Ltr,
        letters: "ąčęėįšųūžĄČĘĖĮŠŲŪŽ",
        diagnostic: "ąęėįųĄĘĖĮŲ",
    },
    LanguageProfile {
        code: LanguageCode::De,
        name: "German",
        script: Script::Latin,
        direction: Direction::Ltr,
        letters: "äöüßÄÖÜẞ",
        diagnostic: "äöüßÄÖÜẞ",
    },
    LanguageProfile {
        code: LanguageCode::Fr,
        name: "French",
        script: Script::Latin,
        direction: Direction::Ltr,
        letters: "àâæçéèêëîïôœùûüÿÀÂÆÇÉÈÊËÎÏÔŒÙÛÜŸ",
        diagnostic: "àâçèêëîôœùûÀÂÇÈÊËÎÔŒÙÛ",
    },
    LanguageProfile {
        code: LanguageCode::Es,
        name: "Spanish",
        script: Script::Latin,
        direction: Direction::Ltr,
        letters: "áéíñóúüÁÉÍÑÓÚÜ",
        diagnostic: "ñÑ¿¡",
    },
    LanguageProfile {
        code: LanguageCode::Pl,
        name: "Polish",
        script: Script::Latin,
        direction: Direction::Ltr,
        letters: "ąćęłńóśźżĄĆĘŁŃÓŚŹŻ",
        diagnostic: "ćłńśźżĆŁŃŚŹŻ",
    },
    LanguageProfile {
        code: LanguageCode::Ru,
        name: "Russian",
        script: Script::Cyrillic,
        direction: Direction::Ltr,
        letters: "",
        diagnostic: "ыэъёЫЭЪЁ",
    },
    LanguageProfile {
        code: LanguageCode::Uk,
        name: "Ukrainian",
        script: Script::Cyrillic,
        direction: Direction::Ltr,
        letters: "",
        diagnostic: "іїєґІЇЄҐ",
    },
    LanguageProfile {
        code: LanguageCode::Ar,
        name: "Arabic",
        script: Script::Arabic,
        direction: Direction::Rtl,
        letters: "",
        diagnostic: "",
    },
    LanguageProfile {
        code: LanguageCode::Zh,
        name: "Chinese",
        script: Script::Cjk,
        direction: Direction::Ltr,
        letters: "",
        diagnostic: "",
    },
    LanguageProfile {
        code: LanguageCode::Hi,
        name: "Hindi",
        script: Script::Devanagari,
        direction: Direction::Ltr,
        letters: "",
        diagnostic: "",
    },
];

/// Supported language codes in priority order.
pub fn supported_languages() -> impl Iterator<Item = LanguageCode> {
    LANGUAGE_PROFILES.iter().map(|p| p.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_has_a_profile() {
        let codes: Vec<_> = supported_languages().collect();
        assert_eq!(codes.len(), LANGUAGE_PROFILES.len());
        for code in codes {
            assert_eq!(code.profile().code, code);
        }
    }

    #[test]
    fn test_base_latin_is_first() {
        assert_eq!(supported_languages().next(), Some(LanguageCode::BASE_LATIN));
        assert_eq!(LanguageCode::BASE_LATIN.script(), Script::Latin);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(LanguageCode::from_code("LV"), Some(LanguageCode::Lv));
        assert_eq!(LanguageCode::from_code(" ru "), Some(LanguageCode::Ru));
        assert_eq!(LanguageCode::from_code("xx"), None);
    }

    #[test]
    fn test_covers() {
        let lv = LanguageCode::Lv.profile();
        assert!(lv.covers('a'));
        assert!(lv.covers('Š'));
        assert!(!lv.covers('ł'));
        assert!(!lv.covers(' '));

        let ru = LanguageCode::Ru.profile();
        assert!(ru.covers('ж'));
        assert!(!ru.covers('a'));
    }

    #[test]
    fn test_directions() {
        assert_eq!(LanguageCode::Ar.profile().direction, Direction::Rtl);
        assert_eq!(LanguageCode::Ru.profile().direction, Direction::Ltr);
    }
}
