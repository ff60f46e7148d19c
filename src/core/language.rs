//! Language registry
//!
//! Static mapping from user-facing language names and aliases to the
//! canonical ISO 639-3 codes the synthesis backends are keyed by, plus the
//! reverse mapping into the translation backend's ISO 639-1 scheme.
//!
//! The registry is a pure lookup table with no state. Unknown names resolve
//! to [`LanguageCode::DEFAULT`] rather than failing: the server never rejects
//! an unrecognized language name outright.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Canonical ISO 639-3 language identifier (e.g. `"eng"`, `"hin"`).
///
/// Codes are interned: every value in circulation points at a static entry
/// in the registry table, so `LanguageCode` is `Copy` and comparisons are
/// cheap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LanguageCode(&'static str);

impl LanguageCode {
    /// Default code used when a language name is not recognized.
    pub const DEFAULT: LanguageCode = LanguageCode("eng");

    /// The canonical 3-letter code as a string slice.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Whether this is the default ("native") language of the server.
    ///
    /// Math/symbol normalization only applies to the native language, and
    /// translation is skipped for it.
    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }

    /// The translation backend's ISO 639-1 code for this language, if the
    /// registry knows one. The default language never needs translating.
    pub fn translation_code(&self) -> Option<&'static str> {
        REGISTRY
            .entries
            .iter()
            .find(|e| e.code == *self)
            .map(|e| e.translation_code)
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// One registry row: display name, canonical code, translator code.
struct LanguageEntry {
    /// User-facing name, lowercase (e.g. "english").
    name: &'static str,
    code: LanguageCode,
    /// ISO 639-1 code understood by the translation backend.
    translation_code: &'static str,
}

struct Registry {
    entries: Vec<LanguageEntry>,
    /// Alias (lowercase) -> code. Includes display names, 3-letter codes,
    /// and informal aliases like "hinglish".
    aliases: HashMap<&'static str, LanguageCode>,
}

macro_rules! lang {
    ($name:literal, $code:literal, $gt:literal) => {
        LanguageEntry {
            name: $name,
            code: LanguageCode($code),
            translation_code: $gt,
        }
    };
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let entries = vec![
        lang!("english", "eng", "en"),
        lang!("french", "fra", "fr"),
        lang!("hindi", "hin", "hi"),
        lang!("sanskrit", "san", "sa"),
        lang!("telugu", "tel", "te"),
        lang!("tamil", "tam", "ta"),
        lang!("malayalam", "mal", "ml"),
        lang!("kannada", "kan", "kn"),
        lang!("punjabi", "pan", "pa"),
        lang!("gujarati", "guj", "gu"),
        lang!("assamese", "asm", "as"),
    ];

    let mut aliases: HashMap<&'static str, LanguageCode> = HashMap::new();
    for entry in &entries {
        aliases.insert(entry.name, entry.code);
        aliases.insert(entry.code.as_str(), entry.code);
    }
    // Hinglish is approximated via Hindi.
    aliases.insert("hinglish", LanguageCode("hin"));

    Registry { entries, aliases }
});

/// Resolve a user-facing language name (case-insensitive) to its canonical
/// code, falling back to [`LanguageCode::DEFAULT`] for unknown names.
pub fn resolve(name: &str) -> LanguageCode {
    REGISTRY
        .aliases
        .get(name.to_lowercase().as_str())
        .copied()
        .unwrap_or(LanguageCode::DEFAULT)
}

/// Recognized user-facing language names, capitalized for display and
/// sorted alphabetically.
pub fn display_names() -> Vec<String> {
    let mut names: Vec<String> = REGISTRY
        .entries
        .iter()
        .map(|e| {
            let mut chars = e.name.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    names.sort();
    names
}
