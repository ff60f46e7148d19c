//! Spoken-math text normalization
//!
//! Rewrites math notation and symbols into words before synthesis, so the
//! backend is never asked to pronounce `^` or `∫`. Applied only to text in
//! the server's native language; other languages pass through untouched.
//!
//! Normalization is idempotent: text that no longer contains any of the
//! source symbols is returned unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

/// Default symbol replacement table, in application order.
///
/// The table is configuration: deployments can extend or override it via
/// `normalization` in the YAML config (see [`crate::config::ServerConfig`]).
pub fn default_symbol_table() -> Vec<(String, String)> {
    [
        ("+", " plus "),
        ("=", " equals "),
        ("*", " times "),
        ("/", " divided by "),
        ("∫", "integral "),
        ("π", "pie"),
    ]
    .iter()
    .map(|(sym, spoken)| (sym.to_string(), spoken.to_string()))
    .collect()
}

static SQUARED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)\^2").expect("squared regex is valid"));
static CUBED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)\^3").expect("cubed regex is valid"));

/// Symbol-to-speech normalizer with a configurable replacement table.
#[derive(Debug, Clone)]
pub struct Normalizer {
    symbols: Vec<(String, String)>,
}

impl Normalizer {
    pub fn new(symbols: Vec<(String, String)>) -> Self {
        Self { symbols }
    }

    /// Rewrite math notation into spoken words.
    ///
    /// Exponents first (so `x^2` becomes "x squared" before `^` could be
    /// mangled by symbol replacement), then the symbol table in order.
    pub fn normalize(&self, text: &str) -> String {
        let text = SQUARED_RE.replace_all(text, "$1 squared");
        let text = CUBED_RE.replace_all(&text, "$1 cubed");

        let mut out = text.into_owned();
        for (symbol, spoken) in &self.symbols {
            out = out.replace(symbol.as_str(), spoken);
        }
        out
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(default_symbol_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_exponents() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("x^2"), "x squared");
        assert_eq!(n.normalize("y^3"), "y cubed");
    }

    #[test]
    fn normalizes_operators() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("2+2=4"), "2 plus 2 equals 4");
        assert_eq!(n.normalize("a*b"), "a times b");
        assert_eq!(n.normalize("a/b"), "a divided by b");
    }

    #[test]
    fn normalizes_symbols() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("π"), "pie");
        assert_eq!(n.normalize("∫f"), "integral f");
    }

    #[test]
    fn is_idempotent_on_normalized_text() {
        let n = Normalizer::default();
        let once = n.normalize("x^2 + y^3 = z * π");
        let twice = n.normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn plain_text_passes_through() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("hello world"), "hello world");
    }

    #[test]
    fn custom_table_overrides_defaults() {
        let n = Normalizer::new(vec![("%".to_string(), " percent".to_string())]);
        assert_eq!(n.normalize("50%"), "50 percent");
        // Default entries are not present on a custom table.
        assert_eq!(n.normalize("1+1"), "1+1");
    }
}
