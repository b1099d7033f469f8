//! Short code generation.
//!
//! Codes are fixed-length strings drawn uniformly from a URL-safe alphabet.
//! The generator does not guarantee uniqueness; the link store does, and
//! [`crate::application::services::LinkService`] retries on conflict.

use rand::Rng;

/// Default alphabet: 64 URL-safe symbols.
pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Default code length. 6 symbols of a 64-symbol alphabet give 2^36 codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

pub const MIN_CODE_LENGTH: usize = 4;
pub const MAX_CODE_LENGTH: usize = 32;

/// Top-level path segments owned by fixed routes. A link with one of these
/// codes could never be reached through `GET /{code}`.
pub const RESERVED_CODES: &[&str] = &["api", "health"];

/// Returns true if `code` collides with a fixed route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Produces candidate short codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a fresh candidate code.
    fn generate(&self) -> String;
}

/// Errors in the generator configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodeGeneratorError {
    #[error("code length must be between 4 and 32, got {0}")]
    InvalidLength(usize),

    #[error("alphabet must contain at least 2 symbols")]
    AlphabetTooSmall,

    #[error("alphabet symbol {0:?} is not URL path-safe")]
    UnsafeSymbol(char),

    #[error("alphabet symbol {0:?} appears more than once")]
    DuplicateSymbol(char),
}

/// Uniform random generator backed by the thread-local CSPRNG.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
    alphabet: Vec<char>,
}

impl RandomCodeGenerator {
    /// Creates a generator, validating length and alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`CodeGeneratorError`] if the length is out of range or the
    /// alphabet is too small, repeats a symbol, or contains characters that
    /// are not unreserved in URL paths.
    pub fn new(length: usize, alphabet: &str) -> Result<Self, CodeGeneratorError> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&length) {
            return Err(CodeGeneratorError::InvalidLength(length));
        }

        let mut symbols: Vec<char> = Vec::with_capacity(alphabet.len());
        for c in alphabet.chars() {
            if !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')) {
                return Err(CodeGeneratorError::UnsafeSymbol(c));
            }
            if symbols.contains(&c) {
                return Err(CodeGeneratorError::DuplicateSymbol(c));
            }
            symbols.push(c);
        }

        if symbols.len() < 2 {
            return Err(CodeGeneratorError::AlphabetTooSmall);
        }

        Ok(Self {
            length,
            alphabet: symbols,
        })
    }

    /// Returns true if `code` has the configured length and alphabet.
    pub fn is_valid_code(&self, code: &str) -> bool {
        code.chars().count() == self.length && code.chars().all(|c| self.alphabet.contains(&c))
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
            alphabet: DEFAULT_ALPHABET.chars().collect(),
        }
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reserved_codes() {
        assert!(is_reserved("health"));
        assert!(is_reserved("api"));
        assert!(!is_reserved("Health"));
        assert!(!is_reserved("abc123"));
    }

    #[test]
    fn test_default_alphabet_has_64_symbols() {
        assert_eq!(DEFAULT_ALPHABET.len(), 64);
        assert!(RandomCodeGenerator::new(DEFAULT_CODE_LENGTH, DEFAULT_ALPHABET).is_ok());
    }

    #[test]
    fn test_generate_code_has_correct_length() {
        let generator = RandomCodeGenerator::default();
        assert_eq!(generator.generate().len(), 6);
    }

    #[test]
    fn test_generate_code_url_safe_characters() {
        let generator = RandomCodeGenerator::default();
        for _ in 0..100 {
            let code = generator.generate();
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            );
            assert!(generator.is_valid_code(&code));
        }
    }

    #[test]
    fn test_generate_code_produces_distinct_codes() {
        let generator = RandomCodeGenerator::default();
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();

        // 1000 draws from 2^36 codes: a birthday collision is ~1e-5 likely.
        assert!(codes.len() >= 999);
    }

    #[test]
    fn test_custom_alphabet_is_respected() {
        let generator = RandomCodeGenerator::new(8, "ab").unwrap();
        let code = generator.generate();

        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c == 'a' || c == 'b'));
    }

    #[test]
    fn test_is_valid_code() {
        let generator = RandomCodeGenerator::default();

        assert!(generator.is_valid_code("abc123"));
        assert!(generator.is_valid_code("A-_z09"));
        assert!(!generator.is_valid_code("abc12"));
        assert!(!generator.is_valid_code("abc1234"));
        assert!(!generator.is_valid_code("abc/12"));
    }

    #[test]
    fn test_rejects_invalid_length() {
        assert_eq!(
            RandomCodeGenerator::new(3, DEFAULT_ALPHABET).unwrap_err(),
            CodeGeneratorError::InvalidLength(3)
        );
        assert_eq!(
            RandomCodeGenerator::new(33, DEFAULT_ALPHABET).unwrap_err(),
            CodeGeneratorError::InvalidLength(33)
        );
    }

    #[test]
    fn test_rejects_unsafe_symbols() {
        assert_eq!(
            RandomCodeGenerator::new(6, "abc/").unwrap_err(),
            CodeGeneratorError::UnsafeSymbol('/')
        );
        assert_eq!(
            RandomCodeGenerator::new(6, "abc?").unwrap_err(),
            CodeGeneratorError::UnsafeSymbol('?')
        );
    }

    #[test]
    fn test_rejects_duplicate_and_tiny_alphabets() {
        assert_eq!(
            RandomCodeGenerator::new(6, "abca").unwrap_err(),
            CodeGeneratorError::DuplicateSymbol('a')
        );
        assert_eq!(
            RandomCodeGenerator::new(6, "a").unwrap_err(),
            CodeGeneratorError::AlphabetTooSmall
        );
    }
}
