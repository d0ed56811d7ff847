//! First-name based gender inference.
//!
//! A heuristic: the first capitalized word of a name is looked up in a
//! statistical first-name dictionary (gender-guesser's `nam_dict.txt`).
//! Nothing is validated against ground truth.
//!
//! The crate bundles only a short fallback list in the same layout; the full
//! dictionary is loaded from disk with [`GenderDetector::from_file`].

mod dictionary;

pub use dictionary::{DictionaryError, NameDictionary};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::record::NOT_AVAILABLE;

/// Common first names only, for when the full dictionary is unavailable.
const FALLBACK_DICTIONARY: &str = include_str!("../../data/nam_dict_fallback.txt");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderLabel {
    Male,
    Female,
    MostlyMale,
    MostlyFemale,
    /// Used for both genders in comparable measure.
    Andy,
    Unknown,
}

impl GenderLabel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::MostlyMale => "mostly_male",
            Self::MostlyFemale => "mostly_female",
            Self::Andy => "andy",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for GenderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static FIRST_NAME_PATTERN: OnceLock<Regex> = OnceLock::new();
static BUNDLED_DETECTOR: OnceLock<GenderDetector> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn first_name_pattern() -> &'static Regex {
    FIRST_NAME_PATTERN.get_or_init(|| {
        Regex::new(r"\b[A-Z][a-z]+\b").expect("Static regex pattern is guaranteed to be valid")
    })
}

/// First word shaped like a first name: an uppercase letter followed by
/// lowercase letters.
#[must_use]
pub fn first_name(full_name: &str) -> Option<&str> {
    first_name_pattern().find(full_name).map(|m| m.as_str())
}

#[derive(Debug, Clone)]
pub struct GenderDetector {
    dictionary: NameDictionary,
}

impl GenderDetector {
    #[must_use]
    pub const fn new(dictionary: NameDictionary) -> Self {
        Self { dictionary }
    }

    /// Detector over the bundled fallback list.
    pub fn bundled() -> Result<Self, DictionaryError> {
        NameDictionary::parse(FALLBACK_DICTIONARY).map(Self::new)
    }

    /// Detector over a full dictionary file in the `nam_dict.txt` layout.
    pub fn from_file(path: &Path) -> Result<Self, DictionaryError> {
        let dictionary = NameDictionary::load(path)?;
        info!(
            "Loaded name dictionary from {} ({} names)",
            path.display(),
            dictionary.len()
        );
        Ok(Self::new(dictionary))
    }

    /// The given dictionary file, or the bundled fallback list when there is
    /// none. Falling back is logged since most names then come out `unknown`.
    pub fn from_optional_file(path: Option<&Path>) -> Result<Self, DictionaryError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                warn!(
                    "Full name dictionary unavailable, using the bundled fallback list; \
                     names outside it are labelled unknown"
                );
                Self::bundled()
            }
        }
    }

    #[must_use]
    pub const fn dictionary(&self) -> &NameDictionary {
        &self.dictionary
    }

    /// Infer a label for a full name such as `"John Smith"`.
    #[must_use]
    pub fn infer_gender(&self, full_name: &str) -> GenderLabel {
        let trimmed = full_name.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_AVAILABLE) {
            return GenderLabel::Unknown;
        }

        first_name(full_name).map_or(GenderLabel::Unknown, |name| self.dictionary.lookup(name))
    }
}

/// Infer a label using the bundled fallback list.
#[must_use]
pub fn infer_gender(full_name: &str) -> GenderLabel {
    bundled_detector().infer_gender(full_name)
}

#[expect(
    clippy::expect_used,
    reason = "Bundled fallback list is part of the crate and parsed by tests"
)]
fn bundled_detector() -> &'static GenderDetector {
    BUNDLED_DETECTOR.get_or_init(|| {
        GenderDetector::bundled().expect("Bundled fallback list is guaranteed to parse")
    })
}
