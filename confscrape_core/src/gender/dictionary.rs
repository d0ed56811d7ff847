//! Parser for the fixed-column `nam_dict.txt` first-name dictionary.
//!
//! Each data line starts with a gender code, then the name, then from column
//! 30 onward one cell per country. A blank cell means the name is not used in
//! that country; otherwise the cell is a frequency class `1`-`9` or `A`-`D`.
//! The published file closes each data line with a `$` marker.

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::GenderLabel;

/// Column at which the per-country frequency cells begin.
const COUNTRY_COLUMN: usize = 30;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read name dictionary {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: missing name")]
    MissingName { line: usize },

    #[error("name dictionary contains no entries")]
    Empty,
}

/// How widely a name is used for one gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Popularity {
    /// Number of countries where the name occurs.
    countries: usize,
    /// Sum of the frequency classes over those countries.
    weight: i64,
}

impl Popularity {
    fn from_cells(cells: &str) -> Self {
        cells
            .chars()
            .filter(|c| !matches!(c, ' ' | '$'))
            .fold(Self::default(), |acc, c| Self {
                countries: acc.countries + 1,
                weight: acc.weight + cell_value(c),
            })
    }

    fn beats(self, other: Self) -> bool {
        self.countries > other.countries
            || (self.countries == other.countries && self.weight > other.weight)
    }
}

/// `1`-`9` map to 1-9 and `A`-`D` to 10-13.
fn cell_value(c: char) -> i64 {
    let code = i64::from(u32::from(c));
    if code > 64 { code - 55 } else { code - 48 }
}

fn label_for_code(code: &str) -> Option<GenderLabel> {
    match code {
        "M" => Some(GenderLabel::Male),
        "1M" | "?M" => Some(GenderLabel::MostlyMale),
        "F" => Some(GenderLabel::Female),
        "1F" | "?F" => Some(GenderLabel::MostlyFemale),
        "?" => Some(GenderLabel::Andy),
        _ => None,
    }
}

/// Lowercased name to the labels recorded for it, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct NameDictionary {
    names: HashMap<String, Vec<(GenderLabel, Popularity)>>,
}

impl NameDictionary {
    /// Parse dictionary text. Lines starting with `#` or `=` are comments;
    /// lines with a gender code outside the known set are skipped.
    pub fn parse(text: &str) -> Result<Self, DictionaryError> {
        let mut dictionary = Self::default();
        let mut skipped = 0usize;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') || line.starts_with('=') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let code = parts.next().unwrap_or_default();
            let Some(label) = label_for_code(code) else {
                skipped += 1;
                continue;
            };
            let name = parts
                .next()
                .ok_or(DictionaryError::MissingName { line: index + 1 })?;

            let cells: String = line.chars().skip(COUNTRY_COLUMN).collect();
            dictionary.insert(name, label, Popularity::from_cells(&cells));
        }

        if skipped > 0 {
            debug!("Skipped {skipped} dictionary lines with unrecognized gender codes");
        }
        if dictionary.names.is_empty() {
            return Err(DictionaryError::Empty);
        }

        Ok(dictionary)
    }

    /// Load a dictionary file. The published file is ISO-8859-1 encoded, so
    /// every byte is taken as one character.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let bytes = std::fs::read(path).map_err(|source| DictionaryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_latin1(&bytes)
    }

    /// Parse dictionary bytes, one character per byte.
    pub fn from_latin1(bytes: &[u8]) -> Result<Self, DictionaryError> {
        let text: String = bytes.iter().copied().map(char::from).collect();
        Self::parse(&text)
    }

    /// `+` joins the parts of a compound name; it is registered with no
    /// separator, a space and a hyphen.
    fn insert(&mut self, name: &str, label: GenderLabel, popularity: Popularity) {
        if name.contains('+') {
            for separator in ["", " ", "-"] {
                self.insert(&name.replace('+', separator), label, popularity);
            }
            return;
        }

        let entries = self.names.entry(name.to_lowercase()).or_default();
        if let Some(slot) = entries.iter_mut().find(|(existing, _)| *existing == label) {
            slot.1 = popularity;
        } else {
            entries.push((label, popularity));
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Most popular label for a first name, case-insensitively.
    ///
    /// Absent names are `unknown`; a name present only with empty country
    /// cells is `andy`.
    #[must_use]
    pub fn lookup(&self, first_name: &str) -> GenderLabel {
        let Some(entries) = self.names.get(&first_name.to_lowercase()) else {
            return GenderLabel::Unknown;
        };

        let Some(&(first_label, _)) = entries.first() else {
            return GenderLabel::Unknown;
        };

        let (best, best_popularity) = entries.iter().fold(
            (first_label, Popularity::default()),
            |(best, best_pop), &(label, pop)| {
                if pop.beats(best_pop) {
                    (label, pop)
                } else {
                    (best, best_pop)
                }
            },
        );

        if best_popularity.countries > 0 {
            best
        } else {
            GenderLabel::Andy
        }
    }
}
