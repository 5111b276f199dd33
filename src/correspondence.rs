/*!
Collapses aligned character sites into correspondence rows: one reference phoneme per doculect per correspondence pattern.

# Example usage
```rust
use phonechars::char_row::AlignedCharRowBuilder;
use phonechars::correspondence::CorrespondenceExtractor;
use phonechars::label::LabelNormalizer;

let rows = [
    AlignedCharRowBuilder::default().id("1").doculect("X").alignment("a c").patterns("1/1 0/1").build().unwrap(),
    AlignedCharRowBuilder::default().id("2").doculect("Y").alignment("b").patterns("1/1").build().unwrap()
];

let normalizer = LabelNormalizer::default();
let extractor = CorrespondenceExtractor::new(&normalizer);
let correspondences = extractor.extract(&rows).unwrap();

// the singleton pattern "0" is ignored
assert_eq!(correspondences.len(), 2);
assert_eq!(correspondences[0].doculect(), "X");
assert_eq!(correspondences[0].character(), "c1");
assert_eq!(correspondences[0].phoneme(), "a");
assert_eq!(correspondences[1].phoneme(), "b");
```
*/

use itertools::Itertools;
use log::{debug, trace};
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::char_row::AlignedCharRow;
use crate::config::{Delimiter, ExtractConfig, InclusionPolicy};
use crate::errors::ConversionError;
use crate::label::LabelNormalizer;

/// A single (doculect, character, reference phoneme) observation.
/// Field order matches the sort order of extraction results: character first, then doculect.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CorrespondenceRow {
    /// The matrix character, derived from the pattern index
    #[serde(rename = "CHAR")]
    character: String,
    /// The language variety
    #[serde(rename = "DOCULECT")]
    doculect: String,
    /// Normalized reference phoneme
    #[serde(rename = "PHONEME")]
    phoneme: String
}

impl CorrespondenceRow {
    /// Constructor
    pub fn new(doculect: String, character: String, phoneme: String) -> CorrespondenceRow {
        CorrespondenceRow {
            character,
            doculect,
            phoneme
        }
    }

    // Getters
    pub fn doculect(&self) -> &str {
        &self.doculect
    }

    pub fn character(&self) -> &str {
        &self.character
    }

    pub fn phoneme(&self) -> &str {
        &self.phoneme
    }
}

/// Serialized column order of a correspondence table
#[derive(Serialize)]
struct CorrespondenceRecord<'a> {
    #[serde(rename = "DOCULECT")]
    doculect: &'a str,
    #[serde(rename = "CHAR")]
    character: &'a str,
    #[serde(rename = "PHONEME")]
    phoneme: &'a str
}

/// Returns the matrix character label for a pattern index, e.g. "12-3" becomes "c12_3".
pub fn character_label(pattern_index: &str) -> String {
    format!("c{}", pattern_index.replace('-', "_"))
}

/// Extracts correspondence rows from aligned rows.
/// The extractor borrows a normalizer so that the symbol tables are built once and shared.
#[derive(Clone, Debug)]
pub struct CorrespondenceExtractor<'a> {
    /// Used to label reference phonemes
    normalizer: &'a LabelNormalizer,
    /// Markers and inclusion policy
    config: ExtractConfig
}

impl<'a> CorrespondenceExtractor<'a> {
    /// Creates an extractor with the default configuration.
    pub fn new(normalizer: &'a LabelNormalizer) -> CorrespondenceExtractor<'a> {
        Self::with_config(normalizer, Default::default())
    }

    /// Creates an extractor with a custom configuration.
    pub fn with_config(normalizer: &'a LabelNormalizer, config: ExtractConfig) -> CorrespondenceExtractor<'a> {
        CorrespondenceExtractor {
            normalizer,
            config
        }
    }

    /// Runs the extraction over all rows.
    /// Output is sorted by character and then doculect.
    /// # Arguments
    /// * `rows` - the aligned rows, in input order; the first observation per doculect and pattern is the reference
    /// # Errors
    /// * `ConversionError::MalformedRow` if a row has a different number of patterns and alignment slots, or a pattern label without a single `/`
    pub fn extract(&self, rows: &[AlignedCharRow]) -> Result<Vec<CorrespondenceRow>, Box<dyn std::error::Error>> {
        // (doculect, pattern) => observations in row order
        let mut lang_obs: HashMap<(&str, &str), Vec<&str>> = Default::default();
        // pattern => every observation across doculects
        let mut pattern_values: HashMap<&str, Vec<&str>> = Default::default();

        for row in rows.iter() {
            let labels: Vec<&str> = row.pattern_labels().collect();
            let slots: Vec<&str> = row.alignment_slots().collect();
            if labels.len() != slots.len() {
                return Err(Box::new(ConversionError::MalformedRow {
                    row_id: row.id.clone(),
                    reason: format!("{} pattern labels for {} alignment slots", labels.len(), slots.len())
                }));
            }

            for (&label, &value) in labels.iter().zip(slots.iter()) {
                if value == self.config.boundary_marker {
                    continue;
                }

                let pattern_index = parse_pattern_label(label).ok_or_else(|| ConversionError::MalformedRow {
                    row_id: row.id.clone(),
                    reason: format!("pattern label {label:?} is not of the form index/site")
                })?;

                if pattern_index == self.config.singleton_pattern {
                    trace!("\tsingleton {label} => {value}");
                    continue;
                }

                lang_obs.entry((row.doculect.as_str(), pattern_index)).or_default().push(value);
                pattern_values.entry(pattern_index).or_default().push(value);
            }
        }

        let doculects: Vec<&str> = lang_obs.keys()
            .map(|&(doculect, _pattern)| doculect)
            .sorted()
            .dedup()
            .collect();

        let mut kept_patterns = 0;
        let mut data = vec![];
        for (&pattern_index, values) in pattern_values.iter() {
            let keep = match self.config.inclusion_policy {
                InclusionPolicy::MoreThanOneDistinct => values.iter().unique().count() > 1,
                InclusionPolicy::NonEmpty => !values.is_empty()
            };
            if !keep {
                trace!("Dropping uniform pattern {pattern_index}: {:?}", values.first());
                continue;
            }
            kept_patterns += 1;

            let character = character_label(pattern_index);
            for &doculect in doculects.iter() {
                if let Some(&first) = lang_obs.get(&(doculect, pattern_index)).and_then(|obs| obs.first()) {
                    data.push(CorrespondenceRow::new(
                        doculect.to_string(),
                        character.clone(),
                        self.reference_phoneme(first)
                    ));
                }
            }
        }

        // derived Ord compares the character first and then the doculect, which are unique pairs
        data.sort();

        debug!("Patterns: {} total, {} kept", pattern_values.len(), kept_patterns);
        debug!("Doculects: {}", doculects.len());
        debug!("Correspondence rows: {}", data.len());
        Ok(data)
    }

    /// Converts an observed alignment value into the label used in the matrix.
    fn reference_phoneme(&self, value: &str) -> String {
        if value == self.config.gap_marker {
            self.config.zero_label.clone()
        } else {
            // the detector may append a broader grapheme after a slash, we keep the original form
            let grapheme = value.split('/').next().unwrap_or(value);
            self.normalizer.normalize_label(grapheme)
        }
    }

    // getters
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }
}

/// Splits `index/site` and returns the index, or None if the label does not contain exactly one slash.
fn parse_pattern_label(label: &str) -> Option<&str> {
    let (index, site) = label.split_once('/')?;
    if index.is_empty() || site.contains('/') {
        None
    } else {
        Some(index)
    }
}

/// Reads a correspondence table with `DOCULECT`, `CHAR`, and `PHONEME` columns.
/// # Arguments
/// * `reader` - source of the table
/// * `delimiter` - column delimiter
/// # Errors
/// * if the table cannot be parsed or a column is missing
pub fn read_correspondence_table<R: Read>(reader: R, delimiter: Delimiter) -> Result<Vec<CorrespondenceRow>, Box<dyn std::error::Error>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .from_reader(reader);

    let mut rows = vec![];
    for result in csv_reader.deserialize() {
        let row: CorrespondenceRow = result?;
        rows.push(row);
    }
    debug!("Loaded {} correspondence rows", rows.len());
    Ok(rows)
}

/// Writes a correspondence table with a `DOCULECT`, `CHAR`, `PHONEME` header.
/// # Arguments
/// * `writer` - destination of the table
/// * `rows` - the rows to write, in order
/// * `delimiter` - column delimiter
/// # Errors
/// * if writing fails
pub fn write_correspondence_table<W: Write>(writer: W, rows: &[CorrespondenceRow], delimiter: Delimiter) -> Result<(), Box<dyn std::error::Error>> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .from_writer(writer);
    for row in rows.iter() {
        csv_writer.serialize(CorrespondenceRecord {
            doculect: &row.doculect,
            character: &row.character,
            phoneme: &row.phoneme
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
