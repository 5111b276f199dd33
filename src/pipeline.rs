/*!
End-to-end conversion from aligned data to NEXUS.
Pattern detection itself is not done here; it is injected through the [`CharacterDetector`] trait, which plain functions and closures already implement.

# Example usage
```rust
use phonechars::char_row::{AlignedCharRow, AlignedCharRowBuilder};
use phonechars::pipeline::CharacterPipeline;
use phonechars::wordlist::Wordlist;

// a toy detector that treats every alignment column of a cognate set as its own pattern
let detector = |wordlist: &Wordlist| -> Result<Vec<AlignedCharRow>, Box<dyn std::error::Error>> {
    Ok(wordlist.entries().iter()
        .map(|entry| {
            let patterns: Vec<String> = (0..entry.alignment().len())
                .map(|column| format!("{}-{}/x", entry.cogid(), column + 1))
                .collect();
            AlignedCharRowBuilder::default()
                .id(entry.id().to_string())
                .doculect(entry.doculect())
                .alignment(entry.alignment().join(" "))
                .patterns(patterns.join(" "))
                .build()
                .unwrap()
        })
        .collect())
};

let source = "ID\tDOCULECT\tCONCEPT\tIPA\tSEGMENTS\tCOGID\tALIGNMENT\n\
    1\tX\tFIRE\tpa\tp a\t1\tp a\n\
    2\tY\tFIRE\tfa\tf a\t1\tf a\n";
let wordlist = Wordlist::from_reader(source.as_bytes(), &Default::default()).unwrap();
let pipeline = CharacterPipeline::default();
let nexus = pipeline.run(&detector, &wordlist).unwrap();
assert!(nexus.contains("DIMENSIONS NTAX=2 NCHAR=3;"));
assert!(nexus.contains("charset c1_1 = 1-3;"));
```
*/

use log::debug;
use std::io::Read;

use crate::char_row::AlignedCharRow;
use crate::config::{Delimiter, ExtractConfig, NexusConfig};
use crate::correspondence::{read_correspondence_table, CorrespondenceExtractor, CorrespondenceRow};
use crate::label::LabelNormalizer;
use crate::matrix::MatrixBuilder;
use crate::nexus::build_nexus_string;
use crate::wordlist::Wordlist;

/// Anything that can turn a wordlist into aligned, pattern-annotated rows.
pub trait CharacterDetector {
    /// Runs detection over the full wordlist
    /// # Errors
    /// * implementation specific
    fn detect(&self, wordlist: &Wordlist) -> Result<Vec<AlignedCharRow>, Box<dyn std::error::Error>>;
}

impl<F> CharacterDetector for F
where
    F: Fn(&Wordlist) -> Result<Vec<AlignedCharRow>, Box<dyn std::error::Error>>
{
    fn detect(&self, wordlist: &Wordlist) -> Result<Vec<AlignedCharRow>, Box<dyn std::error::Error>> {
        self(wordlist)
    }
}

/// Holds the shared label normalizer and the per-stage configs.
/// A pipeline never changes after construction, so it can be reused across datasets.
#[derive(Clone, Debug, Default)]
pub struct CharacterPipeline {
    /// Shared by every extraction
    normalizer: LabelNormalizer,
    /// Correspondence extraction options
    extract_config: ExtractConfig,
    /// Matrix and output options
    nexus_config: NexusConfig
}

impl CharacterPipeline {
    /// Creates a pipeline with custom configs.
    pub fn with_config(extract_config: ExtractConfig, nexus_config: NexusConfig) -> CharacterPipeline {
        CharacterPipeline {
            normalizer: Default::default(),
            extract_config,
            nexus_config
        }
    }

    /// Runs a detector on the wordlist and converts its output to NEXUS.
    /// # Arguments
    /// * `detector` - the pattern detector
    /// * `wordlist` - the filtered wordlist to run on
    /// # Errors
    /// * if detection fails, or any of the errors from `rows_to_nexus`
    pub fn run<D: CharacterDetector + ?Sized>(&self, detector: &D, wordlist: &Wordlist) -> Result<String, Box<dyn std::error::Error>> {
        debug!("Running detector on {} entries", wordlist.len());
        let rows = detector.detect(wordlist)?;
        self.rows_to_nexus(&rows)
    }

    /// Extracts the correspondence rows for a set of aligned rows.
    /// # Errors
    /// * `ConversionError::MalformedRow` from extraction
    pub fn correspondences(&self, rows: &[AlignedCharRow]) -> Result<Vec<CorrespondenceRow>, Box<dyn std::error::Error>> {
        let extractor = CorrespondenceExtractor::with_config(&self.normalizer, self.extract_config.clone());
        extractor.extract(rows)
    }

    /// Converts aligned rows into NEXUS text.
    /// # Errors
    /// * `ConversionError::MalformedRow` from extraction
    /// * `ConversionError::EmptyMatrix` if no character survives extraction
    pub fn rows_to_nexus(&self, rows: &[AlignedCharRow]) -> Result<String, Box<dyn std::error::Error>> {
        let correspondences = self.correspondences(rows)?;
        self.correspondences_to_nexus(&correspondences)
    }

    /// Converts correspondence rows into NEXUS text.
    /// # Errors
    /// * `ConversionError::EmptyMatrix` if there are no rows
    pub fn correspondences_to_nexus(&self, correspondences: &[CorrespondenceRow]) -> Result<String, Box<dyn std::error::Error>> {
        corrdata_to_nexus(correspondences, &self.nexus_config)
    }

    // getters
    pub fn normalizer(&self) -> &LabelNormalizer {
        &self.normalizer
    }

    pub fn extract_config(&self) -> &ExtractConfig {
        &self.extract_config
    }

    pub fn nexus_config(&self) -> &NexusConfig {
        &self.nexus_config
    }
}

/// Builds the matrix for correspondence rows and serializes it.
/// # Errors
/// * `ConversionError::EmptyMatrix` if there are no rows
pub fn corrdata_to_nexus(correspondences: &[CorrespondenceRow], config: &NexusConfig) -> Result<String, Box<dyn std::error::Error>> {
    let builder = MatrixBuilder::with_config(config.clone());
    let (matrix, assumptions) = builder.build(correspondences)?;
    build_nexus_string(&matrix, &assumptions, config)
}

/// Reads a stored correspondence table and converts it into NEXUS text, adding ascertainment columns as configured.
/// # Arguments
/// * `reader` - source of the `DOCULECT`, `CHAR`, `PHONEME` table
/// * `delimiter` - column delimiter of the table
/// * `config` - matrix and output options
/// # Errors
/// * if the table cannot be read
/// * `ConversionError::EmptyMatrix` if the table has no rows
pub fn corr_table_to_nexus<R: Read>(reader: R, delimiter: Delimiter, config: &NexusConfig) -> Result<String, Box<dyn std::error::Error>> {
    let correspondences = read_correspondence_table(reader, delimiter)?;
    corrdata_to_nexus(&correspondences, config)
}
