/*!
Contains configuration information for each stage of the character pipeline.
Typical usage is to the use the builders to construct the configs, e.g.
```
use phonechars::config::{InclusionPolicy, ExtractConfig, ExtractConfigBuilder, NexusConfig, NexusConfigBuilder};
let extract_config: ExtractConfig = ExtractConfigBuilder::default()
    .inclusion_policy(InclusionPolicy::NonEmpty)
    .build()
    .unwrap();
let nexus_config: NexusConfig = NexusConfigBuilder::default()
    .add_ascertainment(false)
    .build()
    .unwrap();
```
*/

/// Delimiter for the tabular formats exchanged with the outside world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delimiter {
    /// Comma separated
    Comma,
    /// Tab separated
    #[default]
    Tab
}

impl Delimiter {
    /// Returns the byte used by the csv reader/writer for this delimiter
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t'
        }
    }
}

/// Decides which correspondence patterns become characters in the matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InclusionPolicy {
    /// A pattern is kept only if it shows more than one distinct value across all doculects
    #[default]
    MoreThanOneDistinct,
    /// Any pattern with at least one observation is kept; this will also keep uniform classes
    NonEmpty
}

/**
Configuration for the correspondence extraction step.
```
use phonechars::config::{ExtractConfig, ExtractConfigBuilder};
let config: ExtractConfig = ExtractConfigBuilder::default()
    .zero_label("NULL".to_string())
    .build()
    .unwrap();
assert_eq!(config.gap_marker, "-");
```
*/
#[derive(derive_builder::Builder, Clone, Debug)]
#[builder(default)]
pub struct ExtractConfig {
    /// Which patterns are emitted as characters
    pub inclusion_policy: InclusionPolicy,
    /// Alignment value for a gap
    pub gap_marker: String,
    /// Alignment value for a morphological boundary, these slots are skipped entirely
    pub boundary_marker: String,
    /// Pattern index reserved for singletons
    pub singleton_pattern: String,
    /// Reference phoneme emitted when the first observation is a gap
    pub zero_label: String
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            inclusion_policy: InclusionPolicy::MoreThanOneDistinct,
            gap_marker: "-".to_string(),
            boundary_marker: "+".to_string(),
            singleton_pattern: "0".to_string(),
            zero_label: "ZERO".to_string()
        }
    }
}

/**
Configuration for matrix construction and NEXUS output.
```
use phonechars::config::{NexusConfig, NexusConfigBuilder};
let config: NexusConfig = NexusConfigBuilder::default()
    .label_padding(2)
    .build()
    .unwrap();
assert_eq!(config.symbols(), "01");
```
*/
#[derive(derive_builder::Builder, Clone, Debug)]
#[builder(default)]
pub struct NexusConfig {
    /// Symbol for a block with no observations
    pub missing_symbol: char,
    /// Gap symbol declared in the FORMAT line
    pub gap_symbol: char,
    /// Symbol for a state that was not observed
    pub absent_symbol: char,
    /// Symbol for a state that was observed
    pub present_symbol: char,
    /// If true, each character block starts with an ascertainment column
    pub add_ascertainment: bool,
    /// Extra spaces added after the longest taxon label in the MATRIX section
    pub label_padding: usize
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            missing_symbol: '?',
            gap_symbol: '-',
            absent_symbol: '0',
            present_symbol: '1',
            // most downstream tools expect the correction, so it is on unless asked otherwise
            add_ascertainment: true,
            label_padding: 4
        }
    }
}

impl NexusConfig {
    /// The state alphabet, absent symbol first
    pub fn symbols(&self) -> String {
        [self.absent_symbol, self.present_symbol].iter().collect()
    }
}

/**
Configuration for reading a wordlist before it is handed to a character detector.
```
use phonechars::config::{Delimiter, WordlistConfig, WordlistConfigBuilder};
let config: WordlistConfig = WordlistConfigBuilder::default()
    .delimiter(Delimiter::Comma)
    .noid(true)
    .build()
    .unwrap();
assert!(!config.noipa);
```
*/
#[derive(derive_builder::Builder, Clone, Debug, Default)]
#[builder(default)]
pub struct WordlistConfig {
    /// Column delimiter of the source table
    pub delimiter: Delimiter,
    /// If true, the ID column is ignored and a sequential index is used instead
    pub noid: bool,
    /// If true, the IPA column is ignored and rebuilt from the segments
    pub noipa: bool
}
