/*!
Builds the binary presence/absence matrix from correspondence rows.
Every character becomes a block of columns: an optional ascertainment column followed by one column per observed state, both in sorted order.

# Example usage
```rust
use phonechars::correspondence::CorrespondenceRow;
use phonechars::matrix::MatrixBuilder;

let rows = vec![
    CorrespondenceRow::new("X".to_string(), "c1".to_string(), "a".to_string()),
    CorrespondenceRow::new("Y".to_string(), "c1".to_string(), "b".to_string())
];
let (matrix, assumptions) = MatrixBuilder::default().build(&rows).unwrap();
assert_eq!(matrix.taxa(), &["X", "Y"]);
assert_eq!(matrix.column_labels(), &["c1_ascertainment", "c1_a", "c1_b"]);
assert_eq!(matrix.row("X"), Some("110"));
assert_eq!(matrix.row("Y"), Some("101"));
assert_eq!((assumptions[0].start(), assumptions[0].end()), (1, 3));
```
*/

use log::debug;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::collections::{BTreeMap, BTreeSet};

use crate::config::NexusConfig;
use crate::correspondence::CorrespondenceRow;
use crate::errors::ConversionError;

/// A named, contiguous, 1-based inclusive column range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssumptionRange {
    /// The character this range belongs to
    label: String,
    /// First column, 1-based
    start: usize,
    /// Last column, 1-based and inclusive
    end: usize
}

impl AssumptionRange {
    /// Constructor
    pub fn new(label: String, start: usize, end: usize) -> AssumptionRange {
        assert!(start <= end);
        AssumptionRange {
            label,
            start,
            end
        }
    }

    // Getters
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }
}

/// The columns of a single character
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterBlock {
    /// Character label
    label: String,
    /// Distinct observed states, sorted
    states: Vec<String>,
    /// Whether the block starts with an ascertainment column
    ascertainment: bool
}

impl CharacterBlock {
    /// Number of matrix columns taken by this block
    pub fn width(&self) -> usize {
        self.states.len() + usize::from(self.ascertainment)
    }

    /// Column labels for this block, in column order
    pub fn column_labels(&self) -> impl Iterator<Item = String> + '_ {
        let ascertainment = self.ascertainment.then(|| format!("{}_ascertainment", self.label));
        ascertainment.into_iter()
            .chain(self.states.iter().map(|state| format!("{}_{}", self.label, state)))
    }

    // Getters
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn ascertainment(&self) -> bool {
        self.ascertainment
    }
}

/// A taxon by column matrix of state symbols.
/// All rows have the same length, which equals the number of column labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterMatrix {
    /// Sorted taxa
    taxa: Vec<String>,
    /// Character blocks in column order
    blocks: Vec<CharacterBlock>,
    /// One label per column
    column_labels: Vec<String>,
    /// One state string per taxon, in the same order as `taxa`
    rows: Vec<String>,
    /// Symbol used for unobserved blocks
    missing_symbol: char,
    /// Gap symbol to declare alongside the rows
    gap_symbol: char,
    /// The state alphabet used in `rows`
    symbols: String
}

impl CharacterMatrix {
    /// Returns the state string for a taxon
    pub fn row(&self, taxon: &str) -> Option<&str> {
        self.taxa.binary_search_by(|t| t.as_str().cmp(taxon))
            .ok()
            .map(|index| self.rows[index].as_str())
    }

    /// Iterates over (taxon, state string) pairs in taxon order
    pub fn iter_rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.taxa.iter().map(|t| t.as_str())
            .zip(self.rows.iter().map(|r| r.as_str()))
    }

    pub fn num_columns(&self) -> usize {
        self.column_labels.len()
    }

    // Getters
    pub fn taxa(&self) -> &[String] {
        &self.taxa
    }

    pub fn blocks(&self) -> &[CharacterBlock] {
        &self.blocks
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    pub fn missing_symbol(&self) -> char {
        self.missing_symbol
    }

    pub fn gap_symbol(&self) -> char {
        self.gap_symbol
    }

    pub fn symbols(&self) -> &str {
        &self.symbols
    }
}

/// Builds a [`CharacterMatrix`] and its assumption ranges from correspondence rows.
#[derive(Clone, Debug, Default)]
pub struct MatrixBuilder {
    /// Provides the state symbols and the ascertainment switch
    config: NexusConfig
}

impl MatrixBuilder {
    /// Creates a builder with a custom configuration.
    pub fn with_config(config: NexusConfig) -> MatrixBuilder {
        MatrixBuilder {
            config
        }
    }

    /// Builds the matrix.
    /// # Arguments
    /// * `rows` - the correspondence rows; order does not matter
    /// # Errors
    /// * `ConversionError::EmptyMatrix` if there are no taxa or no characters
    pub fn build(&self, rows: &[CorrespondenceRow]) -> Result<(CharacterMatrix, Vec<AssumptionRange>), Box<dyn std::error::Error>> {
        // (taxon, character) => observed states
        let mut lang_chars: HashMap<(&str, &str), HashSet<&str>> = Default::default();
        // character => all states, sorted; sorted keys give the column order
        let mut all_chars: BTreeMap<&str, BTreeSet<&str>> = Default::default();
        let mut taxa: BTreeSet<&str> = Default::default();

        for row in rows.iter() {
            lang_chars.entry((row.doculect(), row.character())).or_default().insert(row.phoneme());
            all_chars.entry(row.character()).or_default().insert(row.phoneme());
            taxa.insert(row.doculect());
        }

        if taxa.is_empty() || all_chars.is_empty() {
            return Err(Box::new(ConversionError::EmptyMatrix {
                taxa: taxa.len(),
                characters: all_chars.len()
            }));
        }

        let blocks: Vec<CharacterBlock> = all_chars.iter()
            .map(|(&label, states)| CharacterBlock {
                label: label.to_string(),
                states: states.iter().map(|s| s.to_string()).collect(),
                ascertainment: self.config.add_ascertainment
            })
            .collect();

        let mut assumptions = Vec::with_capacity(blocks.len());
        let mut column_labels = vec![];
        let mut current_column = 1;
        for block in blocks.iter() {
            let width = block.width();
            assumptions.push(AssumptionRange::new(block.label.clone(), current_column, current_column + width - 1));
            column_labels.extend(block.column_labels());
            current_column += width;
        }

        let rows: Vec<String> = taxa.iter()
            .map(|&taxon| {
                let mut buffer = String::with_capacity(column_labels.len());
                for block in blocks.iter() {
                    match lang_chars.get(&(taxon, block.label.as_str())) {
                        None => {
                            // nothing observed, the whole block is unknown
                            buffer.extend(std::iter::repeat(self.config.missing_symbol).take(block.width()));
                        },
                        Some(observed) => {
                            if block.ascertainment {
                                buffer.push(self.config.present_symbol);
                            }
                            for state in block.states.iter() {
                                if observed.contains(state.as_str()) {
                                    buffer.push(self.config.present_symbol);
                                } else {
                                    buffer.push(self.config.absent_symbol);
                                }
                            }
                        }
                    }
                }
                assert_eq!(buffer.chars().count(), column_labels.len());
                buffer
            })
            .collect();

        debug!("Matrix: {} taxa x {} columns in {} characters", taxa.len(), column_labels.len(), blocks.len());

        let matrix = CharacterMatrix {
            taxa: taxa.iter().map(|t| t.to_string()).collect(),
            blocks,
            column_labels,
            rows,
            missing_symbol: self.config.missing_symbol,
            gap_symbol: self.config.gap_symbol,
            symbols: self.config.symbols()
        };
        Ok((matrix, assumptions))
    }

    // getters
    pub fn config(&self) -> &NexusConfig {
        &self.config
    }
}
