/*!
# phonechars
This library converts aligned, pattern-annotated wordlists into binary phylogenetic character matrices in NEXUS format.

Key benefits:
* Segment-aware transliteration between IPA and X-SAMPA using a minimum-cost segmentation
* Character state labels that are ASCII, NEXUS-safe, and never start with a digit
* Deterministic output: the same input always gives byte-identical NEXUS text

Performance notes:
* Transliteration is quadratic in the longest table key, which is short, so it is effectively linear in the input length
* Pattern detection is not part of this library, detectors are plugged in through [`pipeline::CharacterDetector`]

# Example usage
```rust
use phonechars::char_row::AlignedCharRowBuilder;
use phonechars::pipeline::CharacterPipeline;

// two languages sharing one correspondence pattern; "0/1" marks a singleton site
let rows = [
    AlignedCharRowBuilder::default().id("1").doculect("X").alignment("a c").patterns("1/1 0/1").build().unwrap(),
    AlignedCharRowBuilder::default().id("2").doculect("Y").alignment("b").patterns("1/1").build().unwrap()
];

let pipeline = CharacterPipeline::default();
let nexus = pipeline.rows_to_nexus(&rows).unwrap();
assert!(nexus.starts_with("#NEXUS\n"));
assert!(nexus.contains("\tDIMENSIONS NTAX=2 NCHAR=3;\n"));
assert!(nexus.contains("\nX     110\nY     101\n"));
assert!(nexus.contains("\tcharset c1 = 1-3;\n"));
```
*/

/// Aligned rows as produced by a pattern detector
pub mod char_row;
/// Configuration for extraction, matrix building, and wordlist loading
pub mod config;
/// Extraction of correspondence rows from aligned rows
pub mod correspondence;
/// Typed errors for the conversion stages
pub mod errors;
/// Utility for generating examples
pub mod example_gen;
/// ASCII-safe character state labels
pub mod label;
/// Binary presence/absence matrix construction
pub mod matrix;
/// NEXUS serialization
pub mod nexus;
/// End-to-end conversion with an injected pattern detector
pub mod pipeline;
/// IPA and X-SAMPA symbol tables
pub mod symbol_table;
/// Minimum-cost segmentation transliteration
pub mod transliterate;
/// Wordlist loading and filtering
pub mod wordlist;
