/*!
Aligned, pattern-annotated word forms as produced by a correspondence pattern detector.
Rows are usually built in code through [`AlignedCharRowBuilder`] or read back from the detector's tab-separated output.

# Example usage
```rust
use phonechars::char_row::AlignedCharRowBuilder;

let row = AlignedCharRowBuilder::default()
    .doculect("LANG_A")
    .alignment("f a - r")
    .patterns("1/f 2/a 3/i 4/r")
    .build()
    .unwrap();
let zipped: Vec<(&str, &str)> = row.pattern_labels().zip(row.alignment_slots()).collect();
assert_eq!(zipped[2], ("3/i", "-"));
```
*/

use log::debug;
use serde::Deserialize;
use std::io::Read;

/// One aligned word form.
/// `alignment` and `patterns` are whitespace-delimited and are expected to line up slot for slot.
#[derive(derive_builder::Builder, Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[builder(default, setter(into))]
pub struct AlignedCharRow {
    /// Row identifier
    #[serde(rename = "ID", alias = "id")]
    pub id: String,
    /// Language variety the form belongs to
    #[serde(rename = "DOCULECT", alias = "doculect")]
    pub doculect: String,
    /// Concept gloss
    #[serde(rename = "CONCEPT", alias = "concept")]
    pub concept: String,
    /// Phonetic transcription
    #[serde(rename = "IPA", alias = "ipa", default)]
    pub ipa: String,
    /// Segmented tokens
    #[serde(rename = "TOKENS", alias = "tokens", default)]
    pub tokens: String,
    /// Cognate set identifier
    #[serde(rename = "COGID", alias = "cogid", default)]
    pub cogid: String,
    /// Alignment slots, `-` for gaps and `+` for morpheme boundaries
    #[serde(rename = "ALIGNMENT", alias = "alignment")]
    pub alignment: String,
    /// Syllable structure tags
    #[serde(rename = "STRUCTURE", alias = "structure", default)]
    pub structure: String,
    /// `patternIndex/siteIndex` labels, one per alignment slot
    #[serde(rename = "PATTERNS", alias = "patterns")]
    pub patterns: String
}

impl AlignedCharRow {
    /// Iterates over the alignment slots
    pub fn alignment_slots(&self) -> impl Iterator<Item = &str> {
        self.alignment.split_whitespace()
    }

    /// Iterates over the pattern labels
    pub fn pattern_labels(&self) -> impl Iterator<Item = &str> {
        self.patterns.split_whitespace()
    }
}

/// Reads the tab-separated output of a pattern detector.
/// Blank lines and lines starting with `#` are ignored, the first remaining line is the header.
/// # Arguments
/// * `reader` - source of the table
/// # Errors
/// * if the table cannot be parsed or a required column is missing
pub fn read_char_rows<R: Read>(reader: R) -> Result<Vec<AlignedCharRow>, Box<dyn std::error::Error>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = vec![];
    for result in csv_reader.deserialize() {
        let row: AlignedCharRow = result?;
        rows.push(row);
    }

    debug!("Loaded {} aligned rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let row = AlignedCharRowBuilder::default()
            .id("7")
            .doculect("LANG_B")
            .alignment("k a + t")
            .patterns("1-1/k 2-1/a 0/+ 3-1/t")
            .build()
            .unwrap();
        assert_eq!(row.id, "7");
        assert!(row.concept.is_empty());
        assert_eq!(row.alignment_slots().count(), 4);
        assert_eq!(row.pattern_labels().last(), Some("3-1/t"));
    }

    #[test]
    fn test_read_char_rows() {
        let source = "# generated by a detector\n\
            \n\
            ID\tDOCULECT\tCONCEPT\tIPA\tTOKENS\tCOGID\tALIGNMENT\tSTRUCTURE\tPATTERNS\n\
            1\tLANG_A\tFIRE\tfar\tf a r\t1\tf a r\tc v c\t1/f 2/a 3/r\n\
            # a comment in the middle\n\
            2\tLANG_B\tFIRE\tpar\tp a r\t1\tp a r\tc v c\t1/f 2/a 3/r\n\
            \n";
        let rows = read_char_rows(source.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].doculect, "LANG_A");
        assert_eq!(rows[1].alignment, "p a r");
        assert_eq!(rows[1].structure, "c v c");
        assert_eq!(rows[1].cogid, "1");
    }

    #[test]
    fn test_read_lowercase_and_extra_columns() {
        let source = "id\tdoculect\tconcept\talignment\tpatterns\tnote\n\
            1\tLANG_A\tWATER\tw a\t1/w 2/a\tsomething\n";
        let rows = read_char_rows(source.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].patterns, "1/w 2/a");
        assert!(rows[0].ipa.is_empty());
    }

    #[test]
    fn test_missing_column() {
        let source = "ID\tDOCULECT\tCONCEPT\tALIGNMENT\n1\tLANG_A\tWATER\tw a\n";
        assert!(read_char_rows(source.as_bytes()).is_err());
    }
}
