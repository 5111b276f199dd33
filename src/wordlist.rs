/*!
Reads the aligned wordlist that is handed to a correspondence pattern detector.
Entries whose cognate set has a single member carry no comparative signal, so they are dropped and the rest are renumbered from 1.

# Example usage
```rust
use phonechars::config::{Delimiter, WordlistConfigBuilder};
use phonechars::wordlist::Wordlist;

let source = "ID,DOCULECT,CONCEPT,IPA,SEGMENTS,COGID,ALIGNMENT\n\
    10,LANG_A,FIRE,far,f a r,1,f a r\n\
    11,LANG_B,FIRE,par,p a r,1,p a r\n\
    12,LANG_B,WATER,wa,w a,2,w a\n";
let config = WordlistConfigBuilder::default()
    .delimiter(Delimiter::Comma)
    .build()
    .unwrap();
let wordlist = Wordlist::from_reader(source.as_bytes(), &config).unwrap();
assert_eq!(wordlist.len(), 2);
assert_eq!(wordlist.entries()[1].id(), 2);
```
*/

use log::debug;
use rustc_hash::FxHashMap as HashMap;
use serde::Deserialize;
use simple_error::bail;
use std::io::Read;

use crate::config::WordlistConfig;

const SEGMENTS_FIELD: &str = "SEGMENTS";

/// Raw record; optional columns depend on the `noid` and `noipa` settings
#[derive(Debug, Deserialize)]
struct WordlistRecord {
    #[serde(rename = "ID")]
    id: Option<String>,
    #[serde(rename = "DOCULECT")]
    doculect: String,
    #[serde(rename = "CONCEPT")]
    concept: String,
    #[serde(rename = "IPA")]
    ipa: Option<String>,
    #[serde(rename = "SEGMENTS")]
    segments: String,
    #[serde(rename = "COGID")]
    cogid: String,
    #[serde(rename = "ALIGNMENT")]
    alignment: String
}

/// A single aligned word form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordlistEntry {
    /// Sequential identifier, starting at 1
    id: usize,
    doculect: String,
    concept: String,
    ipa: String,
    /// Space separated segments
    tokens: String,
    /// Cognate set identifier
    cogid: String,
    /// Alignment slots
    alignment: Vec<String>
}

impl WordlistEntry {
    /// Constructor; the ID is assigned when the entry is placed in a [`Wordlist`]
    pub fn new(doculect: String, concept: String, ipa: String, tokens: String, cogid: String, alignment: Vec<String>) -> WordlistEntry {
        WordlistEntry {
            id: 0,
            doculect,
            concept,
            ipa,
            tokens,
            cogid,
            alignment
        }
    }

    // Getters
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn doculect(&self) -> &str {
        &self.doculect
    }

    pub fn concept(&self) -> &str {
        &self.concept
    }

    pub fn ipa(&self) -> &str {
        &self.ipa
    }

    pub fn tokens(&self) -> &str {
        &self.tokens
    }

    pub fn cogid(&self) -> &str {
        &self.cogid
    }

    pub fn alignment(&self) -> &[String] {
        &self.alignment
    }
}

/// The filtered wordlist, in source order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wordlist {
    entries: Vec<WordlistEntry>
}

impl Wordlist {
    /// Parses a wordlist table.
    /// With explicit IDs, a repeated ID replaces the earlier entry in place.
    /// # Arguments
    /// * `reader` - source of the table
    /// * `config` - delimiter and the `noid`/`noipa` switches
    /// # Errors
    /// * if the table cannot be parsed, a required column is missing or blank, or an ID is not a number
    pub fn from_reader<R: Read>(reader: R, config: &WordlistConfig) -> Result<Wordlist, Box<dyn std::error::Error>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(config.delimiter.as_byte())
            .has_headers(true)
            .from_reader(reader);

        // a blank cell and a missing column both deserialize to None
        let headers = csv_reader.headers()?;
        let has_id_column = headers.iter().any(|h| h == "ID");
        let has_ipa_column = headers.iter().any(|h| h == "IPA");

        let mut entries: Vec<(usize, WordlistEntry)> = vec![];
        let mut id_lookup: HashMap<usize, usize> = Default::default();
        for (index, result) in csv_reader.deserialize().enumerate() {
            let record: WordlistRecord = result?;

            let source_id = if config.noid {
                index + 1
            } else {
                match record.id.as_deref() {
                    Some(raw_id) => match raw_id.trim().parse::<usize>() {
                        Ok(id) => id,
                        Err(e) => bail!("Invalid ID {:?} on data line {}: {}", raw_id, index + 1, e)
                    },
                    None if has_id_column => bail!("Empty ID on data line {}", index + 1),
                    None => bail!("Missing ID column; use noid to number entries sequentially")
                }
            };

            let ipa = if config.noipa {
                record.segments.replace(' ', "")
            } else {
                match record.ipa {
                    Some(ipa) => ipa,
                    None if has_ipa_column => bail!("Empty IPA on data line {}; use noipa to build it from {}", index + 1, SEGMENTS_FIELD),
                    None => bail!("Missing IPA column; use noipa to build it from {}", SEGMENTS_FIELD)
                }
            };

            let entry = WordlistEntry::new(
                record.doculect,
                record.concept,
                ipa,
                record.segments,
                record.cogid,
                record.alignment.split_whitespace().map(|s| s.to_string()).collect()
            );

            if let Some(&position) = id_lookup.get(&source_id) {
                debug!("Entry ID {source_id} repeated, replacing the earlier entry");
                entries[position].1 = entry;
            } else {
                id_lookup.insert(source_id, entries.len());
                entries.push((source_id, entry));
            }
        }

        // drop cognate sets with a single form
        let mut cogid_count: HashMap<&str, usize> = Default::default();
        for (_source_id, entry) in entries.iter() {
            *cogid_count.entry(entry.cogid.as_str()).or_default() += 1;
        }
        let keep: Vec<bool> = entries.iter()
            .map(|(_source_id, entry)| cogid_count[entry.cogid.as_str()] > 1)
            .collect();

        let total = entries.len();
        let entries: Vec<WordlistEntry> = entries.into_iter()
            .zip(keep)
            .filter_map(|((_source_id, entry), k)| if k { Some(entry) } else { None })
            .enumerate()
            .map(|(index, mut entry)| {
                entry.id = index + 1;
                entry
            })
            .collect();

        debug!("Wordlist: {} entries read, {} kept", total, entries.len());
        Ok(Wordlist {
            entries
        })
    }

    /// Builds a wordlist from already prepared entries, renumbering them from 1 without filtering.
    pub fn from_entries(entries: Vec<WordlistEntry>) -> Wordlist {
        let entries = entries.into_iter()
            .enumerate()
            .map(|(index, mut entry)| {
                entry.id = index + 1;
                entry
            })
            .collect();
        Wordlist {
            entries
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // getters
    pub fn entries(&self) -> &[WordlistEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::{Delimiter, WordlistConfigBuilder};

    const SOURCE: &str = "ID\tDOCULECT\tCONCEPT\tIPA\tSEGMENTS\tCOGID\tALIGNMENT\n\
        1\tLANG_A\tFIRE\tfaːr\tf aː r\t1\tf aː r\n\
        2\tLANG_B\tFIRE\tpar\tp a r\t1\tp a r\n\
        3\tLANG_A\tWATER\twa\tw a\t2\tw a -\n\
        4\tLANG_B\tWATER\twat\tw a t\t2\tw a t\n\
        5\tLANG_C\tSTONE\tli\tl i\t3\tl i\n";

    #[test]
    fn test_singletons_dropped() {
        let wordlist = Wordlist::from_reader(SOURCE.as_bytes(), &WordlistConfig::default()).unwrap();
        assert_eq!(wordlist.len(), 4);
        let ids: Vec<usize> = wordlist.entries().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(wordlist.entries().iter().all(|e| e.cogid() != "3"));
        assert_eq!(wordlist.entries()[2].alignment(), &["w", "a", "-"]);
        assert_eq!(wordlist.entries()[0].ipa(), "faːr");
    }

    #[test]
    fn test_noipa() {
        let config = WordlistConfigBuilder::default()
            .noipa(true)
            .build().unwrap();
        let wordlist = Wordlist::from_reader(SOURCE.as_bytes(), &config).unwrap();
        assert_eq!(wordlist.entries()[0].ipa(), "faːr");
        assert_eq!(wordlist.entries()[0].tokens(), "f aː r");
    }

    #[test]
    fn test_noid_and_missing_columns() {
        let source = "DOCULECT,CONCEPT,SEGMENTS,COGID,ALIGNMENT\n\
            LANG_A,FIRE,f a r,1,f a r\n\
            LANG_B,FIRE,p a r,1,p a r\n";

        // without noid/noipa this cannot be read
        let strict = WordlistConfigBuilder::default()
            .delimiter(Delimiter::Comma)
            .build().unwrap();
        assert!(Wordlist::from_reader(source.as_bytes(), &strict).is_err());

        let relaxed = WordlistConfigBuilder::default()
            .delimiter(Delimiter::Comma)
            .noid(true)
            .noipa(true)
            .build().unwrap();
        let wordlist = Wordlist::from_reader(source.as_bytes(), &relaxed).unwrap();
        assert_eq!(wordlist.len(), 2);
        assert_eq!(wordlist.entries()[1].ipa(), "par");
        assert_eq!(wordlist.entries()[1].doculect(), "LANG_B");
    }

    #[test]
    fn test_repeated_id() {
        let source = "ID,DOCULECT,CONCEPT,IPA,SEGMENTS,COGID,ALIGNMENT\n\
            7,LANG_A,FIRE,far,f a r,1,f a r\n\
            8,LANG_B,FIRE,par,p a r,1,p a r\n\
            7,LANG_C,FIRE,bar,b a r,1,b a r\n";
        let config = WordlistConfigBuilder::default()
            .delimiter(Delimiter::Comma)
            .build().unwrap();
        let wordlist = Wordlist::from_reader(source.as_bytes(), &config).unwrap();
        let doculects: Vec<&str> = wordlist.entries().iter().map(|e| e.doculect()).collect();
        assert_eq!(doculects, vec!["LANG_C", "LANG_B"]);
    }

    #[test]
    fn test_bad_id() {
        let source = "ID,DOCULECT,CONCEPT,IPA,SEGMENTS,COGID,ALIGNMENT\n\
            x1,LANG_A,FIRE,far,f a r,1,f a r\n";
        let config = WordlistConfigBuilder::default()
            .delimiter(Delimiter::Comma)
            .build().unwrap();
        let error = Wordlist::from_reader(source.as_bytes(), &config).unwrap_err();
        assert!(error.to_string().starts_with("Invalid ID \"x1\""));
    }

    #[test]
    fn test_empty_id_cell() {
        let source = "ID,DOCULECT,CONCEPT,IPA,SEGMENTS,COGID,ALIGNMENT\n\
            1,LANG_A,FIRE,far,f a r,1,f a r\n\
            ,LANG_B,FIRE,par,p a r,1,p a r\n";
        let config = WordlistConfigBuilder::default()
            .delimiter(Delimiter::Comma)
            .build().unwrap();
        let error = Wordlist::from_reader(source.as_bytes(), &config).unwrap_err();
        assert_eq!(error.to_string(), "Empty ID on data line 2");

        let no_column = "DOCULECT,CONCEPT,IPA,SEGMENTS,COGID,ALIGNMENT\n\
            LANG_A,FIRE,far,f a r,1,f a r\n";
        let error = Wordlist::from_reader(no_column.as_bytes(), &config).unwrap_err();
        assert!(error.to_string().starts_with("Missing ID column"));
    }

    #[test]
    fn test_empty_ipa_cell() {
        let source = "ID,DOCULECT,CONCEPT,IPA,SEGMENTS,COGID,ALIGNMENT\n\
            1,LANG_A,FIRE,,f a r,1,f a r\n";
        let config = WordlistConfigBuilder::default()
            .delimiter(Delimiter::Comma)
            .build().unwrap();
        let error = Wordlist::from_reader(source.as_bytes(), &config).unwrap_err();
        assert!(error.to_string().starts_with("Empty IPA on data line 1"));
    }

    #[test]
    fn test_from_entries() {
        let entry = |doculect: &str, cogid: &str, tokens: &str| WordlistEntry::new(
            doculect.to_string(),
            "FIRE".to_string(),
            tokens.replace(' ', ""),
            tokens.to_string(),
            cogid.to_string(),
            tokens.split_whitespace().map(|s| s.to_string()).collect()
        );
        let entries = vec![
            entry("LANG_A", "1", "f a r"),
            entry("LANG_B", "1", "p a r"),
            entry("LANG_C", "2", "l i")
        ];
        assert!(entries.iter().all(|e| e.id() == 0));

        let wordlist = Wordlist::from_entries(entries);
        let ids: Vec<usize> = wordlist.entries().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        // unlike from_reader, singleton cognate sets stay
        assert_eq!(wordlist.entries()[2].cogid(), "2");
        assert_eq!(wordlist.entries()[2].ipa(), "li");
        assert_eq!(wordlist.entries()[1].alignment(), &["p", "a", "r"]);
    }
}
