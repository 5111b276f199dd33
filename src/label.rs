/*!
Turns IPA graphemes into labels that NEXUS consumers accept as character state names.
Labels go through X-SAMPA and ASCII folding, then the few ASCII symbols that tools such as SplitsTree reject are spelled out.
Whatever punctuation is left after that is escaped, so a label only ever holds ASCII letters, digits, and underscores.
The result stays readable for a phonologist, but it is not guaranteed to be reversible.

# Example usage
```rust
use phonechars::label::LabelNormalizer;

let normalizer = LabelNormalizer::default();
assert_eq!(normalizer.normalize_label("ʃ"), "S");
assert_eq!(normalizer.normalize_label("aː"), "a_LG_");
assert_eq!(normalizer.normalize_label("ʔ"), "_GS_");
assert_eq!(normalizer.normalize_label("æ"), "_LB_");
```
*/

use crate::transliterate::Transliterator;

/// Prefix added to labels that would otherwise start with a digit
pub const TONE_PREFIX: &str = "TONE_";

/// Replacements for symbols that break NEXUS readers, applied in this order
pub const UNSAFE_REPLACEMENTS: [(&str, &str); 6] = [
    ("?", "_GS_"), // glottal stop
    ("`", "_AP_"),
    ("@", "_AT_"),
    (":", "_LG_"),
    ("~", "_TD_"),
    ("\\", "_SL_")
];

/// Escapes for the remaining X-SAMPA punctuation, applied after `UNSAFE_REPLACEMENTS`
const NAMED_ESCAPES: [(char, &str); 18] = [
    ('{', "_LB_"),
    ('}', "_RB_"),
    ('"', "_QT_"),
    ('\'', "_PR_"),
    ('|', "_VB_"),
    ('!', "_EX_"),
    ('<', "_LT_"),
    ('>', "_GT_"),
    ('=', "_EQ_"),
    ('-', "_HY_"),
    ('^', "_CA_"),
    ('%', "_PC_"),
    ('.', "_DT_"),
    ('+', "_PL_"),
    ('&', "_AM_"),
    ('*', "_AS_"),
    ('/', "_FS_"),
    (' ', "_SP_")
];

/// Rewrites every character outside `[A-Za-z0-9_]`, using `_U{hex}_` when there is no named escape.
fn escape_non_word(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            escaped.push(c);
        } else if let Some(&(_, name)) = NAMED_ESCAPES.iter().find(|&&(source, _)| source == c) {
            escaped.push_str(name);
        } else {
            escaped.push_str(&format!("_U{:04X}_", c as u32));
        }
    }
    escaped
}

/// Normalizes IPA graphemes into matrix-safe labels.
#[derive(Clone, Debug)]
pub struct LabelNormalizer {
    /// IPA to X-SAMPA converter
    transliterator: Transliterator
}

impl Default for LabelNormalizer {
    fn default() -> Self {
        Self {
            transliterator: Transliterator::ipa_to_xsampa()
        }
    }
}

impl LabelNormalizer {
    /// Creates a normalizer around a custom transliterator.
    pub fn new(transliterator: Transliterator) -> LabelNormalizer {
        LabelNormalizer {
            transliterator
        }
    }

    /// Returns the label for a single grapheme.
    /// The label never starts with a digit and holds only ASCII letters, digits, and underscores.
    /// # Arguments
    /// * `grapheme` - the IPA grapheme to label
    pub fn normalize_label(&self, grapheme: &str) -> String {
        let xsampa = self.transliterator.transliterate(grapheme);
        let mut label = deunicode::deunicode(&xsampa);

        // tone digits (and the X-SAMPA vowels that are written as digits) cannot lead an identifier
        if label.starts_with(|c: char| c.is_ascii_digit()) {
            label.insert_str(0, TONE_PREFIX);
        }

        for (source, target) in UNSAFE_REPLACEMENTS.iter() {
            label = label.replace(source, target);
        }
        escape_non_word(&label)
    }
}
