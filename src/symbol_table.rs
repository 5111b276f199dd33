/*!
Static bidirectional dictionary between IPA and X-SAMPA.
The X-SAMPA side is the source of truth; the IPA to X-SAMPA direction is derived by inverting it.
Diacritics are stored with a `◌` placeholder carrier that gets stripped when a table is built, and their X-SAMPA form is prefixed with `_`.
*/

use rustc_hash::FxHashMap as HashMap;

/// Carrier symbol used to write combining diacritics in the raw tables
pub const PLACEHOLDER: char = '◌';
/// Prefix marking an X-SAMPA diacritic
pub const DIACRITIC_PREFIX: &str = "_";

/// Base X-SAMPA symbols and their IPA equivalent
static XSAMPA_SYMBOLS: &[(&str, &str)] = &[
    ("#", "#"), ("=", "◌̩"), (">", "◌ʼ"), ("`", "◌˞"),
    ("~", "◌̃"), ("a", "a"), ("b", "b"), ("b_<", "ɓ"),
    ("c", "c"), ("d", "d"), ("d`", "ɖ"), ("d_<", "ɗ"),
    ("e", "e"), ("f", "f"), ("g", "ɡ"), ("g_<", "ɠ"),
    ("h", "h"), ("h\\", "ɦ"), ("i", "i"), ("j", "j"),
    ("j\\", "ʝ"), ("k", "k"), ("l", "l"), ("l`", "ɭ"),
    ("l\\", "ɺ"), ("m", "m"), ("n", "n"), ("n_d", "nd"),
    ("n`", "ɳ"), ("o", "o"), ("p", "p"), ("p\\", "ɸ"),
    ("p_<", "ɓ̥"), ("q", "q"), ("r", "r"), ("r`", "ɽ"),
    ("r\\", "ɹ"), ("r\\`", "ɻ"), ("s", "s"), ("s`", "ʂ"),
    ("s\\", "ɕ"), ("t", "t"), ("t`", "ʈ"), ("u", "u"),
    ("v", "v"), ("v\\", "ʋ"), ("w", "w"), ("x", "x"),
    ("x\\", "ɧ"), ("y", "y"), ("z", "z"), ("z`", "ʐ"),
    ("z\\", "ʑ"), ("A", "ɑ"), ("B", "β"), ("B\\", "ʙ"),
    ("C", "ç"), ("D", "ð"), ("E", "ɛ"), ("F", "ɱ"),
    ("G", "ɣ"), ("G\\", "ɢ"), ("G\\_<", "ʛ"), ("H", "ɥ"),
    ("H\\", "ʜ"), ("I", "ɪ"), ("I\\", "ɪ̈ "), ("J", "ɲ"),
    ("J\\", "ɟ"), ("J\\_<", "ʄ"), ("K", "ɬ"), ("K\\", "ɮ"),
    ("L", "ʎ"), ("L\\", "ʟ"), ("M", "ɯ"), ("M\\", "ɰ"),
    ("N", "ŋ"), ("N_g", "ŋɡ"), ("N\\", "ɴ"), ("O", "ɔ"),
    ("O\\", "ʘ"), ("P", "ʋ"), ("Q", "ɒ"), ("R", "ʁ"),
    ("R\\", "ʀ"), ("S", "ʃ"), ("T", "θ"), ("U", "ʊ"),
    ("U\\", "ʊ̈ "), ("V", "ʌ"), ("W", "ʍ"), ("X", "χ"),
    ("X\\", "ħ"), ("Y", "ʏ"), ("Z", "ʒ"), (".", "."),
    ("\"", "ˈ"), ("%", "ˌ"), ("'", "ʲ"), (":", "ː"),
    (":\\", "ˑ"), ("-", ""), ("@", "ə"), ("@\\", "ɘ"),
    ("{", "æ"), ("}", "ʉ"), ("1", "ɨ"), ("2", "ø"),
    ("3", "ɜ"), ("3\\", "ɞ"), ("4", "ɾ"), ("5", "ɫ"),
    ("6", "ɐ"), ("7", "ɤ"), ("8", "ɵ"), ("9", "œ"),
    ("&", "ɶ"), ("?", "ʔ"), ("?\\", "ʕ"), ("*", ""),
    ("/", ""), ("<\\", "ʢ"), (">\\", "ʡ"), ("^", "ꜛ"),
    ("!", "ꜜ"), ("!\\", "ǃ"), ("|", "|"), ("|\\", "ǀ"),
    ("||", "‖"), ("|\\|\\", "ǁ"), ("=\\", "ǂ"), ("-\\", "‿"),
];

/// X-SAMPA diacritics (without the `_` prefix) and their IPA equivalent
static XSAMPA_DIACRITICS: &[(&str, &str)] = &[
    ("\"", "◌̈"), ("+", "◌̟"), ("-", "◌̠"), ("/", "◌̌"),
    ("0", "◌̥"), ("=", "◌̩"), (">", "◌ʼ"), ("?\\", "◌ˤ"),
    ("\\", "◌̂"), ("^", "◌̯"), ("}", "◌̚"), ("`", "◌˞"),
    ("~", "◌̃"), ("A", "◌̘"), ("a", "◌̺"), ("B", "◌̏"),
    ("B_L", "◌᷅"), ("c", "◌̜"), ("d", "◌̪"), ("e", "◌̴"),
    ("F", "◌̂"), ("G", "◌ˠ"), ("H", "◌́"), ("H_T", "◌᷄"),
    ("h", "◌ʰ"), ("j", "◌ʲ"), ("k", "◌̰"), ("L", "◌̀"),
    ("l", "◌ˡ"), ("M", "◌̄"), ("m", "◌̻"), ("N", "◌̼"),
    ("n", "◌ⁿ"), ("O", "◌̹"), ("o", "◌̞"), ("q", "◌̙"),
    ("R", "◌̌"), ("R_F", "◌᷈"), ("r", "◌̝"), ("T", "◌̋"),
    ("t", "◌̤"), ("v", "◌̬"), ("w", "◌ʷ"), ("X", "◌̆"),
    ("x", "◌̽"), ("1", "˥"), ("2", "˦"), ("3", "˧"),
    ("4", "˨"), ("5", "˩"),
];

/// An immutable mapping from source tokens to target tokens.
/// Keys are never empty, and `max_symbol_length` is the length in chars of the longest key, used to bound lookahead.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    /// Source token to target token
    map: HashMap<String, String>,
    /// Length of the longest key, in chars
    max_symbol_length: usize
}

impl SymbolTable {
    /// Builds a table from ordered pairs; later pairs replace earlier ones with the same key and empty keys are dropped.
    /// # Arguments
    /// * `pairs` - the (source, target) pairs in priority order
    pub fn from_pairs<I, K, V>(pairs: I) -> SymbolTable
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>
    {
        let mut map: HashMap<String, String> = Default::default();
        for (key, value) in pairs.into_iter() {
            let key = key.into();
            if key.is_empty() {
                // X-SAMPA has a few symbols with no IPA rendering, they cannot be matched in reverse
                continue;
            }
            map.insert(key, value.into());
        }

        let max_symbol_length = map.keys()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);

        SymbolTable {
            map,
            max_symbol_length
        }
    }

    /// Table for converting X-SAMPA into IPA, diacritics included.
    pub fn xsampa_to_ipa() -> SymbolTable {
        SymbolTable::from_pairs(xsampa_pairs())
    }

    /// Table for converting IPA into X-SAMPA.
    /// When several X-SAMPA symbols share an IPA form, the one listed last wins, so diacritics take precedence over base symbols.
    pub fn ipa_to_xsampa() -> SymbolTable {
        SymbolTable::from_pairs(xsampa_pairs().map(|(xsampa, ipa)| (ipa, xsampa)))
    }

    /// Returns the target token for `key`, if it is in the table.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|v| v.as_str())
    }

    // getters
    pub fn max_symbol_length(&self) -> usize {
        self.max_symbol_length
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// All X-SAMPA to IPA pairs in table order, base symbols first, with diacritics prefixed and placeholders removed.
fn xsampa_pairs() -> impl Iterator<Item = (String, String)> {
    let base = XSAMPA_SYMBOLS.iter()
        .map(|&(xsampa, ipa)| (xsampa.to_string(), ipa.replace(PLACEHOLDER, "")));
    let diacritics = XSAMPA_DIACRITICS.iter()
        .map(|&(xsampa, ipa)| (format!("{DIACRITIC_PREFIX}{xsampa}"), ipa.replace(PLACEHOLDER, "")));
    base.chain(diacritics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xsampa_to_ipa() {
        let table = SymbolTable::xsampa_to_ipa();
        assert_eq!(table.len(), XSAMPA_SYMBOLS.len() + XSAMPA_DIACRITICS.len());
        assert_eq!(table.get("S"), Some("ʃ"));
        assert_eq!(table.get("N_g"), Some("ŋɡ"));
        // diacritics lose their placeholder
        assert_eq!(table.get("_h"), Some("ʰ"));
        assert_eq!(table.get("~"), Some("\u{303}"));
        // symbols without an IPA rendering map to nothing
        assert_eq!(table.get("-"), Some(""));
        assert_eq!(table.max_symbol_length(), 4);
    }

    #[test]
    fn test_ipa_to_xsampa() {
        let table = SymbolTable::ipa_to_xsampa();
        assert!(!table.is_empty());
        assert_eq!(table.get(""), None);
        assert_eq!(table.get("ʃ"), Some("S"));
        assert_eq!(table.get("ŋɡ"), Some("N_g"));
        assert_eq!(table.get("ʰ"), Some("_h"));
        // shared IPA forms resolve to the last listed X-SAMPA symbol
        assert_eq!(table.get("ʲ"), Some("_j"));
        assert_eq!(table.get("ʋ"), Some("P"));
        assert_eq!(table.get("\u{303}"), Some("_~"));
        assert_eq!(table.max_symbol_length(), 3);
    }

    #[test]
    fn test_from_pairs_override() {
        let table = SymbolTable::from_pairs([("ab", "1"), ("", "x"), ("ab", "2"), ("c", "3")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("ab"), Some("2"));
        assert_eq!(table.max_symbol_length(), 2);

        let empty = SymbolTable::from_pairs(Vec::<(String, String)>::new());
        assert!(empty.is_empty());
        assert_eq!(empty.max_symbol_length(), 0);
    }
}
