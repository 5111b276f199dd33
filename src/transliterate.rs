/*!
Minimum-cost transliteration through a [`SymbolTable`].
The input is segmented left to right with a lattice: every char position holds the cheapest way to reach it, either by passing the previous char through untranslated or by matching a table key that ends there.
Untranslatable chars are expensive and matches are cheap, so the cheapest path first minimizes the number of untranslated chars and then the number of segments.

# Example usage
```rust
use phonechars::transliterate::Transliterator;

let transliterator = Transliterator::ipa_to_xsampa();
assert_eq!(transliterator.transliterate("tʃaŋɡ"), "tSaN_g");

// unknown symbols pass through as-is
assert_eq!(transliterator.transliterate("a1"), "a1");
```
*/

use log::trace;

use crate::symbol_table::SymbolTable;

/// Path cost of a single matched table key
pub const MATCH_COST: usize = 1;
/// Path cost of a single char that could not be translated
pub const OOV_COST: usize = 10;

/// One segment of a transliteration result
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslatedToken {
    /// The output text for this segment
    text: String,
    /// If false, `text` is a raw input char that was not found in the table
    translated: bool
}

impl TranslatedToken {
    // Getters
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn translated(&self) -> bool {
        self.translated
    }
}

/// A single lattice position
#[derive(Clone, Copy, Debug)]
struct LatticeNode<'a> {
    /// Cheapest known path cost to reach this position
    cost: usize,
    /// The position this best path came from
    predecessor: usize,
    /// Output text for the segment from `predecessor` to here
    payload: &'a str,
    /// Whether `payload` came from the table
    translated: bool
}

/// Converts strings through an owned [`SymbolTable`].
/// The transliterator never mutates its table, so a single instance can be shared by reference.
#[derive(Clone, Debug, Default)]
pub struct Transliterator {
    table: SymbolTable
}

impl Transliterator {
    /// Wraps an existing table.
    pub fn new(table: SymbolTable) -> Transliterator {
        Transliterator {
            table
        }
    }

    /// Transliterator for IPA into X-SAMPA
    pub fn ipa_to_xsampa() -> Transliterator {
        Transliterator::new(SymbolTable::ipa_to_xsampa())
    }

    /// Transliterator for X-SAMPA into IPA
    pub fn xsampa_to_ipa() -> Transliterator {
        Transliterator::new(SymbolTable::xsampa_to_ipa())
    }

    /// Transliterates a full string, returning the concatenated output.
    /// This never fails; chars that are not covered by the table are copied through.
    /// # Arguments
    /// * `input` - the string to convert
    pub fn transliterate(&self, input: &str) -> String {
        self.best_path(input).iter()
            .map(|node| node.payload)
            .collect()
    }

    /// Same as `transliterate`, but keeps the segmentation and marks which segments came from the table.
    /// # Arguments
    /// * `input` - the string to convert
    pub fn transliterate_tokens(&self, input: &str) -> Vec<TranslatedToken> {
        self.best_path(input).into_iter()
            .map(|node| TranslatedToken {
                text: node.payload.to_string(),
                translated: node.translated
            })
            .collect()
    }

    /// Builds the lattice for `input` and returns the nodes on the cheapest path, in input order.
    fn best_path<'a>(&'a self, input: &'a str) -> Vec<LatticeNode<'a>> {
        // byte offset of every char boundary, so we can slice by char positions
        let boundaries: Vec<usize> = input.char_indices()
            .map(|(offset, _c)| offset)
            .chain(std::iter::once(input.len()))
            .collect();
        let num_chars = boundaries.len() - 1;
        let max_symbol_length = self.table.max_symbol_length();

        let mut lattice: Vec<LatticeNode> = Vec::with_capacity(num_chars + 1);
        lattice.push(LatticeNode {
            cost: 0,
            predecessor: 0,
            payload: "",
            translated: true
        });

        for n in 1..(num_chars + 1) {
            // assume the previous char is untranslatable until we find something better
            let mut best = LatticeNode {
                cost: lattice[n - 1].cost + OOV_COST,
                predecessor: n - 1,
                payload: &input[boundaries[n - 1]..boundaries[n]],
                translated: false
            };

            // shorter keys get checked first and only a strictly better cost replaces them
            for m in 1..(n.min(max_symbol_length) + 1) {
                let candidate = &input[boundaries[n - m]..boundaries[n]];
                if let Some(target) = self.table.get(candidate) {
                    let cost = lattice[n - m].cost + MATCH_COST;
                    if cost < best.cost {
                        best = LatticeNode {
                            cost,
                            predecessor: n - m,
                            payload: target,
                            translated: true
                        };
                    }
                }
            }

            lattice.push(best);
        }

        // trace back from the end
        let mut path = vec![];
        let mut n = num_chars;
        while n > 0 {
            let node = lattice[n];
            path.push(node);
            n = node.predecessor;
        }
        path.reverse();

        trace!("transliterate {:?}: cost {}, {} segments", input, lattice[num_chars].cost, path.len());
        path
    }
}
