
use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};

use crate::char_row::AlignedCharRow;

/// Segments sampled for generated words, (segment, structure class)
const SEGMENTS: [(&str, &str); 16] = [
    ("p", "c"), ("t", "c"), ("k", "c"), ("b", "c"),
    ("d", "c"), ("ɡ", "c"), ("s", "c"), ("ʃ", "c"),
    ("m", "c"), ("ŋ", "c"), ("tʰ", "c"), ("ɸ", "c"),
    ("a", "v"), ("i", "v"), ("aː", "v"), ("ə", "v")
];

/// Creates a synthetic set of aligned rows with correspondence patterns already assigned
/// # Arguments
/// * `num_doculects` - the number of languages, every language has a form for every cognate set
/// * `num_cognates` - the number of cognate sets
/// * `word_len` - the number of alignment slots per form
/// * `change_rate` - chance of a slot differing from the proto-form, split evenly between substitution and loss
pub fn generate_test(num_doculects: usize, num_cognates: usize, word_len: usize, change_rate: f64) -> Vec<AlignedCharRow> {
    assert!(num_doculects > 1);
    assert!(word_len > 0);
    assert!((0.0..=1.0).contains(&change_rate));

    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let segment_distribution = Uniform::new(0, SEGMENTS.len());
    let offset_distribution = Uniform::new(1, SEGMENTS.len());
    let change_distribution = Uniform::new(0.0, 1.0);
    let change_type_distribution = Uniform::new(0, 2);

    let mut rows = vec![];
    for cognate in 1..=num_cognates {
        let proto: Vec<usize> = (0..word_len)
            .map(|_i| rng.sample(segment_distribution))
            .collect();

        for doculect in 0..num_doculects {
            // None is a lost segment
            let slots: Vec<Option<usize>> = proto.iter()
                .map(|&p| {
                    if rng.sample(change_distribution) < change_rate {
                        match rng.sample(change_type_distribution) {
                            0 => Some((p + rng.sample(offset_distribution)) % SEGMENTS.len()),
                            1 => None,
                            _ => panic!("no impl")
                        }
                    } else {
                        Some(p)
                    }
                })
                .collect();

            let present: Vec<&str> = slots.iter()
                .filter_map(|s| s.map(|i| SEGMENTS[i].0))
                .collect();
            let alignment: Vec<&str> = slots.iter()
                .map(|s| s.map(|i| SEGMENTS[i].0).unwrap_or("-"))
                .collect();
            let structure: Vec<&str> = slots.iter()
                .zip(proto.iter())
                .map(|(s, &p)| SEGMENTS[s.unwrap_or(p)].1)
                .collect();
            let patterns: Vec<String> = proto.iter()
                .enumerate()
                .map(|(position, &p)| format!("{}-{}/{}", cognate, position + 1, SEGMENTS[p].0))
                .collect();

            let row = AlignedCharRow {
                id: format!("{}", rows.len() + 1),
                doculect: format!("LANG_{doculect:02}"),
                concept: format!("CONCEPT_{cognate}"),
                ipa: present.concat(),
                tokens: present.join(" "),
                cogid: format!("{cognate}"),
                alignment: alignment.join(" "),
                structure: structure.join(" "),
                patterns: patterns.join(" ")
            };
            rows.push(row);
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::correspondence::CorrespondenceExtractor;
    use crate::label::LabelNormalizer;

    #[test]
    fn test_generate_shape() {
        let rows = generate_test(4, 5, 6, 0.2);
        assert_eq!(rows.len(), 20);
        for row in rows.iter() {
            assert_eq!(row.alignment_slots().count(), 6);
            assert_eq!(row.pattern_labels().count(), 6);
            assert_eq!(row.structure.split_whitespace().count(), 6);
        }
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[19].doculect, "LANG_03");
        assert_eq!(rows[19].cogid, "5");

        // seeded, so repeated calls match
        assert_eq!(generate_test(4, 5, 6, 0.2), rows);
    }

    #[test]
    fn test_no_change() {
        let rows = generate_test(3, 4, 5, 0.0);
        let normalizer = LabelNormalizer::default();
        let extractor = CorrespondenceExtractor::new(&normalizer);
        // every language matches the proto-form, so no pattern has two distinct values
        assert!(extractor.extract(&rows).unwrap().is_empty());
    }

    #[test]
    fn test_changes_extract() {
        let rows = generate_test(5, 10, 4, 0.3);
        let normalizer = LabelNormalizer::default();
        let extractor = CorrespondenceExtractor::new(&normalizer);
        let correspondences = extractor.extract(&rows).unwrap();
        assert!(!correspondences.is_empty());
        // a kept pattern has an entry for every language
        assert_eq!(correspondences.len() % 5, 0);
    }
}
