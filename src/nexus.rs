/*!
NEXUS serialization of a [`CharacterMatrix`].
The output holds a DATA block with the character state labels and the matrix, followed by an ASSUMPTIONS block with one charset per character.
*/

use std::fmt::Write;

use crate::config::NexusConfig;
use crate::matrix::{AssumptionRange, CharacterMatrix};

/// Builds the full NEXUS text.
/// # Arguments
/// * `matrix` - the matrix, providing taxa, column labels, rows, and the symbols it was built with
/// * `assumptions` - the charsets to declare, in order
/// * `config` - label padding; the FORMAT symbols always come from `matrix`
/// # Errors
/// * if formatting fails
pub fn build_nexus_string(matrix: &CharacterMatrix, assumptions: &[AssumptionRange], config: &NexusConfig) -> Result<String, Box<dyn std::error::Error>> {
    let taxon_len = matrix.taxa().iter()
        .map(|t| t.chars().count())
        .max()
        .unwrap_or(0);

    let mut nexus = String::new();
    writeln!(nexus, "#NEXUS")?;
    writeln!(nexus)?;
    writeln!(nexus, "BEGIN DATA;")?;
    writeln!(nexus, "\tDIMENSIONS NTAX={} NCHAR={};", matrix.taxa().len(), matrix.num_columns())?;
    writeln!(
        nexus,
        "\tFORMAT DATATYPE=STANDARD MISSING={} GAP={} SYMBOLS=\"{}\";",
        matrix.missing_symbol(), matrix.gap_symbol(), matrix.symbols()
    )?;
    writeln!(nexus, "\tCHARSTATELABELS")?;
    let labels: Vec<String> = matrix.column_labels().iter()
        .enumerate()
        .map(|(index, label)| format!("\t\t{} {}", index + 1, label))
        .collect();
    writeln!(nexus, "{}", labels.join(",\n"))?;
    writeln!(nexus, ";")?;
    writeln!(nexus, "MATRIX")?;
    let label_width = taxon_len + config.label_padding;
    for (taxon, row) in matrix.iter_rows() {
        writeln!(nexus, "{taxon:<label_width$} {row}")?;
    }
    writeln!(nexus, ";")?;
    writeln!(nexus, "END;")?;
    writeln!(nexus)?;

    writeln!(nexus, "BEGIN ASSUMPTIONS;")?;
    for range in assumptions.iter() {
        writeln!(nexus, "\tcharset {} = {}-{};", range.label(), range.start(), range.end())?;
    }
    writeln!(nexus, "END;")?;
    writeln!(nexus)?;

    Ok(nexus)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::NexusConfigBuilder;
    use crate::correspondence::CorrespondenceRow;
    use crate::matrix::MatrixBuilder;

    fn corr(doculect: &str, character: &str, phoneme: &str) -> CorrespondenceRow {
        CorrespondenceRow::new(doculect.to_string(), character.to_string(), phoneme.to_string())
    }

    #[test]
    fn test_nexus_layout() {
        let rows = vec![
            corr("LANG_A", "c1", "a"), corr("B", "c1", "b"),
            corr("LANG_A", "c2", "ZERO"), corr("B", "c2", "S")
        ];
        let config = NexusConfig::default();
        let (matrix, assumptions) = MatrixBuilder::with_config(config.clone()).build(&rows).unwrap();
        let nexus = build_nexus_string(&matrix, &assumptions, &config).unwrap();

        let expected = "#NEXUS\n\
            \n\
            BEGIN DATA;\n\
            \tDIMENSIONS NTAX=2 NCHAR=6;\n\
            \tFORMAT DATATYPE=STANDARD MISSING=? GAP=- SYMBOLS=\"01\";\n\
            \tCHARSTATELABELS\n\
            \t\t1 c1_ascertainment,\n\
            \t\t2 c1_a,\n\
            \t\t3 c1_b,\n\
            \t\t4 c2_ascertainment,\n\
            \t\t5 c2_S,\n\
            \t\t6 c2_ZERO\n\
            ;\n\
            MATRIX\n\
            B          101110\n\
            LANG_A     110101\n\
            ;\n\
            END;\n\
            \n\
            BEGIN ASSUMPTIONS;\n\
            \tcharset c1 = 1-3;\n\
            \tcharset c2 = 4-6;\n\
            END;\n\
            \n";
        assert_eq!(nexus, expected);
    }

    #[test]
    fn test_label_padding() {
        let rows = vec![corr("X", "c1", "a"), corr("YYY", "c1", "b")];
        let config = NexusConfigBuilder::default()
            .label_padding(0)
            .build().unwrap();
        let (matrix, assumptions) = MatrixBuilder::with_config(config.clone()).build(&rows).unwrap();
        let nexus = build_nexus_string(&matrix, &assumptions, &config).unwrap();
        assert!(nexus.contains("\nX   110\nYYY 101\n"));
    }

    #[test]
    fn test_format_follows_matrix() {
        let rows = vec![corr("X", "c1", "a"), corr("Y", "c2", "b")];
        let matrix_config = NexusConfigBuilder::default()
            .missing_symbol('N')
            .absent_symbol('A')
            .present_symbol('P')
            .build().unwrap();
        let (matrix, assumptions) = MatrixBuilder::with_config(matrix_config).build(&rows).unwrap();

        // serializing with a different config cannot change the declared alphabet
        let nexus = build_nexus_string(&matrix, &assumptions, &NexusConfig::default()).unwrap();
        assert!(nexus.contains("\tFORMAT DATATYPE=STANDARD MISSING=N GAP=- SYMBOLS=\"AP\";\n"));
        assert!(nexus.contains("\nX     PPNN\nY     NNPP\n"));
    }

    #[test]
    fn test_declared_counts_match() {
        let rows: Vec<CorrespondenceRow> = (0..30)
            .map(|i| corr(&format!("L{}", i % 4), &format!("c{}", i % 7), ["a", "b", "c", "d", "e"][i % 5]))
            .collect();
        let config = NexusConfig::default();
        let (matrix, assumptions) = MatrixBuilder::with_config(config.clone()).build(&rows).unwrap();
        let nexus = build_nexus_string(&matrix, &assumptions, &config).unwrap();

        let label_lines = nexus.lines().filter(|l| l.starts_with("\t\t")).count();
        assert_eq!(label_lines, matrix.num_columns());
        assert!(nexus.contains(&format!("NCHAR={};", matrix.num_columns())));
        assert_eq!(nexus.lines().filter(|l| l.starts_with("\tcharset")).count(), 7);

        // repeated runs are byte-identical
        let (matrix2, assumptions2) = MatrixBuilder::with_config(config.clone()).build(&rows).unwrap();
        assert_eq!(build_nexus_string(&matrix2, &assumptions2, &config).unwrap(), nexus);
    }
}
