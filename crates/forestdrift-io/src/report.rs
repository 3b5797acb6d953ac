//! Agreement of the produced label columns with the reference and ground truth.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::table::{HARD_VOTE_COLUMN, SOFT_VOTE_COLUMN, SampleTable, TRUTH_COLUMN};

/// How often one column matches another, compared cell-by-cell as strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnAgreement {
    /// The produced column.
    pub column: String,
    /// The column it is compared against.
    pub against: String,
    /// Number of rows with identical cells.
    pub matches: usize,
    /// Number of rows compared.
    pub total: usize,
    /// `matches / total` as a percentage, 0 for an empty table.
    pub percent: f64,
}

impl ColumnAgreement {
    fn compare(table: &SampleTable, column: &str, against: &str) -> Option<Self> {
        let produced = table.column(column)?;
        let reference = table.column(against)?;
        let matches = produced
            .iter()
            .zip(&reference)
            .filter(|(a, b)| a == b)
            .count();
        let total = table.n_rows();
        let percent = if total == 0 {
            0.0
        } else {
            matches as f64 * 100.0 / total as f64
        };
        Some(Self {
            column: column.to_string(),
            against: against.to_string(),
            matches,
            total,
            percent,
        })
    }
}

impl fmt::Display for ColumnAgreement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<14} vs {:<12}: {} / {} correct ({:.2}%)",
            self.column, self.against, self.matches, self.total, self.percent
        )
    }
}

/// Summary of a scored table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgreementReport {
    /// Name of the reference column.
    pub reference: String,
    /// Number of rows in the table.
    pub n_rows: usize,
    /// `go_label` and `fixed_go_label` against the reference column.
    pub vs_reference: Vec<ColumnAgreement>,
    /// The same columns against `label`, when the table has one.
    pub vs_truth: Vec<ColumnAgreement>,
    /// Rows where `go_label` and `fixed_go_label` differ.
    pub n_policy_disagreements: Option<usize>,
}

impl AgreementReport {
    /// Build the report for `table` against the `reference` column.
    ///
    /// Returns `None`, after logging a warning, when the table has no
    /// `reference` column.
    #[must_use]
    pub fn from_table(table: &SampleTable, reference: &str) -> Option<Self> {
        if table.column_index(reference).is_none() {
            warn!(reference, "no reference column found for comparison");
            return None;
        }

        let produced = [HARD_VOTE_COLUMN, SOFT_VOTE_COLUMN];
        let vs_reference = produced
            .iter()
            .filter_map(|c| ColumnAgreement::compare(table, c, reference))
            .collect();
        let vs_truth = if reference == TRUTH_COLUMN {
            Vec::new()
        } else {
            produced
                .iter()
                .filter_map(|c| ColumnAgreement::compare(table, c, TRUTH_COLUMN))
                .collect()
        };
        let n_policy_disagreements = ColumnAgreement::compare(table, HARD_VOTE_COLUMN, SOFT_VOTE_COLUMN)
            .map(|a| a.total - a.matches);

        Some(Self {
            reference: reference.to_string(),
            n_rows: table.n_rows(),
            vs_reference,
            vs_truth,
            n_policy_disagreements,
        })
    }
}

impl fmt::Display for AgreementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Summary report (reference: {}, {} rows)",
            self.reference, self.n_rows
        )?;
        for entry in self.vs_reference.iter().chain(&self.vs_truth) {
            writeln!(f, "  {entry}")?;
        }
        if let Some(n) = self.n_policy_disagreements {
            writeln!(f, "  policies disagree on {n} / {} rows", self.n_rows)?;
        }
        Ok(())
    }
}
