//! Learning progress summary.

use crate::model::term::Term;

/// Understood/total counts with a rounded percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub understood: usize,
    /// `understood / total` as a percentage rounded to nearest; 0 when empty.
    pub percent: u8,
}

impl Progress {
    pub fn of(terms: &[Term]) -> Self {
        let total = terms.len();
        let understood = terms.iter().filter(|term| term.understood).count();
        let percent = if total == 0 {
            0
        } else {
            ((understood as f64 / total as f64) * 100.0).round() as u8
        };

        Self {
            total,
            understood,
            percent,
        }
    }
}
