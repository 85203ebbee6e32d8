//! Ordered threshold lookup shared by the size and concentration tables.

use super::reference_model::{ConcentrationAdjustment, SizeAdjustment};

/// One `(threshold, delta)` row of a bracket table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub threshold: f64,
    pub delta: f64,
}

/// Brackets sorted ascending by threshold.
///
/// A value maps to the first bracket whose threshold it does not exceed.
/// Values above every threshold fall back to the last (largest) bracket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    pub fn new(mut brackets: Vec<Bracket>) -> Self {
        brackets.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Self { brackets }
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Returns the delta for `value`, or `None` when the table is empty.
    pub fn lookup(&self, value: f64) -> Option<f64> {
        let last = self.brackets.last()?;
        if value.is_nan() {
            return Some(last.delta);
        }
        let idx = self.brackets.partition_point(|b| b.threshold < value);
        Some(self.brackets.get(idx).unwrap_or(last).delta)
    }
}

impl From<Vec<SizeAdjustment>> for BracketTable {
    fn from(rows: Vec<SizeAdjustment>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|r| Bracket {
                    threshold: r.rev_min_eur,
                    delta: r.delta_multiple,
                })
                .collect(),
        )
    }
}

impl From<Vec<ConcentrationAdjustment>> for BracketTable {
    fn from(rows: Vec<ConcentrationAdjustment>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|r| Bracket {
                    threshold: r.top3_min_pct,
                    delta: r.delta_multiple,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BracketTable {
        // deliberately unsorted
        BracketTable::new(vec![
            Bracket {
                threshold: 50.0,
                delta: -0.5,
            },
            Bracket {
                threshold: 10.0,
                delta: 0.2,
            },
            Bracket {
                threshold: 30.0,
                delta: 0.0,
            },
        ])
    }

    #[test]
    fn test_value_at_or_below_first_threshold() {
        assert_eq!(table().lookup(-5.0), Some(0.2));
        assert_eq!(table().lookup(10.0), Some(0.2));
    }

    #[test]
    fn test_value_inside_middle_bracket() {
        assert_eq!(table().lookup(10.01), Some(0.0));
        assert_eq!(table().lookup(30.0), Some(0.0));
    }

    #[test]
    fn test_value_in_last_bracket_and_beyond() {
        assert_eq!(table().lookup(49.0), Some(-0.5));
        assert_eq!(table().lookup(50.0), Some(-0.5));
        assert_eq!(table().lookup(1e12), Some(-0.5));
    }

    #[test]
    fn test_nan_falls_back_to_last_bracket() {
        assert_eq!(table().lookup(f64::NAN), Some(-0.5));
    }

    #[test]
    fn test_empty_table() {
        let empty = BracketTable::default();
        assert!(empty.is_empty());
        assert_eq!(empty.lookup(1.0), None);
    }

    #[test]
    fn test_from_size_rows() {
        let table = BracketTable::from(vec![
            SizeAdjustment {
                rev_min_eur: 5_000_000.0,
                delta_multiple: -1.0,
            },
            SizeAdjustment {
                rev_min_eur: 1_000_000.0,
                delta_multiple: -2.0,
            },
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(900_000.0), Some(-2.0));
        assert_eq!(table.lookup(2_000_000.0), Some(-1.0));
    }
}
