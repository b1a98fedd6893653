//! # Column Budget
//!
//! Colspans for the columns of one page head. The column with the longest
//! label takes `budget - (n - 1)` units; every other column takes
//! `budget - budget - (n - 1)` clamped to 1. The second term cancels the
//! budget, so in practice every other column is 1 unit wide. Rendered
//! quotations depend on these exact spans, so the formula is kept as is.

/// Index of the column with the longest label. Ties go to the leftmost.
pub fn widest_column<S: AsRef<str>>(columns: &[S]) -> usize {
    let mut max_idx = 0;
    for (i, column) in columns.iter().enumerate() {
        if column.as_ref().chars().count() > columns[max_idx].as_ref().chars().count() {
            max_idx = i;
        }
    }
    max_idx
}

/// Colspan of each column, in column order. Every width is at least 1.
pub fn column_widths<S: AsRef<str>>(unit_budget: usize, columns: &[S]) -> Vec<usize> {
    if columns.is_empty() {
        return Vec::new();
    }

    let budget = unit_budget as i64;
    let others = columns.len() as i64 - 1;
    let widest = widest_column(columns);

    let clamp = |span: i64| if span <= 0 { 1 } else { span as usize };
    let widest_span = clamp(budget - others);
    #[allow(clippy::eq_op)]
    let other_span = clamp(budget - budget - others);

    (0..columns.len())
        .map(|i| if i == widest { widest_span } else { other_span })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widest_label_gets_the_remaining_budget() {
        let widths = column_widths(9, &["itemName", "unit", "sup1", "sup2", "sup3"]);
        assert_eq!(widths, vec![5, 1, 1, 1, 1]);
    }

    #[test]
    fn first_of_equal_labels_wins() {
        assert_eq!(widest_column(&["abc", "xyz", "ab"]), 0);
        assert_eq!(column_widths(9, &["abc", "xyz", "ab"]), vec![7, 1, 1]);
    }

    #[test]
    fn single_column_takes_whole_budget() {
        assert_eq!(column_widths(12, &["description"]), vec![12]);
    }

    #[test]
    fn too_many_columns_clamp_to_one() {
        let cols = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "kk"];
        let widths = column_widths(9, &cols);
        assert!(widths.iter().all(|&w| w == 1));
        assert_eq!(widths.len(), cols.len());
    }

    #[test]
    fn zero_budget_still_positive() {
        assert_eq!(column_widths(0, &["a"]), vec![1]);
    }

    #[test]
    fn empty_columns_give_no_widths() {
        assert!(column_widths::<&str>(9, &[]).is_empty());
    }
}
