//! Column width solver.
//!
//! Columns whose natural width (content plus padding) is below an even share
//! of the available space keep that natural width. The remaining space is
//! split between the other columns in proportion to their natural width, so
//! the table lands on the requested total width give or take rounding.

use num_rational::Ratio;

/// Space taken by everything that is not a column.
#[must_use]
pub fn frame_overhead(column_count: usize, separator_width: usize, border_widths: (usize, usize)) -> usize {
    if column_count == 0 {
        return 0;
    }
    border_widths.0 + border_widths.1 + (column_count - 1) * separator_width
}

/// Total width of a table with the given column widths.
#[must_use]
pub fn table_width(widths: &[usize], separator_width: usize, border_widths: (usize, usize)) -> usize {
    if widths.is_empty() {
        return 0;
    }
    widths.iter().sum::<usize>() + frame_overhead(widths.len(), separator_width, border_widths)
}

/// Compute one width per column.
///
/// `content_widths[i]` is the widest display width found in column `i`,
/// `padding[i]` its (left, right) padding. Every returned width includes the
/// padding. A scaled column never drops below its padding plus one cell, and
/// `max_table_width` is raised as far as needed to allow that.
#[must_use]
pub fn solve(
    content_widths: &[usize],
    padding: &[(usize, usize)],
    max_table_width: usize,
    separator_width: usize,
    border_widths: (usize, usize),
) -> Vec<usize> {
    let count = content_widths.len();
    if count == 0 {
        return Vec::new();
    }

    let pads: Vec<usize> = (0..count)
        .map(|i| padding.get(i).map_or(0, |(left, right)| left + right))
        .collect();
    let overhead = frame_overhead(count, separator_width, border_widths);
    let floor_total = pads.iter().sum::<usize>() + count;
    let desired = max_table_width.saturating_sub(overhead).max(floor_total);

    let needs: Vec<usize> = content_widths
        .iter()
        .zip(&pads)
        .map(|(content, pad)| content + pad)
        .collect();

    // Below an even share of the desired width.
    let is_small = |need: usize| need * count < desired;

    let small_total: usize = needs.iter().copied().filter(|&n| is_small(n)).sum();
    let large_total: usize = needs.iter().copied().filter(|&n| !is_small(n)).sum();
    if large_total == 0 {
        log::debug!("all {count} columns fit their share of {desired}: {needs:?}");
        return needs;
    }

    let remaining = desired - small_total;
    let widths: Vec<usize> = needs
        .iter()
        .zip(&pads)
        .map(|(&need, &pad)| {
            if is_small(need) {
                need
            } else {
                let scaled = Ratio::new(need * remaining, large_total).round().to_integer();
                scaled.max(pad + 1)
            }
        })
        .collect();

    log::debug!(
        "solved column widths {widths:?} from natural widths {needs:?} (desired {desired}, overhead {overhead})"
    );
    widths
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAD_1: (usize, usize) = (1, 1);

    #[test]
    fn test_empty() {
        assert!(solve(&[], &[], 80, 1, (1, 1)).is_empty());
        assert_eq!(table_width(&[], 1, (1, 1)), 0);
    }

    #[test]
    fn test_all_small_keep_natural_width() {
        let widths = solve(&[8, 4, 6], &[PAD_1; 3], 80, 1, (1, 1));
        assert_eq!(widths, vec![10, 6, 8]);
        assert_eq!(table_width(&widths, 1, (1, 1)), 28);
    }

    #[test]
    fn test_large_column_shrinks_to_budget() {
        let widths = solve(&[24, 1, 4], &[PAD_1; 3], 30, 1, (1, 1));
        assert_eq!(widths, vec![17, 3, 6]);
        assert_eq!(table_width(&widths, 1, (1, 1)), 30);
    }

    #[test]
    fn test_large_column_grows_to_budget() {
        let widths = solve(&[50, 1], &[PAD_1; 2], 80, 1, (1, 1));
        assert_eq!(widths, vec![74, 3]);
        assert_eq!(table_width(&widths, 1, (1, 1)), 80);
    }

    #[test]
    fn test_proportional_split() {
        let widths = solve(&[30, 10], &[(0, 0); 2], 22, 0, (1, 1));
        // Both are at or above an even share of 20
        assert_eq!(widths, vec![15, 5]);
    }

    #[test]
    fn test_floor_keeps_one_content_cell() {
        let widths = solve(&[100, 1, 1], &[(2, 2), (0, 0), (0, 0)], 10, 1, (1, 1));
        assert!(widths[0] > 4, "padding floor violated: {widths:?}");
    }

    #[test]
    fn test_max_width_raised_to_floor() {
        let widths = solve(&[5, 5], &[PAD_1; 2], 3, 1, (1, 1));
        assert_eq!(widths, vec![3, 3]);
    }

    #[test]
    fn test_sum_close_to_desired() {
        let content = [13, 27, 8, 41, 2];
        let widths = solve(&content, &[PAD_1; 5], 60, 1, (1, 1));
        let desired = 60 - frame_overhead(5, 1, (1, 1));
        let total: usize = widths.iter().sum();
        assert!(total.abs_diff(desired) <= content.len(), "{widths:?}");
    }
}
