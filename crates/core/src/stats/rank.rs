//! Ranking helpers shared by every leaderboard.
//!
//! Leaderboards sort by a metric, break exact ties with a secondary key and
//! truncate. Keeping that in one place keeps tie behaviour identical across
//! boards.

use std::cmp::Ordering;

/// Direction for the primary metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Largest metric first ("top" boards).
    #[default]
    Descending,
    /// Smallest metric first ("bottom" boards, fastest fulfillment).
    Ascending,
}

impl SortDirection {
    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Descending => ordering.reverse(),
            Self::Ascending => ordering,
        }
    }
}

/// Sort `records` by `metric` in `direction`, break exact ties with
/// `tie_break`, and keep the first `n`.
fn sort_and_truncate<T, M, F, C>(
    mut records: Vec<T>,
    n: usize,
    direction: SortDirection,
    metric: F,
    tie_break: C,
) -> Vec<T>
where
    M: Ord,
    F: Fn(&T) -> M,
    C: Fn(&T, &T) -> Ordering,
{
    records.sort_by(|a, b| {
        direction
            .apply(metric(a).cmp(&metric(b)))
            .then_with(|| tie_break(a, b))
    });
    records.truncate(n);
    records
}

/// Sort `records` by `metric` in `direction`, break exact ties by ascending
/// `tie_break`, and keep the first `n`.
pub fn rank_by<T, M, K, F, G>(
    records: Vec<T>,
    n: usize,
    direction: SortDirection,
    metric: F,
    tie_break: G,
) -> Vec<T>
where
    M: Ord,
    K: Ord,
    F: Fn(&T) -> M,
    G: Fn(&T) -> K,
{
    sort_and_truncate(records, n, direction, metric, |a, b| {
        tie_break(a).cmp(&tie_break(b))
    })
}

/// Top-N with ties broken by ascending name.
///
/// Names compare case-sensitively in plain string order, so `"B"` sorts
/// before `"a"`.
pub fn top_n_with_alpha_tiebreak<T, M, F, N>(records: Vec<T>, n: usize, metric: F, name: N) -> Vec<T>
where
    M: Ord,
    F: Fn(&T) -> M,
    N: Fn(&T) -> &str,
{
    rank_with_alpha_tiebreak(records, n, SortDirection::Descending, metric, name)
}

/// Like [`top_n_with_alpha_tiebreak`] with an explicit direction.
///
/// Names are compared borrowed, which a [`rank_by`] key cannot express.
pub fn rank_with_alpha_tiebreak<T, M, F, N>(
    records: Vec<T>,
    n: usize,
    direction: SortDirection,
    metric: F,
    name: N,
) -> Vec<T>
where
    M: Ord,
    F: Fn(&T) -> M,
    N: Fn(&T) -> &str,
{
    sort_and_truncate(records, n, direction, metric, |a, b| name(a).cmp(name(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        name: &'static str,
        quantity: u64,
    }

    fn row(name: &'static str, quantity: u64) -> Row {
        Row { name, quantity }
    }

    fn names(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_ties_break_alphabetically() {
        let rows = vec![row("Zed", 50), row("Amy", 10), row("Bob", 50)];
        let ranked = top_n_with_alpha_tiebreak(rows, 10, |r| r.quantity, |r| r.name);
        assert_eq!(names(&ranked), vec!["Bob", "Zed", "Amy"]);
    }

    #[test]
    fn test_truncates_after_sorting() {
        let rows = vec![row("c", 1), row("b", 3), row("a", 2), row("d", 4)];
        let ranked = top_n_with_alpha_tiebreak(rows, 2, |r| r.quantity, |r| r.name);
        assert_eq!(names(&ranked), vec!["d", "b"]);
    }

    #[test]
    fn test_tiebreak_is_case_sensitive() {
        let rows = vec![row("apple", 1), row("Banana", 1)];
        let ranked = top_n_with_alpha_tiebreak(rows, 2, |r| r.quantity, |r| r.name);
        assert_eq!(names(&ranked), vec!["Banana", "apple"]);
    }

    #[test]
    fn test_ascending_keeps_alpha_tiebreak() {
        let rows = vec![row("b", 1), row("c", 5), row("a", 1)];
        let ranked =
            rank_with_alpha_tiebreak(rows, 3, SortDirection::Ascending, |r| r.quantity, |r| r.name);
        assert_eq!(names(&ranked), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rank_by_custom_tiebreak() {
        let rows = vec![(3_i64, 8_u64), (1, 8), (2, 9)];
        let ranked = rank_by(rows, 3, SortDirection::Descending, |r| r.1, |r| r.0);
        assert_eq!(ranked, vec![(2, 9), (1, 8), (3, 8)]);
    }

    #[test]
    fn test_alpha_tiebreak_agrees_with_owned_name_key() {
        let rows = vec![
            row("Moss", 4),
            row("alder", 7),
            row("Birch", 4),
            row("Ash", 7),
            row("Cedar", 1),
        ];
        for direction in [SortDirection::Descending, SortDirection::Ascending] {
            let borrowed =
                rank_with_alpha_tiebreak(rows.clone(), 4, direction, |r| r.quantity, |r| r.name);
            let owned = rank_by(rows.clone(), 4, direction, |r| r.quantity, |r| r.name.to_owned());
            assert_eq!(borrowed, owned);
        }
    }

    #[test]
    fn test_empty_input() {
        let ranked = top_n_with_alpha_tiebreak(Vec::<Row>::new(), 3, |r| r.quantity, |r| r.name);
        assert!(ranked.is_empty());
    }
}
