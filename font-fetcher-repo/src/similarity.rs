//! String closeness shared by name ranking and style matching.
//!
//! Both fuzzy matchers go through [`rank_by_similarity`] so they can never
//! drift apart.

use similar::TextDiff;

/// Similarity of two strings in `0.0..=1.0`.
///
/// Computed as `2 * M / (len(a) + len(b))` where `M` is the number of
/// characters left unchanged by a character-level diff. Identical strings
/// score `1.0`, strings with no common characters `0.0`. Comparison is
/// case-sensitive; callers lowercase first.
pub fn similarity(a: &str, b: &str) -> f32 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    TextDiff::from_chars(a, b).ratio()
}

/// Order `items` by descending similarity of `key(item)` to `query`.
///
/// Both sides are lowercased before scoring. The sort is stable: items with
/// equal scores keep their input order.
pub fn rank_by_similarity<T, F>(query: &str, items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let query = query.to_lowercase();
    let mut scored: Vec<(f32, T)> = items
        .into_iter()
        .map(|item| (similarity(&query, &key(&item).to_lowercase()), item))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_score_one() {
        assert_eq!(similarity("open sans", "open sans"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_disjoint_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_between() {
        let s = similarity("bold", "font-bold.ttf");
        assert!(s > 0.0 && s < 1.0, "got {s}");
        assert!(s > similarity("bold", "font-regular.ttf"));
    }

    #[test]
    fn test_rank_is_case_insensitive() {
        let ranked = rank_by_similarity("ROBOTO", vec!["lato", "roboto"], |s| s.to_string());
        assert_eq!(ranked, vec!["roboto", "lato"]);
    }

    #[test]
    fn test_rank_keeps_input_order_on_ties() {
        let ranked = rank_by_similarity("zzz", vec!["b", "a", "c"], |s| s.to_string());
        assert_eq!(ranked, vec!["b", "a", "c"]);
    }
}
