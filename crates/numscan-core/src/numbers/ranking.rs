//! Deduplication and ranking of findings.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::finding::NumberFinding;

/// Identity of a finding: value, matched text and page.
fn identity<T: NumberFinding>(finding: &T) -> (u64, &str, u32) {
    // 0.0 and -0.0 compare equal, so they share a key
    let value = finding.value();
    let bits = if value == 0.0 { 0 } else { value.to_bits() };
    (bits, finding.original_text(), finding.page())
}

/// Collapse findings sharing (value, original text, page).
///
/// The first occurrence of a key keeps its position; a later duplicate only
/// replaces it when its value is strictly greater.
pub fn deduplicate<T: NumberFinding + Clone>(findings: &[T]) -> Vec<T> {
    let mut positions: HashMap<(u64, &str, u32), usize> = HashMap::new();
    let mut unique: Vec<T> = Vec::new();

    for finding in findings {
        match positions.get(&identity(finding)) {
            Some(&pos) => {
                if unique[pos].value() < finding.value() {
                    unique[pos] = finding.clone();
                }
            }
            None => {
                positions.insert(identity(finding), unique.len());
                unique.push(finding.clone());
            }
        }
    }

    unique
}

/// Finding with the largest value after deduplication.
///
/// Ties go to the earliest finding.
pub fn largest<T: NumberFinding + Clone>(findings: &[T]) -> Option<T> {
    deduplicate(findings)
        .into_iter()
        .fold(None, |best, finding| match best {
            Some(best) if best.value() >= finding.value() => Some(best),
            _ => Some(finding),
        })
}

/// Deduplicated findings sorted by value descending, truncated to `n`.
pub fn top_n<T: NumberFinding + Clone>(findings: &[T], n: usize) -> Vec<T> {
    let mut sorted = deduplicate(findings);
    sorted.sort_by(|a, b| b.value().partial_cmp(&a.value()).unwrap_or(Ordering::Equal));
    sorted.truncate(n);
    sorted
}

/// First deduplicated finding whose value is within `tolerance` of `target`.
pub fn find_value<T: NumberFinding + Clone>(findings: &[T], target: f64, tolerance: f64) -> Option<T> {
    deduplicate(findings)
        .into_iter()
        .find(|finding| (finding.value() - target).abs() < tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finding::{Finding, ScaledFinding};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn finding(value: f64, text: &str, page: u32) -> Finding {
        Finding {
            value,
            original_text: text.to_string(),
            page,
            context: format!("context for {text}"),
        }
    }

    #[test]
    fn test_identical_matches_collapse() {
        let findings = vec![finding(100.0, "100", 1), finding(100.0, "100", 1)];
        assert_eq!(deduplicate(&findings), vec![finding(100.0, "100", 1)]);
    }

    #[test]
    fn test_key_includes_text_and_page() {
        let findings = vec![
            finding(1000.0, "1000", 1),
            finding(1000.0, "1,000", 1),
            finding(1000.0, "1000", 2),
        ];
        assert_eq!(deduplicate(&findings).len(), 3);
    }

    #[test]
    fn test_first_occurrence_is_kept() {
        let mut first = finding(5.0, "5", 1);
        first.context = "first".to_string();
        let mut second = finding(5.0, "5", 1);
        second.context = "second".to_string();

        let unique = deduplicate(&[first, second]);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].context, "first");
    }

    #[test]
    fn test_scaled_same_text_different_scale_kept() {
        let scaled = |value: f64, name: &str| ScaledFinding {
            value,
            original_text: "5".to_string(),
            scale_name: name.to_string(),
            page: 1,
            context: String::new(),
        };
        let findings = vec![scaled(5e6, "million"), scaled(5e3, "thousands (from context)")];
        assert_eq!(deduplicate(&findings).len(), 2);
    }

    #[test]
    fn test_largest() {
        let findings = vec![finding(3.0, "3", 1), finding(9.5, "9.5", 2), finding(-20.0, "-20", 1)];
        assert_eq!(largest(&findings).unwrap().value, 9.5);
        assert_eq!(largest::<Finding>(&[]), None);
    }

    #[test]
    fn test_largest_tie_keeps_earliest() {
        let findings = vec![finding(7.0, "7", 1), finding(7.0, "7", 3)];
        assert_eq!(largest(&findings).unwrap().page, 1);
    }

    #[test]
    fn test_top_n() {
        let findings = vec![
            finding(1.0, "1", 1),
            finding(30.0, "30", 1),
            finding(30.0, "30", 1),
            finding(20.0, "20", 2),
        ];
        let top: Vec<f64> = top_n(&findings, 2).iter().map(|f| f.value).collect();
        assert_eq!(top, vec![30.0, 20.0]);
        assert_eq!(top_n(&findings, 10).len(), 3);
        assert!(top_n::<Finding>(&[], 5).is_empty());
    }

    #[test]
    fn test_find_value_tolerance() {
        let findings = vec![finding(35110.05, "35,110.05", 4)];
        assert_eq!(find_value(&findings, 35110.0, 0.1).unwrap().page, 4);
        assert_eq!(find_value(&findings, 35111.0, 0.1), None);
    }

    fn arb_findings() -> impl Strategy<Value = Vec<Finding>> {
        prop::collection::vec((0u32..50, 1u32..4), 0..40).prop_map(|items| {
            items
                .into_iter()
                .map(|(n, page)| finding(n as f64, &n.to_string(), page))
                .collect()
        })
    }

    proptest! {
        /// Property: deduplicating twice changes nothing
        #[test]
        fn dedup_is_idempotent(findings in arb_findings()) {
            let once = deduplicate(&findings);
            prop_assert_eq!(deduplicate(&once), once);
        }

        /// Property: largest is at least every other value
        #[test]
        fn largest_dominates(findings in arb_findings()) {
            match largest(&findings) {
                Some(max) => prop_assert!(findings.iter().all(|f| max.value >= f.value)),
                None => prop_assert!(findings.is_empty()),
            }
        }

        /// Property: top_n is non-increasing with length min(n, unique)
        #[test]
        fn top_n_sorted_and_sized(findings in arb_findings(), n in 0usize..20) {
            let top = top_n(&findings, n);
            prop_assert_eq!(top.len(), n.min(deduplicate(&findings).len()));
            prop_assert!(top.windows(2).all(|w| w[0].value >= w[1].value));
        }
    }
}
