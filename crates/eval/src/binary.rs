//! Set-based metrics over binary relevance: Precision, Recall, R-Precision,
//! P@k, and (average) Precision for MAP.

use std::collections::HashSet;
use std::hash::Hash;

/// `|retrieved ∩ relevant| / |retrieved|`, or 0 if nothing was retrieved.
pub fn precision<D: Eq + Hash>(retrieved: &[D], relevant: &HashSet<D>) -> f64 {
    if retrieved.is_empty() {
        return 0.0;
    }
    let hits = retrieved.iter().filter(|d| relevant.contains(*d)).count();
    hits as f64 / retrieved.len() as f64
}

/// `|retrieved ∩ relevant| / |relevant|`, or 0 if nothing is relevant.
pub fn recall<D: Eq + Hash>(retrieved: &[D], relevant: &HashSet<D>) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    let hits = retrieved.iter().filter(|d| relevant.contains(*d)).count();
    hits as f64 / relevant.len() as f64
}

/// Precision within the top `R = |relevant|` retrieved documents.
pub fn r_precision<D: Eq + Hash>(retrieved: &[D], relevant: &HashSet<D>) -> f64 {
    let r = relevant.len();
    if r == 0 {
        return 0.0;
    }
    let top_r = &retrieved[..retrieved.len().min(r)];
    let hits = top_r.iter().filter(|d| relevant.contains(*d)).count();
    hits as f64 / r as f64
}

/// Relevant documents in the top `k` retrieved, divided by `k`.
pub fn p_at_k<D: Eq + Hash>(retrieved: &[D], relevant: &HashSet<D>, k: usize) -> f64 {
    if k == 0 {
        return 0.0;
    }
    let top_k = &retrieved[..retrieved.len().min(k)];
    let hits = top_k.iter().filter(|d| relevant.contains(*d)).count();
    hits as f64 / k as f64
}

/// Average precision for a single query: the mean of precision-at-i taken
/// at every rank `i` where the retrieved document is relevant, divided by
/// `|relevant|`. Averaging this across queries gives MAP.
pub fn average_precision<D: Eq + Hash>(retrieved: &[D], relevant: &HashSet<D>) -> f64 {
    let r = relevant.len();
    if r == 0 {
        return 0.0;
    }
    let mut relevant_so_far = 0usize;
    let mut sum = 0.0;
    for (i, doc) in retrieved.iter().enumerate() {
        if relevant.contains(doc) {
            relevant_so_far += 1;
            sum += relevant_so_far as f64 / (i + 1) as f64;
        }
    }
    sum / r as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn precision_and_recall() {
        let retrieved = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let relevant = set(&["a", "c", "d"]);
        assert!((precision(&retrieved, &relevant) - 2.0 / 3.0).abs() < 1e-9);
        assert!((recall(&retrieved, &relevant) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn r_precision_uses_top_r() {
        let retrieved = vec!["a".to_string(), "x".to_string(), "c".to_string()];
        let relevant = set(&["a", "c"]);
        // R = 2, top-2 retrieved = [a, x], 1 hit.
        assert!((r_precision(&retrieved, &relevant) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn p_at_k_pads_with_non_hits_past_retrieved_len() {
        let retrieved = vec!["a".to_string()];
        let relevant = set(&["a"]);
        assert!((p_at_k(&retrieved, &relevant, 15) - 1.0 / 15.0).abs() < 1e-9);
    }

    #[test]
    fn average_precision_example() {
        let retrieved = vec![
            "a".to_string(),
            "x".to_string(),
            "b".to_string(),
            "y".to_string(),
        ];
        let relevant = set(&["a", "b"]);
        // hits at rank 1 (1/1) and rank 3 (2/3), divided by R=2.
        let expected = (1.0 + 2.0 / 3.0) / 2.0;
        assert!((average_precision(&retrieved, &relevant) - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_relevant_set_yields_zero() {
        let retrieved = vec!["a".to_string()];
        let relevant: HashSet<String> = HashSet::new();
        assert_eq!(recall(&retrieved, &relevant), 0.0);
        assert_eq!(r_precision(&retrieved, &relevant), 0.0);
        assert_eq!(average_precision(&retrieved, &relevant), 0.0);
    }

    proptest::proptest! {
        #[test]
        fn metrics_stay_in_unit_interval(
            retrieved in proptest::collection::vec(0u32..10, 0..20),
            relevant in proptest::collection::vec(0u32..10, 0..10),
        ) {
            let relevant: HashSet<u32> = relevant.into_iter().collect();
            proptest::prop_assert!((0.0..=1.0).contains(&precision(&retrieved, &relevant)));
            proptest::prop_assert!((0.0..=1.0).contains(&recall(&retrieved, &relevant)));
            proptest::prop_assert!((0.0..=1.0).contains(&r_precision(&retrieved, &relevant)));
            proptest::prop_assert!((0.0..=1.0).contains(&p_at_k(&retrieved, &relevant, 15)));
            proptest::prop_assert!((0.0..=1.0).contains(&average_precision(&retrieved, &relevant)));
        }
    }
}
