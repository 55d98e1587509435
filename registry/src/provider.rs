//! Weighted provider selection, ported from the reference client's
//! `select_provider_by_weight`: a non-positive total weight falls back
//! to a uniform pick, otherwise a weighted draw is made against the
//! cumulative weight.

use rand::Rng as _;

use crate::RegistryError;

/// One resolvable service endpoint and the weight the registry assigned
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    pub uri: String,
    pub weight: f64,
}

pub fn select_provider_by_weight(
    candidates: &[Provider],
    address: &str,
    interface: &str,
) -> Result<Provider, RegistryError> {
    if candidates.is_empty() {
        return Err(RegistryError::NoProviders {
            address: address.to_owned(),
            interface: interface.to_owned(),
        });
    }

    let total_weight: f64 = candidates.iter().map(|p| p.weight).sum();
    let mut rng = rand::thread_rng();

    if total_weight <= 0.0 {
        let index = rng.gen_range(0..candidates.len());
        return Ok(candidates[index].clone());
    }

    let hit = rng.gen::<f64>() * total_weight;
    let mut cumulative = 0.0;
    for candidate in candidates {
        cumulative += candidate.weight;
        if hit < cumulative {
            return Ok(candidate.clone());
        }
    }

    // Floating point rounding can leave `hit` a hair past the last
    // cumulative weight; fall back to the last candidate rather than
    // panicking.
    Ok(candidates[candidates.len() - 1].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(uri: &str, weight: f64) -> Provider {
        Provider {
            uri: uri.to_owned(),
            weight,
        }
    }

    #[test]
    fn empty_candidates_is_an_error() {
        let err = select_provider_by_weight(&[], "zk:2181", "com.x.Foo").unwrap_err();
        assert!(matches!(err, RegistryError::NoProviders { .. }));
    }

    #[test]
    fn single_candidate_is_always_selected() {
        let candidates = vec![provider("10.0.0.1:20880", 100.0)];
        let selected = select_provider_by_weight(&candidates, "zk:2181", "com.x.Foo").unwrap();
        assert_eq!(selected.uri, "10.0.0.1:20880");
    }

    #[test]
    fn non_positive_total_weight_still_selects_one_candidate() {
        let candidates = vec![provider("a", 0.0), provider("b", 0.0)];
        let selected = select_provider_by_weight(&candidates, "zk:2181", "com.x.Foo").unwrap();
        assert!(candidates.iter().any(|p| p.uri == selected.uri));
    }

    #[test]
    fn selection_always_lands_on_a_listed_candidate() {
        let candidates = vec![provider("a", 10.0), provider("b", 90.0)];
        for _ in 0..200 {
            let selected = select_provider_by_weight(&candidates, "zk:2181", "com.x.Foo").unwrap();
            assert!(candidates.iter().any(|p| p.uri == selected.uri));
        }
    }

    proptest::proptest! {
        #[test]
        fn selection_never_picks_outside_the_candidate_set(weights in proptest::collection::vec(0.0f64..1000.0, 1..8)) {
            let candidates: Vec<Provider> = weights
                .into_iter()
                .enumerate()
                .map(|(index, weight)| provider(&format!("host-{index}"), weight))
                .collect();
            let selected = select_provider_by_weight(&candidates, "zk:2181", "com.x.Foo").unwrap();
            proptest::prop_assert!(candidates.iter().any(|p| p.uri == selected.uri));
        }
    }
}
