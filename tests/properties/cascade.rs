//! The negation-tier cascade, pinned against its fixtures.

use parable::lexicon::{PropWord, Token};
use parable::props::PropertyStore;

fn store_with(tiers: &[u32]) -> (PropertyStore, Token) {
    let token = Token::prop(PropWord::Push);
    let mut store = PropertyStore::new();
    for &tier in tiers {
        store.grant(token, tier);
    }
    (store, token)
}

#[test]
fn single_grant_enables() {
    let (store, token) = store_with(&[0]);
    assert!(store.enabled(token));
    assert!(!store.disabled(token));
}

#[test]
fn single_negated_grant_disables() {
    let (store, token) = store_with(&[1]);
    assert!(!store.enabled(token));
    assert!(store.disabled(token));
}

#[test]
fn negation_beats_a_single_grant() {
    // The enable cancels against the NOT, and the NOT still stands at its
    // own tier: not enabled, and actively disabled.
    let (store, token) = store_with(&[0, 1]);
    assert!(!store.enabled(token));
    assert!(store.disabled(token));
}

#[test]
fn surplus_grant_stays_enabled() {
    let (store, token) = store_with(&[0, 0, 1]);
    assert!(store.enabled(token));
}

#[test]
fn deep_tiers_cancel_pairwise() {
    // Two tier-3 grants fall to a single tier-2 grant; the survivor sits
    // at tier 2, invisible to both the enabled and disabled queries.
    let (store, token) = store_with(&[3, 3, 2]);
    assert!(!store.enabled(token));
    assert!(!store.disabled(token));
    assert_eq!(store.count_at(token, 2), 0);
}

#[test]
fn adjacent_pair_collapses_downward() {
    // One tier-3 grant against one tier-2 grant annihilates completely.
    let (store, token) = store_with(&[3, 2]);
    assert_eq!(store.count_at(token, 2), 0);
    assert!(!store.enabled(token));
}

#[test]
fn a_gap_in_tiers_skips_cancellation() {
    let (store, token) = store_with(&[3, 1]);
    assert!(store.disabled(token));
}

#[test]
fn stacked_grants_report_their_count() {
    let (store, token) = store_with(&[0, 0, 0]);
    assert_eq!(store.count_at(token, 0), 3);
}

#[test]
fn tokens_resolve_independently() {
    let push = Token::prop(PropWord::Push);
    let stop = Token::prop(PropWord::Stop);
    let mut store = PropertyStore::new();
    store.grant(push, 0);
    store.grant(stop, 1);
    assert!(store.enabled(push));
    assert!(store.disabled(stop));
    assert!(!store.disabled(push));
    assert!(!store.enabled(stop));
}

mod resolution_laws {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn resolved_counts_are_never_negative(
            tiers in proptest::collection::vec(0u32..6, 0..12),
            queried in 0u32..6,
        ) {
            let (store, token) = store_with(&tiers);
            prop_assert!(store.count_at(token, queried) >= 0);
        }

        #[test]
        fn tiers_above_every_grant_resolve_to_zero(
            tiers in proptest::collection::vec(0u32..6, 1..12),
        ) {
            let (store, token) = store_with(&tiers);
            let above = tiers.iter().max().unwrap() + 1;
            prop_assert_eq!(store.count_at(token, above), 0);
        }

        #[test]
        fn grants_at_one_tier_resolve_by_tier_alone(
            tier in 0u32..6,
            copies in 1usize..5,
            queried in 0u32..6,
        ) {
            let tiers = vec![tier; copies];
            let (store, token) = store_with(&tiers);
            prop_assert_eq!(store.has_at(token, queried), tier == queried);
        }
    }
}
