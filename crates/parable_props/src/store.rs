//! The property store: grant multisets keyed by token and negation tier.

use std::fmt;

use im::HashMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use parable_lexicon::{OperWord, PropWord, Token};

/// Grant map for one token: negation tier → grant count.
type Grants = HashMap<u32, i32>;

// =============================================================================
// Cascade resolution
// =============================================================================

/// Resolves a grant map at a queried tier (0 = enabled, 1 = disabled).
///
/// Tiers are expanded by count and walked from the highest down: a repeat
/// of the current tier raises the running count, a tier exactly one below
/// cancels against it (`count = min(0, -count) + 1`) and takes over, and a
/// larger gap restarts the count at 1. The walk stops below the queried
/// tier; the result is the floored count, and only counts landing exactly
/// on the queried tier survive.
#[must_use]
pub fn cascade(grants: &Grants, queried: u32) -> i32 {
    if grants.is_empty() {
        return 0;
    }
    if grants.len() == 1 {
        let only = *grants.keys().next().expect("len checked");
        return i32::from(only == queried);
    }
    let mut tiers: Vec<u32> = Vec::new();
    for (&tier, &count) in grants {
        for _ in 0..count.max(0) {
            tiers.push(tier);
        }
    }
    tiers.sort_unstable_by(|a, b| b.cmp(a));
    let Some(&first) = tiers.first() else {
        return 0;
    };
    let mut current = first;
    let mut count = 0i32;
    for &tier in &tiers {
        if tier < queried {
            break;
        } else if tier == current {
            count += 1;
        } else if current - tier == 1 {
            count = 0.min(-count) + 1;
            current = tier;
        } else {
            count = 1;
            current = tier;
        }
    }
    if current == queried { count.max(0) } else { 0 }
}

// =============================================================================
// PropertyStore
// =============================================================================

/// Grants held by one entity (or one scope) for the current turn.
///
/// Clones share structure, so taking the previous-turn snapshot that
/// FEELING consults costs almost nothing.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyStore {
    grants: HashMap<Token, Grants>,
}

impl PropertyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no token has any grant entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// Records one grant for `token` at `tier`.
    pub fn grant(&mut self, token: Token, tier: u32) {
        let entry = self.grants.entry(token).or_default();
        *entry.entry(tier).or_insert(0) += 1;
    }

    /// Removes one grant for `token` at `tier`.
    pub fn revoke(&mut self, token: Token, tier: u32) {
        let entry = self.grants.entry(token).or_default();
        *entry.entry(tier).or_insert(0) -= 1;
    }

    /// Replaces all grants for `token` with a single unit at tier 0 or 1.
    pub fn overwrite(&mut self, token: Token, negated: bool) {
        let mut grants = Grants::new();
        grants.insert(u32::from(negated), 1);
        self.grants.insert(token, grants);
    }

    /// Drops every grant.
    pub fn clear(&mut self) {
        self.grants.clear();
    }

    /// True if any grant entry exists for `token`, resolved or not.
    #[must_use]
    pub fn exists(&self, token: Token) -> bool {
        self.grants.get(&token).is_some_and(|g| !g.is_empty())
    }

    /// The resolved count for `token` at the queried tier.
    #[must_use]
    pub fn count_at(&self, token: Token, tier: u32) -> i32 {
        self.grants.get(&token).map_or(0, |g| cascade(g, tier))
    }

    /// True if the resolved count at the queried tier is positive.
    #[must_use]
    pub fn has_at(&self, token: Token, tier: u32) -> bool {
        self.count_at(token, tier) > 0
    }

    /// True if `token` is effectively enabled (tier 0).
    #[must_use]
    pub fn enabled(&self, token: Token) -> bool {
        self.has_at(token, 0)
    }

    /// True if `token` is effectively disabled (tier 1, one surviving NOT).
    #[must_use]
    pub fn disabled(&self, token: Token) -> bool {
        self.has_at(token, 1)
    }

    /// Enabled check for a property word.
    #[must_use]
    pub fn enabled_prop(&self, word: PropWord) -> bool {
        self.enabled(Token::prop(word))
    }

    /// Disabled check for a property word.
    #[must_use]
    pub fn disabled_prop(&self, word: PropWord) -> bool {
        self.disabled(Token::prop(word))
    }

    /// Resolved enabled count for a property word (YOU/MOVE round tiers).
    #[must_use]
    pub fn enabled_count(&self, word: PropWord) -> i32 {
        self.count_at(Token::prop(word), 0)
    }

    /// Iterates tokens with their resolved enabled counts, skipping zeros.
    pub fn enabled_tokens(&self) -> impl Iterator<Item = (Token, i32)> + '_ {
        self.grants.iter().filter_map(|(&token, grants)| {
            let count = cascade(grants, 0);
            (count > 0).then_some((token, count))
        })
    }

    /// Iterates tokens with their resolved disabled counts, skipping zeros.
    pub fn disabled_tokens(&self) -> impl Iterator<Item = (Token, i32)> + '_ {
        self.grants.iter().filter_map(|(&token, grants)| {
            let count = cascade(grants, 1);
            (count > 0).then_some((token, count))
        })
    }
}

impl fmt::Debug for PropertyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let enabled: Vec<_> = self.enabled_tokens().collect();
        let disabled: Vec<_> = self.disabled_tokens().collect();
        f.debug_struct("PropertyStore")
            .field("enabled", &enabled)
            .field("disabled", &disabled)
            .finish()
    }
}

// =============================================================================
// OperatorChannels
// =============================================================================

/// Grant stores for the non-IS operators.
///
/// These never feed `enabled`/`disabled`; creation and transformation logic
/// reads them directly.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OperatorChannels {
    /// Targets spawned when the holder is destroyed.
    pub has: PropertyStore,
    /// Targets spawned every turn.
    pub make: PropertyStore,
    /// Text targets spawned every turn.
    pub write: PropertyStore,
}

impl OperatorChannels {
    /// Creates empty channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The channel for an operator. IS has no channel.
    ///
    /// # Panics
    /// Panics on [`OperWord::Is`]; IS grants go through the property store.
    #[must_use]
    pub fn channel(&self, oper: OperWord) -> &PropertyStore {
        match oper {
            OperWord::Has => &self.has,
            OperWord::Make => &self.make,
            OperWord::Write => &self.write,
            OperWord::Is => panic!("IS has no operator channel"),
        }
    }

    /// Mutable access to the channel for an operator.
    ///
    /// # Panics
    /// Panics on [`OperWord::Is`].
    pub fn channel_mut(&mut self, oper: OperWord) -> &mut PropertyStore {
        match oper {
            OperWord::Has => &mut self.has,
            OperWord::Make => &mut self.make,
            OperWord::Write => &mut self.write,
            OperWord::Is => panic!("IS has no operator channel"),
        }
    }

    /// Clears all three channels.
    pub fn clear(&mut self) {
        self.has.clear();
        self.make.clear();
        self.write.clear();
    }
}

impl fmt::Debug for OperatorChannels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorChannels")
            .field("has", &self.has)
            .field("make", &self.make)
            .field("write", &self.write)
            .finish()
    }
}
