//! Applying compiled rules: filters, subject expansion, grant writing.
//!
//! Grants for ordinary subjects land on the matching objects in the space.
//! Subjects naming a scope (SPACE, CLONE, LEVEL, GAME) write to the scoped
//! stores instead: the per-variant channels live on the space itself, and
//! level/game grants are returned for the orchestrator to route.

use rand::Rng;

use parable_foundation::Point;
use parable_lexicon::{
    Category, EntityKind, InfixWord, NounWord, OperWord, PrefixWord, Token, Word,
};
use parable_world::{Object, Space, SpaceVariant};

use crate::info::{InfixCond, RuleInfo, SubjectSpec};

// =============================================================================
// Scoped grants
// =============================================================================

/// Where a scope-subject grant belongs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scope {
    /// The level-wide store.
    Level,
    /// The game-wide store.
    Game,
}

/// A grant the space cannot apply itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopedGrant {
    /// Destination scope.
    pub scope: Scope,
    /// Operator channel the grant belongs to.
    pub oper: OperWord,
    /// Granted token.
    pub token: Token,
    /// Negation tier.
    pub tier: u32,
}

// =============================================================================
// Subject expansion
// =============================================================================

enum SubjectSet {
    /// Per-object; the ids that matched, before filters.
    Objects(Vec<parable_foundation::ObjectId>),
    /// The space's own per-variant channel.
    Variant(SpaceVariant),
    /// Routed upward.
    Scoped(Scope),
    /// Nothing matches.
    None,
}

fn expand_subject(space: &Space, subject: &SubjectSpec, universe: &[EntityKind]) -> SubjectSet {
    let negated = subject.negated();
    let token = subject.token;

    if token.tier == 0 {
        match token.word {
            Word::Noun(NounWord::All) => {
                let ids = space
                    .objects()
                    .filter(|o| {
                        if negated {
                            // NOT ALL ranges over text objects only.
                            o.body.is_text()
                        } else {
                            matches!(&o.body, parable_world::Body::Plain(kind)
                                if universe.contains(kind))
                        }
                    })
                    .map(|o| o.id)
                    .collect();
                return SubjectSet::Objects(ids);
            }
            Word::Noun(NounWord::Empty) => return SubjectSet::None,
            Word::Noun(NounWord::Space) if !negated => {
                return SubjectSet::Variant(SpaceVariant::Space);
            }
            Word::Noun(NounWord::Clone) if !negated => {
                return SubjectSet::Variant(SpaceVariant::Clone);
            }
            Word::Noun(NounWord::Level) if !negated => return SubjectSet::Scoped(Scope::Level),
            Word::Noun(NounWord::Game) if !negated => return SubjectSet::Scoped(Scope::Game),
            _ => {}
        }
    }

    let ids = space
        .objects()
        .filter(|o| {
            if negated {
                // Complement within the plain universe.
                o.body.in_all() && !o.matches_noun(token)
            } else {
                o.matches_noun(token)
            }
        })
        .map(|o| o.id)
        .collect();
    SubjectSet::Objects(ids)
}

// =============================================================================
// Filters
// =============================================================================

fn eval_prefix<R: Rng>(object: &Object, word: PrefixWord, rng: &mut R) -> bool {
    match word {
        PrefixWord::Meta => object.body.token().is_some_and(|t| t.tier >= 1),
        PrefixWord::Often => rng.gen_bool(0.75),
        PrefixWord::Seldom => rng.gen_bool(1.0 / 6.0),
    }
}

/// True if `candidate` is what an infix target names: properties test the
/// candidate's store, nouns its category.
fn target_match(candidate: &Object, token: Token) -> bool {
    if token.category() == Category::Prop {
        candidate.props.enabled(token)
    } else {
        candidate.matches_noun(token)
    }
}

const NEXTTO: [(i32, i32); 4] = [(0, -1), (-1, 0), (0, 1), (1, 0)];
const NEAR: [(i32, i32); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn any_at_offsets(space: &Space, object: &Object, offsets: &[(i32, i32)], token: Token) -> bool {
    offsets.iter().any(|&(dx, dy)| {
        let pos = Point::new(object.pos.x + dx, object.pos.y + dy);
        space
            .objects_at(pos)
            .any(|o| o.id != object.id && target_match(o, token))
    })
}

fn eval_infix(space: &Space, object: &Object, cond: &InfixCond) -> bool {
    let inner = match cond.word {
        InfixWord::On => cond
            .targets
            .iter()
            .all(|t| any_at_offsets(space, object, &[(0, 0)], t.token) != t.negated),
        InfixWord::Nextto => cond
            .targets
            .iter()
            .all(|t| any_at_offsets(space, object, &NEXTTO, t.token) != t.negated),
        InfixWord::Near => cond
            .targets
            .iter()
            .all(|t| any_at_offsets(space, object, &NEAR, t.token) != t.negated),
        InfixWord::Feeling => cond
            .targets
            .iter()
            .all(|t| object.old.props.enabled(t.token) != t.negated),
        InfixWord::Without => {
            // Each target token must fall short of the number of times the
            // rule names it, anywhere in the space.
            let mut demanded: Vec<(Token, bool, usize)> = Vec::new();
            for target in &cond.targets {
                if let Some(entry) = demanded
                    .iter_mut()
                    .find(|(token, negated, _)| *token == target.token && *negated == target.negated)
                {
                    entry.2 += 1;
                } else {
                    demanded.push((target.token, target.negated, 1));
                }
            }
            demanded.iter().all(|&(token, negated, wanted)| {
                let present = space.objects().filter(|o| target_match(o, token)).count();
                (present < wanted) != negated
            })
        }
    };
    inner != cond.negated
}

fn passes_filters<R: Rng>(space: &Space, object: &Object, rule: &RuleInfo, rng: &mut R) -> bool {
    rule.prefixes
        .iter()
        .all(|p| eval_prefix(object, p.word, rng) != p.negated)
        && rule.infixes.iter().all(|i| eval_infix(space, object, i))
}

// =============================================================================
// Application
// =============================================================================

/// Applies rules to one space, writing grants into object and space-variant
/// stores and returning the level/game-scoped remainder.
pub fn apply_rules<R: Rng>(
    space: &mut Space,
    rules: &[RuleInfo],
    universe: &[EntityKind],
    rng: &mut R,
) -> Vec<ScopedGrant> {
    let mut scoped = Vec::new();
    for rule in rules {
        for subject in &rule.subjects {
            match expand_subject(space, subject, universe) {
                SubjectSet::None => {}
                SubjectSet::Objects(ids) => {
                    let survivors: Vec<_> = ids
                        .into_iter()
                        .filter(|&id| {
                            space
                                .get(id)
                                .is_some_and(|o| passes_filters(space, o, rule, rng))
                        })
                        .collect();
                    for id in survivors {
                        let Some(object) = space.get_mut(id) else {
                            continue;
                        };
                        for clause in &rule.clauses {
                            for target in &clause.targets {
                                if clause.oper == OperWord::Is {
                                    object.props.grant(target.token, target.tier);
                                } else {
                                    object
                                        .channels
                                        .channel_mut(clause.oper)
                                        .grant(target.token, target.tier);
                                }
                            }
                        }
                    }
                }
                SubjectSet::Variant(variant) => {
                    for clause in &rule.clauses {
                        for target in &clause.targets {
                            if clause.oper == OperWord::Is {
                                space.variant_props_mut(variant).grant(target.token, target.tier);
                            } else {
                                space
                                    .variant_channels_mut(variant)
                                    .channel_mut(clause.oper)
                                    .grant(target.token, target.tier);
                            }
                        }
                    }
                }
                SubjectSet::Scoped(scope) => {
                    for clause in &rule.clauses {
                        for target in &clause.targets {
                            scoped.push(ScopedGrant {
                                scope,
                                oper: clause.oper,
                                token: target.token,
                                tier: target.tier,
                            });
                        }
                    }
                }
            }
        }
    }
    scoped
}
