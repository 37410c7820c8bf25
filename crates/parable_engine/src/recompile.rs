//! Full rule recompilation across the nesting graph.
//!
//! Rules written in an outer space govern everything nested inside it, so
//! each space's effective list is its own scan plus every (transitive)
//! container's, with a visited guard against cyclic nesting. Compilation
//! runs twice per turn: the first pass applies only WORD-target rules, so
//! objects drafted into sentences by WORD are visible when the second pass
//! rescans and applies the full set.

use std::collections::{HashMap, HashSet};

use parable_foundation::SpaceId;
use parable_lexicon::{PropWord, Token};
use parable_rules::{RuleEntry, Scope, apply_rules, parse};
use parable_world::Level;

/// Recompiles every rule in the level and rewrites all property grants.
pub fn recompile_rules(level: &mut Level) {
    clear_grants(level);
    let entries = gather(level);
    apply(level, &entries, true);

    let entries = gather(level);
    clear_grants(level);
    apply(level, &entries, false);
}

fn clear_grants(level: &mut Level) {
    for space in level.spaces_mut() {
        for object in space.objects_mut() {
            object.props.clear();
            object.channels.clear();
        }
    }
    level.clear_scoped();
}

/// Scans every space and layers inherited and inherent rules onto each.
fn gather(level: &Level) -> HashMap<SpaceId, Vec<RuleEntry>> {
    let ids = level.space_ids();
    let mut scanned: HashMap<SpaceId, Vec<RuleEntry>> = HashMap::new();
    for id in &ids {
        let space = level.space(id).expect("listed space");
        scanned.insert(id.clone(), parable_rules::scan_space(space));
    }

    let mut effective = scanned.clone();

    // Depth-first push of each space's own rules into everything it
    // (transitively) contains, stopping at spaces already visited.
    for source in &ids {
        let own = scanned.get(source).cloned().unwrap_or_default();
        if own.is_empty() {
            continue;
        }
        let mut visited: HashSet<SpaceId> = HashSet::new();
        visited.insert(source.clone());
        let mut stack: Vec<SpaceId> = children_of(level, source);
        while let Some(next) = stack.pop() {
            if !visited.insert(next.clone()) {
                continue;
            }
            if let Some(list) = effective.get_mut(&next) {
                list.extend(own.iter().cloned());
            }
            stack.extend(children_of(level, &next));
        }
    }

    // Inherent rules reach every space.
    let inherent: Vec<RuleEntry> = level
        .inherent_rules
        .iter()
        .map(|tokens| RuleEntry {
            tokens: tokens.clone(),
            info: parse(tokens),
        })
        .collect();
    for list in effective.values_mut() {
        list.extend(inherent.iter().cloned());
        dedup_entries(list);
    }
    effective
}

fn children_of(level: &Level, id: &SpaceId) -> Vec<SpaceId> {
    level
        .space(id)
        .map(|space| {
            space
                .space_refs()
                .into_iter()
                .filter(|(_, target, _)| level.contains_space(target))
                .map(|(_, target, _)| target)
                .collect()
        })
        .unwrap_or_default()
}

fn dedup_entries(entries: &mut Vec<RuleEntry>) {
    let mut seen: HashSet<Vec<Token>> = HashSet::new();
    entries.retain(|entry| seen.insert(entry.tokens.clone()));
}

fn apply(level: &mut Level, entries: &HashMap<SpaceId, Vec<RuleEntry>>, word_only: bool) {
    let word = Token::prop(PropWord::Word);
    let universe = level.all_universe();
    // The RNG is threaded through by value so the borrow of the space does
    // not overlap it; the advanced state is written back after.
    let mut rng = level.rng_mut().clone();
    for id in level.space_ids() {
        let Some(list) = entries.get(&id) else {
            continue;
        };
        let infos: Vec<_> = if word_only {
            list.iter()
                .filter_map(|e| e.info.restricted_to(word))
                .collect()
        } else {
            list.iter().map(|e| e.info.clone()).collect()
        };
        let Some(space) = level.space_mut(&id) else {
            continue;
        };
        let scoped = apply_rules(space, &infos, &universe, &mut rng);
        for grant in scoped {
            let (props, channels) = match grant.scope {
                Scope::Level => (&mut level.level_props, &mut level.level_channels),
                Scope::Game => (&mut level.game_props, &mut level.game_channels),
            };
            if grant.oper == parable_lexicon::OperWord::Is {
                props.grant(grant.token, grant.tier);
            } else {
                channels.channel_mut(grant.oper).grant(grant.token, grant.tier);
            }
        }
    }
    *level.rng_mut() = rng;
}
