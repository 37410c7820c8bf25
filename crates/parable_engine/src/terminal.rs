//! Terminal rules: destruction pairs, teleports, and win/end detection.
//!
//! Everything here respects float parity: two objects interact only when
//! both float or neither does. Destruction goes through
//! [`crate::transform::destroy_object`] so HAS replacements spawn.

use rand::Rng;

use parable_foundation::{ObjectId, SpaceId};
use parable_lexicon::PropWord;
use parable_world::{Level, Sound, same_float};

use crate::transform::destroy_object;

fn collect_with(level: &Level, space_id: &SpaceId, word: PropWord) -> Vec<ObjectId> {
    level
        .space(space_id)
        .map(|space| {
            space
                .objects()
                .filter(|o| level.enabled_for(o, word))
                .map(|o| o.id)
                .collect()
        })
        .unwrap_or_default()
}

fn destroy_all(level: &mut Level, doomed: Vec<(SpaceId, ObjectId)>, sound: Sound) {
    let any = !doomed.is_empty();
    for (space_id, id) in doomed {
        destroy_object(level, &space_id, id);
    }
    if any {
        level.emit(sound);
    }
}

// =============================================================================
// Destruction pairs
// =============================================================================

/// SINK: co-located pairs drown together; a level-scoped SINK clears every
/// non-floating object.
pub fn sink_phase(level: &mut Level) {
    let mut doomed: Vec<(SpaceId, ObjectId)> = Vec::new();
    if level.level_props.enabled_prop(PropWord::Sink) {
        for space_id in level.space_ids() {
            let space = level.space(&space_id).expect("listed space");
            for object in space.objects() {
                if !object.enabled(PropWord::Float) {
                    doomed.push((space_id.clone(), object.id));
                }
            }
        }
        destroy_all(level, doomed, Sound::Sink);
        return;
    }
    for space_id in level.space_ids() {
        let sinkers = collect_with(level, &space_id, PropWord::Sink);
        let space = level.space(&space_id).expect("listed space");
        for sinker_id in sinkers {
            let Some(sinker) = space.get(sinker_id) else {
                continue;
            };
            for other in space.objects_at(sinker.pos) {
                if other.id == sinker_id || !same_float(sinker, other) {
                    continue;
                }
                let sunk = (space_id.clone(), sinker_id);
                let victim = (space_id.clone(), other.id);
                if !doomed.contains(&sunk) && !doomed.contains(&victim) {
                    doomed.push(victim);
                    doomed.push(sunk);
                    break;
                }
            }
        }
    }
    destroy_all(level, doomed, Sound::Sink);
}

/// HOT destroys co-located MELT objects of matching float parity.
pub fn hot_melt_phase(level: &mut Level) {
    let mut doomed: Vec<(SpaceId, ObjectId)> = Vec::new();
    let scoped_hot = level.level_props.enabled_prop(PropWord::Hot);
    for space_id in level.space_ids() {
        let space = level.space(&space_id).expect("listed space");
        if scoped_hot {
            for object in space.objects() {
                if level.enabled_for(object, PropWord::Melt) && !object.enabled(PropWord::Float) {
                    doomed.push((space_id.clone(), object.id));
                }
            }
            continue;
        }
        let hots = collect_with(level, &space_id, PropWord::Hot);
        for hot_id in hots {
            let Some(hot) = space.get(hot_id) else {
                continue;
            };
            for other in space.objects_at(hot.pos) {
                if other.id != hot_id
                    && level.enabled_for(other, PropWord::Melt)
                    && same_float(hot, other)
                {
                    let entry = (space_id.clone(), other.id);
                    if !doomed.contains(&entry) {
                        doomed.push(entry);
                    }
                }
            }
        }
    }
    destroy_all(level, doomed, Sound::Melt);
}

/// DEFEAT destroys co-located YOU objects of matching float parity.
pub fn defeat_phase(level: &mut Level) {
    let mut doomed: Vec<(SpaceId, ObjectId)> = Vec::new();
    let scoped = level.level_props.enabled_prop(PropWord::Defeat);
    for space_id in level.space_ids() {
        let space = level.space(&space_id).expect("listed space");
        if scoped {
            for object in space.objects() {
                if level.enabled_for(object, PropWord::You) && !object.enabled(PropWord::Float) {
                    doomed.push((space_id.clone(), object.id));
                }
            }
            continue;
        }
        let defeats = collect_with(level, &space_id, PropWord::Defeat);
        for defeat_id in defeats {
            let Some(defeat) = space.get(defeat_id) else {
                continue;
            };
            for other in space.objects_at(defeat.pos) {
                if other.id != defeat_id
                    && level.enabled_for(other, PropWord::You)
                    && same_float(defeat, other)
                {
                    let entry = (space_id.clone(), other.id);
                    if !doomed.contains(&entry) {
                        doomed.push(entry);
                    }
                }
            }
        }
    }
    destroy_all(level, doomed, Sound::Defeat);
}

/// A co-located OPEN/SHUT pair destroys both.
pub fn open_shut_phase(level: &mut Level) {
    let mut doomed: Vec<(SpaceId, ObjectId)> = Vec::new();
    for space_id in level.space_ids() {
        let shuts = collect_with(level, &space_id, PropWord::Shut);
        let space = level.space(&space_id).expect("listed space");
        for shut_id in shuts {
            let Some(shut) = space.get(shut_id) else {
                continue;
            };
            for other in space.objects_at(shut.pos) {
                if other.id == shut_id || !level.enabled_for(other, PropWord::Open) {
                    continue;
                }
                let shut_entry = (space_id.clone(), shut_id);
                let open_entry = (space_id.clone(), other.id);
                if !doomed.contains(&shut_entry) && !doomed.contains(&open_entry) {
                    doomed.push(shut_entry);
                    doomed.push(open_entry);
                    break;
                }
            }
        }
    }
    destroy_all(level, doomed, Sound::Open);
}

/// DONE objects remove themselves.
pub fn done_phase(level: &mut Level) {
    let mut doomed: Vec<(SpaceId, ObjectId)> = Vec::new();
    for space_id in level.space_ids() {
        for id in collect_with(level, &space_id, PropWord::Done) {
            doomed.push((space_id.clone(), id));
        }
    }
    destroy_all(level, doomed, Sound::Done);
}

// =============================================================================
// Teleport
// =============================================================================

/// Objects sharing a cell with a TELE object hop to another TELE object of
/// the same category, chosen by the level RNG.
pub fn tele_phase(level: &mut Level) {
    // Group teleporters by the noun of their body.
    let mut groups: Vec<(parable_lexicon::Token, Vec<(SpaceId, ObjectId)>)> = Vec::new();
    for space_id in level.space_ids() {
        let teles = collect_with(level, &space_id, PropWord::Tele);
        let space = level.space(&space_id).expect("listed space");
        for id in teles {
            let Some(object) = space.get(id) else {
                continue;
            };
            let noun = object.body.noun();
            if let Some(group) = groups.iter_mut().find(|(n, _)| *n == noun) {
                group.1.push((space_id.clone(), id));
            } else {
                groups.push((noun, vec![(space_id.clone(), id)]));
            }
        }
    }

    let mut hops: Vec<(SpaceId, ObjectId, SpaceId, parable_foundation::Point)> = Vec::new();
    for (_, pads) in &groups {
        if pads.len() <= 1 {
            continue;
        }
        for (space_id, pad_id) in pads {
            let Some(space) = level.space(space_id) else {
                continue;
            };
            let Some(pad) = space.get(*pad_id) else {
                continue;
            };
            let passengers: Vec<ObjectId> = space
                .objects_at(pad.pos)
                .filter(|o| o.id != *pad_id && same_float(pad, o))
                .map(|o| o.id)
                .collect();
            if passengers.is_empty() {
                continue;
            }
            let others: Vec<&(SpaceId, ObjectId)> =
                pads.iter().filter(|(s, i)| !(s == space_id && i == pad_id)).collect();
            for passenger in passengers {
                let pick = level.rng_mut().gen_range(0..others.len());
                let (to_space, to_pad) = others[pick];
                let Some(target) = level.space(to_space).and_then(|s| s.get(*to_pad)) else {
                    continue;
                };
                hops.push((space_id.clone(), passenger, to_space.clone(), target.pos));
            }
        }
    }

    let any = !hops.is_empty();
    for (from, id, to, pos) in hops {
        if from == to {
            if let Some(space) = level.space_mut(&from) {
                space.relocate(id, pos);
            }
        } else {
            let orient = level
                .space(&from)
                .and_then(|s| s.get(id))
                .map_or(parable_foundation::Orient::Down, |o| o.orient);
            level.transfer(&from, id, &to, pos, orient);
        }
    }
    if any {
        level.emit(Sound::Tele);
    }
}

// =============================================================================
// Win / End
// =============================================================================

fn reach_check(level: &Level, word: PropWord) -> bool {
    if level.level_props.enabled_prop(word) || level.game_props.enabled_prop(word) {
        return level.spaces().any(|space| {
            space
                .objects()
                .any(|o| level.enabled_for(o, PropWord::You))
        });
    }
    for space in level.spaces() {
        for you in space.objects() {
            if !level.enabled_for(you, PropWord::You) {
                continue;
            }
            for other in space.objects_at(you.pos) {
                if other.id != you.id
                    && level.enabled_for(other, word)
                    && same_float(you, other)
                {
                    return true;
                }
            }
        }
    }
    false
}

/// True when a YOU object stands on a WIN object of matching float parity,
/// or a scoped WIN is active while any YOU exists.
pub fn win_check(level: &mut Level) -> bool {
    if reach_check(level, PropWord::Win) {
        level.emit(Sound::Win);
        true
    } else {
        false
    }
}

/// END counterpart of [`win_check`].
pub fn end_check(level: &mut Level) -> bool {
    if reach_check(level, PropWord::End) {
        level.emit(Sound::End);
        true
    } else {
        false
    }
}
