//! One full game turn, sequenced the same way every time.

use parable_foundation::{LevelId, ObjectId, Orient, SpaceId};
use parable_lexicon::PropWord;
use parable_motion::{apply_moves, resolve_move};
use parable_world::{Level, Sound};

use crate::recompile::recompile_rules;
use crate::terminal::{
    defeat_phase, done_phase, end_check, hot_melt_phase, open_shut_phase, sink_phase, tele_phase,
    win_check,
};
use crate::transform::transform_phase;

/// Cap on automatic-movement rounds per phase. Property tiers beyond this
/// simply stop mattering.
pub const MAX_ROUNDS: i32 = 16;

/// Player input for one turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Move every YOU object this way.
    Move(Orient),
    /// Stand still; SELECT resolves level choices on a wait.
    Wait,
}

/// What one turn produced.
#[derive(Clone, Debug)]
pub struct TurnOutcome {
    /// A YOU object reached a WIN object (or a scoped WIN held).
    pub win: bool,
    /// Same for END.
    pub end: bool,
    /// Something tried to move the game itself and failed.
    pub pushing_game: bool,
    /// Sounds in emission order.
    pub sounds: Vec<Sound>,
    /// Levels created by transforms, for the caller to adopt.
    pub created_levels: Vec<Level>,
    /// A level chosen by SELECT, if any.
    pub selected_level: Option<LevelId>,
}

/// Runs one complete turn.
pub fn play_turn(level: &mut Level, input: Input) -> TurnOutcome {
    level.sounds.clear();
    level.created_levels.clear();
    level.remember_all();
    recompile_rules(level);

    let mut pushing_game = false;
    if let Input::Move(orient) = input {
        pushing_game |= you_phase(level, orient);
    }
    pushing_game |= move_phase(level);
    recompile_rules(level);
    pushing_game |= shift_phase(level);
    recompile_rules(level);
    transform_phase(level);
    recompile_rules(level);
    tele_phase(level);
    let selected_level = select_phase(level, input);
    recompile_rules(level);
    done_phase(level);
    sink_phase(level);
    hot_melt_phase(level);
    defeat_phase(level);
    open_shut_phase(level);
    recompile_rules(level);
    let win = win_check(level);
    let end = end_check(level);

    TurnOutcome {
        win,
        end,
        pushing_game,
        sounds: level.sounds.clone(),
        created_levels: std::mem::take(&mut level.created_levels),
        selected_level,
    }
}

fn with_count(level: &Level, word: PropWord, round: i32) -> Vec<(SpaceId, ObjectId)> {
    let mut out = Vec::new();
    for space in level.spaces() {
        for object in space.objects() {
            if object.props.enabled_count(word) > round {
                out.push((space.id.clone(), object.id));
            }
        }
    }
    out
}

// =============================================================================
// YOU
// =============================================================================

/// Moves every YOU object, tier by tier. Returns the pushing-game flag.
fn you_phase(level: &mut Level, orient: Orient) -> bool {
    let mut pushing_game = false;
    for round in 0..MAX_ROUNDS {
        let movers = with_count(level, PropWord::You, round);
        if movers.is_empty() {
            break;
        }
        let mut steps = Vec::new();
        for (space_id, id) in movers {
            if let Some(object) = level.space_mut(&space_id).and_then(|s| s.get_mut(id)) {
                object.orient = orient;
            }
            match resolve_move(level, &space_id, id, orient) {
                Some(sub) => steps.extend(sub),
                None => pushing_game = true,
            }
        }
        apply_moves(level, &steps);
    }
    pushing_game
}

// =============================================================================
// MOVE
// =============================================================================

/// Self-movers walk their own facing; a blocked mover turns around once.
fn move_phase(level: &mut Level) -> bool {
    let mut pushing_game = false;

    // Scoped MOVE nudges the whole scope downward, once per tier.
    let level_nudges = level.level_props.enabled_count(PropWord::Move);
    for _ in 0..level_nudges {
        nudge_down(level, None);
    }
    for space_id in level.space_ids() {
        let nudges = level
            .space(&space_id)
            .map(|space| {
                parable_world::SpaceVariant::ALL
                    .iter()
                    .map(|v| space.variant_props(*v).enabled_count(PropWord::Move))
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0);
        for _ in 0..nudges {
            nudge_down(level, Some(&space_id));
        }
    }

    for round in 0..MAX_ROUNDS {
        let movers = with_count(level, PropWord::Move, round);
        if movers.is_empty() {
            break;
        }
        for (space_id, id) in movers {
            let Some(orient) = level
                .space(&space_id)
                .and_then(|s| s.get(id))
                .map(|o| o.orient)
            else {
                continue;
            };
            if let Some(steps) = resolve_move(level, &space_id, id, orient) {
                apply_moves(level, &steps);
                continue;
            }
            // Turn around and try once more.
            let flipped = orient.opposite();
            if let Some(object) = level.space_mut(&space_id).and_then(|s| s.get_mut(id)) {
                object.orient = flipped;
            }
            match resolve_move(level, &space_id, id, flipped) {
                Some(steps) => apply_moves(level, &steps),
                None => pushing_game = true,
            }
        }
    }
    pushing_game
}

fn nudge_down(level: &mut Level, only: Option<&SpaceId>) {
    let mut targets: Vec<(SpaceId, ObjectId)> = Vec::new();
    for space in level.spaces() {
        if only.is_some_and(|id| id != &space.id) {
            continue;
        }
        for object in space.objects() {
            targets.push((space.id.clone(), object.id));
        }
    }
    for (space_id, id) in targets {
        if let Some(steps) = resolve_move(level, &space_id, id, Orient::Down) {
            apply_moves(level, &steps);
        }
    }
}

// =============================================================================
// SHIFT
// =============================================================================

/// SHIFT objects carry whatever stands on them, float parity respected.
fn shift_phase(level: &mut Level) -> bool {
    let mut pushing_game = false;

    // Scoped SHIFT nudges downward the same way scoped MOVE does.
    let level_nudges = level.level_props.enabled_count(PropWord::Shift);
    for _ in 0..level_nudges {
        nudge_down(level, None);
    }
    for space_id in level.space_ids() {
        let nudges = level
            .space(&space_id)
            .map(|space| {
                parable_world::SpaceVariant::ALL
                    .iter()
                    .map(|v| space.variant_props(*v).enabled_count(PropWord::Shift))
                    .max()
                    .unwrap_or(0)
            })
            .unwrap_or(0);
        for _ in 0..nudges {
            nudge_down(level, Some(&space_id));
        }
    }

    for round in 0..MAX_ROUNDS {
        let shifters = with_count(level, PropWord::Shift, round);
        if shifters.is_empty() {
            break;
        }
        let mut steps = Vec::new();
        for (space_id, shifter_id) in shifters {
            let Some(space) = level.space(&space_id) else {
                continue;
            };
            let Some(shifter) = space.get(shifter_id) else {
                continue;
            };
            let orient = shifter.orient;
            let passengers: Vec<ObjectId> = space
                .objects_at(shifter.pos)
                .filter(|o| o.id != shifter_id && parable_world::same_float(shifter, o))
                .map(|o| o.id)
                .collect();
            for passenger in passengers {
                match resolve_move(level, &space_id, passenger, orient) {
                    Some(sub) => steps.extend(sub),
                    None => pushing_game = true,
                }
            }
        }
        apply_moves(level, &steps);
    }
    pushing_game
}

// =============================================================================
// SELECT
// =============================================================================

/// On a wait, a SELECT object standing on a level reference picks it; on a
/// move, SELECT objects slide without any push mechanics.
fn select_phase(level: &mut Level, input: Input) -> Option<LevelId> {
    match input {
        Input::Wait => {
            let mut chosen: Option<LevelId> = None;
            'search: for space in level.spaces() {
                for selector in space.objects() {
                    if !level.enabled_for(selector, PropWord::Select) {
                        continue;
                    }
                    for other in space.objects_at(selector.pos) {
                        if let parable_world::Body::LevelRef { id } = &other.body {
                            chosen = Some(id.clone());
                            break 'search;
                        }
                    }
                }
            }
            if chosen.is_some() {
                level.emit(Sound::Select);
            }
            chosen
        }
        Input::Move(orient) => {
            let mut slides: Vec<(SpaceId, ObjectId, parable_foundation::Point)> = Vec::new();
            for space in level.spaces() {
                for selector in space.objects() {
                    if !level.enabled_for(selector, PropWord::Select) {
                        continue;
                    }
                    let next = selector.pos.step(orient);
                    if !space.out_of_range(next) {
                        slides.push((space.id.clone(), selector.id, next));
                    }
                }
            }
            for (space_id, id, pos) in slides {
                if let Some(space) = level.space_mut(&space_id) {
                    space.relocate(id, pos);
                }
            }
            None
        }
    }
}
