//! The movement resolver and move-list execution.
//!
//! Branches are tried in a fixed priority and the first applicable one
//! decides the outcome:
//! 1. exit - the destination is outside the space and a container takes
//!    the mover, continuous position preserved through the boundary
//! 2. push - every pushable occupant of the destination must itself move
//! 3. simple - nothing stops the mover
//! 4. squeeze - a pushed space reference absorbs the destination's
//!    occupants into its own interior
//! 5. enter - the mover steps inside a space reference that would not push
//!
//! `pushed` carries the objects already acting as push sources in this call
//! chain (re-entry is a cycle and fails); `passed` carries the spaces
//! already crossed, which is how "exiting forever" and "entering forever"
//! are recognized and continued one infinite tier up or down instead of
//! looping. Depth beyond [`MAX_DEPTH`] reads as "cannot move", never as an
//! error.

use parable_foundation::{ObjectId, Orient, Point, SpaceId};
use parable_lexicon::{PropWord, Token};
use parable_world::{Body, Level, Object, Sound};

/// Recursion ceiling for one resolution chain.
pub const MAX_DEPTH: u32 = 128;

/// One entry of a resolved move list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveStep {
    /// The object to move.
    pub object: ObjectId,
    /// Where it currently lives.
    pub from: SpaceId,
    /// Where it ends up.
    pub to: SpaceId,
    /// Destination cell.
    pub pos: Point,
    /// Facing after the move.
    pub orient: Orient,
}

/// Resolves one motion attempt for an object in a space.
///
/// Returns `None` exactly when the object cannot move this way.
#[must_use]
pub fn resolve_move(
    level: &mut Level,
    space_id: &SpaceId,
    object_id: ObjectId,
    orient: Orient,
) -> Option<Vec<MoveStep>> {
    let mover = level.space(space_id)?.get(object_id)?.clone();
    let pos = mover.pos;
    resolve(level, space_id, &mover, space_id, orient, pos, &[], &[], None, 0)
}

/// Executes a move list: deduplicates, keeps identity inside one space,
/// recreates under a fresh identity across spaces, and emits one move
/// sound if anything happened.
pub fn apply_moves(level: &mut Level, steps: &[MoveStep]) {
    let steps = dedup(steps);
    for step in &steps {
        if step.from == step.to {
            level.move_within(&step.to, step.object, step.pos, step.orient);
        } else {
            level.transfer(&step.from, step.object, &step.to, step.pos, step.orient);
        }
    }
    if !steps.is_empty() {
        level.emit_once(Sound::Move);
    }
}

fn dedup(steps: &[MoveStep]) -> Vec<MoveStep> {
    let mut out: Vec<MoveStep> = Vec::with_capacity(steps.len());
    for step in steps {
        if !out.contains(step) {
            out.push(step.clone());
        }
    }
    out
}

// =============================================================================
// Core recursion
// =============================================================================

#[allow(clippy::too_many_arguments, clippy::too_many_lines)]
fn resolve(
    level: &mut Level,
    space_id: &SpaceId,
    mover: &Object,
    home: &SpaceId,
    orient: Orient,
    pos: Point,
    pushed: &[ObjectId],
    passed: &[SpaceId],
    transnum: Option<f64>,
    depth: u32,
) -> Option<Vec<MoveStep>> {
    if depth > MAX_DEPTH {
        return None;
    }
    if pushed.contains(&mover.id) {
        return None;
    }
    let dest = pos.step(orient);

    // Branch 1: exit.
    if level.space(space_id)?.out_of_range(dest) {
        return try_exit(
            level, space_id, mover, home, orient, pos, pushed, passed, transnum, depth,
        );
    }
    let space = level.space(space_id)?;

    let simple = MoveStep {
        object: mover.id,
        from: home.clone(),
        to: space_id.clone(),
        pos: dest,
        orient,
    };

    // Occupants, split by how they resist.
    let dest_ids = space.ids_at(dest);
    let mut stoppers: Vec<ObjectId> = Vec::new();
    let mut pushables: Vec<ObjectId> = Vec::new();
    for &id in &dest_ids {
        let Some(occupant) = space.get(id) else {
            continue;
        };
        if level.enabled_for(occupant, PropWord::Push) {
            pushables.push(id);
        } else if level.enabled_for(occupant, PropWord::Stop) {
            stoppers.push(id);
        }
    }

    // Door logic: an OPEN mover walks into SHUT stoppers and vice versa;
    // the pair annihilates in the terminal phase.
    if !stoppers.is_empty() {
        let mover_open = level.enabled_for(mover, PropWord::Open);
        let mover_shut = level.enabled_for(mover, PropWord::Shut);
        let passes = |id: ObjectId| {
            let space = level.space(space_id)?;
            let occupant = space.get(id)?;
            let opens = mover_open && level.enabled_for(occupant, PropWord::Shut);
            let shuts = mover_shut && level.enabled_for(occupant, PropWord::Open);
            Some(opens || shuts)
        };
        if stoppers.iter().any(|&id| passes(id) == Some(true)) {
            return Some(vec![simple]);
        }
        // An unpaired stopper vetoes every in-bounds branch.
        return None;
    }

    // Branch 2: push.
    let mut cannot_push: Vec<ObjectId> = Vec::new();
    if !pushables.is_empty() {
        let mut steps: Vec<MoveStep> = Vec::new();
        let mut all_moved = true;
        let mut pushed_here = pushed.to_vec();
        pushed_here.push(mover.id);
        for &id in &pushables {
            let Some(occupant) = level.space(space_id).and_then(|s| s.get(id)).cloned() else {
                continue;
            };
            let occupant_pos = occupant.pos;
            match resolve(
                level,
                space_id,
                &occupant,
                space_id,
                orient,
                occupant_pos,
                &pushed_here,
                passed,
                None,
                depth + 1,
            ) {
                Some(sub) => steps.extend(sub),
                None => {
                    all_moved = false;
                    if occupant.body.space_ref().is_some() {
                        // Kept aside: branch 5 may still walk inside it.
                        cannot_push.push(id);
                    }
                }
            }
        }
        if all_moved {
            steps.push(simple);
            return Some(dedup(&steps));
        }
    }

    // Branch 3: simple.
    if pushables.is_empty() {
        return Some(vec![simple]);
    }

    // Branch 4: squeeze.
    if let Some(steps) = try_squeeze(
        level, space_id, mover, home, orient, pos, dest, &pushables, pushed, passed, depth,
    ) {
        return Some(steps);
    }

    // Branch 5: enter.
    if !cannot_push.is_empty() && !level.disabled_for(mover, PropWord::Enter) {
        if let Some(steps) = try_enter(
            level,
            space_id,
            mover,
            home,
            orient,
            &cannot_push,
            pushed,
            passed,
            transnum,
            depth,
        ) {
            return Some(steps);
        }
    }

    None
}

// =============================================================================
// Branch 1: exit
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn try_exit(
    level: &mut Level,
    space_id: &SpaceId,
    mover: &Object,
    home: &SpaceId,
    orient: Orient,
    pos: Point,
    pushed: &[ObjectId],
    passed: &[SpaceId],
    transnum: Option<f64>,
    depth: u32,
) -> Option<Vec<MoveStep>> {
    if level.disabled_for(mover, PropWord::Leave) {
        return None;
    }

    // Exiting a space already crossed in this chain is exiting forever:
    // continue through the same space one infinite tier higher.
    let infinite = passed.contains(space_id);
    let exited = if infinite {
        space_id.shifted(1)
    } else {
        space_id.clone()
    };
    let (container_id, ref_id) = level.find_container(&exited)?;
    let container = level.space(&container_id)?;
    let ref_object = container.get(ref_id)?;
    let ref_pos = ref_object.pos;
    let (_, variant) = ref_object.body.space_ref()?;
    if level
        .space(&exited)
        .is_some_and(|s| s.leave_disabled(variant))
    {
        return None;
    }

    let container = level.space(&container_id)?;
    let new_transnum = match transnum {
        Some(t) => container.leave_transnum(t, ref_pos, orient),
        None => level.space(space_id)?.leave_transnum_from_pos(pos, orient),
    };

    let mut passed_here = passed.to_vec();
    if !infinite {
        passed_here.push(space_id.clone());
    }
    resolve(
        level,
        &container_id,
        mover,
        home,
        orient,
        ref_pos,
        pushed,
        &passed_here,
        Some(new_transnum),
        depth + 1,
    )
}

// =============================================================================
// Branch 4: squeeze
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn try_squeeze(
    level: &mut Level,
    space_id: &SpaceId,
    mover: &Object,
    home: &SpaceId,
    orient: Orient,
    pos: Point,
    dest: Point,
    pushables: &[ObjectId],
    pushed: &[ObjectId],
    passed: &[SpaceId],
    depth: u32,
) -> Option<Vec<MoveStep>> {
    let Body::SpaceRef { id: sub_id, variant, .. } = &mover.body else {
        return None;
    };
    let sub_id = sub_id.clone();
    let variant = *variant;
    if !level.enabled_for(mover, PropWord::Push) || !level.contains_space(&sub_id) {
        return None;
    }
    if level
        .space(&sub_id)
        .is_some_and(|s| s.enter_disabled(variant))
    {
        return None;
    }

    // A synthetic stopper behind the mover keeps it from sliding backward
    // while the absorption is tested.
    let behind = pos.step(orient.opposite());
    let marker = level.spawn(space_id, behind, Body::Text(Token::prop(PropWord::Stop)));
    if let Some(marker) = marker {
        if let Some(object) = level.space_mut(space_id).and_then(|s| s.get_mut(marker)) {
            object.props.grant(Token::prop(PropWord::Stop), 0);
        }
    }

    let mut pushed_here = pushed.to_vec();
    pushed_here.push(mover.id);
    let mut steps: Vec<MoveStep> = Vec::new();
    let mut absorbed_all = true;
    for &id in pushables {
        let Some(occupant) = level.space(space_id).and_then(|s| s.get(id)).cloned() else {
            continue;
        };
        if level.disabled_for(&occupant, PropWord::Enter) {
            absorbed_all = false;
            break;
        }
        let Some(entry) = level.space(&sub_id).map(|s| s.default_enter_pos(orient)) else {
            absorbed_all = false;
            break;
        };
        match resolve(
            level,
            &sub_id,
            &occupant,
            space_id,
            orient.opposite(),
            entry,
            &pushed_here,
            passed,
            None,
            depth + 1,
        ) {
            Some(sub) => steps.extend(sub),
            None => {
                absorbed_all = false;
                break;
            }
        }
    }

    if let Some(marker) = marker {
        let _ = level.space_mut(space_id).and_then(|s| s.remove(marker));
    }

    if !absorbed_all {
        return None;
    }
    steps.push(MoveStep {
        object: mover.id,
        from: home.clone(),
        to: space_id.clone(),
        pos: dest,
        orient,
    });
    Some(dedup(&steps))
}

// =============================================================================
// Branch 5: enter
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn try_enter(
    level: &mut Level,
    space_id: &SpaceId,
    mover: &Object,
    home: &SpaceId,
    orient: Orient,
    blocked_refs: &[ObjectId],
    pushed: &[ObjectId],
    passed: &[SpaceId],
    transnum: Option<f64>,
    depth: u32,
) -> Option<Vec<MoveStep>> {
    let side = orient.opposite();
    let mut steps: Vec<MoveStep> = Vec::new();
    for &ref_id in blocked_refs {
        let ref_object = level.space(space_id)?.get(ref_id)?.clone();
        let (sub_id, variant) = ref_object.body.space_ref()?;
        let sub_id = sub_id.clone();
        if level
            .space(&sub_id)
            .is_some_and(|s| s.enter_disabled(variant))
        {
            return None;
        }

        let sub_steps = if passed.contains(&sub_id) {
            // Entering forever: continue one infinite tier lower, landing
            // mid-edge.
            let deeper_id = sub_id.shifted(-1);
            let entry = level.space(&deeper_id)?.default_enter_pos(side);
            let mut passed_here = passed.to_vec();
            passed_here.push(space_id.clone());
            resolve(
                level,
                &deeper_id,
                mover,
                home,
                orient,
                entry,
                pushed,
                &passed_here,
                Some(0.5),
                depth + 1,
            )
        } else {
            let (new_transnum, entry) = match transnum {
                Some(t) => {
                    let inner = level.space(space_id)?.enter_transnum(t, ref_object.pos, side);
                    let entry = level.space(&sub_id)?.enter_pos(inner, side);
                    (inner, entry)
                }
                None => (0.5, level.space(&sub_id)?.default_enter_pos(side)),
            };
            let mut passed_here = passed.to_vec();
            passed_here.push(space_id.clone());
            resolve(
                level,
                &sub_id,
                mover,
                home,
                orient,
                entry,
                pushed,
                &passed_here,
                Some(new_transnum),
                depth + 1,
            )
        };
        steps.extend(sub_steps?);
    }
    Some(dedup(&steps))
}
