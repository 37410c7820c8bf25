//! Creation and transformation: IS-noun rewrites, HAS, MAKE, WRITE.
//!
//! Spawning from a noun token has bespoke cases for the reference
//! categories: LEVEL and SPACE/CLONE targets wrap the source object in a
//! brand-new single-cell level or space, GAME produces a stand-in, TEXT
//! produces the text naming the source. Everything else is a plain spawn.

use parable_foundation::{LevelId, Orient, Point, Size, SpaceId};
use parable_lexicon::{Category, NounWord, Token, Word};
use parable_props::PropertyStore;
use parable_world::{Body, Level, Object, Space, SpaceVariant};

/// Spawns whatever `token` names at a cell, in the context of the object
/// (or object body) that caused the spawn.
pub fn spawn_for_token(
    level: &mut Level,
    space_id: &SpaceId,
    pos: Point,
    orient: Orient,
    token: Token,
    source: &Body,
) {
    if let Some(inner) = token.unmeta() {
        spawn_body(level, space_id, pos, orient, Body::Text(inner));
        return;
    }
    match token.word {
        Word::Noun(NounWord::Entity(kind)) => {
            spawn_body(level, space_id, pos, orient, Body::Plain(kind));
        }
        Word::Noun(NounWord::Text) => {
            spawn_body(level, space_id, pos, orient, Body::Text(source.noun()));
        }
        Word::Noun(NounWord::Game) => {
            spawn_body(level, space_id, pos, orient, Body::Game(Box::new(source.clone())));
        }
        Word::Noun(NounWord::Space) => {
            wrap_in_space(level, space_id, pos, orient, source, SpaceVariant::Space);
        }
        Word::Noun(NounWord::Clone) => {
            wrap_in_space(level, space_id, pos, orient, source, SpaceVariant::Clone);
        }
        Word::Noun(NounWord::Level) => {
            wrap_in_level(level, space_id, pos, orient, source);
        }
        // ALL and GROUP are expanded by the caller; EMPTY and plain
        // properties spawn nothing.
        _ => {}
    }
}

fn spawn_body(level: &mut Level, space_id: &SpaceId, pos: Point, orient: Orient, body: Body) {
    let id = level.alloc_id();
    if let Some(space) = level.space_mut(space_id) {
        space.insert(Object::new(id, pos, body).facing(orient));
    }
}

/// A fresh single-cell space holding a copy of the source, referenced from
/// the original cell.
fn wrap_in_space(
    level: &mut Level,
    space_id: &SpaceId,
    pos: Point,
    orient: Orient,
    source: &Body,
    variant: SpaceVariant,
) {
    let inner_obj = level.alloc_id();
    let name: std::sync::Arc<str> = format!("wrap-{}", inner_obj.0).into();
    let inner_id = SpaceId::new(name);
    let mut inner = Space::new(inner_id.clone(), Size::new(1, 1));
    inner.insert(Object::new(inner_obj, Point::new(0, 0), source.clone()));
    level.insert_space(inner);
    spawn_body(
        level,
        space_id,
        pos,
        orient,
        Body::SpaceRef {
            id: inner_id,
            variant,
            transform: parable_foundation::SpaceTransform::IDENTITY,
        },
    );
}

/// A fresh one-space level holding a copy of the source; the new level is
/// queued on `created_levels` and referenced from the original cell.
fn wrap_in_level(
    level: &mut Level,
    space_id: &SpaceId,
    pos: Point,
    orient: Orient,
    source: &Body,
) {
    // A space reference becomes a level around its own space; anything
    // else gets a new single-cell home.
    let new_level = if let Body::SpaceRef { id, .. } = source {
        if let Some(space) = level.space(id).cloned() {
            let lid = LevelId::new(format!("{}", space.id));
            Level::new(lid, space, 0)
        } else {
            return;
        }
    } else {
        let name = format!("made-{}", level.alloc_id().0);
        let mut root = Space::new(SpaceId::new(name.clone()), Size::new(1, 1));
        root.insert(Object::new(level.alloc_id(), Point::new(0, 0), source.clone()));
        Level::new(LevelId::new(name), root, 0)
    };
    let lid = new_level.id.clone();
    level.created_levels.push(new_level);
    spawn_body(level, space_id, pos, orient, Body::LevelRef { id: lid });
}

/// Removes an object and spawns everything its HAS channel granted.
pub fn destroy_object(level: &mut Level, space_id: &SpaceId, id: parable_foundation::ObjectId) {
    let Some(object) = level.space_mut(space_id).and_then(|s| s.remove(id)) else {
        return;
    };
    let grants: Vec<(Token, i32)> = object.channels.has.enabled_tokens().collect();
    for (token, count) in grants {
        for _ in 0..count {
            spawn_for_token(level, space_id, object.pos, object.orient, token, &object.body);
        }
    }
}

// =============================================================================
// The per-turn transformation phase
// =============================================================================

/// Runs MAKE, WRITE, and IS-noun transformations for the whole level.
pub fn transform_phase(level: &mut Level) {
    run_make_and_write(level);
    run_noun_transforms(level);
}

fn run_make_and_write(level: &mut Level) {
    for space_id in level.space_ids() {
        let Some(space) = level.space(&space_id) else {
            continue;
        };
        let mut makes: Vec<(Point, Orient, Token, Body)> = Vec::new();
        let mut writes: Vec<(Point, Orient, Token)> = Vec::new();
        for object in space.objects() {
            for (token, _) in object.channels.make.enabled_tokens() {
                // MAKE refills the cell only while the product is absent.
                let already = space
                    .objects_at(object.pos)
                    .any(|o| o.id != object.id && o.matches_noun(token));
                if !already {
                    makes.push((object.pos, object.orient, token, object.body.clone()));
                }
            }
            for (token, _) in object.channels.write.enabled_tokens() {
                let already = space
                    .objects_at(object.pos)
                    .any(|o| o.body.token() == Some(token));
                if !already {
                    writes.push((object.pos, object.orient, token));
                }
            }
        }
        for (pos, orient, token, body) in makes {
            spawn_for_token(level, &space_id, pos, orient, token, &body);
        }
        for (pos, orient, token) in writes {
            spawn_body(level, &space_id, pos, orient, Body::Text(token));
        }
    }
}

/// The grant store a body's transforms are read from.
fn noun_grants<'a>(level: &'a Level, object: &'a Object) -> Option<&'a PropertyStore> {
    match &object.body {
        Body::SpaceRef { id, variant, .. } => {
            level.space(id).map(|s| s.variant_props(*variant))
        }
        Body::LevelRef { .. } => Some(&level.level_props),
        Body::Game(_) => Some(&level.game_props),
        _ => None,
    }
}

fn run_noun_transforms(level: &mut Level) {
    let universe = level.all_universe();
    for space_id in level.space_ids() {
        let Some(space) = level.space(&space_id) else {
            continue;
        };
        let mut planned: Vec<(parable_foundation::ObjectId, Point, Orient, Vec<Token>, Body)> =
            Vec::new();
        for object in space.objects() {
            let scoped = noun_grants(level, object);
            let enabled: Vec<(Token, i32)> = match scoped {
                Some(store) => store.enabled_tokens().collect(),
                None => object.props.enabled_tokens().collect(),
            };
            let disabled: Vec<Token> = match scoped {
                Some(store) => store.disabled_tokens().map(|(t, _)| t).collect(),
                None => object.props.disabled_tokens().map(|(t, _)| t).collect(),
            };

            let own = object.body.noun();
            // X IS X pins the object in place.
            if enabled.iter().any(|(t, _)| *t == own) {
                continue;
            }
            let mut targets: Vec<Token> = Vec::new();
            for (token, _) in &enabled {
                if token.category() != Category::Noun {
                    continue;
                }
                match token.word {
                    Word::Noun(NounWord::Group) if token.tier == 0 => {}
                    Word::Noun(NounWord::All) if token.tier == 0 => {
                        for kind in &universe {
                            let noun = Token::entity_noun(*kind);
                            if noun != own && !disabled.contains(&noun) {
                                targets.push(noun);
                            }
                        }
                    }
                    _ => {
                        if !disabled.contains(token) {
                            targets.push(*token);
                        }
                    }
                }
            }
            if !targets.is_empty() {
                planned.push((
                    object.id,
                    object.pos,
                    object.orient,
                    targets,
                    object.body.clone(),
                ));
            }
        }
        for (id, pos, orient, targets, body) in planned {
            for token in targets {
                spawn_for_token(level, &space_id, pos, orient, token, &body);
            }
            // Replaced outright; HAS fires on destruction, not rewriting.
            let _ = level.space_mut(&space_id).and_then(|s| s.remove(id));
        }
    }
}
