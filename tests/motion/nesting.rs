//! Boundary crossings: exits, enters, and self-similar nesting.

use parable::foundation::{LevelId, Orient, Point, Size, SpaceId, SpaceTransform};
use parable::lexicon::{EntityKind, PropWord, Token};
use parable::motion::{apply_moves, resolve_move};
use parable::world::{Body, Level, Space, SpaceVariant};

fn level_with_root(width: i32, height: i32) -> Level {
    let root = Space::new(SpaceId::new("outer"), Size::new(width, height));
    Level::new(LevelId::new("nesting"), root, 23)
}

fn space_ref(id: &SpaceId) -> Body {
    Body::SpaceRef {
        id: id.clone(),
        variant: SpaceVariant::Space,
        transform: SpaceTransform::IDENTITY,
    }
}

fn grant(level: &mut Level, space: &SpaceId, id: parable::foundation::ObjectId, word: PropWord) {
    level
        .space_mut(space)
        .unwrap()
        .get_mut(id)
        .unwrap()
        .props
        .grant(Token::prop(word), 0);
}

#[test]
fn exiting_regenerates_identity_at_the_reference() {
    let mut level = level_with_root(7, 7);
    let root = level.root.clone();
    let inner_id = SpaceId::new("inner");
    level.insert_space(Space::new(inner_id.clone(), Size::new(3, 3)));
    let _ = level.spawn(&root, Point::new(3, 3), space_ref(&inner_id));
    let baba = level
        .spawn(&inner_id, Point::new(2, 1), Body::Plain(EntityKind::Baba))
        .unwrap();
    grant(&mut level, &inner_id, baba, PropWord::You);

    let steps = resolve_move(&mut level, &inner_id, baba, Orient::Right).unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].to, root);
    assert_eq!(steps[0].pos, Point::new(4, 3));
    apply_moves(&mut level, &steps);

    // Gone from the inner space, present outside under a fresh id.
    assert!(level.space(&inner_id).unwrap().get(baba).is_none());
    let outside: Vec<_> = level
        .space(&root)
        .unwrap()
        .objects()
        .filter(|o| o.body == Body::Plain(EntityKind::Baba))
        .collect();
    assert_eq!(outside.len(), 1);
    assert_ne!(outside[0].id, baba);
    assert_eq!(outside[0].pos, Point::new(4, 3));
}

#[test]
fn exit_lands_one_step_past_the_reference() {
    let mut level = level_with_root(8, 8);
    let root = level.root.clone();
    let inner_id = SpaceId::new("inner");
    level.insert_space(Space::new(inner_id.clone(), Size::new(2, 2)));
    let _ = level.spawn(&root, Point::new(4, 4), space_ref(&inner_id));
    let baba = level
        .spawn(&inner_id, Point::new(1, 1), Body::Plain(EntityKind::Baba))
        .unwrap();
    let steps = resolve_move(&mut level, &inner_id, baba, Orient::Right).unwrap();
    assert_eq!(steps[0].pos, Point::new(5, 4));
}

#[test]
fn blocked_reference_is_entered_through_the_facing_edge() {
    let mut level = level_with_root(7, 7);
    let root = level.root.clone();
    let inner_id = SpaceId::new("inner");
    level.insert_space(Space::new(inner_id.clone(), Size::new(5, 5)));
    let sref = level
        .spawn(&root, Point::new(3, 3), space_ref(&inner_id))
        .unwrap();
    grant(&mut level, &root, sref, PropWord::Push);
    let wall = level
        .spawn(&root, Point::new(4, 3), Body::Plain(EntityKind::Wall))
        .unwrap();
    grant(&mut level, &root, wall, PropWord::Stop);
    let baba = level
        .spawn(&root, Point::new(2, 3), Body::Plain(EntityKind::Baba))
        .unwrap();

    let steps = resolve_move(&mut level, &root, baba, Orient::Right).unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].to, inner_id);
    assert_eq!(steps[0].pos, Point::new(0, 2));
    apply_moves(&mut level, &steps);
    assert!(level.space(&root).unwrap().get(baba).is_none());
}

#[test]
fn enter_disabled_space_stays_shut() {
    let mut level = level_with_root(7, 7);
    let root = level.root.clone();
    let inner_id = SpaceId::new("inner");
    level.insert_space(Space::new(inner_id.clone(), Size::new(5, 5)));
    level
        .space_mut(&inner_id)
        .unwrap()
        .variant_props_mut(SpaceVariant::Space)
        .grant(Token::prop(PropWord::Enter), 1);
    let sref = level
        .spawn(&root, Point::new(3, 3), space_ref(&inner_id))
        .unwrap();
    grant(&mut level, &root, sref, PropWord::Push);
    let wall = level
        .spawn(&root, Point::new(4, 3), Body::Plain(EntityKind::Wall))
        .unwrap();
    grant(&mut level, &root, wall, PropWord::Stop);
    let baba = level
        .spawn(&root, Point::new(2, 3), Body::Plain(EntityKind::Baba))
        .unwrap();
    assert!(resolve_move(&mut level, &root, baba, Orient::Right).is_none());
}

#[test]
fn self_similar_exit_climbs_a_tier() {
    // The root contains itself; an object walking out exits "forever",
    // which continues through the copy one infinite tier up.
    let mut level = level_with_root(3, 3);
    let root = level.root.clone();
    let upper = root.shifted(1);
    level.insert_space(Space::new(upper.clone(), Size::new(3, 3)));
    // The tier-0 root sits inside the tier-1 copy, and the tier-1 copy
    // inside the tier-0 root.
    let _ = level.spawn(&upper, Point::new(1, 1), space_ref(&root));
    let _ = level.spawn(&root, Point::new(0, 1), space_ref(&upper));
    let baba = level
        .spawn(&root, Point::new(2, 1), Body::Plain(EntityKind::Baba))
        .unwrap();
    let steps = resolve_move(&mut level, &root, baba, Orient::Right).unwrap();
    assert_eq!(steps.len(), 1);
    // First exit: into the tier-1 copy at its reference. Landing cell is
    // one step right of the reference at (1, 1).
    assert_eq!(steps[0].to, upper);
    assert_eq!(steps[0].pos, Point::new(2, 1));
}

#[test]
fn resolver_terminates_on_pathological_nesting() {
    // A deliberately unhelpful board: the mover can neither exit (no
    // container) nor do anything else, and the resolver must say so
    // rather than spin.
    let mut level = level_with_root(2, 1);
    let root = level.root.clone();
    let baba = level
        .spawn(&root, Point::new(1, 0), Body::Plain(EntityKind::Baba))
        .unwrap();
    assert!(resolve_move(&mut level, &root, baba, Orient::Right).is_none());
}
