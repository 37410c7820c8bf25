//! Push chains, stops, and move execution.

use parable::foundation::{LevelId, Orient, Point, Size, SpaceId};
use parable::lexicon::{EntityKind, PropWord, Token};
use parable::motion::{apply_moves, resolve_move};
use parable::world::{Body, Level, Sound, Space};

fn fresh_level() -> Level {
    let root = Space::new(SpaceId::new("main"), Size::new(8, 8));
    Level::new(LevelId::new("motion"), root, 17)
}

fn spawn(
    level: &mut Level,
    x: i32,
    y: i32,
    kind: EntityKind,
    props: &[PropWord],
) -> parable::foundation::ObjectId {
    let root = level.root.clone();
    let id = level
        .spawn(&root, Point::new(x, y), Body::Plain(kind))
        .unwrap();
    let object = level.space_mut(&root).unwrap().get_mut(id).unwrap();
    for &word in props {
        object.props.grant(Token::prop(word), 0);
    }
    id
}

#[test]
fn push_into_empty_cell_moves_both() {
    let mut level = fresh_level();
    let root = level.root.clone();
    let baba = spawn(&mut level, 2, 2, EntityKind::Baba, &[PropWord::You]);
    let rock = spawn(&mut level, 3, 2, EntityKind::Rock, &[PropWord::Push]);
    let steps = resolve_move(&mut level, &root, baba, Orient::Right).unwrap();
    apply_moves(&mut level, &steps);
    let space = level.space(&root).unwrap();
    assert_eq!(space.get(baba).unwrap().pos, Point::new(3, 2));
    assert_eq!(space.get(rock).unwrap().pos, Point::new(4, 2));
    assert!(level.sounds.contains(&Sound::Move));
}

#[test]
fn push_against_stop_blocks_and_returns_none() {
    let mut level = fresh_level();
    let root = level.root.clone();
    let baba = spawn(&mut level, 2, 2, EntityKind::Baba, &[PropWord::You]);
    let rock = spawn(&mut level, 3, 2, EntityKind::Rock, &[PropWord::Push]);
    spawn(&mut level, 4, 2, EntityKind::Wall, &[PropWord::Stop]);
    assert!(resolve_move(&mut level, &root, baba, Orient::Right).is_none());
    let space = level.space(&root).unwrap();
    assert_eq!(space.get(baba).unwrap().pos, Point::new(2, 2));
    assert_eq!(space.get(rock).unwrap().pos, Point::new(3, 2));
}

#[test]
fn chain_of_pushables_all_advance() {
    let mut level = fresh_level();
    let root = level.root.clone();
    let baba = spawn(&mut level, 1, 1, EntityKind::Baba, &[PropWord::You]);
    let a = spawn(&mut level, 2, 1, EntityKind::Rock, &[PropWord::Push]);
    let b = spawn(&mut level, 3, 1, EntityKind::Box, &[PropWord::Push]);
    let c = spawn(&mut level, 4, 1, EntityKind::Key, &[PropWord::Push]);
    let steps = resolve_move(&mut level, &root, baba, Orient::Right).unwrap();
    assert_eq!(steps.len(), 4);
    apply_moves(&mut level, &steps);
    let space = level.space(&root).unwrap();
    assert_eq!(space.get(baba).unwrap().pos, Point::new(2, 1));
    assert_eq!(space.get(a).unwrap().pos, Point::new(3, 1));
    assert_eq!(space.get(b).unwrap().pos, Point::new(4, 1));
    assert_eq!(space.get(c).unwrap().pos, Point::new(5, 1));
}

#[test]
fn objects_without_stop_or_push_are_walked_over() {
    let mut level = fresh_level();
    let root = level.root.clone();
    let baba = spawn(&mut level, 2, 2, EntityKind::Baba, &[PropWord::You]);
    spawn(&mut level, 3, 2, EntityKind::Tile, &[]);
    let steps = resolve_move(&mut level, &root, baba, Orient::Right).unwrap();
    assert_eq!(steps.len(), 1);
    apply_moves(&mut level, &steps);
    assert_eq!(
        level.space(&root).unwrap().get(baba).unwrap().pos,
        Point::new(3, 2)
    );
}

#[test]
fn applying_no_steps_stays_silent() {
    let mut level = fresh_level();
    apply_moves(&mut level, &[]);
    assert!(level.sounds.is_empty());
}
