//! Serialization round trips over nested space graphs.

use parable::engine::{Input, play_turn, recompile_rules};
use parable::foundation::{LevelId, ObjectId, Orient, Point, Size, SpaceId, SpaceTransform};
use parable::lexicon::{Catalog, EntityKind, OperWord, PropWord, Token, Word};
use parable::runtime::{from_bytes, from_json, level_to_record, to_bytes, to_json};
use parable::world::{Body, Level, Object, Space, SpaceVariant};

fn nested_level() -> Level {
    let mut root = Space::new(SpaceId::new("main"), Size::new(8, 8));
    root.insert(Object::new(
        ObjectId(1),
        Point::new(0, 0),
        Body::Text(Token::entity_noun(EntityKind::Baba)),
    ));
    root.insert(Object::new(
        ObjectId(2),
        Point::new(1, 0),
        Body::Text(Token::of(Word::Oper(OperWord::Is))),
    ));
    root.insert(Object::new(
        ObjectId(3),
        Point::new(2, 0),
        Body::Text(Token::prop(PropWord::You)),
    ));
    let mut level = Level::new(LevelId::new("persisted"), root, 0);
    let root_id = level.root.clone();

    let pocket_id = SpaceId::new("pocket");
    let mut pocket = Space::new(pocket_id.clone(), Size::new(3, 3));
    pocket.color = Some(0x0020_40);
    level.insert_space(pocket);
    // The pocket contains itself, so the nesting graph has a true cycle.
    let _ = level.spawn(
        &pocket_id,
        Point::new(1, 1),
        Body::SpaceRef {
            id: pocket_id.clone(),
            variant: SpaceVariant::Clone,
            transform: SpaceTransform::new(Orient::Left, true),
        },
    );
    let _ = level.spawn(
        &root_id,
        Point::new(4, 4),
        Body::SpaceRef {
            id: pocket_id.clone(),
            variant: SpaceVariant::Space,
            transform: SpaceTransform::IDENTITY,
        },
    );
    let _ = level.spawn(&root_id, Point::new(3, 3), Body::Plain(EntityKind::Baba));
    let _ = level.spawn(
        &root_id,
        Point::new(5, 5),
        Body::Text(Token::entity_noun(EntityKind::Rock).meta()),
    );
    level
}

#[test]
fn messagepack_preserves_the_graph() {
    let catalog = Catalog::new();
    let level = nested_level();
    let bytes = to_bytes(&level, &catalog).unwrap();
    let reloaded = from_bytes(&bytes, &catalog).unwrap();
    assert_eq!(
        level_to_record(&level, &catalog),
        level_to_record(&reloaded, &catalog)
    );
}

#[test]
fn json_preserves_the_graph() {
    let catalog = Catalog::new();
    let level = nested_level();
    let json = to_json(&level, &catalog).unwrap();
    let reloaded = from_json(&json, &catalog).unwrap();
    assert_eq!(
        level_to_record(&level, &catalog),
        level_to_record(&reloaded, &catalog)
    );
}

#[test]
fn identities_regenerate_but_positions_hold() {
    let catalog = Catalog::new();
    let level = nested_level();
    let bytes = to_bytes(&level, &catalog).unwrap();
    let reloaded = from_bytes(&bytes, &catalog).unwrap();
    let root = reloaded.root.clone();
    let baba: Vec<_> = reloaded
        .space(&root)
        .unwrap()
        .objects()
        .filter(|o| o.body == Body::Plain(EntityKind::Baba))
        .collect();
    assert_eq!(baba.len(), 1);
    assert_eq!(baba[0].pos, Point::new(3, 3));
}

#[test]
fn reloaded_level_recompiles_identically() {
    let catalog = Catalog::new();
    let mut level = nested_level();
    let bytes = to_bytes(&level, &catalog).unwrap();
    let mut reloaded = from_bytes(&bytes, &catalog).unwrap();

    recompile_rules(&mut level);
    recompile_rules(&mut reloaded);
    let root = level.root.clone();
    let you = Token::prop(PropWord::You);
    let enabled = |lvl: &Level| {
        lvl.space(&root)
            .unwrap()
            .objects()
            .filter(|o| o.props.enabled(you))
            .count()
    };
    assert_eq!(enabled(&level), enabled(&reloaded));
    assert_eq!(enabled(&level), 1);
}

#[test]
fn reloaded_level_plays_identically() {
    let catalog = Catalog::new();
    let mut level = nested_level();
    let bytes = to_bytes(&level, &catalog).unwrap();
    let mut reloaded = from_bytes(&bytes, &catalog).unwrap();
    let a = play_turn(&mut level, Input::Move(Orient::Right));
    let b = play_turn(&mut reloaded, Input::Move(Orient::Right));
    assert_eq!(a.sounds, b.sounds);
    assert_eq!(
        level_to_record(&level, &catalog),
        level_to_record(&reloaded, &catalog)
    );
}
