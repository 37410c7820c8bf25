//! Whole turns through the public API: rules, movement, terminal checks.

use parable::engine::{Input, play_turn};
use parable::foundation::{LevelId, ObjectId, Orient, Point, Size, SpaceId};
use parable::lexicon::{EntityKind, OperWord, PropWord, Token, Word};
use parable::world::{Body, Level, Object, Sound, Space};

fn text(id: u64, x: i32, y: i32, token: Token) -> Object {
    Object::new(ObjectId(id), Point::new(x, y), Body::Text(token))
}

fn is_token() -> Token {
    Token::of(Word::Oper(OperWord::Is))
}

/// An empty board with BABA IS YOU along the top.
fn playable() -> Level {
    let mut space = Space::new(SpaceId::new("main"), Size::new(12, 12));
    space.insert(text(100, 0, 0, Token::entity_noun(EntityKind::Baba)));
    space.insert(text(101, 1, 0, is_token()));
    space.insert(text(102, 2, 0, Token::prop(PropWord::You)));
    Level::new(LevelId::new("turns"), space, 31)
}

fn spell(level: &mut Level, y: i32, tokens: &[Token]) {
    let root = level.root.clone();
    let space = level.space_mut(&root).unwrap();
    for (i, &token) in tokens.iter().enumerate() {
        #[allow(clippy::cast_possible_wrap)]
        let x = i as i32;
        space.insert(text(
            500 + u64::from(y.unsigned_abs()) * 50 + i as u64,
            x,
            y,
            token,
        ));
    }
}

#[test]
fn walk_push_win() {
    let mut level = playable();
    let root = level.root.clone();
    spell(&mut level, 1, &[
        Token::entity_noun(EntityKind::Rock),
        is_token(),
        Token::prop(PropWord::Push),
    ]);
    spell(&mut level, 2, &[
        Token::entity_noun(EntityKind::Flag),
        is_token(),
        Token::prop(PropWord::Win),
    ]);
    let _ = level.spawn(&root, Point::new(5, 6), Body::Plain(EntityKind::Baba));
    let _ = level.spawn(&root, Point::new(6, 6), Body::Plain(EntityKind::Rock));
    let _ = level.spawn(&root, Point::new(6, 6), Body::Plain(EntityKind::Flag));

    // Pushing the rock off the flag and stepping onto it wins.
    let outcome = play_turn(&mut level, Input::Move(Orient::Right));
    assert!(outcome.win);
    assert!(outcome.sounds.contains(&Sound::Move));
    assert!(outcome.sounds.contains(&Sound::Win));
}

#[test]
fn float_mismatch_defers_the_win() {
    let mut level = playable();
    let root = level.root.clone();
    spell(&mut level, 1, &[
        Token::entity_noun(EntityKind::Flag),
        is_token(),
        Token::prop(PropWord::Win),
    ]);
    spell(&mut level, 2, &[
        Token::entity_noun(EntityKind::Flag),
        is_token(),
        Token::prop(PropWord::Float),
    ]);
    let _ = level.spawn(&root, Point::new(5, 6), Body::Plain(EntityKind::Baba));
    let _ = level.spawn(&root, Point::new(6, 6), Body::Plain(EntityKind::Flag));
    let outcome = play_turn(&mut level, Input::Move(Orient::Right));
    assert!(!outcome.win);
}

#[test]
fn sink_destroys_the_walker() {
    let mut level = playable();
    let root = level.root.clone();
    spell(&mut level, 1, &[
        Token::entity_noun(EntityKind::Water),
        is_token(),
        Token::prop(PropWord::Sink),
    ]);
    let baba = level
        .spawn(&root, Point::new(5, 6), Body::Plain(EntityKind::Baba))
        .unwrap();
    let water = level
        .spawn(&root, Point::new(6, 6), Body::Plain(EntityKind::Water))
        .unwrap();
    let outcome = play_turn(&mut level, Input::Move(Orient::Right));
    assert!(!outcome.win);
    assert!(outcome.sounds.contains(&Sound::Sink));
    let space = level.space(&root).unwrap();
    assert!(space.get(baba).is_none());
    assert!(space.get(water).is_none());
}

#[test]
fn vertical_rules_grant_through_a_turn() {
    let mut level = playable();
    let root = level.root.clone();
    {
        let space = level.space_mut(&root).unwrap();
        space.insert(text(200, 6, 2, Token::entity_noun(EntityKind::Rock)));
        space.insert(text(201, 6, 3, is_token()));
        space.insert(text(202, 6, 4, Token::prop(PropWord::Win)));
    }
    let rock = level
        .spawn(&root, Point::new(2, 8), Body::Plain(EntityKind::Rock))
        .unwrap();
    let outcome = play_turn(&mut level, Input::Wait);
    assert!(!outcome.win);
    let space = level.space(&root).unwrap();
    assert!(space.get(rock).unwrap().enabled(PropWord::Win));
}

#[test]
fn transform_rule_rewrites_objects() {
    let mut level = playable();
    let root = level.root.clone();
    spell(&mut level, 1, &[
        Token::entity_noun(EntityKind::Rock),
        is_token(),
        Token::entity_noun(EntityKind::Key),
    ]);
    let rock = level
        .spawn(&root, Point::new(5, 6), Body::Plain(EntityKind::Rock))
        .unwrap();
    play_turn(&mut level, Input::Wait);
    let space = level.space(&root).unwrap();
    assert!(space.get(rock).is_none());
    assert!(
        space
            .objects_at(Point::new(5, 6))
            .any(|o| o.body == Body::Plain(EntityKind::Key))
    );
}

#[test]
fn has_rule_spawns_on_destruction() {
    let mut level = playable();
    let root = level.root.clone();
    spell(&mut level, 1, &[
        Token::entity_noun(EntityKind::Water),
        is_token(),
        Token::prop(PropWord::Sink),
    ]);
    spell(&mut level, 2, &[
        Token::entity_noun(EntityKind::Baba),
        Token::of(Word::Oper(OperWord::Has)),
        Token::entity_noun(EntityKind::Flag),
    ]);
    let _ = level.spawn(&root, Point::new(5, 6), Body::Plain(EntityKind::Baba));
    let _ = level.spawn(&root, Point::new(6, 6), Body::Plain(EntityKind::Water));
    play_turn(&mut level, Input::Move(Orient::Right));
    let space = level.space(&root).unwrap();
    // The drowned baba left a flag behind.
    assert!(
        space
            .objects_at(Point::new(6, 6))
            .any(|o| o.body == Body::Plain(EntityKind::Flag))
    );
}

#[test]
fn outcome_surfaces_created_levels() {
    let mut level = playable();
    let root = level.root.clone();
    spell(&mut level, 1, &[
        Token::entity_noun(EntityKind::Rock),
        is_token(),
        Token::of(Word::Noun(parable::lexicon::NounWord::Level)),
    ]);
    let _ = level.spawn(&root, Point::new(5, 6), Body::Plain(EntityKind::Rock));
    let outcome = play_turn(&mut level, Input::Wait);
    assert_eq!(outcome.created_levels.len(), 1);
    assert!(level.created_levels.is_empty());
}

#[test]
fn turn_sequencing_is_deterministic() {
    let build = || {
        let mut level = playable();
        let root = level.root.clone();
        spell(&mut level, 1, &[
            Token::entity_noun(EntityKind::Rock),
            is_token(),
            Token::prop(PropWord::Push),
        ]);
        let _ = level.spawn(&root, Point::new(5, 6), Body::Plain(EntityKind::Baba));
        let _ = level.spawn(&root, Point::new(6, 6), Body::Plain(EntityKind::Rock));
        level
    };
    let mut a = build();
    let mut b = build();
    for input in [
        Input::Move(Orient::Right),
        Input::Move(Orient::Down),
        Input::Wait,
        Input::Move(Orient::Left),
    ] {
        let oa = play_turn(&mut a, input);
        let ob = play_turn(&mut b, input);
        assert_eq!(oa.sounds, ob.sounds);
        assert_eq!(oa.win, ob.win);
    }
}
