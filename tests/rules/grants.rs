//! Rule application end to end: boards to property grants.

use parable::engine::recompile_rules;
use parable::foundation::{LevelId, ObjectId, Point, Size, SpaceId};
use parable::lexicon::{EntityKind, NounWord, OperWord, PropWord, Token, Word};
use parable::world::{Body, Level, Object, Space};

fn text(id: u64, x: i32, y: i32, token: Token) -> Object {
    Object::new(ObjectId(id), Point::new(x, y), Body::Text(token))
}

fn is_token() -> Token {
    Token::of(Word::Oper(OperWord::Is))
}

fn fresh_level() -> Level {
    let root = Space::new(SpaceId::new("main"), Size::new(10, 10));
    let mut level = Level::new(LevelId::new("grants"), root, 21);
    level.inherent_rules.clear();
    level
}

fn spell(level: &mut Level, y: i32, tokens: &[Token]) {
    let root = level.root.clone();
    let space = level.space_mut(&root).unwrap();
    for (i, &token) in tokens.iter().enumerate() {
        #[allow(clippy::cast_possible_wrap)]
        let x = i as i32;
        space.insert(text(900 + u64::from(y.unsigned_abs()) * 100 + i as u64, x, y, token));
    }
}

#[test]
fn text_rule_grants_matching_objects() {
    let mut level = fresh_level();
    let root = level.root.clone();
    spell(&mut level, 0, &[
        Token::entity_noun(EntityKind::Baba),
        is_token(),
        Token::prop(PropWord::You),
    ]);
    let baba = level
        .spawn(&root, Point::new(5, 5), Body::Plain(EntityKind::Baba))
        .unwrap();
    let rock = level
        .spawn(&root, Point::new(6, 5), Body::Plain(EntityKind::Rock))
        .unwrap();
    recompile_rules(&mut level);
    let space = level.space(&root).unwrap();
    assert!(space.get(baba).unwrap().enabled(PropWord::You));
    assert!(!space.get(rock).unwrap().enabled(PropWord::You));
}

#[test]
fn negated_property_disables() {
    let mut level = fresh_level();
    let root = level.root.clone();
    spell(&mut level, 0, &[
        Token::entity_noun(EntityKind::Baba),
        is_token(),
        Token::prop(PropWord::Push),
    ]);
    spell(&mut level, 1, &[
        Token::entity_noun(EntityKind::Baba),
        is_token(),
        Token::of(Word::Not),
        Token::prop(PropWord::Push),
    ]);
    let baba = level
        .spawn(&root, Point::new(5, 5), Body::Plain(EntityKind::Baba))
        .unwrap();
    recompile_rules(&mut level);
    let space = level.space(&root).unwrap();
    // The negation cancels the grant and stands at its own tier.
    assert!(!space.get(baba).unwrap().enabled(PropWord::Push));
    assert!(space.get(baba).unwrap().disabled(PropWord::Push));
}

#[test]
fn group_membership_then_group_rule() {
    let mut level = fresh_level();
    let root = level.root.clone();
    let group = Token::of(Word::Noun(NounWord::Group));
    spell(&mut level, 0, &[
        Token::entity_noun(EntityKind::Rock),
        is_token(),
        group,
    ]);
    spell(&mut level, 1, &[group, is_token(), Token::prop(PropWord::Push)]);
    let rock = level
        .spawn(&root, Point::new(5, 5), Body::Plain(EntityKind::Rock))
        .unwrap();
    let key = level
        .spawn(&root, Point::new(6, 5), Body::Plain(EntityKind::Key))
        .unwrap();
    recompile_rules(&mut level);
    let space = level.space(&root).unwrap();
    assert!(space.get(rock).unwrap().enabled(PropWord::Push));
    assert!(!space.get(key).unwrap().enabled(PropWord::Push));
}

#[test]
fn meta_noun_targets_text_objects() {
    let mut level = fresh_level();
    let root = level.root.clone();
    // TEXT_ BABA IS PUSH: the text object saying BABA becomes pushable.
    spell(&mut level, 0, &[
        Token::of(Word::TextUnder),
        Token::entity_noun(EntityKind::Baba),
        is_token(),
        Token::prop(PropWord::Push),
    ]);
    let baba_text = level
        .spawn(
            &root,
            Point::new(5, 5),
            Body::Text(Token::entity_noun(EntityKind::Baba)),
        )
        .unwrap();
    let baba = level
        .spawn(&root, Point::new(6, 5), Body::Plain(EntityKind::Baba))
        .unwrap();
    recompile_rules(&mut level);
    let space = level.space(&root).unwrap();
    assert!(space.get(baba_text).unwrap().enabled(PropWord::Push));
    assert!(!space.get(baba).unwrap().enabled(PropWord::Push));
}

#[test]
fn stock_rules_make_text_pushable() {
    let root = Space::new(SpaceId::new("main"), Size::new(10, 10));
    let mut level = Level::new(LevelId::new("stock"), root, 3);
    let root_id = level.root.clone();
    let some_text = level
        .spawn(
            &root_id,
            Point::new(2, 2),
            Body::Text(Token::prop(PropWord::Win)),
        )
        .unwrap();
    recompile_rules(&mut level);
    let space = level.space(&root_id).unwrap();
    assert!(space.get(some_text).unwrap().enabled(PropWord::Push));
}

#[test]
fn scoped_level_rule_lands_on_the_level() {
    let mut level = fresh_level();
    spell(&mut level, 0, &[
        Token::of(Word::Noun(NounWord::Level)),
        is_token(),
        Token::prop(PropWord::Stop),
    ]);
    recompile_rules(&mut level);
    assert!(level.level_props.enabled_prop(PropWord::Stop));
}
