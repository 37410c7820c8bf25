//! Scanning boards for rules through the public API.

use parable::foundation::{ObjectId, Point, Size, SpaceId};
use parable::lexicon::{EntityKind, InfixWord, OperWord, PropWord, Token, Word};
use parable::rules::scan_space;
use parable::world::{Body, Object, Space};

fn text(id: u64, x: i32, y: i32, token: Token) -> Object {
    Object::new(ObjectId(id), Point::new(x, y), Body::Text(token))
}

fn is_token() -> Token {
    Token::of(Word::Oper(OperWord::Is))
}

fn board(objects: Vec<Object>) -> Space {
    let mut space = Space::new(SpaceId::new("board"), Size::new(10, 10));
    for object in objects {
        space.insert(object);
    }
    space
}

#[test]
fn both_axes_are_scanned() {
    let space = board(vec![
        text(1, 0, 0, Token::entity_noun(EntityKind::Baba)),
        text(2, 1, 0, is_token()),
        text(3, 2, 0, Token::prop(PropWord::You)),
        text(4, 5, 2, Token::entity_noun(EntityKind::Rock)),
        text(5, 5, 3, is_token()),
        text(6, 5, 4, Token::prop(PropWord::Push)),
    ]);
    let entries = scan_space(&space);
    assert_eq!(entries.len(), 2);
}

#[test]
fn broken_runs_produce_nothing() {
    // A gap between IS and the property kills the sentence.
    let space = board(vec![
        text(1, 0, 0, Token::entity_noun(EntityKind::Baba)),
        text(2, 1, 0, is_token()),
        text(3, 3, 0, Token::prop(PropWord::You)),
    ]);
    assert!(scan_space(&space).is_empty());
}

#[test]
fn negation_chain_deepens_the_subject() {
    let space = board(vec![
        text(1, 0, 0, Token::of(Word::Not)),
        text(2, 1, 0, Token::of(Word::Not)),
        text(3, 2, 0, Token::entity_noun(EntityKind::Baba)),
        text(4, 3, 0, is_token()),
        text(5, 4, 0, Token::prop(PropWord::You)),
    ]);
    let entries = scan_space(&space);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].info.subjects[0].tier, 2);
}

#[test]
fn infix_and_operator_chain_together() {
    // BABA ON ROCK IS YOU AND WIN
    let space = board(vec![
        text(1, 0, 0, Token::entity_noun(EntityKind::Baba)),
        text(2, 1, 0, Token::of(Word::Infix(InfixWord::On))),
        text(3, 2, 0, Token::entity_noun(EntityKind::Rock)),
        text(4, 3, 0, is_token()),
        text(5, 4, 0, Token::prop(PropWord::You)),
        text(6, 5, 0, Token::of(Word::And)),
        text(7, 6, 0, Token::prop(PropWord::Win)),
    ]);
    let entries = scan_space(&space);
    let full = entries
        .iter()
        .find(|e| e.tokens.len() == 7)
        .expect("full chain");
    assert_eq!(full.info.infixes[0].word, InfixWord::On);
    assert_eq!(full.info.clauses[0].targets.len(), 2);
}

#[test]
fn stacked_text_in_one_cell_yields_both_readings() {
    let mut space = board(vec![
        text(2, 1, 0, is_token()),
        text(3, 2, 0, Token::prop(PropWord::Push)),
    ]);
    space.insert(text(10, 0, 0, Token::entity_noun(EntityKind::Baba)));
    space.insert(text(11, 0, 0, Token::entity_noun(EntityKind::Keke)));
    let entries = scan_space(&space);
    assert_eq!(entries.len(), 2);
    let subjects: Vec<Token> = entries.iter().map(|e| e.info.subjects[0].token).collect();
    assert!(subjects.contains(&Token::entity_noun(EntityKind::Baba)));
    assert!(subjects.contains(&Token::entity_noun(EntityKind::Keke)));
}

#[test]
fn quoting_escapes_stack() {
    // TEXT_ TEXT_ IS IS PUSH reads "the text of the text of IS is push".
    let space = board(vec![
        text(1, 0, 0, Token::of(Word::TextUnder)),
        text(2, 1, 0, Token::of(Word::TextUnder)),
        text(3, 2, 0, is_token()),
        text(4, 3, 0, is_token()),
        text(5, 4, 0, Token::prop(PropWord::Push)),
    ]);
    let entries = scan_space(&space);
    let quoted = entries
        .iter()
        .find(|e| e.info.subjects[0].token.tier == 2)
        .expect("double-quoted subject");
    assert_eq!(quoted.info.subjects[0].token, is_token().meta().meta());
}
