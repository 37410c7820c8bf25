//! Serialized-name lookup for words, tokens, and entity kinds.
//!
//! Built once at startup and passed by reference into the loader and the
//! rule compiler. Meta tiers are encoded in names by repetition of the
//! `text_` prefix: `text_baba` is the BABA noun, `text_text_baba` the noun
//! of its text, and so on; `text_text_` (trailing underscore) is the quote
//! escape itself.

use std::collections::HashMap;

use crate::kind::EntityKind;
use crate::word::{InfixWord, NounWord, OperWord, PrefixWord, PropWord, Token, Word};

const TEXT_PREFIX: &str = "text_";

/// Returns the serialized base name of a word (without any `text_` prefix).
#[must_use]
pub fn base_name(word: Word) -> &'static str {
    match word {
        Word::Noun(noun) => match noun {
            NounWord::Entity(kind) => kind.name(),
            NounWord::Text => "text",
            NounWord::All => "all",
            NounWord::Group => "group",
            NounWord::Empty => "empty",
            NounWord::Space => "space",
            NounWord::Clone => "clone",
            NounWord::Level => "level",
            NounWord::Game => "game",
        },
        Word::Prefix(prefix) => match prefix {
            PrefixWord::Meta => "meta",
            PrefixWord::Often => "often",
            PrefixWord::Seldom => "seldom",
        },
        Word::Infix(infix) => match infix {
            InfixWord::On => "on",
            InfixWord::Near => "near",
            InfixWord::Nextto => "nextto",
            InfixWord::Without => "without",
            InfixWord::Feeling => "feeling",
        },
        Word::Oper(oper) => match oper {
            OperWord::Is => "is",
            OperWord::Has => "has",
            OperWord::Make => "make",
            OperWord::Write => "write",
        },
        Word::Prop(prop) => match prop {
            PropWord::You => "you",
            PropWord::Move => "move",
            PropWord::Stop => "stop",
            PropWord::Push => "push",
            PropWord::Sink => "sink",
            PropWord::Float => "float",
            PropWord::Open => "open",
            PropWord::Shut => "shut",
            PropWord::Hot => "hot",
            PropWord::Melt => "melt",
            PropWord::Win => "win",
            PropWord::Defeat => "defeat",
            PropWord::Shift => "shift",
            PropWord::Tele => "tele",
            PropWord::Enter => "enter",
            PropWord::Leave => "leave",
            PropWord::Word => "word",
            PropWord::Hide => "hide",
            PropWord::Select => "select",
            PropWord::End => "end",
            PropWord::Done => "done",
        },
        Word::Not => "not",
        Word::And => "and",
        // The escape's own base is the bare prefix; names come out with a
        // trailing underscore, which is what distinguishes it from the
        // TEXT noun.
        Word::TextUnder => "",
    }
}

/// Name ↔ word/kind lookup tables.
#[derive(Debug)]
pub struct Catalog {
    words: HashMap<&'static str, Word>,
    entities: HashMap<&'static str, EntityKind>,
}

impl Catalog {
    /// Builds the catalog. Call once at startup.
    #[must_use]
    pub fn new() -> Self {
        let mut words: HashMap<&'static str, Word> = HashMap::new();
        let mut add = |word: Word| {
            let name = base_name(word);
            if !name.is_empty() {
                let prev = words.insert(name, word);
                debug_assert!(prev.is_none(), "duplicate base name {name}");
            }
        };

        for kind in EntityKind::ALL {
            add(Word::Noun(NounWord::Entity(kind)));
        }
        for noun in [
            NounWord::Text,
            NounWord::All,
            NounWord::Group,
            NounWord::Empty,
            NounWord::Space,
            NounWord::Clone,
            NounWord::Level,
            NounWord::Game,
        ] {
            add(Word::Noun(noun));
        }
        for prefix in [PrefixWord::Meta, PrefixWord::Often, PrefixWord::Seldom] {
            add(Word::Prefix(prefix));
        }
        for infix in [
            InfixWord::On,
            InfixWord::Near,
            InfixWord::Nextto,
            InfixWord::Without,
            InfixWord::Feeling,
        ] {
            add(Word::Infix(infix));
        }
        for oper in [OperWord::Is, OperWord::Has, OperWord::Make, OperWord::Write] {
            add(Word::Oper(oper));
        }
        for prop in [
            PropWord::You,
            PropWord::Move,
            PropWord::Stop,
            PropWord::Push,
            PropWord::Sink,
            PropWord::Float,
            PropWord::Open,
            PropWord::Shut,
            PropWord::Hot,
            PropWord::Melt,
            PropWord::Win,
            PropWord::Defeat,
            PropWord::Shift,
            PropWord::Tele,
            PropWord::Enter,
            PropWord::Leave,
            PropWord::Word,
            PropWord::Hide,
            PropWord::Select,
            PropWord::End,
            PropWord::Done,
        ] {
            add(Word::Prop(prop));
        }
        add(Word::Not);
        add(Word::And);

        let entities = EntityKind::ALL.into_iter().map(|k| (k.name(), k)).collect();
        Self { words, entities }
    }

    /// Looks up a plain entity category by its serialized name.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<EntityKind> {
        self.entities.get(name).copied()
    }

    /// The serialized name of a text token.
    #[must_use]
    pub fn token_name(&self, token: Token) -> String {
        let base = base_name(token.word);
        let prefixes = token.tier as usize + 1;
        let mut name = String::with_capacity(prefixes * TEXT_PREFIX.len() + base.len());
        for _ in 0..prefixes {
            name.push_str(TEXT_PREFIX);
        }
        name.push_str(base);
        if matches!(token.word, Word::TextUnder) {
            name.push_str(TEXT_PREFIX);
        }
        name
    }

    /// Parses a serialized text-token name, meta tiers included.
    ///
    /// Returns `None` for names outside the vocabulary; the caller turns
    /// that into a recoverable load error.
    #[must_use]
    pub fn parse_token(&self, name: &str) -> Option<Token> {
        let mut rest = name.strip_prefix(TEXT_PREFIX)?;
        let mut tier: u32 = 0;
        loop {
            if let Some(&word) = self.words.get(rest) {
                return Some(Token { word, tier });
            }
            match rest.strip_prefix(TEXT_PREFIX) {
                Some(stripped) if stripped.is_empty() => {
                    // `text_` * (tier + 2): the quote escape at this tier.
                    return Some(Token {
                        word: Word::TextUnder,
                        tier,
                    });
                }
                Some(stripped) => {
                    // One more prefix, unless the remainder is the TEXT
                    // noun itself (`text_text` must stop at tier 0).
                    rest = stripped;
                    tier += 1;
                }
                None => return None,
            }
        }
    }

    /// Human-readable display name, `TEXT_` repeated per meta tier.
    #[must_use]
    pub fn display_name(&self, token: Token) -> String {
        let base = match token.word {
            Word::TextUnder => "TEXT_".to_string(),
            word => base_name(word).to_uppercase(),
        };
        let mut out = String::new();
        for _ in 0..token.tier {
            out.push_str("TEXT_");
        }
        out.push_str(&base);
        out
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
