//! Objects: identity, body variants, property stores, old-turn state.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use parable_foundation::{LevelId, ObjectId, Orient, Point, SpaceId, SpaceTransform};
use parable_lexicon::{EntityKind, NounWord, PropWord, Token, Word};
use parable_props::{OperatorChannels, PropertyStore};

// =============================================================================
// Body
// =============================================================================

/// The two flavors of space reference.
///
/// Plain references show the space itself; clone references show an
/// independent viewport with different default enter/leave gates (the stock
/// rules make clones unleavable).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpaceVariant {
    /// The plain variant.
    Space,
    /// The clone variant.
    Clone,
}

impl SpaceVariant {
    /// Both variants.
    pub const ALL: [SpaceVariant; 2] = [SpaceVariant::Space, SpaceVariant::Clone];

    /// Index into per-variant tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            SpaceVariant::Space => 0,
            SpaceVariant::Clone => 1,
        }
    }

    /// The noun naming this variant.
    #[must_use]
    pub const fn noun(self) -> Token {
        match self {
            SpaceVariant::Space => Token::of(Word::Noun(NounWord::Space)),
            SpaceVariant::Clone => Token::of(Word::Noun(NounWord::Clone)),
        }
    }
}

/// What an object is.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Body {
    /// A plain entity.
    Plain(EntityKind),
    /// A text token sitting on the board.
    Text(Token),
    /// A reference to a space in the level's arena.
    SpaceRef {
        /// The referenced space.
        id: SpaceId,
        /// Plain or clone.
        variant: SpaceVariant,
        /// Extra transform carried by this particular reference.
        transform: SpaceTransform,
    },
    /// A reference to another level.
    LevelRef {
        /// The referenced level.
        id: LevelId,
    },
    /// A stand-in for part of the game itself, mimicking another body.
    Game(Box<Body>),
}

impl Body {
    /// True for text tokens.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Body::Text(_))
    }

    /// The token, for text bodies.
    #[must_use]
    pub const fn token(&self) -> Option<Token> {
        match self {
            Body::Text(token) => Some(*token),
            _ => None,
        }
    }

    /// The space reference, if this body is one.
    #[must_use]
    pub fn space_ref(&self) -> Option<(&SpaceId, SpaceVariant)> {
        match self {
            Body::SpaceRef { id, variant, .. } => Some((id, *variant)),
            _ => None,
        }
    }

    /// True for plain entities, the only bodies ALL ranges over.
    #[must_use]
    pub const fn in_all(&self) -> bool {
        matches!(self, Body::Plain(_))
    }

    /// The noun denoting this body's category.
    #[must_use]
    pub fn noun(&self) -> Token {
        match self {
            Body::Plain(kind) => Token::entity_noun(*kind),
            Body::Text(token) => token.meta(),
            Body::SpaceRef { variant, .. } => variant.noun(),
            Body::LevelRef { .. } => Token::of(Word::Noun(NounWord::Level)),
            Body::Game(_) => Token::of(Word::Noun(NounWord::Game)),
        }
    }
}

// =============================================================================
// OldState
// =============================================================================

/// Previous-turn snapshot, consumed by FEELING and by history-sensitive
/// filters. Cleared fields mean the object did not exist last turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OldState {
    /// Position last turn.
    pub pos: Option<Point>,
    /// Orientation last turn.
    pub orient: Option<Orient>,
    /// Containing space last turn.
    pub space: Option<SpaceId>,
    /// Property store as resolved last turn.
    pub props: PropertyStore,
}

// =============================================================================
// Object
// =============================================================================

/// One object on a space's grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Object {
    /// Identity; stable in place, regenerated on cross-space transfer.
    pub id: ObjectId,
    /// Cell position.
    pub pos: Point,
    /// Facing.
    pub orient: Orient,
    /// What the object is.
    pub body: Body,
    /// Property grants for the current turn.
    pub props: PropertyStore,
    /// HAS/MAKE/WRITE grants for the current turn.
    pub channels: OperatorChannels,
    /// Previous-turn snapshot.
    pub old: OldState,
    /// Set once the object has moved this turn.
    pub moved: bool,
}

impl Object {
    /// Creates an object facing down, with empty stores.
    #[must_use]
    pub fn new(id: ObjectId, pos: Point, body: Body) -> Self {
        Self {
            id,
            pos,
            orient: Orient::Down,
            body,
            props: PropertyStore::new(),
            channels: OperatorChannels::new(),
            old: OldState::default(),
            moved: false,
        }
    }

    /// Sets the facing; builder form.
    #[must_use]
    pub fn facing(mut self, orient: Orient) -> Self {
        self.orient = orient;
        self
    }

    /// True if this object's category is named by `noun`.
    ///
    /// ALL and EMPTY are range nouns the compiler expands before it gets
    /// here; as a direct match ALL accepts nothing and EMPTY never matches.
    #[must_use]
    pub fn matches_noun(&self, noun: Token) -> bool {
        if let Some(inner) = noun.unmeta() {
            // Meta noun: matches the text object that says `inner`.
            return self.body.token() == Some(inner);
        }
        match noun.word {
            Word::Noun(NounWord::Entity(kind)) => self.body == Body::Plain(kind),
            Word::Noun(NounWord::Text) => self.body.is_text(),
            Word::Noun(NounWord::Group) => self.props.enabled(noun),
            Word::Noun(NounWord::Space) => {
                matches!(self.body.space_ref(), Some((_, SpaceVariant::Space)))
            }
            Word::Noun(NounWord::Clone) => {
                matches!(self.body.space_ref(), Some((_, SpaceVariant::Clone)))
            }
            Word::Noun(NounWord::Level) => matches!(self.body, Body::LevelRef { .. }),
            Word::Noun(NounWord::Game) => matches!(self.body, Body::Game(_)),
            Word::Noun(NounWord::All | NounWord::Empty) => false,
            _ => false,
        }
    }

    /// Enabled check routed through the object's store.
    #[must_use]
    pub fn enabled(&self, word: PropWord) -> bool {
        self.props.enabled_prop(word)
    }

    /// Disabled check routed through the object's store.
    #[must_use]
    pub fn disabled(&self, word: PropWord) -> bool {
        self.props.disabled_prop(word)
    }

    /// Records the current state into the old-turn snapshot.
    pub fn remember(&mut self, space: &SpaceId) {
        self.old = OldState {
            pos: Some(self.pos),
            orient: Some(self.orient),
            space: Some(space.clone()),
            props: self.props.clone(),
        };
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {} at {}", self.body, self.id, self.pos)
    }
}

/// Float parity: two objects interact only if both float or neither does.
#[must_use]
pub fn same_float(a: &Object, b: &Object) -> bool {
    a.enabled(PropWord::Float) == b.enabled(PropWord::Float)
}
