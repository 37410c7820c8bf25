//! The level: arena of spaces, scoped stores, and turn-transient state.
//!
//! All spaces live here, keyed by id. Reference objects point into the
//! arena by id only, so a space containing itself (directly or through any
//! chain) is just another entry. The level also owns the deterministic RNG
//! that the OFTEN/SELDOM prefixes and TELE draw from.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use parable_foundation::{LevelId, ObjectId, Orient, Point, SpaceId};
use parable_lexicon::{NounWord, PrefixWord, PropWord, Token, Word};
use parable_props::{OperatorChannels, PropertyStore};

use crate::object::{Body, Object};
use crate::space::Space;

/// A sound or event emitted during a turn, surfaced to the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Sound {
    Move,
    Tele,
    Sink,
    Melt,
    Defeat,
    Open,
    Done,
    Win,
    End,
    Select,
}

/// A level: the flat collection of all reachable spaces plus scoped state.
#[derive(Clone, Debug)]
pub struct Level {
    /// Level identifier.
    pub id: LevelId,
    /// The space shown (and played) at the top.
    pub root: SpaceId,
    /// Rules active everywhere without being spelled on any board.
    pub inherent_rules: Vec<Vec<Token>>,
    /// Level-scoped property grants (subject LEVEL).
    pub level_props: PropertyStore,
    /// Level-scoped operator channels.
    pub level_channels: OperatorChannels,
    /// Game-scoped property grants (subject GAME).
    pub game_props: PropertyStore,
    /// Game-scoped operator channels.
    pub game_channels: OperatorChannels,
    /// Sound/event log for the current turn.
    pub sounds: Vec<Sound>,
    /// Levels created by transforms this turn, pending pickup.
    pub created_levels: Vec<Level>,
    spaces: BTreeMap<SpaceId, Space>,
    next_object: u64,
    rng: ChaCha8Rng,
}

impl Level {
    /// Creates a level around a root space, with a deterministic seed.
    ///
    /// The id allocator starts past any object already in the root, so
    /// hand-built spaces and spawned objects never collide.
    #[must_use]
    pub fn new(id: LevelId, root: Space, seed: u64) -> Self {
        let root_id = root.id.clone();
        let next_object = root
            .objects()
            .map(|o| o.id.0 + 1)
            .max()
            .unwrap_or(1)
            .max(1);
        let mut spaces = BTreeMap::new();
        spaces.insert(root_id.clone(), root);
        Self {
            id,
            root: root_id,
            inherent_rules: Self::stock_rules(),
            level_props: PropertyStore::new(),
            level_channels: OperatorChannels::new(),
            game_props: PropertyStore::new(),
            game_channels: OperatorChannels::new(),
            sounds: Vec::new(),
            created_levels: Vec::new(),
            spaces,
            next_object,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The rules every level starts with.
    #[must_use]
    pub fn stock_rules() -> Vec<Vec<Token>> {
        let is = Token::of(Word::Oper(parable_lexicon::OperWord::Is));
        let not = Token::of(Word::Not);
        let meta = Token::of(Word::Prefix(PrefixWord::Meta));
        vec![
            vec![
                Token::of(Word::Noun(NounWord::Text)),
                is,
                Token::prop(PropWord::Push),
            ],
            vec![
                Token::entity_noun(parable_lexicon::EntityKind::Cursor),
                is,
                Token::prop(PropWord::Select),
            ],
            vec![
                not,
                meta,
                Token::of(Word::Noun(NounWord::Level)),
                is,
                Token::prop(PropWord::Stop),
            ],
            vec![
                not,
                meta,
                Token::of(Word::Noun(NounWord::Space)),
                is,
                Token::prop(PropWord::Push),
            ],
            vec![
                not,
                meta,
                Token::of(Word::Noun(NounWord::Clone)),
                is,
                Token::prop(PropWord::Push),
            ],
            vec![
                meta,
                Token::of(Word::Noun(NounWord::Clone)),
                is,
                not,
                Token::prop(PropWord::Leave),
            ],
        ]
    }

    // =========================================================================
    // Spaces
    // =========================================================================

    /// Adds (or replaces) a space, bumping the id allocator past its
    /// objects.
    pub fn insert_space(&mut self, space: Space) {
        if let Some(max) = space.objects().map(|o| o.id.0 + 1).max() {
            self.next_object = self.next_object.max(max);
        }
        self.spaces.insert(space.id.clone(), space);
    }

    /// Looks up a space.
    #[must_use]
    pub fn space(&self, id: &SpaceId) -> Option<&Space> {
        self.spaces.get(id)
    }

    /// Mutable lookup.
    pub fn space_mut(&mut self, id: &SpaceId) -> Option<&mut Space> {
        self.spaces.get_mut(id)
    }

    /// True if the arena holds the space.
    #[must_use]
    pub fn contains_space(&self, id: &SpaceId) -> bool {
        self.spaces.contains_key(id)
    }

    /// All space ids, in stable order.
    #[must_use]
    pub fn space_ids(&self) -> Vec<SpaceId> {
        self.spaces.keys().cloned().collect()
    }

    /// Iterates spaces.
    pub fn spaces(&self) -> impl Iterator<Item = &Space> {
        self.spaces.values()
    }

    /// Iterates spaces mutably.
    pub fn spaces_mut(&mut self) -> impl Iterator<Item = &mut Space> {
        self.spaces.values_mut()
    }

    /// The first space holding a reference object to `id`, with that
    /// object: the immediate container in the nesting graph.
    #[must_use]
    pub fn find_container(&self, id: &SpaceId) -> Option<(SpaceId, ObjectId)> {
        for space in self.spaces.values() {
            for (object_id, target, _) in space.space_refs() {
                if &target == id {
                    return Some((space.id.clone(), object_id));
                }
            }
        }
        None
    }

    // =========================================================================
    // Objects
    // =========================================================================

    /// Mints a fresh object id.
    pub fn alloc_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_object);
        self.next_object += 1;
        id
    }

    /// Creates and inserts an object into a space, returning its id.
    pub fn spawn(&mut self, space: &SpaceId, pos: Point, body: Body) -> Option<ObjectId> {
        let id = self.alloc_id();
        let space = self.space_mut(space)?;
        space.insert(Object::new(id, pos, body));
        Some(id)
    }

    /// Moves an object within one space, identity preserved.
    pub fn move_within(&mut self, space: &SpaceId, id: ObjectId, pos: Point, orient: Orient) {
        if let Some(space) = self.space_mut(space) {
            space.relocate(id, pos);
            if let Some(object) = space.get_mut(id) {
                object.orient = orient;
                object.moved = true;
            }
        }
    }

    /// Moves an object across spaces: removed at the source, recreated at
    /// the destination under a fresh identity.
    pub fn transfer(
        &mut self,
        from: &SpaceId,
        id: ObjectId,
        to: &SpaceId,
        pos: Point,
        orient: Orient,
    ) -> Option<ObjectId> {
        let mut object = self.space_mut(from)?.remove(id)?;
        let new_id = self.alloc_id();
        object.id = new_id;
        object.pos = pos;
        object.orient = orient;
        object.moved = true;
        self.space_mut(to)?.insert(object);
        Some(new_id)
    }

    // =========================================================================
    // Scoped property reads
    // =========================================================================

    /// Enabled check that also consults the scoped store a reference body
    /// answers to: space references read their target's variant channel,
    /// level references the level store, game objects the game store.
    #[must_use]
    pub fn enabled_for(&self, object: &Object, word: PropWord) -> bool {
        if object.props.enabled_prop(word) {
            return true;
        }
        match &object.body {
            Body::SpaceRef { id, variant, .. } => self
                .space(id)
                .is_some_and(|s| s.variant_props(*variant).enabled_prop(word)),
            Body::LevelRef { .. } => self.level_props.enabled_prop(word),
            Body::Game(_) => self.game_props.enabled_prop(word),
            _ => false,
        }
    }

    /// Disabled counterpart of [`Level::enabled_for`].
    #[must_use]
    pub fn disabled_for(&self, object: &Object, word: PropWord) -> bool {
        if object.props.disabled_prop(word) {
            return true;
        }
        match &object.body {
            Body::SpaceRef { id, variant, .. } => self
                .space(id)
                .is_some_and(|s| s.variant_props(*variant).disabled_prop(word)),
            Body::LevelRef { .. } => self.level_props.disabled_prop(word),
            Body::Game(_) => self.game_props.disabled_prop(word),
            _ => false,
        }
    }

    // =========================================================================
    // Turn-transient state
    // =========================================================================

    /// Logs a sound.
    pub fn emit(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }

    /// Logs a sound unless it is already in this turn's log.
    pub fn emit_once(&mut self, sound: Sound) {
        if !self.sounds.contains(&sound) {
            self.sounds.push(sound);
        }
    }

    /// The deterministic RNG.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Clears all scoped stores ahead of a rule pass.
    pub fn clear_scoped(&mut self) {
        self.level_props.clear();
        self.level_channels.clear();
        self.game_props.clear();
        self.game_channels.clear();
        for space in self.spaces.values_mut() {
            space.clear_scoped();
        }
    }

    /// Plain entity kinds present anywhere in the level: the universe the
    /// ALL noun ranges over.
    #[must_use]
    pub fn all_universe(&self) -> Vec<parable_lexicon::EntityKind> {
        let mut kinds = Vec::new();
        for space in self.spaces.values() {
            for object in space.objects() {
                if let Body::Plain(kind) = &object.body {
                    if !kinds.contains(kind) {
                        kinds.push(*kind);
                    }
                }
            }
        }
        kinds.sort_unstable();
        kinds
    }

    /// Snapshots every object's state as "last turn" and clears the moved
    /// flags. Called at the start of a turn, before rules recompile.
    pub fn remember_all(&mut self) {
        for space in self.spaces.values_mut() {
            let id = space.id.clone();
            for object in space.objects_mut() {
                object.remember(&id);
                object.moved = false;
            }
        }
    }
}
