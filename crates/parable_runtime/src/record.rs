//! Typed records for the persisted level format.

use serde::{Deserialize, Serialize};

use parable_foundation::{Error, Orient, Point, Result, Size, SpaceId, SpaceTransform};
use parable_foundation::{LevelId, ObjectId};
use parable_lexicon::Catalog;
use parable_world::{Body, Level, Object, Space, SpaceVariant};

// =============================================================================
// Records
// =============================================================================

/// Serialized space identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceIdRecord {
    /// Space name.
    pub name: String,
    /// Infinite tier.
    #[serde(default)]
    pub tier: i32,
}

impl SpaceIdRecord {
    fn from_id(id: &SpaceId) -> Self {
        Self {
            name: id.name.to_string(),
            tier: id.tier,
        }
    }

    fn to_id(&self) -> SpaceId {
        SpaceId::with_tier(self.name.clone(), self.tier)
    }
}

/// Serialized transform carried by a space or reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRecord {
    /// Direction name.
    pub direct: String,
    /// Horizontal flip.
    pub flip: bool,
}

impl TransformRecord {
    fn from_transform(t: SpaceTransform) -> Self {
        Self {
            direct: orient_name(t.direct).to_string(),
            flip: t.flip,
        }
    }

    fn to_transform(&self) -> Result<SpaceTransform> {
        Ok(SpaceTransform::new(parse_orient(&self.direct)?, self.flip))
    }
}

/// One object on a grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    /// Serialized category name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Cell position.
    pub pos: (i32, i32),
    /// Facing.
    pub orient: String,
    /// Target of a space reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_id: Option<SpaceIdRecord>,
    /// Extra transform of a space reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformRecord>,
    /// Target of a level reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_id: Option<String>,
    /// Mimicked category of a game stand-in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_of: Option<Box<ObjectRecord>>,
}

/// One space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceRecord {
    /// Identifier.
    pub id: SpaceIdRecord,
    /// Grid size.
    pub size: (i32, i32),
    /// Background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// Baseline transform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformRecord>,
    /// Objects on the grid.
    pub objects: Vec<ObjectRecord>,
}

/// One level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    /// Level name.
    pub id: String,
    /// Root space.
    pub root: SpaceIdRecord,
    /// RNG seed the level plays under.
    #[serde(default)]
    pub seed: u64,
    /// All spaces, root included.
    pub spaces: Vec<SpaceRecord>,
}

// =============================================================================
// Names
// =============================================================================

fn orient_name(orient: Orient) -> &'static str {
    match orient {
        Orient::Up => "up",
        Orient::Left => "left",
        Orient::Down => "down",
        Orient::Right => "right",
    }
}

fn parse_orient(name: &str) -> Result<Orient> {
    match name {
        "up" => Ok(Orient::Up),
        "left" => Ok(Orient::Left),
        "down" => Ok(Orient::Down),
        "right" => Ok(Orient::Right),
        other => Err(Error::Serialization(format!("bad orientation: {other}"))),
    }
}

// =============================================================================
// Level -> record
// =============================================================================

fn object_to_record(object: &Object, catalog: &Catalog) -> ObjectRecord {
    let mut record = ObjectRecord {
        kind: String::new(),
        pos: (object.pos.x, object.pos.y),
        orient: orient_name(object.orient).to_string(),
        space_id: None,
        transform: None,
        level_id: None,
        game_of: None,
    };
    fill_body(&mut record, &object.body, catalog);
    record
}

fn fill_body(record: &mut ObjectRecord, body: &Body, catalog: &Catalog) {
    match body {
        Body::Plain(kind) => record.kind = kind.name().to_string(),
        Body::Text(token) => record.kind = catalog.token_name(*token),
        Body::SpaceRef {
            id,
            variant,
            transform,
        } => {
            record.kind = match variant {
                SpaceVariant::Space => "space".to_string(),
                SpaceVariant::Clone => "clone".to_string(),
            };
            record.space_id = Some(SpaceIdRecord::from_id(id));
            if *transform != SpaceTransform::IDENTITY {
                record.transform = Some(TransformRecord::from_transform(*transform));
            }
        }
        Body::LevelRef { id } => {
            record.kind = "level".to_string();
            record.level_id = Some(id.to_string());
        }
        Body::Game(inner) => {
            record.kind = "game".to_string();
            let mut inner_record = ObjectRecord {
                kind: String::new(),
                pos: record.pos,
                orient: record.orient.clone(),
                space_id: None,
                transform: None,
                level_id: None,
                game_of: None,
            };
            fill_body(&mut inner_record, inner, catalog);
            record.game_of = Some(Box::new(inner_record));
        }
    }
}

/// Serializes a level into its record tree.
#[must_use]
pub fn level_to_record(level: &Level, catalog: &Catalog) -> LevelRecord {
    let mut spaces = Vec::new();
    for id in level.space_ids() {
        let space = level.space(&id).expect("listed space");
        spaces.push(SpaceRecord {
            id: SpaceIdRecord::from_id(&space.id),
            size: (space.size.width, space.size.height),
            color: space.color,
            transform: (space.static_transform != SpaceTransform::IDENTITY)
                .then(|| TransformRecord::from_transform(space.static_transform)),
            objects: space.objects().map(|o| object_to_record(o, catalog)).collect(),
        });
    }
    LevelRecord {
        id: level.id.to_string(),
        root: SpaceIdRecord::from_id(&level.root),
        seed: 0,
        spaces,
    }
}

// =============================================================================
// Record -> level
// =============================================================================

fn body_from_record(record: &ObjectRecord, catalog: &Catalog) -> Result<Body> {
    if let Some(kind) = catalog.entity(&record.kind) {
        return Ok(Body::Plain(kind));
    }
    match record.kind.as_str() {
        "space" | "clone" => {
            let id = record
                .space_id
                .as_ref()
                .ok_or_else(|| Error::IncompleteRef {
                    detail: format!("{} object without space_id", record.kind),
                })?
                .to_id();
            let variant = if record.kind == "space" {
                SpaceVariant::Space
            } else {
                SpaceVariant::Clone
            };
            let transform = match &record.transform {
                Some(t) => t.to_transform()?,
                None => SpaceTransform::IDENTITY,
            };
            Ok(Body::SpaceRef {
                id,
                variant,
                transform,
            })
        }
        "level" => {
            let id = record.level_id.as_ref().ok_or_else(|| Error::IncompleteRef {
                detail: "level object without level_id".to_string(),
            })?;
            Ok(Body::LevelRef {
                id: LevelId::new(id.clone()),
            })
        }
        "game" => {
            let inner = record.game_of.as_ref().ok_or_else(|| Error::IncompleteRef {
                detail: "game object without game_of".to_string(),
            })?;
            Ok(Body::Game(Box::new(body_from_record(inner, catalog)?)))
        }
        name => catalog
            .parse_token(name)
            .map(Body::Text)
            .ok_or_else(|| Error::unknown_kind(name)),
    }
}

fn space_from_record(record: &SpaceRecord, catalog: &Catalog, next_id: &mut u64) -> Result<Space> {
    let mut space = Space::new(
        record.id.to_id(),
        Size::new(record.size.0, record.size.1),
    );
    space.color = record.color;
    if let Some(transform) = &record.transform {
        space.static_transform = transform.to_transform()?;
    }
    for object in &record.objects {
        let body = body_from_record(object, catalog)?;
        let id = ObjectId(*next_id);
        *next_id += 1;
        space.insert(
            Object::new(id, Point::new(object.pos.0, object.pos.1), body)
                .facing(parse_orient(&object.orient)?),
        );
    }
    Ok(space)
}

/// Rebuilds a level from its record tree.
///
/// # Errors
/// Fails on unknown category names, dangling references, and malformed
/// orientations; object identities are regenerated.
pub fn record_to_level(record: &LevelRecord, catalog: &Catalog) -> Result<Level> {
    let root_id = record.root.to_id();
    let mut next_id: u64 = 1;
    let mut spaces = Vec::with_capacity(record.spaces.len());
    for space in &record.spaces {
        spaces.push(space_from_record(space, catalog, &mut next_id)?);
    }
    let root_index = spaces
        .iter()
        .position(|s| s.id == root_id)
        .ok_or_else(|| Error::missing_space(root_id.clone()))?;
    let root = spaces.swap_remove(root_index);
    let mut level = Level::new(LevelId::new(record.id.clone()), root, record.seed);
    for space in spaces {
        level.insert_space(space);
    }
    // Reference targets must resolve inside the arena.
    for id in level.space_ids() {
        let space = level.space(&id).expect("listed space");
        for (_, target, _) in space.space_refs() {
            if !level.contains_space(&target) {
                return Err(Error::missing_space(target));
            }
        }
    }
    Ok(level)
}
