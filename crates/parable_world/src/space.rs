//! A space: one grid of objects, scoped channels, and boundary mapping.

use std::collections::{BTreeMap, HashMap};

use parable_foundation::{ObjectId, Orient, Point, Size, SpaceId, SpaceTransform};
use parable_lexicon::PropWord;
use parable_props::{OperatorChannels, PropertyStore};

use crate::object::{Object, SpaceVariant};

/// A grid of objects addressable by position.
///
/// The space also carries the world-scoped property channels consulted when
/// the space itself is treated as a pushable object: one channel per
/// reference variant, so "SPACE IS NOT LEAVE" and "CLONE IS NOT LEAVE" can
/// gate independently.
#[derive(Clone, Debug)]
pub struct Space {
    /// Identifier (name + infinite tier).
    pub id: SpaceId,
    /// Grid dimensions.
    pub size: Size,
    /// Background color, if the level file set one.
    pub color: Option<u32>,
    /// Baseline transform from the level file.
    pub static_transform: SpaceTransform,
    /// Transform accumulated by rules this turn.
    pub dynamic_transform: SpaceTransform,
    objects: BTreeMap<ObjectId, Object>,
    index: HashMap<Point, Vec<ObjectId>>,
    variant_props: [PropertyStore; 2],
    variant_channels: [OperatorChannels; 2],
}

impl Space {
    /// Creates an empty space.
    #[must_use]
    pub fn new(id: SpaceId, size: Size) -> Self {
        Self {
            id,
            size,
            color: None,
            static_transform: SpaceTransform::IDENTITY,
            dynamic_transform: SpaceTransform::IDENTITY,
            objects: BTreeMap::new(),
            index: HashMap::new(),
            variant_props: [PropertyStore::new(), PropertyStore::new()],
            variant_channels: [OperatorChannels::new(), OperatorChannels::new()],
        }
    }

    /// The static and dynamic transforms stacked.
    #[must_use]
    pub fn transform(&self) -> SpaceTransform {
        self.static_transform.stacked(self.dynamic_transform)
    }

    /// True outside the grid.
    #[must_use]
    pub fn out_of_range(&self, pos: Point) -> bool {
        self.size.out_of_range(pos)
    }

    // =========================================================================
    // Object storage
    // =========================================================================

    /// Inserts an object, indexing it if its position is in range.
    pub fn insert(&mut self, object: Object) {
        let id = object.id;
        let pos = object.pos;
        self.objects.insert(id, object);
        if !self.out_of_range(pos) {
            self.index.entry(pos).or_default().push(id);
        }
    }

    /// Removes an object by id.
    pub fn remove(&mut self, id: ObjectId) -> Option<Object> {
        let object = self.objects.remove(&id)?;
        if let Some(ids) = self.index.get_mut(&object.pos) {
            ids.retain(|&other| other != id);
        }
        Some(object)
    }

    /// Looks up an object.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    /// Mutable lookup.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(&id)
    }

    /// Moves an object to a new cell, keeping its identity and the index.
    pub fn relocate(&mut self, id: ObjectId, pos: Point) {
        let Some(object) = self.objects.get_mut(&id) else {
            return;
        };
        let old_pos = object.pos;
        object.pos = pos;
        if let Some(ids) = self.index.get_mut(&old_pos) {
            ids.retain(|&other| other != id);
        }
        if !self.size.out_of_range(pos) {
            self.index.entry(pos).or_default().push(id);
        }
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True with no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterates all objects in id order.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.values()
    }

    /// Iterates all objects mutably.
    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut Object> {
        self.objects.values_mut()
    }

    /// All object ids, in id order.
    #[must_use]
    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    /// Ids of objects at a cell; empty outside the grid.
    #[must_use]
    pub fn ids_at(&self, pos: Point) -> Vec<ObjectId> {
        self.index.get(&pos).cloned().unwrap_or_default()
    }

    /// Iterates objects at a cell.
    pub fn objects_at(&self, pos: Point) -> impl Iterator<Item = &Object> {
        self.index
            .get(&pos)
            .into_iter()
            .flatten()
            .filter_map(|id| self.objects.get(id))
    }

    /// Space-reference objects: `(object id, target, variant)`.
    #[must_use]
    pub fn space_refs(&self) -> Vec<(ObjectId, SpaceId, SpaceVariant)> {
        self.objects()
            .filter_map(|o| {
                o.body
                    .space_ref()
                    .map(|(id, variant)| (o.id, id.clone(), variant))
            })
            .collect()
    }

    /// Ids of space references at a cell.
    #[must_use]
    pub fn space_refs_at(&self, pos: Point) -> Vec<(ObjectId, SpaceId, SpaceVariant)> {
        self.objects_at(pos)
            .filter_map(|o| {
                o.body
                    .space_ref()
                    .map(|(id, variant)| (o.id, id.clone(), variant))
            })
            .collect()
    }

    // =========================================================================
    // Scoped channels
    // =========================================================================

    /// World-scoped property store for one reference variant.
    #[must_use]
    pub fn variant_props(&self, variant: SpaceVariant) -> &PropertyStore {
        &self.variant_props[variant.index()]
    }

    /// Mutable world-scoped property store.
    pub fn variant_props_mut(&mut self, variant: SpaceVariant) -> &mut PropertyStore {
        &mut self.variant_props[variant.index()]
    }

    /// World-scoped operator channels for one reference variant.
    #[must_use]
    pub fn variant_channels(&self, variant: SpaceVariant) -> &OperatorChannels {
        &self.variant_channels[variant.index()]
    }

    /// Mutable world-scoped operator channels.
    pub fn variant_channels_mut(&mut self, variant: SpaceVariant) -> &mut OperatorChannels {
        &mut self.variant_channels[variant.index()]
    }

    /// True if leaving this space through a `variant`-typed reference is
    /// ruled out.
    #[must_use]
    pub fn leave_disabled(&self, variant: SpaceVariant) -> bool {
        self.variant_props(variant).disabled_prop(PropWord::Leave)
    }

    /// True if entering this space through a `variant`-typed reference is
    /// ruled out.
    #[must_use]
    pub fn enter_disabled(&self, variant: SpaceVariant) -> bool {
        self.variant_props(variant).disabled_prop(PropWord::Enter)
    }

    /// Clears the scoped stores for a fresh rule pass.
    pub fn clear_scoped(&mut self) {
        for store in &mut self.variant_props {
            store.clear();
        }
        for channels in &mut self.variant_channels {
            channels.clear();
        }
    }

    // =========================================================================
    // Boundary mapping
    // =========================================================================
    //
    // A transnum is a fraction in [0, 1] along the boundary edge
    // perpendicular to the motion. Vertical motion measures along x,
    // horizontal motion along y, after the space's transform reorients the
    // side.

    fn side_uses_x(&self, side: Orient) -> bool {
        !side.turned(self.transform().direct).is_horizontal()
    }

    /// The boundary fraction of a cell, for motion toward `side`.
    #[must_use]
    pub fn leave_transnum_from_pos(&self, pos: Point, side: Orient) -> f64 {
        let t = if self.side_uses_x(side) {
            (f64::from(pos.x) + 0.5) / f64::from(self.size.width)
        } else {
            (f64::from(pos.y) + 0.5) / f64::from(self.size.height)
        };
        if self.transform().flip { 1.0 - t } else { t }
    }

    /// Rescales a child fraction into this space's frame, through the
    /// reference object sitting at `pos`.
    #[must_use]
    pub fn leave_transnum(&self, transnum: f64, pos: Point, side: Orient) -> f64 {
        if self.side_uses_x(side) {
            (transnum + f64::from(pos.x)) / f64::from(self.size.width)
        } else {
            (transnum + f64::from(pos.y)) / f64::from(self.size.height)
        }
    }

    /// Rescales this space's fraction into a child's frame, through the
    /// reference object sitting at `pos`.
    #[must_use]
    pub fn enter_transnum(&self, transnum: f64, pos: Point, side: Orient) -> f64 {
        let t = if self.side_uses_x(side) {
            transnum * f64::from(self.size.width) - f64::from(pos.x)
        } else {
            transnum * f64::from(self.size.height) - f64::from(pos.y)
        };
        if self.transform().flip { 1.0 - t } else { t }
    }

    fn entry_side(&self, side: Orient) -> (Orient, bool) {
        let transform = self.transform();
        let mirrored = transform.flip && side.is_horizontal();
        let side = if mirrored { side.opposite() } else { side };
        (side.turned(transform.direct), mirrored)
    }

    fn edge_cell(&self, side: Orient, along: i32) -> Point {
        match side {
            Orient::Up => Point::new(along, -1),
            Orient::Down => Point::new(along, self.size.height),
            Orient::Left => Point::new(-1, along),
            Orient::Right => Point::new(self.size.width, along),
        }
    }

    /// The rim cell one step outside the `side` edge at a fraction.
    ///
    /// The resolver recurses from this cell; stepping once in the motion
    /// direction lands on the first in-grid cell.
    #[must_use]
    pub fn enter_pos(&self, transnum: f64, side: Orient) -> Point {
        let (side, mirrored) = self.entry_side(side);
        let t = if mirrored { 1.0 - transnum } else { transnum };
        let along = if side.is_horizontal() {
            span_cell(t, self.size.height)
        } else {
            span_cell(t, self.size.width)
        };
        self.edge_cell(side, along)
    }

    /// The rim cell at the middle of the `side` edge.
    #[must_use]
    pub fn default_enter_pos(&self, side: Orient) -> Point {
        let (side, _) = self.entry_side(side);
        let along = if side.is_horizontal() {
            self.size.height / 2
        } else {
            self.size.width / 2
        };
        self.edge_cell(side, along)
    }
}

/// Truncates a fraction to a cell index, clamped to the edge span.
fn span_cell(t: f64, span: i32) -> i32 {
    #[allow(clippy::cast_possible_truncation)]
    let cell = (t * f64::from(span)).floor() as i32;
    cell.clamp(0, span - 1)
}
