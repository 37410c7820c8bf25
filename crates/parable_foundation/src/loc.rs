//! Grid geometry: points, sizes, orientations, and space transforms.
//!
//! Positions are signed because movement routinely probes one cell outside
//! a space's bounds (that is how boundary crossings are detected), and
//! entry positions sit on the rim at `-1` or `size`.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Point & Size
// =============================================================================

/// A cell position inside (or just outside) a space's grid.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// Column, growing rightward.
    pub x: i32,
    /// Row, growing downward.
    pub y: i32,
}

impl Point {
    /// Creates a point from column and row.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step in the given direction.
    #[must_use]
    pub const fn step(self, orient: Orient) -> Self {
        let (dx, dy) = orient.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid dimensions of a space.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
}

impl Size {
    /// Creates a size from width and height.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True if the point lies outside the `[0, width) x [0, height)` grid.
    #[must_use]
    pub const fn out_of_range(self, pos: Point) -> bool {
        pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height
    }
}

// =============================================================================
// Orient
// =============================================================================

/// One of the four grid directions.
///
/// `Down` is the neutral orientation: freshly placed objects face down, and
/// the identity [`SpaceTransform`] points down.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orient {
    /// Toward negative `y`.
    Up,
    /// Toward negative `x`.
    Left,
    /// Toward positive `y`.
    Down,
    /// Toward positive `x`.
    Right,
}

impl Orient {
    /// All four directions, in rotation order.
    pub const ALL: [Orient; 4] = [Orient::Down, Orient::Left, Orient::Up, Orient::Right];

    /// The `(dx, dy)` cell offset of one step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Orient::Up => (0, -1),
            Orient::Left => (-1, 0),
            Orient::Down => (0, 1),
            Orient::Right => (1, 0),
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Orient::Up => Orient::Down,
            Orient::Left => Orient::Right,
            Orient::Down => Orient::Up,
            Orient::Right => Orient::Left,
        }
    }

    /// True for `Left`/`Right`.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Orient::Left | Orient::Right)
    }

    /// Number of clockwise quarter turns from the neutral `Down`.
    #[must_use]
    const fn quarter_turns(self) -> u8 {
        match self {
            Orient::Down => 0,
            Orient::Left => 1,
            Orient::Up => 2,
            Orient::Right => 3,
        }
    }

    /// Rotates clockwise by `turns` quarter turns.
    #[must_use]
    const fn rotated(self, turns: u8) -> Self {
        let mut out = self;
        let mut i = 0;
        while i < turns % 4 {
            out = match out {
                Orient::Down => Orient::Left,
                Orient::Left => Orient::Up,
                Orient::Up => Orient::Right,
                Orient::Right => Orient::Down,
            };
            i += 1;
        }
        out
    }

    /// Rotates this direction by the rotation that carries `Down` onto `by`.
    #[must_use]
    pub const fn turned(self, by: Orient) -> Self {
        self.rotated(by.quarter_turns())
    }

    /// Mirrors across the vertical axis (`Left` and `Right` swap).
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Orient::Left => Orient::Right,
            Orient::Right => Orient::Left,
            other => other,
        }
    }
}

impl fmt::Display for Orient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Orient::Up => "up",
            Orient::Left => "left",
            Orient::Down => "down",
            Orient::Right => "right",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// SpaceTransform
// =============================================================================

/// Rotation plus horizontal flip applied to a nested space.
///
/// Transforms stack: a space seen through two rotated references composes
/// both rotations. The identity transform points `Down` without a flip.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpaceTransform {
    /// Where the space's neutral `Down` ends up.
    pub direct: Orient,
    /// Horizontal mirror applied after the rotation.
    pub flip: bool,
}

impl SpaceTransform {
    /// The identity transform.
    pub const IDENTITY: SpaceTransform = SpaceTransform {
        direct: Orient::Down,
        flip: false,
    };

    /// Creates a transform.
    #[must_use]
    pub const fn new(direct: Orient, flip: bool) -> Self {
        Self { direct, flip }
    }

    /// Composes this transform with another applied on top of it.
    #[must_use]
    pub const fn stacked(self, outer: SpaceTransform) -> Self {
        Self {
            direct: self.direct.turned(outer.direct),
            flip: self.flip != outer.flip,
        }
    }

    /// Applies the rotation part to a direction.
    #[must_use]
    pub const fn apply(self, orient: Orient) -> Orient {
        let turned = orient.turned(self.direct);
        if self.flip { turned.mirrored() } else { turned }
    }
}

impl Default for SpaceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
