//! ASCII rendering for the REPL.

use parable_foundation::Point;
use parable_lexicon::EntityKind;
use parable_world::{Body, Level, Space};

fn glyph(body: &Body) -> char {
    match body {
        Body::Plain(kind) => match kind {
            EntityKind::Baba => 'b',
            EntityKind::Keke => 'k',
            EntityKind::Me => 'm',
            EntityKind::Wall => '#',
            EntityKind::Hedge => 'H',
            EntityKind::Ice => '/',
            EntityKind::Tile => ',',
            EntityKind::Grass => '"',
            EntityKind::Water => '~',
            EntityKind::Lava => '^',
            EntityKind::Door => 'D',
            EntityKind::Key => 'K',
            EntityKind::Box => 'x',
            EntityKind::Rock => 'o',
            EntityKind::Fruit => 'f',
            EntityKind::Belt => '>',
            EntityKind::Flag => 'F',
            EntityKind::Star => '*',
            EntityKind::Orb => 'O',
            EntityKind::Cursor => '+',
        },
        Body::Text(_) => 'T',
        Body::SpaceRef { .. } => '@',
        Body::LevelRef { .. } => 'L',
        Body::Game(_) => '?',
    }
}

/// Renders one space as lines of glyphs, topmost object per cell.
#[must_use]
pub fn render_space(space: &Space) -> String {
    let mut out = String::new();
    for y in 0..space.size.height {
        for x in 0..space.size.width {
            let cell = space
                .objects_at(Point::new(x, y))
                .last()
                .map_or('.', |o| glyph(&o.body));
            out.push(cell);
        }
        out.push('\n');
    }
    out
}

/// Renders a level's root space.
#[must_use]
pub fn render_level(level: &Level) -> String {
    level.space(&level.root).map(render_space).unwrap_or_default()
}
