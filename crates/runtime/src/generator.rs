//! Floor generation seam.
//!
//! The core only ever reports that an actor descended; producing the next
//! floor is this collaborator's job. [`StaticFloor`] is the trivial
//! implementation used by tests and demos: a floor parsed from a string
//! map, handed out again on every call.

use game_core::{DiceRoller, Position, TileGrid};
use game_content::{ActorTemplate, ItemTemplate};

/// One generated floor: terrain plus everything standing or lying on it.
#[derive(Clone, Debug)]
pub struct Floor {
    pub grid: TileGrid,
    pub player_start: Position,
    pub npcs: Vec<(ActorTemplate, Position)>,
    pub items: Vec<(ItemTemplate, Position)>,
}

/// World-generation collaborator: called once at session start and again
/// each time the player takes the downstairs.
pub trait FloorGenerator {
    fn generate(&mut self, depth: u32, rng: &mut dyn DiceRoller) -> Floor;
}

/// Generator that returns the same hand-authored floor at every depth.
///
/// Map legend: `#` wall, `.` floor, `>` downstairs, `@` player start.
/// Unless [`StaticFloor::shrouded`] is called, every tile is marked visible
/// at generation time, standing in for the out-of-scope FOV collaborator.
#[derive(Clone, Debug)]
pub struct StaticFloor {
    grid: TileGrid,
    player_start: Position,
    npcs: Vec<(ActorTemplate, Position)>,
    items: Vec<(ItemTemplate, Position)>,
    shrouded: bool,
}

impl StaticFloor {
    pub fn parse(map: &str) -> Self {
        let rows: Vec<&str> = map.lines().filter(|line| !line.is_empty()).collect();
        let height = rows.len() as u32;
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let mut grid = TileGrid::new(width, height);
        let mut player_start = Position::ORIGIN;

        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                let open = glyph != '#';
                grid.set_terrain(position, open, open);
                match glyph {
                    '>' => grid.set_downstairs(position),
                    '@' => player_start = position,
                    _ => {}
                }
            }
        }

        Self {
            grid,
            player_start,
            npcs: Vec::new(),
            items: Vec::new(),
            shrouded: false,
        }
    }

    pub fn with_npc(mut self, template: ActorTemplate, position: Position) -> Self {
        self.npcs.push((template, position));
        self
    }

    pub fn with_item(mut self, template: ItemTemplate, position: Position) -> Self {
        self.items.push((template, position));
        self
    }

    /// Leaves the floor unlit; the caller is expected to drive visibility.
    pub fn shrouded(mut self) -> Self {
        self.shrouded = true;
        self
    }
}

impl FloorGenerator for StaticFloor {
    fn generate(&mut self, _depth: u32, _rng: &mut dyn DiceRoller) -> Floor {
        let mut grid = self.grid.clone();
        if !self.shrouded {
            for y in 0..grid.height() as i32 {
                for x in 0..grid.width() as i32 {
                    grid.set_visible(Position::new(x, y), true);
                }
            }
        }
        Floor {
            grid,
            player_start: self.player_start,
            npcs: self.npcs.clone(),
            items: self.items.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::GameRng;

    #[test]
    fn parse_reads_terrain_stairs_and_start() {
        let floor = StaticFloor::parse(
            "#####\n\
             #@.>#\n\
             #####",
        );
        let mut rng = GameRng::seeded(1);
        let generated = floor.clone().generate(1, &mut rng);

        assert_eq!(generated.player_start, Position::new(1, 1));
        assert_eq!(generated.grid.downstairs(), Position::new(3, 1));
        assert!(generated.grid.is_walkable(Position::new(2, 1)));
        assert!(!generated.grid.is_walkable(Position::new(0, 0)));
        assert!(generated.grid.is_visible(Position::new(2, 1)));
    }

    #[test]
    fn shrouded_floors_start_unseen() {
        let floor = StaticFloor::parse("@.>").shrouded();
        let mut rng = GameRng::seeded(1);
        let generated = floor.clone().generate(1, &mut rng);
        assert!(!generated.grid.is_visible(Position::new(1, 0)));
    }
}
