//! Weighted shortest-path search over the tile grid.
//!
//! Cardinal steps cost 2 and diagonal steps 3, so routes prefer straight
//! lines without forbidding diagonals. Tiles occupied by a movement-blocking
//! entity carry a configurable additive penalty instead of being impassable:
//! actors eventually path around a crowd rather than refusing to move, while
//! still preferring open routes.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::config::GameConfig;
use crate::state::{EntityId, GameState, Position};

const CARDINAL_COST: u32 = 2;
const DIAGONAL_COST: u32 = 3;

const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Cheapest path from `from` to `to` for `mover`, excluding the start tile.
/// Returns an empty path when the destination is unreachable.
///
/// Ties are broken by position order, so equal-cost searches are
/// reproducible run to run.
pub fn find_path(
    state: &GameState,
    config: &GameConfig,
    from: Position,
    to: Position,
    mover: EntityId,
) -> VecDeque<Position> {
    let grid = &state.grid;
    if !grid.in_bounds(from) || !grid.in_bounds(to) || from == to {
        return VecDeque::new();
    }
    let width = grid.width() as usize;
    let height = grid.height() as usize;
    let index = |p: Position| p.y as usize * width + p.x as usize;

    let mut crowd = vec![0u32; width * height];
    for actor in state.entities.all_actors() {
        if actor.id != mover && actor.blocks_movement && grid.in_bounds(actor.position) {
            crowd[index(actor.position)] += config.crowd_penalty;
        }
    }

    let mut dist = vec![u32::MAX; width * height];
    let mut prev: Vec<Option<Position>> = vec![None; width * height];
    let mut frontier = BinaryHeap::new();
    dist[index(from)] = 0;
    frontier.push(Reverse((0u32, from)));

    while let Some(Reverse((cost, position))) = frontier.pop() {
        if position == to {
            break;
        }
        if cost > dist[index(position)] {
            continue;
        }
        for (dx, dy) in NEIGHBORS {
            let next = position.offset(dx, dy);
            if !grid.in_bounds(next) || !grid.is_walkable(next) {
                continue;
            }
            let step = if dx != 0 && dy != 0 {
                DIAGONAL_COST
            } else {
                CARDINAL_COST
            };
            let next_cost = cost + step + crowd[index(next)];
            if next_cost < dist[index(next)] {
                dist[index(next)] = next_cost;
                prev[index(next)] = Some(position);
                frontier.push(Reverse((next_cost, next)));
            }
        }
    }

    if dist[index(to)] == u32::MAX {
        return VecDeque::new();
    }
    let mut steps = VecDeque::new();
    let mut cursor = to;
    while cursor != from {
        steps.push_front(cursor);
        cursor = match prev[index(cursor)] {
            Some(previous) => previous,
            None => return VecDeque::new(),
        };
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorEntity, EntitiesState, Fighter, Inventory, Rgb, TileGrid};

    /// Builds a state from rows of '#' (wall) and '.' (floor), with the
    /// player parked off in a corner.
    fn state_from(rows: &[&str]) -> GameState {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let mut grid = TileGrid::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let open = ch != '#';
                grid.set_terrain(Position::new(x as i32, y as i32), open, open);
            }
        }
        let player = ActorEntity::new(
            EntityId::PLAYER,
            "Player",
            '@',
            Rgb(255, 255, 255),
            Position::new(0, 0),
            Fighter::new(30, 0, 1),
            Inventory::new(0),
        );
        GameState::new(grid, EntitiesState::new(player))
    }

    fn spawn_blocker(state: &mut GameState, position: Position) {
        let id = state.entities.allocate_id();
        state.entities.insert_actor(ActorEntity::new(
            id,
            "Orc",
            'o',
            Rgb(63, 127, 63),
            position,
            Fighter::new(10, 0, 3),
            Inventory::new(0),
        ));
    }

    #[test]
    fn straight_line_path_over_open_floor() {
        let state = state_from(&["....", "....", "...."]);
        let path = find_path(
            &state,
            &GameConfig::default(),
            Position::new(0, 1),
            Position::new(3, 1),
            EntityId(99),
        );
        assert_eq!(
            Vec::from(path),
            vec![Position::new(1, 1), Position::new(2, 1), Position::new(3, 1)]
        );
    }

    #[test]
    fn walls_are_impassable() {
        let state = state_from(&[".#.", ".#.", ".#."]);
        let path = find_path(
            &state,
            &GameConfig::default(),
            Position::new(0, 0),
            Position::new(2, 0),
            EntityId(99),
        );
        assert!(path.is_empty());
    }

    #[test]
    fn crowds_are_routed_around_but_not_forbidden() {
        let mut state = state_from(&["...", "...", "..."]);
        spawn_blocker(&mut state, Position::new(1, 1));

        let detour = find_path(
            &state,
            &GameConfig::default(),
            Position::new(0, 1),
            Position::new(2, 1),
            EntityId(99),
        );
        // The occupied center tile costs 2 + 10; the diagonal detour is
        // cheaper and gets taken.
        assert!(!detour.contains(&Position::new(1, 1)));

        // With no penalty the straight line wins again.
        let direct = find_path(
            &state,
            &GameConfig::with_crowd_penalty(0),
            Position::new(0, 1),
            Position::new(2, 1),
            EntityId(99),
        );
        assert!(direct.contains(&Position::new(1, 1)));
    }

    #[test]
    fn corridor_crowds_are_still_traversed() {
        let mut state = state_from(&["###", "...", "###"]);
        spawn_blocker(&mut state, Position::new(1, 1));

        let path = find_path(
            &state,
            &GameConfig::default(),
            Position::new(0, 1),
            Position::new(2, 1),
            EntityId(99),
        );
        assert_eq!(
            Vec::from(path),
            vec![Position::new(1, 1), Position::new(2, 1)]
        );
    }
}
