//! Arena geometry builder
//!
//! Turns a level descriptor into static wall colliders. Three layouts:
//! - Open: border plus a handful of random obstacles
//! - Maze: a fixed ASCII grid merged into horizontal wall runs
//! - Ring: a hollow rectangle of four segments around the arena center
//!
//! Building an open arena is the only place obstacle randomness is drawn.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::collision::{circle_hits_any, push_circle_out_of_walls};
use crate::consts::{OBSTACLE_COUNT, RING_FRACTION, TILE_SIZE, WALL_THICKNESS};
use crate::level::LevelDescriptor;

/// Fixed maze map: `#` is wall, `.` is floor
pub const MAZE_MAP: [&str; 13] = [
    "#############################",
    "#...........#...............#",
    "#.#####.###.#.#####.#######.#",
    "#.#...#...#.#.....#.....#...#",
    "#.#.#.###.#.#####.#####.#.###",
    "#...#.....#.....#.....#.#...#",
    "###.###########.#####.#.###.#",
    "#...#.........#.....#.#...#.#",
    "#.###.#######.#####.#.###.#.#",
    "#.....#.....#.....#.#.....#.#",
    "#.#####.###.#####.#.#######.#",
    "#.......#...#.....#.........#",
    "#############################",
];

/// Ring wall segment thickness, in tiles
pub const RING_SEGMENT_TILES: f32 = 0.9;
/// Random obstacles stay this many tiles away from the border
pub const OBSTACLE_MARGIN_TILES: f32 = 2.0;
/// Random obstacle side length range, in tiles
pub const OBSTACLE_MIN_TILES: f32 = 0.7;
pub const OBSTACLE_MAX_TILES: f32 = 1.8;

/// Which geometry a level uses, chosen from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutKind {
    Open,
    Maze,
    Ring,
}

impl LayoutKind {
    /// Case-insensitive match on the level name
    pub fn from_level_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if ["maze", "labyrinth", "лабиринт"].iter().any(|k| name.contains(k)) {
            LayoutKind::Maze
        } else if ["ring", "кольцев"].iter().any(|k| name.contains(k)) {
            LayoutKind::Ring
        } else {
            LayoutKind::Open
        }
    }
}

/// The hollow rectangle of a ring layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingBand {
    pub center: Vec2,
    /// Half width / half height of the ring centerline
    pub half: Vec2,
    /// Wall segment thickness
    pub thickness: f32,
}

impl RingBand {
    /// Sampling rectangle inside the ring, shrunk by `margin` on every side
    ///
    /// Returns `None` when the margin leaves no room.
    pub fn interior(&self, margin: f32) -> Option<(Vec2, Vec2)> {
        let min = self.center - self.half + Vec2::splat(margin);
        let max = self.center + self.half - Vec2::splat(margin);
        (min.x < max.x && min.y < max.y).then_some((min, max))
    }
}

/// Layout-specific spawn data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArenaLayout {
    Open,
    Maze { floor_tiles: Vec<Vec2> },
    Ring(RingBand),
}

/// Static level geometry; immutable once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Play area width (world units)
    pub width: f32,
    /// Play area height (world units)
    pub height: f32,
    pub walls: Vec<Aabb>,
    pub layout: ArenaLayout,
}

/// Uniform sample in `[lo, hi)`, or `lo` when the range is empty
pub(crate) fn sample_range<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

impl Arena {
    /// Build the arena for a level
    pub fn build<R: Rng>(level: &LevelDescriptor, rng: &mut R) -> Self {
        let width = level.arena_width as f32 * TILE_SIZE;
        let height = level.arena_height as f32 * TILE_SIZE;
        let kind = LayoutKind::from_level_name(&level.name);

        let arena = match kind {
            LayoutKind::Maze => Self::maze(width, height),
            LayoutKind::Ring => Self::ring(width, height),
            LayoutKind::Open => Self::open(width, height, rng),
        };
        log::info!(
            "Built {:?} arena for '{}': {}x{} units, {} walls",
            kind,
            level.name,
            width,
            height,
            arena.walls.len()
        );
        arena
    }

    /// Border walls only
    pub fn bordered(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            walls: border_walls(width, height),
            layout: ArenaLayout::Open,
        }
    }

    fn open<R: Rng>(width: f32, height: f32, rng: &mut R) -> Self {
        let mut arena = Self::bordered(width, height);
        let margin = TILE_SIZE * OBSTACLE_MARGIN_TILES;
        for _ in 0..OBSTACLE_COUNT {
            let x = sample_range(rng, margin, width - margin);
            let y = sample_range(rng, margin, height - margin);
            let w = sample_range(rng, TILE_SIZE * OBSTACLE_MIN_TILES, TILE_SIZE * OBSTACLE_MAX_TILES);
            let h = sample_range(rng, TILE_SIZE * OBSTACLE_MIN_TILES, TILE_SIZE * OBSTACLE_MAX_TILES);
            arena.walls.push(Aabb::from_center_size(x, y, w, h));
        }
        arena
    }

    fn maze(width: f32, height: f32) -> Self {
        let cell = TILE_SIZE;
        let rows = MAZE_MAP.len();
        let cols = MAZE_MAP[0].len();
        let offset = Vec2::new(
            (width - cols as f32 * cell) / 2.0,
            (height - rows as f32 * cell) / 2.0,
        );

        let mut walls = border_walls(width, height);
        let mut floor_tiles = Vec::new();
        for (row_idx, row) in MAZE_MAP.iter().enumerate() {
            walls.extend(merge_wall_runs(row, row_idx, cell, offset));
            for (col_idx, c) in row.bytes().enumerate() {
                if c != b'.' {
                    continue;
                }
                let tile = offset
                    + Vec2::new(col_idx as f32 * cell, row_idx as f32 * cell)
                    + Vec2::splat(cell / 2.0);
                // Grids larger than the arena lose their outer floor
                if tile.x > 0.0 && tile.y > 0.0 && tile.x < width && tile.y < height {
                    floor_tiles.push(tile);
                }
            }
        }

        Self {
            width,
            height,
            walls,
            layout: ArenaLayout::Maze { floor_tiles },
        }
    }

    fn ring(width: f32, height: f32) -> Self {
        let band = RingBand {
            center: Vec2::new(width / 2.0, height / 2.0),
            half: Vec2::new(width * RING_FRACTION / 2.0, height * RING_FRACTION / 2.0),
            thickness: TILE_SIZE * RING_SEGMENT_TILES,
        };
        let (c, half, seg) = (band.center, band.half, band.thickness);

        let mut walls = border_walls(width, height);
        walls.push(Aabb::from_center_size(c.x, c.y + half.y, half.x * 2.0, seg));
        walls.push(Aabb::from_center_size(c.x, c.y - half.y, half.x * 2.0, seg));
        walls.push(Aabb::from_center_size(c.x - half.x, c.y, seg, half.y * 2.0));
        walls.push(Aabb::from_center_size(c.x + half.x, c.y, seg, half.y * 2.0));

        Self {
            width,
            height,
            walls,
            layout: ArenaLayout::Ring(band),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a circle overlaps any wall
    #[inline]
    pub fn overlaps_wall(&self, pos: Vec2, radius: f32) -> bool {
        circle_hits_any(pos, radius, &self.walls)
    }

    /// Whether a point has left the play area
    pub fn is_out_of_bounds(&self, pos: Vec2) -> bool {
        pos.x < 0.0 || pos.y < 0.0 || pos.x > self.width || pos.y > self.height
    }

    /// Clamp a circle's center so the circle stays inside the play area
    pub fn clamp_inside(&self, pos: Vec2, radius: f32) -> Vec2 {
        let clamp_axis = |v: f32, extent: f32| {
            if extent > radius * 2.0 {
                v.clamp(radius, extent - radius)
            } else {
                extent / 2.0
            }
        };
        Vec2::new(clamp_axis(pos.x, self.width), clamp_axis(pos.y, self.height))
    }

    /// Safe starting point for the player
    ///
    /// Mazes use the floor tile nearest the center; other layouts start at the
    /// center and push out of any obstacle sitting there.
    pub fn player_start(&self, radius: f32) -> Vec2 {
        let center = self.center();
        match &self.layout {
            ArenaLayout::Maze { floor_tiles } if !floor_tiles.is_empty() => floor_tiles
                .iter()
                .copied()
                .min_by(|a, b| {
                    a.distance_squared(center)
                        .partial_cmp(&b.distance_squared(center))
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .unwrap_or(center),
            _ => {
                let (pos, _) = push_circle_out_of_walls(center, radius, &self.walls);
                self.clamp_inside(pos, radius)
            }
        }
    }
}

/// Four walls enclosing `[0, width] x [0, height]` from the outside
pub fn border_walls(width: f32, height: f32) -> Vec<Aabb> {
    let t = WALL_THICKNESS;
    vec![
        Aabb::from_center_size(width / 2.0, -t / 2.0, width, t),
        Aabb::from_center_size(width / 2.0, height + t / 2.0, width, t),
        Aabb::from_center_size(-t / 2.0, height / 2.0, t, height),
        Aabb::from_center_size(width + t / 2.0, height / 2.0, t, height),
    ]
}

/// Merge contiguous `#` cells of one grid row into single rectangles
fn merge_wall_runs(row: &str, row_idx: usize, cell: f32, offset: Vec2) -> Vec<Aabb> {
    let bytes = row.as_bytes();
    let mut walls = Vec::new();
    let mut x = 0;
    while x < bytes.len() {
        if bytes[x] != b'#' {
            x += 1;
            continue;
        }
        let start = x;
        while x < bytes.len() && bytes[x] == b'#' {
            x += 1;
        }
        let run = (x - start) as f32;
        walls.push(Aabb::from_center_size(
            offset.x + start as f32 * cell + run * cell / 2.0,
            offset.y + row_idx as f32 * cell + cell / 2.0,
            run * cell,
            cell,
        ));
    }
    walls
}
