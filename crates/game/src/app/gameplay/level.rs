use std::fs;
use std::path::{Path, PathBuf};

use engine::{Rect, Vec2};
use thiserror::Error;

pub(crate) const TILE_SIZE: f32 = 32.0;

const SOLID_TILE: char = '1';
const HERO_MARKER: char = 'P';
const ENEMY_MARKER: char = 'E';
const EMPTY_TILE: char = '.';
const MAX_SYNTHESIZED_ENEMIES: usize = 3;
const MIN_PLATFORM_TILES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum LevelFormatError {
    #[error("map is empty")]
    Empty,
    #[error("map row {row} has {actual} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Error)]
pub(crate) enum LevelError {
    #[error("failed to read map file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed map file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: LevelFormatError,
    },
}

/// Where an enemy starts and the strip of floor it patrols.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EnemySpawn {
    pub(crate) territory: Rect,
    pub(crate) spawn: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PlatformSegment {
    row: usize,
    start: usize,
    len: usize,
}

impl PlatformSegment {
    fn contains(&self, col: usize, row: usize) -> bool {
        self.row == row && col >= self.start && col < self.start + self.len
    }

    fn rect(&self) -> Rect {
        tile_run_rect(self.start, self.start + self.len, self.row)
    }
}

/// Static level geometry. Positions are in pixels with y pointing down.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Level {
    cols: usize,
    rows: usize,
    solids: Vec<Rect>,
    solid_tiles: Vec<(usize, usize)>,
    hero_spawn: Vec2,
    enemy_spawns: Vec<EnemySpawn>,
}

impl Level {
    pub(crate) fn load(path: &Path) -> Result<Self, LevelError> {
        let raw = fs::read_to_string(path).map_err(|source| LevelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw).map_err(|source| LevelError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn parse(raw: &str) -> Result<Self, LevelFormatError> {
        let grid: Vec<Vec<char>> = raw
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();
        let Some(first) = grid.first() else {
            return Err(LevelFormatError::Empty);
        };
        let cols = first.len();
        if let Some((row, line)) = grid.iter().enumerate().find(|(_, line)| line.len() != cols) {
            return Err(LevelFormatError::RaggedRow {
                row,
                expected: cols,
                actual: line.len(),
            });
        }
        let rows = grid.len();
        let is_solid = |col: usize, row: usize| grid[row][col] == SOLID_TILE;

        let mut solids = Vec::new();
        let mut solid_tiles = Vec::new();
        let mut hero_spawn = None;
        let mut enemy_tiles = Vec::new();

        for (row, line) in grid.iter().enumerate() {
            let mut run_start = None;
            for (col, &tile) in line.iter().enumerate() {
                if tile == SOLID_TILE {
                    solid_tiles.push((col, row));
                    run_start.get_or_insert(col);
                    continue;
                }
                if let Some(start) = run_start.take() {
                    solids.push(tile_run_rect(start, col, row));
                }
                match tile {
                    HERO_MARKER if hero_spawn.is_none() => {
                        hero_spawn = Some(Vec2::new(
                            (col as f32 + 0.5) * TILE_SIZE,
                            (row + 1) as f32 * TILE_SIZE,
                        ));
                    }
                    ENEMY_MARKER => {
                        // Markers may float; drop through empty cells onto whatever is below.
                        let mut base = row;
                        while base + 1 < rows && grid[base + 1][col] == EMPTY_TILE {
                            base += 1;
                        }
                        enemy_tiles.push((col, base + 1));
                    }
                    _ => {}
                }
            }
            if let Some(start) = run_start {
                solids.push(tile_run_rect(start, cols, row));
            }
        }

        let hero_spawn = hero_spawn.unwrap_or_else(|| {
            Vec2::new(cols as f32 / 2.0 * TILE_SIZE, (rows - 1) as f32 * TILE_SIZE)
        });

        let segments = platform_top_segments(cols, rows, is_solid);
        if enemy_tiles.is_empty() {
            enemy_tiles = segments
                .iter()
                .filter(|segment| segment.row != 0 && segment.row != rows - 1)
                .take(MAX_SYNTHESIZED_ENEMIES)
                .map(|segment| (segment.start + segment.len / 2, segment.row))
                .collect();
        }

        let width_px = cols as f32 * TILE_SIZE;
        let enemy_spawns = enemy_tiles
            .into_iter()
            .map(|(col, resting_row)| {
                let territory = segments
                    .iter()
                    .find(|segment| segment.contains(col, resting_row))
                    .map(PlatformSegment::rect)
                    .unwrap_or_else(|| fallback_territory(col, resting_row, width_px));
                EnemySpawn {
                    territory,
                    spawn: Vec2::new(
                        (col as f32 + 0.5) * TILE_SIZE,
                        resting_row as f32 * TILE_SIZE,
                    ),
                }
            })
            .collect();

        Ok(Self {
            cols,
            rows,
            solids,
            solid_tiles,
            hero_spawn,
            enemy_spawns,
        })
    }

    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn width_px(&self) -> f32 {
        self.cols as f32 * TILE_SIZE
    }

    pub(crate) fn height_px(&self) -> f32 {
        self.rows as f32 * TILE_SIZE
    }

    /// Merged horizontal runs of solid tiles, one rectangle per run.
    pub(crate) fn solids(&self) -> &[Rect] {
        &self.solids
    }

    /// Individual solid tiles as `(col, row)`.
    pub(crate) fn solid_tiles(&self) -> &[(usize, usize)] {
        &self.solid_tiles
    }

    pub(crate) fn hero_spawn(&self) -> Vec2 {
        self.hero_spawn
    }

    pub(crate) fn enemy_spawns(&self) -> &[EnemySpawn] {
        &self.enemy_spawns
    }
}

fn tile_run_rect(start_col: usize, end_col: usize, row: usize) -> Rect {
    Rect::new(
        start_col as f32 * TILE_SIZE,
        row as f32 * TILE_SIZE,
        (end_col - start_col) as f32 * TILE_SIZE,
        TILE_SIZE,
    )
}

/// Runs of at least two solid tiles with open space directly above.
fn platform_top_segments(
    cols: usize,
    rows: usize,
    is_solid: impl Fn(usize, usize) -> bool,
) -> Vec<PlatformSegment> {
    let mut segments = Vec::new();
    for row in 0..rows {
        let is_top = |col: usize| is_solid(col, row) && (row == 0 || !is_solid(col, row - 1));
        let mut col = 0;
        while col < cols {
            if !is_top(col) {
                col += 1;
                continue;
            }
            let start = col;
            while col < cols && is_top(col) {
                col += 1;
            }
            let len = col - start;
            if len >= MIN_PLATFORM_TILES {
                segments.push(PlatformSegment { row, start, len });
            }
        }
    }
    segments
}

/// Three tiles wide, starting one tile left of the enemy, clipped to the map.
fn fallback_territory(col: usize, row: usize, width_px: f32) -> Rect {
    let left = (col as f32 - 1.0).max(0.0) * TILE_SIZE;
    let width = (width_px - left).min(TILE_SIZE * 3.0).max(0.0);
    Rect::new(left, row as f32 * TILE_SIZE, width, TILE_SIZE)
}
