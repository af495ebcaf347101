//! Level maps and brick layout
//!
//! A level map is plain text, one brick row per line. A space is an empty
//! cell, any other character is a brick whose digit picks the color:
//!
//! ```text
//! 0123456012
//! 5 5 5 5 5
//! ```
//!
//! Bricks are sized from the screen width at load time so every device gets
//! the same ten-column grid.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::consts::*;
use crate::sim::{Brick, ColorTag, Rect};

/// One non-empty cell of a level map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickCell {
    pub column: u32,
    pub row: u32,
    pub color: ColorTag,
}

/// Where level map texts come from
pub trait LevelSource: Send {
    /// Raw map text for a 1-based level
    fn read(&self, level: u32) -> Result<String>;
}

/// Maps held in memory; `builtin()` is compiled into the binary
#[derive(Debug, Clone)]
pub struct InlineLevels {
    maps: Vec<String>,
}

impl InlineLevels {
    pub fn from_maps<I, S>(maps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            maps: maps.into_iter().map(Into::into).collect(),
        }
    }

    /// The three stock levels
    pub fn builtin() -> Self {
        Self::from_maps([
            include_str!("../levels/level_1.txt"),
            include_str!("../levels/level_2.txt"),
            include_str!("../levels/level_3.txt"),
        ])
    }
}

impl LevelSource for InlineLevels {
    fn read(&self, level: u32) -> Result<String> {
        let index = level.checked_sub(1).map(|i| i as usize);
        match index.and_then(|i| self.maps.get(i)) {
            Some(map) => Ok(map.clone()),
            None => bail!("no map for level {level} ({} available)", self.maps.len()),
        }
    }
}

/// Maps read from `<dir>/level_<n>.txt`
#[derive(Debug, Clone)]
pub struct DirLevels {
    dir: PathBuf,
}

impl DirLevels {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, level: u32) -> PathBuf {
        self.dir.join(format!("level_{level}.txt"))
    }
}

impl LevelSource for DirLevels {
    fn read(&self, level: u32) -> Result<String> {
        let path = self.path_for(level);
        fs::read_to_string(&path).with_context(|| format!("reading level map {}", path.display()))
    }
}

/// Parse a map into cells, row by row, left to right
pub fn parse_level(text: &str) -> Vec<BrickCell> {
    let mut cells = Vec::new();
    for (row, line) in text.lines().enumerate() {
        for (column, ch) in line.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            // Non-digits land on the default color like out-of-palette digits
            let color = ColorTag::from_code(ch.to_digit(10).unwrap_or(0));
            cells.push(BrickCell {
                column: column as u32,
                row: row as u32,
                color,
            });
        }
    }
    cells
}

/// Brick width and height for a screen width
pub fn brick_size(screen_width: f32) -> (f32, f32) {
    let columns = BRICKS_PER_ROW as f32;
    let width = (screen_width - columns * BRICK_GAP) / columns;
    let height = width * (BRICK_HEIGHT_BASE / BRICK_WIDTH_BASE);
    (width, height)
}

/// Turn cells into bricks positioned on a gapped grid
pub fn layout_bricks(cells: &[BrickCell], screen_width: f32) -> Vec<Brick> {
    let (width, height) = brick_size(screen_width);
    cells
        .iter()
        .map(|cell| {
            let left = cell.column as f32 * (width + BRICK_GAP);
            let top = cell.row as f32 * (height + BRICK_GAP);
            Brick::new(Rect::from_origin_size(left, top, width, height), cell.color)
        })
        .collect()
}

/// Resolves level numbers to brick sets
pub struct LevelCatalog {
    source: Box<dyn LevelSource>,
}

impl LevelCatalog {
    pub fn new(source: impl LevelSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Catalog over the built-in maps
    pub fn builtin() -> Self {
        Self::new(InlineLevels::builtin())
    }

    /// Bricks for a level; an unreadable map is logged and yields no bricks
    pub fn load(&self, level: u32, screen_width: f32) -> Vec<Brick> {
        match self.source.read(level) {
            Ok(text) => {
                let bricks = layout_bricks(&parse_level(&text), screen_width);
                log::info!("Loaded level {} with {} bricks", level, bricks.len());
                bricks
            }
            Err(e) => {
                log::error!("Error loading level {level}: {e:#}");
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for LevelCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelCatalog").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.01;

    #[test]
    fn test_parse_skips_spaces() {
        let cells = parse_level("1 2\n 3\n");
        assert_eq!(
            cells,
            vec![
                BrickCell { column: 0, row: 0, color: ColorTag::DarkGoldenrod },
                BrickCell { column: 2, row: 0, color: ColorTag::IndianRed },
                BrickCell { column: 1, row: 1, color: ColorTag::ForestGreen },
            ]
        );
    }

    #[test]
    fn test_parse_unknown_colors_fall_back() {
        let cells = parse_level("9x7\r\n");
        assert_eq!(cells.len(), 3);
        assert!(cells.iter().all(|c| c.color == ColorTag::SlateGray));
    }

    #[test]
    fn test_brick_size_keeps_aspect() {
        let (w, h) = brick_size(400.0);
        assert!((w - 35.0).abs() < EPS);
        assert!((h - 17.5).abs() < EPS);

        let (w, h) = brick_size(1080.0);
        assert!((w - 103.0).abs() < EPS);
        assert!((h / w - 0.5).abs() < EPS);
    }

    #[test]
    fn test_layout_grid_positions() {
        let bricks = layout_bricks(&parse_level("0123456012\n  3"), 400.0);
        assert_eq!(bricks.len(), 11);
        for (i, brick) in bricks.iter().take(10).enumerate() {
            assert!((brick.rect.left - i as f32 * 40.0).abs() < EPS);
            assert!(brick.rect.top.abs() < EPS);
            assert!((brick.rect.width() - 35.0).abs() < EPS);
        }
        let last = &bricks[10];
        assert!((last.rect.left - 80.0).abs() < EPS);
        assert!((last.rect.top - 22.5).abs() < EPS);
        assert_eq!(last.color, ColorTag::ForestGreen);
        // Last column ends inside the screen
        assert!(bricks[9].rect.right <= 400.0 + EPS);
    }

    #[test]
    fn test_inline_levels_out_of_range() {
        let levels = InlineLevels::from_maps(["11"]);
        assert!(levels.read(1).is_ok());
        assert!(levels.read(0).is_err());
        assert!(levels.read(2).is_err());
    }

    #[test]
    fn test_builtin_levels_have_bricks() {
        let catalog = LevelCatalog::builtin();
        for level in 1..=MAX_LEVELS {
            assert!(!catalog.load(level, 400.0).is_empty(), "level {level} is empty");
        }
    }

    #[test]
    fn test_dir_levels_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("level_2.txt"), "55\n").unwrap();
        let catalog = LevelCatalog::new(DirLevels::new(dir.path()));
        assert_eq!(catalog.load(2, 400.0).len(), 2);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = LevelCatalog::new(DirLevels::new(dir.path()));
        assert!(catalog.load(1, 400.0).is_empty());
    }
}
