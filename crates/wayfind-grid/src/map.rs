//! 2D occupancy grid maps and the MovingAI `.map` text format.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Failures while reading a `.map` file.
#[derive(Debug, Error)]
pub enum MapError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("map {0} specification is missing or malformed")]
    BadDimension(&'static str),
    #[error("map {0} specified more than once")]
    DuplicateDimension(&'static str),
    #[error("`map` keyword did not appear")]
    MissingMapKeyword,
    #[error("invalid map symbol {symbol:?} on line {line}")]
    BadSymbol { symbol: char, line: usize },
    #[error("map row on line {line} does not match the specified width")]
    BadRowLength { line: usize },
    #[error("map has {rows} rows but the header specified {height}")]
    WrongRowCount { rows: usize, height: i32 },
}

/// A rectangular grid of traversable (`true`) and blocked (`false`) cells,
/// stored row-major.
///
/// Reads outside the map bounds return blocked, so neighborhood checks do
/// not need their own bounds tests.
#[derive(Clone)]
pub struct GridMap {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl GridMap {
    /// A map of the given size with every cell blocked.
    #[track_caller]
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0, "map width must be positive");
        assert!(height > 0, "map height must be positive");
        GridMap {
            width,
            height,
            cells: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// A map of the given size with every cell traversable.
    #[track_caller]
    pub fn empty(width: i32, height: i32) -> Self {
        let mut map = GridMap::new(width, height);
        map.cells.fill(true);
        map
    }

    #[inline(always)]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `(x, y)` is traversable. Out-of-bounds cells are blocked.
    #[inline(always)]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.cells[(y * self.width + x) as usize]
    }

    #[track_caller]
    pub fn set(&mut self, x: i32, y: i32, traversable: bool) {
        assert!(
            x >= 0 && y >= 0 && x < self.width && y < self.height,
            "({x}, {y}) is out of bounds of the {}x{} map",
            self.width,
            self.height
        );
        self.cells[(y * self.width + x) as usize] = traversable;
    }

    /// Reads a map in the MovingAI `.map` format.
    ///
    /// Header lines are scanned for `width N` and `height N` until the
    /// `map` keyword; other header lines (such as `type octile`) are
    /// ignored. In the body, `.`, `G`, and `S` are traversable; `@`, `O`,
    /// `T`, and `W` are blocked; anything else is an error.
    pub fn from_reader(reader: impl BufRead) -> Result<GridMap, MapError> {
        let mut width = 0;
        let mut height = 0;
        let mut map: Option<GridMap> = None;
        let mut rows = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            let Some(map) = &mut map else {
                if line.trim() == "map" {
                    if width == 0 || height == 0 {
                        return Err(MapError::BadDimension(if width == 0 {
                            "width"
                        } else {
                            "height"
                        }));
                    }
                    map = Some(GridMap::new(width, height));
                    continue;
                }

                let mut tokens = line.split_whitespace();
                match tokens.next() {
                    Some("width") => parse_dimension(&mut tokens, &mut width, "width")?,
                    Some("height") => parse_dimension(&mut tokens, &mut height, "height")?,
                    _ => {}
                }
                continue;
            };

            if rows as i32 >= height {
                return Err(MapError::WrongRowCount {
                    rows: rows + 1,
                    height,
                });
            }
            if line.chars().count() != width as usize {
                return Err(MapError::BadRowLength { line: line_no });
            }
            for (x, symbol) in line.chars().enumerate() {
                match symbol {
                    '.' | 'G' | 'S' => map.set(x as i32, rows as i32, true),
                    '@' | 'O' | 'T' | 'W' => {}
                    _ => {
                        return Err(MapError::BadSymbol {
                            symbol,
                            line: line_no,
                        })
                    }
                }
            }
            rows += 1;
        }

        let map = map.ok_or(MapError::MissingMapKeyword)?;
        if rows as i32 != height {
            return Err(MapError::WrongRowCount { rows, height });
        }
        Ok(map)
    }

    /// Reads a map from a `.map` file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<GridMap, MapError> {
        GridMap::from_reader(BufReader::new(File::open(path)?))
    }
}

fn parse_dimension<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    slot: &mut i32,
    field: &'static str,
) -> Result<(), MapError> {
    if *slot != 0 {
        return Err(MapError::DuplicateDimension(field));
    }
    let value: i32 = tokens
        .next()
        .and_then(|tok| tok.parse().ok())
        .ok_or(MapError::BadDimension(field))?;
    if value <= 0 || tokens.next().is_some() {
        return Err(MapError::BadDimension(field));
    }
    *slot = value;
    Ok(())
}
