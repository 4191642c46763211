//! MovingAI `.scen` problem-set parsing for experiment drivers.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unsupported scenario version {0:?}")]
    BadVersion(String),
    #[error("scenario line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },
    #[error("scenario line {line}: malformed field `{field}`")]
    BadField { line: usize, field: &'static str },
    #[error("scenario mixes maps: {0:?} vs {1:?}")]
    MixedMaps(String, String),
    #[error("scenario contains no problem instances")]
    Empty,
}

/// One pathfinding problem from a scenario file.
pub struct ScenProblem {
    pub bucket: u32,
    pub start: (i32, i32),
    pub goal: (i32, i32),
    /// The optimal 8-connected path length listed in the file.
    pub optimal: f64,
}

/// A parsed `.scen` file: the map it refers to and its problem instances.
pub struct Scenario {
    pub map_path: PathBuf,
    pub problems: Vec<ScenProblem>,
}

/// Reads a MovingAI scenario file.
///
/// The named map is resolved relative to the scenario file's directory when
/// it exists there, matching how the benchmark sets are distributed.
pub fn read_scenario(path: &Path) -> Result<Scenario, ScenError> {
    let reader = BufReader::new(File::open(path)?);
    let mut scenario = parse_scenario(reader)?;

    if let Some(dir) = path.parent() {
        let sibling = dir.join(&scenario.map_path);
        if sibling.exists() {
            scenario.map_path = sibling;
        }
    }
    Ok(scenario)
}

fn parse_scenario(reader: impl BufRead) -> Result<Scenario, ScenError> {
    let mut lines = reader.lines();

    let version_line = lines.next().transpose()?.unwrap_or_default();
    let version = version_line
        .strip_prefix("version")
        .map(str::trim)
        .ok_or_else(|| ScenError::BadVersion(version_line.clone()))?;
    if version != "1" && version != "1.0" {
        return Err(ScenError::BadVersion(version.to_string()));
    }

    let mut map: Option<String> = None;
    let mut problems = vec![];

    for (index, line) in lines.enumerate() {
        let line = line?;
        let line_no = index + 2;
        let mut tokens = line.split_whitespace();

        let Some(bucket) = tokens.next() else {
            continue;
        };
        let bucket = bucket.parse().map_err(|_| ScenError::BadField {
            line: line_no,
            field: "bucket",
        })?;

        let problem_map = tokens.next().ok_or(ScenError::MissingField {
            line: line_no,
            field: "map",
        })?;
        if let Some(map) = &map {
            if map != problem_map {
                return Err(ScenError::MixedMaps(map.clone(), problem_map.to_string()));
            }
        } else {
            map = Some(problem_map.to_string());
        }

        let mut next_int = |field: &'static str| -> Result<i32, ScenError> {
            tokens
                .next()
                .ok_or(ScenError::MissingField { line: line_no, field })?
                .parse()
                .map_err(|_| ScenError::BadField { line: line_no, field })
        };

        // Map dimensions are repeated on every line; they are implied by the
        // map file itself, so they are read and discarded.
        next_int("map width")?;
        next_int("map height")?;
        let start_x = next_int("start x")?;
        let start_y = next_int("start y")?;
        let goal_x = next_int("goal x")?;
        let goal_y = next_int("goal y")?;

        let optimal = tokens
            .next()
            .ok_or(ScenError::MissingField {
                line: line_no,
                field: "optimal length",
            })?
            .parse()
            .map_err(|_| ScenError::BadField {
                line: line_no,
                field: "optimal length",
            })?;

        problems.push(ScenProblem {
            bucket,
            start: (start_x, start_y),
            goal: (goal_x, goal_y),
            optimal,
        });
    }

    let map = map.ok_or(ScenError::Empty)?;
    Ok(Scenario {
        map_path: PathBuf::from(map),
        problems,
    })
}
