//! Session configuration merged from command-line flags and an optional TOML file.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use miam_core::{BoardSize, CellCoord};
use miam_system_bootstrap::{DEFAULT_RATE, DEFAULT_STRATEGY};
use serde::Deserialize;

use crate::Args;

const SUPPORTED_SESSION_VERSION: u32 = 1;
const DEFAULT_DENSITY: f64 = 0.3;

/// Contents of a session file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SessionFile {
    version: u32,
    strategy: Option<String>,
    size: Option<[u32; 2]>,
    rate: Option<u32>,
    pattern: Option<String>,
    #[serde(default)]
    cells: Vec<CellCoord>,
    random_seed: Option<u64>,
    density: Option<f64>,
}

/// Loads and validates the session file at `path`.
pub(crate) fn load(path: &Path) -> Result<SessionFile> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read session file at {}", path.display()))?;
    parse_session_file(&contents)
        .with_context(|| format!("invalid session file {}", path.display()))
}

fn parse_session_file(contents: &str) -> Result<SessionFile> {
    let file: SessionFile =
        toml::from_str(contents).context("failed to parse session file toml contents")?;
    if file.version != SUPPORTED_SESSION_VERSION {
        bail!(
            "unsupported session file version {}; expected {}",
            file.version,
            SUPPORTED_SESSION_VERSION
        );
    }
    Ok(file)
}

/// Fully resolved session parameters.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SessionPlan {
    pub(crate) strategy: String,
    pub(crate) size: Option<BoardSize>,
    pub(crate) rate: u32,
    pub(crate) pattern: Option<String>,
    pub(crate) cells: Vec<CellCoord>,
    pub(crate) random: Option<(u64, f64)>,
}

impl SessionPlan {
    /// Merges flags over the session file over built-in defaults.
    pub(crate) fn resolve(args: &Args, file: Option<SessionFile>) -> Self {
        let file = file.unwrap_or_default();

        let mut cells = file.cells;
        cells.extend(args.cell.iter().copied());

        let random_seed = args.random.or(file.random_seed);
        let density = args.density.or(file.density).unwrap_or(DEFAULT_DENSITY);

        Self {
            strategy: args
                .strategy
                .clone()
                .or(file.strategy)
                .unwrap_or_else(|| DEFAULT_STRATEGY.to_owned()),
            size: args
                .size
                .or_else(|| file.size.map(|[x, y]| BoardSize::new(x, y))),
            rate: args.rate.or(file.rate).unwrap_or(DEFAULT_RATE),
            pattern: args.pattern.clone().or(file.pattern),
            cells,
            random: random_seed.map(|seed| (seed, density)),
        }
    }
}

/// Parses `WxH` board dimensions.
pub(crate) fn parse_size(value: &str) -> Result<BoardSize, String> {
    let invalid = || format!("could not parse board size '{value}', expected WxH");
    let (x, y) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let x = x.trim().parse::<u32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<u32>().map_err(|_| invalid())?;
    if x == 0 || y == 0 {
        return Err(format!("board size '{value}' must be positive"));
    }
    Ok(BoardSize::new(x, y))
}

/// Parses an `X,Y` cell coordinate.
pub(crate) fn parse_cell(value: &str) -> Result<CellCoord, String> {
    let invalid = || format!("could not parse cell '{value}', expected X,Y");
    let (x, y) = value.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<u32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok(CellCoord::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(flags: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("miam").chain(flags.iter().copied()))
            .expect("valid flags")
    }

    #[test]
    fn size_parser_accepts_both_separators() {
        assert_eq!(parse_size("12x8"), Ok(BoardSize::new(12, 8)));
        assert_eq!(parse_size(" 5 X 3 "), Ok(BoardSize::new(5, 3)));
        assert!(parse_size("0x4").is_err());
        assert!(parse_size("12").is_err());
        assert!(parse_size("ax4").is_err());
    }

    #[test]
    fn cell_parser_rejects_negative_and_malformed_input() {
        assert_eq!(parse_cell("3,4"), Ok(CellCoord::new(3, 4)));
        assert!(parse_cell("-1,4").is_err());
        assert!(parse_cell("3;4").is_err());
    }

    #[test]
    fn defaults_apply_without_flags_or_file() {
        let plan = SessionPlan::resolve(&args(&[]), None);
        assert_eq!(plan.strategy, "default");
        assert_eq!(plan.size, None);
        assert_eq!(plan.rate, DEFAULT_RATE);
        assert!(plan.cells.is_empty());
        assert_eq!(plan.random, None);
    }

    #[test]
    fn flags_override_session_file() {
        let file = parse_session_file(
            r#"
                version = 1
                strategy = "life"
                size = [20, 10]
                rate = 12
                pattern = "glider"
                cells = [{ x = 1, y = 2 }]
                random_seed = 9
            "#,
        )
        .expect("valid file");

        let plan = SessionPlan::resolve(
            &args(&["--size", "8x8", "--cell", "4,4", "--density", "0.5"]),
            Some(file),
        );

        assert_eq!(plan.strategy, "life");
        assert_eq!(plan.size, Some(BoardSize::new(8, 8)));
        assert_eq!(plan.rate, 12);
        assert_eq!(plan.pattern.as_deref(), Some("glider"));
        assert_eq!(plan.cells, vec![CellCoord::new(1, 2), CellCoord::new(4, 4)]);
        assert_eq!(plan.random, Some((9, 0.5)));
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let error = parse_session_file("version = 2").expect_err("version 2 unsupported");
        assert!(error.to_string().contains("unsupported session file version 2"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_session_file("version = 1\nspeed = 3").is_err());
    }
}
