use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;
use std::path::{Path, PathBuf};
use symtile::prelude::*;
use tracing_subscriber::fmt::SubscriberBuilder;

mod challenge;
mod provenance;

use challenge::{
    absolute_to_relative, validate_file, write_json, AbsoluteChallenge, AbsoluteFile,
    ChallengeMeta, ConversionReport, Document, Objective, PieceDoc,
};
use provenance::{engine_constants, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "symtile")]
#[command(about = "Rules engine for the mirror-tile symmetry puzzle")]
struct Cmd {
    #[command(flatten)]
    board: Board,

    #[command(subcommand)]
    action: Action,
}

/// Board geometry; defaults are the reference 700 x 600 board.
#[derive(Args)]
struct Board {
    #[arg(long, global = true, default_value_t = 700.0)]
    width: f64,
    #[arg(long, global = true, default_value_t = 600.0)]
    height: f64,
    /// X of the vertical mirror line
    #[arg(long = "mirror-x", global = true, default_value_t = 700.0)]
    mirror_x: f64,
    #[arg(long, global = true, default_value_t = 100.0)]
    tile_size: f64,
}

impl Board {
    fn engine(&self) -> Engine {
        Engine::with_area(AreaConfig {
            width: self.width,
            height: self.height,
            mirror_line_x: self.mirror_x,
            tile_size: self.tile_size,
        })
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Absolute,
    Relative,
}

#[derive(Subcommand)]
enum Action {
    /// Validate every challenge in a file (either format) and print verdicts as JSON
    Validate {
        #[arg(long)]
        input: PathBuf,
    },
    /// Convert a challenge file between the relative and absolute formats
    Convert {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = Target::Absolute)]
        to: Target,
    },
    /// Generate a non-overlapping layout on the player side of the board
    Layout {
        #[arg(long, default_value_t = 2)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Tile kinds to cycle through, e.g. "AB"
        #[arg(long, default_value = "A")]
        kinds: String,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print the code revision and the engine constants in force
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let engine = cmd.board.engine();
    match cmd.action {
        Action::Validate { input } => validate(&engine, &input),
        Action::Convert { input, out, to } => convert(&engine, &input, &out, to),
        Action::Layout {
            count,
            seed,
            kinds,
            out,
        } => layout(&engine, count, seed, &kinds, &out),
        Action::Report => report(&engine),
    }
}

fn log_report(report: &ConversionReport) {
    for w in &report.warnings {
        tracing::warn!("{w}");
    }
    for e in &report.errors {
        tracing::error!("{e}");
    }
}

fn validate(engine: &Engine, input: &Path) -> Result<()> {
    tracing::info!(input = %input.display(), "validate");
    let doc = Document::read(input)?;
    let (abs, report) = doc.to_absolute(engine);
    log_report(&report);
    let verdicts = validate_file(&abs, engine);
    let valid = verdicts.iter().filter(|v| v.is_valid).count();
    tracing::info!(challenges = verdicts.len(), valid, "validated");
    let out = json!({
        "conversion": report,
        "verdicts": verdicts,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn convert(engine: &Engine, input: &Path, out: &Path, to: Target) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), "convert");
    let doc = Document::read(input)?;
    let (abs, mut report) = doc.to_absolute(engine);
    let target = match to {
        Target::Absolute => {
            log_report(&report);
            if !report.errors.is_empty() {
                bail!(
                    "{} placement rule violation(s) in {}",
                    report.errors.len(),
                    input.display()
                );
            }
            write_json(out, &abs)?;
            "absolute"
        }
        Target::Relative => {
            let (rel, back) = absolute_to_relative(&abs, engine);
            report.warnings.extend(back.warnings);
            log_report(&report);
            if !report.errors.is_empty() {
                bail!(
                    "{} placement rule violation(s) in {}",
                    report.errors.len(),
                    input.display()
                );
            }
            write_json(out, &rel)?;
            "relative"
        }
    };
    let params = json!({
        "input": input.to_string_lossy(),
        "to": target,
        "warnings": report.warnings,
    });
    write_sidecar(out, Payload::new("convert", params, engine))?;
    Ok(())
}

fn parse_kinds(kinds: &str) -> Result<Vec<TileType>> {
    kinds
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c.to_ascii_uppercase() {
            'A' => Ok(TileType::A),
            'B' => Ok(TileType::B),
            other => bail!("unknown tile kind {other:?} (expected A or B)"),
        })
        .collect()
}

fn layout(engine: &Engine, count: usize, seed: u64, kinds: &str, out: &Path) -> Result<()> {
    tracing::info!(count, seed, kinds, out = %out.display(), "layout");
    let kinds = parse_kinds(kinds)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let rect = TargetRect::player_side(&engine.area);
    let result = engine
        .layout(count, rect, &kinds, &mut rng)
        .with_context(|| format!("laying out {count} tiles"))?;
    tracing::info!(strategy = ?result.strategy, "layout found");

    let file = AbsoluteFile {
        challenges: vec![AbsoluteChallenge {
            meta: ChallengeMeta {
                id: json!(format!("layout-{seed}")),
                name: format!("Generated layout ({count} tiles)"),
                pieces_needed: count,
                ..ChallengeMeta::default()
            },
            objective: Objective {
                player_pieces: result.tiles.iter().map(PieceDoc::from).collect(),
            },
        }],
    };
    write_json(out, &file)?;
    let params = json!({
        "count": count,
        "seed": seed,
        "strategy": format!("{:?}", result.strategy),
    });
    write_sidecar(out, Payload::new("layout", params, engine))?;
    Ok(())
}

fn report(engine: &Engine) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "engine": engine_constants(engine),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!(
            parse_kinds("a, B").unwrap(),
            vec![TileType::A, TileType::B]
        );
        assert!(parse_kinds("AC").is_err());
    }

    #[test]
    fn layout_writes_an_absolute_file_and_sidecar() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("layout.json");
        let engine = Engine::default();
        layout(&engine, 3, 5, "AB", &out).unwrap();
        assert!(dir.path().join("layout.provenance.json").exists());
        match Document::read(&out).unwrap() {
            Document::Absolute(file) => {
                assert_eq!(file.challenges[0].objective.player_pieces.len(), 3);
            }
            Document::Relative(_) => panic!("layout output must be absolute"),
        }
    }

    #[test]
    fn convert_round_trips_through_both_formats() {
        let dir = tempdir().unwrap();
        let engine = Engine::default();
        let src = dir.path().join("pair.json");
        let pair = AbsoluteFile {
            challenges: vec![AbsoluteChallenge {
                meta: ChallengeMeta::default(),
                objective: Objective {
                    player_pieces: [(330.0, 300.0), (74.0, 250.0)]
                        .iter()
                        .map(|&(x, y)| TilePlacement::new(TileType::A, Face::Back, x, y, 0.0))
                        .map(|t| PieceDoc::from(&t))
                        .collect(),
                },
            }],
        };
        write_json(&src, &pair).unwrap();

        let rel = dir.path().join("rel.json");
        convert(&engine, &src, &rel, Target::Relative).unwrap();
        let abs = dir.path().join("abs.json");
        convert(&engine, &rel, &abs, Target::Absolute).unwrap();

        let (Document::Absolute(a), Document::Absolute(b)) =
            (Document::read(&src).unwrap(), Document::read(&abs).unwrap())
        else {
            panic!("expected absolute documents");
        };
        for (p, q) in a.challenges[0]
            .objective
            .player_pieces
            .iter()
            .zip(&b.challenges[0].objective.player_pieces)
        {
            assert!((p.x - q.x).abs() < 1e-9);
            assert!((p.y - q.y).abs() < 1e-9);
        }
    }
}
