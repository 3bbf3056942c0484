//! Persisted challenge files and their conversion to engine placements.
//!
//! Two on-disk formats
//! - relative: `coordinate_system = "mirror_relative"`, pieces measured from the
//!   touches-mirror position and the board's vertical center;
//! - absolute: `objective.playerPieces` in world coordinates.
//!
//! Relative -> absolute refuses challenges that break a placement rule and
//! reports every violation; warnings are collected but do not block.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use symtile::prelude::*;

pub const MIRROR_RELATIVE: &str = "mirror_relative";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KindDoc {
    A,
    B,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceDoc {
    #[default]
    Front,
    Back,
}

/// One piece as stored on disk (either coordinate system).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceDoc {
    #[serde(rename = "type")]
    pub kind: KindDoc,
    #[serde(default)]
    pub face: FaceDoc,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: f64,
}

/// Challenge metadata shared by both formats; unknown shapes pass through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChallengeMeta {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "piecesNeeded", default)]
    pub pieces_needed: usize,
    #[serde(default)]
    pub difficulty: Value,
    #[serde(rename = "targetPattern", default)]
    pub target_pattern: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelativeChallenge {
    #[serde(flatten)]
    pub meta: ChallengeMeta,
    pub pieces: Vec<PieceDoc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelativeFile {
    pub coordinate_system: String,
    #[serde(default)]
    pub mirror_position: f64,
    pub piece_size: f64,
    pub challenges: Vec<RelativeChallenge>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    #[serde(rename = "playerPieces")]
    pub player_pieces: Vec<PieceDoc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteChallenge {
    #[serde(flatten)]
    pub meta: ChallengeMeta,
    pub objective: Objective,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteFile {
    pub challenges: Vec<AbsoluteChallenge>,
}

/// A parsed challenge file in either format.
#[derive(Clone, Debug, PartialEq)]
pub enum Document {
    Relative(RelativeFile),
    Absolute(AbsoluteFile),
}

impl From<KindDoc> for TileType {
    fn from(k: KindDoc) -> Self {
        match k {
            KindDoc::A => TileType::A,
            KindDoc::B => TileType::B,
        }
    }
}

impl From<TileType> for KindDoc {
    fn from(k: TileType) -> Self {
        match k {
            TileType::A => KindDoc::A,
            TileType::B => KindDoc::B,
        }
    }
}

impl From<FaceDoc> for Face {
    fn from(f: FaceDoc) -> Self {
        match f {
            FaceDoc::Front => Face::Front,
            FaceDoc::Back => Face::Back,
        }
    }
}

impl From<Face> for FaceDoc {
    fn from(f: Face) -> Self {
        match f {
            Face::Front => FaceDoc::Front,
            Face::Back => FaceDoc::Back,
        }
    }
}

impl PieceDoc {
    pub fn to_tile(&self) -> TilePlacement {
        TilePlacement::new(self.kind.into(), self.face.into(), self.x, self.y, self.rotation)
    }

    pub fn to_relative(&self) -> RelativePlacement {
        RelativePlacement {
            kind: self.kind.into(),
            face: self.face.into(),
            x: self.x,
            y: self.y,
            rotation: self.rotation,
        }
    }
}

impl From<&TilePlacement> for PieceDoc {
    fn from(t: &TilePlacement) -> Self {
        Self {
            kind: t.kind.into(),
            face: t.face.into(),
            x: t.x,
            y: t.y,
            rotation: t.rotation,
        }
    }
}

impl From<&RelativePlacement> for PieceDoc {
    fn from(r: &RelativePlacement) -> Self {
        Self {
            kind: r.kind.into(),
            face: r.face.into(),
            x: r.x,
            y: r.y,
            rotation: r.rotation,
        }
    }
}

/// Errors and warnings gathered while converting a whole file.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConversionReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Document {
    /// Parse either format; the relative one is recognised by its `coordinate_system` tag.
    pub fn parse(text: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(text).context("parsing challenge JSON")?;
        match raw.get("coordinate_system").and_then(Value::as_str) {
            Some(MIRROR_RELATIVE) => Ok(Document::Relative(
                serde_json::from_value(raw).context("reading relative challenge file")?,
            )),
            Some(other) => bail!("unsupported coordinate_system {other:?}"),
            None => Ok(Document::Absolute(
                serde_json::from_value(raw).context("reading absolute challenge file")?,
            )),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// World-space tiles per challenge, keyed by the challenge metadata.
    pub fn to_absolute(&self, engine: &Engine) -> (AbsoluteFile, ConversionReport) {
        match self {
            Document::Absolute(file) => (file.clone(), ConversionReport::default()),
            Document::Relative(file) => relative_to_absolute(file, engine),
        }
    }
}

fn label(meta: &ChallengeMeta, index: usize) -> String {
    match &meta.id {
        Value::Null => format!("challenge #{index}"),
        Value::String(s) => format!("challenge {s}"),
        other => format!("challenge {other}"),
    }
}

/// Convert every challenge; each one is checked against the relative placement rules.
pub fn relative_to_absolute(file: &RelativeFile, engine: &Engine) -> (AbsoluteFile, ConversionReport) {
    let mut report = ConversionReport::default();
    if file.piece_size != engine.area.tile_size {
        report.warnings.push(format!(
            "file piece_size {} differs from engine tile size {}",
            file.piece_size, engine.area.tile_size
        ));
    }
    let challenges = file
        .challenges
        .iter()
        .enumerate()
        .map(|(i, ch)| {
            let rel: Vec<_> = ch.pieces.iter().map(PieceDoc::to_relative).collect();
            let checked = engine.validate_relative(&rel);
            let who = label(&ch.meta, i);
            report
                .errors
                .extend(checked.error_messages().into_iter().map(|m| format!("{who}: {m}")));
            report
                .warnings
                .extend(checked.warning_messages().into_iter().map(|m| format!("{who}: {m}")));
            let player_pieces = rel
                .iter()
                .map(|r| PieceDoc::from(&engine.to_absolute(r)))
                .collect();
            AbsoluteChallenge {
                meta: ch.meta.clone(),
                objective: Objective { player_pieces },
            }
        })
        .collect();
    (AbsoluteFile { challenges }, report)
}

/// Convert world placements back into the human-authored relative format.
pub fn absolute_to_relative(file: &AbsoluteFile, engine: &Engine) -> (RelativeFile, ConversionReport) {
    let mut report = ConversionReport::default();
    let challenges = file
        .challenges
        .iter()
        .enumerate()
        .map(|(i, ch)| {
            let pieces: Vec<PieceDoc> = ch
                .objective
                .player_pieces
                .iter()
                .map(|p| PieceDoc::from(&engine.to_relative(&p.to_tile())))
                .collect();
            if !pieces.iter().any(|p| p.x == 0.0) {
                report.warnings.push(format!(
                    "{}: no piece touches the mirror (no piece has x = 0)",
                    label(&ch.meta, i)
                ));
            }
            RelativeChallenge {
                meta: ch.meta.clone(),
                pieces,
            }
        })
        .collect();
    let out = RelativeFile {
        coordinate_system: MIRROR_RELATIVE.to_string(),
        mirror_position: 0.0,
        piece_size: engine.area.tile_size,
        challenges,
    };
    (out, report)
}

/// Per-challenge validation result as printed by the CLI.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChallengeVerdict {
    pub id: Value,
    pub name: String,
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    #[serde(rename = "touchesMirror")]
    pub touches_mirror: bool,
    #[serde(rename = "entersMirror")]
    pub enters_mirror: bool,
    #[serde(rename = "hasTileOverlaps")]
    pub has_tile_overlaps: bool,
    #[serde(rename = "hasReflectionOverlaps")]
    pub has_reflection_overlaps: bool,
    #[serde(rename = "tilesConnected")]
    pub tiles_connected: bool,
    #[serde(rename = "tilesInArea")]
    pub tiles_in_area: bool,
    pub findings: Vec<String>,
}

pub fn validate_file(file: &AbsoluteFile, engine: &Engine) -> Vec<ChallengeVerdict> {
    file.challenges
        .iter()
        .map(|ch| {
            let tiles: Vec<_> = ch.objective.player_pieces.iter().map(PieceDoc::to_tile).collect();
            let (v, trace) = engine.validate_with_trace(&tiles);
            ChallengeVerdict {
                id: ch.meta.id.clone(),
                name: ch.meta.name.clone(),
                is_valid: v.is_valid,
                touches_mirror: v.touches_mirror,
                enters_mirror: v.enters_mirror,
                has_tile_overlaps: v.has_tile_overlaps,
                has_reflection_overlaps: v.has_reflection_overlaps,
                tiles_connected: v.tiles_connected,
                tiles_in_area: v.tiles_in_area,
                findings: trace.messages(),
            }
        })
        .collect()
}

/// Pretty-print `value` to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const RELATIVE: &str = r#"{
        "coordinate_system": "mirror_relative",
        "mirror_position": 0,
        "piece_size": 100,
        "challenges": [{
            "id": 1,
            "name": "Seam",
            "description": "two tiles",
            "piecesNeeded": 2,
            "difficulty": "easy",
            "targetPattern": "seam",
            "pieces": [
                {"type": "A", "face": "front", "x": 0, "y": 0, "rotation": 0},
                {"type": "A", "face": "back", "x": -256, "y": 0, "rotation": 0}
            ]
        }]
    }"#;

    #[test]
    fn relative_file_converts_and_validates() {
        let engine = Engine::default();
        let doc = Document::parse(RELATIVE).unwrap();
        assert!(matches!(doc, Document::Relative(_)));
        let (abs, report) = doc.to_absolute(&engine);
        assert_eq!(report, ConversionReport::default());
        let first = &abs.challenges[0].objective.player_pieces[0];
        assert_eq!((first.x, first.y), (330.0, 300.0));
        assert_eq!(abs.challenges[0].meta.pieces_needed, 2);

        let verdicts = validate_file(&abs, &engine);
        assert!(verdicts[0].is_valid, "{:?}", verdicts[0].findings);
    }

    #[test]
    fn rule_violations_are_reported_per_piece() {
        let engine = Engine::default();
        let text = RELATIVE.replace("\"x\": -256", "\"x\": 12");
        let doc = Document::parse(&text).unwrap();
        let (_, report) = doc.to_absolute(&engine);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("challenge 1: piece 1"), "{report:?}");
    }

    #[test]
    fn missing_mirror_contact_is_only_a_warning() {
        let engine = Engine::default();
        let text = RELATIVE.replace("\"x\": 0,", "\"x\": -10,");
        let (_, report) = Document::parse(&text).unwrap().to_absolute(&engine);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn unknown_coordinate_system_is_rejected() {
        let text = RELATIVE.replace("mirror_relative", "polar");
        let err = Document::parse(&text).unwrap_err();
        assert!(err.to_string().contains("polar"));
    }

    #[test]
    fn absolute_file_survives_a_disk_round_trip() {
        let engine = Engine::default();
        let (abs, _) = Document::parse(RELATIVE).unwrap().to_absolute(&engine);
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("abs.json");
        write_json(&path, &abs).unwrap();
        match Document::read(&path).unwrap() {
            Document::Absolute(back) => assert_eq!(back, abs),
            Document::Relative(_) => panic!("expected absolute format"),
        }

        let (rel, report) = absolute_to_relative(&abs, &engine);
        assert!(report.warnings.is_empty());
        assert_eq!(rel.coordinate_system, MIRROR_RELATIVE);
        assert_eq!(rel.challenges[0].pieces[1].x, -256.0);
        assert_eq!(rel.challenges[0].pieces[1].face, FaceDoc::Back);
    }
}
