//! Batch jobs run by the command-line front end.
//!
//! A job file is JSON. Seam jobs carry a saved [`PanelStore`]; nesting
//! jobs carry the pieces to lay out.

use anyhow::{anyhow, Context};
use garmentcad_designer::{
    check_store, export_gate, pack, ExportGate, NestingLayout, NestingPiece, PanelId, PanelStore,
    SeamMetric,
};
use garmentcad_core::parse_length;
use garmentcad_settings::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeamJob {
    pub store: PanelStore,
    /// Named seam profile from the config; the default profile when absent.
    #[serde(default)]
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestJob {
    pub pieces: Vec<NestingPiece>,
    /// Falls back to the configured default sheet width.
    #[serde(default)]
    pub sheet_width: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelSeams {
    pub panel: PanelId,
    pub name: String,
    pub metrics: Vec<SeamMetric>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeamReport {
    pub panels: Vec<PanelSeams>,
    pub gate: ExportGate,
}

pub fn read_job<T: for<'de> Deserialize<'de>>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read job file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("malformed job file {}", path.display()))
}

pub fn run_seam_job(job: &SeamJob, config: &Config) -> anyhow::Result<SeamReport> {
    let seam_tolerance = config.seam_tolerance(job.profile.as_deref())?;
    let checked = check_store(&job.store, &seam_tolerance, &config.geometry)?;

    let gate = export_gate(checked.iter().flat_map(|(_, metrics)| metrics));
    let mut panels = Vec::with_capacity(checked.len());
    for (id, metrics) in checked {
        let name = job.store.get(id)?.name.clone();
        panels.push(PanelSeams {
            panel: id,
            name,
            metrics,
        });
    }
    info!(panels = panels.len(), pass = gate.is_pass(), "seam check finished");
    Ok(SeamReport { panels, gate })
}

pub fn run_nest_job(
    job: &NestJob,
    width_override: Option<f64>,
    config: &Config,
) -> anyhow::Result<NestingLayout> {
    let width = width_override
        .or(job.sheet_width)
        .unwrap_or(config.default_sheet_width_mm);
    Ok(pack(&job.pieces, width, &config.nesting)?)
}

/// Parses a typed sheet width such as `1500`, `150cm` or `59 1/16in`.
///
/// Bare numbers are read in the configured measurement system.
pub fn parse_sheet_width(input: &str, config: &Config) -> anyhow::Result<f64> {
    let width = parse_length(input, config.measurement_system)
        .map_err(|e| anyhow!("invalid sheet width '{input}': {e}"))?;
    if width <= 0.0 {
        return Err(anyhow!("sheet width must be positive, got '{input}'"));
    }
    Ok(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use garmentcad_core::{MeasurementSystem, SeamTolerance};
    use garmentcad_designer::{presets, Point, SeamEnd, SeamPair, SeamStatus};
    use tempfile::tempdir;

    fn skirt_store(back_length: f64) -> PanelStore {
        let mut store = PanelStore::new();
        let front = store.insert(presets::skirt("front", 300.0, 500.0, 600.0).unwrap());
        let back = store.insert(presets::skirt("back", 300.0, 500.0, back_length).unwrap());
        store.link_counterparts(front, back).unwrap();
        store
            .get_mut(front)
            .unwrap()
            .add_seam(SeamPair::new("side seam", SeamEnd::Own(2), SeamEnd::Counterpart(2)))
            .unwrap();
        store
    }

    #[test]
    fn test_seam_job_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seams.json");
        let job = SeamJob {
            store: skirt_store(605.0),
            profile: None,
        };
        std::fs::write(&path, serde_json::to_string(&job).unwrap()).unwrap();

        let job: SeamJob = read_job(&path).unwrap();
        let report = run_seam_job(&job, &Config::default()).unwrap();
        assert!(!report.gate.is_pass());
        assert_eq!(report.panels.len(), 2);
        assert_eq!(report.panels[0].name, "front");
        assert_eq!(report.panels[0].metrics[0].status, SeamStatus::Fail);
    }

    #[test]
    fn test_seam_job_with_profile() {
        let mut config = Config::default();
        config
            .set_seam_profile("stretch", SeamTolerance::new(4.0, 6.0).unwrap())
            .unwrap();
        let job = SeamJob {
            store: skirt_store(605.0),
            profile: Some("stretch".to_string()),
        };
        assert!(run_seam_job(&job, &config).unwrap().gate.is_pass());

        let unknown = SeamJob {
            profile: Some("denim".to_string()),
            ..job
        };
        assert!(run_seam_job(&unknown, &config).is_err());
    }

    #[test]
    fn test_nest_job_width_precedence() {
        let piece = NestingPiece::new(
            "cuff",
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(0.0, 50.0),
            ],
        )
        .with_quantity(4);
        let job = NestJob {
            pieces: vec![piece],
            sheet_width: Some(200.0),
        };
        let config = Config::default();

        let layout = run_nest_job(&job, None, &config).unwrap();
        assert_eq!(layout.sheet_width, 200.0);
        assert_eq!(layout.shelf_count, 2);

        let layout = run_nest_job(&job, Some(400.0), &config).unwrap();
        assert_eq!(layout.shelf_count, 1);

        let open = NestJob {
            sheet_width: None,
            ..job
        };
        let layout = run_nest_job(&open, None, &config).unwrap();
        assert_eq!(layout.sheet_width, config.default_sheet_width_mm);
    }

    #[test]
    fn test_malformed_job_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();
        let err = read_job::<NestJob>(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_sheet_width_units() {
        let mut config = Config::default();
        assert_eq!(parse_sheet_width("1500", &config).unwrap(), 1500.0);
        assert_eq!(parse_sheet_width("150cm", &config).unwrap(), 1500.0);
        config.measurement_system = MeasurementSystem::Imperial;
        assert!((parse_sheet_width("60", &config).unwrap() - 1524.0).abs() < 1e-9);
        assert!(parse_sheet_width("wide", &config).is_err());
        assert!(parse_sheet_width("-3", &config).is_err());
    }
}
