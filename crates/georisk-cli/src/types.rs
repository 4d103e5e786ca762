use std::collections::BTreeMap;
use std::path::PathBuf;

use georisk_core::PipelineReport;
use georisk_map::DetectionProfile;
use georisk_model::{SemanticColumnMap, SourceKind};

/// Outcome of the `run` command.
#[derive(Debug)]
pub struct RunResult {
    pub inputs: BTreeMap<SourceKind, PathBuf>,
    pub report: PipelineReport,
    /// Files written, empty on a dry run.
    pub outputs: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Detection applied to one file by the `roles` command.
#[derive(Debug)]
pub struct FileDetection {
    pub path: PathBuf,
    pub columns: Vec<String>,
    pub profile: DetectionProfile,
    pub detected: SemanticColumnMap,
}
