use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use georisk_cli::inputs::{resolve_outputs, resolve_sources};
use georisk_core::run_pipeline;
use georisk_ingest::{SourceDataset, load_source, read_source_csv};
use georisk_map::{DetectionProfile, ROLE_RULES, detect_columns};
use georisk_model::{PipelineOptions, SourceKind};
use georisk_output::{ValidationReport, validate_output, write_outputs};

use crate::cli::{RolesArgs, RunArgs, ValidateArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::{FileDetection, RunResult};

pub fn run_pipeline_command(args: &RunArgs) -> Result<RunResult> {
    let run_span = info_span!("run", data_dir = %args.data_dir.display());
    let _run_guard = run_span.enter();

    let inputs = resolve_sources(&args.data_dir, &args.overrides())?;
    let options = PipelineOptions::new().with_department_filter(args.department.clone());

    // =========================================================================
    // Stage 1: Ingest - read every resolved source file
    // =========================================================================
    let mut datasets = Vec::with_capacity(inputs.len());
    for (kind, path) in &inputs {
        let dataset = info_span!("ingest", dataset = kind.as_str())
            .in_scope(|| load_dataset(*kind, path))?;
        datasets.push(dataset);
    }

    // =========================================================================
    // Stage 2: Detect, normalize, aggregate and classify
    // =========================================================================
    let report = run_pipeline(datasets, &options).context("run pipeline")?;

    // =========================================================================
    // Stage 3: Export
    // =========================================================================
    let outputs = if args.dry_run {
        info!(records = report.records.len(), "dry run, outputs not written");
        Vec::new()
    } else {
        let output_options =
            resolve_outputs(&args.data_dir, args.out_csv.as_deref(), args.out_json.as_deref());
        info_span!("export").in_scope(|| {
            let start = Instant::now();
            let written = write_outputs(&report.records, &output_options)
                .context("write unified dataset")?;
            info!(
                records = report.records.len(),
                files = written.len(),
                duration_ms = start.elapsed().as_millis(),
                "outputs written"
            );
            Ok::<_, anyhow::Error>(written)
        })?
    };

    Ok(RunResult {
        inputs,
        report,
        outputs,
        dry_run: args.dry_run,
    })
}

fn load_dataset(kind: SourceKind, path: &Path) -> Result<SourceDataset> {
    let start = Instant::now();
    let dataset = load_source(kind, path)
        .with_context(|| format!("load {kind} source from {}", path.display()))?;
    info!(
        dataset = kind.as_str(),
        rows = dataset.row_count(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(dataset)
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationReport> {
    validate_output(&args.path).with_context(|| format!("validate {}", args.path.display()))
}

/// Prints the rule table, or runs one file's header through detection.
pub fn run_roles(args: &RolesArgs) -> Result<Option<FileDetection>> {
    let (Some(path), Some(source)) = (&args.file, args.source) else {
        print_rule_table();
        return Ok(None);
    };
    let kind = SourceKind::from(source);
    let frame = read_source_csv(path).with_context(|| format!("read {}", path.display()))?;
    let columns: Vec<String> = frame
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let profile = DetectionProfile::for_source(kind);
    let detected = detect_columns(&columns, &profile)
        .with_context(|| format!("detect columns of {}", path.display()))?;
    Ok(Some(FileDetection {
        path: path.clone(),
        columns,
        profile,
        detected,
    }))
}

fn print_rule_table() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("Keywords"),
        header_cell("Mandatory for"),
    ]);
    apply_table_style(&mut table);
    for rule in ROLE_RULES {
        let keywords = rule
            .patterns
            .iter()
            .map(|pattern| match pattern.excluded {
                Some(excluded) => format!("{} (not {excluded})", pattern.keyword),
                None => pattern.keyword.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        let mandatory_for = SourceKind::ALL
            .into_iter()
            .filter(|kind| {
                DetectionProfile::for_source(*kind)
                    .mandatory_roles()
                    .any(|role| role == rule.role)
            })
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            rule.role.as_str().to_string(),
            keywords,
            if mandatory_for.is_empty() {
                "-".to_string()
            } else {
                mandatory_for
            },
        ]);
    }
    println!("{table}");
}
