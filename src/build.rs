//! One-shot artifact build: dataset in, model and column list out.

use crate::artifacts::{write_artifacts, ArtifactError, ArtifactPaths};
use crate::dataset::load_raw_records;
use crate::metrics::RegressionMetrics;
use crate::preprocessing::{CleaningConfig, CleaningPipeline, CleaningReport, PipelineError};
use crate::trainer::{TrainError, Trainer};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Train(#[from] TrainError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

/// What a build produced.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub report: CleaningReport,
    pub holdout: RegressionMetrics,
    pub n_train: usize,
    pub n_test: usize,
    pub columns: Vec<String>,
}

/// Reads `dataset`, cleans it, trains and writes the artifacts to `out`.
///
/// Any failure is fatal; a partial build leaves earlier artifacts untouched
/// unless the write step itself fails midway.
pub fn build_artifacts(
    dataset: &Path,
    out: &ArtifactPaths,
    cleaning: CleaningConfig,
    trainer: &Trainer,
) -> Result<BuildSummary, BuildError> {
    tracing::info!(dataset = %dataset.display(), "loading dataset");
    let raw = load_raw_records(dataset)?;

    let cleaned = CleaningPipeline::new(cleaning).run(&raw)?;
    let outcome = trainer.fit(&cleaned.matrix)?;
    tracing::info!(
        r2 = outcome.holdout.r_squared,
        n_train = outcome.n_train,
        n_test = outcome.n_test,
        "model trained"
    );

    write_artifacts(out, &outcome.model, &outcome.columns)?;

    Ok(BuildSummary {
        report: cleaned.report,
        holdout: outcome.holdout,
        n_train: outcome.n_train,
        n_test: outcome.n_test,
        columns: outcome
            .columns
            .iter()
            .map(|c| c.to_lowercase())
            .collect(),
    })
}
