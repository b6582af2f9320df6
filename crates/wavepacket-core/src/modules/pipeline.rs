use super::arrays::ArrayResolver;
use super::distribution::process_step;
use super::serialization::JsonFileSink;
use super::traits::ArtifactSink;
use crate::common::constants::au_to_psec;
use crate::domain::{
    ArchiveDescriptor, ExtractionConfig, SplitFile, WavepacketError, WavepacketResult,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// What a finished run did; written by the CLI as an optional JSON report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionSummary {
    pub dim: usize,
    pub fst_filter: i64,
    pub num_filter: usize,
    pub stride: u64,
    pub time_end_ps: Option<f64>,
    pub byte_order: String,
    pub split_files_read: usize,
    pub states_seen: usize,
    pub steps_processed: Vec<u64>,
    pub artifacts: Vec<PathBuf>,
    pub stopped_at_cutoff: bool,
}

/// Drives extraction over every split file of one archive, in listed order.
#[derive(Debug, Clone)]
pub struct AlphaDistributionPipeline {
    archive_path: PathBuf,
    config: ExtractionConfig,
    started: Instant,
}

impl AlphaDistributionPipeline {
    pub fn new(archive_path: impl Into<PathBuf>, config: ExtractionConfig) -> Self {
        Self {
            archive_path: archive_path.into(),
            config,
            started: Instant::now(),
        }
    }

    /// Elapsed time in progress logs is measured from `started`.
    pub fn with_start_time(mut self, started: Instant) -> Self {
        self.started = started;
        self
    }

    pub fn split_dir(&self) -> PathBuf {
        self.archive_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    pub fn run_to_files(&self, archive: &ArchiveDescriptor) -> WavepacketResult<ExtractionSummary> {
        let mut sink = JsonFileSink::for_archive(&self.archive_path);
        self.run(archive, &mut sink)
    }

    pub fn run<S>(
        &self,
        archive: &ArchiveDescriptor,
        sink: &mut S,
    ) -> WavepacketResult<ExtractionSummary>
    where
        S: ArtifactSink + ?Sized,
    {
        self.config.validate()?;
        if !archive.setting.is_output_split {
            return Err(WavepacketError::input_validation(
                "INPUT.ARCHIVE_NOT_SPLIT",
                format!(
                    "archive '{}' was not written in split output mode",
                    self.archive_path.display()
                ),
            ));
        }

        let window = archive.filter_window()?;
        let split_dir = self.split_dir();
        let resolver = ArrayResolver::new(&split_dir, self.config.byte_order);

        let mut summary = ExtractionSummary {
            dim: archive.condition.dim,
            fst_filter: window.fst_filter,
            num_filter: window.num_filter,
            stride: self.config.stride,
            time_end_ps: self.config.time_end_ps,
            byte_order: self.config.byte_order.to_string(),
            split_files_read: 0,
            states_seen: 0,
            steps_processed: Vec::new(),
            artifacts: Vec::new(),
            stopped_at_cutoff: false,
        };

        for metadata in &archive.split_files_metadata {
            let path = split_dir.join(&metadata.filename);
            info!(
                elapsed = ?self.started.elapsed(),
                path = %path.display(),
                "reading split file"
            );
            let split = load_split_file(&path)?;
            summary.split_files_read += 1;

            for state in &split.states {
                summary.states_seen += 1;
                if !self.config.selects_step(state.step_num) {
                    continue;
                }

                let artifact = process_step(&split, state, window, &resolver, sink)?;
                debug!(
                    step_num = state.step_num,
                    artifact = %artifact.path.display(),
                    "wrote alpha distribution"
                );
                summary.steps_processed.push(state.step_num);
                summary.artifacts.push(artifact.path);

                if let Some(time_end) = self.config.time_end_ps {
                    let time_ps = au_to_psec(state.time);
                    if time_ps >= time_end {
                        info!(
                            step_num = state.step_num,
                            time_ps, time_end, "reached time cutoff"
                        );
                        summary.stopped_at_cutoff = true;
                        return Ok(summary);
                    }
                }
            }
        }

        Ok(summary)
    }
}

pub fn load_archive(path: &Path) -> WavepacketResult<ArchiveDescriptor> {
    if !path.is_file() {
        return Err(WavepacketError::io_system(
            "IO.ARCHIVE_MISSING",
            format!("file {} does not exist", path.display()),
        ));
    }

    let content = fs::read_to_string(path).map_err(|source| {
        WavepacketError::io_system(
            "IO.ARCHIVE_READ",
            format!("failed to read archive '{}': {}", path.display(), source),
        )
    })?;
    ArchiveDescriptor::from_json_str(&content)
}

pub fn load_split_file(path: &Path) -> WavepacketResult<SplitFile> {
    let content = fs::read_to_string(path).map_err(|source| {
        WavepacketError::io_system(
            "IO.SPLIT_FILE_READ",
            format!("failed to read split file '{}': {}", path.display(), source),
        )
    })?;
    SplitFile::from_json_str(&content)
}

/// Loads the archive at `archive_path` and writes one artifact per selected step.
pub fn run_extraction(
    archive_path: &Path,
    config: ExtractionConfig,
    started: Instant,
) -> WavepacketResult<ExtractionSummary> {
    let archive = load_archive(archive_path)?;
    AlphaDistributionPipeline::new(archive_path, config)
        .with_start_time(started)
        .run_to_files(&archive)
}
