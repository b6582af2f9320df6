use super::CliError;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use wavepacket_core::modules::ExtractionSummary;

/// Progress logs go to stderr; `RUST_LOG` overrides the default `info` level.
pub(super) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub(super) fn write_summary(path: &Path, summary: &ExtractionSummary) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create summary directory '{}'", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(summary)
        .context("failed to serialize extraction summary")?;
    fs::write(path, content)
        .with_context(|| format!("failed to write extraction summary '{}'", path.display()))?;
    Ok(())
}

pub(super) fn render_human_summary(archive: &Path, summary: &ExtractionSummary) -> String {
    let mut lines = vec![format!(
        "Alpha distribution extraction for '{}': {} artifacts from {} split files ({} states seen, stride {}).",
        archive.display(),
        summary.artifacts.len(),
        summary.split_files_read,
        summary.states_seen,
        summary.stride
    )];
    if summary.stopped_at_cutoff {
        if let (Some(time_end), Some(last_step)) =
            (summary.time_end_ps, summary.steps_processed.last())
        {
            lines.push(format!(
                "Stopped at step {} after reaching the {} ps cutoff.",
                last_step, time_end
            ));
        }
    }
    lines.join("\n")
}
