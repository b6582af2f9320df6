use super::distribution::AlphaDistribution;
use super::traits::ArtifactSink;
use crate::domain::{OutputArtifact, WavepacketError, WavepacketResult};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const ALPHA_DISTRIBUTION_SUFFIX: &str = "alpha_distribution.json";

/// Archive path with its final extension removed; artifacts are named from it.
pub fn output_header(archive_path: &Path) -> PathBuf {
    archive_path.with_extension("")
}

/// `<header>_<step:06>_alpha_distribution.json`
pub fn artifact_path(header: &Path, step_num: u64) -> PathBuf {
    let mut name = OsString::from(header.as_os_str());
    name.push(format!("_{:06}_{}", step_num, ALPHA_DISTRIBUTION_SUFFIX));
    PathBuf::from(name)
}

pub fn encode_json_artifact<T: Serialize>(value: &T) -> WavepacketResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|source| {
        WavepacketError::internal(
            "SYS.ARTIFACT_ENCODE",
            format!("failed to encode JSON artifact: {}", source),
        )
    })
}

pub fn write_json_artifact<T: Serialize>(path: &Path, value: &T) -> WavepacketResult<()> {
    let bytes = encode_json_artifact(value)?;
    fs::write(path, bytes).map_err(|source| {
        WavepacketError::io_system(
            "IO.ARTIFACT_WRITE",
            format!("failed to write artifact '{}': {}", path.display(), source),
        )
    })
}

/// Writes each distribution next to the archive, overwriting earlier runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileSink {
    header: PathBuf,
}

impl JsonFileSink {
    pub fn new(header: impl Into<PathBuf>) -> Self {
        Self {
            header: header.into(),
        }
    }

    pub fn for_archive(archive_path: &Path) -> Self {
        Self::new(output_header(archive_path))
    }
}

impl ArtifactSink for JsonFileSink {
    fn emit(&mut self, distribution: &AlphaDistribution) -> WavepacketResult<OutputArtifact> {
        let path = artifact_path(&self.header, distribution.step_num);
        write_json_artifact(&path, distribution)?;
        Ok(OutputArtifact::new(distribution.step_num, path))
    }
}
