//! Serde model of the wavepacket output archive.
//!
//! The archive is a top-level descriptor JSON listing split files. Each split
//! file carries structural (eigenbasis) snapshots and dynamical states. Large
//! real arrays are either inline JSON numbers or `["file.bin", first, last]`
//! references into a flat binary file next to the split file.

use super::{FilterWindow, WavepacketError, WavepacketResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArchiveDescriptor {
    pub condition: ArchiveCondition,
    pub setting: ArchiveSetting,
    #[serde(default)]
    pub split_files_metadata: Vec<SplitFileMetadata>,
}

impl ArchiveDescriptor {
    pub fn from_json_str(content: &str) -> WavepacketResult<Self> {
        serde_json::from_str(content).map_err(|source| {
            WavepacketError::input_validation(
                "INPUT.ARCHIVE_PARSE",
                format!("failed to parse archive descriptor: {}", source),
            )
        })
    }

    pub fn filter_window(&self) -> WavepacketResult<FilterWindow> {
        FilterWindow::from_bounds(self.setting.fst_filter, self.setting.end_filter)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArchiveCondition {
    pub dim: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArchiveSetting {
    pub fst_filter: i64,
    pub end_filter: i64,
    #[serde(default)]
    pub is_output_split: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SplitFileMetadata {
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct SplitFile {
    #[serde(default)]
    pub structures: Vec<StructureRecord>,
    #[serde(default)]
    pub states: Vec<StateRecord>,
}

impl SplitFile {
    pub fn from_json_str(content: &str) -> WavepacketResult<Self> {
        serde_json::from_str(content).map_err(|source| {
            WavepacketError::input_validation(
                "INPUT.SPLIT_FILE_PARSE",
                format!("failed to parse split file: {}", source),
            )
        })
    }
}

/// Eigenbasis snapshot valid from `input_step` onwards.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StructureRecord {
    pub input_step: i64,
    pub eigenvalues: ArrayField,
    pub eigenstate_mean_z: ArrayField,
    pub eigenstate_msd_total: ArrayField,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StateRecord {
    pub step_num: u64,
    /// Simulation time in atomic units.
    pub time: f64,
    pub charge_coordinate_msd: Vec<f64>,
    pub input_step: i64,
    pub alpha: AlphaCoefficients,
}

impl StateRecord {
    /// Total charge-coordinate MSD, the last of the `(x, y, z, total)` components.
    pub fn actual_msd(&self) -> WavepacketResult<f64> {
        self.charge_coordinate_msd.get(3).copied().ok_or_else(|| {
            WavepacketError::computation(
                "RUN.CHARGE_MSD_SHAPE",
                format!(
                    "state step_num={} has {} charge_coordinate_msd components; expected 4",
                    self.step_num,
                    self.charge_coordinate_msd.len()
                ),
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AlphaCoefficients {
    pub real: ArrayField,
    pub imag: ArrayField,
}

/// A real array stored either inline or as a binary file range.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ArrayField {
    BinaryRef(ArrayRef),
    Inline(Vec<f64>),
}

impl ArrayField {
    pub fn inline(values: impl Into<Vec<f64>>) -> Self {
        Self::Inline(values.into())
    }

    pub fn binary(filename: impl Into<String>, first: u64, last: u64) -> Self {
        Self::BinaryRef(ArrayRef::new(filename, first, last))
    }
}

/// `(filename, first, last)` with 1-based inclusive element indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "(String, u64, u64)", into = "(String, u64, u64)")]
pub struct ArrayRef {
    pub filename: String,
    pub first: u64,
    pub last: u64,
}

impl ArrayRef {
    pub fn new(filename: impl Into<String>, first: u64, last: u64) -> Self {
        Self {
            filename: filename.into(),
            first,
            last,
        }
    }

    pub fn element_count(&self) -> WavepacketResult<u64> {
        if self.first == 0 {
            return Err(WavepacketError::input_validation(
                "INPUT.ARRAY_REF_RANGE",
                format!(
                    "array reference into '{}' uses 1-based indices but first=0",
                    self.filename
                ),
            ));
        }

        self.last
            .checked_add(1)
            .and_then(|end| end.checked_sub(self.first))
            .ok_or_else(|| {
                WavepacketError::input_validation(
                    "INPUT.ARRAY_REF_RANGE",
                    format!(
                        "array reference into '{}' has last={} before first={}",
                        self.filename, self.last, self.first
                    ),
                )
            })
    }
}

impl From<(String, u64, u64)> for ArrayRef {
    fn from((filename, first, last): (String, u64, u64)) -> Self {
        Self {
            filename,
            first,
            last,
        }
    }
}

impl From<ArrayRef> for (String, u64, u64) {
    fn from(reference: ArrayRef) -> Self {
        (reference.filename, reference.first, reference.last)
    }
}
