pub mod archive;
pub mod errors;

pub use archive::{
    AlphaCoefficients, ArchiveCondition, ArchiveDescriptor, ArchiveSetting, ArrayField, ArrayRef,
    SplitFile, SplitFileMetadata, StateRecord, StructureRecord,
};
pub use errors::{ErrorCategory, WavepacketError, WavepacketResult};

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Byte order of out-of-line real arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    pub const fn from_big_endian_flag(big_endian: bool) -> Self {
        if big_endian {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }

    pub fn decode_f64(self, bytes: [u8; 8]) -> f64 {
        match self {
            Self::LittleEndian => f64::from_le_bytes(bytes),
            Self::BigEndian => f64::from_be_bytes(bytes),
        }
    }

    pub fn encode_f64(self, value: f64) -> [u8; 8] {
        match self {
            Self::LittleEndian => value.to_le_bytes(),
            Self::BigEndian => value.to_be_bytes(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LittleEndian => "little-endian",
            Self::BigEndian => "big-endian",
        }
    }
}

impl Display for ByteOrder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Run-wide knobs threaded through the pipeline driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionConfig {
    pub stride: u64,
    /// Stop after the first processed state at or beyond this time, in ps.
    pub time_end_ps: Option<f64>,
    pub byte_order: ByteOrder,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            stride: 1,
            time_end_ps: None,
            byte_order: ByteOrder::LittleEndian,
        }
    }
}

impl ExtractionConfig {
    pub fn new(stride: u64, time_end_ps: Option<f64>, byte_order: ByteOrder) -> Self {
        Self {
            stride,
            time_end_ps,
            byte_order,
        }
    }

    pub fn validate(&self) -> WavepacketResult<()> {
        if self.stride == 0 {
            return Err(WavepacketError::input_validation(
                "INPUT.STRIDE",
                "invalid stride '0'; expected a positive integer",
            ));
        }

        if let Some(time_end) = self.time_end_ps {
            if !time_end.is_finite() {
                return Err(WavepacketError::input_validation(
                    "INPUT.TIME_END",
                    format!("time cutoff must be a finite number of picoseconds, got {time_end}"),
                ));
            }
        }

        Ok(())
    }

    pub fn selects_step(&self, step_num: u64) -> bool {
        self.stride != 0 && step_num % self.stride == 0
    }
}

/// Eigenstate window `[fst_filter, fst_filter + num_filter)` that was propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterWindow {
    pub fst_filter: i64,
    pub num_filter: usize,
}

impl FilterWindow {
    pub fn from_bounds(fst_filter: i64, end_filter: i64) -> WavepacketResult<Self> {
        let span = end_filter
            .checked_sub(fst_filter)
            .and_then(|span| span.checked_add(1))
            .filter(|span| *span >= 0)
            .ok_or_else(|| {
                WavepacketError::input_validation(
                    "INPUT.FILTER_WINDOW",
                    format!(
                        "filter window end_filter={} precedes fst_filter={}",
                        end_filter, fst_filter
                    ),
                )
            })?;

        Ok(Self {
            fst_filter,
            num_filter: span as usize,
        })
    }

    pub fn index_at(&self, position: usize) -> i64 {
        self.fst_filter + position as i64
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    pub step_num: u64,
    pub path: PathBuf,
}

impl OutputArtifact {
    pub fn new(step_num: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            step_num,
            path: path.into(),
        }
    }
}
