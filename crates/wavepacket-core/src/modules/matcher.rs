use super::arrays::ArrayResolver;
use crate::domain::{SplitFile, StructureRecord, WavepacketError, WavepacketResult};

/// Resolved eigenbasis arrays of one structure record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EigenBasis {
    pub eigenvalues: Vec<f64>,
    pub means: Vec<f64>,
    pub msds: Vec<f64>,
}

pub fn find_structure(split: &SplitFile, input_step: i64) -> Option<&StructureRecord> {
    split
        .structures
        .iter()
        .find(|structure| structure.input_step == input_step)
}

/// Resolves the eigenbasis recorded for `input_step` in this split file.
pub fn match_input_step(
    split: &SplitFile,
    input_step: i64,
    resolver: &ArrayResolver,
) -> WavepacketResult<EigenBasis> {
    let structure = find_structure(split, input_step).ok_or_else(|| {
        WavepacketError::computation(
            "RUN.INPUT_STEP_MISSING",
            format!(
                "no structure record with input_step {} among {} structures in split file",
                input_step,
                split.structures.len()
            ),
        )
    })?;

    Ok(EigenBasis {
        eigenvalues: resolver.resolve(&structure.eigenvalues)?,
        means: resolver.resolve(&structure.eigenstate_mean_z)?,
        msds: resolver.resolve(&structure.eigenstate_msd_total)?,
    })
}
