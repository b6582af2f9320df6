use super::distribution::AlphaDistribution;
use crate::domain::{OutputArtifact, WavepacketResult};

/// Destination for per-step distributions produced by the pipeline.
pub trait ArtifactSink {
    fn emit(&mut self, distribution: &AlphaDistribution) -> WavepacketResult<OutputArtifact>;
}

impl<T> ArtifactSink for &mut T
where
    T: ArtifactSink + ?Sized,
{
    fn emit(&mut self, distribution: &AlphaDistribution) -> WavepacketResult<OutputArtifact> {
        (**self).emit(distribution)
    }
}
