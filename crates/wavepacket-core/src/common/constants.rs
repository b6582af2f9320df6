//! Unit conversions and storage constants shared by the extraction modules.
//!
//! Values match the conversion factors used by the wavepacket propagator when
//! it writes the archive, so times and lengths round-trip exactly.

/// Picoseconds per atomic unit of time.
pub const PSEC_PER_AU: f64 = 2.418_884_326_505e-5_f64;
/// Width in bytes of one real element in out-of-line array files.
pub const SIZE_OF_REAL: u64 = 8;
/// Occupations at or below this weight are dropped from emitted distributions.
pub const NEGLIGIBLE_WEIGHT: f64 = 1.0e-8;

pub fn au_to_psec(time_au: f64) -> f64 {
    time_au * PSEC_PER_AU
}
