//! Extraction of per-step alpha-coefficient weight distributions from split
//! wavepacket simulation archives.

pub mod common;
pub mod domain;
pub mod modules;
