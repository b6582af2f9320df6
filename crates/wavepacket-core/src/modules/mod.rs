pub mod arrays;
pub mod distribution;
pub mod matcher;
pub mod pipeline;
pub mod serialization;

mod traits;

pub use arrays::ArrayResolver;
pub use distribution::{AlphaDistribution, compute_distribution, process_step};
pub use matcher::{EigenBasis, match_input_step};
pub use pipeline::{
    AlphaDistributionPipeline, ExtractionSummary, load_archive, load_split_file, run_extraction,
};
pub use serialization::JsonFileSink;
pub use traits::ArtifactSink;
