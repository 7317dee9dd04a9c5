pub mod challenge;
pub mod config;
pub mod error;
pub mod events;
pub mod experiment;
pub mod metrics;
pub mod puf;
pub mod reliability;
pub mod results;
pub mod rng;

pub use challenge::{
    generate, generate_with_sink, validate_width, ChallengeSet, BASE_WIDTH, MAX_CHALLENGES,
};
pub use config::{load_or_init, ExperimentConfig};
pub use error::{Error, Result};
pub use events::{Event, EventSink, NullSink, TracingSink};
pub use experiment::run_experiment;
pub use metrics::ReliabilityRecord;
pub use puf::XorArbiterPuf;
pub use reliability::{
    evaluate, evaluate_with_sink, PrimitiveModel, ReliabilityResult, ResponseSet,
};
pub use results::{append_record, results_path};
pub use rng::{seeded_rng, stream_rng};
