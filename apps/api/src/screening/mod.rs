pub mod handlers;
pub mod pipeline;
pub mod sample;

pub use pipeline::{
    rank_results, DocumentFailure, FailurePolicy, ResultRecord, Screener, ScreeningReport,
};
pub use sample::SAMPLE_JOB_DESCRIPTION;
