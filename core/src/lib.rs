pub mod batch;
pub mod call_feed;
pub mod claims_feed;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod event;
pub mod format;
pub mod kpi;
pub mod network_feed;
pub mod pipeline;
pub mod rng;
pub mod roi;
pub mod roi_feed;
pub mod subsystem;
pub mod types;
pub mod vocab;
pub mod window;
