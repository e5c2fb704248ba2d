pub mod config;
pub mod errors;
pub mod event;
pub mod event_queue;
pub mod renderer;
pub mod ride;
pub mod simulation;
pub mod station;
pub mod statistics;
pub mod types;
