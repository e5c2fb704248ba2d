pub mod core;
pub mod generator;
pub mod loader;

// Re-export commonly used types
pub use crate::core::config::SimulationConfig;
pub use crate::core::errors::{ConfigError, RenderError, SimulationError};
pub use crate::core::event::{Event, EventKind};
pub use crate::core::event_queue::EventQueue;
pub use crate::core::renderer::{Frame, NoopRenderer, RecordingRenderer, Renderer};
pub use crate::core::ride::Ride;
pub use crate::core::simulation::{RideNetwork, RunSummary, Simulation, SimulationState};
pub use crate::core::station::{Station, StationStats};
pub use crate::core::statistics::{StationMax, StatisticsReport};
pub use crate::core::types::{Location, RideId, StationId, Timestamp};
