use super::errors::RenderError;
use super::ride::Ride;
use super::station::Station;
use super::types::{RideId, Timestamp};
use std::cell::RefCell;
use std::rc::Rc;

/// Read-only view of the network handed to renderers once per step
#[derive(Debug)]
pub struct Frame<'a> {
    pub time: Timestamp,
    /// All stations, ordered by id
    pub stations: Vec<&'a Station>,
    /// Rides in progress, ordered by ride id
    pub active_rides: Vec<(RideId, &'a Ride)>,
}

impl Frame<'_> {
    /// Bikes currently docked across the whole network
    pub fn docked_bikes(&self) -> u64 {
        self.stations.iter().map(|s| s.bike_count() as u64).sum()
    }
}

/// Sink for per-step network snapshots.
///
/// The simulation never depends on a renderer succeeding: errors are logged
/// and the run carries on.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError>;
}

/// Renderer that draws nothing. Enough to run headless.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderer;

impl Renderer for NoopRenderer {
    fn render(&mut self, _frame: &Frame<'_>) -> Result<(), RenderError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSummary {
    pub time: Timestamp,
    pub active_rides: usize,
    pub docked_bikes: u64,
}

/// Keeps a summary of every frame it sees, readable through a shared handle
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    frames: Rc<RefCell<Vec<FrameSummary>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that stays readable after the renderer is moved into a simulation
    pub fn frames(&self) -> Rc<RefCell<Vec<FrameSummary>>> {
        Rc::clone(&self.frames)
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        self.frames.borrow_mut().push(FrameSummary {
            time: frame.time,
            active_rides: frame.active_rides.len(),
            docked_bikes: frame.docked_bikes(),
        });
        Ok(())
    }
}
