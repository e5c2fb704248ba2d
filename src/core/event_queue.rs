use super::errors::SimulationError;
use super::event::Event;
use super::types::Timestamp;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct QueuedEvent {
    sequence_num: u64,
    event: Event,
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.event.timestamp == other.event.timestamp && self.sequence_num == other.sequence_num
    }
}

impl Eq for QueuedEvent {}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .event
            .timestamp
            .cmp(&self.event.timestamp)
            .then_with(|| other.sequence_num.cmp(&self.sequence_num))
    }
}

/// Min-priority queue of pending events keyed by timestamp.
///
/// Events sharing a timestamp come out in the order they were added (FIFO),
/// so a run is fully determined by its inputs.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<QueuedEvent>,
    sequence_counter: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event, O(log n)
    pub fn add(&mut self, event: Event) {
        self.heap.push(QueuedEvent {
            sequence_num: self.sequence_counter,
            event,
        });
        self.sequence_counter += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Remove and return the earliest event
    pub fn remove(&mut self) -> Result<Event, SimulationError> {
        self.heap
            .pop()
            .map(|queued| queued.event)
            .ok_or(SimulationError::EmptyQueue)
    }

    /// Timestamp of the earliest event without removing it
    pub fn peek_min_timestamp(&self) -> Option<Timestamp> {
        self.heap.peek().map(|queued| queued.event.timestamp)
    }

    /// Remove the earliest event if it is due at or before `time`
    pub fn remove_due(&mut self, time: Timestamp) -> Option<Event> {
        match self.peek_min_timestamp() {
            Some(next) if next <= time => self.heap.pop().map(|queued| queued.event),
            _ => None,
        }
    }
}

impl Extend<Event> for EventQueue {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        for event in iter {
            self.add(event);
        }
    }
}
