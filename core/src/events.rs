use tracing::{debug, info};

/// Progress notifications emitted by generation and evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    GenerationStarted {
        n_bits: usize,
        requested: usize,
    },
    PaddingApplied {
        iteration: usize,
        width: usize,
    },
    RotationBlockAppended {
        shift: usize,
    },
    GenerationFinished {
        kept: usize,
        requested: usize,
    },
    ReferenceEvaluated {
        responses: usize,
    },
    TrialCompleted {
        trial: usize,
        mismatches: usize,
    },
    EvaluationFinished {
        bit_error_rate: f64,
    },
}

/// Optional side-channel for progress reporting.
pub trait EventSink {
    fn record(&self, event: Event);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: Event) {}
}

/// Forwards events to the `tracing` dispatcher installed by the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: Event) {
        match event {
            Event::GenerationStarted { n_bits, requested } => {
                info!(n_bits, requested, "generating binary-coded challenges");
            }
            Event::PaddingApplied { iteration, width } => {
                debug!(iteration, width, "inserted padding bits");
            }
            Event::RotationBlockAppended { shift } => {
                debug!(shift, "appended rotated block");
            }
            Event::GenerationFinished { kept, requested } => {
                info!(kept, requested, "challenge generation finished");
            }
            Event::ReferenceEvaluated { responses } => {
                debug!(responses, "reference responses computed");
            }
            Event::TrialCompleted { trial, mismatches } => {
                debug!(trial, mismatches, "noisy trial completed");
            }
            Event::EvaluationFinished { bit_error_rate } => {
                info!(bit_error_rate, "reliability evaluation finished");
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::RefCell;

    use super::{Event, EventSink};

    /// Collects events in order for assertions.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub(crate) events: RefCell<Vec<Event>>,
    }

    impl EventSink for RecordingSink {
        fn record(&self, event: Event) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::default();
        sink.record(Event::RotationBlockAppended { shift: 1 });
        sink.record(Event::RotationBlockAppended { shift: 2 });

        assert_eq!(
            *sink.events.borrow(),
            vec![
                Event::RotationBlockAppended { shift: 1 },
                Event::RotationBlockAppended { shift: 2 },
            ]
        );
    }
}
