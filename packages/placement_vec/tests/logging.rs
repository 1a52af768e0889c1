//! Verifies the diagnostic events emitted when storage is acquired.

use std::fmt;
use std::sync::{Arc, Mutex};

use placement_vec::PlacementVec;
use tracing::field::{Field, Visit};
use tracing::subscriber::with_default;
use tracing::{Event, Level, Metadata, Subscriber, span};

/// One event as seen by the subscriber, with every field rendered to text.
#[derive(Debug)]
struct RecordedEvent {
    level: Level,
    fields: Vec<(&'static str, String)>,
}

impl RecordedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Default)]
struct FieldCollector {
    fields: Vec<(&'static str, String)>,
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.push((field.name(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.fields.push((field.name(), format!("{value:?}")));
    }
}

/// Collects every event in memory. Spans are not used by the crate.
#[derive(Clone, Debug, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl Recorder {
    fn with_message(&self, message: &str) -> Vec<RecordedEvent> {
        let mut events = self.events.lock().unwrap();

        let (matching, _): (Vec<_>, Vec<_>) = events
            .drain(..)
            .partition(|event| event.field("message") == Some(message));

        matching
    }
}

impl Subscriber for Recorder {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _span: &span::Attributes<'_>) -> span::Id {
        span::Id::from_u64(1)
    }

    fn record(&self, _span: &span::Id, _values: &span::Record<'_>) {}

    fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) {}

    fn event(&self, event: &Event<'_>) {
        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        self.events.lock().unwrap().push(RecordedEvent {
            level: *event.metadata().level(),
            fields: collector.fields,
        });
    }

    fn enter(&self, _span: &span::Id) {}

    fn exit(&self, _span: &span::Id) {}
}

#[test]
fn reallocation_emits_trace_event() {
    let recorder = Recorder::default();

    with_default(recorder.clone(), || {
        let mut items = PlacementVec::<u32>::new();

        for value in 0..3 {
            items.push(value).unwrap();
        }

        // Within capacity, so no further event.
        items.reserve(4).unwrap();
    });

    let events = recorder.with_message("reallocating storage");

    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|event| event.level == Level::TRACE));

    let last = events.last().unwrap();
    assert_eq!(last.field("old_capacity"), Some("2"));
    assert_eq!(last.field("new_capacity"), Some("4"));
    assert_eq!(last.field("len"), Some("2"));
    assert_eq!(last.field("item_type"), Some("u32"));
}

#[test]
#[cfg_attr(miri, ignore)] // Miri aborts on huge allocations instead of returning null.
fn acquisition_failure_emits_debug_event() {
    let recorder = Recorder::default();
    let capacity = usize::try_from(isize::MAX).unwrap() / 16;

    let result = with_default(recorder.clone(), || {
        PlacementVec::<u64>::with_capacity(capacity)
    });

    assert!(result.is_err());

    let events = recorder.with_message("storage acquisition failed");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].level, Level::DEBUG);
    assert_eq!(events[0].field("capacity"), Some(capacity.to_string().as_str()));
}
