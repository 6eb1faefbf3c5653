//! Store events carry the field names documented in `kb_core::logging`.
use std::sync::{Arc, Mutex};

use kb_core::logging::{
    CASCADE_COUNT, CONCEPT_ID, REFERENCE_ID, STATEMENT_ID, SUBSYSTEM, TRANSLATION_ID,
};
use kb_store::test_fixtures::helsinki;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Field names of every event seen while installed.
#[derive(Clone, Default)]
struct FieldRecorder {
    events: Arc<Mutex<Vec<Vec<&'static str>>>>,
}

impl FieldRecorder {
    fn with_field(&self, field: &str) -> Vec<Vec<&'static str>> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|names| names.contains(&field))
            .cloned()
            .collect()
    }

    fn all(&self) -> Vec<Vec<&'static str>> {
        self.events.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for FieldRecorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let names = event.metadata().fields().iter().map(|f| f.name()).collect();
        self.events.lock().unwrap().push(names);
    }
}

fn record<T>(f: impl FnOnce() -> T) -> (T, FieldRecorder) {
    let recorder = FieldRecorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, recorder)
}

#[test]
fn test_every_store_event_names_its_subsystem() {
    let (_, recorder) = record(|| {
        let mut fx = helsinki();
        let r = fx
            .store
            .create_reference(Some("https://stat.fi/census"), None)
            .unwrap();
        fx.store.link_reference(r, fx.population_statement).unwrap();
        fx.store.delete_statement(fx.nickname_statement).unwrap();
        fx.store.delete_concept(fx.city).unwrap();
    });

    let events = recorder.all();
    assert!(!events.is_empty());
    for names in &events {
        assert!(names.contains(&SUBSYSTEM), "event without subsystem: {names:?}");
    }
    assert!(events.iter().any(|n| n.contains(&REFERENCE_ID)));
    assert!(events.iter().any(|n| n.contains(&TRANSLATION_ID)));
}

#[test]
fn test_cascading_deletes_report_their_count() {
    let (_, recorder) = record(|| {
        let mut fx = helsinki();
        fx.store.delete_statement(fx.population_statement).unwrap();
        fx.store.delete_concept(fx.nickname).unwrap();
    });

    let counted = recorder.with_field(CASCADE_COUNT);
    assert_eq!(counted.len(), 2);
    assert!(counted.iter().any(|n| n.contains(&STATEMENT_ID)));
    assert!(counted.iter().any(|n| n.contains(&CONCEPT_ID)));
}
