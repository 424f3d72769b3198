//! Shared test utilities used across corefcheck crates.

pub mod tracing {
    //! Capture of `tracing` events so tests can assert on emitted
    //! diagnostics without installing a global subscriber.
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    /// Layer that stores every event it observes, in emission order.
    ///
    /// # Examples
    /// ```
    /// use corefcheck_test_support::tracing::EventCapture;
    ///
    /// let capture = EventCapture::default();
    /// capture.run(|| tracing::error!(mention = "e1", "missing"));
    /// let events = capture.events();
    /// assert_eq!(events.len(), 1);
    /// assert_eq!(events[0].field("mention"), Some("e1"));
    /// ```
    #[derive(Clone, Default)]
    pub struct EventCapture {
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    impl EventCapture {
        /// Runs `f` with this capture installed as the thread-local
        /// subscriber and returns its result.
        pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
            let subscriber = tracing_subscriber::registry().with(self.clone());
            tracing::subscriber::with_default(subscriber, f)
        }

        /// Snapshot of all captured events.
        #[must_use]
        pub fn events(&self) -> Vec<CapturedEvent> {
            self.events.lock().expect("lock poisoned").clone()
        }

        /// Snapshot of the captured events emitted at exactly `level`.
        #[must_use]
        pub fn at_level(&self, level: Level) -> Vec<CapturedEvent> {
            self.events()
                .into_iter()
                .filter(|event| event.level == level)
                .collect()
        }
    }

    /// One recorded event.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CapturedEvent {
        /// Severity of the event.
        pub level: Level,
        /// Module path or explicit target of the event.
        pub target: String,
        /// Structured fields, including `message`, rendered as strings.
        pub fields: HashMap<String, String>,
    }

    impl CapturedEvent {
        /// Returns the rendered value of `name`, if the event carried it.
        #[must_use]
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields.get(name).map(String::as_str)
        }

        /// Returns the event's formatted message.
        #[must_use]
        pub fn message(&self) -> Option<&str> {
            self.field("message")
        }
    }

    impl<S: Subscriber> Layer<S> for EventCapture {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut FieldCollector {
                fields: &mut fields,
            });
            self.events
                .lock()
                .expect("lock poisoned")
                .push(CapturedEvent {
                    level: *event.metadata().level(),
                    target: event.metadata().target().to_owned(),
                    fields,
                });
        }
    }

    struct FieldCollector<'a> {
        fields: &'a mut HashMap<String, String>,
    }

    impl FieldCollector<'_> {
        fn insert(&mut self, field: &Field, value: String) {
            self.fields.insert(field.name().to_owned(), value);
        }
    }

    impl Visit for FieldCollector<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.insert(field, format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.insert(field, value.to_owned());
        }

        fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
            self.insert(field, value.to_string());
        }

        fn record_bool(&mut self, field: &Field, value: bool) {
            self.insert(field, value.to_string());
        }

        fn record_u64(&mut self, field: &Field, value: u64) {
            self.insert(field, value.to_string());
        }

        fn record_i64(&mut self, field: &Field, value: i64) {
            self.insert(field, value.to_string());
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn records_level_message_and_fields() {
            let capture = EventCapture::default();
            capture.run(|| {
                tracing::info!(count = 3_u64, "starting");
                tracing::error!(cluster = "c1", ok = false, "overlap");
            });

            let errors = capture.at_level(Level::ERROR);
            assert_eq!(errors.len(), 1);
            let event = &errors[0];
            assert_eq!(event.message(), Some("overlap"));
            assert_eq!(event.field("cluster"), Some("c1"));
            assert_eq!(event.field("ok"), Some("false"));
            assert_eq!(capture.events().len(), 2);
        }

        #[test]
        fn events_outside_run_are_not_captured() {
            let capture = EventCapture::default();
            tracing::error!("not captured");
            assert!(capture.events().is_empty());
        }
    }
}

pub mod ci;
