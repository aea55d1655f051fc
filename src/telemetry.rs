//! Application telemetry events and sinks.
//!
//! The panel is a local tool, but it still records a handful of structured
//! operational signals: the active database schema version, how long the
//! host handshake took, and the outcome of clearing the ratings collection.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the current database schema version after migrations apply.
    SchemaVersionRecorded {
        /// Diesel migration version string (e.g. `20261018000000`).
        schema_version: String,
    },
    /// Records a completed host handshake.
    StoreConnected {
        /// Extension id the data manager is scoped to.
        extension_id: String,
        /// Wall-clock duration of the handshake in milliseconds.
        latency_ms: u64,
    },
    /// Records the outcome of deleting every stored rating.
    RatingsCleared {
        /// Number of documents deleted.
        deleted: usize,
        /// Number of deletes that failed.
        failed: usize,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Recording sink for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::Mutex;

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps every recorded event in memory.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingSink {
        /// Drains and returns the recorded events.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .map(|mut events| events.drain(..).collect())
                .unwrap_or_default()
        }
    }

    impl TelemetrySink for RecordingSink {
        fn record(&self, event: TelemetryEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingSink;
    use super::{TelemetryEvent, TelemetrySink};

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingSink::default();
        sink.record(TelemetryEvent::RatingsCleared {
            deleted: 3,
            failed: 0,
        });

        assert_eq!(
            sink.take(),
            vec![TelemetryEvent::RatingsCleared {
                deleted: 3,
                failed: 0,
            }]
        );
        assert!(sink.take().is_empty());
    }

    #[test]
    fn events_serialise_with_snake_case_tags() {
        let event = TelemetryEvent::StoreConnected {
            extension_id: "local.car-ratings".to_owned(),
            latency_ms: 12,
        };

        let serialised = serde_json::to_string(&event).expect("event should serialise");

        assert_eq!(
            serialised,
            r#"{"type":"store_connected","extension_id":"local.car-ratings","latency_ms":12}"#
        );
    }
}
