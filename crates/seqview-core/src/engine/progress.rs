//! Progress events for the record-by-record workflows (digestion and
//! mass-charge). A workflow opens a named phase, announces how many records
//! it will visit, ticks once per record and may attach a closing note.

#[derive(Debug, Clone)]
pub enum Progress {
    /// A workflow phase such as `"Digestion"` has begun.
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// The phase will visit `total_steps` input records.
    TaskStart { total_steps: u64 },
    /// One input record has been processed.
    TaskIncrement,
    TaskFinish,

    /// Free-form summary, e.g. how many records were left out.
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Forwards workflow events to an optional listener.
///
/// A reporter built with [`ProgressReporter::new`] drops everything, which
/// is what tests and headless callers want.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    listener: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(listener: ProgressCallback<'a>) -> Self {
        Self {
            listener: Some(listener),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.listener.is_none()
    }

    pub fn emit(&self, event: Progress) {
        if let Some(listener) = self.listener.as_ref() {
            listener(event);
        }
    }

    pub fn note(&self, message: impl Into<String>) {
        if !self.is_silent() {
            self.emit(Progress::Message(message.into()));
        }
    }

    /// Runs `body` between a `PhaseStart`/`PhaseFinish` pair.
    pub fn phase<T>(&self, name: &'static str, body: impl FnOnce() -> T) -> T {
        self.emit(Progress::PhaseStart { name });
        let out = body();
        self.emit(Progress::PhaseFinish);
        out
    }

    /// Runs a per-record pass over `records` input records inside phase
    /// `name`. `body` receives a tick to call once per processed record.
    pub fn per_record<T>(
        &self,
        name: &'static str,
        records: usize,
        body: impl FnOnce(&(dyn Fn() + Sync)) -> T,
    ) -> T {
        self.phase(name, || {
            self.emit(Progress::TaskStart {
                total_steps: records as u64,
            });
            let out = body(&|| self.emit(Progress::TaskIncrement));
            self.emit(Progress::TaskFinish);
            out
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording() -> (ProgressReporter<'static>, Arc<Mutex<Vec<String>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(format!("{:?}", event));
        }));
        (reporter, events)
    }

    #[test]
    fn reporter_without_callback_is_silent() {
        let reporter = ProgressReporter::new();
        assert!(reporter.is_silent());
        reporter.emit(Progress::TaskIncrement);
        reporter.note("dropped");
        assert_eq!(reporter.phase("noop", || 3), 3);
        assert_eq!(
            reporter.per_record("noop", 2, |tick| {
                tick();
                7
            }),
            7
        );
    }

    #[test]
    fn phase_wraps_body_with_start_and_finish() {
        let (reporter, events) = recording();
        reporter.phase("Digestion", || reporter.emit(Progress::TaskIncrement));

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "PhaseStart { name: \"Digestion\" }".to_string(),
                "TaskIncrement".to_string(),
                "PhaseFinish".to_string(),
            ]
        );
    }

    #[test]
    fn per_record_brackets_ticks_with_task_events() {
        let (reporter, events) = recording();
        let peptides = ["PEPTIDEK", "AAKPAAR", "GGR"];

        let lengths: Vec<usize> = reporter.per_record("Mass-Charge", peptides.len(), |tick| {
            peptides
                .iter()
                .map(|p| {
                    tick();
                    p.len()
                })
                .collect()
        });
        reporter.note("Skipped 1 record(s)");

        assert_eq!(lengths, vec![8, 7, 3]);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "PhaseStart { name: \"Mass-Charge\" }".to_string(),
                "TaskStart { total_steps: 3 }".to_string(),
                "TaskIncrement".to_string(),
                "TaskIncrement".to_string(),
                "TaskIncrement".to_string(),
                "TaskFinish".to_string(),
                "PhaseFinish".to_string(),
                "Message(\"Skipped 1 record(s)\")".to_string(),
            ]
        );
    }
}
