//! Single-flight execution of heavy computations off the calling thread.
//!
//! A [`TaskRunner`] accepts one [`Task`] at a time. The work function runs on a
//! dedicated worker thread and its [`TaskOutcome`] is handed to a completion
//! callback exactly once. Submitting while a task is running is rejected with
//! [`RunnerError::Busy`] and leaves the in-flight task alone.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Computation failed: {0}")]
    Computation(String),

    #[error("Computation panicked: {0}")]
    Panicked(String),
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Task runner is busy with '{label}'")]
    Busy { label: String },

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskState {
    #[default]
    Idle,
    Running {
        label: String,
    },
    Completed {
        label: String,
    },
    Failed {
        label: String,
        error: TaskError,
    },
}

impl TaskState {
    pub fn label(&self) -> Option<&str> {
        match self {
            TaskState::Idle => None,
            TaskState::Running { label }
            | TaskState::Completed { label }
            | TaskState::Failed { label, .. } => Some(label),
        }
    }
}

type WorkFn<I, O> = Box<dyn FnOnce(I) -> Result<O, TaskError> + Send>;

/// A work function bound to its input and a human-readable label.
pub struct Task<I, O> {
    label: String,
    input: I,
    work: WorkFn<I, O>,
}

impl<I, O> Task<I, O> {
    pub fn new<E, F>(label: impl Into<String>, input: I, work: F) -> Self
    where
        E: fmt::Display,
        F: FnOnce(I) -> Result<O, E> + Send + 'static,
    {
        Self {
            label: label.into(),
            input,
            work: Box::new(move |input| {
                work(input).map_err(|e| TaskError::Computation(e.to_string()))
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<I, O> fmt::Debug for Task<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task").field("label", &self.label).finish_non_exhaustive()
    }
}

/// What the completion callback receives.
#[derive(Debug)]
pub struct TaskOutcome<O> {
    pub label: String,
    pub result: Result<O, TaskError>,
}

#[derive(Debug)]
pub struct TaskRunner {
    name: String,
    state: Arc<Mutex<TaskState>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new("seqview-task")
    }
}

impl TaskRunner {
    /// Creates an idle runner. `name` prefixes the worker thread names.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(TaskState::Idle)),
            workers: Mutex::new(Vec::new()),
        }
    }

    pub fn state(&self) -> TaskState {
        lock(&self.state).clone()
    }

    pub fn is_running(&self) -> bool {
        matches!(*lock(&self.state), TaskState::Running { .. })
    }

    /// Starts `task` on a worker thread and returns immediately.
    ///
    /// The runner state is `Completed` or `Failed` by the time `on_complete`
    /// is invoked.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Busy`] if another task is still running, or
    /// [`RunnerError::Spawn`] if the worker thread could not be created.
    pub fn submit<I, O, C>(&self, task: Task<I, O>, on_complete: C) -> Result<(), RunnerError>
    where
        I: Send + 'static,
        O: Send + 'static,
        C: FnOnce(TaskOutcome<O>) + Send + 'static,
    {
        let previous = {
            let mut state = lock(&self.state);
            if let TaskState::Running { label } = &*state {
                debug!(running = %label, rejected = %task.label, "Rejecting submission, runner is busy");
                return Err(RunnerError::Busy {
                    label: label.clone(),
                });
            }
            std::mem::replace(
                &mut *state,
                TaskState::Running {
                    label: task.label.clone(),
                },
            )
        };

        info!("Starting task '{}'", task.label);
        let shared = Arc::clone(&self.state);
        let spawned = thread::Builder::new()
            .name(format!("{}-worker", self.name))
            .spawn(move || run_task(task, &shared, on_complete));

        match spawned {
            Ok(handle) => {
                let mut workers = lock(&self.workers);
                workers.retain(|h| !h.is_finished());
                workers.push(handle);
                Ok(())
            }
            Err(e) => {
                *lock(&self.state) = previous;
                Err(RunnerError::Spawn(e))
            }
        }
    }

    /// Blocks until every worker started by this runner has finished,
    /// including its completion callback.
    pub fn wait(&self) {
        let handles: Vec<_> = lock(&self.workers).drain(..).collect();
        for handle in handles {
            if handle.join().is_err() {
                warn!("A task completion callback panicked");
            }
        }
    }
}

fn run_task<I, O, C>(task: Task<I, O>, state: &Mutex<TaskState>, on_complete: C)
where
    C: FnOnce(TaskOutcome<O>),
{
    let Task { label, input, work } = task;

    let result = match panic::catch_unwind(AssertUnwindSafe(move || work(input))) {
        Ok(result) => result,
        Err(payload) => Err(TaskError::Panicked(panic_message(payload.as_ref()))),
    };

    *lock(state) = match &result {
        Ok(_) => {
            info!("Task '{}' completed", label);
            TaskState::Completed {
                label: label.clone(),
            }
        }
        Err(error) => {
            warn!("Task '{}' failed: {}", label, error);
            TaskState::Failed {
                label: label.clone(),
                error: error.clone(),
            }
        }
    };

    on_complete(TaskOutcome { label, result });
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_secs(10);

    fn collect<O: Send + 'static>() -> (
        impl FnOnce(TaskOutcome<O>) + Send + 'static,
        mpsc::Receiver<TaskOutcome<O>>,
    ) {
        let (tx, rx) = mpsc::channel();
        (
            move |outcome| {
                let _ = tx.send(outcome);
            },
            rx,
        )
    }

    #[test]
    fn new_runner_is_idle() {
        let runner = TaskRunner::new("test");
        assert_eq!(runner.state(), TaskState::Idle);
        assert!(!runner.is_running());
    }

    #[test]
    fn successful_task_delivers_result_and_label_once() {
        let runner = TaskRunner::new("test");
        let (callback, rx) = collect();
        let task = Task::new("sum", vec![1, 2, 3], |v: Vec<i32>| {
            Ok::<_, String>(v.iter().sum::<i32>())
        });

        runner.submit(task, callback).unwrap();
        runner.wait();

        let outcome = rx.recv_timeout(TIMEOUT).unwrap();
        assert_eq!(outcome.label, "sum");
        assert_eq!(outcome.result, Ok(6));
        assert!(rx.try_recv().is_err());
        assert_eq!(
            runner.state(),
            TaskState::Completed {
                label: "sum".to_string()
            }
        );
    }

    #[test]
    fn second_submit_while_running_is_rejected_without_disturbing_first() {
        let runner = TaskRunner::new("test");
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let (started_tx, started_rx) = mpsc::channel::<()>();
        let (callback, rx) = collect();

        let slow = Task::new("slow", 20, move |n: i32| {
            started_tx.send(()).map_err(|e| e.to_string())?;
            release_rx.recv().map_err(|e| e.to_string())?;
            Ok::<_, String>(n * 2)
        });
        runner.submit(slow, callback).unwrap();
        started_rx.recv_timeout(TIMEOUT).unwrap();
        assert!(runner.is_running());

        let fast = Task::new("fast", 1, |n: i32| Ok::<_, String>(n));
        let rejected = runner.submit(fast, |_| panic!("rejected task must not complete"));
        assert!(matches!(rejected, Err(RunnerError::Busy { ref label }) if label == "slow"));

        release_tx.send(()).unwrap();
        runner.wait();

        let outcome = rx.recv_timeout(TIMEOUT).unwrap();
        assert_eq!(outcome.label, "slow");
        assert_eq!(outcome.result, Ok(40));
    }

    #[test]
    fn returned_error_moves_runner_to_failed() {
        let runner = TaskRunner::new("test");
        let (callback, rx) = collect::<i32>();
        let task = Task::new("bad", (), |_| Err::<i32, _>("no sequences"));

        runner.submit(task, callback).unwrap();
        runner.wait();

        let outcome = rx.recv_timeout(TIMEOUT).unwrap();
        let expected = TaskError::Computation("no sequences".to_string());
        assert_eq!(outcome.result, Err(expected.clone()));
        assert_eq!(
            runner.state(),
            TaskState::Failed {
                label: "bad".to_string(),
                error: expected
            }
        );
    }

    #[test]
    fn panic_in_work_is_captured_as_failure() {
        let runner = TaskRunner::new("test");
        let (callback, rx) = collect::<i32>();
        let task = Task::new("boom", (), |_: ()| -> Result<i32, String> {
            panic!("residue table exploded")
        });

        runner.submit(task, callback).unwrap();
        runner.wait();

        let outcome = rx.recv_timeout(TIMEOUT).unwrap();
        assert_eq!(
            outcome.result,
            Err(TaskError::Panicked("residue table exploded".to_string()))
        );
        assert!(matches!(runner.state(), TaskState::Failed { .. }));
    }

    #[test]
    fn state_is_terminal_before_callback_runs() {
        let runner = Arc::new(TaskRunner::new("test"));
        let observer = Arc::clone(&runner);
        let (tx, rx) = mpsc::channel();

        let task = Task::new("observe", (), |_| Ok::<_, String>(()));
        runner
            .submit(task, move |_| {
                let _ = tx.send(observer.state());
            })
            .unwrap();
        runner.wait();

        assert_eq!(
            rx.recv_timeout(TIMEOUT).unwrap(),
            TaskState::Completed {
                label: "observe".to_string()
            }
        );
    }

    #[test]
    fn runner_accepts_new_task_after_terminal_state() {
        let runner = TaskRunner::new("test");

        let (callback, rx) = collect::<i32>();
        runner
            .submit(Task::new("first", (), |_| Err::<i32, _>("failed")), callback)
            .unwrap();
        runner.wait();
        assert!(rx.recv_timeout(TIMEOUT).unwrap().result.is_err());

        let (callback, rx) = collect();
        runner
            .submit(Task::new("second", 5, |n: i32| Ok::<_, String>(n + 1)), callback)
            .unwrap();
        runner.wait();
        assert_eq!(rx.recv_timeout(TIMEOUT).unwrap().result, Ok(6));
        assert_eq!(runner.state().label(), Some("second"));
    }
}
