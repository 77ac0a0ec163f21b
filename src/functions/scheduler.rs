//! Deferred execution on a timer thread.
//!
//! A [`Scheduler`] owns one thread that receives jobs over a channel and keeps
//! them in a min-heap ordered by deadline. The thread sleeps on the channel
//! until either a new job arrives or the earliest deadline passes, then runs
//! every job that is due.

use crossbeam_channel::{unbounded, RecvTimeoutError, Sender};
use once_cell::sync::OnceCell;
use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::{SchedulerConfig, UnderbarConfig};
use crate::error::{UtilError, UtilResult};

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Job state shared between the timer thread and its [`DelayHandle`].
type JobState = Arc<AtomicU8>;

struct Job {
    deadline: Instant,
    seq: u64,
    state: JobState,
    task: Task,
}

// BinaryHeap is a max-heap; order so the earliest (deadline, seq) is greatest.
impl Ord for Job {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Job {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for Job {}

enum Command {
    Schedule(Job),
    Shutdown,
}

/// Handle to a scheduled job.
#[derive(Clone)]
pub struct DelayHandle {
    state: JobState,
    queued: Arc<AtomicUsize>,
}

impl fmt::Debug for DelayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayHandle")
            .field("state", &self.state.load(Ordering::Acquire))
            .finish()
    }
}

impl DelayHandle {
    /// Stop the job from running and free its slot in the queue. Returns
    /// true only if the job was still pending; a job that already fired or
    /// was cancelled is unaffected.
    pub fn cancel(&self) -> bool {
        let cancelled = release(&self.state, &self.queued, CANCELLED);
        if cancelled {
            crate::trace!("scheduler", "job cancelled");
        }
        cancelled
    }

    pub fn is_pending(&self) -> bool {
        self.state.load(Ordering::Acquire) == PENDING
    }

    /// Whether the job has started running.
    pub fn has_fired(&self) -> bool {
        self.state.load(Ordering::Acquire) == FIRED
    }
}

/// Timer thread running jobs after their delay.
pub struct Scheduler {
    commands: Sender<Command>,
    queued: Arc<AtomicUsize>,
    next_seq: AtomicUsize,
    max_pending: usize,
    worker: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Start a scheduler with default settings.
    pub fn new() -> UtilResult<Self> {
        Self::from_config(&SchedulerConfig::default())
    }

    /// Start a scheduler from the `[scheduler]` table of a config file.
    pub fn from_config_file(path: &Path) -> UtilResult<Self> {
        let config = UnderbarConfig::load(path)?;
        Self::from_config(&config.scheduler)
    }

    /// Start a scheduler from the `underbar.toml` found by walking up from
    /// `start_dir`. An unreadable or malformed file yields the defaults.
    pub fn discover(start_dir: &Path) -> UtilResult<Self> {
        let config = UnderbarConfig::find_and_load(start_dir).unwrap_or_else(|err| {
            crate::trace!("scheduler", "ignoring config: {}", err);
            UnderbarConfig::default()
        });
        Self::from_config(&config.scheduler)
    }

    /// Start a scheduler from configuration.
    ///
    /// # Errors
    ///
    /// [`UtilError::TimerThread`] if the timer thread cannot be spawned.
    pub fn from_config(config: &SchedulerConfig) -> UtilResult<Self> {
        let (commands, receiver) = unbounded::<Command>();
        let queued = Arc::new(AtomicUsize::new(0));
        let worker_queued = Arc::clone(&queued);

        let worker = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || {
                crate::trace!("scheduler", "timer thread started");
                let mut heap: BinaryHeap<Job> = BinaryHeap::new();
                loop {
                    let message = match heap.peek() {
                        Some(next) => receiver.recv_timeout(
                            next.deadline.saturating_duration_since(Instant::now()),
                        ),
                        None => receiver
                            .recv()
                            .map_err(|_| RecvTimeoutError::Disconnected),
                    };
                    match message {
                        Ok(Command::Schedule(job)) => heap.push(job),
                        Ok(Command::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {}
                    }
                    run_due(&mut heap, &worker_queued);
                }
                for job in heap.drain() {
                    release(&job.state, &worker_queued, CANCELLED);
                }
                crate::trace!("scheduler", "timer thread stopped");
            })
            .map_err(UtilError::TimerThread)?;

        Ok(Self {
            commands,
            queued,
            next_seq: AtomicUsize::new(0),
            max_pending: config.max_pending,
            worker: Some(worker),
        })
    }

    /// Run `task` no earlier than `wait` from now. Does not block.
    ///
    /// # Errors
    ///
    /// [`UtilError::InvalidArgument`] when `wait` reaches past the clock's
    /// range, [`UtilError::SchedulerFull`] when `max_pending` jobs are queued,
    /// and [`UtilError::SchedulerClosed`] when the timer thread has stopped.
    pub fn schedule<F>(&self, wait: Duration, task: F) -> UtilResult<DelayHandle>
    where
        F: FnOnce() + Send + 'static,
    {
        let Some(deadline) = Instant::now().checked_add(wait) else {
            return Err(UtilError::invalid(
                "delay",
                format!("wait {:?} is out of range", wait),
            ));
        };
        let limit = self.max_pending;
        self.queued
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |queued| {
                if limit > 0 && queued >= limit {
                    None
                } else {
                    Some(queued + 1)
                }
            })
            .map_err(|_| UtilError::SchedulerFull { limit })?;

        let state: JobState = Arc::new(AtomicU8::new(PENDING));
        let job = Job {
            deadline,
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed) as u64,
            state: Arc::clone(&state),
            task: Box::new(task),
        };
        if self.commands.send(Command::Schedule(job)).is_err() {
            self.queued.fetch_sub(1, Ordering::AcqRel);
            return Err(UtilError::SchedulerClosed);
        }
        Ok(DelayHandle {
            state,
            queued: Arc::clone(&self.queued),
        })
    }

    /// Jobs waiting to fire. Cancelled jobs are not counted.
    pub fn queued(&self) -> usize {
        self.queued.load(Ordering::Acquire)
    }

    /// Stop the timer thread. Jobs that have not fired are discarded.
    pub fn shutdown(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.commands.send(Command::Shutdown);
            if worker.join().is_err() {
                crate::trace!("scheduler", "timer thread panicked");
            }
        }
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("queued", &self.queued())
            .field("max_pending", &self.max_pending)
            .field("running", &self.worker.is_some())
            .finish()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Move a pending job to `to` and give back its queue slot. Whoever wins the
/// transition out of `PENDING` owns the decrement.
fn release(state: &AtomicU8, queued: &AtomicUsize, to: u8) -> bool {
    let won = state
        .compare_exchange(PENDING, to, Ordering::AcqRel, Ordering::Acquire)
        .is_ok();
    if won {
        queued.fetch_sub(1, Ordering::AcqRel);
    }
    won
}

fn run_due(heap: &mut BinaryHeap<Job>, queued: &AtomicUsize) {
    let now = Instant::now();
    while heap.peek().map_or(false, |job| job.deadline <= now) {
        let Some(job) = heap.pop() else { break };
        if !release(&job.state, queued, FIRED) {
            continue;
        }
        crate::trace!("scheduler", "firing job {}", job.seq);
        if panic::catch_unwind(AssertUnwindSafe(job.task)).is_err() {
            crate::trace!("scheduler", "job {} panicked", job.seq);
        }
    }
}

static DEFAULT_SCHEDULER: OnceCell<Scheduler> = OnceCell::new();

/// The process-wide scheduler used by `delay`, started on first use with
/// the `[scheduler]` table of the nearest `underbar.toml` above the current
/// directory, or the defaults.
pub fn default_scheduler() -> UtilResult<&'static Scheduler> {
    DEFAULT_SCHEDULER.get_or_try_init(|| match std::env::current_dir() {
        Ok(cwd) => Scheduler::discover(&cwd),
        Err(_) => Scheduler::new(),
    })
}
