//! Motion worker thread (std only).
//!
//! All motion goes through one thread that owns the sequencer and the motor.
//! Remote requests and button events are producers on the same queue, so at
//! most one operation touches the hardware at a time. The enable line is
//! mirrored into an atomic after every command so status checks never wait
//! behind a move.
//!
//! The motor is shut down when a command panics, when the worker is dropped
//! and on [`MotionHandle::shutdown`]. Binaries wire interrupt and termination
//! signals to that call, then join the worker:
//!
//! ```rust,ignore
//! let worker = MotionWorker::spawn(sequencer, motor)?;
//! let on_signal = worker.handle();
//! ctrlc::set_handler(move || on_signal.shutdown())?;
//! // ... serve requests and buttons until the handle reports WorkerStopped ...
//! worker.shutdown();
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use crate::config::units::Inches;
use crate::error::{Result, SequenceError};
use crate::input::Trigger;
use crate::motor::{Direction, MotorDrive};
use crate::planner::{CutPlan, GeometryParameters};
use crate::sequencer::{CutSequencer, Outcome, ProgressStore, Status};

type Reply<T> = mpsc::Sender<Result<T>>;

enum Command {
    Plan(GeometryParameters, Reply<CutPlan>),
    Trigger(Trigger, Reply<Outcome>),
    Nudge(Direction, Inches, Reply<Outcome>),
    Enable(Reply<()>),
    Disable(Reply<()>),
    Status(Reply<Status>),
    Shutdown,
}

/// Cloneable handle for submitting work to a [`MotionWorker`].
///
/// Every call blocks until the worker has run it. Calls from several
/// threads are queued and run one after another.
#[derive(Clone)]
pub struct MotionHandle {
    commands: mpsc::Sender<Command>,
    enabled: Arc<AtomicBool>,
}

impl MotionHandle {
    /// Plan a new job.
    pub fn plan(&self, geometry: GeometryParameters) -> Result<CutPlan> {
        self.request(|reply| Command::Plan(geometry, reply))
    }

    /// Cut the next move.
    pub fn advance(&self) -> Result<Outcome> {
        self.trigger(Trigger::Go)
    }

    /// Return to the origin.
    pub fn rewind(&self) -> Result<Outcome> {
        self.trigger(Trigger::Reset)
    }

    /// Nudge by an explicit travel.
    pub fn nudge(&self, direction: Direction, travel: Inches) -> Result<Outcome> {
        self.request(|reply| Command::Nudge(direction, travel, reply))
    }

    /// Run the operation bound to a button or remote trigger.
    pub fn trigger(&self, trigger: Trigger) -> Result<Outcome> {
        self.request(|reply| Command::Trigger(trigger, reply))
    }

    /// Power the driver.
    pub fn enable(&self) -> Result<()> {
        self.request(Command::Enable)
    }

    /// Unpower the driver.
    pub fn disable(&self) -> Result<()> {
        self.request(Command::Disable)
    }

    /// Read the enable line and plan progress.
    ///
    /// Queues behind any move in progress; use [`is_enabled`] for a
    /// non-blocking check.
    ///
    /// [`is_enabled`]: MotionHandle::is_enabled
    pub fn status(&self) -> Result<Status> {
        self.request(Command::Status)
    }

    /// Enable line as of the last completed command. Never blocks.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Ask the worker to shut the motor down and exit.
    ///
    /// Commands already queued run first.
    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }

    fn request<T>(&self, command: impl FnOnce(Reply<T>) -> Command) -> Result<T> {
        let (reply, response) = mpsc::channel();
        self.commands
            .send(command(reply))
            .map_err(|_| SequenceError::WorkerStopped)?;
        response.recv().map_err(|_| SequenceError::WorkerStopped)?
    }
}

/// Owner of the motion thread.
///
/// Dropping the worker shuts the motor down and joins the thread.
pub struct MotionWorker {
    handle: MotionHandle,
    thread: Option<JoinHandle<()>>,
}

impl MotionWorker {
    /// Move the sequencer and motor onto a new motion thread.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::WorkerStopped` if the thread cannot be spawned.
    pub fn spawn<S, M>(sequencer: CutSequencer<S>, motor: M) -> Result<Self>
    where
        S: ProgressStore + Send + 'static,
        M: MotorDrive + Send + 'static,
    {
        let (commands, queue) = mpsc::channel();
        let enabled = Arc::new(AtomicBool::new(false));
        let mirror = Arc::clone(&enabled);

        let thread = thread::Builder::new()
            .name("motion".into())
            .spawn(move || run(sequencer, motor, queue, mirror))
            .map_err(|e| {
                error!("cannot start motion worker: {}", e);
                SequenceError::WorkerStopped
            })?;

        Ok(Self {
            handle: MotionHandle { commands, enabled },
            thread: Some(thread),
        })
    }

    /// A new handle to this worker.
    pub fn handle(&self) -> MotionHandle {
        self.handle.clone()
    }

    /// Shut the motor down and wait for the thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.handle.shutdown();
            if thread.join().is_err() {
                error!("motion worker panicked");
            }
        }
    }
}

impl Drop for MotionWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<S, M>(
    mut sequencer: CutSequencer<S>,
    mut motor: M,
    queue: mpsc::Receiver<Command>,
    enabled: Arc<AtomicBool>,
) where
    S: ProgressStore,
    M: MotorDrive,
{
    info!("motion worker started");
    publish(&mut motor, &enabled);

    // Ends on an explicit shutdown or once every handle is gone
    while let Ok(command) = queue.recv() {
        if let Command::Shutdown = command {
            break;
        }

        let ran = panic::catch_unwind(AssertUnwindSafe(|| {
            execute(&mut sequencer, &mut motor, &enabled, command)
        }));
        if ran.is_err() {
            error!("motion command panicked, shutting down");
            break;
        }
    }

    if let Err(e) = motor.shutdown() {
        error!("motor shutdown failed: {}", e);
    }
    enabled.store(false, Ordering::Release);
    info!("motion worker stopped");
}

fn execute<S, M>(
    sequencer: &mut CutSequencer<S>,
    motor: &mut M,
    enabled: &AtomicBool,
    command: Command,
) where
    S: ProgressStore,
    M: MotorDrive,
{
    match command {
        Command::Plan(geometry, reply) => {
            let result = sequencer.plan(&geometry);
            respond(motor, enabled, reply, result);
        }
        Command::Trigger(trigger, reply) => {
            let result = report(sequencer.dispatch(trigger, motor));
            respond(motor, enabled, reply, result);
        }
        Command::Nudge(direction, travel, reply) => {
            let result = report(sequencer.nudge(motor, direction, travel));
            respond(motor, enabled, reply, result);
        }
        Command::Enable(reply) => {
            let result = motor.enable();
            respond(motor, enabled, reply, result);
        }
        Command::Disable(reply) => {
            let result = motor.disable();
            respond(motor, enabled, reply, result);
        }
        Command::Status(reply) => {
            let result = sequencer.status(motor);
            respond(motor, enabled, reply, result);
        }
        Command::Shutdown => {}
    }
}

/// Republish the enable line, then answer the requester.
fn respond<M: MotorDrive, T>(motor: &mut M, enabled: &AtomicBool, reply: Reply<T>, result: Result<T>) {
    publish(motor, enabled);
    // a requester that gave up waiting is not an error
    let _ = reply.send(result);
}

fn report(result: Result<Outcome>) -> Result<Outcome> {
    match &result {
        Ok(outcome) => info!("{}", outcome),
        Err(e) => warn!("{}", e),
    }
    result
}

fn publish<M: MotorDrive>(motor: &mut M, enabled: &AtomicBool) {
    match motor.is_enabled() {
        Ok(on) => enabled.store(on, Ordering::Release),
        Err(e) => warn!("cannot read enable line: {}", e),
    }
}
