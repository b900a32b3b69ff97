//! Box-joint jig simulator.
//!
//! Runs a full job on simulated hardware: the step line is bit-banged into a
//! counter, the front panel is a scripted set of button presses, and all
//! motion goes through the motion worker exactly as on the jig. An interrupt
//! or termination signal shuts the motor down and joins the worker.
//!
//! ```text
//! cargo run --example jig_sim -- --config jig.toml --progress /tmp/jig.toml
//! ```

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use boxjoint_motion::motor::BitBangChannel;
use boxjoint_motion::{
    validate_config, ButtonPanel, CutSequencer, FileStore, JigConfig, MotionWorker,
    MotorController,
};
use clap::Parser;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};
use simple_logger::SimpleLogger;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Jig configuration (stock jig if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Progress document
    #[arg(short, long)]
    progress: Option<PathBuf>,
}

/// Carriage state shared by the simulated lines.
#[derive(Default)]
struct Carriage {
    enabled: AtomicBool,
    clockwise: AtomicBool,
    position: AtomicI64,
}

struct EnableLine(Arc<Carriage>);

impl ErrorType for EnableLine {
    type Error = Infallible;
}

impl OutputPin for EnableLine {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.enabled.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.enabled.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl StatefulOutputPin for EnableLine {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.enabled.load(Ordering::SeqCst))
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.enabled.load(Ordering::SeqCst))
    }
}

struct DirectionLine(Arc<Carriage>);

impl ErrorType for DirectionLine {
    type Error = Infallible;
}

impl OutputPin for DirectionLine {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.clockwise.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.clockwise.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Counts rising edges as steps in the current direction.
struct StepLine(Arc<Carriage>);

impl ErrorType for StepLine {
    type Error = Infallible;
}

impl OutputPin for StepLine {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let delta = if self.0.clockwise.load(Ordering::SeqCst) { -1 } else { 1 };
        self.0.position.fetch_add(delta, Ordering::SeqCst);
        Ok(())
    }
}

/// Simulated time does not wait.
struct Instant;

impl DelayNs for Instant {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// A button held down during scripted windows of simulated time.
struct ScriptedButton {
    clock: Arc<AtomicU64>,
    held: Vec<(u64, u64)>,
}

impl ScriptedButton {
    fn new(clock: &Arc<AtomicU64>, held: Vec<(u64, u64)>) -> Self {
        Self {
            clock: Arc::clone(clock),
            held,
        }
    }
}

impl ErrorType for ScriptedButton {
    type Error = Infallible;
}

impl InputPin for ScriptedButton {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        let now = self.clock.load(Ordering::SeqCst);
        Ok(self.held.iter().any(|&(from, to)| (from..to).contains(&now)))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()?;

    let config = match &args.config {
        Some(path) => boxjoint_motion::load_config(path)?,
        None => JigConfig::default(),
    };
    validate_config(&config)?;

    let progress = args
        .progress
        .unwrap_or_else(|| std::env::temp_dir().join("jig_sim_progress.toml"));
    log::info!("progress kept in {}", progress.display());

    let carriage = Arc::new(Carriage::default());
    let motor = MotorController::builder()
        .from_config(&config)
        .enable_pin(EnableLine(Arc::clone(&carriage)))
        .dir_pin(DirectionLine(Arc::clone(&carriage)))
        .channel(BitBangChannel::<_, _>::new(StepLine(Arc::clone(&carriage)), Instant))
        .delay(Instant)
        .build()?;

    let sequencer = CutSequencer::new(FileStore::new(&progress), &config);
    let worker = MotionWorker::spawn(sequencer, motor)?;
    let handle = worker.handle();

    // Ctrl-C and SIGTERM power the driver down before the process exits
    let interrupted = Arc::new(AtomicBool::new(false));
    let on_signal = handle.clone();
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        log::warn!("interrupted, shutting the motor down");
        flag.store(true, Ordering::SeqCst);
        on_signal.shutdown();
    })?;

    let plan = handle.plan(config.job)?;
    log::info!("job needs {} moves", plan.len());
    handle.enable()?;

    // A glitch on left, one right nudge, go once per cut plus one, then reset
    let clock = Arc::new(AtomicU64::new(0));
    let window = config.buttons.debounce_us as u64;
    let press = |at: u64| (at, at + 2 * window);
    let first_cut = 100 * window;
    let go_presses: Vec<(u64, u64)> = (0..=plan.len() as u64)
        .map(|n| press(first_cut + n * 4 * window))
        .collect();
    let reset_at = first_cut + (plan.len() as u64 + 2) * 4 * window;

    let mut panel = ButtonPanel::from_config(
        ScriptedButton::new(&clock, go_presses),
        ScriptedButton::new(&clock, vec![(window, window + window / 2)]),
        ScriptedButton::new(&clock, vec![press(10 * window)]),
        ScriptedButton::new(&clock, vec![press(reset_at)]),
        &config.buttons,
    );

    let tick = (window / 10).max(1);
    let mut now = 0;
    while now < reset_at + 4 * window {
        if interrupted.load(Ordering::SeqCst) {
            break;
        }
        clock.store(now, Ordering::SeqCst);

        for trigger in panel.poll(now)? {
            match handle.trigger(trigger) {
                Ok(outcome) => println!("{:>12} -> {}", trigger.as_str(), outcome),
                Err(e) => println!("{:>12} -> {}", trigger.as_str(), e),
            }
        }
        now += tick;
    }

    if !interrupted.load(Ordering::SeqCst) {
        let status = handle.status()?;
        println!("final status: {}", status);
    }
    println!("carriage at {} steps", carriage.position.load(Ordering::SeqCst));

    worker.shutdown();
    Ok(())
}
