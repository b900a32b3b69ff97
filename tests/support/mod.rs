//! Simulated jig hardware shared by the integration tests.
//!
//! The enable pin, direction pin and waveform channel all write to one
//! shared [`Bench`], so a test can inspect what the carriage did after the
//! parts have been moved into a controller or a worker thread.

#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard};

use boxjoint_motion::motor::{Edge, WaveId};
use boxjoint_motion::{JigConfig, MotorController, WaveformChannel};
use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use embedded_hal_mock::eh1::delay::NoopDelay;

/// What the simulated carriage has done.
#[derive(Debug, Default)]
pub struct Bench {
    pub enable_high: bool,
    pub dir_high: bool,
    pub pending_edges: u32,
    pub counter_clockwise_steps: u64,
    pub clockwise_steps: u64,
    pub transmissions: u32,
    pub fail_sends: bool,
}

impl Bench {
    /// Displacement from the origin, positive away from it.
    pub fn displacement(&self) -> i64 {
        self.counter_clockwise_steps as i64 - self.clockwise_steps as i64
    }
}

#[derive(Clone, Default)]
pub struct SharedBench(Arc<Mutex<Bench>>);

impl SharedBench {
    pub fn lock(&self) -> MutexGuard<'_, Bench> {
        self.0.lock().unwrap()
    }
}

pub struct EnablePin(SharedBench);

impl ErrorType for EnablePin {
    type Error = Infallible;
}

impl OutputPin for EnablePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.lock().enable_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.lock().enable_high = true;
        Ok(())
    }
}

impl StatefulOutputPin for EnablePin {
    fn is_set_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.lock().enable_high)
    }

    fn is_set_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.lock().enable_high)
    }
}

pub struct DirPin(SharedBench);

impl ErrorType for DirPin {
    type Error = Infallible;
}

impl OutputPin for DirPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.lock().dir_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.lock().dir_high = true;
        Ok(())
    }
}

/// Waveform engine that counts steps by direction line level.
pub struct SimChannel(SharedBench);

impl WaveformChannel for SimChannel {
    type Error = &'static str;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.0.lock().pending_edges = 0;
        Ok(())
    }

    fn add_edges<I>(&mut self, edges: I) -> Result<usize, Self::Error>
    where
        I: Iterator<Item = Edge>,
    {
        let n = edges.count();
        self.0.lock().pending_edges += n as u32;
        Ok(n)
    }

    fn create(&mut self) -> Result<WaveId, Self::Error> {
        Ok(WaveId(0))
    }

    fn send_once(&mut self, _wave: WaveId) -> Result<(), Self::Error> {
        let mut bench = self.0.lock();
        if bench.fail_sends {
            return Err("dma fault");
        }
        let steps = (bench.pending_edges / 2) as u64;
        // clockwise drives the direction line high
        if bench.dir_high {
            bench.clockwise_steps += steps;
        } else {
            bench.counter_clockwise_steps += steps;
        }
        bench.transmissions += 1;
        Ok(())
    }

    fn is_busy(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn delete(&mut self, _wave: WaveId) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub type SimMotor = MotorController<EnablePin, DirPin, SimChannel, NoopDelay>;

/// A controller on simulated hardware, built from the stock configuration.
pub fn sim_motor() -> (SimMotor, SharedBench) {
    sim_motor_with(&JigConfig::default())
}

pub fn sim_motor_with(config: &JigConfig) -> (SimMotor, SharedBench) {
    let bench = SharedBench::default();
    let motor = MotorController::builder()
        .from_config(config)
        .enable_pin(EnablePin(bench.clone()))
        .dir_pin(DirPin(bench.clone()))
        .channel(SimChannel(bench.clone()))
        .delay(NoopDelay::new())
        .build()
        .unwrap();
    (motor, bench)
}
