//! Motor and lead screw configuration from TOML.

use serde::Deserialize;

/// Stepper motor, driver and lead screw configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Driver steps per motor revolution (200 for a 1.8° NEMA 17 in full step).
    #[serde(default = "default_steps_per_revolution")]
    pub steps_per_revolution: u16,

    /// Lead screw threads per inch (one revolution advances 1/TPI inch).
    #[serde(default = "default_threads_per_inch")]
    pub threads_per_inch: f32,

    /// Invert direction pin logic.
    #[serde(default)]
    pub invert_direction: bool,

    /// Driver is enabled by pulling the enable line low.
    #[serde(default)]
    pub enable_active_low: bool,
}

fn default_steps_per_revolution() -> u16 {
    200
}

fn default_threads_per_inch() -> f32 {
    16.0
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            steps_per_revolution: default_steps_per_revolution(),
            threads_per_inch: default_threads_per_inch(),
            invert_direction: false,
            enable_active_low: false,
        }
    }
}

impl MotorConfig {
    /// Steps needed to move the carriage one inch.
    pub fn steps_per_inch(&self) -> f32 {
        self.steps_per_revolution as f32 * self.threads_per_inch
    }
}

/// Step pulse timing and waveform buffer limits.
#[derive(Debug, Clone, Deserialize)]
pub struct PulseConfig {
    /// Step line high time per pulse in microseconds.
    #[serde(default = "default_edge_us")]
    pub high_us: u32,

    /// Step line low time per pulse in microseconds.
    #[serde(default = "default_edge_us")]
    pub low_us: u32,

    /// Maximum edges in one waveform transmission (two per step).
    #[serde(default = "default_max_edges")]
    pub max_edges: u32,

    /// Interval between busy polls while a waveform transmits.
    #[serde(default = "default_poll_interval_us")]
    pub poll_interval_us: u32,

    /// Slack added to the nominal transmission time before timing out.
    #[serde(default = "default_timeout_margin_us")]
    pub timeout_margin_us: u32,
}

fn default_edge_us() -> u32 {
    500
}

fn default_max_edges() -> u32 {
    11_000
}

fn default_poll_interval_us() -> u32 {
    100
}

fn default_timeout_margin_us() -> u32 {
    250_000
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            high_us: default_edge_us(),
            low_us: default_edge_us(),
            max_edges: default_max_edges(),
            poll_interval_us: default_poll_interval_us(),
            timeout_margin_us: default_timeout_margin_us(),
        }
    }
}

impl PulseConfig {
    /// Duration of one full step pulse in microseconds.
    #[inline]
    pub fn period_us(&self) -> u64 {
        self.high_us as u64 + self.low_us as u64
    }

    /// Steps sent in the next transmission when `remaining` steps are left.
    #[inline]
    pub fn chunk_steps(&self, remaining: u32) -> u32 {
        let edges = (self.max_edges as u64).min(remaining as u64 * 2);
        (edges / 2) as u32
    }

    /// Longest wait allowed for a transmission of `steps` steps.
    #[inline]
    pub fn wait_budget_us(&self, steps: u32) -> u64 {
        steps as u64 * self.period_us() + self.timeout_margin_us as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_per_inch() {
        let config = MotorConfig::default();

        // 200 * 16 = 3200
        assert!((config.steps_per_inch() - 3200.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_chunk_steps_bounded_by_buffer() {
        let pulse = PulseConfig::default();

        assert_eq!(pulse.chunk_steps(6000), 5500);
        assert_eq!(pulse.chunk_steps(500), 500);
        assert_eq!(pulse.chunk_steps(0), 0);
        assert_eq!(pulse.chunk_steps(u32::MAX), 5500);
    }

    #[test]
    fn test_wait_budget() {
        let pulse = PulseConfig::default();

        // 10 steps * 1000us + 250ms margin
        assert_eq!(pulse.wait_budget_us(10), 260_000);
    }
}
