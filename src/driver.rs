//! Fixed-interval periodic drivers
//!
//! The game runs two independent cadences off one wall clock: a slow spawn
//! driver and a fast simulation driver. Each is a fixed-interval accumulator
//! with an armed flag, so arming twice can never produce two overlapping
//! instances of the same driver.

use crate::consts::MAX_CATCHUP;

#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    interval: f32,
    accumulator: f32,
    armed: bool,
}

impl Driver {
    /// Create a disarmed driver that fires every `interval` seconds
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
            armed: false,
        }
    }

    /// Arm the driver. Re-arming an armed driver restarts its cadence.
    pub fn arm(&mut self) {
        self.accumulator = 0.0;
        self.armed = true;
    }

    /// Cancel the driver and drop any partially accumulated time
    pub fn disarm(&mut self) {
        self.accumulator = 0.0;
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Change the cadence, keeping the armed state
    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
        self.accumulator = self.accumulator.min(interval);
    }

    /// Add wall-clock time. Returns how many times the driver is due to fire.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        if !self.armed || !(dt > 0.0) {
            return 0;
        }
        self.accumulator += dt;

        let mut fires = 0;
        while self.accumulator >= self.interval && fires < MAX_CATCHUP {
            self.accumulator -= self.interval;
            fires += 1;
        }
        // Anything beyond the catch-up cap is dropped rather than queued
        if fires == MAX_CATCHUP {
            self.accumulator = self.accumulator.min(self.interval);
        }
        fires
    }
}
