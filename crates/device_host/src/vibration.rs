//! Vibration API contracts.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::CapabilityStatus;

/// Alternating on/off pulse durations in milliseconds, starting with a pulse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibrationPattern(pub Vec<u32>);

impl VibrationPattern {
    /// One pulse of `duration_ms`.
    pub fn single(duration_ms: u32) -> Self {
        Self(vec![duration_ms])
    }

    /// Pulse/pause sequence.
    pub fn sequence(steps: impl Into<Vec<u32>>) -> Self {
        Self(steps.into())
    }

    /// Pulse and pause durations.
    pub fn steps(&self) -> &[u32] {
        &self.0
    }
}

/// Host service exposing `navigator.vibrate`.
pub trait VibrationService {
    /// Reports whether `navigator.vibrate` exists.
    fn probe(&self) -> CapabilityStatus;

    /// Pulses the vibration hardware. Returns `false` when the request was refused.
    fn vibrate(&self, pattern: &VibrationPattern) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
/// Vibration service for hosts without a vibration actuator.
pub struct NoopVibrationService;

impl VibrationService for NoopVibrationService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Unsupported
    }

    fn vibrate(&self, _pattern: &VibrationPattern) -> bool {
        false
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory actuator that records every requested pattern.
pub struct MemoryVibrationService {
    requests: Rc<RefCell<Vec<VibrationPattern>>>,
}

impl MemoryVibrationService {
    /// Patterns requested so far, oldest first.
    pub fn requests(&self) -> Vec<VibrationPattern> {
        self.requests.borrow().clone()
    }
}

impl VibrationService for MemoryVibrationService {
    fn probe(&self) -> CapabilityStatus {
        CapabilityStatus::Supported
    }

    fn vibrate(&self, pattern: &VibrationPattern) -> bool {
        self.requests.borrow_mut().push(pattern.clone());
        true
    }
}
