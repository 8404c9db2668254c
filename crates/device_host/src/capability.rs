//! Capability presence status and the shared async return type for host services.

use std::{future::Future, pin::Pin};

/// Object-safe boxed local future returned by async capability operations.
pub type DeviceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Result of a presence probe for one capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// The capability object exists in the current environment.
    Supported,
    /// The capability object is missing or disabled.
    Unsupported,
}

impl CapabilityStatus {
    /// Maps a boolean presence check onto a status.
    pub const fn from_present(present: bool) -> Self {
        if present {
            Self::Supported
        } else {
            Self::Unsupported
        }
    }

    /// Returns whether the capability can be used.
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::Supported)
    }

    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Supported => "supported",
            Self::Unsupported => "unsupported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_maps_to_status() {
        assert!(CapabilityStatus::from_present(true).is_supported());
        assert!(!CapabilityStatus::from_present(false).is_supported());
        assert_eq!(CapabilityStatus::Unsupported.as_str(), "unsupported");
    }
}
