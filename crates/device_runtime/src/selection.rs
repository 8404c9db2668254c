//! The closed set of demo features offered by the selector.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// One entry of the feature selector.
pub enum Feature {
    /// Battery Status API.
    Battery,
    /// Network Information API.
    NetworkInfo,
    /// Fullscreen API.
    Fullscreen,
    /// Screen Orientation API (with fullscreen controls).
    ScreenOrientation,
    /// Vibration API.
    Vibration,
    /// Badging API.
    Badging,
    /// Page Visibility API with a come-back notification.
    PageVisibility,
    /// Idle Detection API.
    IdleDetection,
    /// Screen Wake Lock API.
    ScreenWakeLock,
    /// Permissions API.
    Permissions,
    /// Geolocation API.
    Geolocation,
}

impl Feature {
    /// Every feature in selector order.
    pub const ALL: [Self; 11] = [
        Self::Battery,
        Self::NetworkInfo,
        Self::Fullscreen,
        Self::ScreenOrientation,
        Self::Vibration,
        Self::Badging,
        Self::PageVisibility,
        Self::IdleDetection,
        Self::ScreenWakeLock,
        Self::Permissions,
        Self::Geolocation,
    ];

    /// Option value used by the selector and `?feature=` deep links.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Battery => "battery",
            Self::NetworkInfo => "network-info",
            Self::Fullscreen => "fullscreen",
            Self::ScreenOrientation => "screen-orientation",
            Self::Vibration => "vibration",
            Self::Badging => "badging",
            Self::PageVisibility => "page-visibility",
            Self::IdleDetection => "idle-detection",
            Self::ScreenWakeLock => "screen-wake-lock",
            Self::Permissions => "permissions",
            Self::Geolocation => "geolocation",
        }
    }

    /// Human-readable option label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Battery => "Battery Status",
            Self::NetworkInfo => "Network Information",
            Self::Fullscreen => "Fullscreen",
            Self::ScreenOrientation => "Screen Orientation",
            Self::Vibration => "Vibration",
            Self::Badging => "Badging",
            Self::PageVisibility => "Page Visibility",
            Self::IdleDetection => "Idle Detection",
            Self::ScreenWakeLock => "Screen Wake Lock",
            Self::Permissions => "Permissions",
            Self::Geolocation => "Geolocation",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown feature `{0}`")]
/// A selector value outside [`Feature::ALL`].
pub struct UnknownFeature(pub String);

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|feature| feature.as_str() == value)
            .ok_or_else(|| UnknownFeature(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tokens_parse_back_to_their_feature() {
        for feature in Feature::ALL {
            assert_eq!(feature.as_str().parse::<Feature>(), Ok(feature));
        }
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        assert_eq!(
            "aaaa".parse::<Feature>(),
            Err(UnknownFeature("aaaa".to_string()))
        );
        assert_eq!("".parse::<Feature>(), Err(UnknownFeature(String::new())));
        assert_eq!(
            UnknownFeature("Battery".to_string()).to_string(),
            "unknown feature `Battery`"
        );
    }

    #[test]
    fn serde_uses_selector_tokens() {
        let json = serde_json::to_string(&Feature::ScreenWakeLock).expect("serialize");
        assert_eq!(json, "\"screen-wake-lock\"");
        let feature: Feature = serde_json::from_str("\"network-info\"").expect("deserialize");
        assert_eq!(feature, Feature::NetworkInfo);
    }
}
