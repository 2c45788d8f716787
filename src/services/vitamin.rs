// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Sun exposure estimates from a UV index reading.

/// Fitzpatrick type assumed when the client does not send one.
pub const DEFAULT_SKIN_TYPE: u8 = 3;

/// UV risk band, following the WHO UV index categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvRisk {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvRisk {
    pub fn from_uv_index(uv: f64) -> Self {
        if uv < 3.0 {
            UvRisk::Low
        } else if uv < 6.0 {
            UvRisk::Moderate
        } else if uv < 8.0 {
            UvRisk::High
        } else if uv < 11.0 {
            UvRisk::VeryHigh
        } else {
            UvRisk::Extreme
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UvRisk::Low => "Low",
            UvRisk::Moderate => "Moderate",
            UvRisk::High => "High",
            UvRisk::VeryHigh => "Very High",
            UvRisk::Extreme => "Extreme",
        }
    }
}

/// Exposure multiplier per Fitzpatrick skin type. Unknown types use type III.
fn skin_factor(skin_type: u8) -> f64 {
    match skin_type {
        1 => 0.6,
        2 => 0.8,
        3 => 1.0,
        4 => 1.3,
        5 => 1.6,
        6 => 2.0,
        _ => 1.0,
    }
}

/// Suggested minutes of sun, clamped to 5..=120.
///
/// Returns `None` when there is no meaningful UV (index at or below zero).
pub fn safe_exposure_minutes(uv: f64, skin_type: u8) -> Option<u32> {
    if uv.is_nan() || uv <= 0.0 {
        return None;
    }
    let minutes = (60.0 / uv.max(0.1)) * skin_factor(skin_type);
    Some(minutes.clamp(5.0, 120.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_band_boundaries() {
        assert_eq!(UvRisk::from_uv_index(0.0), UvRisk::Low);
        assert_eq!(UvRisk::from_uv_index(2.9), UvRisk::Low);
        assert_eq!(UvRisk::from_uv_index(3.0), UvRisk::Moderate);
        assert_eq!(UvRisk::from_uv_index(6.0), UvRisk::High);
        assert_eq!(UvRisk::from_uv_index(8.0), UvRisk::VeryHigh);
        assert_eq!(UvRisk::from_uv_index(11.0), UvRisk::Extreme);
        assert_eq!(UvRisk::VeryHigh.label(), "Very High");
    }

    #[test]
    fn test_exposure_scales_with_skin_type() {
        assert_eq!(safe_exposure_minutes(6.0, 3), Some(10));
        assert_eq!(safe_exposure_minutes(6.0, 6), Some(20));
        assert_eq!(safe_exposure_minutes(6.0, 1), Some(6));
    }

    #[test]
    fn test_exposure_is_clamped() {
        assert_eq!(safe_exposure_minutes(0.2, 6), Some(120));
        assert_eq!(safe_exposure_minutes(14.0, 1), Some(5));
    }

    #[test]
    fn test_no_exposure_without_uv() {
        assert_eq!(safe_exposure_minutes(0.0, 3), None);
        assert_eq!(safe_exposure_minutes(-1.0, 3), None);
    }

    #[test]
    fn test_unknown_skin_type_defaults() {
        assert_eq!(
            safe_exposure_minutes(4.0, 9),
            safe_exposure_minutes(4.0, DEFAULT_SKIN_TYPE)
        );
    }
}
