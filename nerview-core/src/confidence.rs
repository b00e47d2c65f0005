//! Witness type for model scores bounded to [0.0, 1.0].
//!
//! The NER backend attaches a softmax-style score to every prediction it
//! returns above the request threshold. Older annotation payloads carry no
//! score at all, which is why annotations hold `Option<Confidence>` rather
//! than a bare float.
//!
//! Parse once at the boundary, then rely on the bound everywhere else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A confidence score guaranteed to be in the range [0.0, 1.0].
///
/// # Example
///
/// ```rust
/// use nerview_core::Confidence;
///
/// assert!(Confidence::new(0.5).is_some());
/// assert!(Confidence::new(1.5).is_none());
///
/// let conf = Confidence::saturating(1.5);
/// assert_eq!(conf.get(), 1.0);
/// assert_eq!(Confidence::new(0.856).unwrap().to_string(), "85.6%");
/// ```
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// The minimum valid confidence value.
    pub const MIN: Self = Self(0.0);

    /// The maximum valid confidence value.
    pub const MAX: Self = Self(1.0);

    /// Create a confidence score, returning `None` if out of range.
    #[must_use]
    #[inline]
    pub fn new(value: f64) -> Option<Self> {
        if (0.0..=1.0).contains(&value) && !value.is_nan() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a confidence score, clamping to [0.0, 1.0].
    ///
    /// NaN is treated as 0.0.
    #[must_use]
    #[inline]
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Get the inner value (guaranteed to be in [0.0, 1.0]).
    #[must_use]
    #[inline]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Convert to percentage (0-100).
    #[must_use]
    #[inline]
    pub fn as_percent(self) -> f64 {
        self.0 * 100.0
    }

    /// The larger of two scores.
    ///
    /// Total because the inner value is never NaN.
    #[must_use]
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }
}

impl fmt::Debug for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Confidence({:.4})", self.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.as_percent())
    }
}

/// Error when trying to create a Confidence from an invalid value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceError {
    /// The invalid value that was provided.
    pub value: f64,
}

impl fmt::Display for ConfidenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "confidence value {} is outside valid range [0.0, 1.0]",
            self.value
        )
    }
}

impl std::error::Error for ConfidenceError {}

impl TryFrom<f64> for Confidence {
    type Error = ConfidenceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ConfidenceError { value })
    }
}

impl From<Confidence> for f64 {
    #[inline]
    fn from(conf: Confidence) -> Self {
        conf.0
    }
}

impl PartialEq<f64> for Confidence {
    fn eq(&self, other: &f64) -> bool {
        (self.0 - other).abs() < f64::EPSILON
    }
}

impl PartialOrd<f64> for Confidence {
    fn partial_cmp(&self, other: &f64) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        assert!(Confidence::new(0.0).is_some());
        assert!(Confidence::new(0.5).is_some());
        assert!(Confidence::new(1.0).is_some());
    }

    #[test]
    fn new_invalid() {
        assert!(Confidence::new(-0.1).is_none());
        assert!(Confidence::new(1.1).is_none());
        assert!(Confidence::new(f64::NAN).is_none());
        assert!(Confidence::new(f64::INFINITY).is_none());
    }

    #[test]
    fn saturating_clamps() {
        assert_eq!(Confidence::saturating(0.5).get(), 0.5);
        assert_eq!(Confidence::saturating(-1.0).get(), 0.0);
        assert_eq!(Confidence::saturating(2.0).get(), 1.0);
        assert_eq!(Confidence::saturating(f64::NAN).get(), 0.0);
    }

    #[test]
    fn max_picks_larger() {
        let a = Confidence::new(0.3).unwrap();
        let b = Confidence::new(0.8).unwrap();
        assert_eq!(a.max(b), b);
        assert_eq!(b.max(a), b);
        assert_eq!(a.max(a), a);
    }

    #[test]
    fn try_from_f64() {
        let ok: Result<Confidence, _> = 0.5_f64.try_into();
        assert!(ok.is_ok());

        let err: Result<Confidence, _> = 1.5_f64.try_into();
        assert_eq!(err, Err(ConfidenceError { value: 1.5 }));
    }

    #[test]
    fn display_is_one_decimal_percent() {
        assert_eq!(Confidence::new(0.856).unwrap().to_string(), "85.6%");
        assert_eq!(Confidence::MAX.to_string(), "100.0%");
        assert_eq!(Confidence::MIN.to_string(), "0.0%");
    }

    #[test]
    fn serde_uses_plain_number() {
        let conf = Confidence::new(0.85).unwrap();
        let json = serde_json::to_string(&conf).unwrap();
        assert_eq!(json, "0.85");
        let restored: Confidence = serde_json::from_str(&json).unwrap();
        assert!((restored.get() - 0.85).abs() < 1e-10);
    }

    #[test]
    fn deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Confidence>("1.5").is_err());
        assert!(serde_json::from_str::<Confidence>("-0.2").is_err());

        let err = serde_json::from_str::<Confidence>("1.5").unwrap_err();
        assert!(err.to_string().contains("outside valid range"));
    }

    #[test]
    fn as_percent_scales() {
        assert!((Confidence::new(0.25).unwrap().as_percent() - 25.0).abs() < 1e-10);
    }
}
