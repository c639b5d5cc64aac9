//! Optional inclusive bounds on the stepper value.

/// Optional inclusive lower/upper bounds. An unset side is unconstrained.
/// When both sides are set the caller contract requires `min <= max`;
/// [`Limits::is_ordered`] checks it at configuration time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Limits {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Limits {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// True if `max` is unset or `candidate <= max`.
    #[inline]
    pub fn contains_for_max(&self, candidate: f64) -> bool {
        self.max.is_none_or(|limit| candidate <= limit)
    }

    /// True if `min` is unset or `candidate >= min`.
    #[inline]
    pub fn contains_for_min(&self, candidate: f64) -> bool {
        self.min.is_none_or(|limit| candidate >= limit)
    }

    /// Lower anchor for step alignment: `min` when set, otherwise 0.
    #[inline]
    pub fn anchor(&self) -> f64 {
        self.min.unwrap_or(0.0)
    }

    /// False only when both sides are set and `min > max`.
    pub fn is_ordered(&self) -> bool {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => lo <= hi,
            _ => true,
        }
    }

    /// True when both sides are finite (or unset).
    pub fn is_finite(&self) -> bool {
        self.min.is_none_or(f64::is_finite) && self.max.is_none_or(f64::is_finite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_sides_accept_everything() {
        let limits = Limits::unbounded();
        assert!(limits.contains_for_max(f64::MAX));
        assert!(limits.contains_for_min(f64::MIN));
    }

    #[test]
    fn bounds_are_inclusive() {
        let limits = Limits::new(Some(0.0), Some(200.0));
        assert!(limits.contains_for_max(200.0));
        assert!(!limits.contains_for_max(200.0001));
        assert!(limits.contains_for_min(0.0));
        assert!(!limits.contains_for_min(-0.0001));
    }

    #[test]
    fn ordering_check() {
        assert!(Limits::new(Some(1.0), Some(1.0)).is_ordered());
        assert!(!Limits::new(Some(2.0), Some(1.0)).is_ordered());
        assert!(Limits::new(Some(2.0), None).is_ordered());
    }

    #[test]
    fn anchor_defaults_to_zero() {
        assert_eq!(Limits::unbounded().anchor(), 0.0);
        assert_eq!(Limits::new(Some(5.0), None).anchor(), 5.0);
    }
}
