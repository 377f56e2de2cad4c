use furrow_core::error::{FurrowError, Result};
use furrow_core::models::GpsFix;

/// Shorter-arc difference between two compass headings, in degrees.
///
/// Headings live on a 0-360 circle, so the gap between 350 and 10 is 20.
/// Plain subtraction reports 340 there and misfires near north.
pub fn circular_delta_deg(a: f64, b: f64) -> f64 {
    let diff = (b - a).rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Per-fix gate for accuracy and, during auto capture, heading change
#[derive(Debug, Clone)]
pub struct FixFilter {
    accuracy_limit_m: f64,
    heading_delta_deg: f64,
    previous_heading: Option<f64>,
}

impl FixFilter {
    /// Create a filter with the given accuracy limit and turn threshold
    pub fn new(accuracy_limit_m: f64, heading_delta_deg: f64) -> Self {
        Self { accuracy_limit_m, heading_delta_deg, previous_heading: None }
    }

    /// Whether the fix passes the accuracy gate
    pub fn accuracy_ok(&self, fix: &GpsFix) -> bool {
        fix.accuracy_m <= self.accuracy_limit_m
    }

    /// One-off accuracy check for manually tapped points
    pub fn check_accuracy(&self, fix: &GpsFix) -> Result<()> {
        if self.accuracy_ok(fix) {
            Ok(())
        } else {
            Err(FurrowError::GpsUnreliable {
                accuracy_m: fix.accuracy_m,
                limit_m: self.accuracy_limit_m,
            })
        }
    }

    /// Auto-capture gate: decide whether a fix marks a boundary corner.
    ///
    /// Inaccurate fixes and fixes without a heading are dropped without
    /// touching the heading memory. The first accepted fix always passes;
    /// after that a fix only counts as a corner once the heading has swung
    /// past the threshold since the last accepted corner.
    pub fn accept_auto(&mut self, fix: &GpsFix) -> bool {
        if !self.accuracy_ok(fix) {
            tracing::debug!(accuracy_m = fix.accuracy_m, "Fix dropped: accuracy beyond limit");
            return false;
        }

        let heading = match fix.heading_deg {
            Some(h) => h,
            None => {
                tracing::debug!("Fix dropped: no heading");
                return false;
            }
        };

        let accepted = match self.previous_heading {
            None => true,
            Some(previous) => circular_delta_deg(previous, heading) > self.heading_delta_deg,
        };

        if accepted {
            self.previous_heading = Some(heading);
        }

        accepted
    }

    /// Forget the previous heading when a new capture run begins
    pub fn reset(&mut self) {
        self.previous_heading = None;
    }
}

impl Default for FixFilter {
    fn default() -> Self {
        Self::new(12.0, 30.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(accuracy_m: f64, heading_deg: Option<f64>) -> GpsFix {
        GpsFix {
            latitude: 20.011,
            longitude: 73.790,
            accuracy_m,
            heading_deg,
            timestamp_ms: 0,
        }
    }

    #[test]
    fn test_circular_delta() {
        assert_eq!(circular_delta_deg(90.0, 90.0), 0.0);
        assert_eq!(circular_delta_deg(0.0, 180.0), 180.0);
        assert_eq!(circular_delta_deg(0.0, 359.0), 1.0);
        assert_eq!(circular_delta_deg(350.0, 10.0), 20.0);
        assert_eq!(circular_delta_deg(10.0, 350.0), 20.0);
    }

    #[test]
    fn test_check_accuracy() {
        let filter = FixFilter::default();

        assert!(filter.check_accuracy(&fix(5.0, None)).is_ok());
        assert!(filter.check_accuracy(&fix(12.0, None)).is_ok());

        let err = filter.check_accuracy(&fix(25.0, None)).unwrap_err();
        assert!(matches!(err, FurrowError::GpsUnreliable { .. }));
    }

    #[test]
    fn test_first_accurate_fix_accepted() {
        let mut filter = FixFilter::default();
        assert!(filter.accept_auto(&fix(5.0, Some(0.0))));
    }

    #[test]
    fn test_straight_run_emits_no_corners() {
        let mut filter = FixFilter::default();

        assert!(filter.accept_auto(&fix(5.0, Some(0.0))));
        assert!(!filter.accept_auto(&fix(5.0, Some(5.0))));
        assert!(!filter.accept_auto(&fix(5.0, Some(29.0))));
        // The turn finally exceeds the threshold
        assert!(filter.accept_auto(&fix(5.0, Some(45.0))));
    }

    #[test]
    fn test_heading_wrap_does_not_fake_a_turn() {
        let mut filter = FixFilter::default();

        assert!(filter.accept_auto(&fix(5.0, Some(350.0))));
        // 350 to 10 is a 20 degree swing on the circle; naive subtraction
        // would call it 340 and wrongly emit a corner
        assert!(!filter.accept_auto(&fix(5.0, Some(10.0))));
    }

    #[test]
    fn test_heading_wrap_other_direction() {
        let mut filter = FixFilter::default();

        assert!(filter.accept_auto(&fix(5.0, Some(10.0))));
        assert!(!filter.accept_auto(&fix(5.0, Some(350.0))));
        // A genuine turn across north still registers
        assert!(filter.accept_auto(&fix(5.0, Some(300.0))));
    }

    #[test]
    fn test_dropped_fixes_leave_heading_memory_alone() {
        let mut filter = FixFilter::default();

        assert!(filter.accept_auto(&fix(5.0, Some(0.0))));
        // Inaccurate and heading-less fixes are discarded outright
        assert!(!filter.accept_auto(&fix(50.0, Some(90.0))));
        assert!(!filter.accept_auto(&fix(5.0, None)));
        // The comparison base is still the last accepted heading
        assert!(!filter.accept_auto(&fix(5.0, Some(20.0))));
        assert!(filter.accept_auto(&fix(5.0, Some(40.0))));
    }

    #[test]
    fn test_reset_forgets_heading() {
        let mut filter = FixFilter::default();

        assert!(filter.accept_auto(&fix(5.0, Some(0.0))));
        assert!(!filter.accept_auto(&fix(5.0, Some(10.0))));

        filter.reset();

        // After reset the next accurate fix is a first fix again
        assert!(filter.accept_auto(&fix(5.0, Some(10.0))));
    }
}
