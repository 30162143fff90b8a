//! 3-point piecewise-linear curve mapping.
//!
//! A [`Curve`] holds three control values hit at normalized input
//! `t = 0.0`, `t = 0.5` and `t = 1.0`. [`map_range`] normalizes an
//! arbitrary scalar into that range and evaluates the curve, which is
//! the driving primitive behind every animated field in this crate.

/// An ordered (start, mid, end) triple of control values.
///
/// The curve is evaluated as two linear segments meeting at the
/// midpoint, so it is continuous but generally not smooth there.
/// Curves are plain configuration data and immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve(pub [f32; 3]);

impl Curve {
    /// Creates a curve from its three control values.
    pub const fn new(start: f32, mid: f32, end: f32) -> Self {
        Self([start, mid, end])
    }

    /// Control value at `t = 0.0`.
    pub const fn start(&self) -> f32 {
        self.0[0]
    }

    /// Control value at `t = 0.5`.
    pub const fn mid(&self) -> f32 {
        self.0[1]
    }

    /// Control value at `t = 1.0`.
    pub const fn end(&self) -> f32 {
        self.0[2]
    }
}

impl From<[f32; 3]> for Curve {
    fn from(values: [f32; 3]) -> Self {
        Self(values)
    }
}

/// Linear interpolation between `a` and `b` by factor `f`.
pub fn lerp(a: f32, b: f32, f: f32) -> f32 {
    a + (b - a) * f
}

/// Maps `value` from the input range `[in_min, in_max]` through a
/// 3-point curve.
///
/// The input is clamp-normalized to `t` in `[0, 1]`, so values outside
/// the range saturate at the curve endpoints. `t <= 0.5` interpolates
/// the first segment, the rest interpolates the second.
///
/// Callers must supply distinct bounds: `in_min == in_max` divides by
/// zero. This is a precondition, not a runtime-checked error.
pub fn map_range(value: f32, in_min: f32, in_max: f32, curve: Curve) -> f32 {
    let t = ((value - in_min) / (in_max - in_min)).clamp(0.0, 1.0);
    if t <= 0.5 {
        lerp(curve.start(), curve.mid(), t / 0.5)
    } else {
        lerp(curve.mid(), curve.end(), (t - 0.5) / 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
        assert_eq!(lerp(-4.0, 4.0, 0.25), -2.0);
    }

    #[test]
    fn map_range_hits_control_points() {
        let curve = Curve::new(-15.0, 0.0, 10.0);
        assert_eq!(map_range(0.0, 0.0, 1.0, curve), -15.0);
        assert_eq!(map_range(0.5, 0.0, 1.0, curve), 0.0);
        assert_eq!(map_range(1.0, 0.0, 1.0, curve), 10.0);
    }

    #[test]
    fn map_range_hits_control_points_with_offset_bounds() {
        let curve = Curve::new(20.0, 0.0, -20.0);
        assert_eq!(map_range(-0.5, -0.5, 1.5, curve), 20.0);
        assert_eq!(map_range(0.5, -0.5, 1.5, curve), 0.0);
        assert_eq!(map_range(1.5, -0.5, 1.5, curve), -20.0);
    }

    #[test]
    fn map_range_is_continuous_at_the_breakpoint() {
        let curve = Curve::new(0.7, 1.0, 0.85);
        let just_below = map_range(0.5 - 1e-4, 0.0, 1.0, curve);
        let just_above = map_range(0.5 + 1e-4, 0.0, 1.0, curve);
        assert!((just_below - curve.mid()).abs() < 1e-3);
        assert!((just_above - curve.mid()).abs() < 1e-3);
    }

    #[test]
    fn map_range_saturates_outside_the_input_range() {
        let curve = Curve::new(-200.0, 0.0, -100.0);
        let at_min = map_range(-0.5, -0.5, 1.5, curve);
        let at_max = map_range(1.5, -0.5, 1.5, curve);
        assert_eq!(map_range(-7.0, -0.5, 1.5, curve), at_min);
        assert_eq!(map_range(42.0, -0.5, 1.5, curve), at_max);
    }

    #[test]
    fn map_range_interpolates_within_segments() {
        let curve = Curve::new(0.0, 0.0, 10.0);
        // t = 0.75 sits halfway through the second segment.
        assert_eq!(map_range(1.0, -0.5, 1.5, curve), 5.0);
        // t = 0.25 sits halfway through the first segment.
        let curve = Curve::new(-15.0, 0.0, 10.0);
        assert_eq!(map_range(0.0, -0.5, 1.5, curve), -7.5);
    }
}
