use std::f32::consts::TAU;

/// Canonical angle range is `[0, TAU)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let normalized = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if normalized >= TAU { 0.0 } else { normalized }
}

/// Signed difference `end - start` of minimum magnitude on the circular domain
/// `[lower, upper)`, scaled by `percent`. The unscaled magnitude never exceeds
/// half the domain.
pub fn interpolate_delta_with_wrapping(
    start: f32,
    end: f32,
    percent: f32,
    lower: f32,
    upper: f32,
) -> f32 {
    let span = upper - lower;
    let mut delta = (end - start).rem_euclid(span);
    if delta > span / 2.0 {
        delta -= span;
    }
    delta * percent
}

/// Result is always inside `[lower, upper)`, even when `start` is not.
pub fn interpolate_with_wrapping(
    start: f32,
    end: f32,
    percent: f32,
    lower: f32,
    upper: f32,
) -> f32 {
    let span = upper - lower;
    let value = start + interpolate_delta_with_wrapping(start, end, percent, lower, upper);
    let wrapped = lower + (value - lower).rem_euclid(span);
    if wrapped >= upper { lower } else { wrapped }
}

pub fn shortest_angular_delta(from: f32, to: f32) -> f32 {
    interpolate_delta_with_wrapping(from, to, 1.0, 0.0, TAU)
}
