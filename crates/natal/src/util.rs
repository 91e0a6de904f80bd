//! Angle helpers shared by the chart builder and the classifiers.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Forward arc from `a` to `b` in degrees, in [0, 360).
pub fn arc_forward(a: f64, b: f64) -> f64 {
    normalize_360(b - a)
}

/// Shortest angular separation between two longitudes, in [0, 180].
pub fn separation(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    d.min(360.0 - d)
}

/// Round to two decimals, the precision used for reported orbs.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
