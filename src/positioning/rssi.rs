//! RSSI signal math.
//!
//! Converts observed signal strengths into relative weights and distance
//! estimates, and solves the three-circle trilateration system. Numeric
//! degeneracies are reported as `None`/fallback values, never as errors.

use crate::geo::Point;

/// Path-loss exponent for the log-distance model. 2.0 models free-space
/// propagation.
pub const PATH_LOSS_EXPONENT: f64 = 2.0;

/// Determinant magnitude below which the trilateration system is treated
/// as singular.
const SINGULAR_EPS: f64 = 1e-6;

/// Relative weight of a signal observation.
///
/// `10^((100 + rssi) / 40)`: monotonically larger for stronger
/// (less negative) RSSI, and 1.0 at −100 dBm.
pub fn signal_weight(rssi: i32) -> f64 {
    10f64.powf((100.0 + f64::from(rssi)) / 40.0)
}

/// Estimated distance to a beacon under the log-distance path-loss model.
///
/// `tx_power` is the expected RSSI at 1 m; an observation equal to it
/// therefore estimates exactly 1 m.
pub fn path_loss_distance(rssi: i32, tx_power: f64) -> f64 {
    10f64.powf((tx_power - f64::from(rssi)) / (10.0 * PATH_LOSS_EXPONENT))
}

/// RSSI-weighted centroid of beacon positions.
///
/// A numerically zero total weight falls back to the unweighted mean.
/// `samples` must be non-empty.
pub fn weighted_centroid(samples: &[(Point, i32)]) -> Point {
    debug_assert!(!samples.is_empty());

    let mut total = 0.0;
    let mut x = 0.0;
    let mut y = 0.0;
    for &(position, rssi) in samples {
        let weight = signal_weight(rssi);
        x += position.x * weight;
        y += position.y * weight;
        total += weight;
    }

    if total == 0.0 {
        let n = samples.len() as f64;
        let sx: f64 = samples.iter().map(|(p, _)| p.x).sum();
        let sy: f64 = samples.iter().map(|(p, _)| p.y).sum();
        return Point::new(sx / n, sy / n);
    }
    Point::new(x / total, y / total)
}

/// Solve for the point at the given distances from three reference points.
///
/// Subtracting the first circle's equation from the second's and third's
/// linearizes the system into two equations in (x, y), solved by Cramer's
/// rule. Returns `None` when the references are collinear or coincident
/// (near-singular system) or the solution is non-finite.
pub fn trilaterate(circles: [(Point, f64); 3]) -> Option<Point> {
    let [(p1, d1), (p2, d2), (p3, d3)] = circles;

    let a = 2.0 * (p2.x - p1.x);
    let b = 2.0 * (p2.y - p1.y);
    let c = d1 * d1 - d2 * d2 - p1.x * p1.x + p2.x * p2.x - p1.y * p1.y + p2.y * p2.y;
    let d = 2.0 * (p3.x - p1.x);
    let e = 2.0 * (p3.y - p1.y);
    let f = d1 * d1 - d3 * d3 - p1.x * p1.x + p3.x * p3.x - p1.y * p1.y + p3.y * p3.y;

    let det = a * e - b * d;
    if det.abs() < SINGULAR_EPS {
        return None;
    }

    let x = (c * e - b * f) / det;
    let y = (a * f - c * d) / det;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_signal_weight_monotone_in_strength() {
        assert!(signal_weight(-50) > signal_weight(-60));
        assert!(signal_weight(-60) > signal_weight(-75));
        assert_close(signal_weight(-100), 1.0, 1e-12);
    }

    #[test]
    fn test_path_loss_distance_at_reference() {
        // Observation equal to txPower means 1 m.
        assert_close(path_loss_distance(-59, -59.0), 1.0, 1e-12);
        // 20 dB below txPower at n = 2 means 10 m.
        assert_close(path_loss_distance(-79, -59.0), 10.0, 1e-9);
    }

    #[test]
    fn test_weighted_centroid_leans_toward_stronger_beacon() {
        let samples = [
            (Point::new(0.0, 0.0), -50),
            (Point::new(10.0, 0.0), -70),
        ];
        let centroid = weighted_centroid(&samples);
        assert!(centroid.x < 5.0);
        assert!(centroid.x > 0.0);
        assert_eq!(centroid.y, 0.0);
    }

    #[test]
    fn test_weighted_centroid_equal_signals_is_midpoint() {
        let samples = [
            (Point::new(0.0, 0.0), -60),
            (Point::new(10.0, 4.0), -60),
        ];
        let centroid = weighted_centroid(&samples);
        assert_close(centroid.x, 5.0, 1e-9);
        assert_close(centroid.y, 2.0, 1e-9);
    }

    #[test]
    fn test_trilaterate_exact_interior_point() {
        // Distances measured from (5, 3) to each reference.
        let target = Point::new(5.0, 3.0);
        let refs = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ];
        let circles = refs.map(|r| (r, r.distance(target)));

        let solved = trilaterate(circles).unwrap();
        assert_close(solved.x, 5.0, 1e-3);
        assert_close(solved.y, 3.0, 1e-3);
    }

    #[test]
    fn test_trilaterate_collinear_references_is_singular() {
        let circles = [
            (Point::new(0.0, 0.0), 5.0),
            (Point::new(5.0, 0.0), 5.0),
            (Point::new(10.0, 0.0), 5.0),
        ];
        assert!(trilaterate(circles).is_none());
    }

    #[test]
    fn test_trilaterate_coincident_references_is_singular() {
        let p = Point::new(3.0, 3.0);
        assert!(trilaterate([(p, 1.0), (p, 2.0), (p, 3.0)]).is_none());
    }
}
