use pci_core::models::{CurveError, Point};

/// Linearly interpolate `y` at `x` along a curve given by its points.
///
/// Queries left of the first point return the first `y`, and queries right of the
/// last point return the last `y`. An `x` that coincides with a table entry returns
/// that entry's `y` exactly.
///
/// # Errors
///
/// Returns a `CurveError` if there are fewer than two points, if the `x` values
/// are not strictly increasing, or if `x` is NaN.
pub fn interpolate(points: &[Point], x: f64) -> Result<f64, CurveError> {
    if points.len() < 2 {
        return Err(CurveError::TooFewPoints(points.len()));
    }
    if points.windows(2).any(|pair| !(pair[0].x < pair[1].x)) {
        return Err(CurveError::NonIncreasing);
    }
    if x.is_nan() {
        return Err(CurveError::NaN);
    }

    let first = &points[0];
    let last = &points[points.len() - 1];
    if x <= first.x {
        return Ok(first.y);
    }
    if x >= last.x {
        return Ok(last.y);
    }

    // first.x < x < last.x, so the upper bracket lies in 1..len-1
    let upper = points.partition_point(|point| point.x <= x);
    let (a, b) = (&points[upper - 1], &points[upper]);
    Ok(a.y + (x - a.x) * (b.y - a.y) / (b.x - a.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn pts(pairs: &[(f64, f64)]) -> Vec<Point> {
        pairs.iter().copied().map(Point::from).collect()
    }

    #[fixture]
    fn alligator_low() -> Vec<Point> {
        pts(&[
            (0.0, 0.0),
            (1.0, 6.0),
            (5.0, 18.0),
            (10.0, 26.0),
            (20.0, 34.0),
            (50.0, 44.0),
            (100.0, 52.0),
        ])
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(1.0, 6.0)]
    #[case(5.0, 18.0)]
    #[case(50.0, 44.0)]
    #[case(100.0, 52.0)]
    fn exact_table_hits(alligator_low: Vec<Point>, #[case] x: f64, #[case] y: f64) {
        assert_eq!(interpolate(&alligator_low, x).unwrap(), y);
    }

    #[rstest]
    fn interior_segments(alligator_low: Vec<Point>) {
        assert_eq!(interpolate(&alligator_low, 3.0).unwrap(), 12.0);
        assert_eq!(interpolate(&alligator_low, 15.0).unwrap(), 30.0);
        assert_eq!(interpolate(&alligator_low, 75.0).unwrap(), 48.0);
    }

    #[rstest]
    fn clamps_out_of_range(alligator_low: Vec<Point>) {
        let shifted = pts(&[(2.0, 5.0), (4.0, 9.0)]);
        assert_eq!(interpolate(&shifted, 0.0).unwrap(), 5.0);
        assert_eq!(interpolate(&alligator_low, 250.0).unwrap(), 52.0);
        assert_eq!(interpolate(&alligator_low, f64::INFINITY).unwrap(), 52.0);
    }

    #[rstest]
    fn monotone_curves_interpolate_monotonically(alligator_low: Vec<Point>) {
        let mut prev = f64::NEG_INFINITY;
        for step in 0..=1200 {
            let x = step as f64 * 0.1 - 5.0;
            let y = interpolate(&alligator_low, x).unwrap();
            assert!(y >= prev, "decrease at x = {x}: {prev} -> {y}");
            prev = y;
        }
    }

    #[test]
    fn rejects_malformed_curves() {
        assert_eq!(
            interpolate(&[], 1.0).unwrap_err(),
            CurveError::TooFewPoints(0)
        );
        assert_eq!(
            interpolate(&pts(&[(0.0, 0.0)]), 1.0).unwrap_err(),
            CurveError::TooFewPoints(1)
        );
        assert_eq!(
            interpolate(&pts(&[(0.0, 0.0), (2.0, 1.0), (2.0, 3.0)]), 1.0).unwrap_err(),
            CurveError::NonIncreasing
        );
        assert_eq!(
            interpolate(&pts(&[(0.0, 0.0), (2.0, 1.0), (1.0, 3.0)]), 1.0).unwrap_err(),
            CurveError::NonIncreasing
        );
    }

    #[rstest]
    fn rejects_nan_queries(alligator_low: Vec<Point>) {
        assert_eq!(
            interpolate(&alligator_low, f64::NAN).unwrap_err(),
            CurveError::NaN
        );
    }
}
