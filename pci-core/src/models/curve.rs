mod point;
pub use point::Point;

/// Upper bound on deduct and corrected deduct values
const MAX_VALUE: f64 = 100.0;

/// A validated piecewise-linear curve, as digitized from an ASTM D6433 figure
///
/// Deduct-value and corrected-deduct-value curves share this representation.
/// A curve must satisfy:
/// - At least two points
/// - Finite coordinates
/// - Strictly increasing, non-negative `x`
/// - `y` within [0, 100]
///
/// Curves are immutable once constructed, so a calculation may share them freely.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "CurveDto", into = "CurveDto")
)]
pub struct Curve(Vec<Point>);

impl Curve {
    /// Creates a new Curve from a vector of points, validating all constraints
    pub fn new(points: Vec<Point>) -> Result<Self, CurveError> {
        Self::try_from(CurveDto(points))
    }

    /// Creates a new Curve from `(x, y)` pairs, validating all constraints
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Result<Self, CurveError> {
        Self::new(pairs.into_iter().map(Point::from).collect())
    }

    /// Returns the `x` range spanned by the curve's points
    pub fn domain(&self) -> (f64, f64) {
        // validation guarantees at least two points
        (self.0[0].x, self.0[self.0.len() - 1].x)
    }

    /// Borrows the points of the curve, ordered by increasing `x`
    pub fn points(&self) -> &[Point] {
        &self.0
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug)]
pub struct CurveDto(pub Vec<Point>);

impl From<Curve> for CurveDto {
    fn from(value: Curve) -> Self {
        CurveDto(value.0)
    }
}

impl TryFrom<CurveDto> for Curve {
    type Error = CurveError;

    /// Attempts to create a Curve from a DTO, validating all constraints
    fn try_from(value: CurveDto) -> Result<Self, Self::Error> {
        let points = value.0;
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints(points.len()));
        }

        let mut prev: Option<&Point> = None;
        for point in points.iter() {
            if point.x.is_nan() || point.y.is_nan() {
                return Err(CurveError::NaN);
            }
            if point.x.is_infinite() || point.y.is_infinite() {
                return Err(CurveError::Infinity);
            }
            if point.x < 0.0 {
                return Err(CurveError::NegativeX(point.x));
            }
            if !(0.0..=MAX_VALUE).contains(&point.y) {
                return Err(CurveError::OutOfRange(point.y));
            }
            if prev.is_some_and(|prev| prev.x >= point.x) {
                return Err(CurveError::NonIncreasing);
            }
            prev = Some(point);
        }

        Ok(Self(points))
    }
}

/// Errors that can occur when creating or validating a Curve
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CurveError {
    /// Error when the curve cannot span a segment
    #[error("Need at least 2 points for interpolation, got {0}")]
    TooFewPoints(usize),
    /// Error when any coordinate value is NaN
    #[error("NaN value encountered")]
    NaN,
    /// Error when a point has an infinite coordinate
    #[error("Coordinates cannot be infinite")]
    Infinity,
    /// Error when points are not ordered by strictly ascending x
    #[error("X values must be strictly increasing")]
    NonIncreasing,
    /// Error when a point lies left of the origin
    #[error("X values cannot be negative, got {0}")]
    NegativeX(f64),
    /// Error when a deduct value lies outside [0, 100]
    #[error("Y values must lie within [0, 100], got {0}")]
    OutOfRange(f64),
}
