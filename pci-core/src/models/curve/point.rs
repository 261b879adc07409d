/// A vertex of a piecewise-linear curve
///
/// For deduct curves `x` is the distress density (percent) and `y` the deduct value;
/// for CDV curves `x` is the total deduct value and `y` the corrected deduct value.
///
/// When deserializing, a point may be written either as an `[x, y]` pair or as
/// an object `{ "x": .., "y": .. }`; it always serializes as an object.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(inline))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    /// The independent coordinate
    pub x: f64,
    /// The dependent coordinate
    pub y: f64,
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PointFields {
    x: f64,
    y: f64,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Point {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_untagged::UntaggedEnumVisitor::new()
            .seq(|seq| seq.deserialize::<(f64, f64)>().map(Point::from))
            .map(|map| {
                map.deserialize::<PointFields>()
                    .map(|PointFields { x, y }| Point { x, y })
            })
            .deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_pair() {
        let point = serde_json::from_str::<Point>("[5.0, 18.0]").unwrap();
        assert_eq!(point, Point { x: 5.0, y: 18.0 });
    }

    #[test]
    fn test_deserialize_object() {
        let point = serde_json::from_str::<Point>(r#"{ "x": 0.5, "y": 32 }"#).unwrap();
        assert_eq!(point, Point { x: 0.5, y: 32.0 });
    }

    #[test]
    fn test_deserialize_garbage() {
        assert!(serde_json::from_str::<Point>("[1.0]").is_err());
        assert!(serde_json::from_str::<Point>(r#""1,2""#).is_err());
    }
}
