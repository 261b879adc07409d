mod curve;
mod distress;
mod observation;
mod sample;
mod section;

pub use curve::{Curve, CurveDto, CurveError, Point};
pub use distress::{DistressType, Severity, Unit};
pub use observation::{Observation, ObservationDto, ObservationError};
pub use sample::{SampleUnit, SampleUnitDto};
pub use section::PavementSection;
