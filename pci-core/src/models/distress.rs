use super::ObservationError;
use std::{fmt, str::FromStr};

/// The unit a distress quantity is measured in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Unit {
    /// Square feet of affected surface
    Area,
    /// Linear feet of affected surface
    Length,
    /// Number of discrete occurrences
    Count,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Area => "area",
            Self::Length => "length",
            Self::Count => "count",
        })
    }
}

/// The severity level of an observed distress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Low severity
    #[cfg_attr(feature = "serde", serde(rename = "L"))]
    Low,
    /// Medium severity
    #[cfg_attr(feature = "serde", serde(rename = "M"))]
    Medium,
    /// High severity
    #[cfg_attr(feature = "serde", serde(rename = "H"))]
    High,
}

impl Severity {
    /// Every severity level, in ascending order
    pub const ALL: [Severity; 3] = [Self::Low, Self::Medium, Self::High];

    /// The single-letter survey code for this severity
    pub const fn code(self) -> char {
        match self {
            Self::Low => 'L',
            Self::Medium => 'M',
            Self::High => 'H',
        }
    }

    /// A dense index in `0..3`, used for table lookups
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Severity {
    type Err = ObservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(Self::Low),
            "m" | "medium" => Ok(Self::Medium),
            "h" | "high" => Ok(Self::High),
            _ => Err(ObservationError::UnknownSeverity(s.to_owned())),
        }
    }
}

/// The ASTM D6433 catalog of asphalt pavement distresses.
///
/// The catalog is closed: each variant carries its survey identifier (1 through 19)
/// as its discriminant, and its name, measurement unit and severity applicability
/// are fixed. On the wire a distress is represented by its identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
#[repr(u8)]
pub enum DistressType {
    /// Alligator (fatigue) cracking
    AlligatorCracking = 1,
    /// Bleeding
    Bleeding = 2,
    /// Block cracking
    BlockCracking = 3,
    /// Bumps and sags
    BumpsAndSags = 4,
    /// Corrugation
    Corrugation = 5,
    /// Depression
    Depression = 6,
    /// Edge cracking
    EdgeCracking = 7,
    /// Joint reflection cracking
    JointReflectionCracking = 8,
    /// Lane/shoulder drop-off
    LaneShoulderDropOff = 9,
    /// Longitudinal and transverse cracking
    LongitudinalTransverseCracking = 10,
    /// Patching and utility cut patching
    Patching = 11,
    /// Polished aggregate (no severity levels)
    PolishedAggregate = 12,
    /// Potholes
    Potholes = 13,
    /// Railroad crossing
    RailroadCrossing = 14,
    /// Rutting
    Rutting = 15,
    /// Shoving
    Shoving = 16,
    /// Slippage cracking
    SlippageCracking = 17,
    /// Swell
    Swell = 18,
    /// Weathering and raveling
    WeatheringRaveling = 19,
}

impl DistressType {
    /// Every distress in the catalog, ordered by identifier
    pub const ALL: [DistressType; 19] = [
        Self::AlligatorCracking,
        Self::Bleeding,
        Self::BlockCracking,
        Self::BumpsAndSags,
        Self::Corrugation,
        Self::Depression,
        Self::EdgeCracking,
        Self::JointReflectionCracking,
        Self::LaneShoulderDropOff,
        Self::LongitudinalTransverseCracking,
        Self::Patching,
        Self::PolishedAggregate,
        Self::Potholes,
        Self::RailroadCrossing,
        Self::Rutting,
        Self::Shoving,
        Self::SlippageCracking,
        Self::Swell,
        Self::WeatheringRaveling,
    ];

    /// The survey identifier of the distress
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// The display name of the distress
    pub const fn name(self) -> &'static str {
        match self {
            Self::AlligatorCracking => "Alligator Cracking",
            Self::Bleeding => "Bleeding",
            Self::BlockCracking => "Block Cracking",
            Self::BumpsAndSags => "Bumps and Sags",
            Self::Corrugation => "Corrugation",
            Self::Depression => "Depression",
            Self::EdgeCracking => "Edge Cracking",
            Self::JointReflectionCracking => "Joint Reflection Cracking",
            Self::LaneShoulderDropOff => "Lane/Shoulder Drop-off",
            Self::LongitudinalTransverseCracking => "Longitudinal & Transverse Cracking",
            Self::Patching => "Patching and Utility Cut Patching",
            Self::PolishedAggregate => "Polished Aggregate",
            Self::Potholes => "Potholes",
            Self::RailroadCrossing => "Railroad Crossing",
            Self::Rutting => "Rutting",
            Self::Shoving => "Shoving",
            Self::SlippageCracking => "Slippage Cracking",
            Self::Swell => "Swell",
            Self::WeatheringRaveling => "Weathering/Raveling",
        }
    }

    /// The unit the raw magnitude of this distress is measured in
    pub const fn unit(self) -> Unit {
        match self {
            Self::BumpsAndSags
            | Self::EdgeCracking
            | Self::JointReflectionCracking
            | Self::LaneShoulderDropOff
            | Self::LongitudinalTransverseCracking => Unit::Length,
            Self::Potholes => Unit::Count,
            _ => Unit::Area,
        }
    }

    /// Whether observations of this distress are graded Low/Medium/High
    pub const fn has_severity(self) -> bool {
        !matches!(self, Self::PolishedAggregate)
    }

    /// Look up a distress by its survey identifier
    pub fn from_id(id: u8) -> Result<Self, ObservationError> {
        id.checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx as usize))
            .copied()
            .ok_or(ObservationError::UnknownDistress(id))
    }

    /// Look up a distress by a case-insensitive fragment of its name.
    ///
    /// The first catalog entry (in identifier order) containing the fragment wins.
    pub fn from_name(name: &str) -> Result<Self, ObservationError> {
        let needle = name.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|distress| distress.name().to_lowercase().contains(&needle))
            .ok_or_else(|| ObservationError::UnknownDistressName(name.to_owned()))
    }
}

impl fmt::Display for DistressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for DistressType {
    type Error = ObservationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_id(value)
    }
}

impl From<DistressType> for u8 {
    fn from(value: DistressType) -> Self {
        value.id()
    }
}
