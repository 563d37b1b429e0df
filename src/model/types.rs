use std::fmt;

/// The eight metric families produced from every snapshot.
///
/// The order of [`FamilyKind::ALL`] is the order families are mapped and
/// exposed in.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FamilyKind {
    /// Presence indicator carrying device metadata as labels
    HwInfo,
    /// Numeric reading of an internal sensor
    IsensValue,
    /// Status code of an internal sensor
    IsensStatus,
    /// Numeric reading of an external sensor
    EsensValue,
    /// Status code of an external sensor
    EsensStatus,
    /// Open/closed state of a digital input
    DiginpValue,
    /// Status code of a digital input
    DiginpStatus,
    /// Status code of a power supply channel
    PowerStatus,
}

impl FamilyKind {
    pub const ALL: [FamilyKind; 8] = [
        FamilyKind::HwInfo,
        FamilyKind::IsensValue,
        FamilyKind::IsensStatus,
        FamilyKind::EsensValue,
        FamilyKind::EsensStatus,
        FamilyKind::DiginpValue,
        FamilyKind::DiginpStatus,
        FamilyKind::PowerStatus,
    ];

    /// Bare metric name, before any namespace prefix is applied.
    pub fn name(&self) -> &'static str {
        match self {
            FamilyKind::HwInfo => "hw_info",
            FamilyKind::IsensValue => "isens_value",
            FamilyKind::IsensStatus => "isens_status",
            FamilyKind::EsensValue => "esens_value",
            FamilyKind::EsensStatus => "esens_status",
            FamilyKind::DiginpValue => "diginp_value",
            FamilyKind::DiginpStatus => "diginp_status",
            FamilyKind::PowerStatus => "power_status",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            FamilyKind::HwInfo => "Enviromux hardware info, static output of 1.",
            FamilyKind::IsensValue => "Enviromux internal sensor metrics output value.",
            FamilyKind::IsensStatus => "Enviromux internal sensor metrics status code.",
            FamilyKind::EsensValue => "Enviromux external sensor metrics output value.",
            FamilyKind::EsensStatus => "Enviromux external sensor metrics status code.",
            FamilyKind::DiginpValue => {
                "Enviromux digital input value sensor metrics. (0 = Closed, 1 = Open)."
            }
            FamilyKind::DiginpStatus => "Enviromux digital input sensor metrics status code.",
            FamilyKind::PowerStatus => "Enviromux power supply status code",
        }
    }
}

impl fmt::Display for FamilyKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Unit label attached to sensor value records.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Unit {
    /// Degrees Celsius
    Celsius,
    /// Relative humidity
    Percent,
    /// Volts
    Volt,
    /// Internal sensors with no recognised keyword
    Empty,
    /// External sensors with no recognised keyword
    Unknown,
}

impl Unit {
    /// Infers the unit from a sensor description.
    ///
    /// Matching is a case-sensitive substring test and the first keyword
    /// wins: `TEMP`, then `HUMIDITY`, then `VOLT`. Dashboards key on these
    /// labels, so the order must not change.
    pub fn infer(description: &str, fallback: Unit) -> Unit {
        if description.contains("TEMP") {
            Unit::Celsius
        } else if description.contains("HUMIDITY") {
            Unit::Percent
        } else if description.contains("VOLT") {
            Unit::Volt
        } else {
            fallback
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Unit::Celsius => write!(f, "C"),
            Unit::Percent => write!(f, "%"),
            Unit::Volt => write!(f, "V"),
            Unit::Empty => write!(f, ""),
            Unit::Unknown => write!(f, "unknown"),
        }
    }
}

/// Value of the `metric_type` label.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ReadingKind {
    Value,
    Status,
}

impl fmt::Display for ReadingKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadingKind::Value => write!(f, "value"),
            ReadingKind::Status => write!(f, "status"),
        }
    }
}
