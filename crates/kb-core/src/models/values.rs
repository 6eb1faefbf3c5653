//! Typed statement values.
//!
//! A statement carries at most one typed value; [`TypedValue`] makes that
//! exclusivity part of the type instead of a convention.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::{
    LATITUDE_RANGE, LONGITUDE_RANGE, QUANTITY_DECIMAL_PLACES, QUANTITY_MAX_DIGITS,
};
use crate::error::{Error, Result};

/// The typed value attached to a statement, if any.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedValue {
    #[default]
    None,
    String(StringValue),
    Quantity(QuantityValue),
    Time(TimeValue),
    Coordinate(CoordinateValue),
}

impl TypedValue {
    pub fn is_none(&self) -> bool {
        matches!(self, TypedValue::None)
    }

    /// Short name of the attached kind, for logs and conflict messages.
    pub fn kind(&self) -> &'static str {
        match self {
            TypedValue::None => "none",
            TypedValue::String(_) => "string",
            TypedValue::Quantity(_) => "quantity",
            TypedValue::Time(_) => "time",
            TypedValue::Coordinate(_) => "coordinate",
        }
    }

    /// Re-run construction-time validation, for values that arrived through
    /// deserialization rather than a constructor.
    pub fn validate(&self) -> Result<()> {
        match self {
            TypedValue::Quantity(q) => q.validate(),
            TypedValue::Coordinate(c) => c.validate(),
            TypedValue::None | TypedValue::String(_) | TypedValue::Time(_) => Ok(()),
        }
    }
}

impl From<StringValue> for TypedValue {
    fn from(v: StringValue) -> Self {
        TypedValue::String(v)
    }
}

impl From<QuantityValue> for TypedValue {
    fn from(v: QuantityValue) -> Self {
        TypedValue::Quantity(v)
    }
}

impl From<TimeValue> for TypedValue {
    fn from(v: TimeValue) -> Self {
        TypedValue::Time(v)
    }
}

impl From<CoordinateValue> for TypedValue {
    fn from(v: CoordinateValue) -> Self {
        TypedValue::Coordinate(v)
    }
}

// =============================================================================
// STRING
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringValue {
    pub value: String,
}

impl StringValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl std::fmt::Display for StringValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.value)
    }
}

// =============================================================================
// QUANTITY
// =============================================================================

/// A fixed-point quantity with optional uncertainty bounds.
///
/// Each number may carry at most [`QUANTITY_MAX_DIGITS`] digits, of which at
/// most [`QUANTITY_DECIMAL_PLACES`] are fractional. Values keep the scale they
/// were built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityValue {
    pub value: BigDecimal,
    pub lower_bound: Option<BigDecimal>,
    pub upper_bound: Option<BigDecimal>,
}

impl QuantityValue {
    pub fn new(
        value: BigDecimal,
        lower_bound: Option<BigDecimal>,
        upper_bound: Option<BigDecimal>,
    ) -> Result<Self> {
        let quantity = Self {
            value,
            lower_bound,
            upper_bound,
        };
        quantity.validate()?;
        Ok(quantity)
    }

    /// Parse decimal strings, e.g. `QuantityValue::parse("3.5", Some("3.0"), Some("4.0"))`.
    pub fn parse(
        value: &str,
        lower_bound: Option<&str>,
        upper_bound: Option<&str>,
    ) -> Result<Self> {
        let parse = |s: &str| {
            s.trim()
                .parse::<BigDecimal>()
                .map_err(|e| Error::InvalidInput(format!("invalid decimal {:?}: {}", s, e)))
        };
        Self::new(
            parse(value)?,
            lower_bound.map(parse).transpose()?,
            upper_bound.map(parse).transpose()?,
        )
    }

    pub fn validate(&self) -> Result<()> {
        check_decimal("value", &self.value)?;
        if let Some(lower) = &self.lower_bound {
            check_decimal("lower_bound", lower)?;
        }
        if let Some(upper) = &self.upper_bound {
            check_decimal("upper_bound", upper)?;
        }
        Ok(())
    }
}

/// Digit-count rules of a NUMERIC(30, 12) column.
fn check_decimal(field: &str, d: &BigDecimal) -> Result<()> {
    let (_, scale) = d.as_bigint_and_exponent();
    let digit_count = d.digits();

    let (digits, decimals) = if scale <= 0 {
        (digit_count + scale.unsigned_abs(), 0)
    } else if scale.unsigned_abs() > digit_count {
        (scale.unsigned_abs(), scale.unsigned_abs())
    } else {
        (digit_count, scale.unsigned_abs())
    };
    let whole_digits = digits - decimals;
    let max_decimals = QUANTITY_DECIMAL_PLACES.unsigned_abs();

    if digits > QUANTITY_MAX_DIGITS {
        return Err(Error::InvalidInput(format!(
            "{} has more than {} digits",
            field, QUANTITY_MAX_DIGITS
        )));
    }
    if decimals > max_decimals {
        return Err(Error::InvalidInput(format!(
            "{} has more than {} decimal places",
            field, max_decimals
        )));
    }
    if whole_digits > QUANTITY_MAX_DIGITS - max_decimals {
        return Err(Error::InvalidInput(format!(
            "{} has more than {} digits before the decimal point",
            field,
            QUANTITY_MAX_DIGITS - max_decimals
        )));
    }
    Ok(())
}

// =============================================================================
// TIME
// =============================================================================

/// Granularity at which a time value is meaningful.
///
/// Codes 6 through 14 follow the Wikibase numbering and are what serde
/// reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TimePrecision {
    Millennium,
    Century,
    Decade,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimePrecision {
    pub const ALL: [TimePrecision; 9] = [
        Self::Millennium,
        Self::Century,
        Self::Decade,
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    pub fn code(self) -> u8 {
        match self {
            Self::Millennium => 6,
            Self::Century => 7,
            Self::Decade => 8,
            Self::Year => 9,
            Self::Month => 10,
            Self::Day => 11,
            Self::Hour => 12,
            Self::Minute => 13,
            Self::Second => 14,
        }
    }

    /// Years per bucket for year-or-coarser precisions, `None` otherwise.
    pub fn year_unit(self) -> Option<i32> {
        match self {
            Self::Millennium => Some(1000),
            Self::Century => Some(100),
            Self::Decade => Some(10),
            Self::Year => Some(1),
            _ => None,
        }
    }
}

impl TryFrom<u8> for TimePrecision {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| Error::InvalidInput(format!("unknown time precision code: {}", code)))
    }
}

impl From<TimePrecision> for u8 {
    fn from(precision: TimePrecision) -> Self {
        precision.code()
    }
}

impl std::fmt::Display for TimePrecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Millennium => write!(f, "millennium"),
            Self::Century => write!(f, "century"),
            Self::Decade => write!(f, "decade"),
            Self::Year => write!(f, "year"),
            Self::Month => write!(f, "month"),
            Self::Day => write!(f, "day"),
            Self::Hour => write!(f, "hour"),
            Self::Minute => write!(f, "minute"),
            Self::Second => write!(f, "second"),
        }
    }
}

impl std::str::FromStr for TimePrecision {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "millennium" | "millenium" => Ok(Self::Millennium),
            "century" => Ok(Self::Century),
            "decade" => Ok(Self::Decade),
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            "day" => Ok(Self::Day),
            "hour" => Ok(Self::Hour),
            "minute" => Ok(Self::Minute),
            "second" => Ok(Self::Second),
            _ => Err(format!("Invalid time precision: {}", s)),
        }
    }
}

/// A point in time with a precision and an optional uncertainty window.
///
/// `before` and `after` count precision units. Years outside 0..=9999 are
/// not supported by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeValue {
    pub value: DateTime<Utc>,
    pub precision: TimePrecision,
    pub before: Option<u32>,
    pub after: Option<u32>,
}

impl TimeValue {
    pub fn new(value: DateTime<Utc>, precision: TimePrecision) -> Self {
        Self {
            value,
            precision,
            before: None,
            after: None,
        }
    }

    pub fn with_window(mut self, before: u32, after: u32) -> Self {
        self.before = Some(before);
        self.after = Some(after);
        self
    }

    /// The uncertainty window, present only when both sides are set and at
    /// least one is positive.
    pub fn window(&self) -> Option<(u32, u32)> {
        match (self.before, self.after) {
            (Some(before), Some(after)) if before > 0 || after > 0 => Some((before, after)),
            _ => None,
        }
    }
}

// =============================================================================
// COORDINATE
// =============================================================================

/// A position on a globe, which is itself a concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateValue {
    pub latitude: f64,
    pub longitude: f64,
    pub precision_m: f64,
    pub height_m: Option<f64>,
    pub globe: Uuid,
}

impl CoordinateValue {
    pub fn new(
        latitude: f64,
        longitude: f64,
        precision_m: f64,
        height_m: Option<f64>,
        globe: Uuid,
    ) -> Result<Self> {
        let coordinate = Self {
            latitude,
            longitude,
            precision_m,
            height_m,
            globe,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f64, (lo, hi): (f64, f64)| v.is_finite() && (lo..=hi).contains(&v);

        if !in_range(self.latitude, LATITUDE_RANGE) {
            return Err(Error::InvalidInput(format!(
                "latitude {} outside [{}, {}]",
                self.latitude, LATITUDE_RANGE.0, LATITUDE_RANGE.1
            )));
        }
        if !in_range(self.longitude, LONGITUDE_RANGE) {
            return Err(Error::InvalidInput(format!(
                "longitude {} outside [{}, {}]",
                self.longitude, LONGITUDE_RANGE.0, LONGITUDE_RANGE.1
            )));
        }
        if !self.precision_m.is_finite() {
            return Err(Error::InvalidInput("precision_m must be finite".to_string()));
        }
        if self.height_m.is_some_and(|h| !h.is_finite()) {
            return Err(Error::InvalidInput("height_m must be finite".to_string()));
        }
        Ok(())
    }
}
