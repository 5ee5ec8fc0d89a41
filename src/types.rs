use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------- Categorical vocabularies ----------

// The serialized form of every variant is the exact label the regressor was
// trained against, so indicator column names line up with the schema.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Carrier {
    #[serde(rename = "Delta Air Lines")]
    Delta,
    #[serde(rename = "United Airlines")]
    United,
    #[serde(rename = "Southwest Airlines")]
    Southwest,
    #[serde(rename = "American Airlines")]
    American,
    #[serde(rename = "JetBlue Airways")]
    JetBlue,
    #[serde(rename = "Alaska Airlines")]
    Alaska,
    #[serde(rename = "Spirit Airlines")]
    Spirit,
}

impl Carrier {
    pub const ALL: [Carrier; 7] = [
        Carrier::Delta,
        Carrier::United,
        Carrier::Southwest,
        Carrier::American,
        Carrier::JetBlue,
        Carrier::Alaska,
        Carrier::Spirit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Carrier::Delta => "Delta Air Lines",
            Carrier::United => "United Airlines",
            Carrier::Southwest => "Southwest Airlines",
            Carrier::American => "American Airlines",
            Carrier::JetBlue => "JetBlue Airways",
            Carrier::Alaska => "Alaska Airlines",
            Carrier::Spirit => "Spirit Airlines",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Airport {
    #[serde(rename = "ATL - Hartsfield–Jackson Atlanta International")]
    Atl,
    #[serde(rename = "LAX - Los Angeles International")]
    Lax,
    #[serde(rename = "ORD - Chicago O'Hare International")]
    Ord,
    #[serde(rename = "DFW - Dallas/Fort Worth International")]
    Dfw,
    #[serde(rename = "JFK - John F. Kennedy International")]
    Jfk,
    #[serde(rename = "SFO - San Francisco International")]
    Sfo,
    #[serde(rename = "SEA - Seattle–Tacoma International")]
    Sea,
    #[serde(rename = "MIA - Miami International")]
    Mia,
}

impl Airport {
    pub const ALL: [Airport; 8] = [
        Airport::Atl,
        Airport::Lax,
        Airport::Ord,
        Airport::Dfw,
        Airport::Jfk,
        Airport::Sfo,
        Airport::Sea,
        Airport::Mia,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Airport::Atl => "ATL - Hartsfield–Jackson Atlanta International",
            Airport::Lax => "LAX - Los Angeles International",
            Airport::Ord => "ORD - Chicago O'Hare International",
            Airport::Dfw => "DFW - Dallas/Fort Worth International",
            Airport::Jfk => "JFK - John F. Kennedy International",
            Airport::Sfo => "SFO - San Francisco International",
            Airport::Sea => "SEA - Seattle–Tacoma International",
            Airport::Mia => "MIA - Miami International",
        }
    }

    /// Three-letter IATA code, for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Airport::Atl => "ATL",
            Airport::Lax => "LAX",
            Airport::Ord => "ORD",
            Airport::Dfw => "DFW",
            Airport::Jfk => "JFK",
            Airport::Sfo => "SFO",
            Airport::Sea => "SEA",
            Airport::Mia => "MIA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Clear,
    Rain,
    Storm,
    Fog,
    Snow,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Clear,
        Weather::Rain,
        Weather::Storm,
        Weather::Fog,
        Weather::Snow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::Rain => "Rain",
            Weather::Storm => "Storm",
            Weather::Fog => "Fog",
            Weather::Snow => "Snow",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Traffic {
    Low,
    Medium,
    High,
}

impl Traffic {
    pub const ALL: [Traffic; 3] = [Traffic::Low, Traffic::Medium, Traffic::High];

    pub fn label(&self) -> &'static str {
        match self {
            Traffic::Low => "Low",
            Traffic::Medium => "Medium",
            Traffic::High => "High",
        }
    }
}

/// Day of week with the training convention Sunday=1 … Saturday=7.
/// Non-ISO: callers send day names, the model gets the mapped number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday = 1,
    Monday = 2,
    Tuesday = 3,
    Wednesday = 4,
    Thursday = 5,
    Friday = 6,
    Saturday = 7,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Numeric value fed to the model (Sunday=1 … Saturday=7).
    pub fn model_index(&self) -> u8 {
        *self as u8
    }
}

// ---------- Query ----------

/// One flight description as entered by the caller. Categorical fields are
/// closed enums; numeric fields are range-checked by [`FlightQuery::validate`]
/// before encoding.
#[derive(Debug, Clone, Deserialize)]
pub struct FlightQuery {
    pub carrier: Carrier,
    pub origin: Airport,
    pub destination: Airport,
    pub weather: Weather,
    pub traffic: Traffic,
    pub day_of_week: DayOfWeek,
    pub month: u32,
    pub hour: u32,
    pub distance: f32,
    pub congestion_index: f32,
}

pub const MONTH_RANGE: (u32, u32) = (1, 12);
pub const HOUR_RANGE: (u32, u32) = (0, 23);
pub const DISTANCE_RANGE_MILES: (f32, f32) = (50.0, 5000.0);
pub const CONGESTION_RANGE: (f32, f32) = (0.0, 100.0);

impl FlightQuery {
    /// Domain checks that must pass before a query may be encoded.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.origin == self.destination {
            return Err(ValidationError::SameAirport(self.origin));
        }
        check_range("month", self.month as f64, MONTH_RANGE.0 as f64, MONTH_RANGE.1 as f64)?;
        check_range("hour", self.hour as f64, HOUR_RANGE.0 as f64, HOUR_RANGE.1 as f64)?;
        check_range(
            "distance",
            self.distance as f64,
            DISTANCE_RANGE_MILES.0 as f64,
            DISTANCE_RANGE_MILES.1 as f64,
        )?;
        check_range(
            "congestion_index",
            self.congestion_index as f64,
            CONGESTION_RANGE.0 as f64,
            CONGESTION_RANGE.1 as f64,
        )?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    // NaN fails the contains check and is rejected like any other bad value
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// ---------- Prediction output ----------

/// Predicted delay at or below this many minutes counts as on time.
/// Fixed policy constant, not learned.
pub const ON_TIME_THRESHOLD_MIN: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DelayClass {
    #[serde(rename = "On-Time")]
    OnTime,
    Delayed,
}

impl DelayClass {
    /// Threshold on the unrounded model output, inclusive on the on-time side.
    pub fn from_minutes(delay_minutes: f64) -> Self {
        if delay_minutes <= ON_TIME_THRESHOLD_MIN {
            DelayClass::OnTime
        } else {
            DelayClass::Delayed
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DelayClass::OnTime => "On-Time",
            DelayClass::Delayed => "Delayed",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PredictionResult {
    /// Raw regressor output in minutes, full precision. May be negative.
    pub delay_minutes: f64,
    pub delay_class: DelayClass,
}

impl PredictionResult {
    pub fn from_raw(delay_minutes: f64) -> Self {
        Self {
            delay_minutes,
            delay_class: DelayClass::from_minutes(delay_minutes),
        }
    }

    /// Delay rounded to two decimals. Display only — classification always
    /// sees the unrounded value.
    pub fn display_minutes(&self) -> f64 {
        (self.delay_minutes * 100.0).round() / 100.0
    }
}
