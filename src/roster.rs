//! Shift slots (`/roster`) and the per-employee schedules built on them
//! (`/staff-roster`).
//!
//! Slot times travel as 12-hour clock strings ("9:00 AM") on a quarter-hour
//! grid. A slot whose end is earlier than its start runs past midnight.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const CLOCK_FORMAT: &str = "%-I:%M %p";
const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterSlot {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub total_hrs: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub date_entered: Option<DateTime<Utc>>,
}

impl RosterSlot {
    pub fn label(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

/// Body of the slot create/update endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotInput {
    pub start_time: String,
    pub end_time: String,
    pub total_hrs: String,
    pub created_by: String,
}

impl SlotInput {
    /// Build a slot from two clock times, accepting "9:00 AM" or "09:00".
    /// Times are normalized to the 12-hour form and the duration is derived.
    pub fn new(start: &str, end: &str) -> Result<Self> {
        let start_at = parse_clock("start_time", start)?;
        let end_at = parse_clock("end_time", end)?;

        let minutes = shift_minutes(start_at, end_at);
        if minutes == 0 {
            return Err(Error::validation("A slot must not start and end at the same time"));
        }

        Ok(Self {
            start_time: start_at.format(CLOCK_FORMAT).to_string(),
            end_time: end_at.format(CLOCK_FORMAT).to_string(),
            total_hrs: format!("{:.2}", minutes as f64 / 60.0),
            created_by: String::new(),
        })
    }

    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }
}

fn parse_clock(field: &str, value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    let time = NaiveTime::parse_from_str(value, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| Error::field_error(field, format!("'{}' is not a clock time like 9:00 AM", value)))?;

    if time.minute() % 15 != 0 {
        return Err(Error::field_error(
            field,
            format!("'{}' is not on a quarter hour", value),
        ));
    }
    Ok(time)
}

/// Minutes from start to end, wrapping past midnight
fn shift_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let diff = (end - start).num_minutes();
    if diff < 0 {
        diff + MINUTES_PER_DAY
    } else {
        diff
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterType {
    #[default]
    Roster,
    #[serde(rename = "Week Off")]
    WeekOff,
    #[serde(rename = "Over Time")]
    OverTime,
    #[serde(rename = "Sick Leave")]
    SickLeave,
    Leave,
}

impl RosterType {
    pub const ALL: [RosterType; 5] = [
        RosterType::Roster,
        RosterType::WeekOff,
        RosterType::OverTime,
        RosterType::SickLeave,
        RosterType::Leave,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RosterType::Roster => "Roster",
            RosterType::WeekOff => "Week Off",
            RosterType::OverTime => "Over Time",
            RosterType::SickLeave => "Sick Leave",
            RosterType::Leave => "Leave",
        }
    }
}

impl fmt::Display for RosterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RosterType {
    type Err = Error;

    /// Accepts the display name in any case, with spaces, dashes or underscores
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        RosterType::ALL
            .into_iter()
            .find(|t| t.as_str().replace(' ', "").to_ascii_lowercase() == key)
            .ok_or_else(|| Error::validation(format!("Unknown roster type '{}'", s)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffRoster {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub roster_type: RosterType,
    #[serde(default)]
    pub slot_id: String,
    #[serde(default)]
    pub slot: String,
    #[serde(default)]
    pub roster_dates: Vec<String>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl StaffRoster {
    /// Calendar days covered, skipping entries that are not ISO dates
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.roster_dates
            .iter()
            .filter_map(|d| d.get(..10))
            .filter_map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffRosterInput {
    pub user_id: String,
    pub roster_type: RosterType,
    pub slot_id: String,
    pub roster_dates: Vec<String>,
    pub created_by: String,
}

impl StaffRosterInput {
    /// Every field is required and at least one date must be given. Dates are
    /// deduplicated, sorted and sent as midnight UTC.
    pub fn new(user_id: &str, roster_type: RosterType, slot_id: &str, dates: &[NaiveDate]) -> Result<Self> {
        if user_id.trim().is_empty() {
            return Err(Error::field_error("user_id", "Employee is required"));
        }
        if slot_id.trim().is_empty() {
            return Err(Error::field_error("slot_id", "Slot is required"));
        }
        if dates.is_empty() {
            return Err(Error::field_error("roster_dates", "At least one date is required"));
        }

        let mut days = dates.to_vec();
        days.sort();
        days.dedup();

        Ok(Self {
            user_id: user_id.trim().to_string(),
            roster_type,
            slot_id: slot_id.trim().to_string(),
            roster_dates: days
                .iter()
                .map(|d| format!("{}T00:00:00.000Z", d.format("%Y-%m-%d")))
                .collect(),
            created_by: String::new(),
        })
    }

    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }
}
