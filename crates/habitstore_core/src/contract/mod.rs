//! Habit storage contract.
//!
//! # Responsibility
//! - Define the canonical table/column names shared by every access path.
//! - Define the closed `TimeOfDay` domain and its persisted encoding.
//!
//! # Invariants
//! - Column names and the time-of-day numeric mapping are persisted
//!   identifiers and must never be renamed or renumbered.
//! - `is_valid_time_of_day` is pure and has no error cases.

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

pub mod values;

pub use values::HabitValues;

/// Logical authority prefix for all habit resource locators.
pub const AUTHORITY: &str = "habitstore";

/// Path segment for the habit collection.
pub const PATH_HABITS: &str = "habits";

/// Name of the database table for habits.
pub const TABLE_NAME: &str = "habits";

/// Row identifier assigned by the store at insert time. Immutable.
pub const COLUMN_ID: &str = "_id";

/// Name of the habit. Required, non-null.
pub const COLUMN_NAME: &str = "name";

/// Day of the week the habit is performed. Free text.
pub const COLUMN_DAY_OF_WEEK: &str = "dayOfWeek";

/// Time-of-day bucket. One of the `TimeOfDay` values.
pub const COLUMN_TIME_OF_DAY: &str = "timeOfDay";

/// How often the habit is performed. Optional, non-negative.
pub const COLUMN_FREQUENCY: &str = "frequency";

/// Time-of-day bucket for a habit.
///
/// The numeric encoding (0/1/2) is a persisted contract shared with every
/// stored row; variants must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Returns the persisted integer encoding for this bucket.
    pub fn to_db(self) -> i64 {
        match self {
            Self::Morning => 0,
            Self::Afternoon => 1,
            Self::Evening => 2,
        }
    }

    /// Parses the persisted integer encoding, rejecting out-of-domain values.
    pub fn from_db(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Morning),
            1 => Some(Self::Afternoon),
            2 => Some(Self::Evening),
            _ => None,
        }
    }
}

/// Returns whether `value` is a member of the closed time-of-day domain.
pub fn is_valid_time_of_day(value: i64) -> bool {
    TimeOfDay::from_db(value).is_some()
}

/// Typed read/write model for one habit row.
///
/// `id` is `None` until the store assigns an identifier on insert. Converts
/// to a field-value set via [`Habit::to_values`] and back from a queried row
/// via `Habit::from_row`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Store-assigned row identifier.
    pub id: Option<i64>,
    /// Habit name. Non-null on every stored row.
    pub name: String,
    /// Free-text day of week.
    pub day_of_week: Option<String>,
    /// Time-of-day bucket.
    pub time_of_day: TimeOfDay,
    /// Optional non-negative repetition count.
    pub frequency: Option<i64>,
}

impl Habit {
    /// Creates a new unsaved habit.
    pub fn new(name: impl Into<String>, time_of_day: TimeOfDay) -> Self {
        Self {
            id: None,
            name: name.into(),
            day_of_week: None,
            time_of_day,
            frequency: None,
        }
    }

    /// Builds the field-value set for inserting or fully updating this habit.
    ///
    /// `id` is never included; identity is owned by the store.
    pub fn to_values(&self) -> HabitValues {
        let mut values = HabitValues::new();
        values.put(COLUMN_NAME, Value::Text(self.name.clone()));
        values.put(
            COLUMN_DAY_OF_WEEK,
            match &self.day_of_week {
                Some(day) => Value::Text(day.clone()),
                None => Value::Null,
            },
        );
        values.put(COLUMN_TIME_OF_DAY, Value::Integer(self.time_of_day.to_db()));
        values.put(
            COLUMN_FREQUENCY,
            match self.frequency {
                Some(frequency) => Value::Integer(frequency),
                None => Value::Null,
            },
        );
        values
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_time_of_day, Habit, TimeOfDay, COLUMN_NAME, COLUMN_TIME_OF_DAY};
    use rusqlite::types::Value;

    #[test]
    fn time_of_day_round_trips_through_db_encoding() {
        for bucket in [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening] {
            assert_eq!(TimeOfDay::from_db(bucket.to_db()), Some(bucket));
        }
    }

    #[test]
    fn is_valid_time_of_day_accepts_exactly_the_closed_domain() {
        assert!(is_valid_time_of_day(0));
        assert!(is_valid_time_of_day(1));
        assert!(is_valid_time_of_day(2));
        assert!(!is_valid_time_of_day(-1));
        assert!(!is_valid_time_of_day(3));
        assert!(!is_valid_time_of_day(5));
    }

    #[test]
    fn time_of_day_serde_uses_snake_case_names() {
        let json = serde_json::to_string(&TimeOfDay::Afternoon).unwrap();
        assert_eq!(json, "\"afternoon\"");
        let parsed: TimeOfDay = serde_json::from_str("\"evening\"").unwrap();
        assert_eq!(parsed, TimeOfDay::Evening);
    }

    #[test]
    fn habit_to_values_excludes_identity_and_keeps_nulls_explicit() {
        let habit = Habit::new("Music", TimeOfDay::Morning);
        let values = habit.to_values();

        assert!(!values.contains(super::COLUMN_ID));
        assert_eq!(
            values.get(COLUMN_NAME),
            Some(&Value::Text("Music".to_string()))
        );
        assert_eq!(values.get(COLUMN_TIME_OF_DAY), Some(&Value::Integer(0)));
        assert_eq!(values.get(super::COLUMN_FREQUENCY), Some(&Value::Null));
    }
}
