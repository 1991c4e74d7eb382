//! Field-value sets for insert/update payloads.
//!
//! # Responsibility
//! - Carry column/value pairs between callers and the store façade.
//! - Distinguish "column absent" from "column present with null".
//!
//! # Invariants
//! - Iteration order is deterministic (sorted by column name), so generated
//!   SQL is stable for a given value set.

use rusqlite::types::Value;
use std::collections::BTreeMap;

use super::{COLUMN_DAY_OF_WEEK, COLUMN_FREQUENCY, COLUMN_NAME, COLUMN_TIME_OF_DAY};

/// Ordered column-to-value map used as the payload of insert and update.
///
/// A key mapped to `Value::Null` means the caller explicitly supplied null
/// for that column; a missing key means the column is untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitValues {
    entries: BTreeMap<&'static str, Value>,
}

impl HabitValues {
    /// Creates an empty value set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `column`, replacing any previous value.
    pub fn put(&mut self, column: &'static str, value: Value) -> &mut Self {
        self.entries.insert(column, value);
        self
    }

    /// Sets the habit name. `None` records an explicit null.
    pub fn set_name(&mut self, name: Option<&str>) -> &mut Self {
        self.put(
            COLUMN_NAME,
            name.map_or(Value::Null, |name| Value::Text(name.to_string())),
        )
    }

    /// Sets the free-text day of week. `None` records an explicit null.
    pub fn set_day_of_week(&mut self, day: Option<&str>) -> &mut Self {
        self.put(
            COLUMN_DAY_OF_WEEK,
            day.map_or(Value::Null, |day| Value::Text(day.to_string())),
        )
    }

    /// Sets the raw time-of-day encoding. `None` records an explicit null.
    ///
    /// The value is validated by the store façade, not here, so tests and
    /// callers can represent out-of-domain input.
    pub fn set_time_of_day(&mut self, value: Option<i64>) -> &mut Self {
        self.put(
            COLUMN_TIME_OF_DAY,
            value.map_or(Value::Null, Value::Integer),
        )
    }

    /// Sets the frequency. `None` records an explicit null.
    pub fn set_frequency(&mut self, value: Option<i64>) -> &mut Self {
        self.put(COLUMN_FREQUENCY, value.map_or(Value::Null, Value::Integer))
    }

    /// Returns whether `column` is present (including explicit null).
    pub fn contains(&self, column: &str) -> bool {
        self.entries.contains_key(column)
    }

    /// Returns the stored value for `column`, if present.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries.get(column)
    }

    /// Returns the number of columns in this set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the set carries no columns at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates column/value pairs in deterministic column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.entries.iter().map(|(column, value)| (*column, value))
    }
}

#[cfg(test)]
mod tests {
    use super::HabitValues;
    use crate::contract::{COLUMN_FREQUENCY, COLUMN_NAME};
    use rusqlite::types::Value;

    #[test]
    fn absent_and_explicit_null_are_distinguished() {
        let mut values = HabitValues::new();
        values.set_name(None);

        assert!(values.contains(COLUMN_NAME));
        assert_eq!(values.get(COLUMN_NAME), Some(&Value::Null));
        assert!(!values.contains(COLUMN_FREQUENCY));
        assert_eq!(values.get(COLUMN_FREQUENCY), None);
    }

    #[test]
    fn put_replaces_previous_value() {
        let mut values = HabitValues::new();
        values.set_frequency(Some(3));
        values.set_frequency(Some(7));

        assert_eq!(values.len(), 1);
        assert_eq!(values.get(COLUMN_FREQUENCY), Some(&Value::Integer(7)));
    }

    #[test]
    fn iteration_order_is_sorted_by_column_name() {
        let mut values = HabitValues::new();
        values.set_time_of_day(Some(1));
        values.set_day_of_week(Some("Monday"));
        values.set_name(Some("Read"));

        let columns: Vec<_> = values.iter().map(|(column, _)| column).collect();
        assert_eq!(columns, vec!["dayOfWeek", "name", "timeOfDay"]);
    }
}
