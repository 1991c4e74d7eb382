//! Materialized query results.
//!
//! # Responsibility
//! - Hold the rows produced by a façade query, detached from the underlying
//!   statement so the database cursor is released before the call returns.
//!
//! # Invariants
//! - Column order matches the projection the caller requested.
//! - Every row carries exactly one cell per column.

use crate::contract::{
    Habit, TimeOfDay, COLUMN_DAY_OF_WEEK, COLUMN_FREQUENCY, COLUMN_ID, COLUMN_NAME,
    COLUMN_TIME_OF_DAY,
};
use rusqlite::types::Value;

/// Result set returned by `HabitProvider::query`.
///
/// Rows are fully materialized; dropping this value is the only cleanup the
/// caller owes.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitRows {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl HabitRows {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Returns the projected column names in result order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of rows in the result set.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the result set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns one row by position.
    pub fn get(&self, index: usize) -> Option<HabitRow<'_>> {
        self.rows.get(index).map(|cells| HabitRow {
            columns: &self.columns,
            cells,
        })
    }

    /// Iterates rows in result order.
    pub fn iter(&self) -> impl Iterator<Item = HabitRow<'_>> {
        self.rows.iter().map(|cells| HabitRow {
            columns: &self.columns,
            cells,
        })
    }
}

/// Borrowed view of one result row.
#[derive(Debug, Clone, Copy)]
pub struct HabitRow<'a> {
    columns: &'a [String],
    cells: &'a [Value],
}

impl<'a> HabitRow<'a> {
    /// Returns the raw cell value for `column`, if projected.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let index = self.columns.iter().position(|name| name == column)?;
        self.cells.get(index)
    }

    /// Returns the cell for `column` as an integer, if projected and integral.
    pub fn integer(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the cell for `column` as text, if projected and textual.
    pub fn text(&self, column: &str) -> Option<&'a str> {
        match self.get(column)? {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns whether the cell for `column` is null.
    pub fn is_null(&self, column: &str) -> bool {
        matches!(self.get(column), Some(Value::Null))
    }
}

impl Habit {
    /// Rehydrates a typed habit from a queried row.
    ///
    /// `id` is `None` when `_id` was projected away. Returns `None` when a
    /// required column is missing or a stored value falls outside the
    /// contract domain; invalid persisted state is rejected, not masked.
    pub fn from_row(row: &HabitRow<'_>) -> Option<Self> {
        let id = match row.get(COLUMN_ID) {
            None => None,
            Some(Value::Integer(id)) => Some(*id),
            Some(_) => return None,
        };

        let name = row.text(COLUMN_NAME)?.to_string();

        let day_of_week = match row.get(COLUMN_DAY_OF_WEEK) {
            None | Some(Value::Null) => None,
            Some(Value::Text(day)) => Some(day.clone()),
            Some(_) => return None,
        };

        let time_of_day = TimeOfDay::from_db(row.integer(COLUMN_TIME_OF_DAY)?)?;

        let frequency = match row.get(COLUMN_FREQUENCY) {
            None | Some(Value::Null) => None,
            Some(Value::Integer(frequency)) if *frequency >= 0 => Some(*frequency),
            Some(_) => return None,
        };

        Some(Self {
            id,
            name,
            day_of_week,
            time_of_day,
            frequency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::HabitRows;
    use crate::contract::{Habit, TimeOfDay};
    use rusqlite::types::Value;

    fn full_columns() -> Vec<String> {
        ["_id", "name", "dayOfWeek", "timeOfDay", "frequency"]
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    fn rows_with(cells: Vec<Value>) -> HabitRows {
        HabitRows::new(full_columns(), vec![cells])
    }

    #[test]
    fn from_row_rehydrates_a_full_row() {
        let rows = rows_with(vec![
            Value::Integer(7),
            Value::Text("Music".to_string()),
            Value::Text("Monday".to_string()),
            Value::Integer(0),
            Value::Integer(1),
        ]);

        let habit = Habit::from_row(&rows.get(0).unwrap()).unwrap();
        assert_eq!(habit.id, Some(7));
        assert_eq!(habit.name, "Music");
        assert_eq!(habit.day_of_week.as_deref(), Some("Monday"));
        assert_eq!(habit.time_of_day, TimeOfDay::Morning);
        assert_eq!(habit.frequency, Some(1));
    }

    #[test]
    fn from_row_keeps_optional_columns_none() {
        let rows = rows_with(vec![
            Value::Integer(1),
            Value::Text("Run".to_string()),
            Value::Null,
            Value::Integer(2),
            Value::Null,
        ]);

        let habit = Habit::from_row(&rows.get(0).unwrap()).unwrap();
        assert_eq!(habit.day_of_week, None);
        assert_eq!(habit.frequency, None);
    }

    #[test]
    fn from_row_rejects_out_of_domain_stored_values() {
        let bad_bucket = rows_with(vec![
            Value::Integer(1),
            Value::Text("Run".to_string()),
            Value::Null,
            Value::Integer(9),
            Value::Null,
        ]);
        assert!(Habit::from_row(&bad_bucket.get(0).unwrap()).is_none());

        let negative_frequency = rows_with(vec![
            Value::Integer(1),
            Value::Text("Run".to_string()),
            Value::Null,
            Value::Integer(1),
            Value::Integer(-3),
        ]);
        assert!(Habit::from_row(&negative_frequency.get(0).unwrap()).is_none());

        let null_name = rows_with(vec![
            Value::Integer(1),
            Value::Null,
            Value::Null,
            Value::Integer(1),
            Value::Null,
        ]);
        assert!(Habit::from_row(&null_name.get(0).unwrap()).is_none());
    }

    #[test]
    fn from_row_requires_name_and_time_of_day_in_the_projection() {
        let columns = vec!["name".to_string()];
        let rows = HabitRows::new(columns, vec![vec![Value::Text("Run".to_string())]]);
        assert!(Habit::from_row(&rows.get(0).unwrap()).is_none());
    }
}
