//! Habit store façade.
//!
//! # Responsibility
//! - Dispatch locator-addressed query/insert/update/delete operations onto
//!   the `habits` table.
//! - Enforce the insert/update validation rules before any SQL mutation.
//!
//! # Invariants
//! - Every stored row has a non-null name and a valid time of day.
//! - Item-form locators always rewrite the caller filter to `_id = ?`.
//! - The store connection is opened once, on first use, and reused for the
//!   façade's lifetime.

use crate::contract::{
    is_valid_time_of_day, HabitValues, AUTHORITY, COLUMN_FREQUENCY, COLUMN_ID, COLUMN_NAME,
    COLUMN_TIME_OF_DAY, TABLE_NAME,
};
use crate::db::{open_db, open_db_in_memory, DbError};
use log::error;
use once_cell::unsync::OnceCell;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod address;
pub mod rows;

pub use address::{AddressKind, AddressMatcher, CONTENT_ITEM_TYPE, CONTENT_LIST_TYPE};
pub use rows::{HabitRow, HabitRows};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failure modes of the store façade.
#[derive(Debug)]
pub enum ProviderError {
    /// Caller misuse: the locator does not address a supported form for the
    /// attempted operation. Never retried.
    UnsupportedAddress {
        operation: &'static str,
        locator: String,
    },
    /// Recoverable bad input, with a field-specific message for display.
    InvalidArgument(&'static str),
    /// Store-level failure, propagated as-is.
    Db(DbError),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedAddress { operation, locator } => {
                write!(f, "{operation} is not supported for locator `{locator}`")
            }
            Self::InvalidArgument(message) => write!(f, "{message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UnsupportedAddress { .. } | Self::InvalidArgument(_) => None,
        }
    }
}

impl From<DbError> for ProviderError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for ProviderError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

#[derive(Debug)]
enum StoreLocation {
    File(PathBuf),
    Memory,
}

/// Locator-dispatching CRUD gateway over the `habits` table.
///
/// Stateless across calls apart from the lazily-opened connection; the
/// embedded store serializes concurrent writers itself.
pub struct HabitProvider {
    matcher: AddressMatcher,
    location: StoreLocation,
    conn: OnceCell<Connection>,
}

impl HabitProvider {
    /// Creates a façade over a database file. The file is not touched until
    /// the first operation runs.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_location(StoreLocation::File(path.into()))
    }

    /// Creates a façade over a private in-memory database.
    pub fn in_memory() -> Self {
        Self::with_location(StoreLocation::Memory)
    }

    fn with_location(location: StoreLocation) -> Self {
        Self {
            matcher: AddressMatcher::new(AUTHORITY),
            location,
            conn: OnceCell::new(),
        }
    }

    /// Returns the locator matcher, for building addresses to pass back in.
    pub fn matcher(&self) -> &AddressMatcher {
        &self.matcher
    }

    fn conn(&self) -> ProviderResult<&Connection> {
        let conn = self.conn.get_or_try_init(|| match &self.location {
            StoreLocation::File(path) => open_db(path),
            StoreLocation::Memory => open_db_in_memory(),
        })?;
        Ok(conn)
    }

    fn resolve(&self, operation: &'static str, locator: &str) -> ProviderResult<AddressKind> {
        self.matcher
            .match_locator(locator)
            .ok_or_else(|| ProviderError::UnsupportedAddress {
                operation,
                locator: locator.to_string(),
            })
    }

    /// Queries habit rows.
    ///
    /// Collection form passes `filter`/`order` through to the store opaquely;
    /// item form replaces the caller filter with an `_id` equality derived
    /// from the locator. `columns` of `None` (or empty) selects all columns.
    pub fn query(
        &self,
        locator: &str,
        columns: Option<&[&str]>,
        filter: Option<&str>,
        filter_args: &[Value],
        order: Option<&str>,
    ) -> ProviderResult<HabitRows> {
        let kind = self.resolve("query", locator)?;
        let (filter, args) = scope_filter(kind, filter, filter_args);

        let mut sql = format!("SELECT {} FROM {TABLE_NAME}", projection_sql(columns));
        if let Some(filter) = &filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter);
        }
        if let Some(order) = order {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let column_names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt.query(params_from_iter(args))?;
        let mut collected = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(column_names.len());
            for index in 0..column_names.len() {
                cells.push(row.get::<_, Value>(index)?);
            }
            collected.push(cells);
        }

        Ok(HabitRows::new(column_names, collected))
    }

    /// Inserts one habit and returns the item-form locator for the new row.
    ///
    /// Only the collection form is addressable. Validation failures are
    /// `InvalidArgument`; a store-level write failure is logged and surfaced
    /// as `Ok(None)`, which callers must check for.
    pub fn insert(&self, locator: &str, values: &HabitValues) -> ProviderResult<Option<String>> {
        match self.resolve("insert", locator)? {
            AddressKind::Collection => {}
            AddressKind::Item(_) => {
                return Err(ProviderError::UnsupportedAddress {
                    operation: "insert",
                    locator: locator.to_string(),
                });
            }
        }

        validate_name(values, true)?;
        validate_time_of_day(values, true)?;
        validate_frequency(values)?;

        let mut column_sql = Vec::with_capacity(values.len());
        let mut placeholders = Vec::with_capacity(values.len());
        let mut args = Vec::with_capacity(values.len());
        for (column, value) in values.iter() {
            column_sql.push(column);
            placeholders.push("?");
            args.push(value.clone());
        }
        let sql = format!(
            "INSERT INTO {TABLE_NAME} ({}) VALUES ({});",
            column_sql.join(", "),
            placeholders.join(", ")
        );

        let conn = self.conn()?;
        match conn.execute(&sql, params_from_iter(args)) {
            Ok(_) => Ok(Some(self.matcher.item_locator(conn.last_insert_rowid()))),
            Err(err) => {
                error!(
                    "event=habit_insert module=provider status=error locator={locator} error={err}"
                );
                Ok(None)
            }
        }
    }

    /// Updates habit rows and returns the number of rows affected.
    ///
    /// Validation applies only to columns present in `values` (partial
    /// update). An empty value set is a no-op returning 0 without touching
    /// the store. A filter matching nothing returns 0, not an error.
    pub fn update(
        &self,
        locator: &str,
        values: &HabitValues,
        filter: Option<&str>,
        filter_args: &[Value],
    ) -> ProviderResult<usize> {
        let kind = self.resolve("update", locator)?;

        validate_name(values, false)?;
        validate_time_of_day(values, false)?;
        validate_frequency(values)?;

        if values.is_empty() {
            return Ok(0);
        }

        let (filter, filter_args) = scope_filter(kind, filter, filter_args);

        let mut assignments = Vec::with_capacity(values.len());
        let mut args = Vec::with_capacity(values.len() + filter_args.len());
        for (column, value) in values.iter() {
            assignments.push(format!("{column} = ?"));
            args.push(value.clone());
        }
        args.extend(filter_args);

        let mut sql = format!("UPDATE {TABLE_NAME} SET {}", assignments.join(", "));
        if let Some(filter) = &filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter);
        }

        let changed = self.conn()?.execute(&sql, params_from_iter(args))?;
        Ok(changed)
    }

    /// Deletes habit rows and returns the number of rows removed.
    ///
    /// Collection form with no filter removes every row; 0 removed rows is a
    /// valid, non-error result.
    pub fn delete(
        &self,
        locator: &str,
        filter: Option<&str>,
        filter_args: &[Value],
    ) -> ProviderResult<usize> {
        let kind = self.resolve("delete", locator)?;
        let (filter, args) = scope_filter(kind, filter, filter_args);

        let mut sql = format!("DELETE FROM {TABLE_NAME}");
        if let Some(filter) = &filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter);
        }

        let removed = self.conn()?.execute(&sql, params_from_iter(args))?;
        Ok(removed)
    }

    /// Resolves a locator to its type tag for platform-level negotiation.
    pub fn resolve_type(&self, locator: &str) -> ProviderResult<&'static str> {
        match self.resolve("resolve_type", locator)? {
            AddressKind::Collection => Ok(CONTENT_LIST_TYPE),
            AddressKind::Item(_) => Ok(CONTENT_ITEM_TYPE),
        }
    }
}

/// Rewrites the caller filter for item-form addresses; passes the collection
/// form through untouched.
fn scope_filter(
    kind: AddressKind,
    filter: Option<&str>,
    filter_args: &[Value],
) -> (Option<String>, Vec<Value>) {
    match kind {
        AddressKind::Collection => (filter.map(str::to_string), filter_args.to_vec()),
        AddressKind::Item(id) => (
            Some(format!("{COLUMN_ID} = ?")),
            vec![Value::Integer(id)],
        ),
    }
}

fn projection_sql(columns: Option<&[&str]>) -> String {
    match columns {
        Some(columns) if !columns.is_empty() => columns.join(", "),
        _ => "*".to_string(),
    }
}

fn validate_name(values: &HabitValues, required: bool) -> ProviderResult<()> {
    if !required && !values.contains(COLUMN_NAME) {
        return Ok(());
    }
    match values.get(COLUMN_NAME) {
        Some(Value::Text(_)) => Ok(()),
        _ => Err(ProviderError::InvalidArgument("habit requires a name")),
    }
}

fn validate_time_of_day(values: &HabitValues, required: bool) -> ProviderResult<()> {
    if !required && !values.contains(COLUMN_TIME_OF_DAY) {
        return Ok(());
    }
    match values.get(COLUMN_TIME_OF_DAY) {
        Some(Value::Integer(value)) if is_valid_time_of_day(*value) => Ok(()),
        _ => Err(ProviderError::InvalidArgument(
            "habit requires a valid time of day",
        )),
    }
}

fn validate_frequency(values: &HabitValues) -> ProviderResult<()> {
    match values.get(COLUMN_FREQUENCY) {
        // Absent or explicitly null frequency is allowed.
        None | Some(Value::Null) => Ok(()),
        Some(Value::Integer(value)) if *value >= 0 => Ok(()),
        _ => Err(ProviderError::InvalidArgument(
            "habit requires a non-negative frequency",
        )),
    }
}
