//! Habit store core: schema contract, locator matching, and the SQLite-backed
//! data store façade. This crate is the single access path to habit data;
//! UI layers call the façade's query/insert/update/delete operations and
//! never touch the table directly.

pub mod contract;
pub mod db;
pub mod logging;
pub mod provider;

pub use contract::{is_valid_time_of_day, Habit, HabitValues, TimeOfDay};
pub use logging::{default_log_level, init_logging, logging_status};
pub use provider::{
    AddressKind, AddressMatcher, HabitProvider, HabitRow, HabitRows, ProviderError,
    ProviderResult, CONTENT_ITEM_TYPE, CONTENT_LIST_TYPE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
