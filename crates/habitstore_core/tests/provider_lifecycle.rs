use habitstore_core::contract::COLUMN_NAME;
use habitstore_core::{HabitProvider, HabitValues};
use rusqlite::types::Value;

fn valid_values(name: &str) -> HabitValues {
    let mut values = HabitValues::new();
    values.set_name(Some(name));
    values.set_time_of_day(Some(1));
    values
}

#[test]
fn file_backed_provider_persists_rows_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habits.db");

    let provider = HabitProvider::open(&path);
    let collection = provider.matcher().collection_locator();
    provider
        .insert(&collection, &valid_values("Journal"))
        .unwrap()
        .expect("insert should produce an item locator");
    drop(provider);

    let reopened = HabitProvider::open(&path);
    let rows = reopened
        .query(&collection, None, None, &[], None)
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows.get(0).unwrap().text(COLUMN_NAME), Some("Journal"));
}

#[test]
fn connection_opens_lazily_on_first_operation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lazy.db");

    let provider = HabitProvider::open(&path);
    assert!(!path.exists());

    let collection = provider.matcher().collection_locator();
    provider.query(&collection, None, None, &[], None).unwrap();
    assert!(path.exists());
}

#[test]
fn store_level_insert_failure_is_soft_and_returns_none() {
    let provider = HabitProvider::in_memory();
    let collection = provider.matcher().collection_locator();

    // A column the table does not have passes payload validation but fails
    // at the store, which is the logged soft path rather than an error.
    let mut values = valid_values("Walk");
    values.put("noSuchColumn", Value::Integer(1));

    let result = provider.insert(&collection, &values).unwrap();
    assert!(result.is_none());

    // The façade stays usable after the soft failure.
    let item = provider
        .insert(&collection, &valid_values("Walk"))
        .unwrap();
    assert!(item.is_some());
}
