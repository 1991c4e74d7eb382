//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `habitstore_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use habitstore_core::contract::{COLUMN_NAME, COLUMN_TIME_OF_DAY};
use habitstore_core::{default_log_level, init_logging, Habit, HabitProvider, TimeOfDay};

fn main() {
    println!("habitstore_core version={}", habitstore_core::core_version());

    let log_dir = std::env::temp_dir().join("habitstore-logs");
    match log_dir.to_str() {
        Some(dir) => {
            if let Err(err) = init_logging(default_log_level(), dir) {
                eprintln!("logging init failed: {err}");
            }
        }
        None => eprintln!("logging disabled: temp dir is not valid UTF-8"),
    }

    let provider = HabitProvider::in_memory();
    let collection = provider.matcher().collection_locator();
    println!("authority={}", provider.matcher().authority());

    let mut habit = Habit::new("Music", TimeOfDay::Morning);
    habit.day_of_week = Some("Monday".to_string());
    habit.frequency = Some(1);

    match provider.insert(&collection, &habit.to_values()) {
        Ok(Some(item)) => {
            println!("inserted habit at {item}");
            match provider.query(&collection, None, None, &[], None) {
                Ok(rows) => {
                    println!("habit rows={}", rows.len());
                    for row in rows.iter() {
                        println!(
                            "habit name={} timeOfDay={}",
                            row.text(COLUMN_NAME).unwrap_or("<null>"),
                            row.integer(COLUMN_TIME_OF_DAY).unwrap_or(-1)
                        );
                    }
                }
                Err(err) => eprintln!("query failed: {err}"),
            }
        }
        Ok(None) => eprintln!("insert was rejected by the store"),
        Err(err) => eprintln!("insert failed: {err}"),
    }
}
