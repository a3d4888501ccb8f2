//! Data directory commands: `init` and `check`.

use super::output::{self, FileStatus};
use anyhow::{bail, Result};
use sonolight_core::{Collection, RecordStore};

pub fn execute_init(store: &RecordStore) -> Result<()> {
    let created = store.ensure_all()?;

    output::header("Init", None);
    output::field("Data dir", store.data_dir().display());
    if created.is_empty() {
        output::file_status(FileStatus::Ok, "All collection files already exist");
        return Ok(());
    }
    for collection in created {
        output::file_status(FileStatus::Ok, &format!("Created {}", collection.file_name()));
    }
    Ok(())
}

pub fn execute_check(store: &RecordStore) -> Result<()> {
    output::header("Data check", None);
    output::field("Data dir", store.data_dir().display());

    let mut failures = 0usize;
    for collection in Collection::ALL {
        if !store.exists(collection) {
            output::file_status(
                FileStatus::Missing,
                &format!("{}: missing", collection.file_name()),
            );
            continue;
        }
        match store.load(collection) {
            Ok(records) => output::file_status(
                FileStatus::Ok,
                &format!("{}: {} record(s)", collection.file_name(), records.len()),
            ),
            Err(err) => {
                failures += 1;
                output::file_status(FileStatus::Failed, &err.to_string());
            }
        }
    }

    if failures > 0 {
        bail!("{failures} collection file(s) failed to load");
    }
    Ok(())
}
