//! Build download tasks from the input URLs.

use std::collections::HashSet;

use super::DownloadTask;
use crate::storage::TEMP_SUFFIX;
use crate::url_model::{derive_filename, with_index_suffix};

/// One task per locator, in input order.
///
/// With `dedupe`, a locator whose derived name was already taken by an
/// earlier task gets its input index appended (`file.gif` → `file-3.gif`).
/// A task's `.part` temp name counts as taken too, so one task's temp file
/// never lands on another task's destination.
/// Without it, colliding tasks share a destination and race on it.
pub fn plan_tasks<S: AsRef<str>>(locators: &[S], dedupe: bool) -> Vec<DownloadTask> {
    let mut claimed: HashSet<String> = HashSet::with_capacity(locators.len());
    locators
        .iter()
        .enumerate()
        .map(|(index, locator)| {
            let locator = locator.as_ref();
            let mut name = derive_filename(locator);
            if dedupe {
                while claimed.contains(&name) || claimed.contains(&part_name(&name)) {
                    name = with_index_suffix(&name, index);
                }
                claimed.insert(part_name(&name));
                claimed.insert(name.clone());
            }
            DownloadTask {
                index,
                source_locator: locator.to_string(),
                destination_name: name,
            }
        })
        .collect()
}

fn part_name(name: &str) -> String {
    format!("{}{}", name, TEMP_SUFFIX)
}
