use crate::core::models::ids::DatasetId;
use crate::core::search::{matching_rows, replace_in_table, replacement_pattern};
use crate::engine::error::EngineError;
use crate::engine::store::DatasetStore;
use tracing::{debug, info, instrument};

/// Display name of the entry registered after an in-place replace.
pub const MODIFIED_TABLE_NAME: &str = "Modified Table";

pub fn filtered_name(source_name: &str, query: &str) -> String {
    format!("{} Filtered: {}", source_name, query)
}

/// Registers a new dataset holding the rows of `uid` that match `query`.
///
/// Linked records of the result are rebuilt from the kept rows' `Name`, `ID`,
/// `Description` and `Sequence` cells, so edits made by an earlier replace
/// carry over. An empty source table is returned unchanged.
#[instrument(skip_all, name = "filter_workflow")]
pub fn filter(
    store: &mut DatasetStore,
    uid: DatasetId,
    query: &str,
) -> Result<DatasetId, EngineError> {
    let source = store.get(uid)?;
    if source.table().is_empty() {
        debug!("Filter on empty dataset '{}' is a no-op", source.name);
        return Ok(uid);
    }

    let rows = matching_rows(source.table(), query);
    let table = source.table().select_rows(&rows);
    let records = if source.has_records() {
        Some(table.to_records()?)
    } else {
        None
    };
    let name = filtered_name(&source.name, query);

    info!(
        kept = rows.len(),
        total = source.n_rows(),
        "Filtered '{}' with query '{}'",
        source.name,
        query
    );
    store.register(table, records, name)
}

/// Substitutes `replacement` for every occurrence of `query` in the text
/// cells of `uid`, then registers a snapshot of the edited table.
///
/// The source table is modified in place and its linked records are left as
/// they were. An empty `replacement` means "keep matching rows" and behaves
/// exactly like [`filter`]. With `use_regex` unset, both the query and the
/// replacement are taken literally.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPattern`] if `use_regex` is set and `query`
/// does not compile.
#[instrument(skip_all, name = "replace_workflow")]
pub fn replace(
    store: &mut DatasetStore,
    uid: DatasetId,
    query: &str,
    replacement: &str,
    use_regex: bool,
) -> Result<DatasetId, EngineError> {
    if replacement.is_empty() {
        return filter(store, uid, query);
    }

    let dataset = store.get_mut(uid)?;
    if dataset.table().is_empty() || query.is_empty() {
        debug!("Replace on '{}' has nothing to do", dataset.name);
        return Ok(uid);
    }

    let pattern =
        replacement_pattern(query, use_regex).map_err(|source| EngineError::InvalidPattern {
            pattern: query.to_string(),
            source,
        })?;
    let changed = replace_in_table(&mut dataset.table, &pattern, replacement, use_regex);
    info!(
        changed,
        "Replaced '{}' with '{}' in '{}'",
        query,
        replacement,
        dataset.name
    );

    let snapshot = dataset.table.clone();
    store.register(snapshot, None, MODIFIED_TABLE_NAME)
}
