use super::error::{EngineError, Lookup};
use crate::core::models::dataset::Dataset;
use crate::core::models::ids::DatasetId;
use crate::core::models::record::SequenceRecord;
use crate::core::models::table::Table;
use slotmap::SlotMap;
use std::collections::HashSet;
use tracing::debug;

/// Registry of open datasets plus their presentation order.
///
/// `display_index` always holds every key of `datasets` exactly once, so
/// positions are dense in `0..len()`.
#[derive(Debug, Default)]
pub struct DatasetStore {
    datasets: SlotMap<DatasetId, Dataset>,
    display_index: Vec<DatasetId>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dataset under a fresh uid at the end of the display order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InconsistentDataset`] if `records` is present
    /// and its length differs from the table's row count. Nothing is
    /// inserted in that case.
    pub fn register(
        &mut self,
        table: Table,
        records: Option<Vec<SequenceRecord>>,
        display_name: impl Into<String>,
    ) -> Result<DatasetId, EngineError> {
        Dataset::validate(&table, records.as_deref())?;
        let name = display_name.into();
        let uid = self.datasets.insert_with_key(|uid| Dataset {
            uid,
            name: name.clone(),
            table,
            records,
        });

        self.display_index.push(uid);
        debug!(
            ?uid,
            position = self.display_index.len() - 1,
            "Registered dataset '{}'",
            name
        );
        Ok(uid)
    }

    /// Removes the dataset shown at `position`; later positions shift down.
    pub fn close(&mut self, position: usize) -> Result<Dataset, EngineError> {
        if position >= self.display_index.len() {
            return Err(EngineError::NotFound(Lookup::Position(position)));
        }
        let uid = self.display_index.remove(position);
        let dataset = self
            .datasets
            .remove(uid)
            .ok_or(EngineError::NotFound(Lookup::Uid(uid)))?;
        debug!(?uid, position, "Closed dataset '{}'", dataset.name);
        Ok(dataset)
    }

    pub fn close_uid(&mut self, uid: DatasetId) -> Result<Dataset, EngineError> {
        let position = self
            .position_of(uid)
            .ok_or(EngineError::NotFound(Lookup::Uid(uid)))?;
        self.close(position)
    }

    /// Replaces the display order, e.g. after the presentation layer moved a
    /// view. `order` must list every registered uid exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] for an unknown uid and
    /// [`EngineError::DisplayOrder`] if `order` omits or repeats a uid. The
    /// current order is kept on error.
    pub fn reindex(&mut self, order: &[DatasetId]) -> Result<(), EngineError> {
        if let Some(&uid) = order.iter().find(|&&uid| !self.datasets.contains_key(uid)) {
            return Err(EngineError::NotFound(Lookup::Uid(uid)));
        }
        let distinct: HashSet<DatasetId> = order.iter().copied().collect();
        if distinct.len() != order.len() || order.len() != self.datasets.len() {
            return Err(EngineError::DisplayOrder {
                expected: self.datasets.len(),
                distinct: distinct.len(),
                given: order.len(),
            });
        }
        self.display_index = order.to_vec();
        debug!(datasets = order.len(), "Reindexed display order");
        Ok(())
    }

    pub fn get(&self, uid: DatasetId) -> Result<&Dataset, EngineError> {
        self.datasets
            .get(uid)
            .ok_or(EngineError::NotFound(Lookup::Uid(uid)))
    }

    pub fn get_mut(&mut self, uid: DatasetId) -> Result<&mut Dataset, EngineError> {
        self.datasets
            .get_mut(uid)
            .ok_or(EngineError::NotFound(Lookup::Uid(uid)))
    }

    pub fn position_of(&self, uid: DatasetId) -> Option<usize> {
        self.display_index.iter().position(|&u| u == uid)
    }

    pub fn uid_at(&self, position: usize) -> Option<DatasetId> {
        self.display_index.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.display_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.display_index.is_empty()
    }

    /// Datasets in display order, paired with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Dataset)> {
        self.display_index
            .iter()
            .enumerate()
            .filter_map(|(position, &uid)| self.datasets.get(uid).map(|d| (position, d)))
    }
}
