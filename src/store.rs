//! Process-lifetime cache of the loaded rows and their aggregates.
//!
//! Each slot is a [`OnceCell`]: the first caller runs the computation and
//! concurrent callers wait for that same run. Nothing is ever invalidated.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::aggregators::{GroupUsageRow, ModalSplit, modal_split, usage_by_group};
use crate::categories::GroupScheme;
use crate::error::LoadError;
use crate::fetch::TextSource;
use crate::loader;
use crate::row::VehicleRow;
use crate::summary::DatasetSummary;

/// Owns a dataset source and memoizes everything derived from it.
pub struct DataStore<S> {
    source: S,
    scheme: GroupScheme,
    // failures are cached too, a failed load is never retried
    rows: OnceCell<Result<Arc<[VehicleRow]>, LoadError>>,
    modal_split: OnceCell<Arc<ModalSplit>>,
    usage_by_group: OnceCell<Arc<[GroupUsageRow]>>,
}

impl<S: TextSource> DataStore<S> {
    pub fn new(source: S, scheme: GroupScheme) -> Self {
        Self {
            source,
            scheme,
            rows: OnceCell::new(),
            modal_split: OnceCell::new(),
            usage_by_group: OnceCell::new(),
        }
    }

    pub fn scheme(&self) -> GroupScheme {
        self.scheme
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// All rows of the dataset. The source is read at most once.
    ///
    /// # Errors
    ///
    /// The [`LoadError`] of the first attempt, on this and every later call.
    pub async fn load_rows(&self) -> Result<Arc<[VehicleRow]>, LoadError> {
        self.rows
            .get_or_init(|| async {
                match loader::load_rows(&self.source).await {
                    Ok(rows) => Ok(Arc::from(rows)),
                    Err(e) => {
                        error!(error = %e, source = %self.source.describe(), "Dataset load failed");
                        Err(e)
                    }
                }
            })
            .await
            .clone()
    }

    /// Primary-vehicle counts per time period, computed once.
    pub async fn modal_split(&self) -> Result<Arc<ModalSplit>, LoadError> {
        self.modal_split
            .get_or_try_init(|| async {
                let rows = self.load_rows().await?;
                let split = modal_split(&rows);
                info!(periods = split.periods().count(), "Modal split ready");
                Ok::<_, LoadError>(Arc::new(split))
            })
            .await
            .cloned()
    }

    /// Distinct participants per (period, group, vehicle), computed once.
    pub async fn usage_by_group(&self) -> Result<Arc<[GroupUsageRow]>, LoadError> {
        self.usage_by_group
            .get_or_try_init(|| async {
                let rows = self.load_rows().await?;
                let usage = usage_by_group(&rows, self.scheme);
                info!(entries = usage.len(), scheme = %self.scheme, "Group usage ready");
                Ok::<_, LoadError>(Arc::from(usage))
            })
            .await
            .cloned()
    }

    /// Descriptive counts over the loaded rows.
    pub async fn summary(&self) -> Result<DatasetSummary, LoadError> {
        let rows = self.load_rows().await?;
        Ok(DatasetSummary::from_rows(&rows))
    }
}
