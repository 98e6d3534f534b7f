mod error;
mod google_sheet;
mod row_mapping;

pub use error::{Result as SourceResult, SourceError};
pub use google_sheet::GoogleSheetSource;
pub use row_mapping::{align_to_headers, row_to_customer, rows_to_maps};

use async_trait::async_trait;
use serde_json::{Map, Value};

/// One data row keyed by its column header
pub type SheetRow = Map<String, Value>;

/// External system of record for customers (a spreadsheet).
#[async_trait]
pub trait PrimarySource: Send + Sync {
    /// Every data row below the header row.
    async fn fetch_all(&self) -> SourceResult<Vec<SheetRow>>;

    /// Append one row, placing values under the matching header columns.
    async fn append(&self, row: &SheetRow) -> SourceResult<()>;
}
