pub mod client;
pub mod context;
pub mod identity;
pub mod locale;
pub mod rows;
pub mod sync;
pub mod validate;

pub use client::{ClientError, CmsClient, ElementValue, ItemRef};
pub use context::{Environment, ParseEnvironmentError, RunContext};
pub use locale::{DEFAULT_LOCALE, LocaleEntry, LocaleMap, LocaleMapError};
pub use rows::{CsvRow, ReadError, RowReader, read_rows};
pub use sync::{
    ItemError, SyncError, SyncOutcome, TITLE_ELEMENT, UnprocessedRecord, sync, sync_file,
};
pub use validate::{ValidateError, validate};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
