use std::path::Path;

use serde::Serialize;

use crate::client::{ClientError, CmsClient, ElementValue};
use crate::context::RunContext;
use crate::identity;
use crate::locale::{DEFAULT_LOCALE, LocaleMap};
use crate::rows::{CsvRow, ReadError, read_rows};
use crate::validate::{ValidateError, validate};

/// The element each row's localized value lands in.
pub const TITLE_ELEMENT: &str = "title";

/// One row that could not be synced, with a best-effort reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnprocessedRecord {
    pub name: String,
    pub reason: String,
}

/// Per-run aggregate returned to the caller. Serializes to the
/// camelCase run-result contract.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub processed_count: u32,
    pub unprocessed_count: u32,
    pub unprocessed_records: Vec<UnprocessedRecord>,
}

impl SyncOutcome {
    fn record_failure(&mut self, name: String, reason: String) {
        self.unprocessed_count += 1;
        self.unprocessed_records.push(UnprocessedRecord { name, reason });
    }
}

/// Failures that abort the whole run. Per-row failures never do; they
/// surface only in `SyncOutcome::unprocessed_records`.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidateError),

    #[error(transparent)]
    Read(#[from] ReadError),
}

/// A per-item failure, classified by the workflow step that failed.
///
/// The steps form a fixed linear sequence (lookup, create, review-step
/// resolution, variant upsert, review transition, publish); a later step
/// is never attempted after an earlier one fails, and a failed item is
/// abandoned rather than rolled back. Display delegates to the remote
/// reason so records carry the message the CMS actually returned.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("{0}")]
    Lookup(ClientError),

    #[error("{0}")]
    Create(ClientError),

    #[error("{0}")]
    Variant(ClientError),

    #[error("{0}")]
    Workflow(ClientError),

    #[error("{0}")]
    Publish(ClientError),
}

/// Validate the file, then stream its rows through [`sync`]. The two
/// passes open the file independently; validation failures abort before
/// any remote call.
pub async fn sync_file<C>(
    client: &C,
    path: &Path,
    locales: &LocaleMap,
    ctx: &RunContext,
) -> Result<SyncOutcome, SyncError>
where
    C: CmsClient + ?Sized,
{
    validate(path, locales)?;
    let rows = read_rows(path, locales)?;
    sync(client, rows, locales, ctx).await
}

/// Drive the per-item remote workflow for every row, strictly in input
/// order, and aggregate the outcomes.
///
/// Rows whose codename already resolves remotely count as processed
/// without further per-locale work. A failure on one row is recorded and
/// the run continues; only a row-stream read failure aborts.
pub async fn sync<C>(
    client: &C,
    rows: impl IntoIterator<Item = Result<CsvRow, ReadError>>,
    locales: &LocaleMap,
    ctx: &RunContext,
) -> Result<SyncOutcome, SyncError>
where
    C: CmsClient + ?Sized,
{
    let mut outcome = SyncOutcome::default();

    for row in rows {
        let row = row?;
        let item_name = row.item_name();
        let codename = identity::item_codename(&ctx.content_type, &item_name);

        match sync_row(client, &row, &item_name, &codename, locales, ctx).await {
            Ok(()) => outcome.processed_count += 1,
            Err(e) => outcome.record_failure(item_name, e.to_string()),
        }
    }

    Ok(outcome)
}

async fn sync_row<C>(
    client: &C,
    row: &CsvRow,
    item_name: &str,
    codename: &str,
    locales: &LocaleMap,
    ctx: &RunContext,
) -> Result<(), ItemError>
where
    C: CmsClient + ?Sized,
{
    // A transport failure here propagates; it must not be read as
    // "item does not exist".
    let existing = client
        .find_item(codename)
        .await
        .map_err(ItemError::Lookup)?;

    if existing.is_some() {
        // Already synced on a previous run; nothing to re-verify.
        return Ok(());
    }

    let item = client
        .create_item(item_name, codename, &ctx.content_type)
        .await
        .map_err(ItemError::Create)?;

    let review_step = if ctx.environment.requires_review() {
        Some(client.review_step_id().await.map_err(ItemError::Workflow)?)
    } else {
        None
    };

    for entry in locales.entries() {
        let Some(language_id) = entry.language_id.as_deref() else {
            continue;
        };

        let elements = title_elements(row, &entry.code);
        client
            .upsert_variant(&item.id, language_id, &elements)
            .await
            .map_err(ItemError::Variant)?;

        if let Some(step_id) = &review_step {
            client
                .move_to_step(&item.id, language_id, step_id)
                .await
                .map_err(ItemError::Workflow)?;
        }

        client
            .publish_variant(&item.id, language_id)
            .await
            .map_err(ItemError::Publish)?;
    }

    Ok(())
}

/// The variant payload for one locale: a single title element whose value
/// falls back to the default locale's value, then to empty.
fn title_elements(row: &CsvRow, code: &str) -> Vec<ElementValue> {
    let value = match row.value(code) {
        "" => row.value(DEFAULT_LOCALE),
        value => value,
    };

    vec![ElementValue::new(TITLE_ELEMENT, value)]
}
