//! Batch reconciliation: merges a batch of extraction results into an
//! existing invoice collection, deduplicating by access key and applying
//! confirmed cancellations regardless of arrival order within the batch.

use std::collections::HashMap;

use tracing::warn;

use crate::core::{ExtractError, ImportError, Invoice};
use crate::extract::{self, Extracted};

/// One XML payload handed to [`import_batch`], tagged with a display name
/// (typically the file name) for the rejection report.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub xml: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, xml: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            xml: xml.into(),
        }
    }
}

/// Result of a successful [`import_batch`] call.
#[derive(Debug)]
pub struct ImportReport {
    /// The fully merged collection; becomes the `existing` input of the
    /// next import.
    pub invoices: Vec<Invoice>,
    /// Files handed in.
    pub attempted: usize,
    /// Files that extracted successfully (invoice or cancellation event).
    pub accepted: usize,
    /// Per-file failures, skipped without aborting the batch.
    pub rejected: Vec<(String, ExtractError)>,
}

/// Merge a batch of extraction results into `existing`.
///
/// New invoice records overlay existing ones with the same access key
/// (last write wins within the batch); confirmed cancellations are applied
/// after the overlay, so the final state of a key does not depend on
/// whether its record and its cancellation arrived in either order or even
/// in the same file set. Unconfirmed cancellations are ignored.
///
/// A cancellation whose target key is absent from the merged map is
/// silently dropped: it is not retained across calls, and an invoice
/// imported in a later batch will not retroactively cancel unless the
/// event is re-submitted alongside it. Insertion order of first appearance
/// is preserved, since the ledger report prints rows in collection order.
pub fn reconcile(
    existing: Vec<Invoice>,
    batch: impl IntoIterator<Item = Extracted>,
) -> Vec<Invoice> {
    let mut invoices = existing;
    let mut index: HashMap<String, usize> = invoices
        .iter()
        .enumerate()
        .map(|(i, inv)| (inv.access_key.clone(), i))
        .collect();
    let mut cancellations: Vec<String> = Vec::new();

    for result in batch {
        match result {
            Extracted::Invoice(inv) => match index.get(&inv.access_key) {
                Some(&i) => invoices[i] = inv,
                None => {
                    index.insert(inv.access_key.clone(), invoices.len());
                    invoices.push(inv);
                }
            },
            Extracted::Cancellation(ev) if ev.accepted => cancellations.push(ev.access_key),
            Extracted::Cancellation(_) => {}
        }
    }

    for key in cancellations {
        match index.get(&key) {
            Some(&i) => invoices[i].cancel(),
            None => warn!(
                access_key = %key,
                "cancellation references an unknown invoice, dropped"
            ),
        }
    }

    invoices
}

/// Extract every file of a batch and reconcile the survivors into
/// `existing`.
///
/// Per-file extraction failures are recorded and skipped. The one
/// batch-fatal condition is a non-empty file list that yields neither an
/// invoice record nor a confirmed cancellation: that returns
/// [`ImportError::NoValidDocuments`] with nothing merged — the caller
/// keeps its collection untouched. An event whose outcome code denied the
/// cancellation extracts fine but contributes nothing, so a batch of only
/// such events is still invalid. Partial success is success, with reduced
/// counts.
pub fn import_batch(
    existing: &[Invoice],
    files: &[SourceFile],
) -> Result<ImportReport, ImportError> {
    let attempted = files.len();
    let mut results: Vec<Extracted> = Vec::with_capacity(attempted);
    let mut rejected: Vec<(String, ExtractError)> = Vec::new();
    let mut usable = 0usize;

    for file in files {
        match extract::extract(&file.xml) {
            Ok(parsed) => {
                if !matches!(&parsed, Extracted::Cancellation(ev) if !ev.accepted) {
                    usable += 1;
                }
                results.push(parsed);
            }
            Err(err) => {
                warn!(file = %file.name, error = %err, "skipping file");
                rejected.push((file.name.clone(), err));
            }
        }
    }

    if usable == 0 && attempted > 0 {
        return Err(ImportError::NoValidDocuments { attempted });
    }

    let accepted = results.len();
    Ok(ImportReport {
        invoices: reconcile(existing.to_vec(), results),
        attempted,
        accepted,
        rejected,
    })
}
