/*
 * Error type shared by every strip operation.
 *
 * Nothing in this crate treats a failure as fatal: layout with no items, events from
 * containers the strip no longer owns, and out-of-range selections are all reported
 * through `report` and then abandoned. Callers receive the error so tests and hosts
 * can observe what was skipped, but ignoring it is always safe.
 */

use crate::types::{ContainerTag, StripId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StripError {
    #[error("empty items")]
    EmptyItems,
    #[error("interaction from unknown sender {tag:?} (owner {owner:?})")]
    UnknownSender { owner: StripId, tag: ContainerTag },
    #[error("item index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("{0} is unsupported by the custom tab strip")]
    Unsupported(&'static str),
    #[error("operation failed: {0}")]
    OperationFailed(String),
}

pub type Result<T> = std::result::Result<T, StripError>;

/// Process-wide diagnostic hook. Loud in debug builds, quiet in release builds.
pub(crate) fn report(err: StripError) -> StripError {
    if cfg!(debug_assertions) {
        log::error!("ERROR: tab strip caught an error '{err}'");
    } else {
        log::debug!("tab strip caught an error '{err}'");
    }
    err
}
