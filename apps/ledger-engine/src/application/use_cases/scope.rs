//! Commit-or-rollback handling for ledger scopes.

use crate::domain::ledger::{LedgerError, LedgerScope};

/// Commit the scope if `result` succeeded, otherwise roll it back.
///
/// A failed commit is reported as the operation's error.
pub(crate) async fn finish_scope<T>(
    mut scope: Box<dyn LedgerScope>,
    result: Result<T, LedgerError>,
) -> Result<T, LedgerError> {
    match result {
        Ok(value) => {
            scope.commit().await?;
            Ok(value)
        }
        Err(e) => {
            scope.rollback().await;
            tracing::debug!(owner = %scope.owner(), error = %e, "Ledger scope rolled back");
            Err(e)
        }
    }
}
