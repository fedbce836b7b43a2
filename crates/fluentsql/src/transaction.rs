//! Transaction helpers.
//!
//! Transactions are session state: [`Session::begin`](crate::Session::begin)
//! opens one on the session's connection and every statement executed through
//! that session runs inside it until commit or rollback.
//!
//! For ergonomic commit/rollback handling, use the [`transaction!`] macro.
//!
//! # Example
//!
//! ```ignore
//! use fluentsql::{insert, update, StmtResult};
//!
//! # async fn demo(session: &fluentsql::MySqlSession) -> StmtResult<()> {
//! fluentsql::transaction!(session, {
//!     update()
//!         .table("accounts")
//!         .columns(["balance"])
//!         .values([900])
//!         .where_("id = ?", [1])
//!         .execute(session)
//!         .await?;
//!     insert()
//!         .into("ledger")
//!         .columns(["account_id", "delta"])
//!         .values([1, -100])
//!         .execute(session)
//!         .await?;
//!     Ok(())
//! })?;
//! # Ok(()) }
//! ```

/// Runs the given block inside a database transaction.
///
/// - Begins a transaction via [`Session::begin`](crate::Session::begin).
/// - Commits on `Ok(_)`.
/// - Rolls back on `Err(_)`; a failed rollback is reported together with the
///   original error.
///
/// `$session` must be a reference to a [`Session`](crate::Session). The block
/// must evaluate to `fluentsql::StmtResult<T>`.
#[macro_export]
macro_rules! transaction {
    ($session:expr, $body:block) => {{
        let __fluentsql_session = $session;
        $crate::Session::begin(__fluentsql_session).await?;

        let __fluentsql_tx_body_result: $crate::StmtResult<_> = async { $body }.await;
        match __fluentsql_tx_body_result {
            Ok(value) => {
                $crate::Session::commit(__fluentsql_session).await?;
                Ok(value)
            }
            Err(error) => match $crate::Session::rollback(__fluentsql_session).await {
                Ok(()) => Err(error),
                Err(rollback_err) => Err($crate::StmtError::Other(format!(
                    "{error} (rollback failed: {rollback_err})"
                ))),
            },
        }
    }};
}
