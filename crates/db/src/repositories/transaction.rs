//! Transaction repository for ledger transaction database operations.
//!
//! Creating a transaction debits a system account and records the transfer
//! in a single store transaction. The debit is a guarded update, so
//! concurrent debits on one account serialize on its row on every backend.

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use peachtree_core::ledger::{
    INITIAL_STATUS, LedgerError, ListQuery, SortKey, SortOrder, StatusPolicy,
    TransactionType as DomainTransactionType, debit, validate_amount,
};
use peachtree_shared::AppError;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::{Expr, Func, LikeExpr, Order},
};

use crate::entities::{contractors, system_accounts, transaction_statuses, transactions};
use crate::error::{StoreError, bounded};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(i32),

    /// System account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(i32),

    /// Contractor not found.
    #[error("Contractor not found: {0}")]
    ContractorNotFound(i32),

    /// Status not found.
    #[error("Status not found: {0}")]
    StatusNotFound(i32),

    /// The initial status row is missing from reference data.
    #[error("Status '{INITIAL_STATUS}' not found")]
    MissingInitialStatus,

    /// A stored transaction points at a contractor or status that is gone.
    #[error("Transaction {0} references missing reference data")]
    DanglingReference(i32),

    /// The status policy refused the transition.
    #[error("Status transition {from} -> {to} not allowed")]
    IllegalTransition {
        /// Current status id.
        from: i32,
        /// Requested status id.
        to: i32,
    },

    /// Amount or balance rule violated.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Store failure or timeout.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DbErr> for TransactionError {
    fn from(err: DbErr) -> Self {
        Self::Store(err.into())
    }
}

impl From<TransactionError> for AppError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_) => Self::NotFound("Transaction not found".into()),
            TransactionError::AccountNotFound(_) => Self::NotFound("Account not found".into()),
            TransactionError::ContractorNotFound(_) => {
                Self::NotFound("Contractor not found".into())
            }
            TransactionError::StatusNotFound(_) => Self::NotFound("Status not found".into()),
            TransactionError::MissingInitialStatus | TransactionError::DanglingReference(_) => {
                Self::InvariantViolation(err.to_string())
            }
            TransactionError::IllegalTransition { .. } => Self::Validation(err.to_string()),
            TransactionError::Ledger(e) => e.into(),
            TransactionError::Store(e) => e.into(),
        }
    }
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Id of the user recording the transaction.
    pub user_id: i32,
    /// Receiving contractor.
    pub contractor_id: i32,
    /// Kind of transfer.
    pub transaction_type: DomainTransactionType,
    /// Amount to debit.
    pub amount: Decimal,
    /// System account to debit.
    pub account_id: i32,
}

/// Transaction with its contractor and status resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetail {
    /// Transaction row.
    pub transaction: transactions::Model,
    /// Receiving contractor.
    pub contractor: contractors::Model,
    /// Current status.
    pub status: transaction_statuses::Model,
}

/// Transaction repository.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
    timeout: Duration,
    policy: StatusPolicy,
}

impl TransactionRepository {
    /// Creates a new transaction repository with the default status policy.
    #[must_use]
    pub fn new(db: DatabaseConnection, timeout: Duration) -> Self {
        Self {
            db,
            timeout,
            policy: StatusPolicy::default(),
        }
    }

    /// Debits the account and records a transaction in status `sent`.
    ///
    /// Runs in one store transaction: the balance is checked and debited by a
    /// single conditional update, then the transaction is inserted. Any
    /// failure (including a timeout) rolls everything back.
    ///
    /// # Errors
    ///
    /// - `Ledger` if the amount is invalid or exceeds the balance
    /// - `AccountNotFound` / `ContractorNotFound` for unknown references
    /// - `MissingInitialStatus` if the `sent` status row does not exist
    /// - `Store` on database failure or timeout
    pub async fn create_transaction(
        &self,
        input: CreateTransactionInput,
    ) -> Result<TransactionDetail, TransactionError> {
        validate_amount(input.amount)?;

        bounded(self.timeout, self.create_in_scope(input)).await
    }

    async fn create_in_scope(
        &self,
        input: CreateTransactionInput,
    ) -> Result<TransactionDetail, TransactionError> {
        let txn = self.db.begin().await?;

        // Check and decrement in one statement; concurrent debits queue on the
        // row's write lock instead of racing a read-then-write.
        let debited = system_accounts::Entity::update_many()
            .col_expr(
                system_accounts::Column::Balance,
                Expr::col(system_accounts::Column::Balance).sub(input.amount),
            )
            .filter(system_accounts::Column::Id.eq(input.account_id))
            .filter(system_accounts::Column::Balance.gte(input.amount))
            .exec(&txn)
            .await?;

        if debited.rows_affected == 0 {
            let account = system_accounts::Entity::find_by_id(input.account_id)
                .one(&txn)
                .await?
                .ok_or(TransactionError::AccountNotFound(input.account_id))?;
            return Err(shortfall(account.balance, input.amount).into());
        }

        let status = find_status_by_name(&txn, INITIAL_STATUS)
            .await?
            .ok_or(TransactionError::MissingInitialStatus)?;

        let contractor = contractors::Entity::find_by_id(input.contractor_id)
            .one(&txn)
            .await?
            .ok_or(TransactionError::ContractorNotFound(input.contractor_id))?;

        let transaction = transactions::ActiveModel {
            user_id: Set(input.user_id),
            date: Set(Utc::now().into()),
            contractor_id: Set(contractor.id),
            transaction_type: Set(input.transaction_type.into()),
            amount: Set(input.amount),
            status_id: Set(status.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::debug!(
            transaction_id = transaction.id,
            account_id = input.account_id,
            amount = %input.amount,
            "Transaction recorded"
        );

        Ok(TransactionDetail {
            transaction,
            contractor,
            status,
        })
    }

    /// Lists transactions, optionally filtered by contractor name.
    ///
    /// The search is a case-insensitive substring match. Results are sorted
    /// by the requested key with ties broken by id in the same direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or times out.
    pub async fn list_transactions(
        &self,
        query: &ListQuery,
    ) -> Result<Vec<TransactionDetail>, TransactionError> {
        bounded(self.timeout, async {
            let mut select = transactions::Entity::find().find_also_related(contractors::Entity);

            if let Some(search) = &query.search {
                let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
                select = select.filter(
                    Expr::expr(Func::lower(Expr::col((
                        contractors::Entity,
                        contractors::Column::Name,
                    ))))
                    .like(LikeExpr::new(pattern).escape('\\')),
                );
            }

            let direction = match query.sort_order {
                SortOrder::Asc => Order::Asc,
                SortOrder::Desc => Order::Desc,
            };
            select = match query.sort_by {
                SortKey::Date => select.order_by(transactions::Column::Date, direction.clone()),
                SortKey::Amount => select.order_by(transactions::Column::Amount, direction.clone()),
                SortKey::Contractor => {
                    select.order_by(contractors::Column::Name, direction.clone())
                }
            };
            let rows = select
                .order_by(transactions::Column::Id, direction)
                .all(&self.db)
                .await?;

            let statuses: HashMap<i32, transaction_statuses::Model> =
                transaction_statuses::Entity::find()
                    .all(&self.db)
                    .await?
                    .into_iter()
                    .map(|status| (status.id, status))
                    .collect();

            rows.into_iter()
                .map(|(transaction, contractor)| {
                    let contractor =
                        contractor.ok_or(TransactionError::DanglingReference(transaction.id))?;
                    let status = statuses
                        .get(&transaction.status_id)
                        .cloned()
                        .ok_or(TransactionError::DanglingReference(transaction.id))?;
                    Ok(TransactionDetail {
                        transaction,
                        contractor,
                        status,
                    })
                })
                .collect()
        })
        .await
    }

    /// Gets a transaction by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no transaction has this id.
    pub async fn get_transaction(&self, id: i32) -> Result<TransactionDetail, TransactionError> {
        bounded(self.timeout, load_detail(&self.db, id)).await
    }

    /// Moves a transaction to another status and returns the updated row.
    ///
    /// # Errors
    ///
    /// - `StatusNotFound` if `status_id` names no status
    /// - `NotFound` if the transaction does not exist
    /// - `IllegalTransition` if the status policy refuses the move
    pub async fn update_status(
        &self,
        id: i32,
        status_id: i32,
    ) -> Result<TransactionDetail, TransactionError> {
        bounded(self.timeout, async {
            let txn = self.db.begin().await?;

            transaction_statuses::Entity::find_by_id(status_id)
                .one(&txn)
                .await?
                .ok_or(TransactionError::StatusNotFound(status_id))?;

            let current = transactions::Entity::find_by_id(id)
                .one(&txn)
                .await?
                .ok_or(TransactionError::NotFound(id))?;

            if !self.policy.allows(current.status_id, status_id) {
                return Err(TransactionError::IllegalTransition {
                    from: current.status_id,
                    to: status_id,
                });
            }

            transactions::Entity::update_many()
                .col_expr(transactions::Column::StatusId, Expr::value(status_id))
                .filter(transactions::Column::Id.eq(id))
                .exec(&txn)
                .await?;

            let detail = load_detail(&txn, id).await?;
            txn.commit().await?;

            Ok(detail)
        })
        .await
    }
}

async fn find_status_by_name<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Option<transaction_statuses::Model>, DbErr> {
    transaction_statuses::Entity::find()
        .filter(transaction_statuses::Column::Name.eq(name))
        .one(conn)
        .await
}

async fn load_detail<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<TransactionDetail, TransactionError> {
    let (transaction, contractor) = transactions::Entity::find_by_id(id)
        .find_also_related(contractors::Entity)
        .one(conn)
        .await?
        .ok_or(TransactionError::NotFound(id))?;

    let contractor = contractor.ok_or(TransactionError::DanglingReference(id))?;
    let status = transaction_statuses::Entity::find_by_id(transaction.status_id)
        .one(conn)
        .await?
        .ok_or(TransactionError::DanglingReference(id))?;

    Ok(TransactionDetail {
        transaction,
        contractor,
        status,
    })
}

/// Error for a guarded debit that matched no row on an existing account.
fn shortfall(balance: Decimal, amount: Decimal) -> LedgerError {
    debit(balance, amount)
        .err()
        .unwrap_or(LedgerError::InsufficientFunds { balance, amount })
}

/// Escapes `LIKE` wildcards so the search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
