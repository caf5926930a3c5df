//! Transaction and reference data routes.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use chrono::{DateTime, FixedOffset};
use peachtree_core::ledger::{ListQuery, TransactionType};
use peachtree_db::{
    CreateTransactionInput, TransactionDetail,
    entities::{contractors, system_accounts, transaction_statuses},
};
use peachtree_shared::AppError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions/contractors", get(list_contractors))
        .route("/transactions/statuses", get(list_statuses))
        .route("/transactions/accounts", get(list_accounts))
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/{id}", get(get_transaction))
        .route("/transactions/{id}/status", put(update_status))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct ListTransactionsQuery {
    /// `date`, `contractor` or `amount`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
    /// Case-insensitive contractor name fragment.
    pub search: Option<String>,
}

/// Request body for creating a transaction.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTransactionRequest {
    /// Receiving contractor.
    pub contractor_id: Option<i32>,
    /// `card_payment`, `online_transfer` or `transaction`.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Amount as a decimal string or number.
    pub amount: Option<Decimal>,
    /// System account to debit.
    pub account_id: Option<i32>,
}

/// Request body for changing a transaction's status.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status.
    pub status_id: Option<i32>,
}

/// Transaction with nested contractor and status.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction id.
    pub id: i32,
    /// Recording user.
    pub user_id: i32,
    /// Creation time (RFC 3339).
    pub date: DateTime<FixedOffset>,
    /// Receiving contractor.
    pub contractor: contractors::Model,
    /// Kind of transfer.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Amount as a two-place decimal string.
    pub amount: Decimal,
    /// Current status.
    pub status: transaction_statuses::Model,
}

impl From<TransactionDetail> for TransactionResponse {
    fn from(detail: TransactionDetail) -> Self {
        let TransactionDetail {
            transaction,
            contractor,
            status,
        } = detail;

        Self {
            id: transaction.id,
            user_id: transaction.user_id,
            date: transaction.date,
            contractor,
            transaction_type: transaction.transaction_type.into(),
            amount: money(transaction.amount),
            status,
        }
    }
}

/// System account with its balance.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account id.
    pub id: i32,
    /// Account name.
    pub name: String,
    /// Balance as a two-place decimal string.
    pub balance: Decimal,
}

impl From<system_accounts::Model> for AccountResponse {
    fn from(account: system_accounts::Model) -> Self {
        Self {
            id: account.id,
            name: account.name,
            balance: money(account.balance),
        }
    }
}

/// Normalizes a stored amount to exactly two decimal places.
fn money(amount: Decimal) -> Decimal {
    let mut amount = amount.round_dp(2);
    amount.rescale(2);
    amount
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError(AppError::Validation(format!("{field} is required"))))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /transactions/contractors - List all contractors.
async fn list_contractors(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let contractors = state.store.reference().list_contractors().await?;
    Ok(Json(contractors))
}

/// GET /transactions/statuses - List all transaction statuses.
async fn list_statuses(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let statuses = state.store.reference().list_statuses().await?;
    Ok(Json(statuses))
}

/// GET /transactions/accounts - List all system accounts.
async fn list_accounts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let accounts = state.store.reference().list_accounts().await?;
    Ok(Json(
        accounts
            .into_iter()
            .map(AccountResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// POST /transactions - Debit an account and record a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::from_json_rejection(&e))?;

    let contractor_id = required(payload.contractor_id, "contractor_id")?;
    let transaction_type: TransactionType =
        required(payload.transaction_type, "type")?.parse()?;
    let amount = required(payload.amount, "amount")?;
    let account_id = required(payload.account_id, "account_id")?;

    let Some(owner) = state.store.users().find_by_username(user.username()).await? else {
        return Err(ApiError(AppError::NotFound("User not found".to_string())));
    };

    let detail = state
        .store
        .transactions()
        .create_transaction(CreateTransactionInput {
            user_id: owner.id,
            contractor_id,
            transaction_type,
            amount,
            account_id,
        })
        .await?;

    info!(
        transaction_id = detail.transaction.id,
        user_id = owner.id,
        account_id,
        amount = %amount,
        "Transaction created"
    );

    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse::from(detail)),
    ))
}

/// GET /transactions - List transactions with optional search and sorting.
async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<ListTransactionsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListQuery::from_params(
        params.sort_by.as_deref(),
        params.sort_order.as_deref(),
        params.search.as_deref(),
    );

    let transactions = state
        .store
        .transactions()
        .list_transactions(&query)
        .await?;

    Ok(Json(
        transactions
            .into_iter()
            .map(TransactionResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /transactions/{id} - Get a single transaction.
async fn get_transaction(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::from_path_rejection(&e))?;

    let detail = state.store.transactions().get_transaction(id).await?;
    Ok(Json(TransactionResponse::from(detail)))
}

/// PUT /transactions/{id}/status - Move a transaction to another status.
async fn update_status(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::from_path_rejection(&e))?;
    let Json(payload) = payload.map_err(|e| ApiError::from_json_rejection(&e))?;
    let status_id = required(payload.status_id, "status_id")?;

    let detail = state
        .store
        .transactions()
        .update_status(id, status_id)
        .await?;

    info!(transaction_id = id, status = %detail.status.name, "Transaction status updated");
    Ok(Json(TransactionResponse::from(detail)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_has_two_places() {
        assert_eq!(money(dec!(60)).to_string(), "60.00");
        assert_eq!(money(dec!(12.5)).to_string(), "12.50");
        assert_eq!(money(dec!(0.01)).to_string(), "0.01");
    }
}

#[cfg(test)]
mod integration_tests {
    use axum::{Router, http::StatusCode};
    use peachtree_db::entities::{contractors, system_accounts};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sea_orm::{ActiveModelTrait, ActiveValue::Set};
    use serde_json::{Value, json};

    use crate::{
        AppState,
        test_support::{send, test_app},
    };

    struct Seeded {
        app: Router,
        token: String,
        account_id: i32,
        acme_id: i32,
        globex_id: i32,
    }

    async fn seeded(balance: Decimal) -> Seeded {
        let (app, state) = test_app().await;
        let (account_id, acme_id, globex_id) = seed_reference(&state, balance).await;

        let creds = json!({ "username": "teller", "password": "pw" });
        send(&app, "POST", "/auth/register", None, Some(creds.clone())).await;
        let (_, tokens) = send(&app, "POST", "/auth/login", None, Some(creds)).await;
        let token = tokens["access_token"].as_str().unwrap().to_string();

        Seeded {
            app,
            token,
            account_id,
            acme_id,
            globex_id,
        }
    }

    async fn seed_reference(state: &AppState, balance: Decimal) -> (i32, i32, i32) {
        let db = state.store.connection();
        let account = system_accounts::ActiveModel {
            name: Set("Main".to_string()),
            balance: Set(balance),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let acme = contractors::ActiveModel {
            name: Set("Acme Corp".to_string()),
            image_url: Set("https://example.com/acme.png".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        let globex = contractors::ActiveModel {
            name: Set("Globex".to_string()),
            image_url: Set("https://example.com/globex.png".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
        (account.id, acme.id, globex.id)
    }

    impl Seeded {
        async fn create(&self, contractor_id: i32, amount: &str) -> (StatusCode, Value) {
            send(
                &self.app,
                "POST",
                "/transactions",
                Some(&self.token),
                Some(json!({
                    "contractor_id": contractor_id,
                    "type": "online_transfer",
                    "amount": amount,
                    "account_id": self.account_id,
                })),
            )
            .await
        }

        async fn get(&self, uri: &str) -> (StatusCode, Value) {
            send(&self.app, "GET", uri, Some(&self.token), None).await
        }

        async fn balance(&self) -> String {
            let (_, accounts) = self.get("/transactions/accounts").await;
            accounts[0]["balance"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn test_reference_endpoints() {
        let fx = seeded(dec!(100.00)).await;

        let (status, contractors) = fx.get("/transactions/contractors").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(contractors[0]["name"], "Acme Corp");
        assert!(contractors[0]["image_url"].is_string());

        let (status, statuses) = fx.get("/transactions/statuses").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(statuses[0]["name"], "sent");
        assert!(statuses[0]["color"].is_string());

        assert_eq!(fx.balance().await, "100.00");
    }

    #[tokio::test]
    async fn test_balance_scenario() {
        let fx = seeded(dec!(100.00)).await;

        let (status, created) = fx.create(fx.acme_id, "40.00").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"]["name"], "sent");
        assert_eq!(created["contractor"]["name"], "Acme Corp");
        assert_eq!(created["type"], "online_transfer");
        assert_eq!(created["amount"], "40.00");
        assert_eq!(fx.balance().await, "60.00");

        let (status, body) = fx.create(fx.acme_id, "70.00").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INSUFFICIENT_FUNDS");
        assert_eq!(fx.balance().await, "60.00");

        let (_, all) = fx.get("/transactions").await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let fx = seeded(dec!(100.00)).await;

        let (status, body) = fx.create(fx.acme_id, "0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");

        let (status, _) = send(
            &fx.app,
            "POST",
            "/transactions",
            Some(&fx.token),
            Some(json!({
                "contractor_id": fx.acme_id,
                "type": "wire",
                "amount": "5.00",
                "account_id": fx.account_id,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &fx.app,
            "POST",
            "/transactions",
            Some(&fx.token),
            Some(json!({ "contractor_id": fx.acme_id, "type": "transaction" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");

        let (status, _) = fx.create(999, "5.00").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        assert_eq!(fx.balance().await, "100.00");
    }

    #[tokio::test]
    async fn test_create_after_account_deleted() {
        let fx = seeded(dec!(100.00)).await;

        let (status, _) = send(&fx.app, "DELETE", "/auth/delete", Some(&fx.token), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = fx.create(fx.acme_id, "5.00").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");
    }

    #[tokio::test]
    async fn test_list_search_and_sort() {
        let fx = seeded(dec!(1000.00)).await;
        fx.create(fx.globex_id, "30.00").await;
        fx.create(fx.acme_id, "10.00").await;
        fx.create(fx.acme_id, "20.00").await;

        let (status, found) = fx.get("/transactions?search=ACME").await;
        assert_eq!(status, StatusCode::OK);
        let found = found.as_array().unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|t| t["contractor"]["name"] == "Acme Corp"));

        let (_, sorted) = fx.get("/transactions?sort_by=amount&sort_order=asc").await;
        let amounts: Vec<&str> = sorted
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["amount"].as_str().unwrap())
            .collect();
        assert_eq!(amounts, vec!["10.00", "20.00", "30.00"]);

        let (status, fallback) = fx.get("/transactions?sort_by=nonsense").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fallback.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_get_and_update_status() {
        let fx = seeded(dec!(100.00)).await;
        let (_, created) = fx.create(fx.acme_id, "10.00").await;
        let id = created["id"].as_i64().unwrap();

        let (_, statuses) = fx.get("/transactions/statuses").await;
        let paid = statuses
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["name"] == "paid")
            .unwrap()["id"]
            .as_i64()
            .unwrap();

        let uri = format!("/transactions/{id}/status");
        let (status, updated) = send(
            &fx.app,
            "PUT",
            &uri,
            Some(&fx.token),
            Some(json!({ "status_id": paid })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"]["name"], "paid");

        let (status, fetched) = fx.get(&format!("/transactions/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["status"]["name"], "paid");

        let (status, _) = send(&fx.app, "PUT", &uri, Some(&fx.token), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &fx.app,
            "PUT",
            "/transactions/999/status",
            Some(&fx.token),
            Some(json!({ "status_id": paid })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = fx.get("/transactions/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = fx.get("/transactions/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
