//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every public call is bounded by the store timeout.

pub mod reference;
pub mod refresh_token;
pub mod transaction;
pub mod user;

pub use reference::ReferenceRepository;
pub use refresh_token::RefreshTokenRepository;
pub use transaction::{
    CreateTransactionInput, TransactionDetail, TransactionError, TransactionRepository,
};
pub use user::UserRepository;
