//! Integration tests for the user and refresh token repositories.
//!
//! Runs against an in-memory `SQLite` database migrated from scratch.

use chrono::{Duration, Utc};
use peachtree_db::{RefreshTokenRepository, Store, StoreError, connect, migration::Migrator};
use peachtree_shared::DatabaseConfig;
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

async fn setup() -> Store {
    let mut config = DatabaseConfig::new("sqlite::memory:");
    config.max_connections = 1;
    config.min_connections = 1;

    let store = connect(&config).await.expect("Failed to connect to database");
    Migrator::up(store.connection(), None)
        .await
        .expect("Failed to run migrations");
    store
}

#[tokio::test]
async fn test_user_create_and_find() {
    let store = setup().await;
    let users = store.users();

    let created = users.create("alice", "$argon2id$test").await.unwrap();
    assert_eq!(created.username, "alice");

    let found = users.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert!(users.username_exists("alice").await.unwrap());
    assert!(!users.username_exists("Alice").await.unwrap());
    assert!(users.find_by_username("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_username_is_unique_violation() {
    let store = setup().await;
    let users = store.users();

    users.create("alice", "hash-1").await.unwrap();
    let err = users.create("alice", "hash-2").await.unwrap_err();

    assert!(matches!(err, StoreError::UniqueViolation(_)), "got {err:?}");
}

#[tokio::test]
async fn test_delete_by_username() {
    let store = setup().await;
    let users = store.users();

    users.create("alice", "hash").await.unwrap();

    assert!(users.delete_by_username("alice").await.unwrap());
    assert!(!users.delete_by_username("alice").await.unwrap());
    assert!(users.find_by_username("alice").await.unwrap().is_none());
}

#[tokio::test]
async fn test_refresh_token_lifecycle() {
    let store = setup().await;
    let tokens = store.refresh_tokens();
    let expires_at = Utc::now() + Duration::days(7);

    let record = tokens
        .store("alice", "token-a", Uuid::new_v4(), expires_at)
        .await
        .unwrap();
    assert!(!record.revoked);
    assert_eq!(record.token_hash, RefreshTokenRepository::hash_token("token-a"));
    assert_ne!(record.token_hash, "token-a");

    assert!(!tokens.is_revoked("token-a").await.unwrap());

    assert!(tokens.revoke_by_token("token-a").await.unwrap());
    assert!(tokens.is_revoked("token-a").await.unwrap());

    // Revoking twice is a no-op
    assert!(tokens.revoke_by_token("token-a").await.unwrap());
    let record = tokens.find_by_token("token-a").await.unwrap().unwrap();
    assert!(record.revoked);
}

#[tokio::test]
async fn test_unknown_token_counts_as_revoked() {
    let store = setup().await;
    let tokens = store.refresh_tokens();

    assert!(tokens.find_by_token("never-issued").await.unwrap().is_none());
    assert!(tokens.is_revoked("never-issued").await.unwrap());
    assert!(!tokens.revoke_by_token("never-issued").await.unwrap());
}

#[tokio::test]
async fn test_revoking_one_token_leaves_others() {
    let store = setup().await;
    let tokens = store.refresh_tokens();
    let expires_at = Utc::now() + Duration::days(7);

    tokens
        .store("alice", "token-a", Uuid::new_v4(), expires_at)
        .await
        .unwrap();
    tokens
        .store("alice", "token-b", Uuid::new_v4(), expires_at)
        .await
        .unwrap();

    tokens.revoke_by_token("token-a").await.unwrap();

    assert!(tokens.is_revoked("token-a").await.unwrap());
    assert!(!tokens.is_revoked("token-b").await.unwrap());
}

#[tokio::test]
async fn test_tokens_survive_user_deletion() {
    let store = setup().await;
    let expires_at = Utc::now() + Duration::days(7);

    store.users().create("alice", "hash").await.unwrap();
    store
        .refresh_tokens()
        .store("alice", "token-a", Uuid::new_v4(), expires_at)
        .await
        .unwrap();

    store.users().delete_by_username("alice").await.unwrap();

    assert!(
        store
            .refresh_tokens()
            .find_by_token("token-a")
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_ping() {
    let store = setup().await;
    store.ping().await.unwrap();
}
