//! Integration tests for the SQLite user repository

#![allow(dead_code)]

#[path = "support.rs"]
mod support;

use reserva_core::UserRepository;
use reserva_domain::{ReservaError, TokenSet};
use reserva_infra::database::SqliteUserRepository;
use support::{test_user, TestDatabase};

#[tokio::test]
async fn upsert_and_find_roundtrip() {
    let db = TestDatabase::new();
    let repo = SqliteUserRepository::new(db.manager.clone());

    let user = test_user();
    repo.upsert(&user).await.unwrap();

    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, user.email);
    assert_eq!(by_id.role, user.role);

    let by_email = repo.find_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn upsert_refreshes_profile_without_touching_tokens() {
    let db = TestDatabase::new();
    let repo = SqliteUserRepository::new(db.manager.clone());

    let mut user = test_user();
    repo.upsert(&user).await.unwrap();
    repo.update_tokens(
        user.id,
        &TokenSet::new("access".into(), Some("refresh".into()), None, 3600),
    )
    .await
    .unwrap();

    user.name = Some("Ana María".to_string());
    repo.upsert(&user).await.unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.name.as_deref(), Some("Ana María"));
    // the token pair survived the profile refresh
    assert!(stored.credentials().is_some());
}

#[tokio::test]
async fn update_tokens_keeps_stored_refresh_token_when_not_rotated() {
    let db = TestDatabase::new();
    let repo = SqliteUserRepository::new(db.manager.clone());

    let user = test_user();
    repo.upsert(&user).await.unwrap();
    repo.update_tokens(
        user.id,
        &TokenSet::new("access-1".into(), Some("refresh-1".into()), None, 3600),
    )
    .await
    .unwrap();

    // refresh grant without a rotated refresh token
    repo.update_tokens(user.id, &TokenSet::new("access-2".into(), None, None, 3600))
        .await
        .unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    let creds = stored.credentials().unwrap();
    assert_eq!(creds.access_token, "access-2");
    assert_eq!(creds.refresh_token, "refresh-1");
    assert!(creds.token_expiry.is_some());
}

#[tokio::test]
async fn clear_tokens_drops_the_whole_pair() {
    let db = TestDatabase::new();
    let repo = SqliteUserRepository::new(db.manager.clone());

    let user = test_user();
    repo.upsert(&user).await.unwrap();
    repo.update_tokens(
        user.id,
        &TokenSet::new("access".into(), Some("refresh".into()), None, 3600),
    )
    .await
    .unwrap();

    repo.clear_tokens(user.id).await.unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.credentials().is_none());
    assert!(stored.token_expiry.is_none());
}

#[tokio::test]
async fn token_update_for_unknown_user_is_not_found() {
    let db = TestDatabase::new();
    let repo = SqliteUserRepository::new(db.manager.clone());

    let result = repo
        .update_tokens(
            uuid::Uuid::new_v4(),
            &TokenSet::new("access".into(), Some("refresh".into()), None, 3600),
        )
        .await;
    assert!(matches!(result, Err(ReservaError::NotFound(_))));
}

#[tokio::test]
async fn duplicate_email_insert_updates_instead_of_failing() {
    let db = TestDatabase::new();
    let repo = SqliteUserRepository::new(db.manager.clone());

    let user = test_user();
    repo.upsert(&user).await.unwrap();

    let mut duplicate = test_user();
    duplicate.email = user.email.clone();
    duplicate.name = Some("Replacement".to_string());
    repo.upsert(&duplicate).await.unwrap();

    // the original row id wins; only profile fields changed
    let stored = repo.find_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(stored.id, user.id);
    assert_eq!(stored.name.as_deref(), Some("Replacement"));
}
