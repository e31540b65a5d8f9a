//! Integration tests for MySqlUserRepository.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use roster_core::{HealthCheck, HealthStatus, User, UserChanges, UserId};
use roster_repository::{MySqlUserRepository, UserRepository};
use common::TestDatabase;

#[tokio::test]
async fn test_save_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let user = User::new("Ann", "ann@example.com", 30);
    let saved = repo.save(&user).await.expect("Failed to save user");
    assert_eq!(saved.id, user.id);
    assert_eq!(saved.name, "Ann");

    let found = repo
        .find_by_id(user.id)
        .await
        .expect("Query failed")
        .expect("User not found");

    assert_eq!(found.email, "ann@example.com");
    assert_eq!(found.age, 30);
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let result = repo.find_by_id(UserId::new()).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_find_all_is_ordered_by_creation() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let ann = repo.save(&User::new("Ann", "ann@example.com", 30)).await.unwrap();
    let bob = repo.save(&User::new("Bob", "bob@example.com", 41)).await.unwrap();

    let all = repo.find_all().await.expect("Query failed");
    let ids: Vec<UserId> = all.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![ann.id, bob.id]);
}

#[tokio::test]
async fn test_update_keeps_absent_fields() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let saved = repo.save(&User::new("Ann", "ann@example.com", 30)).await.unwrap();

    let updated = repo
        .update(
            saved.id,
            &UserChanges {
                age: Some(31),
                ..UserChanges::default()
            },
        )
        .await
        .expect("Update failed")
        .expect("User not found");

    assert_eq!(updated.age, 31);
    assert_eq!(updated.name, "Ann");
    assert_eq!(updated.email, "ann@example.com");
    assert!(updated.updated_at >= saved.updated_at);
}

#[tokio::test]
async fn test_update_unknown_id() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let result = repo
        .update(
            UserId::new(),
            &UserChanges {
                name: Some("Nobody".to_string()),
                ..UserChanges::default()
            },
        )
        .await
        .expect("Update failed");

    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let saved = repo.save(&User::new("Ann", "ann@example.com", 30)).await.unwrap();

    assert!(repo.delete(saved.id).await.expect("Delete failed"));
    assert!(!repo.delete(saved.id).await.expect("Delete failed"));
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_age_check_constraint_is_validation_error() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let err = repo
        .save(&User::new("Old", "old@example.com", 500))
        .await
        .expect_err("Out-of-range age must be rejected");

    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_pool_health_check() {
    let db = TestDatabase::new().await;
    let pool = db.pool();

    pool.health_check().await.expect("Health check failed");
    assert_eq!(pool.check().await, HealthStatus::Healthy);
}
