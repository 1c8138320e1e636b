//! Repository tests against a live Postgres.
//!
//! Skipped unless `DATABASE_URL` points at a database the tests may migrate.

use account_service::account::errors::AccountError;
use account_service::account::models::EmailAddress;
use account_service::account::models::Scope;
use account_service::account::models::User;
use account_service::account::models::UserId;
use account_service::account::models::UserStatus;
use account_service::account::ports::UserRepository;
use account_service::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;

async fn repository() -> Option<PostgresUserRepository> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to DATABASE_URL");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Some(PostgresUserRepository::new(pool))
}

/// Suffix keeping ids and emails unique across runs against the same database.
fn unique() -> String {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default()
        .to_string()
}

fn user(id: &str, email: &str) -> User {
    User::register(
        UserId::new(id),
        "Ana".to_string(),
        EmailAddress::new(email),
        "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        Scope::new("openid profile"),
    )
}

#[tokio::test]
async fn test_create_then_find_returns_stored_user() {
    let Some(repo) = repository().await else {
        return;
    };
    let suffix = unique();
    let id = format!("pg-{suffix}");

    let created = repo
        .create(user(&id, &format!("Ana.{suffix}@X.com")))
        .await
        .unwrap();

    assert_eq!(created.id().as_str(), id);
    assert_eq!(created.email().as_str(), format!("ana.{suffix}@x.com"));
    assert_eq!(created.status(), UserStatus::Active);
    assert_eq!(created.scope().as_str(), "openid profile");
    assert!(created.date_modify().is_none());

    let by_id = repo.find_by_id(&UserId::new(&id)).await.unwrap();
    assert_eq!(by_id.as_ref(), Some(&created));

    let by_email = repo
        .find_by_email(&EmailAddress::new(format!("ANA.{suffix}@x.com")))
        .await
        .unwrap();
    assert_eq!(by_email, Some(created));
}

#[tokio::test]
async fn test_find_missing_user_returns_none() {
    let Some(repo) = repository().await else {
        return;
    };
    let suffix = unique();

    let by_id = repo.find_by_id(&UserId::new(format!("missing-{suffix}"))).await;
    let by_email = repo
        .find_by_email(&EmailAddress::new(format!("missing.{suffix}@x.com")))
        .await;

    assert!(matches!(by_id, Ok(None)));
    assert!(matches!(by_email, Ok(None)));
}

#[tokio::test]
async fn test_duplicate_id_maps_to_conflict() {
    let Some(repo) = repository().await else {
        return;
    };
    let suffix = unique();
    let id = format!("pg-{suffix}");

    repo.create(user(&id, &format!("first.{suffix}@x.com")))
        .await
        .unwrap();
    let result = repo
        .create(user(&id, &format!("second.{suffix}@x.com")))
        .await;

    assert!(matches!(result, Err(AccountError::Conflict(ref conflict)) if *conflict == id));
}

#[tokio::test]
async fn test_duplicate_email_in_other_case_maps_to_email_already_exists() {
    let Some(repo) = repository().await else {
        return;
    };
    let suffix = unique();

    repo.create(user(
        &format!("pg-a-{suffix}"),
        &format!("ana.{suffix}@x.com"),
    ))
    .await
    .unwrap();
    let result = repo
        .create(user(
            &format!("pg-b-{suffix}"),
            &format!("ANA.{suffix}@X.COM"),
        ))
        .await;

    assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
}

#[tokio::test]
async fn test_non_ascii_email_is_stored_and_found() {
    let Some(repo) = repository().await else {
        return;
    };
    let suffix = unique();

    let created = repo
        .create(user(
            &format!("pg-{suffix}"),
            &format!("ÅSA.ÖBERG.{suffix}@X.com"),
        ))
        .await
        .unwrap();

    assert_eq!(created.email().as_str(), format!("åsa.öberg.{suffix}@x.com"));

    let found = repo
        .find_by_email(&EmailAddress::new(format!("Åsa.Öberg.{suffix}@x.COM")))
        .await
        .unwrap();
    assert_eq!(found, Some(created));
}
