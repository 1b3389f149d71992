//! Integration tests for sliding session validation.

use chrono::{DateTime, Duration, Utc};
use courio_auth::config::AuthConfig;
use courio_auth::session::SessionManager;
use courio_auth::token;
use courio_core::models::session::Session;
use courio_core::models::user::{CreateUser, Role};
use courio_core::repository::{SessionRepository, UserRepository};
use courio_db::repository::{SurrealSessionRepository, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

/// Spin up in-memory DB, run migrations, create one user.
async fn setup() -> (
    SessionManager<SurrealSessionRepository<Db>>,
    SurrealSessionRepository<Db>,
    Uuid, // user_id
) {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    courio_db::run_migrations(&db).await.unwrap();

    let user = SurrealUserRepository::new(db.clone())
        .create(CreateUser {
            name: "Gabi".into(),
            email: "gabi@example.com".into(),
            password_hash: "hash".into(),
            phone: Some("555-0101".into()),
            role: Role::Courier,
        })
        .await
        .unwrap();

    let manager = SessionManager::new(
        SurrealSessionRepository::new(db.clone()),
        AuthConfig::default(),
    );
    (manager, SurrealSessionRepository::new(db), user.id)
}

/// Store a session for `token` with an explicit expiry.
async fn plant(
    repo: &SurrealSessionRepository<Db>,
    token: &str,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
) {
    repo.create(Session {
        id: token::hash_session_token(token),
        user_id,
        expires_at,
    })
    .await
    .unwrap();
}

fn assert_close(a: DateTime<Utc>, b: DateTime<Utc>) {
    let drift = (a - b).num_milliseconds().abs();
    assert!(drift < 5_000, "timestamps differ by {drift}ms");
}

#[tokio::test]
async fn fresh_session_validates_to_its_user() {
    let (manager, _repo, user_id) = setup().await;
    let raw = token::generate_session_token();

    let created = manager.create_session(&raw, user_id).await.unwrap();
    assert_eq!(created.id, token::hash_session_token(&raw));
    assert_ne!(created.id, raw);
    assert_close(created.expires_at, Utc::now() + Duration::days(30));

    let validated = manager.validate_session_token(&raw).await.unwrap().unwrap();
    assert_eq!(validated.session.id, created.id);
    assert_eq!(validated.user.id, user_id);
    assert_eq!(validated.user.email, "gabi@example.com");
    assert_eq!(validated.user.role, Role::Courier);
}

#[tokio::test]
async fn unknown_token_validates_to_none() {
    let (manager, _repo, _user_id) = setup().await;

    let result = manager
        .validate_session_token(&token::generate_session_token())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn create_session_for_unknown_user_fails() {
    let (manager, _repo, _user_id) = setup().await;

    let result = manager
        .create_session(&token::generate_session_token(), Uuid::new_v4())
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn expired_session_is_deleted() {
    let (manager, repo, user_id) = setup().await;
    let raw = "expired-token";
    plant(&repo, raw, user_id, Utc::now() - Duration::minutes(1)).await;

    assert!(manager.validate_session_token(raw).await.unwrap().is_none());
    assert!(
        repo.get_by_id(&token::hash_session_token(raw))
            .await
            .unwrap()
            .is_none(),
        "expired session should be removed"
    );
    // Second attempt sees nothing as well.
    assert!(manager.validate_session_token(raw).await.unwrap().is_none());
}

#[tokio::test]
async fn session_inside_renewal_window_is_extended() {
    let (manager, repo, user_id) = setup().await;
    let raw = "aging-token";
    plant(&repo, raw, user_id, Utc::now() + Duration::days(10)).await;

    let validated = manager.validate_session_token(raw).await.unwrap().unwrap();
    let expected = Utc::now() + Duration::days(30);
    assert_close(validated.session.expires_at, expected);

    let stored = repo
        .get_by_id(&token::hash_session_token(raw))
        .await
        .unwrap()
        .unwrap();
    assert_close(stored.expires_at, expected);
}

#[tokio::test]
async fn session_outside_renewal_window_is_untouched() {
    let (manager, repo, user_id) = setup().await;
    let raw = "young-token";
    let original = Utc::now() + Duration::days(20);
    plant(&repo, raw, user_id, original).await;

    let validated = manager.validate_session_token(raw).await.unwrap().unwrap();
    assert_close(validated.session.expires_at, original);

    let stored = repo
        .get_by_id(&token::hash_session_token(raw))
        .await
        .unwrap()
        .unwrap();
    assert_close(stored.expires_at, original);
    assert!(stored.expires_at < Utc::now() + Duration::days(21));
}

#[tokio::test]
async fn invalidate_session_is_idempotent() {
    let (manager, _repo, user_id) = setup().await;
    let raw = token::generate_session_token();
    let session = manager.create_session(&raw, user_id).await.unwrap();

    manager.invalidate_session(&session.id).await.unwrap();
    manager.invalidate_session(&session.id).await.unwrap();

    assert!(manager.validate_session_token(&raw).await.unwrap().is_none());
}

#[tokio::test]
async fn invalidate_user_sessions_revokes_all() {
    let (manager, _repo, user_id) = setup().await;
    let tokens: Vec<String> = (0..3).map(|_| token::generate_session_token()).collect();
    for raw in &tokens {
        manager.create_session(raw, user_id).await.unwrap();
    }
    assert_eq!(manager.list_user_sessions(user_id).await.unwrap().len(), 3);

    manager.invalidate_user_sessions(user_id).await.unwrap();

    for raw in &tokens {
        assert!(manager.validate_session_token(raw).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn purge_expired_keeps_live_sessions() {
    let (manager, repo, user_id) = setup().await;
    plant(&repo, "stale-1", user_id, Utc::now() - Duration::days(1)).await;
    plant(&repo, "stale-2", user_id, Utc::now() - Duration::seconds(5)).await;
    plant(&repo, "live", user_id, Utc::now() + Duration::days(3)).await;

    assert_eq!(manager.purge_expired().await.unwrap(), 2);
    assert!(manager.validate_session_token("live").await.unwrap().is_some());
}
