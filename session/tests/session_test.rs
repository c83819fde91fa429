//! Session bookkeeping and manager lifecycle.

use session::{Role, Session, SessionManager};

/// **Test: After N accepted queries, memory holds N entries and the transcript 2N turns**
#[test]
fn test_lockstep_growth() {
    let mut session = Session::new();
    for i in 0..5 {
        session.record_exchange(format!("q{}", i), format!("a{}", i));
    }

    assert_eq!(session.memory().len(), 5);
    assert_eq!(session.transcript().len(), 10);
    assert_eq!(session.turn_count(), 5);
    for (i, pair) in session.transcript().chunks(2).enumerate() {
        assert_eq!(pair[0].role, Role::User);
        assert_eq!(pair[0].content, format!("q{}", i));
        assert_eq!(pair[1].role, Role::Assistant);
        assert_eq!(pair[1].content, session.memory()[i].answer);
    }
}

/// **Test: Reset clears transcript and memory together**
#[test]
fn test_reset_clears_both() {
    let mut session = Session::new();
    session.record_exchange("home loan rate?", "8.5%");
    session.record_exchange("car loan?", "9.0%");

    session.reset();

    assert_eq!(session.memory().len(), 0);
    assert_eq!(session.transcript().len(), 0);

    session.record_exchange("again", "ok");
    assert_eq!(session.memory().len(), 1);
    assert_eq!(session.transcript().len(), 2);
}

/// **Test: Sessions serialize with their transcript and memory**
#[test]
fn test_session_serializes() {
    let mut session = Session::new();
    session.record_exchange("q", "a");

    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["memory"][0]["query"], "q");
    assert_eq!(json["transcript"][1]["role"], "Assistant");
}

/// **Test: Manager create / get / reset / destroy lifecycle**
///
/// **Setup:** Two sessions created through the manager.
/// **Action:** Record into one, reset it, then destroy it.
/// **Expected:** The other session is untouched; destroyed ids are no longer found.
#[tokio::test]
async fn test_manager_lifecycle() {
    let manager = SessionManager::new();
    let first = manager.create().await;
    let second = manager.create().await;
    let first_id = first.lock().await.id;
    let second_id = second.lock().await.id;
    assert_ne!(first_id, second_id);
    assert_eq!(manager.len().await, 2);

    first.lock().await.record_exchange("q", "a");
    second.lock().await.record_exchange("q2", "a2");

    let fetched = manager.get(first_id).await.unwrap();
    assert_eq!(fetched.lock().await.turn_count(), 1);

    assert!(manager.reset(first_id).await);
    assert!(first.lock().await.is_empty());
    assert_eq!(second.lock().await.turn_count(), 1);

    assert!(manager.destroy(first_id).await);
    assert!(manager.get(first_id).await.is_none());
    assert!(!manager.destroy(first_id).await);
    assert!(!manager.reset(first_id).await);
    assert_eq!(manager.len().await, 1);
}
