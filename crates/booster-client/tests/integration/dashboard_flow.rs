//! Dashboard flows against the scripted backend.

use booster_client::{Action, MockApi, MockReply};
use booster_client::mock::{group_json, user_json};
use booster_core::validation::TradeAmounts;
use booster_core::{
    ActionFeed, FileSessionStore, Navigation, ProcessKind, PushEvent, Route, SessionStore,
    TransactionState,
};
use serde_json::json;
use std::sync::Arc;

use crate::common::TestHarness;

#[tokio::test]
async fn test_every_protected_route_redirects_when_logged_out() {
    let harness = TestHarness::new();
    for route in [
        Route::Home,
        Route::WalletGroups,
        Route::Tokens,
        Route::Distribute,
        Route::Buy,
        Route::Sell,
        Route::Burn,
        Route::Collect,
        Route::CreateWalletGroup,
        Route::ViewWalletGroup(None),
        Route::UsageReport,
    ] {
        assert_eq!(
            harness.dashboard.navigate(route.clone()).unwrap(),
            Navigation::Redirect(Route::Login),
            "{route} should need a session"
        );
    }
    for route in [Route::Login, Route::Signup, Route::Help] {
        assert_eq!(
            harness.dashboard.navigate(route.clone()).unwrap(),
            Navigation::Render(route)
        );
    }
}

#[tokio::test]
async fn test_login_then_logout_round_trip() {
    let harness = TestHarness::with_api(
        MockApi::new().with_json("login", json!({"message": "Welcome", "user": user_json("42")})),
    );

    let session = harness.dashboard.login(" 42 ", None).await.unwrap();
    assert_eq!(session.chat_key().unwrap().as_str(), "42");
    assert_eq!(harness.sessions.load().unwrap(), Some(session));
    assert_eq!(
        harness.dashboard.navigate(Route::Home).unwrap(),
        Navigation::Render(Route::Home)
    );

    harness.dashboard.logout().unwrap();
    assert_eq!(harness.sessions.load().unwrap(), None);
    assert!(harness.dashboard.home().await.unwrap_err().is_not_authenticated());
}

#[tokio::test]
async fn test_session_survives_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let api = Arc::new(
        MockApi::new().with_json("login", json!({"message": "ok", "user": user_json("42")})),
    );

    let first = booster_client::Dashboard::new(api.clone(), Arc::new(FileSessionStore::new(&path)));
    let session = first.login("42", None).await.unwrap();

    let second = booster_client::Dashboard::new(api, Arc::new(FileSessionStore::new(&path)));
    assert_eq!(second.current_session().unwrap(), Some(session));
    assert_eq!(
        second.navigate(Route::Distribute).unwrap(),
        Navigation::Render(Route::Distribute)
    );
}

#[tokio::test]
async fn test_signup_mismatch_makes_no_request() {
    let harness = TestHarness::new();
    let err = harness
        .dashboard
        .signup("42", "ops", "secret1", "secret2")
        .await
        .unwrap_err();
    assert_eq!(err.alert(Action::Signup), "Passwords do not match.");
    assert_eq!(harness.api.call_count(), 0);
}

#[tokio::test]
async fn test_time_range_checked_before_group_lookup() {
    let harness = TestHarness::logged_in(
        MockApi::new().with_json("wallet-groups/active", group_json("g1", "alpha", &["0xa"])),
    );
    for (min, max) in [(0.0, 5.0), (5.0, 1.0), (-1.0, 3.0), (f64::NAN, 3.0)] {
        let err = harness
            .dashboard
            .buy(&TradeAmounts::uniform("1"), min, max)
            .await
            .unwrap_err();
        assert!(err.alert(Action::Buy).contains("valid time range"));
    }
    assert_eq!(harness.api.call_count(), 0);

    harness
        .api
        .push_reply("buy", MockReply::Json(json!({"message": "Buy process started"})));
    harness
        .dashboard
        .buy(&TradeAmounts::uniform("1"), 3.0, 3.0)
        .await
        .unwrap();
    assert_eq!(harness.api.calls_to("buy").len(), 1);
}

#[tokio::test]
async fn test_missing_wallet_amount_rejects_sell() {
    let harness = TestHarness::logged_in(
        MockApi::new().with_json("wallet-groups/active", group_json("g1", "alpha", &["0xa", "0xb"])),
    );
    let amounts = TradeAmounts::default().with_wallet("0xa", "1");
    let err = harness.dashboard.sell(&amounts, 2.0, 30.0).await.unwrap_err();
    assert_eq!(
        err.alert(Action::Sell),
        "Please enter valid sell amounts for all wallets."
    );
    assert!(harness.api.calls_to("sell").is_empty());
}

#[tokio::test]
async fn test_distribute_network_failure_alert() {
    let harness = TestHarness::logged_in(MockApi::new().with_reply("distribute", MockReply::Unreachable));
    let err = harness.dashboard.distribute("0.5").await.unwrap_err();
    assert_eq!(
        err.alert(Action::Distribute),
        "Network error. Please check your connection and retry."
    );
    assert_eq!(harness.api.calls_to("distribute")[0].body["amount"], "0.5");
}

#[tokio::test]
async fn test_distribute_feed_from_push_events() {
    let harness = TestHarness::logged_in(
        MockApi::new().with_json("distribute", json!({"message": "Distribution started"})),
    );
    let ack = harness.dashboard.distribute("1").await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Distribution started"));

    let mut feed = ActionFeed::new(ProcessKind::Distribute);
    let events = [
        PushEvent::decode(
            "distributeTransactionUpdate",
            json!({"wallet": "0xa", "status": "success", "txHash": "0x1", "amount": "1"}),
        )
        .unwrap(),
        PushEvent::decode(
            "distributeTransactionUpdate",
            json!({"wallet": "0xb", "status": "failed"}),
        )
        .unwrap(),
        PushEvent::decode("buyProcessCompleted", json!({"successCount": 9, "failCount": 9}))
            .unwrap(),
        PushEvent::decode(
            "distributeProcessCompleted",
            json!({"successCount": 1, "failCount": 1}),
        )
        .unwrap(),
    ];
    let applied: Vec<bool> = events.iter().map(|e| feed.apply(e)).collect();
    assert_eq!(applied, vec![true, true, false, true]);
    assert!(feed.is_finished());
    assert_eq!(
        feed.summary_message().unwrap(),
        "Distribution process completed.\nSuccess: 1, Fail: 1"
    );
}

#[tokio::test]
async fn test_transaction_state_progress() {
    let harness = TestHarness::logged_in(MockApi::new().with_json(
        "transaction-state",
        json!({"transactionState": {
            "type": "distribute",
            "status": "in_progress",
            "processedWallets": [{}, {}, {}],
            "totalWallets": 8,
            "successCount": 3,
            "failCount": 0
        }}),
    ));
    let mut state: TransactionState = harness.dashboard.transaction_state().await.unwrap().unwrap();
    assert_eq!(state.progress_percentage(), 38);
    assert_eq!(state.remaining(), 5);

    let update = PushEvent::decode(
        "transactionUpdate",
        json!({"processedWallets": [{}, {}, {}, {}, {}, {}, {}, {}], "successCount": 8}),
    )
    .unwrap();
    assert!(state.apply(&update, chrono::Utc::now()));
    assert_eq!(state.progress_percentage(), 100);

    let done = PushEvent::decode("transactionCompleted", json!({})).unwrap();
    state.apply(&done, chrono::Utc::now());
    assert!(state.is_completed());
}

#[tokio::test]
async fn test_no_transaction_state() {
    let harness = TestHarness::logged_in(
        MockApi::new().with_json("transaction-state", json!({"transactionState": null})),
    );
    assert!(harness.dashboard.transaction_state().await.unwrap().is_none());
}

#[tokio::test]
async fn test_resume_failure_uses_server_message() {
    let harness = TestHarness::logged_in(MockApi::new().with_reply(
        "resume-transaction",
        MockReply::error("No paused transaction"),
    ));
    let err = harness.dashboard.resume_transaction().await.unwrap_err();
    assert_eq!(err.alert(Action::ResumeTransaction), "No paused transaction");
}
