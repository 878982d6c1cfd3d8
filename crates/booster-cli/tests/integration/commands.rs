//! Console commands against the scripted backend.

use booster_client::MockReply;
use booster_client::mock::{group_json, user_json};
use booster_client::MockApi;
use booster_core::SessionStore;
use serde_json::json;

use crate::common::TestHarness;

#[tokio::test]
async fn test_go_protected_view_redirects_to_login() {
    let harness = TestHarness::new(MockApi::new());
    let (result, out) = harness.run(&["go", "/buy"]).await;
    result.unwrap();
    assert!(out.starts_with("Please log in to continue. Redirecting to /login.\nLogin\n"));
    assert!(out.contains("booster login <chat-id>"));
    assert_eq!(harness.api.call_count(), 0);
}

#[tokio::test]
async fn test_go_unknown_view() {
    let harness = TestHarness::new(MockApi::new());
    let (result, _) = harness.run(&["go", "/register"]).await;
    assert_eq!(result.unwrap_err().to_string(), "Unknown view '/register'");
}

#[tokio::test]
async fn test_login_then_home() {
    let harness = TestHarness::new(
        MockApi::new()
            .with_json("login", json!({"message": "ok", "user": user_json("42")}))
            .with_json("wallet-groups/active", group_json("g1", "alpha", &["0xa"]))
            .with_json("tokens/active", json!({"_id": "t1", "name": "Booster", "symbol": "BST"})),
    );

    let (result, out) = harness.run(&["login", "42"]).await;
    result.unwrap();
    assert_eq!(out, "Logged in as 42.\n");
    assert!(harness.sessions.load().unwrap().is_some());

    let (result, out) = harness.run(&["home"]).await;
    result.unwrap();
    assert_eq!(out, "Active Wallet Group\n  alpha\nActive Token\n  BST (Booster)\n");
}

#[tokio::test]
async fn test_short_pin_rejected_without_request() {
    let harness = TestHarness::new(MockApi::new());
    let (result, _) = harness.run(&["login", "42", "--pin", "12"]).await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "Pin should be at least 4 characters long."
    );
    assert_eq!(harness.api.call_count(), 0);
}

#[tokio::test]
async fn test_logout_then_protected_command() {
    let harness = TestHarness::logged_in(MockApi::new());
    let (result, out) = harness.run(&["logout"]).await;
    result.unwrap();
    assert_eq!(out, "Logged out.\n");

    let (result, _) = harness.run(&["collect"]).await;
    assert_eq!(result.unwrap_err().to_string(), "Please log in to continue.");
    let (_, out) = harness.run(&["whoami"]).await;
    assert_eq!(out, "Not logged in.\n");
}

#[tokio::test]
async fn test_invalid_distribute_amount() {
    let harness = TestHarness::logged_in(MockApi::new());
    for amount in ["abc", "0", "-3"] {
        let (result, _) = harness.run(&["distribute", amount]).await;
        assert_eq!(result.unwrap_err().to_string(), "Please enter a valid amount.");
    }
    let (result, _) = harness.run(&["distribute", "x", "--watch"]).await;
    assert!(result.is_err());
    assert_eq!(harness.api.call_count(), 0);
}

#[tokio::test]
async fn test_distribute_without_watch() {
    let harness = TestHarness::logged_in(MockApi::new().with_json("distribute", json!({})));
    let (result, out) = harness.run(&["distribute", "0.5"]).await;
    result.unwrap();
    assert_eq!(out, "Distribution process started.\n");
}

#[tokio::test]
async fn test_collect_and_burn_summaries() {
    let harness = TestHarness::logged_in(
        MockApi::new()
            .with_json("collect", json!({"successCount": 3, "failCount": 0, "totalCollected": 1.5}))
            .with_json("burn", json!({"successCount": 2, "failCount": 1})),
    );
    let (_, out) = harness.run(&["collect"]).await;
    assert_eq!(out, "Funds Collected.\nSuccess: 3, Fail: 0, Total Collected: 1.5 AMB\n");
    let (_, out) = harness.run(&["burn", "10"]).await;
    assert_eq!(out, "Burn completed.\nSuccess: 2, Fail: 1\n");
}

#[tokio::test]
async fn test_burn_server_error_alert() {
    let harness = TestHarness::logged_in(
        MockApi::new().with_reply("burn", MockReply::error("No active token")),
    );
    let (result, _) = harness.run(&["burn", "1"]).await;
    assert_eq!(result.unwrap_err().to_string(), "Error: No active token");
}

#[tokio::test]
async fn test_buy_time_range_rule() {
    let harness = TestHarness::logged_in(
        MockApi::new()
            .with_json("wallet-groups/active", group_json("g1", "alpha", &["0xa", "0xb"]))
            .with_json("buy", json!({"message": "Buy process started"})),
    );
    let (result, _) = harness
        .run(&["buy", "--amount", "1", "--min-delay", "9", "--max-delay", "3"])
        .await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "Please enter a valid time range (min ≤ max, both > 0)."
    );
    assert_eq!(harness.api.call_count(), 0);

    let (result, out) = harness
        .run(&["buy", "--amount", "1", "--wallet", "0xb=2.5"])
        .await;
    result.unwrap();
    assert_eq!(
        out,
        "2 wallets in alpha, 2-30 min between trades.\nBuy process started\n"
    );
    let body = &harness.api.calls_to("buy")[0].body;
    assert_eq!(body["buyDetails"][1]["amount"], "2.5");
}

#[tokio::test]
async fn test_bad_trade_amount_rejected_before_anything_is_sent() {
    let harness = TestHarness::logged_in(
        MockApi::new().with_json("wallet-groups/active", group_json("g1", "alpha", &["0xa"])),
    );
    let (result, out) = harness
        .run(&["sell", "--amount", "abc", "--watch"])
        .await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "Please enter valid sell amounts for all wallets."
    );
    assert!(out.is_empty());

    let (result, _) = harness
        .run(&["buy", "--amount", "1", "--wallet", "0xa=0"])
        .await;
    assert!(result.is_err());
    assert_eq!(harness.api.call_count(), 0);
}

#[tokio::test]
async fn test_sell_without_active_group() {
    let harness =
        TestHarness::logged_in(MockApi::new().with_json("wallet-groups/active", json!(null)));
    let (result, _) = harness.run(&["sell", "--amount", "1"]).await;
    assert_eq!(result.unwrap_err().to_string(), "No active wallet group found.");
}

#[tokio::test]
async fn test_groups_and_tokens() {
    let harness = TestHarness::logged_in(
        MockApi::new()
            .with_json("wallet-groups", json!([group_json("g1", "alpha", &["0xa"])]))
            .with_json("create-wallet-group", json!({"walletGroup": group_json("g2", "beta", &[])}))
            .with_json("activate-wallet-group", json!({}))
            .with_json("add-token", json!({"_id": "t2", "name": "Other", "symbol": "OTH"}))
            .with_json("view-wallet-group/g1", group_json("g1", "alpha", &["0xa"])),
    );

    let (_, out) = harness.run(&["groups", "list"]).await;
    assert!(out.starts_with("* g1"));
    assert!(out.contains("alpha (1 wallets)"));

    let (_, out) = harness.run(&["groups", "create", "beta"]).await;
    assert_eq!(out, "Created wallet group: beta\n");

    let (_, out) = harness.run(&["groups", "activate", "g2"]).await;
    assert_eq!(out, "Wallet group activated.\n");

    let (_, out) = harness.run(&["groups", "view", "g1"]).await;
    assert!(out.contains("Private Key: Hidden"));

    let (_, out) = harness.run(&["tokens", "add", "0xtoken"]).await;
    assert_eq!(out, "Token added/active: OTH (Other)\n");
    assert_eq!(harness.api.calls_to("add-token")[0].body["tokenAddress"], "0xtoken");
}

#[tokio::test]
async fn test_tx_state_none_and_some() {
    let harness = TestHarness::logged_in(MockApi::new().with_json(
        "transaction-state",
        json!({"transactionState": null}),
    ));
    let (_, out) = harness.run(&["tx", "state"]).await;
    assert_eq!(out, "No transaction found.\n");

    harness.api.push_reply(
        "transaction-state",
        MockReply::Json(json!({"transactionState": {
            "type": "sell", "status": "in_progress",
            "processedWallets": [{}], "totalWallets": 2, "successCount": 1, "failCount": 0
        }})),
    );
    let (_, out) = harness.run(&["tx", "state"]).await;
    assert!(out.starts_with("Prev/On-going TX [Sell]\nProgress: 1/2 wallets\n"));
    assert!(out.contains("50%"));
}

#[tokio::test]
async fn test_report_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    let harness = TestHarness::logged_in(
        MockApi::new().with_reply("usage-report", MockReply::Bytes(b"%PDF-1.7".to_vec())),
    );

    let (result, out) = harness
        .run(&[
            "report",
            "--from",
            "2024-05-01",
            "--to",
            "2024-05-31",
            "--output",
            path.to_str().unwrap(),
        ])
        .await;
    result.unwrap();
    assert!(out.starts_with("Report saved to"));
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7");
}

#[tokio::test]
async fn test_report_needs_both_dates() {
    let harness = TestHarness::logged_in(MockApi::new());
    let (result, _) = harness.run(&["report", "--from", "2024-05-01"]).await;
    assert_eq!(
        result.unwrap_err().to_string(),
        "Please select both From Date and To Date."
    );
    assert_eq!(harness.api.call_count(), 0);
}

#[tokio::test]
async fn test_config_commands_need_no_backend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let path = path.to_str().unwrap();
    let config = booster_cli::BoosterConfig::default();

    let run = |args: &[&str]| {
        let argv = ["booster", "-c", path].into_iter().chain(args.iter().copied());
        <booster_cli::Cli as clap::Parser>::try_parse_from(argv).unwrap()
    };

    let mut out = Vec::new();
    booster_cli::execute(&run(&["config", "init"]), &config, &mut out)
        .await
        .unwrap();
    booster_cli::execute(
        &run(&["config", "set", "push.url", "http://push:1"]),
        &config,
        &mut out,
    )
    .await
    .unwrap();

    let mut out = Vec::new();
    booster_cli::execute(&run(&["config", "get", "push.url"]), &config, &mut out)
        .await
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "http://push:1\n");
}
