//! `--watch` views against a scripted push server.

use booster_client::{MockApi, MockReply};
use booster_client::mock::group_json;
use serde_json::json;

use crate::common::{TestHarness, accept_and_join, push_listener, recv, send};

#[tokio::test]
async fn test_distribute_watch_prints_wallets_and_summary() {
    let (listener, addr) = push_listener().await;
    let server = tokio::spawn(async move {
        let mut socket = accept_and_join(&listener).await;
        send(
            &mut socket,
            r#"42["distributeTransactionUpdate",{"wallet":"0xa","status":"success","txHash":"0x1","amount":"1"}]"#,
        )
        .await;
        send(&mut socket, r#"42["buyProcessCompleted",{"successCount":9,"failCount":9}]"#).await;
        send(
            &mut socket,
            r#"42["distributeTransactionUpdate",{"wallet":"0xb","status":"failed"}]"#,
        )
        .await;
        send(
            &mut socket,
            r#"42["distributeProcessCompleted",{"successCount":1,"failCount":1}]"#,
        )
        .await;
        recv(&mut socket).await
    });

    let harness = TestHarness::logged_in_with_push(
        MockApi::new().with_json("distribute", json!({"message": "Distribution started"})),
        &format!("http://{addr}"),
    );
    let (result, out) = harness.run(&["distribute", "1", "--watch"]).await;
    result.unwrap();

    assert_eq!(
        out,
        "Distribution started\n\
         ✅ Success: Distributed 1 AMB. Tx Hash: 0x1\n\
         ❌ Failed to distribute AMB.\n\
         Distribution process completed.\nSuccess: 1, Fail: 1\n"
    );
    assert_eq!(server.await.unwrap().as_deref(), Some("41"));
}

#[tokio::test]
async fn test_sell_watch_stream_ends_early() {
    let (listener, addr) = push_listener().await;
    let server = tokio::spawn(async move {
        let mut socket = accept_and_join(&listener).await;
        send(
            &mut socket,
            r#"42["sellTransactionUpdate",{"wallet":"0xa","status":"success","txHash":"0x9"}]"#,
        )
        .await;
        send(&mut socket, "41").await;
    });

    let harness = TestHarness::logged_in_with_push(
        MockApi::new()
            .with_json("wallet-groups/active", group_json("g1", "alpha", &["0xa"]))
            .with_json("sell", json!({})),
        &format!("http://{addr}"),
    );
    let (result, out) = harness
        .run(&["sell", "--amount", "5", "--watch"])
        .await;
    result.unwrap();
    server.await.unwrap();

    assert!(out.contains("Sell process started.\n✅ Success: Sold tokens. Tx Hash: 0x9\n"));
    assert!(out.ends_with("Live updates ended before the process completed (closed).\n"));
}

#[tokio::test]
async fn test_watch_without_push_still_sends_request() {
    let harness = TestHarness::logged_in(MockApi::new().with_json("distribute", json!({})));
    let (result, out) = harness.run(&["distribute", "2", "--watch"]).await;
    result.unwrap();

    assert!(out.starts_with("Live updates unavailable: "));
    assert!(out.contains("Distribution process started.\n"));
    assert_eq!(harness.api.calls_to("distribute").len(), 1);
}

#[tokio::test]
async fn test_tx_state_watch_until_completed() {
    let (listener, addr) = push_listener().await;
    let server = tokio::spawn(async move {
        let mut socket = accept_and_join(&listener).await;
        send(&mut socket, r#"42["unrelated",{}]"#).await;
        send(
            &mut socket,
            r#"42["transactionUpdate",{"processedWallets":[{},{}],"successCount":2}]"#,
        )
        .await;
        send(
            &mut socket,
            r#"42["transactionCompleted",{"processedWallets":[{},{},{},{}],"successCount":4}]"#,
        )
        .await;
        recv(&mut socket).await
    });

    let harness = TestHarness::logged_in_with_push(
        MockApi::new().with_reply(
            "transaction-state",
            MockReply::Json(json!({"transactionState": {
                "type": "sell", "status": "in_progress",
                "processedWallets": [{}], "totalWallets": 4, "successCount": 1
            }})),
        ),
        &format!("http://{addr}"),
    );
    let (result, out) = harness.run(&["tx", "state", "--watch"]).await;
    result.unwrap();

    let views: Vec<&str> = out.split("\n\n").collect();
    assert_eq!(views.len(), 3);
    assert!(views[0].starts_with("Prev/On-going TX [Sell]\nProgress: 1/4 wallets\n"));
    assert!(views[1].starts_with("Prev/On-going TX [Sell]\nProgress: 2/4 wallets\n"));
    assert!(views[1].contains("50%"));
    assert!(views[2].contains("Progress: 4/4 wallets • All wallets processed"));
    assert!(views[2].contains("Status: Completed"));
    assert_eq!(server.await.unwrap().as_deref(), Some("41"));
}

#[tokio::test]
async fn test_tx_state_watch_skips_socket_when_finished() {
    let harness = TestHarness::logged_in_with_push(
        MockApi::new().with_json(
            "transaction-state",
            json!({"transactionState": {"type": "buy", "status": "completed", "totalWallets": 1, "processedWallets": [{}]}}),
        ),
        "http://127.0.0.1:1",
    );
    let (result, out) = harness.run(&["tx", "state", "--watch"]).await;
    result.unwrap();
    assert!(out.starts_with("Live updates unavailable"));
    assert!(out.contains("Prev/On-going TX [Buy] Completed"));
}
