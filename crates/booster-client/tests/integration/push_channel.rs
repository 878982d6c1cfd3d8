//! `PushChannel` against a scripted Socket.IO server.

use std::time::Duration;

use booster_client::push::{ChannelState, PushChannel};
use booster_core::{ChatId, ProcessKind, PushEvent, TransactionState, TxStatus};

use crate::common::{accept_socket, push_listener, recv_text, send_text, server_handshake};

const TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_joins_room_and_forwards_events() {
    let (listener, addr) = push_listener().await;
    let server = tokio::spawn(async move {
        let mut socket = accept_socket(&listener).await;
        let connect = server_handshake(&mut socket).await;
        let join = recv_text(&mut socket).await.unwrap();

        send_text(&mut socket, "2").await;
        let pong = recv_text(&mut socket).await.unwrap();

        send_text(
            &mut socket,
            r#"42["transactionUpdate",{"type":"distribute","status":"in_progress","totalWallets":4,"processedWallets":[{"w":"0xa"}]}]"#,
        )
        .await;
        send_text(
            &mut socket,
            r#"42["distributeTransactionUpdate",{"wallet":"0xa","status":"success","txHash":"0x1","amount":"1"}]"#,
        )
        .await;
        send_text(&mut socket, r#"42["somethingElse",{"x":1}]"#).await;
        send_text(
            &mut socket,
            r#"42["distributeProcessCompleted",{"successCount":1,"failCount":0}]"#,
        )
        .await;

        let goodbye = recv_text(&mut socket).await;
        (connect, join, pong, goodbye)
    });

    let channel = PushChannel::new(format!("http://{addr}"), TIMEOUT);
    let mut subscription = channel.subscribe(&ChatId::new("42"), None).await.unwrap();
    assert_eq!(subscription.handle().state(), ChannelState::Connected);
    assert_eq!(subscription.handle().room(), "42");

    let first = subscription.next().await.unwrap();
    let state = TransactionState::from_event(&first, chrono::Utc::now()).unwrap();
    assert_eq!(state.progress_percentage(), 25);

    match subscription.next().await.unwrap() {
        PushEvent::WalletUpdate { kind, update } => {
            assert_eq!(kind, ProcessKind::Distribute);
            assert_eq!(update.status, TxStatus::Success);
        }
        other => unreachable!("unexpected event {other:?}"),
    }
    assert!(matches!(
        subscription.next().await.unwrap(),
        PushEvent::Unknown { .. }
    ));
    assert!(matches!(
        subscription.next().await.unwrap(),
        PushEvent::ProcessCompleted { kind: ProcessKind::Distribute, .. }
    ));

    subscription.close().await;
    let (connect, join, pong, goodbye) = server.await.unwrap();
    assert_eq!(connect, "40");
    assert_eq!(join, r#"42["join","42"]"#);
    assert_eq!(pong, "3");
    assert_eq!(goodbye.as_deref(), Some("41"));
}

#[tokio::test]
async fn test_auth_token_sent_with_connect() {
    let (listener, addr) = push_listener().await;
    let server = tokio::spawn(async move {
        let mut socket = accept_socket(&listener).await;
        let connect = server_handshake(&mut socket).await;
        let _join = recv_text(&mut socket).await;
        connect
    });

    let channel = PushChannel::new(format!("http://{addr}"), TIMEOUT);
    let subscription = channel
        .subscribe(&ChatId::new("42"), Some("tok-1"))
        .await
        .unwrap();
    drop(subscription);
    assert_eq!(server.await.unwrap(), r#"40{"token":"tok-1"}"#);
}

#[tokio::test]
async fn test_connect_error_is_reported() {
    let (listener, addr) = push_listener().await;
    tokio::spawn(async move {
        let mut socket = accept_socket(&listener).await;
        send_text(&mut socket, crate::common::OPEN_PACKET).await;
        let _connect = recv_text(&mut socket).await;
        send_text(&mut socket, r#"44{"message":"Not authorized"}"#).await;
        let _ = recv_text(&mut socket).await;
    });

    let channel = PushChannel::new(format!("http://{addr}"), TIMEOUT);
    let err = channel.subscribe(&ChatId::new("42"), None).await.unwrap_err();
    assert!(err.to_string().contains("Not authorized"));
}

#[tokio::test]
async fn test_server_disconnect_ends_stream() {
    let (listener, addr) = push_listener().await;
    tokio::spawn(async move {
        let mut socket = accept_socket(&listener).await;
        server_handshake(&mut socket).await;
        let _join = recv_text(&mut socket).await;
        send_text(&mut socket, "41").await;
        let _ = recv_text(&mut socket).await;
    });

    let channel = PushChannel::new(format!("http://{addr}"), TIMEOUT);
    let mut subscription = channel.subscribe(&ChatId::new("42"), None).await.unwrap();
    let mut states = subscription.handle().subscribe();

    assert!(subscription.next().await.is_none());
    let state = states.wait_for(ChannelState::is_terminal).await.unwrap().clone();
    assert_eq!(state, ChannelState::Closed);
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let (listener, addr) = push_listener().await;
    tokio::spawn(async move {
        let mut socket = accept_socket(&listener).await;
        // never sends the open packet
        let _ = recv_text(&mut socket).await;
    });

    let channel = PushChannel::new(format!("http://{addr}"), Duration::from_millis(200));
    let err = channel.subscribe(&ChatId::new("42"), None).await.unwrap_err();
    assert!(err.to_string().contains("timed out"));
}
