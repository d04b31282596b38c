//! End-to-end flows across listener, registry, queue, and player.

use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::time::timeout;

use framelink_client::{EmbedClient, EmbedTarget, Endpoint};
use framelink_core::{Command, EVENT_LOADED};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn frame(url: &str, ty: &str) -> String {
    format!(r#"{{"data": {{"url": "{url}", "type": "{ty}"}}}}"#)
}

#[test]
fn exec_before_activation_queues_then_sends_exactly_once() {
    init_tracing();
    let client = EmbedClient::default();
    let (endpoint, mut commands) = Endpoint::channel(8);
    let player = client
        .connect(EmbedTarget::new("https://host/embed/abc", endpoint))
        .unwrap();

    player.exec(Command {
        target_url: "host/embed/abc".to_string(),
        command_type: "play".to_string(),
        value: Value::Null,
    });
    assert!(commands.try_recv().is_err(), "command must not be sent yet");

    client.dispatch(&frame("host/embed/abc", EVENT_LOADED));

    assert!(player.is_active());
    assert_eq!(commands.try_recv().unwrap().command_type, "play");
    assert!(commands.try_recv().is_err(), "play must be sent exactly once");
}

#[test]
fn events_arriving_before_registration_replay_in_order() {
    init_tracing();
    let client = EmbedClient::default();

    // The race: the embed talks before the host registers it.
    client.dispatch(&frame("https://host/embed/abc", "buffering"));
    client.dispatch(&frame("https://host/embed/abc", "playing"));

    let (endpoint, _commands) = Endpoint::channel(8);
    let player = client
        .connect(EmbedTarget::new("https://host/embed/abc", endpoint))
        .unwrap();
    let mut notifications = player.subscribe();

    client.dispatch(&frame("host/embed/abc", EVENT_LOADED));

    let order: Vec<String> = std::iter::from_fn(|| notifications.try_recv().ok())
        .map(|n| n.event_type)
        .collect();
    assert_eq!(order, ["buffering", "playing", EVENT_LOADED]);
}

#[test]
fn convenience_methods_queue_transparently() {
    init_tracing();
    let client = EmbedClient::default();
    let (endpoint, mut commands) = Endpoint::channel(8);
    let player = client
        .connect(EmbedTarget::new("https://host/embed/abc", endpoint))
        .unwrap();

    player.play();
    player.set_volume(0.5);
    player.seek(30.0);
    assert!(commands.try_recv().is_err());

    client.dispatch(&frame("host/embed/abc", EVENT_LOADED));

    let sent: Vec<String> = std::iter::from_fn(|| commands.try_recv().ok())
        .map(|c| c.command_type)
        .collect();
    assert_eq!(sent, ["play", "volume", "seek"]);
}

#[test]
fn malformed_frames_leave_the_client_untouched() {
    init_tracing();
    let client = EmbedClient::default();

    client.dispatch(r#"{"data": {"type": "loaded"}}"#);
    client.dispatch(r#"{"nonsense": true}"#);
    client.dispatch("garbage");

    assert!(client.registry().is_empty());
}

#[tokio::test]
async fn listener_task_routes_frames_from_the_channel() {
    init_tracing();
    let client = EmbedClient::default();
    let (inbound_tx, inbound_rx) = mpsc::channel::<String>(8);
    client.listen(inbound_rx);

    let (endpoint, mut commands) = Endpoint::channel(8);
    let player = client
        .connect(EmbedTarget::new("https://host/embed/abc", endpoint))
        .unwrap();
    player.pause();

    inbound_tx
        .send(frame("host/embed/abc", EVENT_LOADED))
        .await
        .unwrap();

    let sent = timeout(Duration::from_secs(1), commands.recv())
        .await
        .expect("queued command should drain after loaded")
        .expect("endpoint channel open");
    assert_eq!(sent.command_type, "pause");
    assert!(commands.try_recv().is_err());

    client.shutdown();
}
