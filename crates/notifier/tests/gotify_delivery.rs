use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use std::sync::{Arc, Mutex};

use notifier::{
    DeliveryError, GotifyConfig, GotifyNotifier, NotificationPayload, Notifier, DEFAULT_PRIORITY,
    DEFAULT_TITLE,
};

#[derive(Clone)]
struct FakeGotify {
    reply: StatusCode,
    received: Arc<Mutex<Vec<(HeaderMap, Bytes)>>>,
}

async fn receive_message(
    State(server): State<FakeGotify>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    server.received.lock().unwrap().push((headers, body));
    server.reply
}

/// Start a stand-in Gotify server; returns its message URL and the request log
async fn spawn_gotify(reply: StatusCode) -> (String, Arc<Mutex<Vec<(HeaderMap, Bytes)>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/message", post(receive_message))
        .with_state(FakeGotify {
            reply,
            received: received.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/message", addr), received)
}

fn payload(message: &str) -> NotificationPayload {
    NotificationPayload::new(DEFAULT_TITLE, message, DEFAULT_PRIORITY)
}

fn notifier(url: &str) -> GotifyNotifier {
    GotifyNotifier::new(GotifyConfig::new(url, "app-token-123")).unwrap()
}

#[tokio::test]
async fn delivers_payload_with_token_header() {
    let (url, received) = spawn_gotify(StatusCode::OK).await;
    let notification = payload("\n \n**[⚠️告警]**\n");

    notifier(&url).send(&notification).await.unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);

    let (headers, body) = &received[0];
    assert_eq!(headers["x-gotify-key"], "app-token-123");
    assert_eq!(headers["content-type"], "application/json");

    let json: serde_json::Value = serde_json::from_slice(body).unwrap();
    assert_eq!(json["title"], "Prometheus Alert");
    assert_eq!(json["message"], "\n \n**[⚠️告警]**\n");
    assert_eq!(json["priority"], 5);
}

#[tokio::test]
async fn non_200_is_delivery_error() {
    let (url, received) = spawn_gotify(StatusCode::UNAUTHORIZED).await;

    let result = notifier(&url)
        .send(&payload("msg"))
        .await;

    assert!(matches!(
        result,
        Err(DeliveryError::Status(status)) if status.as_u16() == 401
    ));
    assert_eq!(received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn other_success_codes_are_not_accepted() {
    let (url, _received) = spawn_gotify(StatusCode::NO_CONTENT).await;

    let result = notifier(&url)
        .send(&payload("msg"))
        .await;

    assert!(matches!(result, Err(DeliveryError::Status(_))));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = notifier(&format!("http://{}/message", addr))
        .send(&payload("msg"))
        .await;

    assert!(matches!(result, Err(DeliveryError::Transport(_))));
}
