//! WebSocket handler
//!
//! Handles the `/ws` upgrade and the connection lifecycle: register with
//! the hub, forward broadcast telemetry and direct replies to the socket,
//! answer client requests, and unregister on disconnect.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

use super::hub::SubscriptionHub;
use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::store::TelemetryStore;

/// WebSocket upgrade handler, mounted at `GET /ws`
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.hub);
    let store = Arc::clone(&state.store);
    ws.on_upgrade(move |socket| handle_socket(socket, hub, store))
}

/// Drive one established connection until either side closes it
async fn handle_socket(socket: WebSocket, hub: Arc<SubscriptionHub>, store: Arc<TelemetryStore>) {
    let (mut sink, mut stream) = socket.split();

    let mut subscription = match hub.subscribe().await {
        Ok(sub) => sub,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected WebSocket connection");
            let _ = send_message(
                &mut sink,
                &ServerMessage::Error {
                    message: e.to_string(),
                },
            )
            .await;
            return;
        }
    };
    let subscriber_id = subscription.id.clone();

    let connected = ServerMessage::Connected {
        subscriber_id: subscriber_id.clone(),
    };
    if send_message(&mut sink, &connected).await.is_err() {
        hub.unsubscribe(&subscriber_id).await;
        return;
    }

    // Direct replies (all_data, pong, errors) bypass the broadcast ring
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<ServerMessage>();

    let send_id = subscriber_id.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            let message = tokio::select! {
                reply = reply_rx.recv() => match reply {
                    Some(msg) => msg,
                    None => break,
                },
                event = subscription.events.recv() => match event {
                    Ok(event) => event.to_message(),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // Backpressure policy: this subscriber lost its
                        // oldest events; keep going with what remains.
                        tracing::warn!(
                            subscriber_id = %send_id,
                            missed,
                            "Subscriber lagged, dropped oldest events"
                        );
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            };

            if send_message(&mut sink, &message).await.is_err() {
                tracing::debug!(subscriber_id = %send_id, "WebSocket send failed, closing");
                break;
            }
        }
    });

    let recv_store = Arc::clone(&store);
    let recv_id = subscriber_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = stream.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&recv_store, &recv_id, &reply_tx, msg).await {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(subscriber_id = %recv_id, error = %e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    hub.unsubscribe(&subscriber_id).await;
}

async fn send_message(
    sink: &mut SplitSink<WebSocket, Message>,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    match serde_json::to_string(message) {
        Ok(text) => sink.send(Message::Text(text)).await,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize server message");
            Ok(())
        }
    }
}

/// Handle one inbound frame; returns false when the connection should close
async fn handle_ws_message(
    store: &Arc<TelemetryStore>,
    subscriber_id: &str,
    reply_tx: &mpsc::UnboundedSender<ServerMessage>,
    message: Message,
) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    let reply = match client_msg {
                        // Connect-time pull: current state only, no history
                        ClientMessage::RequestAllData => {
                            ServerMessage::AllData(store.all_latest().await)
                        }
                        ClientMessage::Ping => ServerMessage::Pong,
                    };
                    let _ = reply_tx.send(reply);
                }
                Err(e) => {
                    tracing::debug!(
                        subscriber_id = %subscriber_id,
                        error = %e,
                        "Invalid client message"
                    );
                    let _ = reply_tx.send(ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    });
                }
            }
            true
        }
        Message::Binary(_) => {
            let _ = reply_tx.send(ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            });
            true
        }
        // Axum answers pings automatically
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(subscriber_id = %subscriber_id, "Client requested close");
            false
        }
    }
}
