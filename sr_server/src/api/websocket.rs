//! WebSocket handler for real-time room play.
//!
//! Connecting *is* joining: `GET /ws/{room_id}?name=<name>` seats the caller
//! in the room (spawning it on first join) and streams every room event back
//! as JSON. A rejected join gets a single `error` event and the connection
//! closes.
//!
//! # Client Messages
//!
//! ```json
//! {"type":"start"}
//! {"type":"guess","cardIds":[4,17,23]}
//! {"type":"leave"}
//! ```
//!
//! # Server Messages
//!
//! - `joined`: the caller's own player record, sent once after connecting
//! - `gameState`: full snapshot after every accepted mutation
//! - `correctGuess`: room-wide claim notification
//! - `wrongGuess`: sent to the guesser only
//! - `error`: sent to the single requester
//!
//! On disconnect the player is removed from the room; an emptied room shuts
//! down.

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use serde::Deserialize;
use spot_rush::{CardId, PlayerName, RoomId, RoomMessage, ServerEvent, game::events};
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, warn};

use super::{AppState, rate_limiter::RateLimiter};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    name: String,
}

/// Client messages received via WebSocket. Join is not a message: it happens
/// once, at connection time.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum ClientMessage {
    /// Start (or restart) the round. Ignored unless the sender is host.
    Start,
    /// Claim three grid cards as a match.
    Guess { card_ids: Vec<CardId> },
    /// Leave the room and close the connection.
    Leave,
}

/// Upgrade the HTTP connection and seat the caller in the room.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Path(room_id): Path<String>,
    Query(query): Query<WsQuery>,
    State(state): State<AppState>,
) -> Response {
    let room_id = RoomId::new(&room_id);
    ws.on_upgrade(move |socket| handle_socket(socket, room_id, query.name, state))
}

/// Handle an established WebSocket connection: join the room, forward its
/// event stream, and feed client commands into the room mailbox.
async fn handle_socket(socket: WebSocket, room_id: RoomId, name: String, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    metrics::websocket_connections_total();

    let handle = state.rooms.get_or_create(room_id.clone()).await;

    // The subscriber channel doubles as the path for direct error replies,
    // so everything the client sees flows through one ordered stream.
    let (event_tx, mut event_rx) = mpsc::channel::<ServerEvent>(32);
    let direct_tx = event_tx.clone();

    let (join_tx, join_rx) = oneshot::channel();
    let join = RoomMessage::Join {
        name: PlayerName::new(&name),
        subscriber: event_tx,
        response: join_tx,
    };
    if handle.send(join).await.is_err() {
        let _ = send_event(
            &mut sender,
            &ServerEvent::Error {
                message: "room is closed".to_string(),
            },
        )
        .await;
        return;
    }

    let player = match join_rx.await {
        Ok(Ok(player)) => player,
        Ok(Err(err)) => {
            metrics::joins_rejected_total(&err.to_string());
            let _ = send_event(&mut sender, &events::join_rejected(&err)).await;
            return;
        }
        Err(_) => {
            error!("room {room_id} dropped the join request");
            return;
        }
    };
    let player_id = player.id;
    info!("websocket connected: room={room_id}, player={}", player.name);

    // Forward room events to the socket.
    let send_task = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    error!("failed to serialize event: {e}");
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
            metrics::websocket_messages_sent();
        }
    });

    // Rate limiters for DoS protection.
    let mut burst_limiter = RateLimiter::burst();
    let mut sustained_limiter = RateLimiter::sustained();

    // Receive messages from the client.
    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => {
                metrics::websocket_messages_received();

                if !burst_limiter.check() || !sustained_limiter.check() {
                    warn!("rate limit exceeded: room={room_id}, player={player_id}");
                    metrics::rate_limit_hits_total();
                    let _ = direct_tx
                        .send(ServerEvent::Error {
                            message: "Rate limit exceeded. Please slow down.".to_string(),
                        })
                        .await;
                    continue;
                }

                match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::Start) => {
                        let _ = handle.send(RoomMessage::Start { player_id }).await;
                    }
                    Ok(ClientMessage::Guess { card_ids }) => {
                        let _ = handle
                            .send(RoomMessage::Guess {
                                player_id,
                                card_ids,
                            })
                            .await;
                    }
                    Ok(ClientMessage::Leave) => break,
                    Err(e) => {
                        warn!("unparseable client message: {e}");
                        let _ = direct_tx
                            .send(ServerEvent::Error {
                                message: "Invalid message format".to_string(),
                            })
                            .await;
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Err(e) => {
                error!("websocket error: {e}");
                break;
            }
            _ => {}
        }
    }

    // Cleanup: leaving the room also tears down the subscription.
    send_task.abort();
    let _ = handle.send(RoomMessage::Leave { player_id }).await;
    info!("websocket disconnected: room={room_id}, player={player_id}");
}

async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &ServerEvent,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(event).map_err(axum::Error::new)?;
    sender.send(Message::Text(json.into())).await
}
