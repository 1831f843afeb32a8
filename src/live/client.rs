use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{info, warn};

use super::messages::{ClientEvent, LiveConfig, ServerEvent};

/// An open bidirectional stream: a sender for outgoing events and a
/// receiver for server events. Dropping the sender stops the uplink.
pub struct LiveConnection {
    pub sender: mpsc::Sender<ClientEvent>,
    pub events: mpsc::Receiver<ServerEvent>,
}

/// Connection factory for the live voice backend.
#[async_trait::async_trait]
pub trait LiveBackend: Send + Sync {
    async fn connect(&self, config: LiveConfig) -> Result<LiveConnection>;
}

/// WebSocket client for the live voice backend.
///
/// Events cross the socket as JSON text frames. The setup event is sent as
/// soon as the socket opens; the remote answers with `Opened` once the
/// stream is ready for audio.
pub struct WsLiveClient {
    url: String,
}

impl WsLiveClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait::async_trait]
impl LiveBackend for WsLiveClient {
    async fn connect(&self, config: LiveConfig) -> Result<LiveConnection> {
        info!("Connecting live stream to {}", self.url);

        let (socket, _) = tokio_tungstenite::connect_async(&self.url)
            .await
            .context("Failed to connect to live voice backend")?;
        let (mut write, mut read) = socket.split();

        let setup = serde_json::to_string(&ClientEvent::Setup(config))?;
        write
            .send(Message::Text(setup))
            .await
            .context("Failed to send stream setup")?;

        let (out_tx, mut out_rx) = mpsc::channel::<ClientEvent>(64);
        let (in_tx, in_rx) = mpsc::channel::<ServerEvent>(64);

        // Uplink: forward client events until the sender is dropped or the
        // session sends an explicit close.
        tokio::spawn(async move {
            while let Some(event) = out_rx.recv().await {
                let closing = matches!(event, ClientEvent::Close);
                let text = match serde_json::to_string(&event) {
                    Ok(t) => t,
                    Err(e) => {
                        warn!("Failed to serialize client event: {}", e);
                        continue;
                    }
                };
                if write.send(Message::Text(text)).await.is_err() {
                    break;
                }
                if closing {
                    let _ = write.send(Message::Close(None)).await;
                    break;
                }
            }
        });

        // Downlink: decode server events in arrival order.
        tokio::spawn(async move {
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(event) => {
                            if in_tx.send(event).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("Unparseable server event: {}", e),
                    },
                    Ok(Message::Close(_)) => {
                        let _ = in_tx.send(ServerEvent::Closed).await;
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let _ = in_tx
                            .send(ServerEvent::Error {
                                message: e.to_string(),
                            })
                            .await;
                        break;
                    }
                }
            }
            info!("Live stream downlink finished");
        });

        Ok(LiveConnection {
            sender: out_tx,
            events: in_rx,
        })
    }
}
