use std::sync::Arc;

use flume::{Receiver, Sender};
use futures_util::{SinkExt, StreamExt};
use ocppx_core::format::frame::Call;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{
        client::IntoClientRequest,
        handshake::client::Request,
        http::{header::SEC_WEBSOCKET_PROTOCOL, HeaderValue},
        Message,
    },
};
use tokio_util::sync::CancellationToken;

use super::{TransportError, WebsocketTransport};
use crate::config::ClientConfig;

/// Pumps frames between a tokio-tungstenite socket and a
/// `WebsocketTransport`, reconnecting after `retry_delay` whenever the socket
/// drops.
pub struct TokioWsDriver {
    config: ClientConfig,
    transport: Arc<WebsocketTransport>,
    outbound: Receiver<String>,
    inbound: Sender<Call>,
}

impl TokioWsDriver {
    pub fn new(
        config: ClientConfig,
        transport: Arc<WebsocketTransport>,
        outbound: Receiver<String>,
        inbound: Sender<Call>,
    ) -> Self {
        Self {
            config,
            transport,
            outbound,
            inbound,
        }
    }

    fn handshake_request(&self) -> Result<Request, TransportError> {
        let mut req = self
            .config
            .endpoint_url()
            .into_client_request()
            .map_err(|e| TransportError::Io(e.to_string()))?;
        req.headers_mut().insert(
            SEC_WEBSOCKET_PROTOCOL,
            HeaderValue::from_str(&self.config.subprotocol)
                .map_err(|e| TransportError::Io(e.to_string()))?,
        );
        Ok(req)
    }

    pub async fn run(self, stop: CancellationToken) -> Result<(), TransportError> {
        let url = self.config.endpoint_url();
        loop {
            let req = self.handshake_request()?;
            log::debug!("connecting to url: {}", url);
            let socket = tokio::select! {
                _ = stop.cancelled() => return Ok(()),
                res = connect_async(req) => match res {
                    Ok((socket, _)) => socket,
                    Err(e) => {
                        log::error!("ws error: {:?}", e);
                        tokio::select! {
                            _ = stop.cancelled() => return Ok(()),
                            _ = tokio::time::sleep(self.config.retry.retry_delay()) => continue,
                        }
                    }
                },
            };
            self.transport.on_connected();
            let (mut sink, mut stream) = socket.split();

            loop {
                tokio::select! {
                    _ = stop.cancelled() => {
                        let _ = sink.close().await;
                        self.transport.on_disconnect();
                        return Ok(());
                    }
                    msg = self.outbound.recv_async() => match msg {
                        Ok(text) => {
                            if let Err(e) = sink.send(Message::Text(text.into())).await {
                                log::error!("ws send failed: {:?}", e);
                                break;
                            }
                        }
                        Err(_) => {
                            let _ = sink.close().await;
                            self.transport.on_disconnect();
                            return Ok(());
                        }
                    },
                    frame = stream.next() => match frame {
                        Some(Ok(Message::Text(text))) => {
                            if let Some(call) = self.transport.on_frame(text.as_str()) {
                                let _ = self.inbound.send_async(call).await;
                            }
                        }
                        Some(Ok(Message::Ping(payload))) => {
                            let _ = sink.send(Message::Pong(payload)).await;
                        }
                        Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                        Some(Ok(_)) => {}
                    },
                }
            }

            self.transport.on_disconnect();
            tokio::select! {
                _ = stop.cancelled() => return Ok(()),
                _ = tokio::time::sleep(self.config.retry.retry_delay()) => {}
            }
        }
    }
}
