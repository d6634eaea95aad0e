//! OSC-over-UDP implementation of [`ControlSink`].

use std::net::UdpSocket;

use rosc::{OscMessage, OscPacket, OscType, encoder};
use thiserror::Error;
use tracing::info;

use super::sink::ControlSink;

/// Destination and addressing for the OSC transport.
#[derive(Debug, Clone)]
pub struct OscConfig {
    pub host: String,
    pub port: u16,
    /// Per-slot messages go to `{base_path}/{slot}`
    pub base_path: String,
    /// The active-slot count goes here
    pub count_path: String,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9000,
            base_path: "/ball".to_string(),
            count_path: "/balls/count".to_string(),
        }
    }
}

/// Errors from the OSC transport.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("socket error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OSC encode error: {0}")]
    Encode(#[from] rosc::OscError),
}

/// Sends each tuple as one OSC message over a connectionless UDP socket.
pub struct OscSink {
    socket: UdpSocket,
    config: OscConfig,
}

impl OscSink {
    /// Bind a local ephemeral socket aimed at the configured destination.
    pub fn connect(config: OscConfig) -> Result<Self, SinkError> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        info!(
            host = %config.host,
            port = config.port,
            base_path = %config.base_path,
            "OSC sink ready"
        );
        Ok(Self { socket, config })
    }

    fn send(&self, addr: String, args: Vec<OscType>) -> Result<(), SinkError> {
        let buf = encoder::encode(&OscPacket::Message(OscMessage { addr, args }))?;
        self.socket
            .send_to(&buf, (self.config.host.as_str(), self.config.port))?;
        Ok(())
    }
}

impl ControlSink for OscSink {
    type Error = SinkError;

    fn send_slot(&mut self, slot: u32, value: [f32; 3]) -> Result<(), SinkError> {
        let addr = format!("{}/{}", self.config.base_path, slot);
        let args = value.iter().map(|v| OscType::Float(*v)).collect();
        self.send(addr, args)
    }

    fn send_active_count(&mut self, count: u32) -> Result<(), SinkError> {
        self.send(
            self.config.count_path.clone(),
            vec![OscType::Int(count as i32)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback_pair() -> (UdpSocket, OscSink) {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = receiver.local_addr().unwrap().port();
        let sink = OscSink::connect(OscConfig {
            host: "127.0.0.1".to_string(),
            port,
            ..Default::default()
        })
        .unwrap();
        (receiver, sink)
    }

    fn recv_message(receiver: &UdpSocket) -> OscMessage {
        let mut buf = [0u8; rosc::decoder::MTU];
        let (n, _) = receiver.recv_from(&mut buf).unwrap();
        let (_, packet) = rosc::decoder::decode_udp(&buf[..n]).unwrap();
        match packet {
            OscPacket::Message(msg) => msg,
            other => panic!("expected a message, got {other:?}"),
        }
    }

    #[test]
    fn test_slot_message_on_the_wire() {
        let (receiver, mut sink) = loopback_pair();
        sink.send_slot(2, [0.5, 0.25, 0.01]).unwrap();

        let msg = recv_message(&receiver);
        assert_eq!(msg.addr, "/ball/2");
        assert_eq!(
            msg.args,
            vec![
                OscType::Float(0.5),
                OscType::Float(0.25),
                OscType::Float(0.01)
            ]
        );
    }

    #[test]
    fn test_count_message_on_the_wire() {
        let (receiver, mut sink) = loopback_pair();
        sink.send_active_count(3).unwrap();

        let msg = recv_message(&receiver);
        assert_eq!(msg.addr, "/balls/count");
        assert_eq!(msg.args, vec![OscType::Int(3)]);
    }
}
