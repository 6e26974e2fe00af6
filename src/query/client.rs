// src/query/client.rs
use byteorder::{BigEndian, ByteOrder};
use log::{debug, warn};
use rand::Rng;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::{lookup_host, UdpSocket};
use tokio::time;

use super::packet::{
    build_request, challenge_token, status_payload, strip_response, Opcode, MAX_RESPONSE_LEN,
};
use super::status::parse_status;
use crate::config::Config;
use crate::error::{IoOp, QueryError};
use crate::models::server::ServerStatus;
use crate::utils::format_query_address;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Servers only look at the low nibble of each session byte.
pub const SESSION_MASK: u32 = 0x0F0F_0F0F;

pub fn random_session_id() -> [u8; 4] {
    let mut rng = rand::thread_rng();
    let mut session = [0u8; 4];
    BigEndian::write_u32(&mut session, rng.gen::<u32>() & SESSION_MASK);
    session
}

/// Stateless query client; every `info` call opens and drops its own socket.
#[derive(Debug, Clone)]
pub struct QueryClient {
    timeout: Duration,
    session_id: [u8; 4],
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            session_id: random_session_id(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_timeout(config.query_timeout())
    }

    pub fn session_id(mut self, session_id: [u8; 4]) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs challenge then full status against `host:port`.
    ///
    /// The two round trips have independent timeouts; wrap the call in
    /// `tokio::time::timeout` for an overall deadline.
    pub async fn info(&self, host: &str, port: u16) -> Result<ServerStatus, QueryError> {
        let connection = Connection::open(host, port, self.timeout, self.session_id).await?;

        let token = connection.challenge().await?;
        let status = connection.status(token).await?;

        debug!(
            "Query of {}:{} returned {}/{} players",
            connection.host, connection.port, status.current, status.max
        );
        Ok(status)
    }
}

/// One connected UDP socket, alive for a single `info` call.
struct Connection {
    host: String,
    port: u16,
    socket: UdpSocket,
    timeout: Duration,
    session_id: [u8; 4],
}

impl Connection {
    async fn open(
        host: &str,
        port: u16,
        timeout: Duration,
        session_id: [u8; 4],
    ) -> Result<Self, QueryError> {
        let addr = format_query_address(host, port);
        let connectivity = |source: io::Error| {
            warn!("Could not create socket for {}: {}", addr, source);
            QueryError::Connectivity {
                addr: addr.clone(),
                source,
            }
        };

        let target = match time::timeout(timeout, lookup_host(addr.as_str())).await {
            Ok(Ok(mut addrs)) => addrs.next().ok_or_else(|| {
                connectivity(io::Error::new(
                    io::ErrorKind::NotFound,
                    "host did not resolve to any address",
                ))
            })?,
            Ok(Err(e)) => return Err(connectivity(e)),
            Err(_) => {
                return Err(connectivity(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "host lookup timed out",
                )))
            }
        };

        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await.map_err(connectivity)?;
        socket.connect(target).await.map_err(connectivity)?;

        debug!("Opened query socket to {} ({})", addr, target);
        Ok(Self {
            host: host.to_string(),
            port,
            socket,
            timeout,
            session_id,
        })
    }

    async fn challenge(&self) -> Result<[u8; 4], QueryError> {
        let payload = self.exchange(Opcode::Handshake, &[]).await?;
        let token = challenge_token(&payload);
        debug!("Received challenge token {:02X?} from {}", token, self.host);
        Ok(token)
    }

    async fn status(&self, token: [u8; 4]) -> Result<ServerStatus, QueryError> {
        let payload = self.exchange(Opcode::Status, &status_payload(token)).await?;
        parse_status(&payload).map_err(|e| {
            warn!("Failed to parse status from {}:{}: {}", self.host, self.port, e);
            e
        })
    }

    async fn exchange(&self, opcode: Opcode, payload: &[u8]) -> Result<Vec<u8>, QueryError> {
        let request = build_request(opcode, self.session_id, payload);

        let written = match time::timeout(self.timeout, self.socket.send(&request)).await {
            Ok(Ok(written)) => written,
            Ok(Err(e)) => return Err(self.io_failure(opcode, IoOp::Send, e)),
            Err(_) => return Err(self.io_failure(opcode, IoOp::Send, timed_out(self.timeout))),
        };
        if written != request.len() {
            warn!(
                "Short {} write to {}: {} of {} bytes",
                opcode,
                self.host,
                written,
                request.len()
            );
            return Err(QueryError::ShortWrite {
                stage: opcode,
                written,
                expected: request.len(),
            });
        }

        let mut buffer = [0u8; MAX_RESPONSE_LEN];
        let len = match time::timeout(self.timeout, self.socket.recv(&mut buffer)).await {
            Ok(Ok(len)) => len,
            Ok(Err(e)) => return Err(self.io_failure(opcode, IoOp::Receive, e)),
            Err(_) => return Err(self.io_failure(opcode, IoOp::Receive, timed_out(self.timeout))),
        };
        debug!("Received {} byte {} response from {}", len, opcode, self.host);

        match strip_response(opcode, &buffer[..len]) {
            Ok(payload) => Ok(payload.to_vec()),
            Err(reason) => {
                warn!("Invalid return data from {}:{}: {}", self.host, self.port, reason);
                Err(QueryError::Protocol {
                    stage: opcode,
                    reason,
                })
            }
        }
    }

    fn io_failure(&self, stage: Opcode, op: IoOp, source: io::Error) -> QueryError {
        warn!(
            "Failed to {} {} packet for {}:{}: {}",
            op, stage, self.host, self.port, source
        );
        QueryError::Io { stage, op, source }
    }
}

fn timed_out(timeout: Duration) -> io::Error {
    io::Error::new(
        io::ErrorKind::TimedOut,
        format!("no response within {:?}", timeout),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_session_respects_mask() {
        for _ in 0..64 {
            let session = random_session_id();
            assert_eq!(BigEndian::read_u32(&session) & !SESSION_MASK, 0);
        }
    }

    #[test]
    fn explicit_session_id_is_kept() {
        let client = QueryClient::new().session_id([1, 2, 3, 4]);
        assert_eq!(client.session_id, [1, 2, 3, 4]);
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
    }
}
