use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mcstat::query::Opcode;
use mcstat::{QueryClient, QueryErrorKind};
use tokio::net::UdpSocket;

const SESSION: [u8; 4] = [0x01, 0x02, 0x03, 0x04];
const CHALLENGE: i32 = 9_513_307;

const STATUS_BODY: &[u8] = b"splitnum\x00\x80\x00\
hostname\x00A Minecraft Server\x00\
gametype\x00SMP\x00\
game_id\x00MINECRAFT\x00\
version\x001.20.4\x00\
plugins\x00CraftBukkit on Bukkit 1.20.4: WorldEdit 7.2; Essentials 2.20\x00\
map\x00world\x00\
numplayers\x002\x00\
maxplayers\x0020\x00\
hostport\x0025565\x00\
hostip\x00127.0.0.1\x00\
\x00\x01player_\x00\x00\
Alice\x00Bob\x00\x00";

async fn spawn_server<F>(handler: F) -> SocketAddr
where
    F: Fn(&[u8]) -> Option<Vec<u8>> + Send + 'static,
{
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();

    tokio::spawn(async move {
        let mut buf = [0u8; 2048];
        while let Ok((len, peer)) = socket.recv_from(&mut buf).await {
            if let Some(reply) = handler(&buf[..len]) {
                let _ = socket.send_to(&reply, peer).await;
            }
        }
    });
    addr
}

fn reply(opcode: u8, session: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut response = vec![opcode];
    response.extend_from_slice(session);
    response.extend_from_slice(payload);
    response
}

/// Answers like a vanilla server: challenge first, then status for the right token.
fn minecraft_server(request: &[u8]) -> Option<Vec<u8>> {
    if request.len() < 7 || request[..2] != [0xFE, 0xFD] {
        return None;
    }
    let session = &request[3..7];

    match request[2] {
        0x09 => Some(reply(0x09, session, format!("{}\0", CHALLENGE).as_bytes())),
        0x00 => {
            let mut expected = CHALLENGE.to_be_bytes().to_vec();
            expected.extend_from_slice(&[0, 0, 0, 0]);
            if request[7..] != expected[..] {
                return None;
            }
            Some(reply(0x00, session, STATUS_BODY))
        }
        _ => None,
    }
}

fn client() -> QueryClient {
    QueryClient::with_timeout(Duration::from_millis(500)).session_id(SESSION)
}

#[tokio::test]
async fn full_query_decodes_status() {
    let addr = spawn_server(minecraft_server).await;

    let status = client().info("127.0.0.1", addr.port()).await.unwrap();

    assert_eq!(status.motd.as_deref(), Some("A Minecraft Server"));
    assert_eq!(status.game_type.as_deref(), Some("SMP"));
    assert_eq!(status.version.as_deref(), Some("1.20.4"));
    assert_eq!(status.software, "CraftBukkit on Bukkit 1.20.4");
    assert_eq!(status.plugins, vec!["WorldEdit 7.2", "Essentials 2.20"]);
    assert_eq!(
        status.raw_plugins.as_deref(),
        Some("CraftBukkit on Bukkit 1.20.4: WorldEdit 7.2; Essentials 2.20")
    );
    assert_eq!(status.map.as_deref(), Some("world"));
    assert_eq!((status.current, status.max, status.port), (2, 20, 25565));
    assert_eq!(status.host.as_deref(), Some("127.0.0.1"));
    assert_eq!(status.players, vec!["Alice", "Bob"]);
}

#[tokio::test]
async fn requests_carry_session_and_token() {
    let seen: Arc<Mutex<Vec<Vec<u8>>>> = Arc::default();
    let log = Arc::clone(&seen);
    let addr = spawn_server(move |request| {
        log.lock().unwrap().push(request.to_vec());
        minecraft_server(request)
    })
    .await;

    client().info("127.0.0.1", addr.port()).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], vec![0xFE, 0xFD, 0x09, 0x01, 0x02, 0x03, 0x04]);

    let mut status_request = vec![0xFE, 0xFD, 0x00, 0x01, 0x02, 0x03, 0x04];
    status_request.extend_from_slice(&CHALLENGE.to_be_bytes());
    status_request.extend_from_slice(&[0, 0, 0, 0]);
    assert_eq!(seen[1], status_request);
}

#[tokio::test]
async fn opcode_mismatch_is_protocol_error() {
    let addr = spawn_server(|request| Some(reply(0x00, &request[3..7], b"123\0"))).await;

    let error = client().info("127.0.0.1", addr.port()).await.unwrap_err();
    assert_eq!(error.kind(), QueryErrorKind::Protocol);
    assert_eq!(error.stage(), Some(Opcode::Handshake));
}

#[tokio::test]
async fn short_response_is_protocol_error() {
    let addr = spawn_server(|_| Some(vec![0x09, 0x01, 0x02])).await;

    let error = client().info("127.0.0.1", addr.port()).await.unwrap_err();
    assert_eq!(error.kind(), QueryErrorKind::Protocol);
}

#[tokio::test]
async fn status_without_player_marker_is_parse_error() {
    let addr = spawn_server(|request| {
        let session = &request[3..7];
        match request[2] {
            0x09 => Some(reply(0x09, session, b"42\0")),
            _ => Some(reply(0x00, session, b"splitnum\x00\x80\x00hostname\x00A Server\x00")),
        }
    })
    .await;

    let error = client().info("127.0.0.1", addr.port()).await.unwrap_err();
    assert_eq!(error.kind(), QueryErrorKind::Parse);
    assert_eq!(error.stage(), Some(Opcode::Status));
}

#[tokio::test]
async fn silent_server_times_out() {
    let addr = spawn_server(|_| None).await;
    let client = QueryClient::with_timeout(Duration::from_millis(100)).session_id(SESSION);

    let started = std::time::Instant::now();
    let error = client.info("127.0.0.1", addr.port()).await.unwrap_err();

    assert_eq!(error.kind(), QueryErrorKind::Io);
    assert!(error.is_timeout());
    assert_eq!(error.stage(), Some(Opcode::Handshake));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn empty_server_has_no_players() {
    let addr = spawn_server(|request| {
        let session = &request[3..7];
        match request[2] {
            0x09 => Some(reply(0x09, session, b"7\0")),
            _ => Some(reply(
                0x00,
                session,
                b"splitnum\x00\x80\x00hostname\x00Quiet\x00numplayers\x000\x00\x00\x01player_\x00\x00\x00",
            )),
        }
    })
    .await;

    let status = client().info("127.0.0.1", addr.port()).await.unwrap();
    assert_eq!(status.motd.as_deref(), Some("Quiet"));
    assert!(status.players.is_empty());
    assert_eq!(status.software, "Vanilla");
}

#[tokio::test]
async fn unresolvable_host_is_connectivity_error() {
    let error = client()
        .info("query-target.invalid", 25565)
        .await
        .unwrap_err();
    assert_eq!(error.kind(), QueryErrorKind::Connectivity);
    assert_eq!(error.stage(), None);
}
