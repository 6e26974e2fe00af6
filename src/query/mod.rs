//! UDP query client: a challenge round trip followed by a full-status request.

mod client;
pub mod packet;
pub mod status;

pub use client::{random_session_id, QueryClient, DEFAULT_TIMEOUT, SESSION_MASK};
pub use packet::Opcode;

pub const DEFAULT_QUERY_PORT: u16 = 25565;
