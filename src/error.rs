// src/error.rs
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::query::Opcode;

/// Which half of a socket round trip failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Send,
    Receive,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Send => write!(f, "write"),
            Self::Receive => write!(f, "read"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolMismatch {
    TooShort(usize),
    OpcodeMismatch { expected: u8, actual: u8 },
}

impl fmt::Display for ProtocolMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort(len) => write!(f, "response too short ({} bytes)", len),
            Self::OpcodeMismatch { expected, actual } => write!(
                f,
                "response opcode {:#04x} does not match request opcode {:#04x}",
                actual, expected
            ),
        }
    }
}

/// What callers branch on. The error message is diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    Connectivity,
    Io,
    ShortWrite,
    Protocol,
    Parse,
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("could not open query socket to {addr}: {source}")]
    Connectivity {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("{stage} failed: socket {op} error: {source}")]
    Io {
        stage: Opcode,
        op: IoOp,
        #[source]
        source: io::Error,
    },

    #[error("{stage} failed: short write ({written} of {expected} bytes)")]
    ShortWrite {
        stage: Opcode,
        written: usize,
        expected: usize,
    },

    #[error("{stage} failed: invalid return data: {reason}")]
    Protocol {
        stage: Opcode,
        reason: ProtocolMismatch,
    },

    #[error("{stage} failed: malformed server response: {reason}")]
    Parse { stage: Opcode, reason: String },
}

impl QueryError {
    pub fn kind(&self) -> QueryErrorKind {
        match self {
            Self::Connectivity { .. } => QueryErrorKind::Connectivity,
            Self::Io { .. } => QueryErrorKind::Io,
            Self::ShortWrite { .. } => QueryErrorKind::ShortWrite,
            Self::Protocol { .. } => QueryErrorKind::Protocol,
            Self::Parse { .. } => QueryErrorKind::Parse,
        }
    }

    /// The round trip the failure happened in; `None` when no socket was opened.
    pub fn stage(&self) -> Option<Opcode> {
        match self {
            Self::Connectivity { .. } => None,
            Self::Io { stage, .. }
            | Self::ShortWrite { stage, .. }
            | Self::Protocol { stage, .. }
            | Self::Parse { stage, .. } => Some(*stage),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::TimedOut)
    }
}

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to read stats file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid stats JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stats document must be a JSON object")]
    NotAnObject,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unsuccessful request to {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response is missing `{0}`")]
    MissingField(&'static str),

    #[error("session has no {0}; authenticate first")]
    NotAuthenticated(&'static str),

    #[error("value for header {0} contains invalid characters")]
    InvalidHeader(&'static str),

    #[error("token store {path:?}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("token store {path:?} is not valid JSON: {source}")]
    StoreFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
