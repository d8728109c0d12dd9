use crate::monitor::BanKind;
use std::fmt;

/// Status payloads pushed to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NoSanction { check: u64 },
    StaleSanction { check: u64, text: String },
    Error { detail: String },
    Alert { text: String },
    Safeguard,
    Simulated { kind: BanKind, check: u64 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSanction { check } => write!(f, "[OK] NO BAN (check #{check})"),
            Self::StaleSanction { check, text } => {
                write!(f, "[OK] NO NEW BAN (check #{check}, old ban: {text})")
            }
            Self::Error { detail } => write!(f, "[ERROR] {detail}"),
            Self::Alert { text } => write!(f, "[ALERT] Ban confirmed ({text}). Starting hand-off."),
            Self::Safeguard => f.write_str("[SAFEGUARD] False-positive ban alert prevented."),
            Self::Simulated { kind, check } => {
                write!(f, "[DRY-RUN] {kind} ban detected (simulated) at check #{check}.")
            }
        }
    }
}
