//! Pattern matching over script asm strings.
//!
//! Nothing here interprets a script, the functions only look at its text as printed by
//! the node, so results are only meaningful for scripts in a standard form.

use std::fmt;

use lazy_static::lazy_static;
use regex_lite::Regex;

lazy_static! {
    static ref RE: Regex = Regex::new(r"OP_[A-Z0-9_]+").unwrap();
}

/// Multisig classification of a script
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Multisig {
    /// No `OP_CHECKMULTISIG`
    None,
    /// M-of-N
    Threshold { m: u32, n: u32 },
    /// Has `OP_CHECKMULTISIG` but M or N isn't where it's expected
    Unknown,
}

impl fmt::Display for Multisig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "No Multi-Sig"),
            Self::Threshold { m, n } => write!(f, "🔐 Multi-Sig: {m}-of-{n}"),
            Self::Unknown => write!(f, "🔐 Multi-Sig Detected, but M/N extraction failed"),
        }
    }
}

/// Returns the opcodes found in `asm` joined by a space
pub fn extract_opcodes(asm: &str) -> String {
    if asm.is_empty() {
        return String::from("N/A");
    }
    let opcodes: Vec<&str> = RE.find_iter(asm).map(|m| m.as_str()).collect();
    if opcodes.is_empty() {
        return String::from("No OP codes found");
    }
    opcodes.join(" ")
}

/// Detects a bare M-of-N multisig, taking M from the first token and N from the token
/// before `OP_CHECKMULTISIG`
pub fn detect_multisig(asm: &str) -> Multisig {
    if !asm.contains("OP_CHECKMULTISIG") {
        return Multisig::None;
    }
    let parts: Vec<&str> = asm.split_whitespace().collect();
    let Some(pos) = parts.iter().position(|&s| s == "OP_CHECKMULTISIG") else {
        // e.g. OP_CHECKMULTISIGVERIFY only
        return Multisig::Unknown;
    };
    if pos == 0 {
        return Multisig::Unknown;
    }
    match (parse_small_int(parts[0]), parse_small_int(parts[pos - 1])) {
        (Some(m), Some(n)) => Multisig::Threshold { m, n },
        _ => Multisig::Unknown,
    }
}

/// Parses a token made only of ascii digits
fn parse_small_int(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
