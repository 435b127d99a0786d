//! Categorizing node error messages.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::RpcError;

fn assert_wrapper() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Node assertion failures read "10 assert_exception: Assert Exception\n<expr>: <message>\n...".
    RE.get_or_init(|| {
        Regex::new(r"(?m)(?:10 assert_exception: Assert Exception|3030000 tx_missing_\w+_auth)\s*\n(.*)\n")
            .expect("assert wrapper pattern is valid")
    })
}

/// Strip the node's assertion wrapper, returning the human-readable line.
pub fn decode_rpc_message(message: &str) -> &str {
    assert_wrapper()
        .captures(message)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(message)
}

/// Map a node error message onto an [`RpcError`] category.
///
/// Unrecognized messages become [`RpcError::Unhandled`] carrying the
/// original, unstripped text.
pub fn classify_rpc_error(message: &str) -> RpcError {
    let decoded = decode_rpc_message(message).to_string();
    if decoded.contains("missing required active authority") {
        RpcError::MissingRequiredActiveAuthority(decoded)
    } else if decoded.contains("missing required owner authority") {
        RpcError::MissingRequiredOwnerAuthority(decoded)
    } else if decoded.contains("no method with name") {
        RpcError::NoMethodWithName(decoded)
    } else if decoded.contains("Proposed operation is already pending for approval.") {
        RpcError::OperationInProposalExists(decoded)
    } else {
        RpcError::Unhandled(message.to_string())
    }
}
