//! # Replication Result Codes
//!
//! The deterministic response-code space for the replication lifecycle.
//! Only zero is reserved for OK; everything else is application-defined.
//! These codes are part of the cross-replica agreement surface: the same
//! transaction sequence must yield the same codes on every replica.

/// Accepted. The only reserved value.
pub const CODE_OK: u32 = 0;

/// The transaction bytes do not match the `key:old:new` wire contract,
/// or the query path was handed an unusable key.
pub const CODE_BAD_REQUEST: u32 = 513;

/// Well-formed transaction whose compare-and-swap precondition did not hold
/// against the targeted state view. Routine, never a system error.
pub const CODE_CAS_FAILURE: u32 = 514;

/// Query for a key with no committed value. Read path only.
pub const CODE_NOT_FOUND: u32 = 515;

/// True when a response code denotes acceptance.
pub fn is_ok(code: u32) -> bool {
    code == CODE_OK
}
