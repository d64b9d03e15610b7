//! Binary uploads (resume PDF, demo videos) and the static reader that serves them.
//!
//! Uploads are checked for type and size while still in memory; the
//! filesystem is touched only after both checks pass. Stored names are
//! generated server-side, never taken from the client.

pub mod handlers;
pub mod policy;
pub mod serve;
