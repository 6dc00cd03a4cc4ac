// Per-user session context: state machine, in-flight cancellation, TTL expiry.
// Sessions live in memory only and are gone on restart.

pub mod handlers;
pub mod store;

pub use store::SessionStore;
