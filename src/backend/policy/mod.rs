//! Conversation Policy Store
//!
//! The authoritative side of the conversation-limiting policy: counting
//! active conversations, gating new ones, gating pause mode, and the
//! conversation write paths (start, message, graceful close, archive).
//!
//! Clients may cache or pre-render the policy constants, but every decision
//! here is re-made against live data; nothing trusts a client-supplied
//! count.

pub mod db;
pub mod handlers;
