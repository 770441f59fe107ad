//! Nudge Dispatching
//!
//! Two reminder paths with different severities and cooldown mechanics:
//!
//! - The soft nudge fires early in the silence window and is rate-limited
//!   per (user, counterpart) pair via a notification-history scan, so the
//!   cooldown survives across distinct conversations with the same person.
//! - The escalated ghosting reminder fires close to the lapse cutoff and is
//!   rate-limited per conversation via the `reminder_sent_at` stamp, which
//!   is cheaper to check and all the scoping that path needs.

pub mod db;
pub mod dispatcher;
pub mod handlers;

pub use dispatcher::{send_conversation_nudges, send_ghosting_reminders};
