//! Channel-based message-passing fabric connecting simulation ranks.
//!
//! Realizes the six message kinds of the design's message protocol (§4.3) as
//! a typed [`Message`] moving over per-rank mailboxes built on
//! `crossbeam-channel`. See [`World`] for how ranks are wired together.

pub mod message;
pub mod send_buffer;
pub mod world;

pub use message::Message;
pub use send_buffer::SendBuffer;
pub use world::{Endpoint, World};
