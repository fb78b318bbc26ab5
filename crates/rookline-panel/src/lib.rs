//! Fixed-geometry log panels for Rookline.
//!
//! A [`LogPanel`] is a ring buffer of fixed-width text rows. Two panels back
//! the client UI:
//!
//! - the **terminal** panel, which receives every inbound chunk verbatim so
//!   raw server text stays inspectable regardless of parsing outcome, and
//! - the **status** panel, which holds the per-game statistics block plus a
//!   transient-message region that notices and chat are re-flowed into.
//!
//! Panels never allocate after construction — geometry is fixed up front and
//! oversized input is either wrapped row-by-row or clipped, depending on the
//! panel's clip setting. The word-wrapping re-flow for server notices lives
//! in [`flow_message`].

mod error;
mod panel;
mod wrap;

pub use error::PanelError;
pub use panel::LogPanel;
pub use wrap::flow_message;
