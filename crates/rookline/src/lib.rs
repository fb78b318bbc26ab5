//! # Rookline
//!
//! Client protocol engine for line-oriented chess servers of the FICS
//! family: it turns the server's unframed ASCII stream into structured
//! match state (board, clocks, identities) and local user actions into
//! outbound command text.
//!
//! The engine itself is synchronous and single-threaded — all parsing
//! happens inside [`Client::on_chunk`] — while the bundled
//! [`runner`](run_session) pumps a TCP connection through it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use rookline::prelude::*;
//!
//! # async fn demo() -> Result<(), rookline::RooklineError> {
//! let config = SessionConfig::default(); // guest on the public server
//! let mut client = Client::new(
//!     config,
//!     PanelGeometry::default(),
//!     QueueSink::new(),
//!     TracingFrontEnd,
//! )?;
//!
//! client.connect()?;
//! let mut conn =
//!     TcpConnection::connect(&client.config().host, client.config().port).await?;
//! run_session(&mut client, &mut conn).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod dispatch;
mod error;
mod runner;
mod surface;

pub use client::{Affordances, Client, PanelGeometry, TRANSIENT_MESSAGE_ROW};
pub use dispatch::{Dispatcher, Flow, Routed, Trigger};
pub use error::RooklineError;
pub use runner::run_session;
pub use surface::{CommandSink, FrontEnd, QueueSink, TracingFrontEnd};

/// One-stop imports for front ends.
pub mod prelude {
    pub use crate::{
        run_session, Affordances, Client, CommandSink, FrontEnd, PanelGeometry, QueueSink,
        RooklineError, TracingFrontEnd,
    };
    pub use rookline_board::{BoardInput, BoardState, Selection};
    pub use rookline_panel::LogPanel;
    pub use rookline_protocol::{GameFrame, Side};
    pub use rookline_session::{
        AccountKind, GameType, SessionConfig, SessionError, SessionPhase,
    };
    pub use rookline_transport::{Connection, TcpConnection};
}
