//! The client engine: session handshake, game traffic, and local actions.
//!
//! One [`Client`] owns the whole protocol state for one session and is
//! driven from exactly two directions:
//!
//! - [`on_chunk`](Client::on_chunk) with each inbound delivery (plus
//!   [`on_transport_error`](Client::on_transport_error) for a failed read),
//! - the local-action methods ([`new_game`](Client::new_game),
//!   [`on_board_input`](Client::on_board_input), [`say`](Client::say), ...)
//!   from the front end.
//!
//! Everything runs synchronously inside those calls; the engine never
//! blocks and never does I/O — outbound text goes through the
//! [`CommandSink`] and user-visible failures through the [`FrontEnd`].

use tracing::{debug, info, warn};

use rookline_board::{BoardInput, BoardState, Selection};
use rookline_panel::{flow_message, LogPanel};
use rookline_protocol::markers::{
    CHAT_SAYS, CMD_QUIT, CMD_REFRESH, CMD_SOUGHT, GAME_BRACE, GAME_CREATED, OBSERVED_REMOVED,
    QUIESCENT, SNAPSHOT,
};
use rookline_protocol::{parse_snapshot, GameFrame, Side, SoughtOutcome, SoughtScanner};
use rookline_session::{LoginScanner, LoginStep, SessionConfig, SessionError, SessionPhase};

use crate::dispatch::{Dispatcher, Flow, Routed, Trigger};
use crate::surface::{CommandSink, FrontEnd};
use crate::RooklineError;

/// Status-panel row where transient messages (results, chat) are re-flowed,
/// below the persistent game statistics.
pub const TRANSIENT_MESSAGE_ROW: usize = 15;

// ---------------------------------------------------------------------------
// Geometry and affordances
// ---------------------------------------------------------------------------

/// Dimensions of the two log panels.
#[derive(Debug, Clone, Copy)]
pub struct PanelGeometry {
    pub terminal_cols: usize,
    pub terminal_rows: usize,
    pub status_cols: usize,
    pub status_rows: usize,
}

impl Default for PanelGeometry {
    fn default() -> Self {
        Self {
            terminal_cols: 80,
            terminal_rows: 24,
            status_cols: 26,
            status_rows: 24,
        }
    }
}

/// Which in-game actions the front end should currently offer.
///
/// `new_game`/`stop_seek` are mutually exclusive with `resign`/`unobserve`:
/// entering a game hides the seek actions and enables exactly one of the
/// other two depending on participation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Affordances {
    pub new_game: bool,
    pub stop_seek: bool,
    pub resign: bool,
    pub unobserve: bool,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// The protocol engine for one session.
pub struct Client<S: CommandSink, F: FrontEnd> {
    config: SessionConfig,
    phase: SessionPhase,
    dispatcher: Dispatcher,
    login: LoginScanner,
    search: Option<SoughtScanner>,
    board: BoardState,
    frame: GameFrame,
    game_active: bool,
    refresh: bool,
    affordances: Affordances,
    terminal: LogPanel,
    status: LogPanel,
    sink: S,
    front: F,
}

impl<S: CommandSink, F: FrontEnd> Client<S, F> {
    /// Builds an offline client.
    ///
    /// # Errors
    /// Fails only when a log panel cannot be set up — without panels there
    /// is nowhere to show anything, so callers should treat this as fatal.
    pub fn new(
        config: SessionConfig,
        geometry: PanelGeometry,
        sink: S,
        front: F,
    ) -> Result<Self, RooklineError> {
        let terminal = LogPanel::new(geometry.terminal_cols, geometry.terminal_rows)?;
        let mut status = LogPanel::new(geometry.status_cols, geometry.status_rows)?;
        status.set_clip(true);
        let login = LoginScanner::new(config.account);
        Ok(Self {
            config,
            phase: SessionPhase::Offline,
            dispatcher: Dispatcher::new(),
            login,
            search: None,
            board: BoardState::default(),
            frame: GameFrame::default(),
            game_active: false,
            refresh: false,
            affordances: Affordances::default(),
            terminal,
            status,
            sink,
            front,
        })
    }

    // -- State the front end reads ---------------------------------------

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Reconfigure while offline; ignored mid-session so the handshake and
    /// an edit cannot race.
    pub fn set_config(&mut self, config: SessionConfig) {
        if self.phase == SessionPhase::Offline {
            self.login = LoginScanner::new(config.account);
            self.config = config;
        } else {
            warn!("config change ignored while a session is active");
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn frame(&self) -> &GameFrame {
        &self.frame
    }

    /// `true` while a game (played or observed) is on the board.
    pub fn game_active(&self) -> bool {
        self.game_active
    }

    pub fn affordances(&self) -> Affordances {
        self.affordances
    }

    /// Whether the board display is stale; reading resets the flag.
    pub fn take_refresh(&mut self) -> bool {
        std::mem::replace(&mut self.refresh, false)
    }

    /// Raw server text, always appended regardless of parsing outcome.
    pub fn terminal(&self) -> &LogPanel {
        &self.terminal
    }

    /// Game statistics and transient messages.
    pub fn status(&self) -> &LogPanel {
        &self.status
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn front_mut(&mut self) -> &mut F {
        &mut self.front
    }

    // -- Session lifecycle ------------------------------------------------

    /// Prepares the engine for a fresh connection: validates the
    /// configuration and arms the login-prompt trigger. The caller dials
    /// the transport only when this succeeds.
    ///
    /// # Errors
    /// [`SessionError::EmptyPassword`] (also surfaced through the front
    /// end) when a registered login has no password.
    pub fn connect(&mut self) -> Result<(), SessionError> {
        if let Err(error) = self.config.validate() {
            self.front.report(false, &error.to_string());
            return Err(error);
        }
        self.login = LoginScanner::new(self.config.account);
        self.dispatcher.set_trigger(Trigger::LoginPrompt);
        self.phase = SessionPhase::AwaitLoginPrompt;
        info!(
            host = %self.config.host,
            port = self.config.port,
            user = %self.config.user_name,
            "connecting"
        );
        Ok(())
    }

    /// Starts a clean session shutdown: the sign-off trigger is armed and
    /// `quit` goes out; the server's closing line completes the teardown.
    pub fn quit(&mut self) {
        self.dispatcher.set_trigger(Trigger::Closed);
        self.sink.send_line(CMD_QUIT);
    }

    /// User cancel: tear everything down immediately.
    pub fn cancel(&mut self) {
        self.go_offline();
    }

    /// The transport failed a read. Non-fatal: report, drop the link, and
    /// return to the offline phase.
    pub fn on_transport_error(&mut self) {
        self.front.report(false, "TCP recv error.");
        self.go_offline();
    }

    // -- Inbound dispatch -------------------------------------------------

    /// Feeds one inbound delivery through the dispatcher. Exactly one
    /// handler (trigger or flow) sees the chunk; the terminal log always
    /// does.
    pub fn on_chunk(&mut self, chunk: &[u8]) {
        self.terminal.add_line(chunk);
        match self.dispatcher.route(chunk) {
            Routed::Dropped => {}
            Routed::Trigger { trigger, offset } => self.on_trigger(trigger, offset),
            Routed::Stream(flow) => self.on_stream(flow, chunk),
        }
    }

    fn on_trigger(&mut self, trigger: Trigger, offset: usize) {
        debug!(?trigger, offset, "trigger fired");
        match trigger {
            Trigger::LoginPrompt => {
                self.dispatcher.set_stream(Flow::Login);
                self.phase = SessionPhase::AwaitCredentialResult;
                let name = self.config.user_name.clone();
                self.sink.send_line(&name);
            }
            Trigger::Ready => {
                self.dispatcher.set_stream(Flow::Game);
                self.phase = SessionPhase::Online;
                self.affordances = Affordances {
                    new_game: true,
                    ..Affordances::default()
                };
                info!("session online");
            }
            Trigger::Closed => {
                self.dispatcher.clear();
                self.sink.hangup();
                self.phase = SessionPhase::Offline;
                info!("connection closed by server");
            }
        }
    }

    fn on_stream(&mut self, flow: Flow, chunk: &[u8]) {
        match flow {
            Flow::Login => self.scan_login(chunk),
            Flow::Search => self.scan_search(chunk),
            Flow::Game => self.scan_game(chunk),
        }
    }

    // -- Login flow -------------------------------------------------------

    fn scan_login(&mut self, chunk: &[u8]) {
        let steps = self.login.scan(chunk);
        for step in steps {
            match step {
                LoginStep::SendPassword => {
                    let password = self.config.password.clone();
                    self.sink.send_line(&password);
                }
                LoginStep::CredentialOk => {
                    self.dispatcher.set_trigger(Trigger::Ready);
                    self.begin_online_init();
                }
                LoginStep::Reject(rejection) => {
                    self.abort_session(&SessionError::Rejected(rejection).to_string());
                    return;
                }
            }
        }
    }

    /// Credentials accepted: push the fixed setup batch and the match
    /// preference variables. The acknowledgment of the last batch arrives
    /// as the already-armed ready trigger.
    fn begin_online_init(&mut self) {
        self.phase = SessionPhase::AwaitOnlineReady;
        // The leading newline answers the "press return" guest prompt.
        self.sink
            .send_line("\nset bell 0\nset seek 0\nset style 12\nset autoflag 1");
        let variables = [
            ("time", self.config.start_time),
            ("inc", self.config.increment),
            ("availmax", self.config.max_rating),
            ("availmin", self.config.min_rating),
        ];
        for (name, value) in variables {
            self.sink.send_line(&format!("set {name} {value}"));
        }
    }

    fn abort_session(&mut self, message: &str) {
        warn!(message, "session aborted");
        self.front.report(false, message);
        self.go_offline();
    }

    fn go_offline(&mut self) {
        self.dispatcher.clear();
        self.search = None;
        self.sink.hangup();
        self.phase = SessionPhase::Offline;
    }

    // -- Match making -----------------------------------------------------

    /// Requests a new game: either scan the open-match listing for the
    /// closest rating, or post an open seek, per configuration.
    pub fn new_game(&mut self) {
        self.board.reset_for_match();
        self.play(self.config.use_seek);
    }

    fn play(&mut self, use_seek: bool) {
        self.affordances.new_game = false;
        if use_seek {
            self.play_seek();
        } else {
            self.search = Some(SoughtScanner::new(self.config.seek_filter()));
            self.dispatcher.set_stream(Flow::Search);
            self.sink.send_line(CMD_SOUGHT);
        }
    }

    fn play_seek(&mut self) {
        self.affordances.stop_seek = true;
        if let Some(command) = self.config.seek_command() {
            self.sink.send_line(&command);
        }
    }

    fn scan_search(&mut self, chunk: &[u8]) {
        let Some(scanner) = self.search.as_mut() else {
            self.dispatcher.set_stream(Flow::Game);
            return;
        };
        match scanner.scan(chunk) {
            SoughtOutcome::Pending => {}
            SoughtOutcome::Matched(game) => {
                self.search = None;
                self.dispatcher.set_stream(Flow::Game);
                self.sink.send_line(&format!("play {game}"));
                // Asking is not getting: leave the new-game action around
                // in case the request is declined.
                self.affordances.new_game = true;
            }
            SoughtOutcome::Exhausted => {
                self.search = None;
                self.dispatcher.set_stream(Flow::Game);
                self.play_seek();
            }
        }
    }

    /// Withdraws an open seek.
    pub fn stop_seek(&mut self) {
        self.affordances.new_game = true;
        self.affordances.stop_seek = false;
        self.sink.send_line("unseek");
    }

    // -- In-game actions --------------------------------------------------

    pub fn resign(&mut self) {
        self.sink.send_line("resign");
    }

    pub fn unobserve(&mut self) {
        self.sink.send_line("unobserve");
    }

    /// Sends a chat line to the opponent; empty text sends nothing.
    pub fn say(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.sink.send_line(&format!("say {text}"));
    }

    /// Updates the rated-games preference and tells the server.
    pub fn set_rated(&mut self, rated: bool) {
        self.config.rated = rated;
        self.sink.send_line(&format!("set rated {}", self.config.rated_code()));
    }

    /// Routes a directional or select event to the board. Only meaningful
    /// while the local player is a participant.
    pub fn on_board_input(&mut self, input: BoardInput) {
        if !self.board.includes_me {
            return;
        }
        match input {
            BoardInput::Select => {
                if let Selection::Move(text) = self.board.select() {
                    self.sink.send_line(&text);
                }
            }
            directional => self.board.move_cursor(directional),
        }
    }

    // -- Game traffic -----------------------------------------------------

    /// Scans regular game traffic. Several records can share one chunk
    /// (a snapshot and its game-over notice often do), so scanning always
    /// continues past a handled record instead of returning early.
    fn scan_game(&mut self, chunk: &[u8]) {
        let mut i = 0usize;
        while i < chunk.len() {
            let rest = &chunk[i..];
            if rest.starts_with(SNAPSHOT) {
                self.game_active = true;
                match parse_snapshot(rest) {
                    Err(error) => {
                        // Bad or cut-off frame: ask for a clean snapshot
                        // and leave the board exactly as it was.
                        debug!(%error, "snapshot refused, requesting refresh");
                        self.sink.send_line(CMD_REFRESH);
                        return;
                    }
                    Ok(snapshot) => {
                        self.refresh = true;
                        self.board.load_cells(snapshot.cells);
                        self.board.apply_frame(&snapshot.frame);
                        self.frame = snapshot.frame;
                        self.enter_game_affordances();
                        self.rebuild_status();
                        i += snapshot.consumed;
                        while i < chunk.len() && chunk[i] != b'\n' {
                            i += 1;
                        }
                    }
                }
            } else if rest.starts_with(GAME_BRACE) {
                self.refresh = true;
                while i < chunk.len() && chunk[i] != b')' {
                    i += 1;
                }
                i = (i + 2).min(chunk.len());
                if i < chunk.len() {
                    if !chunk[i..].starts_with(GAME_CREATED) {
                        self.game_active = false;
                    }
                    flow_message(&mut self.status, TRANSIENT_MESSAGE_ROW, &chunk[i..], b'}');
                }
                if self.board.includes_me {
                    self.sink.send_line(CMD_REFRESH);
                }
            } else if rest.starts_with(OBSERVED_REMOVED) {
                self.sink.send_line(CMD_REFRESH);
            } else if rest.starts_with(QUIESCENT) {
                self.affordances.new_game = true;
                self.affordances.resign = false;
                self.affordances.unobserve = false;
                self.game_active = false;
            } else if rest.starts_with(CHAT_SAYS) {
                let start = i + CHAT_SAYS.len();
                let mut end = start;
                while end < chunk.len() && chunk[end] != b'\n' {
                    end += 1;
                }
                if end < chunk.len() {
                    flow_message(
                        &mut self.status,
                        TRANSIENT_MESSAGE_ROW,
                        &chunk[start..end],
                        b'\n',
                    );
                    self.refresh = true;
                }
                i = end;
            }
            i += 1;
        }
    }

    /// On the first frame of a match, swap the seek actions for the one
    /// in-game action that applies.
    fn enter_game_affordances(&mut self) {
        if !(self.affordances.new_game || self.affordances.stop_seek) {
            return;
        }
        self.affordances.new_game = false;
        self.affordances.stop_seek = false;
        if self.board.includes_me {
            self.affordances.resign = true;
        } else {
            self.affordances.unobserve = true;
        }
    }

    /// Rebuilds the status panel from the current frame: game number, both
    /// sides' name/strength/clock (local side first), whose move is next,
    /// and the last move played.
    fn rebuild_status(&mut self) {
        self.status.clear();
        let mut line = format!("Game #{}", self.frame.game_number);
        self.status.add_line(line.as_bytes());
        self.status.add_line(b"\n");

        for side in [self.board.my_side, self.board.my_side.opposite()] {
            let (name, strength, remaining) = match side {
                Side::White => (
                    &self.frame.white_name,
                    &self.frame.white_strength,
                    &self.frame.white_remaining,
                ),
                Side::Black => (
                    &self.frame.black_name,
                    &self.frame.black_strength,
                    &self.frame.black_remaining,
                ),
            };
            line = format!("  {}", side.label());
            self.status.add_line(line.as_bytes());
            self.status.add_line(name.as_bytes());
            line = format!("Strength: {strength}");
            self.status.add_line(line.as_bytes());
            line = format!("Time: {remaining}");
            self.status.add_line(line.as_bytes());
            self.status.add_line(b"\n");
        }

        let next = if self.frame.white_to_move() {
            Side::White
        } else {
            Side::Black
        };
        line = format!("Next: {}", next.label());
        self.status.add_line(line.as_bytes());
        line = format!("Last: {}", self.frame.previous_move);
        self.status.add_line(line.as_bytes());
    }
}
