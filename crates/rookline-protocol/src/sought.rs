//! Incremental scanner for the open-match listing.
//!
//! The listing is tabular text, one candidate per line, possibly spread
//! across several deliveries:
//!
//! ```text
//!  90 1731 hawkeye             5   0 rated   blitz                  0-9999 mf
//! 103 ---- GuestKPXR           5   0 unrated blitz      [white]     0-9999
//! 2 ads displayed.
//! ```
//!
//! The scanner walks each record through a fixed field order and keeps the
//! candidate whose rating sits closest to the local player's. A record whose
//! token is cut off by the delivery boundary is discarded up to the next
//! line break — partial records are never carried across deliveries, so all
//! extracted text lives only as long as one scan call unless it is copied
//! into the scanner's bounded slots.

use arrayvec::ArrayString;
use tracing::{debug, trace};

use crate::token::{is_number_byte, is_space, parse_decimal};

/// Widest token the scanner keeps; longer tokens are capped, which is
/// harmless because every filtered field is far narrower.
const WORD_CAP: usize = 24;

type Word = ArrayString<WORD_CAP>;

/// Bounded copy of a token slice.
fn word_from(bytes: &[u8]) -> Word {
    let mut word = Word::new();
    for &b in bytes.iter().take(WORD_CAP) {
        word.push(b as char);
    }
    word
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// The fields of one listing record, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    GameNumber,
    Ranking,
    UserName,
    StartTime,
    IncTime,
    Rated,
    GameType,
    StartColor,
    Range,
    Extra,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Self::GameNumber => Self::Ranking,
            Self::Ranking => Self::UserName,
            Self::UserName => Self::StartTime,
            Self::StartTime => Self::IncTime,
            Self::IncTime => Self::Rated,
            Self::Rated => Self::GameType,
            Self::GameType => Self::StartColor,
            Self::StartColor => Self::Range,
            Self::Range => Self::Extra,
            Self::Extra => Self::Extra,
        }
    }
}

const FIELD_SLOTS: usize = 10;

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// What the local player is willing to accept from the listing.
#[derive(Debug, Clone)]
pub struct SeekFilter {
    /// Wanted game type name (`blitz`, `standard`, ...). `None` accepts any.
    pub game_type: Option<String>,
    /// First letter of the wanted rated column: `b'r'` or `b'u'`.
    pub rated: u8,
    /// The local player's rating; candidates are ranked by distance to it.
    pub rating: u16,
}

impl Default for SeekFilter {
    fn default() -> Self {
        Self {
            game_type: None,
            rated: b'u',
            rating: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Result of feeding one delivery to the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoughtOutcome {
    /// The listing has not ended yet; feed the next delivery.
    Pending,
    /// Listing ended and a candidate fit: join this game number.
    Matched(ArrayString<5>),
    /// Listing ended with no acceptable candidate.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanStatus {
    Okay,
    /// Record split by the delivery boundary; skip to the next line.
    NextLine,
    Done,
    NoMatch,
}

/// Incremental listing scanner; one per `sought` request.
///
/// All positional state (the scan window, extracted token text) is local to
/// a single [`scan`](Self::scan) call or held in bounded slots — nothing
/// borrows the delivered chunk across calls.
pub struct SoughtScanner {
    filter: SeekFilter,
    field: Field,
    needs_resync: bool,
    words: [Word; FIELD_SLOTS],
    best_delta: u16,
    best_game: ArrayString<5>,
}

impl SoughtScanner {
    /// Fresh scanner state for a new listing.
    pub fn new(filter: SeekFilter) -> Self {
        Self {
            filter,
            field: Field::GameNumber,
            needs_resync: false,
            words: Default::default(),
            best_delta: u16::MAX,
            best_game: ArrayString::new(),
        }
    }

    /// Scans one delivered chunk and reports whether the listing concluded.
    pub fn scan(&mut self, chunk: &[u8]) -> SoughtOutcome {
        let mut pos = 0usize;

        if self.needs_resync {
            // The previous delivery ended mid-record; drop everything up to
            // the next line break and start a fresh record.
            while pos < chunk.len() && chunk[pos] != b'\n' {
                pos += 1;
            }
            self.field = Field::GameNumber;
            self.needs_resync = false;
        }

        let mut status = ScanStatus::Okay;
        while status == ScanStatus::Okay && pos < chunk.len() {
            match self.field {
                Field::GameNumber
                | Field::StartTime
                | Field::IncTime
                | Field::Range => {
                    self.next_number(chunk, &mut pos, &mut status);
                }
                Field::Ranking => {
                    let committed = self.next_number(chunk, &mut pos, &mut status);
                    if committed && self.words[Field::Ranking as usize].is_empty() {
                        // A blank rating column means the listing footer,
                        // i.e. end of the listing.
                        status = if self.best_game.is_empty() {
                            ScanStatus::NoMatch
                        } else {
                            ScanStatus::Done
                        };
                    }
                }
                Field::UserName | Field::Rated | Field::GameType => {
                    self.next_word(chunk, &mut pos, &mut status);
                }
                Field::StartColor => {
                    let committed = self.next_word(chunk, &mut pos, &mut status);
                    let color = &self.words[Field::StartColor as usize];
                    if committed && !color.is_empty() && !color.starts_with('[') {
                        // No bracketed color marker: the token was really
                        // the rating range, so shift it over and move on.
                        self.words[Field::Range as usize] =
                            self.words[Field::StartColor as usize];
                        self.words[Field::StartColor as usize] = Word::new();
                        self.field = Field::Extra;
                    }
                }
                Field::Extra => {
                    self.finish_record(chunk, &mut pos, &mut status);
                }
            }
        }

        match status {
            ScanStatus::Done => {
                debug!(game = %self.best_game, "listing matched a candidate");
                SoughtOutcome::Matched(self.best_game)
            }
            ScanStatus::NoMatch => {
                debug!("listing exhausted without a candidate");
                SoughtOutcome::Exhausted
            }
            ScanStatus::NextLine => {
                self.needs_resync = true;
                SoughtOutcome::Pending
            }
            ScanStatus::Okay => SoughtOutcome::Pending,
        }
    }

    /// Extracts the next numeric token into the current field slot.
    ///
    /// Returns `true` when a token (possibly empty, for a non-numeric
    /// column) was committed and the field advanced. Running out of input
    /// inside the token flags a split record; running out while skipping
    /// whitespace just waits for the next delivery.
    fn next_number(&mut self, chunk: &[u8], pos: &mut usize, status: &mut ScanStatus) -> bool {
        while *pos < chunk.len() && is_space(chunk[*pos]) {
            *pos += 1;
        }
        if *pos == chunk.len() {
            return false;
        }
        if !is_number_byte(chunk[*pos]) {
            self.words[self.field as usize] = Word::new();
            self.field = self.field.next();
        }
        let start = *pos;
        while *pos < chunk.len() && is_number_byte(chunk[*pos]) {
            *pos += 1;
        }
        if *pos < chunk.len() {
            self.words[self.field as usize] = word_from(&chunk[start..*pos]);
            self.field = self.field.next();
            true
        } else {
            *status = ScanStatus::NextLine;
            false
        }
    }

    /// Extracts the next whitespace-delimited word into the current field
    /// slot. Same commit/split contract as [`next_number`](Self::next_number).
    fn next_word(&mut self, chunk: &[u8], pos: &mut usize, status: &mut ScanStatus) -> bool {
        while *pos < chunk.len() && is_space(chunk[*pos]) {
            *pos += 1;
        }
        if *pos == chunk.len() {
            return false;
        }
        if chunk[*pos] == 0 {
            self.words[self.field as usize] = Word::new();
            self.field = self.field.next();
        }
        let start = *pos;
        while *pos < chunk.len() && chunk[*pos] != 0 && !is_space(chunk[*pos]) {
            *pos += 1;
        }
        if *pos < chunk.len() {
            self.words[self.field as usize] = word_from(&chunk[start..*pos]);
            self.field = self.field.next();
            true
        } else {
            *status = ScanStatus::NextLine;
            false
        }
    }

    /// Consumes trailing annotations up to the end of the record's line,
    /// then judges the record against the filter.
    fn finish_record(&mut self, chunk: &[u8], pos: &mut usize, status: &mut ScanStatus) {
        self.words[Field::Extra as usize] = Word::new();
        while *pos < chunk.len() {
            while *pos < chunk.len() && chunk[*pos] != b'\n' && is_space(chunk[*pos]) {
                *pos += 1;
            }
            if *pos == chunk.len() {
                break;
            }
            if chunk[*pos] != b'\n' {
                self.next_word(chunk, pos, status);
                if *status != ScanStatus::Okay {
                    break;
                }
                self.field = Field::Extra;
            } else {
                self.field = Field::GameNumber;
                self.judge_candidate();
                break;
            }
        }
    }

    /// Applies the filter to the just-completed record and keeps the game
    /// number when it beats the best rating distance so far.
    fn judge_candidate(&mut self) {
        if !self.words[Field::StartColor as usize].is_empty() {
            trace!("candidate rejected: color preference attached");
            return;
        }
        if !self.words[Field::Extra as usize].is_empty() {
            trace!("candidate rejected: trailing annotations");
            return;
        }
        if let Some(wanted) = &self.filter.game_type {
            let got = self.words[Field::GameType as usize].as_bytes();
            let wanted = wanted.as_bytes();
            if wanted.len() < got.len() || &wanted[..got.len()] != got {
                trace!("candidate rejected: game type mismatch");
                return;
            }
        }
        let rated = self.words[Field::Rated as usize].as_bytes().first().copied();
        if rated != Some(self.filter.rated) {
            trace!("candidate rejected: rated preference mismatch");
            return;
        }

        let rating = parse_decimal(&self.words[Field::Ranking as usize]);
        let distance = (rating - i32::from(self.filter.rating)).unsigned_abs();
        let delta = u16::try_from(distance).unwrap_or(u16::MAX);
        let number = self.words[Field::GameNumber as usize];
        if delta < self.best_delta && number.len() < 5 {
            if let Ok(game) = ArrayString::from(number.as_str()) {
                debug!(game = %game, delta, "new best candidate");
                self.best_delta = delta;
                self.best_game = game;
            }
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn blitz_filter(rating: u16) -> SeekFilter {
        SeekFilter {
            game_type: Some("blitz".to_string()),
            rated: b'u',
            rating,
        }
    }

    const FOOTER: &[u8] = b"2 ads displayed.\n";

    #[test]
    fn test_scan_picks_closest_rating() {
        let mut scanner = SoughtScanner::new(blitz_filter(1200));
        let listing =
            b"  5 1234 bob        5   0 unrated blitz       0-9999\n  \
6 1190 al         5   0 unrated blitz       0-9999\n2 ads displayed.\n";
        let outcome = scanner.scan(listing);
        // Game 6 wins: |1190-1200| = 10 beats |1234-1200| = 34.
        assert_eq!(
            outcome,
            SoughtOutcome::Matched(ArrayString::from("6").expect("fits"))
        );
    }

    #[test]
    fn test_scan_rejects_color_preference() {
        let mut scanner = SoughtScanner::new(blitz_filter(1200));
        let mut listing =
            b"  5 1201 bob        5   0 unrated blitz  [white]  0-9999\n".to_vec();
        listing.extend_from_slice(FOOTER);
        assert_eq!(scanner.scan(&listing), SoughtOutcome::Exhausted);
    }

    #[test]
    fn test_scan_rejects_trailing_annotations() {
        let mut scanner = SoughtScanner::new(blitz_filter(1200));
        let mut listing =
            b"  5 1201 bob        5   0 unrated blitz       0-9999 mf\n".to_vec();
        listing.extend_from_slice(FOOTER);
        assert_eq!(scanner.scan(&listing), SoughtOutcome::Exhausted);
    }

    #[test]
    fn test_scan_rejects_game_type_mismatch() {
        let mut scanner = SoughtScanner::new(blitz_filter(1200));
        let mut listing =
            b"  5 1201 bob        15  0 unrated standard    0-9999\n".to_vec();
        listing.extend_from_slice(FOOTER);
        assert_eq!(scanner.scan(&listing), SoughtOutcome::Exhausted);
    }

    #[test]
    fn test_scan_rejects_rated_mismatch() {
        let mut scanner = SoughtScanner::new(blitz_filter(1200));
        let mut listing =
            b"  5 1201 bob        5   0 rated   blitz       0-9999\n".to_vec();
        listing.extend_from_slice(FOOTER);
        assert_eq!(scanner.scan(&listing), SoughtOutcome::Exhausted);
    }

    #[test]
    fn test_scan_without_filter_accepts_any_type() {
        let mut scanner = SoughtScanner::new(SeekFilter {
            game_type: None,
            rated: b'r',
            rating: 1500,
        });
        let mut listing =
            b" 12 1480 keres      15  0 rated   standard    0-9999\n".to_vec();
        listing.extend_from_slice(FOOTER);
        assert_eq!(
            scanner.scan(&listing),
            SoughtOutcome::Matched(ArrayString::from("12").expect("fits"))
        );
    }

    #[test]
    fn test_scan_guest_placeholder_rating_parses_as_zero() {
        let mut scanner = SoughtScanner::new(blitz_filter(0));
        let mut listing =
            b" 44 ---- GuestTJQX  5   0 unrated blitz       0-9999\n".to_vec();
        listing.extend_from_slice(FOOTER);
        assert_eq!(
            scanner.scan(&listing),
            SoughtOutcome::Matched(ArrayString::from("44").expect("fits"))
        );
    }

    #[test]
    fn test_scan_record_split_mid_token_is_discarded() {
        let mut scanner = SoughtScanner::new(blitz_filter(1200));
        // Delivery ends inside "bob" — the record is abandoned and scanning
        // resumes at the next line of the following delivery.
        assert_eq!(
            scanner.scan(b"  5 1201 bo"),
            SoughtOutcome::Pending
        );
        let mut rest = b"b        5   0 unrated blitz       0-9999\n  \
6 1350 al         5   0 unrated blitz       0-9999\n".to_vec();
        rest.extend_from_slice(FOOTER);
        assert_eq!(
            scanner.scan(&rest),
            SoughtOutcome::Matched(ArrayString::from("6").expect("fits"))
        );
    }

    #[test]
    fn test_scan_split_at_whitespace_resumes_record() {
        let mut scanner = SoughtScanner::new(blitz_filter(1200));
        // The boundary falls between tokens, so nothing was cut mid-token
        // and the record survives.
        assert_eq!(scanner.scan(b"  5 1201 bob   "), SoughtOutcome::Pending);
        let mut rest = b"     5   0 unrated blitz       0-9999\n".to_vec();
        rest.extend_from_slice(FOOTER);
        assert_eq!(
            scanner.scan(&rest),
            SoughtOutcome::Matched(ArrayString::from("5").expect("fits"))
        );
    }

    #[test]
    fn test_scan_empty_listing_reports_exhausted() {
        let mut scanner = SoughtScanner::new(blitz_filter(1200));
        assert_eq!(scanner.scan(b"0 ads displayed.\n"), SoughtOutcome::Exhausted);
    }

    #[test]
    fn test_scan_five_digit_game_number_is_skipped() {
        let mut scanner = SoughtScanner::new(blitz_filter(1200));
        let mut listing =
            b" 12345 1200 bob     5   0 unrated blitz       0-9999\n".to_vec();
        listing.extend_from_slice(FOOTER);
        // The number does not fit the outbound join buffer, so the record
        // cannot be chosen even though the rating is perfect.
        assert_eq!(scanner.scan(&listing), SoughtOutcome::Exhausted);
    }
}
