//! Word-wrapping re-flow of transient messages into a panel.

use crate::LogPanel;

/// Re-flows `message` into `panel` starting at `start_row`, breaking lines
/// at the panel width.
///
/// Scanning stops at `delimiter` (a structural marker for system notices,
/// the line terminator for chat) or at the end of the input, whichever comes
/// first. Each line flushes at the most recent word break when one exists;
/// a line with no break yet flushes at the exact width, and a short final
/// remainder is flushed whole rather than split at a break that would
/// strand it.
///
/// The write position is moved to `start_row` before the first flush so the
/// persistent rows above it survive.
pub fn flow_message(panel: &mut LogPanel, start_row: usize, message: &[u8], delimiter: u8) {
    panel.rewind_to(start_row);

    let cols = panel.cols() as isize;
    let len = message.len() as isize;
    let mut start: isize = 0;
    let mut line_break: Option<isize> = None;
    let mut i: isize = 0;

    loop {
        while i < len && message[i as usize] != b' ' && message[i as usize] != delimiter {
            i += 1;
        }
        let end_of_message = i >= len || message[i as usize] == delimiter;

        if i - start >= cols || end_of_message {
            // A usable break is one inside the current line; flushing there
            // is skipped when the message ends and the remainder already
            // fits on one row.
            let usable_break = line_break
                .filter(|&b| b > start)
                .filter(|_| !(end_of_message && i - start < cols));
            if let Some(b) = usable_break {
                panel.add_line(&message[start as usize..b as usize]);
                start = b + 1;
                line_break = None;
                continue;
            }
            panel.add_line(&message[start.max(0) as usize..i.max(start) as usize]);
            start = i + 1;
        } else {
            line_break = Some(i);
            i += 1;
        }

        if end_of_message {
            break;
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(cols: usize) -> LogPanel {
        LogPanel::new(cols, 24).expect("panel")
    }

    fn flowed(cols: usize, message: &[u8], delimiter: u8) -> Vec<String> {
        let mut p = panel(cols);
        flow_message(&mut p, 0, message, delimiter);
        p.lines()
            .map(|row| String::from_utf8_lossy(row).trim_end().to_string())
            .collect()
    }

    #[test]
    fn test_flow_message_short_text_single_row() {
        let rows = flowed(20, b"checkmate\n", b'\n');
        assert_eq!(rows, vec!["checkmate"]);
    }

    #[test]
    fn test_flow_message_breaks_at_word_boundary() {
        let rows = flowed(10, b"white wins by resignation}", b'}');
        // No row exceeds the width, and words stay whole while an earlier
        // break point exists.
        for row in &rows {
            assert!(row.len() <= 10, "row too wide: {row:?}");
            assert!(!row.contains("white w"), "word split: {row:?}");
        }
        assert_eq!(rows.concat().replace(' ', ""), "whitewinsbyresignation");
    }

    #[test]
    fn test_flow_message_never_exceeds_width() {
        let msg = b"a game of chess was won and lost on time today\n";
        for cols in [5usize, 8, 11, 16] {
            for row in flowed(cols, msg, b'\n') {
                assert!(row.len() <= cols, "cols {cols}: row too wide {row:?}");
            }
        }
    }

    #[test]
    fn test_flow_message_oversize_word_flushes_at_exact_width() {
        let rows = flowed(6, b"extraordinarily\n", b'\n');
        assert_eq!(rows[0].len(), 6);
    }

    #[test]
    fn test_flow_message_short_final_remainder_stays_whole() {
        // The tail fits on one row, so it must not be split at the last
        // break point.
        let rows = flowed(12, b"game over by mate\n", b'\n');
        assert_eq!(rows.last().map(String::as_str), Some("by mate"));
    }

    #[test]
    fn test_flow_message_stops_at_delimiter() {
        let rows = flowed(20, b"shown text}hidden text", b'}');
        assert_eq!(rows, vec!["shown text"]);
    }

    #[test]
    fn test_flow_message_starts_at_requested_row() {
        let mut p = panel(16);
        p.add_line(b"stats one");
        p.add_line(b"stats two");
        flow_message(&mut p, 4, b"a short note\n", b'\n');
        assert_eq!(p.len(), 5);
        let top = String::from_utf8_lossy(p.row_bytes(0).expect("row"));
        assert_eq!(top.trim_end(), "stats one");
        let note = String::from_utf8_lossy(p.row_bytes(4).expect("row"));
        assert_eq!(note.trim_end(), "a short note");
    }
}
