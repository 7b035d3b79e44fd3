//! Line relay for streaming child output.
//!
//! The metadata dump streams `exiftool`'s stdout to the console as it
//! arrives. A dedicated reader thread forwards complete lines over a bounded
//! channel; the caller drains the channel, joins the reader, and only then
//! inspects the child's exit status. That sequencing makes the ordering
//! guarantee explicit: all relayed output is flushed before the exit status
//! is reported.

use std::io::{self, BufRead, Write};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, bounded};

/// Number of lines the relay buffers before the reader blocks.
const RELAY_CAPACITY: usize = 64;

/// Spawns a reader thread that forwards lines from `reader` over a bounded
/// channel.
///
/// The thread stops at EOF, on a read error, or when the receiver is
/// dropped. Join the returned handle after draining the receiver to know the
/// producer has finished.
pub fn relay<R>(reader: R) -> (Receiver<String>, JoinHandle<()>)
where
    R: BufRead + Send + 'static,
{
    let (sender, receiver) = bounded(RELAY_CAPACITY);
    let handle = thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else {
                break;
            };
            if sender.send(line).is_err() {
                break;
            }
        }
    });
    (receiver, handle)
}

/// Writes every relayed line to `sink`, one per output line, until the
/// producer hangs up.
pub fn drain_to<W: Write>(receiver: &Receiver<String>, sink: &mut W) -> io::Result<()> {
    for line in receiver.iter() {
        writeln!(sink, "{line}")?;
    }
    sink.flush()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{drain_to, relay};

    #[test]
    fn relays_all_lines_in_order() {
        let input = Cursor::new(b"first\nsecond\nthird\n".to_vec());
        let (receiver, handle) = relay(input);

        let mut sink = Vec::new();
        drain_to(&receiver, &mut sink).expect("drain should not fail");
        handle.join().expect("reader thread should not panic");

        assert_eq!(String::from_utf8(sink).unwrap(), "first\nsecond\nthird\n");
    }

    #[test]
    fn relay_handles_missing_trailing_newline() {
        let input = Cursor::new(b"only line".to_vec());
        let (receiver, handle) = relay(input);

        let lines: Vec<String> = receiver.iter().collect();
        handle.join().expect("reader thread should not panic");

        assert_eq!(lines, vec!["only line".to_string()]);
    }

    #[test]
    fn relay_stops_when_receiver_is_dropped() {
        let input = Cursor::new(b"a\nb\nc\n".to_vec());
        let (receiver, handle) = relay(input);
        drop(receiver);

        // The producer must not hang once nobody is listening.
        handle.join().expect("reader thread should not panic");
    }

    #[test]
    fn empty_input_relays_nothing() {
        let input = Cursor::new(Vec::new());
        let (receiver, handle) = relay(input);

        let mut sink = Vec::new();
        drain_to(&receiver, &mut sink).expect("drain should not fail");
        handle.join().expect("reader thread should not panic");

        assert!(sink.is_empty());
    }
}
