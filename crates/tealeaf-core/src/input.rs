use crate::event::Event;
use crossterm::event::EventStream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

/// Spawn a task that forwards terminal input into `tx` as [`Event`]s.
///
/// The `EventStream` is created inside the task so crossterm's global reader
/// is only touched once the runtime is polling it.  The task ends when the
/// receiver is dropped or the input stream fails.
///
/// # Input TTY behavior
///
/// crossterm opens `/dev/tty` when stdin is not a TTY, so the demos still read
/// the keyboard when stdin is piped.
pub(crate) fn spawn_terminal_reader(tx: mpsc::UnboundedSender<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut stream = EventStream::new();
        while let Some(result) = stream.next().await {
            match result {
                Ok(raw) => {
                    let Some(event) = Event::from_terminal(raw) else {
                        continue;
                    };
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!(%error, "Terminal input failed");
                    break;
                }
            }
        }
    })
}
