use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::input::{ClickEvent, Selection};
use crate::render::{BoardView, TextSnapshot};
use crate::{BoardEngine, Error, Page, Result, ViewConfig};

enum Command {
    Render(oneshot::Sender<Result<()>>),
    Html(oneshot::Sender<String>),
    Text(oneshot::Sender<TextSnapshot>),
    SquareCount(oneshot::Sender<usize>),
    Snapshot(oneshot::Sender<Vec<u8>>),
    Click(ClickEvent, oneshot::Sender<Option<usize>>),
    TakeSelection(oneshot::Sender<Option<usize>>),
    Close(oneshot::Sender<()>),
}

/// An async-friendly board view backed by a dedicated worker thread.
///
/// The worker thread owns the engine, the document and the selection state,
/// and executes commands sent from async tasks one at a time — rendering can
/// never be re-entered. Construction completes only after the view is
/// attached and the grid is built, so a resolved `new` is the "ready"
/// signal: no rendering operation can run before it.
#[derive(Clone)]
pub struct BoardHandle {
    cmd_tx: Sender<Command>,
}

impl BoardHandle {
    /// Spawn the worker, attach the view to `page`, build the grid and draw
    /// the engine's current snapshot once.
    pub async fn new<E>(engine: E, page: Page, config: ViewConfig) -> Result<Self>
    where
        E: BoardEngine + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            let mut view = match BoardView::attach(page.doc, config) {
                Ok(v) => v,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };
            view.initialize_board();

            let snapshot = engine.snapshot_bytes();
            if let Err(err) = view.render_pieces(&snapshot, engine.square_count()) {
                let _ = init_tx.send(Err(err));
                return;
            }

            let mut selection = Selection::new();
            let _ = init_tx.send(Ok(()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Render(resp) => {
                        let snapshot = engine.snapshot_bytes();
                        let res = view.render_pieces(&snapshot, engine.square_count());
                        let _ = resp.send(res);
                    }
                    Command::Html(resp) => {
                        let _ = resp.send(view.to_html());
                    }
                    Command::Text(resp) => {
                        let _ = resp.send(view.text_snapshot());
                    }
                    Command::SquareCount(resp) => {
                        let _ = resp.send(engine.square_count());
                    }
                    Command::Snapshot(resp) => {
                        let _ = resp.send(engine.snapshot_bytes());
                    }
                    Command::Click(event, resp) => {
                        let config = view.config();
                        let index = event.square_index(config.rows, config.cols);
                        if let Some(index) = index {
                            selection.select(index);
                        }
                        let _ = resp.send(index);
                    }
                    Command::TakeSelection(resp) => {
                        let _ = resp.send(selection.take());
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
        });

        // Wait for the worker to report initialization success or failure
        let init_res = init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))?;
        init_res?;

        Ok(Self { cmd_tx })
    }

    /// Re-read the engine's snapshot and redraw the board.
    pub async fn render(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Render(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Render canceled: {}", e)))?
    }

    /// Serialized host document, board included.
    pub async fn html(&self) -> Result<String> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Html(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Html canceled: {}", e)))
    }

    /// ASCII diagram of the current board contents.
    pub async fn text_snapshot(&self) -> Result<TextSnapshot> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Text(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Text canceled: {}", e)))
    }

    /// The engine-reported square count.
    pub async fn square_count(&self) -> Result<usize> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::SquareCount(tx));
        rx.await
            .map_err(|e| Error::Other(format!("SquareCount canceled: {}", e)))
    }

    /// A copy of the engine's current snapshot bytes.
    pub async fn snapshot(&self) -> Result<Vec<u8>> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Snapshot(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Snapshot canceled: {}", e)))
    }

    /// Record a click as the selected square and return its index. A click
    /// outside the board returns `None` and leaves the selection alone.
    pub async fn click(&self, event: ClickEvent) -> Result<Option<usize>> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Click(event, tx));
        rx.await
            .map_err(|e| Error::Other(format!("Click canceled: {}", e)))
    }

    /// Consume the pending selection, if any.
    pub async fn take_selection(&self) -> Result<Option<usize>> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::TakeSelection(tx));
        rx.await
            .map_err(|e| Error::Other(format!("TakeSelection canceled: {}", e)))
    }

    /// Shut down the worker thread.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))
    }

    /// Start a bounded-rate refresh loop that re-reads engine state and
    /// redraws at `interval` until stopped.
    pub fn start_refresh(&self, interval: Duration) -> RefreshLoop {
        let cmd_tx = self.cmd_tx.clone();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = thread::spawn(move || {
            while !stop_flag.load(Ordering::SeqCst) {
                let (tx, rx) = oneshot::channel();
                if cmd_tx.send(Command::Render(tx)).is_err() {
                    // handle closed; nothing left to refresh
                    break;
                }
                match rx.blocking_recv() {
                    Ok(Err(err)) => log::error!("refresh render failed: {}", err),
                    Err(_) => break,
                    Ok(Ok(())) => {}
                }
                thread::sleep(interval);
            }
        });

        RefreshLoop {
            stop,
            handle: Some(handle),
        }
    }
}

/// Cancellation handle for the polling refresh task. Stops on `stop()` and
/// when dropped.
pub struct RefreshLoop {
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl RefreshLoop {
    /// Signal the loop to stop and wait for it to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RefreshLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}
