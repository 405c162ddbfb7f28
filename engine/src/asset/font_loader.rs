//! Font Loader
//!
//! Reads and parses a typeface on a background thread. The frame loop
//! polls the returned [`PendingFont`] without blocking; the result is
//! handed out exactly once.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use crate::error::MenuError;
use crate::text::Typeface;

type LoadResult = Result<Typeface, MenuError>;

pub struct FontLoader;

impl FontLoader {
    /// Start loading `path` on a named worker thread.
    pub fn spawn(path: impl Into<PathBuf>) -> Result<PendingFont, MenuError> {
        let path = path.into();
        let (tx, rx) = mpsc::channel::<LoadResult>();

        let thread_path = path.clone();
        let thread = thread::Builder::new()
            .name("font-loader".to_string())
            .spawn(move || {
                let result = Typeface::load(&thread_path);
                if let Ok(font) = &result {
                    log::debug!(
                        "Parsed typeface {:?} ({} glyphs)",
                        font.family_name,
                        font.glyphs.len()
                    );
                }
                let _ = tx.send(result);
            })
            .map_err(|source| MenuError::IoError { path, source })?;

        Ok(PendingFont {
            rx,
            thread: Some(thread),
            finished: false,
        })
    }
}

/// A typeface that may still be loading.
pub struct PendingFont {
    rx: Receiver<LoadResult>,
    thread: Option<JoinHandle<()>>,
    finished: bool,
}

impl PendingFont {
    /// An already-resolved font (no thread involved).
    pub fn ready(result: LoadResult) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(result);
        Self {
            rx,
            thread: None,
            finished: false,
        }
    }

    /// Non-blocking check. Yields `Some` once, then `None` forever.
    pub fn poll(&mut self) -> Option<LoadResult> {
        if self.finished {
            return None;
        }
        let result = match self.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(MenuError::FontLoadDisconnected),
        };
        self.finish();
        Some(result)
    }

    /// Block until the load completes.
    pub fn wait(mut self) -> LoadResult {
        if self.finished {
            return Err(MenuError::FontLoadDisconnected);
        }
        let result = self
            .rx
            .recv()
            .unwrap_or(Err(MenuError::FontLoadDisconnected));
        self.finish();
        result
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn finish(&mut self) {
        self.finished = true;
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
