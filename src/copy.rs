//! Clipboard access for ByteGen.
//!
//! The copy action only ever writes to the clipboard. Writers implement
//! [`ClipboardWriter`]; [`SystemClipboard`] is the real one and tests use
//! in-memory doubles. Reading ([`ClipboardReader`]) is needed only to
//! check, before a timed clear, that the clipboard still holds what was
//! copied.
//!
//! [`copy_password`] never fails outright: a clipboard error is logged and
//! handed back as [`CopyOutcome::Failed`] so the caller can show a notice
//! and carry on.

use std::thread::JoinHandle;
use std::time::Duration;

use ::clipboard::{ClipboardContext, ClipboardProvider};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::generator::Password;

/// Something that can receive text.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Delay of a clear scheduled by the last write, if one is pending.
    fn pending_clear(&self) -> Option<Duration> {
        None
    }

    /// Block until the pending clear, if any, has run.
    fn wait_for_clear(&mut self) {}
}

pub trait ClipboardReader {
    fn read_text(&mut self) -> Result<String>;
}

/// Wipe the clipboard if it still holds `expected`.
///
/// Returns whether it was wiped. Anything copied in the meantime is left
/// alone.
pub fn clear_if_unchanged<C>(clipboard: &mut C, expected: &str) -> Result<bool>
where
    C: ClipboardReader + ClipboardWriter + ?Sized,
{
    if clipboard.read_text()? != expected {
        return Ok(false);
    }
    clipboard.write_text("")?;
    Ok(true)
}

/// A handle on the desktop clipboard.
struct DesktopClipboard(ClipboardContext);

impl DesktopClipboard {
    fn open() -> Result<Self> {
        let ctx: ClipboardContext = ClipboardProvider::new().map_err(|e| Error::Clipboard {
            message: format!("init failed: {e}"),
        })?;
        Ok(Self(ctx))
    }
}

impl ClipboardWriter for DesktopClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.0
            .set_contents(text.to_string())
            .map_err(|e| Error::Clipboard {
                message: format!("write failed: {e}"),
            })
    }
}

impl ClipboardReader for DesktopClipboard {
    fn read_text(&mut self) -> Result<String> {
        self.0.get_contents().map_err(|e| Error::Clipboard {
            message: format!("read failed: {e}"),
        })
    }
}

struct PendingClear {
    delay: Duration,
    handle: JoinHandle<()>,
}

/// The desktop clipboard.
///
/// When `clear_after` is set, each write starts a thread that wipes the
/// clipboard after that delay if it still holds the copied text. The
/// thread for the latest write is kept so callers that are about to exit
/// can wait for it with [`ClipboardWriter::wait_for_clear`].
#[derive(Default)]
pub struct SystemClipboard {
    clear_after: Option<Duration>,
    pending: Option<PendingClear>,
}

impl SystemClipboard {
    pub fn new(clear_after: Option<Duration>) -> Self {
        Self {
            clear_after,
            pending: None,
        }
    }

    pub fn clear_after(&self) -> Option<Duration> {
        self.clear_after
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        DesktopClipboard::open()?.write_text(text)?;

        if let Some(delay) = self.clear_after {
            let handle = schedule_clear(Zeroizing::new(text.to_string()), delay);
            self.pending = Some(PendingClear { delay, handle });
        }

        Ok(())
    }

    fn pending_clear(&self) -> Option<Duration> {
        self.pending
            .as_ref()
            .filter(|p| !p.handle.is_finished())
            .map(|p| p.delay)
    }

    fn wait_for_clear(&mut self) {
        if let Some(pending) = self.pending.take() {
            if pending.handle.join().is_err() {
                tracing::warn!("clipboard clear thread panicked");
            }
        }
    }
}

fn schedule_clear(text: Zeroizing<String>, delay: Duration) -> JoinHandle<()> {
    std::thread::spawn(move || {
        std::thread::sleep(delay);

        let cleared = DesktopClipboard::open().and_then(|mut ctx| clear_if_unchanged(&mut ctx, &text));
        match cleared {
            Ok(true) => tracing::debug!("clipboard cleared"),
            Ok(false) => tracing::debug!("clipboard changed since copy, left alone"),
            Err(e) => tracing::debug!(error = %e, "clipboard unavailable for clearing"),
        }
    })
}

/// Outcome of a copy action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Copy failed; the message is meant for the user
    Failed(String),
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied)
    }
}

/// Write `password` to `writer`, converting failures into a notice.
pub fn copy_password<W: ClipboardWriter + ?Sized>(password: &Password, writer: &mut W) -> CopyOutcome {
    match writer.write_text(password.as_str()) {
        Ok(()) => {
            tracing::info!("password copied to clipboard");
            CopyOutcome::Copied
        }
        Err(e) => {
            tracing::warn!(error = %e, "copy to clipboard failed");
            CopyOutcome::Failed(format!("Failed to copy to clipboard: {e}"))
        }
    }
}
