//! Copying report text (chiefly the negotiation email) to the system clipboard.

use anyhow::{Context, Result, bail};
use arboard::Clipboard;
#[cfg(target_os = "linux")]
use arboard::SetExtLinux;
use tracing::debug;

use crate::models::AnalysisResult;

/// Largest text accepted for copying: 1MB
const MAX_CLIPBOARD_SIZE: usize = 1024 * 1024;

/// Destination for copied text
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;

    /// Set the text and keep serving it until another program owns the clipboard
    ///
    /// Used by short-lived callers that drop the provider right after copying.
    fn set_text_and_hand_off(&mut self, text: &str) -> Result<()> {
        self.set_text(text)
    }
}

/// System clipboard backed by arboard
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")
    }

    /// On Linux the selection dies with the process, so block until a clipboard manager or
    /// another application takes it over
    #[cfg(target_os = "linux")]
    fn set_text_and_hand_off(&mut self, text: &str) -> Result<()> {
        self.clipboard.set().wait().text(text).context("Failed to set clipboard contents")
    }
}

/// System clipboard opened on first use and kept open afterwards
///
/// On X11 the copied text is only served while the clipboard handle is alive, so long-running
/// callers such as the browser hold one of these for their whole lifetime.
#[derive(Default)]
pub struct LazyClipboard {
    inner: Option<SystemClipboard>,
}

impl ClipboardProvider for LazyClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => SystemClipboard::new()?,
        };
        self.inner.insert(clipboard).set_text(text)
    }
}

fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Nothing to copy");
    }
    if text.len() > MAX_CLIPBOARD_SIZE {
        bail!("Text too large for clipboard ({} bytes, max {})", text.len(), MAX_CLIPBOARD_SIZE);
    }
    Ok(())
}

/// Copy `text` through `provider` after validating it
pub fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)?;
    debug!(bytes = text.len(), "copied to clipboard");
    Ok(())
}

/// Copy `text` through `provider` for a caller that exits right afterwards
pub fn hand_off_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text_and_hand_off(text)?;
    debug!(bytes = text.len(), "handed clipboard text off");
    Ok(())
}

/// Copy `text` to the system clipboard and wait until it outlives this process
///
/// Validation runs before the clipboard is opened, so empty or oversized text fails the same
/// way on headless machines. On Linux this returns once another program owns the clipboard.
///
/// # Errors
///
/// Returns an error if the text is blank or larger than 1MB, or if the system clipboard is
/// unavailable.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    validate_clipboard_text(text)?;
    let mut clipboard = SystemClipboard::new()?;
    hand_off_with_provider(text, &mut clipboard)
}

/// The report's negotiation email, or an error when the report has none
pub fn negotiation_email(result: &AnalysisResult) -> Result<&str> {
    match result.negotiation_email.as_deref() {
        Some(email) if !email.trim().is_empty() => Ok(email),
        _ => bail!("This report has no negotiation email"),
    }
}

/// Copy the report's negotiation email through `provider`
pub fn copy_email_with_provider(
    result: &AnalysisResult,
    provider: &mut dyn ClipboardProvider,
) -> Result<()> {
    copy_with_provider(negotiation_email(result)?, provider)
}

/// Copy the report's negotiation email to the system clipboard
pub fn copy_negotiation_email(result: &AnalysisResult) -> Result<()> {
    copy_to_clipboard(negotiation_email(result)?)
}
