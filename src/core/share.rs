//! # Share
//!
//! Hands a story to whatever can take it, in order:
//!
//! ```text
//! native share command (if configured)
//!   ├─ ok          → Shared
//!   ├─ cancelled   → Cancelled (silent)
//!   ├─ unavailable → continue below
//!   └─ failed      → Failed (logged)
//! system clipboard ──unavailable──▶ OSC 52 terminal selection
//!   └─ ok → Copied
//! ```
//!
//! The fallbacks copy plain text: `title\n\ntext\n\nurl`, url part omitted
//! when absent. Nothing here retries.
//!
//! The OSC 52 target never touches stdout itself: it queues the escape
//! sequence on a channel and the event loop writes it between frames.

use std::process::Stdio;
use std::sync::mpsc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::{debug, info, warn};
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareData {
    pub title: String,
    pub text: String,
    pub url: Option<String>,
}

impl ShareData {
    /// Plain-text form used by the copy fallbacks.
    pub fn fallback_text(&self) -> String {
        match &self.url {
            Some(url) => format!("{}\n\n{}\n\n{}", self.title, self.text, url),
            None => format!("{}\n\n{}", self.title, self.text),
        }
    }
}

#[derive(Debug)]
pub enum ShareError {
    /// The user backed out of the share target.
    Cancelled,
    /// The target can't run here at all.
    Unavailable(String),
    Failed(String),
}

impl std::fmt::Display for ShareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShareError::Cancelled => write!(f, "share cancelled"),
            ShareError::Unavailable(msg) => write!(f, "share target unavailable: {msg}"),
            ShareError::Failed(msg) => write!(f, "share failed: {msg}"),
        }
    }
}

impl std::error::Error for ShareError {}

#[async_trait]
pub trait ShareTarget: Send + Sync {
    fn name(&self) -> &str;

    async fn share(&self, data: &ShareData) -> Result<(), ShareError>;
}

/// How a share attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    Cancelled,
    Failed,
}

impl ShareOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, ShareOutcome::Shared | ShareOutcome::Copied)
    }

    /// Feedback line for the user. Cancellation stays silent.
    pub fn toast(&self) -> Option<&'static str> {
        match self {
            ShareOutcome::Shared => Some("Shared"),
            ShareOutcome::Copied => Some("Copied to clipboard"),
            ShareOutcome::Cancelled => None,
            ShareOutcome::Failed => Some("Couldn't share this story"),
        }
    }
}

// ============================================================================
// Targets
// ============================================================================

/// An external program acting as the platform share sheet.
///
/// Receives the fallback text on stdin and the parts in
/// `ODDSFEED_SHARE_TITLE`, `ODDSFEED_SHARE_TEXT`, `ODDSFEED_SHARE_URL`.
/// Exit 0 means shared; exit 130 or death by signal means the user cancelled.
pub struct CommandShare {
    program: String,
    args: Vec<String>,
}

impl CommandShare {
    /// Build from `[program, args...]`. None when empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

#[async_trait]
impl ShareTarget for CommandShare {
    fn name(&self) -> &str {
        &self.program
    }

    async fn share(&self, data: &ShareData) -> Result<(), ShareError> {
        let mut child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .env("ODDSFEED_SHARE_TITLE", &data.title)
            .env("ODDSFEED_SHARE_TEXT", &data.text)
            .env("ODDSFEED_SHARE_URL", data.url.as_deref().unwrap_or(""))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => ShareError::Unavailable(e.to_string()),
                _ => ShareError::Failed(e.to_string()),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // A program that ignores stdin may close it early.
            if let Err(e) = stdin.write_all(data.fallback_text().as_bytes()).await {
                debug!("Share command closed stdin: {}", e);
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ShareError::Failed(e.to_string()))?;
        match status.code() {
            Some(0) => Ok(()),
            Some(130) | None => Err(ShareError::Cancelled),
            Some(code) => Err(ShareError::Failed(format!("exit status {code}"))),
        }
    }
}

/// The system clipboard.
pub struct ClipboardShare;

#[async_trait]
impl ShareTarget for ClipboardShare {
    fn name(&self) -> &str {
        "clipboard"
    }

    async fn share(&self, data: &ShareData) -> Result<(), ShareError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ShareError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(data.fallback_text())
            .map_err(|e| ShareError::Failed(e.to_string()))
    }
}

/// The terminal's own selection via the OSC 52 escape sequence.
/// Terminals without support ignore it silently.
pub struct Osc52Share {
    terminal: mpsc::Sender<String>,
}

impl Osc52Share {
    /// Sequences go to `terminal`; whoever owns stdout writes them out.
    pub fn new(terminal: mpsc::Sender<String>) -> Self {
        Self { terminal }
    }
}

/// `ESC ] 52 ; c ; <base64> BEL`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

#[async_trait]
impl ShareTarget for Osc52Share {
    fn name(&self) -> &str {
        "osc52"
    }

    async fn share(&self, data: &ShareData) -> Result<(), ShareError> {
        self.terminal
            .send(osc52_sequence(&data.fallback_text()))
            .map_err(|_| ShareError::Unavailable("terminal writer closed".into()))
    }
}

// ============================================================================
// Chain
// ============================================================================

pub struct Sharer {
    native: Option<Box<dyn ShareTarget>>,
    clipboard: Box<dyn ShareTarget>,
    legacy: Box<dyn ShareTarget>,
}

impl Sharer {
    /// Native command if configured, then the real clipboard and OSC 52
    /// (queued on `terminal`).
    pub fn new(native_command: Option<&[String]>, terminal: mpsc::Sender<String>) -> Self {
        let native = native_command
            .and_then(CommandShare::from_argv)
            .map(|c| Box::new(c) as Box<dyn ShareTarget>);
        Self::with_targets(
            native,
            Box::new(ClipboardShare),
            Box::new(Osc52Share::new(terminal)),
        )
    }

    pub fn with_targets(
        native: Option<Box<dyn ShareTarget>>,
        clipboard: Box<dyn ShareTarget>,
        legacy: Box<dyn ShareTarget>,
    ) -> Self {
        Self {
            native,
            clipboard,
            legacy,
        }
    }

    pub async fn share(&self, data: &ShareData) -> ShareOutcome {
        if let Some(native) = &self.native {
            match native.share(data).await {
                Ok(()) => {
                    info!("Shared '{}' via {}", data.title, native.name());
                    return ShareOutcome::Shared;
                }
                Err(ShareError::Cancelled) => return ShareOutcome::Cancelled,
                Err(ShareError::Unavailable(reason)) => {
                    info!("{} not available ({}), copying instead", native.name(), reason);
                }
                Err(e) => {
                    warn!("Native share via {} failed: {}", native.name(), e);
                    return ShareOutcome::Failed;
                }
            }
        }

        match self.clipboard.share(data).await {
            Ok(()) => {
                info!("Copied '{}' to clipboard", data.title);
                ShareOutcome::Copied
            }
            Err(ShareError::Unavailable(reason)) => {
                debug!("Clipboard unavailable ({}), trying {}", reason, self.legacy.name());
                match self.legacy.share(data).await {
                    Ok(()) => ShareOutcome::Copied,
                    Err(e) => {
                        warn!("Legacy copy failed: {}", e);
                        ShareOutcome::Failed
                    }
                }
            }
            Err(e) => {
                warn!("Clipboard copy failed: {}", e);
                ShareOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy)]
    enum Behaviour {
        Ok,
        Cancel,
        Unavailable,
        Fail,
    }

    struct FakeTarget {
        behaviour: Behaviour,
        calls: Arc<AtomicUsize>,
    }

    impl FakeTarget {
        fn boxed(behaviour: Behaviour) -> (Box<dyn ShareTarget>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let target = FakeTarget {
                behaviour,
                calls: calls.clone(),
            };
            (Box::new(target), calls)
        }
    }

    #[async_trait]
    impl ShareTarget for FakeTarget {
        fn name(&self) -> &str {
            "fake"
        }

        async fn share(&self, _data: &ShareData) -> Result<(), ShareError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behaviour {
                Behaviour::Ok => Ok(()),
                Behaviour::Cancel => Err(ShareError::Cancelled),
                Behaviour::Unavailable => Err(ShareError::Unavailable("none".into())),
                Behaviour::Fail => Err(ShareError::Failed("boom".into())),
            }
        }
    }

    fn data(url: Option<&str>) -> ShareData {
        ShareData {
            title: "Headline".into(),
            text: "Summary".into(),
            url: url.map(String::from),
        }
    }

    #[test]
    fn test_fallback_text_with_and_without_url() {
        assert_eq!(
            data(Some("https://x.test/1")).fallback_text(),
            "Headline\n\nSummary\n\nhttps://x.test/1"
        );
        assert_eq!(data(None).fallback_text(), "Headline\n\nSummary");
    }

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_from_argv_empty_is_none() {
        assert!(CommandShare::from_argv(&[]).is_none());
        let cmd = CommandShare::from_argv(&["share".into(), "--text".into()]).unwrap();
        assert_eq!(cmd.name(), "share");
    }

    #[tokio::test]
    async fn test_native_success_skips_fallbacks() {
        let (native, _) = FakeTarget::boxed(Behaviour::Ok);
        let (clipboard, clip_calls) = FakeTarget::boxed(Behaviour::Ok);
        let (legacy, _) = FakeTarget::boxed(Behaviour::Ok);
        let sharer = Sharer::with_targets(Some(native), clipboard, legacy);
        let outcome = sharer.share(&data(None)).await;
        assert_eq!(outcome, ShareOutcome::Shared);
        assert!(outcome.succeeded());
        assert_eq!(clip_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_native_cancel_is_silent_false() {
        let (native, _) = FakeTarget::boxed(Behaviour::Cancel);
        let (clipboard, clip_calls) = FakeTarget::boxed(Behaviour::Ok);
        let (legacy, _) = FakeTarget::boxed(Behaviour::Ok);
        let sharer = Sharer::with_targets(Some(native), clipboard, legacy);
        let outcome = sharer.share(&data(None)).await;
        assert_eq!(outcome, ShareOutcome::Cancelled);
        assert!(!outcome.succeeded());
        assert!(outcome.toast().is_none());
        assert_eq!(clip_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_native_failure_returns_false() {
        let (native, _) = FakeTarget::boxed(Behaviour::Fail);
        let (clipboard, _) = FakeTarget::boxed(Behaviour::Ok);
        let (legacy, _) = FakeTarget::boxed(Behaviour::Ok);
        let sharer = Sharer::with_targets(Some(native), clipboard, legacy);
        assert_eq!(sharer.share(&data(None)).await, ShareOutcome::Failed);
    }

    #[tokio::test]
    async fn test_no_native_uses_clipboard() {
        let (clipboard, clip_calls) = FakeTarget::boxed(Behaviour::Ok);
        let (legacy, legacy_calls) = FakeTarget::boxed(Behaviour::Ok);
        let sharer = Sharer::with_targets(None, clipboard, legacy);
        assert_eq!(sharer.share(&data(None)).await, ShareOutcome::Copied);
        assert_eq!(clip_calls.load(Ordering::SeqCst), 1);
        assert_eq!(legacy_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unavailable_clipboard_falls_back_to_legacy() {
        let (clipboard, _) = FakeTarget::boxed(Behaviour::Unavailable);
        let (legacy, legacy_calls) = FakeTarget::boxed(Behaviour::Ok);
        let sharer = Sharer::with_targets(None, clipboard, legacy);
        assert_eq!(sharer.share(&data(None)).await, ShareOutcome::Copied);
        assert_eq!(legacy_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clipboard_failure_does_not_fall_back() {
        let (clipboard, _) = FakeTarget::boxed(Behaviour::Fail);
        let (legacy, legacy_calls) = FakeTarget::boxed(Behaviour::Ok);
        let sharer = Sharer::with_targets(None, clipboard, legacy);
        assert_eq!(sharer.share(&data(None)).await, ShareOutcome::Failed);
        assert_eq!(legacy_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_share_program_copies_instead() {
        let native = CommandShare::from_argv(&["oddsfeed-no-such-share-program".into()])
            .map(|c| Box::new(c) as Box<dyn ShareTarget>);
        let (clipboard, clip_calls) = FakeTarget::boxed(Behaviour::Ok);
        let (legacy, _) = FakeTarget::boxed(Behaviour::Ok);
        let sharer = Sharer::with_targets(native, clipboard, legacy);
        assert_eq!(sharer.share(&data(None)).await, ShareOutcome::Copied);
        assert_eq!(clip_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unavailable_native_falls_through_to_legacy() {
        let (native, _) = FakeTarget::boxed(Behaviour::Unavailable);
        let (clipboard, _) = FakeTarget::boxed(Behaviour::Unavailable);
        let (legacy, legacy_calls) = FakeTarget::boxed(Behaviour::Ok);
        let sharer = Sharer::with_targets(Some(native), clipboard, legacy);
        assert_eq!(sharer.share(&data(None)).await, ShareOutcome::Copied);
        assert_eq!(legacy_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_osc52_queues_sequence_instead_of_writing() {
        let (tx, rx) = mpsc::channel();
        let target = Osc52Share::new(tx);
        target.share(&data(None)).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), osc52_sequence("Headline\n\nSummary"));
    }

    #[tokio::test]
    async fn test_osc52_without_writer_is_unavailable() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let target = Osc52Share::new(tx);
        assert!(matches!(
            target.share(&data(None)).await,
            Err(ShareError::Unavailable(_))
        ));
    }
}
