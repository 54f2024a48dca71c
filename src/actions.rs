//! Acting on activated segments.
//!
//! A tap on a phone number, address or link becomes a URI handed to an
//! [`Opener`]. Every step is check-then-open; failures go to a [`Reporter`]
//! and never reach the caller, so one broken link cannot affect any other
//! dispatch. Handler processes are not waited on by the caller: a detached
//! thread watches each one and reports a failed exit.

use std::{
    process::{Child, Command},
    str::FromStr,
    sync::{Arc, LazyLock, Mutex, PoisonError},
    thread,
};

use regex::Regex;
use url::Url;

use crate::{error::DispatchError, kind::TagKind, pattern::Callback};

static EMAIL_RE: LazyLock<Regex> =
    lazy_regex!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", "email classifier regex should compile");
static PHONE_RE: LazyLock<Regex> =
    lazy_regex!(r"^\+?[\d\s().-]+$", "phone classifier regex should compile");

/// Minimum number of digits for a value to be dialled.
const MIN_PHONE_DIGITS: usize = 7;

/// URI schemes [`CommandOpener`] will hand to the system.
const OPENABLE_SCHEMES: [&str; 5] = ["http", "https", "mailto", "tel", "telprompt"];

/// Message shown after a link is copied.
pub const LINK_COPIED: &str = "Link copied";

/// Platform family, which decides the dial URI scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Dials through `telprompt:`, which asks before calling.
    Ios,
    #[default]
    Android,
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(format!("unknown platform `{other}` (expected ios or android)")),
        }
    }
}

/// Build the dial URI for `number`, dropping any whitespace.
#[must_use]
pub fn dial_uri(number: &str, platform: Platform) -> String {
    let number: String = number.chars().filter(|c| !c.is_whitespace()).collect();
    match platform {
        Platform::Ios => format!("telprompt:{number}"),
        Platform::Android => format!("tel:{number}"),
    }
}

#[must_use]
pub fn mail_uri(address: &str) -> String { format!("mailto:{address}") }

/// Lower-case a leading `http://`/`https://`, or add `http://` when absent.
#[must_use]
pub fn web_uri(value: &str) -> String {
    for scheme in ["https://", "http://"] {
        if value
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        {
            return format!("{scheme}{}", &value[scheme.len()..]);
        }
    }
    format!("http://{value}")
}

#[must_use]
pub fn looks_like_email(value: &str) -> bool { EMAIL_RE.is_match(value) }

#[must_use]
pub fn looks_like_phone(value: &str) -> bool {
    PHONE_RE.is_match(value) && value.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// The URI opened when a segment of `kind` holding `value` is activated.
///
/// Kinds other than phone, email and URL are classified by their shape and
/// fall back to being treated as a link.
///
/// # Examples
///
/// ```
/// use tagtext::{Platform, TagKind, action_uri};
///
/// assert_eq!(action_uri("example.com", TagKind::Url, Platform::Android), "http://example.com");
/// assert_eq!(action_uri("5551234567", TagKind::Phone, Platform::Ios), "telprompt:5551234567");
/// ```
#[must_use]
pub fn action_uri(value: &str, kind: TagKind, platform: Platform) -> String {
    match kind {
        TagKind::Phone => dial_uri(value, platform),
        TagKind::Email => mail_uri(value),
        TagKind::Url => web_uri(value),
        _ if looks_like_email(value) => mail_uri(value),
        _ if looks_like_phone(value) => dial_uri(value, platform),
        _ => web_uri(value),
    }
}

/// Platform capability to open URIs.
pub trait Opener {
    /// Whether some handler accepts `uri`.
    ///
    /// # Errors
    /// Returns an error if `uri` cannot be checked at all.
    fn can_open(&self, uri: &str) -> Result<bool, DispatchError>;

    /// Hand `uri` to its handler without waiting for it to finish.
    ///
    /// # Errors
    /// Returns an error if the handler could not be started.
    fn open(&self, uri: &str) -> Result<Launch, DispatchError>;
}

/// What an [`Opener`] left behind after starting a handler.
#[derive(Debug)]
pub enum Launch {
    /// Nothing left to watch.
    Done,
    /// A handler process whose exit status is still pending.
    Running {
        program: String,
        uri: String,
        child: Child,
    },
}

/// Sink for failures the user never sees.
pub trait Reporter {
    fn report(&self, error: &DispatchError);
}

pub trait Clipboard {
    /// # Errors
    /// Returns an error if the clipboard rejects the write.
    fn set_text(&self, text: &str) -> Result<(), DispatchError>;
}

/// Transient on-screen notifications.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Object-safe entry point used by registries.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, value: &str, kind: TagKind);
}

/// Routes activations to an [`Opener`] and failures to a [`Reporter`].
///
/// The reporter is shared with the threads that watch running handlers, so
/// a failed exit is still reported after `dispatch` has returned.
#[derive(Debug)]
pub struct Dispatcher<O, R> {
    opener: O,
    reporter: Arc<R>,
    platform: Platform,
}

impl<O, R> Dispatcher<O, R>
where
    O: Opener,
    R: Reporter + Send + Sync + 'static,
{
    pub fn new(opener: O, reporter: R, platform: Platform) -> Self {
        Self {
            opener,
            reporter: Arc::new(reporter),
            platform,
        }
    }

    pub fn opener(&self) -> &O { &self.opener }

    pub fn reporter(&self) -> &R { &self.reporter }

    /// Open whatever `value` refers to. Failures are reported, not returned.
    ///
    /// Returns once the handler has started; its exit is watched elsewhere.
    pub fn dispatch(&self, value: &str, kind: TagKind) {
        let uri = action_uri(value, kind, self.platform);
        log::debug!("dispatching {kind} as {uri}");
        match self.try_open(&uri) {
            Ok(Launch::Done) => {}
            Ok(Launch::Running {
                program,
                uri,
                child,
            }) => self.watch(program, uri, child),
            Err(err) => {
                log::warn!("could not open {uri}");
                self.reporter.report(&err);
            }
        }
    }

    fn try_open(&self, uri: &str) -> Result<Launch, DispatchError> {
        if !self.opener.can_open(uri)? {
            return Err(DispatchError::CannotOpen(uri.to_string()));
        }
        self.opener.open(uri)
    }

    /// Wait for `child` on a detached thread and report a failed exit.
    fn watch(&self, program: String, uri: String, mut child: Child) {
        let reporter = Arc::clone(&self.reporter);
        let (name, target) = (program.clone(), uri.clone());
        let spawned = thread::Builder::new()
            .name("tagtext-opener".to_string())
            .spawn(move || {
                let err = match child.wait() {
                    Ok(status) if status.success() => return,
                    Ok(status) => DispatchError::Exit {
                        program,
                        uri,
                        status,
                    },
                    Err(source) => DispatchError::Launch {
                        program,
                        uri,
                        source,
                    },
                };
                log::warn!("handler failed: {err}");
                reporter.report(&err);
            });
        if let Err(source) = spawned {
            self.reporter.report(&DispatchError::Launch {
                program: name,
                uri: target,
                source,
            });
        }
    }
}

impl<O, R> Dispatch for Dispatcher<O, R>
where
    O: Opener + Send + Sync,
    R: Reporter + Send + Sync + 'static,
{
    fn dispatch(&self, value: &str, kind: TagKind) { Dispatcher::dispatch(self, value, kind); }
}

/// Build the long-press callback for links: copy, then confirm.
pub fn copy_link<C, N, R>(clipboard: C, notifier: N, reporter: R) -> Callback
where
    C: Clipboard + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    R: Reporter + Send + Sync + 'static,
{
    Arc::new(move |url: &str, _index: usize| match clipboard.set_text(url) {
        Ok(()) => notifier.notify(LINK_COPIED),
        Err(err) => reporter.report(&err),
    })
}

/// Opens URIs by running an external program such as `xdg-open`.
///
/// The URI is passed as the last argument, after any fixed arguments.
#[derive(Debug, Clone)]
pub struct CommandOpener {
    program: String,
    args: Vec<String>,
}

impl CommandOpener {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Run `program` with `args` ahead of the URI, e.g. `open -a Safari`.
    pub fn with_args<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for CommandOpener {
    fn default() -> Self {
        let program = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        Self::new(program)
    }
}

impl Opener for CommandOpener {
    fn can_open(&self, uri: &str) -> Result<bool, DispatchError> {
        let parsed = Url::parse(uri).map_err(|source| DispatchError::InvalidUri {
            uri: uri.to_string(),
            source,
        })?;
        Ok(OPENABLE_SCHEMES.contains(&parsed.scheme()))
    }

    fn open(&self, uri: &str) -> Result<Launch, DispatchError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(uri)
            .spawn()
            .map_err(|source| DispatchError::Launch {
                program: self.program.clone(),
                uri: uri.to_string(),
                source,
            })?;
        Ok(Launch::Running {
            program: self.program.clone(),
            uri: uri.to_string(),
            child,
        })
    }
}

/// Records URIs instead of opening them.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
    refuse: bool,
}

impl RecordingOpener {
    /// An opener whose `can_open` always answers no.
    #[must_use]
    pub fn refusing() -> Self {
        Self {
            opened: Mutex::default(),
            refuse: true,
        }
    }

    #[must_use]
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Opener for RecordingOpener {
    fn can_open(&self, _uri: &str) -> Result<bool, DispatchError> { Ok(!self.refuse) }

    fn open(&self, uri: &str) -> Result<Launch, DispatchError> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(uri.to_string());
        Ok(Launch::Done)
    }
}

/// Forwards failures to the `log` facade at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, error: &DispatchError) { log::error!("{error}"); }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) { log::info!("{message}"); }
}

/// In-process clipboard holding the last written text.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Mutex<Option<String>>,
}

impl MemoryClipboard {
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.text.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&self, text: &str) -> Result<(), DispatchError> {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }
}

impl<T: Clipboard> Clipboard for Arc<T> {
    fn set_text(&self, text: &str) -> Result<(), DispatchError> { (**self).set_text(text) }
}

impl<T: Notifier> Notifier for Arc<T> {
    fn notify(&self, message: &str) { (**self).notify(message); }
}

impl<T: Reporter> Reporter for Arc<T> {
    fn report(&self, error: &DispatchError) { (**self).report(error); }
}

impl<T: Opener> Opener for Arc<T> {
    fn can_open(&self, uri: &str) -> Result<bool, DispatchError> { (**self).can_open(uri) }

    fn open(&self, uri: &str) -> Result<Launch, DispatchError> { (**self).open(uri) }
}
