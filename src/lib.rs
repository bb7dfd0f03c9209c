//! Blink - transient desktop popup notifications
//!
//! A notification is logged first, then shown in a small always-on-top
//! window that closes itself after a short delay. The call blocks until the
//! window is gone.
//!
//! ```no_run
//! use blink::{logging::TracingSink, notify};
//!
//! # fn main() -> blink::Result<()> {
//! let _guard = blink::logging::init(&blink::logging::LogConfig::default())?;
//! notify("Backup", "Finished in 4s", &TracingSink, None)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod notify;
pub mod popup;

pub use config::{NotifierConfig, PopupStyle};
pub use errors::{NotifierError, Result};
pub use notify::{notify, NotificationRequest, Notifier, Popup, PopupBackend};
