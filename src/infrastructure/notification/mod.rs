//! Notification infrastructure module
//!
//! SMTP-backed implementation of the notifier capability.

mod smtp;

pub use smtp::SmtpNotifier;
