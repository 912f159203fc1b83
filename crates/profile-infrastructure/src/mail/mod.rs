//! Transactional mail (SMTP adapter)

pub mod mailer;

pub use mailer::{MailError, Mailer};
