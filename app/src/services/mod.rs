pub mod documents;
pub mod mailer;
