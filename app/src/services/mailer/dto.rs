use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecipient {
    /// recipient email address
    pub email: String,

    /// replacements to use on the email html for this address, eg:
    ///
    /// ```
    /// { email: "jhon@gmail.com", replacements: { "name": "jhon" } }
    /// ```
    pub replacements: Option<HashMap<String, String>>,
}

#[derive(Default, Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailIn {
    /// The RFC5322 email address to be used to send the email, if None the
    /// mailer worker default address is used
    pub sender: Option<String>,

    /// List of recipients for the email
    pub to: Vec<EmailRecipient>,

    /// Email subject
    pub subject: String,

    /// Email HTML content
    pub body_html: Option<String>,

    /// Optional email text content: displayed on clients that do not support Html
    pub body_text: Option<String>,
}

impl SendEmailIn {
    pub fn with_body_html(mut self, html: &str) -> SendEmailIn {
        self.body_html = Some(String::from(html));
        self
    }

    pub fn with_to(mut self, recipients: Vec<EmailRecipient>) -> SendEmailIn {
        self.to = recipients;
        self
    }

    pub fn with_subject(mut self, subject: &str) -> SendEmailIn {
        self.subject = String::from(subject);
        self
    }
}
