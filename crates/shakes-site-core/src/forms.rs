//! Newsletter and contact form stubs.
//!
//! Neither form goes anywhere: a submission is read, acknowledged and the
//! form cleared. Nothing is validated beyond what the input types enforce in
//! the browser.

use std::fmt;

use tracing::debug;

/// Presentation side of a form.
pub trait FormView {
    /// Show the user a message.
    fn acknowledge(&mut self, message: &str);

    /// Clear every field back to its initial value.
    fn reset(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterSubmission {
    pub email: String,
}

impl NewsletterSubmission {
    pub fn acknowledgement(&self) -> String {
        format!(
            "Thank you for subscribing! We'll send updates to {}",
            self.email
        )
    }
}

/// Contact form fields, in first-seen order.
///
/// A name submitted more than once keeps its first position and its last
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    fields: Vec<(String, String)>,
}

impl ContactSubmission {
    pub const ACKNOWLEDGEMENT: &'static str =
        "Thank you for your message! We'll get back to you soon.";

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: Vec<(String, String)> = Vec::new();
        for (name, value) in entries {
            let name = name.into();
            let value = value.into();
            match fields.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => fields.push((name, value)),
            }
        }
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for ContactSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

pub struct NewsletterForm<V> {
    view: V,
}

impl<V: FormView> NewsletterForm<V> {
    pub fn new(view: V) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn submit(&mut self, email: impl Into<String>) -> NewsletterSubmission {
        let submission = NewsletterSubmission {
            email: email.into(),
        };
        debug!(email = %submission.email, "newsletter form submitted");
        self.view.acknowledge(&submission.acknowledgement());
        self.view.reset();
        submission
    }
}

pub struct ContactForm<V> {
    view: V,
}

impl<V: FormView> ContactForm<V> {
    pub fn new(view: V) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn submit(&mut self, submission: ContactSubmission) -> ContactSubmission {
        debug!(fields = %submission, "contact form submitted");
        self.view.acknowledge(ContactSubmission::ACKNOWLEDGEMENT);
        self.view.reset();
        submission
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        messages: Vec<String>,
        resets: usize,
    }

    impl FormView for Recorder {
        fn acknowledge(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    #[test]
    fn test_newsletter_acknowledges_and_resets() {
        let mut form = NewsletterForm::new(Recorder::default());
        let submission = form.submit("fan@example.com");

        assert_eq!(submission.email, "fan@example.com");
        insta::assert_snapshot!(&form.view().messages[0], @"Thank you for subscribing! We'll send updates to fan@example.com");
        assert_eq!(form.view().resets, 1);
    }

    #[test]
    fn test_newsletter_accepts_empty_email() {
        let mut form = NewsletterForm::new(Recorder::default());
        form.submit("");
        assert_eq!(
            form.view().messages,
            vec!["Thank you for subscribing! We'll send updates to ".to_string()]
        );
    }

    #[test]
    fn test_contact_collects_fields() {
        let submission = ContactSubmission::from_entries([
            ("name", "Sam"),
            ("email", "sam@example.com"),
            ("message", "Table for six?"),
        ]);
        assert_eq!(submission.len(), 3);
        assert_eq!(submission.get("message"), Some("Table for six?"));

        let mut form = ContactForm::new(Recorder::default());
        let returned = form.submit(submission.clone());
        assert_eq!(returned, submission);
        assert_eq!(form.view().messages, vec![ContactSubmission::ACKNOWLEDGEMENT]);
        assert_eq!(form.view().resets, 1);
    }

    #[test]
    fn test_duplicate_names_keep_last_value_first_position() {
        let submission =
            ContactSubmission::from_entries([("topic", "events"), ("name", "Jo"), ("topic", "menu")]);
        assert_eq!(
            submission.fields(),
            &[
                ("topic".to_string(), "menu".to_string()),
                ("name".to_string(), "Jo".to_string())
            ]
        );
        assert_eq!(submission.to_string(), r#"{"topic": "menu", "name": "Jo"}"#);
    }
}
