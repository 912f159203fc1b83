//! SMTP mailer with handlebars templates

use handlebars::Handlebars;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

use profile_shared::config::MailSettings;

const CODE_CONFIRMATION: &str = "code_confirmation";
const FORGET_PASSWORD: &str = "forget_password";
const CONTACT_US: &str = "contact_us";

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Address error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Message error: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    templates: Handlebars<'static>,
    from: Mailbox,
}

impl Mailer {
    pub fn new(settings: &MailSettings) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)?
            .port(settings.smtp_port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        let mut templates = Handlebars::new();
        templates.register_template_string(
            CODE_CONFIRMATION,
            include_str!("../../templates/code_confirmation.hbs"),
        )?;
        templates.register_template_string(
            FORGET_PASSWORD,
            include_str!("../../templates/forget_password.hbs"),
        )?;
        templates
            .register_template_string(CONTACT_US, include_str!("../../templates/contact_us.hbs"))?;

        Ok(Self {
            transport,
            templates,
            from: settings.from.parse()?,
        })
    }

    /// Fire-and-forget: delivery happens on a spawned task and the
    /// outcome is only logged, matching the confirmation-mail contract.
    pub fn send_code_confirmation(&self, username: &str, send_to: &str, verify_code: i32) {
        let body = match self.templates.render(
            CODE_CONFIRMATION,
            &json!({ "name": username, "code": verify_code }),
        ) {
            Ok(body) => body,
            Err(e) => {
                error!(username, send_to, "send_code_confirmation render failed: {}", e);
                return;
            }
        };
        self.send_in_background(
            send_to,
            "Confirm your email",
            body,
            "send_code_confirmation",
        );
    }

    /// Fire-and-forget, same contract as `send_code_confirmation`.
    pub fn send_forget_password(&self, username: &str, send_to: &str, reset_pass_url: &str) {
        let body = match self.templates.render(
            FORGET_PASSWORD,
            &json!({ "name": username, "url": reset_pass_url }),
        ) {
            Ok(body) => body,
            Err(e) => {
                error!(username, send_to, "send_forget_password render failed: {}", e);
                return;
            }
        };
        self.send_in_background(send_to, "Reset your password", body, "send_forget_password");
    }

    /// Contact-form mail is awaited and its failure surfaces to the
    /// caller; it delivers to the configured sender inbox.
    pub async fn send_contact_us(
        &self,
        name: &str,
        from: &str,
        message: &str,
    ) -> Result<(), MailError> {
        let body = self.templates.render(
            CONTACT_US,
            &json!({ "name": name, "email": from, "message": message }),
        )?;
        let mail = Message::builder()
            .from(self.from.clone())
            .to(self.from.clone())
            .subject(format!("Contact form message from {}", name))
            .header(ContentType::TEXT_HTML)
            .body(body)?;
        self.transport.send(mail).await?;
        info!(name, from, "send_contact_us delivered");
        Ok(())
    }

    fn send_in_background(&self, send_to: &str, subject: &str, body: String, operation: &'static str) {
        let to: Mailbox = match send_to.parse() {
            Ok(to) => to,
            Err(e) => {
                error!(send_to, "{} bad recipient address: {}", operation, e);
                return;
            }
        };
        let mail = match Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body)
        {
            Ok(mail) => mail,
            Err(e) => {
                error!(send_to, "{} message build failed: {}", operation, e);
                return;
            }
        };

        let transport = self.transport.clone();
        let recipient = send_to.to_string();
        tokio::spawn(async move {
            match transport.send(mail).await {
                Ok(response) => {
                    info!(send_to = %recipient, "{} done, smtp code: {}", operation, response.code())
                }
                Err(e) => error!(send_to = %recipient, "{} failed: {}", operation, e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn templates() -> Handlebars<'static> {
        let mut templates = Handlebars::new();
        templates
            .register_template_string(
                CODE_CONFIRMATION,
                include_str!("../../templates/code_confirmation.hbs"),
            )
            .unwrap();
        templates
            .register_template_string(
                FORGET_PASSWORD,
                include_str!("../../templates/forget_password.hbs"),
            )
            .unwrap();
        templates
            .register_template_string(CONTACT_US, include_str!("../../templates/contact_us.hbs"))
            .unwrap();
        templates
    }

    #[test]
    fn code_confirmation_renders_name_and_code() {
        let body = templates()
            .render(CODE_CONFIRMATION, &json!({ "name": "alice", "code": 123456 }))
            .unwrap();
        assert!(body.contains("alice"));
        assert!(body.contains("123456"));
    }

    #[test]
    fn forget_password_renders_url() {
        let body = templates()
            .render(
                FORGET_PASSWORD,
                &json!({ "name": "alice", "url": "https://example.com/reset/abc" }),
            )
            .unwrap();
        assert!(body.contains("https://example.com/reset/abc"));
    }

    #[test]
    fn contact_us_renders_sender_and_message() {
        let body = templates()
            .render(
                CONTACT_US,
                &json!({ "name": "bob", "email": "bob@example.com", "message": "hello" }),
            )
            .unwrap();
        assert!(body.contains("bob@example.com"));
        assert!(body.contains("hello"));
    }
}
