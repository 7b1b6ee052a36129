//! Transactional email collaborator (SMTP via lettre).

use anyhow::Context as _;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::repository::MailerPort;
use crate::error::SyntraServiceError;

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(smtp_url: &str, smtp_from: &str) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(smtp_url)
            .context("parse SMTP_URL")?
            .build();
        let from = smtp_from.parse::<Mailbox>().context("parse SMTP_FROM")?;
        Ok(Self { transport, from })
    }
}

fn otp_email_body(code: &str) -> String {
    format!(
        "<div style=\"font-family: sans-serif; max-width: 600px; margin: auto;\">\
         <h2>Welcome to Syntra!</h2>\
         <p>Use the code below to verify your email address:</p>\
         <div style=\"background: #f4f4f4; padding: 15px; text-align: center;\">\
         <h1 style=\"letter-spacing: 10px; font-family: monospace;\">{code}</h1>\
         </div>\
         <p>This code expires in 10 minutes. If you didn't request this, ignore this email.</p>\
         </div>"
    )
}

impl MailerPort for SmtpMailer {
    async fn send_otp_email(&self, to: &str, code: &str) -> Result<(), SyntraServiceError> {
        let to = to
            .parse::<Mailbox>()
            .with_context(|| format!("parse recipient address {to}"))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Verify your email - Syntra")
            .header(ContentType::TEXT_HTML)
            .body(otp_email_body(code))
            .context("build otp email")?;

        self.transport
            .send(message)
            .await
            .context("send otp email")?;
        Ok(())
    }
}
