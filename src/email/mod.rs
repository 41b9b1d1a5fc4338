use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

/// Notification seam. The server wires in the SMTP mailer; tests substitute
/// a recording one.
#[async_trait]
pub trait EnquiryMailer: Send + Sync {
    /// Send the enquiry mail: HTML body plus the rendered PDF attached.
    async fn send_enquiry(
        &self,
        subject: &str,
        html_body: &str,
        attachment_name: &str,
        pdf: Vec<u8>,
    ) -> Result<(), String>;

    /// Startup probe of the underlying transport.
    async fn verify(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Sends enquiry mail through the configured SMTP relay. The system mailbox
/// is both sender and recipient.
pub struct SystemMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    mailbox: String,
}

impl SystemMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("System SMTP error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            transport,
            mailbox: config.mailbox.clone(),
        })
    }
}

#[async_trait]
impl EnquiryMailer for SystemMailer {
    async fn send_enquiry(
        &self,
        subject: &str,
        html_body: &str,
        attachment_name: &str,
        pdf: Vec<u8>,
    ) -> Result<(), String> {
        let mailbox: Mailbox = self
            .mailbox
            .parse()
            .map_err(|e| format!("Invalid mailbox address: {e}"))?;

        let pdf_type = ContentType::parse("application/pdf")
            .map_err(|e| format!("Invalid attachment type: {e}"))?;

        let message = Message::builder()
            .from(mailbox.clone())
            .to(mailbox)
            .subject(subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::html(html_body.to_string()))
                    .singlepart(Attachment::new(attachment_name.to_string()).body(pdf, pdf_type)),
            )
            .map_err(|e| format!("Failed to build email: {e}"))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        Ok(())
    }

    async fn verify(&self) -> Result<(), String> {
        let ok = self
            .transport
            .test_connection()
            .await
            .map_err(|e| format!("SMTP connection error: {e}"))?;
        if ok {
            Ok(())
        } else {
            Err("SMTP server refused the connection".to_string())
        }
    }
}
