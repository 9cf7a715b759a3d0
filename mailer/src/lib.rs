use anyhow::Result;
use lettre::{
    message::{header::ContentType, MessageBuilder},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

// One retry after a failed delivery. Failures never reach the enqueueing
// request handler; they are logged here and the payload is dropped.
const SEND_ATTEMPTS: usize = 2;

pub struct Mailer {
    message_builder: MessageBuilder,
    smtp_transport: SmtpTransport,
    channel_receiver: UnboundedReceiver<MailPayload>,
}

impl Mailer {
    pub fn new(
        smtp_host: &str,
        smtp_username: &str,
        smtp_password: &str,
        sender_name: &str,
        sender_email: &str,
    ) -> (Self, UnboundedSender<MailPayload>) {
        ps_log::info(Some("⚡"), "Mailer: Initializing component");

        let (channel_sender, channel_receiver) = mpsc::unbounded_channel::<MailPayload>();

        let sender = match format!("{sender_name} <{sender_email}>").parse() {
            Ok(mailbox) => mailbox,
            Err(err) => ps_log::panic(None, format!("Mailer: Invalid sender address: {err}")),
        };
        let smtp_transport = match SmtpTransport::relay(smtp_host) {
            Ok(relay) => relay
                .credentials(Credentials::new(
                    smtp_username.to_owned(),
                    smtp_password.to_owned(),
                ))
                .build(),
            Err(err) => ps_log::panic(None, format!("Mailer: Invalid SMTP relay: {err}")),
        };

        (
            Self {
                message_builder: Message::builder().from(sender),
                smtp_transport,
                channel_receiver,
            },
            channel_sender,
        )
    }

    pub async fn run(self, cancel_token: CancellationToken) -> Result<()> {
        ps_log::info(Some("💫"), "Mailer: Running component");

        Ok(tokio::spawn(async move {
            let mut channel_receiver = self.channel_receiver;
            let message_builder = self.message_builder;
            let smtp_transport = self.smtp_transport;

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        ps_log::info(Some("🛑"), "Mailer: Shutting down component");
                        break;
                    }
                    payload = channel_receiver.recv() => {
                        match payload {
                            Some(payload) => Self::deliver(&message_builder, &smtp_transport, &payload),
                            None => break,
                        }
                    }
                }
            }
        })
        .await?)
    }

    pub async fn run_none() -> Result<()> {
        Ok(())
    }

    fn deliver(
        message_builder: &MessageBuilder,
        smtp_transport: &SmtpTransport,
        payload: &MailPayload,
    ) {
        let mailbox = match payload.to.parse() {
            Ok(mailbox) => mailbox,
            Err(err) => {
                ps_log::error(
                    None,
                    format!("Mailer: Invalid recipient address '{}': {err}", payload.to),
                );
                return;
            }
        };

        let message = match message_builder
            .to_owned()
            .to(mailbox)
            .subject(&payload.subject)
            .header(ContentType::TEXT_HTML)
            .body(payload.body.to_owned())
        {
            Ok(message) => message,
            Err(err) => {
                ps_log::error(
                    None,
                    format!("Mailer: Failed to build message '{}': {err}", payload.subject),
                );
                return;
            }
        };

        for attempt in 1..=SEND_ATTEMPTS {
            match smtp_transport.send(&message) {
                Ok(_) => return,
                Err(err) => ps_log::error(
                    None,
                    format!(
                        "Mailer: Failed to send '{}' to '{}' (attempt {attempt}/{SEND_ATTEMPTS}): {err}",
                        payload.subject, payload.to
                    ),
                ),
            }
        }
    }
}

pub struct MailPayload {
    to: String,
    subject: String,
    body: String,
}

impl MailPayload {
    pub fn new(to: &str, subject: &str, body: &str) -> Self {
        Self {
            to: to.to_owned(),
            subject: subject.to_owned(),
            body: body.to_owned(),
        }
    }

    /// Confirmation to the requester that their access request was recorded.
    pub fn request_received(to: &str, project_name: &str) -> Self {
        Self::new(
            to,
            &format!("Access Request Received - {project_name}"),
            &format!(
                "<h2>Access Request Received</h2><p>Thank you for your interest in <strong>{project_name}</strong>.</p><p>We have received your access request and will review it shortly.</p>"
            ),
        )
    }

    /// Alert to the administrator that a new access request is waiting.
    pub fn admin_alert(to: &str, project_name: &str) -> Self {
        Self::new(
            to,
            &format!("New Access Request - {project_name}"),
            &format!(
                "<h2>New Access Request</h2><p>You have received a new access request for <strong>{project_name}</strong>.</p><p>Please review and approve or reject the request in your admin dashboard.</p>"
            ),
        )
    }

    /// Approval notice to the requester.
    pub fn approved(to: &str, project_name: &str) -> Self {
        Self::new(
            to,
            &format!("Access Granted - {project_name}"),
            &format!(
                "<h2>Access Granted</h2><p>Your access request for <strong>{project_name}</strong> has been approved!</p>"
            ),
        )
    }

    pub fn password_reset_code(to: &str, code: &str, ttl: &u32) -> Self {
        Self::new(
            to,
            "Password Reset Verification Code",
            &format!(
                "<h2>Password Reset</h2><p>Your password reset verification code is <strong>{code}</strong>.</p><p>This code will expire in {ttl} seconds.</p>"
            ),
        )
    }

    pub fn password_changed(to: &str) -> Self {
        Self::new(
            to,
            "Your Password Has Been Changed Successfully",
            "<h2>Password Changed</h2><p>Your account password has been successfully changed.</p>",
        )
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_address_the_right_recipient() {
        let payload = MailPayload::request_received("student@example.com", "Chat App");
        assert_eq!(payload.to(), "student@example.com");
        assert_eq!(payload.subject(), "Access Request Received - Chat App");
        assert!(payload.body().contains("<strong>Chat App</strong>"));

        let payload = MailPayload::admin_alert("admin@example.com", "Chat App");
        assert_eq!(payload.to(), "admin@example.com");
        assert_eq!(payload.subject(), "New Access Request - Chat App");

        let payload = MailPayload::approved("student@example.com", "Chat App");
        assert_eq!(payload.subject(), "Access Granted - Chat App");
        assert!(payload.body().contains("has been approved"));
    }

    #[test]
    fn reset_code_template_carries_code_and_ttl() {
        let payload = MailPayload::password_reset_code("user@example.com", "421337", &600);
        assert!(payload.body().contains("421337"));
        assert!(payload.body().contains("600 seconds"));
    }

    #[tokio::test]
    async fn enqueue_returns_without_a_running_worker() {
        // The submission path must never wait on SMTP latency. Enqueueing
        // with no worker draining the channel must still succeed instantly.
        let (_mailer, sender) = Mailer::new(
            "smtp.example.com",
            "user",
            "password",
            "Projstore",
            "noreply@example.com",
        );

        sender
            .send(MailPayload::request_received("a@b.com", "Chat App"))
            .unwrap();
        sender
            .send(MailPayload::admin_alert("admin@b.com", "Chat App"))
            .unwrap();
    }
}
