use std::time::Duration;

use fleamarket_core::{CodePurpose, DeliveryError, MailAddress, Notifier, VerificationCode};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use super::subject_for;

/// Delivers verification codes through the Postmark HTTP API.
#[derive(Clone)]
pub struct PostmarkNotifier {
    http_client: Client,
    base_url: String,
    sender: MailAddress,
    authorization_token: Secret<String>,
    code_ttl: Duration,
}

impl PostmarkNotifier {
    pub fn new(
        base_url: String,
        sender: MailAddress,
        authorization_token: Secret<String>,
        http_client: Client,
        code_ttl: Duration,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
            code_ttl,
        }
    }

    fn body(&self, code: &VerificationCode) -> String {
        format!(
            "Your verification code is {}. It expires in {} minutes.",
            code.as_str(),
            self.code_ttl.as_secs().div_ceil(60)
        )
    }
}

#[async_trait::async_trait]
impl Notifier for PostmarkNotifier {
    #[tracing::instrument(name = "Sending verification code", skip_all)]
    async fn send_code(
        &self,
        recipient: &MailAddress,
        purpose: CodePurpose,
        code: &VerificationCode,
    ) -> Result<(), DeliveryError> {
        let base = Url::parse(&self.base_url).map_err(|e| DeliveryError(e.to_string()))?;
        let url = base
            .join("/email")
            .map_err(|e| DeliveryError(e.to_string()))?;

        let content = self.body(code);
        let request_body = SendEmailRequest {
            from: self.sender.as_str(),
            to: recipient.as_str(),
            subject: subject_for(purpose),
            html_body: &content,
            text_body: &content,
            message_stream: MESSAGE_STREAM,
        };

        let request = self
            .http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|e| DeliveryError(e.to_string()))?
            .error_for_status()
            .map_err(|e| DeliveryError(e.to_string()))?;

        Ok(())
    }
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}
