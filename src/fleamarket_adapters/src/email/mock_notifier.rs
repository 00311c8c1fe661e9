use fleamarket_core::{CodePurpose, DeliveryError, MailAddress, Notifier, VerificationCode};

/// Accepts every code without sending anything. Logs at debug level so
/// local setups can read the code from the console.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier;

impl MockNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Notifier for MockNotifier {
    async fn send_code(
        &self,
        _recipient: &MailAddress,
        purpose: CodePurpose,
        code: &VerificationCode,
    ) -> Result<(), DeliveryError> {
        tracing::debug!(%purpose, code = code.as_str(), "Mock delivery of verification code");
        Ok(())
    }
}
