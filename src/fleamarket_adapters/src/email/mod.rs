pub mod mock_notifier;
pub mod postmark_notifier;

pub use mock_notifier::MockNotifier;
pub use postmark_notifier::PostmarkNotifier;

use fleamarket_core::CodePurpose;

/// Subject line for a verification mail.
pub fn subject_for(purpose: CodePurpose) -> &'static str {
    match purpose {
        CodePurpose::Signup => "Confirm your mail address",
        CodePurpose::Login => "Your login code",
        CodePurpose::Reset => "Reset your password",
    }
}
