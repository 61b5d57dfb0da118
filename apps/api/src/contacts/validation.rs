use std::sync::OnceLock;

use regex::Regex;

use crate::contacts::models::ContactSubmission;

const NAME_MAX: usize = 100;
const PHONE_MAX: usize = 20;
const COMPANY_MAX: usize = 100;
const MESSAGE_MIN: usize = 10;
const MESSAGE_MAX: usize = 2000;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // RFC 5322 simplified: local@domain.tld
    EMAIL.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
        )
        .expect("email regex is valid")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && email_regex().is_match(email)
}

/// Normalizes and validates a submission before it reaches the intake pipeline.
///
/// Surrounding whitespace is trimmed and blank optional fields become `None`.
/// Lengths are counted in characters. All violations are reported together.
pub fn validate_submission(submission: ContactSubmission) -> Result<ContactSubmission, String> {
    let submission = ContactSubmission {
        name: submission.name.trim().to_string(),
        email: submission.email.trim().to_string(),
        phone: non_blank(submission.phone),
        company: non_blank(submission.company),
        message: submission.message.trim().to_string(),
    };

    let mut problems = Vec::new();

    let name_len = submission.name.chars().count();
    if name_len == 0 || name_len > NAME_MAX {
        problems.push(format!("name must be 1-{NAME_MAX} characters"));
    }
    if !is_valid_email(&submission.email) {
        problems.push("email must be a valid email address".to_string());
    }
    if let Some(phone) = &submission.phone {
        if phone.chars().count() > PHONE_MAX {
            problems.push(format!("phone must be at most {PHONE_MAX} characters"));
        }
    }
    if let Some(company) = &submission.company {
        if company.chars().count() > COMPANY_MAX {
            problems.push(format!("company must be at most {COMPANY_MAX} characters"));
        }
    }
    let message_len = submission.message.chars().count();
    if !(MESSAGE_MIN..=MESSAGE_MAX).contains(&message_len) {
        problems.push(format!(
            "message must be {MESSAGE_MIN}-{MESSAGE_MAX} characters"
        ));
    }

    if problems.is_empty() {
        Ok(submission)
    } else {
        Err(problems.join("; "))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
