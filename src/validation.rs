//! Pure field validators used by the user lifecycle.

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Outcome of [`check_password`]. Each flag is one rule of the password policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: bool,
    pub has_letter: bool,
    pub has_digit: bool,
}

impl PasswordPolicy {
    pub fn is_satisfied(&self) -> bool {
        self.min_length && self.has_letter && self.has_digit
    }
}

/// Usernames are non-empty and made only of ASCII letters and digits.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty() && username.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Accepts `local@domain.tld`: a single `@`, no whitespace, a dotted domain whose
/// labels are letters, digits or inner hyphens, and an alphabetic TLD of two or more.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || domain.contains('@')
        || local.chars().any(|c| c.is_whitespace() || c.is_control())
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let label_ok = |label: &&str| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels.iter().all(label_ok) && tld_ok
}

/// Evaluates every password rule at once; callers report the first failing one.
pub fn check_password(password: &str) -> PasswordPolicy {
    PasswordPolicy {
        min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
        has_letter: password.chars().any(char::is_alphabetic),
        has_digit: password.chars().any(|c| c.is_ascii_digit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("Bob42"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("john doe"));
        assert!(!is_valid_username("john_doe"));
        assert!(!is_valid_username("jöhn"));
    }

    #[test]
    fn test_emails() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(is_valid_email("x@my-host.io"));

        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@-b.com"));
        assert!(!is_valid_email("a@b..com"));
        assert!(!is_valid_email("a@b.c0m"));
    }

    #[test]
    fn test_password_policy() {
        assert!(check_password("abcdefg1").is_satisfied());
        assert_eq!(
            check_password("abc1"),
            PasswordPolicy {
                min_length: false,
                has_letter: true,
                has_digit: true
            }
        );
        assert!(!check_password("12345678").has_letter);
        assert!(!check_password("abcdefgh").has_digit);
        // Length counts characters, not bytes
        assert!(!check_password("ééééé1").min_length);
    }
}
