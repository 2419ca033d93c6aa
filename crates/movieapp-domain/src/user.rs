//! Account field rules.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Avatar assigned to accounts that never set one.
pub const DEFAULT_AVATAR: &str = "https://via.placeholder.com/150";

/// Minimum accepted plaintext password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Canonical form used for storage and lookup: trimmed and lower-cased.
/// Uniqueness of emails is case-insensitive because of this.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `word([.-]?word)*@word([.-]?word)*(.xx|.xxx)+` with ASCII word characters.
static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    RegexBuilder::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
        .unicode(false)
        .build()
        .ok()
});

/// Validate an (already normalized) email address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// Display names are trimmed; an empty result is not a name.
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
