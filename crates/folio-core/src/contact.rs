#![forbid(unsafe_code)]

//! Contact form validation.
//!
//! A submission needs all six fields non-empty and an email of the shape
//! `local@domain.tld` (`^[^\s@]+@[^\s@]+\.[^\s@]+$`). Anything else blocks the
//! native submit.

use std::sync::OnceLock;

use regex::Regex;

/// One email "word" character: anything but `@` and the characters a browser
/// regex treats as `\s` (ECMAScript WhiteSpace and LineTerminator). The
/// `regex` crate's `\s` differs: it adds U+0085 and lacks U+FEFF.
const EMAIL_WORD: &str =
    r"[^@\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

/// The form's required fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactField {
    Name,
    Email,
    CountryCode,
    Phone,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::CountryCode,
        Self::Phone,
        Self::Subject,
        Self::Message,
    ];

    /// Element id of the field's control.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::CountryCode => "country_code",
            Self::Phone => "phone",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

/// Why a submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactError {
    /// First empty field in form order.
    MissingField(ContactField),
    MalformedEmail,
}

impl std::fmt::Display for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field is empty: {}", field.id()),
            Self::MalformedEmail => write!(f, "email address is malformed"),
        }
    }
}

impl std::error::Error for ContactError {}

/// Values read from the form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactValues {
    values: [String; 6],
}

impl ContactValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect values through `lookup`, keyed by element id. Fields the
    /// lookup cannot find read as empty.
    pub fn from_lookup(mut lookup: impl FnMut(&str) -> Option<String>) -> Self {
        let mut values = Self::new();
        for field in ContactField::ALL {
            if let Some(value) = lookup(field.id()) {
                values.set(field, value);
            }
        }
        values
    }

    #[must_use]
    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        self.values[field as usize] = value.into();
    }

    #[must_use]
    pub fn get(&self, field: ContactField) -> &str {
        &self.values[field as usize]
    }

    /// Check required fields, then the email shape.
    pub fn validate(&self) -> Result<(), ContactError> {
        if let Some(field) = ContactField::ALL
            .into_iter()
            .find(|field| self.get(*field).is_empty())
        {
            return Err(ContactError::MissingField(field));
        }
        if !is_valid_email(self.get(ContactField::Email)) {
            return Err(ContactError::MalformedEmail);
        }
        Ok(())
    }
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(&format!("^{EMAIL_WORD}+@{EMAIL_WORD}+\\.{EMAIL_WORD}+$")).ok())
        .as_ref()
}

/// Whether `email` has the `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(email))
}
