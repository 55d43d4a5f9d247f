// File: src/patterns.rs
// Purpose: Named format patterns shared by every form

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fmt;

pub const EMAIL_SOURCE: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
pub const PHONE_SOURCE: &str = r"^[+]?[(]?[0-9]{3}[)]?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$";
pub const URL_SOURCE: &str = r"^https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}(?-u:\b)([-a-zA-Z0-9()@:%_+.~#?&/=]*)$";
pub const PASSWORD_SOURCE: &str = r"^(?=.*[a-z])(?=.*[A-Z])(?=.*[0-9])(?=.*[@$!%*?&])[A-Za-z0-9@$!%*?&]{8,}$";
pub const CURRENCY_SOURCE: &str = r"^[0-9]+(\.[0-9]{2})?$";
pub const DATE_SOURCE: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";
pub const TIME_SOURCE: &str = r"^([01][0-9]|2[0-3]):([0-5][0-9])$";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_SOURCE).unwrap());
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(PHONE_SOURCE).unwrap());
static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(URL_SOURCE).unwrap());
static CURRENCY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(CURRENCY_SOURCE).unwrap());
static DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(DATE_SOURCE).unwrap());
static TIME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(TIME_SOURCE).unwrap());

// The regex crate has no lookaheads, so the password pattern is split into
// an anchored charset/length check plus one presence check per class.
static PASSWORD_CHARSET_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@$!%*?&]{8,}$").unwrap());
static PASSWORD_CLASS_REGEXES: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"[a-z]").unwrap(),
        Regex::new(r"[A-Z]").unwrap(),
        Regex::new(r"[0-9]").unwrap(),
        Regex::new(r"[@$!%*?&]").unwrap(),
    ]
});

/// Built-in formats available to every rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedPattern {
    Email,
    Phone,
    Url,
    Password,
    Currency,
    Date,
    Time,
}

impl NamedPattern {
    pub fn is_match(self, value: &str) -> bool {
        match self {
            NamedPattern::Email => EMAIL_REGEX.is_match(value),
            NamedPattern::Phone => PHONE_REGEX.is_match(value),
            NamedPattern::Url => URL_REGEX.is_match(value),
            NamedPattern::Password => is_strong_password(value),
            NamedPattern::Currency => CURRENCY_REGEX.is_match(value),
            NamedPattern::Date => DATE_REGEX.is_match(value),
            NamedPattern::Time => TIME_REGEX.is_match(value),
        }
    }

    /// The canonical pattern text, as a browser `pattern` attribute would carry it
    pub fn source(self) -> &'static str {
        match self {
            NamedPattern::Email => EMAIL_SOURCE,
            NamedPattern::Phone => PHONE_SOURCE,
            NamedPattern::Url => URL_SOURCE,
            NamedPattern::Password => PASSWORD_SOURCE,
            NamedPattern::Currency => CURRENCY_SOURCE,
            NamedPattern::Date => DATE_SOURCE,
            NamedPattern::Time => TIME_SOURCE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NamedPattern::Email => "email",
            NamedPattern::Phone => "phone",
            NamedPattern::Url => "url",
            NamedPattern::Password => "password",
            NamedPattern::Currency => "currency",
            NamedPattern::Date => "date",
            NamedPattern::Time => "time",
        }
    }
}

impl fmt::Display for NamedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower, upper, digit and symbol from `@$!%*?&`; at least 8 characters, nothing else
pub fn is_strong_password(password: &str) -> bool {
    PASSWORD_CHARSET_REGEX.is_match(password)
        && PASSWORD_CLASS_REGEXES.iter().all(|re| re.is_match(password))
}

pub fn is_valid_email(email: &str) -> bool {
    NamedPattern::Email.is_match(email)
}

pub fn is_valid_url(url: &str) -> bool {
    NamedPattern::Url.is_match(url)
}

/// A `pattern` rule: either a built-in format or a caller-supplied regex
#[derive(Debug, Clone)]
pub enum Pattern {
    Named(NamedPattern),
    Regex(Regex),
}

impl Pattern {
    pub fn is_match(&self, value: &str) -> bool {
        match self {
            Pattern::Named(named) => named.is_match(value),
            Pattern::Regex(regex) => regex.is_match(value),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Named(named) => named.source(),
            Pattern::Regex(regex) => regex.as_str(),
        }
    }
}

impl From<NamedPattern> for Pattern {
    fn from(named: NamedPattern) -> Self {
        Pattern::Named(named)
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Pattern::Regex(regex)
    }
}
