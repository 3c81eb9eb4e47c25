//! Sort method registry and the built-in comparators.
//!
//! A sort method is a named comparator over two cell texts. Every sorter owns
//! its own registry, seeded with the built-ins and extended by the caller.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::{Result, SortError};

/// A comparator over two non-empty cell texts.
pub type Comparator = Arc<dyn Fn(&str, &str) -> Ordering + Send + Sync>;

/// The comparators every registry starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinMethod {
    /// Integer prefix parse.
    Numeric,
    /// Decimal prefix parse.
    Float,
    /// Case-insensitive text.
    Alphabetical,
    /// Calendar dates.
    Date,
}

impl BuiltinMethod {
    /// All built-in methods.
    pub const ALL: [BuiltinMethod; 4] = [Self::Numeric, Self::Float, Self::Alphabetical, Self::Date];

    /// The registry name of this method.
    pub fn name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Float => "float",
            Self::Alphabetical => "alphabetical",
            Self::Date => "date",
        }
    }

    /// The comparator function for this method.
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::Numeric => compare_numeric(a, b),
            Self::Float => compare_float(a, b),
            Self::Alphabetical => compare_alphabetical(a, b),
            Self::Date => compare_date(a, b),
        }
    }
}

/// Registry mapping method names to comparators.
#[derive(Clone)]
pub struct SortMethodRegistry {
    methods: HashMap<String, Comparator>,
}

impl SortMethodRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in methods.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for method in BuiltinMethod::ALL {
            registry
                .methods
                .insert(method.name().to_string(), Arc::new(move |a: &str, b: &str| method.compare(a, b)));
        }
        registry
    }

    /// Register a comparator, replacing any method with the same name.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidMethodName` if the name is empty or contains
    /// whitespace, since it could never be matched from a class token.
    pub fn register<F>(&mut self, name: &str, compare: F) -> Result<()>
    where
        F: Fn(&str, &str) -> Ordering + Send + Sync + 'static,
    {
        self.insert(name, Arc::new(compare))
    }

    /// Register `alias` as another name for the existing method `target`.
    ///
    /// # Errors
    ///
    /// Returns `SortError::UnknownSortMethod` if `target` is not registered,
    /// or `SortError::InvalidMethodName` for an invalid alias.
    pub fn alias(&mut self, alias: &str, target: &str) -> Result<()> {
        let compare = self
            .get(target)
            .cloned()
            .ok_or_else(|| SortError::UnknownSortMethod(target.to_string()))?;
        self.insert(alias, compare)
    }

    fn insert(&mut self, name: &str, compare: Comparator) -> Result<()> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(SortError::InvalidMethodName(name.to_string()));
        }
        if self.methods.insert(name.to_string(), compare).is_some() {
            tracing::debug!(method = name, "Replaced sort method");
        }
        Ok(())
    }

    /// Look up a comparator by name.
    pub fn get(&self, name: &str) -> Option<&Comparator> {
        self.methods.get(name)
    }

    /// Check whether a method is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Registered method names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for SortMethodRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for SortMethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortMethodRegistry")
            .field("methods", &self.names())
            .finish()
    }
}

/// Compare two texts as integers.
pub fn compare_numeric(a: &str, b: &str) -> Ordering {
    compare_parsed(parse_int_prefix(a), parse_int_prefix(b))
}

/// Compare two texts as decimal numbers.
pub fn compare_float(a: &str, b: &str) -> Ordering {
    compare_parsed(parse_float_prefix(a), parse_float_prefix(b))
}

/// Compare two texts case-insensitively.
pub fn compare_alphabetical(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Compare two texts as dates. Equal if either side is not a date.
pub fn compare_date(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

/// Unparseable values order after every number and equal to each other.
fn compare_parsed(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Split off an optional sign after leading whitespace.
fn split_sign(text: &str) -> (f64, &str) {
    let text = text.trim_start();
    if let Some(rest) = text.strip_prefix('-') {
        (-1.0, rest)
    } else {
        (1.0, text.strip_prefix('+').unwrap_or(text))
    }
}

/// Parse the leading integer of `text`, ignoring anything after it.
///
/// Accepts an optional sign and a `0x` prefix for hexadecimal. Returns `None`
/// when no digits are found.
pub fn parse_int_prefix(text: &str) -> Option<f64> {
    let (sign, rest) = split_sign(text);

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut value = 0.0f64;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        value = value * f64::from(radix) + f64::from(d);
        seen = true;
    }
    seen.then_some(sign * value)
}

/// Parse the leading decimal number of `text`, ignoring anything after it.
///
/// Accepts an optional sign, a fraction, an exponent, and `Infinity`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let (sign, rest) = split_sign(text);
    if rest.starts_with("Infinity") {
        return Some(sign * f64::INFINITY);
    }

    let bytes = rest.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_len = digits_from(0);
    let mut end = int_len;
    let mut frac_len = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_len = digits_from(end + 1);
        end += 1 + frac_len;
    }
    if int_len == 0 && frac_len == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_len = digits_from(exp_end.min(bytes.len()));
        if exp_len > 0 {
            end = exp_end + exp_len;
        }
    }

    rest[..end].parse::<f64>().ok().map(|v| sign * v)
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parse a calendar date or date-time in one of the common notations.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.naive_utc());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
