//! User data model and passport parsing.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-assigned user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(example = 1)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw integer value as stored.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for UserId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when a passport string does not split into series and number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid passport format")]
pub struct PassportFormatError;

/// Passport series and number as stored on a user.
///
/// Over the wire both parts travel as one string separated by a single space,
/// e.g. `"1234 567890"`.
///
/// # Examples
/// ```
/// use taskapi::domain::PassportReference;
///
/// let passport: PassportReference = "1234 567890".parse().unwrap();
/// assert_eq!(passport.series(), "1234");
/// assert_eq!(passport.number(), "567890");
/// assert!("1234567890".parse::<PassportReference>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassportReference {
    series: String,
    number: String,
}

impl PassportReference {
    /// Build a reference from already separated parts.
    pub fn new(series: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            series: series.into(),
            number: number.into(),
        }
    }

    /// Passport series.
    pub fn series(&self) -> &str {
        self.series.as_str()
    }

    /// Passport number.
    pub fn number(&self) -> &str {
        self.number.as_str()
    }

    /// Split into owned `(series, number)`.
    pub fn into_parts(self) -> (String, String) {
        (self.series, self.number)
    }
}

impl std::str::FromStr for PassportReference {
    type Err = PassportFormatError;

    /// Splits on every single space; anything other than exactly two parts
    /// is rejected. Empty parts are accepted.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(series), Some(number), None) => Ok(Self::new(series, number)),
            _ => Err(PassportFormatError),
        }
    }
}

impl fmt::Display for PassportReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.series, self.number)
    }
}

/// Stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[schema(example = "Иван Петров")]
    pub name: String,
    #[schema(example = "1234")]
    pub passport_series: String,
    #[schema(example = "567890")]
    pub passport_number: String,
}

impl User {
    /// Assemble a user from its identifier and the validated draft.
    pub fn from_draft(id: UserId, draft: UserDraft) -> Self {
        let (passport_series, passport_number) = draft.passport.into_parts();
        Self {
            id,
            name: draft.name,
            passport_series,
            passport_number,
        }
    }

    /// Passport parts of this user.
    pub fn passport(&self) -> PassportReference {
        PassportReference::new(&self.passport_series, &self.passport_number)
    }
}

/// Validated payload used to create or fully replace a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub passport: PassportReference,
}

impl UserDraft {
    /// Parse the wire passport string and pair it with a name.
    pub fn parse(
        name: impl Into<String>,
        passport: &str,
    ) -> Result<Self, PassportFormatError> {
        Ok(Self {
            name: name.into(),
            passport: passport.parse()?,
        })
    }
}

/// Offset/limit window applied to user listings.
///
/// A `limit` of `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    offset: i64,
    limit: Option<i64>,
}

impl Pagination {
    /// Normalise raw query values: negative offsets clamp to zero and a
    /// non-positive limit means no limit.
    ///
    /// Negative values never reach the store, so `?offset=-1` lists from the
    /// first row instead of failing the query.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: offset.max(0),
            limit: (limit > 0).then_some(limit),
        }
    }

    /// Rows to skip.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Maximum rows to return, if bounded.
    pub fn limit(&self) -> Option<i64> {
        self.limit
    }
}
