//! Domain primitives shared by the catalog services.
//!
//! Collation keys and the positional merge live in their own modules; this
//! module holds the small strongly typed values passed between layers.

pub mod collation;
pub mod positional;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role granted to an account.
///
/// Readers need any role; every catalog write requires [`Role::Admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
    #[serde(rename = "ROLE_USER")]
    User,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ROLE_ADMIN",
            Self::User => "ROLE_USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_ADMIN" => Ok(Self::Admin),
            "ROLE_USER" => Ok(Self::User),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// Page request after validation: 1-based page and a bounded limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: u64,
    pub limit: u64,
}

impl Paging {
    #[must_use]
    pub const fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }
}

/// Listing filter: paging plus an optional name fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub name: Option<String>,
    pub paging: Paging,
}

/// One page of results plus the totals needed to render pagination.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub pages_count: u64,
    pub total: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(data: Vec<T>, paging: Paging, total: u64) -> Self {
        let pages_count = if paging.limit == 0 {
            0
        } else {
            total.div_ceil(paging.limit)
        };

        Self {
            data,
            page: paging.page,
            limit: paging.limit,
            pages_count,
            total,
        }
    }

    /// Swaps in already converted items, keeping the paging totals.
    pub fn with_data<U>(self, data: Vec<U>) -> Page<U> {
        Page {
            data,
            page: self.page,
            limit: self.limit,
            pages_count: self.pages_count,
            total: self.total,
        }
    }

    /// Maps the items while keeping the paging totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            pages_count: self.pages_count,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        assert_eq!("ROLE_ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(Role::User.to_string(), "ROLE_USER");
        assert!("ADMIN".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_with_prefix() {
        let json = serde_json::to_string(&[Role::Admin, Role::User]).unwrap();
        assert_eq!(json, r#"["ROLE_ADMIN","ROLE_USER"]"#);
    }

    #[test]
    fn page_counts_partial_pages() {
        let page = Page::new(vec![1, 2], Paging::new(3, 2), 5);
        assert_eq!(page.pages_count, 3);
        assert_eq!(page.total, 5);

        let empty: Page<i32> = Page::new(Vec::new(), Paging::new(1, 20), 0);
        assert_eq!(empty.pages_count, 0);
    }

    #[test]
    fn page_map_keeps_totals() {
        let page = Page::new(vec![1, 2], Paging::new(1, 2), 4).map(|n| n * 10);
        assert_eq!(page.data, vec![10, 20]);
        assert_eq!(page.pages_count, 2);
    }
}
