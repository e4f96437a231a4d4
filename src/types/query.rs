//! Validated search queries.
//!
//! [`Query`] is the normalized form of the raw `keyword`/`category`/`page`
//! request parameters. Construction via [`Query::from_params`] is the only
//! entry point, so a `Query` in hand is always valid: the keyword is trimmed
//! and non-empty, the category is one of the known slugs, and the page sits
//! in `[1, MAX_PAGES]`.

use std::fmt;
use std::str::FromStr;

use crate::{ChineurError, Result};

/// Highest page the proxy will request upstream.
///
/// Also the fixed `totalPages` reported in responses — the upstream result
/// count is not consulted.
pub const MAX_PAGES: u32 = 10;

/// Keyword substituted when the request carries none.
pub const DEFAULT_KEYWORD: &str = "bons plans";

/// Category slugs accepted from the frontend, mapped to upstream search
/// indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Tech,
    Mode,
    Maison,
    Beaute,
    Sport,
}

impl Category {
    /// Upstream search index this category scopes to.
    pub fn search_index(self) -> &'static str {
        match self {
            Self::Tech => "Electronics",
            Self::Mode => "Fashion",
            Self::Maison => "HomeGarden",
            Self::Beaute => "Beauty",
            Self::Sport => "SportingGoods",
        }
    }

    /// The slug used in request URLs.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Tech => "tech",
            Self::Mode => "mode",
            Self::Maison => "maison",
            Self::Beaute => "beauté",
            Self::Sport => "sport",
        }
    }
}

impl FromStr for Category {
    type Err = ChineurError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tech" => Ok(Self::Tech),
            "mode" => Ok(Self::Mode),
            "maison" => Ok(Self::Maison),
            // query strings frequently arrive ASCII-folded
            "beauté" | "beaute" => Ok(Self::Beaute),
            "sport" => Ok(Self::Sport),
            other => Err(ChineurError::InvalidCategory(other.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A validated search query. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    keyword: String,
    category: Option<Category>,
    page: u32,
}

impl Query {
    /// Normalize and validate raw request parameters.
    ///
    /// - `keyword`: trimmed; empty or absent falls back to
    ///   [`DEFAULT_KEYWORD`].
    /// - `category`: must be a known slug when present; absent means a
    ///   wildcard search scope.
    /// - `page`: parsed and clamped into `[1, MAX_PAGES]`; non-numeric
    ///   input defaults to page 1 rather than being rejected.
    pub fn from_params(
        keyword: Option<&str>,
        category: Option<&str>,
        page: Option<&str>,
    ) -> Result<Self> {
        let keyword = keyword
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .unwrap_or(DEFAULT_KEYWORD);
        // cannot fire after the default substitution, checked anyway
        if keyword.is_empty() {
            return Err(ChineurError::InvalidKeyword);
        }

        let category = category.map(Category::from_str).transpose()?;

        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .clamp(1, i64::from(MAX_PAGES)) as u32;

        Ok(Self {
            keyword: keyword.to_string(),
            category,
            page,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Upstream search index for this query; `"All"` when no category was
    /// requested.
    pub fn search_index(&self) -> &'static str {
        self.category.map_or("All", Category::search_index)
    }

    /// Deterministic cache key for this query.
    ///
    /// `lowercase(keyword):search_index:page`. Keywords compare
    /// case-insensitively. Distinct (keyword, category, page) triples never
    /// collide: the page segment is colon-free and the search index comes
    /// from a fixed colon-free set, so decomposing the key from the right
    /// is unambiguous even when the keyword itself contains colons.
    pub fn cache_key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.keyword.to_lowercase(),
            self.search_index(),
            self.page
        )
    }
}
