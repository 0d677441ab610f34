//! Record types produced by a crawl
//!
//! A [`BookRecord`] is created once per visited detail page and never
//! modified afterwards. Records accumulate in crawl order inside a
//! [`CrawlReport`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Star rating shown on a detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StarRating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl StarRating {
    /// Returns the rating word as the site spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "One",
            Self::Two => "Two",
            Self::Three => "Three",
            Self::Four => "Four",
            Self::Five => "Five",
        }
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StarRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "One" => Ok(Self::One),
            "Two" => Ok(Self::Two),
            "Three" => Ok(Self::Three),
            "Four" => Ok(Self::Four),
            "Five" => Ok(Self::Five),
            other => Err(other.to_string()),
        }
    }
}

/// Fields read from a detail page before the category is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    pub title: String,
    pub price: String,
    pub rating: StarRating,
}

impl BookDetails {
    /// Stamps a category label onto the details, producing the final record
    pub fn into_record(self, category: &str) -> BookRecord {
        BookRecord {
            title: self.title,
            price: self.price,
            rating: self.rating,
            category: category.to_string(),
        }
    }
}

/// One row of the output table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookRecord {
    #[serde(rename = "Book Title")]
    pub title: String,

    /// Price as displayed, currency symbol included
    #[serde(rename = "Book Price")]
    pub price: String,

    #[serde(rename = "Book Rating", serialize_with = "serialize_rating")]
    pub rating: StarRating,

    #[serde(rename = "Category")]
    pub category: String,
}

fn serialize_rating<S: serde::Serializer>(rating: &StarRating, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(rating.as_str())
}

/// Column headers of the output table, in order
pub const COLUMNS: [&str; 4] = ["Book Title", "Book Price", "Book Rating", "Category"];

/// Number of books processed for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTally {
    pub category: String,
    pub books: usize,
}

/// Everything a completed crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Records in crawl order: category, then page, then position on page
    pub records: Vec<BookRecord>,

    /// Per-category counts in configured order
    pub tallies: Vec<CategoryTally>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Returns `(rows, columns)` of the result table
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), COLUMNS.len())
    }

    /// Wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}
