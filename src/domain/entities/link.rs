//! Link entity representing a short code to URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link with its click metadata.
///
/// `total_clicks` and `last_clicked` are only ever changed by the redirect
/// path; every other field is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub url: String,
    pub total_clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        code: String,
        url: String,
        total_clicks: i64,
        created_at: DateTime<Utc>,
        last_clicked: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            code,
            url,
            total_clicks,
            created_at,
            last_clicked,
        }
    }

    /// Applies one click at `at`.
    ///
    /// `last_clicked` never moves backwards, even if `at` is older than the
    /// stored value.
    pub fn record_click(&mut self, at: DateTime<Utc>) {
        self.total_clicks += 1;
        self.last_clicked = Some(match self.last_clicked {
            Some(prev) if prev > at => prev,
            _ => at,
        });
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub url: String,
}

impl NewLink {
    /// Builds the stored record for this input, created at `created_at`.
    pub fn into_link(self, created_at: DateTime<Utc>) -> Link {
        Link::new(self.code, self.url, 0, created_at, None)
    }
}
