//! Catalogue search filter.

use serde::{Deserialize, Serialize};

use super::Activity;

/// Default and maximum page size of catalogue queries.
pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 200;

/// Filter for the public catalogue. Only published listings are ever listed.
///
/// `category` and `city` match case-insensitively and exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityFilter {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

impl ActivityFilter {
    /// Page size clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn page_offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }

    /// Blank filter values are treated as absent.
    pub fn category(&self) -> Option<&str> {
        non_blank(&self.category)
    }

    pub fn city(&self) -> Option<&str> {
        non_blank(&self.city)
    }

    /// Returns true if a listing passes this filter (pagination aside).
    pub fn matches(&self, activity: &Activity) -> bool {
        if !activity.is_published() {
            return false;
        }
        let category_ok = self
            .category()
            .map(|c| activity.details.category.eq_ignore_ascii_case(c))
            .unwrap_or(true);
        let city_ok = self
            .city()
            .map(|c| activity.details.city.eq_ignore_ascii_case(c))
            .unwrap_or(true);
        category_ok && city_ok
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::ActivityFields;
    use crate::domain::foundation::{ActivityId, CompanyId};

    fn listing(category: &str, city: &str, published: bool) -> Activity {
        Activity::create(
            ActivityId::new(),
            CompanyId::new(),
            ActivityFields {
                title: "Soccer".to_string(),
                description: "Outdoor soccer".to_string(),
                category: category.to_string(),
                age_min: 5,
                age_max: 9,
                price_cents: 1500,
                address: String::new(),
                city: city.to_string(),
                province: String::new(),
                postal_code: String::new(),
                latitude: 0.0,
                longitude: 0.0,
                images: vec![],
            },
            published,
        )
    }

    #[test]
    fn empty_filter_matches_published_only() {
        let filter = ActivityFilter::default();
        assert!(filter.matches(&listing("Sports", "Quebec", true)));
        assert!(!filter.matches(&listing("Sports", "Quebec", false)));
    }

    #[test]
    fn category_and_city_match_case_insensitively() {
        let filter = ActivityFilter {
            category: Some("sports".to_string()),
            city: Some("QUEBEC".to_string()),
            ..ActivityFilter::default()
        };
        assert!(filter.matches(&listing("Sports", "Quebec", true)));
        assert!(!filter.matches(&listing("Music", "Quebec", true)));
        assert!(!filter.matches(&listing("Sports", "Laval", true)));
    }

    #[test]
    fn blank_filter_values_are_ignored() {
        let filter = ActivityFilter {
            city: Some("  ".to_string()),
            ..ActivityFilter::default()
        };
        assert!(filter.matches(&listing("Art", "Gatineau", true)));
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(ActivityFilter::default().page_size(), DEFAULT_PAGE_SIZE);
        let huge = ActivityFilter {
            limit: Some(10_000),
            ..ActivityFilter::default()
        };
        assert_eq!(huge.page_size(), MAX_PAGE_SIZE);
        let zero = ActivityFilter {
            limit: Some(0),
            ..ActivityFilter::default()
        };
        assert_eq!(zero.page_size(), 1);
    }
}
