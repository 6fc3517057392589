//! Listing content and its normalization.
//!
//! Clients submit an [`ActivityDraft`]: every field optional, numbers either
//! as JSON numbers or numeric strings. [`ActivityDraft::normalize`] applies
//! defaults and validation and yields the [`ActivityFields`] that are stored.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Youngest and oldest age a listing can target.
pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 99;

/// A number submitted either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Parses the input; blank text counts as absent.
    fn parse(&self, field: &str) -> Result<Option<f64>, ValidationError> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                s.parse::<f64>().map_err(|_| {
                    ValidationError::invalid_format(field, format!("'{}' is not a number", s))
                })?
            }
        };

        if !value.is_finite() {
            return Err(ValidationError::invalid_format(field, "must be a finite number"));
        }
        Ok(Some(value))
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Listing content as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub age_min: Option<NumericInput>,
    #[serde(default)]
    pub age_max: Option<NumericInput>,
    /// Price in currency units (e.g. `49.99`).
    #[serde(default)]
    pub price: Option<NumericInput>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub latitude: Option<NumericInput>,
    #[serde(default)]
    pub longitude: Option<NumericInput>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub published: Option<bool>,
}

/// Validated listing content.
///
/// # Invariants
///
/// - `title`, `description`, `category`, `city` are non-blank and trimmed
/// - `MIN_AGE <= age_min <= age_max <= MAX_AGE`
/// - `price_cents >= 0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFields {
    pub title: String,
    pub description: String,
    pub category: String,
    pub age_min: i32,
    pub age_max: i32,
    pub price_cents: i64,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub images: Vec<String>,
}

impl ActivityDraft {
    /// Validates the draft and applies defaults for omitted optional fields.
    ///
    /// Omitted or blank numbers fall back to `0`. Omitted `address`,
    /// `province` and `postal_code` become empty strings and omitted `images`
    /// an empty list. `published` is not part of the content and is left to
    /// the caller.
    pub fn normalize(&self) -> Result<ActivityFields, ValidationError> {
        let title = required_text("title", &self.title)?;
        let description = required_text("description", &self.description)?;
        let category = required_text("category", &self.category)?;
        let city = required_text("city", &self.city)?;

        let age_min = age("age_min", &self.age_min)?.unwrap_or(0);
        let age_max = age("age_max", &self.age_max)?.unwrap_or(0);
        if age_min > age_max {
            return Err(ValidationError::invalid_format(
                "age_min",
                format!("must not exceed age_max ({} > {})", age_min, age_max),
            ));
        }

        let price = number("price", &self.price)?.unwrap_or(0.0);
        if price < 0.0 {
            return Err(ValidationError::invalid_format("price", "must not be negative"));
        }
        let price_cents = (price * 100.0).round() as i64;

        let latitude = coordinate("latitude", &self.latitude, 90.0)?;
        let longitude = coordinate("longitude", &self.longitude, 180.0)?;

        let images = self
            .images
            .iter()
            .flatten()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect();

        Ok(ActivityFields {
            title,
            description,
            category,
            age_min,
            age_max,
            price_cents,
            address: optional_text(&self.address),
            city,
            province: optional_text(&self.province),
            postal_code: optional_text(&self.postal_code),
            latitude,
            longitude,
            images,
        })
    }
}

fn required_text(field: &str, value: &Option<String>) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ValidationError::empty_field(field)),
    }
}

fn optional_text(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn number(field: &str, value: &Option<NumericInput>) -> Result<Option<f64>, ValidationError> {
    Ok(value
        .as_ref()
        .map(|input| input.parse(field))
        .transpose()?
        .flatten())
}

/// A whole age within bounds, or `None` when omitted.
fn age(field: &str, value: &Option<NumericInput>) -> Result<Option<i32>, ValidationError> {
    let Some(age) = number(field, value)? else {
        return Ok(None);
    };
    if age.fract() != 0.0 {
        return Err(ValidationError::invalid_format(field, "must be a whole number"));
    }
    if age < MIN_AGE as f64 || age > MAX_AGE as f64 {
        return Err(ValidationError::out_of_range(field, MIN_AGE, MAX_AGE, age as i64));
    }
    Ok(Some(age as i32))
}

fn coordinate(field: &str, value: &Option<NumericInput>, bound: f64) -> Result<f64, ValidationError> {
    let parsed = number(field, value)?.unwrap_or(0.0);

    if parsed.abs() > bound {
        return Err(ValidationError::invalid_format(
            field,
            format!("must be between -{} and {}", bound, bound),
        ));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chess_club() -> ActivityDraft {
        ActivityDraft {
            title: Some("Chess Club".to_string()),
            description: Some("Weekly chess for beginners".to_string()),
            category: Some("Games".to_string()),
            age_min: Some(8.0.into()),
            age_max: Some(12.0.into()),
            price: Some(40.0.into()),
            city: Some("Montreal".to_string()),
            ..ActivityDraft::default()
        }
    }

    #[test]
    fn omitted_optional_fields_get_defaults() {
        let fields = chess_club().normalize().unwrap();

        assert_eq!(fields.address, "");
        assert_eq!(fields.province, "");
        assert_eq!(fields.postal_code, "");
        assert_eq!(fields.latitude, 0.0);
        assert_eq!(fields.longitude, 0.0);
        assert!(fields.images.is_empty());
        assert_eq!(fields.price_cents, 4000);
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let mut draft = chess_club();
        draft.age_min = Some("6".into());
        draft.price = Some("19.99".into());
        draft.latitude = Some("45.5".into());

        let fields = draft.normalize().unwrap();

        assert_eq!(fields.age_min, 6);
        assert_eq!(fields.price_cents, 1999);
        assert_eq!(fields.latitude, 45.5);
    }

    #[test]
    fn blank_coordinate_defaults_to_zero() {
        let mut draft = chess_club();
        draft.longitude = Some("  ".into());
        assert_eq!(draft.normalize().unwrap().longitude, 0.0);
    }

    #[test]
    fn omitted_ages_and_price_fall_back_to_zero() {
        let draft = ActivityDraft {
            title: Some("Chess Club".to_string()),
            description: Some("Weekly chess for beginners".to_string()),
            category: Some("Arte".to_string()),
            city: Some("Madrid".to_string()),
            ..ActivityDraft::default()
        };

        let fields = draft.normalize().unwrap();

        assert_eq!(fields.age_min, 0);
        assert_eq!(fields.age_max, 0);
        assert_eq!(fields.price_cents, 0);
    }

    #[test]
    fn blank_price_falls_back_to_zero() {
        let mut draft = chess_club();
        draft.price = Some("".into());
        assert_eq!(draft.normalize().unwrap().price_cents, 0);
    }

    #[test]
    fn minimum_age_without_maximum_is_rejected() {
        let mut draft = chess_club();
        draft.age_max = None;
        assert_eq!(draft.normalize().unwrap_err().field(), "age_min");
    }

    #[test]
    fn non_numeric_age_is_rejected() {
        let mut draft = chess_club();
        draft.age_max = Some("twelve".into());
        assert_eq!(draft.normalize().unwrap_err().field(), "age_max");
    }

    #[test]
    fn inverted_age_range_is_rejected() {
        let mut draft = chess_club();
        draft.age_min = Some(14.0.into());
        assert_eq!(draft.normalize().unwrap_err().field(), "age_min");
    }

    #[test]
    fn age_out_of_range_is_rejected() {
        let mut draft = chess_club();
        draft.age_max = Some(120.0.into());
        assert_eq!(
            draft.normalize().unwrap_err(),
            ValidationError::out_of_range("age_max", 0, 99, 120)
        );
    }

    #[test]
    fn fractional_age_is_rejected() {
        let mut draft = chess_club();
        draft.age_min = Some(7.5.into());
        assert!(draft.normalize().is_err());
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut draft = chess_club();
        draft.price = Some((-1.0).into());
        assert_eq!(draft.normalize().unwrap_err().field(), "price");
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut draft = chess_club();
        draft.title = Some("   ".to_string());
        assert_eq!(draft.normalize().unwrap_err(), ValidationError::empty_field("title"));
    }

    #[test]
    fn text_fields_are_trimmed_and_blank_images_dropped() {
        let mut draft = chess_club();
        draft.city = Some("  Laval ".to_string());
        draft.images = Some(vec![
            "https://cdn.example/a.jpg".to_string(),
            " ".to_string(),
            "https://cdn.example/b.jpg".to_string(),
        ]);

        let fields = draft.normalize().unwrap();

        assert_eq!(fields.city, "Laval");
        assert_eq!(
            fields.images,
            vec!["https://cdn.example/a.jpg", "https://cdn.example/b.jpg"]
        );
    }

    #[test]
    fn latitude_beyond_pole_is_rejected() {
        let mut draft = chess_club();
        draft.latitude = Some(91.0.into());
        assert_eq!(draft.normalize().unwrap_err().field(), "latitude");
    }

    #[test]
    fn draft_deserializes_mixed_numeric_json() {
        let draft: ActivityDraft = serde_json::from_value(serde_json::json!({
            "title": "Swim",
            "age_min": "4",
            "age_max": 10,
            "price": "25.50"
        }))
        .unwrap();

        assert_eq!(draft.age_min, Some(NumericInput::Text("4".to_string())));
        assert_eq!(draft.age_max, Some(NumericInput::Number(10.0)));
        assert!(draft.published.is_none());
    }
}
