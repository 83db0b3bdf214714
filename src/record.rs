// 👤 Customer Record - one row of the customer CSV schema
// Field names map 1:1 to the fixed header set used on input and output.

use serde::{Deserialize, Serialize};

/// Header that carries the merge key
pub const ID_COLUMN: &str = "Customer Id";

/// Canonical column order, used for the output header and every output row
pub const COLUMNS: [&str; 11] = [
    "Customer Id",
    "First Name",
    "Last Name",
    "Company",
    "City",
    "Country",
    "Phone 1",
    "Phone 2",
    "Email",
    "Subscription Date",
    "Website",
];

/// Record - one customer entry
///
/// All fields are optional: an empty CSV field and a missing trailing field
/// both come back as `None`. Field declaration order matches `COLUMNS`,
/// which keeps serialized rows aligned with the fixed header.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Record {
    #[serde(rename = "Customer Id")]
    pub customer_id: Option<String>,

    #[serde(rename = "First Name")]
    pub first_name: Option<String>,

    #[serde(rename = "Last Name")]
    pub last_name: Option<String>,

    #[serde(rename = "Company")]
    pub company: Option<String>,

    #[serde(rename = "City")]
    pub city: Option<String>,

    #[serde(rename = "Country")]
    pub country: Option<String>,

    #[serde(rename = "Phone 1")]
    pub phone_1: Option<String>,

    #[serde(rename = "Phone 2")]
    pub phone_2: Option<String>,

    #[serde(rename = "Email")]
    pub email: Option<String>,

    #[serde(rename = "Subscription Date")]
    pub subscription_date: Option<String>,

    #[serde(rename = "Website")]
    pub website: Option<String>,
}

impl Record {
    /// Create a record with only the identifier set
    pub fn new(customer_id: impl Into<String>) -> Self {
        Record {
            customer_id: Some(customer_id.into()),
            ..Record::default()
        }
    }

    /// Merge key. Absent and empty identifiers are the same key: `""`.
    pub fn key(&self) -> &str {
        self.customer_id.as_deref().unwrap_or("")
    }

    pub fn has_identifier(&self) -> bool {
        !self.key().is_empty()
    }

    /// Replace every non-identifier field with the one from `newer`.
    ///
    /// The identifier is never touched, and `None` on the newer side clears
    /// the field: the newer record wins wholesale.
    pub fn overwrite_from(&mut self, newer: &Record) {
        self.first_name = newer.first_name.clone();
        self.last_name = newer.last_name.clone();
        self.company = newer.company.clone();
        self.city = newer.city.clone();
        self.country = newer.country.clone();
        self.phone_1 = newer.phone_1.clone();
        self.phone_2 = newer.phone_2.clone();
        self.email = newer.email.clone();
        self.subscription_date = newer.subscription_date.clone();
        self.website = newer.website.clone();
    }

    /// True when every non-identifier field equals the other record's
    pub fn same_fields_as(&self, other: &Record) -> bool {
        let mut candidate = self.clone();
        candidate.customer_id = other.customer_id.clone();
        candidate == *other
    }

    // Builder helpers

    pub fn with_first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn with_last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn with_company(mut self, value: impl Into<String>) -> Self {
        self.company = Some(value.into());
        self
    }

    pub fn with_city(mut self, value: impl Into<String>) -> Self {
        self.city = Some(value.into());
        self
    }

    pub fn with_country(mut self, value: impl Into<String>) -> Self {
        self.country = Some(value.into());
        self
    }

    pub fn with_email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn with_website(mut self, value: impl Into<String>) -> Self {
        self.website = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_treats_absent_and_empty_alike() {
        let mut record = Record::default();
        assert_eq!(record.key(), "");
        assert!(!record.has_identifier());

        record.customer_id = Some(String::new());
        assert_eq!(record.key(), "");

        let record = Record::new("DD37Cf93aecA6Dc");
        assert_eq!(record.key(), "DD37Cf93aecA6Dc");
        assert!(record.has_identifier());
    }

    #[test]
    fn test_overwrite_keeps_identifier() {
        let mut base = Record::new("1").with_first_name("Ann").with_city("Oslo");
        let newer = Record::new("999").with_first_name("Anna");

        base.overwrite_from(&newer);

        assert_eq!(base.customer_id.as_deref(), Some("1"));
        assert_eq!(base.first_name.as_deref(), Some("Anna"));
        // Newer record had no city, so the old one is cleared
        assert_eq!(base.city, None);
        assert!(base.same_fields_as(&newer));
    }

    #[test]
    fn test_same_fields_ignores_identifier() {
        let a = Record::new("1").with_email("a@example.com");
        let b = Record::new("2").with_email("a@example.com");
        let c = Record::new("1").with_email("c@example.com");

        assert!(a.same_fields_as(&b));
        assert!(!a.same_fields_as(&c));
    }

    #[test]
    fn test_columns_start_with_id_column() {
        assert_eq!(COLUMNS[0], ID_COLUMN);
        assert_eq!(COLUMNS.len(), 11);
    }
}
