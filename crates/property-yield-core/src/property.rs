use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::numeric::{lenient_decimal, lenient_text, or_default};
use crate::policy::AnalysisDefaults;
use crate::types::{Money, Percent};
use crate::PropertyYieldResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Residential property categories offered on the input form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    House,
    #[serde(rename = "Detached House")]
    DetachedHouse,
    #[serde(rename = "Semi-Detached House")]
    SemiDetachedHouse,
    #[serde(rename = "Terraced House")]
    TerracedHouse,
    #[serde(rename = "End of Terrace House")]
    EndOfTerraceHouse,
    Townhouse,
    Apartment,
    #[serde(rename = "Studio Apartment")]
    StudioApartment,
    Duplex,
    Bungalow,
    Site,
}

impl PropertyType {
    pub const ALL: [PropertyType; 11] = [
        PropertyType::House,
        PropertyType::DetachedHouse,
        PropertyType::SemiDetachedHouse,
        PropertyType::TerracedHouse,
        PropertyType::EndOfTerraceHouse,
        PropertyType::Townhouse,
        PropertyType::Apartment,
        PropertyType::StudioApartment,
        PropertyType::Duplex,
        PropertyType::Bungalow,
        PropertyType::Site,
    ];

    /// The stored value, e.g. `"Semi-Detached House"`.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::House => "House",
            PropertyType::DetachedHouse => "Detached House",
            PropertyType::SemiDetachedHouse => "Semi-Detached House",
            PropertyType::TerracedHouse => "Terraced House",
            PropertyType::EndOfTerraceHouse => "End of Terrace House",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Apartment => "Apartment",
            PropertyType::StudioApartment => "Studio Apartment",
            PropertyType::Duplex => "Duplex",
            PropertyType::Bungalow => "Bungalow",
            PropertyType::Site => "Site",
        }
    }

    /// Case-insensitive lookup by stored value.
    pub fn from_label(label: &str) -> Option<PropertyType> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
    }
}

/// One property scenario as captured by the input form.
///
/// Numeric fields are tri-state: `None` means the field was left blank, which is
/// distinct from an explicit zero for the two percent fields that carry defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyInput {
    #[serde(deserialize_with = "lenient_text")]
    pub address: String,
    /// Purchase price
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<Money>,
    /// One-off renovation spend, added to total investment
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub rehab_cost: Option<Money>,
    /// Annual LPT; normally derived from price
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub property_tax_yearly: Option<Money>,
    /// Annual premium; normally derived from floor area
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub insurance_yearly: Option<Money>,
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub management_fee_percent: Option<Percent>,
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub mortgage_monthly: Option<Money>,
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub maintenance_reserve_percent: Option<Percent>,
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub vacancy_rate: Option<Percent>,
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub other_expenses_yearly: Option<Money>,
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<Decimal>,
    #[serde(deserialize_with = "lenient_decimal", skip_serializing_if = "Option::is_none")]
    pub sq_meters: Option<Decimal>,
    #[serde(deserialize_with = "lenient_property_type", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
}

/// Every numeric field of a [`PropertyInput`] with blanks resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedInput {
    pub price: Money,
    pub monthly_rent: Money,
    pub rehab_cost: Money,
    pub property_tax_yearly: Money,
    pub insurance_yearly: Money,
    pub management_fee_percent: Percent,
    pub mortgage_monthly: Money,
    pub maintenance_reserve_percent: Percent,
    pub vacancy_rate: Percent,
    pub other_expenses_yearly: Money,
}

/// An advisory problem with one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Field name as it appears in the JSON record
    pub field: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Parsing & resolution
// ---------------------------------------------------------------------------

impl PropertyInput {
    /// Parse a record from JSON text. Invalid JSON is an error; valid JSON that is
    /// not an object yields the default record.
    pub fn from_json_str(json: &str) -> PropertyYieldResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(value))
    }

    /// Build a record from any JSON value, substituting the default record when
    /// the value is not an object.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            log::debug!("property input is not an object, using default record");
            return Self::default();
        }
        // Every field is lenient, so an object always deserializes.
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Effective property type (House when blank).
    pub fn property_type_or_default(&self) -> PropertyType {
        self.property_type.unwrap_or_default()
    }

    /// Resolve every numeric field: blank is zero, except the maintenance reserve
    /// and vacancy percentages which take their policy defaults.
    pub fn resolve(&self, defaults: &AnalysisDefaults) -> ResolvedInput {
        ResolvedInput {
            price: or_default(self.price, Decimal::ZERO),
            monthly_rent: or_default(self.monthly_rent, Decimal::ZERO),
            rehab_cost: or_default(self.rehab_cost, Decimal::ZERO),
            property_tax_yearly: or_default(self.property_tax_yearly, Decimal::ZERO),
            insurance_yearly: or_default(self.insurance_yearly, Decimal::ZERO),
            management_fee_percent: or_default(self.management_fee_percent, Decimal::ZERO),
            mortgage_monthly: or_default(self.mortgage_monthly, Decimal::ZERO),
            maintenance_reserve_percent: or_default(
                self.maintenance_reserve_percent,
                defaults.maintenance_reserve_percent,
            ),
            vacancy_rate: or_default(self.vacancy_rate, defaults.vacancy_rate),
            other_expenses_yearly: or_default(self.other_expenses_yearly, Decimal::ZERO),
        }
    }
}

fn lenient_property_type<'de, D>(deserializer: D) -> Result<Option<PropertyType>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(PropertyType::from_label))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Flag negative values. Issues are advisory: calculations still run on the record.
pub fn validate_input(input: &PropertyInput) -> Vec<FieldIssue> {
    let checks: [(&str, Option<Decimal>, &str); 9] = [
        ("monthlyRent", input.monthly_rent, "Rent cannot be negative"),
        ("rehabCost", input.rehab_cost, "Cost cannot be negative"),
        ("bedrooms", input.bedrooms, "Bedrooms cannot be negative"),
        ("bathrooms", input.bathrooms, "Bathrooms cannot be negative"),
        ("sqMeters", input.sq_meters, "Area cannot be negative"),
        ("propertyTaxYearly", input.property_tax_yearly, "Tax cannot be negative"),
        ("insuranceYearly", input.insurance_yearly, "Insurance cannot be negative"),
        ("managementFeePercent", input.management_fee_percent, "Fee cannot be negative"),
        ("mortgageMonthly", input.mortgage_monthly, "Mortgage cannot be negative"),
    ];

    let mut issues: Vec<FieldIssue> = checks
        .iter()
        .filter(|(_, value, _)| value.is_some_and(|v| v < Decimal::ZERO))
        .map(|(field, _, message)| FieldIssue {
            field: (*field).to_string(),
            message: (*message).to_string(),
        })
        .collect();

    if input.price.is_some_and(|p| p < Decimal::ZERO) {
        issues.insert(
            0,
            FieldIssue {
                field: "price".into(),
                message: "Price cannot be negative".into(),
            },
        );
    }

    for issue in &issues {
        log::warn!("{}: {}", issue.field, issue.message);
    }

    issues
}
