//! Feature record types and request validation.
//!
//! [`RawFeatures`] is the loosely-typed shape of an incoming request;
//! [`RawFeatures::validate`] is the single gate through which every request
//! must pass before it reaches the preprocessor. A validated [`FeatureRecord`]
//! is immutable and carries the enum-coded categorical fields.

use crate::error::PredictError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Biological sex, as recorded in the insurance dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "female" => Some(Sex::Female),
            "male" => Some(Sex::Male),
            _ => None,
        }
    }

    /// Integer code, ordered lexicographically by label so one-hot
    /// vocabularies sort the same way the labels do.
    pub fn code(self) -> f64 {
        match self {
            Sex::Female => 0.0,
            Sex::Male => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }
}

/// Smoker flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Smoker {
    No,
    Yes,
}

impl Smoker {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "no" => Some(Smoker::No),
            "yes" => Some(Smoker::Yes),
            _ => None,
        }
    }

    pub fn code(self) -> f64 {
        match self {
            Smoker::No => 0.0,
            Smoker::Yes => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Smoker::No => "no",
            Smoker::Yes => "yes",
        }
    }
}

/// US census region of the policyholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Region {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "northeast" => Some(Region::Northeast),
            "northwest" => Some(Region::Northwest),
            "southeast" => Some(Region::Southeast),
            "southwest" => Some(Region::Southwest),
            _ => None,
        }
    }

    pub fn code(self) -> f64 {
        match self {
            Region::Northeast => 0.0,
            Region::Northwest => 1.0,
            Region::Southeast => 2.0,
            Region::Southwest => 3.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Northeast => "northeast",
            Region::Northwest => "northwest",
            Region::Southeast => "southeast",
            Region::Southwest => "southwest",
        }
    }
}

/// A validated, immutable feature record. One per request or dataset row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub age: u32,
    pub sex: Sex,
    pub bmi: f64,
    pub children: u32,
    pub smoker: Smoker,
    pub region: Region,
}

impl FeatureRecord {
    /// Raw feature row in the fixed column order the preprocessor was fitted
    /// on: `[age, bmi, children, sex, smoker, region]` with categoricals
    /// integer-coded.
    pub fn to_raw_row(&self) -> Vec<f64> {
        vec![
            self.age as f64,
            self.bmi,
            self.children as f64,
            self.sex.code(),
            self.smoker.code(),
            self.region.code(),
        ]
    }
}

/// Raw request fields before validation.
///
/// Numeric fields may arrive as JSON numbers or numeric strings; both parse.
/// All six feature fields are required; `model_name` is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeatures {
    pub age: Option<Value>,
    pub sex: Option<Value>,
    pub bmi: Option<Value>,
    pub children: Option<Value>,
    pub smoker: Option<Value>,
    pub region: Option<Value>,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl RawFeatures {
    /// Check presence, types and ranges of all six feature fields.
    ///
    /// Fails with [`PredictError::MissingField`] naming the first absent key,
    /// or [`PredictError::InvalidField`] naming the offending field and
    /// constraint. No side effects.
    pub fn validate(&self) -> Result<FeatureRecord, PredictError> {
        let age = as_integer("age", require("age", &self.age)?)?;
        let sex = as_string("sex", require("sex", &self.sex)?)?;
        let bmi = as_float("bmi", require("bmi", &self.bmi)?)?;
        let children = as_integer("children", require("children", &self.children)?)?;
        let smoker = as_string("smoker", require("smoker", &self.smoker)?)?;
        let region = as_string("region", require("region", &self.region)?)?;

        if !(0..=120).contains(&age) {
            return Err(PredictError::invalid("age", "Age must be between 0 and 120"));
        }
        if !(10.0..=60.0).contains(&bmi) {
            return Err(PredictError::invalid("bmi", "BMI must be between 10 and 60"));
        }
        if children < 0 {
            return Err(PredictError::invalid("children", "Children cannot be negative"));
        }
        let sex = Sex::parse(&sex)
            .ok_or_else(|| PredictError::invalid("sex", "Sex must be \"male\" or \"female\""))?;
        let smoker = Smoker::parse(&smoker)
            .ok_or_else(|| PredictError::invalid("smoker", "Smoker must be \"yes\" or \"no\""))?;
        let region = Region::parse(&region)
            .ok_or_else(|| PredictError::invalid("region", "Invalid region"))?;

        Ok(FeatureRecord {
            age: age as u32,
            sex,
            bmi,
            children: children as u32,
            smoker,
            region,
        })
    }
}

fn require<'a>(field: &'static str, value: &'a Option<Value>) -> Result<&'a Value, PredictError> {
    match value {
        Some(Value::Null) | None => Err(PredictError::MissingField(field.to_string())),
        Some(v) => Ok(v),
    }
}

/// Accept a JSON integer, a float with no fractional part, or a numeric
/// string.
fn as_integer(field: &'static str, value: &Value) -> Result<i64, PredictError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 {
                    return Ok(f as i64);
                }
            }
            Err(invalid_type(field, "an integer"))
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid_type(field, "an integer")),
        _ => Err(invalid_type(field, "an integer")),
    }
}

/// Accept a JSON number or a numeric string.
fn as_float(field: &'static str, value: &Value) -> Result<f64, PredictError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid_type(field, "a number")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid_type(field, "a number")),
        _ => Err(invalid_type(field, "a number")),
    }
}

fn as_string(field: &'static str, value: &Value) -> Result<String, PredictError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(invalid_type(field, "a string")),
    }
}

fn invalid_type(field: &'static str, expected: &str) -> PredictError {
    PredictError::invalid(field, format!("Invalid input: '{}' must be {}", field, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_raw() -> RawFeatures {
        serde_json::from_value(json!({
            "age": 30,
            "sex": "male",
            "bmi": 25.0,
            "children": 1,
            "smoker": "no",
            "region": "northeast"
        }))
        .unwrap()
    }

    #[test]
    fn test_validate_accepts_valid_record() {
        let record = valid_raw().validate().unwrap();
        assert_eq!(record.age, 30);
        assert_eq!(record.sex, Sex::Male);
        assert_eq!(record.region, Region::Northeast);
    }

    #[test]
    fn test_validate_accepts_numeric_strings() {
        let raw: RawFeatures = serde_json::from_value(json!({
            "age": "30",
            "sex": "female",
            "bmi": "25.5",
            "children": "2",
            "smoker": "yes",
            "region": "southwest"
        }))
        .unwrap();
        let record = raw.validate().unwrap();
        assert_eq!(record.age, 30);
        assert_eq!(record.bmi, 25.5);
        assert_eq!(record.children, 2);
    }

    #[test]
    fn test_validate_missing_field_names_key() {
        let mut raw = valid_raw();
        raw.smoker = None;
        let err = raw.validate().unwrap_err();
        assert!(matches!(err, PredictError::MissingField(ref f) if f == "smoker"));
    }

    #[test]
    fn test_validate_age_out_of_range() {
        let mut raw = valid_raw();
        raw.age = Some(json!(150));
        let err = raw.validate().unwrap_err();
        assert!(err.to_string().contains("Age"));
    }

    #[test]
    fn test_validate_bmi_out_of_range() {
        let mut raw = valid_raw();
        raw.bmi = Some(json!(8.0));
        let err = raw.validate().unwrap_err();
        assert!(err.to_string().contains("BMI"));
    }

    #[test]
    fn test_validate_negative_children() {
        let mut raw = valid_raw();
        raw.children = Some(json!(-1));
        let err = raw.validate().unwrap_err();
        assert!(err.to_string().contains("Children"));
    }

    #[test]
    fn test_validate_bad_sex() {
        let mut raw = valid_raw();
        raw.sex = Some(json!("other"));
        let err = raw.validate().unwrap_err();
        assert!(err.to_string().contains("Sex"));
    }

    #[test]
    fn test_validate_bad_region() {
        let mut raw = valid_raw();
        raw.region = Some(json!("midwest"));
        let err = raw.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid region");
    }

    #[test]
    fn test_validate_non_numeric_age() {
        let mut raw = valid_raw();
        raw.age = Some(json!("thirty"));
        let err = raw.validate().unwrap_err();
        assert!(matches!(err, PredictError::InvalidField { field: "age", .. }));
    }

    #[test]
    fn test_raw_row_column_order() {
        let record = valid_raw().validate().unwrap();
        let row = record.to_raw_row();
        assert_eq!(row, vec![30.0, 25.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_region_codes_sort_with_labels() {
        let regions = [
            Region::Northeast,
            Region::Northwest,
            Region::Southeast,
            Region::Southwest,
        ];
        let mut labels: Vec<_> = regions.iter().map(|r| r.as_str()).collect();
        labels.sort();
        for (i, region) in regions.iter().enumerate() {
            assert_eq!(region.as_str(), labels[i]);
            assert_eq!(region.code(), i as f64);
        }
    }
}
