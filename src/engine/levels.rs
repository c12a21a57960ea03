//! Symptom levels and the per-day observation / baseline records.
//!
//! Every constructor here is total: malformed input degrades to level 0
//! (or the nearest bound) instead of failing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Ordinal symptom intensity on the continuous scale [0, 3]
/// (none, mild, moderate, severe).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct SymptomLevel(f64);

impl SymptomLevel {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 3.0;

    /// Clamp a raw value into range. NaN maps to 0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Parse a category name (`none`, `mild`, `moderate`, `severe`) or a
    /// numeric string. Unrecognised text is level 0.
    pub fn parse(text: &str) -> Self {
        let key = text.trim().to_ascii_lowercase();
        match key.as_str() {
            "none" => Self(0.0),
            "mild" => Self(1.0),
            "moderate" => Self(2.0),
            "severe" => Self(3.0),
            other => other.parse::<f64>().map(Self::new).unwrap_or_default(),
        }
    }

    /// Interpret an arbitrary JSON value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(number) => number.as_f64().map(Self::new).unwrap_or_default(),
            Value::String(text) => Self::parse(text),
            Value::Bool(true) => Self(1.0),
            _ => Self::default(),
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for SymptomLevel {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for SymptomLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&raw))
    }
}

/// One day's raw input for one patient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observation {
    #[serde(alias = "sobLevel")]
    pub sob: SymptomLevel,
    #[serde(alias = "edemaLevel")]
    pub edema: SymptomLevel,
    #[serde(alias = "fatigueLevel")]
    pub fatigue: SymptomLevel,
    pub orthopnea: bool,
}

impl Observation {
    pub fn new(sob: f64, edema: f64, fatigue: f64, orthopnea: bool) -> Self {
        Self {
            sob: sob.into(),
            edema: edema.into(),
            fatigue: fatigue.into(),
            orthopnea,
        }
    }

    /// Read a loosely typed check-in record, accepting the app's
    /// `sobLevel`/`edemaLevel`/`fatigueLevel` spellings.
    pub fn from_json(record: &Value) -> Self {
        Self {
            sob: SymptomLevel::from_value(first_truthy(record, &["sob", "sobLevel"])),
            edema: SymptomLevel::from_value(first_truthy(record, &["edema", "edemaLevel"])),
            fatigue: SymptomLevel::from_value(first_truthy(record, &["fatigue", "fatigueLevel"])),
            orthopnea: truthy(first_present(record, &["orthopnea"])),
        }
    }

    /// Symptom values in scoring order: sob, edema, fatigue.
    pub fn levels(&self) -> [f64; 3] {
        [self.sob.value(), self.edema.value(), self.fatigue.value()]
    }
}

/// The patient's reference state, fixed for the length of a trajectory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Baseline {
    #[serde(alias = "baselineSob")]
    pub sob: SymptomLevel,
    #[serde(alias = "baselineEdema")]
    pub edema: SymptomLevel,
    #[serde(alias = "baselineFatigue")]
    pub fatigue: SymptomLevel,
    #[serde(alias = "baselineOrthopnea")]
    pub orthopnea: bool,
}

impl Baseline {
    pub fn new(sob: f64, edema: f64, fatigue: f64, orthopnea: bool) -> Self {
        Self {
            sob: sob.into(),
            edema: edema.into(),
            fatigue: fatigue.into(),
            orthopnea,
        }
    }

    /// Read a loosely typed baseline record (`baselineSob` etc. accepted).
    pub fn from_json(record: &Value) -> Self {
        Self {
            sob: SymptomLevel::from_value(first_truthy(record, &["sob", "baselineSob"])),
            edema: SymptomLevel::from_value(first_truthy(record, &["edema", "baselineEdema"])),
            fatigue: SymptomLevel::from_value(first_truthy(
                record,
                &["fatigue", "baselineFatigue"],
            )),
            orthopnea: truthy(first_present(record, &["orthopnea", "baselineOrthopnea"])),
        }
    }

    pub fn levels(&self) -> [f64; 3] {
        [self.sob.value(), self.edema.value(), self.fatigue.value()]
    }
}

static NULL: Value = Value::Null;

/// First key whose value is truthy; falsy values all normalise to level 0
/// so falling through to the next spelling is lossless.
fn first_truthy<'a>(record: &'a Value, keys: &[&str]) -> &'a Value {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| truthy(value))
        .unwrap_or(&NULL)
}

/// First key present at all, even when its value is falsy.
fn first_present<'a>(record: &'a Value, keys: &[&str]) -> &'a Value {
    keys.iter()
        .find_map(|key| record.get(*key))
        .unwrap_or(&NULL)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
