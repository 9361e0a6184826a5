//! Typed service details.
//!
//! Reservations coming from the backend carry a free-form JSON record whose
//! shape depends on the service. [`ServiceDetails`] collapses those records
//! into one variant per known shape. When a record matches several shapes,
//! the first one in this order wins: pack, mattress, seats, rooms, surface,
//! surface type, size.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Cleaning cadence attached to surface-based services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Weekly,
    Monthly,
    OneOff,
}

impl Frequency {
    /// Anything other than `weekly` or `monthly` is treated as a one-off visit.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            _ => Frequency::OneOff,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Weekly => "Hebdomadaire",
            Frequency::Monthly => "Mensuel",
            Frequency::OneOff => "Ponctuel",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One variant per known service detail shape.
///
/// Serializes with a `kind` tag. Deserializing accepts either that tagged form
/// or an untyped backend record, which goes through [`ServiceDetails::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(remote = "Self", tag = "kind", rename_all = "snake_case")]
pub enum ServiceDetails {
    Pack {
        pack: String,
    },
    Mattress {
        size: String,
        count: u32,
    },
    Seats {
        seats: String,
    },
    Rooms {
        rooms: String,
        deep_cleaning: bool,
        window_cleaning: bool,
    },
    Surface {
        surface: String,
        frequency: Option<Frequency>,
    },
    SurfaceType {
        surface_type: String,
    },
    Size {
        size: String,
    },
    #[default]
    Unspecified,
}

impl ServiceDetails {
    /// Reads an untyped details record (camelCase keys, as stored by the backend).
    pub fn from_value(value: &Value) -> Self {
        let Some(record) = value.as_object() else {
            return ServiceDetails::Unspecified;
        };
        let text = |key: &str| record.get(key).and_then(present_text);

        if let Some(pack) = text("pack") {
            return ServiceDetails::Pack { pack };
        }
        if let Some(size) = text("matressSize") {
            let count = record
                .get("numberOfMatresses")
                .and_then(present_count)
                .unwrap_or(1);
            return ServiceDetails::Mattress { size, count };
        }
        if let Some(seats) = text("numberOfSeats") {
            return ServiceDetails::Seats { seats };
        }
        if let Some(rooms) = text("numberOfRooms") {
            return ServiceDetails::Rooms {
                rooms,
                deep_cleaning: record.get("hasDeepCleaning").is_some_and(is_truthy),
                window_cleaning: record.get("hasWindowCleaning").is_some_and(is_truthy),
            };
        }
        if let Some(surface) = text("surface") {
            let frequency = text("frequency").map(|raw| Frequency::parse(&raw));
            return ServiceDetails::Surface { surface, frequency };
        }
        if let Some(surface_type) = text("surfaceType") {
            return ServiceDetails::SurfaceType { surface_type };
        }
        if let Some(size) = text("size") {
            return ServiceDetails::Size { size };
        }
        ServiceDetails::Unspecified
    }

    /// Builds details from wizard sub-theme answers, which arrive as strings.
    pub fn from_answers<'a, I>(answers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let record: Map<String, Value> = answers
            .into_iter()
            .map(|(key, raw)| (key.to_string(), answer_value(raw)))
            .collect();
        Self::from_value(&Value::Object(record))
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, ServiceDetails::Unspecified)
    }
}

impl Serialize for ServiceDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ServiceDetails::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for ServiceDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.get("kind").is_some_and(Value::is_string) {
            ServiceDetails::deserialize(value).map_err(de::Error::custom)
        } else {
            Ok(ServiceDetails::from_value(&value))
        }
    }
}

fn answer_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    if let Some(number) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(number);
    }
    Value::String(trimmed.to_string())
}

/// Mirrors the loose truthiness used by the web front end.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn present_text(value: &Value) -> Option<String> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number_text(number)),
        other => Some(other.to_string()),
    }
}

/// Whole floats print without a fractional part: `120.0` reads as `120`.
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e15 => {
            format!("{}", float as i64)
        }
        _ => number.to_string(),
    }
}

/// Whole, positive counts only. A fractional count such as `2.5` is not a
/// number of mattresses and falls back to the default of one.
fn present_count(value: &Value) -> Option<u32> {
    if !is_truthy(value) {
        return None;
    }
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|float| float.fract() == 0.0 && *float > 0.0)
                    .map(|float| float as u64)
            })
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
