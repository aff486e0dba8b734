use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    #[default]
    Csv,
    Json,
}

impl DatasetFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            DatasetFormat::Csv => "csv",
            DatasetFormat::Json => "json",
        }
    }

    /// Case-insensitive; anything other than `json` selects CSV.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            DatasetFormat::Json
        } else {
            DatasetFormat::Csv
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DatasetFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(DatasetFormat::parse_lenient(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::DatasetFormat;

    #[test]
    fn parse_lenient_is_case_insensitive() {
        assert_eq!(DatasetFormat::parse_lenient("JSON"), DatasetFormat::Json);
        assert_eq!(DatasetFormat::parse_lenient(" json "), DatasetFormat::Json);
        assert_eq!(DatasetFormat::parse_lenient("Csv"), DatasetFormat::Csv);
    }

    #[test]
    fn parse_lenient_defaults_to_csv() {
        assert_eq!(DatasetFormat::parse_lenient("xml"), DatasetFormat::Csv);
        assert_eq!(DatasetFormat::parse_lenient(""), DatasetFormat::Csv);
    }
}
