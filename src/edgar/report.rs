use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::{EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumIter)]
#[serde(try_from = "String")]
pub enum ReportType {
    Form10K,
    Form10Q,
    Form8K,
    Form13FHR,
    Form13FNT,
    Other(String),
}

impl TryFrom<String> for ReportType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ReportType::from_str(&s)
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::Form10K => write!(f, "10-K"),
            ReportType::Form10Q => write!(f, "10-Q"),
            ReportType::Form8K => write!(f, "8-K"),
            ReportType::Form13FHR => write!(f, "13F-HR"),
            ReportType::Form13FNT => write!(f, "13F-NT"),
            ReportType::Other(s) => write!(f, "{}", s),
        }
    }
}

pub static REPORT_TYPES: Lazy<String> = Lazy::new(|| {
    ReportType::iter()
        .filter(|t| !matches!(t, ReportType::Other(_)))
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
});

impl ReportType {
    pub fn list_types() -> &'static str {
        &REPORT_TYPES
    }
}

impl FromStr for ReportType {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<ReportType, String> {
        match s.to_uppercase().as_str() {
            "10-K" => Ok(ReportType::Form10K),
            "10-Q" => Ok(ReportType::Form10Q),
            "8-K" => Ok(ReportType::Form8K),
            "13F-HR" => Ok(ReportType::Form13FHR),
            "13F-NT" => Ok(ReportType::Form13FNT),
            _ => Ok(ReportType::Other(s.to_string())),
        }
    }
}
