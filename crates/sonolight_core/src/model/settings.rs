//! Application settings, stored as the single record of `settings.json`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_company_name() -> String {
    "Ma Société".to_string()
}

fn default_quote_prefix() -> String {
    "DEV-".to_string()
}

fn default_invoice_prefix() -> String {
    "FAC-".to_string()
}

fn default_sequence() -> u32 {
    1
}

fn default_deposit_pct() -> f64 {
    30.0
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

/// Identity printed on documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default = "default_company_name")]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub siret: String,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            email: String::new(),
            address: String::new(),
            siret: String::new(),
        }
    }
}

/// Document numbering state. Per-type invoice counters live in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberingSettings {
    #[serde(default = "default_quote_prefix")]
    pub quote_prefix: String,
    /// Next quote sequence number.
    #[serde(default = "default_sequence")]
    pub sequence: u32,
    #[serde(default = "default_invoice_prefix")]
    pub invoice_prefix: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for NumberingSettings {
    fn default() -> Self {
        Self {
            quote_prefix: default_quote_prefix(),
            sequence: default_sequence(),
            invoice_prefix: default_invoice_prefix(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSettings {
    #[serde(default = "default_calendar_id")]
    pub default_calendar_id: String,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            default_calendar_id: default_calendar_id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub company: CompanyInfo,
    #[serde(default)]
    pub numbering: NumberingSettings,
    /// Default deposit share of a quote, in percent.
    #[serde(default = "default_deposit_pct")]
    pub acompte_pct: f64,
    #[serde(default)]
    pub default_terms: Option<String>,
    #[serde(default)]
    pub calendar: CalendarSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            company: CompanyInfo::default(),
            numbering: NumberingSettings::default(),
            acompte_pct: default_deposit_pct(),
            default_terms: None,
            calendar: CalendarSettings::default(),
            extra: Map::new(),
        }
    }
}
