use crate::legacy::{self, Layout, LegacyConfig, Separator};
use crate::models::fix::{first_tokens, write_token_lines};
use crate::xml::XmlDocument;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Forecaster initials from `initials.dat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecasterInitials {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    pub header: String,
    #[serde(rename = "Initials", default)]
    pub initials: Vec<String>,
}

impl ForecasterInitials {
    pub fn contains(&self, initials: &str) -> bool {
        self.initials.iter().any(|i| i.eq_ignore_ascii_case(initials))
    }
}

impl XmlDocument for ForecasterInitials {
    const ROOT: &'static str = "ForecasterInitials";
}

impl LegacyConfig for ForecasterInitials {
    const LAYOUT: Layout = Layout::standard(Separator::Whitespace);

    fn from_items(items: Vec<Vec<String>>) -> Self {
        Self {
            header: String::new(),
            initials: first_tokens(items),
        }
    }

    fn write_body(&self, out: &mut String) {
        write_token_lines(out, &self.initials);
    }

    fn header(&self) -> &str {
        &self.header
    }

    fn set_header(&mut self, header: String) {
        self.header = header;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullInitialEntry {
    #[serde(rename = "@initials")]
    pub initials: String,
    #[serde(rename = "@name")]
    pub name: String,
}

/// Initials with forecaster names from `initials_full.dat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullInitials {
    #[serde(rename = "FullInitial", default)]
    pub entries: Vec<FullInitialEntry>,
}

impl FullInitials {
    pub fn name_for(&self, initials: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.initials.eq_ignore_ascii_case(initials))
            .map(|e| e.name.as_str())
    }
}

impl XmlDocument for FullInitials {
    const ROOT: &'static str = "FullInitials";
}

impl LegacyConfig for FullInitials {
    const LAYOUT: Layout = Layout::headerless();

    fn from_items(items: Vec<Vec<String>>) -> Self {
        let mut entries = Vec::new();
        for item in items {
            if item.len() > 1 {
                entries.push(FullInitialEntry {
                    initials: item[0].clone(),
                    name: legacy::combine(&item, 1),
                });
            } else {
                tracing::warn!("Invalid full initials entry: {}", item.join(" "));
            }
        }
        Self { entries }
    }

    fn write_body(&self, out: &mut String) {
        for entry in &self.entries {
            let _ = writeln!(out, "{:<3} {}", entry.initials, entry.name);
        }
    }
}
