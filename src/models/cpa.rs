use crate::legacy::{self, HeaderStyle, Layout, LegacyConfig, Separator};
use crate::xml::XmlDocument;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// A closest-point-of-approach destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpaLocationEntry {
    #[serde(rename = "@lat")]
    pub lat: f32,
    #[serde(rename = "@lon")]
    pub lon: f32,
    #[serde(rename = "@destination")]
    pub destination: String,
    #[serde(rename = "@priority")]
    pub priority: i32,
}

/// CPA locations from `cpa.loc`, keyed by destination in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CpaLocationsDocument", into = "CpaLocationsDocument")]
pub struct CpaLocations {
    pub header: String,
    pub locations: IndexMap<String, CpaLocationEntry>,
}

/// XML shape of [`CpaLocations`]
#[derive(Serialize, Deserialize)]
struct CpaLocationsDocument {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    header: String,
    #[serde(rename = "CpaLocation", default)]
    locations: Vec<CpaLocationEntry>,
}

impl From<CpaLocationsDocument> for CpaLocations {
    fn from(doc: CpaLocationsDocument) -> Self {
        Self {
            header: doc.header,
            locations: doc
                .locations
                .into_iter()
                .map(|entry| (entry.destination.clone(), entry))
                .collect(),
        }
    }
}

impl From<CpaLocations> for CpaLocationsDocument {
    fn from(cpa: CpaLocations) -> Self {
        Self {
            header: cpa.header,
            locations: cpa.locations.into_values().collect(),
        }
    }
}

impl CpaLocations {
    pub fn location(&self, destination: &str) -> Option<&CpaLocationEntry> {
        self.locations.get(destination)
    }

    /// Insert or replace a location, keeping the position of an existing key
    pub fn insert(&mut self, entry: CpaLocationEntry) {
        self.locations.insert(entry.destination.clone(), entry);
    }

    pub fn destinations(&self) -> Vec<&str> {
        self.locations.keys().map(String::as_str).collect()
    }

    fn parse_entry(item: &[String]) -> Option<CpaLocationEntry> {
        Some(CpaLocationEntry {
            lat: legacy::parse_lat_lon(&item[0])?,
            lon: legacy::parse_lat_lon(&item[1])?,
            destination: item[2].clone(),
            priority: item[3].parse().ok()?,
        })
    }
}

impl XmlDocument for CpaLocations {
    const ROOT: &'static str = "CpaLocations";
}

impl LegacyConfig for CpaLocations {
    const LAYOUT: Layout = Layout {
        data_start: "",
        separator: Separator::Whitespace,
        header: HeaderStyle::LeadingComments,
    };

    fn from_items(items: Vec<Vec<String>>) -> Self {
        let mut cpa = Self::default();
        for item in items {
            let parsed = if item.len() > 3 {
                Self::parse_entry(&item)
            } else {
                None
            };
            match parsed {
                Some(entry) => cpa.insert(entry),
                None => tracing::warn!("Invalid CPA location entry: {}", item.join(" ")),
            }
        }
        cpa
    }

    fn write_body(&self, out: &mut String) {
        for entry in self.locations.values() {
            let _ = writeln!(
                out,
                "{:<7}{:<8}{:<23} {}",
                legacy::format_lat(entry.lat),
                legacy::format_lon(entry.lon),
                entry.destination,
                entry.priority
            );
        }
    }

    fn header(&self) -> &str {
        &self.header
    }

    fn set_header(&mut self, header: String) {
        self.header = header;
    }
}
