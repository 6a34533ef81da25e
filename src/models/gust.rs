use crate::legacy::{DELETION_WARNING, HeaderStyle, Layout, LegacyConfig, Separator, START_OF_DATA};
use crate::xml::XmlDocument;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Gust speed for a maximum sustained wind, both in knots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GustPairEntry {
    #[serde(rename = "@maxWind")]
    pub max_wind: i32,
    #[serde(rename = "@gust")]
    pub gust: i32,
}

/// Wind to gust table from `gust.dat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxWindGustPairs {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    pub header: String,
    #[serde(rename = "GustPair", default)]
    pub pairs: Vec<GustPairEntry>,
}

impl MaxWindGustPairs {
    /// Gust for an exact maximum wind
    pub fn gust_for(&self, max_wind: i32) -> Option<i32> {
        self.pairs
            .iter()
            .find(|pair| pair.max_wind == max_wind)
            .map(|pair| pair.gust)
    }
}

impl XmlDocument for MaxWindGustPairs {
    const ROOT: &'static str = "MaxWindGustPairs";
}

impl LegacyConfig for MaxWindGustPairs {
    const LAYOUT: Layout = Layout {
        data_start: START_OF_DATA,
        separator: Separator::Whitespace,
        header: HeaderStyle::TrimmedUntilMarker,
    };

    fn from_items(items: Vec<Vec<String>>) -> Self {
        let mut pairs = Vec::new();
        for item in items {
            let parsed = match item.as_slice() {
                [max_wind, gust, ..] => max_wind.parse::<i32>().ok().zip(gust.parse::<i32>().ok()),
                _ => None,
            };
            match parsed {
                Some((max_wind, gust)) => pairs.push(GustPairEntry { max_wind, gust }),
                None => tracing::warn!("Invalid gust pair: {}", item.join(" ")),
            }
        }
        Self {
            header: String::new(),
            pairs,
        }
    }

    fn write_body(&self, out: &mut String) {
        out.push_str(DELETION_WARNING);
        for pair in &self.pairs {
            let _ = writeln!(out, "{:>4}{:>6}", pair.max_wind, pair.gust);
        }
    }

    fn header(&self) -> &str {
        &self.header
    }

    fn set_header(&mut self, header: String) {
        self.header = header;
    }
}
