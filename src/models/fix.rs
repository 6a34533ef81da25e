use crate::legacy::{self, DELETION_WARNING, Layout, LegacyConfig, Separator};
use crate::xml::{self, XmlDocument};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// A fix site (e.g. `PGTW`, `KNES`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSiteEntry {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@retired")]
    pub retired: bool,
}

/// Fix sites from `fixsites.dat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSites {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    pub header: String,
    #[serde(rename = "FixSite", default)]
    pub sites: Vec<FixSiteEntry>,
}

impl FixSites {
    pub fn site(&self, name: &str) -> Option<&FixSiteEntry> {
        self.sites.iter().find(|site| site.name == name)
    }

    pub fn site_names(&self) -> Vec<&str> {
        self.sites.iter().map(|site| site.name.as_str()).collect()
    }

    /// Sites that are not retired
    pub fn available(&self) -> Vec<&FixSiteEntry> {
        self.sites.iter().filter(|site| !site.retired).collect()
    }
}

impl XmlDocument for FixSites {
    const ROOT: &'static str = "FixSites";
}

impl LegacyConfig for FixSites {
    const LAYOUT: Layout = Layout::standard(Separator::Whitespace);

    fn from_items(items: Vec<Vec<String>>) -> Self {
        let mut sites = Vec::new();
        for item in items {
            match item.as_slice() {
                [name, retired, ..] => sites.push(FixSiteEntry {
                    name: name.clone(),
                    retired: legacy::flag(retired),
                }),
                _ => tracing::warn!("Invalid fix site entry: {}", item.join(" ")),
            }
        }
        Self {
            header: String::new(),
            sites,
        }
    }

    fn write_body(&self, out: &mut String) {
        out.push_str(DELETION_WARNING);
        for site in &self.sites {
            let _ = writeln!(out, "{:<8} {}", site.name, legacy::flag_digit(site.retired));
        }
    }

    fn header(&self) -> &str {
        &self.header
    }

    fn set_header(&mut self, header: String) {
        self.header = header;
    }
}

/// A fix type (e.g. `DVTS`, `SSMI`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixTypeEntry {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@retired")]
    pub retired: bool,
}

/// Fix types from `fixtypes.dat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixTypes {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    pub header: String,
    #[serde(rename = "FixType", default)]
    pub types: Vec<FixTypeEntry>,
}

impl FixTypes {
    pub fn fix_type(&self, name: &str) -> Option<&FixTypeEntry> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn available(&self) -> Vec<&FixTypeEntry> {
        self.types.iter().filter(|t| !t.retired).collect()
    }
}

impl XmlDocument for FixTypes {
    const ROOT: &'static str = "FixTypes";
}

impl LegacyConfig for FixTypes {
    const LAYOUT: Layout = Layout::standard(Separator::Whitespace);

    fn from_items(items: Vec<Vec<String>>) -> Self {
        let mut types = Vec::new();
        for item in items {
            match item.as_slice() {
                [name, retired, ..] => types.push(FixTypeEntry {
                    name: name.clone(),
                    retired: legacy::flag(retired),
                }),
                _ => tracing::warn!("Invalid fix type entry: {}", item.join(" ")),
            }
        }
        Self {
            header: String::new(),
            types,
        }
    }

    fn write_body(&self, out: &mut String) {
        out.push_str(DELETION_WARNING);
        for entry in &self.types {
            let _ = writeln!(out, "{:<8} {}", entry.name, legacy::flag_digit(entry.retired));
        }
    }

    fn header(&self) -> &str {
        &self.header
    }

    fn set_header(&mut self, header: String) {
        self.header = header;
    }
}

/// Microwave satellite types from `microsattypes.dat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixMicrowaveSatelliteTypes {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    pub header: String,
    #[serde(rename = "Satellite", default)]
    pub satellites: Vec<String>,
}

impl XmlDocument for FixMicrowaveSatelliteTypes {
    const ROOT: &'static str = "FixMicrowaveSatelliteTypes";
}

impl LegacyConfig for FixMicrowaveSatelliteTypes {
    const LAYOUT: Layout = Layout::standard(Separator::Whitespace);

    fn from_items(items: Vec<Vec<String>>) -> Self {
        Self {
            header: String::new(),
            satellites: first_tokens(items),
        }
    }

    fn write_body(&self, out: &mut String) {
        write_token_lines(out, &self.satellites);
    }

    fn header(&self) -> &str {
        &self.header
    }

    fn set_header(&mut self, header: String) {
        self.header = header;
    }
}

/// Scatterometer satellite types from `scatsattypes.dat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixScatSatTypes {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    pub header: String,
    #[serde(rename = "Satellite", default)]
    pub satellites: Vec<String>,
}

impl XmlDocument for FixScatSatTypes {
    const ROOT: &'static str = "FixScatSatTypes";
}

impl LegacyConfig for FixScatSatTypes {
    const LAYOUT: Layout = Layout::standard(Separator::Whitespace);

    fn from_items(items: Vec<Vec<String>>) -> Self {
        Self {
            header: String::new(),
            satellites: first_tokens(items),
        }
    }

    fn write_body(&self, out: &mut String) {
        write_token_lines(out, &self.satellites);
    }

    fn header(&self) -> &str {
        &self.header
    }

    fn set_header(&mut self, header: String) {
        self.header = header;
    }
}

/// First token of every row
pub(crate) fn first_tokens(items: Vec<Vec<String>>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| item.into_iter().next())
        .collect()
}

pub(crate) fn write_token_lines(out: &mut String, tokens: &[String]) {
    out.push_str(DELETION_WARNING);
    for token in tokens {
        out.push_str(token);
        out.push('\n');
    }
}

/// Error weights for one fix type at one site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixErrorEntry {
    #[serde(rename = "@type")]
    pub fix_type: String,
    #[serde(rename = "@site")]
    pub site: String,
    #[serde(rename = "@positWeights", with = "xml::int_triple")]
    pub posit_weights: [i32; 3],
    #[serde(rename = "@intensityWeights", with = "xml::int_triple")]
    pub intensity_weights: [i32; 3],
    #[serde(rename = "@radiiWeights", with = "xml::int_triple")]
    pub radii_weights: [i32; 3],
    #[serde(rename = "@research")]
    pub research: bool,
}

/// Lines written between the deletion warning and the entries of `fixerror.prefs`
const FIX_ERROR_PREAMBLE: [&str; 4] = [
    "track_fitting_algorithm: least_squares  (deprecated for now, set in GUI)",
    "int___fitting_algorithm: least_squares  (deprecated for now, set in GUI)",
    "rad___fitting_algorithm: least_squares  (deprecated for now, set in GUI)",
    "type_site posit_weights  intens_weights  radii_weights  research_fix",
];

/// Fix error weights from `fixerror.prefs`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixError {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    pub header: String,
    #[serde(rename = "FixErrorEntry", default)]
    pub entries: Vec<FixErrorEntry>,
}

impl FixError {
    pub fn entry(&self, fix_type: &str, site: &str) -> Option<&FixErrorEntry> {
        self.entries
            .iter()
            .find(|e| e.fix_type == fix_type && e.site == site)
    }

    /// Distinct sites of non-research entries, in file order
    pub fn available_fix_sites(&self) -> Vec<&str> {
        let mut sites: Vec<&str> = Vec::new();
        for entry in self.entries.iter().filter(|e| !e.research) {
            if !sites.contains(&entry.site.as_str()) {
                sites.push(&entry.site);
            }
        }
        sites
    }

    fn parse_entry(item: &[String]) -> Option<FixErrorEntry> {
        let mut numbers = [0i32; 10];
        for (slot, token) in numbers.iter_mut().zip(&item[2..12]) {
            *slot = token.parse().ok()?;
        }
        Some(FixErrorEntry {
            fix_type: item[0].clone(),
            site: item[1].clone(),
            posit_weights: [numbers[0], numbers[1], numbers[2]],
            intensity_weights: [numbers[3], numbers[4], numbers[5]],
            radii_weights: [numbers[6], numbers[7], numbers[8]],
            research: numbers[9] != 0,
        })
    }
}

impl XmlDocument for FixError {
    const ROOT: &'static str = "FixError";
}

impl LegacyConfig for FixError {
    const LAYOUT: Layout = Layout::standard(Separator::Whitespace);

    fn from_items(items: Vec<Vec<String>>) -> Self {
        let mut entries = Vec::new();
        for item in items {
            if item.len() > 11 {
                match Self::parse_entry(&item) {
                    Some(entry) => entries.push(entry),
                    None => tracing::warn!("Invalid fix error weights: {}", item.join(" ")),
                }
            } else if FIX_ERROR_PREAMBLE
                .iter()
                .any(|line| line.split(' ').next().is_some_and(|key| item[0] == key))
            {
                continue;
            } else {
                tracing::warn!("Invalid fix error entry: {}", item.join(" "));
            }
        }
        Self {
            header: String::new(),
            entries,
        }
    }

    fn write_body(&self, out: &mut String) {
        out.push_str(DELETION_WARNING);
        for line in FIX_ERROR_PREAMBLE {
            out.push_str(line);
            out.push('\n');
        }
        for e in &self.entries {
            let [p0, p1, p2] = e.posit_weights;
            let [i0, i1, i2] = e.intensity_weights;
            let [r0, r1, r2] = e.radii_weights;
            let _ = writeln!(
                out,
                "{:>4}{:>5}{p0:>4}{p1:>4}{p2:>4}{i0:>7}{i1:>4}{i2:>4}{r0:>8}{r1:>4}{r2:>4}{:>6}",
                e.fix_type,
                e.site,
                legacy::flag_digit(e.research)
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
