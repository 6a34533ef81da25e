use crate::legacy::{self, DELETION_WARNING, HeaderStyle, Layout, LegacyConfig, Separator};
use crate::xml::XmlDocument;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Column line that starts the data section of `techlist.dat`
pub const TECHLIST_COLUMNS: &str =
    "NUM TECH ERRS RETIRED COLOR DEFAULTS INT-DEFS RADII-DEFS LONG-NAME";

/// One objective aid technique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveAidTechEntry {
    #[serde(rename = "@num")]
    pub num: i32,
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@errs")]
    pub errs: bool,
    #[serde(rename = "@retired")]
    pub retired: bool,
    #[serde(rename = "@color")]
    pub color: i32,
    #[serde(rename = "@aidDflt")]
    pub aid_dflt: bool,
    #[serde(rename = "@intDflt")]
    pub int_dflt: bool,
    #[serde(rename = "@radiiDflt")]
    pub radii_dflt: bool,
    #[serde(rename = "@description")]
    pub description: String,
}

/// Which default flag of a technique to select on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechDefault {
    Track,
    Intensity,
    Radii,
    Errors,
}

/// Objective aid techniques from `techlist.dat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveAidTechniques {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    pub header: String,
    #[serde(rename = "Technique", default)]
    pub techniques: Vec<ObjectiveAidTechEntry>,
}

impl ObjectiveAidTechniques {
    pub fn technique(&self, name: &str) -> Option<&ObjectiveAidTechEntry> {
        self.techniques.iter().find(|tech| tech.name == name)
    }

    /// Non-retired techniques keyed by name, in file order
    pub fn available(&self) -> IndexMap<&str, &ObjectiveAidTechEntry> {
        self.techniques
            .iter()
            .filter(|tech| !tech.retired)
            .map(|tech| (tech.name.as_str(), tech))
            .collect()
    }

    /// Available techniques with the given default flag set
    pub fn defaults(&self, kind: TechDefault) -> IndexMap<&str, &ObjectiveAidTechEntry> {
        self.available()
            .into_iter()
            .filter(|(_, tech)| match kind {
                TechDefault::Track => tech.aid_dflt,
                TechDefault::Intensity => tech.int_dflt,
                TechDefault::Radii => tech.radii_dflt,
                TechDefault::Errors => tech.errs,
            })
            .collect()
    }

    fn parse_entry(item: &[String]) -> Option<ObjectiveAidTechEntry> {
        let number = |idx: usize| item[idx].parse::<i32>().ok();
        Some(ObjectiveAidTechEntry {
            num: number(0)?,
            name: item[1].clone(),
            errs: legacy::flag(&item[2]),
            retired: legacy::flag(&item[3]),
            color: number(4)?,
            aid_dflt: legacy::flag(&item[5]),
            int_dflt: legacy::flag(&item[6]),
            radii_dflt: legacy::flag(&item[7]),
            description: legacy::combine(item, 8),
        })
    }
}

impl XmlDocument for ObjectiveAidTechniques {
    const ROOT: &'static str = "ObjectiveAidTechniques";
}

impl LegacyConfig for ObjectiveAidTechniques {
    const LAYOUT: Layout = Layout {
        data_start: "NUM",
        separator: Separator::Whitespace,
        header: HeaderStyle::UntilDataStart,
    };

    fn from_items(items: Vec<Vec<String>>) -> Self {
        let mut techniques = Vec::new();
        for item in items {
            let parsed = if item.len() > 7 {
                Self::parse_entry(&item)
            } else {
                None
            };
            match parsed {
                Some(tech) => techniques.push(tech),
                None => tracing::warn!("Invalid technique entry: {}", item.join(" ")),
            }
        }
        Self {
            header: String::new(),
            techniques,
        }
    }

    fn write_body(&self, out: &mut String) {
        out.push_str(TECHLIST_COLUMNS);
        out.push('\n');
        for t in &self.techniques {
            let _ = writeln!(
                out,
                " {:02} {:<6}{:<7}{:<5}{:>2}      {:<9}{:<10}{:<7}{}",
                t.num,
                t.name,
                legacy::flag_digit(t.errs),
                legacy::flag_digit(t.retired),
                t.color,
                legacy::flag_digit(t.aid_dflt),
                legacy::flag_digit(t.int_dflt),
                legacy::flag_digit(t.radii_dflt),
                t.description
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

/// A default objective aid and its description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultObjAidTechEntry {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@description")]
    pub description: String,
}

/// Default aids from `default_aids.dat`, also the shape of `profile/<name>.aids`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultObjAidTechniques {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    pub header: String,
    #[serde(rename = "DefaultTechnique", default)]
    pub techniques: Vec<DefaultObjAidTechEntry>,
}

impl DefaultObjAidTechniques {
    pub fn technique(&self, name: &str) -> Option<&DefaultObjAidTechEntry> {
        self.techniques.iter().find(|tech| tech.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.techniques.iter().map(|tech| tech.name.as_str()).collect()
    }
}

impl XmlDocument for DefaultObjAidTechniques {
    const ROOT: &'static str = "DefaultObjAidTechniques";
}

impl LegacyConfig for DefaultObjAidTechniques {
    const LAYOUT: Layout = Layout::standard(Separator::Whitespace);

    fn from_items(items: Vec<Vec<String>>) -> Self {
        let mut techniques = Vec::new();
        for item in items {
            if item.len() > 1 {
                techniques.push(DefaultObjAidTechEntry {
                    name: item[0].clone(),
                    description: legacy::combine(&item, 1),
                });
            } else {
                tracing::warn!("Invalid default aid entry: {}", item.join(" "));
            }
        }
        Self {
            header: String::new(),
            techniques,
        }
    }

    fn write_body(&self, out: &mut String) {
        out.push_str(DELETION_WARNING);
        for tech in &self.techniques {
            let _ = writeln!(out, "{:<7} {}", tech.name, tech.description);
        }
    }

    fn header(&self) -> &str {
        &self.header
    }

    fn set_header(&mut self, header: String) {
        self.header = header;
    }
}
