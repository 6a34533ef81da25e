//! Storm states and ATCF sites. Both only exist as XML.

use crate::xml::XmlDocument;
use serde::{Deserialize, Serialize};

/// A storm classification (e.g. `TS`, `HU`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StormStateEntry {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@retired", default)]
    pub retired: bool,
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@description", default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StormStates {
    #[serde(rename = "StormState", default)]
    pub states: Vec<StormStateEntry>,
}

impl StormStates {
    pub fn storm_state_by_id(&self, id: &str) -> Option<&StormStateEntry> {
        self.states.iter().find(|state| state.id == id)
    }

    pub fn available(&self) -> Vec<&StormStateEntry> {
        self.states.iter().filter(|state| !state.retired).collect()
    }
}

impl XmlDocument for StormStates {
    const ROOT: &'static str = "StormStates";
}

/// An ATCF forecast site and the office that issues for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtcfSiteEntry {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@wfoId")]
    pub wfo_id: String,
    #[serde(rename = "@issueByOffice", default)]
    pub issue_by_office: String,
    #[serde(rename = "@name", default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtcfSites {
    #[serde(rename = "AtcfSite", default)]
    pub sites: Vec<AtcfSiteEntry>,
}

impl AtcfSites {
    pub fn site_by_id(&self, id: &str) -> Option<&AtcfSiteEntry> {
        self.sites.iter().find(|site| site.id == id)
    }

    pub fn site_by_wfo(&self, wfo_id: &str) -> Option<&AtcfSiteEntry> {
        self.sites.iter().find(|site| site.wfo_id == wfo_id)
    }
}

impl XmlDocument for AtcfSites {
    const ROOT: &'static str = "AtcfSites";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    #[test]
    fn test_storm_states_from_xml() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<StormStates>
    <StormState id="TS" name="Tropical Storm" description="34-63 kt"/>
    <StormState id="XX" retired="true" name="Unknown"/>
</StormStates>"#;
        let states: StormStates = xml::from_xml(doc).unwrap();
        assert_eq!(states.storm_state_by_id("TS").unwrap().name, "Tropical Storm");
        assert_eq!(states.available().len(), 1);
        assert!(states.storm_state_by_id("HU").is_none());
    }

    #[test]
    fn test_atcf_sites_from_xml() {
        let doc = r#"<AtcfSites>
    <AtcfSite id="NHC" wfoId="KNHC" issueByOffice="NHC" name="National Hurricane Center"/>
    <AtcfSite id="CPHC" wfoId="PHFO" issueByOffice="HFO" name="Central Pacific Hurricane Center"/>
</AtcfSites>"#;
        let sites: AtcfSites = xml::from_xml(doc).unwrap();
        assert_eq!(sites.site_by_id("CPHC").unwrap().wfo_id, "PHFO");
        assert_eq!(sites.site_by_wfo("KNHC").unwrap().id, "NHC");
    }
}
