use crate::xml::XmlDocument;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const SEPARATOR_DASH: &str = "-------------";

/// Command bound to entries that have no action yet
pub const SIDEBAR_DEFAULT_COMMAND: &str = "com.raytheon.viz.ui.actions.notImplemented";

/// Sidebar entries in their default order
pub const SIDEBAR_DEFAULT_ENTRIES: &[&str] = &[
    "select storm",
    "clear ATCF display",
    SEPARATOR_DASH,
    "best tracks",
    "b-track 34-kt radii",
    "b-track 50-kt radii",
    "b-track 64-kt radii",
    "b-track RMW",
    "b-track ROCI",
    "b-track intensities",
    "b-track labels",
    SEPARATOR_DASH,
    "fixes",
    "fix wind radii",
    "fix autolabel",
    "fix confidences",
    SEPARATOR_DASH,
    "obj aids",
    "aid intensities",
    "aid 34-kt radii",
    "aid 50-kt radii",
    "aid 64-kt radii",
    "GPCE",
    "GPCE climatology",
    "GPCE-AX",
    SEPARATOR_DASH,
    "forecast track",
    "forecast wind radii",
    "forecast seas radii",
    "cumul wind probs",
    "forecast labels",
    SEPARATOR_DASH,
    "prepare compute data",
    "list compute data",
    "send compute data",
    "NWP model priority",
    "retrieve PRIMARY guidance",
    "run your own consensus",
    "list latest consensus run",
    SEPARATOR_DASH,
    "chart/storm titles",
    "logo-thumbnail",
    "34kt wind probs at sites",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarMenuEntry {
    #[serde(rename = "@show")]
    pub show: bool,
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@alias")]
    pub alias: String,
    #[serde(rename = "@command")]
    pub command: String,
}

impl SidebarMenuEntry {
    pub fn is_separator(&self) -> bool {
        self.name == SEPARATOR_DASH
    }
}

/// Sidebar menu layout from `sidebar_selections.xml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarMenuSelection {
    #[serde(rename = "Entry", default)]
    pub entries: Vec<SidebarMenuEntry>,
}

impl SidebarMenuSelection {
    /// Every default entry shown, named and aliased the same
    pub fn default_selection() -> Self {
        Self {
            entries: SIDEBAR_DEFAULT_ENTRIES
                .iter()
                .map(|name| SidebarMenuEntry {
                    show: true,
                    name: name.to_string(),
                    alias: name.to_string(),
                    command: SIDEBAR_DEFAULT_COMMAND.to_string(),
                })
                .collect(),
        }
    }

    pub fn entry_by_name(&self, name: &str) -> Option<&SidebarMenuEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entry_by_alias(&self, alias: &str) -> Option<&SidebarMenuEntry> {
        self.entries.iter().find(|entry| entry.alias == alias)
    }

    /// Only the entries marked shown
    pub fn available(&self) -> Self {
        Self {
            entries: self.entries.iter().filter(|e| e.show).cloned().collect(),
        }
    }

    /// Legacy `sidebarMenuSelection.dat` rendering
    pub fn to_file_string(&self) -> String {
        let mut out = String::from("DO NOT DELETE THE NEXT TWO LINES -- ATCF depends on them.\n");
        out.push_str("START_OF_DATA:\n");
        for entry in &self.entries {
            let _ = writeln!(out, "{}       # {}", u8::from(entry.show), entry.name);
        }
        out
    }
}

impl XmlDocument for SidebarMenuSelection {
    const ROOT: &'static str = "SidebarMenuSelection";
}
