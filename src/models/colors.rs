use crate::legacy::{DELETION_WARNING, Layout, LegacyConfig, Separator};
use crate::models::fix::{first_tokens, write_token_lines};
use crate::xml::{self, XmlDocument};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// An RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    /// Parse `rgb:rr/gg/bb` or `rrggbb` hex color specs
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        let (red, green, blue) = match spec.strip_prefix("rgb:") {
            Some(rest) => {
                let mut parts = rest.split('/');
                let triple = (parts.next()?, parts.next()?, parts.next()?);
                if parts.next().is_some() {
                    return None;
                }
                triple
            }
            None if spec.len() == 6 && spec.is_ascii() => (&spec[0..2], &spec[2..4], &spec[4..6]),
            None => return None,
        };
        Some(Self {
            red: u8::from_str_radix(red, 16).ok()?,
            green: u8::from_str_radix(green, 16).ok()?,
            blue: u8::from_str_radix(blue, 16).ok()?,
        })
    }
}

/// Custom colors from `colortable.dat`, referenced by index from the color selections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtcfCustomColors {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    pub header: String,
    #[serde(rename = "Color", default)]
    pub colors: Vec<String>,
}

impl AtcfCustomColors {
    /// Color at a zero-based index, `None` when out of range or unparseable
    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).and_then(|spec| Rgb::parse(spec))
    }
}

impl XmlDocument for AtcfCustomColors {
    const ROOT: &'static str = "AtcfCustomColors";
}

impl LegacyConfig for AtcfCustomColors {
    const LAYOUT: Layout = Layout::standard(Separator::Whitespace);

    fn from_items(items: Vec<Vec<String>>) -> Self {
        let colors = first_tokens(items)
            .into_iter()
            .filter(|spec| {
                let valid = spec.len() > 5;
                if !valid {
                    tracing::warn!("Invalid custom color: {spec}");
                }
                valid
            })
            .collect();
        Self {
            header: String::new(),
            colors,
        }
    }

    fn write_body(&self, out: &mut String) {
        write_token_lines(out, &self.colors);
    }

    fn header(&self) -> &str {
        &self.header
    }

    fn set_header(&mut self, header: String) {
        self.header = header;
    }
}

/// Named groups within `colsel.dat`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSelectionGroup {
    MapDisplay,
    PrinterColors,
    PlotterColors,
}

impl ColorSelectionGroup {
    pub const ALL: [ColorSelectionGroup; 3] = [
        ColorSelectionGroup::MapDisplay,
        ColorSelectionGroup::PrinterColors,
        ColorSelectionGroup::PlotterColors,
    ];

    /// Group marker line in the legacy file
    pub fn marker(self) -> &'static str {
        match self {
            ColorSelectionGroup::MapDisplay => "MAPDSPLY",
            ColorSelectionGroup::PrinterColors => "PRINTER_COLORS",
            ColorSelectionGroup::PlotterColors => "PLOTTER_COLORS",
        }
    }

    fn from_marker(marker: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.marker() == marker)
    }
}

/// A named display element and its color indexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSelectionEntry {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@colorIndex", with = "xml::int_list")]
    pub color_index: Vec<i32>,
}

/// Color selections from `colsel.dat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtcfColorSelections {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    pub header: String,
    #[serde(rename = "MapColor", default)]
    pub map_colors: Vec<ColorSelectionEntry>,
    #[serde(rename = "PrinterColor", default)]
    pub printer_colors: Vec<ColorSelectionEntry>,
    #[serde(rename = "PlotterColor", default)]
    pub plotter_colors: Vec<ColorSelectionEntry>,
}

impl AtcfColorSelections {
    pub fn group(&self, group: ColorSelectionGroup) -> &[ColorSelectionEntry] {
        match group {
            ColorSelectionGroup::MapDisplay => &self.map_colors,
            ColorSelectionGroup::PrinterColors => &self.printer_colors,
            ColorSelectionGroup::PlotterColors => &self.plotter_colors,
        }
    }

    fn group_mut(&mut self, group: ColorSelectionGroup) -> &mut Vec<ColorSelectionEntry> {
        match group {
            ColorSelectionGroup::MapDisplay => &mut self.map_colors,
            ColorSelectionGroup::PrinterColors => &mut self.printer_colors,
            ColorSelectionGroup::PlotterColors => &mut self.plotter_colors,
        }
    }

    pub fn selection(&self, group: ColorSelectionGroup, name: &str) -> Option<&ColorSelectionEntry> {
        self.group(group).iter().find(|entry| entry.name == name)
    }

    pub fn map_color_selection(&self, name: &str) -> Option<&ColorSelectionEntry> {
        self.selection(ColorSelectionGroup::MapDisplay, name)
    }

    pub fn printer_color_selection(&self, name: &str) -> Option<&ColorSelectionEntry> {
        self.selection(ColorSelectionGroup::PrinterColors, name)
    }

    pub fn plotter_color_selection(&self, name: &str) -> Option<&ColorSelectionEntry> {
        self.selection(ColorSelectionGroup::PlotterColors, name)
    }

    fn parse_indexes(name: &str, raw: &str) -> Vec<i32> {
        raw.split_whitespace()
            .map(|token| {
                token.parse().unwrap_or_else(|_| {
                    tracing::warn!("Invalid color index {token:?} for {name}");
                    0
                })
            })
            .collect()
    }
}

impl XmlDocument for AtcfColorSelections {
    const ROOT: &'static str = "AtcfColorSelections";
}

impl LegacyConfig for AtcfColorSelections {
    const LAYOUT: Layout = Layout::standard(Separator::Colon);

    fn from_items(items: Vec<Vec<String>>) -> Self {
        let mut selections = Self::default();
        let mut current: Option<ColorSelectionGroup> = None;

        for item in items {
            if let Some(group) = ColorSelectionGroup::from_marker(item[0].trim()) {
                current = Some(group);
                continue;
            }
            let Some(group) = current else {
                tracing::warn!("Color selection outside of a group: {}", item.join(":"));
                continue;
            };
            match item.as_slice() {
                [name, indexes, ..] => {
                    let name = name.trim().to_string();
                    let color_index = Self::parse_indexes(&name, indexes);
                    selections
                        .group_mut(group)
                        .push(ColorSelectionEntry { name, color_index });
                }
                _ => tracing::warn!("Invalid color selection entry: {}", item.join(":")),
            }
        }
        selections
    }

    fn write_body(&self, out: &mut String) {
        out.push_str(DELETION_WARNING);
        for group in ColorSelectionGroup::ALL {
            out.push_str(group.marker());
            out.push('\n');
            for entry in self.group(group) {
                let _ = write!(out, "{:<13}:", entry.name);
                for index in &entry.color_index {
                    let _ = write!(out, "{index:>2} ");
                }
                out.push('\n');
            }
        }
    }

    fn header(&self) -> &str {
        &self.header
    }

    fn set_header(&mut self, header: String) {
        self.header = header;
    }
}
