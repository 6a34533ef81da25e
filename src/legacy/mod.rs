//! Legacy ATCF flat-file handling.
//!
//! Every legacy configuration file shares the same outer shape: a free-text
//! header, an optional data-start marker line and then whitespace or colon
//! separated columns. This module turns that text into token rows and back,
//! the per-type column rules live next to each model.

use regex::Regex;
use std::sync::LazyLock;

/// Marker line that separates the header from the data rows
pub const START_OF_DATA: &str = "START_OF_DATA";

/// Prefix of the line that ends a legacy header
pub const END_OF_HEADER: &str = "DO NOT DELETE";

/// Lines starting with this are skipped inside the data section
pub const COMMENT_INDICATOR: &str = "#";

/// Written between the header and the body of most legacy files
pub const DELETION_WARNING: &str =
    "DO NOT DELETE THE NEXT TWO LINES -- ATCF depends on them.\nSTART_OF_DATA\n\n";

static LAT_LON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)([NSEWnsew])$").expect("Invalid lat/lon regex")
});

/// How tokens are split within a data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Whitespace,
    Colon,
}

/// How the preserved header is cut out of a legacy file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Raw lines up to the first one starting with [`END_OF_HEADER`]
    UntilMarker,
    /// Like `UntilMarker` with surrounding blank lines removed and a leading newline
    TrimmedUntilMarker,
    /// The leading run of `#` comment lines
    LeadingComments,
    /// Raw lines before the data-start line of the layout
    UntilDataStart,
    /// File has no header
    None,
}

/// Tokenizer settings of one legacy file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Data rows start after the first line beginning with this. Empty means
    /// every line is data.
    pub data_start: &'static str,
    pub separator: Separator,
    pub header: HeaderStyle,
}

impl Layout {
    /// `START_OF_DATA` marker with a `DO NOT DELETE` header
    pub const fn standard(separator: Separator) -> Self {
        Self {
            data_start: START_OF_DATA,
            separator,
            header: HeaderStyle::UntilMarker,
        }
    }

    /// Every line is data and there is no header
    pub const fn headerless() -> Self {
        Self {
            data_start: "",
            separator: Separator::Whitespace,
            header: HeaderStyle::None,
        }
    }
}

/// Split legacy file content into token rows.
///
/// Lines are trimmed and blank lines dropped before the data-start marker is
/// searched for. A missing marker yields no rows.
pub fn data_items(content: &str, layout: &Layout) -> Vec<Vec<String>> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let first_data = if layout.data_start.is_empty() {
        0
    } else {
        lines
            .iter()
            .position(|line| line.starts_with(layout.data_start))
            .map_or(lines.len(), |idx| idx + 1)
    };

    lines[first_data..]
        .iter()
        .filter(|line| !line.starts_with(COMMENT_INDICATOR))
        .map(|line| split_line(line, layout.separator))
        .filter(|tokens| !tokens.is_empty())
        .collect()
}

fn split_line(line: &str, separator: Separator) -> Vec<String> {
    match separator {
        Separator::Whitespace => line.split_whitespace().map(str::to_string).collect(),
        Separator::Colon => {
            let mut tokens: Vec<String> = line.split(':').map(str::to_string).collect();
            while tokens.last().is_some_and(|t| t.is_empty()) {
                tokens.pop();
            }
            tokens
        }
    }
}

/// Extract the preserved header from legacy file content
pub fn header(content: &str, layout: &Layout) -> String {
    match layout.header {
        HeaderStyle::UntilMarker => content
            .lines()
            .take_while(|line| !line.starts_with(END_OF_HEADER))
            .map(|line| format!("{line}\n"))
            .collect(),
        HeaderStyle::TrimmedUntilMarker => {
            let mut lines: Vec<&str> = content
                .lines()
                .skip_while(|line| line.trim().is_empty())
                .take_while(|line| !line.starts_with(END_OF_HEADER))
                .collect();
            while lines.last().is_some_and(|line| line.trim().is_empty()) {
                lines.pop();
            }
            let mut out = String::from("\n");
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
            out
        }
        HeaderStyle::LeadingComments => content
            .lines()
            .take_while(|line| line.starts_with(COMMENT_INDICATOR))
            .map(|line| format!("{line}\n"))
            .collect(),
        HeaderStyle::UntilDataStart => content
            .lines()
            .take_while(|line| {
                layout.data_start.is_empty() || !line.trim().starts_with(layout.data_start)
            })
            .map(|line| format!("{line}\n"))
            .collect(),
        HeaderStyle::None => String::new(),
    }
}

/// Join the tokens from `start` on with single spaces
pub fn combine(items: &[String], start: usize) -> String {
    items
        .get(start..)
        .map(|rest| rest.join(" ").trim().to_string())
        .unwrap_or_default()
}

/// Legacy boolean column: anything but `0` is set
pub fn flag(token: &str) -> bool {
    token != "0"
}

/// Legacy boolean column value
pub fn flag_digit(value: bool) -> u8 {
    u8::from(value)
}

/// Parse a hemisphere-suffixed coordinate such as `25.8N` or `80.3W`.
///
/// South and west come back negative.
pub fn parse_lat_lon(token: &str) -> Option<f32> {
    let caps = LAT_LON.captures(token.trim())?;
    let value: f32 = caps[1].parse().ok()?;
    match caps[2].to_ascii_uppercase().as_str() {
        "S" | "W" => Some(-value),
        _ => Some(value),
    }
}

/// Format a latitude as `25.8N` / `10.0S`
pub fn format_lat(lat: f32) -> String {
    format!("{:.1}{}", lat.abs(), if lat < 0.0 { 'S' } else { 'N' })
}

/// Format a longitude as `80.3W` / `120.0E`
pub fn format_lon(lon: f32) -> String {
    format!("{:.1}{}", lon.abs(), if lon < 0.0 { 'W' } else { 'E' })
}

/// `NEW ORLEANS` -> `New Orleans`
pub fn capitalize_words(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// A configuration object backed by a legacy flat file.
///
/// Implementors provide the column rules, the trait supplies parsing and
/// serialization of the whole file.
pub trait LegacyConfig: Default {
    const LAYOUT: Layout;

    /// Build the object from token rows, logging and skipping malformed rows
    fn from_items(items: Vec<Vec<String>>) -> Self;

    /// Append the column-aligned body (everything after the header)
    fn write_body(&self, out: &mut String);

    fn header(&self) -> &str {
        ""
    }

    fn set_header(&mut self, _header: String) {}

    /// Parse a complete legacy file, keeping its header
    fn parse_legacy(content: &str) -> Self {
        let mut parsed = Self::from_items(data_items(content, &Self::LAYOUT));
        parsed.set_header(header(content, &Self::LAYOUT));
        parsed
    }

    fn legacy_body(&self) -> String {
        let mut out = String::new();
        self.write_body(&mut out);
        out
    }

    /// Header followed by body, ready to be written back to disk
    fn to_legacy_text(&self) -> String {
        self.to_legacy_text_with_header(self.header())
    }

    fn to_legacy_text_with_header(&self, header: &str) -> String {
        let mut out = String::from(header);
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        self.write_body(&mut out);
        out
    }
}
