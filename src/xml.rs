//! XML copies of the legacy configuration files.

use crate::error::XmlError;
use quick_xml::se::Serializer;
use serde::{Serialize, de::DeserializeOwned};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// A configuration object with an XML representation
pub trait XmlDocument: Serialize + DeserializeOwned {
    /// Name of the root element
    const ROOT: &'static str;
}

/// `fixsites.dat` -> `fixsites.xml`, anything else gets `.xml` appended
pub fn xml_file_name(legacy_file: &str) -> String {
    match legacy_file.strip_suffix(".dat") {
        Some(stem) => format!("{stem}.xml"),
        None => format!("{legacy_file}.xml"),
    }
}

pub fn to_xml<T: XmlDocument>(doc: &T) -> Result<String, XmlError> {
    let mut body = String::new();
    let mut serializer = Serializer::with_root(&mut body, Some(T::ROOT)).map_err(serialize_error::<T>)?;
    serializer.indent(' ', 4);
    doc.serialize(serializer).map_err(serialize_error::<T>)?;

    Ok(format!("{XML_DECLARATION}\n{body}\n"))
}

fn serialize_error<T: XmlDocument>(error: impl std::fmt::Display) -> XmlError {
    XmlError::Serialize {
        root: T::ROOT.to_string(),
        message: error.to_string(),
    }
}

pub fn from_xml<T: XmlDocument>(xml: &str) -> Result<T, XmlError> {
    quick_xml::de::from_str(xml).map_err(|e| XmlError::Deserialize(e.to_string()))
}

/// Integer lists stored as one space separated attribute
pub mod int_list {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(values: &[i32], serializer: S) -> Result<S::Ok, S::Error> {
        let joined: Vec<String> = values.iter().map(i32::to_string).collect();
        serializer.serialize_str(&joined.join(" "))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i32>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.split_whitespace()
            .map(|token| token.parse().map_err(D::Error::custom))
            .collect()
    }
}

/// Free-text headers stored one `<Line text=".."/>` per line.
///
/// Element text is whitespace-trimmed on read, attribute values are not, so
/// indentation and blank lines survive the round trip.
pub mod header_lines {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Line {
        #[serde(rename = "@text", default)]
        text: String,
    }

    #[derive(Serialize, Deserialize, Default)]
    struct Lines {
        #[serde(rename = "Line", default)]
        lines: Vec<Line>,
    }

    pub fn serialize<S: Serializer>(header: &str, serializer: S) -> Result<S::Ok, S::Error> {
        let lines = if header.is_empty() {
            Vec::new()
        } else {
            header
                .split('\n')
                .map(|text| Line {
                    text: text.to_string(),
                })
                .collect()
        };
        Lines { lines }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        let Lines { lines } = Lines::deserialize(deserializer)?;
        let texts: Vec<String> = lines.into_iter().map(|line| line.text).collect();
        Ok(texts.join("\n"))
    }
}

/// Exactly three integers stored as one space separated attribute
pub mod int_triple {
    use serde::{Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(values: &[i32; 3], serializer: S) -> Result<S::Ok, S::Error> {
        super::int_list::serialize(values, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<[i32; 3], D::Error> {
        let values = super::int_list::deserialize(deserializer)?;
        <[i32; 3]>::try_from(values.as_slice())
            .map_err(|_| D::Error::custom(format!("expected 3 weights, got {}", values.len())))
    }
}
