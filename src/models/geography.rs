use crate::legacy::{self, Layout, LegacyConfig};
use crate::xml::XmlDocument;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Basins that ship a geography file
pub const GEOGRAPHY_BASINS: [&str; 4] = ["AL", "WP", "CP", "EP"];

/// `geography_al.dat` for basin `AL`
pub fn geography_file_name(basin: &str) -> String {
    format!("geography_{}.dat", basin.to_lowercase())
}

/// A labelled map point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographyPoint {
    #[serde(rename = "@lat")]
    pub lat: f32,
    #[serde(rename = "@lon")]
    pub lon: f32,
    #[serde(rename = "@name")]
    pub name: String,
}

/// Geography points of one basin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeographyPoints {
    #[serde(rename = "GeoPoint", default)]
    pub points: Vec<GeographyPoint>,
}

impl GeographyPoints {
    pub fn point_by_name(&self, name: &str) -> Option<&GeographyPoint> {
        self.points
            .iter()
            .find(|point| point.name.eq_ignore_ascii_case(name))
    }
}

impl XmlDocument for GeographyPoints {
    const ROOT: &'static str = "GeographyPoints";
}

impl LegacyConfig for GeographyPoints {
    const LAYOUT: Layout = Layout::headerless();

    fn from_items(items: Vec<Vec<String>>) -> Self {
        let mut points = Vec::new();
        for item in items {
            let coords = if item.len() > 2 {
                legacy::parse_lat_lon(&item[0]).zip(legacy::parse_lat_lon(&item[1]))
            } else {
                None
            };
            match coords {
                Some((lat, lon)) => points.push(GeographyPoint {
                    lat,
                    lon,
                    name: legacy::capitalize_words(&item[2..]),
                }),
                None => tracing::warn!("Invalid geography entry: {}", item.join(" ")),
            }
        }
        Self { points }
    }

    fn write_body(&self, out: &mut String) {
        for point in &self.points {
            let _ = writeln!(
                out,
                "{} {} {}",
                legacy::format_lat(point.lat),
                legacy::format_lon(point.lon),
                point.name.to_uppercase()
            );
        }
    }
}
