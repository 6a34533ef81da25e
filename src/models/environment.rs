use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root of the ATCF data tree on the server
pub const ATCF_DATA_PATH: &str = "/awips2/edex/data/atcf";

/// Property keys recognized in `atcf.properties`
pub const PROPERTY_KEYS: [&str; 13] = [
    "ATCFSTRMS",
    "ATCF_OUTGOING",
    "ATCF_RETRIEVED",
    "ATCFTMP",
    "ATCF_ARCH",
    "WCOSS_TIMEOUT",
    "FIXDATAIN",
    "FIXDATAOUT",
    "AIDMESSAGESDIR",
    "ATCFSITE",
    "BACKUPSITE",
    "ADVISORYPATH",
    "ADVISORYARCHIVEPATH",
];

fn storm_dir() -> Utf8PathBuf {
    Utf8Path::new(ATCF_DATA_PATH).join("storms")
}

/// Server directories and site identifiers from `atcf.properties`.
///
/// Directory values in the properties file are relative. They are resolved
/// against the data root, or the storm directory for the storm scratch
/// directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtcfEnvironmentConfig {
    pub atcfstrms: Utf8PathBuf,
    pub atcf_outgoing: Utf8PathBuf,
    pub atcf_retrieved: Utf8PathBuf,
    pub atcftmp: Utf8PathBuf,
    pub atcf_arch: Utf8PathBuf,
    pub wcoss_timeout: String,
    pub fix_data_in: Utf8PathBuf,
    pub fix_data_out: Utf8PathBuf,
    pub aid_messages_dir: Utf8PathBuf,
    pub atcf_site: String,
    pub backup_site: String,
    pub advisory_path: Utf8PathBuf,
    pub advisory_archive_path: Utf8PathBuf,
}

impl Default for AtcfEnvironmentConfig {
    fn default() -> Self {
        let data = Utf8Path::new(ATCF_DATA_PATH);
        let storms = storm_dir();
        let advisory_path = data.join("nhc_messages");
        Self {
            atcfstrms: storms.clone(),
            atcf_outgoing: storms.join("outgoing"),
            atcf_retrieved: storms.join("retrieved"),
            atcftmp: storms.join("tmp"),
            atcf_arch: data.join("archives"),
            wcoss_timeout: "8".to_string(),
            fix_data_in: data.join("fnmocin"),
            fix_data_out: data.join("fnmocout"),
            aid_messages_dir: data.join("aidmessages"),
            atcf_site: "NHC".to_string(),
            backup_site: String::new(),
            advisory_archive_path: advisory_path.join("archive"),
            advisory_path,
        }
    }
}

impl AtcfEnvironmentConfig {
    /// Apply `KEY=value` properties over the defaults. Keys are matched
    /// case-insensitively, unknown keys are ignored.
    pub fn from_properties(properties: &HashMap<String, String>) -> Self {
        let mut env = Self::default();
        for (key, value) in properties {
            env.apply(key, value.trim());
        }
        env
    }

    fn apply(&mut self, key: &str, value: &str) {
        let data = Utf8Path::new(ATCF_DATA_PATH);
        // Paths are relative to the data root even when written with a leading slash
        let relative = value.trim_start_matches('/');
        match key.to_ascii_uppercase().as_str() {
            "ATCFSTRMS" => self.atcfstrms = data.join(relative),
            "ATCF_OUTGOING" => self.atcf_outgoing = storm_dir().join(relative),
            "ATCF_RETRIEVED" => self.atcf_retrieved = storm_dir().join(relative),
            "ATCFTMP" => self.atcftmp = storm_dir().join(relative),
            "ATCF_ARCH" => self.atcf_arch = data.join(relative),
            "WCOSS_TIMEOUT" => self.wcoss_timeout = value.to_string(),
            "FIXDATAIN" => self.fix_data_in = data.join(relative),
            "FIXDATAOUT" => self.fix_data_out = data.join(relative),
            "AIDMESSAGESDIR" => self.aid_messages_dir = data.join(relative),
            "ATCFSITE" => self.atcf_site = value.to_string(),
            "BACKUPSITE" => self.backup_site = value.to_string(),
            "ADVISORYPATH" => self.advisory_path = data.join(relative),
            "ADVISORYARCHIVEPATH" => self.advisory_archive_path = data.join(relative),
            other => tracing::debug!("Ignoring unknown ATCF property {other}"),
        }
    }

    /// Recognized keys absent from `properties`
    pub fn missing_keys(properties: &HashMap<String, String>) -> Vec<&'static str> {
        PROPERTY_KEYS
            .into_iter()
            .filter(|key| !properties.keys().any(|k| k.eq_ignore_ascii_case(key)))
            .collect()
    }

    /// WCOSS timeout in seconds, `None` when not numeric
    pub fn wcoss_timeout_secs(&self) -> Option<u64> {
        self.wcoss_timeout.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let env = AtcfEnvironmentConfig::default();
        assert_eq!(env.atcfstrms, "/awips2/edex/data/atcf/storms");
        assert_eq!(env.atcftmp, "/awips2/edex/data/atcf/storms/tmp");
        assert_eq!(env.advisory_archive_path, "/awips2/edex/data/atcf/nhc_messages/archive");
        assert_eq!(env.atcf_site, "NHC");
        assert!(env.backup_site.is_empty());
        assert_eq!(env.wcoss_timeout_secs(), Some(8));
    }

    #[test]
    fn test_properties_get_prefixes() {
        let properties = HashMap::from([
            ("ATCF_OUTGOING".to_string(), "out2".to_string()),
            ("fixdatain".to_string(), "fixes/in".to_string()),
            ("ATCFSITE".to_string(), " CPHC ".to_string()),
            ("SOMETHING_ELSE".to_string(), "x".to_string()),
        ]);
        let env = AtcfEnvironmentConfig::from_properties(&properties);
        assert_eq!(env.atcf_outgoing, "/awips2/edex/data/atcf/storms/out2");
        assert_eq!(env.fix_data_in, "/awips2/edex/data/atcf/fixes/in");
        assert_eq!(env.atcf_site, "CPHC");
        assert_eq!(env.atcf_retrieved, "/awips2/edex/data/atcf/storms/retrieved");

        let missing = AtcfEnvironmentConfig::missing_keys(&properties);
        assert_eq!(missing.len(), PROPERTY_KEYS.len() - 3);
        assert!(!missing.contains(&"FIXDATAIN"));
    }

    #[test]
    fn test_leading_slash_stays_under_data_root() {
        let properties = HashMap::from([
            ("ATCFSTRMS".to_string(), "/storms2".to_string()),
            ("ATCF_OUTGOING".to_string(), "//outgoing".to_string()),
            ("ADVISORYPATH".to_string(), "/nhc_messages/current".to_string()),
            ("ATCFSITE".to_string(), "/NHC".to_string()),
        ]);
        let env = AtcfEnvironmentConfig::from_properties(&properties);
        assert_eq!(env.atcfstrms, "/awips2/edex/data/atcf/storms2");
        assert_eq!(env.atcf_outgoing, "/awips2/edex/data/atcf/storms/outgoing");
        assert_eq!(env.advisory_path, "/awips2/edex/data/atcf/nhc_messages/current");
        assert_eq!(env.atcf_site, "/NHC");
    }
}
