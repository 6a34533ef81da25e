pub mod kind;
pub mod settings;

pub use kind::ConfigKind;
pub use settings::{SETTINGS_FILE, ToolSettings};

use crate::legacy::{self, LegacyConfig};
use crate::metrics::Metrics;
use crate::models::{
    AtcfColorSelections, AtcfCustomColors, AtcfEnvironmentConfig, AtcfSitePreferences, AtcfSites,
    CpaLocations, DefaultObjAidTechniques, FixError, FixMicrowaveSatelliteTypes, FixScatSatTypes,
    FixSites, FixTypes, ForecasterInitials, FullInitials, GEOGRAPHY_BASINS, GeographyPoints,
    MaxWindGustPairs, ObjectiveAidTechniques, SidebarMenuSelection, StormStates,
    geography_file_name,
};
use crate::state::{ChangeNotifier, ColorCache, ColorConfigurationListener, ConfigChange, SaveFormat};
use crate::store::{
    ATCF_CONFIG_DIR, ConfigStore, DirectoryStore, GEOGRAPHY_DIR, JSON_DIR, PROFILE_DIR,
    TEMPLATE_DIR, store_path,
};
use crate::xml::{self, XmlDocument, xml_file_name};
use anyhow::{Context, Result, bail};
use camino::Utf8Path;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tokio::sync::broadcast;

pub const PREFERENCES_FILE: &str = "atcfsite.prefs";
pub const CPA_FILE: &str = "cpa.loc";
pub const FIX_ERROR_FILE: &str = "fixerror.prefs";
pub const FIX_SITES_FILE: &str = "fixsites.dat";
pub const FIX_TYPES_FILE: &str = "fixtypes.dat";
pub const MICRO_SAT_FILE: &str = "microsattypes.dat";
pub const SCAT_SAT_FILE: &str = "scatsattypes.dat";
pub const DEFAULT_AIDS_FILE: &str = "default_aids.dat";
pub const COLOR_TABLE_FILE: &str = "colortable.dat";
pub const COLOR_SELECTION_FILE: &str = "colsel.dat";
pub const TECHLIST_FILE: &str = "techlist.dat";
pub const GUST_FILE: &str = "gust.dat";
pub const INITIALS_FILE: &str = "initials.dat";
pub const FULL_INITIALS_FILE: &str = "initials_full.dat";
pub const STORM_STATES_FILE: &str = "stormstates.xml";
pub const ATCF_SITES_FILE: &str = "atcfsites.xml";
pub const SIDEBAR_FILE: &str = "sidebar_selections.xml";
pub const STORM_TABLE_FILE: &str = "storm.table";
pub const PROPERTIES_FILE: &str = "atcf.properties";

/// Extension of objective aid profiles in [`PROFILE_DIR`]
pub const PROFILE_EXT: &str = ".aids";

fn config_path(file: &str) -> String {
    store_path(ATCF_CONFIG_DIR, file)
}

fn xml_path(legacy_path: &str) -> String {
    match legacy_path.rsplit_once('/') {
        Some((dir, file)) => store_path(dir, &xml_file_name(file)),
        None => xml_file_name(legacy_path),
    }
}

/// Read `atcf.properties` content, with `ATCF_*` environment overrides.
///
/// Keys come back upper-cased.
pub fn read_properties(contents: &str) -> Result<HashMap<String, String>> {
    let properties = config::Config::builder()
        .add_source(config::File::from_str(contents, config::FileFormat::Ini))
        .add_source(config::Environment::with_prefix("ATCF"))
        .build()
        .context("Failed to read ATCF properties")?;

    let raw: HashMap<String, String> = properties
        .try_deserialize()
        .context("ATCF properties must be flat key=value pairs")?;

    Ok(raw
        .into_iter()
        .map(|(key, value)| (key.to_ascii_uppercase(), value))
        .collect())
}

/// Access to the ATCF configuration files of one store.
///
/// Every getter tries the XML copy first. When that is missing or unreadable
/// the legacy text is parsed and the XML copy written back, so later calls
/// skip the text parse. Custom colors and color selections are cached for the
/// life of the manager and refreshed on save.
pub struct AtcfConfigurationManager {
    store: Arc<dyn ConfigStore>,
    colors: ColorCache,
    notifier: ChangeNotifier,
    env_config: OnceLock<AtcfEnvironmentConfig>,
    metrics: Metrics,
}

impl AtcfConfigurationManager {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self {
            store,
            colors: ColorCache::default(),
            notifier: ChangeNotifier::new(),
            env_config: OnceLock::new(),
            metrics: Metrics::new(),
        }
    }

    /// Manager over a directory store rooted at `root`
    pub fn open<P: AsRef<Utf8Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            bail!("Configuration root {} is not a directory", root);
        }
        tracing::info!("Using configuration root {}", root);
        Ok(Self::new(Arc::new(DirectoryStore::new(root))))
    }

    pub fn store(&self) -> &dyn ConfigStore {
        self.store.as_ref()
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    // ---- listeners and change events

    pub fn add_color_listener(&self, listener: Arc<dyn ColorConfigurationListener>) -> bool {
        self.notifier.add_color_listener(listener)
    }

    pub fn remove_color_listener(&self, listener: &Arc<dyn ColorConfigurationListener>) -> bool {
        self.notifier.remove_color_listener(listener)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConfigChange> {
        self.notifier.subscribe()
    }

    // ---- generic load and save

    fn read_file(&self, path: &str) -> Result<Option<String>> {
        self.store
            .read(path)
            .with_context(|| format!("Failed to read {}", path))
    }

    /// The XML copy at `path`, `None` when missing or unparseable
    fn load_xml<T: XmlDocument>(&self, path: &str) -> Result<Option<T>> {
        let Some(contents) = self.read_file(path)? else {
            return Ok(None);
        };
        match xml::from_xml(&contents) {
            Ok(doc) => {
                self.metrics.record_xml_load();
                tracing::debug!("Loaded {}", path);
                Ok(Some(doc))
            }
            Err(e) => {
                self.metrics.record_xml_parse_failure();
                tracing::error!("Failed to parse {}, falling back to legacy text: {}", path, e);
                Ok(None)
            }
        }
    }

    /// Parse a legacy file, `None` when it does not exist
    fn parse_legacy<T: LegacyConfig>(&self, path: &str) -> Result<Option<T>> {
        let Some(contents) = self.read_file(path)? else {
            self.metrics.record_missing_file();
            tracing::warn!("Legacy file not found: {}", path);
            return Ok(None);
        };
        let started = Instant::now();
        let parsed = T::parse_legacy(&contents);
        self.metrics.record_legacy_parse(started.elapsed());
        tracing::info!("Parsed legacy file {}", path);
        Ok(Some(parsed))
    }

    fn from_text<T: LegacyConfig>(&self, path: &str) -> Result<T> {
        Ok(self.parse_legacy(path)?.unwrap_or_default())
    }

    /// Write the XML copy of a freshly parsed legacy file. Failure is logged only.
    fn cache_xml<T: XmlDocument>(&self, legacy_path: &str, doc: &T) {
        let path = xml_path(legacy_path);
        let written = xml::to_xml(doc)
            .with_context(|| format!("Failed to serialize {}", path))
            .and_then(|contents| {
                self.store
                    .write(&path, &contents)
                    .with_context(|| format!("Failed to write {}", path))
            });
        match written {
            Ok(()) => {
                self.metrics.record_xml_conversion();
                tracing::info!("Converted {} to {}", legacy_path, path);
                self.notifier.emit(ConfigChange::Converted { path });
            }
            Err(e) => {
                self.metrics.record_xml_conversion_failure();
                tracing::error!("Failed to cache XML copy of {}: {:#}", legacy_path, e);
            }
        }
    }

    /// XML copy if present, else the parsed legacy text (cached as XML)
    fn load<T: LegacyConfig + XmlDocument>(&self, legacy_path: &str) -> Result<T> {
        if let Some(doc) = self.load_xml(&xml_path(legacy_path))? {
            return Ok(doc);
        }
        match self.parse_legacy::<T>(legacy_path)? {
            Some(parsed) => {
                self.cache_xml(legacy_path, &parsed);
                Ok(parsed)
            }
            None => Ok(T::default()),
        }
    }

    /// XML-only document, `None` when missing or unreadable
    fn load_xml_only<T: XmlDocument>(&self, path: &str) -> Result<Option<T>> {
        let doc = self.load_xml(path)?;
        if doc.is_none() {
            tracing::warn!("No usable {}", path);
        }
        Ok(doc)
    }

    fn finish_save(&self, path: String, format: SaveFormat, result: Result<()>) -> Result<()> {
        match result {
            Ok(()) => {
                self.metrics.record_save();
                tracing::info!("Saved {}", path);
                self.notifier.emit(ConfigChange::Saved { path, format });
                Ok(())
            }
            Err(e) => {
                self.metrics.record_save_failure();
                tracing::error!("Failed to save {}: {:#}", path, e);
                Err(e)
            }
        }
    }

    fn save_xml_at<T: XmlDocument>(&self, path: &str, doc: &T) -> Result<()> {
        let result = xml::to_xml(doc)
            .with_context(|| format!("Failed to serialize {}", path))
            .and_then(|contents| {
                self.store
                    .write(path, &contents)
                    .with_context(|| format!("Failed to write {}", path))
            });
        self.finish_save(path.to_string(), SaveFormat::Xml, result)
    }

    fn save_xml<T: XmlDocument>(&self, legacy_path: &str, doc: &T) -> Result<()> {
        self.save_xml_at(&xml_path(legacy_path), doc)
    }

    /// Save legacy text, keeping the header of the file currently in the store
    fn save_text<T: LegacyConfig>(&self, path: &str, doc: &T, fallback_header: Option<String>) -> Result<()> {
        let result = self.read_file(path).and_then(|existing| {
            let header = match existing {
                Some(existing) => legacy::header(&existing, &T::LAYOUT),
                None => fallback_header.unwrap_or_else(|| doc.header().to_string()),
            };
            self.store
                .write(path, &doc.to_legacy_text_with_header(&header))
                .with_context(|| format!("Failed to write {}", path))
        });
        self.finish_save(path.to_string(), SaveFormat::Text, result)
    }

    /// Re-parse a legacy file in [`ATCF_CONFIG_DIR`] and overwrite its XML
    /// copy. Cached colors are dropped so the next get re-reads them.
    pub fn convert_file<T: LegacyConfig + XmlDocument>(&self, file: &str) -> Result<T> {
        let path = config_path(file);
        let Some(parsed) = self.parse_legacy::<T>(&path)? else {
            bail!("Legacy file {} not found", path);
        };
        self.save_xml(&path, &parsed)?;
        self.colors.clear();
        Ok(parsed)
    }

    /// Load a file in [`ATCF_CONFIG_DIR`] and write it back as legacy text
    pub fn export_file<T: LegacyConfig + XmlDocument>(&self, file: &str) -> Result<T> {
        let path = config_path(file);
        let doc: T = self.load(&path)?;
        self.save_text(&path, &doc, None)?;
        Ok(doc)
    }

    // ---- warm everything

    /// Load every configuration object once, converting legacy files to XML
    /// where no XML copy exists yet.
    pub fn load_configuration(&self) -> Result<()> {
        let started = Instant::now();

        let preferences = self.preferences()?;
        let techniques = self.objective_aid_techniques()?;
        let cpa = self.cpa_locations()?;
        let fix_error = self.fix_error()?;
        let fix_sites = self.fix_sites()?;
        let fix_types = self.fix_types()?;
        self.fix_micro_sats()?;
        self.fix_scat_sats()?;
        self.default_obj_aid_techniques()?;
        let colors = self.atcf_custom_colors()?;
        self.atcf_color_selections()?;
        self.max_wind_gust_pairs()?;
        self.storm_states()?;
        self.forecaster_initials()?;
        self.atcf_sites()?;
        self.full_initials()?;
        for basin in GEOGRAPHY_BASINS {
            self.basin_geo_points(basin)?;
        }
        let profiles = self.obj_aids_profile_names()?;
        for name in &profiles {
            self.site_obj_aids_profile(name)?;
        }

        tracing::info!(
            "Loaded ATCF configuration in {:?}: {} preferences, {} techniques, {} CPA locations, \
             {} fix error entries, {} fix sites, {} fix types, {} colors, {} profiles",
            started.elapsed(),
            preferences.preferences.len(),
            techniques.techniques.len(),
            cpa.locations.len(),
            fix_error.entries.len(),
            fix_sites.sites.len(),
            fix_types.types.len(),
            colors.colors.len(),
            profiles.len()
        );
        Ok(())
    }

    // ---- site preferences

    pub fn preferences_from_text(&self) -> Result<AtcfSitePreferences> {
        self.from_text(&config_path(PREFERENCES_FILE))
    }

    pub fn preferences(&self) -> Result<AtcfSitePreferences> {
        self.load(&config_path(PREFERENCES_FILE))
    }

    pub fn save_preferences(&self, prefs: &AtcfSitePreferences) -> Result<()> {
        self.save_xml(&config_path(PREFERENCES_FILE), prefs)
    }

    pub fn save_preferences_as_text(&self, prefs: &AtcfSitePreferences) -> Result<()> {
        self.save_text(&config_path(PREFERENCES_FILE), prefs, None)
    }

    // ---- CPA locations

    pub fn cpa_locations_from_text(&self) -> Result<CpaLocations> {
        self.from_text(&config_path(CPA_FILE))
    }

    pub fn cpa_locations(&self) -> Result<CpaLocations> {
        self.load(&config_path(CPA_FILE))
    }

    pub fn save_cpa_locations(&self, cpa: &CpaLocations) -> Result<()> {
        self.save_xml(&config_path(CPA_FILE), cpa)
    }

    pub fn save_cpa_locations_as_text(&self, cpa: &CpaLocations) -> Result<()> {
        self.save_text(&config_path(CPA_FILE), cpa, None)
    }

    // ---- fix configuration

    pub fn fix_error_from_text(&self) -> Result<FixError> {
        self.from_text(&config_path(FIX_ERROR_FILE))
    }

    pub fn fix_error(&self) -> Result<FixError> {
        self.load(&config_path(FIX_ERROR_FILE))
    }

    pub fn save_fix_error(&self, fix_error: &FixError) -> Result<()> {
        self.save_xml(&config_path(FIX_ERROR_FILE), fix_error)
    }

    pub fn save_fix_error_as_text(&self, fix_error: &FixError) -> Result<()> {
        self.save_text(&config_path(FIX_ERROR_FILE), fix_error, None)
    }

    pub fn fix_sites_from_text(&self) -> Result<FixSites> {
        self.from_text(&config_path(FIX_SITES_FILE))
    }

    pub fn fix_sites(&self) -> Result<FixSites> {
        self.load(&config_path(FIX_SITES_FILE))
    }

    pub fn save_fix_sites(&self, sites: &FixSites) -> Result<()> {
        self.save_xml(&config_path(FIX_SITES_FILE), sites)
    }

    pub fn save_fix_sites_as_text(&self, sites: &FixSites) -> Result<()> {
        self.save_text(&config_path(FIX_SITES_FILE), sites, None)
    }

    pub fn fix_types_from_text(&self) -> Result<FixTypes> {
        self.from_text(&config_path(FIX_TYPES_FILE))
    }

    pub fn fix_types(&self) -> Result<FixTypes> {
        self.load(&config_path(FIX_TYPES_FILE))
    }

    pub fn save_fix_types(&self, types: &FixTypes) -> Result<()> {
        self.save_xml(&config_path(FIX_TYPES_FILE), types)
    }

    pub fn save_fix_types_as_text(&self, types: &FixTypes) -> Result<()> {
        self.save_text(&config_path(FIX_TYPES_FILE), types, None)
    }

    pub fn fix_micro_sats_from_text(&self) -> Result<FixMicrowaveSatelliteTypes> {
        self.from_text(&config_path(MICRO_SAT_FILE))
    }

    pub fn fix_micro_sats(&self) -> Result<FixMicrowaveSatelliteTypes> {
        self.load(&config_path(MICRO_SAT_FILE))
    }

    pub fn save_fix_micro_sats(&self, sats: &FixMicrowaveSatelliteTypes) -> Result<()> {
        self.save_xml(&config_path(MICRO_SAT_FILE), sats)
    }

    pub fn save_fix_micro_sats_as_text(&self, sats: &FixMicrowaveSatelliteTypes) -> Result<()> {
        self.save_text(&config_path(MICRO_SAT_FILE), sats, None)
    }

    pub fn fix_scat_sats_from_text(&self) -> Result<FixScatSatTypes> {
        self.from_text(&config_path(SCAT_SAT_FILE))
    }

    pub fn fix_scat_sats(&self) -> Result<FixScatSatTypes> {
        self.load(&config_path(SCAT_SAT_FILE))
    }

    pub fn save_fix_scat_sats(&self, sats: &FixScatSatTypes) -> Result<()> {
        self.save_xml(&config_path(SCAT_SAT_FILE), sats)
    }

    pub fn save_fix_scat_sats_as_text(&self, sats: &FixScatSatTypes) -> Result<()> {
        self.save_text(&config_path(SCAT_SAT_FILE), sats, None)
    }

    // ---- objective aids

    pub fn default_obj_aid_techniques_from_text(&self) -> Result<DefaultObjAidTechniques> {
        self.from_text(&config_path(DEFAULT_AIDS_FILE))
    }

    pub fn default_obj_aid_techniques(&self) -> Result<DefaultObjAidTechniques> {
        self.load(&config_path(DEFAULT_AIDS_FILE))
    }

    pub fn objective_aid_techniques_from_text(&self) -> Result<ObjectiveAidTechniques> {
        self.from_text(&config_path(TECHLIST_FILE))
    }

    pub fn objective_aid_techniques(&self) -> Result<ObjectiveAidTechniques> {
        self.load(&config_path(TECHLIST_FILE))
    }

    pub fn save_objective_aid_techniques(&self, techs: &ObjectiveAidTechniques) -> Result<()> {
        self.save_xml(&config_path(TECHLIST_FILE), techs)
    }

    pub fn save_objective_aid_techniques_as_text(&self, techs: &ObjectiveAidTechniques) -> Result<()> {
        self.save_text(&config_path(TECHLIST_FILE), techs, None)
    }

    // ---- colors

    pub fn atcf_custom_colors_from_text(&self) -> Result<AtcfCustomColors> {
        self.from_text(&config_path(COLOR_TABLE_FILE))
    }

    /// Custom colors, loaded once per manager
    pub fn atcf_custom_colors(&self) -> Result<Arc<AtcfCustomColors>> {
        if let Some(colors) = self.colors.custom_colors() {
            return Ok(colors);
        }
        let loaded = self.load(&config_path(COLOR_TABLE_FILE))?;
        Ok(self.colors.set_custom_colors(loaded))
    }

    pub fn save_custom_colors(&self, colors: &AtcfCustomColors) -> Result<()> {
        self.save_xml(&config_path(COLOR_TABLE_FILE), colors)?;
        self.colors.set_custom_colors(colors.clone());
        self.notifier.fire_colors_changed();
        Ok(())
    }

    pub fn save_custom_colors_as_text(&self, colors: &AtcfCustomColors) -> Result<()> {
        self.save_text(&config_path(COLOR_TABLE_FILE), colors, None)?;
        self.colors.set_custom_colors(colors.clone());
        self.notifier.fire_colors_changed();
        Ok(())
    }

    pub fn atcf_color_selections_from_text(&self) -> Result<AtcfColorSelections> {
        self.from_text(&config_path(COLOR_SELECTION_FILE))
    }

    /// Color selections, loaded once per manager
    pub fn atcf_color_selections(&self) -> Result<Arc<AtcfColorSelections>> {
        if let Some(selections) = self.colors.selections() {
            return Ok(selections);
        }
        let loaded = self.load(&config_path(COLOR_SELECTION_FILE))?;
        Ok(self.colors.set_selections(loaded))
    }

    pub fn save_color_selections(&self, selections: &AtcfColorSelections) -> Result<()> {
        self.save_xml(&config_path(COLOR_SELECTION_FILE), selections)?;
        self.colors.set_selections(selections.clone());
        self.notifier.fire_colors_changed();
        Ok(())
    }

    pub fn save_color_selections_as_text(&self, selections: &AtcfColorSelections) -> Result<()> {
        self.save_text(&config_path(COLOR_SELECTION_FILE), selections, None)?;
        self.colors.set_selections(selections.clone());
        self.notifier.fire_colors_changed();
        Ok(())
    }

    // ---- gusts and initials

    /// Parse `gust.dat` and write its XML copy
    pub fn max_wind_gust_pairs_from_text(&self) -> Result<MaxWindGustPairs> {
        let path = config_path(GUST_FILE);
        let pairs: MaxWindGustPairs = self.from_text(&path)?;
        self.cache_xml(&path, &pairs);
        Ok(pairs)
    }

    pub fn max_wind_gust_pairs(&self) -> Result<MaxWindGustPairs> {
        self.load(&config_path(GUST_FILE))
    }

    pub fn forecaster_initials_from_text(&self) -> Result<ForecasterInitials> {
        self.from_text(&config_path(INITIALS_FILE))
    }

    pub fn forecaster_initials(&self) -> Result<ForecasterInitials> {
        self.load(&config_path(INITIALS_FILE))
    }

    pub fn full_initials_from_text(&self) -> Result<FullInitials> {
        self.from_text(&config_path(FULL_INITIALS_FILE))
    }

    pub fn full_initials(&self) -> Result<FullInitials> {
        self.load(&config_path(FULL_INITIALS_FILE))
    }

    // ---- XML-only documents

    /// Storm states, empty when `stormstates.xml` is missing
    pub fn storm_states(&self) -> Result<StormStates> {
        Ok(self
            .load_xml_only(&config_path(STORM_STATES_FILE))?
            .unwrap_or_default())
    }

    /// ATCF sites, empty when `atcfsites.xml` is missing
    pub fn atcf_sites(&self) -> Result<AtcfSites> {
        Ok(self
            .load_xml_only(&config_path(ATCF_SITES_FILE))?
            .unwrap_or_default())
    }

    /// Sidebar selection, the built-in default entries when none is saved
    pub fn sidebar_menu_selection(&self) -> Result<SidebarMenuSelection> {
        Ok(self
            .load_xml(&config_path(SIDEBAR_FILE))?
            .unwrap_or_else(SidebarMenuSelection::default_selection))
    }

    pub fn save_sidebar_menu_selection(&self, selection: &SidebarMenuSelection) -> Result<()> {
        self.save_xml_at(&config_path(SIDEBAR_FILE), selection)
    }

    // ---- geography

    pub fn geography_points_from_text(&self, file: &str) -> Result<GeographyPoints> {
        self.from_text(&store_path(GEOGRAPHY_DIR, file))
    }

    pub fn geography_points(&self, file: &str) -> Result<GeographyPoints> {
        self.load(&store_path(GEOGRAPHY_DIR, file))
    }

    /// Geography points of one basin (`AL`, `WP`, `CP` or `EP`)
    pub fn basin_geo_points(&self, basin: &str) -> Result<GeographyPoints> {
        if !GEOGRAPHY_BASINS.iter().any(|b| b.eq_ignore_ascii_case(basin)) {
            bail!("No geography file for basin {}", basin);
        }
        self.geography_points(&geography_file_name(basin))
    }

    pub fn save_geography_points(&self, file: &str, points: &GeographyPoints) -> Result<()> {
        self.save_xml(&store_path(GEOGRAPHY_DIR, file), points)
    }

    pub fn save_geography_points_as_text(&self, file: &str, points: &GeographyPoints) -> Result<()> {
        self.save_text(&store_path(GEOGRAPHY_DIR, file), points, None)
    }

    // ---- objective aid profiles

    fn profile_path(name: &str) -> Result<String> {
        if name.is_empty() || name.contains(['/', '\\']) {
            bail!("Invalid objective aid profile name: {:?}", name);
        }
        Ok(store_path(PROFILE_DIR, &format!("{}{}", name, PROFILE_EXT)))
    }

    /// Profile names from both `.aids` files and their XML copies, sorted
    pub fn obj_aids_profile_names(&self) -> Result<Vec<String>> {
        let xml_ext = xml_file_name(PROFILE_EXT);
        let mut names = BTreeSet::new();
        for ext in [PROFILE_EXT, xml_ext.as_str()] {
            let files = self
                .store
                .list(PROFILE_DIR, ext)
                .with_context(|| format!("Failed to list profiles in {}", PROFILE_DIR))?;
            names.extend(
                files
                    .iter()
                    .filter_map(|file| file.strip_suffix(ext))
                    .filter(|name| !name.is_empty())
                    .map(str::to_string),
            );
        }
        Ok(names.into_iter().collect())
    }

    pub fn site_obj_aids_profile(&self, name: &str) -> Result<DefaultObjAidTechniques> {
        self.load(&Self::profile_path(name)?)
    }

    pub fn site_obj_aids_profile_from_text(&self, name: &str) -> Result<DefaultObjAidTechniques> {
        self.from_text(&Self::profile_path(name)?)
    }

    pub fn save_obj_aids_profile(&self, name: &str, profile: &DefaultObjAidTechniques) -> Result<()> {
        self.save_xml(&Self::profile_path(name)?, profile)
    }

    /// Save a profile as text. A new profile borrows the header of the first
    /// existing profile.
    pub fn save_obj_aids_profile_as_text(&self, name: &str, profile: &DefaultObjAidTechniques) -> Result<()> {
        let path = Self::profile_path(name)?;
        let mut fallback_header = None;
        for other in self.obj_aids_profile_names()? {
            if let Some(existing) = self.read_file(&Self::profile_path(&other)?)? {
                fallback_header = Some(legacy::header(&existing, &DefaultObjAidTechniques::LAYOUT));
                break;
            }
        }
        self.save_text(&path, profile, fallback_header)
    }

    /// Delete the XML copy of a profile
    pub fn delete_obj_aids_profile(&self, name: &str) -> Result<bool> {
        let path = xml_path(&Self::profile_path(name)?);
        let deleted = self
            .store
            .delete(&path)
            .with_context(|| format!("Failed to delete {}", path))?;
        if deleted {
            tracing::info!("Deleted objective aid profile {}", path);
            self.notifier.emit(ConfigChange::ProfileDeleted {
                name: name.to_string(),
            });
        } else {
            tracing::warn!("Objective aid profile {} does not exist", path);
        }
        Ok(deleted)
    }

    // ---- miscellaneous files

    /// Non-empty trimmed lines of `storm.table`
    pub fn load_storm_table(&self) -> Result<Vec<String>> {
        let path = config_path(STORM_TABLE_FILE);
        let Some(contents) = self.read_file(&path)? else {
            tracing::warn!("Storm table not found: {}", path);
            return Ok(Vec::new());
        };
        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Store directory holding the ATCF templates
    pub fn template_directory(&self) -> String {
        format!("{}/", TEMPLATE_DIR)
    }

    /// Write `json/<file>` unless it already exists. Returns the store path.
    pub fn save_atcf_json(&self, file: &str, content: &str) -> Result<String> {
        let path = store_path(JSON_DIR, file);
        if self.read_file(&path)?.is_some() {
            tracing::info!("{} already exists, not overwriting", path);
            return Ok(path);
        }
        let result = self
            .store
            .write(&path, content)
            .with_context(|| format!("Failed to write {}", path));
        self.finish_save(path.clone(), SaveFormat::Text, result)?;
        Ok(path)
    }

    // ---- environment

    /// `atcf.properties`, loaded on first use
    pub fn env_config(&self) -> &AtcfEnvironmentConfig {
        self.env_config.get_or_init(|| self.load_env_config())
    }

    fn load_env_config(&self) -> AtcfEnvironmentConfig {
        let path = config_path(PROPERTIES_FILE);
        let contents = match self.read_file(&path) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                tracing::warn!("{} not found, using environment and defaults", path);
                String::new()
            }
            Err(e) => {
                tracing::error!("{:#}", e);
                String::new()
            }
        };

        match read_properties(&contents) {
            Ok(properties) => {
                for key in AtcfEnvironmentConfig::missing_keys(&properties) {
                    tracing::warn!("ATCF property {} not set, using default", key);
                }
                AtcfEnvironmentConfig::from_properties(&properties)
            }
            Err(e) => {
                tracing::warn!("Using default ATCF environment: {:#}", e);
                AtcfEnvironmentConfig::default()
            }
        }
    }
}
