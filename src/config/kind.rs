use super::*;
use clap::ValueEnum;

/// Configuration files the command line tool can address by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum ConfigKind {
    Preferences,
    Cpa,
    FixError,
    FixSites,
    FixTypes,
    MicroSats,
    ScatSats,
    DefaultAids,
    Techlist,
    Colors,
    ColorSelections,
    Gust,
    Initials,
    FullInitials,
    StormStates,
    AtcfSites,
    Sidebar,
}

fn render<T: XmlDocument>(doc: &T) -> Result<String> {
    Ok(xml::to_xml(doc)?)
}

impl ConfigKind {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Preferences => PREFERENCES_FILE,
            Self::Cpa => CPA_FILE,
            Self::FixError => FIX_ERROR_FILE,
            Self::FixSites => FIX_SITES_FILE,
            Self::FixTypes => FIX_TYPES_FILE,
            Self::MicroSats => MICRO_SAT_FILE,
            Self::ScatSats => SCAT_SAT_FILE,
            Self::DefaultAids => DEFAULT_AIDS_FILE,
            Self::Techlist => TECHLIST_FILE,
            Self::Colors => COLOR_TABLE_FILE,
            Self::ColorSelections => COLOR_SELECTION_FILE,
            Self::Gust => GUST_FILE,
            Self::Initials => INITIALS_FILE,
            Self::FullInitials => FULL_INITIALS_FILE,
            Self::StormStates => STORM_STATES_FILE,
            Self::AtcfSites => ATCF_SITES_FILE,
            Self::Sidebar => SIDEBAR_FILE,
        }
    }

    /// Kinds with no legacy text form
    pub fn is_xml_only(self) -> bool {
        matches!(self, Self::StormStates | Self::AtcfSites | Self::Sidebar)
    }

    /// Current contents as XML, loading through the usual XML-first path
    pub fn show(self, mgr: &AtcfConfigurationManager) -> Result<String> {
        match self {
            Self::Preferences => render(&mgr.preferences()?),
            Self::Cpa => render(&mgr.cpa_locations()?),
            Self::FixError => render(&mgr.fix_error()?),
            Self::FixSites => render(&mgr.fix_sites()?),
            Self::FixTypes => render(&mgr.fix_types()?),
            Self::MicroSats => render(&mgr.fix_micro_sats()?),
            Self::ScatSats => render(&mgr.fix_scat_sats()?),
            Self::DefaultAids => render(&mgr.default_obj_aid_techniques()?),
            Self::Techlist => render(&mgr.objective_aid_techniques()?),
            Self::Colors => render(mgr.atcf_custom_colors()?.as_ref()),
            Self::ColorSelections => render(mgr.atcf_color_selections()?.as_ref()),
            Self::Gust => render(&mgr.max_wind_gust_pairs()?),
            Self::Initials => render(&mgr.forecaster_initials()?),
            Self::FullInitials => render(&mgr.full_initials()?),
            Self::StormStates => render(&mgr.storm_states()?),
            Self::AtcfSites => render(&mgr.atcf_sites()?),
            Self::Sidebar => render(&mgr.sidebar_menu_selection()?),
        }
    }

    /// Re-parse the legacy text and overwrite the XML copy
    pub fn convert(self, mgr: &AtcfConfigurationManager) -> Result<()> {
        let file = self.file_name();
        match self {
            Self::Preferences => mgr.convert_file::<AtcfSitePreferences>(file).map(drop),
            Self::Cpa => mgr.convert_file::<CpaLocations>(file).map(drop),
            Self::FixError => mgr.convert_file::<FixError>(file).map(drop),
            Self::FixSites => mgr.convert_file::<FixSites>(file).map(drop),
            Self::FixTypes => mgr.convert_file::<FixTypes>(file).map(drop),
            Self::MicroSats => mgr.convert_file::<FixMicrowaveSatelliteTypes>(file).map(drop),
            Self::ScatSats => mgr.convert_file::<FixScatSatTypes>(file).map(drop),
            Self::DefaultAids => mgr.convert_file::<DefaultObjAidTechniques>(file).map(drop),
            Self::Techlist => mgr.convert_file::<ObjectiveAidTechniques>(file).map(drop),
            Self::Colors => mgr.convert_file::<AtcfCustomColors>(file).map(drop),
            Self::ColorSelections => mgr.convert_file::<AtcfColorSelections>(file).map(drop),
            Self::Gust => mgr.convert_file::<MaxWindGustPairs>(file).map(drop),
            Self::Initials => mgr.convert_file::<ForecasterInitials>(file).map(drop),
            Self::FullInitials => mgr.convert_file::<FullInitials>(file).map(drop),
            Self::StormStates | Self::AtcfSites | Self::Sidebar => {
                bail!("{} only exists as XML", file)
            }
        }
    }

    /// Write the current contents back as legacy text
    pub fn export_text(self, mgr: &AtcfConfigurationManager) -> Result<()> {
        let file = self.file_name();
        match self {
            Self::Preferences => mgr.save_preferences_as_text(&mgr.preferences()?),
            Self::Cpa => mgr.save_cpa_locations_as_text(&mgr.cpa_locations()?),
            Self::FixError => mgr.save_fix_error_as_text(&mgr.fix_error()?),
            Self::FixSites => mgr.save_fix_sites_as_text(&mgr.fix_sites()?),
            Self::FixTypes => mgr.save_fix_types_as_text(&mgr.fix_types()?),
            Self::MicroSats => mgr.save_fix_micro_sats_as_text(&mgr.fix_micro_sats()?),
            Self::ScatSats => mgr.save_fix_scat_sats_as_text(&mgr.fix_scat_sats()?),
            Self::Techlist => {
                mgr.save_objective_aid_techniques_as_text(&mgr.objective_aid_techniques()?)
            }
            Self::Colors => mgr.save_custom_colors_as_text(mgr.atcf_custom_colors()?.as_ref()),
            Self::ColorSelections => {
                mgr.save_color_selections_as_text(mgr.atcf_color_selections()?.as_ref())
            }
            Self::DefaultAids => mgr.export_file::<DefaultObjAidTechniques>(file).map(drop),
            Self::Gust => mgr.export_file::<MaxWindGustPairs>(file).map(drop),
            Self::Initials => mgr.export_file::<ForecasterInitials>(file).map(drop),
            Self::FullInitials => mgr.export_file::<FullInitials>(file).map(drop),
            Self::StormStates | Self::AtcfSites | Self::Sidebar => {
                bail!("{} has no legacy text form", file)
            }
        }
    }
}
