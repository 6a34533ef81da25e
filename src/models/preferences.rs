use crate::error::PreferenceError;
use crate::legacy::{DELETION_WARNING, Layout, LegacyConfig, Separator};
use crate::xml::XmlDocument;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const VALUE_FALSE: &str = "FALSE";
const VALUE_TRUE: &str = "TRUE";

/// How a preference value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Flag,
    Number,
}

macro_rules! preference_options {
    ($($variant:ident => ($name:literal, $desc:literal, $default:expr, $kind:ident)),+ $(,)?) => {
        /// Every preference known to `atcfsite.prefs`
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PreferenceOption {
            $($variant),+
        }

        impl PreferenceOption {
            pub const ALL: &'static [PreferenceOption] = &[$(PreferenceOption::$variant),+];

            /// Key as written in the legacy file
            pub fn name(self) -> &'static str {
                match self {
                    $(PreferenceOption::$variant => $name),+
                }
            }

            pub fn description(self) -> &'static str {
                match self {
                    $(PreferenceOption::$variant => $desc),+
                }
            }

            pub fn default_value(self) -> &'static str {
                match self {
                    $(PreferenceOption::$variant => $default),+
                }
            }

            pub fn kind(self) -> ValueKind {
                match self {
                    $(PreferenceOption::$variant => ValueKind::$kind),+
                }
            }
        }
    };
}

preference_options! {
    ForecastCenter => ("forecast-center", "Forecaster center", "OFCL", Text),
    StationCode => ("station-code", "Station Code", "KNHC", Text),
    ForecastCtr => ("forecast-ctr(old)", "Forecast center (old)", "OFCO", Text),
    DdnCode => ("ddn-code", "ATCF Requestor code for ATCF DDN messages to FNMOC", "ATCM", Text),
    CenterName => ("center-name", "Forecast center name", "NOTUSEDFORNHC", Text),
    MapArea => ("map-area", "Default map area", "AREAOFOPERAT", Text),
    Editor => ("editor", "Text file editor", "kwrite-graphicssystemraster", Text),
    HighResolutionMap => ("high-resolution-map", "Higher resoluton map", VALUE_TRUE, Flag),
    HighResThreshold => ("high-res-threshold(nm)", "Threshold value to use higher resolution map", "1000", Number),
    MaxZoomLimit => ("max-zoom-limit(nm)", "Maximum zoom limit", "30", Number),
    ColorPrinter => ("color-printer", "Color printer", VALUE_TRUE, Flag),
    Logo => ("logo", "Display logo", VALUE_FALSE, Flag),
    LogoFile => ("logofile", "Image logo file name", "noaalogo75.bmp", Text),
    LogoPosition => ("logo-position", "Logo position", "upper right", Text),
    AtcfIdPosition => ("ATCF-id-position", "ATCF ID position", "lower right", Text),
    CenterIdPosition => ("center-id-position", "Center ID position", "lower right", Text),
    GraphicLabel => ("graphic-label", "Add a label to the top of ATCF graphic", VALUE_TRUE, Flag),
    AutoRelocateLabels => ("auto-relocate-labels", "Automatically relocate boxed labels when scaling", VALUE_TRUE, Flag),
    RelocateLabelOffset => ("relocate-label-offset", "Number of characters to offset labels", "2", Number),
    LatLonLineFreq => ("latlon-line-freq", "Lat/lon line frequency", "1", Number),
    MapLinesBold => ("map-lines-bold", "Bold Lines (for printing, all aids)", VALUE_TRUE, Flag),
    MapLinesWidth => ("map-lines-width", "Width of map lines in pixels", "2", Number),
    GeographyLabels => ("geography-labels", "Geography Labels", VALUE_FALSE, Flag),
    MapWinWidth => ("map-win-width(pixels)", "Storm window width in pixels", "1024", Number),
    MapWinHeight => ("map-win-height(pixels)", "storm window height in pixels", "768", Number),
    LoopWinWidth => ("loopwin-width(pixels)", "Two panel loop window width in pixels", "761", Number),
    LoopWinHeight => ("loopwin-height(pixels)", "Two panel loop window height in pixels", "782", Number),
    PlotterLandscape => ("plotter-landscape", "Plotter page orientation", VALUE_TRUE, Flag),
    PlotterWidth => ("plotter-width(inches)", "Plotter page width in inches", "40", Number),
    PlotterHeight => ("plotter-height(inches)", "Plotter page height in inches", "36", Number),
    BtrackDashnDotsOn => ("btrack-dashndots-on", "Storm track as dots (TD), dashes (TS) and solid lines (TY or HU).", VALUE_TRUE, Flag),
    BtrackIntensitiesOn => ("btrack-intensities-on", "Best track intensities.", VALUE_FALSE, Flag),
    BtrackWindRadiiOn => ("btrack-windradii-on", "Best track wind radii.", VALUE_TRUE, Flag),
    BtrackSpecialStType => ("btrack-special-sttype", "SD, SS, LO, WV, ET, EX, PT, MD, at special storm type positions.", VALUE_FALSE, Flag),
    OldFixesGreyedOut => ("old-fixes-greyed-out", "Grey out old fixes.", VALUE_FALSE, Flag),
    OldFixesTimeRange => ("old-fixes-time-range", "Age of fixes to grey out.", "30", Number),
    NewFixDisplayOnly => ("new-fix-display-only", "Display fixes within selected time range.", VALUE_TRUE, Flag),
    NewFixTimeRange => ("new-fix-time-range", "Age of fixes for display.", "3", Number),
    ConfRadTimeRange => ("conf-rad-time-range", "Time range for fix confidence circles.", "3", Number),
    FixConfRadiiOn => ("fix-conf-radii-on", "Display fix confidence circles.", VALUE_FALSE, Flag),
    FixWindRadiiOn => ("fix-windradii-on", "Display fix wind radii.", VALUE_FALSE, Flag),
    FixRadTimeRange => ("fix-rad-time-range", "Time range for fix wind radii.", "7", Number),
    FixAutolabelOn => ("fix-autolabel-on", "Autolabel fixes.", VALUE_FALSE, Flag),
    FixAutolabTimeRange => ("fix-autolab-time-range", "Time range for fix autolabels.", "30", Number),
    FixSiteLabelOn => ("fix-site-label-on", "Include site in fix label.", VALUE_TRUE, Flag),
    FixTnumLabelOn => ("fix-tnum-label-on", "Include T Num and CI Num in fix label.", VALUE_TRUE, Flag),
    FixHideNoncenter => ("fix-hide-noncenter", "Hide non-center fixes.", VALUE_FALSE, Flag),
    FixNoncenterNative => ("fix-noncenter-native", "Display non-center fixes in native fix color.", VALUE_FALSE, Flag),
    FixSelectDups => ("fix-select-dups", "Have user select from multiple fixes for mouse-over.", VALUE_FALSE, Flag),
    RightMarginSize => ("right-margin-size", "Num of characters for labels in right margin.", "40", Number),
    BogusPriorityLevels => ("bogus-priority-levels", "Priority levels for bogus/compuete.", "8", Number),
    UseTau60 => ("useTAU60", "Allow forecast for TAU 60.", VALUE_FALSE, Flag),
    ForecastTauLabels => ("forecast_tau_labels", "Show TAU labels on obj aid tracks during forecast.", VALUE_FALSE, Flag),
    ForecastCompleteTrack => ("forecast_complete_trac", "Show complete obj aid tracks during forecast.", VALUE_FALSE, Flag),
    ForecastConsensusAid => ("forecast_consensus_aid", "Show consensus obj aid tracks during forecast.", VALUE_TRUE, Flag),
    ConsensusAidName => ("consensusAidName", "Consensus aid default name for track.", "TVCN", Text),
    ConsensusIntName => ("consensusIntName", "Consensus aid default name for intensity.", "IVCN", Text),
    ConsensusRadName => ("consensusRadName", "Consensus aid default name for wind radii.", "RVCN", Text),
    AidsLoop => ("aidsLoop", "Field loop on during forecast track.", VALUE_FALSE, Flag),
    AidsProb => ("aidsProb", "GPCE probability on.", VALUE_FALSE, Flag),
    AidsProbClim => ("aidsProbClim", "GPCE climatology probability on.", VALUE_FALSE, Flag),
    AidsGpceAx => ("aidsGPCE_AX", "GPCE climatology AX on.", VALUE_TRUE, Flag),
    AidsPest => ("aidsPEST", "PEST probability aid on.", VALUE_FALSE, Flag),
    AidsDashesDots => ("aidsDashesDots", "Aid line styles, solid tau 0-72, dashes 72-120, dots 120+.", VALUE_TRUE, Flag),
    TechListFile => ("techlistfile", "Techlist file name.", "techlist.dat", Text),
    SynopticDataRange => ("synoptic_data_range", "Range (hours) to plot synoptic data.", "0", Number),
    ScatterometerRange => ("scatterometer_range", "Range (hours) to plot scatterometer data.", "1", Number),
    CloudTrackWindRange => ("cloud_track_wind_range", "Range (hours) to plot cloud track wind range data.", "2", Number),
    RaobPibalRange => ("raob/pibal_range", "Range (hours) to plot raob range data.", "3", Number),
    AircraftReportRange => ("aircraft_report_range", "Range (hours) to plot a/c data.", "4", Number),
    AltSigWaveHtRange => ("alt_sig_wave_ht_range", "Range (hours) to plot altimeter sig wave heights.", "5", Number),
    DispStormSymbols => ("disp-storm-symbols", "Display storm symbols.", VALUE_FALSE, Flag),
    DispStormNumber => ("disp-storm-number", "Display storm number.", VALUE_FALSE, Flag),
    DispTracklinesLegend => ("disp-tracklines-legend", "Display track lines legend...", VALUE_FALSE, Flag),
    BtrackColorIntensity => ("btrack-color-intensity", "Storm track in colors based on intensity (TD, TS, and TY/HU)", VALUE_FALSE, Flag),
    DispTrackColorLeg => ("disp-track-color-leg", "Display track color legend.", VALUE_FALSE, Flag),
    StrackColorsSsScale => ("strack-colors-ss-scale", "Storm track in colors based on Saffir-Simpson scale (Cat 1 - Cat 5)", VALUE_FALSE, Flag),
    DispSsColorLegend => ("disp-ss-color-legend", "Display Saffir-Simpson color legend ...", VALUE_FALSE, Flag),
    DispTrackLabels => ("disp-track-labels", "Display tracks label ...", VALUE_FALSE, Flag),
    BtrackLabelsOn => ("btrack-labels-on", "Best track labels", VALUE_FALSE, Flag),
    ObjTrack => ("obj-track", "Obj Track", "0", Number),
    ObjTrackInt => ("obj-track-int", "Obj Track Int", "0", Number),
    ObjTrackRadii => ("obj-track-radii", "Obj Track Radii", "0", Number),
    FcstTrackLabelType => ("fcstLabelSolidDashDot", "Forecast Track label type:", "solid", Text),
    AdvisoryForecastRange => ("advisory-fcst-range", "Ending TAU for forecast in advisories", "72", Number),
    AdvisoryOutlookRange => ("advisory-outlook-range", "Ending TAU for outlook in advisories", "120", Number),
    TauLimit64KtWindRadii => ("tauLimit64KtWindRadii", "Highest TAU for 64kt wind radii fcst", "48", Number),
    TauLimitAllWindRadii => ("tauLimitAllWindRadii", "Highest TAU for all wind radii fcst", "72", Number),
}

impl PreferenceOption {
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|option| option.name() == name)
    }
}

/// One `name: value` line of `atcfsite.prefs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtcfSitePreferenceEntry {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@value")]
    pub value: String,
}

/// Site preferences from `atcfsite.prefs`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtcfSitePreferences {
    #[serde(rename = "Header", default, with = "crate::xml::header_lines")]
    pub header: String,
    #[serde(rename = "Preference", default)]
    pub preferences: Vec<AtcfSitePreferenceEntry>,
}

impl AtcfSitePreferences {
    /// Every known option set to its default
    pub fn with_defaults() -> Self {
        let mut prefs = Self::default();
        prefs.fill_defaults();
        prefs
    }

    /// Append an entry with the default value for every option not present
    pub fn fill_defaults(&mut self) {
        for option in PreferenceOption::ALL {
            if self.preference(option.name()).is_none() {
                self.preferences.push(AtcfSitePreferenceEntry {
                    name: option.name().to_string(),
                    value: option.default_value().to_string(),
                });
            }
        }
    }

    pub fn preference(&self, name: &str) -> Option<&AtcfSitePreferenceEntry> {
        self.preferences.iter().find(|entry| entry.name == name)
    }

    pub fn preference_names(&self) -> Vec<&str> {
        self.preferences.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn preference_values(&self) -> Vec<&str> {
        self.preferences.iter().map(|e| e.value.as_str()).collect()
    }

    /// Set a preference, adding it if absent
    pub fn set(&mut self, option: PreferenceOption, value: impl Into<String>) {
        let value = value.into();
        match self
            .preferences
            .iter_mut()
            .find(|entry| entry.name == option.name())
        {
            Some(entry) => entry.value = value,
            None => self.preferences.push(AtcfSitePreferenceEntry {
                name: option.name().to_string(),
                value,
            }),
        }
    }

    /// Raw value, falling back to the option's default
    pub fn value(&self, option: PreferenceOption) -> &str {
        self.preference(option.name())
            .map_or(option.default_value(), |entry| entry.value.as_str())
    }

    /// `true` only for a case-insensitive `TRUE`
    pub fn flag(&self, option: PreferenceOption) -> bool {
        self.value(option).eq_ignore_ascii_case("true")
    }

    pub fn number(&self, option: PreferenceOption) -> Result<i32, PreferenceError> {
        let value = self.value(option);
        value
            .trim()
            .parse()
            .map_err(|_| PreferenceError::NotANumber {
                name: option.name().to_string(),
                value: value.to_string(),
            })
    }

    /// Look a preference up by its legacy key
    pub fn value_by_name(&self, name: &str) -> Result<&str, PreferenceError> {
        PreferenceOption::from_name(name)
            .map(|option| self.value(option))
            .or_else(|| self.preference(name).map(|entry| entry.value.as_str()))
            .ok_or_else(|| PreferenceError::Unknown(name.to_string()))
    }

    pub fn forecast_center(&self) -> &str {
        self.value(PreferenceOption::ForecastCenter)
    }

    pub fn station_code(&self) -> &str {
        self.value(PreferenceOption::StationCode)
    }

    pub fn map_area(&self) -> &str {
        self.value(PreferenceOption::MapArea)
    }

    pub fn high_resolution_map(&self) -> bool {
        self.flag(PreferenceOption::HighResolutionMap)
    }

    pub fn high_res_threshold(&self) -> Result<i32, PreferenceError> {
        self.number(PreferenceOption::HighResThreshold)
    }

    pub fn max_zoom_limit(&self) -> Result<i32, PreferenceError> {
        self.number(PreferenceOption::MaxZoomLimit)
    }

    pub fn use_tau60(&self) -> bool {
        self.flag(PreferenceOption::UseTau60)
    }

    pub fn consensus_aid_name(&self) -> &str {
        self.value(PreferenceOption::ConsensusAidName)
    }

    pub fn tech_list_file(&self) -> &str {
        self.value(PreferenceOption::TechListFile)
    }

    pub fn advisory_forecast_range(&self) -> Result<i32, PreferenceError> {
        self.number(PreferenceOption::AdvisoryForecastRange)
    }

    pub fn advisory_outlook_range(&self) -> Result<i32, PreferenceError> {
        self.number(PreferenceOption::AdvisoryOutlookRange)
    }

    pub fn tau_limit_64kt_wind_radii(&self) -> Result<i32, PreferenceError> {
        self.number(PreferenceOption::TauLimit64KtWindRadii)
    }

    pub fn tau_limit_all_wind_radii(&self) -> Result<i32, PreferenceError> {
        self.number(PreferenceOption::TauLimitAllWindRadii)
    }
}

impl XmlDocument for AtcfSitePreferences {
    const ROOT: &'static str = "AtcfSitePreferences";
}

impl LegacyConfig for AtcfSitePreferences {
    const LAYOUT: Layout = Layout::standard(Separator::Colon);

    fn from_items(items: Vec<Vec<String>>) -> Self {
        let mut prefs = Self::default();
        for item in items {
            match item.as_slice() {
                [name, value, ..] => prefs.preferences.push(AtcfSitePreferenceEntry {
                    name: name.trim().to_string(),
                    value: value.trim().to_string(),
                }),
                _ => tracing::warn!("Invalid site preference entry: {}", item.join(":")),
            }
        }
        prefs.fill_defaults();
        prefs
    }

    fn write_body(&self, out: &mut String) {
        out.push_str(DELETION_WARNING);
        out.push('\n');
        for entry in &self.preferences {
            let _ = writeln!(out, "{:<24}{}", format!("{}:", entry.name), entry.value);
        }
    }

    fn header(&self) -> &str {
        &self.header
    }

    fn set_header(&mut self, header: String) {
        self.header = header;
    }
}
