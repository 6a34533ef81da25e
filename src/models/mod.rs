//! Data models for the ATCF configuration files.
//!
//! Each collection type owns its entry list and, where the legacy format has
//! one, the preserved free-text header:
//! - [`FixSites`], [`FixTypes`], [`FixError`] and the satellite type lists
//! - [`AtcfCustomColors`] and [`AtcfColorSelections`]
//! - [`ObjectiveAidTechniques`] from `techlist.dat` and [`DefaultObjAidTechniques`]
//!   for `default_aids.dat` and the objective aid profiles
//! - [`AtcfSitePreferences`] with the typed [`PreferenceOption`] table
//! - [`CpaLocations`], [`GeographyPoints`], [`MaxWindGustPairs`] and the initials lists
//! - [`StormStates`], [`AtcfSites`] and [`SidebarMenuSelection`], which only exist as XML
//! - [`AtcfEnvironmentConfig`] from `atcf.properties`

pub mod colors;
pub mod cpa;
pub mod environment;
pub mod fix;
pub mod geography;
pub mod gust;
pub mod initials;
pub mod preferences;
pub mod sidebar;
pub mod storms;
pub mod techniques;

pub use colors::{AtcfColorSelections, AtcfCustomColors, ColorSelectionEntry, ColorSelectionGroup, Rgb};
pub use cpa::{CpaLocationEntry, CpaLocations};
pub use environment::AtcfEnvironmentConfig;
pub use fix::{
    FixError, FixErrorEntry, FixMicrowaveSatelliteTypes, FixScatSatTypes, FixSiteEntry, FixSites,
    FixTypeEntry, FixTypes,
};
pub use geography::{GEOGRAPHY_BASINS, GeographyPoint, GeographyPoints, geography_file_name};
pub use gust::{GustPairEntry, MaxWindGustPairs};
pub use initials::{ForecasterInitials, FullInitialEntry, FullInitials};
pub use preferences::{AtcfSitePreferenceEntry, AtcfSitePreferences, PreferenceOption, ValueKind};
pub use sidebar::{SidebarMenuEntry, SidebarMenuSelection};
pub use storms::{AtcfSiteEntry, AtcfSites, StormStateEntry, StormStates};
pub use techniques::{
    DefaultObjAidTechEntry, DefaultObjAidTechniques, ObjectiveAidTechEntry, ObjectiveAidTechniques,
    TechDefault,
};
