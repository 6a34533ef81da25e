//! Integration tests for AtcfConfigurationManager over a directory store
//!
//! These tests verify:
//! - XML-first loading with legacy text fallback and XML caching
//! - Header preservation when saving legacy text
//! - Objective aid profile listing, saving and deletion
//! - Geography, storm table, JSON and environment helpers
//! - Color listener notification

use atcf_config::models::{
    ColorSelectionGroup, FixSites, GeographyPoint, MaxWindGustPairs, PreferenceOption,
    SidebarMenuSelection,
};
use atcf_config::{AtcfConfigurationManager, ColorConfigurationListener, ConfigKind};
use camino::Utf8PathBuf;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

const FIX_SITES: &str = "\
Fix sites for the ATCF
DO NOT DELETE THE NEXT TWO LINES -- ATCF depends on them.
START_OF_DATA

PGTW     0
KNES     0
RJTD     1
";

const PREFS: &str = "\
Site preferences
DO NOT DELETE THE NEXT TWO LINES -- ATCF depends on them.
START_OF_DATA

forecast-center:        CPHC
useTAU60:               TRUE
max-zoom-limit(nm):     45
";

const CPA: &str = "\
# Closest point of approach locations
# lat    lon    destination   priority
25.8N  80.3W   MIAMI                   1
21.3N  157.9W  HONOLULU                2
";

const GUST: &str = "

  Max wind to gust conversion

DO NOT DELETE THE NEXT TWO LINES -- ATCF depends on them.
START_OF_DATA

  35    45
  50    65
";

const COLSEL: &str = "\
Color selections
DO NOT DELETE THE NEXT TWO LINES -- ATCF depends on them.
START_OF_DATA
MAPDSPLY
background   : 1  2
land         : 3
PRINTER_COLORS
background   : 4
PLOTTER_COLORS
background   : 5
";

const PROFILE: &str = "\
NHC aids profile
DO NOT DELETE THE NEXT TWO LINES -- ATCF depends on them.
START_OF_DATA

OFCL    Official forecast
CLP5    CLIPER model
";

fn create_test_store() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    fs::create_dir_all(root.join("atcf/config/profile")).unwrap();
    fs::create_dir_all(root.join("atcf/config/geography")).unwrap();
    (temp_dir, root)
}

fn write(root: &Utf8PathBuf, path: &str, contents: &str) {
    fs::write(root.join(path), contents).unwrap();
}

#[test]
fn test_open_requires_directory() {
    let (_temp_dir, root) = create_test_store();
    assert!(AtcfConfigurationManager::open(root.join("missing")).is_err());
    assert!(AtcfConfigurationManager::open(&root).is_ok());
}

#[test]
fn test_legacy_file_is_cached_as_xml() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/fixsites.dat", FIX_SITES);

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    let sites = manager.fix_sites().unwrap();
    assert_eq!(sites.site_names(), vec!["PGTW", "KNES", "RJTD"]);

    let xml = root.join("atcf/config/fixsites.xml");
    assert!(xml.exists());

    // The XML copy wins once it exists, even without the legacy file
    fs::remove_file(root.join("atcf/config/fixsites.dat")).unwrap();
    let fresh = AtcfConfigurationManager::open(&root).unwrap();
    assert_eq!(fresh.fix_sites().unwrap(), sites);
}

#[test]
fn test_preferences_fill_defaults() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/atcfsite.prefs", PREFS);

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    let prefs = manager.preferences_from_text().unwrap();

    assert_eq!(prefs.forecast_center(), "CPHC");
    assert!(prefs.use_tau60());
    assert_eq!(prefs.max_zoom_limit().unwrap(), 45);
    assert_eq!(prefs.station_code(), "KNHC");
    assert_eq!(prefs.preferences.len(), PreferenceOption::ALL.len());
    assert_eq!(prefs.preference_names()[..3], ["forecast-center", "useTAU60", "max-zoom-limit(nm)"]);

    // Pure parse, no XML copy
    assert!(!root.join("atcf/config/atcfsite.prefs.xml").exists());
}

#[test]
fn test_save_as_text_keeps_file_header() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/cpa.loc", CPA);

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    let mut cpa = manager.cpa_locations().unwrap();
    assert_eq!(cpa.destinations(), vec!["MIAMI", "HONOLULU"]);
    assert_eq!(cpa.location("HONOLULU").unwrap().lon, -157.9);

    cpa.header = "# replaced\n".to_string();
    cpa.locations.shift_remove("MIAMI");
    manager.save_cpa_locations_as_text(&cpa).unwrap();

    let text = fs::read_to_string(root.join("atcf/config/cpa.loc")).unwrap();
    assert!(text.starts_with("# Closest point of approach locations\n# lat"));
    assert!(!text.contains("MIAMI"));
    assert!(text.ends_with("21.3N  157.9W  HONOLULU                2\n"));
}

#[test]
fn test_save_as_text_uses_object_header_for_new_file() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/fixsites.dat", FIX_SITES);

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    let sites = manager.fix_sites().unwrap();
    fs::remove_file(root.join("atcf/config/fixsites.dat")).unwrap();

    manager.save_fix_sites_as_text(&sites).unwrap();
    let text = fs::read_to_string(root.join("atcf/config/fixsites.dat")).unwrap();
    assert_eq!(text, FIX_SITES);
}

const INDENTED_FIX_SITES: &str = "\
Fix sites for the ATCF

  indented line
DO NOT DELETE THE NEXT TWO LINES -- ATCF depends on them.
START_OF_DATA

PGTW     0
RJTD     1
";

#[test]
fn test_export_from_xml_only_store_keeps_header() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/fixsites.dat", INDENTED_FIX_SITES);

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    let sites = manager.fix_sites_from_text().unwrap();
    manager.save_fix_sites(&sites).unwrap();
    fs::remove_file(root.join("atcf/config/fixsites.dat")).unwrap();

    let fresh = AtcfConfigurationManager::open(&root).unwrap();
    let exported = fresh.export_file::<FixSites>("fixsites.dat").unwrap();
    assert_eq!(exported.header, "Fix sites for the ATCF\n\n  indented line\n");
    let text = fs::read_to_string(root.join("atcf/config/fixsites.dat")).unwrap();
    assert_eq!(text, INDENTED_FIX_SITES);

    // A second export reads the header back from the written file
    fresh.export_file::<FixSites>("fixsites.dat").unwrap();
    let again = fs::read_to_string(root.join("atcf/config/fixsites.dat")).unwrap();
    assert_eq!(again, INDENTED_FIX_SITES);
}

#[test]
fn test_gust_export_from_xml_only_store() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/gust.dat", GUST);

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    manager.max_wind_gust_pairs_from_text().unwrap();
    fs::remove_file(root.join("atcf/config/gust.dat")).unwrap();

    let fresh = AtcfConfigurationManager::open(&root).unwrap();
    let gusts = fresh.export_file::<MaxWindGustPairs>("gust.dat").unwrap();
    assert_eq!(gusts.header, "\n  Max wind to gust conversion\n");

    let expected = "\n  Max wind to gust conversion\n\
DO NOT DELETE THE NEXT TWO LINES -- ATCF depends on them.\n\
START_OF_DATA\n\n  35    45\n  50    65\n";
    let text = fs::read_to_string(root.join("atcf/config/gust.dat")).unwrap();
    assert_eq!(text, expected);

    fresh.export_file::<MaxWindGustPairs>("gust.dat").unwrap();
    let again = fs::read_to_string(root.join("atcf/config/gust.dat")).unwrap();
    assert_eq!(again, expected);
}

#[test]
fn test_gust_from_text_writes_xml() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/gust.dat", GUST);

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    let gusts = manager.max_wind_gust_pairs_from_text().unwrap();
    assert_eq!(gusts.gust_for(50), Some(65));
    assert_eq!(gusts.header, "\n  Max wind to gust conversion\n");
    assert!(root.join("atcf/config/gust.xml").exists());
}

#[test]
fn test_missing_files_give_empty_objects() {
    let (_temp_dir, root) = create_test_store();
    let manager = AtcfConfigurationManager::open(&root).unwrap();

    assert!(manager.fix_types().unwrap().types.is_empty());
    assert!(manager.storm_states().unwrap().states.is_empty());
    assert!(manager.atcf_sites().unwrap().sites.is_empty());
    assert!(manager.load_storm_table().unwrap().is_empty());
    assert_eq!(
        manager.sidebar_menu_selection().unwrap(),
        SidebarMenuSelection::default_selection()
    );
    assert!(!root.join("atcf/config/fixtypes.xml").exists());
}

#[test]
fn test_load_configuration_converts_everything_present() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/fixsites.dat", FIX_SITES);
    write(&root, "atcf/config/atcfsite.prefs", PREFS);
    write(&root, "atcf/config/cpa.loc", CPA);
    write(&root, "atcf/config/colsel.dat", COLSEL);
    write(&root, "atcf/config/profile/nhc.aids", PROFILE);
    write(
        &root,
        "atcf/config/geography/geography_al.dat",
        "25.8N 80.3W MIAMI BEACH\n",
    );

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    manager.load_configuration().unwrap();

    for xml in [
        "atcf/config/fixsites.xml",
        "atcf/config/atcfsite.prefs.xml",
        "atcf/config/cpa.loc.xml",
        "atcf/config/colsel.xml",
        "atcf/config/profile/nhc.aids.xml",
        "atcf/config/geography/geography_al.xml",
    ] {
        assert!(root.join(xml).exists(), "{xml} was not written");
    }
    assert_eq!(manager.metrics().xml_conversions.load(Ordering::Relaxed), 6);
}

#[test]
fn test_color_selections() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/colsel.dat", COLSEL);

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    let selections = manager.atcf_color_selections().unwrap();
    assert_eq!(
        selections.map_color_selection("background").unwrap().color_index,
        vec![1, 2]
    );
    assert_eq!(selections.group(ColorSelectionGroup::PrinterColors).len(), 1);
}

struct CountingListener(AtomicUsize);

impl ColorConfigurationListener for CountingListener {
    fn colors_changed(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_color_listeners_notified_on_save() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/colsel.dat", COLSEL);

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    let counter = Arc::new(CountingListener(AtomicUsize::new(0)));
    let listener: Arc<dyn ColorConfigurationListener> = counter.clone();
    assert!(manager.add_color_listener(listener.clone()));

    let mut selections = (*manager.atcf_color_selections().unwrap()).clone();
    selections.map_colors[0].color_index = vec![7];
    manager.save_color_selections(&selections).unwrap();
    assert_eq!(counter.0.load(Ordering::SeqCst), 1);

    // The cache is refreshed by the save
    assert_eq!(
        manager
            .atcf_color_selections()
            .unwrap()
            .map_color_selection("background")
            .unwrap()
            .color_index,
        vec![7]
    );

    assert!(manager.remove_color_listener(&listener));
    manager.save_color_selections_as_text(&selections).unwrap();
    assert_eq!(counter.0.load(Ordering::SeqCst), 1);

    let text = fs::read_to_string(root.join("atcf/config/colsel.dat")).unwrap();
    assert!(text.starts_with("Color selections\nDO NOT DELETE"));
    assert!(text.contains("background   : 7 \n"));
}

#[test]
fn test_objective_aid_profiles() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/profile/nhc.aids", PROFILE);
    write(&root, "atcf/config/profile/cphc.aids.xml", "<DefaultObjAidTechniques/>");

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    assert_eq!(manager.obj_aids_profile_names().unwrap(), vec!["cphc", "nhc"]);

    let nhc = manager.site_obj_aids_profile("nhc").unwrap();
    assert_eq!(nhc.names(), vec!["OFCL", "CLP5"]);
    assert!(root.join("atcf/config/profile/nhc.aids.xml").exists());

    // A new text profile borrows the header of the first profile on disk
    manager.save_obj_aids_profile_as_text("jtwc", &nhc).unwrap();
    let text = fs::read_to_string(root.join("atcf/config/profile/jtwc.aids")).unwrap();
    assert!(text.starts_with("NHC aids profile\nDO NOT DELETE"));
    assert_eq!(manager.site_obj_aids_profile_from_text("jtwc").unwrap(), nhc);

    assert!(manager.delete_obj_aids_profile("nhc").unwrap());
    assert!(!manager.delete_obj_aids_profile("nhc").unwrap());
    assert!(root.join("atcf/config/profile/nhc.aids").exists());
    assert!(manager.delete_obj_aids_profile("../fixsites").is_err());
}

#[test]
fn test_geography_points() {
    let (_temp_dir, root) = create_test_store();
    write(
        &root,
        "atcf/config/geography/geography_wp.dat",
        "13.5N 144.8E GUAM\n14.6N 121.0E metro MANILA\nbad line\n",
    );

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    let mut points = manager.basin_geo_points("WP").unwrap();
    assert_eq!(points.points.len(), 2);
    assert_eq!(points.point_by_name("metro manila").unwrap().name, "Metro Manila");
    assert!(manager.basin_geo_points("IO").is_err());

    points.points.push(GeographyPoint {
        lat: -14.3,
        lon: -170.7,
        name: "Pago Pago".to_string(),
    });
    manager
        .save_geography_points_as_text("geography_wp.dat", &points)
        .unwrap();
    let text = fs::read_to_string(root.join("atcf/config/geography/geography_wp.dat")).unwrap();
    assert!(text.ends_with("14.3S 170.7W PAGO PAGO\n"));
}

#[test]
fn test_storm_table_template_and_json() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/storm.table", "  KATRINA, AL, L\n\n RITA, AL, L \n");

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    assert_eq!(
        manager.load_storm_table().unwrap(),
        vec!["KATRINA, AL, L", "RITA, AL, L"]
    );
    assert_eq!(manager.template_directory(), "atcf/config/templates/");

    let path = manager.save_atcf_json("al092005.json", "{\"a\":1}").unwrap();
    assert_eq!(path, "atcf/config/json/al092005.json");
    manager.save_atcf_json("al092005.json", "{\"a\":2}").unwrap();
    assert_eq!(
        fs::read_to_string(root.join(&path)).unwrap(),
        "{\"a\":1}"
    );
}

#[test]
fn test_env_config_from_properties() {
    let (_temp_dir, root) = create_test_store();
    write(
        &root,
        "atcf/config/atcf.properties",
        "ATCFSITE=CPHC\nFIXDATAIN=fixes/in\nWCOSS_TIMEOUT=12\n",
    );

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    let env = manager.env_config();
    assert_eq!(env.atcf_site, "CPHC");
    assert_eq!(env.fix_data_in, "/awips2/edex/data/atcf/fixes/in");
    assert_eq!(env.wcoss_timeout_secs(), Some(12));
    assert_eq!(env.atcftmp, "/awips2/edex/data/atcf/storms/tmp");
    assert!(std::ptr::eq(env, manager.env_config()));
}

#[test]
fn test_config_kind_convert_and_export() {
    let (_temp_dir, root) = create_test_store();
    write(&root, "atcf/config/fixsites.dat", FIX_SITES);

    let manager = AtcfConfigurationManager::open(&root).unwrap();
    ConfigKind::FixSites.convert(&manager).unwrap();
    assert!(root.join("atcf/config/fixsites.xml").exists());

    let xml = ConfigKind::FixSites.show(&manager).unwrap();
    assert!(xml.contains("<FixSite name=\"RJTD\" retired=\"true\"/>"));

    ConfigKind::FixSites.export_text(&manager).unwrap();
    assert_eq!(
        fs::read_to_string(root.join("atcf/config/fixsites.dat")).unwrap(),
        FIX_SITES
    );

    assert!(ConfigKind::FixTypes.convert(&manager).is_err());
    assert!(ConfigKind::StormStates.export_text(&manager).is_err());
}
