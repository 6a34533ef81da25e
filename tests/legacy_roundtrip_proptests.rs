//! Property tests: writing a configuration as legacy text and parsing it
//! back yields the same object, header included. Text that went through the
//! XML copy comes back byte for byte.

use atcf_config::models::{
    AtcfColorSelections, AtcfSitePreferences, ColorSelectionEntry, CpaLocationEntry, CpaLocations,
    DefaultObjAidTechEntry, DefaultObjAidTechniques, FixError, FixErrorEntry, FixSiteEntry,
    FixSites, GustPairEntry, MaxWindGustPairs, ObjectiveAidTechEntry, ObjectiveAidTechniques,
    PreferenceOption,
};
use atcf_config::{LegacyConfig, XmlDocument, xml};
use proptest::prelude::*;

/// Blank, indented or plain header line
fn header_line() -> impl Strategy<Value = String> {
    "( {0,4}[a-z][a-z ]{0,20})?"
}

/// Header kept verbatim up to the deletion warning
fn header() -> impl Strategy<Value = String> {
    prop::collection::vec(header_line(), 0..4).prop_map(|lines| {
        lines.into_iter().map(|line| format!("{line}\n")).collect()
    })
}

/// Header with surrounding blank lines dropped and a leading newline, as in `gust.dat`
fn trimmed_header() -> impl Strategy<Value = String> {
    prop::collection::vec(header_line(), 0..4).prop_map(|lines| {
        let mut lines: Vec<String> = lines
            .into_iter()
            .skip_while(|line| line.trim().is_empty())
            .collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        let mut out = String::from("\n");
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    })
}

/// Space separated words, as they come back from a joined description column
fn words(min: usize, max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z0-9]{1,8}", min..max).prop_map(|words| words.join(" "))
}

fn fix_site() -> impl Strategy<Value = FixSiteEntry> {
    ("[A-Z][A-Z0-9]{0,7}", any::<bool>()).prop_map(|(name, retired)| FixSiteEntry { name, retired })
}

fn weights() -> impl Strategy<Value = [i32; 3]> {
    prop::array::uniform3(-99..1000i32)
}

fn fix_error_entry() -> impl Strategy<Value = FixErrorEntry> {
    ("[A-Z]{1,4}", "[A-Z]{1,4}", weights(), weights(), weights(), any::<bool>()).prop_map(
        |(fix_type, site, posit_weights, intensity_weights, radii_weights, research)| {
            FixErrorEntry {
                fix_type,
                site,
                posit_weights,
                intensity_weights,
                radii_weights,
                research,
            }
        },
    )
}

fn technique() -> impl Strategy<Value = ObjectiveAidTechEntry> {
    (
        0..100i32,
        "[A-Z][A-Z0-9]{0,4}",
        prop::array::uniform4(any::<bool>()),
        any::<bool>(),
        0..100i32,
        words(0, 4),
    )
        .prop_map(|(num, name, [errs, aid_dflt, int_dflt, radii_dflt], retired, color, description)| {
            ObjectiveAidTechEntry {
                num,
                name,
                errs,
                retired,
                color,
                aid_dflt,
                int_dflt,
                radii_dflt,
                description,
            }
        })
}

fn color_selection() -> impl Strategy<Value = ColorSelectionEntry> {
    ("[a-z][a-z_]{0,11}", prop::collection::vec(0..100i32, 1..4))
        .prop_map(|(name, color_index)| ColorSelectionEntry { name, color_index })
}

fn default_aid() -> impl Strategy<Value = DefaultObjAidTechEntry> {
    ("[A-Z][A-Z0-9]{0,6}", words(1, 4))
        .prop_map(|(name, description)| DefaultObjAidTechEntry { name, description })
}

fn gust_pair() -> impl Strategy<Value = GustPairEntry> {
    (0..1000i32, 0..1000i32).prop_map(|(max_wind, gust)| GustPairEntry { max_wind, gust })
}

/// Preference values are trimmed and never contain the separator
fn preference_value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]([A-Za-z0-9 ./-]{0,12}[A-Za-z0-9])?"
}

/// Coordinates in whole tenths survive the one-decimal text format
fn tenths(max: i32) -> impl Strategy<Value = f32> {
    (-max..=max).prop_map(|v| v as f32 / 10.0)
}

/// Legacy text rewritten after a trip through the XML copy
fn through_xml<T: LegacyConfig + XmlDocument>(text: &str) -> String {
    let copy = xml::to_xml(&T::parse_legacy(text)).unwrap();
    xml::from_xml::<T>(&copy).unwrap().to_legacy_text()
}

proptest! {
    #[test]
    fn fix_sites_survive_text(header in header(), sites in prop::collection::vec(fix_site(), 0..20)) {
        let original = FixSites { header, sites };
        let parsed = FixSites::parse_legacy(&original.to_legacy_text());
        prop_assert_eq!(parsed, original);
    }

    #[test]
    fn fix_error_survives_text(header in header(), entries in prop::collection::vec(fix_error_entry(), 0..20)) {
        let original = FixError { header, entries };
        let parsed = FixError::parse_legacy(&original.to_legacy_text());
        prop_assert_eq!(parsed, original);
    }

    #[test]
    fn cpa_locations_survive_text(
        entries in prop::collection::btree_map("[A-Z]{1,12}", (tenths(900), tenths(1800), 0..10i32), 0..10)
    ) {
        let mut original = CpaLocations {
            header: "# destinations\n".to_string(),
            ..CpaLocations::default()
        };
        for (destination, (lat, lon, priority)) in entries {
            original.insert(CpaLocationEntry { lat, lon, destination, priority });
        }
        let parsed = CpaLocations::parse_legacy(&original.to_legacy_text());
        prop_assert_eq!(parsed, original);
    }

    #[test]
    fn techniques_survive_text(header in header(), techniques in prop::collection::vec(technique(), 0..20)) {
        let original = ObjectiveAidTechniques { header, techniques };
        let parsed = ObjectiveAidTechniques::parse_legacy(&original.to_legacy_text());
        prop_assert_eq!(parsed, original);
    }

    #[test]
    fn color_selections_survive_text(
        header in header(),
        map_colors in prop::collection::vec(color_selection(), 0..8),
        printer_colors in prop::collection::vec(color_selection(), 0..8),
        plotter_colors in prop::collection::vec(color_selection(), 0..8),
    ) {
        let original = AtcfColorSelections { header, map_colors, printer_colors, plotter_colors };
        let parsed = AtcfColorSelections::parse_legacy(&original.to_legacy_text());
        prop_assert_eq!(parsed, original);
    }

    #[test]
    fn preferences_survive_text(
        header in header(),
        values in prop::collection::btree_map(0..PreferenceOption::ALL.len(), preference_value(), 0..10)
    ) {
        let mut original = AtcfSitePreferences::with_defaults();
        original.header = header;
        for (idx, value) in values {
            original.set(PreferenceOption::ALL[idx], value);
        }
        let parsed = AtcfSitePreferences::parse_legacy(&original.to_legacy_text());
        prop_assert_eq!(parsed, original);
    }

    #[test]
    fn gust_pairs_survive_text(header in trimmed_header(), pairs in prop::collection::vec(gust_pair(), 0..20)) {
        let original = MaxWindGustPairs { header, pairs };
        let parsed = MaxWindGustPairs::parse_legacy(&original.to_legacy_text());
        prop_assert_eq!(parsed, original);
    }

    #[test]
    fn default_aids_survive_text(header in header(), techniques in prop::collection::vec(default_aid(), 0..20)) {
        let original = DefaultObjAidTechniques { header, techniques };
        let parsed = DefaultObjAidTechniques::parse_legacy(&original.to_legacy_text());
        prop_assert_eq!(parsed, original);
    }

    #[test]
    fn text_survives_xml_copy(
        header in header(),
        gust_header in trimmed_header(),
        sites in prop::collection::vec(fix_site(), 0..10),
        entries in prop::collection::vec(fix_error_entry(), 0..10),
        techniques in prop::collection::vec(technique(), 0..10),
        pairs in prop::collection::vec(gust_pair(), 0..10),
    ) {
        let text = FixSites { header: header.clone(), sites }.to_legacy_text();
        prop_assert_eq!(through_xml::<FixSites>(&text), text);

        let text = FixError { header: header.clone(), entries }.to_legacy_text();
        prop_assert_eq!(through_xml::<FixError>(&text), text);

        let text = ObjectiveAidTechniques { header, techniques }.to_legacy_text();
        prop_assert_eq!(through_xml::<ObjectiveAidTechniques>(&text), text);

        let text = MaxWindGustPairs { header: gust_header, pairs }.to_legacy_text();
        prop_assert_eq!(through_xml::<MaxWindGustPairs>(&text), text);
    }
}
