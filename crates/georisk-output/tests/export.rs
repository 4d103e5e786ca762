use std::collections::{BTreeMap, BTreeSet};

use tempfile::TempDir;

use georisk_model::{
    AlertLevel, OutputOptions, RiskLevel, UnifiedZoneRecord, ZoneKey,
};
use georisk_output::{read_unified_csv, validate_output, write_csv, write_json, write_outputs};

fn sample_records() -> Vec<UnifiedZoneRecord> {
    let mut bello = UnifiedZoneRecord::empty(ZoneKey::new("ANTIOQUIA|BELLO"));
    bello.police_monthly_avg = Some(2.0);
    bello.police_total = Some(2.0);

    let mut laureles = UnifiedZoneRecord::empty(ZoneKey::new("||BAR_LAURELES"));
    laureles.robberies_monthly_avg = Some(1.5);
    laureles.robberies_total = Some(3.0);
    laureles.rent_avg_apartment = Some(2_000_000.0);
    laureles.risk_index = Some(1.0);
    laureles.risk_level = RiskLevel::Copper;
    laureles.alert_level = AlertLevel::High;

    let mut poblado = UnifiedZoneRecord::empty(ZoneKey::new("||BAR_EL POBLADO"));
    poblado.robberies_monthly_avg = Some(1.0);
    poblado.robberies_total = Some(2.0);
    poblado.rent_avg_apartment = Some(3_000_000.0);
    poblado.risk_index = Some(0.5);
    poblado.risk_level = RiskLevel::Diamond;
    poblado.alert_level = AlertLevel::Safe;

    vec![bello, poblado, laureles]
}

fn level_counts(records: &[UnifiedZoneRecord]) -> BTreeMap<RiskLevel, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.risk_level).or_insert(0) += 1;
    }
    counts
}

#[test]
fn csv_round_trip_keeps_keys_and_levels() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("data_final.csv");
    let records = sample_records();
    write_csv(&records, &path).unwrap();

    let back = read_unified_csv(&path).unwrap();
    let keys = |rs: &[UnifiedZoneRecord]| -> BTreeSet<String> {
        rs.iter().map(|r| r.zone_key.to_string()).collect()
    };
    assert_eq!(keys(&back), keys(&records));
    assert_eq!(level_counts(&back), level_counts(&records));
    assert_eq!(back, records);
}

#[test]
fn csv_header_and_null_cells() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data_final.csv");
    write_csv(&sample_records(), &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();

    insta::assert_snapshot!(lines.next().unwrap(), @"zone_key,robberies_monthly_avg,robberies_total,police_monthly_avg,police_total,commune_yearly_avg,commune_total,rent_avg_apartment,rent_avg_house,rent_avg_commercial,risk_index,risk_level,alert_level");
    assert_eq!(lines.next().unwrap(), "ANTIOQUIA|BELLO,,,2.0,2.0,,,,,,,no data,no data");
}

#[test]
fn empty_export_still_has_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    write_csv(&[], &path).unwrap();
    assert!(read_unified_csv(&path).unwrap().is_empty());
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("zone_key,"));
}

#[test]
fn json_is_an_array_with_nulls() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data_final.json");
    write_json(&sample_records(), &path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 3);
    assert!(array[0]["risk_index"].is_null());
    assert_eq!(array[2]["risk_level"], "copper");
    assert_eq!(array[2]["alert_level"], "high alert");
}

#[test]
fn write_outputs_writes_configured_paths() {
    let dir = TempDir::new().unwrap();
    let options = OutputOptions {
        csv_path: Some(dir.path().join("a.csv")),
        json_path: None,
    };
    let written = write_outputs(&sample_records(), &options).unwrap();
    assert_eq!(written, vec![dir.path().join("a.csv")]);
    assert!(!dir.path().join("a.json").exists());
}

#[test]
fn validation_report_summarizes_export() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data_final.csv");
    write_csv(&sample_records(), &path).unwrap();

    let report = validate_output(&path).unwrap();
    assert_eq!(report.rows, 3);
    assert_eq!(report.columns, 13);
    assert!(report.warnings.is_empty());
    let levels = report.level_distribution.unwrap();
    assert_eq!(levels.len(), 3);
    assert!(levels.contains(&("copper".to_string(), 1)));

    assert_eq!(report.null_counts.len(), 10);
    assert_eq!(report.null_counts[0].1, 3);

    let apartment = report
        .rent_means
        .iter()
        .find(|(name, _)| name == "rent_avg_apartment")
        .unwrap();
    assert_eq!(apartment.1, Some(2_500_000.0));
    let house = report
        .rent_means
        .iter()
        .find(|(name, _)| name == "rent_avg_house")
        .unwrap();
    assert_eq!(house.1, None);

    let first = report.first_record.unwrap();
    assert_eq!(first[0], ("zone_key".to_string(), "ANTIOQUIA|BELLO".to_string()));
}

#[test]
fn validation_warns_without_risk_level() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("partial.csv");
    std::fs::write(&path, "zone_key,robberies_total\nA|B,3\n").unwrap();
    let report = validate_output(&path).unwrap();
    assert!(report.level_distribution.is_none());
    assert_eq!(report.warnings.len(), 1);
}
