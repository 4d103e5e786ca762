use georisk_map::{ColumnDetector, DetectionError, DetectionProfile, detect_columns};
use georisk_model::{SemanticRole, SourceKind};

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn robberies_schema_maps_descriptive_roles() {
    let columns = cols(&[
        "fecha_hecho",
        "comuna",
        "barrio",
        "sede_receptora",
        "conducta",
        "modalidad",
        "categoria_bien",
        "bien",
        "medio_transporte",
        "arma_medio",
        "sexo",
    ]);
    let map = detect_columns(
        &columns,
        &DetectionProfile::for_source(SourceKind::Robberies),
    )
    .unwrap();

    assert_eq!(map.dataset(), "robberies");
    assert_eq!(map.get(SemanticRole::Date), Some("fecha_hecho"));
    assert_eq!(map.get(SemanticRole::Asset), Some("bien"));
    assert_eq!(map.get(SemanticRole::Transport), Some("medio_transporte"));
    assert_eq!(map.get(SemanticRole::Weapon), Some("arma_medio"));
    assert_eq!(map.get(SemanticRole::Office), Some("sede_receptora"));
    assert!(!map.contains(SemanticRole::Municipality));
}

#[test]
fn police_without_case_count_is_rejected() {
    let columns = cols(&["departamento", "municipio", "fecha hecho", "genero"]);
    let err = detect_columns(&columns, &DetectionProfile::for_source(SourceKind::Police))
        .unwrap_err();

    assert_eq!(err.dataset(), "police");
    assert_eq!(err.role(), SemanticRole::CaseCount);
    assert!(matches!(err, DetectionError::MandatoryColumnMissing { .. }));
    assert!(err.to_string().contains("case_count"));
}

#[test]
fn communes_detect_year_and_cases() {
    let columns = cols(&["comuna", "anio", "casos"]);
    let map = detect_columns(
        &columns,
        &DetectionProfile::for_source(SourceKind::Communes),
    )
    .unwrap();
    assert_eq!(map.get(SemanticRole::Commune), Some("comuna"));
    assert_eq!(map.get(SemanticRole::Year), Some("anio"));
    assert_eq!(map.get(SemanticRole::CaseCount), Some("casos"));
}

#[test]
fn rent_value_collects_every_price_column() {
    let columns = cols(&[
        "sector",
        "barrio",
        "promedio_apartamento",
        "rango_casa",
        "precio_local",
        "estrato",
    ]);
    let map = ColumnDetector::new()
        .detect(&columns, &DetectionProfile::for_source(SourceKind::Rent))
        .unwrap();
    assert_eq!(
        map.get_all(SemanticRole::RentValue),
        cols(&["promedio_apartamento", "rango_casa", "precio_local"]).as_slice()
    );
}

#[test]
fn rent_without_price_columns_still_detects() {
    let columns = cols(&["sector", "estrato"]);
    let map = detect_columns(&columns, &DetectionProfile::for_source(SourceKind::Rent)).unwrap();
    assert!(map.get_all(SemanticRole::RentValue).is_empty());
    assert_eq!(map.get(SemanticRole::Sector), Some("sector"));
}
