use std::io::Write;
use std::path::PathBuf;

use approx::assert_relative_eq;
use cuc::{CucError, Family, Reference, ReferenceView, UnitConverter};
use tempfile::{Builder, NamedTempFile};

// ═══════════════════════════════════════════════════════════════════
//  YAML reference files (CUSTOM-UNIT section)
// ═══════════════════════════════════════════════════════════════════

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/custom-unit.yml")
}

fn yml(content: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(".yml").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn load_fixture_and_convert() {
    cuc::logging::init_test();

    let mut cuc = UnitConverter::new();
    let families = cuc.load_custom_unit(fixture()).unwrap().unwrap();
    let names: Vec<_> = families.names().collect();
    assert_eq!(names, ["CUSTOM", "ENERGY", "HEAT-CAPACITY"]);

    assert_relative_eq!(cuc.convert(25.0, "J/mol.K", "J/kmol.K", None).unwrap(), 25_000.0);
    assert_relative_eq!(cuc.to(1.0, "kcal => J", None).unwrap(), 1.0 / 0.000239006, max_relative = 1e-9);
    assert_eq!(
        cuc.find_reference("kJ", "BTU").unwrap(),
        Family::Custom(Some("ENERGY".into()))
    );
}

#[test]
fn with_reference_file() {
    let cuc = UnitConverter::with_reference_file(fixture()).unwrap();
    assert_relative_eq!(
        cuc.convert(2.0, "kJ/mol.K", "J/mol.K", Some("custom::heat-capacity")).unwrap(),
        2000.0,
        max_relative = 1e-12
    );
    // builtin tables still apply
    assert_eq!(cuc.convert(1.0, "MPa", "Pa", None).unwrap(), 1_000_000.0);
}

#[test]
fn check_sub_family_reference() {
    let cuc = UnitConverter::with_reference_file(fixture()).unwrap();

    let reference = cuc.check_reference("custom::HEAT-CAPACITY", true).unwrap();
    let table = reference.as_table().unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.value("J/kmol.K"), Some(1000.0));

    let Reference::Raw(ReferenceView::Custom { name, table }) =
        cuc.check_reference("CUSTOM::energy", false).unwrap()
    else {
        panic!("expected a raw sub-family table");
    };
    assert_eq!(name, "ENERGY");
    assert_eq!(table.len(), 5);
}

#[test]
fn second_load_upserts() {
    let first = yml("CUSTOM-UNIT:\n  E:\n    a: 1\n    c: 3\n");
    let second = yml("CUSTOM-UNIT:\n  E:\n    b: 2\n    c: 30\n");

    let mut cuc = UnitConverter::new();
    cuc.load_custom_unit(first.path()).unwrap();
    let families = cuc.load_custom_unit(second.path()).unwrap().unwrap();

    let e = families.get("E").unwrap();
    assert_eq!(e.len(), 3);
    assert_eq!(e["a"], 1.0);
    assert_eq!(e["b"], 2.0);
    assert_eq!(e["c"], 30.0);
}

#[test]
fn empty_document_returns_none() {
    let empty = yml("");
    let mut cuc = UnitConverter::new();
    assert!(cuc.load_custom_unit(empty.path()).unwrap().is_none());
    assert_eq!(cuc.store().custom_families().len(), 1);
}

#[test]
fn missing_file() {
    let mut cuc = UnitConverter::new();
    let err = cuc.load_custom_unit("does/not/exist.yml").unwrap_err();
    assert!(matches!(err, CucError::FileNotFound { .. }), "got {err:?}");
}

#[test]
fn wrong_extension() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(br#"{"CUSTOM-UNIT": {"E": {"a": 1}}}"#).unwrap();

    let mut cuc = UnitConverter::new();
    let err = cuc.load_custom_unit(file.path()).unwrap_err();
    assert!(matches!(err, CucError::UnsupportedFormat { .. }), "got {err:?}");
}

#[test]
fn missing_custom_unit_key() {
    let file = yml("UNITS:\n  E:\n    a: 1\n");
    let mut cuc = UnitConverter::new();
    let err = cuc.load_custom_unit(file.path()).unwrap_err();
    assert!(matches!(err, CucError::Schema(_)), "got {err:?}");
}

#[test]
fn malformed_yaml() {
    let file = yml("CUSTOM-UNIT: [unclosed\n");
    let mut cuc = UnitConverter::new();
    let err = cuc.load_custom_unit(file.path()).unwrap_err();
    assert!(matches!(err, CucError::Yaml { .. }), "got {err:?}");
}

#[test]
fn sub_families_scanned_by_name() {
    // the same pair lives in two sub-families: ALPHA is scanned before ZETA
    let file = yml("CUSTOM-UNIT:\n  ZETA:\n    x: 1\n    y: 3\n  ALPHA:\n    x: 1\n    y: 2\n");
    let cuc = UnitConverter::with_reference_file(file.path()).unwrap();

    assert_eq!(cuc.find_reference("x", "y").unwrap(), Family::Custom(Some("ALPHA".into())));
    assert_eq!(cuc.convert(1.0, "x", "y", None).unwrap(), 2.0);
    assert_eq!(cuc.convert(1.0, "x", "y", Some("CUSTOM")).unwrap(), 2.0);
    assert_eq!(cuc.convert(1.0, "x", "y", Some("CUSTOM::ZETA")).unwrap(), 3.0);
}

#[test]
fn unit_missing_from_named_sub_family() {
    let cuc = UnitConverter::with_reference_file(fixture()).unwrap();
    let err = cuc.convert(1.0, "J", "J/mol.K", Some("CUSTOM::ENERGY")).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        CucError::UnitNotInTable { unit, .. } if unit == "J/mol.K"
    ));
}
