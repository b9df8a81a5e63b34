use cuc::{ConversionBlock, CucError, UnitConverter};

// ═══════════════════════════════════════════════════════════════════
//  "from => to" blocks
// ═══════════════════════════════════════════════════════════════════

#[test]
fn parse_pair() {
    let block = ConversionBlock::parse("MPa => Pa").unwrap();
    assert_eq!(block.into_pair(), ("MPa".to_string(), "Pa".to_string()));
}

#[test]
fn missing_separator() {
    assert!(matches!(
        ConversionBlock::parse("MPa Pa"),
        Err(CucError::Parse { .. })
    ));

    let cuc = UnitConverter::new();
    assert!(matches!(cuc.to(1.0, "MPa -> Pa", None), Err(CucError::Parse { .. })));
}

#[test]
fn check_conversion_block() {
    let cuc = UnitConverter::new();
    let block = cuc.check_conversion_block("  J/mol.K=>  kJ/mol.K ").unwrap();
    assert_eq!(block.from, "J/mol.K");
    assert_eq!(block.to, "kJ/mol.K");
}

#[test]
fn block_with_family_override() {
    let cuc = UnitConverter::new();
    assert_eq!(cuc.to(100.0, "C => F", Some("Temperature")).unwrap(), 212.0);
    assert!(matches!(
        cuc.to(100.0, "C => F", Some("heat")),
        Err(CucError::UnknownFamily(_))
    ));
}
