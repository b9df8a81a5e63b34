use cuc::UnitConverter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    cuc::logging::init();

    // CUC_REFERENCE_FILE is read from the .env file when present;
    // otherwise fall back to the bundled test fixture.
    let mut cuc = UnitConverter::from_env()?;
    if cuc.store().custom_families().len() == 1 {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/custom-unit.yml");
        cuc.load_custom_unit(path)?;
    }

    // ── Runtime custom units ────────────────────────────────────────
    cuc.add_custom_unit("J/mol.K", 1.0)?;
    cuc.add_custom_unit("kJ/mol.K", 0.001)?;
    println!("150 J/mol.K = {} kJ/mol.K", cuc.from_to(150.0, "J/mol.K", "kJ/mol.K", None)?);

    // ── Units from the reference file ───────────────────────────────
    let family = cuc.find_reference("J/mol.K", "J/kmol.K")?;
    println!("J/mol.K → J/kmol.K resolved in {family}");
    println!("25 J/mol.K = {} J/kmol.K", cuc.convert(25.0, "J/mol.K", "J/kmol.K", None)?);
    println!("1 kcal = {:.3} kJ", cuc.to(1.0, "kcal => kJ", None)?);

    // ── Listings ────────────────────────────────────────────────────
    for name in ["temperature", "custom", "custom::HEAT-CAPACITY", "custom::ENERGY"] {
        if let Some(table) = cuc.check_reference(name, true)?.as_table() {
            println!("\n{table}");
        }
    }

    Ok(())
}
