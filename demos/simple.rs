use cuc::UnitConverter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    cuc::logging::init();

    // ── Built-in references ─────────────────────────────────────────
    if let Some(table) = cuc::check_reference("pressure", true)?.as_table() {
        println!("{table}\n");
    }

    let conv = UnitConverter::new();

    // ── Pressure ────────────────────────────────────────────────────
    let p = conv.quantity(1.0, "MPa");
    for to in ["Pa", "bar", "kPa"] {
        println!("{p} = {} {to}", p.convert(to, None)?);
    }

    // ── Temperature ─────────────────────────────────────────────────
    let t = conv.quantity(358.0, "K");
    for to in ["C", "F", "R"] {
        println!("{t} = {:.2} {to}", t.convert(to, None)?);
    }

    // ── Block notation ──────────────────────────────────────────────
    println!("125 MPa = {} Pa", conv.to(125.0, "MPa => Pa", None)?);
    println!("360 K   = {:.2} C", conv.to(360.0, "K => C", None)?);
    println!("250 C   = {:.2} K", cuc::to(250.0, "C => K", None)?);

    Ok(())
}
