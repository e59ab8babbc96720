use std::fmt::Write as _;
use yardproof_core::{Dimensions, ProductRecord, Yard};

fn feet(v: f64) -> String {
    format!("{v:?}")
}

fn lwh(dims: &Dimensions) -> String {
    let height = dims.height.map(feet).unwrap_or_else(|| "N/A".to_string());
    format!(
        "{}' L \u{d7} {}' W \u{d7} {height}' H",
        feet(dims.length),
        feet(dims.width)
    )
}

/// Human-readable catalog report: every bounce house with its footprints, then totals.
pub fn catalog_summary(records: &[ProductRecord]) -> String {
    let bounce_houses: Vec<&ProductRecord> =
        records.iter().filter(|r| r.is_bounce_house()).collect();

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        "Found {} bounce houses with valid dimensions:",
        bounce_houses.len()
    );
    let _ = writeln!(&mut out, "{}", "=".repeat(70));
    for record in &bounce_houses {
        let _ = writeln!(&mut out, "\n{}. {}", record.id, record.name);
        if let Some(setup) = &record.setup_area {
            let _ = writeln!(&mut out, "   Setup Area: {}", lwh(setup));
            let _ = writeln!(&mut out, "   ({:.0} sq ft required)", setup.area);
        }
        if let Some(actual) = &record.actual_size {
            let _ = writeln!(&mut out, "   Actual Size: {}", lwh(actual));
        }
    }
    let _ = writeln!(
        &mut out,
        "\n{} total products ({} bounce houses)",
        records.len(),
        bounce_houses.len()
    );
    out
}

/// Lists the products whose setup area fits `yard`, plus how much of the yard they would use
/// if all were placed side by side.
pub fn fit_summary(yard: &Yard, records: &[ProductRecord]) -> String {
    let fitting = yard.fitting(records);
    let usage = yard.usage(fitting.iter().copied());

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        "Yard: {}' \u{d7} {}' ({:.0} sq ft)",
        feet(yard.length),
        feet(yard.width),
        usage.yard_area
    );
    for record in &fitting {
        if let Some(setup) = &record.setup_area {
            let _ = writeln!(
                &mut out,
                "  {}. {} ({}' \u{d7} {}')",
                record.id,
                record.name,
                feet(setup.length),
                feet(setup.width)
            );
        }
    }
    let _ = writeln!(
        &mut out,
        "{} of {} products fit; combined setup area {:.0} sq ft ({:.1}% of yard)",
        fitting.len(),
        records.len(),
        usage.used_area,
        usage.percent_used
    );
    out
}
