use crater_catalog::io::{load_catalog, CatalogSchema, LoadOptions};
use crater_catalog::matching::{match_craters, Corrector};
use crater_core::SphericalBody;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let robbins = args
        .next()
        .expect("Usage: nested_craters <robbins.csv> <yang.csv>");
    let yang = args
        .next()
        .expect("Usage: nested_craters <robbins.csv> <yang.csv>");

    let children = load_catalog(&robbins, &CatalogSchema::robbins(), &LoadOptions::children())?;
    let parents = load_catalog(&yang, &CatalogSchema::yang(), &LoadOptions::default())?;
    println!(
        "{} children (< 10 km), {} parents",
        children.len(),
        parents.len()
    );

    let mapping = match_craters(&children, &parents);
    let (checked, report) =
        Corrector::new(SphericalBody::MOON).correct_with_report(&mapping, &children, &parents)?;
    println!("\n{}", report);
    println!(
        "Associations not confirmed by correction: {}\n",
        mapping.association_count() - checked.association_count()
    );

    let mut busiest: Vec<_> = mapping.iter().collect();
    busiest.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    for (parent_id, child_ids) in busiest.into_iter().take(10) {
        let parent = parents.iter().find(|p| &p.id == parent_id);
        match parent {
            Some(p) => println!(
                "  {:>8}  lon {:7.3}°  lat {:+7.3}°  diam {:7.2} km  age {:>6}  children {}",
                p.id,
                p.center.lon_deg,
                p.center.lat_deg,
                p.diameter_km,
                p.age.as_deref().unwrap_or("-"),
                child_ids.len(),
            ),
            None => println!("  {:>8}  children {}", parent_id, child_ids.len()),
        }
    }

    Ok(())
}
