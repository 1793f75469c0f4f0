//! Builds every detector revision with construction logging enabled and
//! prints a placement summary.
//!
//! ```text
//! cargo run --example inspect                      # placement log + summary
//! RUST_LOG=detgeo=info cargo run --example inspect # summary only
//! ```

use detgeo::detector::{Cryostat, DetectorModel, FullCryostat, Simple};
use detgeo::units::CM;

fn main() -> detgeo::Result<()> {
    // Default: WARN for everything, DEBUG for detgeo so every placement
    // shows. Override with RUST_LOG.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("detgeo=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let models: [&dyn DetectorModel; 3] = [&Simple, &Cryostat, &FullCryostat];
    for model in models {
        let assembly = model.build()?;
        println!(
            "{}: {} placements",
            model.name(),
            assembly.tree.placement_count()
        );
        if let Some(pv) = assembly.tree.find_placement(model.sensitive_volume(), 0) {
            let p = assembly.tree.global_position(pv)?;
            println!(
                "  {} at ({:.2}, {:.2}, {:.2}) cm",
                model.sensitive_volume(),
                p.x / CM,
                p.y / CM,
                p.z / CM
            );
        }
    }
    Ok(())
}
