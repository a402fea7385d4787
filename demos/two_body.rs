use defect_annihilation::{Annihilation, Charge, ChargeId, DefectForce, Sign, Simulation};
use nalgebra::Vector2;

// A light negative charge shot past a heavy positive one.
fn main() -> defect_annihilation::Result<()> {
    let heavy = Charge::new(ChargeId(0), 1e10, Sign::Positive, Vector2::zeros())?;
    let light = Charge::new(ChargeId(1), 1., Sign::Negative, Vector2::new(0., 10.))?
        .with_velocity(Vector2::new(3e4, 0.))?;

    let mut sim = Simulation::new(
        vec![heavy, light],
        DefectForce::new(),
        Annihilation::default(),
    )?;

    let num_steps = 10_000;
    for t in 0..num_steps {
        if t % 1_000 == 0 {
            println!("{t} out of {num_steps} time steps done.");
            for c in sim.charges() {
                println!("  {c}");
            }
        }
        if sim.is_empty() {
            println!("annihilated after {t} steps");
            break;
        }
        sim.step(1e-6)?;
    }

    Ok(())
}
