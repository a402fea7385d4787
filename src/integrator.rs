use std::thread;

use nalgebra::Vector2;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{annihilation::Annihilation, interaction::Force, Charge, Error, Execution, Result};

/// Net acceleration of `charges[i]` from every other charge.
fn net_acceleration<F: Force>(i: usize, charges: &[Charge], force: &F) -> Result<Vector2<f64>> {
    let charge = &charges[i];

    let mut total = Vector2::zeros();
    for (j, other) in charges.iter().enumerate() {
        if i == j {
            continue;
        }
        total += force.eval(charge, other)?;
    }

    let acc = total / charge.mass();
    if !acc.iter().all(|x| x.is_finite()) {
        return Err(Error::NonFiniteAcceleration(charge.id()));
    }
    Ok(acc)
}

/// Fill `accelerations` from the current positions and velocities of `charges`.
///
/// Nothing is mutated besides `accelerations`, so every charge sees the same snapshot.
pub fn calculate_accelerations<F: Force>(
    accelerations: &mut [Vector2<f64>],
    charges: &[Charge],
    force: &F,
    execution: Execution,
) -> Result<()> {
    debug_assert_eq!(accelerations.len(), charges.len());

    match execution {
        Execution::SingleThreaded => {
            for (i, acc) in accelerations.iter_mut().enumerate() {
                *acc = net_acceleration(i, charges, force)?;
            }
        }
        Execution::Multithreaded { num_threads } => {
            if charges.is_empty() {
                return Ok(());
            }
            let chunk_size = charges.len().div_ceil(num_threads.max(1));

            thread::scope(|s| {
                let handles: Vec<_> = accelerations
                    .chunks_mut(chunk_size)
                    .enumerate()
                    .map(|(k, chunk)| {
                        s.spawn(move || -> Result<()> {
                            let offset = k * chunk_size;
                            for (i, acc) in chunk.iter_mut().enumerate() {
                                *acc = net_acceleration(offset + i, charges, force)?;
                            }
                            Ok(())
                        })
                    })
                    .collect();

                handles.into_iter().try_for_each(|h| {
                    h.join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
            })?;
        }
        #[cfg(feature = "rayon")]
        Execution::RayonIter => {
            accelerations
                .par_iter_mut()
                .enumerate()
                .try_for_each(|(i, acc)| -> Result<()> {
                    *acc = net_acceleration(i, charges, force)?;
                    Ok(())
                })?;
        }
    }

    Ok(())
}

/// Move every charge by one time step with the given accelerations.
///
/// `dt` is applied one factor at a time, so a zero velocity or acceleration
/// contributes exactly zero even where `dt²` alone would overflow.
fn advance(charges: &mut [Charge], accelerations: &[Vector2<f64>], dt: f64) -> Result<()> {
    for (charge, &acc) in charges.iter_mut().zip(accelerations) {
        let x = *charge.position();
        let v = *charge.velocity();
        let x_new = x + v * dt + acc * (0.5 * dt) * dt;
        let v_new = v + acc * dt;
        if !(x_new.iter().all(|c| c.is_finite()) && v_new.iter().all(|c| c.is_finite())) {
            return Err(Error::NonFiniteState(charge.id()));
        }
        *charge.position_mut() = x_new;
        *charge.velocity_mut() = v_new;
    }
    Ok(())
}

/// Advance `charges` by one time step of length `dt`.
///
/// Annihilation runs first. The survivors are then moved with
/// `x' = x + v dt + a dt² / 2` and `v' = v + a dt`, where `a` is computed once
/// from the positions before the step.
pub fn step<F: Force>(
    charges: Vec<Charge>,
    dt: f64,
    force: &F,
    annihilation: &Annihilation,
) -> Result<Vec<Charge>> {
    step_with(charges, dt, force, annihilation, Execution::SingleThreaded)
}

/// [`step`] with an explicit [`Execution`] for the force summation.
pub fn step_with<F: Force>(
    charges: Vec<Charge>,
    dt: f64,
    force: &F,
    annihilation: &Annihilation,
    execution: Execution,
) -> Result<Vec<Charge>> {
    if !dt.is_finite() || dt <= 0. {
        return Err(Error::InvalidTimeStep(dt));
    }

    let mut charges = annihilation.apply(charges);

    let mut accelerations = vec![Vector2::zeros(); charges.len()];
    calculate_accelerations(&mut accelerations, &charges, force, execution)?;
    advance(&mut charges, &accelerations, dt)?;

    Ok(charges)
}

/// Number of whole steps of length `dt` that fit into `time`.
///
/// Runs longer than `u32::MAX` steps are rejected rather than saturated.
pub fn num_steps(time: f64, dt: f64) -> Result<usize> {
    if !dt.is_finite() || dt <= 0. {
        return Err(Error::InvalidTimeStep(dt));
    }
    if !(time.is_finite() && time >= 0.) {
        return Err(Error::InvalidParam(format!(
            "simulated time must be finite and >= 0, got {time}"
        )));
    }

    let steps = (time / dt).floor();
    if steps > f64::from(u32::MAX) {
        return Err(Error::InvalidParam(format!(
            "{time} / {dt} is too many steps"
        )));
    }
    Ok(steps as usize)
}
