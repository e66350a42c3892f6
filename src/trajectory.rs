use crate::elimination::{self, Solution};
use crate::error::SolveError;
use crate::hailstone::{Axis, HailstoneRecord, Plane};
use crate::rational::Rational;
use crate::system::{plane_system, triple_system, Unknown, MIN_RECORDS};
use itertools::Itertools;
use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;
use tracing::{debug, warn};

/// The first record paired with four others pins all four unknowns of a plane.
pub const PLANAR_RECORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rock {
    pub position: [BigInt; 3],
    pub velocity: [BigInt; 3],
}

impl Rock {
    pub fn coordinate_sum(&self) -> BigInt {
        self.position.iter().sum()
    }

    /// Time at which the rock and `stone` are at the same point, if ever. Stones travelling
    /// along with the rock are reported at time zero.
    pub fn collision_time(&self, stone: &HailstoneRecord) -> Option<Rational> {
        let mut time: Option<Rational> = None;

        for &axis in &[Axis::X, Axis::Y, Axis::Z] {
            let i = axis.index();
            let gap = BigInt::from(stone.at(axis)) - &self.position[i];
            let closing = &self.velocity[i] - BigInt::from(stone.speed(axis));

            if closing.is_zero() {
                if !gap.is_zero() {
                    return None;
                }
                continue;
            }

            let t = Rational::new(gap, closing);
            if time.as_ref().map_or(false, |prev| *prev != t) {
                return None;
            }
            time = Some(t);
        }

        Some(time.unwrap_or_else(Rational::zero))
    }

    pub fn missed<'a>(&self, records: &'a [HailstoneRecord]) -> Vec<&'a HailstoneRecord> {
        records
            .iter()
            .filter(|r| self.collision_time(r).is_none())
            .collect()
    }
}

impl fmt::Display for Rock {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = &self.position;
        let [vx, vy, vz] = &self.velocity;
        write!(fmt, "{}, {}, {} @ {}, {}, {}", x, y, z, vx, vy, vz)
    }
}

/// Picks the route by record count: the pivot triple system below five records, the two
/// plane systems from five up.
#[tracing::instrument(skip(records), fields(records = records.len()))]
pub fn solve(records: &[HailstoneRecord]) -> Result<Rock, SolveError> {
    if records.len() < MIN_RECORDS {
        return Err(SolveError::InsufficientData {
            required: MIN_RECORDS,
            got: records.len(),
        });
    }

    if records.len() < PLANAR_RECORDS {
        solve_triple(records)
    } else {
        solve_planar(records)
    }
}

/// Solves the xy-plane for `(X, Y, VX, VY)` and the yz-plane for `(Y, Z, VY, VZ)`, requiring
/// both to agree on `Y` and `VY`.
pub fn solve_planar(records: &[HailstoneRecord]) -> Result<Rock, SolveError> {
    let xy = elimination::solve(&plane_system(records, Plane::Xy)?)?;
    let yz = elimination::solve(&plane_system(records, Plane::Yz)?)?;

    for unknown in &[Unknown::Y, Unknown::VY] {
        let first = &xy[unknown];
        let second = &yz[unknown];
        if first != second {
            return Err(SolveError::InconsistentSolution {
                unknown: *unknown,
                first: first.clone(),
                second: second.clone(),
            });
        }
    }

    let mut merged = xy;
    merged.extend(yz);

    integral(&merged)
}

/// Solves the six unknowns at once from the first three records only.
pub fn solve_triple(records: &[HailstoneRecord]) -> Result<Rock, SolveError> {
    let solution = elimination::solve(&triple_system(records)?)?;
    integral(&solution)
}

/// On a singular system, tries every other triple of records through [`solve_triple`] until
/// one of them is regular. Other errors are returned as is.
pub fn solve_with_retry(records: &[HailstoneRecord]) -> Result<Rock, SolveError> {
    let first_error = match solve(records) {
        Err(e) if e.is_singular() => e,
        other => return other,
    };

    warn!(error = %first_error, "trying other pivot triples");

    for (a, b, c) in records.iter().tuple_combinations() {
        match solve_triple(&[*a, *b, *c]) {
            Ok(rock) => {
                debug!(pivots = %format_args!("{} | {} | {}", a, b, c), "regular triple found");
                return Ok(rock);
            }
            Err(e) if e.is_singular() => continue,
            Err(e) => return Err(e),
        }
    }

    Err(first_error)
}

fn integral(solution: &Solution) -> Result<Rock, SolveError> {
    let value = |unknown: Unknown| -> Result<BigInt, SolveError> {
        let value = &solution[&unknown];
        value
            .to_integer()
            .ok_or_else(|| SolveError::NonIntegerSolution {
                unknown,
                value: value.clone(),
            })
    };

    Ok(Rock {
        position: [value(Unknown::X)?, value(Unknown::Y)?, value(Unknown::Z)?],
        velocity: [value(Unknown::VX)?, value(Unknown::VY)?, value(Unknown::VZ)?],
    })
}
