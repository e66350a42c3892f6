//! Linearized collision constraints.
//!
//! A rock at `(A, B)` moving `(VA, VB)` meets stone `i` in a plane exactly when
//! `(A - ai)(VB - vbi) - (B - bi)(VA - vai) = 0`. The `A * VB - B * VA` part is the
//! same for every stone, so the difference of two such constraints is linear.

use crate::error::SolveError;
use crate::hailstone::{Axis, HailstoneRecord, Plane};
use crate::rational::Rational;
use num_bigint::BigInt;
use std::fmt;

pub const MIN_RECORDS: usize = 3;

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub enum Unknown {
    X,
    Y,
    Z,
    VX,
    VY,
    VZ,
}

impl Unknown {
    pub const ALL: [Unknown; 6] = [
        Unknown::X,
        Unknown::Y,
        Unknown::Z,
        Unknown::VX,
        Unknown::VY,
        Unknown::VZ,
    ];

    pub fn position(axis: Axis) -> Self {
        match axis {
            Axis::X => Unknown::X,
            Axis::Y => Unknown::Y,
            Axis::Z => Unknown::Z,
        }
    }

    pub fn velocity(axis: Axis) -> Self {
        match axis {
            Axis::X => Unknown::VX,
            Axis::Y => Unknown::VY,
            Axis::Z => Unknown::VZ,
        }
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, fmt)
    }
}

/// Which solve produced a system, carried into errors.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Stage {
    Plane(Plane),
    PivotTriple,
}

impl fmt::Display for Stage {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Plane(p) => write!(fmt, "{}-plane", p),
            Stage::PivotTriple => fmt.write_str("pivot triple"),
        }
    }
}

/// `sum(coefficients[k] * unknowns[k]) = constant`, over the unknowns of the owning system.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearEquation {
    pub coefficients: Vec<Rational>,
    pub constant: Rational,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    pub stage: Stage,
    pub unknowns: Vec<Unknown>,
    pub equations: Vec<LinearEquation>,
}

impl LinearSystem {
    pub fn new(stage: Stage, unknowns: Vec<Unknown>) -> Self {
        LinearSystem {
            stage,
            unknowns,
            equations: Vec::new(),
        }
    }

    /// Adds an equation given as `(unknown, coefficient)` terms; unknowns not in the system
    /// must not appear.
    fn push(&mut self, terms: [(Unknown, BigInt); 4], constant: BigInt) {
        let mut coefficients = vec![Rational::zero(); self.unknowns.len()];
        for (unknown, coefficient) in terms.iter() {
            let unknown = *unknown;
            let column = self
                .unknowns
                .iter()
                .position(|&u| u == unknown)
                .expect("term over an unknown outside the system");
            coefficients[column] = &coefficients[column] + &Rational::from_integer(coefficient.clone());
        }
        self.equations.push(LinearEquation {
            coefficients,
            constant: Rational::from_integer(constant),
        });
    }

    pub fn unknown_count(&self) -> usize {
        self.unknowns.len()
    }
}

/// Unknowns of a plane in `(A, B, VA, VB)` order.
pub fn plane_unknowns(plane: Plane) -> Vec<Unknown> {
    let (a, b) = plane.axes();
    vec![
        Unknown::position(a),
        Unknown::position(b),
        Unknown::velocity(a),
        Unknown::velocity(b),
    ]
}

/// The difference of the collision constraints of `i` and `j` projected to `plane`:
///
/// `(vbj - vbi) A + (aj - ai) VB + (vai - vaj) B + (bi - bj) VA = (aj vbj - bj vaj) - (ai vbi - bi vai)`
fn pair_terms(
    i: &HailstoneRecord,
    j: &HailstoneRecord,
    plane: Plane,
) -> ([(Unknown, BigInt); 4], BigInt) {
    let (a, b) = plane.axes();
    let wide = |r: &HailstoneRecord| {
        (
            BigInt::from(r.at(a)),
            BigInt::from(r.at(b)),
            BigInt::from(r.speed(a)),
            BigInt::from(r.speed(b)),
        )
    };

    let (ai, bi, vai, vbi) = wide(i);
    let (aj, bj, vaj, vbj) = wide(j);

    let terms = [
        (Unknown::position(a), &vbj - &vbi),
        (Unknown::velocity(b), &aj - &ai),
        (Unknown::position(b), &vai - &vaj),
        (Unknown::velocity(a), &bi - &bj),
    ];

    let constant = (&aj * &vbj - &bj * &vaj) - (&ai * &vbi - &bi * &vai);

    (terms, constant)
}

fn require_records(records: &[HailstoneRecord]) -> Result<(), SolveError> {
    if records.len() < MIN_RECORDS {
        Err(SolveError::InsufficientData {
            required: MIN_RECORDS,
            got: records.len(),
        })
    } else {
        Ok(())
    }
}

/// Pairs the first record with every later one, giving `records.len() - 1` equations over the
/// four unknowns of `plane`. Five records make the system square; more rows are redundant.
pub fn plane_system(records: &[HailstoneRecord], plane: Plane) -> Result<LinearSystem, SolveError> {
    require_records(records)?;

    let mut system = LinearSystem::new(Stage::Plane(plane), plane_unknowns(plane));
    let (first, rest) = records.split_first().expect("checked above");

    for other in rest {
        let (terms, constant) = pair_terms(first, other, plane);
        system.push(terms, constant);
    }

    Ok(system)
}

/// Six equations over all six unknowns from the first three records: the pairs (0, 1) and
/// (0, 2) in each of the xy, yz and xz planes.
pub fn triple_system(records: &[HailstoneRecord]) -> Result<LinearSystem, SolveError> {
    require_records(records)?;

    let mut system = LinearSystem::new(Stage::PivotTriple, Unknown::ALL.to_vec());

    for &plane in &[Plane::Xy, Plane::Yz, Plane::Xz] {
        for other in &records[1..3] {
            let (terms, constant) = pair_terms(&records[0], other, plane);
            system.push(terms, constant);
        }
    }

    Ok(system)
}

#[cfg(test)]
pub(crate) fn example_records() -> Vec<HailstoneRecord> {
    vec![
        HailstoneRecord::new([19, 13, 30], [-2, 1, -2]),
        HailstoneRecord::new([18, 19, 22], [-1, -1, -2]),
        HailstoneRecord::new([20, 25, 34], [-2, -2, -4]),
        HailstoneRecord::new([12, 31, 28], [-1, -2, -1]),
        HailstoneRecord::new([20, 19, 15], [1, -5, -3]),
    ]
}

#[test]
fn pair_equation_holds_for_known_rock() {
    let records = example_records();
    // rock 24, 13, 10 @ -3, 1, 2
    let rock = |u: Unknown| -> i64 {
        match u {
            Unknown::X => 24,
            Unknown::Y => 13,
            Unknown::Z => 10,
            Unknown::VX => -3,
            Unknown::VY => 1,
            Unknown::VZ => 2,
        }
    };

    for &plane in &[Plane::Xy, Plane::Yz, Plane::Xz] {
        for (i, j) in &[(0, 1), (1, 4), (3, 2)] {
            let (terms, constant) = pair_terms(&records[*i], &records[*j], plane);
            let lhs: BigInt = terms.iter().map(|(u, c)| c * BigInt::from(rock(*u))).sum();
            assert_eq!(lhs, constant, "{} plane, pair {:?}", plane, (i, j));
        }
    }
}

#[test]
fn extreme_coordinates_stay_exact() {
    let (min, max) = (i64::MIN, i64::MAX);
    let records = [
        HailstoneRecord::new([max, min, 0], [min, min, 0]),
        HailstoneRecord::new([min, max, 0], [min, min, 0]),
        HailstoneRecord::new([0, 0, 0], [1, 2, 3]),
    ];

    let system = plane_system(&records, Plane::Xy).unwrap();
    let first = &system.equations[0];

    let (min, max) = (BigInt::from(min), BigInt::from(max));
    // (aj vbj - bj vaj) - (ai vbi - bi vai) with every speed at i64::MIN
    let constant = BigInt::from(2) * &min * (&min - &max);
    assert_eq!(first.constant, Rational::from_integer(constant));
    // VY column holds aj - ai
    assert_eq!(first.coefficients[3], Rational::from_integer(&min - &max));

    assert!(triple_system(&records).is_ok());
}

#[test]
fn plane_system_shape() {
    let records = example_records();
    let system = plane_system(&records, Plane::Yz).unwrap();

    assert_eq!(system.stage, Stage::Plane(Plane::Yz));
    assert_eq!(
        system.unknowns,
        vec![Unknown::Y, Unknown::Z, Unknown::VY, Unknown::VZ]
    );
    assert_eq!(system.equations.len(), 4);
    assert!(system
        .equations
        .iter()
        .all(|eq| eq.coefficients.len() == 4));
}

#[test]
fn triple_system_shape() {
    let system = triple_system(&example_records()).unwrap();
    assert_eq!(system.unknown_count(), 6);
    assert_eq!(system.equations.len(), 6);
}

#[test]
fn too_few_records() {
    let records = example_records();
    assert!(matches!(
        plane_system(&records[..2], Plane::Xy),
        Err(SolveError::InsufficientData { required: 3, got: 2 })
    ));
    assert!(matches!(
        triple_system(&[]),
        Err(SolveError::InsufficientData { got: 0, .. })
    ));
}
