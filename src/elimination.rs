use crate::error::SolveError;
use crate::rational::Rational;
use crate::system::{LinearSystem, Unknown};
use num_traits::Signed;
use std::collections::BTreeMap;
use tracing::{debug, trace};

pub type Solution = BTreeMap<Unknown, Rational>;

/// Gaussian elimination with partial pivoting over exact rationals.
///
/// Systems with more equations than unknowns are accepted as long as the surplus rows reduce
/// to `0 = 0`; otherwise the equations contradict each other.
pub fn solve(system: &LinearSystem) -> Result<Solution, SolveError> {
    let n = system.unknown_count();
    let stage = system.stage;

    // augmented rows, constant in the last column
    let mut rows = system
        .equations
        .iter()
        .map(|eq| {
            assert_eq!(eq.coefficients.len(), n);
            let mut row = eq.coefficients.clone();
            row.push(eq.constant.clone());
            row
        })
        .collect::<Vec<_>>();

    for col in 0..n {
        let pivot = match pivot_row(&rows, col) {
            Some(p) => p,
            None => {
                return Err(SolveError::SingularSystem {
                    stage,
                    unknown: system.unknowns[col],
                })
            }
        };

        rows.swap(col, pivot);
        trace!(%stage, col, pivot, "pivoted");

        let (done, below) = rows.split_at_mut(col + 1);
        let pivot_row = &done[col];

        for row in below.iter_mut() {
            if row[col].is_zero() {
                continue;
            }
            let factor = &row[col] / &pivot_row[col];
            for k in col..=n {
                let scaled = &factor * &pivot_row[k];
                row[k] = &row[k] - &scaled;
            }
        }
    }

    if let Some(extra) = rows[n..].iter().position(|row| !row[n].is_zero()) {
        debug!(%stage, row = n + extra, "surplus equation does not reduce to zero");
        return Err(SolveError::ContradictoryEquations { stage });
    }

    let mut values = vec![Rational::zero(); n];
    for i in (0..n).rev() {
        let mut rhs = rows[i][n].clone();
        for j in (i + 1)..n {
            rhs = &rhs - &(&rows[i][j] * &values[j]);
        }
        values[i] = &rhs / &rows[i][i];
    }

    let solution = system
        .unknowns
        .iter()
        .copied()
        .zip(values.into_iter())
        .collect::<Solution>();

    debug!(%stage, ?solution, "solved");

    Ok(solution)
}

/// Row at or below `col` with the largest nonzero `|numerator|` in column `col`.
fn pivot_row(rows: &[Vec<Rational>], col: usize) -> Option<usize> {
    (col..rows.len())
        .filter(|&r| !rows[r][col].is_zero())
        .max_by_key(|&r| rows[r][col].numer().abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hailstone::{HailstoneRecord, Plane};
    use crate::system::{example_records, plane_system, triple_system, LinearEquation, Stage};

    fn equation(coefficients: &[i64], constant: i64) -> LinearEquation {
        LinearEquation {
            coefficients: coefficients.iter().map(|&c| Rational::from(c)).collect(),
            constant: Rational::from(constant),
        }
    }

    fn system(equations: Vec<LinearEquation>) -> LinearSystem {
        let n = equations[0].coefficients.len();
        let mut s = LinearSystem::new(Stage::PivotTriple, Unknown::ALL[..n].to_vec());
        s.equations = equations;
        s
    }

    #[test]
    fn fractional_solution() {
        // 2x + y = 1, x - y = 1 => x = 2/3, y = -1/3
        let s = system(vec![equation(&[2, 1], 1), equation(&[1, -1], 1)]);
        let solution = solve(&s).unwrap();

        assert_eq!(solution[&Unknown::X], Rational::new(2, 3));
        assert_eq!(solution[&Unknown::Y], Rational::new(-1, 3));
    }

    #[test]
    fn needs_row_swap() {
        // leading zero in the first row
        let s = system(vec![
            equation(&[0, 1, 1], 5),
            equation(&[1, 0, 1], 4),
            equation(&[1, 1, 0], 3),
        ]);
        let solution = solve(&s).unwrap();

        assert_eq!(solution[&Unknown::X], Rational::from_integer(1));
        assert_eq!(solution[&Unknown::Y], Rational::from_integer(2));
        assert_eq!(solution[&Unknown::Z], Rational::from_integer(3));
    }

    #[test]
    fn largest_numerator_is_the_pivot() {
        let rows = |equations: &[LinearEquation]| {
            equations
                .iter()
                .map(|eq| {
                    let mut row = eq.coefficients.clone();
                    row.push(eq.constant.clone());
                    row
                })
                .collect::<Vec<_>>()
        };

        // the first row is a nonzero candidate but loses to 3
        let first = vec![
            equation(&[1, 1], 3),
            equation(&[3, 1], 5),
            equation(&[-2, 0], -2),
        ];
        assert_eq!(pivot_row(&rows(&first), 0), Some(1));

        // sign does not matter
        let equations = [equation(&[2], 2), equation(&[-5], -5)];
        assert_eq!(pivot_row(&rows(&equations), 0), Some(1));

        // rows above the column are not candidates
        let equations = [
            equation(&[9, 9], 0),
            equation(&[0, 1], 0),
            equation(&[0, 0], 0),
        ];
        assert_eq!(pivot_row(&rows(&equations), 1), Some(1));
        assert_eq!(pivot_row(&rows(&equations[..1]), 1), None);

        let solution = solve(&system(first)).unwrap();
        assert_eq!(solution[&Unknown::X], Rational::from_integer(1));
        assert_eq!(solution[&Unknown::Y], Rational::from_integer(2));
    }

    #[test]
    fn singular_reports_column() {
        let s = system(vec![equation(&[1, 2], 3), equation(&[2, 4], 6)]);
        match solve(&s) {
            Err(SolveError::SingularSystem { unknown, .. }) => assert_eq!(unknown, Unknown::Y),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn underdetermined_is_singular() {
        let s = system(vec![equation(&[1, 1, 1], 3)]);
        assert!(solve(&s).unwrap_err().is_singular());
    }

    #[test]
    fn redundant_rows_are_checked() {
        let agreeing = system(vec![
            equation(&[1, 1], 3),
            equation(&[1, -1], -1),
            equation(&[2, 1], 4),
        ]);
        let solution = solve(&agreeing).unwrap();
        assert_eq!(solution[&Unknown::X], Rational::from_integer(1));
        assert_eq!(solution[&Unknown::Y], Rational::from_integer(2));

        let contradicting = system(vec![
            equation(&[1, 1], 3),
            equation(&[1, -1], -1),
            equation(&[2, 1], 5),
        ]);
        assert!(matches!(
            solve(&contradicting),
            Err(SolveError::ContradictoryEquations { .. })
        ));
    }

    #[test]
    fn example_planes() {
        let records = example_records();

        let xy = solve(&plane_system(&records, Plane::Xy).unwrap()).unwrap();
        assert_eq!(xy[&Unknown::X], Rational::from_integer(24));
        assert_eq!(xy[&Unknown::Y], Rational::from_integer(13));
        assert_eq!(xy[&Unknown::VX], Rational::from_integer(-3));
        assert_eq!(xy[&Unknown::VY], Rational::from_integer(1));

        let yz = solve(&plane_system(&records, Plane::Yz).unwrap()).unwrap();
        assert_eq!(yz[&Unknown::Z], Rational::from_integer(10));
        assert_eq!(yz[&Unknown::VZ], Rational::from_integer(2));
    }

    #[test]
    fn three_records_do_not_pin_a_plane() {
        // pair (1, 2) is the difference of (0, 2) and (0, 1); two rows for four unknowns
        let records = example_records();
        assert!(solve(&plane_system(&records[..3], Plane::Xy).unwrap())
            .unwrap_err()
            .is_singular());
    }

    #[test]
    fn parallel_triple_is_singular() {
        let records = [
            HailstoneRecord::new([0, 0, 0], [1, 2, 3]),
            HailstoneRecord::new([5, 1, 2], [2, 4, 6]),
            HailstoneRecord::new([3, 7, 1], [-1, -2, -3]),
        ];
        assert!(solve(&triple_system(&records).unwrap())
            .unwrap_err()
            .is_singular());
    }
}
