//! Where the xy-shadows of two hailstone paths cross.

use crate::hailstone::{Axis, HailstoneRecord};
use crate::rational::Rational;
use itertools::Itertools;
use num_bigint::BigInt;
use num_traits::Zero;
use std::str::FromStr;
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub struct Crossing {
    /// Time at which the first stone passes the point.
    pub first: Rational,
    /// Time at which the second stone passes the point.
    pub second: Rational,
    pub x: Rational,
    pub y: Rational,
}

impl Crossing {
    pub fn is_future(&self) -> bool {
        !self.first.is_negative() && !self.second.is_negative()
    }

    pub fn within(&self, area: &TestArea) -> bool {
        area.contains(&self.x) && area.contains(&self.y)
    }
}

/// Inclusive bounds applied to both x and y.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestArea {
    pub min: i64,
    pub max: i64,
}

impl TestArea {
    fn contains(&self, v: &Rational) -> bool {
        *v >= Rational::from(self.min) && *v <= Rational::from(self.max)
    }
}

impl Default for TestArea {
    fn default() -> Self {
        TestArea {
            min: 200_000_000_000_000,
            max: 400_000_000_000_000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("expected `MIN..=MAX` or `MIN,MAX`, found {0:?}")]
pub struct InvalidTestArea(String);

impl FromStr for TestArea {
    type Err = InvalidTestArea;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTestArea(s.to_owned());

        let (min, max) = s
            .split_once("..=")
            .or_else(|| s.split_once(','))
            .ok_or_else(invalid)?;

        let min = min.trim().parse::<i64>().map_err(|_| invalid())?;
        let max = max.trim().parse::<i64>().map_err(|_| invalid())?;

        if min > max {
            return Err(invalid());
        }

        Ok(TestArea { min, max })
    }
}

/// Exact crossing point of the xy-projected paths, `None` when they are parallel.
pub fn xy_crossing(a: &HailstoneRecord, b: &HailstoneRecord) -> Option<Crossing> {
    let (ax, ay) = (BigInt::from(a.at(Axis::X)), BigInt::from(a.at(Axis::Y)));
    let (avx, avy) = (BigInt::from(a.speed(Axis::X)), BigInt::from(a.speed(Axis::Y)));
    let (bx, by) = (BigInt::from(b.at(Axis::X)), BigInt::from(b.at(Axis::Y)));
    let (bvx, bvy) = (BigInt::from(b.speed(Axis::X)), BigInt::from(b.speed(Axis::Y)));

    // a + t * av = b + s * bv, by Cramer's rule
    let det = &bvx * &avy - &avx * &bvy;
    if det.is_zero() {
        return None;
    }

    let (dx, dy) = (bx - &ax, by - &ay);

    let first = Rational::new(&bvx * &dy - &bvy * &dx, det.clone());
    let second = Rational::new(&avx * &dy - &avy * &dx, det);

    let x = &Rational::from_integer(ax) + &(&first * &Rational::from_integer(avx));
    let y = &Rational::from_integer(ay) + &(&first * &Rational::from_integer(avy));

    Some(Crossing {
        first,
        second,
        x,
        y,
    })
}

pub fn count_future_crossings(records: &[HailstoneRecord], area: &TestArea) -> usize {
    records
        .iter()
        .tuple_combinations()
        .filter_map(|(a, b)| xy_crossing(a, b).map(|c| (a, b, c)))
        .filter(|(a, b, c)| {
            let inside = c.is_future() && c.within(area);
            trace!(%a, %b, x = %c.x, y = %c.y, inside);
            inside
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::example_records;

    #[test]
    fn first_example_pair() {
        let records = example_records();
        let c = xy_crossing(&records[0], &records[1]).unwrap();

        assert_eq!(c.first, Rational::new(7, 3));
        assert_eq!(c.second, Rational::new(11, 3));
        assert_eq!(c.x, Rational::new(43, 3));
        assert_eq!(c.y, Rational::new(46, 3));
        assert!(c.is_future());
        assert!(c.within(&TestArea { min: 7, max: 27 }));
    }

    #[test]
    fn parallel_paths() {
        let records = example_records();
        assert_eq!(xy_crossing(&records[1], &records[2]), None);
    }

    #[test]
    fn crossing_in_the_past() {
        let records = example_records();
        let c = xy_crossing(&records[0], &records[4]).unwrap();
        assert!(!c.is_future());
        assert_eq!(c.first, Rational::new(-11, 9));
    }

    #[test]
    fn extreme_coordinates_stay_exact() {
        let (min, max) = (i64::MIN, i64::MAX);
        let a = HailstoneRecord::new([min, min, 0], [max, 1, 0]);
        let b = HailstoneRecord::new([max, max, 0], [min, 2, 0]);

        let c = xy_crossing(&a, &b).unwrap();

        // the point lies on both paths at the reported times
        let on_path = |r: &HailstoneRecord, t: &Rational| {
            let x = &Rational::from(r.at(Axis::X)) + &(t * &Rational::from(r.speed(Axis::X)));
            let y = &Rational::from(r.at(Axis::Y)) + &(t * &Rational::from(r.speed(Axis::Y)));
            (x, y)
        };
        assert_eq!(on_path(&a, &c.first), (c.x.clone(), c.y.clone()));
        assert_eq!(on_path(&b, &c.second), (c.x.clone(), c.y.clone()));

        // the second stone was there long ago
        assert!(c.second.is_negative());
        assert_eq!(count_future_crossings(&[a, b], &TestArea::default()), 0);
    }

    #[test]
    fn example_count() {
        let area = TestArea { min: 7, max: 27 };
        assert_eq!(count_future_crossings(&example_records(), &area), 2);
    }

    #[test]
    fn test_area_parsing() {
        assert_eq!(
            "7..=27".parse::<TestArea>().unwrap(),
            TestArea { min: 7, max: 27 }
        );
        assert_eq!(
            "7, 27".parse::<TestArea>().unwrap(),
            TestArea { min: 7, max: 27 }
        );
        assert!("27..=7".parse::<TestArea>().is_err());
        assert!("seven".parse::<TestArea>().is_err());
    }
}
