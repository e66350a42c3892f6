//! Exact rationals over `BigInt`, always kept reduced with a positive denominator.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

impl Rational {
    /// Panics on a zero denominator, same as integer division would.
    pub fn new<N: Into<BigInt>, D: Into<BigInt>>(numer: N, denom: D) -> Self {
        let denom = denom.into();
        assert!(!denom.is_zero(), "zero denominator");
        let mut r = Rational {
            numer: numer.into(),
            denom,
        };
        r.reduce();
        r
    }

    pub fn from_integer<T: Into<BigInt>>(n: T) -> Self {
        Rational {
            numer: n.into(),
            denom: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Rational::from_integer(0)
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    pub fn to_integer(&self) -> Option<BigInt> {
        if self.is_integer() {
            Some(self.numer.clone())
        } else {
            None
        }
    }

    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    fn reduce(&mut self) {
        if self.numer.is_zero() {
            self.denom = BigInt::one();
            return;
        }

        let g = self.numer.gcd(&self.denom);
        if !g.is_one() {
            self.numer = &self.numer / &g;
            self.denom = &self.denom / &g;
        }

        if self.denom.is_negative() {
            self.numer = -&self.numer;
            self.denom = -&self.denom;
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(fmt, "{}", self.numer)
        } else {
            write!(fmt, "{}/{}", self.numer, self.denom)
        }
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::from_integer(n)
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Rational::from_integer(n)
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // denominators are positive so cross multiplying keeps the order
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, 'b> Add<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn add(self, other: &'b Rational) -> Rational {
        Rational::new(
            &self.numer * &other.denom + &other.numer * &self.denom,
            &self.denom * &other.denom,
        )
    }
}

impl<'a, 'b> Sub<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn sub(self, other: &'b Rational) -> Rational {
        Rational::new(
            &self.numer * &other.denom - &other.numer * &self.denom,
            &self.denom * &other.denom,
        )
    }
}

impl<'a, 'b> Mul<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn mul(self, other: &'b Rational) -> Rational {
        Rational::new(&self.numer * &other.numer, &self.denom * &other.denom)
    }
}

impl<'a, 'b> Div<&'b Rational> for &'a Rational {
    type Output = Rational;

    fn div(self, other: &'b Rational) -> Rational {
        Rational::new(&self.numer * &other.denom, &self.denom * &other.numer)
    }
}

impl Add for Rational {
    type Output = Rational;

    fn add(self, other: Rational) -> Rational {
        &self + &other
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, other: Rational) -> Rational {
        &self - &other
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, other: Rational) -> Rational {
        &self * &other
    }
}

impl Div for Rational {
    type Output = Rational;

    fn div(self, other: Rational) -> Rational {
        &self / &other
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numer: -self.numer,
            denom: self.denom,
        }
    }
}

impl<'a> Neg for &'a Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numer: -&self.numer,
            denom: self.denom.clone(),
        }
    }
}

#[test]
fn reduces_and_normalizes_sign() {
    let r = Rational::new(4, -8);
    assert_eq!(r, Rational::new(-1, 2));
    assert_eq!(r.denom(), &BigInt::from(2));
    assert_eq!(Rational::new(0, -5), Rational::zero());
}

#[test]
fn arithmetic() {
    let half = Rational::new(1, 2);
    let third = Rational::new(1, 3);

    assert_eq!(&half + &third, Rational::new(5, 6));
    assert_eq!(&half - &third, Rational::new(1, 6));
    assert_eq!(&half * &third, Rational::new(1, 6));
    assert_eq!(&half / &third, Rational::new(3, 2));
    assert_eq!(-half.clone(), Rational::new(-1, 2));
    assert_eq!(half.clone() + half, Rational::from_integer(1));
}

#[test]
fn ordering_crosses_denominators() {
    assert!(Rational::new(-1, 2) < Rational::new(1, 3));
    assert!(Rational::new(7, 3) > Rational::from_integer(2));
    assert!(Rational::new(2, 4) == Rational::new(1, 2));
}

#[test]
fn integer_detection() {
    assert_eq!(Rational::new(6, 3).to_integer(), Some(BigInt::from(2)));
    assert_eq!(Rational::new(7, 3).to_integer(), None);
    assert_eq!(Rational::new(7, 3).to_string(), "7/3");
    assert_eq!(Rational::new(-9, 3).to_string(), "-3");
}
