use regex::Regex;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(&self) -> usize {
        match *self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Projection plane, named by the two axes kept.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Plane {
    Xy,
    Yz,
    Xz,
}

impl Plane {
    pub fn axes(&self) -> (Axis, Axis) {
        match *self {
            Plane::Xy => (Axis::X, Axis::Y),
            Plane::Yz => (Axis::Y, Axis::Z),
            Plane::Xz => (Axis::X, Axis::Z),
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Plane::Xy => "xy",
            Plane::Yz => "yz",
            Plane::Xz => "xz",
        };
        fmt.write_str(s)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct HailstoneRecord {
    pub position: [i64; 3],
    pub velocity: [i64; 3],
}

impl HailstoneRecord {
    pub fn new(position: [i64; 3], velocity: [i64; 3]) -> Self {
        HailstoneRecord { position, velocity }
    }

    pub fn at(&self, axis: Axis) -> i64 {
        self.position[axis.index()]
    }

    pub fn speed(&self, axis: Axis) -> i64 {
        self.velocity[axis.index()]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseHailstoneError {
    #[error("expected `x, y, z @ vx, vy, vz`, found {0:?}")]
    Malformed(String),
    #[error("coordinate out of range")]
    Number(#[from] ParseIntError),
}

impl FromStr for HailstoneRecord {
    type Err = ParseHailstoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref RE: Regex = Regex::new(
                r"^\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*(-?\d+)\s*@\s*(-?\d+)\s*,\s*(-?\d+)\s*,\s*(-?\d+)\s*$"
            ).unwrap();
        }

        let cap = RE
            .captures(s)
            .ok_or_else(|| ParseHailstoneError::Malformed(s.to_owned()))?;

        let mut fields = [0i64; 6];
        for (i, field) in fields.iter_mut().enumerate() {
            *field = cap[i + 1].parse::<i64>()?;
        }

        Ok(HailstoneRecord {
            position: [fields[0], fields[1], fields[2]],
            velocity: [fields[3], fields[4], fields[5]],
        })
    }
}

impl fmt::Display for HailstoneRecord {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.position;
        let [vx, vy, vz] = self.velocity;
        write!(fmt, "{}, {}, {} @ {}, {}, {}", x, y, z, vx, vy, vz)
    }
}

#[test]
fn parses_with_uneven_whitespace() {
    let h = "20, 19, 15 @  1, -5, -3".parse::<HailstoneRecord>().unwrap();
    assert_eq!(h, HailstoneRecord::new([20, 19, 15], [1, -5, -3]));
    assert_eq!(h.at(Axis::Z), 15);
    assert_eq!(h.speed(Axis::Y), -5);

    let h = "19,13,30@-2,1,-2".parse::<HailstoneRecord>().unwrap();
    assert_eq!(h, HailstoneRecord::new([19, 13, 30], [-2, 1, -2]));
}

#[test]
fn parses_large_coordinates() {
    let h = "246694783951603, 201349264543463, 409407702505976 @ 39, -50, -15"
        .parse::<HailstoneRecord>()
        .unwrap();
    assert_eq!(h.position[0], 246_694_783_951_603);
    assert_eq!(h.to_string(), "246694783951603, 201349264543463, 409407702505976 @ 39, -50, -15");
}

#[test]
fn rejects_malformed() {
    assert!(matches!(
        "1, 2 @ 3, 4, 5".parse::<HailstoneRecord>(),
        Err(ParseHailstoneError::Malformed(_))
    ));
    assert!(matches!(
        "1, 2, 3 @ 4, 5, 99999999999999999999".parse::<HailstoneRecord>(),
        Err(ParseHailstoneError::Number(_))
    ));
}
