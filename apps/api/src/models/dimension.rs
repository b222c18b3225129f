use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of questionnaire dimensions. Declaration order is the
/// canonical order for steps, vectors and chart axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Analytical,
    Creative,
    Social,
    Technical,
}

impl Dimension {
    pub const COUNT: usize = 4;

    pub const ALL: [Dimension; Dimension::COUNT] = [
        Dimension::Analytical,
        Dimension::Creative,
        Dimension::Social,
        Dimension::Technical,
    ];

    pub fn index(self) -> usize {
        match self {
            Dimension::Analytical => 0,
            Dimension::Creative => 1,
            Dimension::Social => 2,
            Dimension::Technical => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Analytical => "analytical",
            Dimension::Creative => "creative",
            Dimension::Social => "social",
            Dimension::Technical => "technical",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dimension::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown dimension '{s}'"))
    }
}

/// Fixed-size record keyed by [`Dimension`].
///
/// Serializes as an object with one field per dimension, e.g.
/// `{"analytical": 8, "creative": 3, "social": 5, "technical": 9}`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DimensionMap<T>([T; Dimension::COUNT]);

impl<T> DimensionMap<T> {
    pub fn from_fn(mut f: impl FnMut(Dimension) -> T) -> Self {
        Self(Dimension::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &T)> {
        Dimension::ALL.into_iter().zip(self.0.iter())
    }

    pub fn values(&self) -> &[T; Dimension::COUNT] {
        &self.0
    }

    pub fn map<U>(&self, mut f: impl FnMut(Dimension, &T) -> U) -> DimensionMap<U> {
        DimensionMap::from_fn(|d| f(d, &self.0[d.index()]))
    }
}

impl<T> Index<Dimension> for DimensionMap<T> {
    type Output = T;

    fn index(&self, dimension: Dimension) -> &T {
        &self.0[dimension.index()]
    }
}

impl<T> IndexMut<Dimension> for DimensionMap<T> {
    fn index_mut(&mut self, dimension: Dimension) -> &mut T {
        &mut self.0[dimension.index()]
    }
}

impl<T: Serialize> Serialize for DimensionMap<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Dimension::COUNT))?;
        for (dimension, value) in self.iter() {
            map.serialize_entry(dimension.as_str(), value)?;
        }
        map.end()
    }
}
