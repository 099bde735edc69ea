//! Seven-dimensional stat vectors.
//!
//! Every flame line contributes to one or more of the seven tracked stats. The
//! solver accumulates contributions in a [`StatVector`] and compares the running
//! sum against a target vector of the same shape.

use core::ops::{Add, AddAssign, Sub, SubAssign};

use strum::{EnumIter, IntoEnumIterator};

/// One dimension of a [`StatVector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Stat {
    Str,
    Dex,
    Int,
    Luk,
    /// All stats percent.
    All,
    /// Weapon attack.
    Att,
    /// Magic attack.
    Matt,
}

impl Stat {
    /// Returns the stat label used by the calculator page (upper case).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Str => "STR",
            Self::Dex => "DEX",
            Self::Int => "INT",
            Self::Luk => "LUK",
            Self::All => "ALL",
            Self::Att => "ATT",
            Self::Matt => "MATT",
        }
    }
}

/// Component-wise integer stat totals.
///
/// Missing components default to zero, so a target that only cares about STR
/// is written as `StatVector::default().with(Stat::Str, 30)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "UPPERCASE"))]
pub struct StatVector {
    pub str: i32,
    pub dex: i32,
    pub int: i32,
    pub luk: i32,
    pub all: i32,
    pub att: i32,
    pub matt: i32,
}

/// The vector a user wants to reach exactly.
pub type TargetVector = StatVector;

impl StatVector {
    /// The zero vector.
    pub const ZERO: Self = Self {
        str: 0,
        dex: 0,
        int: 0,
        luk: 0,
        all: 0,
        att: 0,
        matt: 0,
    };

    /// Create a vector from all seven components.
    pub const fn new(str: i32, dex: i32, int: i32, luk: i32, all: i32, att: i32, matt: i32) -> Self {
        Self {
            str,
            dex,
            int,
            luk,
            all,
            att,
            matt,
        }
    }

    /// Read one component.
    pub const fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Str => self.str,
            Stat::Dex => self.dex,
            Stat::Int => self.int,
            Stat::Luk => self.luk,
            Stat::All => self.all,
            Stat::Att => self.att,
            Stat::Matt => self.matt,
        }
    }

    /// Overwrite one component.
    pub fn set(&mut self, stat: Stat, value: i32) {
        let slot = match stat {
            Stat::Str => &mut self.str,
            Stat::Dex => &mut self.dex,
            Stat::Int => &mut self.int,
            Stat::Luk => &mut self.luk,
            Stat::All => &mut self.all,
            Stat::Att => &mut self.att,
            Stat::Matt => &mut self.matt,
        };
        *slot = value;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, stat: Stat, value: i32) -> Self {
        self.set(stat, value);
        self
    }

    /// Returns true when every component is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Returns true when any component is strictly greater than the matching
    /// component of `bound`.
    pub fn exceeds(&self, bound: &StatVector) -> bool {
        Stat::iter().any(|stat| self.get(stat) > bound.get(stat))
    }

    /// Component-wise addition, `None` if any component overflows.
    pub fn checked_add(&self, rhs: &StatVector) -> Option<StatVector> {
        let mut out = StatVector::ZERO;
        for stat in Stat::iter() {
            out.set(stat, self.get(stat).checked_add(rhs.get(stat))?);
        }
        Some(out)
    }

    /// Iterate `(stat, value)` pairs in dimension order.
    pub fn components(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        Stat::iter().map(move |stat| (stat, self.get(stat)))
    }
}

// Operators saturate; the solver uses `checked_add` so a clamped sum never
// passes as an exact match.
impl AddAssign for StatVector {
    fn add_assign(&mut self, rhs: Self) {
        for stat in Stat::iter() {
            self.set(stat, self.get(stat).saturating_add(rhs.get(stat)));
        }
    }
}

impl Add for StatVector {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl SubAssign for StatVector {
    fn sub_assign(&mut self, rhs: Self) {
        for stat in Stat::iter() {
            self.set(stat, self.get(stat).saturating_sub(rhs.get(stat)));
        }
    }
}

impl Sub for StatVector {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl core::iter::Sum for StatVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
