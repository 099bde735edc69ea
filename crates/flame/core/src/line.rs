//! The fixed catalog of flame line kinds.
//!
//! Each kind maps a chosen tier value onto the stat dimensions it boosts. The
//! mapping is a property of the game, not configuration: dual-stat lines add the
//! *same* tier value to both of their stats rather than splitting it.

use core::fmt;
use core::str::FromStr;

use strum::{EnumCount, EnumIter};

use crate::error::UnknownLineKind;
use crate::stats::{Stat, StatVector};

/// One of the thirteen flame line kinds the calculator offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum LineKind {
    Str,
    Dex,
    Int,
    Luk,
    StrDex,
    StrInt,
    StrLuk,
    DexInt,
    DexLuk,
    IntLuk,
    AllStatsPercent,
    ArmorAtt,
    ArmorMatt,
}

impl LineKind {
    /// All kinds in the order the calculator lists them.
    pub const ALL: [LineKind; LineKind::COUNT] = [
        LineKind::Str,
        LineKind::Dex,
        LineKind::Int,
        LineKind::Luk,
        LineKind::StrDex,
        LineKind::StrInt,
        LineKind::StrLuk,
        LineKind::DexInt,
        LineKind::DexLuk,
        LineKind::IntLuk,
        LineKind::AllStatsPercent,
        LineKind::ArmorAtt,
        LineKind::ArmorMatt,
    ];

    /// Wire name used by the calculator's radio inputs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Dex => "dex",
            Self::Int => "int",
            Self::Luk => "luk",
            Self::StrDex => "strDex",
            Self::StrInt => "strInt",
            Self::StrLuk => "strLuk",
            Self::DexInt => "dexInt",
            Self::DexLuk => "dexLuk",
            Self::IntLuk => "intLuk",
            Self::AllStatsPercent => "allStatsPercent",
            Self::ArmorAtt => "armorAtt",
            Self::ArmorMatt => "armorMatt",
        }
    }

    /// The stat dimensions this line contributes to.
    pub const fn stats(self) -> &'static [Stat] {
        match self {
            Self::Str => &[Stat::Str],
            Self::Dex => &[Stat::Dex],
            Self::Int => &[Stat::Int],
            Self::Luk => &[Stat::Luk],
            Self::StrDex => &[Stat::Str, Stat::Dex],
            Self::StrInt => &[Stat::Str, Stat::Int],
            Self::StrLuk => &[Stat::Str, Stat::Luk],
            Self::DexInt => &[Stat::Dex, Stat::Int],
            Self::DexLuk => &[Stat::Dex, Stat::Luk],
            Self::IntLuk => &[Stat::Int, Stat::Luk],
            Self::AllStatsPercent => &[Stat::All],
            Self::ArmorAtt => &[Stat::Att],
            Self::ArmorMatt => &[Stat::Matt],
        }
    }

    /// Returns true for lines that boost two stats at once.
    pub const fn is_dual(self) -> bool {
        self.stats().len() == 2
    }

    /// Project a tier value onto the stat vector this line produces.
    pub fn project(self, tier: i32) -> StatVector {
        let mut vector = StatVector::ZERO;
        for &stat in self.stats() {
            vector.set(stat, tier);
        }
        vector
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineKind {
    type Err = UnknownLineKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownLineKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn all_matches_declaration_order() {
        let iterated: Vec<LineKind> = LineKind::iter().collect();
        assert_eq!(iterated, LineKind::ALL.to_vec());
    }

    #[test]
    fn wire_names_round_trip() {
        for kind in LineKind::ALL {
            assert_eq!(kind.as_str().parse::<LineKind>(), Ok(kind));
        }
        assert!("strdex".parse::<LineKind>().is_err());
    }

    #[test]
    fn dual_lines_do_not_split_the_tier() {
        let v = LineKind::DexLuk.project(6);
        assert_eq!(v, StatVector::new(0, 6, 0, 6, 0, 0, 0));
        assert!(LineKind::DexLuk.is_dual());
    }

    #[test]
    fn special_lines_hit_their_own_dimension() {
        assert_eq!(LineKind::AllStatsPercent.project(5).all, 5);
        assert_eq!(LineKind::ArmorAtt.project(3).att, 3);
        assert_eq!(LineKind::ArmorMatt.project(2).matt, 2);
        assert!(!LineKind::ArmorMatt.is_dual());
    }
}
