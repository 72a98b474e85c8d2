use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Elemental type of a creature. Purely informational: no type chart applies
/// to damage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Bug,
    Flying,
    Poison,
    Rock,
    Ground,
}

/// Joins a list of types the way they are shown in status lines, e.g. "Fire/Flying".
pub fn format_types(types: &[ElementType]) -> String {
    types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join("/")
}
