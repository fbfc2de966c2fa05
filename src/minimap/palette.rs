use serde::Deserialize;

use crate::common::ColorQuery;

/// Named mini-map colors the reader looks for.
///
/// Defaults are the BGRA values the game draws on its mini-map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub player: ColorQuery,
    pub rune: ColorQuery,
    pub enemy: ColorQuery,
    pub guild: ColorQuery,
    pub buddy: ColorQuery,
    pub portal: ColorQuery,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            player: ColorQuery::new(68, 221, 255, 255),
            rune: ColorQuery::new(255, 102, 221, 255),
            enemy: ColorQuery::new(0, 0, 255, 255),
            guild: ColorQuery::new(255, 102, 102, 255),
            buddy: ColorQuery::new(225, 221, 17, 255),
            portal: ColorQuery::new(51, 85, 221, 255),
        }
    }
}

impl Palette {
    /// Colors of other characters, in the order they are reported.
    pub fn others(&self) -> [ColorQuery; 3] {
        [self.enemy, self.guild, self.buddy]
    }
}
