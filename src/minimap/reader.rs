//! High level mini-map queries built on [`ColorLocator`].
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::locator::ColorLocator;
use super::palette::Palette;
use crate::common::{ColorQuery, Frame, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OtherCounts {
    pub enemy: usize,
    pub guild: usize,
    pub buddy: usize,
}

/// Everything the reader knows about one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinimapSnapshot {
    pub frame_id: Uuid,
    pub captured_at: DateTime<Utc>,
    pub player: Option<Location>,
    pub rune: Option<Location>,
    pub portal: bool,
    pub others: OtherCounts,
}

pub struct MinimapReader {
    locator: ColorLocator,
    palette: Palette,
}

impl MinimapReader {
    pub fn new(locator: ColorLocator, palette: Palette) -> Self {
        Self { locator, palette }
    }

    pub fn locator(&self) -> &ColorLocator {
        &self.locator
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn player_location(&self, frame: &Frame) -> Option<Location> {
        self.locator
            .locate(frame, &[self.palette.player])
            .into_iter()
            .next()
    }

    pub fn rune_location(&self, frame: &Frame) -> Option<Location> {
        self.locator
            .locate(frame, &[self.palette.rune])
            .into_iter()
            .next()
    }

    /// Pixel counts for enemies, guild members and buddies. Entries sharing a
    /// color report the same count.
    pub fn other_counts(&self, frame: &Frame) -> OtherCounts {
        let counts = self.locator.count(frame, &self.palette.others());
        let lookup = |color: ColorQuery| counts.get(&color).copied().unwrap_or_default();
        OtherCounts {
            enemy: lookup(self.palette.enemy),
            guild: lookup(self.palette.guild),
            buddy: lookup(self.palette.buddy),
        }
    }

    pub fn portal_present(&self, frame: &Frame) -> bool {
        !self
            .locator
            .locate(frame, &[self.palette.portal])
            .is_empty()
    }

    /// Reads every palette entry from a single crop of `frame`.
    pub fn snapshot(&self, frame: &Frame) -> MinimapSnapshot {
        let palette = &self.palette;
        // One entry per query, in this order.
        let matches = self.locator.survey(
            frame,
            &[
                palette.player,
                palette.rune,
                palette.portal,
                palette.enemy,
                palette.guild,
                palette.buddy,
            ],
        );
        let (player, rune, portal) = (&matches[0], &matches[1], &matches[2]);
        let (enemy, guild, buddy) = (&matches[3], &matches[4], &matches[5]);

        let snapshot = MinimapSnapshot {
            frame_id: frame.get_frame_id(),
            captured_at: frame.get_captured_at(),
            player: player.location,
            rune: rune.location,
            portal: portal.count > 0,
            others: OtherCounts {
                enemy: enemy.count,
                guild: guild.count,
                buddy: buddy.count,
            },
        };
        debug!(frame_id = %snapshot.frame_id, "Built mini-map snapshot");
        snapshot
    }
}
