//! Bayer colour filter tilings

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::PipelineError;

/// Colour filter over a single photosite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CfaChannel {
    Red,
    Green,
    Blue,
}

/// The 2x2 tile repeated over the sensor, named row-major from the top-left photosite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BayerPattern {
    Rggb,
    Bggr,
    Grbg,
    Gbrg,
}

impl BayerPattern {
    pub const ALL: [BayerPattern; 4] = [
        BayerPattern::Rggb,
        BayerPattern::Bggr,
        BayerPattern::Grbg,
        BayerPattern::Gbrg,
    ];

    /// The 2x2 tile as `[[top-left, top-right], [bottom-left, bottom-right]]`.
    pub fn tile(self) -> [[CfaChannel; 2]; 2] {
        use CfaChannel::*;
        match self {
            BayerPattern::Rggb => [[Red, Green], [Green, Blue]],
            BayerPattern::Bggr => [[Blue, Green], [Green, Red]],
            BayerPattern::Grbg => [[Green, Red], [Blue, Green]],
            BayerPattern::Gbrg => [[Green, Blue], [Red, Green]],
        }
    }

    /// Filter colour of the photosite at `(row, col)`.
    #[inline]
    pub fn channel_at(self, row: usize, col: usize) -> CfaChannel {
        self.tile()[row & 1][col & 1]
    }

    /// Tile position `(row, col)` of the red photosite.
    pub fn red_position(self) -> (usize, usize) {
        self.position_of(CfaChannel::Red)
    }

    /// Tile position `(row, col)` of the blue photosite.
    pub fn blue_position(self) -> (usize, usize) {
        self.position_of(CfaChannel::Blue)
    }

    fn position_of(self, channel: CfaChannel) -> (usize, usize) {
        let tile = self.tile();
        let mut found = (0, 0);
        for (row, cells) in tile.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == channel {
                    found = (row, col);
                }
            }
        }
        found
    }

    /// Recognises a tile from its four filter colours.
    pub fn from_tile(tile: [[CfaChannel; 2]; 2]) -> Option<Self> {
        Self::ALL.into_iter().find(|pattern| pattern.tile() == tile)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BayerPattern::Rggb => "rggb",
            BayerPattern::Bggr => "bggr",
            BayerPattern::Grbg => "grbg",
            BayerPattern::Gbrg => "gbrg",
        }
    }
}

impl FromStr for BayerPattern {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rggb" => Ok(BayerPattern::Rggb),
            "bggr" => Ok(BayerPattern::Bggr),
            "grbg" => Ok(BayerPattern::Grbg),
            "gbrg" => Ok(BayerPattern::Gbrg),
            _ => Err(PipelineError::InvalidPattern(s.to_string())),
        }
    }
}

impl fmt::Display for BayerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        for pattern in BayerPattern::ALL {
            assert_eq!(pattern.as_str().parse::<BayerPattern>().unwrap(), pattern);
        }
        assert_eq!("RGGB".parse::<BayerPattern>().unwrap(), BayerPattern::Rggb);
    }

    #[test]
    fn test_parse_unknown_tag() {
        let err = "rgbw".parse::<BayerPattern>().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidPattern(tag) if tag == "rgbw"));
    }

    #[test]
    fn test_red_and_blue_lattices() {
        assert_eq!(BayerPattern::Rggb.red_position(), (0, 0));
        assert_eq!(BayerPattern::Rggb.blue_position(), (1, 1));
        assert_eq!(BayerPattern::Bggr.red_position(), (1, 1));
        assert_eq!(BayerPattern::Bggr.blue_position(), (0, 0));
        assert_eq!(BayerPattern::Grbg.red_position(), (0, 1));
        assert_eq!(BayerPattern::Grbg.blue_position(), (1, 0));
        assert_eq!(BayerPattern::Gbrg.red_position(), (1, 0));
        assert_eq!(BayerPattern::Gbrg.blue_position(), (0, 1));
    }

    #[test]
    fn test_channel_at_repeats_every_two_pixels() {
        let pattern = BayerPattern::Grbg;
        assert_eq!(pattern.channel_at(4, 7), CfaChannel::Red);
        assert_eq!(pattern.channel_at(5, 6), CfaChannel::Blue);
        assert_eq!(pattern.channel_at(5, 7), CfaChannel::Green);
    }

    #[test]
    fn test_from_tile() {
        for pattern in BayerPattern::ALL {
            assert_eq!(BayerPattern::from_tile(pattern.tile()), Some(pattern));
        }
        let all_green = [[CfaChannel::Green; 2]; 2];
        assert_eq!(BayerPattern::from_tile(all_green), None);
    }
}
