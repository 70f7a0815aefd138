//! Color order of the physical LED chips
//!
//! The illumination model produces every triplet in logical `r, g, b`
//! order. WS2811 strips are wired in many orders, so the quantizer arranges
//! each triplet with a named [`ColorOrder`] before it goes on the wire.

use smart_leds::RGB8;

const ORDER_NAME_RGB: &str = "rgb";
const ORDER_NAME_RBG: &str = "rbg";
const ORDER_NAME_GRB: &str = "grb";
const ORDER_NAME_GBR: &str = "gbr";
const ORDER_NAME_BRG: &str = "brg";
const ORDER_NAME_BGR: &str = "bgr";

const ORDER_ID_RGB: u8 = 0;
const ORDER_ID_RBG: u8 = 1;
const ORDER_ID_GRB: u8 = 2;
const ORDER_ID_GBR: u8 = 3;
const ORDER_ID_BRG: u8 = 4;
const ORDER_ID_BGR: u8 = 5;

/// Order in which a chip expects its three channel bytes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorOrder {
    Rgb = ORDER_ID_RGB,
    Rbg = ORDER_ID_RBG,
    Grb = ORDER_ID_GRB,
    /// Wiring of the installed dome strip and building chip
    #[default]
    Gbr = ORDER_ID_GBR,
    Brg = ORDER_ID_BRG,
    Bgr = ORDER_ID_BGR,
}

impl ColorOrder {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            ORDER_ID_RGB => Self::Rgb,
            ORDER_ID_RBG => Self::Rbg,
            ORDER_ID_GRB => Self::Grb,
            ORDER_ID_GBR => Self::Gbr,
            ORDER_ID_BRG => Self::Brg,
            ORDER_ID_BGR => Self::Bgr,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => ORDER_NAME_RGB,
            Self::Rbg => ORDER_NAME_RBG,
            Self::Grb => ORDER_NAME_GRB,
            Self::Gbr => ORDER_NAME_GBR,
            Self::Brg => ORDER_NAME_BRG,
            Self::Bgr => ORDER_NAME_BGR,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            ORDER_NAME_RGB => Some(Self::Rgb),
            ORDER_NAME_RBG => Some(Self::Rbg),
            ORDER_NAME_GRB => Some(Self::Grb),
            ORDER_NAME_GBR => Some(Self::Gbr),
            ORDER_NAME_BRG => Some(Self::Brg),
            ORDER_NAME_BGR => Some(Self::Bgr),
            _ => None,
        }
    }

    /// Logical channel index sent in each wire position
    pub const fn source_indices(self) -> [usize; 3] {
        match self {
            Self::Rgb => [0, 1, 2],
            Self::Rbg => [0, 2, 1],
            Self::Grb => [1, 0, 2],
            Self::Gbr => [1, 2, 0],
            Self::Brg => [2, 0, 1],
            Self::Bgr => [2, 1, 0],
        }
    }

    /// Arrange a logical color into wire order
    pub const fn arrange(self, color: RGB8) -> [u8; 3] {
        let logical = [color.r, color.g, color.b];
        let [first, second, third] = self.source_indices();
        [logical[first], logical[second], logical[third]]
    }
}
