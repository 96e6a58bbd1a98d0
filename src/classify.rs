use serde::{Deserialize, Serialize};

pub const UP_BAD_BPS: f64 = 20_000.0;
pub const DOWN_BAD_BPS: f64 = 50_000.0;
pub const UP_NORMAL_BPS: f64 = 200_000.0;
pub const DOWN_NORMAL_BPS: f64 = 500_000.0;

/// Tri-level link quality derived from current throughput rates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkQuality {
    Bad,
    Normal,
    Good,
}

impl LinkQuality {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkQuality::Bad => "bad",
            LinkQuality::Normal => "normal",
            LinkQuality::Good => "good",
        }
    }
}

pub fn classify(up_bps: f64, down_bps: f64) -> LinkQuality {
    if up_bps < UP_BAD_BPS || down_bps < DOWN_BAD_BPS {
        LinkQuality::Bad
    } else if up_bps < UP_NORMAL_BPS || down_bps < DOWN_NORMAL_BPS {
        LinkQuality::Normal
    } else {
        LinkQuality::Good
    }
}
