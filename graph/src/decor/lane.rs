use std::fmt;

/// 24-bit color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Outline/fill pair identifying a branch lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneColors {
    pub outline: Rgb,
    pub fill: Rgb,
}

impl LaneColors {
    /// Derive the pair from a branch name.
    ///
    /// A multiplicative hash of the name is split into three byte channels,
    /// each floored at 100 so no lane comes out near-black. Channels are
    /// distributed by name length, and the brightest one keeps its value in
    /// the outline while the other two are darkened to a quarter, giving a
    /// dark border around a bright interior. Distinct names may collide.
    pub fn derive(name: &str) -> Self {
        let mut hash: u64 = 1;
        for ch in name.chars() {
            hash = hash * u64::from(u32::from(ch)) % 0x100_0000;
        }

        let len = name.chars().count();
        let mut channels = [0u8; 3];
        let mut hvi = 0;
        for i in 0..3 {
            let value = ((hash % 256) as u8).max(100);
            let slot = (len + i) % 3;
            channels[slot] = value;
            if channels[hvi] < value {
                hvi = slot;
            }
            hash /= 256;
        }

        let fill = Rgb::new(channels[0], channels[1], channels[2]);
        let mut outline = channels;
        for (i, channel) in outline.iter_mut().enumerate() {
            if i != hvi {
                *channel /= 4;
            }
        }

        Self {
            outline: Rgb::new(outline[0], outline[1], outline[2]),
            fill,
        }
    }
}
