// palette.rs - Display colors for grid color indices

use egui::Color32;

/// Index 0 is the background; the rest follow in order.
pub const PALETTE: &[Color32] = &[
    Color32::from_rgb(24, 24, 24),
    Color32::from_rgb(240, 240, 240),
    Color32::from_rgb(230, 80, 60),
    Color32::from_rgb(70, 160, 230),
    Color32::from_rgb(250, 200, 60),
    Color32::from_rgb(90, 200, 110),
    Color32::from_rgb(190, 90, 220),
    Color32::from_rgb(240, 140, 40),
    Color32::from_rgb(60, 210, 200),
    Color32::from_rgb(220, 100, 160),
    Color32::from_rgb(150, 150, 90),
    Color32::from_rgb(110, 110, 220),
];

// Anything past the palette
pub const OUT_OF_PALETTE: Color32 = Color32::from_rgb(255, 0, 255);

pub const ANT_MARKER: Color32 = Color32::RED;

pub fn color_for(index: u32) -> Color32 {
    PALETTE.get(index as usize).copied().unwrap_or(OUT_OF_PALETTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_first_fallback_last() {
        assert_eq!(color_for(0), PALETTE[0]);
        assert_eq!(color_for(11), PALETTE[11]);
        assert_eq!(color_for(12), OUT_OF_PALETTE);
        assert_eq!(color_for(u32::MAX), OUT_OF_PALETTE);
    }
}
