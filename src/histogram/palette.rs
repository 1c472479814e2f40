use std::fmt;

use crate::constants::palette::CATEGORY20_16;

/// Display color token attached to every histogram row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color([u8; 3]);

impl Color {
    /// Color for the category at `position` in the selection.
    /// The palette has 16 entries; position 16 reuses entry 0.
    pub fn for_position(position: usize) -> Self {
        Color(CATEGORY20_16[position % CATEGORY20_16.len()])
    }

    pub fn to_color32(self) -> egui::Color32 {
        let [r, g, b] = self.0;
        egui::Color32::from_rgb(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct_and_cycles() {
        let colors: Vec<Color> = (0..16).map(Color::for_position).collect();
        let unique: std::collections::HashSet<_> = colors.iter().collect();
        assert_eq!(unique.len(), 16);

        assert_eq!(Color::for_position(16), Color::for_position(0));
        assert_eq!(Color::for_position(33), Color::for_position(1));
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Color::for_position(0).to_string(), "#1f77b4");
        assert_eq!(
            Color::for_position(0).to_color32(),
            egui::Color32::from_rgb(0x1f, 0x77, 0xb4)
        );
    }
}
