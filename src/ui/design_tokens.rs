// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Every color, size and spacing value used by the guest viewer.

## Organization

- **Palette**: Base colors (cream surfaces, love-pink accent, gold details)
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Border**: Border width scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use fotobox_guest::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

// Tinted background for an active chip
let chip_bg = Color {
    a: opacity::TINT,
    ..palette::LOVE_500
};

// Use the spacing scale
let padding = spacing::MD; // 16px
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use iced::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;

    // Surfaces
    pub const CREAM_50: Color = Color::from_rgb(0.976, 0.969, 0.969); // #f9f7f7
    pub const CREAM_100: Color = Color::from_rgb(1.0, 0.973, 0.906); // #fff8e7
    pub const TAUPE_200: Color = Color::from_rgb(0.910, 0.902, 0.882); // #e8e6e1

    // Text
    pub const GRAY_500: Color = Color::from_rgb(0.420, 0.447, 0.502); // #6b7280
    pub const GRAY_800: Color = Color::from_rgb(0.239, 0.239, 0.239); // #3d3d3d

    // Accents
    pub const LOVE_500: Color = Color::from_rgb(0.847, 0.192, 0.357); // #d8315b
    pub const GOLD_500: Color = Color::from_rgb(0.757, 0.604, 0.357); // #c19a5b
    pub const BRONZE_500: Color = Color::from_rgb(0.690, 0.537, 0.408); // #b08968

    // Semantic
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    /// Background tint of selected chips.
    pub const TINT: f32 = 0.1;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale (8px grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
    pub const LG: f32 = 24.0; // 3 units
    pub const XL: f32 = 32.0; // 4 units
}

// ============================================================================
// Component Sizing
// ============================================================================

pub mod sizing {
    pub const BUTTON_HEIGHT: f32 = 36.0;
    pub const TOAST_WIDTH: f32 = 320.0;
    /// Width of the centered card used by loading, error and landing views.
    pub const CARD_WIDTH: f32 = 420.0;
    /// Maximum width of the photo column.
    pub const CONTENT_WIDTH: f32 = 720.0;
    pub const FRAME_THUMBNAIL: f32 = 64.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Page titles.
    pub const TITLE_LG: f32 = 30.0;
    /// Card titles.
    pub const TITLE_MD: f32 = 20.0;
    /// Panel titles.
    pub const TITLE_SM: f32 = 18.0;
    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
    /// The sad face on the error card.
    pub const EMOJI: f32 = 48.0;
}

// ============================================================================
// Border Widths
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;
}

// ============================================================================
// Border Radii
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const LG: f32 = 12.0;
    pub const FULL: f32 = 9999.0; // Pill shape
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    /// Soft card shadow.
    pub const ELEGANT: Shadow = Shadow {
        color: Color {
            a: 0.05,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 20.0,
    };

    pub const MD: Shadow = Shadow {
        color: Color {
            a: 0.2,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };
}

/// Accent color with the selected-chip tint applied.
#[must_use]
pub fn tinted(color: Color) -> Color {
    Color {
        a: opacity::TINT,
        ..color
    }
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::TINT > 0.0 && opacity::TINT < opacity::OVERLAY_SUBTLE);

    assert!(typography::TITLE_LG > typography::TITLE_MD);
    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::TITLE_SM > typography::BODY_LG);
    assert!(typography::BODY > typography::CAPTION);

    assert!(border::WIDTH_MD > border::WIDTH_SM);
    assert!(sizing::CONTENT_WIDTH > sizing::CARD_WIDTH);
};
