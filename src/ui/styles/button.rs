// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    border, opacity,
    palette::{self, WHITE},
    radius, shadow, tinted,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

/// Pill-shaped call to action (apply, try again).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Active | button::Status::Pressed => palette::BRONZE_500,
        button::Status::Hovered => Color {
            a: 0.9,
            ..palette::BRONZE_500
        },
        button::Status::Disabled => Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::BRONZE_500
        },
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: if status == button::Status::Hovered {
            shadow::MD
        } else {
            shadow::NONE
        },
        snap: true,
    }
}

/// Selected tile in a toggle group (active panel, chosen filter or frame).
pub fn selected(_theme: &Theme, status: button::Status) -> button::Style {
    let text_color = if status == button::Status::Disabled {
        palette::GRAY_500
    } else {
        palette::LOVE_500
    };

    button::Style {
        background: Some(Background::Color(tinted(palette::LOVE_500))),
        text_color,
        border: Border {
            color: palette::LOVE_500,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Unselected tile in a toggle group.
pub fn unselected(_theme: &Theme, status: button::Status) -> button::Style {
    let (background, text_color) = match status {
        button::Status::Active | button::Status::Pressed => {
            (palette::CREAM_50, palette::GRAY_800)
        }
        button::Status::Hovered => (palette::TAUPE_200, palette::GRAY_800),
        button::Status::Disabled => (
            palette::CREAM_50,
            Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::GRAY_500
            },
        ),
    };

    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: palette::TAUPE_200,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Text-only button (back, links).
pub fn link(_theme: &Theme, status: button::Status) -> button::Style {
    let text_color = match status {
        button::Status::Hovered | button::Status::Pressed => palette::LOVE_500,
        button::Status::Active => palette::GRAY_800,
        button::Status::Disabled => palette::GRAY_500,
    };

    button::Style {
        background: None,
        text_color,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Toggle group style for a boolean selection.
pub fn toggle(is_selected: bool) -> fn(&Theme, button::Status) -> button::Style {
    if is_selected {
        selected
    } else {
        unselected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_and_unselected_differ() {
        let theme = Theme::Light;
        let on = selected(&theme, button::Status::Active);
        let off = unselected(&theme, button::Status::Active);
        assert_ne!(on.border.color, off.border.color);
        assert_eq!(on.text_color, palette::LOVE_500);
    }

    #[test]
    fn primary_dims_when_disabled() {
        let theme = Theme::Light;
        let active = primary(&theme, button::Status::Active);
        let disabled = primary(&theme, button::Status::Disabled);
        assert_ne!(active.background, disabled.background);
    }
}
