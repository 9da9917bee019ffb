// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, palette, radius, shadow};
use iced::widget::container;
use iced::{Background, Border, Theme};

/// Cream page background.
pub fn page(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::CREAM_50)),
        text_color: Some(palette::GRAY_800),
        ..Default::default()
    }
}

/// White card with a soft shadow (loading, error, landing, panels).
pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::WHITE)),
        text_color: Some(palette::GRAY_800),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        shadow: shadow::ELEGANT,
        ..Default::default()
    }
}

/// Semi-transparent pill used for the zoom hint over the photo.
pub fn hint(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(iced::Color {
            a: 0.6,
            ..palette::BLACK
        })),
        text_color: Some(palette::WHITE),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Bordered box around the manually selectable share link.
pub fn manual_link(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::CREAM_100)),
        border: Border {
            color: palette::GOLD_500,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}
