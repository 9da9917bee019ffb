// SPDX-License-Identifier: MPL-2.0
//! Loading card shown while the photo record is being fetched.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{Column, Container, Text};
use iced::{alignment, Element, Length};

/// Glyphs cycled by the spinner, one per tick.
const FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Tick-driven spinner state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    /// Advances the spinner by one frame.
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    #[must_use]
    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame]
    }
}

/// Renders the loading card centered on the page.
pub fn view<'a, M: 'a>(spinner: &Spinner, i18n: &I18n) -> Element<'a, M> {
    let glyph = Text::new(spinner.glyph())
        .size(typography::EMOJI)
        .color(palette::LOVE_500);

    let label = Text::new(i18n.tr("photo-loading"))
        .size(typography::BODY_LG)
        .color(palette::GRAY_500);

    let card = Container::new(
        Column::new()
            .spacing(spacing::MD)
            .align_x(alignment::Horizontal::Center)
            .push(glyph)
            .push(label),
    )
    .padding(spacing::XL)
    .width(Length::Fixed(sizing::CARD_WIDTH))
    .align_x(alignment::Horizontal::Center)
    .style(styles::container::card);

    Container::new(card)
        .center(Length::Fill)
        .style(styles::container::page)
        .into()
}
