// SPDX-License-Identifier: MPL-2.0
//! Full-page error shown when a photo cannot be loaded.
//!
//! The message comes straight from the gateway (for example "Photo not
//! found") so guests see what the server said rather than a generic text.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Column, Container, Text};
use iced::{alignment, Element, Length};

/// Renders the error card with a retry button emitting `on_retry`.
pub fn view<'a, M: Clone + 'a>(message: &str, i18n: &I18n, on_retry: M) -> Element<'a, M> {
    let icon = Text::new("😕").size(typography::EMOJI);

    let title = Text::new(i18n.tr("error-title"))
        .size(typography::TITLE_MD)
        .color(palette::GRAY_800);

    let detail = Text::new(message.to_owned())
        .size(typography::BODY)
        .color(palette::GRAY_500)
        .align_x(alignment::Horizontal::Center);

    let retry = button(Text::new(i18n.tr("error-retry")))
        .padding([spacing::SM, spacing::LG])
        .style(styles::button::primary)
        .on_press(on_retry);

    let card = Container::new(
        Column::new()
            .spacing(spacing::MD)
            .align_x(alignment::Horizontal::Center)
            .push(icon)
            .push(title)
            .push(detail)
            .push(retry),
    )
    .padding(spacing::XL)
    .width(Length::Fixed(sizing::CARD_WIDTH))
    .style(styles::container::card);

    Container::new(card)
        .center(Length::Fill)
        .style(styles::container::page)
        .into()
}
