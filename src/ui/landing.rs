// SPDX-License-Identifier: MPL-2.0
//! Static landing view for every route that is not a photo deep link.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text_input, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

/// Renders the landing card.
///
/// When a wedding site is configured its address is shown as selectable
/// text with an open button emitting `on_open_site` and a copy button
/// emitting `on_copy_site`.
pub fn view<'a, M: Clone + 'a>(
    wedding_site_url: Option<&'a str>,
    i18n: &I18n,
    on_open_site: impl Fn(String) -> M,
    on_copy_site: impl Fn(String) -> M,
    on_edit_noop: impl Fn(String) -> M + 'a,
) -> Element<'a, M> {
    let icon = Text::new("💍").size(typography::EMOJI);

    let title = Text::new(i18n.tr("landing-title"))
        .size(typography::TITLE_LG)
        .color(palette::LOVE_500);

    let subtitle = Text::new(i18n.tr("landing-subtitle"))
        .size(typography::BODY_LG)
        .color(palette::GRAY_500)
        .align_x(alignment::Horizontal::Center);

    let mut content = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(icon)
        .push(title)
        .push(subtitle);

    if let Some(url) = wedding_site_url.filter(|url| !url.trim().is_empty()) {
        content = content
            .push(
                Text::new(i18n.tr("landing-site-hint"))
                    .size(typography::CAPTION)
                    .color(palette::GRAY_500),
            )
            .push(
                Container::new(
                    text_input("", url)
                        .on_input(on_edit_noop)
                        .size(typography::BODY)
                        .padding(spacing::XS),
                )
                .style(styles::container::manual_link),
            )
            .push(
                Row::new()
                    .spacing(spacing::SM)
                    .push(
                        button(Text::new(i18n.tr("landing-site-open")))
                            .padding([spacing::SM, spacing::LG])
                            .style(styles::button::primary)
                            .on_press(on_open_site(url.to_owned())),
                    )
                    .push(
                        button(Text::new(i18n.tr("landing-site-copy")))
                            .padding([spacing::SM, spacing::LG])
                            .style(styles::button::unselected)
                            .on_press(on_copy_site(url.to_owned())),
                    ),
            );
    }

    let card = Container::new(content)
        .padding(spacing::XL)
        .width(Length::Fixed(sizing::CARD_WIDTH))
        .style(styles::container::card);

    Container::new(card)
        .center(Length::Fill)
        .style(styles::container::page)
        .into()
}
