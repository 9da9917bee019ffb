// SPDX-License-Identifier: MPL-2.0
//! Rendering of the photo view.

use super::{taken_on, Message, Panel, State};
use crate::application::orchestrator::Phase;
use crate::domain::filter::FilterId;
use crate::domain::frame::FrameDescriptor;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::{error_display, loading, styles};
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{
    button, image, mouse_area, text_input, Button, Column, Container, Row, Scrollable, Space, Stack,
    Text,
};
use iced::{alignment, Element, Length};

/// Filter tiles per row in the filter panel.
const FILTERS_PER_ROW: usize = 3;

/// Renders the photo view for the current phase.
pub fn view<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    match state.orchestrator.phase() {
        Phase::Idle | Phase::Loading => loading::view(&state.spinner, i18n),
        Phase::Failed { message, .. } => error_display::view(message, i18n, Message::Retry),
        Phase::Ready | Phase::ApplyingFilter(_) | Phase::ApplyingFrame(_) => content(state, i18n),
    }
}

fn content<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let side_by_side = state.capabilities.is_landscape && !state.capabilities.is_mobile;

    let mut photo_column = Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .push(photo(state, i18n, side_by_side));
    if state.displayed_image().is_some_and(|(_, is_preview)| is_preview) {
        photo_column = photo_column.push(
            Text::new(i18n.tr("filter-preview-note"))
                .size(typography::CAPTION)
                .color(palette::BRONZE_500),
        );
    }
    if let Some(date) = date_line(state, i18n) {
        photo_column = photo_column.push(date);
    }
    if let Some(busy) = busy_line(state, i18n) {
        photo_column = photo_column.push(busy);
    }

    let mut controls = Column::new()
        .spacing(spacing::MD)
        .push(action_bar(state, i18n));
    if let Some(panel) = panel(state, i18n) {
        controls = controls.push(panel);
    }

    let body: Element<'a, Message> = if side_by_side {
        Row::new()
            .spacing(spacing::LG)
            .align_y(alignment::Vertical::Top)
            .push(photo_column)
            .push(Container::new(controls).width(Length::Fixed(sizing::CARD_WIDTH)))
            .into()
    } else {
        Column::new()
            .spacing(spacing::MD)
            .align_x(alignment::Horizontal::Center)
            .push(photo_column)
            .push(Container::new(controls).max_width(sizing::CONTENT_WIDTH))
            .into()
    };

    let page = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(header(i18n))
        .push(body);

    Container::new(Scrollable::new(
        Container::new(page).width(Length::Fill).center_x(Length::Fill),
    ))
    .width(Length::Fill)
    .height(Length::Fill)
    .style(styles::container::page)
    .into()
}

fn header<'a>(i18n: &'a I18n) -> Element<'a, Message> {
    let back = button(Text::new(format!("← {}", i18n.tr("photo-back"))).size(typography::BODY))
        .style(styles::button::link)
        .on_press(Message::Back);

    let title = Text::new(i18n.tr("photo-title"))
        .size(typography::TITLE_MD)
        .color(palette::LOVE_500);

    Row::new()
        .width(Length::Fill)
        .align_y(alignment::Vertical::Center)
        .push(back)
        .push(Space::new().width(Length::Fill))
        .push(title)
        .push(Space::new().width(Length::Fill))
        .into()
}

/// Size of the photo frame at zoom 1.
fn display_width(state: &State, side_by_side: bool) -> f32 {
    let available = state.environment.viewport_width - 2.0 * spacing::MD;
    let available = if side_by_side {
        available - sizing::CARD_WIDTH - spacing::LG
    } else {
        available
    };
    available.clamp(sizing::FRAME_THUMBNAIL, sizing::CONTENT_WIDTH)
}

fn photo<'a>(state: &'a State, i18n: &'a I18n, side_by_side: bool) -> Element<'a, Message> {
    let width = display_width(state, side_by_side);

    let Some((shown, _)) = state.displayed_image() else {
        let placeholder = match &state.image_error {
            Some(message) => Text::new(message.clone())
                .size(typography::BODY)
                .color(palette::GRAY_500),
            None => Text::new(state.spinner.glyph())
                .size(typography::EMOJI)
                .color(palette::LOVE_500),
        };
        return Container::new(placeholder)
            .center_x(Length::Fixed(width))
            .center_y(Length::Fixed(width * 0.75))
            .style(styles::container::card)
            .into();
    };

    let aspect = shown.height as f32 / shown.width.max(1) as f32;
    let height = width * aspect;
    let zoom = state.zoom;

    let picture = mouse_area(
        image(shown.handle.clone())
            .width(Length::Fixed(width * zoom))
            .height(Length::Fixed(height * zoom)),
    )
    .on_press(Message::PhotoPressed);

    let framed = Scrollable::new(picture)
        .direction(Direction::Both {
            vertical: Scrollbar::default(),
            horizontal: Scrollbar::default(),
        })
        .width(Length::Fixed(width))
        .height(Length::Fixed(height));

    let mut stack = Stack::new().push(framed);
    if state.is_hint_visible() {
        stack = stack.push(
            Container::new(
                Container::new(Text::new(i18n.tr("photo-zoom-hint")).size(typography::CAPTION))
                    .padding([spacing::XXS, spacing::SM])
                    .style(styles::container::hint),
            )
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .padding(spacing::SM)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Bottom),
        );
    }

    stack.into()
}

fn date_line<'a>(state: &'a State, i18n: &'a I18n) -> Option<Element<'a, Message>> {
    let timestamp = state.orchestrator.record()?.timestamp?;
    let date = taken_on(timestamp, &chrono::Local)?;
    Some(
        Text::new(i18n.tr_with_args("photo-taken-on", &[("date", date.as_str())]))
            .size(typography::CAPTION)
            .color(palette::GRAY_500)
            .into(),
    )
}

fn busy_line<'a>(state: &'a State, i18n: &'a I18n) -> Option<Element<'a, Message>> {
    let key = match state.orchestrator.phase() {
        Phase::ApplyingFilter(_) => "photo-applying-filter",
        Phase::ApplyingFrame(_) => "photo-applying-frame",
        _ => return None,
    };
    Some(
        Text::new(format!("{} {}", state.spinner.glyph(), i18n.tr(key)))
            .size(typography::BODY)
            .color(palette::BRONZE_500)
            .into(),
    )
}

fn action_bar<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let toggle = |panel: Panel, key: &str| -> Button<'a, Message> {
        button(Text::new(i18n.tr(key)).size(typography::BODY))
            .padding([spacing::XS, spacing::SM])
            .style(styles::button::toggle(state.panel == panel))
            .on_press(Message::TogglePanel(panel))
    };

    let download_label = if state.is_downloading {
        i18n.tr("download-in-progress")
    } else {
        i18n.tr("download-button")
    };
    let download = button(Text::new(download_label).size(typography::BODY))
        .padding([spacing::XS, spacing::SM])
        .style(styles::button::unselected)
        .on_press_maybe((!state.is_downloading).then_some(Message::Download));

    Row::new()
        .spacing(spacing::XS)
        .push(toggle(Panel::Filters, "panel-filters"))
        .push(toggle(Panel::Frames, "panel-frames"))
        .push(toggle(Panel::Share, "panel-share"))
        .push(download)
        .wrap()
        .into()
}

fn panel<'a>(state: &'a State, i18n: &'a I18n) -> Option<Element<'a, Message>> {
    let inner = match state.panel {
        Panel::None => return None,
        Panel::Filters => filter_panel(state, i18n),
        Panel::Frames => frame_panel(state, i18n),
        Panel::Share => share_panel(state, i18n),
    };
    Some(
        Container::new(inner)
            .padding(spacing::MD)
            .width(Length::Fill)
            .style(styles::container::card)
            .into(),
    )
}

fn filter_panel<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let selected = state.orchestrator.selected_filter();

    let mut grid = Column::new().spacing(spacing::XS);
    for chunk in FilterId::ALL.chunks(FILTERS_PER_ROW) {
        let row = chunk.iter().fold(Row::new().spacing(spacing::XS), |row, &filter| {
            row.push(
                button(
                    Text::new(i18n.tr(filter.descriptor().label_key))
                        .size(typography::BODY)
                        .align_x(alignment::Horizontal::Center),
                )
                .width(Length::Fill)
                .padding(spacing::XS)
                .style(styles::button::toggle(filter == selected))
                .on_press(Message::SelectFilter(filter)),
            )
        });
        grid = grid.push(row);
    }

    let mut column = Column::new()
        .spacing(spacing::SM)
        .push(Text::new(i18n.tr("filter-panel-title")).size(typography::TITLE_SM))
        .push(grid);

    if selected.is_server_applicable() {
        let label = if matches!(state.orchestrator.phase(), Phase::ApplyingFilter(_)) {
            i18n.tr("filter-applying")
        } else {
            i18n.tr("filter-apply")
        };
        column = column.push(
            button(Text::new(label))
                .padding([spacing::SM, spacing::LG])
                .style(styles::button::primary)
                .on_press_maybe(
                    state
                        .orchestrator
                        .can_apply_selected_filter()
                        .then_some(Message::ApplySelectedFilter),
                ),
        );
    }

    column.into()
}

fn frame_label(frame: &FrameDescriptor, i18n: &I18n) -> String {
    if frame.is_builtin {
        i18n.tr(&format!("frame-{}", frame.name))
    } else {
        frame.label()
    }
}

fn frame_panel<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let active = state.orchestrator.active_frame();
    let busy = state.orchestrator.is_busy();

    let frames = state.orchestrator.frames().into_iter().fold(
        Column::new().spacing(spacing::XS),
        |column, frame| {
            let is_active = active == Some(frame.name.as_str());
            column.push(
                button(Text::new(frame_label(&frame, i18n)).size(typography::BODY))
                    .width(Length::Fill)
                    .padding(spacing::XS)
                    .style(styles::button::toggle(is_active))
                    .on_press_maybe((!busy).then(|| Message::ApplyFrame(frame.name.clone()))),
            )
        },
    );

    Column::new()
        .spacing(spacing::SM)
        .push(Text::new(i18n.tr("frame-panel-title")).size(typography::TITLE_SM))
        .push(frames)
        .into()
}

fn share_panel<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let share_label = if state.is_sharing {
        i18n.tr("share-in-progress")
    } else {
        i18n.tr("share-button")
    };
    let page_url = state.orchestrator.address_bar().url();

    let mut column = Column::new()
        .spacing(spacing::SM)
        .push(Text::new(i18n.tr("share-panel-title")).size(typography::TITLE_SM))
        .push(
            Row::new()
                .spacing(spacing::XS)
                .push(
                    button(Text::new(share_label))
                        .padding([spacing::SM, spacing::LG])
                        .style(styles::button::primary)
                        .on_press_maybe((!state.is_sharing).then_some(Message::Share)),
                )
                .push(
                    button(Text::new(i18n.tr("share-copy-page-link")))
                        .padding([spacing::SM, spacing::MD])
                        .style(styles::button::unselected)
                        .on_press(Message::CopyLink(page_url)),
                ),
        );

    if !state.share_links.is_empty() {
        column = column.push(
            Text::new(i18n.tr("share-manual-options"))
                .size(typography::CAPTION)
                .color(palette::GRAY_500),
        );
        for link in &state.share_links {
            column = column.push(
                Row::new()
                    .spacing(spacing::SM)
                    .align_y(alignment::Vertical::Center)
                    .push(Text::new(link.platform.name()).size(typography::BODY))
                    .push(Space::new().width(Length::Fill))
                    .push(
                        button(Text::new(i18n.tr("share-open")).size(typography::CAPTION))
                            .style(styles::button::link)
                            .on_press(Message::OpenLink(link.url.clone())),
                    )
                    .push(
                        button(Text::new(i18n.tr("share-copy")).size(typography::CAPTION))
                            .style(styles::button::link)
                            .on_press(Message::CopyLink(link.url.clone())),
                    ),
            );
        }
    }

    if let Some(url) = &state.manual_url {
        column = column
            .push(
                Text::new(i18n.tr("share-copy-manually"))
                    .size(typography::CAPTION)
                    .color(palette::GRAY_500),
            )
            .push(
                Container::new(
                    text_input("", url)
                        .on_input(Message::ManualLinkEdited)
                        .size(typography::BODY)
                        .padding(spacing::XS),
                )
                .style(styles::container::manual_link),
            );
    }

    column.into()
}
