use cosmic::{
    iced::{
        alignment::{Horizontal, Vertical},
        widget::{column, row, Space},
        Alignment, Background, Border, Color, Length,
    },
    theme,
    widget::{button, container, horizontal_space, icon, text},
    Element,
};
use docsync_api::{
    contrast_yiq, progress_segments, Badge, Contrast, DocumentCard, SegmentState, StatusKind,
};

use crate::{
    parse_hex_color, space_m, space_s, space_xs, space_xxs, space_xxxs, theme_accent_color,
    theme_destructive_color, theme_muted_color, theme_neutral_color, theme_success_color,
    DocsyncDashboard, Message, ICON_M, ICON_XL, ICON_XS,
};

impl DocsyncDashboard {
    pub(crate) fn documents_view(&self) -> Element<'_, Message> {
        let stats = self.reconciler.stats();
        let processing_busy = stats.processing_pdfs > 0;

        let stats_row = row![
            stat_tile(
                if processing_busy {
                    "process-working-symbolic"
                } else {
                    "emblem-system-symbolic"
                },
                "Processing",
                stats.processing_pdfs,
                stats.latest_processing_timestamp.as_deref(),
            ),
            stat_tile(
                "emblem-ok-symbolic",
                "Processed",
                stats.processed_pdfs,
                stats.latest_completed_timestamp.as_deref(),
            ),
        ]
        .spacing(space_s());

        let cards: Vec<&DocumentCard> = self.reconciler.cards().collect();

        let mut grid = column![].spacing(space_s());
        if cards.is_empty() {
            grid = grid.push(
                container(
                    column![
                        icon::from_name("folder-documents-symbolic").size(ICON_XL),
                        text::title4("No documents yet"),
                        text::caption("Drop a PDF into a watched folder to see it here."),
                    ]
                    .spacing(space_xxs())
                    .align_x(Horizontal::Center),
                )
                .width(Length::Fill)
                .padding(space_m())
                .align_x(Horizontal::Center),
            );
        } else {
            for chunk in cards.chunks(self.cards_per_row) {
                let mut cards_row = row![].spacing(space_s());
                for card in chunk {
                    cards_row = cards_row.push(
                        container(self.document_card_view(card)).width(Length::FillPortion(1)),
                    );
                }
                // Keep card widths stable on a partially filled last row.
                for _ in chunk.len()..self.cards_per_row {
                    cards_row = cards_row.push(horizontal_space().width(Length::FillPortion(1)));
                }
                grid = grid.push(cards_row);
            }
        }

        container(
            column![text::title3("Documents"), stats_row, grid].spacing(space_s()),
        )
        .padding(space_m())
        .width(Length::Fill)
        .into()
    }

    fn document_card_view<'a>(&'a self, card: &'a DocumentCard) -> Element<'a, Message> {
        let preview: Element<'a, Message> = match self.preview_handle(card.id) {
            Some(handle) => cosmic::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(140.0))
                .into(),
            None => container(icon::from_name("x-office-document-symbolic").size(ICON_XL))
                .width(Length::Fill)
                .height(Length::Fixed(140.0))
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center)
                .into(),
        };

        let details = column![
            text::body(card.title()),
            text::caption(format!("Pages: {}", card.pages_label())),
            text::caption(format!(
                "Modified: {}",
                card.local_modified.as_deref().unwrap_or("N/A")
            )),
        ]
        .spacing(space_xxxs());

        let mut badges = row![].spacing(space_xxxs());
        for badge in &card.badges {
            badges = badges.push(badge_view(badge));
        }

        let kind = card.status_kind();
        let status = row![
            icon::from_name(status_icon_name(kind)).size(ICON_XS),
            text::caption(card.status_line()).class(theme::Text::Color(status_color(kind))),
        ]
        .spacing(space_xxxs())
        .align_y(Alignment::Center);

        container(
            column![
                preview,
                details,
                badges,
                status,
                progress_view(card.progress_step()),
            ]
            .spacing(space_xxs()),
        )
        .padding(space_xs())
        .width(Length::Fill)
        .class(cosmic::theme::Container::Card)
        .into()
    }
}

fn stat_tile<'a>(
    icon_name: &'static str,
    label: &'static str,
    count: u32,
    timestamp: Option<&'a str>,
) -> Element<'a, Message> {
    let mut details = column![text::caption(label), text::title4(count.to_string())]
        .spacing(space_xxxs());
    if let Some(timestamp) = timestamp {
        details = details.push(text::caption(timestamp));
    }

    container(
        row![icon::from_name(icon_name).size(ICON_M), details]
            .spacing(space_xs())
            .align_y(Alignment::Center),
    )
    .padding(space_xs())
    .width(Length::FillPortion(1))
    .class(cosmic::theme::Container::Card)
    .into()
}

fn badge_view(badge: &Badge) -> Element<'_, Message> {
    let background = parse_hex_color(&badge.color);
    let foreground = match contrast_yiq(&badge.color) {
        Contrast::Black => Color::BLACK,
        Contrast::White => Color::WHITE,
    };

    let label = container(
        text(badge.text.clone())
            .size(11)
            .class(theme::Text::Color(foreground)),
    )
    .padding([space_xxxs(), space_xxs()])
    .class(tinted(background, 8.0));

    let content: Element<'_, Message> = match &badge.url {
        Some(url) => button::custom(label)
            .padding(0)
            .class(theme::Button::Transparent)
            .on_press(Message::OpenUrl(url.clone()))
            .into(),
        None => label.into(),
    };

    match &badge.title {
        Some(title) => cosmic::widget::tooltip(
            content,
            text::caption(title.clone()),
            cosmic::widget::tooltip::Position::Bottom,
        )
        .into(),
        None => content,
    }
}

/// The five-segment bar under a card
fn progress_view(step: i32) -> Element<'static, Message> {
    let mut segments = row![].spacing(space_xxxs());
    for state in progress_segments(step) {
        let color = match state {
            SegmentState::Active => theme_accent_color(),
            SegmentState::Completed => theme_success_color(),
            SegmentState::Failed => theme_destructive_color(),
            SegmentState::Neutral => theme_neutral_color(),
        };
        segments = segments.push(
            container(Space::new(Length::Fill, Length::Fixed(6.0)))
                .width(Length::FillPortion(1))
                .class(tinted(color, 3.0)),
        );
    }
    segments.into()
}

fn status_icon_name(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Pending | StatusKind::Syncing => "hourglass-symbolic",
        StatusKind::Processing => "emblem-system-symbolic",
        StatusKind::Completed => "emblem-ok-symbolic",
        StatusKind::Failed => "process-stop-symbolic",
        StatusKind::Deleted => "user-trash-symbolic",
        StatusKind::InvalidFile => "dialog-warning-symbolic",
    }
}

fn status_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Completed => theme_success_color(),
        StatusKind::Failed | StatusKind::Deleted | StatusKind::InvalidFile => {
            theme_destructive_color()
        }
        StatusKind::Processing | StatusKind::Syncing => theme_accent_color(),
        StatusKind::Pending => theme_muted_color(),
    }
}

fn tinted(color: Color, radius: f32) -> theme::Container<'static> {
    theme::Container::custom(move |_theme| cosmic::iced::widget::container::Style {
        background: Some(Background::Color(color)),
        border: Border {
            radius: radius.into(),
            ..Default::default()
        },
        ..Default::default()
    })
}
