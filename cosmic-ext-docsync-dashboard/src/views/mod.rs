mod dialogs;
mod documents;
mod settings;
mod sync;

use cosmic::{
    iced::{Alignment, Length},
    theme,
    widget::{button, column, container, icon, row, text, vertical_space},
    Element,
};

use crate::{
    messages::Message, space_m, space_s, space_xxs, theme_destructive_color, theme_success_color,
    DocsyncDashboard, Page, ICON_S,
};

impl DocsyncDashboard {
    pub(crate) fn sidebar_view(&self) -> Element<'_, Message> {
        let pages = [Page::Documents, Page::Sync, Page::Settings];

        let mut nav_items = column::with_capacity(pages.len()).spacing(space_xxs());

        for page in pages {
            let is_active = self.active_page == page;
            let item_content = row::with_capacity(2)
                .spacing(space_s())
                .align_y(Alignment::Center)
                .push(icon::from_name(page.icon_name()).size(20))
                .push(text(page.title()).size(14));

            let item_container = container(item_content)
                .padding(space_s())
                .width(Length::Fill);

            let nav_button = if is_active {
                button::custom(item_container).class(theme::Button::Suggested)
            } else {
                button::custom(item_container).class(theme::Button::Text)
            };

            nav_items = nav_items.push(
                nav_button
                    .on_press(Message::NavigateTo(page))
                    .padding(0)
                    .width(Length::Fill),
            );
        }

        let (status_icon, status_text, status_color) = if self.stream_connected {
            ("network-transmit-receive-symbolic", "Live", theme_success_color())
        } else {
            (
                "network-offline-symbolic",
                "Connecting...",
                theme_destructive_color(),
            )
        };

        let stream_status = row::with_capacity(2)
            .spacing(space_xxs())
            .align_y(Alignment::Center)
            .push(icon::from_name(status_icon).size(ICON_S))
            .push(
                text(status_text)
                    .size(12)
                    .class(theme::Text::Color(status_color)),
            );

        container(
            column::with_capacity(4)
                .push(text("DocSync").size(18))
                .push(vertical_space().height(space_m()))
                .push(nav_items)
                .push(vertical_space().height(Length::Fill))
                .push(stream_status),
        )
        .padding(space_m())
        .width(Length::Fixed(200.0))
        .height(Length::Fill)
        .into()
    }

    pub(crate) fn content_view(&self) -> Element<'_, Message> {
        match self.active_page {
            Page::Documents => self.documents_view(),
            Page::Sync => self.sync_view(),
            Page::Settings => self.settings_view(),
        }
    }
}
