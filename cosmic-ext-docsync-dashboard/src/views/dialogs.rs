use cosmic::{
    iced::{
        alignment::{Horizontal, Vertical},
        widget::{column, row},
        Alignment, Length,
    },
    theme,
    widget::{button, container, divider, icon, text},
    Element,
};

use crate::{space_xs, space_xxs, Dialog, DocsyncDashboard, Message, ICON_M};

impl DocsyncDashboard {
    /// Blocking dialog; replaces the page content until dismissed
    pub(crate) fn dialog_view<'a>(&'a self, dialog: &'a Dialog) -> Element<'a, Message> {
        let card = match dialog {
            Dialog::Error { title, body } => self.error_dialog_view(title, body),
            Dialog::ConfirmDeleteMapping { id } => self.confirm_delete_view(*id),
        };

        container(card)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .padding(space_xs())
            .into()
    }

    fn error_dialog_view<'a>(&'a self, title: &'a str, body: &'a str) -> Element<'a, Message> {
        let content = column![
            row![
                icon::from_name("dialog-error-symbolic").size(ICON_M),
                text::title3(title),
            ]
            .spacing(space_xxs())
            .align_y(Alignment::Center),
            divider::horizontal::default(),
            // The service's own wording, verbatim
            text::body(body),
            button::text("Close")
                .on_press(Message::CloseDialog)
                .class(theme::Button::Suggested)
                .width(Length::Fill),
        ]
        .spacing(space_xs());

        container(content)
            .padding(space_xs())
            .width(Length::Fixed(440.0))
            .class(cosmic::theme::Container::Card)
            .into()
    }

    fn confirm_delete_view(&self, id: i64) -> Element<'_, Message> {
        let name = self
            .mappings
            .iter()
            .find(|mapping| mapping.id == id)
            .map(|mapping| mapping.smb_name.as_str())
            .unwrap_or("this mapping");

        let content = column![
            row![
                icon::from_name("dialog-warning-symbolic").size(ICON_M),
                text::title3("Delete Path Mapping"),
            ]
            .spacing(space_xxs())
            .align_y(Alignment::Center),
            divider::horizontal::default(),
            text::body(format!(
                "Remove the mapping for \"{}\"? Files already synced stay on the remote drive.",
                name
            )),
            row![
                button::text("Cancel")
                    .on_press(Message::CloseDialog)
                    .width(Length::Fill),
                button::text("Delete")
                    .on_press(Message::ConfirmDeleteMapping(id))
                    .class(theme::Button::Destructive)
                    .width(Length::Fill),
            ]
            .spacing(space_xxs()),
        ]
        .spacing(space_xs());

        container(content)
            .padding(space_xs())
            .width(Length::Fixed(440.0))
            .class(cosmic::theme::Container::Card)
            .into()
    }
}
