use cosmic::{
    iced::{
        alignment::Horizontal,
        widget::{column, row},
        Alignment, Length,
    },
    theme,
    widget::{button, container, divider, icon, text, text_input},
    Element,
};
use docsync_api::BrowserState;

use crate::{
    space_m, space_s, space_xs, space_xxs, space_xxxs, theme_destructive_color, DocsyncDashboard,
    MappingForm, Message, ICON_M, ICON_S,
};

impl DocsyncDashboard {
    pub(crate) fn sync_view(&self) -> Element<'_, Message> {
        let header = row![
            text::title3("Path Mappings").width(Length::Fill),
            cosmic::widget::tooltip(
                button::icon(icon::from_name("view-refresh-symbolic").size(ICON_S))
                    .on_press(Message::RefreshMappings)
                    .padding(space_xxs()),
                "Refresh",
                cosmic::widget::tooltip::Position::Bottom,
            ),
            button::text("Add Mapping")
                .on_press(Message::StartAddMapping)
                .class(theme::Button::Suggested),
        ]
        .spacing(space_xxs())
        .align_y(Alignment::Center);

        let mut content = column![header].spacing(space_s());

        if self.mappings.is_empty() {
            content = content.push(
                container(text::caption("No path mappings configured"))
                    .padding(space_xs())
                    .width(Length::Fill)
                    .align_x(Horizontal::Center),
            );
        } else {
            let mut list = column![].spacing(space_xxs());
            for mapping in &self.mappings {
                let mut details = column![
                    text::body(&mapping.smb_name),
                    text::caption(mapping.remote_path.as_deref().unwrap_or("No remote folder")),
                ]
                .spacing(space_xxxs());
                if let Some(created) = &mapping.created {
                    details = details.push(text::caption(format!("Added {}", created)));
                }

                let mapping_row = row![
                    icon::from_name("folder-remote-symbolic").size(ICON_M),
                    details.width(Length::Fill),
                    cosmic::widget::tooltip(
                        button::icon(icon::from_name("document-edit-symbolic").size(ICON_S))
                            .on_press(Message::StartEditMapping(mapping.id))
                            .padding(space_xxs()),
                        "Edit mapping",
                        cosmic::widget::tooltip::Position::Bottom,
                    ),
                    cosmic::widget::tooltip(
                        button::icon(icon::from_name("user-trash-symbolic").size(ICON_S))
                            .on_press(Message::DeleteMapping(mapping.id))
                            .padding(space_xxs())
                            .class(theme::Button::Destructive),
                        "Delete mapping",
                        cosmic::widget::tooltip::Position::Bottom,
                    ),
                ]
                .spacing(space_xxs())
                .align_y(Alignment::Center);

                list = list.push(
                    container(mapping_row)
                        .padding(space_xxs())
                        .class(cosmic::theme::Container::Card),
                );
            }
            content = content.push(list);
        }

        if let Some(form) = &self.mapping_form {
            content = content.push(self.mapping_form_view(form));
        }

        container(content).padding(space_m()).width(Length::Fill).into()
    }

    fn mapping_form_view<'a>(&'a self, form: &'a MappingForm) -> Element<'a, Message> {
        let title = if form.old_smb_id.is_some() {
            "Edit Path Mapping"
        } else {
            "Add Path Mapping"
        };

        let selected_caption = match self.browser.selected() {
            Some(selected) => text::caption(format!("Remote folder: {}", selected.path)),
            None => text::caption("No remote folder selected"),
        };

        let chevron = if self.browser_open {
            "go-down-symbolic"
        } else {
            "go-next-symbolic"
        };
        let browser_toggle = button::custom(
            row![
                icon::from_name(chevron).size(ICON_S),
                text::body("Browse remote folders"),
            ]
            .spacing(space_xxs())
            .align_y(Alignment::Center),
        )
        .class(theme::Button::Text)
        .on_press(Message::ToggleRemoteBrowser);

        let mut form_column = column![
            text::title3(title),
            text_input("Share name (e.g. Invoices)", &form.share_name)
                .on_input(Message::ShareNameInput),
            selected_caption,
            browser_toggle,
        ]
        .spacing(space_xxs());

        if self.browser_open {
            form_column = form_column.push(self.remote_browser_view());
        }

        if let Some(error) = &form.error {
            form_column = form_column
                .push(text::caption(error).class(theme::Text::Color(theme_destructive_color())));
        }

        form_column = form_column.push(
            row![
                button::text("Cancel")
                    .on_press(Message::CancelMappingForm)
                    .width(Length::Fill),
                if form.busy {
                    button::text("Saving...")
                        .class(theme::Button::Suggested)
                        .width(Length::Fill)
                } else {
                    button::text("Save Mapping")
                        .on_press(Message::SubmitMapping)
                        .class(theme::Button::Suggested)
                        .width(Length::Fill)
                },
            ]
            .spacing(space_xxs()),
        );

        container(form_column)
            .padding(space_xs())
            .class(cosmic::theme::Container::Card)
            .into()
    }

    fn remote_browser_view(&self) -> Element<'_, Message> {
        let back_button = if self.browser.can_go_back() {
            button::icon(icon::from_name("go-previous-symbolic").size(ICON_S))
                .on_press(Message::BrowserBack)
                .padding(space_xxs())
        } else {
            button::icon(icon::from_name("go-previous-symbolic").size(ICON_S)).padding(space_xxs())
        };

        let header = row![
            cosmic::widget::tooltip(
                back_button,
                "Back",
                cosmic::widget::tooltip::Position::Bottom,
            ),
            text::caption(self.browser.current_path()).width(Length::Fill),
        ]
        .spacing(space_xxs())
        .align_y(Alignment::Center);

        let body: Element<'_, Message> = match self.browser.state() {
            // The listing stays hidden until a load completes.
            BrowserState::Idle | BrowserState::Loading => container(
                row![
                    icon::from_name("process-working-symbolic").size(ICON_S),
                    text::caption("Loading..."),
                ]
                .spacing(space_xxs())
                .align_y(Alignment::Center),
            )
            .padding(space_xs())
            .width(Length::Fill)
            .align_x(Horizontal::Center)
            .into(),
            BrowserState::Listed if self.browser.entries().is_empty() => {
                container(text::caption("No subfolders"))
                    .padding(space_xs())
                    .width(Length::Fill)
                    .align_x(Horizontal::Center)
                    .into()
            }
            BrowserState::Listed => {
                let selected_id = self
                    .browser
                    .selected()
                    .map(|selected| selected.folder_id.as_str());

                let mut list = column![].spacing(space_xxxs());
                for (index, entry) in self.browser.entries().iter().enumerate() {
                    let folder_icon = if entry.is_shared {
                        "folder-publicshare-symbolic"
                    } else {
                        "folder-symbolic"
                    };
                    let is_active = selected_id == Some(entry.item_id.as_str());

                    let select_button = button::custom(
                        row![
                            icon::from_name(folder_icon).size(ICON_S),
                            text::body(&entry.name).width(Length::Fill),
                        ]
                        .spacing(space_xxs())
                        .align_y(Alignment::Center),
                    )
                    .width(Length::Fill)
                    .padding([space_xxxs(), space_xxs()])
                    .class(if is_active {
                        theme::Button::Suggested
                    } else {
                        theme::Button::MenuItem
                    })
                    .on_press(Message::SelectFolder(index));

                    let open_button = cosmic::widget::tooltip(
                        button::icon(icon::from_name("go-next-symbolic").size(ICON_S))
                            .padding(space_xxxs())
                            .class(theme::Button::Transparent)
                            .on_press(Message::DescendFolder(index)),
                        "Open folder",
                        cosmic::widget::tooltip::Position::Bottom,
                    );

                    list = list.push(
                        row![select_button, open_button]
                            .spacing(space_xxxs())
                            .align_y(Alignment::Center),
                    );
                }
                list.into()
            }
        };

        container(column![header, divider::horizontal::default(), body].spacing(space_xxs()))
            .padding(space_xxs())
            .class(cosmic::theme::Container::Secondary)
            .into()
    }
}
