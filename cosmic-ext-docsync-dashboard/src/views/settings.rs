use cosmic::{
    iced::{
        alignment::Horizontal,
        widget::{column, row},
        Alignment, Length,
    },
    theme,
    widget::{button, container, dropdown, horizontal_space, icon, radio, text, text_input},
    Element,
};
use docsync_api::{FileNamingLogEntry, LogFilter};

use crate::{
    messages::NamingMethod, space_m, space_s, space_xs, space_xxs, space_xxxs,
    theme_destructive_color, theme_success_color, DocsyncDashboard, Message, ICON_S, ICON_XS,
    OLLAMA_SCHEMES,
};

impl DocsyncDashboard {
    pub(crate) fn settings_view(&self) -> Element<'_, Message> {
        container(
            column![
                text::title3("Settings"),
                self.onedrive_section(),
                self.file_naming_section(),
                self.logs_section(),
            ]
            .spacing(space_s()),
        )
        .padding(space_m())
        .width(Length::Fill)
        .into()
    }

    fn onedrive_section(&self) -> Element<'_, Message> {
        let content = column![
            text::title4("OneDrive Connection"),
            text::caption("Application (client) ID of the registered Azure application"),
            text_input("Client ID", &self.client_id_input).on_input(Message::ClientIdInput),
            row![
                horizontal_space(),
                if self.onedrive_busy {
                    button::text("Saving...").class(theme::Button::Suggested)
                } else {
                    button::text("Save")
                        .on_press(Message::SaveOneDriveSettings)
                        .class(theme::Button::Suggested)
                },
            ],
        ]
        .spacing(space_xxs());

        container(content)
            .padding(space_xs())
            .class(cosmic::theme::Container::Card)
            .into()
    }

    fn file_naming_section(&self) -> Element<'_, Message> {
        let method = self.naming_method;
        let radios = column![
            radio(
                "OpenAI",
                NamingMethod::OpenAi,
                Some(method),
                Message::SelectNamingMethod,
            ),
            radio(
                "Ollama",
                NamingMethod::Ollama,
                Some(method),
                Message::SelectNamingMethod,
            ),
            radio(
                "Disabled",
                NamingMethod::Disabled,
                Some(method),
                Message::SelectNamingMethod,
            ),
        ]
        .spacing(space_xxxs());

        let mut content = column![
            text::title4("AI File Naming"),
            text::caption("Rename processed documents with a language model"),
            radios,
        ]
        .spacing(space_xxs());

        match method {
            NamingMethod::OpenAi => content = content.push(self.openai_form_view()),
            NamingMethod::Ollama => content = content.push(self.ollama_form_view()),
            NamingMethod::Disabled => {
                content = content
                    .push(button::text("Disable File Naming").on_press(Message::DisableFileNaming));
            }
        }

        if let Some(status) = &self.settings_status {
            let color = if status.is_error {
                theme_destructive_color()
            } else {
                theme_success_color()
            };
            content =
                content.push(text::caption(&status.message).class(theme::Text::Color(color)));
        }

        container(content)
            .padding(space_xs())
            .class(cosmic::theme::Container::Card)
            .into()
    }

    fn openai_form_view(&self) -> Element<'_, Message> {
        column![
            text_input("OpenAI API key (sk-...)", &self.openai_key_input)
                .password()
                .on_input(Message::OpenAiKeyInput),
            row![
                button::text("Remove Key")
                    .on_press(Message::DeleteOpenAiSettings)
                    .class(theme::Button::Destructive),
                horizontal_space(),
                // The service validates the key before accepting it.
                if self.openai_busy {
                    button::text("Testing...").class(theme::Button::Suggested)
                } else {
                    button::text("Save")
                        .on_press(Message::SaveOpenAiSettings)
                        .class(theme::Button::Suggested)
                },
            ]
            .spacing(space_xxs()),
        ]
        .spacing(space_xxs())
        .into()
    }

    fn ollama_form_view(&self) -> Element<'_, Message> {
        let form = &self.ollama;

        let server_row = row![
            dropdown(
                OLLAMA_SCHEMES,
                Some(form.scheme_index),
                Message::OllamaSchemeSelected,
            ),
            text_input("Server address", &form.address).on_input(Message::OllamaAddressInput),
            text_input("Port", &form.port)
                .on_input(Message::OllamaPortInput)
                .width(Length::Fixed(90.0)),
        ]
        .spacing(space_xxs())
        .align_y(Alignment::Center);

        let mut content = column![server_row].spacing(space_xxs());

        if let Some(error) = &form.error {
            content = content
                .push(text::caption(error).class(theme::Text::Color(theme_destructive_color())));
        }

        if let Some(probe) = &form.probe {
            content = content.push(text::caption(format!(
                "Connected to Ollama {} ({} models)",
                probe.version,
                probe.models.len()
            )));
            content = content.push(dropdown(
                &form.model_labels,
                Some(form.model_index),
                Message::OllamaModelSelected,
            ));
        }

        let mut buttons = row![
            button::text("Remove Settings")
                .on_press(Message::DeleteOllamaSettings)
                .class(theme::Button::Destructive),
            horizontal_space(),
        ]
        .spacing(space_xxs());

        buttons = buttons.push(if form.busy {
            button::text("Connecting...")
        } else {
            button::text("Connect").on_press(Message::ConnectOllama)
        });

        if form.probe.is_some() && !form.busy {
            buttons = buttons.push(
                button::text("Save")
                    .on_press(Message::SaveOllamaSettings)
                    .class(theme::Button::Suggested),
            );
        }

        content.push(buttons).into()
    }

    fn logs_section(&self) -> Element<'_, Message> {
        let chevron = if self.logs_open {
            "go-down-symbolic"
        } else {
            "go-next-symbolic"
        };
        let header = button::custom(
            row![
                icon::from_name(chevron).size(ICON_S),
                text::title4("File Naming Logs").width(Length::Fill),
            ]
            .spacing(space_xxs())
            .align_y(Alignment::Center),
        )
        .class(theme::Button::Text)
        .width(Length::Fill)
        .on_press(Message::ToggleLogsSection);

        let mut content = column![header].spacing(space_xxs());

        if self.logs_open {
            let filter_index = match self.logs_filter {
                LogFilter::All => 0,
                LogFilter::Success => 1,
                LogFilter::Failed => 2,
            };
            content = content.push(
                row![
                    dropdown(
                        &["All", "Success", "Failed"],
                        Some(filter_index),
                        Message::LogsFilterSelected,
                    ),
                    horizontal_space(),
                    cosmic::widget::tooltip(
                        button::icon(icon::from_name("view-refresh-symbolic").size(ICON_S))
                            .on_press(Message::RefreshLogs)
                            .padding(space_xxs()),
                        "Refresh",
                        cosmic::widget::tooltip::Position::Bottom,
                    ),
                ]
                .spacing(space_xxs())
                .align_y(Alignment::Center),
            );

            if self.logs_busy {
                content = content.push(
                    container(
                        row![
                            icon::from_name("process-working-symbolic").size(ICON_S),
                            text::caption("Loading..."),
                        ]
                        .spacing(space_xxs())
                        .align_y(Alignment::Center),
                    )
                    .padding(space_xs())
                    .width(Length::Fill)
                    .align_x(Horizontal::Center),
                );
            } else if self.logs.logs.is_empty() {
                content = content.push(
                    container(text::caption("No log entries"))
                        .padding(space_xs())
                        .width(Length::Fill)
                        .align_x(Horizontal::Center),
                );
            } else {
                let mut list = column![].spacing(space_xxs());
                for entry in &self.logs.logs {
                    list = list.push(log_entry_view(entry));
                }
                content = content.push(list);

                let page = self.logs.page.max(1);
                let total = self.logs.total_pages.max(1);
                let prev = if page > 1 {
                    button::icon(icon::from_name("go-previous-symbolic").size(ICON_S))
                        .on_press(Message::LogsPageRequested(page - 1))
                        .padding(space_xxs())
                } else {
                    button::icon(icon::from_name("go-previous-symbolic").size(ICON_S))
                        .padding(space_xxs())
                };
                let next = if page < total {
                    button::icon(icon::from_name("go-next-symbolic").size(ICON_S))
                        .on_press(Message::LogsPageRequested(page + 1))
                        .padding(space_xxs())
                } else {
                    button::icon(icon::from_name("go-next-symbolic").size(ICON_S))
                        .padding(space_xxs())
                };
                content = content.push(
                    container(
                        row![
                            prev,
                            text::caption(format!(
                                "Page {} of {} ({} entries)",
                                page, total, self.logs.total_count
                            )),
                            next,
                        ]
                        .spacing(space_xxs())
                        .align_y(Alignment::Center),
                    )
                    .width(Length::Fill)
                    .align_x(Horizontal::Center),
                );
            }
        }

        container(content)
            .padding(space_xs())
            .class(cosmic::theme::Container::Card)
            .into()
    }
}

fn log_entry_view(entry: &FileNamingLogEntry) -> Element<'_, Message> {
    let success = entry
        .file_naming_status
        .as_deref()
        .is_some_and(|status| status.eq_ignore_ascii_case("success"));
    let status_icon = if success {
        "emblem-ok-symbolic"
    } else {
        "emblem-error-symbolic"
    };

    let method = match (entry.method.as_deref(), entry.model.as_deref()) {
        (Some(method), Some(model)) => format!("{} · {}", method, model),
        (Some(method), None) => method.to_string(),
        (None, Some(model)) => model.to_string(),
        (None, None) => "Unknown method".to_string(),
    };

    let mut details = column![
        text::body(entry.file_name.as_deref().unwrap_or("Unknown file")),
        text::caption(method),
    ]
    .spacing(space_xxxs());

    if let (Some(started), Some(finished)) = (&entry.started, &entry.finished) {
        details = details.push(text::caption(format!(
            "Started {} · finished {}",
            started, finished
        )));
    } else if let Some(started) = &entry.started {
        details = details.push(text::caption(format!("Started {}", started)));
    }

    if let Some(error) = &entry.error_description {
        details = details
            .push(text::caption(error).class(theme::Text::Color(theme_destructive_color())));
    }

    container(
        row![
            icon::from_name(status_icon).size(ICON_XS),
            details.width(Length::Fill),
        ]
        .spacing(space_xxs())
        .align_y(Alignment::Center),
    )
    .padding(space_xxs())
    .class(cosmic::theme::Container::Card)
    .into()
}
