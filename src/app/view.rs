use super::messages::Message;
use super::state::{App, LIST_SCROLL_ID, OUTER_PADDING_PX, OVERSCAN_UNITS};
use crate::cards::{CARD_INNER_SPACING_PX, CARD_PADDING_PX, LINE_HEIGHT, VisualUnit, visible_range};
use crate::config::{MAX_FONT_SIZE, MIN_FONT_SIZE, ThemeMode};
use crate::pronounce::Variant;
use crate::session::SessionState;
use iced::alignment::Vertical;
use iced::widget::text::{LineHeight, Wrapping};
use iced::widget::{
    Column, Space, button, center, column, container, horizontal_space, opaque, row, scrollable,
    slider, stack, text, text_input,
};
use iced::{Background, Border, Element, Length, Theme};

impl App {
    /// Every slot of the root column is always present, and the notice sits
    /// on a layer above the list, so the list keeps its widget state (and its
    /// scroll offset) while the search bar or a notice comes and goes.
    pub fn view(&self) -> Element<'_, Message> {
        let search: Element<'_, Message> = if self.search.visible {
            self.search_bar()
        } else {
            Space::with_height(Length::Shrink).into()
        };

        let base = match self.session.state() {
            SessionState::Empty => self.empty_panel(),
            SessionState::Populated { .. } => self.card_list(),
        };
        let overlay = self
            .library
            .notice
            .as_deref()
            .map(|notice| self.notice_overlay(notice));
        let main = stack![base]
            .push_maybe(overlay)
            .width(Length::Fill)
            .height(Length::Fill);

        let error_line: Element<'_, Message> = match &self.pronunciation.last_error {
            Some(err) => text(err.as_str()).size(13).into(),
            None => Space::with_height(Length::Shrink).into(),
        };

        column![self.controls(), self.font_controls(), search, main, error_line]
            .padding(OUTER_PADDING_PX)
            .spacing(12)
            .height(Length::Fill)
            .into()
    }

    fn controls(&self) -> Element<'_, Message> {
        let status = self.session.status();
        let theme_label = if matches!(self.config.theme, ThemeMode::Night) {
            "Day Mode"
        } else {
            "Night Mode"
        };
        let title = self.session.title().unwrap_or("Word Cards");

        let mut jump = text_input("#", status.jump_value()).width(Length::Fixed(80.0));
        let mut go = button("Go");
        if status.jump_max() > 0 {
            jump = jump
                .on_input(Message::JumpInputChanged)
                .on_submit(Message::JumpSubmitted);
            go = go.on_press(Message::JumpSubmitted);
        }

        let open_input = text_input("Path to a word list (.json)", &self.library.open_path_input)
            .on_input(Message::OpenPathInputChanged)
            .on_submit(Message::OpenPathRequested)
            .width(Length::FillPortion(2));
        let open_button = if self.library.loading {
            button("Loading...")
        } else {
            button("Open").on_press(Message::OpenPathRequested)
        };

        column![
            row![
                text(title).size(22),
                horizontal_space(),
                text(status.progress()),
                jump,
                text(format!("/ {}", status.jump_max())),
                go,
                button(theme_label).on_press(Message::ToggleTheme),
                button("Search").on_press(Message::ToggleSearch),
            ]
            .spacing(10)
            .align_y(Vertical::Center),
            row![open_input, open_button]
                .spacing(10)
                .align_y(Vertical::Center),
        ]
        .spacing(8)
        .into()
    }

    fn font_controls(&self) -> Element<'_, Message> {
        row![
            text(format!("Font: {}", self.config.font_size)),
            slider(
                MIN_FONT_SIZE as f32..=MAX_FONT_SIZE as f32,
                self.config.font_size as f32,
                |value| Message::FontSizeChanged(value.round() as u32),
            )
            .width(Length::Fixed(240.0)),
            button(text(format!("{} audio", Variant::Us))).on_press(Message::PronounceCurrent(Variant::Us)),
            button(text(format!("{} audio", Variant::Uk))).on_press(Message::PronounceCurrent(Variant::Uk)),
        ]
        .spacing(12)
        .align_y(Vertical::Center)
        .into()
    }

    fn search_bar(&self) -> Element<'_, Message> {
        let summary = match &self.search.error {
            Some(err) => format!("Invalid pattern: {err}"),
            None if self.search.query.trim().is_empty() => String::new(),
            None if self.search.matches.is_empty() => "No matches".to_string(),
            None => format!(
                "{} of {}",
                self.search.selected_match + 1,
                self.search.matches.len()
            ),
        };
        row![
            text_input("Search headwords (regex)", &self.search.query)
                .on_input(Message::SearchQueryChanged)
                .on_submit(Message::SearchNext)
                .width(Length::FillPortion(2)),
            button("Prev").on_press(Message::SearchPrev),
            button("Next").on_press(Message::SearchNext),
            text(summary),
        ]
        .spacing(10)
        .align_y(Vertical::Center)
        .into()
    }

    fn notice_overlay<'a>(&'a self, notice: &'a str) -> Element<'a, Message> {
        let panel = container(
            column![
                text(notice),
                button("Dismiss").on_press(Message::DismissNotice),
            ]
            .spacing(12),
        )
        .padding(16)
        .width(Length::Fill)
        .style(container::rounded_box);

        opaque(center(panel).style(|theme: &Theme| container::Style {
            background: Some(Background::Color(
                theme.extended_palette().background.base.color.scale_alpha(0.9),
            )),
            ..container::Style::default()
        }))
    }

    fn empty_panel(&self) -> Element<'_, Message> {
        let mut panel = column![text(if self.list_path.is_some() {
            "This list has no entries."
        } else {
            "Open a word list to begin."
        })]
        .spacing(8);
        if !self.library.recent.is_empty() {
            panel = panel.push(text("Recent lists").size(18));
            for path in &self.library.recent {
                panel = panel.push(
                    button(text(path.display().to_string()))
                        .style(button::text)
                        .on_press(Message::OpenList(path.clone())),
                );
            }
        }
        container(panel).padding(16).width(Length::Fill).into()
    }

    /// Only cards near the viewport are built; fixed spacers stand in for the
    /// rest so the scroll extent matches the cached bounds exactly.
    fn card_list(&self) -> Element<'_, Message> {
        let units = self.session.units();
        let spacing = self.session.metrics().spacing;
        let range = visible_range(
            units,
            self.scroll.offset,
            self.scroll.viewport_height,
            OVERSCAN_UNITS,
        );
        let current = self.session.current().map(|p| p - 1);

        let mut list: Column<'_, Message> = Column::new().width(Length::Fill);
        let mut consumed = 0.0f32;
        if let Some(first) = units.get(range.start) {
            list = list.push(Space::with_height(first.bounds.top));
            consumed = first.bounds.top;
        }
        for unit in &units[range.clone()] {
            list = list.push(self.card(unit, current == Some(unit.index)));
            consumed = unit.bounds.bottom();
            if unit.index + 1 < units.len() {
                list = list.push(Space::with_height(spacing));
                consumed += spacing;
            }
        }
        let remaining = (self.session.content_height() - consumed).max(0.0);
        list = list.push(Space::with_height(remaining));

        let generation = self.session.generation();
        scrollable(list)
            .id(LIST_SCROLL_ID.clone())
            .on_scroll(move |viewport| Message::Scrolled {
                generation,
                offset_y: viewport.absolute_offset().y,
                viewport_width: viewport.bounds().width,
                viewport_height: viewport.bounds().height,
            })
            .height(Length::Fill)
            .into()
    }

    fn card<'a>(&'a self, unit: &'a VisualUnit, is_current: bool) -> Element<'a, Message> {
        let metrics = self.session.metrics();
        let line_height = LineHeight::Relative(LINE_HEIGHT);
        let phonetic = |variant: Variant, value: &'a str| {
            button(
                text(format!("{}: {}", variant.label(), value))
                    .size(metrics.phonetic_size())
                    .line_height(line_height),
            )
            .padding(0)
            .style(button::text)
            .on_press(Message::Pronounce {
                index: unit.index,
                variant,
            })
        };

        let mut body: Column<'_, Message> = column![
            text(unit.headword.as_str())
                .size(metrics.headword_size())
                .line_height(line_height),
            row![
                phonetic(Variant::Us, unit.phonetic_us.as_str()),
                phonetic(Variant::Uk, unit.phonetic_uk.as_str()),
            ]
            .spacing(24),
        ]
        .spacing(CARD_INNER_SPACING_PX);
        for paragraph in &unit.paragraphs {
            body = body.push(
                text(paragraph.as_str())
                    .size(metrics.body_size())
                    .line_height(line_height)
                    .wrapping(Wrapping::WordOrGlyph),
            );
        }
        body = body.push(
            text(unit.frequency.as_str())
                .size(metrics.footer_size())
                .line_height(line_height),
        );

        container(body)
            .padding(CARD_PADDING_PX)
            .width(Length::Fill)
            .height(Length::Fixed(unit.bounds.height))
            .clip(true)
            .style(move |theme: &Theme| card_style(theme, is_current))
            .into()
    }
}

fn card_style(theme: &Theme, is_current: bool) -> container::Style {
    let palette = theme.extended_palette();
    let (border_color, border_width) = if is_current {
        (palette.primary.strong.color, 2.0)
    } else {
        (palette.background.strong.color, 1.0)
    };
    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        border: Border {
            color: border_color,
            width: border_width,
            radius: 8.0.into(),
        },
        ..container::Style::default()
    }
}
