use clarity_core::{AppViewModel, OutputView, PostAction, RequestAction, UploadStage};
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::keys::{ACTION_KEYS, KEY_PICK, POST_ACTION_KEYS};
use super::layout;

const ACCENT: Color = Color::Cyan;
const ERROR: Color = Color::Red;

/// Inner size of the output panel as last drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct OutputViewport {
    pub width: u16,
    pub height: u16,
}

/// Draws the whole screen and reports the output panel's inner size.
pub(crate) fn render(frame: &mut Frame, view: &AppViewModel, scroll: u16) -> OutputViewport {
    let areas = layout::split(frame.area());
    let inner = Block::bordered().inner(areas.output);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "ClarityAssist",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center),
        areas.title,
    );

    let file_line = Line::from(vec![
        key_hint(KEY_PICK, "Choose File", view.picker_enabled),
        Span::raw("  "),
        Span::raw(view.file_label.clone()),
    ]);
    frame.render_widget(
        Paragraph::new(file_line).block(Block::bordered().title("Upload File")),
        areas.file_card,
    );

    let mut action_spans = Vec::new();
    for (key, action) in ACTION_KEYS.iter().zip(RequestAction::ALL) {
        action_spans.push(key_hint(*key, action.label(), view.actions_enabled));
        action_spans.push(Span::raw("  "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(action_spans)).block(Block::bordered().title("Actions")),
        areas.actions,
    );

    if let Some(status) = &view.status {
        let mut text = format!("{status} {}", spinner(view.spinner_frame));
        if let Some(stage) = view.stage {
            text.push_str(&format!(" [{}]", stage_label(stage)));
        }
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::Yellow))),
            areas.status,
        );
    }

    if let Some(paragraph) = output_paragraph(view) {
        frame.render_widget(
            paragraph.block(output_block(view)).scroll((scroll, 0)),
            areas.output,
        );
    }

    if view.post_actions_enabled {
        let mut spans = Vec::new();
        for (key, action) in POST_ACTION_KEYS.iter().zip(PostAction::ALL) {
            spans.push(key_hint(*key, action.label(), true));
            spans.push(Span::raw("  "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), areas.post_actions);
    }

    frame.render_widget(
        Paragraph::new(Span::styled(
            "Up/Down/PgUp/PgDn scroll  q quit",
            Style::default().add_modifier(Modifier::DIM),
        )),
        areas.footer,
    );

    if let Some(notice) = &view.notice {
        render_notice(frame, notice);
    }

    OutputViewport {
        width: inner.width,
        height: inner.height,
    }
}

fn output_paragraph(view: &AppViewModel) -> Option<Paragraph<'_>> {
    let text = match view.output.as_ref()? {
        OutputView::Content(text) => Text::raw(text.as_str()),
        OutputView::Error(text) => {
            Text::styled(format!("Error: {text}"), Style::default().fg(ERROR))
        }
    };
    Some(Paragraph::new(text).wrap(Wrap { trim: false }))
}

fn output_block(view: &AppViewModel) -> Block<'static> {
    match view.output {
        Some(OutputView::Error(_)) => Block::bordered()
            .title("Error")
            .border_style(Style::default().fg(ERROR)),
        _ => Block::bordered().title("Processed Content"),
    }
}

fn render_notice(frame: &mut Frame, notice: &str) {
    let area = layout::centered(frame.area(), 60, 5);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(notice.to_string()),
            Line::from(Span::styled(
                "Enter to dismiss",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .title("Notice")
                .border_style(Style::default().fg(ACCENT)),
        ),
        area,
    );
}

fn key_hint(key: char, label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!("[{key}] {label}"), style)
}

fn spinner(frame: u8) -> &'static str {
    match frame % 4 {
        0 => "",
        1 => ".",
        2 => "..",
        _ => "...",
    }
}

fn stage_label(stage: UploadStage) -> &'static str {
    match stage {
        UploadStage::Reading => "reading file",
        UploadStage::Sending => "uploading",
        UploadStage::Decoding => "reading response",
    }
}

/// Wrapped rows the output occupies at `width` columns.
pub(crate) fn output_row_count(view: &AppViewModel, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let rows = output_paragraph(view)
        .map(|paragraph| paragraph.line_count(width))
        .unwrap_or(0);
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Largest scroll offset that still leaves the last row visible.
pub(crate) fn max_scroll(view: &AppViewModel, viewport: OutputViewport) -> u16 {
    output_row_count(view, viewport.width).saturating_sub(viewport.height)
}
