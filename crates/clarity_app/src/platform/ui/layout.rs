use ratatui::layout::{Constraint, Layout, Rect};

pub(crate) struct ScreenAreas {
    pub title: Rect,
    pub file_card: Rect,
    pub actions: Rect,
    pub status: Rect,
    pub output: Rect,
    pub post_actions: Rect,
    pub footer: Rect,
}

pub(crate) fn split(area: Rect) -> ScreenAreas {
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        title: rows[0],
        file_card: rows[1],
        actions: rows[2],
        status: rows[3],
        output: rows[4],
        post_actions: rows[5],
        footer: rows[6],
    }
}

/// A box of `percent_x` width and fixed `height`, centered in `area`.
pub(crate) fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let scaled = u32::from(area.width) * u32::from(percent_x) / 100;
    let width = u16::try_from(scaled)
        .unwrap_or(area.width)
        .max(20)
        .min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
