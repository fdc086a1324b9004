//! UI rendering for the TUI.
//!
//! Rendering reads the [`App`] and never changes it, so it can run on every
//! tick.

use ratatui::{
    backend::TestBackend,
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::{App, CleanerItem, Phase};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const NAME_WIDTH: usize = 35;
const SIZE_WIDTH: usize = 12;
const ACCENT: Color = Color::Magenta;

fn fmt_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Render the entire UI.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0]);

    match app.phase {
        Phase::Scanning => render_scanning(app, frame, chunks[1]),
        Phase::Review | Phase::Confirm => render_review(app, frame, chunks[1]),
        Phase::LargeFileSelection => render_large_files(app, frame, chunks[1]),
        Phase::Cleaning => render_cleaning(app, frame, chunks[1]),
        Phase::Done => render_done(app, frame, chunks[1]),
    }

    render_footer(app, frame, chunks[2]);

    if app.phase == Phase::Confirm {
        render_confirm_dialog(app, frame);
    }
}

/// Render the UI at the given size and return it as plain text, one line
/// per terminal row.
pub fn render_to_string(app: &App, width: u16, height: u16) -> std::io::Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|frame| render(app, frame))?;

    let buffer = terminal.backend().buffer();
    let mut output = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            output.push_str(buffer[(x, y)].symbol());
        }
        output.push('\n');
    }
    Ok(output)
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let status = match app.phase {
        Phase::Scanning => {
            let done = app.items.iter().filter(|i| i.scanned).count();
            format!("Scanning {}/{}", done, app.items.len())
        }
        Phase::Review | Phase::LargeFileSelection | Phase::Confirm => {
            format!("Reclaimable: {}", fmt_size(app.total_reclaimable))
        }
        Phase::Cleaning => "Cleaning".to_string(),
        Phase::Done => "Done".to_string(),
    };

    let header_text = match app.free_after.or(app.free_before) {
        Some(free) => format!(" {}  │  Free space: {}", status, fmt_size(free)),
        None => format!(" {}", status),
    };

    let block = Block::default()
        .title(" Reclaim ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn body_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
}

fn spinner(app: &App) -> &'static str {
    SPINNER[app.tick % SPINNER.len()]
}

fn truncate_end(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn truncate_start(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }
    let kept: String = text.chars().skip(count - max.saturating_sub(3)).collect();
    format!("...{}", kept)
}

fn render_scanning(app: &App, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(format!(" {} Scanning system...", spinner(app))),
        Line::raw(""),
    ];

    for item in &app.items {
        let status = if item.skip {
            Span::styled("Requires root", Style::default().fg(Color::Yellow))
        } else if !item.scanned {
            Span::raw("...")
        } else if item.error.is_some() {
            Span::styled("ERROR", Style::default().fg(Color::Red))
        } else {
            Span::raw(fmt_size(item.size))
        };

        lines.push(Line::from(vec![
            Span::raw(format!(
                "  {:<width$} ",
                truncate_end(item.cleaner.name(), NAME_WIDTH),
                width = NAME_WIDTH
            )),
            status,
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(body_block(" Scan ")), area);
}

fn render_review(app: &App, frame: &mut Frame, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let window = app.main_window();

    let mut lines = vec![Line::styled(
        format!(
            "       {:<name$} {:>size$}",
            "Name",
            "Size",
            name = NAME_WIDTH,
            size = SIZE_WIDTH
        ),
        dim,
    )];

    for row in window.range() {
        if row == app.items.len() {
            lines.push(clean_button(app));
        } else {
            lines.push(item_line(app, row, &app.items[row]));
        }
    }

    lines.push(Line::styled(scroll_hint(window.more_above(), window.more_below()), dim));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!(" Total Selected to Clean: {}", fmt_size(app.total_selected)),
        Style::default().fg(Color::Green),
    ));
    lines.push(Line::styled(
        format!(" Total Reclaimable: {}", fmt_size(app.total_reclaimable)),
        dim,
    ));

    frame.render_widget(
        Paragraph::new(lines).block(body_block(" Select items to clean ")),
        area,
    );
}

fn scroll_hint(above: bool, below: bool) -> String {
    match (above, below) {
        (true, true) => "   ↑ more items above   ↓ more items below".to_string(),
        (true, false) => "   ↑ more items above".to_string(),
        (false, true) => "   ↓ more items below".to_string(),
        (false, false) => String::new(),
    }
}

fn item_line<'a>(app: &App, index: usize, item: &'a CleanerItem) -> Line<'a> {
    let is_cursor = app.cursor == index;

    let checkbox = if item.selected {
        "[x]"
    } else if item.skip {
        "[-]"
    } else {
        "[ ]"
    };

    let mut size_str = fmt_size(item.size);
    let mut extras = None;

    if app.is_drill_down(index) && !item.skip {
        if app.lf_selected_count > 0 {
            size_str = format!("{} / {}", fmt_size(app.lf_selected_size), size_str);
            extras = Some(Span::styled(
                format!(" ({} files selected)", app.lf_selected_count),
                Style::default().fg(Color::Green),
            ));
        } else if item.size > 0 {
            extras = Some(Span::styled(
                " (Enter/Space to detail)",
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    if let Some(err) = &item.error {
        size_str = "ERROR".to_string();
        extras = Some(Span::styled(
            format!(" {}", err),
            Style::default().fg(Color::Red),
        ));
    }

    if item.skip {
        size_str = "Needs root".to_string();
    }

    let style = if is_cursor {
        Style::default().fg(ACCENT).bold()
    } else if item.skip || !item.selected {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::raw(if is_cursor { " > " } else { "   " }),
        Span::styled(
            format!(
                "{} {:<name$} {:>size$}",
                checkbox,
                truncate_end(item.cleaner.name(), NAME_WIDTH),
                size_str,
                name = NAME_WIDTH,
                size = SIZE_WIDTH
            ),
            style,
        ),
    ];
    spans.extend(extras);

    Line::from(spans)
}

fn clean_button(app: &App) -> Line<'static> {
    let (cursor, style) = if app.on_clean_button() {
        (" > ", Style::default().fg(ACCENT).bold())
    } else {
        ("   ", Style::default().fg(Color::DarkGray))
    };
    Line::from(vec![
        Span::raw(cursor),
        Span::styled("[ CLEAN SELECTED ITEMS ]", style),
    ])
}

fn render_large_files(app: &App, frame: &mut Frame, area: Rect) {
    let block = body_block(" Select large files to delete ");
    let inner = block.inner(area);
    let dim = Style::default().fg(Color::DarkGray);

    if app.large_files.is_empty() {
        let paragraph = Paragraph::new("No large unused files found.")
            .block(block)
            .alignment(Alignment::Center)
            .style(dim);
        frame.render_widget(paragraph, area);
        return;
    }

    let path_width = (inner.width as usize).saturating_sub(25).max(20);
    let window = app.large_file_window();

    let mut lines = vec![Line::styled(
        format!("       {:<path$} {:>10}", "Path", "Size", path = path_width),
        dim,
    )];

    for (i, entry) in app
        .large_files
        .iter()
        .enumerate()
        .skip(window.start)
        .take(window.end - window.start)
    {
        let is_cursor = app.lf_cursor == i;
        let style = if is_cursor {
            Style::default().fg(ACCENT).bold()
        } else if !entry.selected {
            dim
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::raw(if is_cursor { " > " } else { "   " }),
            Span::styled(
                format!(
                    "{} {:<path$} {:>10}",
                    if entry.selected { "[x]" } else { "[ ]" },
                    truncate_start(&entry.path.display().to_string(), path_width),
                    fmt_size(entry.size),
                    path = path_width
                ),
                style,
            ),
        ]));
    }

    lines.push(Line::styled(scroll_hint(window.more_above(), window.more_below()), dim));
    lines.push(Line::styled(
        format!(
            " {} of {} files selected, {}",
            app.lf_selected_count,
            app.large_files.len(),
            fmt_size(app.lf_selected_size)
        ),
        Style::default().fg(Color::Green),
    ));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_cleaning(app: &App, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(format!(" {} Cleaning selected items...", spinner(app))),
        Line::raw(""),
    ];
    lines.extend(
        app.items
            .iter()
            .filter(|i| i.selected && !i.skip)
            .map(outcome_line),
    );

    frame.render_widget(Paragraph::new(lines).block(body_block(" Clean ")), area);
}

fn outcome_line(item: &CleanerItem) -> Line<'_> {
    let (icon, status) = match (item.cleaned, &item.error) {
        (false, _) => (Span::raw("•"), Span::raw("Waiting...")),
        (true, Some(err)) => (
            Span::styled("✗", Style::default().fg(Color::Red)),
            Span::styled(format!("FAILED: {}", err), Style::default().fg(Color::Red)),
        ),
        (true, None) => (
            Span::styled("✓", Style::default().fg(Color::Green)),
            Span::styled("Done", Style::default().fg(Color::Green)),
        ),
    };

    Line::from(vec![
        Span::raw("  "),
        icon,
        Span::raw(format!(
            " {:<width$} ",
            truncate_end(item.cleaner.name(), NAME_WIDTH),
            width = NAME_WIDTH
        )),
        status,
    ])
}

fn render_done(app: &App, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::raw(""),
        Line::styled(" Cleanup Complete!", Style::default().fg(Color::Green).bold()),
        Line::raw(""),
        Line::raw(format!(
            " Cleaned: {}   Failed: {}",
            app.cleaned_ok(),
            app.cleaned_failed()
        )),
    ];

    if let Some(freed) = app.freed() {
        lines.push(Line::raw(format!(" Freed: {}", fmt_size(freed))));
    }

    lines.push(Line::raw(""));
    lines.extend(app.items.iter().filter(|i| i.cleaned).map(outcome_line));

    frame.render_widget(Paragraph::new(lines).block(body_block(" Done ")), area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.phase {
        Phase::Scanning | Phase::Cleaning => "[q] Quit",
        Phase::Review => "[↑↓] Navigate  [Space] Toggle  [Enter] Clean/Details  [c] Clean  [q] Quit",
        Phase::LargeFileSelection => "[↑↓] Navigate  [Space/Enter] Toggle  [Esc] Save & Return",
        Phase::Confirm => "[y] Yes  [n] No",
        Phase::Done => "",
    };

    let paragraph = Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_confirm_dialog(app: &App, frame: &mut Frame) {
    let area = frame.area();

    let dialog_width = 50u16.min(area.width.saturating_sub(4));
    let dialog_height = 9u16.min(area.height);
    let dialog_area = Rect {
        x: (area.width.saturating_sub(dialog_width)) / 2,
        y: (area.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width,
        height: dialog_height,
    };

    frame.render_widget(Clear, dialog_area);

    let message = format!(
        "Ready to clean {} categories.\nTotal size to delete: {}\n\nThis cannot be undone.\n\nProceed? (y/N)",
        app.selected_item_count(),
        fmt_size(app.total_selected)
    );

    let block = Block::default()
        .title(" Confirmation Required ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(message)
        .block(block)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, dialog_area);
}
