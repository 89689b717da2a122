use crate::tui::app::App;
use crate::view::LoadState;
use crate::UNKNOWN_BREED;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

const HEADER_BG: Color = Color::Rgb(0, 95, 135);

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Search bar
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title(frame, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    draw_table(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    if app.search.focused {
        // Border (1) + leading space (1)
        let cursor_x = chunks[1].x + 2 + app.search.cursor_column() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(crate::TITLE).centered().style(
        Style::default()
            .fg(Color::White)
            .bg(HEADER_BG)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(title, area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", crate::SEARCH_LABEL));

    let paragraph = Paragraph::new(format!(" {}", app.search.query))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn draw_table(frame: &mut Frame, app: &mut App, area: Rect) {
    // Area height minus the header row
    let inner_height = area.height.saturating_sub(1) as usize;
    app.table.visible_rows = inner_height;

    let header = Row::new(crate::COLUMN_HEADERS.iter().map(|name| {
        Cell::from(*name).style(
            Style::default()
                .fg(Color::White)
                .bg(HEADER_BG)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .height(1);

    let rows = app.view.rows();
    let start = app.table.scroll_offset.min(rows.len());
    let end = (start + inner_height).min(rows.len());

    let table_rows: Vec<Row> = rows[start..end]
        .iter()
        .enumerate()
        .map(|(visual_idx, row)| {
            let is_selected = app.table.selected == Some(start + visual_idx);

            // Alternating row background
            let bg = if is_selected {
                Color::Rgb(60, 60, 80)
            } else if visual_idx % 2 == 1 {
                Color::Rgb(25, 25, 35)
            } else {
                Color::Reset
            };

            let breed_style = if row.breed == UNKNOWN_BREED {
                Style::default()
                    .fg(Color::DarkGray)
                    .bg(bg)
                    .add_modifier(Modifier::ITALIC)
            } else if is_selected {
                Style::default()
                    .fg(Color::LightCyan)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::LightCyan).bg(bg)
            };

            Row::new(vec![
                Cell::from(row.breed.to_string()).style(breed_style),
                Cell::from(row.image_url.to_string()).style(Style::default().fg(Color::Gray).bg(bg)),
            ])
        })
        .collect();

    let table = Table::new(table_rows, [Constraint::Length(28), Constraint::Fill(1)])
        .header(header)
        .block(Block::default().borders(Borders::NONE));

    frame.render_widget(table, area);

    if rows.is_empty() && area.height > 2 {
        let placeholder = match app.view.state() {
            LoadState::Loading => "Fetching dog images...",
            LoadState::Failed(_) => "No images loaded",
            _ if !app.view.records().is_empty() => "No breeds match",
            _ => "",
        };
        let message_area = Rect::new(area.x, area.y + 2, area.width, 1);
        frame.render_widget(
            Paragraph::new(placeholder)
                .centered()
                .style(Style::default().fg(Color::DarkGray)),
            message_area,
        );
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = match app.view.state() {
        LoadState::Loading => " \u{23F3} Fetching dog images...".to_string(),
        LoadState::Failed(reason) => format!(" Could not load images: {}", reason),
        _ => {
            let base = format!(
                " {} of {} dogs",
                app.visible_count(),
                app.view.records().len()
            );
            match &app.status_message {
                Some(msg) => format!("{} | {}", base, msg),
                None => base,
            }
        }
    };

    let right_text = " Tab:Focus  \u{2191}\u{2193}:Move  Enter:Open  Esc:Clear/Back  Ctrl+Q:Quit ";

    // Build the status line: left-aligned text + padding + right-aligned text
    let available_width = area.width as usize;
    let left_len = left_text.chars().count();
    let right_len = right_text.chars().count();

    let status_str = if left_len + right_len < available_width {
        let padding = available_width - left_len - right_len;
        format!("{}{:padding$}{}", left_text, "", right_text, padding = padding)
    } else {
        // Not enough space, just show left text
        format!("{:width$}", left_text, width = available_width)
    };

    let status = Paragraph::new(status_str)
        .style(Style::default().fg(Color::White).bg(HEADER_BG));

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Breed, DogRecord, DogSource};
    use crate::view::DogView;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    struct Empty;

    impl DogSource for Empty {
        fn fetch(&self) -> crate::Result<Vec<DogRecord>> {
            Ok(Vec::new())
        }
    }

    fn render(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn app() -> App {
        let mut view = DogView::new(Arc::new(Empty));
        view.replace_records(vec![
            DogRecord::new("a.jpg", vec![Breed::new("Pug")]),
            DogRecord::new("b.jpg", vec![]),
        ]);
        App::new(view)
    }

    #[test]
    fn renders_title_search_and_headers() {
        let mut app = app();
        let lines = render(&mut app, 100, 10);
        assert!(lines[0].contains("Dogs Images"));
        assert!(lines[1].contains("Search by Breed"));
        assert!(lines[4].contains("Breed"));
        assert!(lines[4].contains("Image"));
    }

    #[test]
    fn renders_one_line_per_row_with_placeholder() {
        let mut app = app();
        let lines = render(&mut app, 100, 10);
        assert!(lines[5].contains("Pug"));
        assert!(lines[5].contains("a.jpg"));
        assert!(lines[6].contains("Unknown Breed"));
        assert!(lines[6].contains("b.jpg"));
        assert!(lines[9].contains("2 of 2 dogs"));
    }

    #[test]
    fn filtered_rows_only() {
        let mut app = app();
        app.view.set_query("xyz");
        let lines = render(&mut app, 100, 10);
        assert!(!lines.iter().any(|l| l.contains("Pug")));
        assert!(lines.iter().any(|l| l.contains("No breeds match")));
        assert!(lines[9].contains("0 of 2 dogs"));
    }

    #[test]
    fn table_height_drives_page_size() {
        let mut app = app();
        render(&mut app, 100, 12);
        // 12 rows - title - search(3) - status = 7 for the table, minus header
        assert_eq!(app.table.visible_rows, 6);
    }
}
