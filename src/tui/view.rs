// View - draws the retained frame, the log pane and the hint bar
//
// `layout_rows` is the pure part: it turns a draw list into text rows. A
// horizontal container becomes one row holding its descendants; any other
// label or switch gets a row of its own. `draw` then centers those rows in
// the main area.

use super::app::TuiApp;
use crate::core::compose::LABEL_CLASS;
use crate::core::{DrawInstruction, DrawKind, Layout as WidgetLayout};
use crate::logging::LogEntry;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::Level;
use unicode_width::UnicodeWidthStr;

/// Width labels inside a labeled row are right-aligned to
pub const LABEL_WIDTH: usize = 12;

/// Gap between cells on one row
const CELL_PADDING: &str = " ";

/// Height of the log pane including borders
const LOG_PANE_HEIGHT: u16 = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum CellKind {
    Label,
    Switch { value: bool },
}

/// One drawn widget on a row
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub kind: CellKind,
    pub focused: bool,
    pub disabled: bool,
    pub id: Option<String>,
}

/// A line of cells
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    /// Cells joined with the cell padding, without styling
    pub fn text(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.text.as_str())
            .collect::<Vec<_>>()
            .join(CELL_PADDING)
    }
}

/// Switch face: `>[  ON  ]<` when focused, ` [ OFF  ] ` otherwise
pub fn switch_text(value: bool, focused: bool) -> String {
    let face = if value { "[  ON  ]" } else { "[ OFF  ]" };
    if focused {
        format!(">{}<", face)
    } else {
        format!(" {} ", face)
    }
}

/// Right-align to `width` display cells; longer text is left alone
pub fn pad_left(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{}{}", " ".repeat(pad), text)
}

fn cell(instruction: &DrawInstruction, in_row: bool) -> Option<Cell> {
    let (text, kind) = match &instruction.kind {
        DrawKind::Label { text } if in_row && instruction.has_class(LABEL_CLASS) => {
            (pad_left(text, LABEL_WIDTH), CellKind::Label)
        }
        DrawKind::Label { text } => (text.clone(), CellKind::Label),
        DrawKind::Switch { value } => (
            switch_text(*value, instruction.focused),
            CellKind::Switch { value: *value },
        ),
        DrawKind::Container { .. } => return None,
    };

    Some(Cell {
        text,
        kind,
        focused: instruction.focused,
        disabled: instruction.disabled,
        id: instruction.id.clone(),
    })
}

/// Group a depth-first draw list into rows
pub fn layout_rows(frame: &[DrawInstruction]) -> Vec<Row> {
    let mut rows = Vec::new();
    // Depth of the horizontal container whose row is being filled
    let mut open_row: Option<(usize, Row)> = None;

    for instruction in frame {
        if open_row
            .as_ref()
            .is_some_and(|(depth, _)| instruction.depth <= *depth)
        {
            if let Some((_, row)) = open_row.take() {
                rows.push(row);
            }
        }

        if let Some((_, row)) = open_row.as_mut() {
            row.cells.extend(cell(instruction, true));
            continue;
        }

        if let DrawKind::Container {
            layout: WidgetLayout::Horizontal,
        } = instruction.kind
        {
            open_row = Some((instruction.depth, Row::default()));
        } else if let Some(cell) = cell(instruction, false) {
            rows.push(Row { cells: vec![cell] });
        }
    }

    if let Some((_, row)) = open_row {
        rows.push(row);
    }
    rows
}

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &TuiApp) {
    // Switches (fills remaining space), logs (fixed), hint bar (1 line)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(LOG_PANE_HEIGHT),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_switches(f, chunks[0], app);
    render_logs(f, chunks[1], app);
    render_hints(f, chunks[2], app);
}

fn cell_style(cell: &Cell) -> Style {
    let style = match cell.kind {
        CellKind::Label => Style::default(),
        CellKind::Switch { value: true } => Style::default().fg(Color::Green),
        CellKind::Switch { value: false } => Style::default().fg(Color::DarkGray),
    };
    let style = if cell.focused {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    };
    if cell.disabled {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

fn render_switches(f: &mut Frame, area: Rect, app: &TuiApp) {
    let rows = layout_rows(app.frame());

    // Vertically center inside the bordered block
    let inner_height = area.height.saturating_sub(2) as usize;
    let top = inner_height.saturating_sub(rows.len()) / 2;

    let mut lines: Vec<Line> = vec![Line::from(""); top];
    for row in &rows {
        let mut spans = Vec::with_capacity(row.cells.len() * 2);
        for (i, cell) in row.cells.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(CELL_PADDING));
            }
            spans.push(Span::styled(cell.text.clone(), cell_style(cell)));
        }
        lines.push(Line::from(spans));
    }

    // The title is the first label row of the tree
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn level_style(level: Level) -> Style {
    match level {
        Level::ERROR => Style::default().fg(Color::Red),
        Level::WARN => Style::default().fg(Color::Yellow),
        Level::INFO => Style::default().fg(Color::Green),
        Level::DEBUG => Style::default().fg(Color::Blue),
        Level::TRACE => Style::default().fg(Color::DarkGray),
    }
}

fn log_line(entry: &LogEntry) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            entry.timestamp.format("%H:%M:%S ").to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{:<5} ", entry.level), level_style(entry.level)),
        Span::raw(entry.message.clone()),
    ])
}

fn render_logs(f: &mut Frame, area: Rect, app: &TuiApp) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .log_buffer
        .recent(visible)
        .iter()
        .map(log_line)
        .collect();

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Logs "));
    f.render_widget(paragraph, area);
}

fn render_hints(f: &mut Frame, area: Rect, app: &TuiApp) {
    let hints = format!(
        " Tab/Shift-Tab move focus │ Space/Enter toggle │ {} quit",
        app.quit_key
    );
    let paragraph = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app;
    use crate::config::Config;
    use crate::core::Key;

    fn rows_for(keys: &[Key]) -> Vec<String> {
        let mut runtime = app::build(&Config::default()).unwrap();
        for key in keys {
            runtime.dispatch_key(*key);
        }
        layout_rows(&runtime.render_if_dirty())
            .iter()
            .map(Row::text)
            .collect()
    }

    #[test]
    fn test_initial_rows() {
        assert_eq!(
            rows_for(&[]),
            vec![
                "Switchboard".to_string(),
                "        WiFi >[ OFF  ]<".to_string(),
                "   Bluetooth  [ OFF  ] ".to_string(),
                "Press Space to toggle".to_string(),
            ]
        );
    }

    #[test]
    fn test_rows_follow_focus_and_values() {
        let rows = rows_for(&[Key::Space, Key::Tab]);
        assert_eq!(rows[1], "        WiFi  [  ON  ] ");
        assert_eq!(rows[2], "   Bluetooth >[ OFF  ]<");
        assert_eq!(rows[3], "WiFi turned ON");
    }

    #[test]
    fn test_title_is_drawn_once() {
        use crate::logging::LogBuffer;
        use ratatui::{backend::TestBackend, Terminal};

        let config = Config::default();
        let app = TuiApp::new(app::build(&config).unwrap(), LogBuffer::new(), &config);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(screen.matches(&config.title).count(), 1);
    }

    #[test]
    fn test_switch_text() {
        assert_eq!(switch_text(true, true), ">[  ON  ]<");
        assert_eq!(switch_text(false, false), " [ OFF  ] ");
        assert_eq!(switch_text(true, false).len(), switch_text(false, true).len());
    }

    #[test]
    fn test_pad_left_uses_display_width() {
        assert_eq!(pad_left("WiFi", 6), "  WiFi");
        assert_eq!(pad_left("a very long label", 4), "a very long label");
        // Wide characters take two cells each
        assert_eq!(pad_left("日本", 6), "  日本");
    }

    #[test]
    fn test_row_closes_at_sibling_depth() {
        use crate::core::{labeled_switch, Description, Runtime};

        let mut runtime: Runtime = Runtime::default();
        runtime
            .compose(&Description::vertical([
                labeled_switch("A", "a", true),
                Description::label("after"),
                Description::horizontal([Description::label("x"), Description::label("y")]),
            ]))
            .unwrap();
        let rows: Vec<_> = layout_rows(&runtime.render_if_dirty())
            .iter()
            .map(Row::text)
            .collect();
        assert_eq!(rows, vec!["           A >[  ON  ]<", "after", "x y"]);
    }
}
