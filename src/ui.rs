use crate::app::App;
use crate::components::Rgb;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use ratatui::{
    buffer::Buffer,
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Drawing surface for one frame of the game.
pub trait Renderer {
    /// Fills the board cell at `(row, col)`.
    fn draw_cell(&mut self, row: usize, col: usize, color: Rgb);

    fn draw_score(&mut self, _score: u32) {}

    fn draw_game_over(&mut self) {}
}

/// Draws board cells into a ratatui buffer, `cell_width` columns by one row
/// per cell.
pub struct BoardRenderer<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    cell_width: u16,
    score: u32,
}

impl<'a> BoardRenderer<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, cell_width: u16) -> Self {
        Self {
            buf,
            area,
            cell_width,
            score: 0,
        }
    }

    /// The score reported by the last frame.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }
}

impl Renderer for BoardRenderer<'_> {
    fn draw_cell(&mut self, row: usize, col: usize, color: Rgb) {
        let (Ok(row), Ok(col)) = (u16::try_from(row), u16::try_from(col)) else {
            return;
        };

        let color = Color::Rgb(color.0, color.1, color.2);
        let block_y = self.area.top().saturating_add(row);

        for dx in 0..self.cell_width {
            let block_x = self
                .area
                .left()
                .saturating_add(col.saturating_mul(self.cell_width))
                .saturating_add(dx);
            if block_x >= self.area.right() || block_y >= self.area.bottom() {
                continue;
            }
            if let Some(cell) = self.buf.cell_mut((block_x, block_y)) {
                cell.set_symbol("█");
                cell.set_fg(color);
                cell.set_bg(Color::Black);
            }
        }
    }

    fn draw_score(&mut self, score: u32) {
        self.score = score;
    }

    fn draw_game_over(&mut self) {
        let text = "GAME OVER";
        let width = u16::try_from(text.len()).unwrap_or(u16::MAX);
        let x = self.area.x + self.area.width.saturating_sub(width) / 2;
        let y = self.area.y + self.area.height / 2;
        self.buf.set_string(
            x,
            y,
            text,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        );
    }
}

pub fn render(f: &mut Frame, app: &mut App, cell_width: u16) {
    let board_width = (BOARD_WIDTH as u16)
        .saturating_mul(cell_width)
        .saturating_add(2); // +2 for borders
    let board_height = BOARD_HEIGHT as u16 + 2; // +2 for borders
    let min_info_width = 20u16;
    let min_total_width = board_width.saturating_add(min_info_width);
    let min_total_height = board_height + 3; // title and bottom margin

    // The game keeps running, only the view is replaced
    if f.area().width < min_total_width || f.area().height < min_total_height {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto see the board.",
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Blockfall"));

        let warning_area = centered_rect(80, 50, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(min_info_width)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(board_height), // Game board
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(4), // Score and status
            Constraint::Min(5),    // Controls
        ])
        .split(main_layout[1]);

    let title = Paragraph::new("BLOCKFALL")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    let score = render_game_board(f, app, game_layout[1], cell_width);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let status = if app.is_game_over() {
        Paragraph::new(format!("Lines: {score}\n\nGAME OVER!\nPress q to quit"))
            .style(Style::default().fg(Color::Red))
    } else {
        Paragraph::new(format!("Lines: {score}"))
    };
    f.render_widget(status.wrap(Wrap { trim: true }), info_layout[1]);

    let controls = Paragraph::new(
        "Controls:\n\
        ←/→: Move left/right\n\
        ↓: Soft drop\n\
        ↑/Space: Rotate\n\
        Q: Quit\n\
        ",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[2]);
}

// Draws the bordered board and returns the score reported for this frame
fn render_game_board(f: &mut Frame, app: &mut App, area: Rect, cell_width: u16) -> u32 {
    let block = Block::default().borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let mut board = BoardRenderer::new(f.buffer_mut(), inner_area, cell_width);
    app.draw(&mut board);
    board.score()
}

/// Helper function to create a centered rect using up certain percentage of the available rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
