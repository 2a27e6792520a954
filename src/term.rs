use crate::{Coords, TermInt};
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, Result};

type ScreenCell = (char, Color);

const BLANK: ScreenCell = (' ', Color::Reset);

// Owns the screen: alternate-screen lifecycle, buffered drawing and key
// polling. Frames are drawn into a back buffer and presented as a diff
// against what is already on screen, so redrawing everything each frame
// writes almost nothing.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    front: Vec<ScreenCell>,
    back: Vec<ScreenCell>,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size()?;
        let cells = width as usize * height as usize;

        Ok(TermManager {
            width,
            height,
            stdout: stdout(),
            front: vec![BLANK; cells],
            back: vec![BLANK; cells],
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, terminal::Clear(ClearType::All))
    }

    pub fn restore(&mut self) -> Result<()> {
        execute!(self.stdout, ResetColor, cursor::Show)?;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, LeaveAlternateScreen)
    }

    pub fn size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn begin_frame(&mut self) {
        for cell in &mut self.back {
            *cell = BLANK;
        }
    }

    pub fn print_at(&mut self, pos: Coords, ch: char) {
        self.print_colored(pos, ch, Color::Reset);
    }

    pub fn print_colored(&mut self, pos: Coords, ch: char, color: Color) {
        if pos.0 >= self.width || pos.1 >= self.height {
            return;
        }

        self.back[self.width as usize * pos.1 as usize + pos.0 as usize] = (ch, color);
    }

    pub fn print_line(&mut self, pos: Coords, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.print_colored((pos.0 + i as TermInt, pos.1), ch, color);
        }
    }

    pub fn draw_box(&mut self, top_left: Coords, size: Coords, color: Color) {
        if size.0 < 2 || size.1 < 2 {
            return;
        }

        let end_x = top_left.0 + size.0 - 1;
        let end_y = top_left.1 + size.1 - 1;

        for x in top_left.0..=end_x {
            let ch = if x == top_left.0 || x == end_x { '+' } else { '-' };
            self.print_colored((x, top_left.1), ch, color);
            self.print_colored((x, end_y), ch, color);
        }

        for y in top_left.1 + 1..end_y {
            self.print_colored((top_left.0, y), '|', color);
            self.print_colored((end_x, y), '|', color);
        }
    }

    // The bell reaches the terminal on the next present()
    pub fn chime(&mut self) -> Result<()> {
        queue!(self.stdout, Print('\u{0007}'))
    }

    pub fn present(&mut self) -> Result<()> {
        for i in 0..self.back.len() {
            if self.back[i] == self.front[i] {
                continue;
            }

            let x = (i % self.width as usize) as TermInt;
            let y = (i / self.width as usize) as TermInt;
            let (ch, color) = self.back[i];

            queue!(
                self.stdout,
                cursor::MoveTo(x, y),
                SetForegroundColor(color),
                Print(ch)
            )?;
            self.front[i] = self.back[i];
        }

        self.stdout.flush()?;
        Ok(())
    }

    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }
}
