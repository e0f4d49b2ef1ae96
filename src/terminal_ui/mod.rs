// Standard library
use std::io::{self, stdout, Write};
use std::{thread, time::Duration};

// External libraries
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{style, Attribute, Color, Print, PrintStyledContent, Stylize},
    terminal,
};
use log::info;

// MAZE
mod line_editor;
mod module;
mod styled_text;
use crate::commands::Command;
use crate::error::{MazeError, Result};
use crate::generator::{MazeGenerator, Step};
use crate::graph::{AdjacencyGraph, Graph};
use crate::grid::{Coord, Dimensions};
use crate::maze::Maze;
use crate::render::{self, DrawStyle};
use line_editor::LineEditor;
use module::Module;
use styled_text::StyledText;

pub type Position = (u16, u16);

/// Full-screen front-end: the maze being generated, an information panel
/// and a command line at the bottom.
pub struct TerminalUI<A: MazeGenerator, G: Graph = AdjacencyGraph> {
    size: Position,
    maze_mod: Module,
    info_mod: Module,
    maze: Maze<G>,
    generator: A,
    style: DrawStyle,
    view: (usize, usize),
    delay: Duration,
    message: Option<StyledText>,
}

impl<A: MazeGenerator, G: Graph> TerminalUI<A, G> {
    /// Switches the terminal to raw mode on the alternate screen. The
    /// terminal is restored when the UI is dropped.
    pub fn new(maze: Maze<G>, generator: A, draw_style: DrawStyle, delay: Duration) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let size = or_restore(
            execute!(stdout(), terminal::EnterAlternateScreen, terminal::Clear(terminal::ClearType::All))
                .and_then(|()| terminal::size()),
            restore_terminal,
        )?;
        let (mut maze_mod, info_mod) = Self::create_modules(size);
        maze_mod.set_title(StyledText::from(vec![style(String::from(generator.name()))]));

        Ok(Self {
            size,
            maze_mod,
            info_mod,
            maze,
            generator,
            style: draw_style,
            view: (0, 0),
            delay,
            message: None,
        })
    }

    pub fn cmd_interpreter(&mut self) -> Result<()> {
        let mut editor = LineEditor::default();
        self.redraw()?;
        self.draw_command_line(&editor)?;

        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let max_len = self.size.0.saturating_sub(PROMPT.len() as u16) as usize;
                    match key.code {
                        KeyCode::Char(c) => editor.insert(c, max_len),
                        KeyCode::Left => editor.left(),
                        KeyCode::Right => editor.right(),
                        KeyCode::Backspace => editor.backspace(),
                        KeyCode::Delete => editor.delete(),
                        KeyCode::Up => editor.history_up(),
                        KeyCode::Down => editor.history_down(),
                        KeyCode::Enter => {
                            if let Some(line) = editor.submit() {
                                self.interpret(&line)?;
                            }
                        }
                        KeyCode::Esc => break,
                        _ => (),
                    }
                    self.draw_command_line(&editor)?;
                }
                Event::Resize(width, height) => {
                    self.resize((width, height))?;
                    self.draw_command_line(&editor)?;
                }
                _ => (),
            }
        }
        Ok(())
    }

    /// Parses and executes one command line. Bad input is reported in the
    /// information panel rather than returned.
    fn interpret(&mut self, line: &str) -> Result<()> {
        match line.parse::<Command>() {
            Ok(cmd) => {
                info!("executing {:?}", cmd);
                self.message = None;
                self.execute(cmd)
            }
            Err(err @ MazeError::InvalidCommand(_)) => {
                self.message = Some(error_text(err.to_string()));
                self.draw_info()
            }
            Err(err) => Err(err),
        }
    }

    pub fn execute(&mut self, cmd: Command) -> Result<()> {
        match cmd {
            Command::Run(nb_steps) => self.run_to(Some(self.generator.steps() + nb_steps)),
            Command::Goto(target) if target <= self.generator.steps() => {
                self.message = Some(error_text(format!(
                    "Already at step {}, generation cannot go back",
                    self.generator.steps()
                )));
                self.draw_info()
            }
            Command::Goto(target) => self.run_to(Some(target)),
            Command::Finish => self.run_to(None),
            Command::View(x, y) => self.move_view(x, y),
        }
    }

    /// Steps the generator until `target` steps have been performed, or until
    /// the maze is complete when `target` is `None`. Redraws after each step.
    fn run_to(&mut self, target: Option<usize>) -> Result<()> {
        let mut out = stdout();
        let mut title = self.maze_mod.title().clone();
        let suffix = match target {
            Some(target) => format!(" (running to step {})", target),
            None => String::from(" (running to completion)"),
        };
        title.push(style(suffix).attribute(Attribute::SlowBlink).attribute(Attribute::Italic));
        self.maze_mod.set_title(title);
        self.maze_mod.draw_title(&mut out)?;

        while target.map_or(true, |target| self.generator.steps() < target) {
            if self.generator.step(&mut self.maze)? == Step::Done {
                break;
            }
            self.draw_maze()?;
            self.flush()?;
            thread::sleep(self.delay);
        }

        let mut title = self.maze_mod.title().clone();
        title.pop();
        self.maze_mod.set_title(title);
        self.redraw()
    }

    fn move_view(&mut self, x: usize, y: usize) -> Result<()> {
        let rdim = render::raster_dim(self.maze.dim());
        if x < rdim.width() && y < rdim.height() {
            self.view = (x, y);
            self.draw_maze()?;
        } else {
            self.message = Some(error_text(format!(
                "View origin must lie within {} x {}",
                rdim.width(),
                rdim.height()
            )));
        }
        self.draw_info()
    }

    fn redraw(&mut self) -> Result<()> {
        let mut out = stdout();
        self.maze_mod.draw(&mut out)?;
        self.info_mod.draw(&mut out)?;
        self.draw_maze()?;
        self.draw_info()
    }

    fn draw_maze(&self) -> io::Result<()> {
        let raster = render::raster(&self.maze, self.generator.frontier());
        let cell_width = self.style.cell_width.max(1) as usize;
        let (cols, rows) = visible_window(raster.dim(), self.view, self.maze_mod.get_render_size(), cell_width);

        let mut out = stdout();
        self.maze_mod.clear_content(&mut out)?;
        let (x, y) = self.maze_mod.get_render_pos();
        for row in 0..rows {
            queue!(out, cursor::MoveTo(x, y + row as u16))?;
            for col in 0..cols {
                let pos = Coord::new((self.view.0 + col) as isize, (self.view.1 + row) as isize);
                let glyph = self.style.styled(raster.get_at(pos).unwrap_or_default());
                for _ in 0..cell_width {
                    queue!(out, PrintStyledContent(glyph.clone()))?;
                }
            }
        }
        Ok(())
    }

    fn draw_info(&self) -> Result<()> {
        let rdim = render::raster_dim(self.maze.dim());
        let cell_width = self.style.cell_width.max(1) as usize;
        let (cols, rows) = visible_window(&rdim, self.view, self.maze_mod.get_render_size(), cell_width);
        let revealed = self.maze.cell_states().iter().filter(|state| **state).count();

        let label = |text: &str| style(String::from(text)).attribute(Attribute::Italic);
        let mut step = StyledText::from(vec![label(" Step      : "), style(self.generator.steps().to_string())]);
        if self.generator.is_done() {
            step.push(style(String::from(" (complete)")).with(Color::Green));
        }
        let lines = [
            (1, step),
            (
                2,
                StyledText::from(vec![label(" Generator : "), style(String::from(self.generator.name()))]),
            ),
            (
                3,
                StyledText::from(vec![
                    label(" Maze size : "),
                    style(format!(
                        "{} x {} ({} cells, {} revealed)",
                        self.maze.width(),
                        self.maze.height(),
                        self.maze.valid_cell_count(),
                        revealed
                    )),
                ]),
            ),
            (
                4,
                StyledText::from(vec![
                    label(" Viewing   : "),
                    style(format!(
                        "({}, {}) -> ({}, {})",
                        self.view.0,
                        self.view.1,
                        self.view.0 + cols,
                        self.view.1 + rows
                    )),
                ]),
            ),
        ];

        let mut out = stdout();
        let (x, y) = self.info_mod.get_render_pos();
        let (max_len, height) = self.info_mod.get_render_size();
        self.info_mod.clear_content(&mut out)?;
        for (row, text) in lines.iter() {
            if *row < height {
                text.draw(&mut out, cursor::MoveTo(x, y + *row), max_len)?;
            }
        }
        if let Some(message) = &self.message {
            if 6 < height {
                message.draw(&mut out, cursor::MoveTo(x, y + 6), max_len)?;
            }
        }
        Ok(())
    }

    fn resize(&mut self, size: Position) -> Result<()> {
        queue!(stdout(), terminal::Clear(terminal::ClearType::All))?;
        self.size = size;

        let (mut maze_mod, mut info_mod) = Self::create_modules(size);
        maze_mod.set_title(self.maze_mod.title().clone());
        info_mod.set_title(self.info_mod.title().clone());
        self.maze_mod = maze_mod;
        self.info_mod = info_mod;
        self.redraw()
    }

    fn create_modules(size: Position) -> (Module, Module) {
        let height_maze = size.1.saturating_sub(HEIGHT_INFO + 1);
        let maze_mod = Module::new(
            StyledText::from(vec![style(String::from("Maze"))]),
            (0, 0),
            (size.0, height_maze),
        );
        let info_mod = Module::new(
            StyledText::from(vec![style(String::from("Information")).attribute(Attribute::Italic)]),
            (0, height_maze),
            (size.0, HEIGHT_INFO),
        );
        (maze_mod, info_mod)
    }

    fn draw_command_line(&self, editor: &LineEditor) -> io::Result<()> {
        let row = self.size.1.saturating_sub(1);
        queue!(
            stdout(),
            cursor::MoveTo(0, row),
            terminal::Clear(terminal::ClearType::UntilNewLine),
            Print(PROMPT),
            Print(editor.line()),
            cursor::MoveTo(PROMPT.len() as u16 + editor.cursor() as u16, row),
        )?;
        self.flush()
    }

    fn flush(&self) -> io::Result<()> {
        stdout().flush()
    }
}

impl<A: MazeGenerator, G: Graph> Drop for TerminalUI<A, G> {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    // Nothing sensible to do if the terminal cannot be restored
    let _ = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

/// Calls `restore` when terminal setup failed, so a half-initialised UI does
/// not leave the terminal in raw mode.
fn or_restore<T, F: FnOnce()>(setup: io::Result<T>, restore: F) -> io::Result<T> {
    setup.map_err(|err| {
        restore();
        err
    })
}

/// Number of raster columns and rows that fit in a panel of `render_size`
/// terminal cells when drawing from `view`.
fn visible_window(raster: &Dimensions, view: (usize, usize), render_size: Position, cell_width: usize) -> (usize, usize) {
    let cols = raster.width().saturating_sub(view.0).min(render_size.0 as usize / cell_width);
    let rows = raster.height().saturating_sub(view.1).min(render_size.1 as usize);
    (cols, rows)
}

fn error_text(text: String) -> StyledText {
    StyledText::from(vec![style(format!(" {}", text)).with(Color::Red)])
}

const HEIGHT_INFO: u16 = 10;
const PROMPT: &str = "> ";
