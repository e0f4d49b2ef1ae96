use clap::Parser;
use log::info;

use maze::config::Config;
use maze::error::MazeError;
use maze::generator::{MazeGenerator, RandomDfs};
use maze::render::{self, DrawStyle};
use maze::terminal_ui::TerminalUI;

fn main() -> Result<(), MazeError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let config = Config::parse();

    let mut maze = config.build_maze();
    info!(
        "{} x {} maze with {} cells in region",
        maze.width(),
        maze.height(),
        maze.valid_cell_count()
    );
    let mut generator = RandomDfs::seeded(&mut maze, config.start_cell(), config.seed)?;

    if config.headless {
        generator.run(&mut maze)?;
        let raster = render::raster(&maze, generator.frontier());
        println!("{}", DrawStyle::ascii().plain_text(&raster));
        return Ok(());
    }

    let mut term_ui = TerminalUI::new(maze, generator, DrawStyle::default(), config.delay())?;
    term_ui.cmd_interpreter()
}
