// Standard library
use std::collections::HashMap;
use std::str::FromStr;

// MAZE
use crate::error::MazeError;

const RUN: &str = "run";
const GOTO: &str = "goto";
const FINISH: &str = "finish";
const VIEW: &str = "view";

const PATTERNS: [Pattern; 4] = [
    Pattern::new(RUN, &["nb_steps"]),
    Pattern::new(GOTO, &["target_step"]),
    Pattern::new(FINISH, &[]),
    Pattern::new(VIEW, &["x", "y"]),
];

/// A command typed on the interpreter line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Perform that many generation steps.
    Run(usize),
    /// Step until the given step count is reached.
    Goto(usize),
    /// Step until the maze is complete.
    Finish,
    /// Scroll the maze panel so that raster position (x, y) is top-left.
    View(usize, usize),
}

impl FromStr for Command {
    type Err = MazeError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        for pattern in PATTERNS.iter() {
            if let Some(args) = pattern.match_cmd(line) {
                return match pattern.keyword {
                    RUN => Ok(Command::Run(parse_arg(&args, "nb_steps")?)),
                    GOTO => Ok(Command::Goto(parse_arg(&args, "target_step")?)),
                    FINISH => Ok(Command::Finish),
                    _ => Ok(Command::View(parse_arg(&args, "x")?, parse_arg(&args, "y")?)),
                };
            }
        }
        Err(MazeError::InvalidCommand(String::from(line.trim())))
    }
}

struct Pattern {
    keyword: &'static str,
    args: &'static [&'static str],
}

impl Pattern {
    const fn new(keyword: &'static str, args: &'static [&'static str]) -> Self {
        Self { keyword, args }
    }

    fn match_cmd<'b>(&self, cmd: &'b str) -> Option<HashMap<&'static str, &'b str>> {
        let tokens: Vec<&str> = cmd.split_whitespace().collect();
        if tokens.len() == 1 + self.args.len() && tokens[0] == self.keyword {
            Some(self.args.iter().copied().zip(tokens[1..].iter().copied()).collect())
        } else {
            None
        }
    }
}

fn parse_arg<T: FromStr>(args: &HashMap<&str, &str>, name: &str) -> Result<T, MazeError> {
    let raw = args
        .get(name)
        .ok_or_else(|| MazeError::InvalidCommand(format!("missing argument {}", name)))?;
    raw.parse()
        .map_err(|_| MazeError::InvalidCommand(format!("{} is not a valid {}", raw, name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!("run 10".parse::<Command>().unwrap(), Command::Run(10));
        assert_eq!("  goto   42 ".parse::<Command>().unwrap(), Command::Goto(42));
        assert_eq!("finish".parse::<Command>().unwrap(), Command::Finish);
        assert_eq!("view 3 7".parse::<Command>().unwrap(), Command::View(3, 7));
    }

    #[test]
    fn reject_bad_commands() {
        for line in &["", "jump 3", "run", "run -1", "run ten", "finish now", "view 1"] {
            assert!(
                matches!(line.parse::<Command>(), Err(MazeError::InvalidCommand(_))),
                "accepted {:?}",
                line
            );
        }
    }
}
