use std::io::{self, BufRead, Write};

use mazecore::{Dims, Generator, GridError, GridView, Solver};

use crate::{
    input::{self, InputError},
    settings::{Settings, SettingsError},
};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),
    #[error("{0}")]
    Settings(#[from] SettingsError),
    #[error("Cannot create maze: {0}")]
    Grid(#[from] GridError),
    #[error("Failed to set up logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Values given on the command line, they win over the settings file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub seed: Option<u64>,
    pub no_plain: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Missing dimensions are asked for on the input.
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub seed: Option<u64>,
    pub show_plain: bool,
}

impl RunOptions {
    pub fn resolve(overrides: &Overrides, settings: &Settings) -> Self {
        let size = settings.get_size();
        Self {
            width: overrides.width.or(size.map(|s| s.0)),
            height: overrides.height.or(size.map(|s| s.1)),
            seed: overrides.seed.or(settings.get_seed()),
            show_plain: !overrides.no_plain && settings.get_show_plain(),
        }
    }
}

/// Generates, prints and solves one maze. Returns whether a solution was found.
pub fn run<R: BufRead, W: Write>(
    options: &RunOptions,
    input: &mut R,
    output: &mut W,
) -> Result<bool, AppError> {
    let width = match options.width {
        Some(width) => width,
        None => input::prompt_dimension(input, output, "width")?,
    };
    let height = match options.height {
        Some(height) => height,
        None => input::prompt_dimension(input, output, "height")?,
    };

    let generator = Generator::new(options.seed);
    if options.seed.is_none() {
        writeln!(output, "Seed: {}", generator.seed())?;
    }

    let mut grid = generator.generate(Dims(width, height))?;
    log::info!(
        "Generated {}x{} maze with {} passages",
        width,
        height,
        grid.passage_count()
    );

    if options.show_plain {
        write!(output, "{}", GridView::plain(&grid))?;
    }

    let solved = Solver.solve(&mut grid);
    if solved {
        writeln!(output, "\nSolution:")?;
        write!(output, "{}", GridView::solution(&grid))?;
    } else {
        writeln!(output, "\nNo solution found")?;
    }

    Ok(solved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(options: &RunOptions, input: &str) -> (Result<bool, AppError>, String) {
        let mut input = input.as_bytes();
        let mut output = Vec::new();
        let res = run(options, &mut input, &mut output);
        (res, String::from_utf8(output).unwrap())
    }

    fn options(width: Option<i32>, height: Option<i32>, seed: Option<u64>) -> RunOptions {
        RunOptions {
            width,
            height,
            seed,
            show_plain: true,
        }
    }

    #[test]
    fn prompts_for_size() {
        let (res, out) = run_with(&options(None, None, Some(1)), "2\n1\n");
        assert!(res.unwrap());

        let expected = concat!(
            "Enter the maze width: Enter the maze height: ",
            "+---+---+\n",
            "        \n",
            "+---+---+\n",
            "\nSolution:\n",
            "+---+---+\n",
            "  *   * \n",
            "+---+---+\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn prompts_only_for_missing() {
        let (res, out) = run_with(&options(Some(1), None, Some(1)), "1\n");
        assert!(res.unwrap());
        assert!(out.starts_with("Enter the maze height: +---+\n"));
        assert!(!out.contains("width"));
    }

    #[test]
    fn prints_random_seed() {
        let (res, out) = run_with(&options(Some(3), Some(3), None), "");
        assert!(res.unwrap());
        let seed_line = out.lines().next().unwrap();
        let seed: u64 = seed_line.strip_prefix("Seed: ").unwrap().parse().unwrap();

        let (_, again) = run_with(&options(Some(3), Some(3), Some(seed)), "");
        assert_eq!(out.split_once('\n').unwrap().1, again);
    }

    #[test]
    fn can_skip_plain_maze() {
        let mut opts = options(Some(4), Some(4), Some(9));
        opts.show_plain = false;
        let (res, out) = run_with(&opts, "");
        assert!(res.unwrap());
        assert!(out.starts_with("\nSolution:\n"));
        assert_eq!(out.matches("+---+---+---+---+").count(), 2);
    }

    #[test]
    fn rejects_bad_sizes() {
        let (res, _) = run_with(&options(None, None, Some(1)), "0\n5\n");
        assert!(matches!(
            res,
            Err(AppError::Input(InputError::NotPositive { .. }))
        ));

        let (res, _) = run_with(&options(Some(-2), Some(5), Some(1)), "");
        assert!(matches!(res, Err(AppError::Grid(GridError::InvalidSize(_)))));

        let (res, _) = run_with(&options(None, None, Some(1)), "2147483647\n2147483647\n");
        assert!(matches!(res, Err(AppError::Grid(GridError::TooLarge(_)))));
    }

    #[test]
    fn cli_wins_over_settings() {
        let settings = Settings::new()
            .set_size(Dims(10, 20))
            .set_seed(3)
            .set_show_plain(true);

        let resolved = RunOptions::resolve(&Overrides::default(), &settings);
        assert_eq!(resolved, options(Some(10), Some(20), Some(3)));

        let overrides = Overrides {
            width: Some(4),
            seed: Some(8),
            no_plain: true,
            ..Default::default()
        };
        let resolved = RunOptions::resolve(&overrides, &settings);
        assert_eq!(
            resolved,
            RunOptions {
                width: Some(4),
                height: Some(20),
                seed: Some(8),
                show_plain: false,
            }
        );

        let resolved = RunOptions::resolve(&Overrides::default(), &Settings::new());
        assert_eq!(resolved, options(None, None, None));
    }
}
