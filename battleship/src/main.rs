use std::{
    convert::TryFrom,
    fmt,
    io::{self, BufRead, Write},
};

use clap::{App, Arg, ArgMatches};
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};
use regex::Regex;
use tracing::{debug, level_filters::LevelFilter};

use seabattle::{
    board::{CannotShootReason, CellRef, ShotError},
    Board, Coordinate, Game, GameError, Presenter, Rules, ShotOutcome, Side, TargetInput,
};

fn main() -> io::Result<()> {
    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Command line sea battle against the computer on a 6x6 board.")
        .arg(
            Arg::with_name("first_player")
                .short("f")
                .long("first_player")
                .value_name("FIRST_PLAYER")
                .help("pre-specify which player goes first")
                .takes_value(true)
                .possible_values(&["human", "me", "computer", "bot", "random", "rand"])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("SEED")
                .help("seed for ship placement and the computer's shots")
                .takes_value(true)
                .validator(|seed| {
                    seed.parse::<u64>()
                        .map(|_| ())
                        .map_err(|err| format!("invalid seed {:?}: {}", seed, err))
                }),
        )
        .arg(
            Arg::with_name("log_level")
                .long("log_level")
                .value_name("LEVEL")
                .help("diagnostics written to stderr")
                .takes_value(true)
                .possible_values(&["off", "error", "warn", "info", "debug", "trace"])
                .default_value("warn"),
        )
        .get_matches();

    init_logging(&matches);

    let mut rng = match matches.value_of("seed").and_then(|seed| seed.parse().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let first = choose_first(&matches, &mut rng);

    salute();

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut game = Game::random(&Rules::default(), first, &mut input, rng);

    match game.run(&mut ConsolePresenter) {
        Ok(_) => Ok(()),
        Err(GameError::Input(err)) => Err(err),
        Err(err) => Err(io::Error::new(io::ErrorKind::Other, err)),
    }
}

/// Install the stderr subscriber at the level chosen on the command line.
fn init_logging(matches: &ArgMatches) {
    let level = matches
        .value_of("log_level")
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

/// Choose which [`Side`] shoots first based on the args. The human goes first unless
/// told otherwise.
fn choose_first(matches: &ArgMatches, rng: &mut impl Rng) -> Side {
    match matches.value_of("first_player").map(str::to_ascii_lowercase) {
        None => Side::Human,
        Some(choice) => match choice.as_str() {
            "computer" | "bot" => Side::Computer,
            "random" | "rand" if rng.gen() => Side::Computer,
            _ => Side::Human,
        },
    }
}

/// Print the greeting and the input rules.
fn salute() {
    println!("-------------------");
    println!("    Welcome to     ");
    println!("    Sea Battle     ");
    println!("-------------------");
    println!(" Enter shots as:   ");
    println!("       x y         ");
    println!(" x - row number    ");
    println!(" y - column number ");
    println!("-------------------");
}

/// Writes the game's events to stdout.
struct ConsolePresenter;

impl ConsolePresenter {
    /// Print both boards, the player's first.
    fn show_boards(&self, human_board: &Board, computer_board: &Board) {
        println!("{}", "-".repeat(20));
        println!("Your board:");
        show_board(human_board);
        println!("{}", "-".repeat(20));
        println!("Computer's board:");
        show_board(computer_board);
        println!(
            "Ships lost: you {} of {}, the computer {} of {}",
            human_board.sunk_count(),
            human_board.fleet_size(),
            computer_board.sunk_count(),
            computer_board.fleet_size(),
        );
        println!("{}", "-".repeat(20));
    }
}

impl Presenter for ConsolePresenter {
    fn turn_started(&mut self, side: Side, human_board: &Board, computer_board: &Board) {
        self.show_boards(human_board, computer_board);
        match side {
            Side::Human => println!("Your move!"),
            Side::Computer => println!("The computer's move!"),
        }
    }

    fn target_chosen(&mut self, side: Side, target: Coordinate) {
        if side == Side::Computer {
            let (row, col): (i32, i32) = target.into();
            println!("Computer shoots: {} {}", i64::from(row) + 1, i64::from(col) + 1);
        }
    }

    fn shot_rejected(&mut self, side: Side, err: &ShotError) {
        match side {
            Side::Human => match err.reason() {
                CannotShootReason::OutOfBounds => println!("That shot is off the board!"),
                CannotShootReason::AlreadyShot => println!("You already shot at that cell!"),
            },
            Side::Computer => debug!(%err, "computer picks again"),
        }
    }

    fn shot_resolved(&mut self, _side: Side, _target: Coordinate, outcome: ShotOutcome) {
        match outcome {
            ShotOutcome::Miss => println!("Miss!"),
            ShotOutcome::Hit => println!("Ship hit! Shoot again."),
            ShotOutcome::Sunk => println!("Ship destroyed! Shoot again."),
        }
    }

    fn game_over(&mut self, winner: Side, human_board: &Board, computer_board: &Board) {
        self.show_boards(human_board, computer_board);
        match winner {
            Side::Human => println!("You win!"),
            Side::Computer => println!("The computer wins!"),
        }
    }
}

/// Display helper for a single cell. Ships on hidden boards are drawn as open water.
struct CellSymbol {
    cell: CellRef,
    hidden: bool,
}

impl fmt::Display for CellSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self.cell {
            cell if cell.shot() && cell.has_ship() => "X",
            cell if cell.shot() || cell.revealed() => ".",
            cell if cell.has_ship() && !self.hidden => "■",
            _ => "O",
        };
        f.pad(symbol)
    }
}

/// Show the board by printing the grid with 1-based row and column numbers.
fn show_board(board: &Board) {
    print!("  |");
    for i in 1..=board.size() {
        print!(" {} |", i);
    }
    println!();
    for (i, row) in board.iter_rows().enumerate() {
        print!("{} |", i + 1);
        for cell in row {
            let symbol = CellSymbol {
                cell,
                hidden: board.hidden(),
            };
            print!(" {} |", symbol);
        }
        println!();
    }
}

/// Reasons a line of input isn't a target.
#[derive(Debug, Eq, PartialEq)]
enum TargetParseError {
    /// The line doesn't contain exactly two values.
    WrongCount,
    /// One of the values isn't a non-negative integer.
    NotANumber,
}

impl fmt::Display for TargetParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TargetParseError::WrongCount => f.pad("Enter two coordinates!"),
            TargetParseError::NotANumber => f.pad("Enter numbers!"),
        }
    }
}

/// Parse a line of the form `x y` with 1-based row and column into a zero-based
/// [`Coordinate`]. Bounds are left for the board to check.
fn parse_target(input: &str) -> Result<Coordinate, TargetParseError> {
    static PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?P<x>\S+)\s+(?P<y>\S+)$").unwrap());
    static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

    let captures = PAIR.captures(input).ok_or(TargetParseError::WrongCount)?;
    let parse = |name: &str| -> Result<i32, TargetParseError> {
        let text = captures.name(name).map_or("", |m| m.as_str());
        if !NUMBER.is_match(text) {
            return Err(TargetParseError::NotANumber);
        }
        text.parse::<u32>()
            .ok()
            .and_then(|value| i32::try_from(value).ok())
            .ok_or(TargetParseError::NotANumber)
    };
    let x = parse("x")?;
    let y = parse("y")?;
    Ok(Coordinate::new(x - 1, y - 1))
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}

impl<B: BufRead> TargetInput for InputReader<B> {
    fn read_target(&mut self, _size: usize) -> io::Result<Coordinate> {
        self.read_input("Your shot:", |line| match parse_target(line) {
            Ok(target) => Some(target),
            Err(err) => {
                println!("{}", err);
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_are_one_based() {
        assert_eq!(parse_target("1 1"), Ok(Coordinate::new(0, 0)));
        assert_eq!(parse_target("6 3"), Ok(Coordinate::new(5, 2)));
        assert_eq!(parse_target("2   4"), Ok(Coordinate::new(1, 3)));
    }

    #[test]
    fn zero_becomes_off_the_board() {
        assert_eq!(parse_target("0 4"), Ok(Coordinate::new(-1, 3)));
    }

    #[test]
    fn malformed_targets() {
        assert_eq!(parse_target("3"), Err(TargetParseError::WrongCount));
        assert_eq!(parse_target("1 2 3"), Err(TargetParseError::WrongCount));
        assert_eq!(parse_target(""), Err(TargetParseError::WrongCount));
        assert_eq!(parse_target("a 2"), Err(TargetParseError::NotANumber));
        assert_eq!(parse_target("-1 2"), Err(TargetParseError::NotANumber));
        assert_eq!(parse_target("99999999999 2"), Err(TargetParseError::NotANumber));
    }

    #[test]
    fn reader_skips_bad_lines() {
        let mut reader = InputReader::new(&b"hello\n3 x\n2 5\n"[..]);
        assert_eq!(reader.read_target(6).unwrap(), Coordinate::new(1, 4));
    }
}
