use std::{
    collections::HashMap,
    fmt,
    io::{self, BufRead, Write},
};

use clap::{App, Arg, ArgMatches};
use enumflags2::BitFlags;
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, seq::IteratorRandom, Rng, SeedableRng};
use regex::Regex;
use tracing::{debug, info};

use gridchess::{
    board::{rectangular::Cell, spawn_visuals, AssetCatalog, BoardSetup},
    config::BoardConfig,
    game::{DragResult, MoveOutcome, Session},
    layout::WorldPoint,
    pieces::{PieceId, PieceKind, Team},
    presentation::{Highlight, Presentation},
};

/// Number of random destinations tried per `random` command before giving up.
const RANDOM_ATTEMPTS: usize = 64;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let matches = App::new("Chess")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Drive a chess board with pointer-style commands from the terminal.")
        .arg(
            Arg::with_name("cell_size")
                .long("cell-size")
                .value_name("SIZE")
                .help("edge length of a cell in world units")
                .takes_value(true)
                .default_value("1.0"),
        )
        .arg(
            Arg::with_name("y_offset")
                .long("y-offset")
                .value_name("OFFSET")
                .help("height of the board plane")
                .takes_value(true)
                .default_value("0.0"),
        )
        .arg(
            Arg::with_name("seed")
                .short("s")
                .long("seed")
                .value_name("SEED")
                .help("seed for the random-move command")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("do not print what the renderer is asked to do"),
        )
        .get_matches();

    let config = match read_config(&matches) {
        Ok(config) => config,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };
    let layout = match config.layout() {
        Ok(layout) => layout,
        Err(err) => {
            eprintln!("invalid board configuration: {}", err);
            std::process::exit(2);
        }
    };
    let mut rng = match matches.value_of("seed").map(str::parse::<u64>) {
        Some(Ok(seed)) => StdRng::seed_from_u64(seed),
        Some(Err(err)) => {
            eprintln!("invalid seed: {}", err);
            std::process::exit(2);
        }
        None => StdRng::from_entropy(),
    };

    let mut renderer = TextRenderer::new(!matches.is_present("quiet"));
    let board = BoardSetup::standard().start();
    if let Err(err) = spawn_visuals(&board, &catalog(), &layout, &mut renderer) {
        eprintln!("could not spawn piece visuals: {}", err);
        std::process::exit(1);
    }
    let mut session = Session::unruled(board, layout);
    info!(?config, "session ready");

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());
    println!("Type help or ? for commands.");
    loop {
        println!();
        show_board(&session);
        let cmd = input.read_input_lower(">", parse_command)?;
        debug!(?cmd, "command");
        if let Some(err) = cmd
            .cells()
            .into_iter()
            .find_map(|cell| session.board().check_bounds(cell).err())
        {
            println!("{}.", err);
            continue;
        }
        match cmd {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Show => {}
            Command::Pieces => show_pieces(&session),
            Command::Hover(cell) => {
                point_at(&mut session, cell, &mut renderer);
            }
            Command::Aim(x, z) => {
                let cell = session.layout().cell_at(WorldPoint::new(x, 0.0, z));
                match cell {
                    Some(cell) => println!("Pointer over {}.", cell),
                    None => println!("Pointer is off the board."),
                }
                point_at(&mut session, cell, &mut renderer);
                session.drag_to(WorldPoint::new(x, 0.0, z), &mut renderer);
            }
            Command::Press(cell) => {
                if !point_at(&mut session, Some(cell), &mut renderer) {
                    continue;
                }
                match session.press_at(cell, &mut renderer) {
                    Ok(Some(piece)) => println!("Picked up {}.", PieceName(&session, piece)),
                    Ok(None) if session.drag().is_some() => println!("Already holding a piece."),
                    Ok(None) => println!("Nothing to pick up at {}.", cell),
                    Err(err) => println!("{}.", err),
                }
            }
            Command::Release(cell) => {
                if !point_at(&mut session, cell, &mut renderer) {
                    continue;
                }
                match session.release_at(cell, &mut renderer) {
                    None => println!("Not holding a piece."),
                    Some(DragResult::Committed(outcome)) => report_move(&outcome),
                    Some(DragResult::Rejected(err)) => println!("Move rejected: {}.", err.reason()),
                    Some(DragResult::Cancelled) => println!("Piece put back."),
                }
            }
            Command::Move(from, to) => {
                let piece = match session.board().occupant_at(from) {
                    Ok(Some(piece)) => piece.id(),
                    Ok(None) => {
                        println!("No piece at {}.", from);
                        continue;
                    }
                    Err(err) => {
                        println!("{}.", err);
                        continue;
                    }
                };
                match session.move_piece(piece, to, &mut renderer) {
                    Ok(outcome) => report_move(&outcome),
                    Err(err) => println!("Move rejected: {}.", err.reason()),
                }
            }
            Command::Random => random_move(&mut rng, &mut session, &mut renderer),
        }
    }
    Ok(())
}

/// Feed the pointed cell to the session. Prints the error and returns false if it is off
/// the board.
fn point_at(session: &mut Session, cell: Option<Cell>, renderer: &mut TextRenderer) -> bool {
    match session.tick(cell, renderer) {
        Ok(_) => true,
        Err(err) => {
            println!("{}.", err);
            false
        }
    }
}

/// Build the board configuration from command line args.
fn read_config(matches: &ArgMatches) -> Result<BoardConfig, String> {
    let parse = |name: &str| -> Result<f32, String> {
        let raw = matches.value_of(name).unwrap_or_default();
        raw.parse()
            .map_err(|_| format!("invalid value for {}: {}", name, raw))
    };
    Ok(BoardConfig {
        cell_size: parse("cell_size")?,
        y_offset: parse("y_offset")?,
        ..BoardConfig::default()
    })
}

/// Templates and materials for the text renderer.
fn catalog() -> AssetCatalog<char, &'static str> {
    let mut catalog = AssetCatalog::new()
        .with_material(Team::White, "ivory")
        .with_material(Team::Black, "ebony");
    for &kind in PieceKind::ALL {
        catalog.set_template(kind, kind.symbol());
    }
    catalog
}

#[derive(Debug)]
enum Command {
    Quit,
    Help,
    Show,
    Pieces,
    Hover(Option<Cell>),
    Aim(f32, f32),
    Press(Cell),
    Release(Option<Cell>),
    Move(Cell, Cell),
    Random,
}

impl Command {
    /// Cells named by this command.
    fn cells(&self) -> Vec<Cell> {
        match *self {
            Command::Hover(Some(cell)) | Command::Press(cell) | Command::Release(Some(cell)) => {
                vec![cell]
            }
            Command::Move(from, to) => vec![from, to],
            _ => Vec::new(),
        }
    }
}

/// Matches a cell written as `x,y` or `x y`.
const CELL: &str = r"(?P<{0}x>[0-9]+)(?:\s*,\s*|\s+)(?P<{0}y>[0-9]+)";

fn cell_pattern(prefix: &str) -> String {
    CELL.replace("{0}", prefix)
}

/// Parse one command line. Prints why and returns `None` if it is not a command.
fn parse_command(input: &str) -> Option<Command> {
    static POINTER: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(
            r"^(?P<verb>hover|press|release|drop)\s+(?:(?P<none>none|off)|{})$",
            cell_pattern("")
        ))
        .unwrap()
    });
    static MOVE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(
            r"^(?:move|mv)\s+{}\s+(?:(?:to|->)\s+)?{}$",
            cell_pattern("from_"),
            cell_pattern("to_")
        ))
        .unwrap()
    });
    static AIM: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^aim\s+(?P<x>-?[0-9]+(?:\.[0-9]*)?)\s+(?P<z>-?[0-9]+(?:\.[0-9]*)?)$")
            .unwrap()
    });

    match input {
        "?" | "help" | "h" => Some(Command::Help),
        "quit" | "exit" | "q" => Some(Command::Quit),
        "show" | "board" | "" => Some(Command::Show),
        "pieces" | "list" => Some(Command::Pieces),
        "random" | "rand" => Some(Command::Random),
        other => {
            if let Some(captures) = POINTER.captures(other) {
                let cell = match captures.name("none") {
                    Some(_) => None,
                    None => Some(captured_cell(&captures, "")?),
                };
                match &captures["verb"] {
                    "hover" => Some(Command::Hover(cell)),
                    "press" => match cell {
                        Some(cell) => Some(Command::Press(cell)),
                        None => {
                            println!("press needs a cell");
                            None
                        }
                    },
                    _ => Some(Command::Release(cell)),
                }
            } else if let Some(captures) = MOVE.captures(other) {
                Some(Command::Move(
                    captured_cell(&captures, "from_")?,
                    captured_cell(&captures, "to_")?,
                ))
            } else if let Some(captures) = AIM.captures(other) {
                match (captures["x"].parse(), captures["z"].parse()) {
                    (Ok(x), Ok(z)) => Some(Command::Aim(x, z)),
                    _ => {
                        println!("invalid point: {} {}", &captures["x"], &captures["z"]);
                        None
                    }
                }
            } else {
                println!("Invalid command \"{}\". Use '?' for help", other);
                None
            }
        }
    }
}

/// Extract the cell captured under `prefix` from a command match.
fn captured_cell(captures: &regex::Captures, prefix: &str) -> Option<Cell> {
    let coord = |axis: &str| {
        let raw = &captures[format!("{}{}", prefix, axis).as_str()];
        match raw.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                println!("invalid {}: {}", axis, raw);
                None
            }
        }
    };
    Some(Cell::new(coord("x")?, coord("y")?))
}

fn print_help() {
    println!(
        "Available Commands:
    show                    print the board.
    pieces                  list every piece and where it stands.
    hover <x>,<y>           point at a cell. \"hover none\" points off the board.
    aim <wx> <wz>           point at a world position on the board plane.
    press <x>,<y>           pick up the piece on a cell.
    release <x>,<y>         drop the held piece on a cell. \"release none\" puts it back.
    move <x>,<y> <x>,<y>    move a piece directly.
    random                  move a random piece to a random cell.
    quit                    leave.

Cells are written x,y with 0,0 at white's left corner."
    );
}

/// Try random moves until one is accepted or the attempts run out.
fn random_move(rng: &mut impl Rng, session: &mut Session, renderer: &mut TextRenderer) {
    if session.drag().is_some() {
        println!("Release the held piece first.");
        return;
    }
    let dim = *session.board().dimensions();
    for _ in 0..RANDOM_ATTEMPTS {
        let team: Team = rng.gen();
        let mut piece = session.board().pieces_of(team).map(|p| p.id()).choose(rng);
        if piece.is_none() {
            piece = session
                .board()
                .pieces_of(team.opponent())
                .map(|p| p.id())
                .choose(rng);
        }
        let piece = match piece {
            Some(piece) => piece,
            None => {
                println!("The board is empty.");
                return;
            }
        };
        let dest: Cell = rng.sample(&dim);
        if let Ok(outcome) = session.move_piece(piece, dest, renderer) {
            report_move(&outcome);
            return;
        }
    }
    println!("No random move was accepted.");
}

fn report_move(outcome: &MoveOutcome) {
    match outcome {
        MoveOutcome::Moved { from, to } => println!("Moved {} -> {}.", from, to),
        MoveOutcome::Captured { from, to, captured } => println!(
            "Moved {} -> {}, taking the {} {}.",
            from,
            to,
            captured.piece.team(),
            captured.piece.kind()
        ),
    }
}

fn show_pieces(session: &Session) {
    let mut pieces: Vec<_> = session.board().iter_pieces().collect();
    pieces.sort_by_key(|p| (p.team(), p.position().y, p.position().x));
    for piece in pieces {
        println!(
            "{:>4} {:<5} {:<6} at {}",
            piece.id(),
            piece.team(),
            piece.kind(),
            piece.position()
        );
    }
}

/// Print the board with white at the bottom. Hovered cells are bracketed and the
/// source of a drag is marked with `*`.
fn show_board(session: &Session) {
    let dim = session.board().dimensions();
    let rows: Vec<Vec<_>> = session
        .board()
        .iter_rows()
        .map(|row| row.collect())
        .collect();
    for (y, row) in rows.iter().enumerate().rev() {
        print!("{:>2} ", y);
        for (x, cell) in row.iter().enumerate() {
            let highlight = session.highlight_of(Cell::new(x, y));
            let glyph = cell.map_or(BoardGlyph::Empty, |p| BoardGlyph::Piece(p.team(), p.kind()));
            let (open, close) = if highlight.contains(Highlight::Hovered) {
                ('[', ']')
            } else if highlight.contains(Highlight::Selected) {
                ('*', '*')
            } else {
                (' ', ' ')
            };
            print!("{}{}{}", open, glyph, close);
        }
        println!();
    }
    print!("   ");
    for x in 0..dim.width() {
        print!("{:^3}", x);
    }
    println!();
}

/// Display helper for a single board square.
enum BoardGlyph {
    Empty,
    Piece(Team, PieceKind),
}

impl fmt::Display for BoardGlyph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardGlyph::Empty => f.pad("."),
            BoardGlyph::Piece(Team::White, kind) => write!(f, "{}", kind.symbol()),
            BoardGlyph::Piece(Team::Black, kind) => {
                write!(f, "{}", kind.symbol().to_ascii_lowercase())
            }
        }
    }
}

/// Display helper naming a piece on the session's board.
struct PieceName<'a>(&'a Session, PieceId);

impl fmt::Display for PieceName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.board().piece(self.1) {
            Some(piece) => write!(f, "{} {} {}", piece.team(), piece.kind(), self.1),
            None => write!(f, "piece {}", self.1),
        }
    }
}

/// Presentation that narrates what a renderer would be asked to do.
struct TextRenderer {
    verbose: bool,
    visuals: HashMap<PieceId, String>,
}

impl TextRenderer {
    fn new(verbose: bool) -> Self {
        Self {
            verbose,
            visuals: HashMap::new(),
        }
    }

    fn say(&self, args: fmt::Arguments) {
        if self.verbose {
            println!("  [render] {}", args);
        }
    }
}

impl Presentation for TextRenderer {
    type Template = char;
    type Material = &'static str;

    fn set_cell_highlight(&mut self, cell: Cell, highlight: BitFlags<Highlight>) {
        let state = match (
            highlight.contains(Highlight::Hovered),
            highlight.contains(Highlight::Selected),
        ) {
            (false, false) => "normal",
            (true, false) => "hovered",
            (false, true) => "selected",
            (true, true) => "hovered+selected",
        };
        self.say(format_args!("tile {} -> {}", cell.label(), state));
    }

    fn set_piece_world_position(&mut self, piece: PieceId, position: WorldPoint) {
        let name = self.visuals.get(&piece).map_or("?", String::as_str);
        self.say(format_args!("{} {} -> {}", name, piece, position));
    }

    fn instantiate_piece_visual(
        &mut self,
        piece: PieceId,
        kind: PieceKind,
        team: Team,
        template: &char,
    ) {
        self.visuals.insert(piece, format!("{}{}", template, team));
        self.say(format_args!("spawn {} {} {}", team, kind, piece));
    }

    fn assign_material(&mut self, piece: PieceId, material: &&'static str) {
        if let Some(name) = self.visuals.get_mut(&piece) {
            *name = format!("{}/{}", name, material);
        }
    }

    fn remove_piece_visual(&mut self, piece: PieceId) {
        let name = self.visuals.remove(&piece).unwrap_or_default();
        self.say(format_args!("remove {} {}", name, piece));
    }
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
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
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
