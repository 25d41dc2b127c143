use hangman_de::cli::{CliInterface, parse_cli};
use hangman_de::logging::init_logging;
use hangman_de::tui::TuiInterface;
use hangman_de::{FrameSelector, GameState, game_loop, load_wordbank_from_file, pick_word};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;

const EXIT_STARTUP_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Err(e) = init_logging(cli.log_level.as_deref()) {
        eprintln!("Logging disabled: {e}");
    }

    let words = match &cli.wordlist {
        Some(path) => match load_wordbank_from_file(path) {
            Ok(words) => words,
            Err(e) => {
                log::error!("{e}");
                eprintln!("{e}");
                return ExitCode::from(EXIT_STARTUP_ERROR);
            }
        },
        None => Vec::new(),
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let word = pick_word(&words, &mut rng);

    let frames = FrameSelector::default();
    let mut game = match GameState::with_frames(&word, &frames) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Could not start game: {e}");
            eprintln!("Could not start game: {e}");
            return ExitCode::from(EXIT_STARTUP_ERROR);
        }
    };
    log::info!("Starting game with {} candidate words", words.len());

    let outcome = if cli.tui {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&mut game, &frames, &mut interface),
            Err(e) => {
                eprintln!("Failed to initialize TUI: {e}");
                return ExitCode::from(EXIT_STARTUP_ERROR);
            }
        }
    } else {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock(), io::stdout());
        game_loop(&mut game, &frames, &mut interface)
    };

    if cli.tui {
        // The alternate screen is gone once the interface is dropped.
        println!("{}", hangman_de::game_loop::format_result(outcome, &game).trim_end());
    }
    ExitCode::from(outcome.exit_code())
}
