//! Simple interactive CLI mode
//!
//! Text-based play without the TUI: tiles are picked by number instead of dragged.

use crate::config::GameConfig;
use crate::core::TileId;
use crate::game::{CategorySource, Dealer, Game, GameStatus, InputEvent, InputOutcome};
use crate::output::display::print_board;
use crate::repository::CategoryRepository;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if the level does not exist or on an I/O error reading input.
pub fn run_simple(
    repository: &CategoryRepository,
    config: &GameConfig,
    source: CategorySource,
    seed: Option<u64>,
) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Word Groups - Simple Mode                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print_help();

    let mut dealer = Dealer::new(repository, source, seed)?;
    let mut game = Game::new(config.clone());
    dealer.deal(&mut game);

    loop {
        if game.status() == GameStatus::Empty {
            println!("\n❌ No categories available for {}.", dealer.source());
            return Ok(());
        }

        println!(
            "\n{} · {} categories in play",
            dealer.source().to_string().bright_cyan().bold(),
            game.board().active_categories().len()
        );
        print_board(&game);

        if game.status().is_over() {
            if game.status() == GameStatus::Won {
                print_victory(&game);
            } else {
                println!("\n{}", "💀 Game over! No lives left.".bright_red().bold());
            }
            match get_user_input("n: next level, r: replay, q: quit")?.as_str() {
                "n" | "next" => advance_level(&mut dealer, &mut game),
                "r" | "replay" => {
                    dealer.deal(&mut game);
                }
                _ => {
                    println!("\n👋 Thanks for playing!\n");
                    return Ok(());
                }
            }
            continue;
        }

        let input = get_user_input("Tiles to merge (e.g. '1 5 7')")?;
        match input.to_lowercase().as_str() {
            "q" | "quit" | "exit" => {
                println!("\n👋 Thanks for playing!\n");
                return Ok(());
            }
            "r" | "restart" => {
                dealer.deal(&mut game);
                println!("\n🔄 Board reshuffled!");
            }
            "n" | "next" => advance_level(&mut dealer, &mut game),
            "h" | "help" | "?" => print_help(),
            _ => {
                let order = numbered_tiles(&game);
                match parse_selection(&input, order.len()) {
                    Ok(picks) => {
                        let tiles: Vec<TileId> = picks.iter().map(|&i| order[i]).collect();
                        let outcome = play_selection(&mut game, &tiles);
                        report(&game, &outcome);
                    }
                    Err(message) => println!("❌ {message}"),
                }
            }
        }
    }
}

/// Tiles in the numbering shown to the player (row by row, from 1)
#[must_use]
pub fn numbered_tiles(game: &Game) -> Vec<TileId> {
    game.board().tiles_in_order().map(|t| t.id()).collect()
}

/// Parse 1-based tile numbers separated by spaces or commas into 0-based indices
///
/// # Errors
///
/// Returns a message for non-numeric input, numbers out of range, or repeats.
pub fn parse_selection(input: &str, tile_count: usize) -> Result<Vec<usize>, String> {
    let mut picks = Vec::new();
    for token in input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
    {
        let number: usize = token
            .parse()
            .map_err(|_| format!("'{token}' is not a tile number"))?;
        if number == 0 || number > tile_count {
            return Err(format!("Tile {number} does not exist (1-{tile_count})"));
        }
        if picks.contains(&(number - 1)) {
            return Err(format!("Tile {number} picked twice"));
        }
        picks.push(number - 1);
    }
    if picks.is_empty() {
        return Err("Enter at least two tile numbers".to_string());
    }
    Ok(picks)
}

/// Replay a pick list as a drag gesture, settling any penalty straight away
pub fn play_selection(game: &mut Game, tiles: &[TileId]) -> InputOutcome {
    let Some((first, rest)) = tiles.split_first() else {
        return InputOutcome::Ignored;
    };
    if game.handle(InputEvent::Press(*first)) == InputOutcome::Ignored {
        return InputOutcome::Ignored;
    }
    for tile in rest {
        game.handle(InputEvent::Hover(*tile));
    }
    let outcome = game.handle(InputEvent::Release);
    if game.is_resolving() {
        let flash = game.config().penalty_flash();
        game.advance(flash);
    }
    outcome
}

fn report(game: &Game, outcome: &InputOutcome) {
    match outcome {
        InputOutcome::Merged { label, .. } => {
            println!("{}", format!("✓ Merged into {label}").bright_green());
        }
        InputOutcome::Penalized { lives } => {
            println!(
                "{}",
                format!("✗ Those words don't belong together! Lives left: {lives}").bright_red()
            );
        }
        InputOutcome::Discarded => println!("Select at least two tiles to merge."),
        InputOutcome::Ignored | InputOutcome::Selecting => {
            if game.status() == GameStatus::Playing {
                println!("That tile can't be selected.");
            }
        }
    }
}

fn advance_level(dealer: &mut Dealer<'_>, game: &mut Game) {
    if dealer.next_level() {
        println!("\n➡️  {}", dealer.source());
    } else {
        println!("\nNo further level, replaying {}.", dealer.source());
    }
    dealer.deal(game);
}

fn print_victory(game: &Game) {
    let stats = game.stats();
    println!("\n{}", "═".repeat(70).bright_cyan());
    println!(
        "{}",
        "        🎉 🎊 ✨  B O A R D   S O L V E D !  ✨ 🎊 🎉        "
            .bright_green()
            .bold()
    );
    println!("{}", "═".repeat(70).bright_cyan());
    println!(
        "\n  Solved with {} merges and {} {}",
        stats.merges.to_string().bright_cyan().bold(),
        stats.penalties,
        if stats.penalties == 1 { "mistake" } else { "mistakes" }
    );
}

fn print_help() {
    println!("Merge tiles of the same category by entering their numbers.");
    println!("Mixing categories costs a life. Merged tiles show how much of");
    println!("their category they hold; a complete category is greyed out.\n");
    println!("Commands: 'r' reshuffle, 'n' next level, 'h' help, 'q' quit\n");
}

/// Get user input with a prompt; end of input reads as "q"
fn get_user_input(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok("q".to_string());
    }

    Ok(input.trim().to_string())
}
