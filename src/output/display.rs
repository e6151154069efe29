//! Display functions for command results

use super::formatters::{create_progress_bar, fit_label, lives_meter, paint};
use crate::commands::{AllocationReport, SimulationStatistics};
use crate::game::Game;
use crate::repository::CategoryRepository;
use colored::Colorize;

const CELL_WIDTH: usize = 14;

/// Print the board with 1-based tile numbers
pub fn print_board(game: &Game) {
    let board = game.board();
    println!("{}", "─".repeat(70).cyan());
    println!(
        "Lives: {}   Merges: {}   Tiles: {}",
        lives_meter(game.lives()).bright_red(),
        game.stats().merges,
        board.active_tile_count()
    );
    println!("{}", "─".repeat(70).cyan());

    let mut number = 1;
    for row in board.rows() {
        let mut line = String::new();
        for id in row.tiles() {
            let Some(tile) = board.tile(*id) else {
                continue;
            };
            let label = fit_label(tile.label(), CELL_WIDTH);
            let cell = paint(&label, game.color_of(tile));
            let cell = if tile.is_active() {
                cell.to_string()
            } else {
                cell.dimmed().strikethrough().to_string()
            };
            line.push_str(&format!("{:>3}. {cell} ", number.to_string().bright_black()));
            number += 1;
        }
        println!("{line}");
    }
}

/// Print the result of an allocation
pub fn print_allocation(report: &AllocationReport) {
    let allocation = &report.allocation;

    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} ",
        "ALLOCATION:".bright_cyan().bold(),
        report.source.to_string().bright_yellow().bold()
    );
    println!("{}", "═".repeat(60).cyan());

    println!(
        "\n📋 Quota: {}-{} per category, {} total | shuffle intensity {:.2}",
        report.quota.min_per_category,
        report.quota.max_per_category,
        report.quota.total,
        report.shuffle_intensity
    );

    if allocation.is_empty() {
        println!("\n{}", "❌ No categories available".red().bold());
    }

    println!("\n📊 {}", "Per category:".bright_cyan().bold());
    let widest = allocation
        .per_category
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(0);
    for (category, count) in &allocation.per_category {
        let bar = create_progress_bar(*count as f64, widest as f64, 20);
        println!("   {:<16} {} {count}", category.as_str(), bar.green());
    }

    if !allocation.dropped.is_empty() {
        println!(
            "\n⚠️  Dropped: {}",
            allocation.dropped.join(", ").yellow()
        );
    }

    println!(
        "\n🔀 {} words, {} swaps",
        allocation.len().to_string().bright_yellow().bold(),
        allocation.swaps
    );
    for (i, (word, category)) in allocation.assignment.iter().enumerate() {
        println!(
            "   {:>3}. {:<18} {}",
            (i + 1).to_string().bright_black(),
            word,
            category.as_str().bright_black()
        );
    }
}

/// Print every category with its word count
pub fn print_categories(repository: &CategoryRepository) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} {} categories, {} words ",
        "CATEGORIES:".bright_cyan().bold(),
        repository.len(),
        repository.word_count()
    );
    println!("{}", "═".repeat(60).cyan());

    for category in repository.categories() {
        let preview: Vec<&str> = category.words().iter().take(4).map(String::as_str).collect();
        println!(
            "   {:<16} {:>3}  {}{}",
            category.name().bright_white().bold(),
            category.len(),
            preview.join(", ").bright_black(),
            if category.len() > preview.len() { ", …" } else { "" }
        );
    }
}

/// Print aggregated simulation results
pub fn print_simulation_result(stats: &SimulationStatistics) {
    let total = stats.total_games.max(1) as f64;

    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Outcomes:".bright_cyan().bold());
    println!("   Rounds played:    {}", stats.total_games);
    println!(
        "   Won:              {} {}",
        stats.won,
        format!("({:.1}%)", stats.won as f64 / total * 100.0).green()
    );
    println!(
        "   Lost:             {} {}",
        stats.lost,
        format!("({:.1}%)", stats.lost as f64 / total * 100.0).red()
    );
    if stats.stalled > 0 {
        println!("   Stalled:          {}", stats.stalled.to_string().yellow());
    }
    if stats.empty > 0 {
        println!("   No categories:    {}", stats.empty.to_string().yellow());
    }
    println!("   Avg tiles:        {:.1}", stats.average_tiles);
    println!(
        "   Avg merges:       {}",
        format!("{:.2}", stats.average_merges).bright_yellow().bold()
    );
    println!("   Avg penalties:    {:.2}", stats.average_penalties);
    println!("   Time taken:       {:.2}s", stats.total_time.as_secs_f64());

    if stats.won > 0 {
        println!("\n📈 {}", "Lives left on wins:".bright_cyan().bold());
        for lives in (1..=stats.starting_lives).rev() {
            let count = stats.lives_distribution.get(&lives).copied().unwrap_or(0);
            let pct = count as f64 / stats.won as f64 * 100.0;
            let bar = create_progress_bar(pct, 100.0, 40);
            println!("   {lives}: {} {count:4} ({pct:5.1}%)", bar.green());
        }
    }
}
