//! Word Groups
//!
//! A category-merging word puzzle. A balanced, shuffled set of words is drawn from
//! several categories and laid out as tiles; the player drags across tiles of one
//! category to merge them, loses a life for mixing categories, and solves the board
//! once every category has been gathered into a single tile.
//!
//! # Quick Start
//!
//! ```rust
//! use word_groups::config::GameConfig;
//! use word_groups::game::{CategorySource, Dealer, Game, GameStatus};
//! use word_groups::repository::CategoryRepository;
//!
//! let repository = CategoryRepository::embedded();
//! let mut dealer = Dealer::new(&repository, CategorySource::Level(1), Some(42)).unwrap();
//!
//! let mut game = Game::new(GameConfig::default());
//! let allocation = dealer.deal(&mut game);
//!
//! assert_eq!(game.status(), GameStatus::Playing);
//! assert_eq!(game.board().tile_count(), allocation.len());
//! ```

// Core domain types
pub mod core;

// Category data and levels
pub mod repository;

// Word selection
pub mod allocator;

// Board state and cleanup rules
pub mod board;

// Drag-selection state machine
pub mod session;

// Round orchestration
pub mod game;

// Game tunables
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
