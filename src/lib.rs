// Library root
// -----------
// The binary (`main.rs`) only parses configuration and calls `ui::run`;
// everything else lives here so it can be tested without a terminal.
//
// Module responsibilities:
// - `api`: HTTP client for the occupancy API and its data types.
// - `render`: pure text rendering of frames, bars and the location list.
// - `input` / `terminal`: keystroke abstraction and its raw-mode backend.
// - `picker`: incremental-search location selection.
// - `monitor`: the refresh / switch / quit loop for one location.
// - `config`: command-line and environment configuration.
// - `ui`: ties the pieces together into the application flow.
pub mod api;
pub mod config;
pub mod input;
pub mod monitor;
pub mod picker;
pub mod render;
pub mod terminal;
pub mod ui;
