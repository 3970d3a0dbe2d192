mod actions;
mod app;
mod audio;
mod catalog;
mod client;
mod config;
mod events;
mod runtime;
mod transport;
mod ui;
mod views;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
