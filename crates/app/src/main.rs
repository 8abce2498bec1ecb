use std::io::{self, IsTerminal};

use console::Console;
use payment::PaymentDesk;
use shell::Shell;

mod console;
mod error;
mod payment;
mod settings;
mod shell;
mod views;

fn main() -> error::Result<()> {
    let settings = settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "pajak={level},engine={level}",
            level = settings.log_level
        ))
        .with_writer(io::stderr)
        .init();

    let engine = engine::Engine::builder()
        .path(&settings.data_file)
        .build()?;

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout())
        .with_masked_passwords(stdin.is_terminal());
    let mut shell = Shell::new(engine, console, PaymentDesk::new(settings.payment));

    shell.run()
}
