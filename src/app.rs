use crate::cli::Cli;

/// The per-invocation context handed through the router.
pub struct App {
    pub cli: Cli,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        App { cli }
    }
}
