mod app;
mod calculation;
mod cli;
mod config;
mod error;
mod prelude;
mod router;
mod types;

use app::App;
use cli::Cli;

fn main() -> miette::Result<()> {
    let app = App::new(Cli::new());

    let scenario = app.cli.try_load_scenario()?;
    let report = router::does_the_math(&app, &scenario)?;

    let output = report.render(app.cli.unformatted, None)?;
    println!("{}", output);

    Ok(())
}
