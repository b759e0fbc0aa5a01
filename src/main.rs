use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = bulkmv::cli::parse();
    app::run(args)
}
