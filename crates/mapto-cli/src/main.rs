use mapto_cli::MaptoCli;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    mapto_cli::init_logging();

    let cli = MaptoCli::new();

    if cli.parse_and_run()? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
