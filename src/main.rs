use plntmap::args::parse_args;
use plntmap::domain::ENV_BASE_URL;
use plntmap::logging;
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let args = parse_args();
    logging::init_logging(args.verbose);

    let env_override = std::env::var(ENV_BASE_URL).ok();

    match plntmap::run(&args, env_override, std::io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
