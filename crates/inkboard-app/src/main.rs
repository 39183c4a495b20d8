use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting Inkboard replay");

    let mut args = std::env::args().skip(1);
    let Some(script) = args.next() else {
        eprintln!("usage: inkboard-replay <script.json> [config.json]");
        return ExitCode::from(2);
    };
    let config = args.next();

    match inkboard_app::run_files(Path::new(&script), config.as_deref().map(Path::new)) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
