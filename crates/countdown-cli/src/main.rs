mod cli;

fn main() {
    match cli::run() {
        Ok(outcome) => {
            let code = outcome.exit_code();
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("{e:#}"); // pretty anyhow chain
            std::process::exit(1);
        }
    }
}
