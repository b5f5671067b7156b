use arq_transfer::broker::{run, config::Config};

fn main() {
    let config = Config::from_command_line();

    match run(config) {
        Ok(report) => {
            println!("{}", report.summary());
            if !report.is_complete() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            println!("Ending program because of error");
            println!("{}", e);
            std::process::exit(2);
        }
    }
}
