use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::console::Target;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::Appender;
use log4rs::config::Root;
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;
use std::path::PathBuf;

use winctl::app::cli_args::CliArgs;
use winctl::app::commands::execute;
use winctl::app::configs::load_configs;
use winctl::controller::public::WindowController;

pub fn main() {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            std::process::exit(CliArgs::parse_error_code(&e));
        }
    };

    init_logger(
        args.is_file_all_enabled(),
        args.is_file_error_enabled(),
        args.get_log_level(),
    );

    let cfg_file = match args.config_path.clone().or_else(default_config_path) {
        Some(path) => path,
        None => {
            log::error!("Can't locate the home directory, use --config to set the configuration file");
            std::process::exit(1);
        }
    };

    let config = load_configs(&cfg_file)
        .inspect_err(|e| log::error!("Can't read config file {}: {}", cfg_file.display(), e))
        .unwrap_or_default();

    let controller = match WindowController::system(config.controller_config()) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let result = execute(&controller, &args.command);
    println!("process ret: {result}");
    std::process::exit(result.error_code);
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("winctl").join("winctl.toml"))
}

fn init_logger(file_all: bool, file_errors: bool, level: LevelFilter) {
    let pattern = PatternEncoder::new("{h({d(%Y-%m-%d %H:%M:%S)} {({l}):5.5} {f}:{L})}: {m}{n}");
    let console: ConsoleAppender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(pattern.clone()))
        .build();

    const FILE_SIZE: u64 = 10 * 1024 * 1024; // INFO: 10 MB
    const NUM_FILES: u32 = 3;

    let mut root_builder = Root::builder().appender("console");
    let mut config_builder =
        log4rs::config::Config::builder().appender(Appender::builder().build("console", Box::new(console)));

    if file_all {
        match rolling_file("./logs/winctl.log", "./logs/winctl.{}.gz", FILE_SIZE, NUM_FILES, &pattern) {
            Ok(appender) => {
                config_builder = config_builder.appender(Appender::builder().build("file_all", Box::new(appender)));
                root_builder = root_builder.appender("file_all");
            }
            Err(e) => eprintln!("Can't create the log file: {e}"),
        }
    }

    if file_errors {
        match rolling_file("./logs/errors.log", "./logs/errors.{}.gz", FILE_SIZE, NUM_FILES, &pattern) {
            Ok(appender) => {
                config_builder = config_builder.appender(
                    Appender::builder()
                        .filter(Box::new(ThresholdFilter::new(LevelFilter::Error)))
                        .build("file_errors", Box::new(appender)),
                );
                root_builder = root_builder.appender("file_errors");
            }
            Err(e) => eprintln!("Can't create the errors log file: {e}"),
        }
    }

    let config = match config_builder.build(root_builder.build(level)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid logger configuration: {e}");
            return;
        }
    };

    if let Err(e) = log4rs::init_config(config) {
        eprintln!("Can't initialize the logger: {e}");
        return;
    }

    log_panics::init();
}

fn rolling_file(
    path: &str,
    roll_pattern: &str,
    size: u64,
    count: u32,
    pattern: &PatternEncoder,
) -> Result<RollingFileAppender, Box<dyn std::error::Error + Send + Sync>> {
    let policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(size)),
        Box::new(FixedWindowRoller::builder().build(roll_pattern, count)?),
    );
    Ok(RollingFileAppender::builder()
        .encoder(Box::new(pattern.clone()))
        .build(path, Box::new(policy))?)
}
