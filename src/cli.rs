use clap::{crate_authors, crate_description, crate_version, Arg, ArgAction, Command};
use pretty_env_logger::env_logger::Builder;
use std::env;
use std::io::Write;
use std::process::exit;

use ap_inventory::Config;

fn set_logger_level(b: &mut Builder) {
    let mut b = b;
    if env::var("RUST_LOG").is_err() {
        b = b.filter_level(log::LevelFilter::Info)
    }
    b.init();
}

fn setup_logger() {
    // Adapted from env_logger examples. <3 Systemd support
    match std::env::var("RUST_LOG_STYLE") {
        Ok(s) if s == "SYSTEMD" => {
            let builder = &mut pretty_env_logger::env_logger::builder();
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "<{}>{}: {}",
                    match record.level() {
                        log::Level::Error => 3,
                        log::Level::Warn => 4,
                        log::Level::Info => 6,
                        log::Level::Debug => 7,
                        log::Level::Trace => 7,
                    },
                    record.target(),
                    record.args()
                )
            });
            set_logger_level(builder);
        }
        _ => {
            let builder = &mut pretty_env_logger::formatted_builder();
            set_logger_level(builder);
        }
    };
}

pub(crate) fn main() {
    let cli = Command::new("ap-inventory")
        .about(format!(
            "{}\n{} {}",
            crate_description!(),
            "Configuration is managed using APSCAN_* environment variables.",
            "Report lines are written to stdout, logs to stderr.",
        ))
        .arg(
            Arg::new("check")
                .action(ArgAction::SetTrue)
                .short('t')
                .long("test")
                .help("Check the configuration"),
        )
        .arg(
            Arg::new("servers")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .long("servers")
                .help("AirWave server URLs, overrides APSCAN_AIRWAVE__URLS"),
        )
        .arg(
            Arg::new("site-code")
                .long("site-code")
                .help("Site code to match after the first hyphen of a name"),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .help("Name pattern, overrides the site code"),
        )
        .version(crate_version!())
        .author(crate_authors!("\n"));

    let args = cli.get_matches();

    setup_logger();

    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(err) => {
            eprintln!("{err}");
            exit(2);
        }
    };
    if let Some(servers) = args.get_many::<String>("servers") {
        config = config.with_urls(servers.cloned().collect());
    }
    if let Some(site_code) = args.get_one::<String>("site-code") {
        config = config.with_site_code(site_code.clone());
    }
    if let Some(pattern) = args.get_one::<String>("pattern") {
        config = config.with_pattern(pattern.clone());
    }

    let service = match config.get_service() {
        Ok(s) => s,
        Err(err) => {
            eprintln!("{err}");
            exit(2);
        }
    };

    if args.get_flag("check") {
        tracing::info!(sources = service.sources(), "Configuration is valid.");
        exit(0);
    }

    if let Err(err) = service.run(&mut std::io::stdout().lock()) {
        tracing::error!(error = err.to_string(), "Report failed");
        exit(1);
    }
}
