use a11ycrawl::commands::command_argument_builder;
use a11ycrawl::handlers::{handle_check, handle_serve, json_to_stdout};
use a11ycrawl_core::print_banner;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet")
        || matches!(chosen_command.subcommand(), Some(("check", args)) if json_to_stdout(args));

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,chromiumoxide=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match chosen_command.subcommand() {
        Some(("serve", primary_command)) => handle_serve(primary_command).await,
        Some(("check", primary_command)) => handle_check(primary_command, quiet).await,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
