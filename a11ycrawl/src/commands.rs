use clap::{arg, command};
use std::net::IpAddr;
use std::path::PathBuf;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("a11ycrawl")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("a11ycrawl")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(with_tunables(
            command!("serve")
                .about("Serve the accessibility check over HTTP")
                .arg(
                    arg!(--"bind" <ADDR>)
                        .required(false)
                        .help("Address to bind the HTTP server to")
                        .value_parser(clap::value_parser!(IpAddr))
                        .default_value("0.0.0.0"),
                )
                .arg(
                    arg!(-p --"port" <PORT>)
                        .required(false)
                        .help("Port to listen on")
                        .value_parser(clap::value_parser!(u16))
                        .default_value("3001"),
                ),
        ))
        .subcommand(with_tunables(
            command!("check")
                .about("Crawl a site once and report the accessibility score of every page")
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The URL to start crawling from"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, markdown")
                        .value_parser(["text", "json", "markdown", "md"])
                        .default_value("text"),
                ),
        ))
}

/// Crawl and browser flags shared by `serve` and `check`.
fn with_tunables(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        arg!(--"max-depth" <DEPTH>)
            .required(false)
            .help("Maximum link depth from the start page (default: 3)")
            .value_parser(clap::value_parser!(usize)),
    )
    .arg(
        arg!(--"max-pages" <PAGES>)
            .required(false)
            .help("Maximum number of pages to audit (default: 50)")
            .value_parser(clap::value_parser!(usize)),
    )
    .arg(
        arg!(--"page-timeout" <SECONDS>)
            .required(false)
            .help("Time allowed to load and audit one page (default: 60)")
            .value_parser(clap::value_parser!(u64)),
    )
    .arg(
        arg!(--"page-delay" <MS>)
            .required(false)
            .help("Pause between pages in milliseconds (default: 200)")
            .value_parser(clap::value_parser!(u64)),
    )
    .arg(
        arg!(--"scope" <SCOPE>)
            .required(false)
            .help("Which links to follow: prefix (URL starts with the start URL) or host")
            .value_parser(["prefix", "host"]),
    )
    .arg(
        arg!(--"axe-script" <PATH>)
            .required(false)
            .help("Local axe-core script to inject (default: download from cdnjs)")
            .value_parser(clap::value_parser!(PathBuf)),
    )
    .arg(
        arg!(--"headful")
            .required(false)
            .help("Show the browser window instead of running headless")
            .action(clap::ArgAction::SetTrue),
    )
    .arg(
        arg!(--"sandbox")
            .required(false)
            .help("Keep the Chrome sandbox enabled")
            .action(clap::ArgAction::SetTrue),
    )
}
