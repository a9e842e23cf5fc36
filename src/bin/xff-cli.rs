use std::process::ExitCode;

use clap::{Parser, Subcommand};

use xff_resolver::resolver::{resolve, PeerPolicy};
use xff_resolver::{Preset, TrustPredicate, TrustSet};

#[derive(Parser)]
#[command(name = "xff-cli")]
#[command(about = "Resolve client addresses from forwarded chains offline", long_about = None)]
struct Cli {
    /// Trusted proxy range in CIDR notation (repeatable)
    #[arg(short, long = "trust", global = true)]
    trust: Vec<String>,

    /// Named range set applied before --trust
    #[arg(short, long, global = true)]
    preset: Option<Preset>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the remote address of a request
    Resolve {
        /// Observed peer, "host:port" or "[host]:port"
        #[arg(long)]
        peer: String,

        /// X-Forwarded-For value; omit for a request without the header
        #[arg(long)]
        header: Option<String>,

        /// Ignore the header unless the peer is itself trusted
        #[arg(long)]
        require_trusted_peer: bool,

        /// Print the full resolution as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report whether addresses are trusted proxies
    Check {
        /// Addresses to test
        #[arg(required = true)]
        addrs: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let cidrs = cli
        .preset
        .map(|p| p.cidrs())
        .unwrap_or_default()
        .iter()
        .copied()
        .chain(cli.trust.iter().map(String::as_str));

    let trust = match TrustSet::build(cidrs) {
        Ok(trust) => trust,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    match cli.command {
        Commands::Resolve {
            peer,
            header,
            require_trusted_peer,
            json,
        } => {
            let policy = if require_trusted_peer {
                PeerPolicy::Trusted
            } else {
                PeerPolicy::Any
            };
            let resolution = resolve(&peer, header.as_deref(), &trust, policy);

            if json {
                match serde_json::to_string_pretty(&resolution) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{} ({})", resolution.addr, resolution.source.as_str());
            }
        }
        Commands::Check { addrs } => {
            for addr in addrs {
                let verdict = if trust.is_trusted(&addr) { "trusted" } else { "untrusted" };
                println!("{}\t{}", addr, verdict);
            }
        }
    }

    ExitCode::SUCCESS
}
