use clap::Parser;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

License: MIT
Rust Edition: 2024"
);

#[derive(Parser, Debug)]
#[command(name = "mixfix")]
#[command(about = "Pin ex_abi and ex_keccak back to rustler-0.26 compatible releases in mix.lock")]
#[command(long_about = "mixfix rewrites ./mix.lock in place.

Any line containing the ex_abi 0.6.0 lock entry is replaced by the ex_abi 0.5.16
entry, and any line containing the ex_keccak 0.7.1 entry is replaced by the
ex_keccak 0.6.0 entry. All other lines are written back unchanged.

No backup is made. Keep mix.lock under version control.

EXAMPLES:
  mixfix                Rewrite ./mix.lock
  mixfix --dry-run      Show the lines that would be replaced
  mixfix --verbose      Rewrite and log each replaced line")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
pub struct Args {
    /// Preview changes without modifying mix.lock
    #[arg(short = 'd', long = "dry-run")]
    pub dry_run: bool,

    /// Log each step to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}
