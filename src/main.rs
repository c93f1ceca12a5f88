use anyhow::Result;
use mixfix::cli::{parse_args, Args};
use mixfix::diff_formatter::DiffFormatter;
use mixfix::{logger, LineRewriter};

fn main() -> Result<()> {
    let args = parse_args();

    if let Err(e) = logger::init_logging(args.verbose) {
        eprintln!("Warning: Could not initialize logging: {}", e);
    }

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let rewriter = LineRewriter::default();

    if args.dry_run {
        let diff = rewriter.preview()?;
        let use_color = DiffFormatter::should_use_color();
        print!("{}", DiffFormatter::format_dry_run_header(use_color));
        print!("{}", DiffFormatter::format_diff(&diff, use_color));
        return Ok(());
    }

    rewriter.rewrite()?;

    Ok(())
}
