use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
    time::Instant,
};

use anyhow::{bail, Context};
use clap::Parser;
use log::info;

/// Print the suffix array of a text, one index per line.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Text to index; standard input if omitted
    input: Option<PathBuf>,

    /// Verify that the output is a correctly ordered permutation
    #[arg(long)]
    check: bool,

    /// Time induced sorting against the reference sorter
    #[arg(long)]
    bench: bool,

    /// Log every recursion level
    #[arg(short, long)]
    verbose: bool,
}

/// Read lines, terminating each of them with '\n'.
fn read_text<R: BufRead>(reader: R) -> io::Result<Vec<u8>> {
    let mut text = Vec::new();

    for line in reader.split(b'\n') {
        text.extend_from_slice(&line?);
        text.push(b'\n');
    }

    Ok(text)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let text = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file '{}'", path.display()))?;
            read_text(BufReader::new(file))
        }
        None => read_text(io::stdin().lock()),
    }
    .context("Failure occurred while reading input text")?;

    info!("read {} bytes", text.len());

    let start = Instant::now();
    let sa = sais::build(&text, u8::MAX as usize);
    let sais_elapsed = start.elapsed();

    if args.bench {
        let start = Instant::now();
        let _ = sais::naive::build(&text);
        let naive_elapsed = start.elapsed();

        eprintln!("sais:  {:?}", sais_elapsed);
        eprintln!("naive: {:?}", naive_elapsed);
    }

    {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        for suffix in &sa {
            writeln!(out, "{}", suffix)?;
        }
        out.flush().context("Failed to write suffix array")?;
    }

    if args.check {
        if let Some(k) = sais::naive::first_disorder(&text, &sa) {
            bail!("suffix at rank {} (position {}) is out of order", k, sa[k]);
        }
        if !sais::naive::is_permutation(&sa) {
            bail!("output is not a permutation of 0..{}", sa.len());
        }
        info!("check passed");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_text_terminates_lines() {
        let text = read_text(&b"ab\ncd"[..]).unwrap();
        assert_eq!(text, b"ab\ncd\n");
    }

    #[test]
    fn read_text_keeps_single_trailing_newline() {
        let text = read_text(&b"ab\n\ncd\n"[..]).unwrap();
        assert_eq!(text, b"ab\n\ncd\n");
    }

    #[test]
    fn read_text_empty() {
        let text = read_text(&b""[..]).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from(["sais", "--check", "-v", "in.txt"]).unwrap();
        assert!(args.check);
        assert!(args.verbose);
        assert!(!args.bench);
        assert_eq!(args.input, Some(PathBuf::from("in.txt")));
    }
}
