//! sqlcanon CLI - a canonicalizing SQL pretty-printer

use clap::Parser;
use sqlcanon::cli::{discover_sql_files, Cli, Commands};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt { write, files } => run_fmt(&files, write),
        Commands::Check { files } => run_check(&files),
    }
}

/// Run the fmt command
fn run_fmt(files: &[PathBuf], write_mode: bool) -> ExitCode {
    let mut had_errors = false;

    for file_path in files {
        if file_path == Path::new("-") {
            match read_stdin().and_then(|contents| sqlcanon::format(&contents)) {
                Ok(formatted) => {
                    print!("{}", formatted);
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    had_errors = true;
                }
            }
            continue;
        }

        for entry in discover_sql_files(file_path) {
            if let Err(e) = format_file(&entry, write_mode) {
                eprintln!("{}: {}", entry.display(), e);
                had_errors = true;
            }
        }
    }

    if had_errors {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

/// Run the check command
fn run_check(files: &[PathBuf]) -> ExitCode {
    let mut needs_formatting = false;
    let mut had_errors = false;

    for file_path in files {
        if file_path == Path::new("-") {
            match read_stdin().and_then(|contents| sqlcanon::check(&contents)) {
                Ok(formatted) => {
                    if !formatted {
                        eprintln!("<stdin>: needs formatting");
                        needs_formatting = true;
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    had_errors = true;
                }
            }
            continue;
        }

        for entry in discover_sql_files(file_path) {
            match check_file(&entry) {
                Ok(formatted) => {
                    if !formatted {
                        eprintln!("{}: needs formatting", entry.display());
                        needs_formatting = true;
                    }
                }
                Err(e) => {
                    eprintln!("{}: {}", entry.display(), e);
                    had_errors = true;
                }
            }
        }
    }

    if had_errors {
        ExitCode::from(2)
    } else if needs_formatting {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

/// Format a single file, printing or rewriting it
fn format_file(path: &Path, write_mode: bool) -> sqlcanon::Result<()> {
    let contents = fs::read_to_string(path)?;
    let formatted = sqlcanon::format(&contents)?;

    if write_mode {
        if formatted != contents {
            fs::write(path, &formatted)?;
        }
    } else {
        print!("{}", formatted);
    }

    Ok(())
}

/// Check a single file
fn check_file(path: &Path) -> sqlcanon::Result<bool> {
    let contents = fs::read_to_string(path)?;
    sqlcanon::check(&contents)
}

fn read_stdin() -> sqlcanon::Result<String> {
    let mut contents = String::new();
    io::stdin().read_to_string(&mut contents)?;
    Ok(contents)
}
