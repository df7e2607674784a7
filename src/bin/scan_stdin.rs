//! Reads HTML from a file or stdin and prints the scan result as JSON.
//!
//! Usage: `scan_stdin [--url <page-url>] [file]`

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use ref_tracker::{scan_bytes, Options};

fn main() {
    let mut options = Options::default();
    let mut path = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => match args.next() {
                Some(url) => options.page_url = Some(url),
                None => {
                    eprintln!("--url needs a value");
                    process::exit(2);
                }
            },
            _ => path = Some(arg),
        }
    }

    let html = match path {
        Some(path) => fs::read(&path),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).map(|_| buf)
        }
    };
    let html = match html {
        Ok(html) => html,
        Err(err) => {
            eprintln!("Failed to read input: {err}");
            process::exit(1);
        }
    };

    let result = scan_bytes(&html, &options);
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Failed to encode result: {err}");
            process::exit(1);
        }
    }
}
