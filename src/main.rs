use std::env;
use std::fs;
use std::process;

use log::info;
use tonejson::{convert_with_options, ConvertOptions, NoteSequence};

const USAGE: &str = "Usage: tonejson [--options <options.yaml>] <input.json> [output.json]";

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("{}", USAGE);
        process::exit(1);
    }

    let mut positional = &args[1..];
    let mut options_path: Option<&String> = None;

    // Parse flags
    if args[1] == "--options" {
        if args.len() < 4 {
            eprintln!("{}", USAGE);
            process::exit(1);
        }
        options_path = Some(&args[2]);
        positional = &args[3..];
    }

    let input_path = &positional[0];
    let output_path = positional.get(1);

    let options = match options_path {
        Some(path) => {
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading options '{}': {}", path, e);
                    process::exit(1);
                }
            };
            match ConvertOptions::from_yaml(&content) {
                Ok(options) => options,
                Err(e) => {
                    eprintln!("{}", e);
                    process::exit(1);
                }
            }
        }
        None => ConvertOptions::default(),
    };

    // Read input file
    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let result = NoteSequence::from_json(&source)
        .and_then(|seq| convert_with_options(&seq, &options));

    let doc = match result {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Conversion error: {}", e);
            process::exit(1);
        }
    };
    info!(
        "converted {} tracks, {} tempo changes",
        doc.tracks.len(),
        doc.header.tempos.len()
    );

    // Output
    let json = doc.to_json_pretty();
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote timeline JSON to {}", path);
        }
        None => {
            println!("{}", json);
        }
    }
}
