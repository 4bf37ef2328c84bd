/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::stdin;
use std::process::ExitCode;

use tagtree::Cursor;
use tagtree::Document;
use tagtree::DocumentError;
use tagtree::LogObserver;
use tagtree::NameTable;
use tagtree::ParserOptions;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

fn print_version() {
    println!("ttlint (tagtree) v{}", VERSION);
}

fn print_usage() {
    println!(
        concat!(
            "Usage: ttlint [OPTIONS] [FILE...]\n",
            "This tool checks tag tree documents and reports on their contents.\n",
            "Options:\n",
            "  -s, --stat              Overall statistics\n",
            "  -c, --count             Element name counts\n",
            "  -d, --dump              Print the parsed tree\n",
            "  -f, --find <NAME>       Print every element with the given name\n",
            "      --depth <N>         Search depth limit for --find (default: unlimited)\n",
            "  -e, --elements <FILE>   Element name table, one name per line\n",
            "  -a, --attributes <FILE> Attribute name table, one name per line\n",
            "      --static-names      Reject element names missing from the table\n",
            "      --max-name <N>      Longest accepted name (default: {})\n",
            "      --max-value <N>     Longest accepted value or text run (default: {})\n",
            "  -1, --bytewise          Feed the input one byte at a time\n",
            "  -b, --buffer <SIZE>     File read buffer size in bytes (default: {})\n",
            "  -V, --verbose           Log parser events to stderr\n",
            "  -h, --help              Display this help message and exit\n",
            "  -v, --version           Display the version and exit"
        ),
        tagtree::DEFAULT_MAX_NAME_LENGTH,
        tagtree::DEFAULT_MAX_VALUE_LENGTH,
        DEFAULT_BUFFER_SIZE
    );
}

enum LinterError {
    IoError(std::io::Error),
    DocumentError(DocumentError),
}

impl From<std::io::Error> for LinterError {
    fn from(err: std::io::Error) -> Self {
        LinterError::IoError(err)
    }
}

impl From<DocumentError> for LinterError {
    fn from(err: DocumentError) -> Self {
        LinterError::DocumentError(err)
    }
}

#[derive(Default)]
struct Report {
    do_stats: bool,
    do_count: bool,
    do_dump: bool,
    find: Option<String>,
    find_depth: usize,
}

#[derive(Default)]
struct Stats {
    nr_roots: usize,
    nr_elements: usize,
    nr_attributes: usize,
    nr_text_runs: usize,
    text_size: usize,
    max_depth: usize,
    counts: BTreeMap<String, usize>,
}

impl Stats {
    fn collect(doc: &Document<'_>) -> Stats {
        let mut stats = Stats::default();
        let mut stack: Vec<(Cursor<'_>, usize)> = doc.roots().map(|root| (root, 1)).collect();
        stats.nr_roots = stack.len();
        while let Some((element, depth)) = stack.pop() {
            stats.nr_elements += 1;
            stats.max_depth = stats.max_depth.max(depth);
            stats.nr_attributes += element.attributes().count();
            for run in element.text_runs() {
                stats.nr_text_runs += 1;
                stats.text_size += run.len();
            }
            *stats.counts.entry(element.name().to_string()).or_insert(0) += 1;
            stack.extend(element.children().map(|child| (child, depth + 1)));
        }
        stats
    }
}

struct Linter<'n> {
    element_names: NameTable<'n>,
    attribute_names: NameTable<'n>,
    options: ParserOptions,
    buffer_size: usize,
    bytewise: bool,
    report: Report,
}

impl<'n> Linter<'n> {
    fn parse_file(
        &self,
        doc: &mut Document<'n>,
        file: &str,
        is_stream: bool,
    ) -> Result<(), LinterError> {
        let mut f: Box<dyn Read> = if is_stream {
            Box::new(stdin())
        } else {
            Box::new(File::open(file)?)
        };
        let mut buffer = vec![0u8; self.buffer_size];
        loop {
            let bytes_read = f.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            if self.bytewise {
                for byte in buffer[..bytes_read].chunks(1) {
                    doc.append(byte)?;
                }
            } else {
                doc.append(&buffer[..bytes_read])?;
            }
        }
        Ok(doc.finalize()?)
    }

    fn print_report(&self, doc: &Document<'_>) -> Result<(), DocumentError> {
        if self.report.do_stats || self.report.do_count {
            let stats = Stats::collect(doc);
            if self.report.do_stats {
                println!(
                    "Root elements: {}, elements: {}, attributes: {}, max depth: {}",
                    stats.nr_roots, stats.nr_elements, stats.nr_attributes, stats.max_depth
                );
                println!(
                    "Text runs: {}, total size of text: {} bytes.",
                    stats.nr_text_runs, stats.text_size
                );
                let arena = doc.arena_stats();
                println!(
                    "Element storage: {} of {} slots, {} bytes.",
                    arena.nr_items, arena.capacity, arena.allocated_bytes
                );
            }
            if self.report.do_count {
                println!("Element counts:");
                for (name, count) in stats.counts.iter() {
                    println!("  {}: {}", name, count);
                }
            }
        }
        if self.report.do_dump {
            print!("{}", doc);
        }
        if let Some(name) = &self.report.find {
            let mut found = doc.find_element(None, self.report.find_depth, name)?;
            while !found.is_null() {
                print!("{}", found);
                found = doc.find_next_element(found, self.report.find_depth, name)?;
            }
        }
        Ok(())
    }

    fn lint_file(&self, file: &str, is_stream: bool) -> bool {
        let mut doc = Document::with_options(
            self.element_names,
            self.attribute_names,
            self.options,
        );
        doc.set_observer(LogObserver);
        let result = match self.parse_file(&mut doc, file, is_stream) {
            Ok(()) => self.print_report(&doc).map_err(LinterError::from),
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => true,
            Err(LinterError::IoError(e)) => {
                eprintln!("Error reading file '{}': {}", file, e);
                false
            }
            Err(LinterError::DocumentError(DocumentError::OutOfMemory)) => {
                eprintln!("Memory allocation failed while parsing '{}'", file);
                false
            }
            Err(LinterError::DocumentError(DocumentError::ParseError(msg))) => {
                let location = doc.location();
                eprintln!(
                    "Syntax error in file '{}' at line {} column {}: {}",
                    file, location.lines, location.column, msg
                );
                false
            }
            Err(LinterError::DocumentError(err)) => {
                eprintln!("Error in file '{}': {}", file, err);
                false
            }
        }
    }
}

fn read_name_file(file: &str) -> Option<String> {
    match fs::read_to_string(file) {
        Ok(text) => Some(text),
        Err(e) => {
            eprintln!("Error reading name table '{}': {}", file, e);
            None
        }
    }
}

fn table_entries(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn parse_number(value: Option<String>, what: &str) -> Option<usize> {
    match value {
        Some(value) => match value.parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => {
                eprintln!("Invalid {}", what);
                None
            }
        },
        None => {
            eprintln!("Missing {}", what);
            None
        }
    }
}

fn main() -> ExitCode {
    let mut args = env::args();

    let mut files = Vec::new();
    let mut report = Report {
        find_depth: usize::MAX,
        ..Report::default()
    };
    let mut element_file = None;
    let mut attribute_file = None;
    let mut options = ParserOptions::new();
    let mut buffer_size = DEFAULT_BUFFER_SIZE;
    let mut bytewise = false;
    let mut verbose = false;

    // Skip the first argument (program name)
    args.next();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-s" | "--stat" => {
                report.do_stats = true;
            }
            "-c" | "--count" => {
                report.do_count = true;
            }
            "-cs" | "-sc" => {
                report.do_stats = true;
                report.do_count = true;
            }
            "-d" | "--dump" => {
                report.do_dump = true;
            }
            "-f" | "--find" => match args.next() {
                Some(name) if !name.is_empty() => report.find = Some(name),
                _ => {
                    eprintln!("Missing element name");
                    return ExitCode::FAILURE;
                }
            },
            "--depth" => match parse_number(args.next(), "search depth") {
                Some(depth) => report.find_depth = depth,
                None => return ExitCode::FAILURE,
            },
            "-e" | "--elements" => match args.next() {
                Some(file) => element_file = Some(file),
                None => {
                    eprintln!("Missing element name table");
                    return ExitCode::FAILURE;
                }
            },
            "-a" | "--attributes" => match args.next() {
                Some(file) => attribute_file = Some(file),
                None => {
                    eprintln!("Missing attribute name table");
                    return ExitCode::FAILURE;
                }
            },
            "--static-names" => {
                options = options.with_dynamic_names(false);
            }
            "--max-name" => match parse_number(args.next(), "name length") {
                Some(n) => options = options.with_max_name_length(n),
                None => return ExitCode::FAILURE,
            },
            "--max-value" => match parse_number(args.next(), "value length") {
                Some(n) => options = options.with_max_value_length(n),
                None => return ExitCode::FAILURE,
            },
            "-1" | "--bytewise" => {
                bytewise = true;
            }
            "-b" | "--buffer" => match parse_number(args.next(), "buffer size") {
                Some(size) if size > 0 => buffer_size = size,
                Some(_) => {
                    eprintln!("Invalid buffer size");
                    return ExitCode::FAILURE;
                }
                None => return ExitCode::FAILURE,
            },
            "-V" | "--verbose" => {
                verbose = true;
            }
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                print_version();
                return ExitCode::SUCCESS;
            }
            _ => {
                files.push(arg);
            }
        }
    }

    let level = if verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let element_text = match element_file.as_deref().map(read_name_file) {
        Some(None) => return ExitCode::FAILURE,
        Some(Some(text)) => text,
        None => String::new(),
    };
    let attribute_text = match attribute_file.as_deref().map(read_name_file) {
        Some(None) => return ExitCode::FAILURE,
        Some(Some(text)) => text,
        None => String::new(),
    };
    let element_entries = table_entries(&element_text);
    let attribute_entries = table_entries(&attribute_text);

    let linter = Linter {
        element_names: NameTable::new(&element_entries),
        attribute_names: NameTable::new(&attribute_entries),
        options,
        buffer_size,
        bytewise,
        report,
    };
    if files.is_empty() {
        if !linter.lint_file("stdin", true) {
            return ExitCode::FAILURE;
        }
    } else {
        for file in files {
            if !linter.lint_file(&file, false) {
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
