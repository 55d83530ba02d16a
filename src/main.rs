
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;
extern crate thiserror;

pub mod compiler;
mod toolchain;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::path::Path;

use compiler::command::CommandTable;

/// Source files carry this suffix; it is appended to the input path
/// when absent and stripped to name the output executable.
const SOURCE_SUFFIX: &str = ".scl";

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tEmit asm only: {}\n\tOutfile: {}\n\tInfile: {}",
        match args.occurrences_of("verbose") {
            0 => log::LevelFilter::Error.to_string(),
            1 => log::LevelFilter::Warn.to_string(),
            2 => log::LevelFilter::Info.to_string(),
            3 | _ => log::LevelFilter::Debug.to_string(),
        },
        args.is_present("emit-asm"),
        args.value_of("output").unwrap_or("None"),
        args.value_of("INPUT").unwrap()
    );

    let input = args.value_of("INPUT").unwrap();
    let source_path = if input.ends_with(SOURCE_SUFFIX) {
        input.to_string()
    } else {
        format!("{}{}", input, SOURCE_SUFFIX)
    };

    let source = match std::fs::read_to_string(&source_path) {
        Ok(content) => content,
        Err(err) => fatal(format!("unable to read source file `{}`: {}", source_path, err)),
    };

    let table = CommandTable::standard();

    let tokens = match compiler::lexer::scan(&source) {
        Ok(tokens) => tokens,
        Err(err) => fatal(err.to_string()),
    };

    if args.is_present("print-debug") {
        let mut grid = Grid::new(GridOptions {
            filling:     Filling::Spaces(1),
            direction:   Direction::LeftToRight,
        });

        for (idx, token) in tokens.iter().enumerate() {
            grid.add(Cell::from(format!("{:04}:", idx)));
            grid.add(Cell::from(token.keyword.spelling().to_string()));
            grid.add(Cell::from(format!("{}", token.at)));
        }

        println!("{}", grid.fit_into_columns(3));
    }

    let fragments = match compiler::parser::Parser::new(tokens, &table).run() {
        Ok(fragments) => fragments,
        Err(err) => fatal(err.to_string()),
    };

    let program = compiler::codegen::assemble(&fragments);

    if args.is_present("emit-asm") {
        print!("{}", program);
        return;
    }

    let out_name = match args.value_of("output") {
        Some(name) => name.to_string(),
        None => input.strip_suffix(SOURCE_SUFFIX).unwrap_or(input).to_string(),
    };

    if let Err(err) = toolchain::build(&program, Path::new(&out_name)) {
        fatal(err.to_string());
    }
}

/// Prints the red fatal-error line to stderr and exits with status 1.
fn fatal(message: String) -> ! {
    eprintln!("\x1b[0;31mError: {}\x1b[0m", message);
    std::process::exit(1);
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap())
        .version(option_env!("CARGO_PKG_VERSION").unwrap())
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap())
        .arg(Arg::with_name("INPUT")
            .help("Sets the input source file (.scl appended if missing)")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("name the output executable"))
        .arg(Arg::with_name("emit-asm")
            .short("S")
            .takes_value(false)
            .help("stop after code generation and print the assembly to STDOUT"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints the token stream alongside compilation to STDOUT"))
        .get_matches()
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 | _ => log::LevelFilter::Debug,
        })
        .chain(std::io::stdout())
        .apply().ok();
}
