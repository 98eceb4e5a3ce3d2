use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::term::termcolor::ColorChoice;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use fxlang::pipeline::{Analysis, Pipeline};
use fxlang::rates::RateTable;
use fxlang::render;
use fxlang::vocabulary::{Locale, Vocabulary};

#[derive(Parser)]
#[command(name = "fxlang")]
#[command(author, version, about = "Translate currency conversion sentences", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Grammar and currency spellings to use
    #[arg(long, global = true, value_enum, default_value = "en")]
    locale: LocaleArg,

    /// JSON rate table to use instead of the built-in fallback rates
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LocaleArg {
    /// convert 100 DollarUSA to Euro $
    #[value(name = "en")]
    En,
    /// convertir 100 DolarEstadounidense a Euro $
    #[value(name = "es")]
    Es,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::En => Locale::En,
            LocaleArg::Es => Locale::Es,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the token table for a sentence
    Tokens {
        /// Words of the sentence (quote `$` for your shell)
        #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
        words: Vec<String>,
    },

    /// Check a sentence and show its syntax tree
    Tree {
        #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
        words: Vec<String>,
    },

    /// Check a sentence and perform the conversion
    Convert {
        /// Also print the token table
        #[arg(long)]
        show_tokens: bool,

        /// Also print the syntax tree
        #[arg(long)]
        show_tree: bool,

        #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
        words: Vec<String>,
    },

    /// Build the canonical sentence for an amount and two currencies
    Compose {
        #[arg(long, allow_hyphen_values = true)]
        amount: String,

        /// Source currency spelling
        #[arg(long)]
        from: String,

        /// Target currency spelling
        #[arg(long)]
        to: String,

        /// Convert the composed sentence instead of just printing it
        #[arg(long)]
        run: bool,
    },

    /// List the supported currencies
    Currencies,

    /// Start an interactive session
    Repl,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins unless --verbose is given
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let vocabulary = Vocabulary::for_locale(cli.locale.into());
    log::debug!("using locale {}", vocabulary.locale());

    let result = match cli.command {
        Commands::Tokens { words } => tokens(&vocabulary, &words.join(" "), cli.format),
        Commands::Tree { words } => tree(&vocabulary, &words.join(" "), cli.format),
        Commands::Convert {
            show_tokens,
            show_tree,
            words,
        } => load_rates(cli.rates.as_ref()).and_then(|rates| {
            let options = ConvertOptions {
                show_tokens,
                show_tree,
                format: cli.format,
            };
            convert(&vocabulary, &rates, &words.join(" "), options)
        }),
        Commands::Compose {
            amount,
            from,
            to,
            run,
        } => {
            let sentence = vocabulary.compose_sentence(&amount, &from, &to);
            if run {
                load_rates(cli.rates.as_ref()).and_then(|rates| {
                    let options = ConvertOptions {
                        show_tokens: false,
                        show_tree: false,
                        format: cli.format,
                    };
                    convert(&vocabulary, &rates, &sentence, options)
                })
            } else {
                println!("{}", sentence);
                Ok(())
            }
        }
        Commands::Currencies => currencies(&vocabulary, cli.format),
        Commands::Repl => load_rates(cli.rates.as_ref()).and_then(|rates| repl(&vocabulary, &rates)),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn load_rates(path: Option<&PathBuf>) -> Result<RateTable> {
    match path {
        Some(path) => RateTable::from_path(path)
            .with_context(|| format!("Failed to load rate table: {:?}", path)),
        None => {
            log::info!("using built-in fallback rates");
            Ok(RateTable::fallback())
        }
    }
}

#[derive(Clone, Copy)]
struct ConvertOptions {
    show_tokens: bool,
    show_tree: bool,
    format: OutputFormat,
}

fn tokens(vocabulary: &Vocabulary, sentence: &str, format: OutputFormat) -> Result<()> {
    let pipeline = Pipeline::new(sentence, vocabulary);
    let tokens = pipeline.tokenize();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tokens)?),
        OutputFormat::Text => print!("{}", render::token_table(&tokens, vocabulary)),
    }
    Ok(())
}

fn tree(vocabulary: &Vocabulary, sentence: &str, format: OutputFormat) -> Result<()> {
    let mut pipeline = Pipeline::new(sentence, vocabulary);
    let analysis = pipeline.run(None);

    let Some(tree) = analysis.tree.as_ref() else {
        pipeline.report_errors(ColorChoice::Auto)?;
        anyhow::bail!("Sentence rejected");
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tree)?),
        OutputFormat::Text => print!("{}", tree.pretty()),
    }
    Ok(())
}

fn convert(
    vocabulary: &Vocabulary,
    rates: &RateTable,
    sentence: &str,
    options: ConvertOptions,
) -> Result<()> {
    let mut pipeline = Pipeline::new(sentence, vocabulary);
    let analysis = pipeline.run(Some(rates));

    if options.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis, vocabulary, options);
    }

    if pipeline.state().has_errors() {
        pipeline.report_errors(ColorChoice::Auto)?;
        if analysis.accepted() {
            anyhow::bail!("Conversion failed");
        }
        anyhow::bail!("Sentence rejected");
    }
    Ok(())
}

fn print_analysis(analysis: &Analysis, vocabulary: &Vocabulary, options: ConvertOptions) {
    if options.show_tokens {
        println!("{}", "=== Tokens ===".blue().bold());
        print!("{}", render::token_table(&analysis.tokens, vocabulary));
        println!();
    }

    if options.show_tree {
        if let Some(tree) = &analysis.tree {
            println!("{}", "=== Tree ===".blue().bold());
            print!("{}", tree.pretty());
            println!();
        }
    }

    if let Some(conversion) = &analysis.conversion {
        print!("{}", render::conversion_summary(conversion));
    }
}

fn currencies(vocabulary: &Vocabulary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let table: Vec<_> = vocabulary
                .iter()
                .map(|(spelling, descriptor)| serde_json::json!({ "spelling": spelling, "currency": descriptor }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        OutputFormat::Text => print!("{}", render::currency_list(vocabulary)),
    }
    Ok(())
}

fn repl(vocabulary: &Vocabulary, rates: &RateTable) -> Result<()> {
    println!("{}", "fxlang REPL".blue().bold());
    println!(
        "Example: {}",
        vocabulary.compose_sentence("100", first_spelling(vocabulary, 0), first_spelling(vocabulary, 2))
    );
    println!("Type ':quit' or ':q' to exit, ':help' for help\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line_number = 1;

    loop {
        print!("fx:{:03}> ", line_number);
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            println!();
            break;
        }
        let input = input.trim();

        match input {
            ":quit" | ":q" => {
                println!("Goodbye!");
                break;
            }
            ":help" | ":h" => {
                println!("REPL commands:");
                println!("  :quit, :q         Exit the REPL");
                println!("  :help, :h         Show this help message");
                println!("  :currencies, :c   List the supported currencies");
                println!(
                    "\nEnter a sentence such as `{}`.",
                    vocabulary.compose_sentence("<amount>", "<from>", "<to>")
                );
                continue;
            }
            ":currencies" | ":c" => {
                print!("{}", render::currency_list(vocabulary));
                continue;
            }
            "" => continue,
            _ => {}
        }

        let mut pipeline = Pipeline::new(input, vocabulary);
        let analysis = pipeline.run(Some(rates));
        match &analysis.conversion {
            Some(conversion) => print!("{}", render::conversion_summary(conversion)),
            None => {
                if let Err(e) = pipeline.report_errors(ColorChoice::Auto) {
                    eprintln!("{}: {}", "error".red(), e);
                }
            }
        }

        line_number += 1;
    }

    Ok(())
}

fn first_spelling(vocabulary: &Vocabulary, index: usize) -> &str {
    vocabulary.iter().nth(index).map(|(spelling, _)| spelling).unwrap_or("")
}
