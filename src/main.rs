use clap::{Parser as ClapParser, Subcommand};
use fiql::cli::{
    self, CheckOptions, CheckResult, CliError, FilterOptions, SqlCommandOptions,
};
use fiql::parser::{DEFAULT_MAX_DEPTH, ParserConfig};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "fiql")]
#[command(about = "fiql - Parse FIQL filters and translate them into other query forms")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the syntax of a FIQL query
    Check {
        /// The FIQL query
        query: String,

        /// Maximum nesting depth of the expression tree
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Print the syntax tree of a FIQL query as JSON
    Parse {
        query: String,

        #[arg(short, long)]
        pretty: bool,

        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Filter JSON documents with a FIQL query
    Filter {
        query: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        #[arg(short, long)]
        pretty: bool,

        /// Compare strings ignoring case
        #[arg(long)]
        ignore_case: bool,

        /// Permitted selector (repeatable)
        #[arg(long = "allow")]
        allow: Vec<String>,
    },

    /// Render a FIQL query as parameterized SQL
    Sql {
        query: String,

        #[arg(short, long)]
        table: String,

        /// Selected column (repeatable, defaults to *)
        #[arg(short, long = "select")]
        select: Vec<String>,

        /// Permitted selector (repeatable)
        #[arg(long = "allow")]
        allow: Vec<String>,

        #[arg(long)]
        ignore_case: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'fiql docs' to list categories)
        category: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { query, max_depth } => run_check(query, false, false, max_depth),
        Commands::Parse {
            query,
            pretty,
            max_depth,
        } => run_check(query, true, pretty, max_depth),
        Commands::Filter {
            query,
            input,
            pretty,
            ignore_case,
            allow,
        } => run_filter(query, input, pretty, ignore_case, allow),
        Commands::Sql {
            query,
            table,
            select,
            allow,
            ignore_case,
        } => run_sql(query, table, select, allow, ignore_case),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn allow_list(allow: Vec<String>) -> Option<Vec<String>> {
    if allow.is_empty() { None } else { Some(allow) }
}

fn run_check(query: String, print_tree: bool, pretty: bool, max_depth: usize) -> Result<(), CliError> {
    let options = CheckOptions {
        query,
        print_tree,
        pretty,
        parser: ParserConfig {
            max_depth,
            ..ParserConfig::default()
        },
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Tree(json) => println!("{}", json),
    }
    Ok(())
}

fn run_filter(
    query: String,
    input: Option<String>,
    pretty: bool,
    ignore_case: bool,
    allow: Vec<String>,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = FilterOptions {
        query,
        input,
        case_insensitive: ignore_case,
        allowed: allow_list(allow),
    };

    let output = cli::execute_filter(&options)?;
    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", json);
    Ok(())
}

fn run_sql(
    query: String,
    table: String,
    select: Vec<String>,
    allow: Vec<String>,
    ignore_case: bool,
) -> Result<(), CliError> {
    let options = SqlCommandOptions {
        query,
        table,
        select,
        allowed: allow_list(allow),
        case_insensitive: ignore_case,
    };

    let query = cli::execute_sql(&options)?;
    println!("{}", query.sql);
    if !query.params.is_empty() {
        println!("{}", serde_json::to_string(&query.params)?);
    }
    Ok(())
}
