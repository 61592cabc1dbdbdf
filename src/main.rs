use itertools::Itertools as _;
use qcolref::{ColumnRef, Query, Result, config};
use std::{io::Read as _, process::ExitCode};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result {
    let config = config()?;
    let statement = statement()?;
    debug!("Introspecting {statement:?}");

    let query = Query::parse_with(&statement, config)?;
    println!("{}", query.query_type());
    for column in query.columns() {
        println!("{}", describe(column));
    }
    if !query.tables().is_empty() {
        let tables = query
            .tables()
            .iter()
            .map(|t| match t.alias == t.name {
                true => t.name.to_string(),
                false => format!("{} AS {}", t.name, t.alias),
            })
            .join(", ");
        println!("FROM {tables}");
    }
    Ok(())
}

/// The statement from the command line arguments, or stdin when there are none.
fn statement() -> Result<String> {
    let args = std::env::args().skip(1).join(" ");
    if !args.trim().is_empty() {
        return Ok(args);
    }
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

fn describe(column: &ColumnRef<'_>) -> String {
    let source = match column.is_qualified() {
        true => format!("{}.{}", column.source_table, column.column_name),
        false => column.column_name.to_string(),
    };
    format!("{}\t<- {source}\t[{}]", column.column_alias, column.reference)
}
