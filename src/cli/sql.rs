//! Render a FIQL query as parameterized SQL

use super::CliError;
use crate::{
    build,
    builders::sql::{SqlBuilder, SqlOptions, SqlQuery},
    parse,
};

/// Options for the sql command
#[derive(Debug, Clone, Default)]
pub struct SqlCommandOptions {
    pub query: String,
    pub table: String,
    pub select: Vec<String>,
    pub allowed: Option<Vec<String>>,
    pub case_insensitive: bool,
}

pub fn execute_sql(options: &SqlCommandOptions) -> Result<SqlQuery, CliError> {
    let ast = parse(&options.query)?;

    let sql_options = SqlOptions {
        table: options.table.clone(),
        select: options.select.clone(),
        allowed: options.allowed.clone(),
        case_insensitive: options.case_insensitive,
    };

    Ok(build(&ast, &SqlBuilder, &sql_options)?)
}
