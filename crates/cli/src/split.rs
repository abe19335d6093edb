use crate::args::SplitArgs;
use crate::error::CliError;
use crate::output;
use crate::source;
use crate::style::Style;
use crate::ui::Ui;
use serde::Serialize;
use slipway_core::{commands, SqlStatement};

#[derive(Debug, Serialize)]
struct StatementView<'a> {
    ordinal: usize,
    sql: &'a str,
}

pub fn run(args: &SplitArgs) -> Result<(), CliError> {
    let script = source::read_script(&args.script)?;
    let statements = commands::split(&script);

    if args.json {
        let views: Vec<StatementView<'_>> = statements.iter().map(view).collect();
        return output::json(&views);
    }

    let ui = Ui::new(Style::detect());
    for line in ui.header(&format!("Statements ({})", statements.len())) {
        output::line(line);
    }
    for stmt in &statements {
        output::line(format!("-- [{}]", stmt.ordinal));
        output::line(format!("{};", stmt.sql));
    }
    Ok(())
}

fn view(stmt: &SqlStatement) -> StatementView<'_> {
    StatementView {
        ordinal: stmt.ordinal,
        sql: &stmt.sql,
    }
}
