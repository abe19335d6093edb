use crate::args::{ApplyArgs, ConnectionArgs};
use crate::error::{map_connection_error, CliError};
use crate::output;
use crate::source;
use crate::style::Style;
use crate::target;
use crate::ui::Ui;
use crate::validate::map_validation_error;
use slipway_core::{
    commands, runtime, ExecutionMode, ExecutorError, MigrationFailure, MigrationResult,
    PoolConfig, RuntimeError,
};
use tracing::debug;

pub async fn run(args: &ApplyArgs, connection: &ConnectionArgs) -> Result<(), CliError> {
    let script = source::read_script(&args.script)?;
    let statements = commands::validate(&script).map_err(map_validation_error)?;
    debug!(
        script = %args.script.display(),
        bytes = script.len(),
        statements,
        "script loaded"
    );

    let target = target::resolve(connection)?;
    let config = PoolConfig::from_env();
    let mode = if args.dry_run {
        ExecutionMode::DryRun
    } else {
        ExecutionMode::Apply
    };

    match runtime::apply_script(&target, &config, &script, mode).await {
        Ok(result) => {
            if args.json {
                output::json(&result)
            } else {
                print_result(&result);
                Ok(())
            }
        }
        Err(RuntimeError::Connection(err)) => Err(map_connection_error(err, &target)),
        Err(RuntimeError::Migration(failure)) => {
            if args.json {
                output::json(failure.result.as_ref())?;
            }
            Err(map_failure(&failure))
        }
    }
}

fn print_result(result: &MigrationResult) {
    let ui = Ui::new(Style::detect());
    let title = if result.dry_run {
        "Dry run"
    } else {
        "Migration"
    };

    for line in ui.header(title) {
        output::line(line);
    }

    let tables = if result.tables_created.is_empty() {
        "-".to_string()
    } else {
        result.tables_created.join(", ")
    };

    output::line(ui.kv("statements run", &result.statements_run.to_string()));
    output::line(ui.kv("tables created", &tables));
    output::line(ui.kv("rows inserted", &result.rows_inserted.to_string()));
    output::line(ui.kv(
        "execution time",
        &format!("{} ms", result.execution_time.as_millis()),
    ));
    output::line(ui.kv("checksum", &result.script_checksum));
    output::line(ui.rule());

    if result.dry_run {
        output::line(ui.warn_line("all statements succeeded; transaction rolled back"));
    } else if result.statements_run == 0 {
        output::line(ui.info_line("no executable statements; nothing to do"));
    } else {
        output::line(ui.ok_line("committed"));
    }
}

pub fn map_failure(failure: &MigrationFailure) -> CliError {
    let reason = failure
        .result
        .error
        .clone()
        .unwrap_or_else(|| failure.error.to_string());

    match &failure.error {
        ExecutorError::ValidationFailed(_) => CliError::user_error("SQL validation failed")
            .with_reason(reason)
            .with_meaning("The script was rejected before any statement ran.")
            .with_action("Remove the flagged operation from the script."),
        ExecutorError::StatementExecutionFailed {
            statement_ordinal, ..
        } => CliError::migration_failed(format!(
            "Migration failed at statement {statement_ordinal}"
        ))
        .with_reason(reason)
        .with_meaning("The transaction was rolled back. No statement from this script was applied.")
        .with_action(format!(
            "Fix statement {statement_ordinal} and run the whole script again."
        )),
        ExecutorError::TransactionBeginFailed { .. } => {
            CliError::migration_failed("Could not start the migration transaction")
                .with_reason(reason)
                .with_meaning("Nothing was executed.")
        }
        ExecutorError::TransactionCommitFailed { .. } => {
            CliError::migration_failed("Migration commit failed")
                .with_reason(reason)
                .with_meaning("Every statement ran, but the database refused the commit. Nothing was applied.")
                .with_action("Check for concurrent changes to the same objects and retry.")
        }
        ExecutorError::TransactionRollbackFailed { .. } => {
            CliError::migration_failed("Rollback failed after an error")
                .with_reason(reason)
                .with_meaning("The server discards an unfinished transaction when its connection ends.")
                .with_action("Verify the database state before retrying.")
        }
    }
}
