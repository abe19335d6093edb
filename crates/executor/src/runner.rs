use crate::error::{ExecutorError, MigrationFailure};
use crate::mode::ExecutionMode;
use crate::statement;
use crate::transaction;
use slipway_contracts::{MigrationTarget, MigrationTransaction};
use slipway_migration::{script_checksum, validate_script, MigrationResult, Provenance};
use slipway_sql::{split_statements, SqlStatement};
use std::time::Instant;
use tracing::{error, field, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

/// Applies migration scripts to one target, each script inside a single transaction.
///
/// A runner holds no per-run state, so it can apply any number of scripts in turn.
#[derive(Debug, Clone)]
pub struct MigrationRunner<T> {
    target: T,
    mode: ExecutionMode,
}

/// Everything a run knows when it finishes, success or not.
struct RunState {
    started: Instant,
    checksum: String,
    provenance: Provenance,
    attempted: usize,
}

impl<T> MigrationRunner<T>
where
    T: MigrationTarget,
{
    pub fn new(target: T) -> Self {
        Self {
            target,
            mode: ExecutionMode::Apply,
        }
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validates, splits and runs `script` atomically.
    ///
    /// `Ok` carries a successful result. Every failure path rolls back first and
    /// returns the populated result alongside the error.
    pub async fn apply_migration(&self, script: &str) -> Result<MigrationResult, MigrationFailure> {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "migration",
            %run_id,
            mode = %self.mode,
            statements = field::Empty
        );
        self.apply_in_span(script).instrument(span).await
    }

    async fn apply_in_span(&self, script: &str) -> Result<MigrationResult, MigrationFailure> {
        let mut state = RunState {
            started: Instant::now(),
            checksum: script_checksum(script),
            provenance: Provenance::new(),
            attempted: 0,
        };

        if let Err(e) = validate_script(script) {
            let err = ExecutorError::from(e);
            warn!(error = %err, "script rejected before execution");
            return Err(self.failure(state, err));
        }

        let statements = split_statements(script);
        if statements.is_empty() {
            info!("script contains no executable statements");
            return Ok(self.success(state));
        }

        Span::current().record("statements", statements.len());
        info!(
            statements = statements.len(),
            checksum = %state.checksum,
            "applying migration"
        );

        let mut tx = match transaction::begin(&self.target).await {
            Ok(tx) => tx,
            Err(err) => {
                warn!(error = %err, "could not open transaction");
                return Err(self.failure(state, err));
            }
        };

        let outcome = match run_statements(&mut tx, &statements, &mut state).await {
            Err(err) => {
                warn!(
                    error = %err,
                    statement = err.statement_ordinal(),
                    "statement failed, rolling back"
                );
                match transaction::rollback(tx, Some(&err)).await {
                    Ok(()) => Err(err),
                    Err(rollback_err) => {
                        error!(error = %rollback_err, "rollback failed");
                        Err(rollback_err)
                    }
                }
            }
            Ok(()) if self.mode.is_dry_run() => {
                let rolled_back = transaction::rollback(tx, None).await;
                if let Err(rollback_err) = &rolled_back {
                    error!(error = %rollback_err, "dry run rollback failed");
                }
                rolled_back
            }
            Ok(()) => transaction::commit(tx).await,
        };

        match outcome {
            Ok(()) => {
                let result = self.success(state);
                info!(
                    tables_created = result.tables_created.len(),
                    rows_inserted = result.rows_inserted,
                    elapsed_ms = statement::duration_ms(result.execution_time),
                    dry_run = result.dry_run,
                    "migration finished"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(error = %err, "migration failed");
                Err(self.failure(state, err))
            }
        }
    }

    fn success(&self, state: RunState) -> MigrationResult {
        let (tables_created, rows_inserted) = state.provenance.into_parts();
        MigrationResult {
            success: true,
            dry_run: self.mode.is_dry_run(),
            tables_created,
            rows_inserted,
            execution_time: state.started.elapsed(),
            error: None,
            statements_run: state.attempted,
            script_checksum: state.checksum,
        }
    }

    fn failure(&self, state: RunState, error: ExecutorError) -> MigrationFailure {
        let (tables_created, rows_inserted) = state.provenance.into_parts();
        let result = MigrationResult {
            success: false,
            dry_run: self.mode.is_dry_run(),
            tables_created,
            rows_inserted,
            execution_time: state.started.elapsed(),
            error: Some(error.result_message()),
            statements_run: state.attempted,
            script_checksum: state.checksum,
        };
        MigrationFailure::new(result, error)
    }
}

async fn run_statements<X>(
    tx: &mut X,
    statements: &[SqlStatement],
    state: &mut RunState,
) -> Result<(), ExecutorError>
where
    X: MigrationTransaction,
{
    for stmt in statements {
        state.attempted += 1;
        let outcome = statement::execute_statement(tx, stmt).await?;
        state.provenance.record(stmt, &outcome);
    }
    Ok(())
}
