use crate::args::ValidateArgs;
use crate::error::CliError;
use crate::output;
use crate::source;
use crate::style::Style;
use crate::ui::Ui;
use slipway_core::{commands, ValidationError};

pub fn run(args: &ValidateArgs) -> Result<(), CliError> {
    let script = source::read_script(&args.script)?;
    let statements = commands::validate(&script).map_err(map_validation_error)?;

    let ui = Ui::new(Style::detect());
    output::line(ui.ok_line("script passed safety checks"));
    output::line(ui.kv("statements", &statements.to_string()));
    Ok(())
}

pub fn map_validation_error(err: ValidationError) -> CliError {
    let action = match err {
        ValidationError::EmptyScript => "Provide a script with at least one statement.",
        ValidationError::DangerousOperation { .. } => {
            "Remove the flagged operation; it cannot be applied through slipway."
        }
    };

    CliError::user_error("SQL validation failed")
        .with_reason(err.to_string())
        .with_meaning("The script was rejected before connecting to any database.")
        .with_action(action)
}
