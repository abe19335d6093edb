pub mod apply;
pub mod args;
pub mod error;
pub mod error_view;
pub mod output;
pub mod source;
pub mod split;
pub mod style;
pub mod tables;
pub mod target;
pub mod ui;
pub mod validate;

pub use args::{ApplyArgs, Cli, Command, ConnectionArgs, SplitArgs, TablesArgs, ValidateArgs};
pub use error::CliError;

pub async fn run(cli: Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Apply(args) => apply::run(args, &cli.connection).await,
        Command::Split(args) => split::run(args),
        Command::Validate(args) => validate::run(args),
        Command::Tables(args) => tables::run(args, &cli.connection).await,
    }
}
