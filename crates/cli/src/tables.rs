use crate::args::{ConnectionArgs, TablesArgs};
use crate::error::{map_connection_error, CliError};
use crate::output;
use crate::style::Style;
use crate::target;
use crate::ui::Ui;
use slipway_core::{runtime, PoolConfig};

pub async fn run(args: &TablesArgs, connection: &ConnectionArgs) -> Result<(), CliError> {
    let target = target::resolve(connection)?;
    let config = PoolConfig::from_env();

    let tables = runtime::list_tables(&target, &config, args.counts)
        .await
        .map_err(|err| map_connection_error(err, &target))?;

    let ui = Ui::new(Style::detect());
    for line in ui.header(&format!("Public tables ({})", tables.len())) {
        output::line(line);
    }
    for table in &tables {
        let count = table.row_count.map(|n| n.to_string());
        output::line(ui.list_item(&table.name, count.as_deref()));
    }
    Ok(())
}
