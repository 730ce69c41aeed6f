/// Dispatches to the command handler named by the parsed arguments.
///
/// Validation runs when no subcommand is given.
///
/// # Returns
/// - `Ok(CommandResult)` with the command summary and issue totals
/// - `Err` if the command fails (e.g., config not found, conflicting keys)
///
/// # Example
/// ```ignore
/// let args = Arguments::parse();
/// let result = run(&args)?;
/// report::print(&result, &args.common);
/// ```
use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, add_missing::add_missing, format::format, highlight::highlight,
        print_missing::print_missing, remove_extraneous::remove_extraneous, rename::rename,
        sort::sort, validate::validate,
    },
};

pub fn run(Arguments { common, command }: &Arguments) -> Result<CommandResult> {
    match command {
        None | Some(Command::Validate) => validate(common),
        Some(Command::PrintMissing) => print_missing(common),
        Some(Command::AddMissing) => add_missing(common),
        Some(Command::RemoveExtraneous) => remove_extraneous(common),
        Some(Command::Sort) => sort(common),
        Some(Command::Rename(args)) => rename(common, args),
        Some(Command::Format(args)) => format(common, args),
        Some(Command::Highlight(args)) => highlight(common, args),
        Some(Command::Init) => bail!("init is handled before run()"),
    }
}
