use anyhow::Result;

pub mod actions;
pub mod args;
pub mod commands;
pub mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command, CommonArgs};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    if matches!(args.command, Some(Command::Init)) {
        return commands::init::init();
    }

    let result = run::run(&args)?;
    report::print(&result, &args.common);

    Ok(result.exit_status())
}
