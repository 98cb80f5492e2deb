use super::args::*;
use crate::exit_codes;

pub mod init;
pub mod lookup;
pub(crate) mod scoring;
pub mod upload;
pub mod verify;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Verify(args) => verify::run(args),
        Command::Upload(args) => upload::run(args),
        Command::Lookup(args) => lookup::run(args),
        Command::Init(args) => init::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}
