use anyhow::Result;

use crate::Commands;

mod catalog;
mod config;
mod dispatch;

pub(super) fn handle_command(command: Commands) -> Result<()> {
    dispatch::handle_command(command)
}
