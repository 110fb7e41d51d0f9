pub mod az_command;
pub mod system_clock;
