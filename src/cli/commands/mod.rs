pub mod generate;
pub mod helper;
pub mod init;
pub mod manifest;
pub mod validate;

mod command_result;

pub use command_result::*;
