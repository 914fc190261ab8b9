pub mod init;
pub mod play;
pub mod scores;
pub mod validate;
