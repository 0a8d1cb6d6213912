pub mod columns;
pub mod init;
pub mod run;
pub mod show;
