pub mod config;
pub mod exercise;
pub mod hold;
pub mod loop_cmd;
pub mod plan;
pub mod profile;
pub mod routine;
pub mod run;
mod session;
