mod config;
#[cfg(unix)]
mod pipeline;
