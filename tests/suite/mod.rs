mod config;
mod staleness;
mod workbench;
