mod commands;
mod watch;
