pub mod add;
pub mod config;
pub mod dates;
pub mod list;
pub mod login;
pub mod logout;
pub mod note;
pub mod pull;
pub mod push;
pub mod rm;
pub mod status;
pub mod theme;
pub mod token;
pub mod watch;
