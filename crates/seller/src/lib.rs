mod domain;
mod infra;
mod run;
#[cfg(test)]
mod tests;
mod util;

pub use self::run::{run, start};
