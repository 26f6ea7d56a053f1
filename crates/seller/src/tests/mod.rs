mod cases;
pub mod setup;
