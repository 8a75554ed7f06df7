pub mod clock;
pub mod dir;
pub mod logging;
pub mod name;
pub mod time;
