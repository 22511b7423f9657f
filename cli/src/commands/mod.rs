pub mod countdown;
pub mod monitor;
pub mod ports;
