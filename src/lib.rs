mod exports;
pub use exports::*;

pub mod error;
pub mod sinogram;
pub mod histogram;
pub mod modulation;
pub mod utils;
pub mod io;
pub mod export;
pub mod config;
