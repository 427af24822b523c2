//! CLI command implementations.
//!
//! - [`init`] - Write the configuration file
//! - [`streetside`] - Download a Streetside cubemap
//! - [`streetview`] - Download a Street View equirectangular panorama
//! - [`tiles`] - Print tile URLs without downloading

pub mod common;
pub mod init;
pub mod streetside;
pub mod streetview;
pub mod tiles;
