//! GBCE Runner
//!
//! Wires the sample market together and walks through every metric:
//!
//! - **Bootstrap**: load listings and start the exchange service
//! - **Demo**: record sample trades and collect yield, P/E, VWSP and the
//!   All Share Index
//! - **Report**: render the collected figures for the terminal

pub mod bootstrap;
pub mod demo;
pub mod report;

pub use bootstrap::{BootstrapConfig, MarketBootstrap};
pub use demo::{DemoReport, run_demo};
