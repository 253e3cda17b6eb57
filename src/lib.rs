pub mod chart;
pub mod config;
pub mod controller;
pub mod editor;
pub mod error;
pub mod event;
pub mod export;
pub mod gate;
pub mod input;
pub mod ledger;
pub mod model;
pub mod sim;
pub mod ui;
