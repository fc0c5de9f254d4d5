#![allow(dead_code)]

pub mod event;
pub mod harness;
pub mod listener;
pub mod transport;
pub mod ws;
