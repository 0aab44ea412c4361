//! Store operations

mod get;
mod misc;
mod remove;
mod set;
