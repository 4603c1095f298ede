//! Test discovery and error tracing for PML, the macro language of a CAD
//! host application.

#[macro_use]
mod regex;

pub mod discovery;
pub mod host;
pub mod language;
pub mod output;
pub mod parsing;
pub mod problem;
pub mod rendering;
pub mod resolving;
pub mod scanning;
pub mod stack;
