pub mod classify;
pub mod entry;
pub mod error;
pub mod generate;
pub mod hasher;
pub mod manifest;
pub mod merge;
pub mod scan;
pub mod validate;
pub mod writer;
