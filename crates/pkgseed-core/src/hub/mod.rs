//! Repository references on the trusted model hub.
//!
//! This module turns user input into a validated `owner/name` reference:
//! - Dataset short form (`datasets/owner/name`)
//! - Hub URLs, with or without a scheme (`https://huggingface.co/owner/name`)
//! - Model short form (`owner/name`)

mod parser;
mod spec;

pub use parser::{ReferenceError, TRUSTED_HOST, is_two_segment, parse_reference};
pub use spec::{RepositoryKind, RepositoryReference};
