//! # HLASM analysis core
//!
//! Bottom-up module stack: [`token`] lexes operand text, [`operand`]
//! classifies it into closed-variant shapes, [`statement`] splits a raw
//! line into fields and assembles a document's statement stream,
//! [`symbols`] collects register declarations and labels from that
//! stream, [`diagnostics`] checks register-type usage against it, and
//! [`state`] ties parsing, symbol collection and diagnostics together into
//! one pure `analyse` call. [`catalogue`] is the only piece that touches
//! disk, loading the macro/field knowledge base once at startup.
//! [`hovers`], [`completions`] and [`navigation`] are the read-only query
//! providers the controller answers editor requests with; [`controller`]
//! is the single stateful piece, and [`cli`] is the binary's argument/
//! logging bootstrap.

pub mod catalogue;
pub mod cli;
pub mod completions;
pub mod controller;
pub mod diagnostics;
pub mod hovers;
pub mod navigation;
pub mod operand;
pub mod scan;
pub mod state;
pub mod statement;
pub mod symbols;
pub mod token;
