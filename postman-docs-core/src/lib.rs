#![doc = "postman-docs-core: core logic library for postman-docs."]

//! This crate contains the collection model, page generation and synchronisation logic.
//! No transport code lives here: the remote documentation host is reached through the
//! [`contract::PagePublisher`] trait, implemented by the CLI crate.
//!
//! # Pipeline
//! [`collection::Collection`] → [`generate::generate`] → [`synchronise::synchronise`]
//! → [`manifest::SlugManifest`] saved for the next run.

pub mod collection;
pub mod contract;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod render;
pub mod slug;
pub mod synchronise;
