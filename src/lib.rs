//! flyover - Generate randomized Google Earth KML camera flythrough tours

pub mod boundary;
pub mod config;
pub mod domain;
pub mod geometry;
pub mod tour;
