#![allow(non_upper_case_globals)]

pub mod common;
pub mod layout_engine;
pub mod model;
pub mod sys;
