#![allow(dead_code)]

pub mod messages;
