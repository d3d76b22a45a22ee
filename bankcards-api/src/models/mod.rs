//! Request and response models for the HTTP surface

pub mod dto;
pub mod page;
