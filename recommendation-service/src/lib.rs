//! HTTP service recommending exercises from a pre-trained model and diets from
//! a text-generation provider.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
