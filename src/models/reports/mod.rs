pub mod dataset;
pub mod entities;
pub mod requests;
pub mod responses;
