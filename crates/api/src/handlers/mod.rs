pub mod responses;
pub mod survey;
