pub mod answer;
pub mod conditions;
pub mod frames;
pub mod status;
pub mod word;
