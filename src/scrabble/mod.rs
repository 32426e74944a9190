pub mod bag;
pub mod dictionary;
pub mod letter_set;
pub mod probability;
pub mod rack;
pub mod spelling;
pub mod tables;
pub mod tile;
pub mod word_search;
