pub mod ma_crossover;
pub mod score;
