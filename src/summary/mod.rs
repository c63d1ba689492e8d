// 局ごとの集計と対局の集計
pub mod aggregate;
pub mod assemble;

pub use assemble::{assemble_game, decode_hand};
