// 牌譜と対局集計のデータモデル
mod define;
mod game;
mod hand;
mod note;
mod round;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use define::*;
pub use game::*;
pub use hand::*;
pub use note::*;
pub use round::*;
