// 型エイリアス
pub type Seat = usize; // 座席 (0:東家, 1:南家, 2:西家, 3:北家)
pub type Score = i32; // 点数

// Number
pub const SEAT: usize = 4; // 座席の数
