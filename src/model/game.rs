use super::*;

// 記事1件分の対局の集計
// 席の名前, 最終持ち点, トップは最後の局から算出する
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub title: String,
    pub hands: Vec<Hand>,
    pub names: Option<[String; SEAT]>,
    pub points: [Option<Score>; SEAT],
    pub first: Option<Vec<String>>, // 最終持ち点が最大のプレイヤー (同点は全員)
}

impl Game {
    // トップの名前を,区切りで返却
    pub fn first_joined(&self) -> Option<String> {
        self.first.as_ref().map(|f| f.join(","))
    }
}
