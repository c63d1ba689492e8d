use super::*;

// 牌譜URL1つ分の局情報
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Hand {
    Decoded(DecodedHand),
    Failed(FailedHand),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedHand {
    pub url: String,                   // 元の牌譜URL
    pub names: [String; SEAT],         // 各プレイヤーの名前 (東南西北の順)
    pub start_points: [Score; SEAT],   // 局開始時の持ち点
    pub get_points: [Score; SEAT],     // 局の収支 (結果がない場合は0)
    pub round: Round,                  // 場
    pub hand: u8,                      // 局 (1~4)
    pub homba: u32,                    // 本場
    pub riichi_stick: u32,             // リーチ棒の供託
    pub end_of_a_hand: String,         // 局の終了種別 (和了, 流局など)
}

// デコードに失敗した牌譜URL
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedHand {
    pub url: String,
    pub decoded: Option<String>, // パーセントデコード後の文字列 (デコード前に失敗した場合はNone)
    pub reason: String,
}

impl Hand {
    pub fn url(&self) -> &str {
        match self {
            Self::Decoded(h) => &h.url,
            Self::Failed(h) => &h.url,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded(_))
    }

    pub fn names(&self) -> Option<&[String; SEAT]> {
        match self {
            Self::Decoded(h) => Some(&h.names),
            Self::Failed(_) => None,
        }
    }

    pub fn start_point(&self, seat: Seat) -> Option<Score> {
        match self {
            Self::Decoded(h) => Some(h.start_points[seat]),
            Self::Failed(_) => None,
        }
    }

    // 失敗したURLでも収支は0点扱い
    pub fn get_point(&self, seat: Seat) -> Score {
        match self {
            Self::Decoded(h) => h.get_points[seat],
            Self::Failed(_) => 0,
        }
    }
}

impl fmt::Display for DecodedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}局 {}本場 供託{} {}",
            self.round, self.hand, self.homba, self.riichi_stick, self.end_of_a_hand
        )?;
        for s in 0..SEAT {
            write!(
                f,
                " {}:{}({:+})",
                self.names[s], self.start_points[s], self.get_points[s]
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decoded(h) => write!(f, "{}", h),
            Self::Failed(h) => write!(f, "(failed: {})", h.reason),
        }
    }
}
