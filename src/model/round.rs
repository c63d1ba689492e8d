use super::*;

// 天鳳形式の局番号 (0~7) は場と局を1つの値にまとめたもの
// 0~3: 東1局~東4局, 4~7: 南1局~南4局
pub type RoundNumber = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid round number: {0}")]
pub struct InvalidRoundNumber(pub RoundNumber);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Round {
    #[serde(rename = "東")]
    East,
    #[serde(rename = "南")]
    South,
}

impl Round {
    pub fn from_number(n: RoundNumber) -> Result<Self, InvalidRoundNumber> {
        match n {
            0..=3 => Ok(Self::East),
            4..=7 => Ok(Self::South),
            _ => Err(InvalidRoundNumber(n)),
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::East => write!(f, "東"),
            Self::South => write!(f, "南"),
        }
    }
}

// 局番号から場の中での局 (1~4) を返却
pub fn hand_of(n: RoundNumber) -> Result<u8, InvalidRoundNumber> {
    match n {
        0..=7 => Ok((n % 4) as u8 + 1),
        _ => Err(InvalidRoundNumber(n)),
    }
}

#[inline]
pub fn round_of(n: RoundNumber) -> Result<Round, InvalidRoundNumber> {
    Round::from_number(n)
}

#[test]
fn test_round_number() {
    for n in 0..8 {
        let r = round_of(n).unwrap();
        assert_eq!(r, if n < 4 { Round::East } else { Round::South });
        assert_eq!(hand_of(n).unwrap() as i64, n % 4 + 1);
    }
    assert_eq!(hand_of(0), Ok(1));
    assert_eq!(hand_of(4), Ok(1));
    assert_eq!(hand_of(7), Ok(4));
}

#[test]
fn test_invalid_round_number() {
    for n in [-1, 8, 9, 100, i64::MIN, i64::MAX] {
        assert_eq!(round_of(n), Err(InvalidRoundNumber(n)));
        assert_eq!(hand_of(n), Err(InvalidRoundNumber(n)));
    }
}

#[test]
fn test_round_display() {
    assert_eq!(Round::East.to_string(), "東");
    assert_eq!(Round::South.to_string(), "南");
    assert_eq!(serde_json::to_string(&Round::South).unwrap(), "\"南\"");
}
